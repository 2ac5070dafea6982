use std::fmt;

use crate::ir::cond::Cond;
use crate::ir::location::LocationDescriptor;

/// Terminal instruction of a block.
///
/// Determines control flow after the block's instructions execute. A block has
/// exactly one terminal; `Invalid` only exists while a block is under
/// construction.
#[derive(Debug, Clone, PartialEq)]
pub enum Terminal {
    /// Unset terminal on a block still being built.
    Invalid,

    /// Return control to the dispatcher, which reads R15 and CPSR to decide
    /// what comes next.
    ReturnToDispatch,

    /// Check the return stack buffer for a predicted return target. A backend
    /// without an RSB executes this exactly as `ReturnToDispatch`.
    PopRSBHint,

    /// Invoke the generic interpreter starting at `next`. The interpreter must
    /// advance at least one instruction but may choose to run more.
    Interpret { next: LocationDescriptor },

    /// Jump to the block at `next` if cycles remain, else return to the
    /// dispatcher.
    LinkBlock { next: LocationDescriptor },

    /// Unconditionally jump to the block at `next`. Only legal when this is
    /// guaranteed not to hang; in practice, short forward jumps.
    LinkBlockFast { next: LocationDescriptor },

    /// Evaluate `cond` against the live flags and continue with one of the two
    /// nested terminals.
    If {
        cond: Cond,
        then_: Box<Terminal>,
        else_: Box<Terminal>,
    },
}

impl Terminal {
    pub fn is_invalid(&self) -> bool {
        matches!(self, Terminal::Invalid)
    }

    pub fn if_then_else(cond: Cond, then_: Terminal, else_: Terminal) -> Self {
        Terminal::If {
            cond,
            then_: Box::new(then_),
            else_: Box::new(else_),
        }
    }
}

impl fmt::Display for Terminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Terminal::Invalid => write!(f, "Invalid"),
            Terminal::ReturnToDispatch => write!(f, "ReturnToDispatch"),
            Terminal::PopRSBHint => write!(f, "PopRSBHint"),
            Terminal::Interpret { next } => write!(f, "Interpret({})", next),
            Terminal::LinkBlock { next } => write!(f, "LinkBlock({})", next),
            Terminal::LinkBlockFast { next } => write!(f, "LinkBlockFast({})", next),
            Terminal::If { cond, then_, else_ } => {
                write!(f, "If({}, {}, {})", cond, then_, else_)
            }
        }
    }
}
