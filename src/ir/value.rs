use std::fmt;

use crate::frontend::arm::types::Reg;
use crate::ir::flags::ArmFlags;
use crate::ir::opcode::MicroOp;
use crate::ir::types::MicroType;

/// Index of a value in its owning block's node arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ValueRef(pub u32);

impl ValueRef {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ValueRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "%{}", self.0)
    }
}

/// Maximum number of argument slots per node. The three-address encoding caps
/// at two sources, so the IR does too.
pub const MAX_ARGS: usize = 2;

/// Payload distinguishing the node kinds of the SSA graph.
///
/// `ConstU32`, `GetGPR` and `SetGPR` are first-class node kinds carrying their
/// payload directly; every other microinstruction is an `Inst`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeData {
    /// Slot of a removed node. Kept so `ValueRef`s stay stable.
    Tombstone,
    ConstU32(u32),
    GetGPR(Reg),
    SetGPR(Reg),
    Inst(MicroOp),
}

/// A single SSA node owned by a [`MicroBlock`](crate::ir::block::MicroBlock)
/// arena.
///
/// Forward edges are argument slots holding `ValueRef`s into the same arena;
/// back edges are the use list, one entry per argument edge that targets this
/// node (so the same consumer may appear more than once).
#[derive(Debug, Clone)]
pub struct MicroValue {
    pub(crate) data: NodeData,
    pub(crate) args: [Option<ValueRef>; MAX_ARGS],
    pub(crate) write_flags: ArmFlags,
    pub(crate) uses: Vec<ValueRef>,
}

impl MicroValue {
    pub(crate) fn new(data: NodeData) -> Self {
        let write_flags = match data {
            NodeData::Inst(op) => op.info().default_write_flags,
            _ => ArmFlags::empty(),
        };
        Self {
            data,
            args: [None; MAX_ARGS],
            write_flags,
            uses: Vec::new(),
        }
    }

    pub fn data(&self) -> NodeData {
        self.data
    }

    /// The micro-opcode this node represents.
    pub fn op(&self) -> MicroOp {
        match self.data {
            NodeData::ConstU32(_) => MicroOp::ConstU32,
            NodeData::GetGPR(_) => MicroOp::GetGPR,
            NodeData::SetGPR(_) => MicroOp::SetGPR,
            NodeData::Inst(op) => op,
            NodeData::Tombstone => panic!("op() on a removed value"),
        }
    }

    pub fn ty(&self) -> MicroType {
        match self.data {
            NodeData::ConstU32(_) | NodeData::GetGPR(_) => MicroType::U32,
            NodeData::SetGPR(_) => MicroType::Void,
            NodeData::Inst(op) => op.info().ret_type,
            NodeData::Tombstone => panic!("ty() on a removed value"),
        }
    }

    pub fn num_args(&self) -> usize {
        match self.data {
            NodeData::ConstU32(_) | NodeData::GetGPR(_) => 0,
            NodeData::SetGPR(_) => 1,
            NodeData::Inst(op) => op.num_args(),
            NodeData::Tombstone => 0,
        }
    }

    /// Flags this node reads, fixed by its opcode.
    pub fn read_flags(&self) -> ArmFlags {
        match self.data {
            NodeData::Inst(op) => op.info().read_flags,
            _ => ArmFlags::empty(),
        }
    }

    /// Flags this node writes; defaults from the opcode table, possibly
    /// narrowed by the builder.
    pub fn write_flags(&self) -> ArmFlags {
        self.write_flags
    }

    pub fn has_uses(&self) -> bool {
        !self.uses.is_empty()
    }

    pub fn use_count(&self) -> usize {
        self.uses.len()
    }

    pub fn is_tombstone(&self) -> bool {
        matches!(self.data, NodeData::Tombstone)
    }
}
