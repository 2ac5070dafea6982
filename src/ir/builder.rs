use crate::frontend::arm::types::Reg;
use crate::ir::block::MicroBlock;
use crate::ir::flags::ArmFlags;
use crate::ir::location::LocationDescriptor;
use crate::ir::opcode::MicroOp;
use crate::ir::terminal::Terminal;
use crate::ir::value::{NodeData, ValueRef};

/// Convenience layer for constructing a [`MicroBlock`].
///
/// Tracks which flags have been written to the block so far; the translator's
/// condition gate relies on this to keep flag reads ordered after flag writes.
pub struct MicroBuilder {
    pub block: MicroBlock,
    pub flags_written: ArmFlags,
}

impl MicroBuilder {
    pub fn new(location: LocationDescriptor) -> Self {
        Self {
            block: MicroBlock::new(location),
            flags_written: ArmFlags::empty(),
        }
    }

    pub fn get_gpr(&mut self, reg: Reg) -> ValueRef {
        self.block.append(NodeData::GetGPR(reg), &[])
    }

    pub fn const_u32(&mut self, value: u32) -> ValueRef {
        self.block.append(NodeData::ConstU32(value), &[])
    }

    pub fn set_gpr(&mut self, reg: Reg, value: ValueRef) -> ValueRef {
        self.block.append(NodeData::SetGPR(reg), &[value])
    }

    /// Append a one-argument microinstruction. `write_flags` must be a subset
    /// of the opcode's default write set.
    pub fn inst1(&mut self, op: MicroOp, a: ValueRef, write_flags: ArmFlags) -> ValueRef {
        let value = self.block.append(NodeData::Inst(op), &[a]);
        self.block.set_write_flags(value, write_flags);
        self.flags_written |= write_flags;
        value
    }

    /// Append a two-argument microinstruction.
    pub fn inst2(
        &mut self,
        op: MicroOp,
        a: ValueRef,
        b: ValueRef,
        write_flags: ArmFlags,
    ) -> ValueRef {
        let value = self.block.append(NodeData::Inst(op), &[a, b]);
        self.block.set_write_flags(value, write_flags);
        self.flags_written |= write_flags;
        value
    }

    pub fn set_term(&mut self, terminal: Terminal) {
        self.block.set_terminal(terminal);
    }
}
