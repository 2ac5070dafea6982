use std::fmt;

use crate::ir::flags::ArmFlags;
use crate::ir::types::MicroType;

/// The operation a microinstruction performs.
///
/// These are sub-operations of an ARM instruction, chosen for ease of
/// interpretation and future lowering work rather than to mirror any real
/// microarchitecture. The `u16` representation doubles as the opcode field of
/// the packed three-address encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum MicroOp {
    // Basic loads/stores
    ConstU32,          // value := const
    GetGPR,            // value := R[reg]
    SetGPR,            // R[reg] := $0

    // Optimisation hints
    PushRSBHint,       // R[14] := $0, pushing return info onto the return stack buffer

    // ARM PC writes (ARMv6 behaviour)
    BranchWritePC,     // R[15] := $0 & (T ? 0xFFFFFFFE : 0xFFFFFFFC)
    BXWritePC,         // T := $0 & 1, R[15] := $0 masked to the new alignment

    // ARM ALU
    Add,               // value := $0 + $1
    AddWithCarry,      // value := $0 + $1 + C
    Sub,               // value := $0 - $1
    And,               // value := $0 & $1
    Eor,               // value := $0 ^ $1
    Not,               // value := !$0
    LSL,               // value := $0 LSL $1
    LSR,               // value := $0 LSR $1
    ASR,               // value := $0 ASR $1
    ROR,               // value := $0 ROR $1
    RRX,               // value := $0 RRX
    CountLeadingZeros, // value := CLZ $0

    // ARM synchronisation
    ClearExclusive,    // clears the exclusive access record

    // Memory
    Read32,            // value := read32($0)
}

/// Signature of a micro-opcode: return type, required argument types, and the
/// flag sets it reads and may write.
#[derive(Debug, Clone, Copy)]
pub struct MicroOpInfo {
    pub ret_type: MicroType,
    pub arg_types: &'static [MicroType],
    pub read_flags: ArmFlags,
    pub default_write_flags: ArmFlags,
}

impl MicroOp {
    /// Signature of this opcode. A process-wide constant table; `MicroInst`
    /// construction and TAC lowering both validate against it.
    pub fn info(self) -> MicroOpInfo {
        use MicroOp::*;
        use MicroType::{Void, U32};

        const NO_ARGS: &[MicroType] = &[];
        const ONE_U32: &[MicroType] = &[U32];
        const TWO_U32: &[MicroType] = &[U32, U32];

        let none = ArmFlags::empty();
        let (ret_type, arg_types, read_flags, default_write_flags) = match self {
            ConstU32 => (U32, NO_ARGS, none, none),
            GetGPR => (U32, NO_ARGS, none, none),
            SetGPR => (Void, ONE_U32, none, none),
            PushRSBHint => (Void, ONE_U32, none, none),
            BranchWritePC => (Void, ONE_U32, none, none),
            BXWritePC => (Void, ONE_U32, none, none),
            Add => (U32, TWO_U32, none, ArmFlags::NZCV),
            AddWithCarry => (U32, TWO_U32, ArmFlags::C, ArmFlags::NZCV),
            Sub => (U32, TWO_U32, none, ArmFlags::NZCV),
            And => (U32, TWO_U32, none, ArmFlags::NZC),
            Eor => (U32, TWO_U32, none, ArmFlags::NZC),
            Not => (U32, ONE_U32, none, none),
            LSL | LSR | ASR | ROR => (U32, TWO_U32, none, ArmFlags::C),
            RRX => (U32, ONE_U32, ArmFlags::C, ArmFlags::C),
            CountLeadingZeros => (U32, ONE_U32, none, none),
            ClearExclusive => (Void, NO_ARGS, none, none),
            Read32 => (U32, ONE_U32, none, none),
        };
        MicroOpInfo { ret_type, arg_types, read_flags, default_write_flags }
    }

    pub fn num_args(self) -> usize {
        self.info().arg_types.len()
    }

    pub fn as_u16(self) -> u16 {
        self as u16
    }

    /// Recover an opcode from the low bits of a TAC opcode field.
    pub fn from_u16(value: u16) -> MicroOp {
        use MicroOp::*;
        const TABLE: &[MicroOp] = &[
            ConstU32, GetGPR, SetGPR, PushRSBHint, BranchWritePC, BXWritePC,
            Add, AddWithCarry, Sub, And, Eor, Not,
            LSL, LSR, ASR, ROR, RRX, CountLeadingZeros,
            ClearExclusive, Read32,
        ];
        TABLE[value as usize]
    }
}

impl fmt::Display for MicroOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_OPS: &[MicroOp] = &[
        MicroOp::ConstU32, MicroOp::GetGPR, MicroOp::SetGPR, MicroOp::PushRSBHint,
        MicroOp::BranchWritePC, MicroOp::BXWritePC, MicroOp::Add, MicroOp::AddWithCarry,
        MicroOp::Sub, MicroOp::And, MicroOp::Eor, MicroOp::Not, MicroOp::LSL,
        MicroOp::LSR, MicroOp::ASR, MicroOp::ROR, MicroOp::RRX,
        MicroOp::CountLeadingZeros, MicroOp::ClearExclusive, MicroOp::Read32,
    ];

    #[test]
    fn test_opcode_u16_round_trip() {
        for &op in ALL_OPS {
            assert_eq!(MicroOp::from_u16(op.as_u16()), op);
        }
    }

    #[test]
    fn test_opcode_table_entries() {
        let add = MicroOp::Add.info();
        assert_eq!(add.ret_type, MicroType::U32);
        assert_eq!(add.arg_types, &[MicroType::U32, MicroType::U32]);
        assert_eq!(add.read_flags, ArmFlags::empty());
        assert_eq!(add.default_write_flags, ArmFlags::NZCV);

        let adc = MicroOp::AddWithCarry.info();
        assert_eq!(adc.read_flags, ArmFlags::C);
        assert_eq!(adc.default_write_flags, ArmFlags::NZCV);

        let set = MicroOp::SetGPR.info();
        assert_eq!(set.ret_type, MicroType::Void);
        assert_eq!(set.arg_types.len(), 1);

        assert_eq!(MicroOp::ConstU32.num_args(), 0);
        assert_eq!(MicroOp::GetGPR.num_args(), 0);
    }

    #[test]
    fn test_every_op_fits_the_tac_encoding() {
        for &op in ALL_OPS {
            assert!(op.num_args() <= 2, "{} has too many args for TAC", op);
            assert!(op.as_u16() < 0x8000, "{} collides with the flag bit", op);
        }
    }
}
