use std::fmt;

use crate::ir::cond::Cond;

/// Identifies a basic block entry point.
///
/// Everything about the guest state that affects how the code at `arm_pc`
/// translates is part of the key: the instruction set (T), the data endianness
/// (E), and the condition under which the block is entered. Two descriptors
/// differing in any field name distinct cache entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LocationDescriptor {
    pub arm_pc: u32,
    /// Thumb (true) or ARM (false) instruction set.
    pub t_flag: bool,
    /// Big-endian (true) or little-endian (false) data accesses.
    pub e_flag: bool,
    /// Condition under which this block is entered.
    pub cond: Cond,
}

impl LocationDescriptor {
    pub fn new(arm_pc: u32, t_flag: bool, e_flag: bool, cond: Cond) -> Self {
        Self { arm_pc, t_flag, e_flag, cond }
    }

    /// Descriptor for ARM code at `arm_pc`, little-endian, unconditional.
    pub fn at(arm_pc: u32) -> Self {
        Self::new(arm_pc, false, false, Cond::AL)
    }

    pub fn with_pc(self, arm_pc: u32) -> Self {
        Self { arm_pc, ..self }
    }

    pub fn with_cond(self, cond: Cond) -> Self {
        Self { cond, ..self }
    }

    pub fn with_t_flag(self, t_flag: bool) -> Self {
        Self { t_flag, ..self }
    }

    pub fn advance_pc(self, amount: i32) -> Self {
        Self { arm_pc: self.arm_pc.wrapping_add(amount as u32), ..self }
    }
}

impl fmt::Display for LocationDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{pc:{:#x} T:{} E:{} {}}}",
            self.arm_pc, self.t_flag as u8, self.e_flag as u8, self.cond
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    fn hash_of(loc: LocationDescriptor) -> u64 {
        let mut hasher = DefaultHasher::new();
        loc.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_location_equality_over_all_fields() {
        let base = LocationDescriptor::at(0x1000);
        assert_eq!(base, LocationDescriptor::new(0x1000, false, false, Cond::AL));
        assert_ne!(base, base.with_pc(0x1004));
        assert_ne!(base, base.with_t_flag(true));
        assert_ne!(base, LocationDescriptor::new(0x1000, false, true, Cond::AL));
        assert_ne!(base, base.with_cond(Cond::EQ));
    }

    #[test]
    fn test_location_hash_differs_by_state() {
        let base = LocationDescriptor::at(0x1000);
        assert_ne!(hash_of(base), hash_of(base.with_t_flag(true)));
        assert_ne!(hash_of(base), hash_of(base.with_cond(Cond::NE)));
    }

    #[test]
    fn test_advance_pc_wraps() {
        let loc = LocationDescriptor::at(0xFFFF_FFFC);
        assert_eq!(loc.advance_pc(4).arm_pc, 0);
        assert_eq!(loc.advance_pc(-4).arm_pc, 0xFFFF_FFF8);
    }
}
