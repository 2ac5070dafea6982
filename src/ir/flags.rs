use std::fmt;

use bitflags::bitflags;

bitflags! {
    /// The ARM status flags a microinstruction may read or write.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ArmFlags: u8 {
        const N  = 1 << 0;
        const Z  = 1 << 1;
        const C  = 1 << 2;
        const V  = 1 << 3;
        const Q  = 1 << 4;
        const GE = 1 << 5;

        const NZC  = Self::N.bits() | Self::Z.bits() | Self::C.bits();
        const NZCV = Self::N.bits() | Self::Z.bits() | Self::C.bits() | Self::V.bits();
        const ANY  = Self::NZCV.bits() | Self::Q.bits() | Self::GE.bits();
    }
}

impl fmt::Display for ArmFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "-");
        }
        for (name, flag) in [
            ("N", ArmFlags::N),
            ("Z", ArmFlags::Z),
            ("C", ArmFlags::C),
            ("V", ArmFlags::V),
            ("Q", ArmFlags::Q),
            ("GE", ArmFlags::GE),
        ] {
            if self.contains(flag) {
                write!(f, "{}", name)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_composites() {
        assert_eq!(ArmFlags::NZC, ArmFlags::N | ArmFlags::Z | ArmFlags::C);
        assert_eq!(ArmFlags::NZCV, ArmFlags::NZC | ArmFlags::V);
        assert!(ArmFlags::ANY.contains(ArmFlags::GE));
        assert!(!ArmFlags::NZCV.contains(ArmFlags::Q));
    }

    #[test]
    fn test_flag_display() {
        assert_eq!(format!("{}", ArmFlags::NZCV), "NZCV");
        assert_eq!(format!("{}", ArmFlags::C), "C");
        assert_eq!(format!("{}", ArmFlags::empty()), "-");
    }
}
