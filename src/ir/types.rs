use std::fmt;

/// Type of the value a microinstruction produces.
///
/// `SetGPR` and the PC-write operations are the only `Void` producers; every
/// other producer yields a `U32`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MicroType {
    Void,
    U32,
}

impl fmt::Display for MicroType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MicroType::Void => write!(f, "void"),
            MicroType::U32 => write!(f, "u32"),
        }
    }
}
