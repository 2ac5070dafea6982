//! Microinstruction intermediate representation.
//!
//! An SSA IR for an idealised ARM CPU. Each node is a microinstruction; a
//! guest instruction becomes zero or more of them. A [`block::MicroBlock`]
//! owns its nodes in an arena and ends in exactly one
//! [`terminal::Terminal`]. The IR is linear: instruction order carries the
//! ordering of flag reads and writes.

pub mod block;
pub mod builder;
pub mod cond;
pub mod flags;
pub mod location;
pub mod opcode;
pub mod terminal;
pub mod types;
pub mod value;
pub mod verify;

pub use block::MicroBlock;
pub use builder::MicroBuilder;
pub use cond::Cond;
pub use flags::ArmFlags;
pub use location::LocationDescriptor;
pub use opcode::{MicroOp, MicroOpInfo};
pub use terminal::Terminal;
pub use types::MicroType;
pub use value::{MicroValue, NodeData, ValueRef};
