//! Interpreter backend: SSA blocks are lowered to a flat three-address form
//! and executed against the architectural state.

pub mod cache;
pub mod interpreter;
pub mod tac;

pub use cache::BlockCache;
pub use interpreter::MicroInterpreter;
pub use tac::{lower, TacBlock, TacInst};
