//! ARMv6 dynamic binary translator.
//!
//! Guest instruction words are decoded into a visitor-dispatched opcode set,
//! translated into an SSA intermediate representation organised in basic
//! blocks, lowered to a compact three-address form, and executed by an
//! interpreter that models the ARM register file and NZCV flags. Blocks are
//! cached per [`LocationDescriptor`]; the interpreter's dispatch loop is the
//! only driver of translation.
//!
//! The host supplies guest memory, timing and an optional fallback
//! interpreter through [`Callbacks`].

pub mod backend;
pub mod config;
pub mod context;
pub mod frontend;
pub mod ir;
pub mod state;

pub use backend::interp::MicroInterpreter;
pub use config::{Callbacks, InterpreterConfig};
pub use context::ThreadContext;
pub use ir::location::LocationDescriptor;
pub use state::{CpuState, CP15Register, VFPSystemRegister};
