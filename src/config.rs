use crate::ir::location::LocationDescriptor;
use crate::state::CpuState;

/// Host callbacks consumed by the translator and interpreter.
pub trait Callbacks {
    /// Read a 32-bit instruction word from guest memory, ARM little-endian.
    /// Whatever this returns is authoritative, including for unmapped
    /// addresses; the host defines that behaviour.
    fn memory_read_code(&self, vaddr: u32) -> u32;

    /// Read 32 bits of data from guest memory.
    fn memory_read_32(&self, vaddr: u32) -> u32;

    /// Invoked whenever the interpreter's tick down-counter crosses zero.
    fn timing_advance(&mut self) {}

    /// Generic interpreter fallback for an `Interpret` terminal.
    ///
    /// Must execute at least one guest instruction starting at `next` against
    /// `state` and return how many it executed. The default refuses, matching
    /// a build without a fallback interpreter attached.
    fn interpret(&mut self, state: &mut CpuState, next: LocationDescriptor) -> u64 {
        let _ = state;
        panic!("no generic interpreter available to execute {}", next);
    }
}

/// Configuration for creating a [`MicroInterpreter`](crate::MicroInterpreter).
pub struct InterpreterConfig {
    /// Host callbacks for guest memory, timing and the fallback interpreter.
    pub callbacks: Box<dyn Callbacks>,
    /// Core id reported through the CPU interface.
    pub id: u32,
}
