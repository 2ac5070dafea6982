//! The micro-interpreter: owns the architectural state and a cache of lowered
//! blocks, and drives translation from its dispatch loop.

use log::debug;

use crate::backend::interp::cache::BlockCache;
use crate::backend::interp::tac::{lower, TacBlock, TacInst};
use crate::config::{Callbacks, InterpreterConfig};
use crate::context::ThreadContext;
use crate::frontend::arm::translate::translate;
use crate::ir::cond::Cond;
use crate::ir::location::LocationDescriptor;
use crate::ir::opcode::MicroOp;
use crate::ir::terminal::Terminal;
use crate::state::{CpuState, Psr, CP15Register, VFPSystemRegister};

/// Size of the TAC virtual register file: ids 0-15 shadow the GPRs, the rest
/// are per-block temporaries.
const TAC_REG_COUNT: usize = 1 << 16;

/// Default tick budget for a `run` slice when the embedder has not set one.
const DEFAULT_SLICE_LENGTH: i64 = 20_000;

/// The TAC virtual register file, reused across blocks, plus the condition
/// under which the next block is entered.
struct TacRunState {
    regs: Box<[u32]>,
    cond: Cond,
}

impl TacRunState {
    fn new() -> Self {
        Self {
            regs: vec![0; TAC_REG_COUNT].into_boxed_slice(),
            cond: Cond::AL,
        }
    }
}

/// NZCV, T and E unpacked from the CPSR for the duration of one block.
struct Flags {
    n: bool,
    z: bool,
    c: bool,
    v: bool,
    t: bool,
    e: bool,
}

/// CPU core executing guest code through the translate/lower/cache pipeline.
///
/// Single-threaded cooperative: the dispatcher is never re-entered, and
/// execution suspends only at block boundaries.
pub struct MicroInterpreter {
    state: CpuState,
    callbacks: Box<dyn Callbacks>,
    cache: BlockCache,
    run_state: TacRunState,
    reschedule: bool,
    instrs_remaining: i64,
    down_count: i64,
    page_table: u64,
    id: u32,
}

impl MicroInterpreter {
    pub fn new(config: InterpreterConfig) -> Self {
        Self {
            state: CpuState::new(),
            callbacks: config.callbacks,
            cache: BlockCache::new(),
            run_state: TacRunState::new(),
            reschedule: false,
            instrs_remaining: 0,
            down_count: DEFAULT_SLICE_LENGTH,
            page_table: 0,
            id: config.id,
        }
    }

    /// Execute guest instructions until the budget is spent or a reschedule is
    /// requested. At least one block is executed; execution only suspends at
    /// block boundaries.
    pub fn execute(&mut self, num_instructions: u64) {
        self.reschedule = false;
        self.instrs_remaining = num_instructions as i64;
        let mut ticks: u64 = 0;

        loop {
            let desc = self.current_location();

            if self.cache.get(&desc).is_none() {
                debug!("translating block at {}", desc);
                let callbacks = &*self.callbacks;
                let read = |vaddr: u32| callbacks.memory_read_code(vaddr);
                let micro = translate(desc, &read);
                let tac = lower(&micro);
                self.cache.insert(desc, tac);
            }

            let block = self.cache.get(&desc).expect("block was just inserted");
            let interpret_next =
                run_tac(&mut self.state, &mut self.run_state, block, &mut *self.callbacks);
            let cycles = block.cycles_consumed;

            self.instrs_remaining -= cycles as i64;
            ticks += cycles;

            if let Some(next) = interpret_next {
                let executed = self.callbacks.interpret(&mut self.state, next);
                assert!(executed >= 1, "the fallback interpreter must advance");
                // The instruction at `next` is already in the block's count.
                self.instrs_remaining -= (executed - 1) as i64;
                ticks += executed - 1;
            }

            if self.reschedule || self.instrs_remaining <= 0 {
                break;
            }
        }

        self.add_ticks(ticks);
    }

    /// Run a full timing slice.
    pub fn run(&mut self) {
        let slice = self.down_count.max(1) as u64;
        self.execute(slice);
    }

    /// Execute a single step. Suspension is only possible between blocks, so
    /// this runs exactly one block.
    pub fn step(&mut self) {
        self.execute(1);
    }

    /// Account `ticks` against the shared down-counter, invoking the host's
    /// timing hook when it crosses zero.
    pub fn add_ticks(&mut self, ticks: u64) {
        self.down_count -= ticks as i64;
        if self.down_count < 0 {
            self.callbacks.timing_advance();
        }
    }

    pub fn down_count(&self) -> i64 {
        self.down_count
    }

    pub fn set_down_count(&mut self, down_count: i64) {
        self.down_count = down_count;
    }

    /// Request that the dispatch loop exit at the next block boundary.
    /// Idempotent; also zeroes the in-flight instruction budget.
    pub fn prepare_reschedule(&mut self) {
        self.reschedule = true;
        self.instrs_remaining = 0;
    }

    /// Empty the block cache.
    pub fn clear_instruction_cache(&mut self) {
        self.cache.clear();
    }

    /// Drop cached blocks whose entry PC lies in `[start, start + length)`.
    pub fn invalidate_cache_range(&mut self, start: u32, length: u32) {
        self.cache.invalidate_range(start, length);
    }

    /// Note that guest page mappings changed. Translated code may no longer
    /// match guest memory, so the cache is dropped.
    pub fn set_page_table(&mut self, page_table: u64) {
        self.page_table = page_table;
        self.clear_instruction_cache();
    }

    /// Reset all architectural and run state and drop the cache.
    pub fn purge_state(&mut self) {
        self.state = CpuState::new();
        self.run_state = TacRunState::new();
        self.clear_instruction_cache();
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    // --- Register file access ---

    pub fn get_pc(&self) -> u32 {
        self.state.regs[15]
    }

    pub fn set_pc(&mut self, pc: u32) {
        self.state.regs[15] = pc;
    }

    pub fn get_reg(&self, index: usize) -> u32 {
        if index == 15 {
            return self.get_pc();
        }
        self.state.regs[index]
    }

    pub fn set_reg(&mut self, index: usize, value: u32) {
        if index == 15 {
            return self.set_pc(value);
        }
        self.state.regs[index] = value;
    }

    pub fn get_vfp_reg(&self, index: usize) -> u32 {
        self.state.ext_regs[index]
    }

    pub fn set_vfp_reg(&mut self, index: usize, value: u32) {
        self.state.ext_regs[index] = value;
    }

    pub fn get_vfp_system_reg(&self, reg: VFPSystemRegister) -> u32 {
        self.state.vfp_sys[reg as usize]
    }

    pub fn set_vfp_system_reg(&mut self, reg: VFPSystemRegister, value: u32) {
        self.state.vfp_sys[reg as usize] = value;
    }

    pub fn get_cpsr(&self) -> u32 {
        self.state.cpsr
    }

    pub fn set_cpsr(&mut self, cpsr: u32) {
        self.state.cpsr = cpsr;
    }

    pub fn get_cp15_register(&self, reg: CP15Register) -> u32 {
        self.state.cp15[reg as usize]
    }

    pub fn set_cp15_register(&mut self, reg: CP15Register, value: u32) {
        self.state.cp15[reg as usize] = value;
    }

    pub fn state(&self) -> &CpuState {
        &self.state
    }

    // --- Thread contexts ---

    pub fn new_context(&self) -> ThreadContext {
        ThreadContext::new()
    }

    /// See [`ThreadContext::reset`].
    pub fn reset_context(ctx: &mut ThreadContext, stack_top: u32, entry_point: u32, arg: u32) {
        ctx.reset(stack_top, entry_point, arg);
    }

    pub fn save_context(&self, ctx: &mut ThreadContext) {
        ctx.cpu_registers = self.state.regs;
        ctx.fpu_registers = self.state.ext_regs;
        ctx.cpsr = self.state.cpsr;
        ctx.fpscr = self.get_vfp_system_reg(VFPSystemRegister::Fpscr);
        ctx.fpexc = self.get_vfp_system_reg(VFPSystemRegister::Fpexc);
    }

    pub fn load_context(&mut self, ctx: &ThreadContext) {
        self.state.regs = ctx.cpu_registers;
        self.state.ext_regs = ctx.fpu_registers;
        self.state.cpsr = ctx.cpsr;
        self.set_vfp_system_reg(VFPSystemRegister::Fpscr, ctx.fpscr);
        self.set_vfp_system_reg(VFPSystemRegister::Fpexc, ctx.fpexc);
    }

    fn current_location(&self) -> LocationDescriptor {
        let psr = Psr(self.state.cpsr);
        LocationDescriptor {
            arm_pc: self.state.regs[15],
            t_flag: psr.t(),
            e_flag: psr.e(),
            cond: self.run_state.cond,
        }
    }
}

/// Execute one lowered block against the architectural state.
///
/// Returns the location to hand to the generic interpreter when the terminal
/// was `Interpret`.
fn run_tac(
    state: &mut CpuState,
    run: &mut TacRunState,
    block: &TacBlock,
    callbacks: &mut dyn Callbacks,
) -> Option<LocationDescriptor> {
    run.regs[..16].copy_from_slice(&state.regs);

    let psr = Psr(state.cpsr);
    let mut flags = Flags {
        n: psr.n(),
        z: psr.z(),
        c: psr.c(),
        v: psr.v(),
        t: psr.t(),
        e: psr.e(),
    };

    for &inst in &block.instructions {
        step_inst(inst, &mut run.regs, &mut flags, callbacks);
    }

    let interpret_next = eval_terminal(&block.terminal, run, &mut flags);

    let mut psr = Psr(state.cpsr);
    psr.set_n(flags.n);
    psr.set_z(flags.z);
    psr.set_c(flags.c);
    psr.set_v(flags.v);
    psr.set_t(flags.t);
    psr.set_e(flags.e);
    state.cpsr = psr.value();
    state.regs.copy_from_slice(&run.regs[..16]);

    interpret_next
}

fn step_inst(inst: TacInst, regs: &mut [u32], flags: &mut Flags, callbacks: &mut dyn Callbacks) {
    let write_flags = inst.writes_flags();
    let (dest, a, b) = (inst.dest as usize, inst.a as usize, inst.b as usize);

    match inst.op() {
        MicroOp::GetGPR => regs[dest] = regs[a],
        MicroOp::SetGPR => regs[a] = regs[b],
        MicroOp::ConstU32 => regs[dest] = inst.imm32(),
        MicroOp::PushRSBHint => regs[14] = regs[a],
        MicroOp::BranchWritePC => {
            let mask = if flags.t { 0xFFFF_FFFE } else { 0xFFFF_FFFC };
            regs[15] = regs[a] & mask;
        }
        MicroOp::BXWritePC => {
            let value = regs[a];
            flags.t = value & 1 != 0;
            regs[15] = value & if flags.t { 0xFFFF_FFFE } else { 0xFFFF_FFFC };
        }
        MicroOp::Add => {
            let (lhs, rhs) = (regs[a], regs[b]);
            let result = lhs.wrapping_add(rhs);
            regs[dest] = result;
            if write_flags {
                flags.n = result & 0x8000_0000 != 0;
                flags.z = result == 0;
                flags.c = result < lhs;
                flags.v = (lhs & 0x8000_0000) == (rhs & 0x8000_0000)
                    && (result & 0x8000_0000) != (lhs & 0x8000_0000);
            }
        }
        MicroOp::AddWithCarry => {
            let (lhs, rhs) = (regs[a], regs[b]);
            let carry_in = flags.c as u32;
            let wide = lhs as u64 + rhs as u64 + carry_in as u64;
            let result = wide as u32;
            regs[dest] = result;
            if write_flags {
                flags.n = result & 0x8000_0000 != 0;
                flags.z = result == 0;
                flags.c = wide > u32::MAX as u64;
                let signed = lhs as i32 as i64 + rhs as i32 as i64 + carry_in as i64;
                flags.v = signed != result as i32 as i64;
            }
        }
        MicroOp::Sub => {
            let (lhs, rhs) = (regs[a], regs[b]);
            let result = lhs.wrapping_sub(rhs);
            regs[dest] = result;
            if write_flags {
                flags.n = result & 0x8000_0000 != 0;
                flags.z = result == 0;
                flags.c = lhs >= rhs;
                flags.v = ((lhs ^ rhs) & (lhs ^ result)) & 0x8000_0000 != 0;
            }
        }
        MicroOp::And => {
            let result = regs[a] & regs[b];
            regs[dest] = result;
            if write_flags {
                // C belongs to the shifter operand, sequenced separately.
                flags.n = result & 0x8000_0000 != 0;
                flags.z = result == 0;
            }
        }
        MicroOp::Eor => {
            let result = regs[a] ^ regs[b];
            regs[dest] = result;
            if write_flags {
                flags.n = result & 0x8000_0000 != 0;
                flags.z = result == 0;
            }
        }
        MicroOp::Not => regs[dest] = !regs[a],
        MicroOp::LSL => {
            let value = regs[a];
            let amount = regs[b] & 0xFF;
            let (result, carry) = match amount {
                0 => (value, flags.c),
                1..=31 => (value << amount, value >> (32 - amount) & 1 != 0),
                32 => (0, value & 1 != 0),
                _ => (0, false),
            };
            regs[dest] = result;
            if write_flags {
                flags.c = carry;
            }
        }
        MicroOp::LSR => {
            let value = regs[a];
            let amount = regs[b] & 0xFF;
            let (result, carry) = match amount {
                0 => (value, flags.c),
                1..=31 => (value >> amount, value >> (amount - 1) & 1 != 0),
                32 => (0, value >> 31 != 0),
                _ => (0, false),
            };
            regs[dest] = result;
            if write_flags {
                flags.c = carry;
            }
        }
        MicroOp::ASR => {
            let value = regs[a];
            let amount = regs[b] & 0xFF;
            let (result, carry) = match amount {
                0 => (value, flags.c),
                1..=31 => (
                    ((value as i32) >> amount) as u32,
                    value >> (amount - 1) & 1 != 0,
                ),
                _ => {
                    let sign = value >> 31 != 0;
                    (if sign { u32::MAX } else { 0 }, sign)
                }
            };
            regs[dest] = result;
            if write_flags {
                flags.c = carry;
            }
        }
        MicroOp::ROR => {
            let value = regs[a];
            let amount = regs[b] & 0xFF;
            let (result, carry) = if amount == 0 {
                (value, flags.c)
            } else if amount & 31 == 0 {
                (value, value >> 31 != 0)
            } else {
                let result = value.rotate_right(amount & 31);
                (result, result >> 31 != 0)
            };
            regs[dest] = result;
            if write_flags {
                flags.c = carry;
            }
        }
        MicroOp::RRX => {
            let value = regs[a];
            regs[dest] = (flags.c as u32) << 31 | value >> 1;
            if write_flags {
                flags.c = value & 1 != 0;
            }
        }
        MicroOp::CountLeadingZeros => regs[dest] = regs[a].leading_zeros(),
        // No exclusive monitor is modelled.
        MicroOp::ClearExclusive => {}
        MicroOp::Read32 => regs[dest] = callbacks.memory_read_32(regs[a]),
    }
}

fn eval_terminal(
    terminal: &Terminal,
    run: &mut TacRunState,
    flags: &mut Flags,
) -> Option<LocationDescriptor> {
    match terminal {
        Terminal::ReturnToDispatch | Terminal::PopRSBHint => {
            run.cond = Cond::AL;
            None
        }
        Terminal::LinkBlock { next } | Terminal::LinkBlockFast { next } => {
            run.regs[15] = next.arm_pc;
            flags.t = next.t_flag;
            flags.e = next.e_flag;
            run.cond = next.cond;
            None
        }
        Terminal::Interpret { next } => {
            run.cond = Cond::AL;
            Some(*next)
        }
        Terminal::If { cond, then_, else_ } => {
            if cond.passed(flags.n, flags.z, flags.c, flags.v) {
                eval_terminal(then_, run, flags)
            } else {
                eval_terminal(else_, run, flags)
            }
        }
        Terminal::Invalid => panic!("executing a block with an invalid terminal"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Flat little-endian memory backed callbacks for testing.
    struct MockCallbacks {
        memory: Vec<u32>,
        timing_advances: std::rc::Rc<std::cell::Cell<u32>>,
    }

    impl MockCallbacks {
        fn new(code: &[u32]) -> Self {
            let mut memory = vec![0u32; 0x1000];
            memory[..code.len()].copy_from_slice(code);
            Self {
                memory,
                timing_advances: Default::default(),
            }
        }
    }

    impl Callbacks for MockCallbacks {
        fn memory_read_code(&self, vaddr: u32) -> u32 {
            self.memory.get((vaddr / 4) as usize).copied().unwrap_or(0xF7FF_FFFF)
        }

        fn memory_read_32(&self, vaddr: u32) -> u32 {
            self.memory_read_code(vaddr)
        }

        fn timing_advance(&mut self) {
            self.timing_advances.set(self.timing_advances.get() + 1);
        }
    }

    fn interpreter_for(code: &[u32]) -> MicroInterpreter {
        MicroInterpreter::new(InterpreterConfig {
            callbacks: Box::new(MockCallbacks::new(code)),
            id: 0,
        })
    }

    #[test]
    fn test_adds_then_branch_to_self() {
        // adds r1, r2, #3 ; b .
        let mut cpu = interpreter_for(&[0xE2921003, 0xEAFFFFFE]);
        for i in 0..15 {
            cpu.set_reg(i, i as u32);
        }

        cpu.execute(2);

        assert_eq!(cpu.get_reg(0), 0);
        assert_eq!(cpu.get_reg(1), 5);
        assert_eq!(cpu.get_reg(2), 2);
        assert_eq!(cpu.get_reg(3), 3);
        assert_eq!(cpu.get_reg(15), 4);
    }

    #[test]
    fn test_adds_sets_flags_on_wraparound() {
        // adds r0, r0, #1 with R0 = 0xFFFFFFFF
        let mut cpu = interpreter_for(&[0xE2900001, 0xEAFFFFFE]);
        cpu.set_reg(0, 0xFFFF_FFFF);

        cpu.execute(1);

        assert_eq!(cpu.get_reg(0), 0);
        let psr = Psr(cpu.get_cpsr());
        assert!(!psr.n());
        assert!(psr.z());
        assert!(psr.c());
        assert!(!psr.v());
    }

    #[test]
    fn test_adds_signed_overflow_sets_v() {
        // adds r0, r0, #1 with R0 = 0x7FFFFFFF
        let mut cpu = interpreter_for(&[0xE2900001, 0xEAFFFFFE]);
        cpu.set_reg(0, 0x7FFF_FFFF);

        cpu.execute(1);

        assert_eq!(cpu.get_reg(0), 0x8000_0000);
        let psr = Psr(cpu.get_cpsr());
        assert!(psr.n());
        assert!(!psr.z());
        assert!(!psr.c());
        assert!(psr.v());
    }

    #[test]
    fn test_add_without_s_leaves_flags_alone() {
        let mut cpu = interpreter_for(&[0xE2800001, 0xEAFFFFFE]); // add r0, r0, #1
        cpu.set_reg(0, 0xFFFF_FFFF);
        let cpsr_before = cpu.get_cpsr();

        cpu.execute(1);

        assert_eq!(cpu.get_reg(0), 0);
        assert_eq!(cpu.get_cpsr(), cpsr_before);
    }

    #[test]
    fn test_block_reexecution_uses_cache() {
        // add r1, r1, #1 ; b 0, a two-instruction loop.
        let mut cpu = interpreter_for(&[0xE2811001, 0xEAFFFFFD]);

        cpu.execute(20);
        // 10 iterations of the 2-cycle loop.
        assert_eq!(cpu.get_reg(1), 10);
        assert_eq!(cpu.cache.len(), 1);
    }

    #[test]
    fn test_budget_counts_cycles_not_blocks() {
        let mut cpu = interpreter_for(&[0xE2811001, 0xEAFFFFFD]);
        cpu.execute(3);
        // 2 cycles per loop; the budget of 3 admits two passes (do-while).
        assert_eq!(cpu.get_reg(1), 2);
    }

    #[test]
    fn test_add_ticks_invokes_timing_hook() {
        let callbacks = MockCallbacks::new(&[]);
        let advances = callbacks.timing_advances.clone();
        let mut cpu = MicroInterpreter::new(InterpreterConfig {
            callbacks: Box::new(callbacks),
            id: 0,
        });

        cpu.set_down_count(5);
        cpu.add_ticks(3);
        assert_eq!(advances.get(), 0);
        cpu.add_ticks(3);
        assert_eq!(advances.get(), 1);
        assert!(cpu.down_count() < 0);
    }

    #[test]
    fn test_register_accessors_route_r15_to_pc() {
        let mut cpu = interpreter_for(&[]);
        cpu.set_reg(15, 0x1234);
        assert_eq!(cpu.get_pc(), 0x1234);
        assert_eq!(cpu.get_reg(15), 0x1234);
    }

    #[test]
    fn test_vfp_cpsr_and_cp15_accessors() {
        let mut cpu = interpreter_for(&[]);
        cpu.set_vfp_reg(63, 7);
        assert_eq!(cpu.get_vfp_reg(63), 7);
        cpu.set_vfp_system_reg(VFPSystemRegister::Fpscr, 0x0300_0000);
        assert_eq!(cpu.get_vfp_system_reg(VFPSystemRegister::Fpscr), 0x0300_0000);
        cpu.set_cpsr(0xF000_001F);
        assert_eq!(cpu.get_cpsr(), 0xF000_001F);
        cpu.set_cp15_register(CP15Register::ThreadUprw, 0xAB);
        assert_eq!(cpu.get_cp15_register(CP15Register::ThreadUprw), 0xAB);
    }

    #[test]
    fn test_context_save_load_round_trip() {
        let mut cpu = interpreter_for(&[]);
        for i in 0..16 {
            cpu.set_reg(i, 100 + i as u32);
        }
        cpu.set_cpsr(0x6000_001F);
        cpu.set_vfp_reg(3, 0x42);
        cpu.set_vfp_system_reg(VFPSystemRegister::Fpscr, 1);
        cpu.set_vfp_system_reg(VFPSystemRegister::Fpexc, 2);

        let mut ctx = cpu.new_context();
        cpu.save_context(&mut ctx);

        let mut other = interpreter_for(&[]);
        other.load_context(&ctx);
        assert_eq!(other.get_reg(4), 104);
        assert_eq!(other.get_pc(), 115);
        assert_eq!(other.get_cpsr(), 0x6000_001F);
        assert_eq!(other.get_vfp_reg(3), 0x42);
        assert_eq!(other.get_vfp_system_reg(VFPSystemRegister::Fpexc), 2);
    }

    #[test]
    fn test_reset_context_enters_user_mode() {
        let mut ctx = ThreadContext::new();
        MicroInterpreter::reset_context(&mut ctx, 0x0FFF_0000, 0x0010_0000, 9);
        assert_eq!(ctx.cpu_registers[0], 9);
        assert_eq!(ctx.program_counter(), 0x0010_0000);
        assert_eq!(ctx.stack_pointer(), 0x0FFF_0000);
        assert_eq!(ctx.cpsr, crate::state::USER32_MODE);
    }

    #[test]
    fn test_purge_state_resets_everything() {
        let mut cpu = interpreter_for(&[0xE2811001, 0xEAFFFFFD]);
        cpu.execute(4);
        assert!(cpu.cache.len() > 0);
        cpu.purge_state();
        assert_eq!(cpu.cache.len(), 0);
        assert_eq!(cpu.get_reg(1), 0);
        assert_eq!(cpu.get_cpsr(), crate::state::USER32_MODE);
    }

    #[test]
    fn test_set_page_table_drops_cache() {
        let mut cpu = interpreter_for(&[0xE2811001, 0xEAFFFFFD]);
        cpu.execute(2);
        assert_eq!(cpu.cache.len(), 1);
        cpu.set_page_table(1);
        assert_eq!(cpu.cache.len(), 0);
    }

    #[test]
    fn test_conditional_split_creates_two_cache_entries() {
        // addeq r1, r2, #3 ; b .; entered under AL, the ADDEQ splits into its
        // own EQ-keyed block.
        let mut cpu = interpreter_for(&[0x02921003, 0xEAFFFFFE]);
        cpu.set_reg(2, 2);
        cpu.set_cpsr(cpu.get_cpsr() | 1 << 30); // Z set, so EQ holds

        cpu.execute(2);

        assert_eq!(cpu.get_reg(1), 5);
        assert!(cpu
            .cache
            .get(&LocationDescriptor::at(0).with_cond(Cond::EQ))
            .is_some());
    }

    fn run_single_block(
        build: impl FnOnce(&mut crate::ir::builder::MicroBuilder),
        state: &mut CpuState,
    ) {
        use crate::ir::builder::MicroBuilder;

        let mut ir = MicroBuilder::new(LocationDescriptor::at(0));
        build(&mut ir);
        ir.set_term(Terminal::ReturnToDispatch);
        let tac = lower(&ir.block);

        let mut run = TacRunState::new();
        let mut callbacks = MockCallbacks::new(&[]);
        assert!(run_tac(state, &mut run, &tac, &mut callbacks).is_none());
    }

    #[test]
    fn test_add_with_carry_includes_carry_in() {
        use crate::frontend::arm::types::Reg;
        use crate::ir::flags::ArmFlags;

        let mut state = CpuState::new();
        state.regs[0] = 0xFFFF_FFFF;
        state.regs[1] = 0;
        let mut psr = Psr(state.cpsr);
        psr.set_c(true);
        state.cpsr = psr.value();

        run_single_block(
            |ir| {
                let a = ir.get_gpr(Reg::R0);
                let b = ir.get_gpr(Reg::R1);
                let sum = ir.inst2(MicroOp::AddWithCarry, a, b, ArmFlags::NZCV);
                ir.set_gpr(Reg::R2, sum);
            },
            &mut state,
        );

        // 0xFFFFFFFF + 0 + carry = 0 with carry out, no overflow.
        assert_eq!(state.regs[2], 0);
        let psr = Psr(state.cpsr);
        assert!(psr.z());
        assert!(psr.c());
        assert!(!psr.v());
    }

    #[test]
    fn test_shift_semantics_and_carry_out() {
        use crate::frontend::arm::types::Reg;
        use crate::ir::flags::ArmFlags;

        let mut state = CpuState::new();
        state.regs[0] = 0x8000_0001;
        state.regs[1] = 1;

        run_single_block(
            |ir| {
                let value = ir.get_gpr(Reg::R0);
                let amount = ir.get_gpr(Reg::R1);
                let lsl = ir.inst2(MicroOp::LSL, value, amount, ArmFlags::C);
                ir.set_gpr(Reg::R2, lsl);
                let asr = ir.inst2(MicroOp::ASR, value, amount, ArmFlags::empty());
                ir.set_gpr(Reg::R3, asr);
                let ror = ir.inst2(MicroOp::ROR, value, amount, ArmFlags::empty());
                ir.set_gpr(Reg::R4, ror);
            },
            &mut state,
        );

        assert_eq!(state.regs[2], 0x0000_0002);
        assert!(Psr(state.cpsr).c(), "LSL #1 carries out bit 31");
        assert_eq!(state.regs[3], 0xC000_0000);
        assert_eq!(state.regs[4], 0xC000_0000);
    }

    #[test]
    fn test_bx_write_pc_switches_instruction_set() {
        use crate::frontend::arm::types::Reg;
        use crate::ir::flags::ArmFlags;

        let mut state = CpuState::new();
        state.regs[0] = 0x0000_1235; // bit 0 selects Thumb

        run_single_block(
            |ir| {
                let target = ir.get_gpr(Reg::R0);
                ir.inst1(MicroOp::BXWritePC, target, ArmFlags::empty());
            },
            &mut state,
        );

        assert_eq!(state.regs[15], 0x0000_1234);
        assert!(Psr(state.cpsr).t());
    }

    #[test]
    fn test_terminal_if_selects_by_flags() {
        let mut run = TacRunState::new();
        let mut flags = Flags { n: false, z: true, c: false, v: false, t: false, e: false };
        let term = Terminal::if_then_else(
            Cond::EQ,
            Terminal::LinkBlock { next: LocationDescriptor::at(0x10) },
            Terminal::LinkBlock { next: LocationDescriptor::at(0x20) },
        );

        assert!(eval_terminal(&term, &mut run, &mut flags).is_none());
        assert_eq!(run.regs[15], 0x10);

        flags.z = false;
        assert!(eval_terminal(&term, &mut run, &mut flags).is_none());
        assert_eq!(run.regs[15], 0x20);
    }
}
