//! ARM basic-block translation: guest instruction words to IR blocks.

use log::{debug, trace};

use crate::frontend::arm::decoder::{decode_arm, ArmVisitor};
use crate::frontend::arm::types::{arm_expand_imm, sign_extend, Reg};
use crate::ir::block::MicroBlock;
use crate::ir::builder::MicroBuilder;
use crate::ir::cond::Cond;
use crate::ir::flags::ArmFlags;
use crate::ir::location::LocationDescriptor;
use crate::ir::opcode::MicroOp;
use crate::ir::terminal::Terminal;
use crate::ir::value::{NodeData, ValueRef};

/// Translate one basic block of guest code starting at `desc`.
///
/// `read_code` reads instruction words from guest memory; whatever it returns
/// is authoritative.
pub fn translate(desc: LocationDescriptor, read_code: &dyn Fn(u32) -> u32) -> MicroBlock {
    if desc.t_flag {
        // Thumb translation is not supported; cede the block to the generic
        // interpreter.
        let mut ir = MicroBuilder::new(desc);
        ir.set_term(Terminal::Interpret { next: desc });
        ir.block.cycles_consumed = 1;
        return ir.block;
    }
    ArmTranslator::new(desc, read_code).translate()
}

/// Translates a straight run of ARM instructions into a single [`MicroBlock`].
///
/// Keeps a working cache of the current SSA value of each register so reads
/// within the block stay in SSA; modified registers are written back with
/// `SetGPR` at block end.
struct ArmTranslator<'a> {
    ir: MicroBuilder,
    current: LocationDescriptor,
    reg_values: [Option<ValueRef>; 15],
    instructions_translated: u64,
    stop_compilation: bool,
    read_code: &'a dyn Fn(u32) -> u32,
}

impl<'a> ArmTranslator<'a> {
    fn new(desc: LocationDescriptor, read_code: &'a dyn Fn(u32) -> u32) -> Self {
        Self {
            ir: MicroBuilder::new(desc),
            current: desc,
            reg_values: [None; 15],
            instructions_translated: 0,
            stop_compilation: false,
            read_code,
        }
    }

    fn translate(mut self) -> MicroBlock {
        loop {
            self.translate_single_instruction();
            // Blocks never cross a 4 KiB page: the next page's mapping may
            // change independently of this one.
            if self.stop_compilation || self.current.arm_pc & 0xFFF == 0 {
                break;
            }
        }

        if !self.stop_compilation {
            // Stopped at the page boundary; continue in a fresh block.
            self.ir.set_term(Terminal::LinkBlock { next: self.current });
        }

        // The register values were taken out of the GPRs and played with for a
        // while; put the modified ones back.
        for index in 0..self.reg_values.len() {
            if let Some(value) = self.reg_values[index] {
                let reg = Reg::from_u32(index as u32);
                if self.ir.block.get(value).data() != NodeData::GetGPR(reg) {
                    self.ir.set_gpr(reg, value);
                }
            }
        }

        self.ir.block.cycles_consumed = self.instructions_translated;
        self.ir.block
    }

    fn translate_single_instruction(&mut self) {
        let word = (self.read_code)(self.current.arm_pc & !3);
        match decode_arm(word) {
            Some(matcher) => {
                trace!("{}: {:08x} {}", self.current, word, matcher.name());
                self.instructions_translated += 1;
                matcher.visit(self, word);
                self.current.arm_pc = self.current.arm_pc.wrapping_add(4);
            }
            None => {
                debug!(
                    "undecodable instruction {:08x} at {:#010x}",
                    word, self.current.arm_pc
                );
                self.fallback_to_interpreter();
            }
        }
    }

    /// Current SSA value of `reg`. A PC read yields the fetch address plus 8.
    fn get_reg(&mut self, reg: Reg) -> ValueRef {
        if reg == Reg::PC {
            return self.ir.const_u32(self.pc());
        }
        let index = reg.number();
        match self.reg_values[index] {
            Some(value) => value,
            None => {
                let value = self.ir.get_gpr(reg);
                self.reg_values[index] = Some(value);
                value
            }
        }
    }

    /// Cache `value` as the new contents of `reg`; no IR is emitted here.
    fn set_reg(&mut self, reg: Reg, value: ValueRef) {
        debug_assert!(reg != Reg::PC, "PC writes go through the PC-write helpers");
        self.reg_values[reg.number()] = Some(value);
    }

    /// Gate for conditional instructions. Once any flag has been written to
    /// this block the condition can no longer be patterned against the entry
    /// flags, so the instruction re-decodes at the head of its own block keyed
    /// by its condition.
    fn condition_passed(&mut self, cond: Cond) -> bool {
        if cond == self.current.cond && self.ir.flags_written == ArmFlags::empty() {
            return true;
        }

        // This instruction was not actually translated.
        self.instructions_translated -= 1;

        let next = self.current.with_cond(cond);
        self.ir.set_term(Terminal::LinkBlock { next });
        self.stop_compilation = true;
        false
    }

    fn fallback_to_interpreter(&mut self) {
        self.ir.set_term(Terminal::Interpret { next: self.current });
        self.stop_compilation = true;
    }

    fn branch_write_pc(&mut self, new_pc: u32) {
        let next = self.current.with_pc(new_pc);
        self.ir.set_term(Terminal::LinkBlock { next });
        self.stop_compilation = true;
    }

    fn branch_write_pc_value(&mut self, new_pc: ValueRef) {
        self.ir.inst1(MicroOp::BranchWritePC, new_pc, ArmFlags::empty());
        self.ir.set_term(Terminal::ReturnToDispatch);
        self.stop_compilation = true;
    }

    #[allow(dead_code)]
    fn bx_write_pc(&mut self, new_pc: u32) {
        let t_flag = new_pc & 1 != 0;
        let mask = if t_flag { 0xFFFF_FFFE } else { 0xFFFF_FFFC };
        let next = self.current.with_pc(new_pc & mask).with_t_flag(t_flag);
        self.ir.set_term(Terminal::LinkBlock { next });
        self.stop_compilation = true;
    }

    #[allow(dead_code)]
    fn bx_write_pc_value(&mut self, new_pc: ValueRef) {
        self.ir.inst1(MicroOp::BXWritePC, new_pc, ArmFlags::empty());
        self.ir.set_term(Terminal::ReturnToDispatch);
        self.stop_compilation = true;
    }

    /// ALU writes to the PC branch without interworking on ARMv6.
    fn alu_write_pc(&mut self, new_pc: ValueRef) {
        self.branch_write_pc_value(new_pc);
    }

    /// Value of a PC read at the current instruction.
    fn pc(&self) -> u32 {
        self.current.arm_pc.wrapping_add(8)
    }
}

impl ArmVisitor for ArmTranslator<'_> {
    fn fallback(&mut self) {
        self.fallback_to_interpreter();
    }

    fn add_imm(&mut self, cond: Cond, s: bool, n: Reg, d: Reg, rotate: u32, imm8: u32) {
        // Decode
        let expanded = arm_expand_imm(imm8, rotate);
        let write_flags = if s { ArmFlags::NZCV } else { ArmFlags::empty() };

        // Execute
        if !self.condition_passed(cond) {
            return;
        }

        let rn = self.get_reg(n);
        let imm32 = self.ir.const_u32(expanded);
        let result = self.ir.inst2(MicroOp::Add, rn, imm32, write_flags);

        if d == Reg::PC {
            self.alu_write_pc(result);
        } else {
            self.set_reg(d, result);
        }
    }

    fn b(&mut self, cond: Cond, imm24: u32) {
        // Decode
        let imm32 = sign_extend(imm24 << 2, 26);

        // Execute
        if !self.condition_passed(cond) {
            return;
        }

        self.branch_write_pc(self.pc().wrapping_add(imm32));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::verify::verify_block;

    fn flat_memory(words: &[u32]) -> impl Fn(u32) -> u32 + '_ {
        move |vaddr| {
            let index = (vaddr / 4) as usize;
            words.get(index).copied().unwrap_or(0)
        }
    }

    #[test]
    fn test_translate_adds_then_branch() {
        // adds r1, r2, #3 ; b .
        let memory = [0xE2921003, 0xEAFFFFFE];
        let block = translate(LocationDescriptor::at(0), &flat_memory(&memory));

        assert_eq!(block.location, LocationDescriptor::at(0));
        assert_eq!(block.live_count(), 4);

        let nodes: Vec<_> = block.iter_live().collect();
        assert_eq!(nodes[0].1.data(), NodeData::GetGPR(Reg::R2));
        assert_eq!(nodes[1].1.data(), NodeData::ConstU32(3));
        assert_eq!(nodes[2].1.data(), NodeData::Inst(MicroOp::Add));
        assert_eq!(nodes[2].1.read_flags(), ArmFlags::empty());
        assert_eq!(nodes[2].1.write_flags(), ArmFlags::NZCV);
        assert_eq!(nodes[3].1.data(), NodeData::SetGPR(Reg::R1));
        assert_eq!(block.arg(nodes[3].0, 0), nodes[2].0);

        assert_eq!(block.terminal, Terminal::LinkBlock { next: LocationDescriptor::at(4) });
        assert_eq!(block.cycles_consumed, 1);

        verify_block(&block);
    }

    #[test]
    fn test_translate_unconditional_branch_forward() {
        // b +8 at 0x100: target = 0x100 + 8 + 8
        let memory = [0xEA000002];
        let read = |vaddr: u32| memory[((vaddr - 0x100) / 4) as usize];
        let block = translate(LocationDescriptor::at(0x100), &read);

        assert_eq!(block.live_count(), 0);
        assert_eq!(block.terminal, Terminal::LinkBlock { next: LocationDescriptor::at(0x110) });
        assert_eq!(block.cycles_consumed, 1);
    }

    #[test]
    fn test_translate_backward_branch_to_self() {
        let memory = [0xEAFFFFFE]; // b .
        let block = translate(LocationDescriptor::at(0), &flat_memory(&memory));
        assert_eq!(block.terminal, Terminal::LinkBlock { next: LocationDescriptor::at(0) });
        assert_eq!(block.cycles_consumed, 1);
    }

    #[test]
    fn test_conditional_first_in_block_splits() {
        // addeq r1, r2, #3 entered under AL: the condition cannot be patterned
        // against the entry flags, so the block ends immediately and the
        // instruction re-decodes under EQ.
        let memory = [0x02921003];
        let block = translate(LocationDescriptor::at(0), &flat_memory(&memory));

        assert_eq!(block.live_count(), 0);
        assert_eq!(block.cycles_consumed, 0);
        assert_eq!(
            block.terminal,
            Terminal::LinkBlock { next: LocationDescriptor::at(0).with_cond(Cond::EQ) }
        );
    }

    #[test]
    fn test_conditional_matching_block_cond_translates() {
        // addeq r1, r2, #3 entered under EQ translates normally; the following
        // AL-conditioned branch then splits off into its own block.
        let memory = [0x02921003, 0xEAFFFFFE];
        let desc = LocationDescriptor::at(0).with_cond(Cond::EQ);
        let block = translate(desc, &flat_memory(&memory));

        assert_eq!(block.live_count(), 4);
        assert_eq!(block.cycles_consumed, 1);
        assert_eq!(
            block.terminal,
            Terminal::LinkBlock { next: LocationDescriptor::at(4) }
        );
    }

    #[test]
    fn test_flag_write_stops_following_conditional() {
        // adds r0, r0, #1 ; addeq r1, r2, #3. The ADDS writes NZCV, so the
        // EQ instruction after it cannot be patterned against entry flags.
        let memory = [0xE2900001, 0x02921003];
        let block = translate(LocationDescriptor::at(0), &flat_memory(&memory));

        assert_eq!(block.cycles_consumed, 1);
        assert_eq!(
            block.terminal,
            Terminal::LinkBlock { next: LocationDescriptor::at(4).with_cond(Cond::EQ) }
        );
    }

    #[test]
    fn test_unimplemented_instruction_falls_back() {
        let memory = [0xE1A00001]; // mov r0, r1
        let block = translate(LocationDescriptor::at(0), &flat_memory(&memory));

        assert_eq!(block.live_count(), 0);
        assert_eq!(block.terminal, Terminal::Interpret { next: LocationDescriptor::at(0) });
        assert_eq!(block.cycles_consumed, 1);
    }

    #[test]
    fn test_undecodable_instruction_falls_back_uncounted() {
        let memory = [0xF7FFFFFF];
        let block = translate(LocationDescriptor::at(0), &flat_memory(&memory));

        assert_eq!(block.terminal, Terminal::Interpret { next: LocationDescriptor::at(0) });
        assert_eq!(block.cycles_consumed, 0);
    }

    #[test]
    fn test_page_boundary_stops_translation() {
        // Valid ADDs at 0xFF8 and 0xFFC; translation must stop at 0x1000.
        let read = |vaddr: u32| match vaddr {
            0xFF8 => 0xE2821003, // add r1, r2, #3
            0xFFC => 0xE2843005, // add r3, r4, #5
            _ => panic!("fetch crossed the page boundary: {:#x}", vaddr),
        };
        let block = translate(LocationDescriptor::at(0xFF8), &read);

        assert_eq!(block.cycles_consumed, 2);
        assert_eq!(block.terminal, Terminal::LinkBlock { next: LocationDescriptor::at(0x1000) });
    }

    #[test]
    fn test_pc_read_resolves_to_fetch_address_plus_8() {
        // add r0, pc, #0
        let memory = [0xE28F0000];
        let block = translate(LocationDescriptor::at(0), &flat_memory(&memory));

        let const_node = block
            .iter_live()
            .find(|(_, node)| matches!(node.data(), NodeData::ConstU32(_)))
            .expect("PC read should materialise a constant");
        assert_eq!(const_node.1.data(), NodeData::ConstU32(8));
    }

    #[test]
    fn test_intra_block_register_reuse() {
        // add r1, r2, #1 ; add r3, r1, #2: the second ADD consumes the first
        // ADD's SSA value, not a fresh GetGPR.
        let memory = [0xE2821001, 0xE2813002, 0xEAFFFFFE];
        let block = translate(LocationDescriptor::at(0), &flat_memory(&memory));

        let get_gprs = block
            .iter_live()
            .filter(|(_, node)| matches!(node.data(), NodeData::GetGPR(_)))
            .count();
        assert_eq!(get_gprs, 1, "only R2 should be read from the register file");

        // R1 and R3 both get written back.
        let set_gprs: Vec<_> = block
            .iter_live()
            .filter_map(|(_, node)| match node.data() {
                NodeData::SetGPR(reg) => Some(reg),
                _ => None,
            })
            .collect();
        assert_eq!(set_gprs, vec![Reg::R1, Reg::R3]);

        verify_block(&block);
    }

    #[test]
    fn test_add_to_pc_returns_to_dispatch() {
        // add pc, r0, #4
        let memory = [0xE280F004];
        let block = translate(LocationDescriptor::at(0), &flat_memory(&memory));

        assert_eq!(block.terminal, Terminal::ReturnToDispatch);
        let has_branch_write = block
            .iter_live()
            .any(|(_, node)| node.data() == NodeData::Inst(MicroOp::BranchWritePC));
        assert!(has_branch_write);
    }

    #[test]
    fn test_thumb_entry_interprets() {
        let desc = LocationDescriptor::at(0x2000).with_t_flag(true);
        let block = translate(desc, &|_| 0);

        assert_eq!(block.live_count(), 0);
        assert_eq!(block.terminal, Terminal::Interpret { next: desc });
        assert_eq!(block.cycles_consumed, 1);
    }
}
