//! Table-driven ARMv6 (A32) instruction decoder using double dispatch.
//!
//! Each table entry pairs a 32-character bit pattern with the visitor method
//! it dispatches to. The first matching entry wins, so more specific patterns
//! are listed before the general ones they overlap with.

use once_cell::sync::Lazy;

use crate::frontend::arm::types::{Reg, RegList, ShiftType};
use crate::ir::cond::Cond;

/// Visitor over the ARMv6 opcode set.
///
/// One method per opcode family; the decoder invokes exactly one per word.
/// Every method defaults to `fallback`, so an implementation only overrides
/// the instructions it translates and `fallback` carries everything else.
#[allow(unused_variables)]
pub trait ArmVisitor {
    /// Handles every encoding the implementation has no specific handler for.
    fn fallback(&mut self);

    // Barrier instructions
    fn dmb(&mut self) { self.fallback() }
    fn dsb(&mut self) { self.fallback() }
    fn isb(&mut self) { self.fallback() }

    // Branch instructions
    fn b(&mut self, cond: Cond, imm24: u32) { self.fallback() }
    fn bl(&mut self, cond: Cond, imm24: u32) { self.fallback() }
    fn blx_imm(&mut self, h: bool, imm24: u32) { self.fallback() }
    fn blx_reg(&mut self, cond: Cond, m: Reg) { self.fallback() }
    fn bx(&mut self, cond: Cond, m: Reg) { self.fallback() }
    fn bxj(&mut self, cond: Cond, m: Reg) { self.fallback() }

    // Coprocessor instructions
    fn cdp(&mut self) { self.fallback() }
    fn ldc(&mut self) { self.fallback() }
    fn mcr(&mut self) { self.fallback() }
    fn mcrr(&mut self) { self.fallback() }
    fn mrc(&mut self) { self.fallback() }
    fn mrrc(&mut self) { self.fallback() }
    fn stc(&mut self) { self.fallback() }

    // Data processing instructions
    fn adc_imm(&mut self, cond: Cond, s: bool, n: Reg, d: Reg, rotate: u32, imm8: u32) { self.fallback() }
    fn adc_reg(&mut self, cond: Cond, s: bool, n: Reg, d: Reg, imm5: u32, shift: ShiftType, m: Reg) { self.fallback() }
    fn adc_rsr(&mut self, cond: Cond, s: bool, n: Reg, d: Reg, rs: Reg, shift: ShiftType, m: Reg) { self.fallback() }
    fn add_imm(&mut self, cond: Cond, s: bool, n: Reg, d: Reg, rotate: u32, imm8: u32) { self.fallback() }
    fn add_reg(&mut self, cond: Cond, s: bool, n: Reg, d: Reg, imm5: u32, shift: ShiftType, m: Reg) { self.fallback() }
    fn add_rsr(&mut self, cond: Cond, s: bool, n: Reg, d: Reg, rs: Reg, shift: ShiftType, m: Reg) { self.fallback() }
    fn and_imm(&mut self, cond: Cond, s: bool, n: Reg, d: Reg, rotate: u32, imm8: u32) { self.fallback() }
    fn and_reg(&mut self, cond: Cond, s: bool, n: Reg, d: Reg, imm5: u32, shift: ShiftType, m: Reg) { self.fallback() }
    fn and_rsr(&mut self, cond: Cond, s: bool, n: Reg, d: Reg, rs: Reg, shift: ShiftType, m: Reg) { self.fallback() }
    fn bic_imm(&mut self, cond: Cond, s: bool, n: Reg, d: Reg, rotate: u32, imm8: u32) { self.fallback() }
    fn bic_reg(&mut self, cond: Cond, s: bool, n: Reg, d: Reg, imm5: u32, shift: ShiftType, m: Reg) { self.fallback() }
    fn bic_rsr(&mut self, cond: Cond, s: bool, n: Reg, d: Reg, rs: Reg, shift: ShiftType, m: Reg) { self.fallback() }
    fn cmn_imm(&mut self, cond: Cond, n: Reg, rotate: u32, imm8: u32) { self.fallback() }
    fn cmn_reg(&mut self, cond: Cond, n: Reg, imm5: u32, shift: ShiftType, m: Reg) { self.fallback() }
    fn cmn_rsr(&mut self, cond: Cond, n: Reg, rs: Reg, shift: ShiftType, m: Reg) { self.fallback() }
    fn cmp_imm(&mut self, cond: Cond, n: Reg, rotate: u32, imm8: u32) { self.fallback() }
    fn cmp_reg(&mut self, cond: Cond, n: Reg, imm5: u32, shift: ShiftType, m: Reg) { self.fallback() }
    fn cmp_rsr(&mut self, cond: Cond, n: Reg, rs: Reg, shift: ShiftType, m: Reg) { self.fallback() }
    fn eor_imm(&mut self, cond: Cond, s: bool, n: Reg, d: Reg, rotate: u32, imm8: u32) { self.fallback() }
    fn eor_reg(&mut self, cond: Cond, s: bool, n: Reg, d: Reg, imm5: u32, shift: ShiftType, m: Reg) { self.fallback() }
    fn eor_rsr(&mut self, cond: Cond, s: bool, n: Reg, d: Reg, rs: Reg, shift: ShiftType, m: Reg) { self.fallback() }
    fn mov_imm(&mut self, cond: Cond, s: bool, d: Reg, rotate: u32, imm8: u32) { self.fallback() }
    fn mov_reg(&mut self, cond: Cond, s: bool, d: Reg, imm5: u32, shift: ShiftType, m: Reg) { self.fallback() }
    fn mov_rsr(&mut self, cond: Cond, s: bool, d: Reg, rs: Reg, shift: ShiftType, m: Reg) { self.fallback() }
    fn mvn_imm(&mut self, cond: Cond, s: bool, d: Reg, rotate: u32, imm8: u32) { self.fallback() }
    fn mvn_reg(&mut self, cond: Cond, s: bool, d: Reg, imm5: u32, shift: ShiftType, m: Reg) { self.fallback() }
    fn mvn_rsr(&mut self, cond: Cond, s: bool, d: Reg, rs: Reg, shift: ShiftType, m: Reg) { self.fallback() }
    fn orr_imm(&mut self, cond: Cond, s: bool, n: Reg, d: Reg, rotate: u32, imm8: u32) { self.fallback() }
    fn orr_reg(&mut self, cond: Cond, s: bool, n: Reg, d: Reg, imm5: u32, shift: ShiftType, m: Reg) { self.fallback() }
    fn orr_rsr(&mut self, cond: Cond, s: bool, n: Reg, d: Reg, rs: Reg, shift: ShiftType, m: Reg) { self.fallback() }
    fn rsb_imm(&mut self, cond: Cond, s: bool, n: Reg, d: Reg, rotate: u32, imm8: u32) { self.fallback() }
    fn rsb_reg(&mut self, cond: Cond, s: bool, n: Reg, d: Reg, imm5: u32, shift: ShiftType, m: Reg) { self.fallback() }
    fn rsb_rsr(&mut self, cond: Cond, s: bool, n: Reg, d: Reg, rs: Reg, shift: ShiftType, m: Reg) { self.fallback() }
    fn rsc_imm(&mut self, cond: Cond, s: bool, n: Reg, d: Reg, rotate: u32, imm8: u32) { self.fallback() }
    fn rsc_reg(&mut self, cond: Cond, s: bool, n: Reg, d: Reg, imm5: u32, shift: ShiftType, m: Reg) { self.fallback() }
    fn rsc_rsr(&mut self, cond: Cond, s: bool, n: Reg, d: Reg, rs: Reg, shift: ShiftType, m: Reg) { self.fallback() }
    fn sbc_imm(&mut self, cond: Cond, s: bool, n: Reg, d: Reg, rotate: u32, imm8: u32) { self.fallback() }
    fn sbc_reg(&mut self, cond: Cond, s: bool, n: Reg, d: Reg, imm5: u32, shift: ShiftType, m: Reg) { self.fallback() }
    fn sbc_rsr(&mut self, cond: Cond, s: bool, n: Reg, d: Reg, rs: Reg, shift: ShiftType, m: Reg) { self.fallback() }
    fn sub_imm(&mut self, cond: Cond, s: bool, n: Reg, d: Reg, rotate: u32, imm8: u32) { self.fallback() }
    fn sub_reg(&mut self, cond: Cond, s: bool, n: Reg, d: Reg, imm5: u32, shift: ShiftType, m: Reg) { self.fallback() }
    fn sub_rsr(&mut self, cond: Cond, s: bool, n: Reg, d: Reg, rs: Reg, shift: ShiftType, m: Reg) { self.fallback() }
    fn teq_imm(&mut self, cond: Cond, n: Reg, rotate: u32, imm8: u32) { self.fallback() }
    fn teq_reg(&mut self, cond: Cond, n: Reg, imm5: u32, shift: ShiftType, m: Reg) { self.fallback() }
    fn teq_rsr(&mut self, cond: Cond, n: Reg, rs: Reg, shift: ShiftType, m: Reg) { self.fallback() }
    fn tst_imm(&mut self, cond: Cond, n: Reg, rotate: u32, imm8: u32) { self.fallback() }
    fn tst_reg(&mut self, cond: Cond, n: Reg, imm5: u32, shift: ShiftType, m: Reg) { self.fallback() }
    fn tst_rsr(&mut self, cond: Cond, n: Reg, rs: Reg, shift: ShiftType, m: Reg) { self.fallback() }

    // Exception generation instructions
    fn bkpt(&mut self) { self.fallback() }
    fn svc(&mut self) { self.fallback() }
    fn udf(&mut self) { self.fallback() }

    // Extension instructions
    fn sxtab(&mut self) { self.fallback() }
    fn sxtab16(&mut self) { self.fallback() }
    fn sxtah(&mut self) { self.fallback() }
    fn sxtb(&mut self) { self.fallback() }
    fn sxtb16(&mut self) { self.fallback() }
    fn sxth(&mut self) { self.fallback() }
    fn uxtab(&mut self) { self.fallback() }
    fn uxtab16(&mut self) { self.fallback() }
    fn uxtah(&mut self) { self.fallback() }
    fn uxtb(&mut self) { self.fallback() }
    fn uxtb16(&mut self) { self.fallback() }
    fn uxth(&mut self) { self.fallback() }

    // Hint instructions
    fn pld(&mut self) { self.fallback() }
    fn sev(&mut self) { self.fallback() }
    fn wfe(&mut self) { self.fallback() }
    fn wfi(&mut self) { self.fallback() }
    fn yield_(&mut self) { self.fallback() }
    fn nop(&mut self) { self.fallback() }

    // Synchronisation primitive instructions
    fn clrex(&mut self) { self.fallback() }
    fn ldrex(&mut self) { self.fallback() }
    fn ldrexb(&mut self) { self.fallback() }
    fn ldrexd(&mut self) { self.fallback() }
    fn ldrexh(&mut self) { self.fallback() }
    fn strex(&mut self) { self.fallback() }
    fn strexb(&mut self) { self.fallback() }
    fn strexd(&mut self) { self.fallback() }
    fn strexh(&mut self) { self.fallback() }
    fn swp(&mut self) { self.fallback() }
    fn swpb(&mut self) { self.fallback() }

    // Load/store instructions
    fn ldr_imm(&mut self, cond: Cond, p: bool, u: bool, w: bool, n: Reg, d: Reg, imm12: u32) { self.fallback() }
    fn ldr_reg(&mut self, cond: Cond, p: bool, u: bool, w: bool, n: Reg, d: Reg, imm5: u32, shift: ShiftType, m: Reg) { self.fallback() }
    fn ldrb_imm(&mut self, cond: Cond, p: bool, u: bool, w: bool, n: Reg, d: Reg, imm12: u32) { self.fallback() }
    fn ldrb_reg(&mut self, cond: Cond, p: bool, u: bool, w: bool, n: Reg, d: Reg, imm5: u32, shift: ShiftType, m: Reg) { self.fallback() }
    fn ldrbt(&mut self) { self.fallback() }
    fn ldrd_imm(&mut self, cond: Cond, p: bool, u: bool, w: bool, n: Reg, d: Reg, imm8a: u32, imm8b: u32) { self.fallback() }
    fn ldrd_reg(&mut self, cond: Cond, p: bool, u: bool, w: bool, n: Reg, d: Reg, m: Reg) { self.fallback() }
    fn ldrh_imm(&mut self, cond: Cond, p: bool, u: bool, w: bool, n: Reg, d: Reg, imm8a: u32, imm8b: u32) { self.fallback() }
    fn ldrh_reg(&mut self, cond: Cond, p: bool, u: bool, w: bool, n: Reg, d: Reg, m: Reg) { self.fallback() }
    fn ldrht(&mut self) { self.fallback() }
    fn ldrsb_imm(&mut self, cond: Cond, p: bool, u: bool, w: bool, n: Reg, d: Reg, imm8a: u32, imm8b: u32) { self.fallback() }
    fn ldrsb_reg(&mut self, cond: Cond, p: bool, u: bool, w: bool, n: Reg, d: Reg, m: Reg) { self.fallback() }
    fn ldrsbt(&mut self) { self.fallback() }
    fn ldrsh_imm(&mut self, cond: Cond, p: bool, u: bool, w: bool, n: Reg, d: Reg, imm8a: u32, imm8b: u32) { self.fallback() }
    fn ldrsh_reg(&mut self, cond: Cond, p: bool, u: bool, w: bool, n: Reg, d: Reg, m: Reg) { self.fallback() }
    fn ldrsht(&mut self) { self.fallback() }
    fn ldrt(&mut self) { self.fallback() }
    fn str_imm(&mut self, cond: Cond, p: bool, u: bool, w: bool, n: Reg, d: Reg, imm12: u32) { self.fallback() }
    fn str_reg(&mut self, cond: Cond, p: bool, u: bool, w: bool, n: Reg, d: Reg, imm5: u32, shift: ShiftType, m: Reg) { self.fallback() }
    fn strb_imm(&mut self, cond: Cond, p: bool, u: bool, w: bool, n: Reg, d: Reg, imm12: u32) { self.fallback() }
    fn strb_reg(&mut self, cond: Cond, p: bool, u: bool, w: bool, n: Reg, d: Reg, imm5: u32, shift: ShiftType, m: Reg) { self.fallback() }
    fn strbt(&mut self) { self.fallback() }
    fn strd_imm(&mut self, cond: Cond, p: bool, u: bool, w: bool, n: Reg, d: Reg, imm8a: u32, imm8b: u32) { self.fallback() }
    fn strd_reg(&mut self, cond: Cond, p: bool, u: bool, w: bool, n: Reg, d: Reg, m: Reg) { self.fallback() }
    fn strh_imm(&mut self, cond: Cond, p: bool, u: bool, w: bool, n: Reg, d: Reg, imm8a: u32, imm8b: u32) { self.fallback() }
    fn strh_reg(&mut self, cond: Cond, p: bool, u: bool, w: bool, n: Reg, d: Reg, m: Reg) { self.fallback() }
    fn strht(&mut self) { self.fallback() }
    fn strt(&mut self) { self.fallback() }

    // Load/store multiple instructions
    fn ldm(&mut self, cond: Cond, p: bool, u: bool, w: bool, n: Reg, list: RegList) { self.fallback() }
    fn ldm_usr(&mut self) { self.fallback() }
    fn ldm_eret(&mut self) { self.fallback() }
    fn stm(&mut self, cond: Cond, p: bool, u: bool, w: bool, n: Reg, list: RegList) { self.fallback() }
    fn stm_usr(&mut self) { self.fallback() }

    // Miscellaneous instructions
    fn clz(&mut self) { self.fallback() }
    fn sel(&mut self) { self.fallback() }

    // Unsigned sum of absolute differences
    fn usad8(&mut self) { self.fallback() }
    fn usada8(&mut self) { self.fallback() }

    // Packing instructions
    fn pkhbt(&mut self, cond: Cond, n: Reg, d: Reg, imm5: u32, m: Reg) { self.fallback() }
    fn pkhtb(&mut self, cond: Cond, n: Reg, d: Reg, imm5: u32, m: Reg) { self.fallback() }

    // Reversal instructions
    fn rev(&mut self) { self.fallback() }
    fn rev16(&mut self) { self.fallback() }
    fn revsh(&mut self) { self.fallback() }

    // Saturation instructions
    fn ssat(&mut self) { self.fallback() }
    fn ssat16(&mut self) { self.fallback() }
    fn usat(&mut self) { self.fallback() }
    fn usat16(&mut self) { self.fallback() }

    // Multiply (normal) instructions
    fn mla(&mut self) { self.fallback() }
    fn mul(&mut self) { self.fallback() }

    // Multiply (long) instructions
    fn smlal(&mut self) { self.fallback() }
    fn smull(&mut self) { self.fallback() }
    fn umaal(&mut self) { self.fallback() }
    fn umlal(&mut self) { self.fallback() }
    fn umull(&mut self) { self.fallback() }

    // Multiply (halfword) instructions
    fn smlalxy(&mut self) { self.fallback() }
    fn smlaxy(&mut self) { self.fallback() }
    fn smulxy(&mut self) { self.fallback() }

    // Multiply (word by halfword) instructions
    fn smlawy(&mut self) { self.fallback() }
    fn smulwy(&mut self) { self.fallback() }

    // Multiply (most significant word) instructions
    fn smmla(&mut self) { self.fallback() }
    fn smmls(&mut self) { self.fallback() }
    fn smmul(&mut self) { self.fallback() }

    // Multiply (dual) instructions
    fn smlad(&mut self) { self.fallback() }
    fn smlald(&mut self) { self.fallback() }
    fn smlsd(&mut self) { self.fallback() }
    fn smlsld(&mut self) { self.fallback() }
    fn smuad(&mut self) { self.fallback() }
    fn smusd(&mut self) { self.fallback() }

    // Parallel add/subtract (modulo arithmetic) instructions
    fn sadd8(&mut self) { self.fallback() }
    fn sadd16(&mut self) { self.fallback() }
    fn sasx(&mut self) { self.fallback() }
    fn ssax(&mut self) { self.fallback() }
    fn ssub8(&mut self) { self.fallback() }
    fn ssub16(&mut self) { self.fallback() }
    fn uadd8(&mut self) { self.fallback() }
    fn uadd16(&mut self) { self.fallback() }
    fn uasx(&mut self) { self.fallback() }
    fn usax(&mut self) { self.fallback() }
    fn usub8(&mut self) { self.fallback() }
    fn usub16(&mut self) { self.fallback() }

    // Parallel add/subtract (saturating) instructions
    fn qadd8(&mut self) { self.fallback() }
    fn qadd16(&mut self) { self.fallback() }
    fn qasx(&mut self) { self.fallback() }
    fn qsax(&mut self) { self.fallback() }
    fn qsub8(&mut self) { self.fallback() }
    fn qsub16(&mut self) { self.fallback() }
    fn uqadd8(&mut self) { self.fallback() }
    fn uqadd16(&mut self) { self.fallback() }
    fn uqasx(&mut self) { self.fallback() }
    fn uqsax(&mut self) { self.fallback() }
    fn uqsub8(&mut self) { self.fallback() }
    fn uqsub16(&mut self) { self.fallback() }

    // Parallel add/subtract (halving) instructions
    fn shadd8(&mut self) { self.fallback() }
    fn shadd16(&mut self) { self.fallback() }
    fn shasx(&mut self) { self.fallback() }
    fn shsax(&mut self) { self.fallback() }
    fn shsub8(&mut self) { self.fallback() }
    fn shsub16(&mut self) { self.fallback() }
    fn uhadd8(&mut self) { self.fallback() }
    fn uhadd16(&mut self) { self.fallback() }
    fn uhasx(&mut self) { self.fallback() }
    fn uhsax(&mut self) { self.fallback() }
    fn uhsub8(&mut self) { self.fallback() }
    fn uhsub16(&mut self) { self.fallback() }

    // Saturated add/subtract instructions
    fn qadd(&mut self) { self.fallback() }
    fn qsub(&mut self) { self.fallback() }
    fn qdadd(&mut self) { self.fallback() }
    fn qdsub(&mut self) { self.fallback() }

    // Status register access instructions
    fn cps(&mut self) { self.fallback() }
    fn setend(&mut self, e: bool) { self.fallback() }
    fn mrs(&mut self) { self.fallback() }
    fn msr(&mut self) { self.fallback() }
    fn rfe(&mut self) { self.fallback() }
    fn srs(&mut self) { self.fallback() }

    // Thumb-specific stubs; dispatched by a Thumb decoder, which this crate
    // does not provide.
    fn thumb_b_cond(&mut self, cond: Cond, imm8: u32) { self.fallback() }
    fn thumb_b(&mut self, imm11: u32) { self.fallback() }
    fn thumb_blx_prefix(&mut self, imm11: u32) { self.fallback() }
    fn thumb_blx_suffix(&mut self, l: bool, imm11: u32) { self.fallback() }
}

type VisitFn = fn(&mut dyn ArmVisitor, u32);

/// One decoder table entry: a mask/value pair identifying an encoding and the
/// visitor dispatch for it.
pub struct ArmMatcher {
    name: &'static str,
    mask: u32,
    expected: u32,
    visit_fn: VisitFn,
}

impl ArmMatcher {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn matches(&self, word: u32) -> bool {
        word & self.mask == self.expected
    }

    /// Invoke the matching typed method on `visitor` with the fields extracted
    /// from `word`.
    pub fn visit(&self, visitor: &mut dyn ArmVisitor, word: u32) {
        (self.visit_fn)(visitor, word)
    }
}

/// Decode a 32-bit ARM instruction word. Returns `None` for undefined
/// encodings.
pub fn decode_arm(word: u32) -> Option<&'static ArmMatcher> {
    ARM_DECODE_TABLE.iter().find(|matcher| matcher.matches(word))
}

// --- Field extraction helpers ---

fn bit(word: u32, n: u32) -> bool {
    (word >> n) & 1 != 0
}

fn bits(word: u32, lo: u32, hi: u32) -> u32 {
    (word >> lo) & ((1u32 << (hi - lo + 1)) - 1)
}

fn cond(word: u32) -> Cond {
    Cond::from_u32(word >> 28)
}

fn reg(word: u32, lo: u32) -> Reg {
    Reg::from_u32(bits(word, lo, lo + 3))
}

fn shift(word: u32) -> ShiftType {
    ShiftType::from_u32(bits(word, 5, 6))
}

/// Parse a 32-character pattern string into a (mask, expected) pair. `0` and
/// `1` are fixed bits; any other character is a field captured by the
/// dispatch function.
fn parse_pattern(pattern: &str) -> (u32, u32) {
    assert_eq!(pattern.len(), 32, "bad pattern: {:?}", pattern);
    let mut mask = 0u32;
    let mut expected = 0u32;
    for (i, ch) in pattern.bytes().enumerate() {
        let bit = 1u32 << (31 - i);
        match ch {
            b'0' => mask |= bit,
            b'1' => {
                mask |= bit;
                expected |= bit;
            }
            _ => {}
        }
    }
    (mask, expected)
}

struct ArmEntry {
    name: &'static str,
    pattern: &'static str,
    visit_fn: VisitFn,
}

static ARM_DECODE_TABLE: Lazy<Vec<ArmMatcher>> = Lazy::new(|| {
    ARM_ENTRIES
        .iter()
        .map(|entry| {
            let (mask, expected) = parse_pattern(entry.pattern);
            ArmMatcher { name: entry.name, mask, expected, visit_fn: entry.visit_fn }
        })
        .collect()
});

macro_rules! arm {
    ($name:literal, $pattern:literal, $visit:expr) => {
        ArmEntry { name: $name, pattern: $pattern, visit_fn: $visit }
    };
}

#[rustfmt::skip]
static ARM_ENTRIES: &[ArmEntry] = &[
    // Barrier instructions
    arm!("DSB",            "1111010101111111111100000100----", |v, _| v.dsb()),
    arm!("DMB",            "1111010101111111111100000101----", |v, _| v.dmb()),
    arm!("ISB",            "1111010101111111111100000110----", |v, _| v.isb()),

    // Branch instructions
    arm!("BLX (imm)",      "1111101hvvvvvvvvvvvvvvvvvvvvvvvv", |v, w| v.blx_imm(bit(w, 24), bits(w, 0, 23))),
    arm!("BLX (reg)",      "cccc000100101111111111110011mmmm", |v, w| v.blx_reg(cond(w), reg(w, 0))),
    arm!("B",              "cccc1010vvvvvvvvvvvvvvvvvvvvvvvv", |v, w| v.b(cond(w), bits(w, 0, 23))),
    arm!("BL",             "cccc1011vvvvvvvvvvvvvvvvvvvvvvvv", |v, w| v.bl(cond(w), bits(w, 0, 23))),
    arm!("BX",             "cccc000100101111111111110001mmmm", |v, w| v.bx(cond(w), reg(w, 0))),
    arm!("BXJ",            "cccc000100101111111111110010mmmm", |v, w| v.bxj(cond(w), reg(w, 0))),

    // Coprocessor instructions
    arm!("CDP2",           "11111110-------------------1----", |v, _| v.cdp()),
    arm!("CDP",            "----1110-------------------0----", |v, _| v.cdp()),
    arm!("LDC2",           "1111110----1--------------------", |v, _| v.ldc()),
    arm!("LDC",            "----110----1--------------------", |v, _| v.ldc()),
    arm!("MCR2",           "11111110---0---------------1----", |v, _| v.mcr()),
    arm!("MCR",            "----1110---0---------------1----", |v, _| v.mcr()),
    arm!("MCRR2",          "111111000100--------------------", |v, _| v.mcrr()),
    arm!("MCRR",           "----11000100--------------------", |v, _| v.mcrr()),
    arm!("MRC2",           "11111110---1---------------1----", |v, _| v.mrc()),
    arm!("MRC",            "----1110---1---------------1----", |v, _| v.mrc()),
    arm!("MRRC2",          "111111000101--------------------", |v, _| v.mrrc()),
    arm!("MRRC",           "----11000101--------------------", |v, _| v.mrrc()),
    arm!("STC2",           "1111110----0--------------------", |v, _| v.stc()),
    arm!("STC",            "----110----0--------------------", |v, _| v.stc()),

    // Data processing instructions
    arm!("ADC (imm)",      "cccc0010101Snnnnddddrrrrvvvvvvvv", |v, w| v.adc_imm(cond(w), bit(w, 20), reg(w, 16), reg(w, 12), bits(w, 8, 11), bits(w, 0, 7))),
    arm!("ADC (reg)",      "cccc0000101Snnnnddddvvvvvrr0mmmm", |v, w| v.adc_reg(cond(w), bit(w, 20), reg(w, 16), reg(w, 12), bits(w, 7, 11), shift(w), reg(w, 0))),
    arm!("ADC (rsr)",      "cccc0000101Snnnnddddssss0rr1mmmm", |v, w| v.adc_rsr(cond(w), bit(w, 20), reg(w, 16), reg(w, 12), reg(w, 8), shift(w), reg(w, 0))),
    arm!("ADD (imm)",      "cccc0010100Snnnnddddrrrrvvvvvvvv", |v, w| v.add_imm(cond(w), bit(w, 20), reg(w, 16), reg(w, 12), bits(w, 8, 11), bits(w, 0, 7))),
    arm!("ADD (reg)",      "cccc0000100Snnnnddddvvvvvrr0mmmm", |v, w| v.add_reg(cond(w), bit(w, 20), reg(w, 16), reg(w, 12), bits(w, 7, 11), shift(w), reg(w, 0))),
    arm!("ADD (rsr)",      "cccc0000100Snnnnddddssss0rr1mmmm", |v, w| v.add_rsr(cond(w), bit(w, 20), reg(w, 16), reg(w, 12), reg(w, 8), shift(w), reg(w, 0))),
    arm!("AND (imm)",      "cccc0010000Snnnnddddrrrrvvvvvvvv", |v, w| v.and_imm(cond(w), bit(w, 20), reg(w, 16), reg(w, 12), bits(w, 8, 11), bits(w, 0, 7))),
    arm!("AND (reg)",      "cccc0000000Snnnnddddvvvvvrr0mmmm", |v, w| v.and_reg(cond(w), bit(w, 20), reg(w, 16), reg(w, 12), bits(w, 7, 11), shift(w), reg(w, 0))),
    arm!("AND (rsr)",      "cccc0000000Snnnnddddssss0rr1mmmm", |v, w| v.and_rsr(cond(w), bit(w, 20), reg(w, 16), reg(w, 12), reg(w, 8), shift(w), reg(w, 0))),
    arm!("BIC (imm)",      "cccc0011110Snnnnddddrrrrvvvvvvvv", |v, w| v.bic_imm(cond(w), bit(w, 20), reg(w, 16), reg(w, 12), bits(w, 8, 11), bits(w, 0, 7))),
    arm!("BIC (reg)",      "cccc0001110Snnnnddddvvvvvrr0mmmm", |v, w| v.bic_reg(cond(w), bit(w, 20), reg(w, 16), reg(w, 12), bits(w, 7, 11), shift(w), reg(w, 0))),
    arm!("BIC (rsr)",      "cccc0001110Snnnnddddssss0rr1mmmm", |v, w| v.bic_rsr(cond(w), bit(w, 20), reg(w, 16), reg(w, 12), reg(w, 8), shift(w), reg(w, 0))),
    arm!("CMN (imm)",      "cccc00110111nnnn0000rrrrvvvvvvvv", |v, w| v.cmn_imm(cond(w), reg(w, 16), bits(w, 8, 11), bits(w, 0, 7))),
    arm!("CMN (reg)",      "cccc00010111nnnn0000vvvvvrr0mmmm", |v, w| v.cmn_reg(cond(w), reg(w, 16), bits(w, 7, 11), shift(w), reg(w, 0))),
    arm!("CMN (rsr)",      "cccc00010111nnnn0000ssss0rr1mmmm", |v, w| v.cmn_rsr(cond(w), reg(w, 16), reg(w, 8), shift(w), reg(w, 0))),
    arm!("CMP (imm)",      "cccc00110101nnnn0000rrrrvvvvvvvv", |v, w| v.cmp_imm(cond(w), reg(w, 16), bits(w, 8, 11), bits(w, 0, 7))),
    arm!("CMP (reg)",      "cccc00010101nnnn0000vvvvvrr0mmmm", |v, w| v.cmp_reg(cond(w), reg(w, 16), bits(w, 7, 11), shift(w), reg(w, 0))),
    arm!("CMP (rsr)",      "cccc00010101nnnn0000ssss0rr1mmmm", |v, w| v.cmp_rsr(cond(w), reg(w, 16), reg(w, 8), shift(w), reg(w, 0))),
    arm!("EOR (imm)",      "cccc0010001Snnnnddddrrrrvvvvvvvv", |v, w| v.eor_imm(cond(w), bit(w, 20), reg(w, 16), reg(w, 12), bits(w, 8, 11), bits(w, 0, 7))),
    arm!("EOR (reg)",      "cccc0000001Snnnnddddvvvvvrr0mmmm", |v, w| v.eor_reg(cond(w), bit(w, 20), reg(w, 16), reg(w, 12), bits(w, 7, 11), shift(w), reg(w, 0))),
    arm!("EOR (rsr)",      "cccc0000001Snnnnddddssss0rr1mmmm", |v, w| v.eor_rsr(cond(w), bit(w, 20), reg(w, 16), reg(w, 12), reg(w, 8), shift(w), reg(w, 0))),
    arm!("MOV (imm)",      "cccc0011101S0000ddddrrrrvvvvvvvv", |v, w| v.mov_imm(cond(w), bit(w, 20), reg(w, 12), bits(w, 8, 11), bits(w, 0, 7))),
    arm!("MOV (reg)",      "cccc0001101S0000ddddvvvvvrr0mmmm", |v, w| v.mov_reg(cond(w), bit(w, 20), reg(w, 12), bits(w, 7, 11), shift(w), reg(w, 0))),
    arm!("MOV (rsr)",      "cccc0001101S0000ddddssss0rr1mmmm", |v, w| v.mov_rsr(cond(w), bit(w, 20), reg(w, 12), reg(w, 8), shift(w), reg(w, 0))),
    arm!("MVN (imm)",      "cccc0011111S0000ddddrrrrvvvvvvvv", |v, w| v.mvn_imm(cond(w), bit(w, 20), reg(w, 12), bits(w, 8, 11), bits(w, 0, 7))),
    arm!("MVN (reg)",      "cccc0001111S0000ddddvvvvvrr0mmmm", |v, w| v.mvn_reg(cond(w), bit(w, 20), reg(w, 12), bits(w, 7, 11), shift(w), reg(w, 0))),
    arm!("MVN (rsr)",      "cccc0001111S0000ddddssss0rr1mmmm", |v, w| v.mvn_rsr(cond(w), bit(w, 20), reg(w, 12), reg(w, 8), shift(w), reg(w, 0))),
    arm!("ORR (imm)",      "cccc0011100Snnnnddddrrrrvvvvvvvv", |v, w| v.orr_imm(cond(w), bit(w, 20), reg(w, 16), reg(w, 12), bits(w, 8, 11), bits(w, 0, 7))),
    arm!("ORR (reg)",      "cccc0001100Snnnnddddvvvvvrr0mmmm", |v, w| v.orr_reg(cond(w), bit(w, 20), reg(w, 16), reg(w, 12), bits(w, 7, 11), shift(w), reg(w, 0))),
    arm!("ORR (rsr)",      "cccc0001100Snnnnddddssss0rr1mmmm", |v, w| v.orr_rsr(cond(w), bit(w, 20), reg(w, 16), reg(w, 12), reg(w, 8), shift(w), reg(w, 0))),
    arm!("RSB (imm)",      "cccc0010011Snnnnddddrrrrvvvvvvvv", |v, w| v.rsb_imm(cond(w), bit(w, 20), reg(w, 16), reg(w, 12), bits(w, 8, 11), bits(w, 0, 7))),
    arm!("RSB (reg)",      "cccc0000011Snnnnddddvvvvvrr0mmmm", |v, w| v.rsb_reg(cond(w), bit(w, 20), reg(w, 16), reg(w, 12), bits(w, 7, 11), shift(w), reg(w, 0))),
    arm!("RSB (rsr)",      "cccc0000011Snnnnddddssss0rr1mmmm", |v, w| v.rsb_rsr(cond(w), bit(w, 20), reg(w, 16), reg(w, 12), reg(w, 8), shift(w), reg(w, 0))),
    arm!("RSC (imm)",      "cccc0010111Snnnnddddrrrrvvvvvvvv", |v, w| v.rsc_imm(cond(w), bit(w, 20), reg(w, 16), reg(w, 12), bits(w, 8, 11), bits(w, 0, 7))),
    arm!("RSC (reg)",      "cccc0000111Snnnnddddvvvvvrr0mmmm", |v, w| v.rsc_reg(cond(w), bit(w, 20), reg(w, 16), reg(w, 12), bits(w, 7, 11), shift(w), reg(w, 0))),
    arm!("RSC (rsr)",      "cccc0000111Snnnnddddssss0rr1mmmm", |v, w| v.rsc_rsr(cond(w), bit(w, 20), reg(w, 16), reg(w, 12), reg(w, 8), shift(w), reg(w, 0))),
    arm!("SBC (imm)",      "cccc0010110Snnnnddddrrrrvvvvvvvv", |v, w| v.sbc_imm(cond(w), bit(w, 20), reg(w, 16), reg(w, 12), bits(w, 8, 11), bits(w, 0, 7))),
    arm!("SBC (reg)",      "cccc0000110Snnnnddddvvvvvrr0mmmm", |v, w| v.sbc_reg(cond(w), bit(w, 20), reg(w, 16), reg(w, 12), bits(w, 7, 11), shift(w), reg(w, 0))),
    arm!("SBC (rsr)",      "cccc0000110Snnnnddddssss0rr1mmmm", |v, w| v.sbc_rsr(cond(w), bit(w, 20), reg(w, 16), reg(w, 12), reg(w, 8), shift(w), reg(w, 0))),
    arm!("SUB (imm)",      "cccc0010010Snnnnddddrrrrvvvvvvvv", |v, w| v.sub_imm(cond(w), bit(w, 20), reg(w, 16), reg(w, 12), bits(w, 8, 11), bits(w, 0, 7))),
    arm!("SUB (reg)",      "cccc0000010Snnnnddddvvvvvrr0mmmm", |v, w| v.sub_reg(cond(w), bit(w, 20), reg(w, 16), reg(w, 12), bits(w, 7, 11), shift(w), reg(w, 0))),
    arm!("SUB (rsr)",      "cccc0000010Snnnnddddssss0rr1mmmm", |v, w| v.sub_rsr(cond(w), bit(w, 20), reg(w, 16), reg(w, 12), reg(w, 8), shift(w), reg(w, 0))),
    arm!("TEQ (imm)",      "cccc00110011nnnn0000rrrrvvvvvvvv", |v, w| v.teq_imm(cond(w), reg(w, 16), bits(w, 8, 11), bits(w, 0, 7))),
    arm!("TEQ (reg)",      "cccc00010011nnnn0000vvvvvrr0mmmm", |v, w| v.teq_reg(cond(w), reg(w, 16), bits(w, 7, 11), shift(w), reg(w, 0))),
    arm!("TEQ (rsr)",      "cccc00010011nnnn0000ssss0rr1mmmm", |v, w| v.teq_rsr(cond(w), reg(w, 16), reg(w, 8), shift(w), reg(w, 0))),
    arm!("TST (imm)",      "cccc00110001nnnn0000rrrrvvvvvvvv", |v, w| v.tst_imm(cond(w), reg(w, 16), bits(w, 8, 11), bits(w, 0, 7))),
    arm!("TST (reg)",      "cccc00010001nnnn0000vvvvvrr0mmmm", |v, w| v.tst_reg(cond(w), reg(w, 16), bits(w, 7, 11), shift(w), reg(w, 0))),
    arm!("TST (rsr)",      "cccc00010001nnnn0000ssss0rr1mmmm", |v, w| v.tst_rsr(cond(w), reg(w, 16), reg(w, 8), shift(w), reg(w, 0))),

    // Exception generating instructions
    arm!("BKPT",           "----00010010------------0111----", |v, _| v.bkpt()),
    arm!("SVC",            "----1111------------------------", |v, _| v.svc()),
    arm!("UDF",            "111001111111------------1111----", |v, _| v.udf()),

    // Extension instructions
    arm!("SXTB",           "----011010101111------000111----", |v, _| v.sxtb()),
    arm!("SXTB16",         "----011010001111------000111----", |v, _| v.sxtb16()),
    arm!("SXTH",           "----011010111111------000111----", |v, _| v.sxth()),
    arm!("SXTAB",          "----01101010----------000111----", |v, _| v.sxtab()),
    arm!("SXTAB16",        "----01101000----------000111----", |v, _| v.sxtab16()),
    arm!("SXTAH",          "----01101011----------000111----", |v, _| v.sxtah()),
    arm!("UXTB",           "----011011101111------000111----", |v, _| v.uxtb()),
    arm!("UXTB16",         "----011011001111------000111----", |v, _| v.uxtb16()),
    arm!("UXTH",           "----011011111111------000111----", |v, _| v.uxth()),
    arm!("UXTAB",          "----01101110----------000111----", |v, _| v.uxtab()),
    arm!("UXTAB16",        "----01101100----------000111----", |v, _| v.uxtab16()),
    arm!("UXTAH",          "----01101111----------000111----", |v, _| v.uxtah()),

    // Hint instructions
    arm!("PLD",            "111101---101----1111------------", |v, _| v.pld()),
    arm!("SEV",            "----0011001000001111000000000100", |v, _| v.sev()),
    arm!("WFE",            "----0011001000001111000000000010", |v, _| v.wfe()),
    arm!("WFI",            "----0011001000001111000000000011", |v, _| v.wfi()),
    arm!("YIELD",          "----0011001000001111000000000001", |v, _| v.yield_()),

    // Synchronisation primitive instructions
    arm!("CLREX",          "11110101011111111111000000011111", |v, _| v.clrex()),
    arm!("LDREX",          "----00011001--------111110011111", |v, _| v.ldrex()),
    arm!("LDREXB",         "----00011101--------111110011111", |v, _| v.ldrexb()),
    arm!("LDREXD",         "----00011011--------111110011111", |v, _| v.ldrexd()),
    arm!("LDREXH",         "----00011111--------111110011111", |v, _| v.ldrexh()),
    arm!("STREX",          "----00011000--------11111001----", |v, _| v.strex()),
    arm!("STREXB",         "----00011100--------11111001----", |v, _| v.strexb()),
    arm!("STREXD",         "----00011010--------11111001----", |v, _| v.strexd()),
    arm!("STREXH",         "----00011110--------11111001----", |v, _| v.strexh()),
    arm!("SWP",            "----00010000--------00001001----", |v, _| v.swp()),
    arm!("SWPB",           "----00010100--------00001001----", |v, _| v.swpb()),

    // Load/store instructions
    arm!("LDR (imm)",      "cccc010pu0w1nnnnddddvvvvvvvvvvvv", |v, w| v.ldr_imm(cond(w), bit(w, 24), bit(w, 23), bit(w, 21), reg(w, 16), reg(w, 12), bits(w, 0, 11))),
    arm!("LDR (reg)",      "cccc011pu0w1nnnnddddvvvvvrr0mmmm", |v, w| v.ldr_reg(cond(w), bit(w, 24), bit(w, 23), bit(w, 21), reg(w, 16), reg(w, 12), bits(w, 7, 11), shift(w), reg(w, 0))),
    arm!("LDRB (imm)",     "cccc010pu1w1nnnnddddvvvvvvvvvvvv", |v, w| v.ldrb_imm(cond(w), bit(w, 24), bit(w, 23), bit(w, 21), reg(w, 16), reg(w, 12), bits(w, 0, 11))),
    arm!("LDRB (reg)",     "cccc011pu1w1nnnnddddvvvvvrr0mmmm", |v, w| v.ldrb_reg(cond(w), bit(w, 24), bit(w, 23), bit(w, 21), reg(w, 16), reg(w, 12), bits(w, 7, 11), shift(w), reg(w, 0))),
    arm!("LDRBT (A1)",     "----0100-111--------------------", |v, _| v.ldrbt()),
    arm!("LDRBT (A2)",     "----0110-111---------------0----", |v, _| v.ldrbt()),
    arm!("LDRD (imm)",     "cccc000pu1w0nnnnddddvvvv1101vvvv", |v, w| v.ldrd_imm(cond(w), bit(w, 24), bit(w, 23), bit(w, 21), reg(w, 16), reg(w, 12), bits(w, 8, 11), bits(w, 0, 3))),
    arm!("LDRD (reg)",     "cccc000pu0w0nnnndddd00001101mmmm", |v, w| v.ldrd_reg(cond(w), bit(w, 24), bit(w, 23), bit(w, 21), reg(w, 16), reg(w, 12), reg(w, 0))),
    arm!("LDRH (imm)",     "cccc000pu1w1nnnnddddvvvv1011vvvv", |v, w| v.ldrh_imm(cond(w), bit(w, 24), bit(w, 23), bit(w, 21), reg(w, 16), reg(w, 12), bits(w, 8, 11), bits(w, 0, 3))),
    arm!("LDRH (reg)",     "cccc000pu0w1nnnndddd00001011mmmm", |v, w| v.ldrh_reg(cond(w), bit(w, 24), bit(w, 23), bit(w, 21), reg(w, 16), reg(w, 12), reg(w, 0))),
    arm!("LDRHT (A1)",     "----0000-111------------1011----", |v, _| v.ldrht()),
    arm!("LDRHT (A2)",     "----0000-011--------00001011----", |v, _| v.ldrht()),
    arm!("LDRSB (imm)",    "cccc000pu1w1nnnnddddvvvv1101vvvv", |v, w| v.ldrsb_imm(cond(w), bit(w, 24), bit(w, 23), bit(w, 21), reg(w, 16), reg(w, 12), bits(w, 8, 11), bits(w, 0, 3))),
    arm!("LDRSB (reg)",    "cccc000pu0w1nnnndddd00001101mmmm", |v, w| v.ldrsb_reg(cond(w), bit(w, 24), bit(w, 23), bit(w, 21), reg(w, 16), reg(w, 12), reg(w, 0))),
    arm!("LDRSBT (A1)",    "----0000-111------------1101----", |v, _| v.ldrsbt()),
    arm!("LDRSBT (A2)",    "----0000-011--------00001101----", |v, _| v.ldrsbt()),
    arm!("LDRSH (imm)",    "cccc000pu1w1nnnnddddvvvv1111vvvv", |v, w| v.ldrsh_imm(cond(w), bit(w, 24), bit(w, 23), bit(w, 21), reg(w, 16), reg(w, 12), bits(w, 8, 11), bits(w, 0, 3))),
    arm!("LDRSH (reg)",    "cccc000pu0w1nnnndddd00001111mmmm", |v, w| v.ldrsh_reg(cond(w), bit(w, 24), bit(w, 23), bit(w, 21), reg(w, 16), reg(w, 12), reg(w, 0))),
    arm!("LDRSHT (A1)",    "----0000-111------------1111----", |v, _| v.ldrsht()),
    arm!("LDRSHT (A2)",    "----0000-011--------00001111----", |v, _| v.ldrsht()),
    arm!("LDRT (A1)",      "----0100-011--------------------", |v, _| v.ldrt()),
    arm!("LDRT (A2)",      "----0110-011---------------0----", |v, _| v.ldrt()),
    arm!("STR (imm)",      "cccc010pu0w0nnnnddddvvvvvvvvvvvv", |v, w| v.str_imm(cond(w), bit(w, 24), bit(w, 23), bit(w, 21), reg(w, 16), reg(w, 12), bits(w, 0, 11))),
    arm!("STR (reg)",      "cccc011pu0w0nnnnddddvvvvvrr0mmmm", |v, w| v.str_reg(cond(w), bit(w, 24), bit(w, 23), bit(w, 21), reg(w, 16), reg(w, 12), bits(w, 7, 11), shift(w), reg(w, 0))),
    arm!("STRB (imm)",     "cccc010pu1w0nnnnddddvvvvvvvvvvvv", |v, w| v.strb_imm(cond(w), bit(w, 24), bit(w, 23), bit(w, 21), reg(w, 16), reg(w, 12), bits(w, 0, 11))),
    arm!("STRB (reg)",     "cccc011pu1w0nnnnddddvvvvvrr0mmmm", |v, w| v.strb_reg(cond(w), bit(w, 24), bit(w, 23), bit(w, 21), reg(w, 16), reg(w, 12), bits(w, 7, 11), shift(w), reg(w, 0))),
    arm!("STRBT (A1)",     "----0100-110--------------------", |v, _| v.strbt()),
    arm!("STRBT (A2)",     "----0110-110---------------0----", |v, _| v.strbt()),
    arm!("STRD (imm)",     "cccc000pu1w0nnnnddddvvvv1111vvvv", |v, w| v.strd_imm(cond(w), bit(w, 24), bit(w, 23), bit(w, 21), reg(w, 16), reg(w, 12), bits(w, 8, 11), bits(w, 0, 3))),
    arm!("STRD (reg)",     "cccc000pu0w0nnnndddd00001111mmmm", |v, w| v.strd_reg(cond(w), bit(w, 24), bit(w, 23), bit(w, 21), reg(w, 16), reg(w, 12), reg(w, 0))),
    arm!("STRH (imm)",     "cccc000pu1w0nnnnddddvvvv1011vvvv", |v, w| v.strh_imm(cond(w), bit(w, 24), bit(w, 23), bit(w, 21), reg(w, 16), reg(w, 12), bits(w, 8, 11), bits(w, 0, 3))),
    arm!("STRH (reg)",     "cccc000pu0w0nnnndddd00001011mmmm", |v, w| v.strh_reg(cond(w), bit(w, 24), bit(w, 23), bit(w, 21), reg(w, 16), reg(w, 12), reg(w, 0))),
    arm!("STRHT (A1)",     "----0000-110------------1011----", |v, _| v.strht()),
    arm!("STRHT (A2)",     "----0000-010--------00001011----", |v, _| v.strht()),
    arm!("STRT (A1)",      "----0100-010--------------------", |v, _| v.strt()),
    arm!("STRT (A2)",      "----0110-010---------------0----", |v, _| v.strt()),

    // Load/store multiple instructions
    arm!("LDM",            "cccc100pu0w1nnnnxxxxxxxxxxxxxxxx", |v, w| v.ldm(cond(w), bit(w, 24), bit(w, 23), bit(w, 21), reg(w, 16), bits(w, 0, 15) as RegList)),
    arm!("LDM (usr reg)",  "----100--101--------------------", |v, _| v.ldm_usr()),
    arm!("LDM (exce ret)", "----100--1-1----1---------------", |v, _| v.ldm_eret()),
    arm!("STM",            "cccc100pu0w0nnnnxxxxxxxxxxxxxxxx", |v, w| v.stm(cond(w), bit(w, 24), bit(w, 23), bit(w, 21), reg(w, 16), bits(w, 0, 15) as RegList)),
    arm!("STM (usr reg)",  "----100--100--------------------", |v, _| v.stm_usr()),

    // Miscellaneous instructions
    arm!("CLZ",            "----000101101111----11110001----", |v, _| v.clz()),
    arm!("NOP",            "----001100100000111100000000----", |v, _| v.nop()),
    arm!("SEL",            "----01101000--------11111011----", |v, _| v.sel()),

    // Unsigned sum of absolute differences instructions
    arm!("USAD8",          "----01111000----1111----0001----", |v, _| v.usad8()),
    arm!("USADA8",         "----01111000------------0001----", |v, _| v.usada8()),

    // Packing instructions
    arm!("PKHBT",          "cccc01101000nnnnddddvvvvv001mmmm", |v, w| v.pkhbt(cond(w), reg(w, 16), reg(w, 12), bits(w, 7, 11), reg(w, 0))),
    arm!("PKHTB",          "cccc01101000nnnnddddvvvvv101mmmm", |v, w| v.pkhtb(cond(w), reg(w, 16), reg(w, 12), bits(w, 7, 11), reg(w, 0))),

    // Reversal instructions
    arm!("REV",            "----011010111111----11110011----", |v, _| v.rev()),
    arm!("REV16",          "----011010111111----11111011----", |v, _| v.rev16()),
    arm!("REVSH",          "----011011111111----11111011----", |v, _| v.revsh()),

    // Saturation instructions
    arm!("SSAT",           "----0110101---------------01----", |v, _| v.ssat()),
    arm!("SSAT16",         "----01101010--------11110011----", |v, _| v.ssat16()),
    arm!("USAT",           "----0110111---------------01----", |v, _| v.usat()),
    arm!("USAT16",         "----01101110--------11110011----", |v, _| v.usat16()),

    // Multiply (normal) instructions
    arm!("MLA",            "----0000001-------------1001----", |v, _| v.mla()),
    arm!("MUL",            "----0000000-----0000----1001----", |v, _| v.mul()),

    // Multiply (long) instructions
    arm!("SMLAL",          "----0000111-------------1001----", |v, _| v.smlal()),
    arm!("SMULL",          "----0000110-------------1001----", |v, _| v.smull()),
    arm!("UMAAL",          "----00000100------------1001----", |v, _| v.umaal()),
    arm!("UMLAL",          "----0000101-------------1001----", |v, _| v.umlal()),
    arm!("UMULL",          "----0000100-------------1001----", |v, _| v.umull()),

    // Multiply (halfword) instructions
    arm!("SMLALXY",        "----00010100------------1--0----", |v, _| v.smlalxy()),
    arm!("SMLAXY",         "----00010000------------1--0----", |v, _| v.smlaxy()),
    arm!("SMULXY",         "----00010110----0000----1--0----", |v, _| v.smulxy()),

    // Multiply (word by halfword) instructions
    arm!("SMLAWY",         "----00010010------------1-00----", |v, _| v.smlawy()),
    arm!("SMULWY",         "----00010010----0000----1-10----", |v, _| v.smulwy()),

    // Multiply (most significant word) instructions
    arm!("SMMUL",          "----01110101----1111----00-1----", |v, _| v.smmul()),
    arm!("SMMLA",          "----01110101------------00-1----", |v, _| v.smmla()),
    arm!("SMMLS",          "----01110101------------11-1----", |v, _| v.smmls()),

    // Multiply (dual) instructions
    arm!("SMUAD",          "----01110000----1111----00-1----", |v, _| v.smuad()),
    arm!("SMUSD",          "----01110000----1111----01-1----", |v, _| v.smusd()),
    arm!("SMLAD",          "----01110000------------00-1----", |v, _| v.smlad()),
    arm!("SMLALD",         "----01110100------------00-1----", |v, _| v.smlald()),
    arm!("SMLSD",          "----01110000------------01-1----", |v, _| v.smlsd()),
    arm!("SMLSLD",         "----01110100------------01-1----", |v, _| v.smlsld()),

    // Parallel add/subtract (modulo arithmetic) instructions
    arm!("SADD8",          "----01100001--------11111001----", |v, _| v.sadd8()),
    arm!("SADD16",         "----01100001--------11110001----", |v, _| v.sadd16()),
    arm!("SASX",           "----01100001--------11110011----", |v, _| v.sasx()),
    arm!("SSAX",           "----01100001--------11110101----", |v, _| v.ssax()),
    arm!("SSUB8",          "----01100001--------11111111----", |v, _| v.ssub8()),
    arm!("SSUB16",         "----01100001--------11110111----", |v, _| v.ssub16()),
    arm!("UADD8",          "----01100101--------11111001----", |v, _| v.uadd8()),
    arm!("UADD16",         "----01100101--------11110001----", |v, _| v.uadd16()),
    arm!("UASX",           "----01100101--------11110011----", |v, _| v.uasx()),
    arm!("USAX",           "----01100101--------11110101----", |v, _| v.usax()),
    arm!("USUB8",          "----01100101--------11111111----", |v, _| v.usub8()),
    arm!("USUB16",         "----01100101--------11110111----", |v, _| v.usub16()),

    // Parallel add/subtract (saturating) instructions
    arm!("QADD8",          "----01100010--------11111001----", |v, _| v.qadd8()),
    arm!("QADD16",         "----01100010--------11110001----", |v, _| v.qadd16()),
    arm!("QASX",           "----01100010--------11110011----", |v, _| v.qasx()),
    arm!("QSAX",           "----01100010--------11110101----", |v, _| v.qsax()),
    arm!("QSUB8",          "----01100010--------11111111----", |v, _| v.qsub8()),
    arm!("QSUB16",         "----01100010--------11110111----", |v, _| v.qsub16()),
    arm!("UQADD8",         "----01100110--------11111001----", |v, _| v.uqadd8()),
    arm!("UQADD16",        "----01100110--------11110001----", |v, _| v.uqadd16()),
    arm!("UQASX",          "----01100110--------11110011----", |v, _| v.uqasx()),
    arm!("UQSAX",          "----01100110--------11110101----", |v, _| v.uqsax()),
    arm!("UQSUB8",         "----01100110--------11111111----", |v, _| v.uqsub8()),
    arm!("UQSUB16",        "----01100110--------11110111----", |v, _| v.uqsub16()),

    // Parallel add/subtract (halving) instructions
    arm!("SHADD8",         "----01100011--------11111001----", |v, _| v.shadd8()),
    arm!("SHADD16",        "----01100011--------11110001----", |v, _| v.shadd16()),
    arm!("SHASX",          "----01100011--------11110011----", |v, _| v.shasx()),
    arm!("SHSAX",          "----01100011--------11110101----", |v, _| v.shsax()),
    arm!("SHSUB8",         "----01100011--------11111111----", |v, _| v.shsub8()),
    arm!("SHSUB16",        "----01100011--------11110111----", |v, _| v.shsub16()),
    arm!("UHADD8",         "----01100111--------11111001----", |v, _| v.uhadd8()),
    arm!("UHADD16",        "----01100111--------11110001----", |v, _| v.uhadd16()),
    arm!("UHASX",          "----01100111--------11110011----", |v, _| v.uhasx()),
    arm!("UHSAX",          "----01100111--------11110101----", |v, _| v.uhsax()),
    arm!("UHSUB8",         "----01100111--------11111111----", |v, _| v.uhsub8()),
    arm!("UHSUB16",        "----01100111--------11110111----", |v, _| v.uhsub16()),

    // Saturated add/subtract instructions
    arm!("QADD",           "----00010000--------00000101----", |v, _| v.qadd()),
    arm!("QSUB",           "----00010010--------00000101----", |v, _| v.qsub()),
    arm!("QDADD",          "----00010100--------00000101----", |v, _| v.qdadd()),
    arm!("QDSUB",          "----00010110--------00000101----", |v, _| v.qdsub()),

    // Status register access instructions
    arm!("CPS",            "111100010000---00000000---0-----", |v, _| v.cps()),
    arm!("SETEND",         "1111000100000001000000e000000000", |v, w| v.setend(bit(w, 9))),
    arm!("MRS",            "----00010-00--------00--00000000", |v, _| v.mrs()),
    arm!("MSR",            "----00-10-10----1111------------", |v, _| v.msr()),
    arm!("RFE",            "----0001101-0000---------110----", |v, _| v.rfe()),
    arm!("SRS",            "0000011--0-00000000000000001----", |v, _| v.srs()),
];
