use std::collections::HashMap;

use crate::ir::block::MicroBlock;
use crate::ir::types::MicroType;
use crate::ir::value::NodeData;

/// Check block invariants; panics on violation.
///
/// 1. Every argument references a node appended earlier in the same block and
///    its type matches the opcode signature.
/// 2. Use lists are consistent with the forward argument edges (bidirectional
///    integrity): each (consumer, producer) pair appears in the producer's use
///    list exactly as often as it appears among the consumer's arguments.
pub fn verify_block(block: &MicroBlock) {
    let mut forward: HashMap<(u32, u32), usize> = HashMap::new();

    for (value, node) in block.iter_live() {
        for index in 0..node.num_args() {
            let arg = block.arg(value, index);
            assert!(
                arg.0 < value.0,
                "verification failed: {} uses {} before it is defined",
                value,
                arg
            );
            let expected = match node.data() {
                NodeData::SetGPR(_) => MicroType::U32,
                NodeData::Inst(op) => op.info().arg_types[index],
                data => panic!("verification failed: {:?} has arguments", data),
            };
            assert_eq!(
                block.get(arg).ty(),
                expected,
                "verification failed: argument {} of {} has the wrong type",
                index,
                value
            );
            *forward.entry((value.0, arg.0)).or_insert(0) += 1;
        }
    }

    let mut backward: HashMap<(u32, u32), usize> = HashMap::new();
    for (value, _) in block.iter_live() {
        for &user in block.uses(value) {
            *backward.entry((user.0, value.0)).or_insert(0) += 1;
        }
    }

    assert_eq!(
        forward, backward,
        "verification failed: use lists are inconsistent with argument edges"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::arm::types::Reg;
    use crate::ir::location::LocationDescriptor;
    use crate::ir::opcode::MicroOp;
    use crate::ir::value::NodeData;

    #[test]
    fn test_verify_accepts_valid_block() {
        let mut block = MicroBlock::new(LocationDescriptor::at(0));
        let rn = block.append(NodeData::GetGPR(Reg::R2), &[]);
        let imm = block.append(NodeData::ConstU32(3), &[]);
        let add = block.append(NodeData::Inst(MicroOp::Add), &[rn, imm]);
        block.append(NodeData::SetGPR(Reg::R1), &[add]);
        verify_block(&block);
    }

    #[test]
    fn test_verify_accepts_duplicate_edges() {
        let mut block = MicroBlock::new(LocationDescriptor::at(0));
        let a = block.append(NodeData::GetGPR(Reg::R0), &[]);
        // The same value used for both operands produces two use entries.
        block.append(NodeData::Inst(MicroOp::Add), &[a, a]);
        assert_eq!(block.get(a).use_count(), 2);
        verify_block(&block);
    }

    #[test]
    fn test_verify_survives_replace_and_remove() {
        let mut block = MicroBlock::new(LocationDescriptor::at(0));
        let rn = block.append(NodeData::GetGPR(Reg::R2), &[]);
        let imm = block.append(NodeData::ConstU32(3), &[]);
        let add = block.append(NodeData::Inst(MicroOp::Add), &[rn, imm]);
        block.append(NodeData::SetGPR(Reg::R1), &[add]);

        let zero = block.append(NodeData::ConstU32(0), &[]);
        block.replace_uses_with(rn, zero);
        block.remove(rn);
        verify_block(&block);
    }
}
