use std::fmt;

use crate::ir::location::LocationDescriptor;
use crate::ir::flags::ArmFlags;
use crate::ir::terminal::Terminal;
use crate::ir::types::MicroType;
use crate::ir::value::{MicroValue, NodeData, ValueRef, MAX_ARGS};

/// A basic block: zero or more microinstructions followed by exactly one
/// terminal.
///
/// The block owns all of its nodes in an arena indexed by `ValueRef`; forward
/// argument edges and use lists are both index lists, so there are no
/// ownership cycles and dropping the block drops the whole graph.
///
/// This is a linear IR, not a pure tree IR: instruction order is semantically
/// significant. Reads and writes of flags must happen in translator order, so
/// nodes may not be reordered past a producer/consumer or past a flag-writing
/// node whose flags they read.
#[derive(Debug, Clone)]
pub struct MicroBlock {
    pub location: LocationDescriptor,
    nodes: Vec<MicroValue>,
    pub terminal: Terminal,
    pub cycles_consumed: u64,
}

impl MicroBlock {
    pub fn new(location: LocationDescriptor) -> Self {
        Self {
            location,
            nodes: Vec::new(),
            terminal: Terminal::Invalid,
            cycles_consumed: 0,
        }
    }

    /// Append a node and wire its arguments. Appending is the only way a value
    /// enters the use graph; every argument must already live in this block.
    pub fn append(&mut self, data: NodeData, args: &[ValueRef]) -> ValueRef {
        let expected = MicroValue::new(data).num_args();
        assert_eq!(
            args.len(),
            expected,
            "{:?} takes {} argument(s), got {}",
            data,
            expected,
            args.len()
        );
        let value = ValueRef(self.nodes.len() as u32);
        self.nodes.push(MicroValue::new(data));
        for (index, &arg) in args.iter().enumerate() {
            self.set_arg(value, index, arg);
        }
        value
    }

    pub fn get(&self, value: ValueRef) -> &MicroValue {
        &self.nodes[value.index()]
    }

    /// Attach `arg` as argument `index` of `value`, detaching any previous
    /// argument and keeping both use lists in sync. The argument's type must
    /// match the opcode signature.
    pub fn set_arg(&mut self, value: ValueRef, index: usize, arg: ValueRef) {
        assert!(index < MAX_ARGS);
        assert!(
            arg.index() < self.nodes.len(),
            "argument {} is not part of this block",
            arg
        );
        let expected = self.expected_arg_type(value, index);
        let actual = self.get(arg).ty();
        assert_eq!(
            actual, expected,
            "argument {} of {:?} has type {}, expected {}",
            index,
            self.get(value).data(),
            actual,
            expected
        );

        if let Some(prev) = self.nodes[value.index()].args[index] {
            self.remove_use(prev, value);
        }
        self.nodes[value.index()].args[index] = Some(arg);
        self.nodes[arg.index()].uses.push(value);
    }

    /// Argument `index` of `value`. A missing operand is a program error: all
    /// operands live as long as their consumers.
    pub fn arg(&self, value: ValueRef, index: usize) -> ValueRef {
        self.nodes[value.index()].args[index]
            .unwrap_or_else(|| panic!("argument {} of {} is unset", index, value))
    }

    /// Consumers of `value`, one entry per argument edge.
    pub fn uses(&self, value: ValueRef) -> &[ValueRef] {
        &self.nodes[value.index()].uses
    }

    /// Narrow the flags `value` writes. Widening past the opcode's default
    /// write set is a contract violation.
    pub fn set_write_flags(&mut self, value: ValueRef, flags: ArmFlags) {
        let node = &self.nodes[value.index()];
        let default = match node.data {
            NodeData::Inst(op) => op.info().default_write_flags,
            _ => panic!("set_write_flags on non-Inst node {:?}", node.data),
        };
        assert!(
            (flags & !default).is_empty(),
            "cannot widen write flags of {} from {} to {}",
            node.op(),
            default,
            flags
        );
        self.nodes[value.index()].write_flags = flags;
    }

    /// Rewire every consumer of `old` to consume `new` instead, emptying
    /// `old`'s use list.
    pub fn replace_uses_with(&mut self, old: ValueRef, new: ValueRef) {
        assert_eq!(
            self.get(old).ty(),
            self.get(new).ty(),
            "replacement value has a different type"
        );
        let consumers = std::mem::take(&mut self.nodes[old.index()].uses);
        for consumer in consumers {
            let num_args = self.nodes[consumer.index()].num_args();
            for index in 0..num_args {
                if self.nodes[consumer.index()].args[index] == Some(old) {
                    self.nodes[consumer.index()].args[index] = Some(new);
                    self.nodes[new.index()].uses.push(consumer);
                }
            }
        }
    }

    /// Remove `value` from the block. Legal only when its use list is empty;
    /// the slot is tombstoned so other `ValueRef`s stay valid.
    pub fn remove(&mut self, value: ValueRef) {
        assert!(
            !self.nodes[value.index()].has_uses(),
            "removing {} while it still has uses",
            value
        );
        let num_args = self.nodes[value.index()].num_args();
        for index in 0..num_args {
            if let Some(arg) = self.nodes[value.index()].args[index] {
                self.remove_use(arg, value);
            }
        }
        let node = &mut self.nodes[value.index()];
        node.data = NodeData::Tombstone;
        node.args = [None; MAX_ARGS];
        node.write_flags = ArmFlags::empty();
    }

    pub fn set_terminal(&mut self, terminal: Terminal) {
        self.terminal = terminal;
    }

    /// Total number of node slots, including tombstones.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of live (non-tombstoned) nodes.
    pub fn live_count(&self) -> usize {
        self.nodes.iter().filter(|n| !n.is_tombstone()).count()
    }

    /// Iterate the live nodes in instruction order.
    pub fn iter_live(&self) -> impl Iterator<Item = (ValueRef, &MicroValue)> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| !node.is_tombstone())
            .map(|(index, node)| (ValueRef(index as u32), node))
    }

    fn expected_arg_type(&self, value: ValueRef, index: usize) -> MicroType {
        match self.nodes[value.index()].data {
            NodeData::SetGPR(_) => {
                assert_eq!(index, 0);
                MicroType::U32
            }
            NodeData::Inst(op) => op.info().arg_types[index],
            data => panic!("{:?} takes no arguments", data),
        }
    }

    /// Remove one use edge of `target` owned by `owner`. There may be several;
    /// exactly one is removed.
    fn remove_use(&mut self, target: ValueRef, owner: ValueRef) {
        let uses = &mut self.nodes[target.index()].uses;
        let position = uses
            .iter()
            .position(|&u| u == owner)
            .expect("remove_use without matching add_use; use management bug");
        uses.swap_remove(position);
    }
}

impl fmt::Display for MicroBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Block {} (cycles: {}):", self.location, self.cycles_consumed)?;
        for (value, node) in self.iter_live() {
            match node.data() {
                NodeData::ConstU32(imm) => {
                    writeln!(f, "  {} = ConstU32 #{:#x}", value, imm)?
                }
                NodeData::GetGPR(reg) => writeln!(f, "  {} = GetGPR {}", value, reg)?,
                NodeData::SetGPR(reg) => {
                    writeln!(f, "  SetGPR {}, {}", reg, self.arg(value, 0))?
                }
                NodeData::Inst(op) => {
                    write!(f, "  ")?;
                    if node.ty() != MicroType::Void {
                        write!(f, "{} = ", value)?;
                    }
                    write!(f, "{}", op)?;
                    if !node.write_flags().is_empty() {
                        write!(f, "[{}]", node.write_flags())?;
                    }
                    for index in 0..node.num_args() {
                        if index > 0 {
                            write!(f, ",")?;
                        }
                        write!(f, " {}", self.arg(value, index))?;
                    }
                    writeln!(f)?;
                }
                NodeData::Tombstone => unreachable!(),
            }
        }
        writeln!(f, "  terminal: {}", self.terminal)
    }
}
