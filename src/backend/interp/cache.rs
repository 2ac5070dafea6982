use std::collections::HashMap;

use crate::backend::interp::tac::TacBlock;
use crate::ir::location::LocationDescriptor;

/// Cache of lowered blocks, keyed by location descriptor.
///
/// Single-threaded: the owning interpreter is the only reader and writer.
pub struct BlockCache {
    blocks: HashMap<LocationDescriptor, TacBlock>,
}

impl BlockCache {
    pub fn new() -> Self {
        Self { blocks: HashMap::new() }
    }

    pub fn get(&self, location: &LocationDescriptor) -> Option<&TacBlock> {
        self.blocks.get(location)
    }

    pub fn insert(&mut self, location: LocationDescriptor, block: TacBlock) {
        self.blocks.insert(location, block);
    }

    /// Drop all cached blocks.
    pub fn clear(&mut self) {
        self.blocks.clear();
    }

    /// Drop blocks whose entry PC falls within `[start, start + length)`.
    pub fn invalidate_range(&mut self, start: u32, length: u32) {
        let start = start as u64;
        let end = start + length as u64;
        self.blocks.retain(|location, _| {
            let pc = location.arm_pc as u64;
            pc < start || pc >= end
        });
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

impl Default for BlockCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::terminal::Terminal;

    fn dummy_block() -> TacBlock {
        TacBlock {
            instructions: Vec::new(),
            terminal: Terminal::ReturnToDispatch,
            cycles_consumed: 1,
        }
    }

    #[test]
    fn test_cache_insert_and_get() {
        let mut cache = BlockCache::new();
        let loc = LocationDescriptor::at(0x1000);
        assert!(cache.get(&loc).is_none());
        cache.insert(loc, dummy_block());
        assert!(cache.get(&loc).is_some());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_cache_distinguishes_descriptor_fields() {
        let mut cache = BlockCache::new();
        let loc = LocationDescriptor::at(0x1000);
        cache.insert(loc, dummy_block());
        assert!(cache.get(&loc.with_t_flag(true)).is_none());
        assert!(cache.get(&loc.with_cond(crate::ir::cond::Cond::EQ)).is_none());
    }

    #[test]
    fn test_cache_invalidate_range() {
        let mut cache = BlockCache::new();
        for pc in [0x1000u32, 0x2000, 0x3000] {
            cache.insert(LocationDescriptor::at(pc), dummy_block());
        }
        cache.invalidate_range(0x2000, 0x1000);
        assert!(cache.get(&LocationDescriptor::at(0x1000)).is_some());
        assert!(cache.get(&LocationDescriptor::at(0x2000)).is_none());
        assert!(cache.get(&LocationDescriptor::at(0x3000)).is_some());
    }

    #[test]
    fn test_cache_clear() {
        let mut cache = BlockCache::new();
        cache.insert(LocationDescriptor::at(0), dummy_block());
        cache.clear();
        assert!(cache.is_empty());
    }
}
