use criterion::{criterion_group, criterion_main, Criterion};

use rarmjit::{Callbacks, InterpreterConfig, MicroInterpreter};

struct FlatMemory {
    words: Vec<u32>,
}

impl Callbacks for FlatMemory {
    fn memory_read_code(&self, vaddr: u32) -> u32 {
        self.words.get((vaddr / 4) as usize).copied().unwrap_or(0)
    }

    fn memory_read_32(&self, vaddr: u32) -> u32 {
        self.memory_read_code(vaddr)
    }
}

fn bench_cached_dispatch(c: &mut Criterion) {
    // add r1, r1, #1 ; b 0, a tight two-instruction loop that stays in the
    // block cache after the first pass.
    let memory = FlatMemory { words: vec![0xE2811001, 0xEAFFFFFD] };
    let mut cpu = MicroInterpreter::new(InterpreterConfig {
        callbacks: Box::new(memory),
        id: 0,
    });

    // Warm the cache.
    cpu.execute(2);

    c.bench_function("cached_block_dispatch_1k_instructions", |b| {
        b.iter(|| {
            cpu.set_down_count(i64::MAX);
            cpu.execute(1000);
        })
    });
}

criterion_group!(benches, bench_cached_dispatch);
criterion_main!(benches);
