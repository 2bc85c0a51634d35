use criterion::{black_box, criterion_group, criterion_main, Criterion};
use cybermaint::core::{
    corrupt, whole, GlitchParams, Scheduler, Scroll, SimpleRng, TextBuffer, TimedMutator, Typing,
};

fn bench_corrupt(c: &mut Criterion) {
    let text = "Accessing restricted data...\n".repeat(40);
    let params = GlitchParams::default();
    let mut rng = SimpleRng::new(12345);

    c.bench_function("glitch_corrupt_1k", |b| {
        b.iter(|| corrupt(black_box(&text), &params, &mut rng))
    });
}

fn bench_scheduler(c: &mut Criterion) {
    c.bench_function("scheduler_32_effects_to_idle", |b| {
        b.iter(|| {
            let mut buf = TextBuffer::new();
            let mut scheduler = Scheduler::new();
            for i in 0..32 {
                let mutator = if i % 2 == 0 {
                    TimedMutator::new(Typing::new("Bypassing ICE..."), whole)
                } else {
                    TimedMutator::new(Scroll::new(["a", "b", "c"]), whole)
                };
                scheduler.spawn(&mut buf, mutator);
            }
            while let Some(due) = scheduler.next_due_ms() {
                scheduler.advance(black_box(due), &mut buf);
            }
            buf
        })
    });
}

criterion_group!(benches, bench_corrupt, bench_scheduler);
criterion_main!(benches);
