use criterion::{black_box, criterion_group, criterion_main, Criterion};

use coatutor_core::checklist::score_checklist;
use coatutor_core::knowledge::KnowledgeBase;
use coatutor_core::sequence::validate_sequence;

fn bench_checklist(c: &mut Criterion) {
    let mut group = c.benchmark_group("checklist");
    let topic = KnowledgeBase::shared().get_or_generic("Instruction Cycle");

    let perfect = "I will explain Fetch, Decode, and Execute phases, using Program Counter and IR";
    let partial = "the cpu reads the next instruction from memory";
    let long = perfect.repeat(50);

    group.bench_function("perfect", |b| {
        b.iter(|| score_checklist(black_box(perfect), black_box(&topic.practice_checklist)))
    });

    group.bench_function("partial", |b| {
        b.iter(|| score_checklist(black_box(partial), black_box(&topic.practice_checklist)))
    });

    group.bench_function("long_answer", |b| {
        b.iter(|| score_checklist(black_box(&long), black_box(&topic.practice_checklist)))
    });

    group.finish();
}

fn bench_sequence(c: &mut Criterion) {
    let mut group = c.benchmark_group("sequence");
    let flow = KnowledgeBase::shared()
        .get_or_generic("Pipelining")
        .flow_steps;

    let ordered = ["Fetch", "Decode", "Execute", "Memory Access", "Write Back"];
    let rotated = ["Write Back", "Fetch", "Decode", "Execute", "Memory Access"];

    group.bench_function("ordered", |b| {
        b.iter(|| validate_sequence(black_box(&ordered), black_box(&flow)))
    });

    group.bench_function("rotated", |b| {
        b.iter(|| validate_sequence(black_box(&rotated), black_box(&flow)))
    });

    group.finish();
}

criterion_group!(benches, bench_checklist, bench_sequence);
criterion_main!(benches);
