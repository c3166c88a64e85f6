use criterion::{Criterion, criterion_group, criterion_main};
use richmark_engine::parse_markdown;
mod common;

fn bench_parse_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("parsing");
    group.sample_size(10);

    let inputs = [
        ("standard", common::generate_markdown_content(100)),
        ("marks", common::generate_marked_content(100)),
        ("tracked", common::generate_tracked_content(100)),
    ];
    for (name, content) in &inputs {
        group.bench_function(*name, |b| {
            b.iter(|| {
                let nodes = parse_markdown(std::hint::black_box(content));
                std::hint::black_box(nodes)
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parse_strategies);
criterion_main!(benches);
