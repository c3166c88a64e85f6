use criterion::{Criterion, criterion_group, criterion_main};
use richmark_engine::{Node, Point, Selection, parse_markdown, serialize, split_at};
mod common;

fn bench_serialize(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialize");
    group.sample_size(10);

    let tree = parse_markdown(&common::generate_marked_content(100)).unwrap();
    group.bench_function("marked_document", |b| {
        b.iter(|| std::hint::black_box(serialize(std::hint::black_box(&tree))));
    });

    group.finish();
}

fn bench_split(c: &mut Criterion) {
    let mut group = c.benchmark_group("split");
    group.sample_size(10);

    let children = parse_markdown(&common::generate_markdown_content(100)).unwrap();
    let middle = children.len() / 2;
    let tree = vec![Node::markdown_block("bench", None, children)];
    let cursor = Selection::collapsed(Point::new(vec![0, middle, 0], 1));
    group.bench_function("middle_of_document", |b| {
        b.iter(|| std::hint::black_box(split_at(&tree, std::hint::black_box(&cursor))));
    });

    group.finish();
}

criterion_group!(benches, bench_serialize, bench_split);
criterion_main!(benches);
