use chapbook_core::{Document, Sanitizer};
use criterion::{Criterion, black_box, criterion_group, criterion_main};

fn bench_sanitize(c: &mut Criterion) {
    let sanitizer = Sanitizer::default();
    let line = "\u{3000}\u{3000}价格涨了 50% & 还在涨 [注]，路径 C:\\temp\\file_1 与 $HOME # 注释\n".repeat(200);

    c.bench_function("sanitize", |b| b.iter(|| sanitizer.sanitize(black_box(&line))));
}

fn bench_chapter_text_nodes(c: &mut Criterion) {
    let html = std::fs::read_to_string("../../tests/fixtures/book/1.html").unwrap();

    c.bench_function("chapter_text_nodes", |b| {
        b.iter(|| Document::parse(black_box(&html)).text_nodes("div#content"))
    });
}

criterion_group!(benches, bench_sanitize, bench_chapter_text_nodes);
criterion_main!(benches);
