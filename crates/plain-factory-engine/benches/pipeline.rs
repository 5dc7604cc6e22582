use criterion::{Criterion, criterion_group, criterion_main};
use plain_factory_engine::{
    FormatSelector, LicenseFactory, LicenseMetadata, Provenance,
    parsing::parse_text,
    strip_markup,
};
mod common;

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    group.sample_size(10);

    let body = common::generate_license_body(50);

    group.bench_function("parse_body", |b| {
        b.iter(|| {
            let parsed = parse_text(Provenance::Body, std::hint::black_box(&body));
            std::hint::black_box(parsed)
        });
    });

    let meta = LicenseMetadata::new("Plain Bench", body.clone(), "Not legal advice.");
    let factory = LicenseFactory::new();
    group.bench_function("produce_all_formats", |b| {
        b.iter(|| {
            let outputs = factory.produce(std::hint::black_box(&meta), FormatSelector::All);
            std::hint::black_box(outputs)
        });
    });

    group.bench_function("strip_markup", |b| {
        b.iter(|| std::hint::black_box(strip_markup(std::hint::black_box(&body))));
    });

    group.finish();
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
