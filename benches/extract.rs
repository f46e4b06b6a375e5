// benches/extract.rs
use criterion::{Criterion, black_box, criterion_group, criterion_main};

use vehicle_scrape::{
    core::{Document, LabelIndex, PrefixMatcher},
    reconcile,
    specs::{challans, rc},
};

fn load(name: &str) -> String {
    std::fs::read_to_string(format!("{}/tests/fixtures/{name}", env!("CARGO_MANIFEST_DIR")))
        .unwrap_or_else(|e| panic!("read tests/fixtures/{name}: {e}"))
}

fn bench_extract(c: &mut Criterion) {
    let rc_page = load("rc.html");
    let challan_page = load("challans.html");
    let payload: serde_json::Value = serde_json::from_str(&load("summary_nested.json")).unwrap();

    c.bench_function("rc_parse_and_assemble", |b| {
        b.iter(|| {
            let record = rc::parse(black_box(&rc_page), "UP63BJ8585").unwrap();
            black_box(record.other_info.len())
        })
    });

    // Parse once; measures label lookups alone.
    let doc = Document::parse(&rc_page).unwrap();
    c.bench_function("rc_assemble_only", |b| {
        b.iter(|| black_box(rc::assemble(black_box(&doc), "UP63BJ8585")))
    });

    c.bench_function("label_lookup_substring_vs_prefix", |b| {
        let sub = LabelIndex::default();
        let pre = LabelIndex::new(&PrefixMatcher);
        b.iter(|| {
            let a = sub.find(doc.root(), black_box("Seating Capacity"));
            let z = pre.find(doc.root(), black_box("NOC"));
            black_box((a, z))
        })
    });

    c.bench_function("challan_cards", |b| {
        b.iter(|| {
            let list = challans::parse(black_box(&challan_page), "UP63BJ8585").unwrap();
            black_box(list.total_challans)
        })
    });

    c.bench_function("reconcile_nested", |b| {
        b.iter(|| black_box(reconcile::reconcile(black_box(&payload)).total_amount))
    });
}

criterion_group!(benches, bench_extract);
criterion_main!(benches);
