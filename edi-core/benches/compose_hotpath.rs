use edi_core::{ContentCatalog, EdiRequest, RequestDetails, RequestProcessor};
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use std::sync::Arc;

fn bench_processor() -> RequestProcessor {
    let catalog = ContentCatalog::embedded().expect("load embedded catalog");
    RequestProcessor::new(Arc::new(catalog))
}

fn bench_process(c: &mut Criterion) {
    let processor = bench_processor();
    let single = EdiRequest::new(
        "bench-0001",
        RequestDetails::new("ORDER", Some("LTL"), Some("EDI"), Some("ACK")),
    );
    let dual = EdiRequest::new(
        "bench-0002",
        RequestDetails::new("ASN", None, Some("JSON"), Some("RECEIPT")),
    );
    let rejected = EdiRequest::new(
        "bench-0003",
        RequestDetails::new("ORDER", Some("FREIGHT"), None, Some("ACK")),
    );

    c.bench_function("process/order_ack", |b| {
        b.iter(|| {
            let outcome = processor.process(black_box(&single)).expect("process order");
            black_box(outcome);
        });
    });

    c.bench_function("process/asn_receipt", |b| {
        b.iter(|| {
            let outcome = processor.process(black_box(&dual)).expect("process asn");
            black_box(outcome);
        });
    });

    c.bench_function("process/validation_rejection", |b| {
        b.iter(|| {
            let outcome = processor.process(black_box(&rejected)).expect("process rejection");
            black_box(outcome);
        });
    });
}

fn bench_catalog_load(c: &mut Criterion) {
    c.bench_function("catalog/load_embedded", |b| {
        b.iter(|| {
            let catalog = ContentCatalog::embedded().expect("load embedded catalog");
            black_box(catalog.len());
        });
    });
}

criterion_group!(benches, bench_process, bench_catalog_load);
criterion_main!(benches);
