use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

use campaign_stats_core::storage::seed::reference_events;
use campaign_stats_core::{
    AggregationEngine, EmailEvent, Fingerprint, IngestionEngine, MemoryEventStore, StatsFilter,
};

fn synthetic_batch(size: usize) -> Vec<EmailEvent> {
    const TYPES: [&str; 4] = ["sent", "open", "click", "bounce"];
    const SITES: [&str; 3] = ["site-a.com", "site-b.com", "site-c.com"];

    (0..size)
        .map(|i| {
            EmailEvent::new(
                TYPES[i % TYPES.len()],
                &format!("user{}@example.com", i % 50),
                SITES[i % SITES.len()],
                &format!("2025-08-{:02}T10:{:02}:{:02}Z", 10 + i % 12, (i / 60) % 60, i % 60),
            )
        })
        .collect()
}

fn bench_fingerprint(c: &mut Criterion) {
    let event = EmailEvent::new("open", "user@example.com", "site-a.com", "2025-08-21T10:35:00Z");
    c.bench_function("fingerprint", |b| b.iter(|| Fingerprint::of(black_box(&event))));
}

fn bench_process_batch(c: &mut Criterion) {
    let batch = synthetic_batch(500);

    c.bench_function("process_batch_500", |b| {
        b.iter_batched(
            || IngestionEngine::new(Arc::new(MemoryEventStore::new())),
            |engine| engine.process_batch(black_box(&batch)),
            BatchSize::SmallInput,
        )
    });

    let store = Arc::new(MemoryEventStore::new());
    let engine = IngestionEngine::new(store);
    let fixture = reference_events();
    let _ = engine.process_batch(&fixture);
    c.bench_function("process_batch_duplicates", |b| {
        b.iter(|| engine.process_batch(black_box(&fixture)))
    });
}

fn bench_daily_stats(c: &mut Criterion) {
    let store = Arc::new(MemoryEventStore::new());
    let _ = IngestionEngine::new(store.clone()).process_batch(&synthetic_batch(5_000));
    let engine = AggregationEngine::new(store);

    c.bench_function("daily_stats_all", |b| {
        b.iter(|| engine.compute_daily_stats(black_box(&StatsFilter::all())))
    });

    let filter = StatsFilter::all().for_site("site-a.com");
    c.bench_function("daily_stats_site", |b| {
        b.iter(|| engine.compute_daily_stats(black_box(&filter)))
    });
}

criterion_group!(
    benches,
    bench_fingerprint,
    bench_process_batch,
    bench_daily_stats
);
criterion_main!(benches);
