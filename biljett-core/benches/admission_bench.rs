use criterion::{black_box, criterion_group, criterion_main, Criterion};

use biljett_core::admission::AdmissionTable;
use biljett_core::ops::{OpKind, Operation};

fn bench_uncontended_acquire_release(c: &mut Criterion) {
    let table = AdmissionTable::with_slots(5).unwrap();

    c.bench_function("uncontended_acquire_release", |b| {
        b.iter(|| {
            let guard = table.acquire(Operation::new(black_box(0), OpKind::Inquire, 1));
            drop(guard);
        })
    });
}

fn bench_shared_inquiries(c: &mut Criterion) {
    let table = AdmissionTable::with_slots(8).unwrap();

    c.bench_function("shared_inquiries_same_event", |b| {
        b.iter(|| {
            let first = table.acquire(Operation::new(black_box(3), OpKind::Inquire, 1));
            let second = table.acquire(Operation::new(black_box(3), OpKind::Inquire, 2));
            drop(first);
            drop(second);
        })
    });
}

criterion_group!(benches, bench_uncontended_acquire_release, bench_shared_inquiries);
criterion_main!(benches);
