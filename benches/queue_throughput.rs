use concurrent_queue_bench::coarse_lock::CoarseLockQueue;
use concurrent_queue_bench::lock_free::LockFreeQueue;
use concurrent_queue_bench::two_lock::TwoLockQueue;
use concurrent_queue_bench::ConcurrentQueue;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn bench_single_threaded_push_pop(c: &mut Criterion) {
    let mut group = c.benchmark_group("single-threaded push/pop");

    group.bench_function("global_lock", |b| {
        let q = CoarseLockQueue::new();
        b.iter(|| {
            q.push(black_box(1));
            q.pop()
        })
    });

    group.bench_function("fine_lock", |b| {
        let q = TwoLockQueue::new(1);
        b.iter(|| {
            q.push(black_box(1));
            q.pop()
        })
    });

    group.bench_function("lock_free", |b| {
        let q = LockFreeQueue::new(1);
        b.iter(|| {
            q.push(black_box(1));
            q.pop()
        })
    });

    group.finish();
}

fn bench_contended_push(num_workers: usize, c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("{num_workers}-worker contended push"));

    group.bench_function("global_lock", |b| {
        b.iter(|| {
            let q = CoarseLockQueue::new();
            std::thread::scope(|scope| {
                for _ in 0..num_workers {
                    scope.spawn(|| {
                        for v in 0..1000 {
                            q.push(black_box(v));
                        }
                    });
                }
            });
        })
    });

    group.bench_function("fine_lock", |b| {
        b.iter(|| {
            let q = TwoLockQueue::new(num_workers);
            std::thread::scope(|scope| {
                for id in 0..num_workers {
                    scope.spawn(move || {
                        concurrent_queue_bench::worker::set_worker_id(id);
                        for v in 0..1000 {
                            q.push(black_box(v));
                        }
                    });
                }
            });
        })
    });

    group.bench_function("lock_free", |b| {
        b.iter(|| {
            let q = LockFreeQueue::new(num_workers);
            std::thread::scope(|scope| {
                for id in 0..num_workers {
                    scope.spawn(move || {
                        concurrent_queue_bench::worker::set_worker_id(id);
                        for v in 0..1000 {
                            q.push(black_box(v));
                        }
                    });
                }
            });
        })
    });

    group.finish();
}

fn bench_contended_push_4_workers(c: &mut Criterion) {
    bench_contended_push(4, c);
}

criterion_group!(
    benches,
    bench_single_threaded_push_pop,
    bench_contended_push_4_workers
);
criterion_main!(benches);
