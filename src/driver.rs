//! Orchestrates workers against a queue, in fast, safe, or sets mode.

use crate::config::Config;
use crate::counter::{Counter, Results};
use crate::queue_trait::ConcurrentQueue;
use crate::value::{Value, SENTINEL};
use crate::verifier;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::sync::{Barrier, Mutex};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{error, info_span};

/// Generates `0..n` shuffled by `rng`, matching the original benchmark's
/// per-iteration batch generator (fresh permutation, not resampling with
/// replacement).
fn generate_batch(n: usize, rng: &mut impl rand::Rng) -> Vec<Value> {
    let mut values: Vec<Value> = (0..n as Value).collect();
    values.shuffle(rng);
    values
}

fn worker_rng(config: &Config, worker_id: usize) -> rand::rngs::StdRng {
    rand::rngs::StdRng::seed_from_u64((config.seed as i64 + worker_id as i64 + 1) as u64)
}

/// Drives `queue` through `config.repetitions` repetitions, each bounded by
/// `config.max_time_in_s` wall-clock seconds, recording only attempt/success
/// counts (no value sums, no verification).
pub fn run_fast(config: &Config, queue: &dyn ConcurrentQueue) -> Results {
    for i in 0..config.prefill {
        queue.push(i as Value);
    }

    let mut results = Results::new();
    for _rep in 0..config.repetitions {
        let counters = Mutex::new(vec![Counter::default(); config.num_threads]);
        let start_barrier = Barrier::new(config.num_threads);
        let stop_barrier = Barrier::new(config.num_threads);

        thread::scope(|scope| {
            for worker_id in 0..config.num_threads {
                let counters = &counters;
                let start_barrier = &start_barrier;
                let stop_barrier = &stop_barrier;
                scope.spawn(move || {
                    crate::worker::set_worker_id(worker_id);
                    let mut rng = worker_rng(config, worker_id);
                    let push_values =
                        generate_batch(config.batch_enque[worker_id], &mut rng);
                    let mut counter = Counter::default();

                    start_barrier.wait();
                    let t_start = Instant::now();
                    while t_start.elapsed() < Duration::from_secs(config.max_time_in_s as u64) {
                        for &v in &push_values {
                            if queue.push(v) {
                                counter.succeeded_push += 1;
                            }
                        }
                        counter.total_push += push_values.len() as u64;

                        for _ in 0..config.batch_deque[worker_id] {
                            if queue.pop() != SENTINEL {
                                counter.succeeded_pop += 1;
                            }
                        }
                        counter.total_pop += config.batch_deque[worker_id] as u64;
                    }
                    counter.time = t_start.elapsed();
                    counter.total_operations = counter.total_push + counter.total_pop;
                    stop_barrier.wait();

                    counters.lock().unwrap()[worker_id] = counter;
                });
            }
        });

        results.accumulate(&counters.into_inner().unwrap());
    }
    results.finalize(config.repetitions);
    results
}

/// Same shape as [`run_fast`], but every worker also tracks the sum of
/// values it pushed and popped, and every repetition is checked by
/// [`verifier::verify`] after draining the queue's residual contents.
pub fn run_safe(config: &Config, queue: &dyn ConcurrentQueue) -> Results {
    let mut results = Results::new();

    for rep in 0..config.repetitions {
        let span = info_span!("repetition", repetition = rep);
        let _guard = span.enter();

        let counters = Mutex::new(vec![Counter::default(); config.num_threads]);
        let start_barrier = Barrier::new(config.num_threads);
        let stop_barrier = Barrier::new(config.num_threads);

        thread::scope(|scope| {
            for worker_id in 0..config.num_threads {
                let counters = &counters;
                let start_barrier = &start_barrier;
                let stop_barrier = &stop_barrier;
                scope.spawn(move || {
                    crate::worker::set_worker_id(worker_id);
                    let mut rng = worker_rng(config, worker_id);
                    let mut counter = Counter::default();

                    start_barrier.wait();
                    let t_start = Instant::now();
                    while t_start.elapsed() < Duration::from_secs(config.max_time_in_s as u64) {
                        let t0 = Instant::now();
                        let push_values =
                            generate_batch(config.batch_enque[worker_id], &mut rng);
                        counter.timeout += t0.elapsed();

                        for &v in &push_values {
                            if queue.push(v) {
                                counter.sum_of_pushed_values += v as i64;
                                counter.succeeded_push += 1;
                            }
                            counter.total_push += 1;
                        }

                        for _ in 0..config.batch_deque[worker_id] {
                            let v = queue.pop();
                            if v != SENTINEL {
                                counter.sum_of_popped_values += v as i64;
                                counter.succeeded_pop += 1;
                            }
                            counter.total_pop += 1;
                        }
                    }
                    counter.time = t_start.elapsed();
                    counter.total_operations = counter.total_push + counter.total_pop;
                    stop_barrier.wait();

                    counters.lock().unwrap()[worker_id] = counter;
                });
            }
        });

        let counters = counters.into_inner().unwrap();
        let residual = verifier::drain_residual(queue);
        if let Err((pushed, popped, residual)) = verifier::verify(&counters, residual) {
            error!(
                repetition = rep,
                pushed, popped, residual, "safe-mode verification failed"
            );
            results.verified = false;
        }

        results.accumulate(&counters);
    }

    results.finalize(config.repetitions);
    results
}

/// Runs exactly `config.sets` push-batch-then-pop-batch iterations per
/// worker, ignoring the wall-clock budget.
pub fn run_sets(config: &Config, queue: &dyn ConcurrentQueue) -> Results {
    assert_ne!(config.sets, 0, "run_sets requires a non-zero set count");

    let mut results = Results::new();
    for _rep in 0..config.repetitions {
        let counters = Mutex::new(vec![Counter::default(); config.num_threads]);
        let start_barrier = Barrier::new(config.num_threads);
        let stop_barrier = Barrier::new(config.num_threads);

        thread::scope(|scope| {
            for worker_id in 0..config.num_threads {
                let counters = &counters;
                let start_barrier = &start_barrier;
                let stop_barrier = &stop_barrier;
                scope.spawn(move || {
                    crate::worker::set_worker_id(worker_id);
                    let mut rng = worker_rng(config, worker_id);
                    let push_values =
                        generate_batch(config.batch_enque[worker_id], &mut rng);
                    let mut counter = Counter::default();

                    start_barrier.wait();
                    let t_start = Instant::now();
                    for _ in 0..config.sets {
                        for &v in &push_values {
                            if queue.push(v) {
                                counter.succeeded_push += 1;
                            }
                        }
                        counter.total_push += push_values.len() as u64;

                        for _ in 0..config.batch_deque[worker_id] {
                            if queue.pop() != SENTINEL {
                                counter.succeeded_pop += 1;
                            }
                        }
                        counter.total_pop += config.batch_deque[worker_id] as u64;
                    }
                    counter.time = t_start.elapsed();
                    counter.total_operations = counter.total_push + counter.total_pop;
                    stop_barrier.wait();

                    counters.lock().unwrap()[worker_id] = counter;
                });
            }
        });

        results.accumulate(&counters.into_inner().unwrap());
    }
    results.finalize(config.repetitions);
    results
}
