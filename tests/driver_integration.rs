use concurrent_queue_bench::config::{Config, ConfigRecipe};
use concurrent_queue_bench::{build_queue, driver, QueueKind};

fn config_for(num_threads: usize, recipe: ConfigRecipe, batch: usize, sets: u64) -> Config {
    let (batch_enque, batch_deque) = recipe.expand(num_threads, batch);
    Config {
        num_threads,
        repetitions: 2,
        max_time_in_s: if sets == 0 { 1 } else { 0 },
        sets,
        seed: 7,
        batch_enque,
        batch_deque,
        prefill: 0,
    }
}

#[test]
fn run_safe_passes_verification_under_all_recipes() {
    for recipe in [
        ConfigRecipe::Balanced,
        ConfigRecipe::UpperHalf,
        ConfigRecipe::OneToAll,
        ConfigRecipe::EvenOdd,
    ] {
        let config = config_for(6, recipe, 32, 0);
        config.validate().unwrap();
        for kind in [QueueKind::GlobalLock, QueueKind::FineLock, QueueKind::LockFree] {
            let queue = build_queue(kind, config.num_threads);
            let results = driver::run_safe(&config, queue.as_ref());
            assert!(results.verified, "{recipe:?} failed to verify under {kind:?}");
        }
    }
}

#[test]
fn run_sets_performs_exact_iteration_count_per_worker() {
    let config = config_for(4, ConfigRecipe::Balanced, 10, 5);
    config.validate().unwrap();
    let queue = build_queue(QueueKind::FineLock, config.num_threads);
    let results = driver::run_sets(&config, queue.as_ref());
    assert_eq!(results.total_enqueues, (4 * 10 * 5) as u64);
    assert_eq!(results.total_dequeues, (4 * 10 * 5) as u64);
}

#[test]
fn sequential_queue_requires_single_thread() {
    let config = config_for(1, ConfigRecipe::Balanced, 16, 0);
    config.validate().unwrap();
    let queue = build_queue(QueueKind::Sequential, 1);
    let results = driver::run_safe(&config, queue.as_ref());
    assert!(results.verified);
}
