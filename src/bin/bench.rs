//! Thin demonstration binary: builds one `Config`, runs it once, logs the
//! result. Not a general-purpose CLI — flags, CSV export, and sweeping a
//! recipe across batch sizes are a wrapper's job, not this binary's.

use concurrent_queue_bench::config::{Config, ConfigRecipe};
use concurrent_queue_bench::{build_queue, driver, QueueKind};
use std::env;
use std::process::ExitCode;
use tracing::info;

fn queue_kind_from_str(s: &str) -> Option<QueueKind> {
    match s {
        "sequential" => Some(QueueKind::Sequential),
        "global_lock" => Some(QueueKind::GlobalLock),
        "fine_lock" => Some(QueueKind::FineLock),
        "lock_free" => Some(QueueKind::LockFree),
        _ => None,
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt().with_target(false).compact().init();

    let mut args = env::args().skip(1);
    let kind_arg = args.next().unwrap_or_else(|| "lock_free".to_string());
    let num_threads: usize = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(4);
    let batch_size: usize = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(64);

    let kind = match queue_kind_from_str(&kind_arg) {
        Some(kind) => kind,
        None => {
            eprintln!(
                "unknown queue kind {kind_arg:?}; expected one of sequential, global_lock, fine_lock, lock_free"
            );
            return ExitCode::FAILURE;
        }
    };

    let (batch_enque, batch_deque) = ConfigRecipe::Balanced.expand(num_threads, batch_size);
    let config = Config {
        num_threads,
        repetitions: 5,
        max_time_in_s: 1,
        sets: 0,
        seed: 42,
        batch_enque,
        batch_deque,
        prefill: 0,
    };

    if let Err(err) = config.validate() {
        eprintln!("invalid configuration: {err}");
        return ExitCode::FAILURE;
    }

    let queue = build_queue(kind, config.num_threads);
    let results = driver::run_safe(&config, queue.as_ref());

    info!(?results, "run complete");
    if !results.verified {
        eprintln!("safe-mode verification failed in at least one repetition");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
