//! Per-worker, per-repetition counters and their aggregation into `Results`.

use std::time::Duration;

/// One worker's bookkeeping for a single repetition.
#[derive(Debug, Clone, Default)]
pub struct Counter {
    pub total_operations: u64,
    pub succeeded_push: u64,
    pub succeeded_pop: u64,
    pub total_push: u64,
    pub total_pop: u64,
    pub sum_of_pushed_values: i64,
    pub sum_of_popped_values: i64,
    pub time: Duration,
    pub timeout: Duration,
}

/// Totals and averages aggregated across workers and repetitions.
#[derive(Debug, Clone, Default)]
pub struct Results {
    pub avg_time: Duration,
    pub avg_timeout: Duration,

    pub total_n_operations: u64,
    pub total_succeeded_enqueues: u64,
    pub total_succeeded_dequeues: u64,

    pub total_enqueues: u64,
    pub total_dequeues: u64,

    /// `false` as soon as any repetition's safe-mode verification fails.
    pub verified: bool,
}

impl Results {
    pub(crate) fn new() -> Self {
        Results {
            verified: true,
            ..Default::default()
        }
    }

    /// Folds one repetition's per-worker counters into the running totals.
    /// Call [`Self::finalize`] once all repetitions have been accumulated.
    pub(crate) fn accumulate(&mut self, counters: &[Counter]) {
        for c in counters {
            self.total_n_operations += c.total_operations;
            self.total_succeeded_enqueues += c.succeeded_push;
            self.total_succeeded_dequeues += c.succeeded_pop;
            self.total_enqueues += c.total_push;
            self.total_dequeues += c.total_pop;
            self.avg_time += c.time;
            self.avg_timeout += c.timeout;
        }
    }

    /// Converts accumulated sums into per-repetition averages.
    pub(crate) fn finalize(&mut self, repetitions: usize) {
        let reps = repetitions.max(1) as u32;
        self.avg_time /= reps;
        self.avg_timeout /= reps;
        self.total_n_operations /= reps as u64;
        self.total_succeeded_enqueues /= reps as u64;
        self.total_succeeded_dequeues /= reps as u64;
        self.total_enqueues /= reps as u64;
        self.total_dequeues /= reps as u64;
    }
}
