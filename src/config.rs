//! Run configuration, its validation, and the batch-vector recipes.

use thiserror::Error;

/// Errors `Config::validate` can return. Each variant names exactly one
/// violated invariant so a collaborator can match on it rather than parse
/// a message.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("num_threads must be positive")]
    ZeroThreads,

    #[error("repetitions must be in 1..=100, got {0}")]
    RepetitionsOutOfRange(usize),

    #[error("max_time_in_s must be in 0..=100, got {0}")]
    MaxTimeOutOfRange(u32),

    #[error("exactly one of max_time_in_s and sets must be zero (max_time_in_s={max_time_in_s}, sets={sets})")]
    TimeAndSetsNotExclusive { max_time_in_s: u32, sets: u64 },

    #[error("batch_enque has {actual} entries, expected one per thread ({expected})")]
    EnqueueBatchLengthMismatch { expected: usize, actual: usize },

    #[error("batch_deque has {actual} entries, expected one per thread ({expected})")]
    DequeueBatchLengthMismatch { expected: usize, actual: usize },
}

/// The four ways of turning one batch size into per-thread enqueue/dequeue
/// vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigRecipe {
    /// Every worker both enqueues and dequeues `batch_size`.
    Balanced,
    /// Lower half of workers enqueue, upper half dequeue.
    UpperHalf,
    /// Worker 0 enqueues, every other worker dequeues.
    OneToAll,
    /// Even-indexed workers enqueue, odd-indexed workers dequeue.
    EvenOdd,
}

impl ConfigRecipe {
    /// Expands `batch_size` into per-thread `(batch_enque, batch_deque)`.
    pub fn expand(self, num_threads: usize, batch_size: usize) -> (Vec<usize>, Vec<usize>) {
        let mut enque = vec![0; num_threads];
        let mut deque = vec![0; num_threads];

        match self {
            ConfigRecipe::Balanced => {
                enque.fill(batch_size);
                deque.fill(batch_size);
            }
            ConfigRecipe::UpperHalf => {
                let half = num_threads / 2;
                enque[..half].fill(batch_size);
                deque[half..].fill(batch_size);
                if num_threads % 2 != 0 && half > 0 {
                    enque[half - 1] = batch_size;
                }
            }
            ConfigRecipe::OneToAll => {
                if num_threads > 0 {
                    enque[0] = batch_size;
                }
                for slot in deque.iter_mut().skip(1) {
                    *slot = batch_size;
                }
            }
            ConfigRecipe::EvenOdd => {
                for i in (0..num_threads).step_by(2) {
                    enque[i] = batch_size;
                }
                for i in (1..num_threads).step_by(2) {
                    deque[i] = batch_size;
                }
            }
        }

        (enque, deque)
    }
}

/// A validated (once `validate` has been called) run configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub num_threads: usize,
    pub repetitions: usize,
    pub max_time_in_s: u32,
    pub sets: u64,
    pub seed: i32,
    pub batch_enque: Vec<usize>,
    pub batch_deque: Vec<usize>,
    pub prefill: usize,
}

impl Config {
    /// Checks every invariant from the external-interface contract. Never
    /// touches a queue; a caller must call this before building a driver
    /// run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_threads == 0 {
            return Err(ConfigError::ZeroThreads);
        }
        if self.repetitions == 0 || self.repetitions > 100 {
            return Err(ConfigError::RepetitionsOutOfRange(self.repetitions));
        }
        if self.max_time_in_s > 100 {
            return Err(ConfigError::MaxTimeOutOfRange(self.max_time_in_s));
        }
        if (self.max_time_in_s == 0) == (self.sets == 0) {
            return Err(ConfigError::TimeAndSetsNotExclusive {
                max_time_in_s: self.max_time_in_s,
                sets: self.sets,
            });
        }
        if self.batch_enque.len() != self.num_threads {
            return Err(ConfigError::EnqueueBatchLengthMismatch {
                expected: self.num_threads,
                actual: self.batch_enque.len(),
            });
        }
        if self.batch_deque.len() != self.num_threads {
            return Err(ConfigError::DequeueBatchLengthMismatch {
                expected: self.num_threads,
                actual: self.batch_deque.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        Config {
            num_threads: 4,
            repetitions: 5,
            max_time_in_s: 1,
            sets: 0,
            seed: 42,
            batch_enque: vec![10, 10, 10, 10],
            batch_deque: vec![10, 10, 10, 10],
            prefill: 0,
        }
    }

    #[test]
    fn accepts_well_formed_config() {
        assert_eq!(valid_config().validate(), Ok(()));
    }

    #[test]
    fn rejects_zero_threads() {
        let mut c = valid_config();
        c.num_threads = 0;
        assert_eq!(c.validate(), Err(ConfigError::ZeroThreads));
    }

    #[test]
    fn rejects_excess_repetitions() {
        let mut c = valid_config();
        c.repetitions = 101;
        assert_eq!(c.validate(), Err(ConfigError::RepetitionsOutOfRange(101)));
    }

    #[test]
    fn rejects_zero_repetitions() {
        let mut c = valid_config();
        c.repetitions = 0;
        assert_eq!(c.validate(), Err(ConfigError::RepetitionsOutOfRange(0)));
    }

    #[test]
    fn rejects_excess_time_budget() {
        let mut c = valid_config();
        c.max_time_in_s = 101;
        assert_eq!(c.validate(), Err(ConfigError::MaxTimeOutOfRange(101)));
    }

    #[test]
    fn rejects_both_time_and_sets_set() {
        let mut c = valid_config();
        c.sets = 5;
        assert_eq!(
            c.validate(),
            Err(ConfigError::TimeAndSetsNotExclusive {
                max_time_in_s: 1,
                sets: 5
            })
        );
    }

    #[test]
    fn rejects_neither_time_nor_sets_set() {
        let mut c = valid_config();
        c.max_time_in_s = 0;
        assert_eq!(
            c.validate(),
            Err(ConfigError::TimeAndSetsNotExclusive {
                max_time_in_s: 0,
                sets: 0
            })
        );
    }

    #[test]
    fn rejects_mismatched_batch_vectors() {
        let mut c = valid_config();
        c.batch_enque = vec![1, 2];
        assert_eq!(
            c.validate(),
            Err(ConfigError::EnqueueBatchLengthMismatch {
                expected: 4,
                actual: 2
            })
        );
    }

    #[test]
    fn balanced_recipe_gives_every_worker_both() {
        let (enque, deque) = ConfigRecipe::Balanced.expand(4, 10);
        assert_eq!(enque, vec![10, 10, 10, 10]);
        assert_eq!(deque, vec![10, 10, 10, 10]);
    }

    #[test]
    fn upper_half_recipe_splits_workers() {
        let (enque, deque) = ConfigRecipe::UpperHalf.expand(4, 10);
        assert_eq!(enque, vec![10, 10, 0, 0]);
        assert_eq!(deque, vec![0, 0, 10, 10]);
    }

    #[test]
    fn upper_half_recipe_handles_odd_worker_count() {
        let (enque, deque) = ConfigRecipe::UpperHalf.expand(5, 10);
        assert_eq!(enque, vec![10, 10, 0, 0, 0]);
        assert_eq!(deque, vec![0, 0, 10, 10, 10]);
    }

    #[test]
    fn one_to_all_recipe_has_single_producer() {
        let (enque, deque) = ConfigRecipe::OneToAll.expand(4, 10);
        assert_eq!(enque, vec![10, 0, 0, 0]);
        assert_eq!(deque, vec![0, 10, 10, 10]);
    }

    #[test]
    fn even_odd_recipe_alternates() {
        let (enque, deque) = ConfigRecipe::EvenOdd.expand(4, 10);
        assert_eq!(enque, vec![10, 0, 10, 0]);
        assert_eq!(deque, vec![0, 10, 0, 10]);
    }
}
