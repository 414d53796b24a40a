//! Safe-mode correctness check: Σpushed = Σpopped + Σresidual.

use crate::counter::Counter;
use crate::queue_trait::ConcurrentQueue;
use crate::value::SENTINEL;

/// Drains `queue` single-threaded and returns the sum of residual values.
///
/// Must only be called after every worker has finished its repetition —
/// draining concurrently with a live producer would undercount.
pub(crate) fn drain_residual(queue: &dyn ConcurrentQueue) -> i64 {
    let mut residual = 0i64;
    loop {
        let v = queue.pop();
        if v == SENTINEL {
            break;
        }
        residual += v as i64;
    }
    residual
}

/// Checks Σpushed = Σpopped + Σresidual across every worker's counter for
/// one repetition.
pub(crate) fn verify(counters: &[Counter], residual: i64) -> Result<(), (i64, i64, i64)> {
    let pushed: i64 = counters.iter().map(|c| c.sum_of_pushed_values).sum();
    let popped: i64 = counters.iter().map(|c| c.sum_of_popped_values).sum();

    if pushed == popped + residual {
        Ok(())
    } else {
        Err((pushed, popped, residual))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queue_trait::ConcurrentQueue;
    use crate::sequential::SingleThreadedQueue;

    #[test]
    fn drain_residual_sums_remaining_values() {
        let q = SingleThreadedQueue::default();
        q.push(3);
        q.push(4);
        q.push(5);
        assert_eq!(drain_residual(&q), 12);
        assert_eq!(q.pop(), crate::value::SENTINEL);
    }

    #[test]
    fn verify_passes_when_sums_balance() {
        let counters = vec![
            Counter {
                sum_of_pushed_values: 100,
                sum_of_popped_values: 40,
                ..Default::default()
            },
            Counter {
                sum_of_pushed_values: 50,
                sum_of_popped_values: 60,
                ..Default::default()
            },
        ];
        assert_eq!(verify(&counters, 50), Ok(()));
    }

    #[test]
    fn verify_fails_when_sums_disagree() {
        let counters = vec![Counter {
            sum_of_pushed_values: 100,
            sum_of_popped_values: 40,
            ..Default::default()
        }];
        assert_eq!(verify(&counters, 0), Err((100, 40, 0)));
    }
}
