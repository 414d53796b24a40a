//! Benchmark harness comparing coarse-lock, two-lock, and lock-free
//! (Michael-Scott, tagged-pointer ABA protection) concurrent FIFO queues.

mod backoff;
mod cell;
pub mod coarse_lock;
pub mod config;
pub mod counter;
pub mod driver;
pub mod lock_free;
pub mod queue_trait;
pub mod selector;
pub mod sequential;
pub mod two_lock;
pub mod value;
mod verifier;
pub mod worker;

pub use config::{Config, ConfigError, ConfigRecipe};
pub use counter::{Counter, Results};
pub use queue_trait::ConcurrentQueue;
pub use selector::{build_queue, QueueKind};
pub use value::{Value, SENTINEL};
