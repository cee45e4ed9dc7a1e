mod counter;
mod error;
mod pool;
mod runner;
mod timer;
mod worker;
pub mod cli;

pub use counter::Counter;
pub use counter::CounterKind;
pub use counter::NosyncCounter;
pub use counter::SyncMethodCounter;
pub use counter::SyncBlockCounter;
pub use error::{PoolError, RunnerError, UnknownCounterKind};
pub use pool::{TaskHandle, WorkerPool};
pub use runner::{RunSummary, Runner, RunnerConfig, RunnerState};
pub use timer::{current_time_millis, Timer};
pub use worker::{Worker, ITERATIONS_PER_WORKER};
