use std::{hint::black_box, sync::Arc};

use crate::{counter::Counter, timer::{current_time_millis, Timer}};

pub const ITERATIONS_PER_WORKER: usize = 1_000_000;

/// One unit of contention: read then increment the shared counter in a loop,
/// then report the elapsed time through its own timer.
pub struct Worker {
    counter: Arc<dyn Counter>,
    timer: Timer,
    iterations: usize,
    last_read: u64,
}

impl Worker {
    pub fn new(counter: Arc<dyn Counter>, timer: Timer) -> Self {
        Self::with_iterations(counter, timer, ITERATIONS_PER_WORKER)
    }

    pub fn with_iterations(counter: Arc<dyn Counter>, timer: Timer, iterations: usize) -> Self {
        Self {
            counter,
            timer,
            iterations,
            last_read: 0,
        }
    }

    pub fn last_read(&self) -> u64 {
        self.last_read
    }

    pub fn call(&mut self) {
        self.spin();
        self.timer.end(current_time_millis());
    }

    fn spin(&mut self) {
        for _ in 0..self.iterations {
            self.last_read = black_box(self.counter.get());
            self.counter.increment();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::Worker;
    use crate::{counter::{Counter, SyncBlockCounter}, timer::Timer};

    #[test]
    fn test_worker_reads_before_increment() {
        let counter = Arc::new(SyncBlockCounter::new());
        let mut worker = Worker::with_iterations(counter.clone(), Timer::now(), 1000);
        worker.call();
        assert_eq!(counter.get(), 1000);
        // last read happens before the last increment
        assert_eq!(worker.last_read(), 999);
    }

    #[test]
    fn test_default_iterations() {
        let worker = Worker::new(Arc::new(SyncBlockCounter::new()), Timer::now());
        assert_eq!(worker.iterations, super::ITERATIONS_PER_WORKER);
    }

    #[test]
    fn test_zero_iterations() {
        let counter = Arc::new(SyncBlockCounter::new());
        let mut worker = Worker::with_iterations(counter.clone(), Timer::now(), 0);
        worker.call();
        assert_eq!(counter.get(), 0);
        assert_eq!(worker.last_read(), 0);
    }
}
