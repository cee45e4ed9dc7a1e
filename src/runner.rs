use std::sync::Arc;

use derive_more::Display;
use log::{debug, info};

use crate::{
    counter::{Counter, CounterKind},
    error::RunnerError,
    pool::WorkerPool,
    timer::Timer,
    worker::{Worker, ITERATIONS_PER_WORKER},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunnerConfig {
    pub threads: usize,
    pub kind: CounterKind,
    pub iterations: usize,
}

impl RunnerConfig {
    pub fn new(kind: CounterKind, threads: usize) -> Self {
        Self {
            threads,
            kind,
            iterations: ITERATIONS_PER_WORKER,
        }
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }
}

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum RunnerState {
    Configured,
    Running,
    ShutDown,
}

/// What one run left behind in its counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub kind: CounterKind,
    pub threads: usize,
    pub iterations: usize,
    pub final_value: u64,
}

impl RunSummary {
    pub fn expected(&self) -> u64 {
        (self.threads as u64) * (self.iterations as u64)
    }

    pub fn lost_updates(&self) -> u64 {
        self.expected().saturating_sub(self.final_value)
    }
}

/**
 * One benchmark trial

    Shares one fresh counter between `threads` workers, runs them on a pool
    of exactly `threads` threads and waits for all of them. Single use:
    Configured -> Running -> ShutDown.

 */
pub struct Runner {
    config: RunnerConfig,
    counter: Arc<dyn Counter>,
    state: RunnerState,
}

impl Runner {
    pub fn new(config: RunnerConfig) -> Self {
        Self {
            counter: config.kind.create(),
            config,
            state: RunnerState::Configured,
        }
    }

    pub fn state(&self) -> RunnerState {
        self.state
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    pub fn counter(&self) -> &Arc<dyn Counter> {
        &self.counter
    }

    pub fn run(&mut self) -> Result<RunSummary, RunnerError> {
        if self.state != RunnerState::Configured {
            return Err(RunnerError::AlreadyRun);
        }
        if self.config.threads == 0 {
            return Err(RunnerError::ZeroThreads);
        }
        let threads = self.config.threads;
        let mut pool = WorkerPool::new(threads)?;
        self.state = RunnerState::Running;
        debug!("Runner[{}]: {} -> {}", self.config.kind, RunnerState::Configured, self.state);

        let iterations = self.config.iterations;
        let workers: Vec<Worker> = (0..threads)
            .map(|_| Worker::with_iterations(self.counter.clone(), Timer::now(), iterations))
            .collect();

        // per-task failures are not surfaced
        let _ = pool.invoke_all(workers.into_iter().map(|mut worker| move || worker.call()));
        pool.shutdown();
        self.state = RunnerState::ShutDown;

        let summary = RunSummary {
            kind: self.config.kind,
            threads,
            iterations,
            final_value: self.counter.get(),
        };
        info!(
            "Runner[{}]: {} threads done, counter: {}, expected: {}, lost: {}",
            summary.kind, threads, summary.final_value, summary.expected(), summary.lost_updates()
        );
        Ok(summary)
    }
}
