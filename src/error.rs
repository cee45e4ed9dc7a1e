use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PoolError {
    #[error("a worker pool needs at least one thread")]
    ZeroSize,
    #[error("failed to spawn worker thread: {0}")]
    Spawn(String),
    #[error("worker pool has been shut down")]
    ShutDown,
    #[error("task panicked: {0}")]
    TaskPanicked(String),
    #[error("worker thread went away before the task finished")]
    Disconnected,
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("thread count must be a positive integer")]
    ZeroThreads,
    #[error("runner has already been run")]
    AlreadyRun,
    #[error(transparent)]
    Pool(#[from] PoolError),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown counter kind `{0}`")]
pub struct UnknownCounterKind(pub String);
