use std::{any::Any, panic::{self, AssertUnwindSafe}, thread::{self, JoinHandle}};

use log::{debug, warn};

use crate::error::PoolError;

type Job = Box<dyn FnOnce() + Send + 'static>;

struct Envelope {
    job: Job,
    done: flume::Sender<Result<(), PoolError>>,
}

/**
 * Fixed-size worker pool

    `size` threads share one job queue. The pool never grows or shrinks.
    After `shutdown` the queue is closed, already queued jobs still run,
    and every thread is joined.

 */
pub struct WorkerPool {
    size: usize,
    sender: Option<flume::Sender<Envelope>>,
    threads: Vec<JoinHandle<()>>,
}

/// Completion handle of one submitted job.
pub struct TaskHandle {
    done: flume::Receiver<Result<(), PoolError>>,
}

impl TaskHandle {
    /// Block until the job finished.
    pub fn join(self) -> Result<(), PoolError> {
        self.done.recv().map_err(|_| PoolError::Disconnected)?
    }
}

impl WorkerPool {
    pub fn new(size: usize) -> Result<Self, PoolError> {
        if size == 0 {
            return Err(PoolError::ZeroSize);
        }
        let (sender, receiver) = flume::unbounded::<Envelope>();
        let mut threads = Vec::with_capacity(size);
        for id in 0..size {
            let receiver = receiver.clone();
            let handle = thread::Builder::new()
                .name(format!("lockbench-worker-{}", id))
                .spawn(move || worker_loop(id, receiver))
                .map_err(|e| PoolError::Spawn(e.to_string()))?;
            threads.push(handle);
        }
        debug!("WorkerPool: started {} threads", size);
        Ok(Self {
            size,
            sender: Some(sender),
            threads,
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_shut_down(&self) -> bool {
        self.sender.is_none()
    }

    pub fn submit<F>(&self, job: F) -> Result<TaskHandle, PoolError>
    where
        F: FnOnce() + Send + 'static,
    {
        let sender = self.sender.as_ref().ok_or(PoolError::ShutDown)?;
        let (done, done_rx) = flume::bounded(1);
        sender
            .send(Envelope { job: Box::new(job), done })
            .map_err(|_| PoolError::ShutDown)?;
        Ok(TaskHandle { done: done_rx })
    }

    /// Submit every job, then wait for all of them.
    ///
    /// Results come back in submission order, one per job.
    pub fn invoke_all<I, F>(&self, jobs: I) -> Vec<Result<(), PoolError>>
    where
        I: IntoIterator<Item = F>,
        F: FnOnce() + Send + 'static,
    {
        let handles: Vec<_> = jobs.into_iter().map(|job| self.submit(job)).collect();
        handles
            .into_iter()
            .map(|handle| handle.and_then(TaskHandle::join))
            .collect()
    }

    pub fn shutdown(&mut self) {
        if self.sender.take().is_none() {
            return;
        }
        for handle in self.threads.drain(..) {
            if handle.join().is_err() {
                warn!("WorkerPool: a worker thread panicked outside of a task");
            }
        }
        debug!("WorkerPool: shut down {} threads", self.size);
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn worker_loop(id: usize, receiver: flume::Receiver<Envelope>) {
    while let Ok(Envelope { job, done }) = receiver.recv() {
        let result = panic::catch_unwind(AssertUnwindSafe(job))
            .map_err(|payload| PoolError::TaskPanicked(panic_message(payload.as_ref())));
        // the submitter may have dropped its handle
        let _ = done.send(result);
    }
    debug!("WorkerPool[{}]: queue closed, exiting", id);
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
