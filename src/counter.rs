use std::{str::FromStr, sync::{atomic::{AtomicU64, Ordering}, Arc, Mutex, PoisonError}};

use derive_more::Display;

/// A shared integer counter.
///
/// Implementations only differ in how they synchronize `get` and `increment`.
pub trait Counter : Send + Sync {
    fn get(&self) -> u64;
    fn increment(&self);
}

/**
 * Unsynchronized counter

    `increment` is a plain load followed by a plain store, so two threads
    can read the same value and both write it back plus one. Lost updates
    are expected under contention.

 */
#[derive(Debug, Default)]
pub struct NosyncCounter {
    cnt: AtomicU64,
}

impl NosyncCounter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Counter for NosyncCounter {
    fn get(&self) -> u64 {
        self.cnt.load(Ordering::Relaxed)
    }

    fn increment(&self) {
        // not a fetch_add on purpose: the read-modify-write is split
        let cnt = self.cnt.load(Ordering::Relaxed);
        self.cnt.store(cnt + 1, Ordering::Relaxed);
    }
}

/**
 * Whole-method locked counter

    The value lives inside the mutex, so the counter itself is the lock and
    every method body runs with it held.

 */
#[derive(Debug, Default)]
pub struct SyncMethodCounter {
    cnt: Mutex<u64>,
}

impl SyncMethodCounter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Counter for SyncMethodCounter {
    fn get(&self) -> u64 {
        let cnt = self.cnt.lock().unwrap_or_else(PoisonError::into_inner);
        *cnt
    }

    fn increment(&self) {
        let mut cnt = self.cnt.lock().unwrap_or_else(PoisonError::into_inner);
        *cnt += 1;
    }
}

/**
 * Block locked counter

    Same mutual exclusion as `SyncMethodCounter`, but the lock is a separate
    handle owned by the counter and only the field access is inside the
    critical section.

 */
#[derive(Debug, Default)]
pub struct SyncBlockCounter {
    cnt: AtomicU64,
    lock: Mutex<()>,
}

impl SyncBlockCounter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Counter for SyncBlockCounter {
    fn get(&self) -> u64 {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.cnt.load(Ordering::Relaxed)
    }

    fn increment(&self) {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        // the lock orders these, relaxed is enough
        let cnt = self.cnt.load(Ordering::Relaxed);
        self.cnt.store(cnt + 1, Ordering::Relaxed);
    }
}

/// Selects which counter a run is measured against.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CounterKind {
    #[display(fmt = "nosync")]
    Nosync,
    #[display(fmt = "sync_method")]
    SyncMethod,
    #[display(fmt = "sync_block")]
    SyncBlock,
}

impl CounterKind {
    pub const ALL: [CounterKind; 3] = [CounterKind::Nosync, CounterKind::SyncMethod, CounterKind::SyncBlock];

    /// Build a fresh counter of this kind, starting at zero.
    pub fn create(self) -> Arc<dyn Counter> {
        match self {
            CounterKind::Nosync => Arc::new(NosyncCounter::new()),
            CounterKind::SyncMethod => Arc::new(SyncMethodCounter::new()),
            CounterKind::SyncBlock => Arc::new(SyncBlockCounter::new()),
        }
    }

    /// Whether the final value is guaranteed to be exact.
    pub fn is_synchronized(self) -> bool {
        !matches!(self, CounterKind::Nosync)
    }
}

impl FromStr for CounterKind {
    type Err = crate::error::UnknownCounterKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CounterKind::ALL
            .into_iter()
            .find(|kind| kind.to_string() == s)
            .ok_or_else(|| crate::error::UnknownCounterKind(s.to_string()))
    }
}
