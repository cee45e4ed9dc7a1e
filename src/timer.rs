use std::{io::{self, Write}, time::{SystemTime, UNIX_EPOCH}};

/// Wall clock in milliseconds since the Unix epoch.
///
/// A clock set before the epoch reads as 0.
pub fn current_time_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or_default()
}

/// Records a start timestamp and reports the elapsed seconds on `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timer {
    start: i64,
}

impl Timer {
    pub fn start(start_millis: i64) -> Self {
        Self { start: start_millis }
    }

    pub fn now() -> Self {
        Self::start(current_time_millis())
    }

    pub fn start_millis(&self) -> i64 {
        self.start
    }

    pub fn elapsed_secs(&self, now_millis: i64) -> f64 {
        (now_millis - self.start) as f64 / 1000.0
    }

    /// Print the elapsed time since start as a `{:9.4}` line on stdout.
    pub fn end(&self, now_millis: i64) {
        // stdout going away mid-run is not worth failing a worker for
        let _ = self.end_to(now_millis, &mut io::stdout().lock());
    }

    pub fn end_to<W: Write>(&self, now_millis: i64, out: &mut W) -> io::Result<()> {
        writeln!(out, "{:9.4}", self.elapsed_secs(now_millis))
    }
}
