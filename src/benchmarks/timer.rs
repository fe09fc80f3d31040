// High-precision timing utilities for benchmarks

use std::time::{Duration, Instant};

pub struct Timer {
    start: Instant,
}

impl Timer {
    pub fn new() -> Self {
        Self { start: Instant::now() }
    }

    pub fn start() -> Self {
        Self::new()
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

/// Run `f` `number` times back to back and return the total wall time.
///
/// The first error stops the batch and is returned as-is.
pub fn time_batch<F, E>(number: usize, mut f: F) -> Result<Duration, E>
where
    F: FnMut() -> Result<(), E>,
{
    let timer = Timer::start();
    for _ in 0..number {
        f()?;
    }
    Ok(timer.elapsed())
}
