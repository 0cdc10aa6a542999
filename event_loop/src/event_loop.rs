use std::{thread, time::Duration};

use tokio::time::Instant;
use tracing::{debug, trace};

use crate::{
    error::{BoxError, EventLoopError},
    queue::{TimerId, TimerQueue},
};

pub type Callback = Box<dyn FnOnce(&mut EventLoop) -> Result<(), BoxError>>;

// Deadline used for delays too large to represent, roughly 30 years out.
const FAR_FUTURE: Duration = Duration::from_secs(86400 * 365 * 30);

/// Single-threaded deferred-callback scheduler.
///
/// Callbacks registered with [`EventLoop::set_timeout`] only run once the loop
/// is driven, so any synchronous code that registered them has already
/// finished. A callback receives the loop itself and may register more
/// callbacks, whose delay is measured from the moment it fires.
pub struct EventLoop {
    timers: TimerQueue<Callback>,
    origin: Instant,
}

impl EventLoop {
    pub fn new() -> Self {
        EventLoop {
            timers: TimerQueue::new(),
            origin: Instant::now(),
        }
    }

    /// Run `callback` no earlier than `delay` from now.
    pub fn set_timeout(
        &mut self,
        delay: Duration,
        callback: impl FnOnce(&mut EventLoop) -> Result<(), BoxError> + 'static,
    ) -> TimerId {
        let now = Instant::now();
        let deadline = now.checked_add(delay).unwrap_or_else(|| now + FAR_FUTURE);
        let id = self.timers.push(deadline, Box::new(callback));
        debug!(%id, ?delay, at = ?self.elapsed(), "timer registered");
        id
    }

    /// Number of callbacks that have not fired yet.
    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    /// Time since the loop was created.
    pub fn elapsed(&self) -> Duration {
        self.origin.elapsed()
    }

    /// Drive the loop on the tokio timer until no callbacks are left.
    /// Returns how many callbacks fired.
    pub async fn run(&mut self) -> Result<usize, EventLoopError> {
        let mut fired = 0;
        loop {
            fired += self.fire_due()?;
            let Some(deadline) = self.timers.next_deadline() else {
                debug!(fired, "no timers left");
                return Ok(fired);
            };
            debug!(remaining = self.pending(), "waiting for next timer");
            tokio::time::sleep_until(deadline).await;
        }
    }

    /// Drive the loop by parking the current thread between deadlines.
    /// Must not be called from inside an async runtime.
    pub fn block(&mut self) -> Result<usize, EventLoopError> {
        let mut fired = 0;
        loop {
            fired += self.fire_due()?;
            let Some(deadline) = self.timers.next_deadline() else {
                debug!(fired, "no timers left");
                return Ok(fired);
            };
            let wait = deadline.saturating_duration_since(Instant::now());
            if !wait.is_zero() {
                debug!(remaining = self.pending(), ?wait, "parking thread");
                // Spurious wakeups are fine, the deadline is checked again above.
                thread::park_timeout(wait);
            }
        }
    }

    fn fire_due(&mut self) -> Result<usize, EventLoopError> {
        let now = Instant::now();
        let mut fired = 0;
        while let Some((id, callback)) = self.timers.pop_due(now) {
            trace!(%id, at = ?self.elapsed(), "firing timer");
            callback(self).map_err(|source| EventLoopError::Callback { id, source })?;
            fired += 1;
        }
        Ok(fired)
    }
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}
