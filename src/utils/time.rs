use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

/// A source of timestamps for [`Clock`].
///
/// Readings are durations since an arbitrary, fixed origin. Sources are not
/// required to be monotonic; [`Clock`] clamps backwards steps to zero.
pub trait TimeSource: Send {
    fn now(&self) -> Duration;
}

/// Wall-clock source backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct SystemTimeSource {
    origin: Instant,
}

impl SystemTimeSource {
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemTimeSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for SystemTimeSource {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Manually driven source.
///
/// Clones share the same reading, so a host (or a test) can keep one handle
/// and move time while the [`Clock`] owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualTimeSource {
    now: Arc<Mutex<Duration>>,
}

impl ManualTimeSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the reading forward by `seconds`.
    pub fn advance(&self, seconds: f32) {
        *self.now.lock() += Duration::from_secs_f32(seconds.max(0.0));
    }

    /// Sets the reading to an absolute value, possibly earlier than before.
    pub fn set(&self, seconds: f32) {
        *self.now.lock() = Duration::from_secs_f32(seconds.max(0.0));
    }
}

impl TimeSource for ManualTimeSource {
    fn now(&self) -> Duration {
        *self.now.lock()
    }
}

/// Frame clock yielding the time elapsed between successive queries.
///
/// The clock starts on the first [`get_delta`](Self::get_delta) call, which
/// returns `0.0`. Every later call returns the time since the previous call.
/// Deltas are never negative: if the source steps backwards the delta is
/// `0.0` and the reference point is kept at the latest reading seen.
pub struct Clock {
    source: Box<dyn TimeSource>,
    last: Option<Duration>,
    elapsed: Duration,
    frame_count: u64,
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock {
    /// Creates a clock reading wall time.
    #[must_use]
    pub fn new() -> Self {
        Self::with_source(SystemTimeSource::new())
    }

    #[must_use]
    pub fn with_source(source: impl TimeSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            last: None,
            elapsed: Duration::ZERO,
            frame_count: 0,
        }
    }

    /// Returns seconds elapsed since the previous call.
    pub fn get_delta(&mut self) -> f32 {
        let now = self.source.now();
        self.frame_count += 1;

        let Some(prev) = self.last else {
            self.last = Some(now);
            return 0.0;
        };

        let delta = now.checked_sub(prev).unwrap_or(Duration::ZERO);
        self.last = Some(prev.max(now));
        self.elapsed += delta;
        delta.as_secs_f32()
    }

    /// Total time accumulated by [`get_delta`](Self::get_delta), in seconds.
    #[inline]
    #[must_use]
    pub fn elapsed(&self) -> f32 {
        self.elapsed.as_secs_f32()
    }

    /// Number of `get_delta` calls so far.
    #[inline]
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    #[inline]
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.last.is_some()
    }
}
