use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

use crate::error::{ChartError, ChartResult};

/// Monotonic time source consulted by [`Throttle`].
///
/// The clock is injectable so rate-limiting behavior is testable without
/// real wall-clock delays.
pub trait ThrottleClock {
    fn now_ms(&self) -> f64;
}

/// Wall-clock time source for host applications.
#[derive(Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ThrottleClock for SystemClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1_000.0
    }
}

/// Hand-advanced time source shared between a test (or the engine's
/// deterministic frame stepping) and the throttles reading it.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now_ms: Rc<Cell<f64>>,
}

impl ManualClock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance_ms(&self, delta_ms: f64) {
        self.now_ms.set(self.now_ms.get() + delta_ms.max(0.0));
    }

    pub fn set_ms(&self, now_ms: f64) {
        self.now_ms.set(now_ms);
    }
}

impl ThrottleClock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now_ms.get()
    }
}

/// Leading-edge rate limiter for outbound notifications.
///
/// The first call after construction, [`Throttle::reset`], or a full
/// interval passes; later calls inside the interval are suppressed. Local
/// visual feedback never goes through a throttle; only externally-visible
/// notifications do.
pub struct Throttle {
    clock: Box<dyn ThrottleClock>,
    interval_ms: f64,
    last_emit_ms: Option<f64>,
}

impl std::fmt::Debug for Throttle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Throttle")
            .field("interval_ms", &self.interval_ms)
            .field("last_emit_ms", &self.last_emit_ms)
            .finish()
    }
}

impl Throttle {
    pub fn new(interval_ms: f64, clock: Box<dyn ThrottleClock>) -> ChartResult<Self> {
        if !interval_ms.is_finite() || interval_ms < 0.0 {
            return Err(ChartError::InvalidData(
                "throttle interval must be finite and >= 0".to_owned(),
            ));
        }
        Ok(Self {
            clock,
            interval_ms,
            last_emit_ms: None,
        })
    }

    #[must_use]
    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }

    /// Returns `true` when the caller may emit now, recording the emission.
    pub fn try_emit(&mut self) -> bool {
        let now = self.clock.now_ms();
        match self.last_emit_ms {
            Some(last) if now - last < self.interval_ms => false,
            _ => {
                self.last_emit_ms = Some(now);
                true
            }
        }
    }

    /// Forgets the last emission so the next call passes immediately.
    ///
    /// Called on drag start so a fresh drag is never blocked by the tail of
    /// the previous one.
    pub fn reset(&mut self) {
        self.last_emit_ms = None;
    }

    /// Cancels any in-flight suppression window; currently identical to
    /// [`Throttle::reset`] but kept distinct for teardown call sites.
    pub fn cancel(&mut self) {
        self.last_emit_ms = None;
    }
}
