use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;

/// Monotonic time source for input debouncing.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Reads tokio's clock, which honours `tokio::time::pause()` in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

impl Clock for TokioClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<Instant>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Arc::new(Mutex::new(Instant::now())),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}

// ============================================================================
// Cooldown Gate
// ============================================================================

/// Leading-edge debounce: the first trigger passes, then everything is
/// rejected until the window has elapsed.
///
/// `Ready -> Cooling(until) -> Ready`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CooldownGate {
    #[default]
    Ready,
    Cooling { until: Instant },
}

impl CooldownGate {
    /// Try to pass the gate at `now`. Returns `true` and starts cooling for
    /// `window` if the gate was ready.
    pub fn try_fire(&mut self, now: Instant, window: Duration) -> bool {
        if let Self::Cooling { until } = *self {
            if now < until {
                return false;
            }
        }
        *self = if window.is_zero() {
            Self::Ready
        } else {
            Self::Cooling { until: now + window }
        };
        true
    }

    pub fn is_ready(&self, now: Instant) -> bool {
        match self {
            Self::Ready => true,
            Self::Cooling { until } => now >= *until,
        }
    }
}
