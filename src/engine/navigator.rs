use std::sync::Arc;
use std::time::Duration;

use super::clock::{Clock, CooldownGate, TokioClock};

/// Where the navigator points within the filtered collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// No items; every move is a no-op.
    Empty,
    /// Index into the filtered collection, always `< len`.
    At(usize),
}

/// A directional input event from one of the navigator's sources.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NavInput {
    /// The keyboard "next" key.
    KeyDown,
    /// Vertical wheel or touch delta; positive scrolls forward.
    Wheel(f64),
    /// The explicit skip control. Never debounced.
    Skip,
}

/// Thresholds and debounce windows for the input sources.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavSettings {
    /// Wheel deltas with magnitude at or below this are ignored.
    pub wheel_threshold: f64,
    pub wheel_cooldown: Duration,
    pub key_cooldown: Duration,
}

impl Default for NavSettings {
    fn default() -> Self {
        Self {
            wheel_threshold: 30.0,
            wheel_cooldown: Duration::from_millis(600),
            key_cooldown: Duration::ZERO,
        }
    }
}

/// Sequential navigator over the filtered collection with wraparound.
///
/// Each input source has its own [`CooldownGate`], so a wheel gesture in
/// its cooldown window does not swallow key presses or skips.
pub struct Navigator {
    position: Position,
    len: usize,
    settings: NavSettings,
    wheel_gate: CooldownGate,
    key_gate: CooldownGate,
    clock: Arc<dyn Clock>,
}

impl Navigator {
    pub fn new(settings: NavSettings) -> Self {
        Self::with_clock(settings, Arc::new(TokioClock))
    }

    pub fn with_clock(settings: NavSettings, clock: Arc<dyn Clock>) -> Self {
        Self {
            position: Position::Empty,
            len: 0,
            settings,
            wheel_gate: CooldownGate::Ready,
            key_gate: CooldownGate::Ready,
            clock,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Current index, or `None` when the collection is empty.
    pub fn current(&self) -> Option<usize> {
        match self.position {
            Position::Empty => None,
            Position::At(i) => Some(i),
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Rebind to a freshly filtered collection of `len` items.
    ///
    /// Always lands on index 0, or [`Position::Empty`] if `len == 0`.
    pub fn reset(&mut self, len: usize) {
        self.len = len;
        self.position = if len == 0 {
            Position::Empty
        } else {
            Position::At(0)
        };
        tracing::debug!(len, "Navigator reset");
    }

    /// Advance one item, wrapping from the last index to 0.
    pub fn next(&mut self) -> Option<usize> {
        let Position::At(i) = self.position else {
            return None;
        };
        let next = (i + 1) % self.len;
        self.position = Position::At(next);
        Some(next)
    }

    /// Retreat one item, wrapping from 0 to the last index.
    pub fn prev(&mut self) -> Option<usize> {
        let Position::At(i) = self.position else {
            return None;
        };
        let prev = if i == 0 { self.len - 1 } else { i - 1 };
        self.position = Position::At(prev);
        Some(prev)
    }

    /// Route an input event through its debounce gate.
    ///
    /// Returns the new index when the input moved the navigator.
    pub fn handle(&mut self, input: NavInput) -> Option<usize> {
        if self.is_empty() {
            return None;
        }

        let now = self.clock.now();
        match input {
            NavInput::Skip => self.next(),
            NavInput::KeyDown => {
                if self.key_gate.try_fire(now, self.settings.key_cooldown) {
                    self.next()
                } else {
                    None
                }
            }
            NavInput::Wheel(delta) => {
                let threshold = self.settings.wheel_threshold;
                if delta.abs() <= threshold || delta.is_nan() {
                    return None;
                }
                if !self.wheel_gate.try_fire(now, self.settings.wheel_cooldown) {
                    tracing::trace!(delta, "Wheel input suppressed by cooldown");
                    return None;
                }
                if delta > threshold {
                    self.next()
                } else {
                    self.prev()
                }
            }
        }
    }
}
