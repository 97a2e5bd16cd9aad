//! Periodic scene monitor.
//!
//! Runs on the UI thread between events. It only observes the canvas.

use crate::canvas::CanvasDocument;
use std::time::{Duration, Instant};

/// Default monitor interval in milliseconds (roughly one frame).
pub const DEFAULT_MONITOR_INTERVAL_MS: u64 = 16;

/// Fires at a fixed interval and reports how many shapes are tracked.
#[derive(Debug, Clone)]
pub struct SceneMonitor {
    interval: Duration,
    last_tick: Option<Instant>,
}

impl Default for SceneMonitor {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_MONITOR_INTERVAL_MS))
    }
}

impl SceneMonitor {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_tick: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// When the next tick is due.
    pub fn next_deadline(&self) -> Instant {
        match self.last_tick {
            Some(last) => last + self.interval,
            None => Instant::now(),
        }
    }

    /// Check if enough time has passed for another tick.
    pub fn is_due(&self, now: Instant) -> bool {
        match self.last_tick {
            Some(last) => now.duration_since(last) >= self.interval,
            None => true,
        }
    }

    /// Run a tick if one is due. Returns the summary line when it fired.
    pub fn poll(&mut self, document: &CanvasDocument, now: Instant) -> Option<String> {
        if !self.is_due(now) {
            return None;
        }
        self.last_tick = Some(now);
        let summary = format!("Tracking {} shapes...", document.len());
        log::trace!("{summary}");
        Some(summary)
    }
}
