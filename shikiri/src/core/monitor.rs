use serde::{Deserialize, Serialize};
use shikiri_ipc::MonitorSummary;

use super::Rect;

pub type MonitorId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorInfo {
    pub id: MonitorId,
    pub bounds: Rect,
}

impl MonitorInfo {
    pub fn new(id: MonitorId, bounds: Rect) -> Self {
        Self { id, bounds }
    }

    pub fn summary(&self) -> MonitorSummary {
        MonitorSummary {
            id: self.id,
            bounds: self.bounds,
        }
    }
}

/// Ordered set of monitors seen by the last refresh. Only ever replaced as a whole.
#[derive(Debug, Clone)]
pub struct MonitorRegistry {
    monitors: Vec<MonitorInfo>,
    capacity: usize,
    truncated: bool,
}

impl MonitorRegistry {
    pub fn new(capacity: usize) -> Self {
        Self {
            monitors: Vec::new(),
            capacity,
            truncated: false,
        }
    }

    /// Replaces the monitor set. Returns true when monitors beyond the
    /// capacity were dropped.
    pub fn replace(&mut self, discovered: Vec<MonitorInfo>) -> bool {
        let mut monitors: Vec<MonitorInfo> = discovered
            .into_iter()
            .filter(|m| {
                if m.bounds.is_valid() {
                    true
                } else {
                    tracing::warn!("Ignoring monitor {} with invalid bounds {:?}", m.id, m.bounds);
                    false
                }
            })
            .collect();

        let truncated = monitors.len() > self.capacity;
        if truncated {
            tracing::warn!(
                "Found {} monitors, only the first {} will be tiled",
                monitors.len(),
                self.capacity
            );
            monitors.truncate(self.capacity);
        }

        self.monitors = monitors;
        self.truncated = truncated;
        truncated
    }

    pub fn current(&self) -> &[MonitorInfo] {
        &self.monitors
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }
}
