use serde::{Deserialize, Serialize};
use std::fmt;

use super::Rect;

/// Opaque window identity handed out by the platform enumerator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowHandle(pub u64);

impl fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:X}", self.0)
    }
}

/// Eligible windows at the moment of one apply, in placement order.
#[derive(Debug, Clone, Default)]
pub struct WindowSnapshot {
    windows: Vec<WindowHandle>,
    truncated: bool,
}

impl WindowSnapshot {
    pub fn capture(mut windows: Vec<WindowHandle>, capacity: usize) -> Self {
        let truncated = windows.len() > capacity;
        if truncated {
            tracing::warn!(
                "Found {} windows, only the first {} will be tiled",
                windows.len(),
                capacity
            );
            windows.truncate(capacity);
        }
        Self { windows, truncated }
    }

    pub fn windows(&self) -> &[WindowHandle] {
        &self.windows
    }

    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub window: WindowHandle,
    pub target: Rect,
}
