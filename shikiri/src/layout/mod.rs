//! Tiling strategies.
//!
//! Windows are split across monitors in contiguous blocks of
//! `ceil(windows / monitors)`, in monitor order. Each strategy only decides
//! how one block is arranged inside one monitor. Integer division leaves any
//! remainder pixels unused at the right/bottom edge.

mod grid;
mod horizontal;
mod vertical;

pub use grid::Grid;
pub use horizontal::Horizontal;
pub use shikiri_ipc::LayoutMode;
pub use vertical::Vertical;

use crate::core::{MonitorInfo, Placement, Rect, WindowHandle};

pub trait Arrange {
    /// Returns one rectangle per slot, in slot order, all inside `area`.
    /// Returns nothing when `count` is zero.
    fn arrange(&self, area: Rect, count: usize) -> Vec<Rect>;
}

pub fn strategy(mode: LayoutMode) -> &'static dyn Arrange {
    match mode {
        LayoutMode::Vertical => &Vertical,
        LayoutMode::Horizontal => &Horizontal,
        LayoutMode::Grid => &Grid,
    }
}

pub fn compute(
    mode: LayoutMode,
    windows: &[WindowHandle],
    monitors: &[MonitorInfo],
) -> Vec<Placement> {
    if monitors.is_empty() || windows.is_empty() {
        return vec![];
    }

    let per_monitor = windows.len().div_ceil(monitors.len());
    let arrange = strategy(mode);

    monitors
        .iter()
        .zip(windows.chunks(per_monitor))
        .flat_map(|(monitor, block)| {
            tracing::debug!(
                "Monitor {}: {} window(s) in {} layout",
                monitor.id,
                block.len(),
                mode
            );
            arrange
                .arrange(monitor.bounds, block.len())
                .into_iter()
                .zip(block)
                .map(|(target, &window)| Placement { window, target })
        })
        .collect()
}

/// Size of one of `parts` equal slices of `length`, truncated.
fn slice_len(length: i32, parts: usize) -> i32 {
    match i32::try_from(parts) {
        Ok(parts) if parts > 0 => length / parts,
        _ => 0,
    }
}
