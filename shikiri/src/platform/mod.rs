mod scene;

pub use scene::{Scene, SceneFile, SceneWindow};

use anyhow::Result;

use crate::core::{MonitorInfo, Placement, WindowHandle};
use crate::error::PlatformError;

/// The OS-facing side of the layout engine.
pub trait Platform {
    /// Connected monitors, in the order they should be filled.
    fn enumerate_monitors(&mut self) -> Result<Vec<MonitorInfo>>;

    /// Windows eligible for tiling, in placement order. Filtering out
    /// invisible or untitled windows is the platform's job.
    fn enumerate_windows(&mut self) -> Result<Vec<WindowHandle>>;

    fn apply_placement(&mut self, placement: &Placement) -> Result<(), PlatformError>;
}
