use thiserror::Error;

use crate::core::WindowHandle;

/// Failure of a single placement. The controller logs these and moves on.
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("window {0} no longer exists")]
    WindowGone(WindowHandle),
}
