mod monitor;
mod window;

pub use monitor::{MonitorId, MonitorInfo, MonitorRegistry};
pub use shikiri_ipc::Rect;
pub use window::{Placement, WindowHandle, WindowSnapshot};
