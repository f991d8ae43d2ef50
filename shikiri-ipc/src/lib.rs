pub mod command;
pub mod layout;

pub use command::{ApplyInfo, Command, Direction, MonitorSummary, Response, StatusInfo};
pub use layout::{LayoutMode, ParseLayoutModeError, Rect};
