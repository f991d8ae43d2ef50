use serde::{Deserialize, Serialize};

use crate::layout::{LayoutMode, Rect};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    SelectLayout { mode: LayoutMode },
    CycleLayout { direction: Direction },
    Reapply,
    RefreshMonitors,
    Status,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Next,
    Prev,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Response {
    Ok,
    Applied(ApplyInfo),
    Status(StatusInfo),
    Error { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyInfo {
    pub layout: LayoutMode,
    pub placed: usize,
    pub failed: usize,
    pub monitors_truncated: bool,
    pub windows_truncated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusInfo {
    pub layout: LayoutMode,
    pub monitors: Vec<MonitorSummary>,
    pub monitors_truncated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorSummary {
    pub id: u64,
    pub bounds: Rect,
}
