use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Screen-space rectangle. Edges are exclusive on the right/bottom side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn from_origin_size(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self {
            left,
            top,
            right: left + width,
            bottom: top + height,
        }
    }

    /// Saturates at `i32::MAX` for bounds spanning more than the `i32` range.
    pub fn width(&self) -> i32 {
        self.right.saturating_sub(self.left)
    }

    /// Saturates at `i32::MAX` for bounds spanning more than the `i32` range.
    pub fn height(&self) -> i32 {
        self.bottom.saturating_sub(self.top)
    }

    /// Non-negative size that fits in an `i32`.
    pub fn is_valid(&self) -> bool {
        matches!(self.right.checked_sub(self.left), Some(w) if w >= 0)
            && matches!(self.bottom.checked_sub(self.top), Some(h) if h >= 0)
    }

    pub fn contains(&self, other: &Rect) -> bool {
        other.left >= self.left
            && other.top >= self.top
            && other.right <= self.right
            && other.bottom <= self.bottom
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutMode {
    #[default]
    Vertical,
    Horizontal,
    Grid,
}

impl LayoutMode {
    /// Cycle order used by `next`/`prev`.
    pub const ALL: [LayoutMode; 3] = [
        LayoutMode::Vertical,
        LayoutMode::Horizontal,
        LayoutMode::Grid,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LayoutMode::Vertical => "vertical",
            LayoutMode::Horizontal => "horizontal",
            LayoutMode::Grid => "grid",
        }
    }

    pub fn next(self) -> Self {
        let index = self.index();
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let index = self.index();
        Self::ALL[(index + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    fn index(self) -> usize {
        match self {
            LayoutMode::Vertical => 0,
            LayoutMode::Horizontal => 1,
            LayoutMode::Grid => 2,
        }
    }
}

impl fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLayoutModeError(String);

impl fmt::Display for ParseLayoutModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown layout '{}' (use vertical/v, horizontal/h or grid/g)",
            self.0
        )
    }
}

impl std::error::Error for ParseLayoutModeError {}

impl FromStr for LayoutMode {
    type Err = ParseLayoutModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "vertical" | "v" => Ok(LayoutMode::Vertical),
            "horizontal" | "h" => Ok(LayoutMode::Horizontal),
            "grid" | "g" => Ok(LayoutMode::Grid),
            _ => Err(ParseLayoutModeError(s.to_string())),
        }
    }
}
