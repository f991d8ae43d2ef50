use super::{slice_len, Arrange};
use crate::core::Rect;

/// Full-height columns from left to right.
#[derive(Debug, Clone, Copy, Default)]
pub struct Horizontal;

impl Arrange for Horizontal {
    fn arrange(&self, area: Rect, count: usize) -> Vec<Rect> {
        let width = slice_len(area.width(), count);
        let mut left = area.left;
        (0..count)
            .map(|_| {
                let rect = Rect::new(left, area.top, left + width, area.bottom);
                left += width;
                rect
            })
            .collect()
    }
}
