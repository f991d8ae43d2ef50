use super::{slice_len, Arrange};
use crate::core::Rect;

/// Full-width rows stacked top to bottom.
#[derive(Debug, Clone, Copy, Default)]
pub struct Vertical;

impl Arrange for Vertical {
    fn arrange(&self, area: Rect, count: usize) -> Vec<Rect> {
        let height = slice_len(area.height(), count);
        let mut top = area.top;
        (0..count)
            .map(|_| {
                let rect = Rect::new(area.left, top, area.right, top + height);
                top += height;
                rect
            })
            .collect()
    }
}
