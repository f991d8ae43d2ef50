use super::{slice_len, Arrange};
use crate::core::Rect;

/// Row-major grid with `floor(sqrt(count))` rows. Unused trailing cells stay empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct Grid;

impl Grid {
    /// `(rows, cols)` for `count` windows.
    pub fn dimensions(count: usize) -> (usize, usize) {
        if count == 0 {
            return (0, 0);
        }
        let rows = count.isqrt().max(1);
        let cols = count.div_ceil(rows);
        (rows, cols)
    }
}

impl Arrange for Grid {
    fn arrange(&self, area: Rect, count: usize) -> Vec<Rect> {
        if count == 0 {
            return vec![];
        }

        let (rows, cols) = Self::dimensions(count);
        let width = slice_len(area.width(), cols);
        let height = slice_len(area.height(), rows);

        (0..count)
            .map(|i| {
                let row = (i / cols) as i32;
                let col = (i % cols) as i32;
                Rect::from_origin_size(
                    area.left + col * width,
                    area.top + row * height,
                    width,
                    height,
                )
            })
            .collect()
    }
}
