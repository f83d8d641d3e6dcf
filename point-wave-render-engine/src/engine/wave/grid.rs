use constants::wave::{GRID_POINT_COUNT, GRID_SPACING, MAX_GRID_POINT_COUNT};
use serde::{Deserialize, Serialize};

use crate::engine::config::error::WaveConfigError;

/// Grid dimensions: `count` points per axis, `spacing` world units apart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridParams {
    pub count: u32,
    pub spacing: f32,
}

impl Default for GridParams {
    fn default() -> Self {
        Self {
            count: GRID_POINT_COUNT,
            spacing: GRID_SPACING,
        }
    }
}

/// One grid cell as visited during traversal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridCell {
    /// Index along the X axis (outer loop).
    pub i: u32,
    /// Index along the Z axis (inner loop).
    pub j: u32,
    pub x: f32,
    pub z: f32,
    /// Offset of the cell's x component in the flat position buffer.
    pub offset: usize,
}

impl GridParams {
    pub fn new(count: u32, spacing: f32) -> Result<Self, WaveConfigError> {
        let grid = Self { count, spacing };
        grid.validate()?;
        Ok(grid)
    }

    pub fn validate(&self) -> Result<(), WaveConfigError> {
        if self.count == 0 {
            return Err(WaveConfigError::EmptyGrid);
        }
        if self.count > MAX_GRID_POINT_COUNT {
            return Err(WaveConfigError::GridTooLarge {
                count: self.count,
                max: MAX_GRID_POINT_COUNT,
            });
        }
        if !self.spacing.is_finite() || self.spacing <= 0.0 {
            return Err(WaveConfigError::InvalidSpacing(self.spacing));
        }
        Ok(())
    }

    /// Total number of points on the surface.
    pub fn point_count(&self) -> usize {
        self.count as usize * self.count as usize
    }

    /// Length of the flat xyz buffer.
    pub fn buffer_len(&self) -> usize {
        self.point_count() * 3
    }

    /// Centred world coordinate of a grid index. Odd counts use real
    /// division, so the grid is offset by half a cell rather than truncated.
    pub fn coordinate(&self, index: u32) -> f32 {
        self.spacing * (index as f32 - self.count as f32 / 2.0)
    }

    /// Offset of the x component of cell (i, j).
    pub fn offset(&self, i: u32, j: u32) -> usize {
        3 * (i as usize * self.count as usize + j as usize)
    }

    /// Row-major traversal, i (X) outer and j (Z) inner.
    ///
    /// Both buffer generation and the frame updater use this iterator, which
    /// keeps their offsets in agreement.
    pub fn cells(&self) -> impl Iterator<Item = GridCell> + '_ {
        (0..self.count).flat_map(move |i| {
            let x = self.coordinate(i);
            (0..self.count).map(move |j| GridCell {
                i,
                j,
                x,
                z: self.coordinate(j),
                offset: self.offset(i, j),
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_by_two_visits_row_major() {
        let grid = GridParams::new(2, 3.0).unwrap();
        let cells: Vec<(f32, f32, usize)> = grid.cells().map(|c| (c.x, c.z, c.offset)).collect();
        assert_eq!(
            cells,
            vec![(-3.0, -3.0, 0), (-3.0, 0.0, 3), (0.0, -3.0, 6), (0.0, 0.0, 9)]
        );
    }

    #[test]
    fn default_grid_is_centred() {
        let grid = GridParams::default();
        assert_eq!(grid.coordinate(0), -150.0);
        assert_eq!(grid.coordinate(50), 0.0);
        assert_eq!(grid.coordinate(99), 147.0);
        assert_eq!(grid.point_count(), 10_000);
        assert_eq!(grid.buffer_len(), 30_000);
    }

    #[test]
    fn odd_count_uses_half_cell_offset() {
        let grid = GridParams::new(3, 2.0).unwrap();
        assert_eq!(grid.coordinate(0), -3.0);
        assert_eq!(grid.coordinate(1), -1.0);
        assert_eq!(grid.coordinate(2), 1.0);
    }

    #[test]
    fn offsets_cover_buffer_without_gaps() {
        let grid = GridParams::new(7, 1.5).unwrap();
        let offsets: Vec<usize> = grid.cells().map(|c| c.offset).collect();
        let expected: Vec<usize> = (0..grid.point_count()).map(|n| n * 3).collect();
        assert_eq!(offsets, expected);
    }

    #[test]
    fn rejects_degenerate_grids() {
        assert!(matches!(GridParams::new(0, 3.0), Err(WaveConfigError::EmptyGrid)));
        assert!(matches!(
            GridParams::new(10, 0.0),
            Err(WaveConfigError::InvalidSpacing(_))
        ));
        assert!(matches!(
            GridParams::new(10, -1.0),
            Err(WaveConfigError::InvalidSpacing(_))
        ));
        assert!(matches!(
            GridParams::new(10, f32::NAN),
            Err(WaveConfigError::InvalidSpacing(_))
        ));
    }

    #[test]
    fn largest_grid_fits_u32_sprite_indices() {
        let grid = GridParams::new(MAX_GRID_POINT_COUNT, 1.0).unwrap();
        let index_count = grid.point_count() as u64 * 6;
        assert!(index_count <= u64::from(u32::MAX));

        assert!(matches!(
            GridParams::new(MAX_GRID_POINT_COUNT + 1, 1.0),
            Err(WaveConfigError::GridTooLarge { count, max })
                if count == MAX_GRID_POINT_COUNT + 1 && max == MAX_GRID_POINT_COUNT
        ));
    }
}
