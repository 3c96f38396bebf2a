use crate::geom::Point2D;
use std::collections::HashMap;

/// Background acceleration grid for Poisson-disc sampling
///
/// Cell side is `min_spacing / √2`, so a cell can hold at most one accepted
/// sample. Only occupied cells are stored, so memory follows the number of
/// accepted samples rather than the size of the sampled rectangle. Cells
/// store an index into the caller's sample list.
#[derive(Clone, Debug)]
pub struct SampleGrid {
    pub cell_size: f32,
    cells: HashMap<(i64, i64), usize>,
}

impl SampleGrid {
    /// Create an empty grid for samples spaced at least `min_spacing` apart
    pub fn new(min_spacing: f32) -> Self {
        SampleGrid {
            cell_size: min_spacing / std::f32::consts::SQRT_2,
            cells: HashMap::new(),
        }
    }

    /// Cell coordinates containing `p`
    pub fn cell_of(&self, p: Point2D) -> (i64, i64) {
        (
            (p.x / self.cell_size).floor() as i64,
            (p.y / self.cell_size).floor() as i64,
        )
    }

    /// Sample index stored at (x, y)
    pub fn get(&self, x: i64, y: i64) -> Option<usize> {
        self.cells.get(&(x, y)).copied()
    }

    /// Record sample `index` at position `p`
    pub fn insert(&mut self, p: Point2D, index: usize) {
        let cell = self.cell_of(p);
        self.cells.insert(cell, index);
    }

    /// Number of occupied cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether any recorded sample lies closer than `min_spacing` to `p`
    pub fn has_neighbor_within(&self, p: Point2D, samples: &[Point2D], min_spacing: f32) -> bool {
        let (cx, cy) = self.cell_of(p);
        let min_sq = min_spacing * min_spacing;
        for y in (cy - 2)..=(cy + 2) {
            for x in (cx - 2)..=(cx + 2) {
                if let Some(index) = self.get(x, y) {
                    if samples[index].distance_squared(p) < min_sq {
                        return true;
                    }
                }
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_size() {
        let grid = SampleGrid::new(1.0);
        // cell = 1/√2 ≈ 0.7071
        assert!((grid.cell_size - 0.70710677).abs() < 1e-6);
        assert_eq!(grid.cell_of(Point2D::new(1.0, 0.5)), (1, 0));
    }

    #[test]
    fn test_neighbor_detection() {
        let mut grid = SampleGrid::new(1.0);
        let samples = vec![Point2D::new(5.0, 5.0)];
        grid.insert(samples[0], 0);

        assert!(grid.has_neighbor_within(Point2D::new(5.5, 5.5), &samples, 1.0));
        assert!(!grid.has_neighbor_within(Point2D::new(6.5, 5.0), &samples, 1.0));
    }

    #[test]
    fn test_unoccupied_cells_are_empty() {
        let grid = SampleGrid::new(1.0);
        assert_eq!(grid.get(-1, 0), None);
        assert_eq!(grid.get(0, 99), None);
        assert!(grid.is_empty());
    }

    #[test]
    fn test_far_cells_cost_one_entry_each() {
        let mut grid = SampleGrid::new(0.01);
        let samples = vec![Point2D::new(0.0, 0.0), Point2D::new(39_999.0, 39_999.0)];
        grid.insert(samples[0], 0);
        grid.insert(samples[1], 1);

        assert_eq!(grid.len(), 2);
        assert!(grid.has_neighbor_within(Point2D::new(39_999.005, 39_999.0), &samples, 0.01));
    }
}
