use cityscape_common::{Axis, GridPos, ShiftDirection};
use glam::DVec2;
use rand::Rng;

use crate::cell::Cell;
use crate::config::WorldConfig;
use crate::generator::CellGenerator;

/// Fixed-size `N×N` window onto the unbounded city grid.
///
/// Cells are stored row-major. Rows advance along world z, columns along
/// world x, both by exactly one pitch. Every slot always holds a cell.
#[derive(Debug, Clone)]
pub struct Grid {
    size: usize,
    pitch: f64,
    cells: Vec<Cell>,
}

impl Grid {
    /// Generate a complete window with cell (0,0) at `origin`.
    ///
    /// Heights walk row-major: (0,0) from the configured seed height, the
    /// first cell of each row from the cell above, every other cell from its
    /// left neighbour.
    pub fn fill<R: Rng + ?Sized>(
        config: &WorldConfig,
        origin: DVec2,
        generator: &CellGenerator,
        rng: &mut R,
    ) -> Self {
        let size = config.grid_size;
        assert!(size >= 2, "window must be at least 2x2");
        let mut cells: Vec<Cell> = Vec::with_capacity(size * size);
        for row in 0..size {
            for col in 0..size {
                let neighbor_height = match (row, col) {
                    (0, 0) => config.seed_height,
                    (_, 0) => cells[(row - 1) * size].height,
                    _ => cells[row * size + col - 1].height,
                };
                let traits = generator.generate(neighbor_height, rng);
                let world_pos =
                    origin + DVec2::new(col as f64 * config.pitch, row as f64 * config.pitch);
                cells.push(Cell::new(GridPos::new(row, col), world_pos, traits));
            }
        }
        tracing::debug!(size, ?origin, "window filled");
        Self {
            size,
            pitch: config.pitch,
            cells,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn pitch(&self) -> f64 {
        self.pitch
    }

    /// Cell at `(row, col)`. Out-of-range access is an invariant violation.
    pub fn get(&self, row: usize, col: usize) -> &Cell {
        let index = self.index(row, col);
        &self.cells[index]
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> &mut Cell {
        let index = self.index(row, col);
        &mut self.cells[index]
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn cells_mut(&mut self) -> impl Iterator<Item = &mut Cell> {
        self.cells.iter_mut()
    }

    /// World position of the cell in slot (0,0).
    pub fn origin(&self) -> DVec2 {
        self.cells[0].world_pos
    }

    /// World position of the cell in slot (N-1, N-1).
    pub fn far_corner(&self) -> DVec2 {
        self.cells[self.cells.len() - 1].world_pos
    }

    /// Slide the window one cell in `direction` and regenerate the freed edge.
    ///
    /// The cell scrolling out is recycled into the freed slot and overwritten.
    /// New heights walk along the freed edge: the first from its inner
    /// neighbour, each later one from the cell generated just before it.
    /// Returns the slots that were regenerated, in generation order.
    pub fn shift_and_regenerate<R: Rng + ?Sized>(
        &mut self,
        direction: ShiftDirection,
        generator: &CellGenerator,
        rng: &mut R,
    ) -> Vec<GridPos> {
        let n = self.size;
        let positive = direction.sign() > 0.0;
        let axis = direction.axis();

        match (axis, positive) {
            (Axis::Col, true) => self.cells.chunks_mut(n).for_each(|row| row.rotate_left(1)),
            (Axis::Col, false) => self.cells.chunks_mut(n).for_each(|row| row.rotate_right(1)),
            (Axis::Row, true) => self.cells.rotate_left(n),
            (Axis::Row, false) => self.cells.rotate_right(n),
        }
        for (index, cell) in self.cells.iter_mut().enumerate() {
            cell.grid_pos = GridPos::new(index / n, index % n);
        }

        let (freed, inner) = if positive { (n - 1, n - 2) } else { (0, 1) };
        let step = match axis {
            Axis::Col => DVec2::X,
            Axis::Row => DVec2::Y,
        } * self.pitch
            * direction.sign();

        let mut regenerated = Vec::with_capacity(n);
        let mut previous_height = None;
        for lane in 0..n {
            let neighbor = *self.slot(axis, lane, inner);
            let seed_height = previous_height.unwrap_or(neighbor.height);
            let traits = generator.generate(seed_height, rng);
            let target = slot_pos(axis, lane, freed);
            *self.get_mut(target.row, target.col) =
                Cell::new(target, neighbor.world_pos + step, traits);
            previous_height = Some(traits.height);
            regenerated.push(target);
        }

        tracing::debug!(%direction, origin = ?self.origin(), "window shifted");
        regenerated
    }

    fn slot(&self, axis: Axis, lane: usize, k: usize) -> &Cell {
        let pos = slot_pos(axis, lane, k);
        self.get(pos.row, pos.col)
    }

    fn index(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.size && col < self.size,
            "grid access ({row}, {col}) outside {0}x{0} window",
            self.size
        );
        row * self.size + col
    }
}

/// Slot `k` along the shift axis in lane `lane` of the perpendicular axis.
fn slot_pos(axis: Axis, lane: usize, k: usize) -> GridPos {
    match axis {
        Axis::Col => GridPos::new(lane, k),
        Axis::Row => GridPos::new(k, lane),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn make_grid(seed: u64) -> (Grid, CellGenerator, ChaCha8Rng) {
        let config = WorldConfig::default();
        let generator = CellGenerator::new(&config);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let grid = Grid::fill(&config, config.centred_origin(), &generator, &mut rng);
        (grid, generator, rng)
    }

    fn assert_lattice(grid: &Grid) {
        let origin = grid.origin();
        for cell in grid.cells() {
            let expected = origin
                + DVec2::new(
                    cell.grid_pos.col as f64 * grid.pitch(),
                    cell.grid_pos.row as f64 * grid.pitch(),
                );
            assert_eq!(cell.world_pos, expected, "cell {}", cell.grid_pos);
        }
    }

    #[test]
    fn fill_is_complete_and_on_lattice() {
        let (grid, _, _) = make_grid(1);
        assert_eq!(grid.cells().count(), 100);
        assert_eq!(grid.origin(), DVec2::splat(-67.5));
        assert_eq!(grid.far_corner(), DVec2::splat(67.5));
        assert_lattice(&grid);
        assert!(grid.cells().all(|c| !c.open));
    }

    #[test]
    fn fill_walks_heights_row_major() {
        let config = WorldConfig::default();
        let generator = CellGenerator::new(&config);
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let grid = Grid::fill(&config, DVec2::ZERO, &generator, &mut rng);

        // Replay the same draws and walk the heights by hand.
        let mut replay = ChaCha8Rng::seed_from_u64(9);
        let mut expected = vec![0; 100];
        for row in 0..10 {
            for col in 0..10 {
                let from = match (row, col) {
                    (0, 0) => 11,
                    (_, 0) => expected[(row - 1) * 10],
                    _ => expected[row * 10 + col - 1],
                };
                let step = generator.roll(&mut replay).height_step;
                expected[row * 10 + col] = (from + step).clamp(3, 20);
            }
        }
        let actual: Vec<i32> = grid.cells().map(|c| c.height).collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn shift_pos_col_moves_columns_and_regenerates_last() {
        let (mut grid, generator, mut rng) = make_grid(5);
        let before = grid.clone();

        let freed = grid.shift_and_regenerate(ShiftDirection::PosCol, &generator, &mut rng);
        assert_eq!(freed.len(), 10);
        assert!(freed.iter().all(|p| p.col == 9));

        for row in 0..10 {
            for col in 0..9 {
                let mut expected = *before.get(row, col + 1);
                expected.grid_pos = GridPos::new(row, col);
                assert_eq!(*grid.get(row, col), expected);
            }
            let fresh = grid.get(row, 9);
            assert_eq!(fresh.world_pos.x, before.get(row, 9).world_pos.x + 15.0);
            assert_eq!(fresh.world_pos.y, before.get(row, 9).world_pos.y);
        }
        assert_lattice(&grid);
    }

    #[test]
    fn shift_neg_row_moves_rows_and_regenerates_first() {
        let (mut grid, generator, mut rng) = make_grid(6);
        let before = grid.clone();

        let freed = grid.shift_and_regenerate(ShiftDirection::NegRow, &generator, &mut rng);
        assert!(freed.iter().all(|p| p.row == 0));

        for row in 1..10 {
            for col in 0..10 {
                let mut expected = *before.get(row - 1, col);
                expected.grid_pos = GridPos::new(row, col);
                assert_eq!(*grid.get(row, col), expected);
            }
        }
        for col in 0..10 {
            assert_eq!(
                grid.get(0, col).world_pos,
                before.get(0, col).world_pos - DVec2::new(0.0, 15.0)
            );
        }
        assert_lattice(&grid);
    }

    #[test]
    fn regenerated_edge_walks_heights_along_itself() {
        let (mut grid, generator, mut rng) = make_grid(7);
        let mut replay = rng.clone();

        grid.shift_and_regenerate(ShiftDirection::PosRow, &generator, &mut rng);

        let mut previous = grid.get(8, 0).height;
        for col in 0..10 {
            let step = generator.roll(&mut replay).height_step;
            let expected = (previous + step).clamp(3, 20);
            assert_eq!(grid.get(9, col).height, expected, "col {col}");
            previous = expected;
        }
    }

    #[test]
    fn every_direction_keeps_window_complete_and_bounded() {
        let (mut grid, generator, mut rng) = make_grid(8);
        for i in 0..200 {
            let direction = ShiftDirection::ALL[i % 4];
            grid.shift_and_regenerate(direction, &generator, &mut rng);
            assert_eq!(grid.cells().count(), 100);
            assert!(grid.cells().all(|c| (3..=20).contains(&c.height)));
            assert_lattice(&grid);
        }
    }

    #[test]
    fn shift_resets_door_of_recycled_cell() {
        let (mut grid, generator, mut rng) = make_grid(10);
        for cell in grid.cells_mut() {
            cell.open = true;
        }
        grid.shift_and_regenerate(ShiftDirection::NegCol, &generator, &mut rng);
        for row in 0..10 {
            assert!(!grid.get(row, 0).open);
            assert!(grid.get(row, 1).open);
        }
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn out_of_range_access_panics() {
        let (grid, _, _) = make_grid(1);
        grid.get(10, 0);
    }
}
