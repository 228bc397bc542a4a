//! Dense cell matrix and polygon rasterization.

use std::fmt;

use wrapper_core::{Cell, Point, Polygon};

/// Fixed-size matrix of [`Cell`] values addressed by [`Point`].
///
/// Row zero is the bottom edge of the map. Dimensions never change after
/// construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    rows: u32,
    cols: u32,
    cells: Vec<Cell>,
}

/// Raised when a point outside the grid is written.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("point ({}, {}) lies outside the grid", .0.x, .0.y)]
pub struct OutOfBounds(pub Point);

/// Raised when a grid of the requested dimensions cannot be allocated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("grid of {rows} x {cols} cells cannot be allocated")]
pub struct GridTooLarge {
    /// Requested number of rows.
    pub rows: u32,
    /// Requested number of columns.
    pub cols: u32,
}

impl Grid {
    /// Allocates a grid with every cell set to `fill`.
    pub fn new(rows: u32, cols: u32, fill: Cell) -> Result<Self, GridTooLarge> {
        let too_large = GridTooLarge { rows, cols };
        let capacity = usize::try_from(rows)
            .ok()
            .zip(usize::try_from(cols).ok())
            .and_then(|(rows, cols)| rows.checked_mul(cols))
            .ok_or(too_large)?;

        let mut cells = Vec::new();
        cells.try_reserve_exact(capacity).map_err(|_| too_large)?;
        cells.resize(capacity, fill);
        Ok(Self { rows, cols, cells })
    }

    /// Allocates a grid outside any playable area.
    pub fn filled_void(rows: u32, cols: u32) -> Result<Self, GridTooLarge> {
        Self::new(rows, cols, Cell::Void)
    }

    /// Number of rows.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns.
    #[must_use]
    pub const fn cols(&self) -> u32 {
        self.cols
    }

    /// Reports whether the point addresses a cell of the grid.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        self.index(point).is_some()
    }

    /// Reads the cell at `point`.
    #[must_use]
    pub fn get(&self, point: Point) -> Option<Cell> {
        self.index(point).map(|index| self.cells[index])
    }

    /// Overwrites the cell at `point`, returning its previous contents.
    pub fn set(&mut self, point: Point, cell: Cell) -> Result<Cell, OutOfBounds> {
        let index = self.index(point).ok_or(OutOfBounds(point))?;
        Ok(std::mem::replace(&mut self.cells[index], cell))
    }

    /// Counts the cells satisfying `predicate`.
    pub fn count(&self, mut predicate: impl FnMut(Cell) -> bool) -> usize {
        self.cells.iter().filter(|cell| predicate(**cell)).count()
    }

    /// Iterates every cell together with its location, bottom row first.
    pub fn iter(&self) -> impl Iterator<Item = (Point, Cell)> + '_ {
        let width = self.cols as usize;
        self.cells.iter().enumerate().map(move |(index, cell)| {
            // Dimensions fit in `u32`, so both components fit in `i32` after division.
            let x = (index % width) as i32;
            let y = (index / width) as i32;
            (Point::new(x, y), *cell)
        })
    }

    /// Rasterizes each polygon, overwriting covered cells with `cell`.
    ///
    /// Every row is sampled along its centre line: crossings with the polygon
    /// edges are collected, sorted and paired under the even-odd rule, and
    /// each column whose centre falls within a pair is written. Centres lying
    /// exactly on an edge are covered. Cells outside the grid are clipped.
    pub fn project<'a>(&mut self, polygons: impl IntoIterator<Item = &'a Polygon>, cell: Cell) {
        for polygon in polygons {
            self.project_polygon(polygon, cell);
        }
    }

    fn project_polygon(&mut self, polygon: &Polygon, cell: Cell) {
        let Some(bbox) = polygon.bounding_box() else {
            return;
        };
        if polygon.vertices().len() < 3 {
            return;
        }

        let row_start = bbox.min.y.max(0);
        let row_end = bbox.max.y.min(self.row_limit());
        let mut crossings: Vec<f64> = Vec::new();

        for y in row_start..row_end {
            let sample = f64::from(y) + 0.5;
            crossings.clear();
            for (start, end) in polygon.edges() {
                let (sy, ey) = (f64::from(start.y), f64::from(end.y));
                if (sy > sample) == (ey > sample) {
                    continue;
                }
                let (sx, ex) = (f64::from(start.x), f64::from(end.x));
                crossings.push(sx + (sample - sy) * (ex - sx) / (ey - sy));
            }
            crossings.sort_by(f64::total_cmp);

            for span in crossings.chunks_exact(2) {
                let first = (span[0] - 0.5).ceil().max(0.0);
                let last = (span[1] - 0.5).floor().min(f64::from(self.col_limit()) - 1.0);
                if first > last {
                    continue;
                }
                // Both bounds were clamped into the grid's column range.
                for x in first as i32..=last as i32 {
                    let _ = self.set(Point::new(x, y), cell);
                }
            }
        }
    }

    fn row_limit(&self) -> i32 {
        i32::try_from(self.rows).unwrap_or(i32::MAX)
    }

    fn col_limit(&self) -> i32 {
        i32::try_from(self.cols).unwrap_or(i32::MAX)
    }

    fn index(&self, point: Point) -> Option<usize> {
        let column = u32::try_from(point.x).ok()?;
        let row = u32::try_from(point.y).ok()?;
        if column < self.cols && row < self.rows {
            let row = usize::try_from(row).ok()?;
            let column = usize::try_from(column).ok()?;
            let width = usize::try_from(self.cols).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}

impl fmt::Display for Grid {
    /// Renders one line per row, top row first, one tag byte per cell.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.cols == 0 {
            return Ok(());
        }
        let width = self.cols as usize;
        for row in self.cells.chunks(width).rev() {
            let line: String = row.iter().map(|cell| char::from(cell.as_byte())).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x0: i32, y0: i32, x1: i32, y1: i32) -> Polygon {
        Polygon::new(vec![
            Point::new(x0, y0),
            Point::new(x1, y0),
            Point::new(x1, y1),
            Point::new(x0, y1),
        ])
    }

    #[test]
    fn new_grid_is_filled_and_bounded() {
        let grid = Grid::filled_void(2, 3).expect("small grid");
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.cols(), 3);
        assert_eq!(grid.count(|cell| cell == Cell::Void), 6);
        assert!(grid.contains(Point::new(2, 1)));
        assert!(!grid.contains(Point::new(3, 1)));
        assert!(!grid.contains(Point::new(2, 2)));
        assert!(!grid.contains(Point::new(-1, 0)));
    }

    #[test]
    fn oversized_grid_is_rejected_without_aborting() {
        assert_eq!(
            Grid::new(u32::MAX, u32::MAX, Cell::Void),
            Err(GridTooLarge {
                rows: u32::MAX,
                cols: u32::MAX
            })
        );
    }

    #[test]
    fn set_returns_previous_cell_and_rejects_outside_points() {
        let mut grid = Grid::new(2, 2, Cell::Free).expect("small grid");
        assert_eq!(grid.set(Point::new(1, 0), Cell::Wrapped), Ok(Cell::Free));
        assert_eq!(grid.get(Point::new(1, 0)), Some(Cell::Wrapped));
        assert_eq!(
            grid.set(Point::new(2, 0), Cell::Wrapped),
            Err(OutOfBounds(Point::new(2, 0)))
        );
        assert_eq!(grid.get(Point::new(0, -1)), None);
    }

    #[test]
    fn projecting_rectangle_fills_exactly_its_cells() {
        let mut grid = Grid::filled_void(5, 5).expect("small grid");
        grid.project([&rect(1, 1, 4, 3)], Cell::Free);

        for (point, cell) in grid.iter() {
            let inside = (1..4).contains(&point.x) && (1..3).contains(&point.y);
            let expected = if inside { Cell::Free } else { Cell::Void };
            assert_eq!(cell, expected, "unexpected cell at {point:?}");
        }
    }

    #[test]
    fn later_projection_takes_precedence() {
        let mut grid = Grid::filled_void(4, 4).expect("small grid");
        grid.project([&rect(0, 0, 4, 4)], Cell::Free);
        grid.project([&rect(1, 1, 3, 3)], Cell::Obstacle);

        assert_eq!(grid.count(|cell| cell == Cell::Obstacle), 4);
        assert_eq!(grid.count(|cell| cell == Cell::Free), 12);
        assert_eq!(grid.get(Point::new(2, 2)), Some(Cell::Obstacle));
    }

    #[test]
    fn projection_is_clipped_to_grid() {
        let mut grid = Grid::filled_void(3, 3).expect("small grid");
        grid.project([&rect(-2, -2, 2, 10)], Cell::Obstacle);
        assert_eq!(grid.count(|cell| cell == Cell::Obstacle), 6);
        assert_eq!(grid.get(Point::new(2, 0)), Some(Cell::Void));
    }

    #[test]
    fn projection_matches_cell_containment_for_concave_outline() {
        let outline = Polygon::new(vec![
            Point::new(0, 0),
            Point::new(6, 0),
            Point::new(6, 2),
            Point::new(2, 2),
            Point::new(2, 4),
            Point::new(6, 4),
            Point::new(6, 6),
            Point::new(0, 6),
        ]);
        let mut grid = Grid::filled_void(6, 6).expect("small grid");
        grid.project([&outline], Cell::Free);

        for (point, cell) in grid.iter() {
            let expected = if outline.contains_cell(point.x, point.y) {
                Cell::Free
            } else {
                Cell::Void
            };
            assert_eq!(cell, expected, "scanline disagrees at {point:?}");
        }
    }

    #[test]
    fn clone_is_independent() {
        let original = Grid::new(2, 2, Cell::Free).expect("small grid");
        let mut copy = original.clone();
        let _ = copy.set(Point::new(0, 0), Cell::Wrapped);
        assert_eq!(original.get(Point::new(0, 0)), Some(Cell::Free));
        assert_eq!(copy.get(Point::new(0, 0)), Some(Cell::Wrapped));
    }

    #[test]
    fn display_renders_top_row_first() {
        let mut grid = Grid::new(2, 3, Cell::Free).expect("small grid");
        let _ = grid.set(Point::new(0, 0), Cell::Obstacle);
        let _ = grid.set(Point::new(2, 1), Cell::Wrapped);
        assert_eq!(grid.to_string(), "  W\nO  \n");
    }
}
