use labyrinth_common::CellCoord;
use serde::Serialize;

use crate::MazeError;

/// Occupancy of one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Cell {
    Wall,
    Path,
}

impl Cell {
    fn glyph(self) -> char {
        match self {
            Self::Wall => '#',
            Self::Path => '.',
        }
    }
}

/// Square N x N cell grid, stored row-major.
///
/// Row index is `x`, column index is `z`: the cell at `(x, z)` lives at
/// `x * size + z`. Size is fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Grid {
    size: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// A grid where every cell is a wall.
    pub fn filled(size: usize) -> Self {
        Self {
            size,
            cells: vec![Cell::Wall; size * size],
        }
    }

    /// Parse one line per row: `#` is a wall, `.` or space is a path.
    ///
    /// Blank lines are skipped. Every row must be as long as the number of rows.
    pub fn from_ascii(text: &str) -> Result<Self, MazeError> {
        let rows: Vec<&str> = text
            .lines()
            .map(|l| l.trim_end_matches('\r'))
            .filter(|l| !l.is_empty())
            .collect();
        let size = rows.len();
        let mut cells = Vec::with_capacity(size * size);
        for (row, line) in rows.iter().enumerate() {
            let before = cells.len();
            for ch in line.chars() {
                let cell = match ch {
                    '#' => Cell::Wall,
                    '.' | ' ' => Cell::Path,
                    other => {
                        return Err(MazeError::MalformedGrid {
                            row,
                            reason: format!("unexpected character {other:?}"),
                        });
                    }
                };
                cells.push(cell);
            }
            let width = cells.len() - before;
            if width != size {
                return Err(MazeError::MalformedGrid {
                    row,
                    reason: format!("expected {size} columns, found {width}"),
                });
            }
        }
        Ok(Self { size, cells })
    }

    /// Inverse of [`Grid::from_ascii`]: `#` walls, `.` paths, one line per row.
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity(self.size * (self.size + 1));
        for row in self.cells.chunks(self.size.max(1)) {
            out.extend(row.iter().map(|c| c.glyph()));
            out.push('\n');
        }
        out
    }

    /// Side length in cells.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn contains(&self, coord: CellCoord) -> bool {
        self.index(coord).is_some()
    }

    /// Bounds-checked read. `None` outside the grid.
    pub fn get(&self, coord: CellCoord) -> Option<Cell> {
        self.index(coord).and_then(|i| self.cells.get(i).copied())
    }

    pub fn is_path(&self, coord: CellCoord) -> bool {
        self.get(coord) == Some(Cell::Path)
    }

    /// Number of PATH cells.
    pub fn path_count(&self) -> usize {
        self.cells.iter().filter(|c| **c == Cell::Path).count()
    }

    /// All PATH cells in storage order.
    pub fn iter_paths(&self) -> impl Iterator<Item = CellCoord> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| **c == Cell::Path)
            .map(|(i, _)| self.coord_of(i))
    }

    /// Raw cells in storage order (row `x`, column `z`).
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Only the generator writes; consumers get `&Grid`.
    pub(crate) fn set(&mut self, coord: CellCoord, cell: Cell) {
        if let Some(i) = self.index(coord) {
            self.cells[i] = cell;
        }
    }

    fn index(&self, coord: CellCoord) -> Option<usize> {
        let n = self.size as i64;
        let (x, z) = (i64::from(coord.x), i64::from(coord.z));
        if x < 0 || z < 0 || x >= n || z >= n {
            return None;
        }
        Some((x * n + z) as usize)
    }

    fn coord_of(&self, index: usize) -> CellCoord {
        CellCoord::new((index / self.size) as i32, (index % self.size) as i32)
    }
}
