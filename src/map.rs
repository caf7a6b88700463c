use anyhow::{Result, bail, ensure};

pub const WALL: char = '1';
pub const START: char = 'P';

/// Default scene. Each char is one grid cell: '1' wall, 'P' player start,
/// anything else floor. The outer ring must be solid so rays always terminate.
pub const DEFAULT_MAP: [&str; 16] = [
    "1111111111111111",
    "1100000000000001",
    "1101010101010101",
    "1100000000000001",
    "1000000000001101",
    "1011110001111101",
    "1001100000111101",
    "1001000100100001",
    "1111000000100111",
    "1110111110001111",
    "1010001000001111",
    "1011100001111001",
    "1000011000000001",
    "1011001000000001",
    "100110000P000001",
    "1111111111111111",
];

/// Immutable occupancy grid, built once at startup.
#[derive(Debug)]
pub struct MapGrid {
    width: usize,
    height: usize,
    cells: Vec<bool>, // true = wall, row-major
    start: (usize, usize),
}

impl MapGrid {
    pub fn parse(rows: &[&str]) -> Result<Self> {
        ensure!(rows.len() >= 3, "map needs at least 3 rows");
        let width = rows[0].chars().count();
        ensure!(width >= 3, "map needs at least 3 columns");

        let height = rows.len();
        let mut cells = Vec::with_capacity(width * height);
        let mut start = None;

        for (row, line) in rows.iter().enumerate() {
            ensure!(
                line.chars().count() == width,
                "map row {row} has width {}, expected {width}",
                line.chars().count()
            );
            for (col, ch) in line.chars().enumerate() {
                cells.push(ch == WALL);
                if ch == START {
                    ensure!(
                        start.is_none(),
                        "map has more than one start marker (second at col {col}, row {row})"
                    );
                    start = Some((col, row));
                }
            }
        }

        let Some(start) = start else {
            bail!("map has no start marker '{START}'");
        };

        let grid = Self {
            width,
            height,
            cells,
            start,
        };

        // Solid boundary is what guarantees DDA termination.
        for col in 0..width {
            ensure!(
                grid.is_wall(col as i32, 0) && grid.is_wall(col as i32, height as i32 - 1),
                "map boundary is not solid at column {col}"
            );
        }
        for row in 0..height {
            ensure!(
                grid.is_wall(0, row as i32) && grid.is_wall(width as i32 - 1, row as i32),
                "map boundary is not solid at row {row}"
            );
        }

        Ok(grid)
    }

    /// Callers guarantee in-bounds coordinates; the solid boundary means a
    /// traversal can never step outside. An out-of-bounds query is a bug, so
    /// this indexes directly rather than clamping.
    #[inline]
    pub fn is_wall(&self, col: i32, row: i32) -> bool {
        debug_assert!(col >= 0 && (col as usize) < self.width);
        debug_assert!(row >= 0 && (row as usize) < self.height);
        self.cells[row as usize * self.width + col as usize]
    }

    #[inline]
    pub fn start(&self) -> (usize, usize) {
        self.start
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }
}
