use std::fmt;

use crate::{Cell, Coord, GameError};

pub const STANDARD_SIZE: usize = 4;
pub const MIN_SIZE: usize = 2;
pub const MAX_SIZE: usize = 8;

/// An N×N×N×N grid of cells, stored flat in lexicographic (w, x, y, z) order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
}

impl Board {
    pub fn new(size: usize) -> Result<Self, GameError> {
        check_size(size)?;
        Ok(Self {
            size,
            cells: vec![Cell::Empty; size.pow(4)],
        })
    }

    /// The canonical 4×4×4×4 board.
    pub fn standard() -> Self {
        Self {
            size: STANDARD_SIZE,
            cells: vec![Cell::Empty; STANDARD_SIZE.pow(4)],
        }
    }

    /// Rebuilds a board from decoded cell data.
    pub fn from_cells(size: usize, cells: Vec<Cell>) -> Result<Self, GameError> {
        check_size(size)?;
        let expected = size.pow(4);
        if cells.len() != expected {
            return Err(GameError::CellCount {
                size,
                expected,
                actual: cells.len(),
            });
        }
        Ok(Self { size, cells })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn in_bounds(&self, coord: Coord) -> bool {
        coord.in_bounds(self.size)
    }

    pub fn index_of(&self, coord: Coord) -> Result<usize, GameError> {
        if !self.in_bounds(coord) {
            return Err(GameError::InvalidCoordinate {
                coord,
                size: self.size,
            });
        }
        Ok(coord.index(self.size))
    }

    pub fn get(&self, coord: Coord) -> Result<Cell, GameError> {
        let index = self.index_of(coord)?;
        Ok(self.cells[index])
    }

    /// Overwrites a cell in place. Rules are not consulted.
    pub fn set(&mut self, coord: Coord, cell: Cell) -> Result<(), GameError> {
        let index = self.index_of(coord)?;
        self.cells[index] = cell;
        Ok(())
    }

    /// Value-style `set`: returns a modified copy and leaves `self` alone.
    pub fn with(&self, coord: Coord, cell: Cell) -> Result<Board, GameError> {
        let mut next = self.clone();
        next.set(coord, cell)?;
        Ok(next)
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| !c.is_empty())
    }

    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

fn check_size(size: usize) -> Result<(), GameError> {
    if (MIN_SIZE..=MAX_SIZE).contains(&size) {
        Ok(())
    } else {
        Err(GameError::UnsupportedSize(size))
    }
}

// Layers of w stacked vertically; each layer shows the x planes side by side,
// one text row per y and one character per z.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.size;
        for w in 0..n {
            writeln!(f, "w={}", w)?;
            for y in 0..n {
                let mut row = String::with_capacity(n * (n + 2));
                for x in 0..n {
                    if x > 0 {
                        row.push_str("  ");
                    }
                    for z in 0..n {
                        let coord = Coord::new(w as u8, x as u8, y as u8, z as u8);
                        row.push(self.cells[coord.index(n)].symbol());
                    }
                }
                writeln!(f, "{}", row)?;
            }
        }
        Ok(())
    }
}
