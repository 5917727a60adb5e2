use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use log::debug;
use once_cell::sync::Lazy;

use crate::board::STANDARD_SIZE;
use crate::{Coord, GameError};

pub type LineId = usize;

// Every winning line of the canonical board, built on first use and kept for
// the life of the process
static STANDARD_TABLE: Lazy<Arc<LineTable>> =
    Lazy::new(|| Arc::new(LineTable::build(STANDARD_SIZE)));

// Tables for the other board sizes, built on demand
static OTHER_TABLES: Lazy<Mutex<HashMap<usize, Arc<LineTable>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// Shared line table for a board size.
pub fn table(size: usize) -> Arc<LineTable> {
    if size == STANDARD_SIZE {
        return Arc::clone(&STANDARD_TABLE);
    }
    let mut tables = OTHER_TABLES.lock().unwrap_or_else(PoisonError::into_inner);
    Arc::clone(
        tables
            .entry(size)
            .or_insert_with(|| Arc::new(LineTable::build(size))),
    )
}

/// All maximal runs of N collinear cells on an N⁴ board.
///
/// A line follows a direction from {-1, 0, 1}⁴ without the zero vector. Of
/// each pair of opposite directions only the one whose first non-zero
/// component is +1 is kept, so every line appears once. Cells are stored as
/// flat board indices in walking order.
#[derive(Debug)]
pub struct LineTable {
    size: usize,
    lines: Vec<Vec<usize>>,
    through: Vec<Vec<LineId>>,
}

impl LineTable {
    pub fn build(size: usize) -> Self {
        let mut lines: Vec<Vec<usize>> = Vec::new();

        for direction in canonical_directions() {
            // Free axes range over the whole board; moving axes must start on
            // the edge they walk away from.
            let free: Vec<usize> = (0..4).filter(|&axis| direction[axis] == 0).collect();
            let starts = size.pow(free.len() as u32);

            for start_id in 0..starts {
                let mut start = [0i32; 4];
                let mut rest = start_id;
                for &axis in free.iter().rev() {
                    start[axis] = (rest % size) as i32;
                    rest /= size;
                }
                for axis in 0..4 {
                    if direction[axis] < 0 {
                        start[axis] = size as i32 - 1;
                    }
                }

                let line = (0..size as i32)
                    .map(|step| {
                        let mut components = [0u8; 4];
                        for axis in 0..4 {
                            components[axis] = (start[axis] + step * direction[axis]) as u8;
                        }
                        Coord::from_components(components).index(size)
                    })
                    .collect();
                lines.push(line);
            }
        }

        let mut through = vec![Vec::new(); size.pow(4)];
        for (id, line) in lines.iter().enumerate() {
            for &cell in line {
                through[cell].push(id);
            }
        }

        debug!("built {} lines for a board of size {}", lines.len(), size);
        Self {
            size,
            lines,
            through,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Cell indices of one line.
    pub fn line(&self, id: LineId) -> &[usize] {
        &self.lines[id]
    }

    pub fn iter(&self) -> impl Iterator<Item = &[usize]> + '_ {
        self.lines.iter().map(Vec::as_slice)
    }

    pub fn line_coords(&self, id: LineId) -> Vec<Coord> {
        self.lines[id]
            .iter()
            .map(|&index| Coord::from_index(index, self.size))
            .collect()
    }

    /// Ids of the lines passing through a flat cell index.
    pub fn lines_through_index(&self, index: usize) -> &[LineId] {
        &self.through[index]
    }

    /// Ids of the lines passing through a cell, for highlighting what a
    /// move would touch.
    pub fn lines_through(&self, coord: Coord) -> Result<&[LineId], GameError> {
        if !coord.in_bounds(self.size) {
            return Err(GameError::InvalidCoordinate {
                coord,
                size: self.size,
            });
        }
        Ok(&self.through[coord.index(self.size)])
    }
}

fn canonical_directions() -> Vec<[i32; 4]> {
    let mut directions = Vec::new();
    for code in 0..81 {
        let mut direction = [0i32; 4];
        let mut rest = code;
        for axis in (0..4).rev() {
            direction[axis] = (rest % 3) as i32 - 1;
            rest /= 3;
        }
        if direction.iter().find(|&&d| d != 0) == Some(&1) {
            directions.push(direction);
        }
    }
    directions
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn expected_lines(size: usize) -> usize {
        ((size + 2).pow(4) - size.pow(4)) / 2
    }

    #[test]
    fn test_standard_line_count() {
        assert_eq!(table(4).len(), 520);
    }

    #[test]
    fn test_line_count_for_other_sizes() {
        for size in 2..=6 {
            assert_eq!(LineTable::build(size).len(), expected_lines(size), "size {size}");
        }
    }

    #[test]
    fn test_forty_canonical_directions() {
        assert_eq!(canonical_directions().len(), 40);
    }

    #[test]
    fn test_lines_have_n_distinct_cells_in_bounds() {
        let table = table(4);
        for line in table.iter() {
            assert_eq!(line.len(), 4);
            assert!(line.iter().all(|&cell| cell < 256));
            let unique: HashSet<_> = line.iter().collect();
            assert_eq!(unique.len(), 4);
        }
    }

    #[test]
    fn test_lines_are_straight() {
        let table = table(4);
        for id in 0..table.len() {
            let coords = table.line_coords(id);
            let step: Vec<i32> = (0..4)
                .map(|axis| {
                    coords[1].components()[axis] as i32 - coords[0].components()[axis] as i32
                })
                .collect();
            assert!(step.iter().all(|s| (-1..=1).contains(s)));
            assert!(step.iter().any(|&s| s != 0));
            for pair in coords.windows(2) {
                for axis in 0..4 {
                    let delta =
                        pair[1].components()[axis] as i32 - pair[0].components()[axis] as i32;
                    assert_eq!(delta, step[axis]);
                }
            }
        }
    }

    #[test]
    fn test_no_duplicate_lines() {
        let table = table(4);
        let unique: HashSet<Vec<usize>> = table
            .iter()
            .map(|line| {
                let mut sorted = line.to_vec();
                sorted.sort_unstable();
                sorted
            })
            .collect();
        assert_eq!(unique.len(), table.len());
    }

    #[test]
    fn test_corner_lies_on_fifteen_lines() {
        let table = table(4);
        assert_eq!(table.lines_through(Coord::new(0, 0, 0, 0)).unwrap().len(), 15);
        assert_eq!(table.lines_through(Coord::new(3, 0, 3, 0)).unwrap().len(), 15);
    }

    #[test]
    fn test_every_cell_is_on_a_line() {
        let table = table(4);
        for index in 0..256 {
            let ids = table.lines_through_index(index);
            assert!(!ids.is_empty());
            for &id in ids {
                assert!(table.line(id).contains(&index));
            }
        }
    }

    #[test]
    fn test_lines_through_rejects_out_of_bounds() {
        assert!(table(4).lines_through(Coord::new(4, 0, 0, 0)).is_err());
    }

    #[test]
    fn test_tables_are_shared() {
        assert!(Arc::ptr_eq(&table(4), &table(4)));
        assert!(Arc::ptr_eq(&table(3), &table(3)));
        assert_eq!(table(3).size(), 3);
    }
}
