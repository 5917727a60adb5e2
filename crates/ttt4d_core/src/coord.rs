use std::fmt;

use bincode::{Decode, Encode};

use crate::GameError;

/// A cell address on the hypercube: (w, x, y, z).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Encode, Decode)]
pub struct Coord {
    pub w: u8,
    pub x: u8,
    pub y: u8,
    pub z: u8,
}

impl Coord {
    pub const DIMENSIONS: usize = 4;

    pub fn new(w: u8, x: u8, y: u8, z: u8) -> Self {
        Self { w, x, y, z }
    }

    /// Builds a coordinate from raw components, as received from a front end.
    ///
    /// Only the arity is checked here; bounds depend on the board and are
    /// checked when the coordinate is used. Components too large for a `u8`
    /// saturate, which is out of bounds for every supported size.
    pub fn from_slice(components: &[usize]) -> Result<Self, GameError> {
        if components.len() != Self::DIMENSIONS {
            return Err(GameError::InvalidMove {
                arity: components.len(),
            });
        }

        let narrow = |c: usize| u8::try_from(c).unwrap_or(u8::MAX);
        Ok(Self {
            w: narrow(components[0]),
            x: narrow(components[1]),
            y: narrow(components[2]),
            z: narrow(components[3]),
        })
    }

    pub fn components(&self) -> [u8; 4] {
        [self.w, self.x, self.y, self.z]
    }

    pub fn from_components(components: [u8; 4]) -> Self {
        Self::new(components[0], components[1], components[2], components[3])
    }

    pub fn in_bounds(&self, size: usize) -> bool {
        self.components().iter().all(|&c| (c as usize) < size)
    }

    /// Flat index, lexicographic over (w, x, y, z). Caller checks bounds.
    pub fn index(&self, size: usize) -> usize {
        self.components()
            .iter()
            .fold(0, |acc, &c| acc * size + c as usize)
    }

    pub fn from_index(index: usize, size: usize) -> Self {
        let mut rest = index;
        let mut components = [0u8; 4];
        for slot in components.iter_mut().rev() {
            *slot = (rest % size) as u8;
            rest /= size;
        }
        Self::from_components(components)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}, {})", self.w, self.x, self.y, self.z)
    }
}
