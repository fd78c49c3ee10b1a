//! Particle chunk: a position-keyed collection of cells

use glam::IVec3;
use indexmap::map::Entry;
use indexmap::IndexMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::catalog::OPEN_OPTIONS;
use crate::cell::ParticleCell;
use crate::error::{MazeError, Result};
use crate::face::Face;

/// A collection of cells keyed by grid position
///
/// Positions are unique. The chunk has no meaningful order, but iteration
/// follows insertion order so that seeded generation is reproducible.
///
/// With the `serde` feature the chunk is stored as a list of cells.
/// Deserializing a list that repeats a position fails with
/// `DuplicatePosition`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "Vec<ParticleCell>", into = "Vec<ParticleCell>")
)]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParticleChunk {
    cells: IndexMap<IVec3, ParticleCell>,
}

impl ParticleChunk {
    /// Create an empty chunk
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a chunk from cells, keeping their order
    ///
    /// # Errors
    ///
    /// Returns `DuplicatePosition` for the first cell whose position is
    /// already taken.
    pub fn from_cells(cells: impl IntoIterator<Item = ParticleCell>) -> Result<Self> {
        let mut chunk = Self::new();
        for cell in cells {
            chunk.insert(cell)?;
        }
        Ok(chunk)
    }

    /// Insert a cell under its own position
    ///
    /// # Errors
    ///
    /// Returns `DuplicatePosition` if a cell already occupies that position.
    pub fn insert(&mut self, cell: ParticleCell) -> Result<()> {
        match self.cells.entry(cell.position) {
            Entry::Occupied(_) => Err(MazeError::DuplicatePosition(cell.position)),
            Entry::Vacant(slot) => {
                slot.insert(cell);
                Ok(())
            }
        }
    }

    /// Get the number of cells
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if the chunk has no cells
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Check if a cell exists at a position
    #[inline]
    pub fn contains(&self, position: IVec3) -> bool {
        self.cells.contains_key(&position)
    }

    /// Get the cell at a position
    #[inline]
    pub fn get(&self, position: IVec3) -> Option<&ParticleCell> {
        self.cells.get(&position)
    }

    /// Get the cell at a position for mutation
    #[inline]
    pub fn get_mut(&mut self, position: IVec3) -> Option<&mut ParticleCell> {
        self.cells.get_mut(&position)
    }

    /// Iterate over cells in insertion order
    pub fn cells(&self) -> impl Iterator<Item = &ParticleCell> {
        self.cells.values()
    }

    /// Iterate over cells mutably in insertion order
    pub fn cells_mut(&mut self) -> impl Iterator<Item = &mut ParticleCell> {
        self.cells.values_mut()
    }

    /// Iterate over positions in insertion order
    pub fn positions(&self) -> impl Iterator<Item = IVec3> + '_ {
        self.cells.keys().copied()
    }

    /// Keep only the cells matching a predicate, preserving order
    pub fn retain(&mut self, mut keep: impl FnMut(&ParticleCell) -> bool) {
        self.cells.retain(|_, cell| keep(cell));
    }

    /// The neighbouring cell behind a face, if present
    pub fn neighbor(&self, position: IVec3, face: Face) -> Option<&ParticleCell> {
        self.get(position + face.direction())
    }

    /// Carve a passage through the face shared by two adjacent cells
    ///
    /// Both sides of the shared face are narrowed to the open-only candidate
    /// set. No other face of either cell is touched.
    ///
    /// # Errors
    ///
    /// Returns `CellNotFound` if either cell is missing; the chunk is left
    /// unchanged in that case.
    pub fn carve(&mut self, position: IVec3, face: Face) -> Result<()> {
        let neighbor = position + face.direction();
        if !self.contains(position) {
            return Err(MazeError::CellNotFound(position));
        }
        if !self.contains(neighbor) {
            return Err(MazeError::CellNotFound(neighbor));
        }

        if let Some(cell) = self.cells.get_mut(&position) {
            cell.set_candidates(face, &OPEN_OPTIONS);
        }
        if let Some(cell) = self.cells.get_mut(&neighbor) {
            cell.set_candidates(face.opposite(), &OPEN_OPTIONS);
        }
        Ok(())
    }
}

impl TryFrom<Vec<ParticleCell>> for ParticleChunk {
    type Error = MazeError;

    fn try_from(cells: Vec<ParticleCell>) -> Result<Self> {
        Self::from_cells(cells)
    }
}

impl From<ParticleChunk> for Vec<ParticleCell> {
    fn from(chunk: ParticleChunk) -> Self {
        chunk.cells.into_values().collect()
    }
}
