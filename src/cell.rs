//! Particle Cell Structure
//!
//! Represents a single unit cell of the maze with per-face candidate options.

use glam::IVec3;
use rand::seq::SliceRandom;
use rand::Rng;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::catalog::{self, OptionId, ALL_OPTIONS, WALL_OPTIONS};
use crate::error::{MazeError, Result};
use crate::face::Face;

/// A single cell ("particle") of a maze chunk
///
/// Each cell has:
/// - A grid position that is its unique key within a chunk
/// - A size (always one unit here)
/// - A participation mask saying which faces take part in a relationship
/// - One candidate list of option ids per face
///
/// # Face States
///
/// A candidate list with more than one entry is in superposition, a list
/// with exactly one entry is resolved, and an empty list means the face
/// takes no part in any relationship. An empty list always goes with a
/// cleared participation bit and vice versa.
///
/// # Memory Usage
///
/// Approximate size per cell:
/// - position + size: 24 bytes
/// - face_states: 1 byte
/// - face_options: 6 `Vec` headers (144 bytes) plus 2 bytes per candidate
/// - **Total: ~180 bytes per cell with horizontal faces in superposition**
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticleCell {
    /// Grid position, unique within a chunk
    pub position: IVec3,

    /// Cell extent in grid units (`[1, 1, 1]` for every generated cell)
    pub size: IVec3,

    /// Bit `i` is set when face `i` participates in a spatial relationship
    pub face_states: u8,

    /// Candidate option ids, indexed by [`Face::index`]
    pub face_options: [Vec<OptionId>; 6],
}

impl ParticleCell {
    /// Create a cell whose horizontal faces share the same candidate list
    fn with_horizontal(position: IVec3, candidates: &[OptionId]) -> Self {
        let mut face_options: [Vec<OptionId>; 6] = Default::default();
        for face in Face::HORIZONTAL {
            face_options[face.index()] = candidates.to_vec();
        }

        Self {
            position,
            size: IVec3::ONE,
            face_states: Face::HORIZONTAL_MASK,
            face_options,
        }
    }

    /// Create a cell in full superposition
    ///
    /// Every horizontal face may become any option in the catalog. Vertical
    /// faces are inert.
    pub fn superposition(position: IVec3) -> Self {
        Self::with_horizontal(position, &ALL_OPTIONS)
    }

    /// Create a cell whose horizontal faces may only become walls
    ///
    /// This is the starting state for growth: every face is a wall until the
    /// growth engine carves a passage through it.
    pub fn wall_default(position: IVec3) -> Self {
        Self::with_horizontal(position, &WALL_OPTIONS)
    }

    /// Build a cell from explicit per-face candidate lists
    ///
    /// The participation mask is derived from which lists are non-empty.
    ///
    /// # Errors
    ///
    /// Returns `MalformedCell` if any candidate is not in the catalog.
    pub fn from_faces(position: IVec3, face_options: [Vec<OptionId>; 6]) -> Result<Self> {
        let mut face_states = 0;
        for face in Face::ALL {
            let candidates = &face_options[face.index()];
            if candidates.iter().any(|&id| catalog::option_info(id).is_none()) {
                return Err(MazeError::MalformedCell { position, face });
            }
            if !candidates.is_empty() {
                face_states |= face.bit();
            }
        }

        Ok(Self {
            position,
            size: IVec3::ONE,
            face_states,
            face_options,
        })
    }

    /// Check that every face's candidate list agrees with its participation bit
    ///
    /// # Errors
    ///
    /// Returns `MalformedCell` naming the first face that disagrees.
    pub fn validate(&self) -> Result<()> {
        for face in Face::ALL {
            let participates = self.participates(face);
            let has_candidates = !self.face_options[face.index()].is_empty();
            if participates != has_candidates {
                return Err(MazeError::MalformedCell {
                    position: self.position,
                    face,
                });
            }
        }
        Ok(())
    }

    /// Check if a face takes part in a spatial relationship
    #[inline]
    pub fn participates(&self, face: Face) -> bool {
        self.face_states & face.bit() != 0
    }

    /// Candidate list of a face
    #[inline]
    pub fn candidates(&self, face: Face) -> &[OptionId] {
        &self.face_options[face.index()]
    }

    /// Replace the candidate list of a face
    ///
    /// The participation bit follows the new list.
    pub fn set_candidates(&mut self, face: Face, candidates: &[OptionId]) {
        self.face_options[face.index()] = candidates.to_vec();
        if candidates.is_empty() {
            self.face_states &= !face.bit();
        } else {
            self.face_states |= face.bit();
        }
    }

    /// The sole candidate of a face, if it is resolved
    #[inline]
    pub fn resolved_option(&self, face: Face) -> Option<OptionId> {
        match self.candidates(face) {
            [only] => Some(*only),
            _ => None,
        }
    }

    /// Check if a face has resolved to an open option
    #[inline]
    pub fn is_open(&self, face: Face) -> bool {
        self.resolved_option(face).is_some_and(catalog::is_open)
    }

    /// Check if a face still has more than one candidate
    #[inline]
    pub fn is_superposed(&self, face: Face) -> bool {
        self.candidates(face).len() > 1
    }

    /// Check if every participating face has exactly one candidate
    pub fn is_resolved(&self) -> bool {
        Face::ALL
            .iter()
            .filter(|&&face| self.participates(face))
            .all(|&face| self.candidates(face).len() == 1)
    }

    /// Position of the neighbouring cell behind a face
    #[inline]
    pub fn neighbor_position(&self, face: Face) -> IVec3 {
        self.position + face.direction()
    }
}

/// Collapse a candidate list to one option, chosen uniformly at random
///
/// Returns `None` for an empty list.
pub fn collapse_face<R: Rng + ?Sized>(candidates: &[OptionId], rng: &mut R) -> Option<OptionId> {
    candidates.choose(rng).copied()
}

/// The sole candidate of a cell face, if that face is resolved
#[inline]
pub fn resolved_option(cell: &ParticleCell, face: Face) -> Option<OptionId> {
    cell.resolved_option(face)
}
