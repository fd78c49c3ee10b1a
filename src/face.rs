//! Axial cell faces
//!
//! A cell has six faces, one per signed axis. Faces index fixed-size
//! per-face arrays, so they are a plain enumeration rather than names.

use glam::IVec3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One of the six axial directions of a unit cell
///
/// The discriminant is the face index used by [`crate::ParticleCell`]
/// for its per-face arrays and participation mask.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Face {
    /// +X
    PosX = 0,
    /// -X
    NegX = 1,
    /// +Y (up)
    PosY = 2,
    /// -Y (down)
    NegY = 3,
    /// +Z
    PosZ = 4,
    /// -Z
    NegZ = 5,
}

impl Face {
    /// All faces in index order
    ///
    /// This is also the neighbour visitation order for path finding, which
    /// keeps tie-breaking between equal-length paths reproducible.
    pub const ALL: [Face; 6] = [
        Face::PosX,
        Face::NegX,
        Face::PosY,
        Face::NegY,
        Face::PosZ,
        Face::NegZ,
    ];

    /// The four faces in the horizontal (XZ) plane
    pub const HORIZONTAL: [Face; 4] = [Face::PosX, Face::NegX, Face::PosZ, Face::NegZ];

    /// Participation mask with a bit set for every horizontal face
    pub const HORIZONTAL_MASK: u8 = 0b11_00_11;

    /// Index of this face into per-face arrays (0..6)
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Bit for this face in a participation mask
    #[inline]
    pub const fn bit(self) -> u8 {
        1 << (self as u8)
    }

    /// Face pointing the other way along the same axis
    #[inline]
    pub const fn opposite(self) -> Face {
        match self {
            Face::PosX => Face::NegX,
            Face::NegX => Face::PosX,
            Face::PosY => Face::NegY,
            Face::NegY => Face::PosY,
            Face::PosZ => Face::NegZ,
            Face::NegZ => Face::PosZ,
        }
    }

    /// Unit offset from a cell to the neighbour behind this face
    #[inline]
    pub const fn direction(self) -> IVec3 {
        match self {
            Face::PosX => IVec3::X,
            Face::NegX => IVec3::NEG_X,
            Face::PosY => IVec3::Y,
            Face::NegY => IVec3::NEG_Y,
            Face::PosZ => IVec3::Z,
            Face::NegZ => IVec3::NEG_Z,
        }
    }

    /// Whether this face points along a positive axis
    #[inline]
    pub const fn is_positive(self) -> bool {
        matches!(self, Face::PosX | Face::PosY | Face::PosZ)
    }

    /// Whether this face lies in the horizontal plane
    #[inline]
    pub const fn is_horizontal(self) -> bool {
        !matches!(self, Face::PosY | Face::NegY)
    }

    /// Look up a face by its index
    pub fn from_index(index: usize) -> Option<Face> {
        Face::ALL.get(index).copied()
    }
}
