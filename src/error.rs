//! Error types for maze generation and resolution

use glam::IVec3;

use crate::face::Face;

/// Errors that can occur while configuring, growing or resolving a maze
///
/// Only configuration mistakes and broken cell invariants are errors.
/// Growing fewer cells than requested, or asking for a path between two
/// cells that are not connected, are normal outcomes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MazeError {
    /// Configuration validation failed
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// A cell was inserted at a position that is already occupied
    #[error("duplicate cell position: {0}")]
    DuplicatePosition(IVec3),
    /// Requested cell position does not exist in the chunk
    #[error("cell not found: {0}")]
    CellNotFound(IVec3),
    /// A participating face had no candidate options left at collapse time
    #[error("cell {position} has no candidates on participating face {face:?}")]
    EmptyCandidates {
        /// Position of the offending cell
        position: IVec3,
        /// Face whose candidate list was empty
        face: Face,
    },
    /// A face's candidate list disagrees with the cell's participation mask
    #[error("cell {position} face {face:?} candidates do not match its participation bit")]
    MalformedCell {
        /// Position of the offending cell
        position: IVec3,
        /// Face that failed validation
        face: Face,
    },
}

/// Result type alias for maze operations
pub type Result<T> = std::result::Result<T, MazeError>;
