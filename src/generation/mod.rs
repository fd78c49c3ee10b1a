//! Growth engine
//!
//! Grows a connected set of wall-default cells from the origin and carves
//! passages between them. Two growth strategies are available: depth-first
//! backtracking over an unbounded plane, and a breadth-first cascade over a
//! bounded grid.

mod backtracking;
mod cascade;
mod links;

pub use backtracking::grow_backtracking;
pub use cascade::{grow_cascade, BranchingOptions, GridBounds};
pub use links::Links;

use glam::IVec3;
use rand::Rng;

use crate::cell::ParticleCell;
use crate::chunk::ParticleChunk;
use crate::config::{GenerationMode, MazeConfig};
use crate::error::Result;
use crate::face::Face;

/// Result of growth, before any face is collapsed
///
/// Carved faces hold the open-only candidate set on both sides; every other
/// horizontal face still holds the wall-only set.
#[derive(Debug, Clone, Default)]
pub struct Layout {
    /// Grown cells
    pub chunk: ParticleChunk,
    /// Carved edges
    pub links: Links,
    /// Positions in the order they became connected, origin first
    pub collapse_order: Vec<IVec3>,
}

impl Layout {
    /// Start a layout holding a single connected cell
    fn seeded(origin: IVec3) -> Result<Self> {
        let mut layout = Self::default();
        layout.chunk.insert(ParticleCell::wall_default(origin))?;
        layout.collapse_order.push(origin);
        Ok(layout)
    }

    /// Carve and record the edge from `position` through `face`
    ///
    /// Returns `false` without touching anything if the edge already exists.
    fn carve(&mut self, position: IVec3, face: Face) -> Result<bool> {
        if self.links.is_linked(position, face) {
            return Ok(false);
        }
        self.chunk.carve(position, face)?;
        self.links.link(position, face);
        Ok(true)
    }
}

/// Grow an unresolved layout from configuration
///
/// Dispatches to the growth strategy named by `config.mode`.
pub fn generate_layout<R: Rng + ?Sized>(config: &MazeConfig, rng: &mut R) -> Result<Layout> {
    match config.mode {
        GenerationMode::Backtracking { target_cells } => grow_backtracking(target_cells, rng),
        GenerationMode::Cascade {
            grid_x,
            grid_z,
            target_cells,
        } => grow_cascade(
            GridBounds::centered(grid_x, grid_z),
            target_cells,
            config.branching,
            rng,
        ),
    }
}
