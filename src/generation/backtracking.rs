//! Depth-first backtracking growth
//!
//! The classic recursive-backtracker maze: walk from the origin into a random
//! unvisited neighbour, carving as you go, and back up when boxed in. The
//! carved graph is always a spanning tree of the grown cells.

use glam::IVec3;
use rand::seq::SliceRandom;
use rand::Rng;

use super::Layout;
use crate::cell::ParticleCell;
use crate::error::Result;
use crate::face::Face;

/// Grow up to `target_cells` cells by depth-first backtracking
///
/// The domain is the unbounded horizontal plane through the origin. Every
/// new cell starts in the wall-default state and has exactly one face carved
/// open, toward the cell it was reached from.
///
/// Growth stops when `target_cells` cells exist or the growth stack empties.
/// On an unbounded plane the stack never empties first, but callers must
/// still treat the achieved count as authoritative.
///
/// # Arguments
///
/// * `target_cells` - Number of cells to grow (0 yields an empty layout)
/// * `rng` - Random source for the neighbour order
///
/// # Example
///
/// ```rust
/// use particle_maze::generation::grow_backtracking;
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
///
/// let mut rng = ChaCha8Rng::seed_from_u64(42);
/// let layout = grow_backtracking(30, &mut rng).unwrap();
/// assert_eq!(layout.chunk.len(), 30);
/// ```
pub fn grow_backtracking<R: Rng + ?Sized>(target_cells: usize, rng: &mut R) -> Result<Layout> {
    if target_cells == 0 {
        return Ok(Layout::default());
    }

    let mut layout = Layout::seeded(IVec3::ZERO)?;
    let mut stack = vec![IVec3::ZERO];
    let mut backtracks = 0usize;

    while let Some(&current) = stack.last() {
        if layout.chunk.len() >= target_cells {
            break;
        }

        let mut faces = Face::HORIZONTAL;
        faces.shuffle(rng);

        // The order is already random, so the first unvisited face is a random pick
        let next = faces
            .into_iter()
            .find(|face| !layout.chunk.contains(current + face.direction()));

        match next {
            Some(face) => {
                let neighbor = current + face.direction();
                layout.chunk.insert(ParticleCell::wall_default(neighbor))?;
                layout.carve(current, face)?;
                layout.collapse_order.push(neighbor);
                stack.push(neighbor);
            }
            None => {
                stack.pop();
                backtracks += 1;
            }
        }
    }

    tracing::debug!(
        "Backtracking growth: {}/{} cells, {} links, {} backtracks",
        layout.chunk.len(),
        target_cells,
        layout.links.edge_count(),
        backtracks
    );

    Ok(layout)
}
