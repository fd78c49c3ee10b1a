//! Bounded cascade growth
//!
//! Connects cells of a fixed rectangular grid in breadth-first waves from
//! the origin. Each newly connected cell pushes a random handful of outward
//! edges onto the frontier, which keeps the structure branching instead of
//! collapsing into one long corridor. Occasional loop edges give the result
//! multiple routes between cells.

use std::collections::{HashSet, VecDeque};

use glam::IVec3;
use rand::seq::SliceRandom;
use rand::Rng;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::Layout;
use crate::cell::ParticleCell;
use crate::error::{MazeError, Result};
use crate::face::Face;

/// Branching policy of the cascade
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BranchingOptions {
    /// Extra outward edges a newly connected cell may push, on top of one continuation
    ///
    /// The actual count is drawn uniformly from `0..=max_extra_branches`.
    /// At most 3 is meaningful: a cell has four horizontal faces, one of
    /// which leads back where it came from.
    pub max_extra_branches: usize,

    /// Probability that a frontier edge into an already-connected cell is carved anyway
    ///
    /// - 0.0: Never, the carved graph is a tree
    /// - 0.1: Default, a few loops
    /// - 1.0: Every such edge becomes a loop
    pub loop_chance: f64,
}

impl BranchingOptions {
    /// Check that the options are usable
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if `max_extra_branches > 3` or `loop_chance` is
    /// not within `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        if self.max_extra_branches > 3 {
            return Err(MazeError::InvalidConfig(format!(
                "max extra branches must be <= 3 (got {})",
                self.max_extra_branches
            )));
        }
        if !(0.0..=1.0).contains(&self.loop_chance) {
            return Err(MazeError::InvalidConfig(format!(
                "loop chance must be within [0, 1] (got {})",
                self.loop_chance
            )));
        }
        Ok(())
    }
}

impl Default for BranchingOptions {
    fn default() -> Self {
        Self {
            max_extra_branches: 2,
            loop_chance: 0.1,
        }
    }
}

/// Inclusive rectangular domain in the `y = 0` plane
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridBounds {
    /// Smallest x in the domain
    pub min_x: i32,
    /// Largest x in the domain
    pub max_x: i32,
    /// Smallest z in the domain
    pub min_z: i32,
    /// Largest z in the domain
    pub max_z: i32,
}

impl GridBounds {
    /// A `grid_x` by `grid_z` domain centered on the origin
    ///
    /// Odd sizes are symmetric. Even sizes put the extra row or column on
    /// the negative side, so a 4-wide grid spans `-2..=1`.
    pub fn centered(grid_x: usize, grid_z: usize) -> Self {
        let (min_x, max_x) = centered_range(grid_x);
        let (min_z, max_z) = centered_range(grid_z);
        Self {
            min_x,
            max_x,
            min_z,
            max_z,
        }
    }

    /// Check if a position lies inside the domain
    #[inline]
    pub fn contains(&self, position: IVec3) -> bool {
        position.y == 0
            && (self.min_x..=self.max_x).contains(&position.x)
            && (self.min_z..=self.max_z).contains(&position.z)
    }

    /// Number of columns along x
    pub fn width(&self) -> usize {
        span(self.min_x, self.max_x)
    }

    /// Number of rows along z
    pub fn depth(&self) -> usize {
        span(self.min_z, self.max_z)
    }

    /// Number of cells in the domain, saturating at `usize::MAX`
    pub fn capacity(&self) -> usize {
        self.width().saturating_mul(self.depth())
    }

    /// Every position in the domain, row by row along x
    pub fn positions(&self) -> impl Iterator<Item = IVec3> {
        let (min_x, max_x) = (self.min_x, self.max_x);
        (self.min_z..=self.max_z)
            .flat_map(move |z| (min_x..=max_x).map(move |x| IVec3::new(x, 0, z)))
    }
}

fn span(min: i32, max: i32) -> usize {
    let len = (i64::from(max) - i64::from(min) + 1).max(0);
    usize::try_from(len).unwrap_or(usize::MAX)
}

fn centered_range(size: usize) -> (i32, i32) {
    let size = size.min(i32::MAX as usize) as i32;
    let min = -(size / 2);
    (min, min + size - 1)
}

/// Grow up to `target_cells` connected cells inside `bounds`
///
/// # Algorithm
///
/// 1. Create every cell of the domain in the wall-default state
/// 2. Connect the origin and push all of its in-domain faces, in random order
/// 3. Pop frontier edges in FIFO order. An edge into an unconnected cell
///    connects it, records it in the collapse order, and pushes one plus
///    `0..=max_extra_branches` random outward edges from it. An edge into a
///    connected cell is carved as a loop with probability `loop_chance`.
/// 4. If the frontier dies before the target, sweep the connected cells in
///    collapse order and connect their unconnected neighbours
/// 5. Drop every domain cell that never got connected
///
/// The target is clamped to the domain capacity, and an origin outside the
/// domain (an empty grid) yields an empty layout.
///
/// # Errors
///
/// Returns `InvalidConfig` if `branching` fails validation.
///
/// # Example
///
/// ```rust
/// use particle_maze::generation::{grow_cascade, BranchingOptions, GridBounds};
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
///
/// let mut rng = ChaCha8Rng::seed_from_u64(42);
/// let bounds = GridBounds::centered(7, 7);
/// let layout = grow_cascade(bounds, 30, BranchingOptions::default(), &mut rng).unwrap();
/// assert_eq!(layout.chunk.len(), 30);
/// ```
pub fn grow_cascade<R: Rng + ?Sized>(
    bounds: GridBounds,
    target_cells: usize,
    branching: BranchingOptions,
    rng: &mut R,
) -> Result<Layout> {
    branching.validate()?;

    let origin = IVec3::ZERO;
    let target_cells = target_cells.min(bounds.capacity());
    if target_cells == 0 || !bounds.contains(origin) {
        return Ok(Layout::default());
    }

    let mut layout = Layout::default();
    for position in bounds.positions() {
        layout.chunk.insert(ParticleCell::wall_default(position))?;
    }

    let mut connected = HashSet::with_capacity(target_cells);
    connected.insert(origin);
    layout.collapse_order.push(origin);

    let mut frontier: VecDeque<(IVec3, Face)> = VecDeque::new();
    let mut faces = Face::HORIZONTAL;
    faces.shuffle(rng);
    for face in faces {
        if bounds.contains(origin + face.direction()) {
            frontier.push_back((origin, face));
        }
    }

    let mut loops = 0usize;
    while connected.len() < target_cells {
        let Some((source, face)) = frontier.pop_front() else {
            break;
        };
        let neighbor = source + face.direction();

        if connected.contains(&neighbor) {
            if branching.loop_chance > 0.0
                && rng.gen_bool(branching.loop_chance)
                && layout.carve(source, face)?
            {
                loops += 1;
            }
            continue;
        }

        layout.carve(source, face)?;
        connected.insert(neighbor);
        layout.collapse_order.push(neighbor);

        let arrival = face.opposite();
        let mut outward: Vec<Face> = Face::HORIZONTAL
            .into_iter()
            .filter(|&f| f != arrival)
            .filter(|&f| {
                let next = neighbor + f.direction();
                bounds.contains(next) && !connected.contains(&next)
            })
            .collect();
        outward.shuffle(rng);

        let branches = 1 + rng.gen_range(0..=branching.max_extra_branches);
        for f in outward.into_iter().take(branches) {
            frontier.push_back((neighbor, f));
        }
    }

    // Fill pass for corners the random branching never reached
    let mut filled = 0usize;
    let mut sweep = 0;
    while connected.len() < target_cells && sweep < layout.collapse_order.len() {
        let source = layout.collapse_order[sweep];
        for face in Face::HORIZONTAL {
            if connected.len() >= target_cells {
                break;
            }
            let neighbor = source + face.direction();
            if bounds.contains(neighbor) && !connected.contains(&neighbor) {
                layout.carve(source, face)?;
                connected.insert(neighbor);
                layout.collapse_order.push(neighbor);
                filled += 1;
            }
        }
        sweep += 1;
    }

    layout.chunk.retain(|cell| connected.contains(&cell.position));

    tracing::debug!(
        "Cascade growth: {}/{} cells in {}x{} grid, {} links ({} loops), {} filled",
        layout.chunk.len(),
        target_cells,
        bounds.width(),
        bounds.depth(),
        layout.links.edge_count(),
        loops,
        filled
    );

    Ok(layout)
}
