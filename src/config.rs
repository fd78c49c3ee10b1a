//! Maze Configuration and Builder
//!
//! This module provides configuration types for deterministic maze generation.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{MazeError, Result};
use crate::generation::BranchingOptions;

/// How the connected cell graph is grown
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationMode {
    /// Depth-first growth with backtracking over an unbounded plane
    ///
    /// Produces a tree (a "perfect" maze) of at most `target_cells` cells.
    Backtracking {
        /// Number of cells to grow
        target_cells: usize,
    },
    /// Breadth-first cascade over a bounded grid centered at the origin
    ///
    /// Produces an open structure that may contain loops.
    Cascade {
        /// Grid width along X
        grid_x: usize,
        /// Grid depth along Z
        grid_z: usize,
        /// Number of cells to connect (at most `grid_x * grid_z`)
        target_cells: usize,
    },
}

impl GenerationMode {
    /// Number of cells the generator aims for
    ///
    /// The achieved count may be lower; see [`crate::ParticleMaze::cell_count`].
    pub fn target_cells(self) -> usize {
        match self {
            GenerationMode::Backtracking { target_cells } => target_cells,
            GenerationMode::Cascade { target_cells, .. } => target_cells,
        }
    }

    /// Number of cells the domain can hold, `None` if unbounded
    pub fn capacity(self) -> Option<usize> {
        match self {
            GenerationMode::Backtracking { .. } => None,
            GenerationMode::Cascade { grid_x, grid_z, .. } => grid_x.checked_mul(grid_z),
        }
    }

    /// Get a human-readable name for this mode
    pub fn name(self) -> &'static str {
        match self {
            GenerationMode::Backtracking { .. } => "Backtracking",
            GenerationMode::Cascade { .. } => "Cascade",
        }
    }

    fn validate(self) -> Result<()> {
        if self.target_cells() == 0 {
            return Err(MazeError::InvalidConfig(
                "target cell count must be at least 1".to_string(),
            ));
        }

        if let GenerationMode::Cascade { grid_x, grid_z, target_cells } = self {
            if grid_x == 0 || grid_z == 0 {
                return Err(MazeError::InvalidConfig(format!(
                    "grid dimensions must be positive (got {}x{})",
                    grid_x, grid_z
                )));
            }
            if grid_x > i32::MAX as usize || grid_z > i32::MAX as usize {
                return Err(MazeError::InvalidConfig(format!(
                    "grid dimensions too large (got {}x{})",
                    grid_x, grid_z
                )));
            }
            let capacity = self.capacity().ok_or_else(|| {
                MazeError::InvalidConfig(format!("grid {}x{} overflows", grid_x, grid_z))
            })?;
            if target_cells > capacity {
                return Err(MazeError::InvalidConfig(format!(
                    "target of {} cells exceeds {}x{} grid capacity of {}",
                    target_cells, grid_x, grid_z, capacity
                )));
            }
        }

        Ok(())
    }
}

impl Default for GenerationMode {
    fn default() -> Self {
        GenerationMode::Cascade {
            grid_x: 9,
            grid_z: 9,
            target_cells: 40,
        }
    }
}

/// Configuration for deterministic maze generation
///
/// The same configuration always produces the identical maze: the same
/// cells, the same resolved faces, and the same collapse order.
///
/// # Example
///
/// ```rust
/// use particle_maze::*;
///
/// let config = MazeConfigBuilder::new()
///     .seed(42)
///     .backtracking(30)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.mode.target_cells(), 30);
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MazeConfig {
    /// Random seed for growth and collapse
    pub seed: u64,

    /// Growth mode and its target size
    pub mode: GenerationMode,

    /// Branching policy of the cascade mode (ignored by backtracking)
    pub branching: BranchingOptions,
}

impl MazeConfig {
    /// Get the target cell count for this configuration
    #[inline]
    pub fn target_cells(&self) -> usize {
        self.mode.target_cells()
    }
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            seed: rand::random(),
            mode: GenerationMode::default(),
            branching: BranchingOptions::default(),
        }
    }
}

/// Builder for creating MazeConfig with validation
///
/// # Example
///
/// ```rust
/// use particle_maze::*;
///
/// let config = MazeConfigBuilder::new()
///     .seed(12345)
///     .cascade(7, 7, 30)
///     .max_extra_branches(1)
///     .loop_chance(0.25)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.mode.capacity(), Some(49));
/// ```
#[derive(Debug, Clone)]
pub struct MazeConfigBuilder {
    seed: Option<u64>,
    mode: GenerationMode,
    branching: BranchingOptions,
}

impl MazeConfigBuilder {
    /// Create a new builder with default values
    ///
    /// Defaults:
    /// - seed: Random (drawn when `build` is called)
    /// - mode: Cascade over a 9x9 grid targeting 40 cells
    /// - max_extra_branches: 2
    /// - loop_chance: 0.1
    pub fn new() -> Self {
        Self {
            seed: None,
            mode: GenerationMode::default(),
            branching: BranchingOptions::default(),
        }
    }

    /// Set the random seed
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the generation mode directly
    pub fn mode(mut self, mode: GenerationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Grow by backtracking until `target_cells` cells exist
    pub fn backtracking(self, target_cells: usize) -> Self {
        self.mode(GenerationMode::Backtracking { target_cells })
    }

    /// Grow by cascade over a `grid_x` by `grid_z` grid
    pub fn cascade(self, grid_x: usize, grid_z: usize, target_cells: usize) -> Self {
        self.mode(GenerationMode::Cascade {
            grid_x,
            grid_z,
            target_cells,
        })
    }

    /// Set the upper bound of extra frontier edges per connected cell
    pub fn max_extra_branches(mut self, branches: usize) -> Self {
        self.branching.max_extra_branches = branches;
        self
    }

    /// Set the probability of carving a loop into an already-connected cell
    pub fn loop_chance(mut self, chance: f64) -> Self {
        self.branching.loop_chance = chance;
        self
    }

    /// Build the configuration
    ///
    /// If no seed was provided, a random one is drawn and stored in the
    /// config so the maze can be regenerated.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if:
    /// - the target cell count is zero
    /// - a cascade grid dimension is zero, or the target exceeds its capacity
    /// - `max_extra_branches` is above 3
    /// - `loop_chance` is outside `[0, 1]`
    pub fn build(self) -> Result<MazeConfig> {
        self.mode.validate()?;
        self.branching.validate()?;

        Ok(MazeConfig {
            seed: self.seed.unwrap_or_else(|| rand::random()),
            mode: self.mode,
            branching: self.branching,
        })
    }
}

impl Default for MazeConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
