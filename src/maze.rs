//! ParticleMaze main structure

use glam::IVec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::HashSet;

use crate::catalog::OptionId;
use crate::cell::ParticleCell;
use crate::chunk::ParticleChunk;
use crate::config::MazeConfig;
use crate::error::Result;
use crate::face::Face;
use crate::generation::{generate_layout, Links};
use crate::pathfinding;
use crate::resolve::resolve_chunk;

/// Shape summary of a resolved maze
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TopologyStats {
    /// Number of cells
    pub cells: usize,
    /// Number of open shared faces (undirected)
    pub open_edges: usize,
    /// Cells with exactly one open neighbour
    pub dead_ends: usize,
    /// Number of connected components
    pub components: usize,
    /// Cyclomatic number: how many edges could be removed without disconnecting anything
    ///
    /// Zero means the maze is a forest (a tree when `components == 1`).
    pub independent_cycles: usize,
}

/// A fully generated and resolved maze
///
/// Holds the resolved chunk, the order in which cells were connected during
/// growth (for staged reveal), and the carved adjacency. After generation the
/// maze is read-only.
///
/// # Examples
///
/// ```
/// use particle_maze::*;
///
/// let config = MazeConfigBuilder::new()
///     .seed(42)
///     .cascade(7, 7, 30)
///     .build()
///     .unwrap();
///
/// let maze = ParticleMaze::generate(config).unwrap();
/// println!("Generated {} cells", maze.cell_count());
///
/// // Decide per face whether to draw a wall
/// if let Some(cell) = maze.get_cell(IVec3::ZERO) {
///     for face in Face::HORIZONTAL {
///         let open = cell.is_open(face);
///         println!("{:?}: {}", face, if open { "open" } else { "wall" });
///     }
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ParticleMaze {
    /// Configuration used to generate this maze
    config: MazeConfig,

    /// Resolved cells
    chunk: ParticleChunk,

    /// Positions in the order they became connected, origin first
    collapse_order: Vec<IVec3>,

    /// Edges carved during growth
    links: Links,
}

impl ParticleMaze {
    /// Generate a maze from configuration
    ///
    /// Uses a ChaCha8 generator seeded from `config.seed`, so the same
    /// configuration always produces the same maze.
    ///
    /// # Example
    ///
    /// ```
    /// use particle_maze::*;
    ///
    /// let config = MazeConfigBuilder::new().seed(1).backtracking(40).build().unwrap();
    /// let a = ParticleMaze::generate(config).unwrap();
    /// let b = ParticleMaze::generate(config).unwrap();
    /// assert_eq!(a.chunk(), b.chunk());
    /// assert_eq!(a.collapse_order(), b.collapse_order());
    /// ```
    pub fn generate(config: MazeConfig) -> Result<Self> {
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        Self::generate_with_rng(config, &mut rng)
    }

    /// Generate a maze drawing from a caller-supplied random source
    ///
    /// `config.seed` is kept for reference but not used.
    pub fn generate_with_rng<R: Rng + ?Sized>(config: MazeConfig, rng: &mut R) -> Result<Self> {
        // Grow, then hand the chunk over to the resolver
        let layout = generate_layout(&config, rng)?;
        let chunk = resolve_chunk(layout.chunk, rng)?;

        tracing::info!(
            "Generated {} maze: {}/{} cells, {} links (seed {})",
            config.mode.name(),
            chunk.len(),
            config.target_cells(),
            layout.links.edge_count(),
            config.seed
        );

        Ok(Self {
            config,
            chunk,
            collapse_order: layout.collapse_order,
            links: layout.links,
        })
    }

    /// Get the configuration used to generate this maze
    #[inline]
    pub fn config(&self) -> &MazeConfig {
        &self.config
    }

    /// Get the number of cells actually grown
    ///
    /// This may be lower than the configured target.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.chunk.len()
    }

    /// Get the resolved chunk
    #[inline]
    pub fn chunk(&self) -> &ParticleChunk {
        &self.chunk
    }

    /// Get the positions in the order they became connected
    #[inline]
    pub fn collapse_order(&self) -> &[IVec3] {
        &self.collapse_order
    }

    /// Get the edges carved during growth
    #[inline]
    pub fn links(&self) -> &Links {
        &self.links
    }

    /// Get a cell by position
    #[inline]
    pub fn get_cell(&self, position: IVec3) -> Option<&ParticleCell> {
        self.chunk.get(position)
    }

    /// Resolved option of a cell face
    ///
    /// Returns `None` if the cell is missing or the face takes no part in
    /// any relationship.
    pub fn resolved_option(&self, position: IVec3, face: Face) -> Option<OptionId> {
        self.chunk.get(position)?.resolved_option(face)
    }

    /// Find the shortest open path between two positions
    ///
    /// See [`pathfinding::find_path`].
    pub fn find_path(&self, start: IVec3, goal: IVec3) -> Option<Vec<IVec3>> {
        pathfinding::find_path(&self.chunk, start, goal)
    }

    /// Find positions within a given number of open moves from a cell
    ///
    /// See [`pathfinding::cells_within_steps`].
    pub fn find_cells_within_steps(&self, start: IVec3, steps: usize) -> Vec<IVec3> {
        pathfinding::cells_within_steps(&self.chunk, start, steps)
    }

    /// Split into the resolved chunk and the collapse order
    pub fn into_parts(self) -> (ParticleChunk, Vec<IVec3>) {
        (self.chunk, self.collapse_order)
    }

    /// Summarize the shape of the open passage graph
    pub fn topology(&self) -> TopologyStats {
        topology(&self.chunk)
    }
}

/// Summarize the open passage graph of a resolved chunk
pub fn topology(chunk: &ParticleChunk) -> TopologyStats {
    let mut stats = TopologyStats {
        cells: chunk.len(),
        ..Default::default()
    };

    for position in chunk.positions() {
        let degree = pathfinding::open_neighbors(chunk, position).count();
        stats.open_edges += degree;
        if degree == 1 {
            stats.dead_ends += 1;
        }
    }
    stats.open_edges /= 2;

    let mut seen = HashSet::new();
    for position in chunk.positions() {
        if seen.contains(&position) {
            continue;
        }
        stats.components += 1;
        seen.extend(pathfinding::reachable_from(chunk, position));
    }

    stats.independent_cycles = (stats.open_edges + stats.components).saturating_sub(stats.cells);
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::config::MazeConfigBuilder;
    use proptest::prelude::*;

    fn backtracking(seed: u64, target: usize) -> ParticleMaze {
        let config = MazeConfigBuilder::new()
            .seed(seed)
            .backtracking(target)
            .build()
            .unwrap();
        ParticleMaze::generate(config).unwrap()
    }

    fn cascade(seed: u64, grid_x: usize, grid_z: usize, target: usize) -> ParticleMaze {
        let config = MazeConfigBuilder::new()
            .seed(seed)
            .cascade(grid_x, grid_z, target)
            .build()
            .unwrap();
        ParticleMaze::generate(config).unwrap()
    }

    /// Every open face is matched by the identical option on the other side
    fn assert_symmetric(chunk: &ParticleChunk) {
        for cell in chunk.cells() {
            for face in Face::ALL {
                let Some(option) = cell.resolved_option(face) else {
                    continue;
                };
                if !catalog::is_open(option) {
                    continue;
                }
                let neighbor = chunk.neighbor(cell.position, face);
                if let Some(neighbor) = neighbor {
                    assert_eq!(
                        neighbor.resolved_option(face.opposite()),
                        Some(option),
                        "asymmetric face between {} and {}",
                        cell.position,
                        neighbor.position
                    );
                }
            }
        }
    }

    #[test]
    fn test_maze_generation() {
        let maze = backtracking(42, 40);

        assert_eq!(maze.cell_count(), 40);
        assert_eq!(maze.collapse_order().len(), 40);
        assert_eq!(maze.collapse_order()[0], IVec3::ZERO);
        assert!(maze.chunk().cells().all(|cell| cell.is_resolved()));
    }

    #[test]
    fn test_get_cell_and_resolved_option() {
        let maze = cascade(42, 5, 5, 12);

        assert!(maze.get_cell(IVec3::ZERO).is_some());
        assert!(maze.get_cell(IVec3::new(10, 0, 10)).is_none());

        for face in Face::HORIZONTAL {
            assert!(maze.resolved_option(IVec3::ZERO, face).is_some());
        }
        assert_eq!(maze.resolved_option(IVec3::ZERO, Face::PosY), None);
        assert_eq!(maze.resolved_option(IVec3::new(10, 0, 10), Face::PosX), None);
    }

    #[test]
    fn test_carved_edges_resolve_open() {
        let maze = cascade(17, 9, 9, 50);
        for cell in maze.chunk().cells() {
            for face in Face::HORIZONTAL {
                let carved = maze.links().is_linked(cell.position, face);
                assert_eq!(cell.is_open(face), carved);
            }
        }
    }

    #[test]
    fn test_backtracking_is_a_tree() {
        let stats = backtracking(5, 45).topology();
        assert_eq!(stats.cells, 45);
        assert_eq!(stats.components, 1);
        assert_eq!(stats.open_edges, 44);
        assert_eq!(stats.independent_cycles, 0);
        assert!(stats.dead_ends >= 1);
    }

    #[test]
    fn test_cascade_can_form_loops() {
        let config = MazeConfigBuilder::new()
            .seed(8)
            .cascade(9, 9, 81)
            .max_extra_branches(3)
            .loop_chance(1.0)
            .build()
            .unwrap();
        let stats = ParticleMaze::generate(config).unwrap().topology();
        assert_eq!(stats.components, 1);
        assert!(stats.independent_cycles > 0);
    }

    #[test]
    fn test_find_path_to_last_connected_cell() {
        let maze = cascade(11, 7, 7, 30);
        let goal = *maze.collapse_order().last().unwrap();

        let path = maze.find_path(IVec3::ZERO, goal).unwrap();
        assert_eq!(path[0], IVec3::ZERO);
        assert_eq!(*path.last().unwrap(), goal);
        for step in path.windows(2) {
            let delta = step[1] - step[0];
            assert_eq!(delta.abs().element_sum(), 1, "path steps must be adjacent");
        }
    }

    #[test]
    fn test_find_cells_within_steps() {
        let maze = backtracking(3, 30);
        assert_eq!(maze.find_cells_within_steps(IVec3::ZERO, 0), vec![IVec3::ZERO]);
        let near = maze.find_cells_within_steps(IVec3::ZERO, 1);
        assert_eq!(near.len(), 1 + maze.links().degree(IVec3::ZERO));
        assert_eq!(maze.find_cells_within_steps(IVec3::ZERO, usize::MAX).len(), 30);
    }

    #[test]
    fn test_into_parts() {
        let maze = backtracking(1, 10);
        let expected_order = maze.collapse_order().to_vec();
        let (chunk, order) = maze.into_parts();
        assert_eq!(chunk.len(), 10);
        assert_eq!(order, expected_order);
    }

    #[test]
    fn test_topology_of_empty_chunk() {
        assert_eq!(topology(&ParticleChunk::new()), TopologyStats::default());
    }

    #[test]
    fn test_topology_of_detached_chunk() {
        let (chunk, _) = backtracking(8, 25).into_parts();
        let stats = crate::topology(&chunk);
        assert_eq!(stats.cells, 25);
        assert_eq!(stats.components, 1);
        assert_eq!(stats.open_edges, 24);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_chunk_serialization() {
        let maze = cascade(4, 5, 5, 15);
        let json = serde_json::to_string(maze.chunk()).unwrap();
        let restored: ParticleChunk = serde_json::from_str(&json).unwrap();
        assert_eq!(&restored, maze.chunk());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        #[test]
        fn backtracking_is_connected_and_symmetric(seed in any::<u64>(), target in 1usize..60) {
            let maze = backtracking(seed, target);
            prop_assert!(maze.cell_count() <= target);
            prop_assert_eq!(
                pathfinding::reachable_from(maze.chunk(), IVec3::ZERO).len(),
                maze.cell_count()
            );
            assert_symmetric(maze.chunk());
        }

        #[test]
        fn cascade_is_bounded_connected_and_symmetric(
            seed in any::<u64>(),
            grid_x in 1usize..10,
            grid_z in 1usize..10,
            fill in 0.0f64..=1.0,
        ) {
            let capacity = grid_x * grid_z;
            let target = ((capacity as f64 * fill).ceil() as usize).clamp(1, capacity);
            let maze = cascade(seed, grid_x, grid_z, target);

            prop_assert!(maze.cell_count() <= capacity);
            prop_assert_eq!(maze.cell_count(), target);
            prop_assert_eq!(
                pathfinding::reachable_from(maze.chunk(), IVec3::ZERO).len(),
                maze.cell_count()
            );
            assert_symmetric(maze.chunk());
        }

        #[test]
        fn no_isolated_cells(seed in any::<u64>(), target in 2usize..40) {
            for maze in [backtracking(seed, target), cascade(seed, 7, 7, target)] {
                prop_assert!(maze.cell_count() >= 2);
                for cell in maze.chunk().cells() {
                    let any_open = Face::ALL.iter().any(|&face| cell.is_open(face));
                    prop_assert!(
                        any_open,
                        "{} cell {} has no open face",
                        maze.config().mode.name(),
                        cell.position
                    );
                }
            }
        }

        #[test]
        fn generation_is_deterministic(seed in any::<u64>()) {
            let a = cascade(seed, 6, 6, 24);
            let b = cascade(seed, 6, 6, 24);
            prop_assert_eq!(a.chunk(), b.chunk());
            prop_assert_eq!(a.collapse_order(), b.collapse_order());

            let a = backtracking(seed, 24);
            let b = backtracking(seed, 24);
            prop_assert_eq!(a.chunk(), b.chunk());
            prop_assert_eq!(a.collapse_order(), b.collapse_order());
        }

        #[test]
        fn repair_reaches_fixed_point(seed in any::<u64>()) {
            let maze = cascade(seed, 8, 8, 40);
            let mut chunk = maze.chunk().clone();
            prop_assert_eq!(crate::resolve::repair_neighbors(&mut chunk), 0);
            prop_assert_eq!(&chunk, maze.chunk());
        }
    }
}
