//! Breadth-first search over resolved passages
//!
//! Two resolved cells are connected when they are adjacent and the face
//! between them is open on at least one side. After the repair pass both
//! sides agree, so either side can be checked.

use std::collections::{HashMap, HashSet, VecDeque};

use glam::IVec3;

use crate::chunk::ParticleChunk;
use crate::face::Face;

/// Positions reachable in one step from `position`, in [`Face::ALL`] order
///
/// Returns nothing if `position` is not in the chunk.
pub fn open_neighbors(chunk: &ParticleChunk, position: IVec3) -> impl Iterator<Item = IVec3> + '_ {
    let cell = chunk.get(position);
    Face::ALL.into_iter().filter_map(move |face| {
        let cell = cell?;
        let neighbor = chunk.neighbor(position, face)?;
        let open = cell.is_open(face) || neighbor.is_open(face.opposite());
        open.then_some(neighbor.position)
    })
}

/// Find the shortest open path between two cells
///
/// Returns the positions along the path, `start` and `goal` included, or
/// `None` if either position is missing or `goal` cannot be reached.
/// Among equally short paths, the one found first when expanding
/// neighbours in [`Face::ALL`] order wins.
///
/// # Example
///
/// ```rust
/// use particle_maze::*;
///
/// let config = MazeConfigBuilder::new().seed(7).backtracking(20).build().unwrap();
/// let maze = ParticleMaze::generate(config).unwrap();
///
/// let goal = *maze.collapse_order().last().unwrap();
/// let path = find_path(maze.chunk(), IVec3::ZERO, goal).unwrap();
/// assert_eq!(path.first(), Some(&IVec3::ZERO));
/// assert_eq!(path.last(), Some(&goal));
/// ```
pub fn find_path(chunk: &ParticleChunk, start: IVec3, goal: IVec3) -> Option<Vec<IVec3>> {
    if !chunk.contains(start) || !chunk.contains(goal) {
        return None;
    }
    if start == goal {
        return Some(vec![start]);
    }

    let mut parents: HashMap<IVec3, IVec3> = HashMap::new();
    let mut visited = HashSet::new();
    let mut queue = VecDeque::new();
    visited.insert(start);
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        for next in open_neighbors(chunk, current) {
            if !visited.insert(next) {
                continue;
            }
            parents.insert(next, current);

            if next == goal {
                let mut path = vec![goal];
                let mut step = goal;
                while let Some(&parent) = parents.get(&step) {
                    path.push(parent);
                    step = parent;
                }
                path.reverse();
                return Some(path);
            }

            queue.push_back(next);
        }
    }

    None
}

/// Every position reachable from `start` through open faces, in BFS order
///
/// Includes `start` itself. Returns an empty vec if `start` is missing.
pub fn reachable_from(chunk: &ParticleChunk, start: IVec3) -> Vec<IVec3> {
    cells_within_steps(chunk, start, usize::MAX)
}

/// Positions reachable from `start` in at most `steps` open moves, in BFS order
///
/// `steps = 0` yields just `start`.
pub fn cells_within_steps(chunk: &ParticleChunk, start: IVec3, steps: usize) -> Vec<IVec3> {
    if !chunk.contains(start) {
        return vec![];
    }

    let mut visited = HashSet::new();
    let mut order = vec![start];
    let mut current = vec![start];
    visited.insert(start);

    // BFS with step limit
    for _ in 0..steps {
        let mut next = Vec::new();
        for &position in &current {
            for neighbor in open_neighbors(chunk, position) {
                if visited.insert(neighbor) {
                    next.push(neighbor);
                }
            }
        }
        if next.is_empty() {
            break;
        }
        order.extend_from_slice(&next);
        current = next;
    }

    order
}
