//! Particle-cell maze generation
//!
//! A standalone library that grows a connected grid of unit cells, resolves
//! every cell face to a single structural option (a passage or a wall), and
//! answers path queries over the result. Geometry and rendering are left to
//! the caller: the output is a plain collection of resolved cells.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use particle_maze::*;
//!
//! // Generate a maze
//! let config = MazeConfigBuilder::new()
//!     .seed(42)
//!     .cascade(9, 9, 40)
//!     .build().unwrap();
//!
//! let maze = ParticleMaze::generate(config).unwrap();
//!
//! // Reveal cells in the order they were connected
//! for position in maze.collapse_order() {
//!     let cell = maze.get_cell(*position).unwrap();
//!     println!("{} open faces: {:?}", position,
//!         Face::HORIZONTAL.iter().filter(|f| cell.is_open(**f)).collect::<Vec<_>>());
//! }
//!
//! // Route across it
//! let goal = *maze.collapse_order().last().unwrap();
//! println!("{:?}", maze.find_path(IVec3::ZERO, goal));
//! ```
//!
//! # Pipeline
//!
//! 1. [`generation`] grows wall-default cells and carves passages
//! 2. [`resolve`] collapses each face to one option and makes neighbours agree
//! 3. [`pathfinding`] searches the resolved passages
//!
//! # Features
//!
//! - `serde`: Enables serialization support for configuration, cells and chunks

// Modules
pub mod error;
pub mod config;
pub mod face;
pub mod catalog;
pub mod cell;
pub mod chunk;
pub mod generation;
pub mod resolve;
pub mod pathfinding;
pub mod maze;

// Re-export core types for convenience
pub use error::{MazeError, Result};
pub use config::{MazeConfig, MazeConfigBuilder, GenerationMode};
pub use face::Face;
pub use catalog::{OptionId, OptionInfo, OptionKind};
pub use cell::{collapse_face, resolved_option, ParticleCell};
pub use chunk::ParticleChunk;
pub use generation::{BranchingOptions, GridBounds, Layout, Links};
pub use resolve::{collapse_chunk, repair_neighbors, resolve_chunk};
pub use pathfinding::{find_path, reachable_from};
pub use maze::{topology, ParticleMaze, TopologyStats};

// Re-export glam::IVec3 for convenience
pub use glam::IVec3;
