//! Demonstration of ParticleMaze generation and usage

use particle_maze::*;

/// Plan view of the maze: `#` walls, `.` cells, `*` path cells
fn render(maze: &ParticleMaze, path: &[IVec3]) -> String {
    let positions: Vec<IVec3> = maze.chunk().positions().collect();
    let (Some(min), Some(max)) = (
        positions.iter().copied().reduce(IVec3::min),
        positions.iter().copied().reduce(IVec3::max),
    ) else {
        return String::new();
    };

    let width = (max.x - min.x + 1) as usize * 2 + 1;
    let depth = (max.z - min.z + 1) as usize * 2 + 1;
    let mut grid = vec![vec!['#'; width]; depth];

    for cell in maze.chunk().cells() {
        let col = (cell.position.x - min.x) as usize * 2 + 1;
        let row = (cell.position.z - min.z) as usize * 2 + 1;
        grid[row][col] = if path.contains(&cell.position) { '*' } else { '.' };

        if cell.is_open(Face::PosX) {
            grid[row][col + 1] = ' ';
        }
        if cell.is_open(Face::PosZ) {
            grid[row + 1][col] = ' ';
        }
    }

    grid.into_iter()
        .map(|row| row.into_iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

fn main() -> Result<()> {
    for config in [
        MazeConfigBuilder::new().seed(42).backtracking(40).build()?,
        MazeConfigBuilder::new().seed(42).cascade(9, 9, 60).build()?,
    ] {
        println!("Generating {} maze...", config.mode.name());
        let maze = ParticleMaze::generate(config)?;

        println!("Generated {}/{} cells", maze.cell_count(), config.target_cells());

        let stats = maze.topology();
        println!(
            "Open edges: {}, dead ends: {}, loops: {}",
            stats.open_edges, stats.dead_ends, stats.independent_cycles
        );

        // Path from the origin to the last cell that was connected
        let goal = maze.collapse_order().last().copied().unwrap_or(IVec3::ZERO);
        let path = maze.find_path(IVec3::ZERO, goal).unwrap_or_default();
        println!("Path {} -> {}: {} cells", IVec3::ZERO, goal, path.len());

        // Option usage across all resolved faces
        let mut counts = std::collections::BTreeMap::new();
        for cell in maze.chunk().cells() {
            for face in Face::HORIZONTAL {
                if let Some(info) = cell.resolved_option(face).and_then(catalog::option_info) {
                    *counts.entry(info.name).or_insert(0usize) += 1;
                }
            }
        }
        println!("Face options:");
        for (name, count) in &counts {
            println!("  {}: {}", name, count);
        }

        println!("\n{}\n", render(&maze, &path));
    }

    Ok(())
}
