//! Collapse and consistency resolution
//!
//! Turns a grown chunk, whose faces still hold candidate lists, into a
//! resolved chunk where every participating face holds exactly one option
//! and neighbouring cells agree on every passage between them.

use rand::Rng;

use crate::catalog;
use crate::cell::{collapse_face, ParticleCell};
use crate::chunk::ParticleChunk;
use crate::error::{MazeError, Result};
use crate::face::Face;

/// Collapse every participating face of every cell to a single option
///
/// Cells are visited in chunk order and faces in [`Face::ALL`] order, so a
/// seeded `rng` always yields the same result. Non-participating faces stay
/// empty. The chunk is consumed: after this call the resolver is its only
/// owner.
///
/// # Errors
///
/// Returns `MalformedCell` if a cell's candidate lists disagree with its
/// participation bits, and `EmptyCandidates` if a participating face has no
/// candidates. Either means growth left the cell in a broken state.
pub fn collapse_chunk<R: Rng + ?Sized>(mut chunk: ParticleChunk, rng: &mut R) -> Result<ParticleChunk> {
    for cell in chunk.cells_mut() {
        collapse_cell(cell, rng)?;
    }
    Ok(chunk)
}

fn collapse_cell<R: Rng + ?Sized>(cell: &mut ParticleCell, rng: &mut R) -> Result<()> {
    cell.validate()?;
    for face in Face::ALL {
        if !cell.participates(face) {
            continue;
        }
        let chosen = collapse_face(cell.candidates(face), rng).ok_or(MazeError::EmptyCandidates {
            position: cell.position,
            face,
        })?;
        cell.set_candidates(face, &[chosen]);
    }
    Ok(())
}

/// Make every shared face agree across neighbouring cells
///
/// Each shared face is examined once, from the cell on its negative side:
///
/// - If that cell's side is open, the neighbour's side is overwritten with
///   the same option.
/// - Otherwise, if the neighbour's side is open, the cell's side takes the
///   neighbour's option.
/// - Two walls are left alone, even when they differ.
///
/// Since every shared face has exactly one examining cell, the outcome does
/// not depend on iteration order, and a second pass changes nothing.
/// Faces that are not resolved on both sides are skipped.
///
/// Returns the number of face values overwritten.
pub fn repair_neighbors(chunk: &mut ParticleChunk) -> usize {
    let mut updates = Vec::new();

    for cell in chunk.cells() {
        for face in Face::ALL.into_iter().filter(|face| face.is_positive()) {
            let Some(neighbor) = chunk.neighbor(cell.position, face) else {
                continue;
            };
            let (Some(ours), Some(theirs)) = (
                cell.resolved_option(face),
                neighbor.resolved_option(face.opposite()),
            ) else {
                continue;
            };
            if ours == theirs {
                continue;
            }

            if catalog::is_open(ours) {
                updates.push((neighbor.position, face.opposite(), ours));
            } else if catalog::is_open(theirs) {
                updates.push((cell.position, face, theirs));
            }
        }
    }

    for &(position, face, option) in &updates {
        if let Some(cell) = chunk.get_mut(position) {
            cell.set_candidates(face, &[option]);
        }
    }

    updates.len()
}

/// Collapse a grown chunk and repair it into a consistent resolved chunk
///
/// # Errors
///
/// Propagates `EmptyCandidates` from [`collapse_chunk`].
pub fn resolve_chunk<R: Rng + ?Sized>(chunk: ParticleChunk, rng: &mut R) -> Result<ParticleChunk> {
    let mut resolved = collapse_chunk(chunk, rng)?;
    let repaired = repair_neighbors(&mut resolved);

    tracing::debug!(
        "Resolved {} cells, repair pass overwrote {} faces",
        resolved.len(),
        repaired
    );

    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{OptionId, OPEN_OPTIONS, WALL_OPTIONS};
    use glam::IVec3;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn resolved_cell(position: IVec3, faces: &[(Face, u16)]) -> ParticleCell {
        let mut options: [Vec<OptionId>; 6] = Default::default();
        for &(face, id) in faces {
            options[face.index()] = vec![OptionId(id)];
        }
        ParticleCell::from_faces(position, options).unwrap()
    }

    /// Two cells along +X, each wall-default except the shared face is carved
    fn carved_pair() -> ParticleChunk {
        let mut chunk = ParticleChunk::new();
        chunk.insert(ParticleCell::wall_default(IVec3::ZERO)).unwrap();
        chunk.insert(ParticleCell::wall_default(IVec3::X)).unwrap();
        chunk.carve(IVec3::ZERO, Face::PosX).unwrap();
        chunk
    }

    #[test]
    fn test_collapse_resolves_every_face() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let chunk = collapse_chunk(carved_pair(), &mut rng).unwrap();

        for cell in chunk.cells() {
            assert!(cell.is_resolved());
            assert_eq!(cell.face_states, Face::HORIZONTAL_MASK);
            assert!(cell.candidates(Face::PosY).is_empty());
        }
        let a = chunk.get(IVec3::ZERO).unwrap();
        assert!(OPEN_OPTIONS.contains(&a.resolved_option(Face::PosX).unwrap()));
        assert!(WALL_OPTIONS.contains(&a.resolved_option(Face::NegX).unwrap()));
    }

    #[test]
    fn test_collapse_rejects_empty_participating_face() {
        let mut cell = ParticleCell::wall_default(IVec3::ZERO);
        cell.face_options[Face::NegZ.index()].clear();
        let chunk = ParticleChunk::from_cells([cell]).unwrap();

        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let result = collapse_chunk(chunk, &mut rng);
        assert_eq!(
            result,
            Err(MazeError::MalformedCell {
                position: IVec3::ZERO,
                face: Face::NegZ,
            })
        );
    }

    #[test]
    fn test_collapse_rejects_cleared_bit_with_candidates() {
        // Candidates left on a face whose participation bit was dropped
        let mut cell = ParticleCell::wall_default(IVec3::X);
        cell.face_states &= !Face::PosX.bit();
        let chunk = ParticleChunk::from_cells([ParticleCell::wall_default(IVec3::ZERO), cell]).unwrap();

        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let result = collapse_chunk(chunk, &mut rng);
        assert_eq!(
            result,
            Err(MazeError::MalformedCell {
                position: IVec3::X,
                face: Face::PosX,
            })
        );
    }

    #[test]
    fn test_collapse_rejects_set_bit_on_vertical_face() {
        let mut cell = ParticleCell::wall_default(IVec3::ZERO);
        cell.face_states |= Face::PosY.bit();
        let chunk = ParticleChunk::from_cells([cell]).unwrap();

        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let result = collapse_chunk(chunk, &mut rng);
        assert_eq!(
            result,
            Err(MazeError::MalformedCell {
                position: IVec3::ZERO,
                face: Face::PosY,
            })
        );
    }

    #[test]
    fn test_repair_copies_open_side() {
        // Passage on the -X cell, doorway on the +X cell
        let mut chunk = ParticleChunk::from_cells([
            resolved_cell(IVec3::ZERO, &[(Face::PosX, 0)]),
            resolved_cell(IVec3::X, &[(Face::NegX, 2)]),
        ])
        .unwrap();

        assert_eq!(repair_neighbors(&mut chunk), 1);
        assert_eq!(chunk.get(IVec3::X).unwrap().resolved_option(Face::NegX), Some(OptionId(0)));
        assert_eq!(chunk.get(IVec3::ZERO).unwrap().resolved_option(Face::PosX), Some(OptionId(0)));
    }

    #[test]
    fn test_repair_open_beats_wall_from_either_side() {
        let mut chunk = ParticleChunk::from_cells([
            resolved_cell(IVec3::ZERO, &[(Face::PosZ, 3)]),
            resolved_cell(IVec3::Z, &[(Face::NegZ, 1)]),
        ])
        .unwrap();

        assert_eq!(repair_neighbors(&mut chunk), 1);
        assert_eq!(chunk.get(IVec3::ZERO).unwrap().resolved_option(Face::PosZ), Some(OptionId(1)));
    }

    #[test]
    fn test_repair_leaves_divergent_walls() {
        let mut chunk = ParticleChunk::from_cells([
            resolved_cell(IVec3::ZERO, &[(Face::PosX, 3)]),
            resolved_cell(IVec3::X, &[(Face::NegX, 5)]),
        ])
        .unwrap();

        assert_eq!(repair_neighbors(&mut chunk), 0);
        assert_eq!(chunk.get(IVec3::X).unwrap().resolved_option(Face::NegX), Some(OptionId(5)));
    }

    #[test]
    fn test_repair_is_order_independent() {
        let a = resolved_cell(IVec3::ZERO, &[(Face::PosX, 1)]);
        let b = resolved_cell(IVec3::X, &[(Face::NegX, 2)]);

        let mut forward = ParticleChunk::from_cells([a.clone(), b.clone()]).unwrap();
        let mut backward = ParticleChunk::from_cells([b, a]).unwrap();
        repair_neighbors(&mut forward);
        repair_neighbors(&mut backward);

        for position in [IVec3::ZERO, IVec3::X] {
            assert_eq!(forward.get(position), backward.get(position));
        }
    }

    #[test]
    fn test_resolve_is_symmetric_and_idempotent() {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let mut chunk = resolve_chunk(carved_pair(), &mut rng).unwrap();

        let a = chunk.get(IVec3::ZERO).unwrap().resolved_option(Face::PosX);
        let b = chunk.get(IVec3::X).unwrap().resolved_option(Face::NegX);
        assert_eq!(a, b);
        assert!(a.is_some_and(catalog::is_open));

        let before = chunk.clone();
        assert_eq!(repair_neighbors(&mut chunk), 0);
        assert_eq!(chunk, before);
    }
}
