//! Adjacency record of carved passages

use glam::IVec3;
use indexmap::IndexMap;

use crate::face::Face;

/// Carved edges between cells, stored as a face mask per cell
///
/// Every edge is recorded from both ends, so `is_linked(a, f)` holds exactly
/// when `is_linked(a + f.direction(), f.opposite())` does. A given ordered
/// pair is recorded at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Links {
    masks: IndexMap<IVec3, u8>,
    edge_count: usize,
}

impl Links {
    /// Create an empty adjacency record
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an edge from `position` through `face`, in both directions
    ///
    /// Returns `false` if the edge already existed.
    pub fn link(&mut self, position: IVec3, face: Face) -> bool {
        if self.is_linked(position, face) {
            return false;
        }

        *self.masks.entry(position).or_default() |= face.bit();
        *self.masks.entry(position + face.direction()).or_default() |= face.opposite().bit();
        self.edge_count += 1;
        true
    }

    /// Check if an edge leaves `position` through `face`
    #[inline]
    pub fn is_linked(&self, position: IVec3, face: Face) -> bool {
        self.masks
            .get(&position)
            .is_some_and(|mask| mask & face.bit() != 0)
    }

    /// Faces of `position` with a recorded edge, in face order
    pub fn linked_faces(&self, position: IVec3) -> impl Iterator<Item = Face> {
        let mask = self.masks.get(&position).copied().unwrap_or(0);
        Face::ALL.into_iter().filter(move |face| mask & face.bit() != 0)
    }

    /// Positions linked to `position`, in face order
    pub fn neighbors(&self, position: IVec3) -> impl Iterator<Item = IVec3> {
        self.linked_faces(position)
            .map(move |face| position + face.direction())
    }

    /// Number of edges leaving `position`
    #[inline]
    pub fn degree(&self, position: IVec3) -> usize {
        self.masks
            .get(&position)
            .map_or(0, |mask| mask.count_ones() as usize)
    }

    /// Number of undirected edges
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_is_recorded_both_ways() {
        let mut links = Links::new();
        assert!(links.link(IVec3::ZERO, Face::PosX));

        assert!(links.is_linked(IVec3::ZERO, Face::PosX));
        assert!(links.is_linked(IVec3::X, Face::NegX));
        assert!(!links.is_linked(IVec3::ZERO, Face::NegX));
        assert_eq!(links.edge_count(), 1);
    }

    #[test]
    fn test_duplicate_link_is_ignored() {
        let mut links = Links::new();
        assert!(links.link(IVec3::ZERO, Face::PosZ));
        assert!(!links.link(IVec3::ZERO, Face::PosZ));
        // Same edge seen from the other end
        assert!(!links.link(IVec3::Z, Face::NegZ));
        assert_eq!(links.edge_count(), 1);
        assert_eq!(links.degree(IVec3::ZERO), 1);
    }

    #[test]
    fn test_neighbors_in_face_order() {
        let mut links = Links::new();
        links.link(IVec3::ZERO, Face::NegZ);
        links.link(IVec3::ZERO, Face::PosX);
        links.link(IVec3::ZERO, Face::NegX);

        let neighbors: Vec<IVec3> = links.neighbors(IVec3::ZERO).collect();
        assert_eq!(neighbors, vec![IVec3::X, IVec3::NEG_X, IVec3::NEG_Z]);
        assert_eq!(links.degree(IVec3::ZERO), 3);
        assert_eq!(links.degree(IVec3::ONE), 0);
    }
}
