//! Face option catalog
//!
//! Every face of a cell eventually resolves to one option from this table.
//! Options are either open (a passage of some kind) or wall (a barrier of
//! some kind). The table is static and never mutated.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Opaque identifier of a face treatment
///
/// Ids are stable, but their numeric values carry no meaning beyond the
/// catalog entry they name.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OptionId(pub u16);

/// Structural class of an option
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionKind {
    /// Traversable passage
    Open,
    /// Barrier
    Wall,
}

/// Catalog entry describing one option
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionInfo {
    /// Identifier of this option
    pub id: OptionId,
    /// Display name for tooling and debug output
    pub name: &'static str,
    /// Open or wall
    pub kind: OptionKind,
    /// Reduced-height wall (only meaningful for walls)
    pub half_height: bool,
    /// Light and sight pass through (windows, arches)
    pub transparent: bool,
}

impl OptionInfo {
    const fn new(
        id: u16,
        name: &'static str,
        kind: OptionKind,
        half_height: bool,
        transparent: bool,
    ) -> Self {
        Self {
            id: OptionId(id),
            name,
            kind,
            half_height,
            transparent,
        }
    }

    /// Check if this option is a passage
    #[inline]
    pub fn is_open(&self) -> bool {
        self.kind == OptionKind::Open
    }
}

/// The full option registry, indexed by id
pub static CATALOG: [OptionInfo; 6] = [
    OptionInfo::new(0, "passage", OptionKind::Open, false, true),
    OptionInfo::new(1, "archway", OptionKind::Open, false, true),
    OptionInfo::new(2, "doorway", OptionKind::Open, false, false),
    OptionInfo::new(3, "wall", OptionKind::Wall, false, false),
    OptionInfo::new(4, "window_wall", OptionKind::Wall, false, true),
    OptionInfo::new(5, "half_wall", OptionKind::Wall, true, true),
];

/// Open-kind ids, the candidate set of a carved face
pub const OPEN_OPTIONS: [OptionId; 3] = [OptionId(0), OptionId(1), OptionId(2)];

/// Wall-kind ids, the candidate set of an uncarved face
pub const WALL_OPTIONS: [OptionId; 3] = [OptionId(3), OptionId(4), OptionId(5)];

/// Every id in the catalog, the candidate set of a face in full superposition
pub const ALL_OPTIONS: [OptionId; 6] = [
    OptionId(0),
    OptionId(1),
    OptionId(2),
    OptionId(3),
    OptionId(4),
    OptionId(5),
];

/// Look up the catalog entry for an id
pub fn option_info(id: OptionId) -> Option<&'static OptionInfo> {
    CATALOG.get(id.0 as usize).filter(|info| info.id == id)
}

/// Kind of an option, or `None` for ids outside the catalog
#[inline]
pub fn kind_of(id: OptionId) -> Option<OptionKind> {
    option_info(id).map(|info| info.kind)
}

/// Check if an id names an open option
///
/// Unknown ids are never open.
#[inline]
pub fn is_open(id: OptionId) -> bool {
    kind_of(id) == Some(OptionKind::Open)
}
