// MJ-Score Tile Patterns
// Dual-counter grouping statistics and flattened group records

use crate::tiles::PLAY_TILES;
use crate::types::{GroupKind, PatternKind, Tile, GROUP_BINS, SET_BIN};

/// Grouping statistics for a hand or a target shape.
///
/// Counts are kept twice: aggregate per grouping kind ("three chows, one
/// pair") and per (kind, tile) ("a chow anchored at bamboo 3"). The seventh
/// aggregate bin counts sets, i.e. chows, pungs and kongs together, so a
/// target can ask for "four sets" without caring which. Counters are signed:
/// difference computations drive them below zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    pub(crate) kind: PatternKind,
    pub(crate) generic: [i32; GROUP_BINS],
    pub(crate) specific: [[i32; PLAY_TILES]; GROUP_BINS],
}

impl Pattern {
    pub fn new(kind: PatternKind) -> Self {
        Self {
            kind,
            generic: [0; GROUP_BINS],
            specific: [[0; PLAY_TILES]; GROUP_BINS],
        }
    }

    /// The canonical winning shape: four sets and a pair, any tiles
    pub fn standard_win() -> Self {
        let mut pattern = Pattern::new(PatternKind::Generic);
        pattern.generic[GroupKind::Pair.bin()] = 1;
        pattern.generic[SET_BIN] = 4;
        pattern
    }

    pub fn kind(&self) -> PatternKind {
        self.kind
    }

    /// Count a grouping of `kind` anchored at `tile`. Chows, pungs and kongs
    /// also bump the aggregate set bin.
    pub fn record(&mut self, tile: Tile, kind: GroupKind) {
        self.generic[kind.bin()] += 1;
        self.specific[kind.bin()][tile] += 1;
        if kind.is_set() {
            self.generic[SET_BIN] += 1;
        }
    }

    /// Aggregate count for one bin (a grouping kind, or `SET_BIN`)
    #[inline]
    pub fn generic(&self, bin: usize) -> i32 {
        self.generic[bin]
    }

    /// Per-tile count for one bin
    #[inline]
    pub fn specific(&self, bin: usize, tile: Tile) -> i32 {
        self.specific[bin][tile]
    }

    /// Total tiles covered by the counted groupings
    pub fn tile_count(&self) -> i32 {
        GroupKind::ALL
            .iter()
            .map(|&k| self.generic[k.bin()] * k.tile_span() as i32)
            .sum()
    }

    /// Tiles still needed to realize this pattern when it describes a
    /// requirement: one per single, two per pair or connected pair, three
    /// per set
    pub fn required_tile_count(&self) -> i32 {
        self.generic[GroupKind::Single.bin()]
            + 2 * self.generic[GroupKind::Pair.bin()]
            + 2 * self.generic[GroupKind::Connected.bin()]
            + 3 * self.generic[SET_BIN]
    }

    /// Element-wise sum of two patterns; the result is always specific
    pub fn merged(&self, other: &Pattern) -> Pattern {
        let mut merged = Pattern::new(PatternKind::Specific);
        for bin in 0..GROUP_BINS {
            merged.generic[bin] = self.generic[bin] + other.generic[bin];
            for tile in 0..PLAY_TILES {
                merged.specific[bin][tile] = self.specific[bin][tile] + other.specific[bin][tile];
            }
        }
        merged
    }

    /// Expand the per-tile counters into a flat record list, kind-major and
    /// tile-minor within each kind. Each non-zero (kind, tile) bin yields one
    /// record, regardless of its count.
    pub fn flatten(&self, concealed: bool) -> Vec<GroupRecord> {
        let mut records = Vec::new();
        for kind in GroupKind::ALL {
            for tile in 0..PLAY_TILES {
                if self.specific[kind.bin()][tile] > 0 {
                    records.push(GroupRecord::new(kind, tile, concealed));
                }
            }
        }
        records
    }
}

/// One concrete grouping with its member tiles and facing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupRecord {
    pub kind: GroupKind,
    pub concealed: bool,
    pub tiles: Vec<Tile>,
}

impl GroupRecord {
    /// Expand a grouping anchored at `tile` into its member tiles
    pub fn new(kind: GroupKind, tile: Tile, concealed: bool) -> Self {
        let tiles = match kind {
            GroupKind::Single => vec![tile],
            GroupKind::Connected => vec![tile, tile + 1],
            GroupKind::Pair => vec![tile, tile],
            GroupKind::Chow => vec![tile, tile + 1, tile + 2],
            GroupKind::Pung => vec![tile, tile, tile],
            GroupKind::Kong => vec![tile, tile, tile, tile],
        };
        Self {
            kind,
            concealed,
            tiles,
        }
    }

    /// Lowest member tile; the tile the grouping is anchored at
    #[inline]
    pub fn anchor(&self) -> Tile {
        self.tiles[0]
    }
}

impl std::fmt::Display for GroupRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.concealed {
            write!(f, "concealed ")?;
        }
        write!(f, "{} (", self.kind)?;
        for (i, tile) in self.tiles.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", tile)?;
        }
        write!(f, ")")
    }
}
