// MJ-Score Type Definitions
// Shared types for hand decomposition and rule-driven scoring

use thiserror::Error;

/// Tile identifier, see the `tiles` module for the full enumeration
pub type Tile = usize;

/// Number of counter bins in a pattern: six grouping kinds plus the
/// aggregate "set" bin
pub const GROUP_BINS: usize = 7;

/// Index of the aggregate "set" bin (chows + pungs + kongs)
pub const SET_BIN: usize = 6;

/// The six concrete grouping kinds a hand decomposes into
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GroupKind {
    /// A lone tile
    Single,
    /// Two suit-adjacent tiles (a run in progress), anchored at the lower tile
    Connected,
    /// Two identical tiles
    Pair,
    /// A run of three consecutive suited tiles, anchored at the lowest
    Chow,
    /// Three identical tiles
    Pung,
    /// Four identical tiles
    Kong,
}

impl GroupKind {
    /// All kinds in counter-bin order
    pub const ALL: [GroupKind; 6] = [
        GroupKind::Single,
        GroupKind::Connected,
        GroupKind::Pair,
        GroupKind::Chow,
        GroupKind::Pung,
        GroupKind::Kong,
    ];

    /// Counter-bin index for this kind
    #[inline]
    pub fn bin(self) -> usize {
        self as usize
    }

    /// Inverse of `bin()`
    pub fn from_bin(bin: usize) -> Option<GroupKind> {
        GroupKind::ALL.get(bin).copied()
    }

    /// How many tiles a grouping of this kind contains
    pub fn tile_span(self) -> usize {
        match self {
            GroupKind::Single => 1,
            GroupKind::Connected | GroupKind::Pair => 2,
            GroupKind::Chow | GroupKind::Pung => 3,
            GroupKind::Kong => 4,
        }
    }

    /// True for the kinds that count towards the aggregate set bin
    #[inline]
    pub fn is_set(self) -> bool {
        matches!(self, GroupKind::Chow | GroupKind::Pung | GroupKind::Kong)
    }
}

impl std::fmt::Display for GroupKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GroupKind::Single => write!(f, "single"),
            GroupKind::Connected => write!(f, "connected pair"),
            GroupKind::Pair => write!(f, "pair"),
            GroupKind::Chow => write!(f, "chow"),
            GroupKind::Pung => write!(f, "pung"),
            GroupKind::Kong => write!(f, "kong"),
        }
    }
}

/// How a pattern's per-tile counters participate in difference computation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    /// Only aggregate counts matter; per-tile differences are filled in
    /// when the aggregate difference is non-zero
    Generic,
    /// Per-tile counts always matter
    Specific,
}

/// A pre-declared, fixed grouping in the face-up part of a hand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Claim {
    Single,
    Pair,
    Chow,
    Pung,
    Kong,
    /// A kong declared face-up but scored as concealed
    ConcealedKong,
}

impl Claim {
    /// How many tiles of the face-up list this claim consumes
    pub fn tile_count(self) -> usize {
        match self {
            Claim::Single => 1,
            Claim::Pair => 2,
            Claim::Chow | Claim::Pung => 3,
            Claim::Kong | Claim::ConcealedKong => 4,
        }
    }

    /// The grouping kind this claim records
    pub fn kind(self) -> GroupKind {
        match self {
            Claim::Single => GroupKind::Single,
            Claim::Pair => GroupKind::Pair,
            Claim::Chow => GroupKind::Chow,
            Claim::Pung => GroupKind::Pung,
            Claim::Kong | Claim::ConcealedKong => GroupKind::Kong,
        }
    }
}

/// Wind context for a scoring pass: wind of the round plus the player's own wind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Winds {
    pub round: Tile,
    pub seat: Tile,
}

impl Winds {
    pub fn new(round: Tile, seat: Tile) -> Self {
        Self { round, seat }
    }
}

/// Ordered, append-only point breakdown for one scoring pass.
///
/// The ledger is owned by the caller and reset explicitly; reading it never
/// clears it. Snapshot a pass with `clone()`.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    lines: Vec<String>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one explanation line
    pub fn add(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// All lines recorded so far, in insertion order
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Drop all recorded lines
    pub fn reset(&mut self) {
        self.lines.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Tile identifier validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TileError {
    #[error("invalid tile id {id}: identifiers range over 0..{limit}")]
    InvalidTileId { id: usize, limit: usize },

    #[error("tile id {id} is a bonus tile and cannot appear in a groupable hand")]
    BonusTileInHand { id: usize },
}

/// Configuration loading errors (only the fatal ones; recoverable problems
/// are collected as warnings on the load report)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error("unknown score method '{name}': expected simple, payed or arithmetic")]
    UnknownScoreMethod { name: String },

    #[error("malformed setting line '{line}': {reason}")]
    BadSetting { line: String, reason: String },
}
