//! # MJ-Score: Mahjong Hand Decomposition and Scoring Engine
//!
//! A scoring core for four-player mahjong: hands are decomposed into
//! their possible set/pair readings, matched against data-driven rule
//! graphs, and turned into point totals and settlements.
//!
//! ## Pipeline
//!
//! 1. **Decompose** - Enumerate every grouping of a concealed hand
//!    - `decompose(&hand, ALL_MASK)` - singles, pairs, chows, pungs, kongs
//! 2. **Score** - Run the groupings through the loaded rule tables
//!    - `HandScorer::score(HandType::Winner, &hand, winds)` - best reading wins
//! 3. **Rank** - Estimate how easily a partial hand completes
//!    - `PatternScorer::determine_ease(..)` - score vs. probability
//!
//! ## Rule files
//!
//! Scoring is fully data-driven: five `[dfsa]` graph files describe
//! winning patterns, limit hands, tile points, and multipliers. The
//! crate ships a `standard` template compiled in via [`StandardRules`].
//!
//! ## Example Usage
//!
//! ```
//! use mj_score::{Hand, HandScorer, HandType, StandardRules, Winds};
//!
//! let (settings, tables) = StandardRules::load()?;
//! let mut scorer = HandScorer::new(tables);
//!
//! let hand = Hand {
//!     concealed: vec![1, 1, 1, 5, 5, 5, 10, 10, 10, 14, 14, 14, 27, 27],
//!     open: vec![],
//!     claims: vec![],
//!     bonus: vec![],
//! };
//! let winds = Winds { round: 27, seat: 28 };
//! let breakdown = scorer.score(HandType::Winner, &hand, winds)?;
//! assert!(breakdown.total <= settings.limit);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! - **Tiles** - The tile alphabet: suits, honours, bonus tiles
//! - **Stream** - Sorted token cursor the decomposer walks
//! - **Pattern** - Dual-counter tally of groupings, generic and per-tile
//! - **Decompose** - Recursive enumerator over all hand readings
//! - **Distance** - Shape difference and required-tile computation
//! - **Ruleset / Matcher** - `[dfsa]` graph parser and interpreters
//! - **Score** - Tables, hand scorer, and settlement arithmetic
//! - **Ease** - Completion-probability ranking of candidate patterns

pub mod data;
pub mod decompose;
pub mod distance;
pub mod ease;
pub mod matcher;
pub mod pattern;
pub mod ruleset;
pub mod score;
pub mod stream;
pub mod tiles;
pub mod types;

// Re-export main types and functions for convenience
pub use data::StandardRules;
pub use decompose::{decompose, parse_open, Mask};
pub use distance::{difference, required_tiles};
pub use ease::{AvailableTiles, DrawPurpose, PatternScorer};
pub use matcher::{accept, accept_value, accumulate};
pub use pattern::{GroupRecord, Pattern};
pub use ruleset::{load_graphs, LoadReport, RuleGraph};
pub use score::{
    Hand, HandScorer, HandType, RuleFiles, ScoreBreakdown, ScoreMethod, ScoreSettings, ScoreTables,
};
pub use stream::TokenStream;
pub use types::{Claim, GroupKind, Ledger, RuleError, TileError, Winds};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
