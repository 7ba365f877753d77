// MJ-Score Embedded Rules
// The standard scoring template, compiled into the crate

use crate::score::{RuleFiles, ScoreSettings, ScoreTables};
use crate::types::RuleError;

/// Embedded standard config (settings)
pub const STANDARD_CONFIG: &str = include_str!("../data/standard.cfg");

/// Embedded standard winning patterns
pub const STANDARD_WIN_PATTERNS: &str = include_str!("../data/standard/winpatterns.txt");

/// Embedded standard limit hands
pub const STANDARD_LIMIT_HANDS: &str = include_str!("../data/standard/limithands.txt");

/// Embedded standard tile points
pub const STANDARD_TILE_POINTS: &str = include_str!("../data/standard/tilepoints.txt");

/// Embedded standard full-hand multipliers
pub const STANDARD_FULL_MULTIPLIERS: &str = include_str!("../data/standard/fullmultipliers.txt");

/// Embedded standard individual multipliers
pub const STANDARD_INDIVIDUAL_MULTIPLIERS: &str =
    include_str!("../data/standard/individualmultipliers.txt");

/// Access to the embedded "standard" scoring template, so the crate is
/// usable without touching the file system
pub struct StandardRules;

impl StandardRules {
    /// The settings text of the standard template
    pub fn config() -> &'static str {
        STANDARD_CONFIG
    }

    /// The five rule texts of the standard template
    pub fn rule_files() -> RuleFiles<'static> {
        RuleFiles {
            win_patterns: STANDARD_WIN_PATTERNS,
            limit_hands: STANDARD_LIMIT_HANDS,
            tile_points: STANDARD_TILE_POINTS,
            full_multipliers: STANDARD_FULL_MULTIPLIERS,
            individual_multipliers: STANDARD_INDIVIDUAL_MULTIPLIERS,
        }
    }

    /// Parse the standard settings and load the standard tables
    pub fn load() -> Result<(ScoreSettings, ScoreTables), RuleError> {
        let settings = ScoreSettings::parse(Self::config())?;
        let tables = ScoreTables::load(&Self::rule_files(), settings.limit);
        Ok((settings, tables))
    }
}
