// MJ-Score Hand Scoring
// Rule tables, settings, settlement and the best-pattern hand scorer

use crate::decompose::{self, ALL_MASK};
use crate::matcher;
use crate::pattern::{GroupRecord, Pattern};
use crate::ruleset::{load_graphs, RuleGraph};
use crate::tiles;
use crate::types::{
    Claim, GroupKind, Ledger, RuleError, Tile, TileError, Winds, GROUP_BINS, SET_BIN,
};

/// How the settled scores of a finished round are computed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreMethod {
    /// The winner banks their own points, nobody pays
    Simple,
    /// The losers each pay the winner the winner's points
    Payed,
    /// Losers pay the winner, and settle their point differences among
    /// each other too
    Arithmetic,
}

impl ScoreMethod {
    pub fn parse(name: &str) -> Result<ScoreMethod, RuleError> {
        match name {
            "simple" => Ok(ScoreMethod::Simple),
            "payed" => Ok(ScoreMethod::Payed),
            "arithmetic" => Ok(ScoreMethod::Arithmetic),
            _ => Err(RuleError::UnknownScoreMethod {
                name: name.to_string(),
            }),
        }
    }
}

/// Game-level scoring settings, read from a `key=value` config text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreSettings {
    pub start_points: i32,
    /// Hard cap on any single hand score
    pub limit: i32,
    pub method: ScoreMethod,
    /// East pays and receives double
    pub east_double: bool,
    /// A winning east keeps the deal
    pub stay_with_east: bool,
}

impl Default for ScoreSettings {
    fn default() -> Self {
        Self {
            start_points: 0,
            limit: 0,
            method: ScoreMethod::Simple,
            east_double: true,
            stay_with_east: true,
        }
    }
}

impl ScoreSettings {
    /// Parse settings from config text. Lines starting with `#` and keys
    /// this crate does not interpret are skipped; malformed values for the
    /// keys it does interpret are fatal.
    pub fn parse(text: &str) -> Result<ScoreSettings, RuleError> {
        let mut settings = ScoreSettings::default();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, val)) = line.split_once('=') else {
                continue;
            };
            match key {
                "startpoints" => settings.start_points = parse_int(line, val)?,
                "limit" => settings.limit = parse_int(line, val)?,
                "scoremethod" => settings.method = ScoreMethod::parse(val)?,
                "eastdouble" => settings.east_double = parse_bool(line, val)?,
                "staywitheast" => settings.stay_with_east = parse_bool(line, val)?,
                _ => {}
            }
        }
        Ok(settings)
    }

    /// Settle a finished round: convert the four players' hand points into
    /// paid/received score deltas according to the configured method.
    pub fn settle(&self, points: [i32; 4], winner: usize, east: usize) -> [i32; 4] {
        let mut scores = [0i32; 4];
        match self.method {
            ScoreMethod::Simple => {
                for (i, score) in scores.iter_mut().enumerate() {
                    let factor = if self.east_double && i == east { 2 } else { 1 };
                    if i == winner {
                        *score = factor * points[i];
                    }
                }
            }
            ScoreMethod::Payed => {
                for i in 0..3 {
                    for j in i + 1..4 {
                        let factor = if self.east_double && (i == east || j == east) {
                            2
                        } else {
                            1
                        };
                        if i == winner {
                            scores[i] += factor * points[i];
                            scores[j] -= factor * points[i];
                        } else if j == winner {
                            scores[j] += factor * points[j];
                            scores[i] -= factor * points[j];
                        }
                    }
                }
            }
            ScoreMethod::Arithmetic => {
                for i in 0..3 {
                    for j in i + 1..4 {
                        let factor = if self.east_double && (i == east || j == east) {
                            2
                        } else {
                            1
                        };
                        if i == winner {
                            scores[i] += factor * points[i];
                            scores[j] -= factor * points[i];
                        } else if j == winner {
                            scores[j] += factor * points[j];
                            scores[i] -= factor * points[j];
                        } else {
                            scores[i] += factor * (points[i] - points[j]);
                            scores[j] += factor * (points[j] - points[i]);
                        }
                    }
                }
            }
        }
        scores
    }
}

fn parse_int(line: &str, val: &str) -> Result<i32, RuleError> {
    val.parse().map_err(|_| RuleError::BadSetting {
        line: line.to_string(),
        reason: format!("'{}' is not a number", val),
    })
}

fn parse_bool(line: &str, val: &str) -> Result<bool, RuleError> {
    val.parse().map_err(|_| RuleError::BadSetting {
        line: line.to_string(),
        reason: format!("'{}' is not true/false", val),
    })
}

/// The five rule texts one scoring template is made of
#[derive(Debug, Clone, Copy)]
pub struct RuleFiles<'a> {
    pub win_patterns: &'a str,
    pub limit_hands: &'a str,
    pub tile_points: &'a str,
    pub full_multipliers: &'a str,
    pub individual_multipliers: &'a str,
}

/// The five loaded graph families of one scoring template.
///
/// Each family is interpreted its own way: win patterns accept and the best
/// value counts, limit hands accept and the first hit counts, tile points
/// and individual multipliers accumulate over every grouping, full-hand
/// multipliers accept and sum (winning hands only).
#[derive(Debug)]
pub struct ScoreTables {
    limit: i32,
    win_patterns: Vec<RuleGraph>,
    limit_hands: Vec<RuleGraph>,
    tile_points: Vec<RuleGraph>,
    full_multipliers: Vec<RuleGraph>,
    individual_multipliers: Vec<RuleGraph>,
    /// Loader diagnostics for everything that had to be dropped, across all
    /// five files
    pub warnings: Vec<String>,
}

impl ScoreTables {
    pub fn load(files: &RuleFiles<'_>, limit: i32) -> ScoreTables {
        let mut warnings = Vec::new();
        let mut load = |text: &str| {
            let mut report = load_graphs(text, limit);
            warnings.append(&mut report.warnings);
            report.graphs
        };
        let win_patterns = load(files.win_patterns);
        let limit_hands = load(files.limit_hands);
        let tile_points = load(files.tile_points);
        let full_multipliers = load(files.full_multipliers);
        let individual_multipliers = load(files.individual_multipliers);
        ScoreTables {
            limit,
            win_patterns,
            limit_hands,
            tile_points,
            full_multipliers,
            individual_multipliers,
            warnings,
        }
    }

    pub fn limit(&self) -> i32 {
        self.limit
    }

    /// Value of the first limit hand these groupings satisfy, zero when none
    pub fn check_limit_hand(
        &self,
        records: &[GroupRecord],
        winds: Winds,
        ledger: &mut Ledger,
    ) -> i32 {
        for graph in &self.limit_hands {
            if graph.value > 0 && matcher::accept(graph, records, winds) {
                ledger.add(format!(
                    "{} points for limit hand \"{}\"",
                    graph.value, graph.name
                ));
                return graph.value;
            }
        }
        0
    }

    /// Best value over all accepted win patterns
    pub fn win_points(&self, records: &[GroupRecord], winds: Winds, ledger: &mut Ledger) -> i32 {
        ledger.add("winpatterns:");
        self.win_patterns
            .iter()
            .map(|graph| matcher::accept_value(graph, records, winds, ledger))
            .max()
            .unwrap_or(0)
    }

    /// Sum of the basic tile points over all groupings
    pub fn tile_points(&self, records: &[GroupRecord], winds: Winds, ledger: &mut Ledger) -> i32 {
        ledger.add("basic tilepoints:");
        self.tile_points
            .iter()
            .map(|graph| matcher::accumulate(graph, records, winds, ledger))
            .sum()
    }

    /// Sum of the doubling multipliers. Full-hand multipliers only apply to
    /// a winning hand; individual multipliers always do.
    pub fn multipliers(
        &self,
        records: &[GroupRecord],
        winds: Winds,
        winner: bool,
        ledger: &mut Ledger,
    ) -> i32 {
        ledger.add("individual multipliers:");
        let mut total: i32 = self
            .individual_multipliers
            .iter()
            .map(|graph| matcher::accumulate(graph, records, winds, ledger))
            .sum();
        if winner {
            ledger.add("full hand multipliers:");
            total += self
                .full_multipliers
                .iter()
                .map(|graph| matcher::accept_value(graph, records, winds, ledger))
                .sum::<i32>();
        }
        total
    }

    /// Combine the parts: `(winpoints + tilepoints) * 2^multipliers`, capped
    /// at the configured limit
    pub fn final_score(
        &self,
        win_points: i32,
        tile_points: i32,
        multipliers: i32,
        ledger: &mut Ledger,
    ) -> i32 {
        let doubling = 2i32.saturating_pow(multipliers.clamp(0, 30) as u32);
        let score = (win_points + tile_points).saturating_mul(doubling);
        if score > self.limit {
            ledger.add(format!(
                "score exceeds limit - capped to {} points",
                self.limit
            ));
            return self.limit;
        }
        score
    }
}

/// Whether a hand is scored as the round's winning hand or as a leftover hand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandType {
    Winner,
    Normal,
}

/// One player's tiles at scoring time
#[derive(Debug, Clone, Default)]
pub struct Hand {
    pub concealed: Vec<Tile>,
    /// Face-up tiles, grouped per the claims in declaration order
    pub open: Vec<Tile>,
    pub claims: Vec<Claim>,
    /// Flowers and seasons set aside during play
    pub bonus: Vec<Tile>,
}

/// Score components of one scoring pass
#[derive(Debug, Clone)]
pub struct ScoreBreakdown {
    pub win_points: i32,
    pub tile_points: i32,
    pub multipliers: i32,
    pub total: i32,
    /// The concealed-tile interpretation the score was based on
    pub pattern: Pattern,
}

/// Scores hands against one loaded scoring template, keeping the point
/// breakdown of the most recent pass.
#[derive(Debug)]
pub struct HandScorer {
    tables: ScoreTables,
    ledger: Ledger,
}

impl HandScorer {
    pub fn new(tables: ScoreTables) -> Self {
        Self {
            tables,
            ledger: Ledger::new(),
        }
    }

    pub fn tables(&self) -> &ScoreTables {
        &self.tables
    }

    /// Point breakdown of the most recent scoring pass
    pub fn breakdown(&self) -> &[String] {
        self.ledger.lines()
    }

    /// Score a hand. Concealed kongs are folded back into the concealed
    /// tiles, the concealed remainder is enumerated without restriction, and
    /// the interpretation with the highest final score wins. Ties are broken
    /// by preferring the interpretation with more sets, then more kongs,
    /// pungs, chows, pairs and connected pairs, in that order.
    pub fn score(
        &mut self,
        hand_type: HandType,
        hand: &Hand,
        winds: Winds,
    ) -> Result<ScoreBreakdown, TileError> {
        let winner = hand_type == HandType::Winner;

        let mut concealed = hand.concealed.clone();
        let mut open = hand.open.clone();
        let mut claims = Vec::with_capacity(hand.claims.len());
        let mut pos = 0;
        for &claim in &hand.claims {
            if claim == Claim::ConcealedKong && pos + 4 <= open.len() {
                concealed.extend(open.drain(pos..pos + 4));
            } else {
                claims.push(claim);
                pos += claim.tile_count();
            }
        }

        for &tile in &hand.bonus {
            tiles::check(tile)?;
        }

        let open_pattern = decompose::parse_open(&open, &claims);
        let open_records = open_pattern.flatten(false);
        let patterns = decompose::decompose(&concealed, ALL_MASK)?;

        let mut best: Option<(i32, [i32; GROUP_BINS], Pattern)> = None;
        let mut scratch = Ledger::new();
        for pattern in patterns {
            let records = merged_records(&open_records, &pattern, &hand.bonus);
            scratch.reset();
            let (.., total) = self.evaluate(&records, winds, winner, &mut scratch);
            let key = (total, coolness(&pattern));
            if best.as_ref().map_or(true, |(t, c, _)| key > (*t, *c)) {
                best = Some((key.0, key.1, pattern));
            }
        }

        // the winning reading is carried out of the selection loop; an empty
        // enumeration leaves nothing concealed to read
        let pattern = match best {
            Some((.., pattern)) => pattern,
            None => Pattern::new(crate::types::PatternKind::Specific),
        };
        let records = merged_records(&open_records, &pattern, &hand.bonus);

        self.ledger.reset();
        let mut ledger = std::mem::take(&mut self.ledger);
        let (win_points, tile_points, multipliers, total) =
            self.evaluate(&records, winds, winner, &mut ledger);
        self.ledger = ledger;

        Ok(ScoreBreakdown {
            win_points,
            tile_points,
            multipliers,
            total,
            pattern,
        })
    }

    /// Value of the first limit hand the given hand satisfies, zero when none
    pub fn check_limit_hand(&mut self, hand: &Hand, winds: Winds) -> Result<i32, TileError> {
        let open_pattern = decompose::parse_open(&hand.open, &hand.claims);
        let open_records = open_pattern.flatten(false);
        let patterns = decompose::decompose(&hand.concealed, ALL_MASK)?;
        self.ledger.reset();
        let mut ledger = std::mem::take(&mut self.ledger);
        let mut value = 0;
        for pattern in &patterns {
            let records = merged_records(&open_records, pattern, &hand.bonus);
            value = self.tables.check_limit_hand(&records, winds, &mut ledger);
            if value > 0 {
                break;
            }
        }
        self.ledger = ledger;
        Ok(value)
    }

    /// Score a candidate pattern as if a player went out on it. Patterns
    /// that earn no win points are worth nothing.
    pub fn score_potential(&mut self, pattern: &Pattern, winds: Winds) -> i32 {
        let records = pattern.flatten(false);
        self.ledger.reset();
        let mut ledger = std::mem::take(&mut self.ledger);
        let win_points = self.tables.win_points(&records, winds, &mut ledger);
        let total = if win_points > 0 {
            let tile_points = self.tables.tile_points(&records, winds, &mut ledger);
            let multipliers = self.tables.multipliers(&records, winds, true, &mut ledger);
            self.tables
                .final_score(win_points, tile_points, multipliers, &mut ledger)
        } else {
            0
        };
        self.ledger = ledger;
        total
    }

    fn evaluate(
        &self,
        records: &[GroupRecord],
        winds: Winds,
        winner: bool,
        ledger: &mut Ledger,
    ) -> (i32, i32, i32, i32) {
        let win_points = if winner {
            self.tables.win_points(records, winds, ledger)
        } else {
            0
        };
        let tile_points = self.tables.tile_points(records, winds, ledger);
        let multipliers = self.tables.multipliers(records, winds, winner, ledger);
        let total = self
            .tables
            .final_score(win_points, tile_points, multipliers, ledger);
        (win_points, tile_points, multipliers, total)
    }
}

/// Open records, then the concealed interpretation, then the bonus tiles as
/// open singles
fn merged_records(
    open_records: &[GroupRecord],
    concealed: &Pattern,
    bonus: &[Tile],
) -> Vec<GroupRecord> {
    let mut records = open_records.to_vec();
    records.extend(concealed.flatten(true));
    for &tile in bonus {
        records.push(GroupRecord {
            kind: GroupKind::Single,
            concealed: false,
            tiles: vec![tile],
        });
    }
    records
}

/// Tie-break ordering over interpretations with equal scores: more sets beat
/// fewer, then kongs, pungs, chows, pairs, connected pairs, singles
fn coolness(pattern: &Pattern) -> [i32; GROUP_BINS] {
    [
        pattern.generic(SET_BIN),
        pattern.generic(GroupKind::Kong.bin()),
        pattern.generic(GroupKind::Pung.bin()),
        pattern.generic(GroupKind::Chow.bin()),
        pattern.generic(GroupKind::Pair.bin()),
        pattern.generic(GroupKind::Connected.bin()),
        pattern.generic(GroupKind::Single.bin()),
    ]
}
