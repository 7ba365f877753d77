// MJ-Score Ease Ranking
// Availability census, draw-purpose analysis and probabilistic pattern ranking

use crate::pattern::Pattern;
use crate::score::HandScorer;
use crate::tiles::{self, PLAY_TILES, SUIT_SPAN, TILE_COUNT};
use crate::types::{GroupKind, Tile, TileError, Winds, GROUP_BINS, SET_BIN};

const SINGLE: usize = GroupKind::Single as usize;
const CONNECTED: usize = GroupKind::Connected as usize;
const PAIR: usize = GroupKind::Pair as usize;
const CHOW: usize = GroupKind::Chow as usize;
const PUNG: usize = GroupKind::Pung as usize;
const KONG: usize = GroupKind::Kong as usize;

/// Census of what is still theoretically available to draw. Beyond raw tile
/// counts it tracks how many of each grouping could still be formed from the
/// unseen tiles; `remove` keeps all bins consistent as tiles leave play.
///
/// A fresh census sees 136 tiles, 192 possible connected pairs, 68 pairs,
/// 252 chows, 34 pungs, 34 kongs and 388 sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailableTiles {
    generic: [i32; GROUP_BINS],
    /// Unseen instances per tile; play tiles start at four, bonus tiles at one
    singles: [i32; TILE_COUNT],
    connected: [i32; PLAY_TILES],
    pairs: [i32; PLAY_TILES],
    chows: [i32; PLAY_TILES],
    pungs: [i32; PLAY_TILES],
    kongs: [i32; PLAY_TILES],
    sets: [i32; PLAY_TILES],
}

impl Default for AvailableTiles {
    fn default() -> Self {
        Self::new()
    }
}

impl AvailableTiles {
    pub fn new() -> Self {
        let mut singles = [1; TILE_COUNT];
        let mut connected = [0; PLAY_TILES];
        let mut pairs = [0; PLAY_TILES];
        let mut chows = [0; PLAY_TILES];
        let mut pungs = [0; PLAY_TILES];
        let mut kongs = [0; PLAY_TILES];
        let mut sets = [0; PLAY_TILES];
        for tile in 0..PLAY_TILES {
            singles[tile] = 4;
            pairs[tile] = 2;
            pungs[tile] = 1;
            kongs[tile] = 1;
            if tiles::is_numeral(tile) {
                // a terminal anchors fewer runs than a simple, a centre tile
                // the most
                connected[tile] = if tiles::is_terminal(tile) { 4 } else { 8 };
                chows[tile] = match tile % SUIT_SPAN {
                    0 | 8 => 4,
                    1 | 7 => 8,
                    _ => 12,
                };
            }
            sets[tile] = pairs[tile] + chows[tile] + pungs[tile] + kongs[tile];
        }
        Self {
            generic: [136, 192, 68, 252, 34, 34, 388],
            singles,
            connected,
            pairs,
            chows,
            pungs,
            kongs,
            sets,
        }
    }

    /// Number of unseen play tiles
    pub fn set_size(&self) -> i32 {
        self.generic[SINGLE]
    }

    /// Unseen instances of one tile
    pub fn instances(&self, tile: Tile) -> i32 {
        self.singles[tile]
    }

    /// Aggregate availability for one grouping bin
    pub fn generic(&self, bin: usize) -> i32 {
        self.generic[bin]
    }

    /// A tile has become visible (drawn, discarded or claimed): take it out
    /// of the census and cascade the update through every grouping it could
    /// have been part of.
    pub fn remove(&mut self, tile: Tile) -> Result<(), TileError> {
        tiles::check(tile)?;
        self.singles[tile] -= 1;
        self.generic[SINGLE] -= 1;
        if tiles::is_bonus(tile) {
            return Ok(());
        }

        let left = self.singles[tile];
        let rank = tile % SUIT_SPAN;

        if tiles::is_numeral(tile) {
            if rank > 0 && self.connected[tile - 1] > 0 {
                self.connected[tile - 1] -= 1;
                self.generic[CONNECTED] -= 1;
            }
            self.connected[tile] -= 1;
            self.generic[CONNECTED] -= 1;
            if rank < 8 && self.connected[tile + 1] > 0 {
                self.connected[tile + 1] -= 1;
                self.generic[CONNECTED] -= 1;
            }
        }

        // two instances gone means one pair left, none once a single remains
        if left == 3 || left == 1 {
            self.pairs[tile] = 1;
            self.generic[PAIR] -= 1;
        }

        if tiles::is_numeral(tile) {
            if rank > 1 && self.chows[tile - 2] > 0 {
                self.chows[tile - 2] -= 1;
                self.generic[CHOW] -= 1;
            }
            if rank > 0 && self.chows[tile - 1] > 0 {
                self.chows[tile - 1] -= 1;
                self.generic[CHOW] -= 1;
            }
            self.chows[tile] -= 1;
            self.generic[CHOW] -= 1;
            if rank < 8 && self.chows[tile + 1] > 0 {
                self.chows[tile + 1] -= 1;
                self.generic[CHOW] -= 1;
            }
            if rank < 7 && self.chows[tile + 2] > 0 {
                self.chows[tile + 2] -= 1;
                self.generic[CHOW] -= 1;
            }
        }

        if left < 3 {
            self.pungs[tile] = 0;
            self.generic[PUNG] -= 1;
        }
        if left < 4 {
            self.kongs[tile] = 0;
            self.generic[KONG] -= 1;
        }

        let old_sets = self.sets[tile];
        self.sets[tile] =
            self.pairs[tile] + self.chows[tile] + self.pungs[tile] + self.kongs[tile];
        self.generic[SET_BIN] -= old_sets - self.sets[tile];

        Ok(())
    }
}

/// What a player would use a drawn tile for, given their required pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawPurpose {
    Single,
    Connected,
    Pair,
    Chow,
    Pung,
    Kong,
    Nothing,
}

/// Number of times `tile` occurs in `hand`
fn count_in(tile: Tile, hand: &[Tile]) -> usize {
    hand.iter().filter(|&&t| t == tile).count()
}

/// Determine what drawing `tile` would be good for: walk down from the most
/// valuable use (completing a set) to the least (keeping a lone single),
/// checking the required pattern's marks against what the hand actually
/// holds. A tile the required pattern does not mark is good for nothing.
pub fn looking_for(
    tile: Tile,
    required: &Pattern,
    candidate: &Pattern,
    concealed: &[Tile],
) -> DrawPurpose {
    if required.specific(SINGLE, tile) == 0 {
        return DrawPurpose::Nothing;
    }
    let rank = tile % SUIT_SPAN;
    let numeral = tiles::is_numeral(tile);

    if required.specific(SET_BIN, tile) > 0 {
        // wanted for some set: a chow completes three ways
        if numeral
            && rank > 1
            && required.specific(CHOW, tile - 2) > 0
            && count_in(tile - 2, concealed) > 0
            && count_in(tile - 1, concealed) > 0
        {
            DrawPurpose::Chow
        } else if numeral
            && rank > 0
            && rank < 8
            && required.specific(CHOW, tile - 1) > 0
            && count_in(tile - 1, concealed) > 0
            && count_in(tile + 1, concealed) > 0
        {
            DrawPurpose::Chow
        } else if numeral
            && rank < 7
            && required.specific(CHOW, tile) > 0
            && count_in(tile + 1, concealed) > 0
            && count_in(tile + 2, concealed) > 0
        {
            DrawPurpose::Chow
        } else if required.specific(PUNG, tile) > 0 && count_in(tile, concealed) >= 2 {
            DrawPurpose::Pung
        } else {
            DrawPurpose::Nothing
        }
    } else if required.specific(KONG, tile) > 0 || count_in(tile, concealed) >= 3 {
        DrawPurpose::Kong
    } else if required.specific(PUNG, tile) > 0 {
        if candidate.specific(PAIR, tile) > 0 && count_in(tile, concealed) >= 2 {
            DrawPurpose::Pung
        } else {
            DrawPurpose::Nothing
        }
    } else if (numeral && rank > 1 && required.specific(CHOW, tile - 2) > 0)
        || (numeral && rank > 0 && required.specific(CHOW, tile - 1) > 0)
        || required.specific(CHOW, tile) > 0
    {
        // a connecting pair or gapped pair in the hand makes the chow real
        if numeral && rank > 1 && candidate.specific(CONNECTED, tile - 2) > 0 {
            DrawPurpose::Chow
        } else if numeral && rank < 7 && candidate.specific(CONNECTED, tile + 1) > 0 {
            DrawPurpose::Chow
        } else if numeral
            && rank > 0
            && rank < 8
            && candidate.specific(SINGLE, tile - 1) > 0
            && candidate.specific(SINGLE, tile + 1) > 0
        {
            DrawPurpose::Chow
        } else {
            DrawPurpose::Nothing
        }
    } else if required.specific(PAIR, tile) > 0 {
        if candidate.specific(SINGLE, tile) > 0 && count_in(tile, concealed) >= 1 {
            DrawPurpose::Pair
        } else {
            DrawPurpose::Nothing
        }
    } else if required.specific(CONNECTED, tile) > 0 {
        if candidate.specific(SINGLE, tile) > 0
            && numeral
            && rank > 0
            && count_in(tile - 1, concealed) >= 1
        {
            DrawPurpose::Connected
        } else {
            DrawPurpose::Nothing
        }
    } else if tiles::is_honour(tile) && count_in(tile, concealed) >= 3 {
        // a concealed honour pung can always grow into a kong
        DrawPurpose::Kong
    } else {
        DrawPurpose::Single
    }
}

/// Probability of drawing `tile` for the given purpose. Pungs and kongs can
/// complete off any visible tile, pairs and singles must come from the wall,
/// chows additionally only complete off the previous player's discards.
pub fn tile_probability(
    tile: Tile,
    purpose: DrawPurpose,
    available: &AvailableTiles,
    wall_size: i32,
    prev_hand_size: i32,
) -> f64 {
    let set_size = f64::from(available.set_size());
    let left = f64::from(available.instances(tile));
    match purpose {
        DrawPurpose::Kong | DrawPurpose::Pung => left / set_size,
        DrawPurpose::Chow => left / set_size * f64::from(prev_hand_size) / set_size,
        _ => left / set_size * f64::from(wall_size) / set_size,
    }
}

/// Ranks candidate target patterns by a weighed mix of the points they would
/// score and the probability of actually drawing the tiles they still need.
///
/// `ratio` weighs score against probability: 1.0 ranks purely on points,
/// 0.0 purely on reachability.
#[derive(Debug, Clone, Copy)]
pub struct PatternScorer {
    ratio: f64,
}

impl PatternScorer {
    pub fn new(ratio: f64) -> Self {
        Self { ratio }
    }

    /// Rank one candidate: multiply the draw probabilities of every required
    /// tile, then mix with the candidate's tile score, dampened by the
    /// number of tiles still missing. A candidate missing nothing ranks
    /// infinitely easy.
    pub fn rank(
        &self,
        required: &Pattern,
        candidate: &Pattern,
        tile_score: f64,
        limit: i32,
        available: &AvailableTiles,
        concealed: &[Tile],
        wall_size: i32,
        prev_hand_size: i32,
    ) -> f64 {
        let mut probability = 1.0;
        let mut distance = 0.0;
        for tile in 0..PLAY_TILES {
            if required.specific(SINGLE, tile) > 0 {
                distance += 1.0;
                let purpose = looking_for(tile, required, candidate, concealed);
                probability *=
                    tile_probability(tile, purpose, available, wall_size, prev_hand_size);
            }
        }
        ((self.ratio * tile_score)
            + ((1.0 - self.ratio) * f64::from(limit) * probability))
            * (1.0 / distance)
    }

    /// Rank every candidate pattern against its required-tile pattern. Tile
    /// scores come from scoring each candidate as a would-be win.
    #[allow(clippy::too_many_arguments)]
    pub fn determine_ease(
        &self,
        scorer: &mut HandScorer,
        required: &[Pattern],
        candidates: &[Pattern],
        available: &AvailableTiles,
        concealed: &[Tile],
        winds: Winds,
        wall_size: i32,
        prev_hand_size: i32,
    ) -> Vec<f64> {
        let limit = scorer.tables().limit();
        required
            .iter()
            .zip(candidates)
            .map(|(req, candidate)| {
                let tile_score = f64::from(scorer.score_potential(candidate, winds));
                self.rank(
                    req,
                    candidate,
                    tile_score,
                    limit,
                    available,
                    concealed,
                    wall_size,
                    prev_hand_size,
                )
            })
            .collect()
    }
}
