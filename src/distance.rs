// MJ-Score Shape Distance
// Difference between an achieved hand shape and a target shape, and the
// tiles required to close that difference

use crate::pattern::Pattern;
use crate::tiles::{HONOURS, PLAY_TILES, SUIT_SPAN};
use crate::types::{GroupKind, PatternKind, SET_BIN};

const SINGLE: usize = GroupKind::Single as usize;
const CONNECTED: usize = GroupKind::Connected as usize;
const PAIR: usize = GroupKind::Pair as usize;
const CHOW: usize = GroupKind::Chow as usize;
const PUNG: usize = GroupKind::Pung as usize;
const KONG: usize = GroupKind::Kong as usize;

/// Signed difference between a target shape and an achieved decomposition:
/// positive bins are groupings still to gain, negative bins are surplus.
///
/// The set bin starts at the target's full set requirement; a surplus of any
/// concrete set kind in the achieved pattern pays it down, so a generic "four
/// sets" target is satisfied by any mix of chows, pungs and kongs. Per-tile
/// differences are carried for every bin of a specific target, but only for
/// bins with a non-zero aggregate difference of a generic one.
pub fn difference(target: &Pattern, achieved: &Pattern) -> Pattern {
    let mut diff = Pattern::new(target.kind());
    diff.generic[SET_BIN] = target.generic[SET_BIN];
    for g in 0..SET_BIN {
        let mut d = target.generic[g] - achieved.generic[g];
        // surplus complete sets count towards the generic set requirement
        if g > PAIR && d < 0 {
            diff.generic[SET_BIN] += d;
            d = 0;
        }
        diff.generic[g] = d;
        if target.kind() == PatternKind::Specific || d != 0 {
            for tile in 0..PLAY_TILES {
                diff.specific[g][tile] = target.specific[g][tile] - achieved.specific[g][tile];
            }
        }
    }
    diff
}

/// Convert a shape difference into a required-tile pattern: how many tiles
/// the hand still needs (generic single count) and which tiles would help,
/// marked per grouping so a tile wanted for a pung outranks one wanted for
/// a chow.
///
/// For every grouping still needed, surplus material already in the hand is
/// credited: a pair on the way to a needed pung only costs one more single,
/// a surplus kong cannibalised for a pair refunds two. Two singles with a
/// one-tile gap are treated as a chow-to-be needing just the middle tile;
/// the pair consumed that way is taken off a scratch copy of the achieved
/// pattern so it is not credited twice within the pass. A tile that serves
/// both a needed pair and a needed pung or kong is marked for both, which
/// overstates its worth; the ranking layer lives with that bias.
pub fn required_tiles(achieved: &Pattern, diff: &Pattern) -> Pattern {
    let mut hand = achieved.clone();
    let mut req = Pattern::new(PatternKind::Specific);

    for tile in 0..PLAY_TILES {
        // a single is needed: anything bigger already in hand covers it
        if diff.generic[SINGLE] > 0 {
            if diff.generic[CONNECTED] < 0 && hand.specific[CONNECTED][tile] > 0 {
                req.generic[CONNECTED] -= 1;
                req.specific[CONNECTED][tile] -= 1;
                if tile < HONOURS && tile % SUIT_SPAN < 8 {
                    req.specific[CONNECTED][tile + 1] -= 1;
                }
            }
            if diff.generic[PAIR] < 0 && hand.specific[PAIR][tile] > 0 {
                req.generic[PAIR] -= 1;
                req.specific[PAIR][tile] -= 1;
            }
            if diff.generic[CHOW] < 0 && hand.specific[CHOW][tile] > 0 {
                req.generic[CHOW] -= 2;
                req.specific[CHOW][tile] -= 1;
                if tile < HONOURS && tile % SUIT_SPAN < 8 {
                    req.specific[CHOW][tile + 1] -= 1;
                }
                if tile < HONOURS && tile % SUIT_SPAN < 7 {
                    req.specific[CHOW][tile + 2] -= 1;
                }
            }
            if diff.generic[PUNG] < 0 && hand.specific[PUNG][tile] > 0 {
                req.generic[PUNG] -= 2;
                req.specific[PUNG][tile] -= 2;
            }
            if diff.generic[KONG] < 0 && hand.specific[KONG][tile] > 0 {
                req.generic[KONG] -= 3;
                req.specific[KONG][tile] -= 3;
            }
        }

        // a connected pair is needed
        if diff.generic[CONNECTED] > 0 {
            if diff.generic[SINGLE] < 0 && hand.specific[SINGLE][tile] > 0 {
                req.generic[SINGLE] += 1;
                if tile < HONOURS && tile % SUIT_SPAN > 0 {
                    req.specific[SINGLE][tile - 1] += 1;
                    req.specific[CONNECTED][tile] += 1;
                }
                if tile < HONOURS - 1 && tile % SUIT_SPAN < 8 {
                    req.specific[SINGLE][tile + 1] += 1;
                    req.specific[CONNECTED][tile + 1] += 1;
                }
            }
            if diff.generic[PAIR] < 0 && hand.specific[PAIR][tile] > 0 {
                req.generic[PAIR] -= 1;
                req.specific[PAIR][tile] -= 1;
            }
            if diff.generic[CHOW] < 0 && hand.specific[CHOW][tile] > 0 {
                req.generic[CHOW] -= 1;
                req.specific[CHOW][tile] -= 1;
                if tile < HONOURS - 1 && tile % SUIT_SPAN < 8 {
                    req.specific[CHOW][tile + 1] -= 1;
                }
                if tile < HONOURS - 2 && tile % SUIT_SPAN < 7 {
                    req.specific[CHOW][tile + 2] -= 1;
                }
            }
            if diff.generic[PUNG] < 0 && hand.specific[PUNG][tile] > 0 {
                req.generic[PUNG] -= 2;
                req.specific[PUNG][tile] -= 2;
            }
            if diff.generic[KONG] < 0 && hand.specific[KONG][tile] > 0 {
                req.generic[KONG] -= 3;
                req.specific[KONG][tile] -= 3;
            }
        }

        // a pair is needed
        if diff.generic[PAIR] > 0 {
            if diff.generic[SINGLE] < 0 && hand.specific[SINGLE][tile] > 0 {
                req.generic[SINGLE] += 1;
                req.specific[SINGLE][tile] += 1;
                req.specific[PAIR][tile] += 1;
            }
            if diff.generic[CONNECTED] < 0 && hand.specific[CONNECTED][tile] > 0 {
                req.generic[SINGLE] += 1;
                req.specific[SINGLE][tile] += 1;
                req.specific[PAIR][tile] += 1;
                if tile < HONOURS && tile % SUIT_SPAN < 8 {
                    req.specific[SINGLE][tile + 1] += 1;
                    req.specific[PAIR][tile + 1] += 1;
                }
            }
            if diff.generic[CHOW] < 0 && hand.specific[CHOW][tile] > 0 {
                req.generic[SINGLE] += 1;
                req.specific[SINGLE][tile] += 1;
                req.specific[PAIR][tile] += 1;
                if tile < HONOURS - 1 && tile % SUIT_SPAN < 8 {
                    req.specific[SINGLE][tile + 1] += 1;
                    req.specific[PAIR][tile + 1] += 1;
                }
                if tile < HONOURS - 2 && tile % SUIT_SPAN < 7 {
                    req.specific[SINGLE][tile + 2] += 1;
                    req.specific[PAIR][tile + 2] += 1;
                }
            }
            if diff.generic[PUNG] < 0 && hand.specific[PUNG][tile] > 0 {
                req.generic[PUNG] -= 1;
                req.specific[PUNG][tile] -= 1;
            }
            if diff.generic[KONG] < 0 && hand.specific[KONG][tile] > 0 {
                req.generic[KONG] -= 2;
                req.specific[KONG][tile] -= 2;
            }
        }

        // a chow is needed
        if diff.generic[CHOW] > 0 {
            if diff.generic[SINGLE] < 0 && hand.specific[SINGLE][tile] > 0 {
                // two singles a gap apart only need the middle tile
                if tile < HONOURS - 2 && hand.specific[SINGLE][tile + 2] > 0 {
                    req.generic[SINGLE] += 1;
                    // consume the gap pair so it is not credited again
                    hand.specific[SINGLE][tile] -= 1;
                    hand.specific[SINGLE][tile + 2] -= 1;
                    req.specific[SINGLE][tile + 1] += 1;
                    req.specific[CHOW][tile] += 1;
                } else {
                    req.generic[SINGLE] += 2;
                    if tile < HONOURS && tile % SUIT_SPAN > 1 {
                        req.specific[SINGLE][tile - 2] += 1;
                        req.specific[CHOW][tile - 2] += 1;
                    }
                    if tile < HONOURS && tile % SUIT_SPAN > 0 {
                        req.specific[SINGLE][tile - 1] += 1;
                        req.specific[CHOW][tile - 1] += 1;
                    }
                    if tile < HONOURS - 1 && tile % SUIT_SPAN < 8 {
                        req.specific[SINGLE][tile + 1] += 1;
                        req.specific[CHOW][tile] += 1;
                    }
                    if tile < HONOURS - 2 && tile % SUIT_SPAN < 7 {
                        req.specific[SINGLE][tile + 2] += 1;
                        req.specific[CHOW][tile] += 1;
                    }
                }
            }
            if diff.generic[CONNECTED] < 0 && hand.specific[CONNECTED][tile] > 0 {
                req.generic[SINGLE] += 1;
                if tile < HONOURS && tile % SUIT_SPAN > 0 {
                    req.specific[SINGLE][tile - 1] += 1;
                    req.specific[CHOW][tile - 1] += 1;
                }
                if tile < HONOURS - 2 && tile % SUIT_SPAN < 7 {
                    req.specific[SINGLE][tile + 2] += 1;
                    req.specific[CHOW][tile] += 1;
                }
            }
            if diff.generic[PAIR] < 0 && hand.specific[PAIR][tile] > 0 {
                req.generic[SINGLE] += 2;
                if tile < HONOURS && tile % SUIT_SPAN > 1 {
                    req.specific[SINGLE][tile - 2] += 1;
                    req.specific[CHOW][tile - 2] += 1;
                }
                if tile < HONOURS && tile % SUIT_SPAN > 0 {
                    req.specific[SINGLE][tile - 1] += 1;
                    req.specific[CHOW][tile - 1] += 1;
                }
                if tile < HONOURS - 1 && tile % SUIT_SPAN < 8 {
                    req.specific[SINGLE][tile + 1] += 1;
                    req.specific[CHOW][tile] += 1;
                }
                if tile < HONOURS - 2 && tile % SUIT_SPAN < 7 {
                    req.specific[SINGLE][tile + 2] += 1;
                    req.specific[CHOW][tile] += 1;
                }
            }
            if diff.generic[PUNG] < 0 && hand.specific[PUNG][tile] > 0 {
                req.generic[SINGLE] += 2;
                if tile < HONOURS && tile % SUIT_SPAN > 1 {
                    req.specific[SINGLE][tile - 2] += 1;
                    req.specific[CHOW][tile - 2] += 1;
                }
                if tile < HONOURS && tile % SUIT_SPAN > 0 {
                    req.specific[SINGLE][tile - 1] += 1;
                    req.specific[CHOW][tile - 1] += 1;
                }
                if tile < HONOURS - 1 && tile % SUIT_SPAN < 8 {
                    req.specific[SINGLE][tile + 1] += 1;
                    req.specific[CHOW][tile] += 1;
                }
                if tile < HONOURS - 2 && tile % SUIT_SPAN < 7 {
                    req.specific[SINGLE][tile + 2] += 1;
                    req.specific[CHOW][tile] += 1;
                }
            }
            if diff.generic[KONG] < 0 && hand.specific[KONG][tile] > 0 {
                req.generic[SINGLE] += 2;
                if tile < HONOURS && tile % SUIT_SPAN > 1 {
                    req.specific[SINGLE][tile - 2] += 1;
                    req.specific[CHOW][tile - 2] += 1;
                }
                if tile < HONOURS && tile % SUIT_SPAN > 0 {
                    req.specific[SINGLE][tile - 1] += 1;
                    req.specific[CHOW][tile - 1] += 1;
                }
                if tile < HONOURS - 1 && tile % SUIT_SPAN < 8 {
                    req.specific[SINGLE][tile + 1] += 1;
                    req.specific[CHOW][tile + 1] += 1;
                }
                if tile < HONOURS - 2 && tile % SUIT_SPAN < 7 {
                    req.specific[SINGLE][tile] += 1;
                    req.specific[CHOW][tile] += 1;
                }
            }
        }

        // a pung is needed
        if diff.generic[PUNG] > 0 {
            if diff.generic[SINGLE] < 0 && hand.specific[SINGLE][tile] > 0 {
                req.generic[SINGLE] += 2;
                req.specific[SINGLE][tile] += 2;
                req.specific[PUNG][tile] += 1;
            }
            if diff.generic[CONNECTED] < 0 && hand.specific[CONNECTED][tile] > 0 {
                req.generic[SINGLE] += 2;
                req.specific[SINGLE][tile] += 2;
                req.specific[PUNG][tile] += 1;
                if tile < HONOURS - 1 && tile % SUIT_SPAN < 8 {
                    req.specific[SINGLE][tile + 1] += 2;
                    req.specific[PUNG][tile + 1] += 1;
                }
            }
            if diff.generic[PAIR] < 0 && hand.specific[PAIR][tile] > 0 {
                req.generic[SINGLE] += 1;
                req.specific[SINGLE][tile] += 1;
                req.specific[PUNG][tile] += 1;
            }
            if diff.generic[CHOW] < 0 && hand.specific[CHOW][tile] > 0 {
                req.generic[SINGLE] += 2;
                req.specific[SINGLE][tile] += 2;
                req.specific[PUNG][tile] += 1;
                if tile < HONOURS - 1 && tile % SUIT_SPAN < 8 {
                    req.specific[SINGLE][tile + 1] += 2;
                    req.specific[PUNG][tile + 1] += 1;
                }
                if tile < HONOURS - 2 && tile % SUIT_SPAN < 7 {
                    req.specific[SINGLE][tile + 2] += 2;
                    req.specific[PUNG][tile + 2] += 1;
                }
            }
            if diff.generic[KONG] < 0 && hand.specific[KONG][tile] > 0 {
                req.generic[KONG] -= 1;
                req.specific[KONG][tile] -= 1;
            }
        }

        // a kong is needed
        if diff.generic[KONG] > 0 {
            if diff.generic[SINGLE] < 0 && hand.specific[SINGLE][tile] > 0 {
                req.generic[SINGLE] += 3;
                req.specific[SINGLE][tile] += 3;
                req.specific[KONG][tile] += 1;
            }
            if diff.generic[CONNECTED] < 0 && hand.specific[CONNECTED][tile] > 0 {
                req.generic[SINGLE] += 3;
                req.specific[SINGLE][tile] += 3;
                req.specific[KONG][tile] += 1;
                if tile < HONOURS - 1 && tile % SUIT_SPAN < 8 {
                    req.specific[SINGLE][tile + 1] += 3;
                    req.specific[KONG][tile + 1] += 1;
                }
            }
            if diff.generic[PAIR] < 0 && hand.specific[PAIR][tile] > 0 {
                req.generic[SINGLE] += 2;
                req.specific[SINGLE][tile] += 2;
                req.specific[KONG][tile] += 1;
            }
            if diff.generic[CHOW] < 0 && hand.specific[CHOW][tile] > 0 {
                req.generic[SINGLE] += 3;
                req.specific[SINGLE][tile] += 3;
                req.specific[KONG][tile] += 1;
                if tile < HONOURS - 1 && tile % SUIT_SPAN < 8 {
                    req.specific[SINGLE][tile + 1] += 3;
                    req.specific[KONG][tile + 1] += 1;
                }
                if tile < HONOURS - 2 && tile % SUIT_SPAN < 7 {
                    req.specific[SINGLE][tile + 2] += 3;
                    req.specific[KONG][tile + 2] += 1;
                }
            }
            if diff.generic[PUNG] < 0 && hand.specific[PUNG][tile] > 0 {
                req.generic[SINGLE] += 1;
                req.specific[SINGLE][tile] += 1;
                req.specific[KONG][tile] += 1;
            }
        }

        // any set is needed; surplus singles, connected pairs and pairs can
        // grow into one, complete sets in hand never change
        if diff.generic[SET_BIN] > 0 {
            if diff.generic[SINGLE] < 0 && hand.specific[SINGLE][tile] > 0 {
                if tile < HONOURS - 2 && hand.specific[SINGLE][tile + 2] > 0 {
                    req.generic[SINGLE] += 1;
                    hand.specific[SINGLE][tile] -= 1;
                    hand.specific[SINGLE][tile + 2] -= 1;
                    req.specific[SINGLE][tile + 1] += 1;
                    req.specific[SET_BIN][tile + 1] += 1;
                    req.specific[CHOW][tile] += 1;
                } else {
                    req.generic[SINGLE] += 2;
                    if tile < HONOURS && tile % SUIT_SPAN > 1 {
                        req.specific[SINGLE][tile - 2] += 1;
                        req.specific[SET_BIN][tile - 2] += 1;
                    }
                    if tile < HONOURS && tile % SUIT_SPAN > 0 {
                        req.specific[SINGLE][tile - 1] += 1;
                        req.specific[SET_BIN][tile - 1] += 1;
                    }
                    req.specific[SINGLE][tile] += 2;
                    req.specific[SET_BIN][tile] += 1;
                    if tile < HONOURS - 1 && tile % SUIT_SPAN < 8 {
                        req.specific[SINGLE][tile + 1] += 1;
                        req.specific[SET_BIN][tile + 1] += 1;
                    }
                    if tile < HONOURS - 2 && tile % SUIT_SPAN < 7 {
                        req.specific[SINGLE][tile + 2] += 1;
                        req.specific[SET_BIN][tile + 2] += 1;
                    }
                }
            }
            if diff.generic[CONNECTED] < 0 && hand.specific[CONNECTED][tile] > 0 {
                req.generic[SINGLE] += 1;
                if tile < HONOURS && tile % SUIT_SPAN > 0 {
                    req.specific[SINGLE][tile - 1] += 1;
                    req.specific[SET_BIN][tile - 1] += 1;
                    req.specific[CHOW][tile - 1] += 1;
                }
                if tile < HONOURS - 2 && tile % SUIT_SPAN < 7 {
                    req.specific[SINGLE][tile + 2] += 1;
                    req.specific[SET_BIN][tile + 2] += 1;
                    req.specific[CHOW][tile] += 1;
                }
            }
            if diff.generic[PAIR] < 0 && hand.specific[PAIR][tile] > 0 {
                req.generic[SINGLE] += 1;
                req.specific[SINGLE][tile] += 1;
                req.specific[SET_BIN][tile] += 1;
                req.specific[PUNG][tile] += 1;
            }
        }
    }

    req
}
