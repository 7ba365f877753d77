// MJ-Score Hand Decomposition
// Full-branching enumeration of every grouping interpretation of a hand

use crate::pattern::Pattern;
use crate::stream::TokenStream;
use crate::tiles;
use crate::types::{Claim, GroupKind, PatternKind, Tile, TileError};

/// Bitmask over grouping kinds, restricting which groupings an enumeration
/// branch may commit to
pub type Mask = u8;

pub const EMPTY_MASK: Mask = 0;
pub const SINGLES_MASK: Mask = 1;
pub const CONNECTED_MASK: Mask = 2;
pub const PAIR_MASK: Mask = 4;
pub const CHOW_MASK: Mask = 8;
pub const PUNG_MASK: Mask = 16;
pub const KONG_MASK: Mask = 32;

/// Any complete set
pub const SET_MASK: Mask = CHOW_MASK | PUNG_MASK | KONG_MASK;
/// The groupings a winning hand is made of
pub const WIN_MASK: Mask = PAIR_MASK | SET_MASK;
/// No restriction
pub const ALL_MASK: Mask = SINGLES_MASK | CONNECTED_MASK | WIN_MASK;

#[inline]
fn masks(mask: Mask, target: Mask) -> bool {
    mask & target == target
}

/// The enumerator's automaton states. Each state holds a committed-to
/// interpretation of the tokens read so far on the current branch:
///
/// ```text
///          ,-> connected --> chow
/// single -<
///          '-> pair --> pung --> kong
/// ```
///
/// Every state forks to each reachable state that the look-ahead supports,
/// then records its own grouping and continues as `single`; the union of all
/// branches is the full set of interpretations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Single,
    Connected,
    Pair,
    Chow,
    Pung,
    Kong,
}

impl State {
    fn kind(self) -> GroupKind {
        match self {
            State::Single => GroupKind::Single,
            State::Connected => GroupKind::Connected,
            State::Pair => GroupKind::Pair,
            State::Chow => GroupKind::Chow,
            State::Pung => GroupKind::Pung,
            State::Kong => GroupKind::Kong,
        }
    }

    /// Anchor tile of this state's grouping, given the last tile read into it
    fn anchor(self, current: Tile) -> Tile {
        match self {
            State::Connected => current - 1,
            State::Chow => current - 2,
            _ => current,
        }
    }

    /// Mask bit that must be set for this state to record mid-stream
    fn mask_bit(self) -> Mask {
        1 << (self as u8)
    }
}

/// Enumerate all grouping interpretations of a sorted concealed hand.
///
/// `mask` restricts which groupings a branch may commit to mid-stream;
/// branches needing a disallowed grouping are abandoned. The grouping that
/// consumes the final token is recorded unmasked, so a restricted parse can
/// still close its last branch (callers filter by shape afterwards).
///
/// Bonus tiles cannot be grouped and are rejected.
pub fn decompose(hand: &[Tile], mask: Mask) -> Result<Vec<Pattern>, TileError> {
    decompose_from(Pattern::new(PatternKind::Specific), hand, mask)
}

/// Enumerate interpretations on top of a pre-seeded pattern (typically the
/// claimed face-up groupings from `parse_open`)
pub fn decompose_from(
    base: Pattern,
    hand: &[Tile],
    mask: Mask,
) -> Result<Vec<Pattern>, TileError> {
    for &tile in hand {
        tiles::check_play(tile)?;
    }
    let mut stream = TokenStream::new(hand.to_vec());
    let mut out = Vec::new();
    match stream.next() {
        Some(first) => step(State::Single, base, first, stream, mask, &mut out),
        None => out.push(base),
    }
    Ok(out)
}

/// Record the claimed face-up groupings into a fresh pattern. Each claim
/// consumes its tile span from `open` and is anchored at the first consumed
/// tile.
pub fn parse_open(open: &[Tile], claims: &[Claim]) -> Pattern {
    let mut pattern = Pattern::new(PatternKind::Specific);
    let mut pos = 0;
    for claim in claims {
        if let Some(&anchor) = open.get(pos) {
            pattern.record(anchor, claim.kind());
        }
        pos += claim.tile_count();
    }
    pattern
}

fn step(
    state: State,
    mut pattern: Pattern,
    current: Tile,
    mut stream: TokenStream,
    mask: Mask,
    out: &mut Vec<Pattern>,
) {
    let Some(next) = stream.next() else {
        // final token: close the branch with this state's grouping
        pattern.record(state.anchor(current), state.kind());
        out.push(pattern);
        return;
    };

    match state {
        State::Single => {
            if tiles::is_suit_successor(current, next) {
                step(State::Connected, pattern.clone(), next, stream.clone(), mask, out);
            }
            // runs of a chow may be split by duplicates, so a connecting
            // tile further down the stream opens another branch
            if let Some(pos) = stream.can_connect(current) {
                let mut swapped = stream.clone();
                let connector = swapped.swap_for_next(pos);
                step(State::Connected, pattern.clone(), connector, swapped, mask, out);
            }
            if current == next {
                step(State::Pair, pattern.clone(), next, stream.clone(), mask, out);
            }
            pattern.record(current, GroupKind::Single);
            if masks(mask, state.mask_bit()) {
                step(State::Single, pattern, next, stream, mask, out);
            }
        }
        State::Connected => {
            if tiles::is_suit_successor(current, next) {
                step(State::Chow, pattern.clone(), next, stream.clone(), mask, out);
            }
            if let Some(pos) = stream.can_connect(current) {
                let mut swapped = stream.clone();
                let connector = swapped.swap_for_next(pos);
                step(State::Chow, pattern.clone(), connector, swapped, mask, out);
            }
            pattern.record(current - 1, GroupKind::Connected);
            if masks(mask, state.mask_bit()) {
                step(State::Single, pattern, next, stream, mask, out);
            }
        }
        State::Pair => {
            if next == current {
                step(State::Pung, pattern.clone(), next, stream.clone(), mask, out);
            }
            pattern.record(current, GroupKind::Pair);
            if masks(mask, state.mask_bit()) {
                step(State::Single, pattern, next, stream, mask, out);
            }
        }
        State::Chow => {
            pattern.record(current - 2, GroupKind::Chow);
            if masks(mask, state.mask_bit()) {
                step(State::Single, pattern, next, stream, mask, out);
            }
        }
        State::Pung => {
            if next == current {
                step(State::Kong, pattern.clone(), next, stream.clone(), mask, out);
            }
            pattern.record(current, GroupKind::Pung);
            if masks(mask, state.mask_bit()) {
                step(State::Single, pattern, next, stream, mask, out);
            }
        }
        State::Kong => {
            pattern.record(current, GroupKind::Kong);
            if masks(mask, state.mask_bit()) {
                step(State::Single, pattern, next, stream, mask, out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SET_BIN;

    fn counts(pattern: &Pattern) -> [i32; 6] {
        let mut c = [0; 6];
        for kind in GroupKind::ALL {
            c[kind.bin()] = pattern.generic(kind.bin());
        }
        c
    }

    // ============ Masks ============

    #[test]
    fn test_mask_composition() {
        assert_eq!(SET_MASK, 56);
        assert_eq!(WIN_MASK, 60);
        assert_eq!(ALL_MASK, 63);
        assert!(masks(ALL_MASK, KONG_MASK));
        assert!(masks(WIN_MASK, PAIR_MASK));
        assert!(!masks(WIN_MASK, SINGLES_MASK));
        assert!(!masks(EMPTY_MASK, SINGLES_MASK));
    }

    #[test]
    fn test_state_mask_bits_line_up() {
        assert_eq!(State::Single.mask_bit(), SINGLES_MASK);
        assert_eq!(State::Connected.mask_bit(), CONNECTED_MASK);
        assert_eq!(State::Pair.mask_bit(), PAIR_MASK);
        assert_eq!(State::Chow.mask_bit(), CHOW_MASK);
        assert_eq!(State::Pung.mask_bit(), PUNG_MASK);
        assert_eq!(State::Kong.mask_bit(), KONG_MASK);
    }

    // ============ Enumeration ============

    #[test]
    fn test_three_four_five_yields_all_interpretations() {
        let patterns = decompose(&[3, 4, 5], ALL_MASK).unwrap();
        assert_eq!(patterns.len(), 4);
        // chow; connected(3,4) + single 5; single 3 + connected(4,5); three singles
        assert!(patterns.iter().any(|p| counts(p) == [0, 0, 0, 1, 0, 0]
            && p.specific(GroupKind::Chow.bin(), 3) == 1));
        assert!(patterns.iter().any(|p| counts(p) == [1, 1, 0, 0, 0, 0]
            && p.specific(GroupKind::Connected.bin(), 3) == 1
            && p.specific(GroupKind::Single.bin(), 5) == 1));
        assert!(patterns.iter().any(|p| counts(p) == [1, 1, 0, 0, 0, 0]
            && p.specific(GroupKind::Connected.bin(), 4) == 1
            && p.specific(GroupKind::Single.bin(), 3) == 1));
        assert!(patterns.iter().any(|p| counts(p) == [3, 0, 0, 0, 0, 0]));
    }

    #[test]
    fn test_every_pattern_covers_whole_hand() {
        let hand = [0, 0, 1, 2, 3, 9, 9, 9, 27, 27];
        for pattern in decompose(&hand, ALL_MASK).unwrap() {
            assert_eq!(pattern.tile_count() as usize, hand.len());
        }
    }

    #[test]
    fn test_quad_enumerates_pair_pung_kong_splits() {
        let patterns = decompose(&[7, 7, 7, 7], ALL_MASK).unwrap();
        assert!(patterns.iter().any(|p| counts(p) == [0, 0, 0, 0, 0, 1]));
        assert!(patterns.iter().any(|p| counts(p) == [1, 0, 0, 0, 1, 0]));
        assert!(patterns.iter().any(|p| counts(p) == [0, 0, 2, 0, 0, 0]));
        assert!(patterns.iter().any(|p| counts(p) == [4, 0, 0, 0, 0, 0]));
    }

    #[test]
    fn test_split_run_found_through_swap() {
        // 3,3,4,5: the chow 3,4,5 hides behind the duplicate 3
        let patterns = decompose(&[3, 3, 4, 5], ALL_MASK).unwrap();
        assert!(patterns
            .iter()
            .any(|p| p.specific(GroupKind::Chow.bin(), 3) == 1
                && p.specific(GroupKind::Single.bin(), 3) == 1));
    }

    #[test]
    fn test_win_mask_finds_winning_shape() {
        let hand = [0, 1, 2, 9, 10, 11, 18, 19, 20, 24, 25, 26, 31, 31];
        let patterns = decompose(&hand, WIN_MASK).unwrap();
        let win = patterns.iter().find(|p| {
            p.generic(SET_BIN) == 4 && p.generic(GroupKind::Pair.bin()) == 1
        });
        let win = win.unwrap();
        assert_eq!(win.generic(GroupKind::Chow.bin()), 4);
        assert_eq!(win.specific(GroupKind::Pair.bin(), 31), 1);
        assert_eq!(win.tile_count(), 14);
    }

    #[test]
    fn test_empty_hand_yields_base_pattern() {
        let patterns = decompose(&[], ALL_MASK).unwrap();
        assert_eq!(patterns.len(), 1);
        assert_eq!(patterns[0].tile_count(), 0);
    }

    #[test]
    fn test_bonus_tiles_rejected() {
        assert_eq!(
            decompose(&[0, 1, 36], ALL_MASK),
            Err(TileError::BonusTileInHand { id: 36 })
        );
    }

    // ============ Claimed groupings ============

    #[test]
    fn test_parse_open_advances_by_claim_span() {
        let open = [3, 4, 5, 9, 9, 9, 31, 31, 31, 31];
        let claims = [Claim::Chow, Claim::Pung, Claim::Kong];
        let pattern = parse_open(&open, &claims);
        assert_eq!(pattern.specific(GroupKind::Chow.bin(), 3), 1);
        assert_eq!(pattern.specific(GroupKind::Pung.bin(), 9), 1);
        assert_eq!(pattern.specific(GroupKind::Kong.bin(), 31), 1);
        assert_eq!(pattern.generic(SET_BIN), 3);
    }

    #[test]
    fn test_decompose_from_keeps_seed() {
        let seed = parse_open(&[9, 9, 9], &[Claim::Pung]);
        let patterns = decompose_from(seed, &[31, 31], WIN_MASK).unwrap();
        assert!(patterns.iter().any(|p| {
            p.specific(GroupKind::Pung.bin(), 9) == 1
                && p.specific(GroupKind::Pair.bin(), 31) == 1
        }));
    }
}
