// MJ-Score Tile Alphabet
// Identifiers, classification predicates and display names for the 42-tile set

use crate::types::{Tile, TileError};

/// Tiles per numbered suit
pub const SUIT_SPAN: usize = 9;

/// First bamboo tile
pub const BAMBOO: Tile = 0;
/// First character tile
pub const CHARACTERS: Tile = 9;
/// First dot tile
pub const DOTS: Tile = 18;
/// First honour tile (east wind)
pub const HONOURS: Tile = 27;

pub const EAST: Tile = 27;
pub const SOUTH: Tile = 28;
pub const WEST: Tile = 29;
pub const NORTH: Tile = 30;

/// First dragon tile
pub const DRAGONS: Tile = 31;
pub const RED: Tile = 31;
pub const GREEN: Tile = 32;
pub const WHITE: Tile = 33;

/// Tiles that can participate in groupings (everything below the bonus tiles)
pub const PLAY_TILES: usize = 34;

/// First flower tile
pub const FLOWERS: Tile = 34;
/// First season tile
pub const SEASONS: Tile = 38;
/// Total number of distinct tile identifiers
pub const TILE_COUNT: usize = 42;

/// The suit families a tile identifier can belong to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Suit {
    Bamboo,
    Characters,
    Dots,
    Honours,
    Bonus,
}

/// Suited (numbered) tile: bamboo, characters or dots
#[inline]
pub fn is_numeral(tile: Tile) -> bool {
    tile < HONOURS
}

/// Numbered tile with face two through eight
#[inline]
pub fn is_simple(tile: Tile) -> bool {
    is_numeral(tile) && {
        let face = tile % SUIT_SPAN;
        face > 0 && face < 8
    }
}

/// Numbered one or nine
#[inline]
pub fn is_terminal(tile: Tile) -> bool {
    is_numeral(tile) && {
        let face = tile % SUIT_SPAN;
        face == 0 || face == 8
    }
}

#[inline]
pub fn is_one(tile: Tile) -> bool {
    is_numeral(tile) && tile % SUIT_SPAN == 0
}

#[inline]
pub fn is_nine(tile: Tile) -> bool {
    is_numeral(tile) && tile % SUIT_SPAN == 8
}

#[inline]
pub fn is_two(tile: Tile) -> bool {
    is_numeral(tile) && tile % SUIT_SPAN == 1
}

#[inline]
pub fn is_eight(tile: Tile) -> bool {
    is_numeral(tile) && tile % SUIT_SPAN == 7
}

/// Wind or dragon
#[inline]
pub fn is_honour(tile: Tile) -> bool {
    (HONOURS..PLAY_TILES).contains(&tile)
}

#[inline]
pub fn is_wind(tile: Tile) -> bool {
    (EAST..DRAGONS).contains(&tile)
}

#[inline]
pub fn is_dragon(tile: Tile) -> bool {
    (DRAGONS..PLAY_TILES).contains(&tile)
}

/// Flower or season; bonus tiles never participate in groupings
#[inline]
pub fn is_bonus(tile: Tile) -> bool {
    tile >= FLOWERS
}

#[inline]
pub fn is_flower(tile: Tile) -> bool {
    (FLOWERS..SEASONS).contains(&tile)
}

#[inline]
pub fn is_season(tile: Tile) -> bool {
    tile >= SEASONS && tile < TILE_COUNT
}

/// Suit family of a tile
pub fn suit(tile: Tile) -> Suit {
    if tile < CHARACTERS {
        Suit::Bamboo
    } else if tile < DOTS {
        Suit::Characters
    } else if tile < HONOURS {
        Suit::Dots
    } else if tile < FLOWERS {
        Suit::Honours
    } else {
        Suit::Bonus
    }
}

/// Zero-based face rank within a numbered suit (0 = one, 8 = nine).
/// `None` for honours and bonus tiles.
pub fn face_rank(tile: Tile) -> Option<usize> {
    if is_numeral(tile) {
        Some(tile % SUIT_SPAN)
    } else {
        None
    }
}

/// True when `next` directly follows `current` in the same numbered suit
#[inline]
pub fn is_suit_successor(current: Tile, next: Tile) -> bool {
    current + 1 == next && is_numeral(current) && is_numeral(next) && current % SUIT_SPAN < 8
}

/// Validate a tile identifier
pub fn check(id: usize) -> Result<Tile, TileError> {
    if id < TILE_COUNT {
        Ok(id)
    } else {
        Err(TileError::InvalidTileId {
            id,
            limit: TILE_COUNT,
        })
    }
}

/// Validate a tile identifier that must be groupable (no bonus tiles)
pub fn check_play(id: usize) -> Result<Tile, TileError> {
    let tile = check(id)?;
    if is_bonus(tile) {
        Err(TileError::BonusTileInHand { id })
    } else {
        Ok(tile)
    }
}

const NAMES: [&str; TILE_COUNT] = [
    "bamboo 1",
    "bamboo 2",
    "bamboo 3",
    "bamboo 4",
    "bamboo 5",
    "bamboo 6",
    "bamboo 7",
    "bamboo 8",
    "bamboo 9",
    "characters 1",
    "characters 2",
    "characters 3",
    "characters 4",
    "characters 5",
    "characters 6",
    "characters 7",
    "characters 8",
    "characters 9",
    "dots 1",
    "dots 2",
    "dots 3",
    "dots 4",
    "dots 5",
    "dots 6",
    "dots 7",
    "dots 8",
    "dots 9",
    "east wind",
    "south wind",
    "west wind",
    "north wind",
    "red dragon",
    "green dragon",
    "white dragon",
    "flower 1",
    "flower 2",
    "flower 3",
    "flower 4",
    "season 1",
    "season 2",
    "season 3",
    "season 4",
];

/// Display name for a valid tile identifier
pub fn name(tile: Tile) -> &'static str {
    NAMES.get(tile).copied().unwrap_or("unknown tile")
}

#[cfg(test)]
mod tests {
    use super::*;

    // ============ Classification ============

    #[test]
    fn test_suit_boundaries() {
        assert_eq!(suit(0), Suit::Bamboo);
        assert_eq!(suit(8), Suit::Bamboo);
        assert_eq!(suit(9), Suit::Characters);
        assert_eq!(suit(17), Suit::Characters);
        assert_eq!(suit(18), Suit::Dots);
        assert_eq!(suit(26), Suit::Dots);
        assert_eq!(suit(EAST), Suit::Honours);
        assert_eq!(suit(WHITE), Suit::Honours);
        assert_eq!(suit(FLOWERS), Suit::Bonus);
        assert_eq!(suit(TILE_COUNT - 1), Suit::Bonus);
    }

    #[test]
    fn test_simple_and_terminal_partition_numerals() {
        for tile in 0..HONOURS {
            assert_ne!(is_simple(tile), is_terminal(tile), "tile {}", tile);
        }
        assert!(!is_simple(EAST));
        assert!(!is_terminal(EAST));
    }

    #[test]
    fn test_honour_subgroups() {
        for wind in EAST..=NORTH {
            assert!(is_wind(wind));
            assert!(is_honour(wind));
            assert!(!is_dragon(wind));
        }
        for dragon in RED..=WHITE {
            assert!(is_dragon(dragon));
            assert!(is_honour(dragon));
            assert!(!is_wind(dragon));
        }
        assert!(!is_honour(FLOWERS));
    }

    #[test]
    fn test_bonus_subgroups() {
        assert!(is_flower(34) && is_flower(37));
        assert!(is_season(38) && is_season(41));
        assert!(!is_flower(38));
        assert!(!is_season(37));
        for tile in FLOWERS..TILE_COUNT {
            assert!(is_bonus(tile));
        }
    }

    // ============ Sequence adjacency ============

    #[test]
    fn test_successor_within_suit() {
        assert!(is_suit_successor(3, 4));
        assert!(is_suit_successor(18, 19));
    }

    #[test]
    fn test_successor_rejects_suit_crossings() {
        // bamboo 9 to characters 1 is adjacent numerically but not a run
        assert!(!is_suit_successor(8, 9));
        assert!(!is_suit_successor(17, 18));
        // dots 9 to east wind
        assert!(!is_suit_successor(26, 27));
        assert!(!is_suit_successor(EAST, SOUTH));
    }

    #[test]
    fn test_face_rank() {
        assert_eq!(face_rank(0), Some(0));
        assert_eq!(face_rank(17), Some(8));
        assert_eq!(face_rank(EAST), None);
        assert_eq!(face_rank(FLOWERS), None);
    }

    // ============ Validation ============

    #[test]
    fn test_check_bounds() {
        assert!(check(0).is_ok());
        assert!(check(41).is_ok());
        assert_eq!(
            check(42),
            Err(TileError::InvalidTileId { id: 42, limit: 42 })
        );
    }

    #[test]
    fn test_check_play_rejects_bonus() {
        assert!(check_play(WHITE).is_ok());
        assert_eq!(
            check_play(FLOWERS),
            Err(TileError::BonusTileInHand { id: FLOWERS })
        );
    }

    #[test]
    fn test_names_cover_alphabet() {
        assert_eq!(name(0), "bamboo 1");
        assert_eq!(name(EAST), "east wind");
        assert_eq!(name(WHITE), "white dragon");
        assert_eq!(name(41), "season 4");
        assert_eq!(name(99), "unknown tile");
    }
}
