// MJ-Score Token Stream
// Sorted tile cursor with look-ahead and swap-forward rotation

use crate::tiles;
use crate::types::Tile;

/// A sorted stream of tile tokens with a single forward cursor.
///
/// The decomposer consumes tokens in order, but a connected pair can claim a
/// tile that sits further down the stream, past duplicates of the current
/// tile. `swap_for_next` rotates such a tile into the slot of the token the
/// cursor read last (the look-ahead it is about to discard), so a cloned
/// branch can continue with the swapped tile while the displaced duplicates
/// shift down and get read later.
///
/// # Example
///
/// ```
/// use mj_score::stream::TokenStream;
///
/// let mut stream = TokenStream::new(vec![4, 3, 3]);
/// assert_eq!(stream.next(), Some(3));          // current tile
/// assert_eq!(stream.next(), Some(3));          // look-ahead: a duplicate
/// assert_eq!(stream.can_connect(3), Some(2));  // but a 4 sits further down
/// let mut branch = stream.clone();
/// assert_eq!(branch.swap_for_next(2), 4);      // 4 replaces the look-ahead
/// assert_eq!(branch.next(), Some(3));          // the duplicate is read later
/// assert!(!branch.has_next());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenStream {
    tokens: Vec<Tile>,
    position: usize,
}

impl TokenStream {
    /// Build a stream from tiles in any order; tokens are sorted ascending
    pub fn new(mut tokens: Vec<Tile>) -> Self {
        tokens.sort_unstable();
        Self {
            tokens,
            position: 0,
        }
    }

    /// True while unread tokens remain
    #[inline]
    pub fn has_next(&self) -> bool {
        self.position < self.tokens.len()
    }

    /// Read the next token and advance the cursor
    pub fn next(&mut self) -> Option<Tile> {
        let token = self.tokens.get(self.position).copied();
        if token.is_some() {
            self.position += 1;
        }
        token
    }

    /// Scan the unread remainder for a suit-successor of `token`, returning
    /// its index in the stream if present
    pub fn can_connect(&self, token: Tile) -> Option<usize> {
        (self.position..self.tokens.len())
            .find(|&i| tiles::is_suit_successor(token, self.tokens[i]))
    }

    /// Rotate the token at `swap_pos` into the slot of the most recently
    /// consumed token, shifting the tokens between them one place up. The
    /// cursor does not move, so the displaced token is read again later.
    ///
    /// Callers must have consumed at least one token, and `swap_pos` must be
    /// an index returned by `can_connect`.
    pub fn swap_for_next(&mut self, swap_pos: usize) -> Tile {
        let slot = self.position - 1;
        self.tokens[slot..=swap_pos].rotate_right(1);
        self.tokens[slot]
    }

    /// Number of unread tokens
    pub fn remaining(&self) -> usize {
        self.tokens.len() - self.position
    }

    /// The full sorted token list, read and unread
    pub fn tokens(&self) -> &[Tile] {
        &self.tokens
    }
}
