//! Corner scoring.
//!
//! Stones of one colour that are connected through the board's adjacency
//! form a chain. A chain's reach is the union of the sides its fields lie on.
//! A chain that reaches at least three sides captures every corner whose two
//! sides it reaches. A player's score is the number of corners captured by
//! all of their chains.
//!
//! Everything is recomputed from the stone layout on each call. Scratch
//! buffers are local to the call, so any number of threads can score the
//! same position at once.

use std::fmt;

use tracing::trace;

use crate::board::{Board, Field};
use crate::game::Player;

/// A maximal connected group of same-coloured stones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chain {
    pub owner: Player,
    /// Fields in traversal order; the first one is the lowest index.
    pub fields: Vec<Field>,
    /// Bitmask of every side touched by the chain.
    pub sides: u32,
}

/// Corners captured by each player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scores {
    pub first: usize,
    pub second: usize,
}

impl Scores {
    #[inline]
    pub fn get(&self, player: Player) -> usize {
        match player {
            Player::First => self.first,
            Player::Second => self.second,
        }
    }

    #[inline]
    pub fn total(&self) -> usize {
        self.first + self.second
    }

    fn add(&mut self, player: Player, corners: usize) {
        match player {
            Player::First => self.first += corners,
            Player::Second => self.second += corners,
        }
    }
}

impl fmt::Display for Scores {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.first, self.second)
    }
}

/// Partition the stones into chains.
///
/// `stones[i]` is the owner of field `i`, if any. Roots are taken in field
/// order and each field is visited at most once. The traversal uses an
/// explicit stack, so chain length is bounded only by memory.
pub fn chains(board: &Board, stones: &[Option<Player>]) -> Vec<Chain> {
    debug_assert_eq!(stones.len(), board.num_fields());

    let mut visited = vec![false; stones.len()];
    let mut stack: Vec<Field> = Vec::new();
    let mut out = Vec::new();

    for (root, stone) in stones.iter().enumerate() {
        let Some(owner) = *stone else { continue };
        if visited[root] {
            continue;
        }

        visited[root] = true;
        stack.push(root);
        let mut fields = Vec::new();
        let mut sides = 0u32;

        while let Some(f) = stack.pop() {
            fields.push(f);
            sides |= board.side_mask(f);
            for &g in board.neighbors(f) {
                if !visited[g] && stones[g] == Some(owner) {
                    visited[g] = true;
                    stack.push(g);
                }
            }
        }

        out.push(Chain {
            owner,
            fields,
            sides,
        });
    }
    out
}

/// Number of corners of `board` captured by a chain reaching the sides in
/// `sides`.
pub fn captured_corners(board: &Board, sides: u32) -> usize {
    // Fewer than three sides never captures anything.
    let two_dropped = sides & sides.wrapping_sub(1);
    let three = two_dropped & two_dropped.wrapping_sub(1);
    if three == 0 {
        return 0;
    }

    (0..board.num_sides())
        .filter(|&j| {
            let corner = board.corner_mask(j);
            sides & corner == corner
        })
        .count()
}

/// Corners captured by each player.
pub fn scores(board: &Board, stones: &[Option<Player>]) -> Scores {
    let mut scores = Scores::default();
    for chain in chains(board, stones) {
        let corners = captured_corners(board, chain.sides);
        if corners > 0 {
            trace!(
                owner = ?chain.owner,
                root = chain.fields[0],
                size = chain.fields.len(),
                sides = chain.sides,
                corners,
                "chain captures corners"
            );
            scores.add(chain.owner, corners);
        }
    }
    scores
}
