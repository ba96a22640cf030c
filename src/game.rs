//! Game state and move execution.
//!
//! A [`Game`] is a shared, read-only [`Board`] plus the list of moves played
//! so far. Every other property (stone colours, occupancy, turn, score,
//! termination) is derived from the move list on demand.
//!
//! Moves are validated before they are appended; a rejected move leaves the
//! game untouched. Moves are never taken back, so occupancy and the
//! game-over condition only ever go from false to true.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::board::{Board, Field};
use crate::score::{self, Scores};

/// One of the two players. `First` moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    First,
    Second,
}

impl Player {
    /// The player who makes move number `n` (zero-based).
    #[inline]
    pub fn for_move(n: usize) -> Player {
        if n % 2 == 0 {
            Player::First
        } else {
            Player::Second
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Player::First => 0,
            Player::Second => 1,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

/// A move: claim a field, or take over the opponent's first stone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    /// Displays as `field + 1`, saturating, so `Place(usize::MAX)` has no
    /// transcript token of its own. Real boards stop far below that.
    Place(Field),
    /// Only legal as the second move of the game.
    Swap,
}

/// Formats as a transcript token: the 1-based field index, or `-1` for swap.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Place(field) => write!(f, "{}", field.saturating_add(1)),
            Move::Swap => write!(f, "-1"),
        }
    }
}

/// Why a move was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("illegal move: field {} does not exist", .0.saturating_add(1))]
    InvalidField(Field),

    #[error("illegal move: field {} is occupied", .0.saturating_add(1))]
    Occupied(Field),

    /// Carries the number of moves already played.
    #[error("illegal move: swap is only allowed as the second move (move {} requested)", .0 + 1)]
    SwapOutOfTurn(usize),
}

/// A move list that could not be replayed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("move {} ({mv}) rejected: {source}", .index + 1)]
pub struct ReplayError {
    /// Zero-based position of the offending move.
    pub index: usize,
    pub mv: Move,
    pub source: MoveError,
}

/// When is the board considered full?
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FillRule {
    /// When every field holds a stone. A swap does not place a stone.
    #[default]
    Fields,
    /// When the number of moves reaches the number of fields, counting a
    /// swap as a move.
    Moves,
}

/// Rule variations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rules {
    pub fill: FillRule,
}

/// A game in progress on a shared board.
#[derive(Debug, Clone)]
pub struct Game {
    board: Arc<Board>,
    moves: Vec<Move>,
    rules: Rules,
}

impl Game {
    pub fn new(board: impl Into<Arc<Board>>) -> Self {
        Self::with_rules(board, Rules::default())
    }

    pub fn with_rules(board: impl Into<Arc<Board>>, rules: Rules) -> Self {
        Game {
            board: board.into(),
            moves: Vec::new(),
            rules,
        }
    }

    /// Play `moves` in order on a fresh game, stopping at the first illegal
    /// one.
    pub fn replay(
        board: impl Into<Arc<Board>>,
        rules: Rules,
        moves: &[Move],
    ) -> Result<Self, ReplayError> {
        let mut game = Self::with_rules(board, rules);
        for (index, &mv) in moves.iter().enumerate() {
            game.execute(mv)
                .map_err(|source| ReplayError { index, mv, source })?;
        }
        Ok(game)
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The board handle, for starting another game on the same board.
    pub fn shared_board(&self) -> Arc<Board> {
        Arc::clone(&self.board)
    }

    #[inline]
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    #[inline]
    pub fn rules(&self) -> Rules {
        self.rules
    }

    /// The player to move.
    #[inline]
    pub fn next(&self) -> Player {
        Player::for_move(self.moves.len())
    }

    /// Whether some earlier move placed a stone on `field`.
    ///
    /// Scans the move list, so validating every move of a full game costs
    /// time quadratic in the number of fields.
    pub fn is_occupied(&self, field: Field) -> bool {
        self.moves.iter().any(|&m| m == Move::Place(field))
    }

    /// Number of fields holding a stone.
    pub fn occupied_count(&self) -> usize {
        self.moves
            .iter()
            .filter(|m| matches!(m, Move::Place(_)))
            .count()
    }

    /// Check `mv` against the current position without playing it.
    pub fn validate(&self, mv: Move) -> Result<(), MoveError> {
        match mv {
            Move::Swap if self.moves.len() == 1 => Ok(()),
            Move::Swap => Err(MoveError::SwapOutOfTurn(self.moves.len())),
            Move::Place(f) if !self.board.contains(f) => Err(MoveError::InvalidField(f)),
            Move::Place(f) if self.is_occupied(f) => Err(MoveError::Occupied(f)),
            Move::Place(_) => Ok(()),
        }
    }

    /// Play `mv` for the player to move. On error nothing changes.
    pub fn execute(&mut self, mv: Move) -> Result<(), MoveError> {
        if let Err(e) = self.validate(mv) {
            debug!(player = %self.next(), %mv, error = %e, "move rejected");
            return Err(e);
        }
        debug!(player = %self.next(), %mv, n = self.moves.len(), "move played");
        self.moves.push(mv);
        Ok(())
    }

    /// Owner of every field, indexed by field.
    ///
    /// The stone placed by move `i` belongs to the player who made it. A swap
    /// hands the first stone to the second player.
    pub fn stones(&self) -> Vec<Option<Player>> {
        let mut stones = vec![None; self.board.num_fields()];
        for (i, &mv) in self.moves.iter().enumerate() {
            let field = match mv {
                Move::Place(f) => f,
                Move::Swap => match self.moves[0] {
                    Move::Place(f) => f,
                    Move::Swap => continue,
                },
            };
            stones[field] = Some(Player::for_move(i));
        }
        stones
    }

    /// Corners currently captured by each player.
    pub fn scores(&self) -> Scores {
        score::scores(&self.board, &self.stones())
    }

    /// The player holding a strict majority of the corners, if any.
    pub fn winner(&self) -> Option<Player> {
        let scores = self.scores();
        let majority = self.board.majority();
        [Player::First, Player::Second]
            .into_iter()
            .find(|&p| scores.get(p) >= majority)
    }

    /// Whether the board is full or a player has won.
    pub fn is_over(&self) -> bool {
        let full = match self.rules.fill {
            FillRule::Fields => self.occupied_count() >= self.board.num_fields(),
            FillRule::Moves => self.moves.len() >= self.board.num_fields(),
        };
        full || self.winner().is_some()
    }

    /// Every legal move: swap (when it is the second move), then each empty
    /// field in ascending order.
    pub fn legal_moves(&self) -> Vec<Move> {
        let mut occupied = vec![false; self.board.num_fields()];
        for &mv in &self.moves {
            if let Move::Place(f) = mv {
                occupied[f] = true;
            }
        }

        let mut moves = Vec::new();
        if self.moves.len() == 1 {
            moves.push(Move::Swap);
        }
        moves.extend(
            occupied
                .iter()
                .enumerate()
                .filter(|&(_, &o)| !o)
                .map(|(f, _)| Move::Place(f)),
        );
        moves
    }
}
