//! Random self-play.
//!
//! A playout plays uniformly random legal moves until the game is over. It
//! backs the `demo` command and the property tests; it makes no attempt to
//! play well.

use tracing::debug;

use crate::game::{Game, Move};
use crate::score::Scores;

/// Pick a uniformly random legal move, or `None` if there is none.
pub fn random_move(game: &Game, rng: &mut fastrand::Rng) -> Option<Move> {
    let moves = game.legal_moves();
    if moves.is_empty() {
        return None;
    }
    Some(moves[rng.usize(..moves.len())])
}

/// Play random moves until the game is over (or no legal move remains) and
/// return the final scores.
pub fn playout(game: &mut Game, rng: &mut fastrand::Rng) -> Scores {
    while !game.is_over() {
        let Some(mv) = random_move(game, rng) else {
            break;
        };
        if game.execute(mv).is_err() {
            break;
        }
    }
    let scores = game.scores();
    debug!(moves = game.moves().len(), %scores, "playout finished");
    scores
}
