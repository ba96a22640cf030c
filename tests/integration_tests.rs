//! Integration tests for poly-y.
//!
//! Boards are either built in code or loaded from `tests/data/`. The
//! property checks drive many seeded random games through the public API.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

use poly_y::board::Board;
use poly_y::format::{BoardFormat, ListFormat, read_board};
use poly_y::game::{Game, Move, MoveError, Player, Rules};
use poly_y::playout::{playout, random_move};
use poly_y::score::Scores;
use poly_y::transcript::{format_transcript, parse_transcript};

// =============================================================================
// Helper functions
// =============================================================================

fn load(name: &str, format: BoardFormat) -> Board {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data").join(name);
    let file = File::open(&path).unwrap_or_else(|e| panic!("{}: {e}", path.display()));
    read_board(BufReader::new(file), &format).unwrap()
}

/// The three-field triangle: every field adjacent to the others, one field
/// per side.
fn triangle() -> Board {
    Board::new(
        vec![vec![1, 2], vec![0, 2], vec![0, 1]],
        vec![vec![0], vec![1], vec![2]],
    )
    .unwrap()
}

/// Play 1-based field indices (`-1` for swap) and panic on an illegal move.
fn setup_game(board: impl Into<Arc<Board>>, moves: &str) -> Game {
    let moves = parse_transcript(moves).unwrap();
    Game::replay(board, Rules::default(), &moves).unwrap()
}

// =============================================================================
// Board loading
// =============================================================================

#[test]
fn test_load_triangle_fixture() {
    let board = load("triangle.txt", BoardFormat::default());
    assert_eq!(board, triangle());
}

#[test]
fn test_load_square_with_coordinates() {
    let format = BoardFormat {
        lists: ListFormat::ZeroTerminated,
        coordinates: true,
    };
    let board = load("square_coords.txt", format);
    assert_eq!(board.num_fields(), 9);
    assert_eq!(board.num_sides(), 4);
    // Field 1 (index 0) is the corner between the left and top sides.
    assert_eq!(board.side_mask(0), 0b1001);
    // Centre field touches no side.
    assert_eq!(board.side_mask(4), 0);
    assert_eq!(board.neighbors(4), &[1, 3, 5, 7]);
}

// =============================================================================
// Concrete scenarios
// =============================================================================

#[test]
fn test_triangle_split_colours_fill_board() {
    let game = setup_game(triangle(), "1 2 3");
    assert_eq!(game.scores(), Scores::default());
    assert!(game.is_over());
    assert_eq!(game.winner(), None);
}

#[test]
fn test_triangle_single_chain_takes_all_corners() {
    // The triangle plus two side-less fields for the second player.
    let board = Board::new(
        vec![vec![1, 2], vec![0, 2], vec![0, 1], vec![], vec![]],
        vec![vec![0], vec![1], vec![2]],
    )
    .unwrap();

    let game = setup_game(board.clone(), "1 4 2 5");
    assert_eq!(game.scores(), Scores::default());
    assert!(!game.is_over());

    let game = setup_game(board, "1 4 2 5 3");
    assert_eq!(game.scores(), Scores { first: 3, second: 0 });
    assert_eq!(game.winner(), Some(Player::First));
    assert!(game.is_over());
}

#[test]
fn test_square_corner_needs_three_sides() {
    let format = BoardFormat {
        lists: ListFormat::ZeroTerminated,
        coordinates: true,
    };
    let board = Arc::new(load("square_coords.txt", format));

    // First player: top row 1 2 3 reaches top, right and left sides.
    let game = setup_game(Arc::clone(&board), "1 5 2 7 3");
    assert_eq!(game.scores(), Scores { first: 2, second: 0 });
    assert!(!game.is_over());

    // Extending down the right edge reaches the bottom side. With four
    // sides, touching all of them is the only way to a majority.
    let game = setup_game(Arc::clone(&board), "1 5 2 7 3 4 6 8 9");
    assert_eq!(game.scores(), Scores { first: 4, second: 0 });
    assert!(game.is_over());
    assert_eq!(game.winner(), Some(Player::First));

    // Two sides only: the corner field alone captures nothing.
    let game = setup_game(board, "1");
    assert_eq!(game.scores(), Scores::default());
}

#[test]
fn test_swap_position() {
    let board = Arc::new(Board::triangular(4).unwrap());

    let mut game = Game::new(Arc::clone(&board));
    assert_eq!(game.execute(Move::Swap), Err(MoveError::SwapOutOfTurn(0)));

    game.execute(Move::Place(0)).unwrap();
    game.execute(Move::Swap).unwrap();
    game.execute(Move::Place(5)).unwrap();
    assert_eq!(game.execute(Move::Swap), Err(MoveError::SwapOutOfTurn(3)));

    // After the swap the top stone is the second player's.
    assert_eq!(game.stones()[0], Some(Player::Second));
    assert_eq!(game.stones()[5], Some(Player::First));
}

#[test]
fn test_swapped_stone_scores_for_second_player() {
    // A one-field board: the only stone spans all three sides.
    let board = Board::new(vec![vec![], vec![]], vec![vec![0], vec![0], vec![0]]).unwrap();
    let game = setup_game(board, "1 -1");
    assert_eq!(game.scores(), Scores { first: 0, second: 3 });
    assert_eq!(game.winner(), Some(Player::Second));
}

// =============================================================================
// Properties over random games
// =============================================================================

#[test]
fn test_occupied_and_over_are_monotonic() {
    let board = Arc::new(Board::triangular(6).unwrap());
    let mut rng = fastrand::Rng::with_seed(2024);

    for _ in 0..50 {
        let mut game = Game::new(Arc::clone(&board));
        let mut was_over = false;
        let mut occupied = vec![false; board.num_fields()];

        while let Some(mv) = random_move(&game, &mut rng) {
            game.execute(mv).unwrap();
            if let Move::Place(f) = mv {
                occupied[f] = true;
            }
            for (f, &o) in occupied.iter().enumerate() {
                assert_eq!(game.is_occupied(f), o);
            }

            // Rejected moves must not change anything.
            let before = game.moves().to_vec();
            if game.moves().len() != 1 {
                assert!(game.execute(Move::Swap).is_err());
            }
            if let Move::Place(f) = mv {
                assert_eq!(game.execute(Move::Place(f)), Err(MoveError::Occupied(f)));
            }
            assert!(game.execute(Move::Place(board.num_fields())).is_err());
            assert_eq!(game.moves(), &before[..]);

            let over = game.is_over();
            assert!(!was_over || over, "game stopped being over");
            was_over = over;
        }
        assert!(game.is_over());
    }
}

#[test]
fn test_scores_are_a_function_of_the_moves() {
    let board = Arc::new(Board::triangular(8).unwrap());
    let mut rng = fastrand::Rng::with_seed(99);

    for _ in 0..30 {
        let mut game = Game::new(Arc::clone(&board));
        let scores = playout(&mut game, &mut rng);

        let replayed = Game::replay(Arc::clone(&board), Rules::default(), game.moves()).unwrap();
        assert_eq!(replayed.scores(), scores);
        assert_eq!(replayed.scores(), game.scores());
        assert_eq!(replayed.is_over(), game.is_over());
    }
}

#[test]
fn test_corner_total_never_exceeds_sides() {
    let mut rng = fastrand::Rng::with_seed(5);
    for size in 1..=9 {
        let board = Arc::new(Board::triangular(size).unwrap());
        for _ in 0..10 {
            let mut game = Game::new(Arc::clone(&board));
            while let Some(mv) = random_move(&game, &mut rng) {
                game.execute(mv).unwrap();
                assert!(game.scores().total() <= board.num_sides());
            }
        }
    }
}

#[test]
fn test_triangular_game_always_has_a_winner() {
    // On a triangular board a full board always contains a winning chain.
    let board = Arc::new(Board::triangular(7).unwrap());
    let mut rng = fastrand::Rng::with_seed(11);
    for _ in 0..30 {
        let mut game = Game::new(Arc::clone(&board));
        playout(&mut game, &mut rng);
        let winner = game.winner().expect("finished Y game without a winner");
        assert_eq!(game.scores().get(winner), 3);
    }
}

#[test]
fn test_transcript_round_trip() {
    let board = Arc::new(Board::triangular(20).unwrap());
    let mut rng = fastrand::Rng::with_seed(3);
    let mut game = Game::new(Arc::clone(&board));
    playout(&mut game, &mut rng);

    let text = format_transcript(game.moves());
    assert!(text.lines().all(|l| l.len() <= 79));
    assert_eq!(parse_transcript(&text).unwrap(), game.moves());
}

#[test]
fn test_concurrent_scoring() {
    let board = Arc::new(Board::triangular(10).unwrap());
    let mut game = Game::new(board);
    let mut rng = fastrand::Rng::with_seed(8);
    for _ in 0..30 {
        let mv = random_move(&game, &mut rng).unwrap();
        game.execute(mv).unwrap();
    }
    let expected = game.scores();

    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4).map(|_| s.spawn(|| game.scores())).collect();
        for h in handles {
            assert_eq!(h.join().unwrap(), expected);
        }
    });
}
