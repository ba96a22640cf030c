//! Poly-Y referee.
//!
//! ## Usage
//!
//! - `poly-y serve --board <file>` - Run the referee protocol on stdin/stdout
//! - `poly-y replay --board <file> [transcript]` - Check a transcript and report the result
//! - `poly-y board --size <n>` - Print a triangular board description
//! - `poly-y demo` - Play a random game on a triangular board

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use poly_y::board::Board;
use poly_y::format::{BoardFormat, ListFormat, read_board, write_board};
use poly_y::game::{FillRule, Game, Rules};
use poly_y::playout::playout;
use poly_y::protocol::Referee;
use poly_y::transcript::{read_transcript, write_transcript};

/// Poly-Y: the game of Y on polygonal boards
#[derive(Parser)]
#[command(name = "poly-y")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log more (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct FormatArgs {
    /// Index lists end with 0 instead of starting with their length
    #[arg(long)]
    zero_terminated: bool,

    /// Each neighbour list is preceded by an `<index> <x> <y>` header
    #[arg(long)]
    coordinates: bool,
}

impl FormatArgs {
    fn format(&self) -> BoardFormat {
        BoardFormat {
            lists: if self.zero_terminated {
                ListFormat::ZeroTerminated
            } else {
                ListFormat::Counted
            },
            coordinates: self.coordinates,
        }
    }
}

#[derive(Args)]
struct GameArgs {
    /// Board description file
    #[arg(long)]
    board: PathBuf,

    #[command(flatten)]
    format: FormatArgs,

    /// Treat the board as full once there are as many moves as fields
    #[arg(long)]
    legacy_fill: bool,
}

impl GameArgs {
    fn load(&self) -> Result<Game> {
        let file = File::open(&self.board)
            .with_context(|| format!("cannot open board {}", self.board.display()))?;
        let board = read_board(BufReader::new(file), &self.format.format())
            .with_context(|| format!("cannot load board {}", self.board.display()))?;
        info!(path = %self.board.display(), %board, "board loaded");

        let rules = Rules {
            fill: if self.legacy_fill {
                FillRule::Moves
            } else {
                FillRule::Fields
            },
        };
        Ok(Game::with_rules(board, rules))
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run the referee protocol on stdin/stdout
    Serve(GameArgs),
    /// Replay a transcript (from a file or stdin) and report the result
    Replay {
        #[command(flatten)]
        game: GameArgs,

        /// Transcript file; stdin if omitted
        transcript: Option<PathBuf>,
    },
    /// Print the description of a triangular board
    Board {
        /// Fields along each edge
        #[arg(long, default_value_t = 5)]
        size: usize,

        #[command(flatten)]
        format: FormatArgs,
    },
    /// Play a random game on a triangular board
    Demo {
        /// Fields along each edge
        #[arg(long, default_value_t = 7)]
        size: usize,

        /// Random seed
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Serve(args) => {
            let mut referee = Referee::new(args.load()?);
            referee.run(io::stdin().lock(), io::stdout().lock())?;
        }
        Commands::Replay { game, transcript } => run_replay(&game, transcript)?,
        Commands::Board { size, format } => {
            let board = Board::triangular(size).context("cannot build board")?;
            write_board(&board, &format.format(), io::stdout().lock())?;
        }
        Commands::Demo { size, seed } => run_demo(size, seed)?,
    }
    Ok(())
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(io::stderr)
        .init();
}

fn run_replay(args: &GameArgs, transcript: Option<PathBuf>) -> Result<()> {
    let game = args.load()?;
    let moves = match &transcript {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("cannot open transcript {}", path.display()))?;
            read_transcript(BufReader::new(file))
        }
        None => read_transcript(io::stdin().lock()),
    }
    .context("cannot read transcript")?;

    let game = Game::replay(game.shared_board(), game.rules(), &moves)
        .context("transcript contains an illegal move")?;

    println!("moves: {}", game.moves().len());
    println!("next: {}", game.next());
    println!("scores: {}", game.scores());
    println!("over: {}", game.is_over());
    match game.winner() {
        Some(p) => println!("winner: {p}"),
        None => println!("winner: none"),
    }
    Ok(())
}

fn run_demo(size: usize, seed: Option<u64>) -> Result<()> {
    let board = Board::triangular(size).context("cannot build board")?;
    println!("Poly-Y demo: {board}\n");

    let mut rng = match seed {
        Some(s) => fastrand::Rng::with_seed(s),
        None => fastrand::Rng::new(),
    };
    let mut game = Game::new(board);
    let scores = playout(&mut game, &mut rng);

    println!("Transcript:");
    write_transcript(game.moves(), io::stdout().lock())?;
    println!("\nScores: {} - {}", scores.first, scores.second);
    match game.winner() {
        Some(p) => println!("Winner: player {p}"),
        None => println!("No winner"),
    }
    Ok(())
}
