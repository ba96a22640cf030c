//! Line-oriented referee protocol.
//!
//! A GTP-style text protocol for driving a game from a GUI or a script. Each
//! request is one line, `[id] command [args...]`; each response is
//! `=[id] text` on success or `?[id] message` on failure, followed by a blank
//! line. Lines that are empty or start with `#` are ignored.
//!
//! ## Commands
//!
//! - `name`, `version` - Engine identification
//! - `list_commands` - List all supported commands
//! - `known_command <cmd>` - Check if a command is supported
//! - `quit` - Exit the loop
//! - `clear_board` - Start a new game on the same board
//! - `play <move>` - Play a 1-based field index, or `swap` / `-1`
//! - `legal_moves` - List legal moves in transcript notation
//! - `next` - Player to move (`0` or `1`)
//! - `scores` - Corners captured by each player
//! - `over` - `true` once the game has ended
//! - `winner` - `0`, `1`, or `none`
//! - `transcript` - The moves so far, folded like a transcript file

use std::io::{self, BufRead, Write};

use tracing::{debug, info};

use crate::game::{Game, Move};
use crate::transcript::{format_transcript, parse_move};

const KNOWN_COMMANDS: &[&str] = &[
    "clear_board",
    "known_command",
    "legal_moves",
    "list_commands",
    "name",
    "next",
    "over",
    "play",
    "quit",
    "scores",
    "transcript",
    "version",
    "winner",
];

/// Referee state: one game at a time on a fixed board.
pub struct Referee {
    game: Game,
}

impl Referee {
    pub fn new(game: Game) -> Self {
        Self { game }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Run the command loop until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        info!(board = %self.game.board(), "referee ready");

        for line in input.lines() {
            let line = line?;

            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);

            let parts: Vec<&str> = command_line.split_whitespace().collect();
            if parts.is_empty() {
                continue;
            }

            let command = parts[0].to_lowercase();
            let args = &parts[1..];

            let (success, message) = self.execute(&command, args);
            debug!(%command, success, "handled command");

            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();
            writeln!(output, "{prefix}{id_str} {message}\n")?;
            output.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Split an optional numeric command id off the front of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        if end > 0 {
            if let Ok(id) = trimmed[..end].parse::<u32>() {
                return (Some(id), trimmed[end..].trim());
            }
        }
        (None, trimmed)
    }

    /// Execute one command and return (success, response).
    fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match command {
            "name" => (true, "poly-y".to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                let Some(name) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                let known = KNOWN_COMMANDS.contains(&name.to_lowercase().as_str());
                (true, known.to_string())
            }

            "quit" => (true, String::new()),

            "clear_board" => {
                self.game = Game::with_rules(self.game.shared_board(), self.game.rules());
                (true, String::new())
            }

            "play" => {
                let Some(token) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                let mv = if token.eq_ignore_ascii_case("swap") {
                    Some(Move::Swap)
                } else {
                    parse_move(token)
                };
                let Some(mv) = mv else {
                    return (false, format!("invalid move: {token}"));
                };
                match self.game.execute(mv) {
                    Ok(()) => (true, String::new()),
                    Err(e) => (false, e.to_string()),
                }
            }

            "legal_moves" => {
                let moves: Vec<String> = self
                    .game
                    .legal_moves()
                    .iter()
                    .map(|m| m.to_string())
                    .collect();
                (true, moves.join(" "))
            }

            "next" => (true, self.game.next().to_string()),

            "scores" => (true, self.game.scores().to_string()),

            "over" => (true, self.game.is_over().to_string()),

            "winner" => match self.game.winner() {
                Some(p) => (true, p.to_string()),
                None => (true, "none".to_string()),
            },

            "transcript" => {
                let text = format_transcript(self.game.moves());
                (true, text.trim_end().to_string())
            }

            _ => (false, format!("unknown command: {command}")),
        }
    }
}
