//! Board description text format.
//!
//! ```text
//! Poly-Y <fields> <sides>
//! <neighbour list of field 1>
//! ...
//! <neighbour list of field n>
//! <field list of side 1>
//! ...
//! ```
//!
//! All indices in the text are 1-based. A list is either prefixed by its
//! length (`3 2 4 6`) or terminated by a zero (`2 4 6 0`), see [`ListFormat`].
//! Some boards also carry an `<index> <x> <y>` layout header before each
//! neighbour list; the coordinates are read and dropped.
//!
//! Line breaks carry no meaning, the reader works on whitespace-separated
//! tokens.

use std::io::{Read, Write};

use tracing::debug;

use crate::board::{Board, BoardError, Field};
use crate::constants::{HEADER_TAG, MAX_FIELDS, MAX_SIDES, MIN_SIDES};

/// How index lists are delimited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ListFormat {
    /// Length first, then that many indices.
    #[default]
    Counted,
    /// Indices followed by a terminating `0`.
    ZeroTerminated,
}

/// Board description dialect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoardFormat {
    pub lists: ListFormat,
    /// Each neighbour list is preceded by an `<index> <x> <y>` header.
    pub coordinates: bool,
}

/// Read a board description from `reader`.
pub fn read_board<R: Read>(mut reader: R, format: &BoardFormat) -> Result<Board, BoardError> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    parse_board(&text, format)
}

/// Parse a board description held in memory.
pub fn parse_board(text: &str, format: &BoardFormat) -> Result<Board, BoardError> {
    let mut tokens = text.split_whitespace();

    if tokens.next() != Some(HEADER_TAG) {
        return Err(BoardError::InvalidHeader);
    }
    let (nfield, nside) = match (next_usize(&mut tokens), next_usize(&mut tokens)) {
        (Some(f), Some(s)) => (f, s),
        _ => return Err(BoardError::InvalidHeader),
    };
    if nfield < 1 || nfield > MAX_FIELDS {
        return Err(BoardError::FieldCountOutOfRange(nfield));
    }
    if nside < MIN_SIDES || nside > MAX_SIDES {
        return Err(BoardError::SideCountOutOfRange(nside));
    }

    let mut fields = Vec::with_capacity(nfield);
    for field in 0..nfield {
        if format.coordinates && !skip_field_header(&mut tokens, field) {
            return Err(BoardError::InvalidFieldRecord { field });
        }
        let adj = read_indices(&mut tokens, format.lists, nfield)
            .ok_or(BoardError::InvalidAdjacency { field })?;
        fields.push(adj);
    }

    let mut sides = Vec::with_capacity(nside);
    for side in 0..nside {
        let members = read_indices(&mut tokens, format.lists, nfield)
            .ok_or(BoardError::InvalidSideMembership { side })?;
        sides.push(members);
    }

    debug!(fields = nfield, sides = nside, "parsed board description");
    Board::new(fields, sides)
}

/// Write `board` in the given dialect. Layout coordinates are not kept on
/// the board, so they are written as zeros.
pub fn write_board<W: Write>(board: &Board, format: &BoardFormat, mut w: W) -> std::io::Result<()> {
    writeln!(w, "{HEADER_TAG} {} {}", board.num_fields(), board.num_sides())?;
    for (i, adj) in board.adjacency().iter().enumerate() {
        if format.coordinates {
            writeln!(w, "{} 0 0", i + 1)?;
        }
        write_indices(&mut w, format.lists, adj)?;
    }
    for side in board.sides() {
        write_indices(&mut w, format.lists, side)?;
    }
    w.flush()
}

fn next_usize<'a>(tokens: &mut impl Iterator<Item = &'a str>) -> Option<usize> {
    tokens.next()?.parse().ok()
}

/// Consume `<index> <x> <y>`. The index must name `field` (1-based).
fn skip_field_header<'a>(tokens: &mut impl Iterator<Item = &'a str>, field: Field) -> bool {
    let index = next_usize(tokens);
    let x = tokens.next().and_then(|t| t.parse::<f64>().ok());
    let y = tokens.next().and_then(|t| t.parse::<f64>().ok());
    index == Some(field + 1) && x.is_some() && y.is_some()
}

/// Read one list of 1-based indices and convert it to 0-based fields.
/// Returns `None` if the list is truncated, malformed, or out of range.
fn read_indices<'a>(
    tokens: &mut impl Iterator<Item = &'a str>,
    lists: ListFormat,
    nfield: usize,
) -> Option<Vec<Field>> {
    let to_field = |i: usize| (1..=nfield).contains(&i).then(|| i - 1);

    match lists {
        ListFormat::Counted => {
            let count = next_usize(tokens)?;
            let mut res = Vec::with_capacity(count.min(nfield));
            for _ in 0..count {
                res.push(to_field(next_usize(tokens)?)?);
            }
            Some(res)
        }
        ListFormat::ZeroTerminated => {
            let mut res = Vec::new();
            loop {
                match next_usize(tokens)? {
                    0 => return Some(res),
                    i => res.push(to_field(i)?),
                }
            }
        }
    }
}

fn write_indices<W: Write>(w: &mut W, lists: ListFormat, fields: &[Field]) -> std::io::Result<()> {
    let body: Vec<String> = fields.iter().map(|f| (f + 1).to_string()).collect();
    match lists {
        ListFormat::Counted if body.is_empty() => writeln!(w, "0"),
        ListFormat::Counted => writeln!(w, "{} {}", body.len(), body.join(" ")),
        ListFormat::ZeroTerminated if body.is_empty() => writeln!(w, "0"),
        ListFormat::ZeroTerminated => writeln!(w, "{} 0", body.join(" ")),
    }
}
