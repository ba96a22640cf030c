//! Board graph: fields, adjacency and polygon sides.
//!
//! A board is an undirected graph of fields indexed from 0, plus a cyclic
//! list of sides, each of which is a set of fields. A field may lie on several
//! sides; the fields shared by two neighbouring sides are that corner's
//! fields. Boards are validated once in [`Board::new`] and are read-only
//! afterwards, so one board can back any number of games on any thread.

use std::fmt;

use thiserror::Error;

use crate::constants::{MAX_FIELDS, MAX_SIDES, MIN_SIDES};

/// A field, identified by its zero-based index.
pub type Field = usize;

/// Reasons a board cannot be built or loaded.
#[derive(Debug, Error)]
pub enum BoardError {
    /// The description does not start with `Poly-Y <fields> <sides>`.
    #[error("board: invalid header")]
    InvalidHeader,

    /// Field count is outside `1..=MAX_FIELDS`.
    #[error("board: invalid number of fields ({0})")]
    FieldCountOutOfRange(usize),

    /// Side count is outside `MIN_SIDES..=MAX_SIDES`.
    #[error("board: invalid number of sides ({0})")]
    SideCountOutOfRange(usize),

    /// A neighbour list is malformed or names a field that does not exist.
    #[error("board: invalid neighbour indices for field {}", .field + 1)]
    InvalidAdjacency { field: Field },

    /// A side list is malformed or names a field that does not exist.
    #[error("board: invalid field indices for side {}", .side + 1)]
    InvalidSideMembership { side: usize },

    /// A `<index> <x> <y>` field header is malformed or out of order.
    #[error("board: invalid record header for field {}", .field + 1)]
    InvalidFieldRecord { field: Field },

    #[error("board: {0}")]
    Io(#[from] std::io::Error),
}

/// An immutable Poly-Y board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Adjacency lists: `fields[i]` holds the neighbours of field `i`.
    fields: Vec<Vec<Field>>,
    /// Side lists: `sides[i]` holds the fields lying on side `i`.
    sides: Vec<Vec<Field>>,
    /// Per field, bit `i` is set iff the field lies on side `i`.
    side_masks: Vec<u32>,
}

impl Board {
    /// Build a board from adjacency lists and side lists (zero-based).
    ///
    /// Adjacency is expected to be symmetric but that is not checked; the
    /// scoring traversal simply follows the lists as given.
    pub fn new(fields: Vec<Vec<Field>>, sides: Vec<Vec<Field>>) -> Result<Self, BoardError> {
        let n = fields.len();
        if n < 1 || n > MAX_FIELDS {
            return Err(BoardError::FieldCountOutOfRange(n));
        }
        if sides.len() < MIN_SIDES || sides.len() > MAX_SIDES {
            return Err(BoardError::SideCountOutOfRange(sides.len()));
        }
        if let Some(field) = fields.iter().position(|adj| adj.iter().any(|&j| j >= n)) {
            return Err(BoardError::InvalidAdjacency { field });
        }
        if let Some(side) = sides.iter().position(|s| s.iter().any(|&j| j >= n)) {
            return Err(BoardError::InvalidSideMembership { side });
        }

        let mut side_masks = vec![0u32; n];
        for (i, side) in sides.iter().enumerate() {
            for &f in side {
                side_masks[f] |= 1 << i;
            }
        }

        Ok(Board {
            fields,
            sides,
            side_masks,
        })
    }

    /// Generate the classic triangular Y board with `size` fields per edge.
    ///
    /// Row `r` holds `r + 1` fields. Sides, in cyclic order: the left edge,
    /// the bottom row, the right edge.
    pub fn triangular(size: usize) -> Result<Self, BoardError> {
        let total = size
            .checked_add(1)
            .and_then(|s| s.checked_mul(size))
            .map(|s| s / 2)
            .unwrap_or(usize::MAX);
        if size == 0 || total > MAX_FIELDS {
            return Err(BoardError::FieldCountOutOfRange(total));
        }

        let index = |r: usize, c: usize| r * (r + 1) / 2 + c;
        let mut fields = Vec::with_capacity(total);
        let mut sides = vec![Vec::new(); 3];

        for r in 0..size {
            for c in 0..=r {
                let mut adj = Vec::with_capacity(6);
                if r > 0 {
                    if c > 0 {
                        adj.push(index(r - 1, c - 1));
                    }
                    if c < r {
                        adj.push(index(r - 1, c));
                    }
                }
                if c > 0 {
                    adj.push(index(r, c - 1));
                }
                if c < r {
                    adj.push(index(r, c + 1));
                }
                if r + 1 < size {
                    adj.push(index(r + 1, c));
                    adj.push(index(r + 1, c + 1));
                }
                fields.push(adj);

                if c == 0 {
                    sides[0].push(index(r, c));
                }
                if r + 1 == size {
                    sides[1].push(index(r, c));
                }
                if c == r {
                    sides[2].push(index(r, c));
                }
            }
        }

        Board::new(fields, sides)
    }

    #[inline]
    pub fn num_fields(&self) -> usize {
        self.fields.len()
    }

    #[inline]
    pub fn num_sides(&self) -> usize {
        self.sides.len()
    }

    /// Whether `field` is a valid index on this board.
    #[inline]
    pub fn contains(&self, field: Field) -> bool {
        field < self.fields.len()
    }

    /// Neighbours of `field`. Panics if `field` is out of range.
    #[inline]
    pub fn neighbors(&self, field: Field) -> &[Field] {
        &self.fields[field]
    }

    /// Fields lying on side `side`. Panics if `side` is out of range.
    #[inline]
    pub fn side(&self, side: usize) -> &[Field] {
        &self.sides[side]
    }

    /// Bitmask of the sides `field` lies on.
    #[inline]
    pub fn side_mask(&self, field: Field) -> u32 {
        self.side_masks[field]
    }

    /// Mask of the two sides meeting at corner `corner`: side `corner` and
    /// the next side in cyclic order.
    #[inline]
    pub fn corner_mask(&self, corner: usize) -> u32 {
        let n = self.sides.len();
        (1 << corner) | (1 << ((corner + 1) % n))
    }

    /// Number of corners a player must hold to win outright.
    #[inline]
    pub fn majority(&self) -> usize {
        self.sides.len() / 2 + 1
    }

    pub(crate) fn adjacency(&self) -> &[Vec<Field>] {
        &self.fields
    }

    pub(crate) fn sides(&self) -> &[Vec<Field>] {
        &self.sides
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Poly-Y board: {} fields, {} sides",
            self.num_fields(),
            self.num_sides()
        )
    }
}
