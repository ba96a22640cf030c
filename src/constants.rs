//! Limits and format constants.
//!
//! Board limits are checked once when a [`Board`](crate::board::Board) is
//! built; everything downstream relies on them (in particular, a side mask
//! always fits in a `u32`).

// =============================================================================
// Board Limits
// =============================================================================

/// Maximum number of fields on a board.
pub const MAX_FIELDS: usize = 1_000_000;

/// Minimum number of sides. A polygon needs at least three.
pub const MIN_SIDES: usize = 3;

/// Maximum number of sides, kept below the width of `u32` so that a set of
/// sides fits in one bitmask.
pub const MAX_SIDES: usize = 31;

// =============================================================================
// Text Formats
// =============================================================================

/// First token of every board description.
pub const HEADER_TAG: &str = "Poly-Y";

/// Transcript token for the swap move.
pub const SWAP_TOKEN: i64 = -1;

/// Maximum transcript line width in columns.
pub const LOG_WIDTH: usize = 79;
