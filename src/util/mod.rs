//! Text helpers for the terminal surface.
//!
//! Dataset strings may come from a remote URL, so everything drawn from them
//! goes through [`sanitize`] and is fitted to its column budget with
//! [`truncate_to_width`].

mod text;

pub use text::{display_width, sanitize, truncate_to_width, wrap_to_width};

/// Longest query the search prompt accepts, in characters.
pub const MAX_SEARCH_QUERY_LENGTH: usize = 256;
