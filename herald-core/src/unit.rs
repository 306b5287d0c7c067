//! The zero-information response sentinel.

use std::fmt;

/// A zero-information value standing in for "no response."
///
/// Command-style requests declare `Unit` as their response so that
/// request/response and command-without-response share one dispatch path.
/// All instances compare equal and hash identically; the type carries no
/// state.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Unit;

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("()")
    }
}

impl From<()> for Unit {
    fn from(_: ()) -> Self {
        Unit
    }
}
