//! Error type shared by every ordered map in the crate.

/// Convenient Result type alias.
///
/// Every fallible map operation returns `Result<T>` so callers can use `?`
/// uniformly across strategies.
pub type Result<T> = core::result::Result<T, Error>;

/// The ways a map operation can fail.
///
/// Insertion never fails for a key type with a total order, so the only
/// recoverable failure is asking for a key the map does not hold. The map
/// is left untouched when an operation returns an error.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, thiserror::Error)]
pub enum Error {
    /// `find`, `get` or `delete` was called with a key that is not stored.
    #[error("key not found")]
    KeyNotFound,
}
