use std::collections::TryReserveError;

/// Errors reported by the fallible map operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Bounds-checked access with a key that is not in the map.
    #[error("key not found")]
    KeyNotFound,

    /// Storage for a new node could not be acquired.
    /// The map is left unchanged.
    #[error("failed to allocate tree node: {0}")]
    Alloc(#[from] TryReserveError),
}

pub type Result<T> = std::result::Result<T, Error>;
