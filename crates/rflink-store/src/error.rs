use thiserror::Error;

/// Errors from storage backends.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Address past the end of the storage.
    #[error("address {address} out of range (storage holds {size} bytes)")]
    AddressOutOfRange {
        /// The offending address.
        address: usize,
        /// Storage size in bytes.
        size: usize,
    },

    /// I/O error from a persistent backend.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;
