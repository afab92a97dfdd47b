use thiserror::Error;

/// Errors from transmitter backends and capture decoding.
#[derive(Debug, Error)]
pub enum RadioError {
    /// A record's length byte falls outside the representable frame bounds.
    #[error("record length {len} outside frame bounds ({min}..={max})")]
    BadLength {
        /// The length the record claimed.
        len: usize,
        /// Smallest legal on-wire length.
        min: usize,
        /// Largest legal on-wire length for this frame capacity.
        max: usize,
    },

    /// The stream ended in the middle of a record.
    #[error("capture truncated mid-record")]
    Truncated,

    /// I/O error while reading or writing records.
    #[error("radio I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for radio operations.
pub type Result<T> = std::result::Result<T, RadioError>;
