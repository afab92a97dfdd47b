//! The frame type and its layout constants.

/// Frame header size: channel tag (1 byte) plus sequence number (1 byte).
pub const HEADER_SIZE: usize = 2;

/// Default payload capacity in bytes.
///
/// Header plus payload fill the 32-byte physical packet common to small
/// packet radios.
pub const DATA_CAPACITY: usize = 30;

/// Largest on-wire frame size at the default capacity.
pub const MAX_WIRE_SIZE: usize = HEADER_SIZE + DATA_CAPACITY;

/// One radio frame: routing header plus a fixed payload region.
///
/// How many payload bytes are meaningful is a property of the wire length
/// that travels with the frame, not of the frame itself; bytes past that
/// length are stale filler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame<const N: usize = DATA_CAPACITY> {
    /// Channel tag naming the logical source of the payload
    /// (see [`crate::channel`]). Zero means never tagged.
    pub channel: u8,
    /// Sequence number, stamped when the frame is flushed. Wraps at 256.
    pub sequence: u8,
    /// Payload region.
    pub payload: [u8; N],
}

impl<const N: usize> Frame<N> {
    /// An untagged frame with a zeroed payload.
    pub fn new() -> Self {
        Self {
            channel: 0,
            sequence: 0,
            payload: [0; N],
        }
    }

    /// Payload capacity in bytes.
    pub const fn capacity(&self) -> usize {
        N
    }
}

impl<const N: usize> Default for Frame<N> {
    fn default() -> Self {
        Self::new()
    }
}
