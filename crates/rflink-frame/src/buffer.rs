//! Outbound frame staging.

use std::io;
use std::sync::Arc;

use tracing::trace;

use crate::frame::{Frame, DATA_CAPACITY, HEADER_SIZE};
use crate::stats::LinkStats;

/// Physical send for completed frames.
///
/// Implementations own the link-layer details: record framing, device
/// access, blocking behavior. `wire_len` counts the header plus the staged
/// payload bytes; payload bytes at and past `wire_len - HEADER_SIZE` are
/// stale and must not leave the host.
pub trait Transmitter<const N: usize = DATA_CAPACITY> {
    /// Send one completed frame, blocking until it is handed off.
    fn transmit(&mut self, frame: &Frame<N>, wire_len: usize) -> io::Result<()>;
}

/// Stages outbound payload bytes into a single live [`Frame`] and hands it
/// to a [`Transmitter`] when the payload region fills or on an explicit
/// [`flush`].
///
/// There is exactly one live frame per buffer. Every mutating operation
/// takes `&mut self`, so an append and any flush it triggers are a single
/// uninterruptible step from the caller's point of view.
///
/// [`flush`]: FrameBuffer::flush
pub struct FrameBuffer<R, const N: usize = DATA_CAPACITY> {
    radio: R,
    stats: Arc<LinkStats>,
    frame: Frame<N>,
    write_index: usize,
    next_sequence: u8,
}

impl<R: Transmitter<N>, const N: usize> FrameBuffer<R, N> {
    /// Creates an empty buffer over a transmitter, counting transmitted
    /// frames into `stats`.
    pub fn new(radio: R, stats: Arc<LinkStats>) -> Self {
        const { assert!(N > 0, "frame payload capacity must be at least 1") };
        Self {
            radio,
            stats,
            frame: Frame::new(),
            write_index: 0,
            next_sequence: 0,
        }
    }

    /// Stages one payload byte, transmitting the frame if it fills.
    ///
    /// Auto-flush resets the stage before this method returns, so the
    /// write index is always strictly below capacity on entry and staging
    /// can never overrun the payload region.
    pub fn append(&mut self, byte: u8) -> io::Result<()> {
        self.frame.payload[self.write_index] = byte;
        self.write_index += 1;
        if self.write_index >= N {
            self.flush()?;
        }
        Ok(())
    }

    /// Transmits the staged frame, if any.
    ///
    /// Stamps the next sequence number, hands the frame to the transmitter
    /// with `wire_len = HEADER_SIZE + staged`, counts it, and resets the
    /// stage. With nothing staged this is a no-op: nothing is sent and the
    /// sequence does not advance. A failed transmit has already consumed
    /// the staged bytes and the sequence number; the link never retries a
    /// frame.
    pub fn flush(&mut self) -> io::Result<()> {
        if self.write_index == 0 {
            return Ok(());
        }
        self.frame.sequence = self.next_sequence;
        self.next_sequence = self.next_sequence.wrapping_add(1);
        let wire_len = HEADER_SIZE + self.write_index;
        self.write_index = 0;
        self.radio.transmit(&self.frame, wire_len)?;
        self.stats.record_tx();
        trace!(
            channel = self.frame.channel,
            sequence = self.frame.sequence,
            wire_len,
            "frame transmitted"
        );
        Ok(())
    }

    /// Tags the live frame with a channel.
    ///
    /// The tag is a property of the whole frame, not of individual bytes:
    /// bytes already staged under another channel are re-tagged together
    /// with everything that follows.
    pub fn set_channel(&mut self, tag: u8) {
        self.frame.channel = tag;
    }

    /// Channel tag currently on the live frame.
    pub fn channel(&self) -> u8 {
        self.frame.channel
    }

    /// Number of payload bytes currently staged.
    pub fn staged(&self) -> usize {
        self.write_index
    }

    /// Sequence number the next flushed frame will carry.
    pub fn next_sequence(&self) -> u8 {
        self.next_sequence
    }

    /// Shared statistics handle.
    pub fn stats(&self) -> &Arc<LinkStats> {
        &self.stats
    }

    /// Returns a reference to the underlying transmitter.
    pub fn get_ref(&self) -> &R {
        &self.radio
    }

    /// Returns a mutable reference to the underlying transmitter.
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.radio
    }

    /// Consumes the buffer, returning the underlying transmitter.
    ///
    /// Staged bytes that were never flushed are dropped.
    pub fn into_inner(self) -> R {
        self.radio
    }
}
