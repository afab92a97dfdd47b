//! Channel multiplexing over one shared frame buffer.

use std::io;

use crate::buffer::{FrameBuffer, Transmitter};
use crate::channel::{COMMAND, SERIAL};
use crate::frame::DATA_CAPACITY;

/// Routes per-channel byte streams into one shared [`FrameBuffer`].
///
/// All channels stage into the same live frame. A byte's channel is
/// recorded by tagging the whole frame, so switching channels between
/// flushes re-tags bytes staged earlier as well; callers that need a clean
/// channel boundary flush before switching.
pub struct ChannelMux<R, const N: usize = DATA_CAPACITY> {
    buffer: FrameBuffer<R, N>,
}

impl<R: Transmitter<N>, const N: usize> ChannelMux<R, N> {
    /// Wraps a frame buffer.
    pub fn new(buffer: FrameBuffer<R, N>) -> Self {
        Self { buffer }
    }

    /// Sends one byte on the transparent serial-relay channel.
    pub fn send_serial(&mut self, byte: u8) -> io::Result<()> {
        self.send_on(SERIAL, byte)
    }

    /// Sends one byte on the remote command channel.
    pub fn send_command(&mut self, byte: u8) -> io::Result<()> {
        self.send_on(COMMAND, byte)
    }

    /// Tags the live frame with `tag`, then stages one byte.
    pub fn send_on(&mut self, tag: u8, byte: u8) -> io::Result<()> {
        self.buffer.set_channel(tag);
        self.buffer.append(byte)
    }

    /// Transmits the staged frame, if any.
    pub fn flush(&mut self) -> io::Result<()> {
        self.buffer.flush()
    }

    /// Returns a reference to the frame buffer.
    pub fn buffer(&self) -> &FrameBuffer<R, N> {
        &self.buffer
    }

    /// Returns a mutable reference to the frame buffer.
    pub fn buffer_mut(&mut self) -> &mut FrameBuffer<R, N> {
        &mut self.buffer
    }

    /// Consumes the mux, returning the frame buffer.
    pub fn into_inner(self) -> FrameBuffer<R, N> {
        self.buffer
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::frame::{Frame, HEADER_SIZE};
    use crate::stats::LinkStats;

    #[derive(Default)]
    struct RecordingRadio {
        sent: Vec<(u8, Vec<u8>)>,
    }

    impl<const N: usize> Transmitter<N> for RecordingRadio {
        fn transmit(&mut self, frame: &Frame<N>, wire_len: usize) -> io::Result<()> {
            self.sent.push((
                frame.channel,
                frame.payload[..wire_len - HEADER_SIZE].to_vec(),
            ));
            Ok(())
        }
    }

    fn mux<const N: usize>() -> ChannelMux<RecordingRadio, N> {
        ChannelMux::new(FrameBuffer::new(
            RecordingRadio::default(),
            Arc::new(LinkStats::new()),
        ))
    }

    #[test]
    fn serial_bytes_carry_the_serial_tag() {
        let mut mux = mux::<8>();
        mux.send_serial(b'h').unwrap();
        mux.send_serial(b'i').unwrap();
        mux.flush().unwrap();

        let sent = &mux.buffer().get_ref().sent;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0], (SERIAL, b"hi".to_vec()));
    }

    #[test]
    fn command_bytes_carry_the_command_tag() {
        let mut mux = mux::<8>();
        mux.send_command(b'?').unwrap();
        mux.flush().unwrap();

        assert_eq!(mux.buffer().get_ref().sent[0], (COMMAND, b"?".to_vec()));
    }

    #[test]
    fn retag_applies_to_already_staged_bytes() {
        let mut mux = mux::<8>();
        mux.send_serial(b'a').unwrap();
        mux.send_serial(b'b').unwrap();
        mux.send_command(b'c').unwrap();
        mux.flush().unwrap();

        // One frame left, and the later channel claimed all three bytes.
        let sent = &mux.buffer().get_ref().sent;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0], (COMMAND, b"abc".to_vec()));
    }

    #[test]
    fn flush_between_channels_keeps_tags_separate() {
        let mut mux = mux::<8>();
        mux.send_serial(b'a').unwrap();
        mux.flush().unwrap();
        mux.send_command(b'b').unwrap();
        mux.flush().unwrap();

        let sent = &mux.buffer().get_ref().sent;
        assert_eq!(sent[0], (SERIAL, b"a".to_vec()));
        assert_eq!(sent[1], (COMMAND, b"b".to_vec()));
    }

    #[test]
    fn auto_flush_passes_through_the_mux() {
        let mut mux = mux::<2>();
        for byte in *b"xyz" {
            mux.send_serial(byte).unwrap();
        }
        let sent = &mux.buffer().get_ref().sent;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0], (SERIAL, b"xy".to_vec()));
        assert_eq!(mux.buffer().staged(), 1);
    }

    #[test]
    fn user_defined_tags_pass_through() {
        let mut mux = mux::<8>();
        mux.send_on(42, b'u').unwrap();
        mux.flush().unwrap();

        assert_eq!(mux.buffer().get_ref().sent[0], (42, b"u".to_vec()));
    }
}
