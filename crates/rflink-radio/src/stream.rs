use std::io::{self, ErrorKind, Write};

use bytes::BytesMut;
use rflink_frame::{Frame, Transmitter};
use tracing::trace;

use crate::wire::encode_record;

const INITIAL_BUFFER_CAPACITY: usize = 256;

/// Writes capture records to any `Write` sink.
///
/// The sink can be a serial device node, a capture file, or a pipe; the
/// radio neither knows nor cares. One record per transmit, pushed all the
/// way through before returning: short writes are resumed, `Interrupted`
/// and `WouldBlock` are retried, and a zero-length write reports the sink
/// as closed.
pub struct StreamRadio<W> {
    inner: W,
    buf: BytesMut,
}

impl<W: Write> StreamRadio<W> {
    /// Creates a radio writing records to `inner`.
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY),
        }
    }

    /// Returns a reference to the underlying sink.
    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Returns a mutable reference to the underlying sink.
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.inner
    }

    /// Consumes the radio, returning the underlying sink.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write, const N: usize> Transmitter<N> for StreamRadio<W> {
    fn transmit(&mut self, frame: &Frame<N>, wire_len: usize) -> io::Result<()> {
        self.buf.clear();
        encode_record(frame, wire_len, &mut self.buf).map_err(io::Error::other)?;

        let mut offset = 0usize;
        while offset < self.buf.len() {
            match self.inner.write(&self.buf[offset..]) {
                Ok(0) => return Err(ErrorKind::WriteZero.into()),
                Ok(n) => offset += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
                Err(err) => return Err(err),
            }
        }

        loop {
            match self.inner.flush() {
                Ok(()) => break,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
                Err(err) => return Err(err),
            }
        }

        trace!(
            channel = frame.channel,
            sequence = frame.sequence,
            wire_len,
            "record written"
        );
        Ok(())
    }
}
