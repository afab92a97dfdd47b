//! Operator-console frame dumps.
//!
//! Every frame crossing the link can be rendered as a one-line bracketed
//! record:
//!
//! ```text
//! [TX 5 1 5 A\r\\]
//!  ││ │ │ │ └ escaped payload bytes
//!  ││ │ │ └ sequence number
//!  ││ │ └ channel tag
//!  ││ └ on-wire length
//!  │└ literal 'X'
//!  └ direction tag supplied by the caller ('T' or 'R')
//! ```
//!
//! Rendering is byte-oriented. The escape's fallback arm emits raw byte
//! values (see [`escape_into`]), so records are not guaranteed to be valid
//! UTF-8 and sinks must accept arbitrary bytes.

use std::io::{self, Write};

use crate::buffer::Transmitter;
use crate::frame::{Frame, HEADER_SIZE};

/// Escapes one payload byte into `out` for console rendering.
///
/// Backslash doubles, printable ASCII (0x20..=0x7E) passes through, CR and
/// LF become `\r` and `\n`. Every other byte takes the pseudo-hex form:
/// `\x`, a literal `0` pad only when the value is below 0x10, then the raw
/// byte value itself rather than its hex digits. The fallback arm is not
/// reversible; it is kept byte-for-byte compatible with the historic dump
/// format that deployed console tooling parses.
pub fn escape_into(byte: u8, out: &mut Vec<u8>) {
    match byte {
        b'\\' => out.extend_from_slice(b"\\\\"),
        0x20..=0x7e => out.push(byte),
        b'\r' => out.extend_from_slice(b"\\r"),
        b'\n' => out.extend_from_slice(b"\\n"),
        _ => {
            out.extend_from_slice(b"\\x");
            if byte < 0x10 {
                out.push(b'0');
            }
            out.push(byte);
        }
    }
}

/// Renders frames as bracketed console records, gated by a byte limit.
///
/// The limit caps how many on-wire bytes of each frame are shown, header
/// included; zero disables rendering entirely.
#[derive(Debug, Clone, Default)]
pub struct FrameTrace {
    limit: usize,
}

impl FrameTrace {
    /// Creates a renderer showing at most `limit` on-wire bytes per frame.
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }

    /// Creates a disabled renderer.
    pub fn disabled() -> Self {
        Self::new(0)
    }

    /// Current byte limit.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Sets the byte limit. Zero disables rendering.
    pub fn set_limit(&mut self, limit: usize) {
        self.limit = limit;
    }

    /// Whether rendering is enabled.
    pub fn enabled(&self) -> bool {
        self.limit != 0
    }

    /// Renders one frame as a bracketed record into `out`.
    ///
    /// `tag` is the caller's direction byte, `b'T'` on transmit and `b'R'`
    /// on receive. The record always shows the full header fields; payload
    /// bytes are rendered up to `min(wire_len, limit)` on-wire bytes, so a
    /// small limit truncates the payload silently. Disabled renderers
    /// write nothing.
    pub fn log<W: Write, const N: usize>(
        &self,
        tag: u8,
        frame: &Frame<N>,
        wire_len: usize,
        out: &mut W,
    ) -> io::Result<()> {
        if self.limit == 0 {
            return Ok(());
        }
        let shown = wire_len.min(self.limit);
        let count = shown.saturating_sub(HEADER_SIZE).min(N);

        // Worst case one payload byte expands to four.
        let mut record = Vec::with_capacity(16 + count * 4);
        record.push(b'[');
        record.push(tag);
        write!(record, "X {} {} {} ", wire_len, frame.channel, frame.sequence)?;
        for &byte in &frame.payload[..count] {
            escape_into(byte, &mut record);
        }
        record.extend_from_slice(b"]\n");
        out.write_all(&record)
    }
}

/// Transmitter decorator that renders every frame it forwards.
///
/// Rendering must not disturb the data path: console write failures are
/// dropped and only the inner transmitter's result is reported. Frames
/// that fail to transmit are not rendered.
pub struct TraceRadio<R, W> {
    inner: R,
    trace: FrameTrace,
    console: W,
}

impl<R, W: Write> TraceRadio<R, W> {
    /// Wraps a transmitter, rendering forwarded frames to `console`.
    pub fn new(inner: R, trace: FrameTrace, console: W) -> Self {
        Self {
            inner,
            trace,
            console,
        }
    }

    /// Current render limit.
    pub fn trace_limit(&self) -> usize {
        self.trace.limit()
    }

    /// Sets the render limit. Zero disables rendering.
    pub fn set_trace_limit(&mut self, limit: usize) {
        self.trace.set_limit(limit);
    }

    /// Returns a reference to the inner transmitter.
    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    /// Returns a mutable reference to the inner transmitter.
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    /// Consumes the decorator, returning the inner transmitter.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Transmitter<N>, W: Write, const N: usize> Transmitter<N> for TraceRadio<R, W> {
    fn transmit(&mut self, frame: &Frame<N>, wire_len: usize) -> io::Result<()> {
        self.inner.transmit(frame, wire_len)?;
        let _ = self.trace.log(b'T', frame, wire_len, &mut self.console);
        Ok(())
    }
}
