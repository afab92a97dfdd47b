use bytes::{Buf, BufMut, BytesMut};
use rflink_frame::{Frame, HEADER_SIZE};

use crate::error::{RadioError, Result};

/// Record prefix: the frame's on-wire length (1 byte).
pub const LENGTH_PREFIX_SIZE: usize = 1;

/// Smallest legal record body: header plus one payload byte.
///
/// Empty frames never reach the wire; the staging layer suppresses them.
pub const MIN_WIRE_LEN: usize = HEADER_SIZE + 1;

fn max_wire_len(capacity: usize) -> usize {
    (HEADER_SIZE + capacity).min(u8::MAX as usize)
}

/// Encodes one frame as a capture record.
///
/// The length byte counts the frame's on-wire bytes (header plus payload),
/// not itself. `wire_len` must fit the frame capacity and the one-byte
/// prefix.
pub fn encode_record<const N: usize>(
    frame: &Frame<N>,
    wire_len: usize,
    dst: &mut BytesMut,
) -> Result<()> {
    let max = max_wire_len(N);
    if wire_len < MIN_WIRE_LEN || wire_len > max {
        return Err(RadioError::BadLength {
            len: wire_len,
            min: MIN_WIRE_LEN,
            max,
        });
    }
    dst.reserve(LENGTH_PREFIX_SIZE + wire_len);
    dst.put_u8(wire_len as u8);
    dst.put_u8(frame.channel);
    dst.put_u8(frame.sequence);
    dst.put_slice(&frame.payload[..wire_len - HEADER_SIZE]);
    Ok(())
}

/// Decodes one record from a buffer.
///
/// Returns `Ok(None)` if the buffer does not hold a complete record yet.
/// On success, consumes the record and returns the rebuilt frame with its
/// on-wire length; payload bytes past that length are zero.
pub fn decode_record<const N: usize>(src: &mut BytesMut) -> Result<Option<(Frame<N>, usize)>> {
    if src.is_empty() {
        return Ok(None);
    }

    let wire_len = src[0] as usize;
    let max = max_wire_len(N);
    if wire_len < MIN_WIRE_LEN || wire_len > max {
        return Err(RadioError::BadLength {
            len: wire_len,
            min: MIN_WIRE_LEN,
            max,
        });
    }

    if src.len() < LENGTH_PREFIX_SIZE + wire_len {
        return Ok(None);
    }

    src.advance(LENGTH_PREFIX_SIZE);
    let mut frame = Frame::<N>::new();
    frame.channel = src.get_u8();
    frame.sequence = src.get_u8();
    let payload_len = wire_len - HEADER_SIZE;
    frame.payload[..payload_len].copy_from_slice(&src[..payload_len]);
    src.advance(payload_len);

    Ok(Some((frame, wire_len)))
}
