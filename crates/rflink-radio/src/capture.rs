use std::io::{ErrorKind, Read};

use bytes::BytesMut;
use rflink_frame::{Frame, DATA_CAPACITY};
use tracing::trace;

use crate::error::{RadioError, Result};
use crate::wire::decode_record;

const INITIAL_BUFFER_CAPACITY: usize = 4 * 1024;
const READ_CHUNK_SIZE: usize = 4 * 1024;

/// Reads capture records from any `Read` stream.
///
/// Handles partial reads internally, so callers always see complete
/// records. Validity checking happens here: a length byte outside the
/// frame bounds is [`RadioError::BadLength`], end-of-stream inside a
/// record is [`RadioError::Truncated`]. A stream that ends between
/// records is simply over.
pub struct CaptureReader<R, const N: usize = DATA_CAPACITY> {
    inner: R,
    buf: BytesMut,
}

impl<R: Read, const N: usize> CaptureReader<R, N> {
    /// Creates a reader over a capture stream.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY),
        }
    }

    /// Reads the next complete record (blocking).
    ///
    /// Returns `Ok(None)` at a clean end of stream.
    pub fn next_record(&mut self) -> Result<Option<(Frame<N>, usize)>> {
        loop {
            if let Some((frame, wire_len)) = decode_record(&mut self.buf)? {
                trace!(
                    channel = frame.channel,
                    sequence = frame.sequence,
                    wire_len,
                    "record read"
                );
                return Ok(Some((frame, wire_len)));
            }

            let mut chunk = [0u8; READ_CHUNK_SIZE];
            let read = match self.inner.read(&mut chunk) {
                Ok(n) => n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(RadioError::Io(err)),
            };

            if read == 0 {
                if self.buf.is_empty() {
                    return Ok(None);
                }
                return Err(RadioError::Truncated);
            }

            self.buf.extend_from_slice(&chunk[..read]);
        }
    }

    /// Returns a reference to the underlying stream.
    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    /// Returns a mutable reference to the underlying stream.
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    /// Consumes the reader, returning the underlying stream.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use rflink_frame::HEADER_SIZE;

    use super::*;
    use crate::wire::encode_record;

    fn wire_with(records: &[(u8, u8, &[u8])]) -> Vec<u8> {
        let mut buf = BytesMut::new();
        for &(channel, sequence, payload) in records {
            let mut frame: Frame = Frame::new();
            frame.channel = channel;
            frame.sequence = sequence;
            frame.payload[..payload.len()].copy_from_slice(payload);
            encode_record(&frame, HEADER_SIZE + payload.len(), &mut buf).unwrap();
        }
        buf.to_vec()
    }

    #[test]
    fn read_single_record() {
        let wire = wire_with(&[(1, 4, b"hello")]);
        let mut reader: CaptureReader<_> = CaptureReader::new(Cursor::new(wire));

        let (frame, wire_len) = reader.next_record().unwrap().unwrap();
        assert_eq!(frame.channel, 1);
        assert_eq!(frame.sequence, 4);
        assert_eq!(wire_len, HEADER_SIZE + 5);
        assert_eq!(&frame.payload[..5], b"hello");

        assert!(reader.next_record().unwrap().is_none());
    }

    #[test]
    fn read_multiple_records() {
        let wire = wire_with(&[(1, 0, b"one"), (2, 1, b"two"), (1, 2, b"three")]);
        let mut reader: CaptureReader<_> = CaptureReader::new(Cursor::new(wire));

        let mut seen = Vec::new();
        while let Some((frame, wire_len)) = reader.next_record().unwrap() {
            seen.push((
                frame.channel,
                frame.sequence,
                frame.payload[..wire_len - HEADER_SIZE].to_vec(),
            ));
        }

        assert_eq!(
            seen,
            vec![
                (1, 0, b"one".to_vec()),
                (2, 1, b"two".to_vec()),
                (1, 2, b"three".to_vec()),
            ]
        );
    }

    #[test]
    fn empty_stream_is_a_clean_end() {
        let mut reader: CaptureReader<_> = CaptureReader::new(Cursor::new(Vec::<u8>::new()));
        assert!(reader.next_record().unwrap().is_none());
    }

    #[test]
    fn eof_mid_record_is_truncated() {
        let mut wire = wire_with(&[(1, 0, b"partial")]);
        wire.truncate(4);

        let mut reader: CaptureReader<_> = CaptureReader::new(Cursor::new(wire));
        let err = reader.next_record().unwrap_err();
        assert!(matches!(err, RadioError::Truncated));
    }

    #[test]
    fn bad_length_byte_is_rejected() {
        // Length byte 2 claims a record with no payload.
        let mut reader: CaptureReader<_> = CaptureReader::new(Cursor::new(vec![2u8, 0, 0]));
        let err = reader.next_record().unwrap_err();
        assert!(matches!(err, RadioError::BadLength { len: 2, .. }));
    }

    #[test]
    fn partial_reads_are_assembled() {
        let byte_reader = ByteByByteReader {
            bytes: wire_with(&[(3, 9, b"slow")]),
            pos: 0,
        };
        let mut reader: CaptureReader<_> = CaptureReader::new(byte_reader);

        let (frame, _) = reader.next_record().unwrap().unwrap();
        assert_eq!(frame.channel, 3);
        assert_eq!(&frame.payload[..4], b"slow");
    }

    #[test]
    fn interrupted_read_retries() {
        let flaky = InterruptedThenData {
            state: 0,
            bytes: wire_with(&[(2, 5, b"ok")]),
            pos: 0,
        };
        let mut reader: CaptureReader<_> = CaptureReader::new(flaky);

        let (frame, _) = reader.next_record().unwrap().unwrap();
        assert_eq!(frame.channel, 2);
        assert_eq!(frame.sequence, 5);
    }

    #[test]
    #[cfg(unix)]
    fn records_survive_a_pipe() {
        let (left, right) = std::os::unix::net::UnixStream::pair().unwrap();
        let mut radio = crate::stream::StreamRadio::new(left);
        let mut reader: CaptureReader<_> = CaptureReader::new(right);

        let mut frame: Frame = Frame::new();
        frame.channel = 1;
        frame.payload[..4].copy_from_slice(b"ping");
        use rflink_frame::Transmitter;
        radio.transmit(&frame, HEADER_SIZE + 4).unwrap();

        let (received, wire_len) = reader.next_record().unwrap().unwrap();
        assert_eq!(received.channel, 1);
        assert_eq!(wire_len, HEADER_SIZE + 4);
        assert_eq!(&received.payload[..4], b"ping");
    }

    #[test]
    fn accessors_and_into_inner() {
        let cursor = Cursor::new(Vec::<u8>::new());
        let mut reader: CaptureReader<_> = CaptureReader::new(cursor);

        let _ = reader.get_ref();
        let _ = reader.get_mut();
        let _inner = reader.into_inner();
    }

    #[derive(Debug)]
    struct ByteByByteReader {
        bytes: Vec<u8>,
        pos: usize,
    }

    impl Read for ByteByByteReader {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if self.pos >= self.bytes.len() || buf.is_empty() {
                return Ok(0);
            }
            buf[0] = self.bytes[self.pos];
            self.pos += 1;
            Ok(1)
        }
    }

    struct InterruptedThenData {
        state: u8,
        bytes: Vec<u8>,
        pos: usize,
    }

    impl Read for InterruptedThenData {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if self.state == 0 {
                self.state = 1;
                return Err(std::io::Error::from(ErrorKind::Interrupted));
            }
            if self.pos >= self.bytes.len() {
                return Ok(0);
            }
            let n = (self.bytes.len() - self.pos).min(buf.len());
            buf[..n].copy_from_slice(&self.bytes[self.pos..self.pos + n]);
            self.pos += n;
            Ok(n)
        }
    }
}
