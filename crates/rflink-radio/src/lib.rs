//! Byte-stream transmitter backends and the capture-record container.
//!
//! Packet radios frame on the air for free; byte-stream sinks (serial
//! device nodes, capture files, pipes) do not. Records on a stream carry a
//! one-byte length prefix owned by this layer:
//!
//! ```text
//! ┌────────┬─────────┬──────────┬─────────────────────┐
//! │ Length │ Channel │ Sequence │ Payload             │
//! │ (1B)   │ (1B)    │ (1B)     │ (Length - 2 bytes)  │
//! └────────┴─────────┴──────────┴─────────────────────┘
//! ```
//!
//! [`StreamRadio`] writes records to any [`Write`](std::io::Write) sink and
//! plugs into a frame buffer as its [`Transmitter`](rflink_frame::Transmitter).
//! [`CaptureReader`] reads them back from any [`Read`](std::io::Read)
//! stream and performs the receive side's validity checking.

pub mod capture;
pub mod error;
pub mod stream;
pub mod wire;

pub use capture::CaptureReader;
pub use error::{RadioError, Result};
pub use stream::StreamRadio;
pub use wire::{decode_record, encode_record, LENGTH_PREFIX_SIZE, MIN_WIRE_LEN};
