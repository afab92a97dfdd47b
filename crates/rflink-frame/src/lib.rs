//! Fixed-capacity frame assembly with channel multiplexing for
//! low-bandwidth radio links.
//!
//! Outbound bytes from two logical channels (transparent serial relay and
//! remote command) are staged into one shared frame:
//!
//! ```text
//! ┌─────────┬──────────┬────────────────────────┐
//! │ Channel │ Sequence │ Payload                │
//! │ (1B)    │ (1B)     │ (up to DATA_CAPACITY)  │
//! └─────────┴──────────┴────────────────────────┘
//! ```
//!
//! The frame leaves through a [`Transmitter`] when the payload region
//! fills, or earlier on an explicit [`FrameBuffer::flush`]. The sequence
//! number is stamped at flush time and wraps at 256. Nothing partial ever
//! goes on the air, and callers never manage buffers.
//!
//! [`ChannelMux`] routes per-channel byte streams into the shared buffer;
//! [`FrameTrace`] renders frames as bracketed console records;
//! [`LinkStats`] counts traffic for operator reports.

pub mod buffer;
pub mod channel;
pub mod frame;
pub mod mux;
pub mod stats;
pub mod trace;

pub use buffer::{FrameBuffer, Transmitter};
pub use channel::{channel_name, COMMAND, SERIAL, USER_CHANNEL_START};
pub use frame::{Frame, DATA_CAPACITY, HEADER_SIZE, MAX_WIRE_SIZE};
pub use mux::ChannelMux;
pub use stats::LinkStats;
pub use trace::{escape_into, FrameTrace, TraceRadio};
