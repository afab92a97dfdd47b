//! Packet framing and channel multiplexing for low-bandwidth radio links.
//!
//! rflink turns byte streams from multiple logical channels into fixed-size
//! sequenced frames and back, with an operator console for staging,
//! tracing, and link statistics.
//!
//! # Crate Structure
//!
//! - [`frame`] — Frame assembly, channel multiplexing, tracing, counters
//! - [`radio`] — Byte-stream transmitter backends and capture records
//! - [`store`] — Byte-addressable parameter storage backends

/// Re-export frame types.
pub mod frame {
    pub use rflink_frame::*;
}

/// Re-export radio types.
pub mod radio {
    pub use rflink_radio::*;
}

/// Re-export storage types.
pub mod store {
    pub use rflink_store::*;
}
