//! Link traffic counters.

use std::sync::atomic::{AtomicU64, Ordering};

/// Shared counters for link traffic.
///
/// One instance is shared by handle between the transmit path, the receive
/// path, and whatever reports to the operator. The counters are plain
/// tallies, not a synchronization point, so relaxed ordering is all they
/// need.
#[derive(Debug, Default)]
pub struct LinkStats {
    tx_frames: AtomicU64,
    rx_frames: AtomicU64,
    rx_bogons: AtomicU64,
}

impl LinkStats {
    /// Creates zeroed counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one transmitted frame.
    pub fn record_tx(&self) {
        self.tx_frames.fetch_add(1, Ordering::Relaxed);
    }

    /// Counts one received frame.
    pub fn record_rx(&self) {
        self.rx_frames.fetch_add(1, Ordering::Relaxed);
    }

    /// Counts one malformed received frame.
    pub fn record_bogon(&self) {
        self.rx_bogons.fetch_add(1, Ordering::Relaxed);
    }

    /// Frames transmitted so far.
    pub fn tx_frames(&self) -> u64 {
        self.tx_frames.load(Ordering::Relaxed)
    }

    /// Frames received so far.
    pub fn rx_frames(&self) -> u64 {
        self.rx_frames.load(Ordering::Relaxed)
    }

    /// Malformed frames received so far.
    pub fn rx_bogons(&self) -> u64 {
        self.rx_bogons.load(Ordering::Relaxed)
    }

    /// One-line operator summary.
    pub fn report(&self) -> String {
        format!(
            "tx pkts:{} rx pkts:{} bogons:{}",
            self.tx_frames(),
            self.rx_frames(),
            self.rx_bogons()
        )
    }
}
