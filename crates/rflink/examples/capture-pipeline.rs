//! Capture pipeline example — stages bytes on two channels, writes the
//! record stream to a file, then decodes it record by record.
//!
//! Run with:
//!   cargo run --example capture-pipeline

use std::fs::{self, File};
use std::sync::Arc;

use rflink::frame::{ChannelMux, FrameBuffer, FrameTrace, LinkStats, TraceRadio, HEADER_SIZE};
use rflink::radio::{CaptureReader, StreamRadio};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dir = std::env::temp_dir().join(format!("rflink-pipeline-{}", std::process::id()));
    fs::create_dir_all(&dir)?;
    let capture = dir.join("capture.bin");

    let stats = Arc::new(LinkStats::new());

    // Transmit side: mux -> trace decorator -> record stream -> file.
    {
        let sink = File::create(&capture)?;
        let radio = TraceRadio::new(
            StreamRadio::new(sink),
            FrameTrace::new(64),
            std::io::stderr(),
        );
        let mut mux: ChannelMux<_> = ChannelMux::new(FrameBuffer::new(radio, Arc::clone(&stats)));

        for byte in *b"relay me" {
            mux.send_serial(byte)?;
        }
        mux.flush()?;

        for byte in *b"AT+CSQ?" {
            mux.send_command(byte)?;
        }
        mux.flush()?;
    }

    // Receive side: walk the capture and tally what came through.
    let mut reader: CaptureReader<_> = CaptureReader::new(File::open(&capture)?);
    while let Some((frame, wire_len)) = reader.next_record()? {
        stats.record_rx();
        eprintln!(
            "[rx] channel={} seq={} payload={}",
            frame.channel,
            frame.sequence,
            String::from_utf8_lossy(&frame.payload[..wire_len - HEADER_SIZE])
        );
    }

    eprintln!("[stats] {}", stats.report());
    let _ = fs::remove_dir_all(&dir);
    Ok(())
}
