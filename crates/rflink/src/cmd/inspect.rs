use std::io;

use rflink_frame::{FrameTrace, LinkStats};
use rflink_radio::{CaptureReader, RadioError};
use tracing::{debug, warn};

use crate::cmd::InspectArgs;
use crate::exit::{radio_error, CliResult, DATA_INVALID, SUCCESS};
use crate::output::{print_record, OutputFormat};

pub fn run(args: InspectArgs, format: OutputFormat) -> CliResult<i32> {
    let source = crate::cmd::open_capture(&args.capture)?;
    let mut reader: CaptureReader<_> = CaptureReader::new(source);
    let trace = FrameTrace::new(args.trace_bytes.unwrap_or(0));
    let stats = LinkStats::new();

    let mut index = 0usize;
    let mut malformed = false;
    loop {
        match reader.next_record() {
            Ok(Some((frame, wire_len))) => {
                stats.record_rx();
                print_record(&frame, wire_len, index, format);
                let _ = trace.log(b'R', &frame, wire_len, &mut io::stderr());
                index += 1;
            }
            Ok(None) => break,
            Err(err @ RadioError::Io(_)) => {
                return Err(radio_error("capture read failed", err));
            }
            Err(err) => {
                // The length prefix is the only framing; once one record is
                // bad there is no way to find the next boundary.
                stats.record_bogon();
                warn!(error = %err, "malformed record ends the scan");
                malformed = true;
                break;
            }
        }
    }

    debug!(records = index, "capture scan complete");
    eprintln!("{}", stats.report());
    if malformed {
        Ok(DATA_INVALID)
    } else {
        Ok(SUCCESS)
    }
}
