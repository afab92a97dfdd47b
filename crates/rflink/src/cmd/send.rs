use std::fs;
use std::io::{self, Read};
use std::sync::Arc;

use rflink_frame::{ChannelMux, FrameBuffer, FrameTrace, LinkStats, TraceRadio};
use rflink_radio::StreamRadio;
use tracing::debug;

use crate::cmd::SendArgs;
use crate::exit::{io_error, CliResult, SUCCESS};

pub fn run(args: SendArgs) -> CliResult<i32> {
    let payload = resolve_payload(&args)?;
    let sink = crate::cmd::open_radio(&args.radio)?;

    let stats = Arc::new(LinkStats::new());
    let trace = FrameTrace::new(args.trace_bytes.unwrap_or(0));
    let radio = TraceRadio::new(StreamRadio::new(sink), trace, io::stderr());
    let mut mux: ChannelMux<_> = ChannelMux::new(FrameBuffer::new(radio, Arc::clone(&stats)));

    let tag = args.channel.tag();
    for &byte in &payload {
        mux.send_on(tag, byte)
            .map_err(|err| io_error("transmit failed", err))?;
    }
    mux.flush().map_err(|err| io_error("transmit failed", err))?;

    debug!(
        bytes = payload.len(),
        frames = stats.tx_frames(),
        "payload sent"
    );
    if args.stats {
        eprintln!("{}", stats.report());
    }
    Ok(SUCCESS)
}

fn resolve_payload(args: &SendArgs) -> CliResult<Vec<u8>> {
    if let Some(data) = &args.data {
        return Ok(data.as_bytes().to_vec());
    }
    if let Some(path) = &args.file {
        return fs::read(path)
            .map_err(|err| io_error(&format!("failed reading {}", path.display()), err));
    }
    let mut payload = Vec::new();
    io::stdin()
        .read_to_end(&mut payload)
        .map_err(|err| io_error("failed reading stdin", err))?;
    Ok(payload)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::cmd::ChannelArg;

    fn args_with_data(data: &str) -> SendArgs {
        SendArgs {
            radio: PathBuf::from("-"),
            channel: ChannelArg::Serial,
            data: Some(data.to_string()),
            file: None,
            trace_bytes: None,
            stats: false,
        }
    }

    #[test]
    fn data_flag_wins_over_stdin() {
        let payload = resolve_payload(&args_with_data("hello")).unwrap();
        assert_eq!(payload, b"hello");
    }

    #[test]
    fn file_flag_reads_the_file() {
        let dir = std::env::temp_dir().join(format!("rflink-send-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("payload.bin");
        std::fs::write(&path, b"from file").unwrap();

        let mut args = args_with_data("");
        args.data = None;
        args.file = Some(path);
        let payload = resolve_payload(&args).unwrap();
        assert_eq!(payload, b"from file");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_file_maps_to_a_cli_error() {
        let mut args = args_with_data("");
        args.data = None;
        args.file = Some(PathBuf::from("/nonexistent/rflink-payload.bin"));
        let err = resolve_payload(&args).unwrap_err();
        assert_eq!(err.code, crate::exit::FAILURE);
    }

    #[test]
    fn channel_arg_maps_to_builtin_tags() {
        assert_eq!(ChannelArg::Serial.tag(), rflink_frame::SERIAL);
        assert_eq!(ChannelArg::Command.tag(), rflink_frame::COMMAND);
    }
}
