use std::io::{IsTerminal, Write};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use rflink_frame::{channel_name, Frame, HEADER_SIZE};
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

#[derive(Serialize)]
struct RecordOutput<'a> {
    index: usize,
    channel: u8,
    channel_name: &'a str,
    sequence: u8,
    wire_len: usize,
    payload_size: usize,
    payload: String,
}

pub fn print_record<const N: usize>(
    frame: &Frame<N>,
    wire_len: usize,
    index: usize,
    format: OutputFormat,
) {
    let payload = &frame.payload[..wire_len.saturating_sub(HEADER_SIZE).min(N)];
    match format {
        OutputFormat::Json => {
            let out = RecordOutput {
                index,
                channel: frame.channel,
                channel_name: channel_name(frame.channel),
                sequence: frame.sequence,
                wire_len,
                payload_size: payload.len(),
                payload: payload_preview(payload),
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["#", "CHANNEL", "SEQ", "LEN", "PAYLOAD"])
                .add_row(vec![
                    index.to_string(),
                    channel_name(frame.channel).to_string(),
                    frame.sequence.to_string(),
                    wire_len.to_string(),
                    payload_preview(payload),
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!(
                "#{} channel={} ({}) seq={} len={} payload={}",
                index,
                frame.channel,
                channel_name(frame.channel),
                frame.sequence,
                wire_len,
                payload_preview(payload)
            );
        }
        OutputFormat::Raw => {
            print_raw(payload);
        }
    }
}

pub fn print_raw(data: &[u8]) {
    let mut out = std::io::stdout();
    let _ = out.write_all(data);
    let _ = out.flush();
}

fn payload_preview(payload: &[u8]) -> String {
    match std::str::from_utf8(payload) {
        Ok(text) => text.to_string(),
        Err(_) => format!("<binary {} bytes>", payload.len()),
    }
}
