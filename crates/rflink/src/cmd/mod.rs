use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand, ValueEnum};
use rflink_frame::{COMMAND, SERIAL};

use crate::exit::{io_error, CliResult};
use crate::output::OutputFormat;

pub mod console;
pub mod inspect;
pub mod send;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Stage payload bytes and transmit them as capture records.
    Send(SendArgs),
    /// Run the interactive operator console over a radio sink.
    Console(ConsoleArgs),
    /// Decode a capture and print its records.
    Inspect(InspectArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Send(args) => send::run(args),
        Command::Console(args) => console::run(args),
        Command::Inspect(args) => inspect::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

/// Opens a radio sink, `-` meaning stdout.
pub(crate) fn open_radio(path: &Path) -> CliResult<Box<dyn Write>> {
    if path == Path::new("-") {
        return Ok(Box::new(io::stdout()));
    }
    let file = File::create(path)
        .map_err(|err| io_error(&format!("failed opening {}", path.display()), err))?;
    Ok(Box::new(file))
}

/// Opens a capture source, `-` meaning stdin.
pub(crate) fn open_capture(path: &Path) -> CliResult<Box<dyn Read>> {
    if path == Path::new("-") {
        return Ok(Box::new(io::stdin()));
    }
    let file = File::open(path)
        .map_err(|err| io_error(&format!("failed opening {}", path.display()), err))?;
    Ok(Box::new(file))
}

/// Built-in channel selection for `send`.
#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum ChannelArg {
    Serial,
    Command,
}

impl ChannelArg {
    pub fn tag(self) -> u8 {
        match self {
            ChannelArg::Serial => SERIAL,
            ChannelArg::Command => COMMAND,
        }
    }
}

#[derive(Args, Debug)]
pub struct SendArgs {
    /// Radio sink path (`-` for stdout).
    pub radio: PathBuf,
    /// Channel to send on.
    #[arg(long, short = 'c', value_enum, default_value = "serial")]
    pub channel: ChannelArg,
    /// String payload.
    #[arg(long, conflicts_with = "file")]
    pub data: Option<String>,
    /// Read the payload from a file. With neither --data nor --file the
    /// payload is read from stdin.
    #[arg(long)]
    pub file: Option<PathBuf>,
    /// Render transmitted frames to stderr, showing up to N on-wire bytes.
    #[arg(long, value_name = "N", env = "RFLINK_TRACE_BYTES")]
    pub trace_bytes: Option<usize>,
    /// Print the link statistics report to stderr when done.
    #[arg(long)]
    pub stats: bool,
}

#[derive(Args, Debug)]
pub struct ConsoleArgs {
    /// Radio sink path (`-` for stdout).
    pub radio: PathBuf,
    /// Back the parameter store with a file instead of memory.
    #[arg(long, value_name = "PATH")]
    pub store: Option<PathBuf>,
    /// Parameter store size in bytes.
    #[arg(long, value_name = "BYTES", default_value_t = rflink_store::DEFAULT_STORE_SIZE)]
    pub store_size: usize,
    /// Render transmitted frames to stderr, showing up to N on-wire bytes.
    #[arg(long, value_name = "N", env = "RFLINK_TRACE_BYTES")]
    pub trace_bytes: Option<usize>,
}

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Capture path (`-` for stdin).
    pub capture: PathBuf,
    /// Render each record to stderr, showing up to N on-wire bytes.
    #[arg(long, value_name = "N", env = "RFLINK_TRACE_BYTES")]
    pub trace_bytes: Option<usize>,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build information.
    #[arg(long)]
    pub extended: bool,
}
