use std::io::{self, BufRead, IsTerminal, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rflink_frame::{ChannelMux, FrameBuffer, FrameTrace, LinkStats, TraceRadio};
use rflink_radio::StreamRadio;
use rflink_store::{ByteStore, FileStore, MemStore};
use tracing::info;

use crate::cmd::ConsoleArgs;
use crate::exit::{io_error, store_error, CliError, CliResult, INTERNAL, SUCCESS, USAGE};

#[derive(Debug)]
enum ConsoleAction {
    Continue,
    Quit,
}

pub fn run(args: ConsoleArgs) -> CliResult<i32> {
    let sink = crate::cmd::open_radio(&args.radio)?;
    let trace = FrameTrace::new(args.trace_bytes.unwrap_or(0));
    let radio = TraceRadio::new(StreamRadio::new(sink), trace, io::stderr());
    let stats = Arc::new(LinkStats::new());
    let mut mux: ChannelMux<_> = ChannelMux::new(FrameBuffer::new(radio, Arc::clone(&stats)));

    let mut store = open_store(&args)?;
    store
        .init()
        .map_err(|err| store_error("store init failed", err))?;

    let running = Arc::new(AtomicBool::new(true));
    install_ctrlc_handler(running.clone())?;

    let interactive = io::stdin().is_terminal();
    if interactive {
        println!("rflink console; 'help' lists commands");
    }

    let stdin = io::stdin();
    let mut line = String::new();
    while running.load(Ordering::SeqCst) {
        if interactive {
            print!("rflink> ");
            let _ = io::stdout().flush();
        }
        line.clear();
        let read = stdin
            .lock()
            .read_line(&mut line)
            .map_err(|err| io_error("console read failed", err))?;
        if read == 0 {
            break;
        }

        match dispatch(&line, &mut mux, store.as_mut(), &stats) {
            Ok(ConsoleAction::Continue) => {}
            Ok(ConsoleAction::Quit) => break,
            Err(err) => eprintln!("error: {err}"),
        }
    }

    // Whatever is still staged goes out before the console closes.
    mux.flush().map_err(|err| io_error("final flush failed", err))?;
    Ok(SUCCESS)
}

fn dispatch<W: Write, C: Write>(
    line: &str,
    mux: &mut ChannelMux<TraceRadio<StreamRadio<W>, C>>,
    store: &mut dyn ByteStore,
    stats: &LinkStats,
) -> CliResult<ConsoleAction> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(ConsoleAction::Continue);
    }
    let (command, rest) = line.split_once(' ').unwrap_or((line, ""));

    match command {
        "send" => {
            for byte in rest.bytes() {
                mux.send_serial(byte)
                    .map_err(|err| io_error("transmit failed", err))?;
            }
        }
        "cmd" => {
            for byte in rest.bytes() {
                mux.send_command(byte)
                    .map_err(|err| io_error("transmit failed", err))?;
            }
        }
        "flush" => {
            mux.flush().map_err(|err| io_error("flush failed", err))?;
        }
        "stats" => {
            println!("{}", stats.report());
        }
        "trace" => {
            if rest.trim().is_empty() {
                return Err(CliError::new(USAGE, "usage: trace <bytes>"));
            }
            let limit = parse_number(rest)?;
            mux.buffer_mut().get_mut().set_trace_limit(limit);
        }
        "peek" => {
            if rest.trim().is_empty() {
                return Err(CliError::new(USAGE, "usage: peek <addr>"));
            }
            let address = parse_number(rest)?;
            let value = store
                .read_byte(address)
                .map_err(|err| store_error("peek failed", err))?;
            println!("store[{address}] = {value:#04x}");
        }
        "poke" => {
            let mut parts = rest.split_whitespace();
            let (Some(address), Some(value), None) = (parts.next(), parts.next(), parts.next())
            else {
                return Err(CliError::new(USAGE, "usage: poke <addr> <byte>"));
            };
            let address = parse_number(address)?;
            let value = parse_number(value)?;
            let byte = u8::try_from(value)
                .map_err(|_| CliError::new(USAGE, format!("byte value out of range: {value}")))?;
            store
                .write_byte(address, byte)
                .map_err(|err| store_error("poke failed", err))?;
        }
        "help" => {
            print_help();
        }
        "quit" | "exit" => return Ok(ConsoleAction::Quit),
        other => {
            return Err(CliError::new(USAGE, format!("unknown command: {other}")));
        }
    }

    Ok(ConsoleAction::Continue)
}

fn print_help() {
    println!("send <text>         stage text on the serial channel");
    println!("cmd <text>          stage text on the command channel");
    println!("flush               transmit the staged frame");
    println!("stats               print link statistics");
    println!("trace <n>           render transmitted frames, up to n wire bytes (0 = off)");
    println!("peek <addr>         read one parameter store byte");
    println!("poke <addr> <byte>  write one parameter store byte");
    println!("help                this text");
    println!("quit                flush and exit");
}

fn parse_number(input: &str) -> CliResult<usize> {
    let input = input.trim();
    let parsed = if let Some(hex) = input.strip_prefix("0x").or_else(|| input.strip_prefix("0X")) {
        usize::from_str_radix(hex, 16)
    } else {
        input.parse()
    };
    parsed.map_err(|_| CliError::new(USAGE, format!("not a number: {input}")))
}

fn open_store(args: &ConsoleArgs) -> CliResult<Box<dyn ByteStore>> {
    match &args.store {
        Some(path) => {
            let store = FileStore::open(path, args.store_size)
                .map_err(|err| store_error("store open failed", err))?;
            info!(path = %path.display(), size = args.store_size, "parameter store is file-backed");
            Ok(Box::new(store))
        }
        None => Ok(Box::new(MemStore::new(args.store_size))),
    }
}

fn install_ctrlc_handler(running: Arc<AtomicBool>) -> CliResult<()> {
    ctrlc::set_handler(move || {
        running.store(false, Ordering::SeqCst);
    })
    .map_err(|err| CliError::new(INTERNAL, format!("signal handler setup failed: {err}")))
}
