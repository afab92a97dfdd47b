use rflink_frame::{DATA_CAPACITY, HEADER_SIZE, MAX_WIRE_SIZE};

use crate::cmd::VersionArgs;
use crate::exit::{CliResult, SUCCESS};

pub fn run(args: VersionArgs) -> CliResult<i32> {
    if !args.extended {
        println!("rflink {}", env!("CARGO_PKG_VERSION"));
        return Ok(SUCCESS);
    }

    println!("name: rflink");
    println!("version: {}", env!("CARGO_PKG_VERSION"));
    println!("target_os: {}", std::env::consts::OS);
    println!("target_arch: {}", std::env::consts::ARCH);
    println!("frame_header: {HEADER_SIZE} bytes");
    println!("frame_payload: {DATA_CAPACITY} bytes");
    println!("frame_wire_max: {MAX_WIRE_SIZE} bytes");

    Ok(SUCCESS)
}
