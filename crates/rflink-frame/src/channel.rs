//! Built-in channel tags.
//!
//! A channel is a logical source of outbound bytes. The tag travels in the
//! frame header and is the only routing information on the wire; tag 0 is
//! reserved for frames that were never tagged.

/// Transparent serial relay.
pub const SERIAL: u8 = 1;

/// Remote command bytes.
pub const COMMAND: u8 = 2;

/// First tag available for application-defined channels.
pub const USER_CHANNEL_START: u8 = 16;

/// Returns a human-readable name for a channel tag.
pub fn channel_name(tag: u8) -> &'static str {
    match tag {
        0 => "UNTAGGED",
        SERIAL => "SERIAL",
        COMMAND => "COMMAND",
        3..=15 => "RESERVED",
        _ => "USER",
    }
}

/// Returns true if the tag is a built-in channel.
pub fn is_builtin(tag: u8) -> bool {
    tag == SERIAL || tag == COMMAND
}
