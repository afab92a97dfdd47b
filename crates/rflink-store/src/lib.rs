//! Byte-addressable parameter storage.
//!
//! Radio nodes keep a handful of settings in small byte-addressable
//! storage. The capability is three operations behind one trait, so the
//! backend is chosen once at configuration time and everything above it
//! stays backend-agnostic. Two backends ship: [`MemStore`] for hosts
//! without persistence and for tests, [`FileStore`] for settings that
//! survive a restart.

pub mod error;
pub mod file;
pub mod mem;

pub use error::{Result, StoreError};
pub use file::FileStore;
pub use mem::MemStore;

/// Default storage size in bytes.
pub const DEFAULT_STORE_SIZE: usize = 1024;

/// Value an erased cell reads as.
pub const ERASED: u8 = 0xff;

/// Byte-addressable storage: initialize, read a byte, write a byte.
///
/// Object safe, so applications can hold the chosen backend as
/// `Box<dyn ByteStore>`.
pub trait ByteStore {
    /// Makes the storage ready. Afterwards every cell that has never been
    /// written reads as [`ERASED`]; backends without persistence reset
    /// entirely.
    fn init(&mut self) -> Result<()>;

    /// Reads the byte at `address`.
    fn read_byte(&mut self, address: usize) -> Result<u8>;

    /// Writes one byte at `address`.
    fn write_byte(&mut self, address: usize, value: u8) -> Result<()>;
}
