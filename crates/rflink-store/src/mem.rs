use crate::error::{Result, StoreError};
use crate::{ByteStore, ERASED};

/// Volatile in-memory storage.
///
/// Backs hosts that have no persistent device, and every test that needs
/// storage without touching the filesystem.
#[derive(Debug, Clone)]
pub struct MemStore {
    cells: Vec<u8>,
}

impl MemStore {
    /// Creates storage of `size` bytes, already erased.
    pub fn new(size: usize) -> Self {
        Self {
            cells: vec![ERASED; size],
        }
    }

    /// Storage size in bytes.
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    fn check(&self, address: usize) -> Result<()> {
        if address >= self.cells.len() {
            return Err(StoreError::AddressOutOfRange {
                address,
                size: self.cells.len(),
            });
        }
        Ok(())
    }
}

impl ByteStore for MemStore {
    fn init(&mut self) -> Result<()> {
        self.cells.fill(ERASED);
        Ok(())
    }

    fn read_byte(&mut self, address: usize) -> Result<u8> {
        self.check(address)?;
        Ok(self.cells[address])
    }

    fn write_byte(&mut self, address: usize, value: u8) -> Result<()> {
        self.check(address)?;
        self.cells[address] = value;
        Ok(())
    }
}
