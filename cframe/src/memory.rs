use crate::{Address, ADDRESS_SIZE};

/// Read-only view of a stopped target's memory.
pub trait TargetMemory {
    /// Reads the pointer-sized word at `addr`.
    ///
    /// Returns `None` when any byte of the word is not readable.
    fn read_address(&self, addr: Address) -> Option<Address>;
}

/// A contiguous little-endian memory image mapped at `base`.
pub struct MemoryImage {
    base: Address,
    bytes: Vec<u8>,
}

impl MemoryImage {
    /// Creates an image whose first byte is at target address `base`.
    pub fn new(base: Address, bytes: Vec<u8>) -> Self {
        MemoryImage { base, bytes }
    }

    /// Creates an image from pointer-sized words starting at `base`.
    pub fn from_words(base: Address, words: &[Address]) -> Self {
        let bytes = words.iter().flat_map(|w| w.to_le_bytes()).collect();
        MemoryImage { base, bytes }
    }

    pub fn base(&self) -> Address {
        self.base
    }

    /// One past the last mapped address.
    pub fn end(&self) -> u64 {
        self.base as u64 + self.bytes.len() as u64
    }
}

impl TargetMemory for MemoryImage {
    fn read_address(&self, addr: Address) -> Option<Address> {
        let start = addr.checked_sub(self.base)? as usize;
        let end = start.checked_add(ADDRESS_SIZE as usize)?;
        let word = self.bytes.get(start..end)?;
        Some(Address::from_le_bytes([word[0], word[1], word[2], word[3]]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_address_when_word_mapped_then_little_endian_value() {
        let image = MemoryImage::new(0x1000, vec![0x78, 0x56, 0x34, 0x12]);

        assert_eq!(image.read_address(0x1000), Some(0x1234_5678));
    }

    #[test]
    fn read_address_when_below_base_then_none() {
        let image = MemoryImage::from_words(0x1000, &[1, 2]);

        assert_eq!(image.read_address(0x0FFC), None);
    }

    #[test]
    fn read_address_when_word_straddles_end_then_none() {
        let image = MemoryImage::from_words(0x1000, &[1, 2]);

        assert_eq!(image.read_address(0x1006), None);
        assert_eq!(image.read_address(0x1008), None);
    }

    #[test]
    fn from_words_when_two_words_then_second_at_next_address() {
        let image = MemoryImage::from_words(0x2000, &[0xAAAA_AAAA, 0xBBBB_BBBB]);

        assert_eq!(image.read_address(0x2004), Some(0xBBBB_BBBB));
        assert_eq!(image.end(), 0x2008);
    }
}
