/// Length of the header that prefixes every block.
pub const HEADER_SIZE: usize = 4;

/// Largest block the 31-bit size field can describe, which also caps the arena.
pub const MAX_ARENA_SIZE: usize = (1 << 31) - 1;

/// Decoded block header.
///
/// In the buffer the header is a single little-endian `u32`: bit 0 is the
/// allocation flag and bits 1..32 hold the block size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Header {
  pub allocated: bool,
  pub size: usize,
}

impl Header {
  pub fn free(size: usize) -> Self {
    Self { allocated: false, size }
  }

  pub fn allocated(size: usize) -> Self {
    Self { allocated: true, size }
  }

  pub fn encode(self) -> [u8; HEADER_SIZE] {
    debug_assert!(self.size <= MAX_ARENA_SIZE);
    let word = ((self.size as u32) << 1) | self.allocated as u32;
    word.to_le_bytes()
  }

  pub fn decode(bytes: [u8; HEADER_SIZE]) -> Self {
    let word = u32::from_le_bytes(bytes);
    Self {
      allocated: word & 1 == 1,
      size: (word >> 1) as usize,
    }
  }
}

/// A block as seen by [`Arena::blocks`](crate::Arena::blocks).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
  /// Offset of the header from the arena base.
  pub offset: usize,
  /// Total length, header included.
  pub size: usize,
  pub allocated: bool,
}

impl Block {
  pub(crate) fn new(
    offset: usize,
    header: Header,
  ) -> Self {
    Self {
      offset,
      size: header.size,
      allocated: header.allocated,
    }
  }

  /// Offset one past the last byte of this block.
  pub fn end(&self) -> usize {
    self.offset + self.size
  }

  /// Bytes available to the caller in this block.
  pub fn payload_size(&self) -> usize {
    self.size - HEADER_SIZE
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_header_layout() {
    assert_eq!(Header::free(64).encode(), [128, 0, 0, 0]);
    assert_eq!(Header::allocated(12).encode(), [25, 0, 0, 0]);
  }

  #[test]
  fn test_header_max_size() {
    let header = Header::allocated(MAX_ARENA_SIZE);

    assert_eq!(header.encode(), [0xFF; HEADER_SIZE]);
    assert_eq!(Header::decode(header.encode()), header);
    assert_eq!(Header::decode([0xFE, 0xFF, 0xFF, 0xFF]), Header::free(MAX_ARENA_SIZE));
  }

  #[test]
  fn test_block_view() {
    let block = Block::new(12, Header::free(52));

    assert_eq!(block.end(), 64);
    assert_eq!(block.payload_size(), 48);
    assert!(!block.allocated);
  }
}
