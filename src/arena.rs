use std::{
  fmt,
  marker::PhantomData,
  ptr::{self, NonNull},
};

use log::{debug, trace, warn};

use crate::{
  align,
  block::{Block, HEADER_SIZE, Header, MAX_ARENA_SIZE},
  error::ArenaError,
};

/// First-fit allocator over a caller-owned buffer.
///
/// All bookkeeping lives in the buffer itself: every block starts with a
/// 4-byte header and blocks are addressed by their offset from the base.
pub struct Arena<'buf> {
  base: NonNull<u8>,
  len: usize,
  _buffer: PhantomData<&'buf mut [u8]>,
}

// The arena holds the only access path to its buffer.
unsafe impl Send for Arena<'_> {}

impl<'buf> Arena<'buf> {
  /// Carves `buffer` into a single free block.
  pub fn new(buffer: &'buf mut [u8]) -> Result<Self, ArenaError> {
    let len = buffer.len();
    let base = NonNull::from(buffer).cast::<u8>();

    unsafe { Self::from_raw_parts(base, len) }
  }

  /// Builds an arena over `len` bytes starting at `base`.
  ///
  /// # Safety
  ///
  /// `base` must be valid for reads and writes of `len` bytes for the whole
  /// of `'buf`, and nothing else may access that region while the arena is
  /// alive.
  pub unsafe fn from_raw_parts(
    base: NonNull<u8>,
    len: usize,
  ) -> Result<Self, ArenaError> {
    if len < HEADER_SIZE {
      return Err(ArenaError::TooSmall { len });
    }
    if len > MAX_ARENA_SIZE {
      return Err(ArenaError::TooLarge { len });
    }

    let mut arena = Self {
      base,
      len,
      _buffer: PhantomData,
    };
    arena.write_header(0, Header::free(len));

    debug!("arena initialized: base = {:?}, capacity = {}", base, len);

    Ok(arena)
  }

  /// Total length of the managed buffer.
  pub fn capacity(&self) -> usize {
    self.len
  }

  /// Allocates a block with at least `size` usable bytes.
  ///
  /// Returns `None` when no free block is large enough; the arena is left
  /// untouched in that case.
  pub fn allocate(
    &mut self,
    size: usize,
  ) -> Option<NonNull<u8>> {
    if size > MAX_ARENA_SIZE - HEADER_SIZE {
      trace!("allocate({}): request exceeds arena limits", size);
      return None;
    }

    let required = align!(size) + HEADER_SIZE;

    let Some(block) = self
      .blocks()
      .find(|block| !block.allocated && block.size >= required)
    else {
      trace!("allocate({}): no free block of {} bytes", size, required);
      return None;
    };

    let remainder = block.size - required;

    if remainder >= HEADER_SIZE {
      self.write_header(block.offset, Header::allocated(required));
      self.write_header(block.offset + required, Header::free(remainder));
      trace!(
        "allocate({}): split block at {} into {} + {}",
        size, block.offset, required, remainder
      );
    } else {
      // A tail too short for a header stays with the allocation.
      self.write_header(block.offset, Header::allocated(block.size));
      trace!("allocate({}): took block at {} ({} bytes)", size, block.offset, block.size);
    }

    Some(self.payload(block.offset))
  }

  /// Returns the block behind `ptr` to the free pool, merging it with free
  /// neighbours on both sides.
  ///
  /// Pointers whose header would fall outside the arena are ignored.
  ///
  /// # Safety
  ///
  /// `ptr` must come from [`Arena::allocate`] on this arena and must not have
  /// been released since.
  pub unsafe fn release(
    &mut self,
    ptr: NonNull<u8>,
  ) {
    let Some(offset) = self.header_offset(ptr) else {
      warn!("release({:?}): pointer is outside the arena, ignored", ptr);
      return;
    };

    let mut header = self.read_header(offset);

    let next = offset + header.size;
    if next < self.len {
      let neighbour = self.read_header(next);
      if !neighbour.allocated {
        header.size += neighbour.size;
        trace!("release: merged next block at {} into {}", next, offset);
      }
    }

    header.allocated = false;
    self.write_header(offset, header);

    let previous = self
      .blocks()
      .take_while(|block| block.offset < offset)
      .find(|block| block.end() == offset);

    if let Some(previous) = previous.filter(|block| !block.allocated) {
      self.write_header(previous.offset, Header::free(previous.size + header.size));
      trace!("release: merged block at {} into previous at {}", offset, previous.offset);
    }
  }

  /// Whether `ptr` falls between the first payload address and the arena end.
  ///
  /// This is an address range check only; it says nothing about whether the
  /// block under `ptr` is live.
  pub fn contains(
    &self,
    ptr: *const u8,
  ) -> bool {
    let start = self.base.as_ptr() as usize;
    let addr = ptr as usize;

    addr >= start + HEADER_SIZE && addr < start + self.len
  }

  /// Sum of the payload bytes of every free block.
  ///
  /// Free space may be fragmented, so a single allocation of this many bytes
  /// can still fail.
  pub fn free_bytes(&self) -> usize {
    self
      .blocks()
      .filter(|block| !block.allocated)
      .map(|block| block.payload_size())
      .sum()
  }

  /// Walks the blocks in address order.
  pub fn blocks(&self) -> Blocks<'_> {
    Blocks {
      arena: self,
      offset: 0,
    }
  }

  fn header_offset(
    &self,
    ptr: NonNull<u8>,
  ) -> Option<usize> {
    let offset = (ptr.as_ptr() as usize)
      .checked_sub(self.base.as_ptr() as usize)?
      .checked_sub(HEADER_SIZE)?;

    (offset + HEADER_SIZE <= self.len).then_some(offset)
  }

  fn payload(
    &self,
    offset: usize,
  ) -> NonNull<u8> {
    debug_assert!(offset + HEADER_SIZE <= self.len);
    unsafe { self.base.add(offset + HEADER_SIZE) }
  }

  fn read_header(
    &self,
    offset: usize,
  ) -> Header {
    debug_assert!(offset + HEADER_SIZE <= self.len);
    let bytes = unsafe {
      ptr::read_unaligned(self.base.as_ptr().add(offset) as *const [u8; HEADER_SIZE])
    };

    Header::decode(bytes)
  }

  fn write_header(
    &mut self,
    offset: usize,
    header: Header,
  ) {
    debug_assert!(offset + HEADER_SIZE <= self.len);
    unsafe {
      ptr::write_unaligned(
        self.base.as_ptr().add(offset) as *mut [u8; HEADER_SIZE],
        header.encode(),
      );
    }
  }
}

impl fmt::Debug for Arena<'_> {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    f.debug_struct("Arena")
      .field("base", &self.base)
      .field("capacity", &self.len)
      .field("blocks", &self.blocks().collect::<Vec<_>>())
      .finish()
  }
}

/// Iterator over the blocks of an [`Arena`], see [`Arena::blocks`].
pub struct Blocks<'a> {
  arena: &'a Arena<'a>,
  offset: usize,
}

impl Iterator for Blocks<'_> {
  type Item = Block;

  fn next(&mut self) -> Option<Block> {
    if self.offset + HEADER_SIZE > self.arena.len {
      return None;
    }

    let header = self.arena.read_header(self.offset);

    // Stop on a corrupt header rather than loop or run off the end.
    if header.size < HEADER_SIZE || self.offset + header.size > self.arena.len {
      return None;
    }

    let block = Block::new(self.offset, header);
    self.offset = block.end();

    Some(block)
  }
}
