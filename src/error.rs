use thiserror::Error;

use crate::block::{HEADER_SIZE, MAX_ARENA_SIZE};

/// Reasons an arena cannot be built over a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ArenaError {
  #[error("buffer of {len} bytes cannot hold a {} byte block header", HEADER_SIZE)]
  TooSmall { len: usize },
  #[error("buffer of {len} bytes exceeds the {} byte block size limit", MAX_ARENA_SIZE)]
  TooLarge { len: usize },
}
