//! # rarena - A Fixed-Arena Memory Allocator
//!
//! This crate provides a **first-fit allocator** that manages a single
//! caller-supplied buffer. All bookkeeping lives inside that buffer: there is
//! no side table and the allocator never asks the system for memory.
//!
//! ## Overview
//!
//! The arena is tiled by blocks. Each block is a 4-byte header followed by
//! its payload, and walking the arena from the start by each header's size
//! visits every block exactly once:
//!
//! ```text
//!   Arena (64 bytes) after allocate(8):
//!
//!   ┌────────┬────────────┬────────┬────────────────────────────────────────┐
//!   │ header │  payload   │ header │               payload                  │
//!   │ USED   │  8 bytes   │ FREE   │               48 bytes                 │
//!   │ 12     │            │ 52     │                                        │
//!   └────────┴────────────┴────────┴────────────────────────────────────────┘
//!   0        4            12       16                                       64
//!            ▲
//!            └── pointer returned to the caller
//! ```
//!
//! ## Crate Structure
//!
//! ```text
//!   rarena
//!   ├── align      - Rounding macro (align!)
//!   ├── block      - Header encoding and the Block view
//!   ├── error      - Construction errors
//!   ├── arena      - Arena implementation
//!   └── locked     - LockedArena, a spin-locked Arena
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use rarena::Arena;
//!
//! let mut buffer = [0u8; 256];
//! let mut arena = Arena::new(&mut buffer).unwrap();
//!
//! let ptr = arena.allocate(16).unwrap();
//! assert!(arena.contains(ptr.as_ptr()));
//!
//! unsafe {
//!     ptr.as_ptr().write_bytes(0xAB, 16);
//!     arena.release(ptr);
//! }
//!
//! assert_eq!(arena.free_bytes(), 252);
//! ```
//!
//! ## How It Works
//!
//! **Allocation** rounds the request up to a multiple of 4, adds the header
//! and takes the first free block that is large enough. A larger block is
//! split, and the tail becomes a new free block:
//!
//! ```text
//!   before:  [ FREE 64                                   ]
//!   after:   [ USED 12 ][ FREE 52                        ]
//! ```
//!
//! **Release** marks the block free and merges it with a free block on
//! either side, so two free blocks are never adjacent once a call returns:
//!
//! ```text
//!   before:  [ FREE 8 ][ USED 8 ][ FREE 48               ]
//!                        ▲ release
//!   after:   [ FREE 64                                   ]
//! ```
//!
//! The header is a single little-endian `u32`:
//!
//! ```text
//!   bit 31                                         1   0
//!   ┌───────────────────────────────────────────────┬───┐
//!   │              size (header included)           │ A │
//!   └───────────────────────────────────────────────┴───┘
//! ```
//!
//! which caps a block, and the arena, at 2^31 - 1 bytes.
//!
//! ## Limitations
//!
//! - **Single-threaded**: `Arena` has no locking. Wrap it in [`LockedArena`]
//!   to share it.
//! - **First-fit**: free space fragments; [`Arena::free_bytes`] is a total,
//!   not the largest request that will succeed.
//! - **4-byte granularity**: payloads are only aligned as well as the buffer
//!   itself plus a multiple of 4.
//! - **Trusting release**: double frees and foreign pointers that land inside
//!   the arena are not detected.

pub mod align;
mod arena;
mod block;
mod error;
mod locked;

pub use align::ALIGNMENT;
pub use arena::{Arena, Blocks};
pub use block::{Block, HEADER_SIZE, MAX_ARENA_SIZE};
pub use error::ArenaError;
pub use locked::LockedArena;
