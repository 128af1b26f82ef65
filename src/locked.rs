use std::ptr::NonNull;

use spin::{Mutex, MutexGuard};

use crate::{arena::Arena, error::ArenaError};

/// An [`Arena`] behind a spin lock, for sharing one arena between threads.
///
/// Every call takes the lock for its whole duration; the arena itself stays
/// unsynchronized.
pub struct LockedArena<'buf> {
  inner: Mutex<Arena<'buf>>,
}

impl<'buf> LockedArena<'buf> {
  pub fn new(buffer: &'buf mut [u8]) -> Result<Self, ArenaError> {
    Arena::new(buffer).map(Self::from)
  }

  /// Holds the lock across several operations.
  pub fn lock(&self) -> MutexGuard<'_, Arena<'buf>> {
    self.inner.lock()
  }

  pub fn allocate(
    &self,
    size: usize,
  ) -> Option<NonNull<u8>> {
    self.inner.lock().allocate(size)
  }

  /// # Safety
  ///
  /// Same contract as [`Arena::release`].
  pub unsafe fn release(
    &self,
    ptr: NonNull<u8>,
  ) {
    unsafe { self.inner.lock().release(ptr) }
  }

  pub fn contains(
    &self,
    ptr: *const u8,
  ) -> bool {
    self.inner.lock().contains(ptr)
  }

  pub fn free_bytes(&self) -> usize {
    self.inner.lock().free_bytes()
  }

  pub fn into_inner(self) -> Arena<'buf> {
    self.inner.into_inner()
  }
}

impl<'buf> From<Arena<'buf>> for LockedArena<'buf> {
  fn from(arena: Arena<'buf>) -> Self {
    Self {
      inner: Mutex::new(arena),
    }
  }
}
