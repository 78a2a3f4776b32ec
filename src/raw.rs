//! Raw memory for heap blocks.
//!
//! The heap-block strategy asks for exactly one region per node and gives
//! each region back exactly once. Everything behind that contract goes
//! through [`RawAllocator`], which also keeps the acquire/release ledger used
//! to prove the two numbers match.

use std::ptr::NonNull;

use libc::{c_void, free, malloc};
use tracing::trace;

/// Running totals of regions handed out and handed back.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AllocCounts {
  pub acquired: usize,
  pub released: usize,
  pub live_bytes: usize,
}

impl AllocCounts {
  fn acquire(
    &mut self,
    size: usize,
  ) {
    self.acquired += 1;
    self.live_bytes += size;
  }

  fn release(
    &mut self,
    size: usize,
  ) {
    self.released += 1;
    self.live_bytes -= size;
  }

  /// Regions acquired and not yet released.
  pub fn outstanding(&self) -> usize {
    self.acquired - self.released
  }
}

pub trait RawAllocator {
  /// Returns a region of at least `size` bytes aligned for any block, or
  /// `None` when the request cannot be satisfied.
  fn allocate(
    &mut self,
    size: usize,
  ) -> Option<NonNull<u8>>;

  /// # Safety
  ///
  /// `region` must come from `allocate` on this allocator with the same
  /// `size`, and must not have been deallocated already.
  unsafe fn deallocate(
    &mut self,
    region: NonNull<u8>,
    size: usize,
  );

  fn counts(&self) -> AllocCounts;
}

impl<A: RawAllocator + ?Sized> RawAllocator for &mut A {
  fn allocate(
    &mut self,
    size: usize,
  ) -> Option<NonNull<u8>> {
    (**self).allocate(size)
  }

  unsafe fn deallocate(
    &mut self,
    region: NonNull<u8>,
    size: usize,
  ) {
    unsafe { (**self).deallocate(region, size) }
  }

  fn counts(&self) -> AllocCounts {
    (**self).counts()
  }
}

/// `malloc`/`free` from the C library.
#[derive(Debug, Default)]
pub struct MallocAllocator {
  counts: AllocCounts,
}

impl MallocAllocator {
  pub fn new() -> Self {
    Self::default()
  }
}

impl RawAllocator for MallocAllocator {
  fn allocate(
    &mut self,
    size: usize,
  ) -> Option<NonNull<u8>> {
    let region = NonNull::new(unsafe { malloc(size) } as *mut u8)?;
    self.counts.acquire(size);

    trace!(size, address = ?region, "allocated block");

    Some(region)
  }

  unsafe fn deallocate(
    &mut self,
    region: NonNull<u8>,
    size: usize,
  ) {
    unsafe { free(region.as_ptr() as *mut c_void) };
    self.counts.release(size);

    trace!(size, address = ?region, "released block");
  }

  fn counts(&self) -> AllocCounts {
    self.counts
  }
}

/// Wraps another allocator and refuses every request past a fixed number of
/// successful allocations.
#[derive(Debug)]
pub struct Budgeted<A> {
  inner: A,
  remaining: usize,
}

impl<A: RawAllocator> Budgeted<A> {
  pub fn new(
    inner: A,
    allocations: usize,
  ) -> Self {
    Self {
      inner,
      remaining: allocations,
    }
  }

  pub fn into_inner(self) -> A {
    self.inner
  }
}

impl<A: RawAllocator> RawAllocator for Budgeted<A> {
  fn allocate(
    &mut self,
    size: usize,
  ) -> Option<NonNull<u8>> {
    if self.remaining == 0 {
      return None;
    }

    let region = self.inner.allocate(size)?;
    self.remaining -= 1;
    Some(region)
  }

  unsafe fn deallocate(
    &mut self,
    region: NonNull<u8>,
    size: usize,
  ) {
    unsafe { self.inner.deallocate(region, size) }
  }

  fn counts(&self) -> AllocCounts {
    self.inner.counts()
  }
}
