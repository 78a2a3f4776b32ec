//! One raw allocation per node, header and payload together.
//!
//! ```text
//!   head                                         tail
//!    │                                            │
//!    ▼                                            ▼
//!   ┌──────┬───────────┐   ┌──────┬──────┐   ┌──────┬─────────────┐
//!   │ next ├─ payload ─│──►│ next ├─ pl ─│──►│ none ├─ payload ───│
//!   └──────┴───────────┘   └──────┴──────┘   └──────┴─────────────┘
//!     malloc #1              malloc #2          malloc #3
//! ```
//!
//! Each region is acquired once during the build and released once by the
//! teardown pass.

use std::{marker::PhantomData, mem, ptr::NonNull};

use tracing::debug;

use super::{NodeList, Strategy, Summary, run_owned};
use crate::{
  block::{Block, Chain},
  error::{BuildError, BuildResult},
  raw::{MallocAllocator, RawAllocator},
  sampler::LengthSource,
};

pub struct HeapBlockList<A: RawAllocator = MallocAllocator> {
  head: Option<NonNull<Block>>,
  tail: Option<NonNull<Block>>,
  len: usize,
  alloc: A,
  _owns: PhantomData<Block>,
}

impl<A: RawAllocator> HeapBlockList<A> {
  /// Builds `blocks` nodes with regions taken from `alloc`.
  ///
  /// When an allocation fails the blocks built so far are left allocated:
  /// the build is abandoned on the spot and nothing is released.
  pub fn build_in<L: LengthSource>(
    blocks: u32,
    lengths: &mut L,
    alloc: A,
  ) -> BuildResult<Self> {
    let mut list = Self {
      head: None,
      tail: None,
      len: 0,
      alloc,
      _owns: PhantomData,
    };

    for index in 0..blocks {
      let len = lengths.next_len() as usize;
      let size = Block::size_for(len);

      let Some(region) = list.alloc.allocate(size) else {
        debug!(index, size, unreleased = list.len, "node allocation failed");
        mem::forget(list);
        return Err(BuildError::NodeAllocation { index, bytes: size });
      };

      // `region` is fresh from the allocator, malloc-aligned and `size` long.
      let block = unsafe { Block::init(region, len) };
      list.push_back(block);
    }

    Ok(list)
  }

  fn push_back(
    &mut self,
    block: NonNull<Block>,
  ) {
    match self.tail {
      Some(tail) => unsafe { tail.as_ref().set_next(block.as_ref()) },
      None => self.head = Some(block),
    }

    self.tail = Some(block);
    self.len += 1;
  }

  pub fn allocator(&self) -> &A {
    &self.alloc
  }

  /// Frees every block, one `deallocate` per block, and returns the count.
  pub fn teardown(mut self) -> usize {
    self.release_all()
  }

  fn blocks(&self) -> Chain<'_> {
    // Every linked block is owned by this list until `release_all`.
    unsafe { Chain::new(self.head.map(|head| head.as_ref())) }
  }

  fn release_all(&mut self) -> usize {
    let mut released = 0;
    let mut cursor = self.head.take();
    self.tail = None;

    while let Some(block) = cursor {
      let (next, size) = {
        let block = unsafe { block.as_ref() };
        (block.next_ptr(), block.size())
      };

      unsafe { self.alloc.deallocate(block.cast(), size) };

      cursor = next;
      released += 1;
    }

    self.len = 0;
    released
  }
}

impl<A: RawAllocator + Default> NodeList for HeapBlockList<A> {
  fn build<L: LengthSource>(
    blocks: u32,
    lengths: &mut L,
  ) -> BuildResult<Self> {
    Self::build_in(blocks, lengths, A::default())
  }

  fn len(&self) -> usize {
    self.len
  }

  fn payloads(&self) -> impl Iterator<Item = &[u8]> {
    self.blocks().map(Block::payload)
  }

  fn release(self) -> usize {
    self.teardown()
  }
}

impl<A: RawAllocator> Drop for HeapBlockList<A> {
  fn drop(&mut self) {
    self.release_all();
  }
}

pub struct HeapBlock;

impl Strategy for HeapBlock {
  const NAME: &'static str = "heap-block";

  fn run<L: LengthSource>(
    blocks: u32,
    lengths: &mut L,
  ) -> BuildResult<Summary> {
    run_owned::<HeapBlockList, L>(Self::NAME, blocks, lengths)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    hash::block_hash,
    payload,
    raw::{AllocCounts, Budgeted},
    sampler::FixedLengths,
  };

  #[test]
  fn test_build_links_in_order() {
    let list =
      HeapBlockList::<MallocAllocator>::build(4, &mut FixedLengths::new(&[1, 2, 3, 4])).unwrap();

    let payloads: Vec<Vec<u8>> = list.payloads().map(<[u8]>::to_vec).collect();

    assert_eq!(list.len(), 4);
    assert_eq!(payloads, (1..=4).map(payload::generate).collect::<Vec<_>>());
  }

  #[test]
  fn test_release_matches_acquire() {
    let mut alloc = MallocAllocator::new();
    let list =
      HeapBlockList::build_in(6, &mut FixedLengths::new(&[9, 33, 1]), &mut alloc).unwrap();

    assert_eq!(list.allocator().counts().acquired, 6);
    assert_eq!(list.teardown(), 6);

    let counts = alloc.counts();
    assert_eq!(counts.acquired, 6);
    assert_eq!(counts.released, 6);
    assert_eq!(counts.live_bytes, 0);
  }

  #[test]
  fn test_drop_releases_unreleased_list() {
    let mut alloc = MallocAllocator::new();
    drop(HeapBlockList::build_in(3, &mut FixedLengths::new(&[7]), &mut alloc).unwrap());

    assert_eq!(alloc.counts().outstanding(), 0);
  }

  #[test]
  fn test_allocation_failure_leaves_built_blocks() {
    let mut alloc = Budgeted::new(MallocAllocator::new(), 2);

    let result = HeapBlockList::build_in(5, &mut FixedLengths::new(&[3]), &mut alloc);

    assert_eq!(
      result.err(),
      Some(BuildError::NodeAllocation {
        index: 2,
        bytes: Block::size_for(3)
      })
    );
    assert_eq!(
      alloc.counts(),
      AllocCounts {
        acquired: 2,
        released: 0,
        live_bytes: 2 * Block::size_for(3)
      }
    );
  }

  #[test]
  fn test_single_block_hash() {
    let list = HeapBlockList::<MallocAllocator>::build(1, &mut FixedLengths::new(&[3])).unwrap();

    assert_eq!(list.hash(), block_hash(&[1, 2, 3]));
    assert_eq!(list.release(), 1);
  }
}
