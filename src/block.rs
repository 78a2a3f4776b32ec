//! Header and payload sharing a single region.
//!
//! ```text
//!   ┌──────────────────────┬─────────────────────────────┬─────────┐
//!   │  BlockHeader         │  payload: [u8; len]         │ padding │
//!   │  next: link or none  │  1 2 3 4 ... len            │         │
//!   └──────────────────────┴─────────────────────────────┴─────────┘
//!   ▲                      ▲
//!   region start           HEADER_SIZE
//! ```
//!
//! `Block` is a dynamically sized type whose metadata is the payload length,
//! so a `&Block` is a fat reference that knows its own payload. The region
//! itself comes from somewhere else: a stack slot or one raw allocation.

use std::{
  cell::Cell,
  mem::{self, MaybeUninit},
  ptr::{self, NonNull},
  slice,
};

use crate::{align, payload};

#[repr(C)]
struct BlockHeader {
  next: Cell<Option<NonNull<Block>>>,
}

/// One list node laid out as header plus trailing payload.
#[repr(C)]
pub struct Block {
  header: BlockHeader,
  payload: [u8],
}

/// Bytes in front of the payload.
pub const HEADER_SIZE: usize = mem::size_of::<BlockHeader>();

/// Alignment every block region must satisfy.
pub const BLOCK_ALIGN: usize = mem::align_of::<BlockHeader>();

impl Block {
  /// Region size needed for a block carrying `len` payload bytes.
  pub const fn size_for(len: usize) -> usize {
    align!(HEADER_SIZE + len, BLOCK_ALIGN)
  }

  /// Constructs a block with a filled payload and no successor in place.
  ///
  /// # Safety
  ///
  /// `region` must be aligned to [`BLOCK_ALIGN`], valid for writes of
  /// `Block::size_for(len)` bytes, and stay untouched by anything else for
  /// as long as the returned pointer is used.
  pub unsafe fn init(
    region: NonNull<u8>,
    len: usize,
  ) -> NonNull<Block> {
    debug_assert_eq!(region.as_ptr() as usize % BLOCK_ALIGN, 0);

    let raw = ptr::slice_from_raw_parts_mut(region.as_ptr(), len) as *mut Block;

    unsafe {
      (&raw mut (*raw).header).write(BlockHeader {
        next: Cell::new(None),
      });

      let bytes = (&raw mut (*raw).payload) as *mut MaybeUninit<u8>;
      payload::fill(slice::from_raw_parts_mut(bytes, len));

      NonNull::new_unchecked(raw)
    }
  }

  pub fn payload(&self) -> &[u8] {
    &self.payload
  }

  pub fn len(&self) -> usize {
    self.payload.len()
  }

  pub fn is_empty(&self) -> bool {
    self.payload.is_empty()
  }

  /// Region size this block occupies.
  pub fn size(&self) -> usize {
    Self::size_for(self.len())
  }

  pub(crate) fn next_ptr(&self) -> Option<NonNull<Block>> {
    self.header.next.get()
  }

  /// # Safety
  ///
  /// The successor, if any, must still be alive for `'a`.
  pub(crate) unsafe fn next<'a>(&self) -> Option<&'a Block> {
    self.next_ptr().map(|next| unsafe { &*next.as_ptr() })
  }

  /// # Safety
  ///
  /// Nothing may follow the link once `next` is gone.
  pub(crate) unsafe fn set_next(
    &self,
    next: &Block,
  ) {
    self.header.next.set(Some(NonNull::from(next)));
  }
}

/// Walks blocks from a head to the tail.
pub(crate) struct Chain<'a> {
  cursor: Option<&'a Block>,
}

impl<'a> Chain<'a> {
  /// # Safety
  ///
  /// Every block reachable from `head` must be alive for `'a`.
  pub(crate) unsafe fn new(head: Option<&'a Block>) -> Self {
    Self { cursor: head }
  }
}

impl<'a> Iterator for Chain<'a> {
  type Item = &'a Block;

  fn next(&mut self) -> Option<Self::Item> {
    let block = self.cursor?;
    self.cursor = unsafe { block.next() };
    Some(block)
  }
}
