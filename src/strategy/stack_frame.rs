//! Nodes carved out of the building call frames.
//!
//! ```text
//!   process(3) ─► descend ┌ slot: Block(len0) ┐
//!                   process(2) ─► descend ┌ slot: Block(len1) ┐
//!                                   process(1) ─► descend ┌ slot: Block(len2) ┐
//!                                                   process(0): hash head..tail
//!                                                   ◄── hash returned through
//!                                                       every frame, slots die
//!                                                       as each frame unwinds
//! ```
//!
//! A slot belongs to the frame of `descend` and the reference to the block
//! it holds borrows that slot, so no block can be reached once its frame is
//! gone. The aggregate is therefore computed in the deepest frame, before
//! anything unwinds.
//!
//! Slots have fixed size classes; each node picks the smallest class that
//! fits its sampled length. Depth is bounded by the process stack and
//! exhausting it aborts the process.

use std::mem::MaybeUninit;
use std::ptr::NonNull;

use tracing::{debug, warn};

use super::{Strategy, Summary};
use crate::{
  block::{Block, Chain},
  config::MAX_BLOCK_LEN,
  error::{BuildError, BuildResult},
  hash::{self, Hash},
  limits,
  sampler::LengthSource,
};

/// Payload capacities of the slot classes, smallest first.
const SLOT_CLASSES: [usize; 4] = [64, 256, 1024, 4096];

/// Rough per-level cost on top of the slot itself.
const FRAME_OVERHEAD: usize = 128;

const _: () = assert!(
  MAX_BLOCK_LEN as usize <= SLOT_CLASSES[SLOT_CLASSES.len() - 1],
  "configured block sizes exceed the largest stack slot"
);

/// Largest payload a stack-built node can carry.
pub const fn largest_slot_payload() -> usize {
  SLOT_CLASSES[SLOT_CLASSES.len() - 1]
}

const fn slot_bytes(payload: usize) -> usize {
  Block::size_for(payload)
}

const fn class_for(len: usize) -> Option<usize> {
  let mut i = 0;
  while i < SLOT_CLASSES.len() {
    if len <= SLOT_CLASSES[i] {
      return Some(SLOT_CLASSES[i]);
    }
    i += 1;
  }
  None
}

/// Stack bytes a build of `blocks` nodes may need when every node has the
/// longest configured length.
pub fn worst_case_stack_bytes(blocks: u32) -> usize {
  let slot = match class_for(MAX_BLOCK_LEN as usize) {
    Some(class) => slot_bytes(class),
    None => slot_bytes(largest_slot_payload()),
  };

  (blocks as usize).saturating_mul(slot + FRAME_OVERHEAD)
}

#[repr(C)]
struct FrameSlot<const N: usize> {
  _align: [usize; 0],
  bytes: MaybeUninit<[u8; N]>,
}

impl<const N: usize> FrameSlot<N> {
  fn new() -> Self {
    Self {
      _align: [],
      bytes: MaybeUninit::uninit(),
    }
  }

  fn construct(
    &mut self,
    len: usize,
  ) -> &Block {
    debug_assert!(Block::size_for(len) <= N);

    let region = NonNull::from(&mut self.bytes).cast::<u8>();

    // The slot is aligned like `usize`, large enough for `len`, and stays
    // mutably borrowed for as long as the returned reference lives.
    unsafe { Block::init(region, len).as_ref() }
  }
}

pub struct StackFrame;

impl Strategy for StackFrame {
  const NAME: &'static str = "stack-frame";

  fn preflight(blocks: u32) {
    let needed = worst_case_stack_bytes(blocks);

    match limits::stack_limit() {
      Some(limit) if needed > limit => warn!(
        blocks,
        needed, limit, "stack-frame build may exhaust the stack and abort the process"
      ),
      Some(limit) => debug!(blocks, needed, limit, "stack depth within limit"),
      None => debug!(blocks, needed, "stack limit unknown"),
    }
  }

  fn run<L: LengthSource>(
    blocks: u32,
    lengths: &mut L,
  ) -> BuildResult<Summary> {
    let hash = process(blocks, lengths, None, None)?;
    debug!(strategy = Self::NAME, blocks, hash, "frames unwound");

    Ok(Summary { blocks, hash })
  }
}

fn process<L: LengthSource>(
  remaining: u32,
  lengths: &mut L,
  head: Option<&Block>,
  tail: Option<&Block>,
) -> BuildResult<Hash> {
  if remaining == 0 {
    // Every block from head on sits in a frame below this one.
    let chain = unsafe { Chain::new(head) };
    return Ok(hash::aggregate(chain.map(Block::payload)));
  }

  let len = lengths.next_len();

  match class_for(len as usize) {
    Some(64) => descend::<{ slot_bytes(64) }, L>(len, remaining, lengths, head, tail),
    Some(256) => descend::<{ slot_bytes(256) }, L>(len, remaining, lengths, head, tail),
    Some(1024) => descend::<{ slot_bytes(1024) }, L>(len, remaining, lengths, head, tail),
    Some(_) => descend::<{ slot_bytes(4096) }, L>(len, remaining, lengths, head, tail),
    None => Err(BuildError::FrameCapacity {
      len,
      capacity: largest_slot_payload(),
    }),
  }
}

#[inline(never)]
fn descend<const N: usize, L: LengthSource>(
  len: u32,
  remaining: u32,
  lengths: &mut L,
  head: Option<&Block>,
  tail: Option<&Block>,
) -> BuildResult<Hash> {
  let mut slot = FrameSlot::<N>::new();
  let node = slot.construct(len as usize);

  if let Some(tail) = tail {
    // The link is only followed from the deepest frame, while `node` lives.
    unsafe { tail.set_next(node) };
  }

  process(remaining - 1, lengths, head.or(Some(node)), Some(node))
}
