//! The four ways a list can own its memory.
//!
//! ```text
//!   strategy      node memory                      released by
//!   ───────────   ──────────────────────────────   ─────────────────────────
//!   stack-frame   slot in the building call frame  frame unwind (implicit)
//!   heap-block    one malloc: header + payload     teardown pass, one free
//!   heap-object   Box<node> + owned Vec payload    teardown pass, node drop
//!   managed       LinkedList element + Vec         container drop (implicit)
//! ```
//!
//! Every strategy hashes head to tail and produces the same aggregate for
//! the same sequence of lengths.

use std::fmt;

use tracing::debug;

use crate::{
  error::BuildResult,
  hash::{self, Hash},
  sampler::LengthSource,
};

mod heap_block;
mod heap_object;
mod managed;
mod stack_frame;

pub use heap_block::{HeapBlock, HeapBlockList};
pub use heap_object::{HeapObject, HeapObjectList, ObjectNode};
pub use managed::{Managed, ManagedList, ManagedNode};
pub use stack_frame::{StackFrame, largest_slot_payload, worst_case_stack_bytes};

/// What a driver prints after a successful build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
  pub blocks: u32,
  pub hash: Hash,
}

impl fmt::Display for Summary {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    write!(f, "list length = {}  hash = {}", self.blocks, self.hash)
  }
}

/// Build a list of `blocks` nodes, hash it, tear it down.
pub trait Strategy {
  const NAME: &'static str;

  /// Checks run before the build starts. Nothing here may fail the build.
  fn preflight(_blocks: u32) {}

  fn run<L: LengthSource>(
    blocks: u32,
    lengths: &mut L,
  ) -> BuildResult<Summary>;
}

/// A list that outlives its build and is torn down separately.
pub trait NodeList: Sized {
  fn build<L: LengthSource>(
    blocks: u32,
    lengths: &mut L,
  ) -> BuildResult<Self>;

  fn len(&self) -> usize;

  fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Payloads from head to tail.
  fn payloads(&self) -> impl Iterator<Item = &[u8]>;

  fn hash(&self) -> Hash {
    hash::aggregate(self.payloads())
  }

  /// Destroys every node and returns how many were destroyed.
  fn release(self) -> usize;
}

fn run_owned<T: NodeList, L: LengthSource>(
  name: &'static str,
  blocks: u32,
  lengths: &mut L,
) -> BuildResult<Summary> {
  let list = T::build(blocks, lengths)?;
  let hash = list.hash();
  debug!(strategy = name, len = list.len(), hash, "hashed list");

  let released = list.release();
  debug!(strategy = name, released, "released list");

  Ok(Summary { blocks, hash })
}

/// Runtime selection of a strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyKind {
  StackFrame,
  HeapBlock,
  HeapObject,
  Managed,
}

impl StrategyKind {
  pub const ALL: [StrategyKind; 4] = [
    StrategyKind::StackFrame,
    StrategyKind::HeapBlock,
    StrategyKind::HeapObject,
    StrategyKind::Managed,
  ];

  pub fn name(self) -> &'static str {
    match self {
      StrategyKind::StackFrame => StackFrame::NAME,
      StrategyKind::HeapBlock => HeapBlock::NAME,
      StrategyKind::HeapObject => HeapObject::NAME,
      StrategyKind::Managed => Managed::NAME,
    }
  }

  pub fn preflight(
    self,
    blocks: u32,
  ) {
    match self {
      StrategyKind::StackFrame => StackFrame::preflight(blocks),
      StrategyKind::HeapBlock => HeapBlock::preflight(blocks),
      StrategyKind::HeapObject => HeapObject::preflight(blocks),
      StrategyKind::Managed => Managed::preflight(blocks),
    }
  }

  pub fn run<L: LengthSource>(
    self,
    blocks: u32,
    lengths: &mut L,
  ) -> BuildResult<Summary> {
    match self {
      StrategyKind::StackFrame => StackFrame::run(blocks, lengths),
      StrategyKind::HeapBlock => HeapBlock::run(blocks, lengths),
      StrategyKind::HeapObject => HeapObject::run(blocks, lengths),
      StrategyKind::Managed => Managed::run(blocks, lengths),
    }
  }
}

impl fmt::Display for StrategyKind {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    f.pad(self.name())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{hash::block_hash, payload, sampler::FixedLengths};

  fn expected(lengths: &[u32]) -> Hash {
    lengths
      .iter()
      .map(|&len| block_hash(&payload::generate(len as usize)))
      .fold(0, Hash::wrapping_add)
  }

  #[test]
  fn test_summary_line() {
    let summary = Summary {
      blocks: 3,
      hash: 12345,
    };
    assert_eq!(summary.to_string(), "list length = 3  hash = 12345");
  }

  #[test]
  fn test_empty_build_for_every_strategy() {
    for kind in StrategyKind::ALL {
      let summary = kind.run(0, &mut FixedLengths::new(&[7])).unwrap();
      assert_eq!(summary, Summary { blocks: 0, hash: 0 }, "{kind}");
    }
  }

  #[test]
  fn test_single_block_equals_block_hash() {
    for kind in StrategyKind::ALL {
      let summary = kind.run(1, &mut FixedLengths::new(&[3])).unwrap();
      assert_eq!(summary.blocks, 1);
      assert_eq!(summary.hash, 16_031_010_142, "{kind}");
    }
  }

  #[test]
  fn test_additivity_over_fixed_lengths() {
    let cases: [&[u32]; 3] = [&[9], &[4, 17], &[1, 300, 64, 2, 511]];

    for lengths in cases {
      for kind in StrategyKind::ALL {
        let blocks = lengths.len() as u32;
        let summary = kind.run(blocks, &mut FixedLengths::new(lengths)).unwrap();
        assert_eq!(summary.hash, expected(lengths), "{kind} {lengths:?}");
      }
    }
  }

  #[test]
  fn test_names_are_distinct() {
    let mut names: Vec<&str> = StrategyKind::ALL.iter().map(|k| k.name()).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), 4);
  }
}
