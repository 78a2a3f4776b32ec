//! Nodes owned by a standard container.
//!
//! There is no teardown pass: dropping the `LinkedList` drops every node and
//! every payload buffer with it.

use std::collections::LinkedList;

use super::{NodeList, Strategy, Summary, run_owned};
use crate::{error::BuildResult, payload, sampler::LengthSource};

pub struct ManagedNode {
  payload: Vec<u8>,
}

impl ManagedNode {
  pub fn new(len: usize) -> Self {
    Self {
      payload: payload::generate(len),
    }
  }

  pub fn payload(&self) -> &[u8] {
    &self.payload
  }
}

#[derive(Default)]
pub struct ManagedList {
  nodes: LinkedList<ManagedNode>,
}

impl NodeList for ManagedList {
  fn build<L: LengthSource>(
    blocks: u32,
    lengths: &mut L,
  ) -> BuildResult<Self> {
    let nodes = (0..blocks)
      .map(|_| ManagedNode::new(lengths.next_len() as usize))
      .collect();

    Ok(Self { nodes })
  }

  fn len(&self) -> usize {
    self.nodes.len()
  }

  fn payloads(&self) -> impl Iterator<Item = &[u8]> {
    self.nodes.iter().map(ManagedNode::payload)
  }

  /// Nothing to do by hand; the container is simply dropped.
  fn release(self) -> usize {
    self.nodes.len()
  }
}

pub struct Managed;

impl Strategy for Managed {
  const NAME: &'static str = "managed";

  fn run<L: LengthSource>(
    blocks: u32,
    lengths: &mut L,
  ) -> BuildResult<Summary> {
    run_owned::<ManagedList, L>(Self::NAME, blocks, lengths)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{hash::block_hash, sampler::FixedLengths};

  #[test]
  fn test_front_to_back_order() {
    let list = ManagedList::build(3, &mut FixedLengths::new(&[1, 3, 2])).unwrap();

    let lengths: Vec<usize> = list.payloads().map(<[u8]>::len).collect();
    assert_eq!(lengths, vec![1, 3, 2]);
  }

  #[test]
  fn test_hash_matches_block_hashes() {
    let list = ManagedList::build(2, &mut FixedLengths::new(&[3])).unwrap();

    assert_eq!(list.hash(), block_hash(&[1, 2, 3]).wrapping_mul(2));
    assert_eq!(list.release(), 2);
  }
}
