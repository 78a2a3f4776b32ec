//! Boxed nodes that own a separately allocated payload.
//!
//! Each node costs two allocations, the node itself and its `Vec` buffer.
//! The buffer belongs to exactly one node and is freed with it.

use std::iter;

use super::{NodeList, Strategy, Summary, run_owned};
use crate::{error::BuildResult, payload, sampler::LengthSource};

pub struct ObjectNode {
  next: Option<Box<ObjectNode>>,
  payload: Vec<u8>,
}

impl ObjectNode {
  pub fn new(len: usize) -> Self {
    Self {
      next: None,
      payload: payload::generate(len),
    }
  }

  pub fn payload(&self) -> &[u8] {
    &self.payload
  }
}

#[derive(Default)]
pub struct HeapObjectList {
  head: Option<Box<ObjectNode>>,
  len: usize,
}

impl HeapObjectList {
  fn nodes(&self) -> impl Iterator<Item = &ObjectNode> {
    iter::successors(self.head.as_deref(), |node| node.next.as_deref())
  }

  /// Unlinks and destroys nodes front to back, so long lists never recurse
  /// through `Box` drops.
  fn release_all(&mut self) -> usize {
    let mut released = 0;
    let mut cursor = self.head.take();

    while let Some(mut node) = cursor {
      cursor = node.next.take();
      drop(node);
      released += 1;
    }

    self.len = 0;
    released
  }
}

impl NodeList for HeapObjectList {
  fn build<L: LengthSource>(
    blocks: u32,
    lengths: &mut L,
  ) -> BuildResult<Self> {
    let mut list = Self::default();
    let mut tail = &mut list.head;

    for _ in 0..blocks {
      let node = tail.insert(Box::new(ObjectNode::new(lengths.next_len() as usize)));
      tail = &mut node.next;
      list.len += 1;
    }

    Ok(list)
  }

  fn len(&self) -> usize {
    self.len
  }

  fn payloads(&self) -> impl Iterator<Item = &[u8]> {
    self.nodes().map(ObjectNode::payload)
  }

  fn release(mut self) -> usize {
    self.release_all()
  }
}

impl Drop for HeapObjectList {
  fn drop(&mut self) {
    self.release_all();
  }
}

pub struct HeapObject;

impl Strategy for HeapObject {
  const NAME: &'static str = "heap-object";

  fn run<L: LengthSource>(
    blocks: u32,
    lengths: &mut L,
  ) -> BuildResult<Summary> {
    run_owned::<HeapObjectList, L>(Self::NAME, blocks, lengths)
  }
}
