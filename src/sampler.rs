//! Per-block payload lengths.

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::config::BlockRange;

/// Anything that can hand out the next block length.
pub trait LengthSource {
  fn next_len(&mut self) -> u32;
}

/// Draws lengths as `(draw % max_bytes) + min_bytes`.
///
/// The default constructor seeds from the operating system, so two runs of
/// the same binary will usually build lists of different shapes. Use
/// [`BlockSampler::seeded`] when a run must be repeatable.
#[derive(Debug, Clone)]
pub struct BlockSampler {
  range: BlockRange,
  rng: StdRng,
}

impl BlockSampler {
  pub fn from_entropy() -> Self {
    Self::with_rng(BlockRange::default(), StdRng::from_os_rng())
  }

  pub fn seeded(seed: u64) -> Self {
    Self::with_rng(BlockRange::default(), StdRng::seed_from_u64(seed))
  }

  pub fn with_range(
    range: BlockRange,
    seed: u64,
  ) -> Self {
    Self::with_rng(range, StdRng::seed_from_u64(seed))
  }

  fn with_rng(
    range: BlockRange,
    rng: StdRng,
  ) -> Self {
    Self { range, rng }
  }

  pub fn range(&self) -> BlockRange {
    self.range
  }
}

impl LengthSource for BlockSampler {
  fn next_len(&mut self) -> u32 {
    self.range.clamp_draw(self.rng.random::<u32>())
  }
}

/// Replays a fixed sequence of lengths, starting over when it runs out.
#[derive(Debug, Clone)]
pub struct FixedLengths<'a> {
  lengths: &'a [u32],
  cursor: usize,
}

impl<'a> FixedLengths<'a> {
  /// # Panics
  ///
  /// Panics if `lengths` is empty.
  pub fn new(lengths: &'a [u32]) -> Self {
    assert!(!lengths.is_empty(), "FixedLengths needs at least one length");
    Self { lengths, cursor: 0 }
  }
}

impl LengthSource for FixedLengths<'_> {
  fn next_len(&mut self) -> u32 {
    let len = self.lengths[self.cursor];
    self.cursor = (self.cursor + 1) % self.lengths.len();
    len
  }
}

impl<S: LengthSource + ?Sized> LengthSource for &mut S {
  fn next_len(&mut self) -> u32 {
    (**self).next_len()
  }
}
