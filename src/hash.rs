//! Verification hash over payload bytes.
//!
//! ```text
//!   per block:  H = H0
//!               for b in payload:  H = H + ((M * b) ^ (H >> 23))
//!
//!   per list:   sum of every block's H, head to tail
//! ```
//!
//! All arithmetic wraps at 64 bits.

pub type Hash = u64;

/// Starting value of every per-block hash.
pub const HASH_SEED: Hash = 104_395_301;

/// Odd multiplier applied to each payload byte.
pub const HASH_MULTIPLIER: Hash = 2_654_435_789;

/// Hashes a single payload.
pub fn block_hash(payload: &[u8]) -> Hash {
  payload.iter().fold(HASH_SEED, |hash, &byte| {
    hash.wrapping_add(HASH_MULTIPLIER.wrapping_mul(byte as Hash) ^ (hash >> 23))
  })
}

/// Folds per-block hashes into the list aggregate.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HashAccumulator {
  total: Hash,
}

impl HashAccumulator {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn push(
    &mut self,
    payload: &[u8],
  ) {
    self.push_hash(block_hash(payload));
  }

  pub fn push_hash(
    &mut self,
    hash: Hash,
  ) {
    self.total = self.total.wrapping_add(hash);
  }

  pub fn finish(&self) -> Hash {
    self.total
  }
}

/// Aggregate hash of payloads visited in list order.
pub fn aggregate<'a, I>(payloads: I) -> Hash
where
  I: IntoIterator<Item = &'a [u8]>,
{
  let mut acc = HashAccumulator::new();
  for payload in payloads {
    acc.push(payload);
  }
  acc.finish()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::payload;

  #[test]
  fn test_pinned_three_byte_hash() {
    assert_eq!(block_hash(&[1, 2, 3]), 16_031_010_142);
  }

  #[test]
  fn test_empty_payload_hashes_to_seed() {
    assert_eq!(block_hash(&[]), HASH_SEED);
  }

  #[test]
  fn test_long_payload_hash() {
    assert_eq!(block_hash(&payload::generate(300)), 89_268_826_495_117);
  }

  #[test]
  fn test_empty_aggregate_is_zero() {
    assert_eq!(aggregate(std::iter::empty()), 0);
    assert_eq!(HashAccumulator::new().finish(), 0);
  }

  #[test]
  fn test_aggregate_wraps() {
    let mut acc = HashAccumulator::new();
    acc.push_hash(u64::MAX);
    acc.push_hash(2);

    assert_eq!(acc.finish(), 1);
  }

  #[test]
  fn test_aggregate_is_sum_of_block_hashes() {
    let payloads: Vec<Vec<u8>> = [3usize, 1, 7, 2, 5]
      .iter()
      .map(|&len| payload::generate(len))
      .collect();

    let expected = payloads
      .iter()
      .map(|p| block_hash(p))
      .fold(0u64, |sum, h| sum.wrapping_add(h));

    assert_eq!(aggregate(payloads.iter().map(Vec::as_slice)), expected);
  }
}
