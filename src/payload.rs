//! Deterministic payload contents.
//!
//! Byte `i` of every payload is `i + 1`, truncated to a byte, so payloads
//! longer than 255 bytes wrap back through zero. Only the length of a payload
//! is ever random.

use std::mem::MaybeUninit;

/// Value stored at position `index` of any payload.
#[inline]
pub fn fill_byte(index: usize) -> u8 {
  index.wrapping_add(1) as u8
}

/// Writes the ascending pattern into possibly uninitialized memory and
/// returns the now initialized bytes.
pub fn fill(buf: &mut [MaybeUninit<u8>]) -> &mut [u8] {
  for (i, byte) in buf.iter_mut().enumerate() {
    byte.write(fill_byte(i));
  }

  // Every element was written above.
  unsafe { &mut *(buf as *mut [MaybeUninit<u8>] as *mut [u8]) }
}

/// Returns an owned payload of `len` bytes, allocated once at its final size.
pub fn generate(len: usize) -> Vec<u8> {
  (0..len).map(fill_byte).collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_ascending_from_one() {
    assert_eq!(generate(5), vec![1, 2, 3, 4, 5]);
  }

  #[test]
  fn test_empty_payload() {
    assert!(generate(0).is_empty());
  }

  #[test]
  fn test_wraps_past_byte_range() {
    let payload = generate(300);

    assert_eq!(payload[254], 255);
    assert_eq!(payload[255], 0);
    assert_eq!(payload[256], 1);
    assert_eq!(payload[299], 44);
  }

  #[test]
  fn test_fill_matches_generate() {
    let mut buf = [MaybeUninit::<u8>::uninit(); 40];

    assert_eq!(fill(&mut buf), generate(40).as_slice());
  }

  #[test]
  fn test_generate_allocates_exact_capacity() {
    assert_eq!(generate(33).capacity(), 33);
  }
}
