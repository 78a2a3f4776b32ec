//! Build-time block sizing.
//!
//! `MIN_BYTES` and `MAX_BYTES` are fixed when the crate is compiled. They can
//! be overridden with the `BLOCKLIST_MIN_BYTES` / `BLOCKLIST_MAX_BYTES`
//! environment variables at build time:
//!
//! ```text
//!   BLOCKLIST_MIN_BYTES=8 BLOCKLIST_MAX_BYTES=64 cargo build --release
//! ```
//!
//! A sampled payload length is `(draw % MAX_BYTES) + MIN_BYTES`, so the
//! longest payload a build can produce is `MIN_BYTES + MAX_BYTES - 1`.

use thiserror::Error;

/// Smallest payload length a sampled block can have.
pub const MIN_BYTES: u32 = parse_or(option_env!("BLOCKLIST_MIN_BYTES"), 16);

/// Modulus applied to the raw draw before `MIN_BYTES` is added.
pub const MAX_BYTES: u32 = parse_or(option_env!("BLOCKLIST_MAX_BYTES"), 512);

/// Longest payload the default range can produce.
pub const MAX_BLOCK_LEN: u32 = MIN_BYTES + MAX_BYTES - 1;

const _: () = assert!(MIN_BYTES > 0, "BLOCKLIST_MIN_BYTES must be positive");
const _: () = assert!(MAX_BYTES > 0, "BLOCKLIST_MAX_BYTES must be positive");

const fn parse_or(
  value: Option<&str>,
  default: u32,
) -> u32 {
  let bytes = match value {
    Some(value) => value.as_bytes(),
    None => return default,
  };

  assert!(!bytes.is_empty(), "empty block size override");

  let mut parsed: u32 = 0;
  let mut i = 0;
  while i < bytes.len() {
    let digit = bytes[i];
    assert!(digit.is_ascii_digit(), "block size override is not a number");
    parsed = match parsed.checked_mul(10) {
      Some(value) => match value.checked_add((digit - b'0') as u32) {
        Some(value) => value,
        None => panic!("block size override overflows u32"),
      },
      None => panic!("block size override overflows u32"),
    };
    i += 1;
  }

  parsed
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
  #[error("minimum block size must be positive")]
  ZeroMinimum,

  #[error("block size modulus must be positive")]
  ZeroModulus,

  #[error("block size range {min_bytes} + {max_bytes} overflows u32")]
  Overflow { min_bytes: u32, max_bytes: u32 },
}

/// The payload length range a sampler draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockRange {
  min_bytes: u32,
  max_bytes: u32,
}

impl BlockRange {
  pub fn new(
    min_bytes: u32,
    max_bytes: u32,
  ) -> Result<Self, ConfigError> {
    if min_bytes == 0 {
      return Err(ConfigError::ZeroMinimum);
    }
    if max_bytes == 0 {
      return Err(ConfigError::ZeroModulus);
    }
    if min_bytes.checked_add(max_bytes - 1).is_none() {
      return Err(ConfigError::Overflow { min_bytes, max_bytes });
    }

    Ok(Self { min_bytes, max_bytes })
  }

  pub fn min_bytes(&self) -> u32 {
    self.min_bytes
  }

  pub fn max_bytes(&self) -> u32 {
    self.max_bytes
  }

  /// Longest length this range can yield.
  pub fn longest(&self) -> u32 {
    self.min_bytes + self.max_bytes - 1
  }

  /// Maps a raw draw into the range.
  pub fn clamp_draw(
    &self,
    draw: u32,
  ) -> u32 {
    (draw % self.max_bytes) + self.min_bytes
  }
}

impl Default for BlockRange {
  fn default() -> Self {
    Self {
      min_bytes: MIN_BYTES,
      max_bytes: MAX_BYTES,
    }
  }
}
