//! Error types for list builds

use thiserror::Error;

pub use crate::config::ConfigError;

/// Result type for list builds
pub type BuildResult<T> = Result<T, BuildError>;

/// Terminal failures of a list build. None of them is retried.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum BuildError {
  /// The raw allocator returned no memory for a heap block
  #[error("Node allocation failed")]
  NodeAllocation { index: u32, bytes: usize },

  /// A sampled length does not fit the largest stack slot class
  #[error("block of {len} bytes exceeds the {capacity} byte stack slot")]
  FrameCapacity { len: u32, capacity: usize },
}
