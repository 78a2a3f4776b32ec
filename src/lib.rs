//! # blocklist - Allocation Strategy Benchmark
//!
//! This crate builds a singly-linked list of N variable-length payload
//! blocks, hashes it, and tears it down again, under four different
//! ownership disciplines. The list content and the hash never depend on the
//! strategy; only where the memory comes from and who gives it back does.
//!
//! ## Overview
//!
//! ```text
//!   Driver ──► Builder ──► Node chain ──► Hash Accumulator ──► summary line
//!                │
//!                ├── LengthSource  (BlockSampler / FixedLengths)
//!                ├── payload       (1, 2, 3, ... per node)
//!                └── Strategy      (stack-frame | heap-block |
//!                                   heap-object | managed)
//! ```
//!
//! ## Crate Structure
//!
//! ```text
//!   blocklist
//!   ├── align      - Alignment macro (align!)
//!   ├── block      - Header + trailing payload in one region (internal links)
//!   ├── cli        - Shared driver for the binaries
//!   ├── config     - Build-time block sizes
//!   ├── error      - Build errors
//!   ├── hash       - Per-block hash and aggregate
//!   ├── limits     - Process stack limit
//!   ├── payload    - Deterministic payload bytes
//!   ├── raw        - malloc/free backend with acquire/release counts
//!   ├── sampler    - Block length sources
//!   └── strategy   - The four strategies
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use blocklist::{BlockSampler, HeapBlock, Strategy};
//!
//! let mut sampler = BlockSampler::seeded(7);
//! let summary = HeapBlock::run(1000, &mut sampler).unwrap();
//!
//! println!("{summary}"); // list length = 1000  hash = ...
//! ```
//!
//! ## Node Layouts
//!
//! ```text
//!   stack-frame / heap-block            heap-object / managed
//!
//!   ┌────────┬──────────────────┐       ┌────────┬─────────┐     ┌──────────┐
//!   │ next   │ payload bytes    │       │ next   │ Vec ────┼────►│ payload  │
//!   └────────┴──────────────────┘       └────────┴─────────┘     └──────────┘
//!     one region (slot or malloc)         node allocation         buffer
//! ```
//!
//! ## Limitations
//!
//! - **Single-threaded only**: nothing here is `Send` or `Sync`
//! - **Stack depth**: the stack-frame strategy recurses once per node and a
//!   list that outgrows the stack aborts the process
//! - **Partial builds leak**: a heap-block build that fails part way leaves
//!   the blocks it already built allocated
//! - **Unseeded by default**: block lengths vary run to run unless a seed is
//!   given

pub mod align;
mod block;
pub mod cli;
pub mod config;
pub mod error;
pub mod hash;
pub mod limits;
pub mod payload;
pub mod raw;
pub mod sampler;
pub mod strategy;

pub use block::{BLOCK_ALIGN, Block, HEADER_SIZE};
pub use config::{BlockRange, MAX_BYTES, MIN_BYTES};
pub use error::{BuildError, BuildResult, ConfigError};
pub use hash::{Hash, HashAccumulator, block_hash};
pub use raw::{AllocCounts, Budgeted, MallocAllocator, RawAllocator};
pub use sampler::{BlockSampler, FixedLengths, LengthSource};
pub use strategy::{
  HeapBlock, HeapBlockList, HeapObject, HeapObjectList, Managed, ManagedList, NodeList, StackFrame,
  Strategy, StrategyKind, Summary,
};
