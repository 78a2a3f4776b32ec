//! blocklist-compare: run every strategy on the same block lengths.

use std::time::Instant;

use anyhow::{Result, bail};
use blocklist::{BlockSampler, StrategyKind, cli};
use clap::Parser;

#[derive(Parser)]
#[command(name = "blocklist-compare")]
#[command(version)]
#[command(about = "Build the same list under every allocation strategy and compare")]
struct Args {
  /// Number of blocks in each list
  blocks: u32,

  /// Seed shared by every strategy; drawn at random when omitted
  #[arg(long)]
  seed: Option<u64>,
}

fn main() -> Result<()> {
  cli::init_tracing();

  let args = Args::parse();
  let seed = args.seed.unwrap_or_else(rand::random);

  println!("seed = {seed}");

  let mut reference = None;
  for kind in StrategyKind::ALL {
    kind.preflight(args.blocks);

    let mut sampler = BlockSampler::seeded(seed);
    let start = Instant::now();
    let summary = kind.run(args.blocks, &mut sampler)?;
    let elapsed = start.elapsed();

    println!("{kind:<12} {summary}  elapsed = {elapsed:?}");

    match reference {
      None => reference = Some((kind, summary.hash)),
      Some((first, hash)) if hash != summary.hash => {
        bail!("{kind} hash {} differs from {first} hash {hash}", summary.hash)
      }
      Some(_) => {}
    }
  }

  Ok(())
}
