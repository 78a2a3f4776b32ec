//! Shared driver for the per-strategy binaries.

use std::{
  io::{self, IsTerminal, Write},
  process::ExitCode,
};

use clap::Parser;
use tracing::{Subscriber, debug};
use tracing_subscriber::{EnvFilter, fmt::MakeWriter};

use crate::{
  error::BuildResult,
  sampler::BlockSampler,
  strategy::{Strategy, Summary},
};

/// Build a list of variable-length blocks and print its verification hash.
#[derive(Parser, Debug)]
#[command(version)]
pub struct Args {
  /// Number of blocks in the list
  pub blocks: u32,

  /// Seed the block-length sampler to make the run repeatable
  #[arg(long)]
  pub seed: Option<u64>,
}

impl Args {
  pub fn sampler(&self) -> BlockSampler {
    match self.seed {
      Some(seed) => BlockSampler::seeded(seed),
      None => BlockSampler::from_entropy(),
    }
  }
}

/// Log filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Formatting subscriber shared by every driver. Colors only when `ansi`.
pub fn log_subscriber<W>(
  filter: EnvFilter,
  writer: W,
  ansi: bool,
) -> impl Subscriber + Send + Sync + 'static
where
  W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(writer)
    .with_ansi(ansi)
    .finish()
}

/// Installs the stderr log subscriber. `RUST_LOG` overrides
/// [`DEFAULT_LOG_FILTER`]; escape codes are left out unless stderr is a
/// terminal.
pub fn init_tracing() {
  let filter =
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
  let subscriber = log_subscriber(filter, io::stderr, io::stderr().is_terminal());

  let _ = tracing::subscriber::set_global_default(subscriber);
}

/// Entry point of a single-strategy binary.
pub fn main<S: Strategy>() -> ExitCode {
  init_tracing();

  let args = Args::parse();
  let result = run::<S>(&args);
  if let Err(err) = &result {
    debug!(strategy = S::NAME, ?err, "build failed");
  }

  report(result, &mut io::stdout().lock(), &mut io::stderr().lock())
}

/// Writes the summary line to `out`, or the failure line to `err`, and picks
/// the exit status.
pub fn report(
  result: BuildResult<Summary>,
  out: &mut impl Write,
  err: &mut impl Write,
) -> ExitCode {
  match result {
    Ok(summary) => match writeln!(out, "{summary}") {
      Ok(()) => ExitCode::SUCCESS,
      Err(_) => ExitCode::FAILURE,
    },
    Err(error) => {
      let _ = writeln!(err, "{error}");
      ExitCode::FAILURE
    }
  }
}

pub fn run<S: Strategy>(args: &Args) -> BuildResult<Summary> {
  debug!(strategy = S::NAME, blocks = args.blocks, seed = ?args.seed, "starting build");

  S::preflight(args.blocks);

  let mut sampler = args.sampler();
  S::run(args.blocks, &mut sampler)
}
