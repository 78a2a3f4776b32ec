use std::process::ExitCode;

use blocklist::{Managed, cli};

fn main() -> ExitCode {
  cli::main::<Managed>()
}
