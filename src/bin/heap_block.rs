use std::process::ExitCode;

use blocklist::{HeapBlock, cli};

fn main() -> ExitCode {
  cli::main::<HeapBlock>()
}
