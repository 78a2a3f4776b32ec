use std::process::ExitCode;

use blocklist::{StackFrame, cli};

fn main() -> ExitCode {
  cli::main::<StackFrame>()
}
