use std::process::ExitCode;

use blocklist::{HeapObject, cli};

fn main() -> ExitCode {
  cli::main::<HeapObject>()
}
