use std::process::{Command, Output};

const STRATEGY_BINARIES: [&str; 4] = [
  env!("CARGO_BIN_EXE_stack-frame"),
  env!("CARGO_BIN_EXE_heap-block"),
  env!("CARGO_BIN_EXE_heap-object"),
  env!("CARGO_BIN_EXE_managed"),
];

fn run(
  binary: &str,
  args: &[&str],
) -> Output {
  Command::new(binary)
    .args(args)
    .env_remove("RUST_LOG")
    .output()
    .expect("failed to launch binary")
}

fn stdout(output: &Output) -> String {
  String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn missing_block_count_fails_without_summary() {
  for binary in STRATEGY_BINARIES {
    let output = run(binary, &[]);

    assert!(!output.status.success(), "{binary}");
    assert!(!stdout(&output).contains("list length ="), "{binary}");
    assert!(!output.stderr.is_empty(), "{binary}");
  }
}

#[test]
fn invalid_block_count_fails() {
  for binary in STRATEGY_BINARIES {
    let output = run(binary, &["lots"]);

    assert!(!output.status.success(), "{binary}");
    assert!(!stdout(&output).contains("list length ="), "{binary}");
  }
}

#[test]
fn zero_blocks_print_zero_hash() {
  for binary in STRATEGY_BINARIES {
    let output = run(binary, &["0"]);

    assert!(output.status.success(), "{binary}");
    assert_eq!(stdout(&output), "list length = 0  hash = 0\n", "{binary}");
  }
}

#[test]
fn seeded_runs_print_the_same_line_everywhere() {
  let lines: Vec<String> = STRATEGY_BINARIES
    .iter()
    .map(|binary| {
      let output = run(binary, &["500", "--seed", "17"]);
      assert!(output.status.success(), "{binary}");
      stdout(&output)
    })
    .collect();

  assert!(lines[0].starts_with("list length = 500  hash = "));
  assert!(lines.iter().all(|line| line == &lines[0]), "{lines:?}");
}

#[test]
fn compare_reports_every_strategy() {
  let output = run(env!("CARGO_BIN_EXE_blocklist-compare"), &["200", "--seed", "3"]);
  assert!(output.status.success());

  let text = stdout(&output);
  assert!(text.starts_with("seed = 3\n"));
  for name in ["stack-frame", "heap-block", "heap-object", "managed"] {
    assert!(text.contains(name), "{text}");
  }
  assert_eq!(text.matches("list length = 200  hash = ").count(), 4);
}
