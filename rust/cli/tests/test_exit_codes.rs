//! Exit codes and stream usage of `holdem_cli::run`.

use holdem_cli::exit_code;

fn run(args: &[&str]) -> (i32, String, String) {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let code = holdem_cli::run(args.iter().copied(), &mut out, &mut err);
    (
        code,
        String::from_utf8_lossy(&out).into_owned(),
        String::from_utf8_lossy(&err).into_owned(),
    )
}

#[test]
fn help_goes_to_stdout_with_success() {
    let (code, out, err) = run(&["holdem", "--help"]);
    assert_eq!(code, exit_code::SUCCESS);
    assert!(err.is_empty());
    for cmd in ["sim", "deal", "eval", "cfg"] {
        assert!(out.contains(cmd), "help should list '{}'", cmd);
    }
}

#[test]
fn version_goes_to_stdout_with_success() {
    let (code, out, _) = run(&["holdem", "--version"]);
    assert_eq!(code, exit_code::SUCCESS);
    assert!(out.contains("holdem"));
}

#[test]
fn unknown_command_prints_command_list_to_stderr() {
    let (code, out, err) = run(&["holdem", "serve"]);
    assert_eq!(code, exit_code::ERROR);
    assert!(out.is_empty());
    assert!(err.contains("Usage: holdem <command> [options]"));
    assert!(err.contains("  sim"));
    assert!(err.contains("holdem --help"));
}

#[test]
fn missing_subcommand_is_an_error() {
    let (code, _, err) = run(&["holdem"]);
    assert_eq!(code, exit_code::ERROR);
    assert!(!err.is_empty());
}

#[test]
fn command_failures_are_reported_on_stderr() {
    let (code, out, err) = run(&["holdem", "eval", "AH", "KH", "ZZ", "2C", "3D"]);
    assert_eq!(code, exit_code::ERROR);
    assert!(out.is_empty());
    assert!(err.starts_with("Error: Invalid input:"), "got {}", err);
}

#[test]
fn bad_flag_values_are_parse_errors() {
    let (code, _, err) = run(&["holdem", "deal", "--seed", "minus-one"]);
    assert_eq!(code, exit_code::ERROR);
    assert!(err.contains("--seed"));
}
