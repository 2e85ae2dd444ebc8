//! End-to-end CLI tests: argument parsing, exit codes, stdout line-by-line
//! output, via the compiled binary rather than calling into `rexseq::cli`
//! directly.

use std::process::Command;

fn rexseq() -> Command {
    Command::new(env!("CARGO_BIN_EXE_rexseq"))
}

#[test]
fn generate_emits_one_match_per_line() {
    let out = rexseq()
        .args(["generate", "1(234?|49?)"])
        .output()
        .expect("binary runs");
    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines, vec!["123", "1234", "14", "149"]);
}

#[test]
fn generate_accepts_multiple_patterns() {
    let out = rexseq()
        .args(["generate", "ab", "cd"])
        .output()
        .expect("binary runs");
    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert_eq!(stdout.lines().collect::<Vec<_>>(), vec!["ab", "cd"]);
}

#[test]
fn len_prints_big_integer_cardinality() {
    let out = rexseq()
        .args(["len", "[01]*"])
        .output()
        .expect("binary runs");
    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    let expected = (num_bigint::BigUint::from(2u32).pow(65536) - num_bigint::BigUint::from(1u32))
        .to_string();
    assert_eq!(stdout.trim(), expected);
}

#[test]
fn index_supports_negative_indices() {
    let out = rexseq()
        .args(["index", "[abcdef]", "-1"])
        .output()
        .expect("binary runs");
    assert!(out.status.success());
    assert_eq!(String::from_utf8(out.stdout).unwrap().trim(), "f");
}

#[test]
fn generate_limit_and_start_slice_without_materializing() {
    let out = rexseq()
        .args(["generate", ".*", "--charset", "printable", "--start", "1", "--limit", "3"])
        .output()
        .expect("binary runs");
    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert_eq!(stdout.lines().count(), 3);
}

#[test]
fn malformed_pattern_exits_one_with_message_on_stderr() {
    let out = rexseq()
        .args(["generate", "a^b"])
        .output()
        .expect("binary runs");
    assert_eq!(out.status.code(), Some(1));
    assert!(!out.stderr.is_empty());
}

#[test]
fn out_of_range_index_exits_two() {
    let out = rexseq()
        .args(["index", "ab", "5"])
        .output()
        .expect("binary runs");
    assert_eq!(out.status.code(), Some(2));
}
