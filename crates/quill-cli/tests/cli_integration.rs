//! CLI integration tests for the quill binary.

use std::process::Command;

fn quill_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_quill"))
}

fn write_source(dir: &tempfile::TempDir, name: &str, src: &str) -> String {
    let file = dir.path().join(name);
    std::fs::write(&file, src).expect("write source");
    file.to_str().expect("utf-8 path").to_string()
}

#[test]
fn cli_run_prints_value() {
    let dir = tempfile::tempdir().expect("create tempdir");
    let file = write_source(&dir, "run.scm", "(define x 10)\n(+ x x)\n");

    let output = quill_bin().args(["run", &file]).output().expect("run binary");

    assert!(
        output.status.success(),
        "quill run should succeed, stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "20");
}

#[test]
fn cli_run_rewrites_let() {
    let dir = tempfile::tempdir().expect("create tempdir");
    let file = write_source(&dir, "let.scm", "(let ((x 1) (y 2)) (+ x y))");

    let output = quill_bin().args(["run", &file]).output().expect("run binary");

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "3");
}

#[test]
fn cli_run_runtime_error_exits_nonzero() {
    let dir = tempfile::tempdir().expect("create tempdir");
    let file = write_source(&dir, "bad.scm", "(1 2)");

    let output = quill_bin().args(["run", &file]).output().expect("run binary");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Runtime error"), "stderr: {}", stderr);
}

#[test]
fn cli_parse_error_exits_nonzero() {
    let dir = tempfile::tempdir().expect("create tempdir");
    let file = write_source(&dir, "unclosed.scm", "(+ 1");

    let output = quill_bin().args(["run", &file]).output().expect("run binary");

    assert!(!output.status.success());
}

#[test]
fn cli_address_prints_lexical_addresses() {
    let dir = tempfile::tempdir().expect("create tempdir");
    let file = write_source(
        &dir,
        "addr.scm",
        "(lambda (a b c) (if (eq? b c) ((lambda (c) (cons a c)) a) b))",
    );

    let output = quill_bin()
        .args(["address", &file])
        .output()
        .expect("run binary");

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    pretty_assertions::assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        "(lambda (a b c) (if ([eq? free] [b : 0 1] [c : 0 2]) ((lambda (c) ([cons free] [a : 1 0] [c : 0 0])) [a : 0 0]) [b : 0 1]))"
    );
}

#[test]
fn cli_rename_uses_start_counter() {
    let dir = tempfile::tempdir().expect("create tempdir");
    let file = write_source(&dir, "ren.scm", "(lambda (x) x)");

    let output = quill_bin()
        .args(["rename", &file, "--start", "7"])
        .output()
        .expect("run binary");

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        "(lambda (x__7) x__7)"
    );
}

#[test]
fn cli_parse_json() {
    let dir = tempfile::tempdir().expect("create tempdir");
    let file = write_source(&dir, "json.scm", "(define x 1)\nx");

    let output = quill_bin()
        .args(["parse", &file, "--format", "json"])
        .output()
        .expect("run binary");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\"exps\""), "stdout: {}", stdout);
}

#[test]
fn cli_rejects_oversized_source() {
    let dir = tempfile::tempdir().expect("create tempdir");
    let big = "1 ".repeat(600_000);
    let file = write_source(&dir, "big.scm", &big);

    let output = quill_bin().args(["run", &file]).output().expect("run binary");

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("limit"));
}
