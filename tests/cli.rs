// Smoke tests for the spdx-exception binary.
use anyhow::{Context, Result};
use serde_json::Value;
use spdx_exceptions::{MAPPING_RESOURCE, RESOURCES_ENV, SPDX_EXCEPTIONS};
use std::fs;
use std::process::{Command, Output};
use tempfile::TempDir;

fn run_cli(args: &[&str]) -> Result<Output> {
    Command::new(env!("CARGO_BIN_EXE_spdx-exception"))
        .args(args)
        .env_remove(RESOURCES_ENV)
        .env_remove("RUST_LOG")
        .output()
        .with_context(|| format!("failed to execute spdx-exception {}", args.join(" ")))
}

fn stdout_json(output: &Output) -> Result<Value> {
    serde_json::from_slice(&output.stdout).context("stdout is not JSON")
}

#[test]
fn resolve_prints_the_matching_entry() -> Result<()> {
    let output = run_cli(&["resolve", "classpath EXCEPTION 2.0"])?;
    assert!(output.status.success(), "{output:?}");
    let entry = stdout_json(&output)?;
    assert_eq!(entry["id"], "Classpath-exception-2.0");
    assert_eq!(entry["full_name"], "Classpath exception 2.0");
    assert_eq!(entry["deprecated"], false);
    Ok(())
}

#[test]
fn resolve_unknown_identifier_fails() -> Result<()> {
    let output = run_cli(&["resolve", "not-a-real-identifier"])?;
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("'not-a-real-identifier' is not an SPDX license exception"));
    Ok(())
}

#[test]
fn deprecated_lookup_warns_on_stderr() -> Result<()> {
    let output = run_cli(&["resolve", "Nokia-Qt-exception-1.1"])?;
    assert!(output.status.success());
    assert_eq!(stdout_json(&output)?["deprecated"], true);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("deprecated"), "{stderr}");
    Ok(())
}

#[test]
fn list_hides_deprecated_entries_unless_asked() -> Result<()> {
    let current = stdout_json(&run_cli(&["list"])?)?;
    let all = stdout_json(&run_cli(&["list", "--include-deprecated"])?)?;
    let current = current.as_array().context("list output is an array")?;
    let all = all.as_array().context("list output is an array")?;
    assert_eq!(all.len(), 41);
    assert_eq!(current.len(), 40);
    assert!(current.iter().all(|entry| entry["deprecated"] == false));
    Ok(())
}

#[test]
fn compat_prints_licenses() -> Result<()> {
    let output = run_cli(&["compat", "LLVM-exception"])?;
    assert!(output.status.success(), "{output:?}");
    assert_eq!(stdout_json(&output)?, serde_json::json!(["Apache-2.0"]));
    Ok(())
}

#[test]
fn text_prints_the_raw_legal_text() -> Result<()> {
    let output = run_cli(&["text", "LLVM-exception"])?;
    assert!(output.status.success(), "{output:?}");
    let expected = fs::read(
        spdx_exceptions::bundled_resource_root().join("exceptions/LLVM-exception"),
    )?;
    assert_eq!(output.stdout, expected);
    Ok(())
}

#[test]
fn text_prints_every_bundled_entry() -> Result<()> {
    for entry in SPDX_EXCEPTIONS {
        let output = run_cli(&["text", entry.id])?;
        assert!(output.status.success(), "{}: {output:?}", entry.id);
        assert!(!output.stdout.is_empty(), "{} printed nothing", entry.id);
    }
    Ok(())
}

#[test]
fn text_missing_from_resources_reports_the_resource() -> Result<()> {
    let dir = TempDir::new()?;
    fs::write(dir.path().join(MAPPING_RESOURCE), "{}")?;
    let root = dir.path().to_str().context("temp path is UTF-8")?;

    let output = run_cli(&["--resources", root, "text", "Autoconf-exception-2.0"])?;
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("loading text for Autoconf-exception-2.0"),
        "{stderr}"
    );
    assert!(
        stderr.contains("bundled resource 'exceptions/Autoconf-exception-2.0' not found"),
        "{stderr}"
    );
    Ok(())
}

#[test]
fn resources_flag_points_at_another_directory() -> Result<()> {
    let dir = TempDir::new()?;
    fs::write(
        dir.path().join(MAPPING_RESOURCE),
        r#"{"LLVM-exception": ["MIT"]}"#,
    )?;
    let root = dir.path().to_str().context("temp path is UTF-8")?;

    let output = run_cli(&["--resources", root, "compat", "llvm exception"])?;
    assert!(output.status.success(), "{output:?}");
    assert_eq!(stdout_json(&output)?, serde_json::json!(["MIT"]));

    let output = run_cli(&["--resources", root, "text", "LLVM-exception"])?;
    assert!(!output.status.success());
    Ok(())
}

#[test]
fn malformed_mapping_is_reported() -> Result<()> {
    let dir = TempDir::new()?;
    fs::write(dir.path().join(MAPPING_RESOURCE), r#"{"No-such-exception": []}"#)?;
    let root = dir.path().to_str().context("temp path is UTF-8")?;

    let output = run_cli(&["--resources", root, "compat", "LLVM-exception"])?;
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("unknown license exception 'No-such-exception'"),
        "{stderr}"
    );
    Ok(())
}
