//! Custom cargo commands for the docket crate.
//!
//! Usage:
//!   cargo xtask verify    - Run full verification suite
//!   cargo xtask test      - Run all tests
//!   cargo xtask check     - Quick check
//!   cargo xtask bench     - Run benchmarks
//!   cargo xtask fuzz      - Run every fuzz target briefly

use anyhow::{bail, Context, Result};
use std::env;
use std::path::PathBuf;
use std::process::Command;

/// Fuzz targets in fuzz/Cargo.toml.
const FUZZ_TARGETS: &[&str] = &["index_decoding", "lexical_queries", "semantic_rendering"];

fn main() -> Result<()> {
    let task = env::args().nth(1);
    match task.as_deref() {
        Some("verify") => verify()?,
        Some("test") => test()?,
        Some("check") => check()?,
        Some("bench") => bench()?,
        Some("fuzz") => fuzz(env::args().nth(2).as_deref())?,
        _ => print_help(),
    }
    Ok(())
}

fn print_help() {
    eprintln!(
        r#"
cargo xtask <COMMAND>

Commands:
  verify    Run full verification suite (markers + tests + clippy + serial build)
  test      Run all Rust tests
  check     Quick check (cargo check + test + clippy)
  bench     Run benchmarks
  fuzz      Run each fuzz target for 60s (needs nightly and cargo-fuzz)
            `cargo xtask fuzz <seconds>` to change the time
"#
    );
}

/// Full verification suite
fn verify() -> Result<()> {
    println!("==========================================");
    println!("docket Verification Suite");
    println!("==========================================\n");

    println!("[1/4] Checking invariant markers...");
    check_invariant_markers()?;
    println!("✓ Invariant markers present\n");

    println!("[2/4] Running Rust tests...");
    run_cargo(&["test", "--quiet"])?;
    println!("✓ All Rust tests passed\n");

    println!("[3/4] Running clippy...");
    run_cargo(&["clippy", "--quiet", "--", "-D", "warnings"])?;
    println!("✓ Clippy clean\n");

    // The serial build path is a separate cfg branch in index search and build.
    println!("[4/4] Testing without the parallel feature...");
    run_cargo(&["test", "--quiet", "--no-default-features", "--lib"])?;
    println!("✓ Serial build passes\n");

    println!("==========================================");
    println!("✓ All verification checks passed");
    println!("==========================================");
    Ok(())
}

/// Run all tests
fn test() -> Result<()> {
    run_cargo(&["test"])
}

/// Quick check
fn check() -> Result<()> {
    println!("Running quick checks...\n");

    println!("[1/3] cargo check...");
    run_cargo(&["check"])?;

    println!("[2/3] cargo test...");
    run_cargo(&["test", "--quiet"])?;

    println!("[3/3] cargo clippy...");
    run_cargo(&["clippy", "--quiet", "--", "-D", "warnings"])?;

    println!("\n✓ Quick checks passed");
    Ok(())
}

/// Run benchmarks
fn bench() -> Result<()> {
    run_cargo(&["bench"])
}

/// Run every fuzz target for a bounded time.
fn fuzz(seconds: Option<&str>) -> Result<()> {
    let seconds: u32 = match seconds {
        Some(s) => s.parse().with_context(|| format!("not a number of seconds: {s}"))?,
        None => 60,
    };
    let fuzz_dir = project_root()?.join("fuzz");
    let max_time = format!("-max_total_time={seconds}");

    for target in FUZZ_TARGETS {
        println!("Fuzzing {target} for {seconds}s...");
        let status = Command::new("cargo")
            .args(["+nightly", "fuzz", "run", target, "--", &max_time])
            .current_dir(&fuzz_dir)
            .status()
            .context("Failed to run cargo fuzz")?;
        if !status.success() {
            bail!("fuzz target {target} failed");
        }
    }
    println!("\n✓ No crashes");
    Ok(())
}

// ============================================================================
// Helper functions
// ============================================================================

fn project_root() -> Result<PathBuf> {
    let manifest_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => env::current_dir().context("no current directory")?,
    };

    // xtask is in project_root/xtask, so go up one level
    let root = manifest_dir.parent().unwrap_or(&manifest_dir);
    Ok(root.to_path_buf())
}

fn run_cargo(args: &[&str]) -> Result<()> {
    let root = project_root()?;

    let status = Command::new("cargo")
        .args(args)
        .current_dir(&root)
        .status()
        .with_context(|| format!("Failed to run cargo {:?}", args))?;

    if !status.success() {
        bail!("cargo {:?} failed", args);
    }

    Ok(())
}

/// Module docs state their invariants as `**Invariant**:` lines.
fn check_invariant_markers() -> Result<()> {
    let root = project_root()?;
    let src_dir = root.join("src");

    let output = Command::new("grep")
        .args(["-r", "**Invariant**:", "--include=*.rs", "-F"])
        .current_dir(&src_dir)
        .output()
        .context("Failed to run grep")?;

    let count = output.stdout.split(|&b| b == b'\n').filter(|l| !l.is_empty()).count();

    if count < 5 {
        bail!(
            "Expected at least 5 invariant markers, found {}. Someone may have removed a module contract!",
            count
        );
    }

    Ok(())
}
