//! Build script for the persona diversity monitor
//!
//! Embeds git revision, build timestamp, target triple and rustc version
//! so that reports can be traced back to the binary that produced them.

use std::env;
use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/index");

    let git_hash = run_trimmed("git", &["rev-parse", "--short=8", "HEAD"]);
    let git_dirty = match Command::new("git").args(["status", "--porcelain"]).output() {
        Ok(out) if out.status.success() => (!out.stdout.is_empty()).to_string(),
        _ => "unknown".to_string(),
    };
    let build_timestamp = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string();
    let target = env::var("TARGET").unwrap_or_else(|_| "unknown".to_string());
    let profile = env::var("PROFILE").unwrap_or_else(|_| "unknown".to_string());
    let rustc_version = run_trimmed("rustc", &["--version"]);

    println!("cargo:rustc-env=PD_GIT_HASH={}", git_hash);
    println!("cargo:rustc-env=PD_GIT_DIRTY={}", git_dirty);
    println!("cargo:rustc-env=PD_BUILD_TIMESTAMP={}", build_timestamp);
    println!("cargo:rustc-env=PD_TARGET={}", target);
    println!("cargo:rustc-env=PD_PROFILE={}", profile);
    println!("cargo:rustc-env=PD_RUSTC_VERSION={}", rustc_version);
}

/// Run a command and return its trimmed stdout, or "unknown" on any failure
fn run_trimmed(program: &str, args: &[&str]) -> String {
    Command::new(program)
        .args(args)
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
