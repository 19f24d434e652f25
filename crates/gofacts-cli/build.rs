use std::process::Command;

/// `gofacts --version` reports the nearest release tag, falling back to the
/// crate version when building outside a git checkout.
fn main() {
    let version = git_describe().unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string());

    println!("cargo:rustc-env=GOFACTS_VERSION={}", version);
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/tags");
}

/// Release tags are `vX.Y.Z`; the leading `v` is dropped.
fn git_describe() -> Option<String> {
    let output = Command::new("git")
        .args(["describe", "--tags", "--always"])
        .output()
        .ok()
        .filter(|output| output.status.success())?;
    let described = String::from_utf8(output.stdout).ok()?;
    let version = described.trim().trim_start_matches('v');
    (!version.is_empty()).then(|| version.to_string())
}
