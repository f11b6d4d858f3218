/// Build script for modelar
/// Captures build environment for reproducibility

fn main() {
    // Capture build metadata for reproducibility verification
    println!("cargo:rerun-if-changed=Cargo.toml");
    println!("cargo:rerun-if-changed=Cargo.lock");

    // Embed version information
    if let Ok(version) = std::env::var("CARGO_PKG_VERSION") {
        println!("cargo:rustc-env=MODELAR_VERSION={version}");
    }

    // Capture git hash for reproducibility
    if let Ok(output) = std::process::Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
    {
        if let Ok(hash) = String::from_utf8(output.stdout) {
            if !hash.trim().is_empty() {
                println!("cargo:rustc-env=GIT_HASH={}", hash.trim());
            }
        }
    }

    // Capture build timestamp (seconds since the Unix epoch)
    println!("cargo:rustc-env=BUILD_TIMESTAMP={}", build_timestamp());
}

/// Simple epoch timestamp without external crate
fn build_timestamp() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let duration = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}", duration.as_secs())
}
