fn main() {
    // An explicit version (packagers, CI) always wins
    println!("cargo:rerun-if-env-changed=TRIPANE_BUILD_VERSION");
    if let Ok(v) = std::env::var("TRIPANE_BUILD_VERSION") {
        if !v.is_empty() {
            println!("cargo:rustc-env=TRIPANE_BUILD_VERSION={v}");
            return;
        }
    }

    println!("cargo:rerun-if-changed=VERSION");
    if let Some(v) = std::fs::read_to_string("VERSION")
        .ok()
        .and_then(|v| normalize_version(&v))
    {
        println!("cargo:rustc-env=TRIPANE_BUILD_VERSION={v}");
        return;
    }

    if let Ok(output) = std::process::Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
    {
        if output.status.success() {
            if let Some(v) = normalize_version(&String::from_utf8_lossy(&output.stdout)) {
                println!("cargo:rustc-env=TRIPANE_BUILD_VERSION={v}");
                println!("cargo:rerun-if-changed=.git/HEAD");
                println!("cargo:rerun-if-changed=.git/refs/tags");
                return;
            }
        }
    }

    println!(
        "cargo:rustc-env=TRIPANE_BUILD_VERSION={}",
        std::env::var("CARGO_PKG_VERSION").unwrap()
    );
}

/// Trim and drop a leading `v` ("v0.3.1" -> "0.3.1")
fn normalize_version(raw: &str) -> Option<String> {
    let v = raw.trim();
    let v = v.strip_prefix('v').unwrap_or(v);
    (!v.is_empty()).then(|| v.to_string())
}
