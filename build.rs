use std::process::Command;

/// Run `git rev-parse` with the given extra args, falling back to "unknown"
/// outside a checkout (e.g. when building from a published crate).
fn git_rev(extra: &[&str]) -> String {
    let mut args = vec!["rev-parse"];
    args.extend_from_slice(extra);
    args.push("HEAD");

    match Command::new("git").args(&args).output() {
        Ok(output) if output.status.success() => String::from_utf8(output.stdout)
            .map(|s| s.trim().to_string())
            .unwrap_or_else(|_| "unknown".to_string()),
        _ => "unknown".to_string(),
    }
}

fn main() {
    println!("cargo:rustc-env=KORSORD_GIT_HASH={}", git_rev(&["--short"]));
    println!("cargo:rerun-if-changed=.git/HEAD");
}
