//! Version information with embedded git metadata.

/// Package version from Cargo.toml.
pub const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Git branch at build time, or "unknown" if unavailable.
pub const GIT_BRANCH: &str = match option_env!("VERGEN_GIT_BRANCH") {
    Some(branch) => branch,
    None => "unknown",
};

/// Git commit SHA at build time, or "unknown" if unavailable.
pub const GIT_SHA: &str = match option_env!("VERGEN_GIT_SHA") {
    Some(sha) => sha,
    None => "unknown",
};

/// Build timestamp, or "unknown" if unavailable.
pub const BUILD_TIMESTAMP: &str = match option_env!("VERGEN_BUILD_TIMESTAMP") {
    Some(ts) => ts,
    None => "unknown",
};

/// Whether the working tree was dirty at build time.
pub fn git_dirty() -> bool {
    option_env!("VERGEN_GIT_DIRTY") == Some("true")
}

/// Full version string: `{version}+{branch}.{sha}` or `{version}+{branch}.{sha}.dirty`.
///
/// Examples:
/// - `0.1.0+main.abc1234`
/// - `0.1.0+feature/pdf-upload.abc1234.dirty`
pub fn version_string() -> String {
    build_version(PKG_VERSION, GIT_BRANCH, GIT_SHA, git_dirty())
}

/// Shown by `triagem version`; the commit is cut to seven characters.
fn build_version(pkg: &str, branch: &str, sha: &str, dirty: bool) -> String {
    let short_sha: String = sha.chars().take(7).collect();
    let dirty_suffix = if dirty { ".dirty" } else { "" };
    format!("{pkg}+{branch}.{short_sha}{dirty_suffix}")
}
