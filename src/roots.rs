//! Root directory resolution.

use std::path::{Path, PathBuf};

/// Join each root name onto `cwd`, keeping the configured order.
///
/// Roots are not checked for existence; discovery treats a missing root as empty.
pub fn resolve_roots<S: AsRef<str>>(cwd: &Path, names: &[S]) -> Vec<PathBuf> {
    names.iter().map(|name| cwd.join(name.as_ref())).collect()
}

/// Resolve roots against the process working directory.
pub fn resolve_from_current_dir<S: AsRef<str>>(names: &[S]) -> std::io::Result<Vec<PathBuf>> {
    let cwd = std::env::current_dir()?;
    Ok(resolve_roots(&cwd, names))
}
