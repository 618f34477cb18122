//! File discovery: recursive enumeration under the roots, then extension filtering.
//!
//! Discovery never touches file contents and never spawns a process, so the whole
//! phase can be exercised against a scratch directory tree.

use ignore::WalkBuilder;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    /// The root exists but its metadata could not be read
    #[error("Failed to access root directory {}", .root.display())]
    Root { root: PathBuf, source: io::Error },

    /// A directory below the root could not be traversed
    #[error("Error walking directory {}", .root.display())]
    Walk { root: PathBuf, source: ignore::Error },
}

/// Collect every regular file below each root, root by root.
///
/// A root that does not exist, or is not a directory, contributes nothing.
/// Paths are not deduplicated across roots.
pub fn enumerate_files(roots: &[PathBuf]) -> Result<Vec<PathBuf>, DiscoveryError> {
    let mut file_paths = Vec::new();

    for root in roots {
        match fs::metadata(root) {
            Ok(metadata) if metadata.is_dir() => {}
            Ok(_) => {
                log::debug!("Skipping root {}: not a directory", root.display());
                continue;
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("Skipping root {}: does not exist", root.display());
                continue;
            }
            Err(source) => {
                return Err(DiscoveryError::Root {
                    root: root.clone(),
                    source,
                });
            }
        }

        let mut walk_builder = WalkBuilder::new(root);
        walk_builder.ignore(false); // No .ignore files
        walk_builder.git_ignore(false); // No .gitignore files
        walk_builder.git_global(false); // No global gitignore
        walk_builder.git_exclude(false); // No .git/info/exclude
        walk_builder.parents(false); // No ignore files from parent directories
        walk_builder.hidden(false); // Include hidden files and directories
        walk_builder.follow_links(false);
        walk_builder.sort_by_file_name(|a, b| a.cmp(b));

        let before = file_paths.len();
        for result in walk_builder.build() {
            let entry = result.map_err(|source| DiscoveryError::Walk {
                root: root.clone(),
                source,
            })?;
            let path = entry.path();
            // Follows symlinks, so a link to a regular file counts as a file
            if path.is_file() {
                file_paths.push(path.to_path_buf());
            }
        }
        log::debug!("Found {} files under {}", file_paths.len() - before, root.display());
    }

    Ok(file_paths)
}

/// Whether the suffix after the last `.` of the file name is in `extensions`.
///
/// Matching is exact and case-sensitive. Names without a suffix, including
/// dot-files such as `.clang-format`, never match.
pub fn has_extension<S: AsRef<str>>(path: &Path, extensions: &[S]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|allowed| allowed.as_ref() == ext))
}

/// Keep only the paths with an eligible extension, preserving order.
pub fn filter_by_extension<S: AsRef<str>>(files: Vec<PathBuf>, extensions: &[S]) -> Vec<PathBuf> {
    files
        .into_iter()
        .filter(|path| has_extension(path, extensions))
        .collect()
}

/// Build the complete list of files to format.
pub fn discover<S: AsRef<str>>(roots: &[PathBuf], extensions: &[S]) -> Result<Vec<PathBuf>, DiscoveryError> {
    let files = enumerate_files(roots)?;
    let total = files.len();
    let eligible = filter_by_extension(files, extensions);
    log::info!("Discovered {} eligible files ({total} enumerated)", eligible.len());
    Ok(eligible)
}
