//! The formatting run: discover every eligible file first, then format them one by one.

use crate::config::Config;
use crate::discovery::{self, DiscoveryError};
use crate::formatter::FileFormatter;
use crate::roots;
use std::path::{Path, PathBuf};

/// Counts from a completed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Files that passed the extension filter
    pub discovered: usize,
    /// Formatter invocations, successful or not
    pub attempted: usize,
}

pub struct Driver<F> {
    roots: Vec<PathBuf>,
    extensions: Vec<String>,
    formatter: F,
}

impl<F: FileFormatter> Driver<F> {
    pub fn new(roots: Vec<PathBuf>, extensions: Vec<String>, formatter: F) -> Self {
        Self {
            roots,
            extensions,
            formatter,
        }
    }

    /// Driver for `config`, with roots resolved against `cwd`.
    pub fn from_config(config: &Config, cwd: &Path, formatter: F) -> Self {
        Self::new(
            roots::resolve_roots(cwd, &config.roots),
            config.extensions.clone(),
            formatter,
        )
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    pub fn formatter(&self) -> &F {
        &self.formatter
    }

    /// Discovery phase only.
    pub fn discover(&self) -> Result<Vec<PathBuf>, DiscoveryError> {
        discovery::discover(&self.roots, &self.extensions)
    }

    /// Run both phases.
    ///
    /// The file list is complete before the first formatter call. A file the
    /// formatter fails on is logged at debug level and skipped; only a discovery
    /// failure ends the run early.
    pub fn run(&self) -> Result<RunSummary, DiscoveryError> {
        let files = self.discover()?;
        let mut summary = RunSummary {
            discovered: files.len(),
            attempted: 0,
        };

        for file in &files {
            log::debug!("Formatting {}", file.display());
            summary.attempted += 1;
            if let Err(e) = self.formatter.format_file(file) {
                log::debug!("{e}");
            }
        }

        log::info!("Formatted {} of {} files", summary.attempted, summary.discovered);
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatter::FormatError;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::fs;
    use tempfile::tempdir;

    /// Records every call; fails on files whose name starts with "bad".
    #[derive(Default)]
    struct RecordingFormatter {
        calls: RefCell<Vec<PathBuf>>,
    }

    impl FileFormatter for RecordingFormatter {
        fn format_file(&self, path: &Path) -> Result<(), FormatError> {
            self.calls.borrow_mut().push(path.to_path_buf());
            let name = path.file_name().unwrap().to_string_lossy();
            if name.starts_with("bad") {
                Err(FormatError::Failed {
                    program: "fake".to_string(),
                    file: path.to_path_buf(),
                    code: Some(1),
                })
            } else {
                Ok(())
            }
        }
    }

    fn touch(base: &Path, relative: &str) {
        let path = base.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "void f();\n").unwrap();
    }

    #[test]
    fn test_no_roots_means_no_formatter_calls() {
        let temp_dir = tempdir().unwrap();
        let driver = Driver::from_config(&Config::default(), temp_dir.path(), RecordingFormatter::default());

        let summary = driver.run().unwrap();
        assert_eq!(summary, RunSummary::default());
        assert!(driver.formatter().calls.borrow().is_empty());
    }

    #[test]
    fn test_every_file_is_attempted_after_a_failure() {
        let temp_dir = tempdir().unwrap();
        let base = temp_dir.path();
        touch(base, "neutrino/a.cpp");
        touch(base, "neutrino/bad.cpp");
        touch(base, "neutrino/c.h");
        touch(base, "test/bad_too.hpp");
        touch(base, "test/d.mm");

        let driver = Driver::from_config(&Config::default(), base, RecordingFormatter::default());
        let summary = driver.run().unwrap();

        assert_eq!(
            summary,
            RunSummary {
                discovered: 5,
                attempted: 5
            }
        );
        assert_eq!(
            *driver.formatter().calls.borrow(),
            vec![
                base.join("neutrino/a.cpp"),
                base.join("neutrino/bad.cpp"),
                base.join("neutrino/c.h"),
                base.join("test/bad_too.hpp"),
                base.join("test/d.mm"),
            ]
        );
    }

    #[test]
    fn test_formatter_only_sees_discovered_files() {
        let temp_dir = tempdir().unwrap();
        let base = temp_dir.path();
        touch(base, "neutrino/a.cpp");
        touch(base, "neutrino/a.txt");
        touch(base, "example/sub/b.h");
        touch(base, "other/c.cpp");

        let driver = Driver::new(
            roots::resolve_roots(base, &["neutrino", "example", "test"]),
            vec!["cpp".to_string(), "h".to_string()],
            RecordingFormatter::default(),
        );
        let discovered = driver.discover().unwrap();
        driver.run().unwrap();

        assert_eq!(*driver.formatter().calls.borrow(), discovered);
        assert_eq!(discovered, vec![base.join("neutrino/a.cpp"), base.join("example/sub/b.h")]);
    }

    #[test]
    fn test_discovery_completes_before_formatting() {
        let temp_dir = tempdir().unwrap();
        let base = temp_dir.path();
        touch(base, "neutrino/a.cpp");
        touch(base, "neutrino/b.cpp");

        // Creating a new source while formatting must not extend the current run
        let created = base.join("neutrino/new.cpp");
        let calls = RefCell::new(0usize);
        let formatter = |_: &Path| {
            *calls.borrow_mut() += 1;
            fs::write(&created, "void g();\n").unwrap();
            Ok::<(), FormatError>(())
        };

        let driver = Driver::from_config(&Config::default(), base, formatter);
        let summary = driver.run().unwrap();
        assert_eq!(summary.attempted, 2);
        assert_eq!(*calls.borrow(), 2);
    }

    #[cfg(unix)]
    #[test]
    fn test_traversal_failure_stops_before_any_formatting() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = tempdir().unwrap();
        let base = temp_dir.path();
        touch(base, "neutrino/a.cpp");
        touch(base, "test/z.cpp");
        let locked = base.join("neutrino/locked");
        fs::create_dir_all(&locked).unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        let readable = fs::read_dir(&locked).is_ok();
        let result = if readable {
            None
        } else {
            let driver = Driver::from_config(&Config::default(), base, RecordingFormatter::default());
            let result = driver.run();
            Some((result, driver.formatter().calls.borrow().len()))
        };
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        // Permission bits do not apply to root
        let Some((result, calls)) = result else {
            return;
        };
        assert!(matches!(result, Err(DiscoveryError::Walk { .. })));
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_custom_config_roots_and_extensions() {
        let temp_dir = tempdir().unwrap();
        let base = temp_dir.path();
        touch(base, "src/lib.c");
        touch(base, "src/lib.cpp");
        touch(base, "neutrino/ignored.c");

        let config = Config {
            roots: vec!["src".to_string()],
            extensions: vec!["c".to_string()],
            ..Config::default()
        };
        let driver = Driver::from_config(&config, base, RecordingFormatter::default());
        assert_eq!(driver.roots(), &[base.join("src")]);

        driver.run().unwrap();
        assert_eq!(*driver.formatter().calls.borrow(), vec![base.join("src/lib.c")]);
    }
}
