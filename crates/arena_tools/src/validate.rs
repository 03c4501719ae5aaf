//! Scenario validation.

use std::path::{Path, PathBuf};

use arena_headless::scenario::Scenario;
use thiserror::Error;
use tracing::{debug, info, warn};

/// One file that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFailure {
    /// Offending file.
    pub path: PathBuf,
    /// What is wrong with it.
    pub problems: Vec<String>,
}

/// Validation error.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The directory could not be listed.
    #[error("Failed to read directory '{path}': {source}")]
    Io {
        /// Directory being listed.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
    /// The directory holds no scenario files.
    #[error("No .ron scenario files in '{0}'")]
    Empty(PathBuf),
    /// Some files are invalid.
    #[error("{} of {checked} scenario file(s) invalid", failures.len())]
    Invalid {
        /// Files checked.
        checked: usize,
        /// Files that failed.
        failures: Vec<FileFailure>,
    },
}

/// Check one scenario file, returning every problem found.
#[must_use]
pub fn validate_scenario_file(path: &Path) -> Vec<String> {
    match Scenario::load(path) {
        Ok(scenario) => scenario.validate(),
        Err(e) => vec![e.to_string()],
    }
}

/// Validate every `.ron` scenario file in a directory (not recursive).
///
/// Returns the number of files checked.
///
/// # Errors
///
/// Returns an error if the directory cannot be read, holds no scenario
/// files, or any file fails validation.
pub fn validate_scenario_directory(dir: &Path) -> Result<usize, ValidationError> {
    let io_err = |source| ValidationError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)
        .map_err(io_err)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "ron"))
        .collect();
    files.sort();

    if files.is_empty() {
        return Err(ValidationError::Empty(dir.to_path_buf()));
    }

    let mut failures = Vec::new();
    for path in &files {
        let problems = validate_scenario_file(path);
        if problems.is_empty() {
            debug!(path = %path.display(), "scenario ok");
        } else {
            for problem in &problems {
                warn!(path = %path.display(), "{problem}");
            }
            failures.push(FileFailure {
                path: path.clone(),
                problems,
            });
        }
    }

    info!(checked = files.len(), failed = failures.len(), "validation finished");

    if failures.is_empty() {
        Ok(files.len())
    } else {
        Err(ValidationError::Invalid {
            checked: files.len(),
            failures,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"Scenario(
        name: "Duel",
        description: "Two fighters",
        roster: [
            (name: "A", archetype: "warrior", position: 0),
            (name: "B", archetype: "mage", position: 3),
        ],
    )"#;

    const BAD_ARCHETYPE: &str = r#"Scenario(
        name: "Bad",
        description: "Unknown class",
        roster: [
            (name: "A", archetype: "paladin", position: 0),
            (name: "B", archetype: "mage", position: 3),
        ],
    )"#;

    #[test]
    fn test_valid_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("duel.ron"), VALID).unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        assert_eq!(validate_scenario_directory(dir.path()).unwrap(), 1);
    }

    #[test]
    fn test_reports_every_bad_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a_good.ron"), VALID).unwrap();
        std::fs::write(dir.path().join("b_bad.ron"), BAD_ARCHETYPE).unwrap();
        std::fs::write(dir.path().join("c_broken.ron"), "Scenario(").unwrap();

        let err = validate_scenario_directory(dir.path()).unwrap_err();
        match err {
            ValidationError::Invalid { checked, failures } => {
                assert_eq!(checked, 3);
                assert_eq!(failures.len(), 2);
                assert!(failures[0].path.ends_with("b_bad.ron"));
                assert!(failures[0].problems[0].contains("Unknown archetype"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            validate_scenario_directory(dir.path()),
            Err(ValidationError::Empty(_))
        ));
    }

    #[test]
    fn test_missing_directory() {
        assert!(matches!(
            validate_scenario_directory(Path::new("/no/such/dir")),
            Err(ValidationError::Io { .. })
        ));
    }
}
