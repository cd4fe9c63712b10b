//! Installed application bundles on disk.

use crate::error::{AppsError, Result};
use crate::types::ApplicationRecord;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Scans every directory in order. A directory that cannot be read is logged
/// and contributes nothing; the others are still scanned.
pub fn fetch_installed_applications(dirs: &[PathBuf], extension: &str) -> Vec<ApplicationRecord> {
    dirs.iter()
        .flat_map(|dir| match scan_application_dir(dir, extension) {
            Ok(records) => records,
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    dir = %dir.display(),
                    "Failed to read applications directory"
                );
                Vec::new()
            }
        })
        .collect()
}

/// Lists immediate, non-hidden children of `dir` carrying the bundle extension,
/// in file-name order.
pub fn scan_application_dir(dir: &Path, extension: &str) -> Result<Vec<ApplicationRecord>> {
    let mut records = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if err.depth() == 0 => {
                return Err(AppsError::Io {
                    context: format!("listing {}", dir.display()),
                    source: err.into(),
                })
            }
            Err(err) => {
                tracing::debug!(error = %err, "Skipping unreadable entry");
                continue;
            }
        };

        let file_name = entry.file_name().to_string_lossy();
        if file_name.starts_with('.') {
            continue;
        }
        let path = entry.path();
        if !path.extension().is_some_and(|ext| ext == extension) {
            continue;
        }
        let Some(stem) = path.file_stem() else {
            continue;
        };

        records.push(ApplicationRecord::installed(
            stem.to_string_lossy().into_owned(),
            path.to_string_lossy().into_owned(),
        ));
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn lists_only_visible_bundles() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join("Zed.app")).unwrap();
        std::fs::create_dir(dir.path().join("Calendar.app")).unwrap();
        std::fs::create_dir(dir.path().join(".Hidden.app")).unwrap();
        std::fs::create_dir(dir.path().join("Utilities")).unwrap();
        std::fs::write(dir.path().join("README.txt"), "x").unwrap();

        let records = scan_application_dir(dir.path(), "app").unwrap();
        let names: Vec<_> = records.iter().filter_map(|r| r.name()).collect();
        assert_eq!(names, vec!["Calendar", "Zed"]);

        let calendar = &records[0];
        assert_eq!(calendar.title(), Some("Calendar"));
        assert_eq!(calendar.numeric_id(), None);
        assert_eq!(calendar.process_id(), None);
        let expected = dir.path().join("Calendar.app");
        assert_eq!(calendar.path(), expected.to_str());
    }

    #[test]
    fn does_not_descend_into_subdirectories() {
        let dir = tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("Utilities").join("Console.app")).unwrap();

        assert!(scan_application_dir(dir.path(), "app").unwrap().is_empty());
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempdir().unwrap();
        let err = scan_application_dir(&dir.path().join("missing"), "app").unwrap_err();
        assert!(matches!(err, AppsError::Io { .. }));
    }

    #[test]
    fn unreadable_directory_keeps_results_from_others() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join("Foo.app")).unwrap();

        let records = fetch_installed_applications(
            &[dir.path().join("missing"), dir.path().to_path_buf()],
            "app",
        );
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name(), Some("Foo"));
    }
}
