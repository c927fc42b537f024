//! Source file discovery.

use std::path::{Path, PathBuf};

use crate::error::{IngestError, Result};

/// Lists all XML files in a directory, sorted by filename.
pub fn list_xml_files(dir: &Path) -> Result<Vec<PathBuf>> {
    list_files_with_extension(dir, "xml")
}

/// Lists all JSON files in a directory, sorted by filename.
pub fn list_json_files(dir: &Path) -> Result<Vec<PathBuf>> {
    list_files_with_extension(dir, "json")
}

/// Lists the files in `dir` carrying the given extension (case-insensitive).
///
/// Returns files sorted by filename so every downstream pass sees a
/// deterministic order.
fn list_files_with_extension(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut files = Vec::new();
    for entry_result in entries {
        let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;

        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let matches = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case(extension))
            .unwrap_or(false);

        if matches {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        for name in &["b.xml", "a.xml", "notes.txt", "c.json", "UPPER.XML"] {
            std::fs::write(dir.path().join(name), "content").unwrap();
        }
        std::fs::create_dir(dir.path().join("nested.xml")).unwrap();
        dir
    }

    #[test]
    fn test_list_xml_files_sorted() {
        let dir = create_test_dir();
        let files = list_xml_files(dir.path()).unwrap();

        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["UPPER.XML", "a.xml", "b.xml"]);
    }

    #[test]
    fn test_list_json_files() {
        let dir = create_test_dir();
        let files = list_json_files(dir.path()).unwrap();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn test_missing_directory() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        assert!(matches!(
            list_xml_files(&missing),
            Err(IngestError::DirectoryNotFound { .. })
        ));
    }
}
