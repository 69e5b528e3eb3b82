//! Source file discovery.

use std::path::{Path, PathBuf};

use crate::error::{IngestError, Result};
use crate::format::SourceFormat;

/// Lists source files of one format in a directory.
///
/// Matches on file extension, case-insensitively. Files are returned in
/// filesystem enumeration order, deliberately unsorted: ordering is stable
/// within one run on one filesystem, and callers must not depend on more
/// than that.
pub fn list_source_files(dir: &Path, format: SourceFormat) -> Result<Vec<PathBuf>> {
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
            .map(|ext| ext.eq_ignore_ascii_case(format.extension()))
            .unwrap_or(false);

        if matches {
            files.push(path);
        }
    }

    Ok(files)
}

/// Lists source files for every supported format, in processing order.
pub fn source_inventory(dir: &Path) -> Result<Vec<(SourceFormat, Vec<PathBuf>)>> {
    let mut inventory = Vec::with_capacity(SourceFormat::ALL.len());
    for format in SourceFormat::ALL {
        inventory.push((format, list_source_files(dir, format)?));
    }
    Ok(inventory)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        for name in &["a.csv", "b.CSV", "c.json", "d.xml", "notes.txt"] {
            std::fs::write(dir.path().join(name), "x").unwrap();
        }
        std::fs::create_dir(dir.path().join("sub.csv")).unwrap();
        dir
    }

    #[test]
    fn test_list_csv_case_insensitive() {
        let dir = create_test_dir();
        let files = list_source_files(dir.path(), SourceFormat::Csv).unwrap();
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn test_list_skips_directories_and_other_extensions() {
        let dir = create_test_dir();
        let files = list_source_files(dir.path(), SourceFormat::Xml).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("d.xml"));
    }

    #[test]
    fn test_missing_directory() {
        let result = list_source_files(Path::new("/no/such/dir"), SourceFormat::Csv);
        assert!(matches!(result, Err(IngestError::DirectoryNotFound { .. })));
    }

    #[test]
    fn test_inventory_format_order() {
        let dir = create_test_dir();
        let inventory = source_inventory(dir.path()).unwrap();
        let formats: Vec<SourceFormat> = inventory.iter().map(|(f, _)| *f).collect();
        assert_eq!(formats, SourceFormat::ALL.to_vec());
    }
}
