//! Input file discovery

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::ScanError;

/// Enumerate regular files in `dir` with the given extension
///
/// Extension matching is case-insensitive. Results are sorted by path
/// so a scan processes files in a deterministic order.
pub fn discover_input_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>, ScanError> {
    let mut files = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case(extension) => files.push(path),
            _ => {}
        }
    }

    files.sort();
    info!(
        directory = %dir.display(),
        count = files.len(),
        "Discovered input files"
    );
    Ok(files)
}

/// Derive the output path for an input file
///
/// Appends `suffix` to the file stem, keeping the extension and the
/// directory: `LSE/flutter.csv` becomes `LSE/flutter_outliers.csv`.
pub fn output_path(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");

    let name = match input.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{}{}.{}", stem, suffix, ext),
        None => format!("{}{}", stem, suffix),
    };

    input.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discover_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.csv"), "x").unwrap();
        fs::write(dir.path().join("a.csv"), "x").unwrap();
        fs::write(dir.path().join("notes.txt"), "x").unwrap();
        // A directory with a matching name must not be picked up
        fs::create_dir(dir.path().join("d.csv")).unwrap();

        let files = discover_input_files(dir.path(), "csv").unwrap();
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].file_name().unwrap(), "a.csv");
        assert_eq!(files[1].file_name().unwrap(), "b.csv");
    }

    #[test]
    fn test_discover_matches_extension_case_insensitively() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("upper.CSV"), "x").unwrap();

        let files = discover_input_files(dir.path(), "csv").unwrap();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn test_discover_empty_directory() {
        let dir = tempfile::tempdir().unwrap();

        let files = discover_input_files(dir.path(), "csv").unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_output_path_keeps_extension() {
        let path = output_path(Path::new("LSE/flutter.csv"), "_outliers");
        assert_eq!(path, PathBuf::from("LSE/flutter_outliers.csv"));
    }

    #[test]
    fn test_output_path_without_extension() {
        let path = output_path(Path::new("LSE/flutter"), "_outliers");
        assert_eq!(path, PathBuf::from("LSE/flutter_outliers"));
    }
}
