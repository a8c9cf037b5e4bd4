use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::LoadError;

/// Discover text files under a directory
///
/// Walks the whole tree without following symlinks and keeps every file whose
/// extension is in `extensions` (case-insensitive). Entries that cannot be
/// walked come back as errors next to the found files instead of failing the
/// scan. Paths are returned sorted.
pub fn discover_text_files(dir: &Path, extensions: &[String]) -> (Vec<PathBuf>, Vec<LoadError>) {
    let mut files = Vec::new();
    let mut errors = Vec::new();

    for entry in WalkDir::new(dir).follow_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                errors.push(LoadError::Walk {
                    path: e.path().map(Path::to_path_buf).unwrap_or_else(|| dir.to_path_buf()),
                    message: e.to_string(),
                });
                continue;
            }
        };

        let path = entry.path();
        if entry.file_type().is_file() && has_extension(path, extensions) {
            files.push(path.to_path_buf());
        }
    }

    files.sort();
    (files, errors)
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .map(|ext| extensions.iter().any(|wanted| wanted.eq_ignore_ascii_case(&ext)))
        .unwrap_or(false)
}

/// Read a whole file as text
///
/// Invalid UTF-8 sequences are replaced with U+FFFD rather than rejected.
pub fn read_text_lossy(path: &Path) -> Result<String, LoadError> {
    let mut file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn txt() -> Vec<String> {
        vec!["txt".to_string()]
    }

    #[test]
    fn test_discover_text_files_nested() -> anyhow::Result<()> {
        let temp_dir = tempdir()?;
        let nested = temp_dir.path().join("a").join("b");
        fs::create_dir_all(&nested)?;

        let top = temp_dir.path().join("top.txt");
        let deep = nested.join("deep.TXT");
        fs::write(&top, "x")?;
        fs::write(&deep, "y")?;
        fs::write(temp_dir.path().join("notes.md"), "z")?;
        fs::create_dir_all(temp_dir.path().join("folder.txt"))?;

        let (files, errors) = discover_text_files(temp_dir.path(), &txt());

        assert!(errors.is_empty());
        assert_eq!(files.len(), 2);
        assert!(files.contains(&top));
        assert!(files.contains(&deep));

        Ok(())
    }

    #[test]
    fn test_discover_missing_directory_reports_error() {
        let (files, errors) = discover_text_files(Path::new("/definitely/not/here"), &txt());

        assert!(files.is_empty());
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_read_text_lossy_replaces_invalid_bytes() -> anyhow::Result<()> {
        let temp_dir = tempdir()?;
        let path = temp_dir.path().join("broken.txt");
        fs::write(&path, b"a@b.com:pw \xff\xfe| Vbucks: 10\n")?;

        let text = read_text_lossy(&path)?;
        assert!(text.starts_with("a@b.com:pw "));
        assert!(text.contains('\u{fffd}'));
        assert!(text.contains("Vbucks: 10"));

        Ok(())
    }

    #[test]
    fn test_read_missing_file_is_open_error() {
        let result = read_text_lossy(Path::new("/definitely/not/here.txt"));
        assert!(matches!(result, Err(LoadError::Open { .. })));
    }
}
