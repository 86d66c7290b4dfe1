// Pipeline ingestion: loading raw CSV text from disk

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

use crate::error::Result;

/// Resolve the CSV path: a name without an extension gets `.csv` appended
pub fn csv_path(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension("csv")
    }
}

/// Read the whole CSV file as UTF-8 text
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn load_csv(path: impl AsRef<Path>) -> Result<String> {
    let path = csv_path(path);
    let text = fs::read_to_string(&path)?;
    debug!("Loaded {} bytes from {}", text.len(), path.display());
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_csv_path_appends_extension() {
        assert_eq!(csv_path("data/users"), PathBuf::from("data/users.csv"));
        assert_eq!(csv_path("users.txt"), PathBuf::from("users.txt"));
    }

    #[test]
    fn test_load_csv_with_and_without_extension() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("people.csv");
        fs::write(&file, "Ann Lee,1/1/90,33,ann.lee@x.com\n").unwrap();

        assert_eq!(load_csv(&file).unwrap(), "Ann Lee,1/1/90,33,ann.lee@x.com\n");
        assert_eq!(
            load_csv(dir.path().join("people")).unwrap(),
            "Ann Lee,1/1/90,33,ann.lee@x.com\n"
        );
    }

    #[test]
    fn test_load_csv_missing_file() {
        let dir = tempdir().unwrap();
        assert!(load_csv(dir.path().join("absent")).is_err());
    }
}
