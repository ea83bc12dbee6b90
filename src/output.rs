//! Naming, writing and removing generated artifacts on disk.
//!
//! Callers own the output location; a fresh name per request keeps
//! concurrent conversions from clobbering each other.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

/// `document_{owner}_{YYYYmmdd_HHMMSS}.{extension}`
pub fn artifact_file_name(owner: &str, created: NaiveDateTime, extension: &str) -> String {
    format!(
        "document_{owner}_{}.{extension}",
        created.format("%Y%m%d_%H%M%S")
    )
}

/// Write `bytes` to `dir/name`, creating `dir` if needed.
pub fn write_artifact(dir: &Path, name: &str, bytes: &[u8]) -> io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(name);
    fs::write(&path, bytes)?;
    log::info!("wrote {} ({} bytes)", path.display(), bytes.len());
    Ok(path)
}

/// Remove a delivered artifact. Returns `false` if it was already gone.
pub fn cleanup_file(path: &Path) -> io::Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => {
            log::info!("removed {}", path.display());
            Ok(true)
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn file_name_embeds_owner_and_timestamp() {
        let created = NaiveDate::from_ymd_opt(2024, 3, 7)
            .unwrap()
            .and_hms_opt(9, 5, 1)
            .unwrap();
        assert_eq!(
            artifact_file_name("12345", created, "docx"),
            "document_12345_20240307_090501.docx"
        );
    }

    #[test]
    fn write_creates_missing_directory() {
        let temp = tempfile::tempdir().unwrap();
        let dir = temp.path().join("generated_docs");

        let path = write_artifact(&dir, "a.html", b"<p>x</p>").unwrap();

        assert_eq!(path, dir.join("a.html"));
        assert_eq!(fs::read(&path).unwrap(), b"<p>x</p>");
    }

    #[test]
    fn cleanup_reports_whether_a_file_was_removed() {
        let temp = tempfile::tempdir().unwrap();
        let path = write_artifact(temp.path(), "a.pdf", b"%PDF").unwrap();

        assert!(cleanup_file(&path).unwrap());
        assert!(!path.exists());
        assert!(!cleanup_file(&path).unwrap());
    }
}
