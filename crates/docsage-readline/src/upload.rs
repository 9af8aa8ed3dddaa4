//! Reading uploads from disk into session payloads.

use anyhow::{Context, Result, bail};
use docsage_interaction::data_uri;
use std::path::Path;

const SUPPORTED_TYPES: &[&str] = &["text/plain", "application/pdf"];

/// A file ready to be added to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    pub name: String,
    /// `data:` URI of the file contents.
    pub payload: String,
}

/// Reads a `.txt` or `.pdf` file and encodes it as a `data:` URI.
pub fn read_upload(path: &Path) -> Result<Upload> {
    let mime_type = supported_mime_type(path)?;
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    Ok(Upload {
        name,
        payload: data_uri::encode(mime_type, &bytes),
    })
}

fn supported_mime_type(path: &Path) -> Result<&'static str> {
    let guessed = mime_guess::from_path(path).first_raw();
    match guessed.and_then(|m| SUPPORTED_TYPES.iter().copied().find(|s| *s == m)) {
        Some(mime) => Ok(mime),
        None => bail!(
            "Unsupported file type for {} (only .txt and .pdf are accepted)",
            path.display()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_reads_text_file_as_data_uri() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("lease.txt");
        std::fs::write(&path, "A").unwrap();

        let upload = read_upload(&path).unwrap();

        assert_eq!(upload.name, "lease.txt");
        assert_eq!(upload.payload, "data:text/plain;base64,QQ==");
    }

    #[test]
    fn test_pdf_mime_type() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("contract.pdf");
        std::fs::write(&path, b"%PDF-1.4").unwrap();

        let upload = read_upload(&path).unwrap();
        assert!(upload.payload.starts_with("data:application/pdf;base64,"));
    }

    #[test]
    fn test_rejects_other_types() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("photo.png");
        std::fs::write(&path, b"png").unwrap();

        let err = read_upload(&path).unwrap_err();
        assert!(err.to_string().contains("Unsupported file type"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = read_upload(Path::new("/definitely/not/here.txt")).unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }
}
