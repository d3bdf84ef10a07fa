use std::path::PathBuf;

use tokio::fs;
use tracing::info;

use crate::export::ExportError;

/// Fixed name of every exported document.
pub const EXPORT_FILE_NAME: &str = "resume.pdf";

/// Writes finished exports into a directory as `resume.pdf`.
///
/// Bytes go to a temp file first and are renamed into place, so a failed write
/// never leaves a partial `resume.pdf` behind.
#[derive(Debug, Clone)]
pub struct ExportSink {
    dir: PathBuf,
}

impl ExportSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        ExportSink { dir: dir.into() }
    }

    pub async fn save(&self, bytes: &[u8]) -> Result<PathBuf, ExportError> {
        fs::create_dir_all(&self.dir).await?;
        let target = self.dir.join(EXPORT_FILE_NAME);
        let tmp = self.dir.join(format!(".{EXPORT_FILE_NAME}.part"));
        if let Err(e) = fs::write(&tmp, bytes).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(e.into());
        }
        fs::rename(&tmp, &target).await?;
        info!(path = %target.display(), bytes = bytes.len(), "export saved");
        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_writes_fixed_name() {
        let dir = tempfile::tempdir().unwrap();
        let sink = ExportSink::new(dir.path().join("out"));
        let path = sink.save(b"%PDF-1.7 test").await.unwrap();
        assert_eq!(path.file_name().unwrap(), EXPORT_FILE_NAME);
        assert_eq!(std::fs::read(&path).unwrap(), b"%PDF-1.7 test");
    }

    #[tokio::test]
    async fn test_save_replaces_previous_export() {
        let dir = tempfile::tempdir().unwrap();
        let sink = ExportSink::new(dir.path());
        sink.save(b"first").await.unwrap();
        let path = sink.save(b"second").await.unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"second");
        let names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names.len(), 1, "temp file must not linger: {names:?}");
    }

    #[tokio::test]
    async fn test_unwritable_dir_fails_without_output() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, b"x").unwrap();
        let sink = ExportSink::new(blocker.join("nested"));
        assert!(matches!(sink.save(b"pdf").await, Err(ExportError::Save(_))));
    }
}
