use crate::domain::ports::Storage;
use crate::utils::error::Result;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }

    pub async fn read_text(&self, path: &str) -> Result<String> {
        let data = self.read_file(path).await?;
        Ok(String::from_utf8_lossy(&data).into_owned())
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = Path::new(&self.base_path).join(path);
        let data = fs::read(full_path)?;
        Ok(data)
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = Path::new(&self.base_path).join(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(full_path, data)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_then_read_nested() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().to_string_lossy().into_owned());

        storage.write_file("refs/msr.docx", b"PK").await.unwrap();
        assert_eq!(storage.read_file("refs/msr.docx").await.unwrap(), b"PK");
        assert!(temp_dir.path().join("refs").is_dir());
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let storage = LocalStorage::new(".".to_string());
        let err = storage.read_text("does/not/exist.md").await.unwrap_err();
        assert!(matches!(err, crate::utils::error::SyllabusError::IoError(_)));
    }
}
