use crate::domain::ports::ReferenceSource;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::PathBuf;

/// 從本機目錄讀取參考檔案
#[derive(Debug, Clone)]
pub struct LocalSource {
    base_path: PathBuf,
}

impl LocalSource {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }
}

#[async_trait]
impl ReferenceSource for LocalSource {
    async fn fetch(&self, file_name: &str) -> Result<Vec<u8>> {
        let full_path = self.base_path.join(file_name);
        tracing::debug!("Reading {}", full_path.display());
        let data = tokio::fs::read(full_path).await?;
        Ok(data)
    }

    fn describe(&self) -> String {
        self.base_path.display().to_string()
    }
}
