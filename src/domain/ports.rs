use crate::domain::model::Category;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;

/// 讀取參考 JSON 檔案的來源（HTTP、本機目錄、測試用記憶體）
#[async_trait]
pub trait ReferenceSource: Send + Sync {
    async fn fetch(&self, file_name: &str) -> Result<Vec<u8>>;

    /// 用於日誌的來源描述
    fn describe(&self) -> String;
}

pub trait ConfigProvider: Send + Sync {
    fn data_source(&self) -> &str;
    fn cache_ttl(&self) -> Duration;
    fn sweep_interval(&self) -> Option<Duration>;
    fn request_timeout(&self) -> Duration;

    fn file_name_overrides(&self) -> HashMap<Category, String> {
        HashMap::new()
    }

    /// (category, external name, canonical name)
    fn extra_aliases(&self) -> Vec<(Category, String, String)> {
        Vec::new()
    }
}
