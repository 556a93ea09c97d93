use crate::domain::ports::ReferenceSource;
use crate::utils::error::{LookupError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// 以 HTTP GET 從基底 URL 下讀取參考檔案
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    base_url: Url,
}

impl HttpSource {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        // 沒有結尾斜線時 join 會取代最後一段路徑
        let mut base_url = Url::parse(base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    pub fn file_url(&self, file_name: &str) -> Result<Url> {
        Ok(self.base_url.join(file_name)?)
    }
}

#[async_trait]
impl ReferenceSource for HttpSource {
    async fn fetch(&self, file_name: &str) -> Result<Vec<u8>> {
        let url = self.file_url(file_name)?;
        tracing::debug!("Making request to: {}", url);

        let response = self.client.get(url).send().await?;
        tracing::debug!("Response status for {}: {}", file_name, response.status());

        if !response.status().is_success() {
            return Err(LookupError::FetchError {
                file: file_name.to_string(),
                reason: format!("HTTP {}", response.status()),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }

    fn describe(&self) -> String {
        self.base_url.to_string()
    }
}
