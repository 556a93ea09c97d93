pub mod http;
pub mod local;

pub use http::HttpSource;
pub use local::LocalSource;

use crate::domain::ports::ReferenceSource;
use crate::utils::error::Result;
use crate::utils::validation::is_remote_location;
use std::sync::Arc;
use std::time::Duration;

/// http(s) 位置使用 HTTP 來源，其他視為本機目錄
pub fn source_for_location(location: &str, timeout: Duration) -> Result<Arc<dyn ReferenceSource>> {
    if is_remote_location(location) {
        Ok(Arc::new(HttpSource::new(location, timeout)?))
    } else {
        Ok(Arc::new(LocalSource::new(location)))
    }
}
