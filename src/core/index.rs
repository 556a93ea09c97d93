use crate::adapters::source_for_location;
use crate::core::aliases::AliasTables;
use crate::core::cache::{CacheStats, TtlCache};
use crate::core::extract::{extract_reference_entries, extract_special_yogas};
use crate::core::indexed::IndexedData;
use crate::core::resolver::{MatchStep, NameResolver};
use crate::core::sweeper::SweeperHandle;
use crate::domain::model::{Category, ReferenceEntry, SpecialYogaEntry};
use crate::domain::ports::{ConfigProvider, ReferenceSource};
use crate::utils::error::Result;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_TTL: Duration = Duration::from_secs(30 * 60);

/// 單一參考檔案索引後的內容
#[derive(Debug)]
pub enum Dataset {
    Reference(IndexedData<ReferenceEntry>),
    SpecialYogas(IndexedData<SpecialYogaEntry>),
}

impl Dataset {
    pub fn len(&self) -> usize {
        match self {
            Dataset::Reference(data) => data.len(),
            Dataset::SpecialYogas(data) => data.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn references(&self) -> Option<&IndexedData<ReferenceEntry>> {
        match self {
            Dataset::Reference(data) => Some(data),
            Dataset::SpecialYogas(_) => None,
        }
    }

    pub fn special_yogas(&self) -> Option<&IndexedData<SpecialYogaEntry>> {
        match self {
            Dataset::SpecialYogas(data) => Some(data),
            Dataset::Reference(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Entry {
    Reference(Arc<ReferenceEntry>),
    SpecialYoga(Arc<SpecialYogaEntry>),
}

impl Entry {
    pub fn name(&self) -> &str {
        match self {
            Entry::Reference(entry) => &entry.name,
            Entry::SpecialYoga(entry) => &entry.name,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PreloadReport {
    /// (類別, 項目數)
    pub loaded: Vec<(Category, usize)>,
    /// (類別, 錯誤訊息)
    pub failed: Vec<(Category, String)>,
}

impl PreloadReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// 參考資料索引：按需載入各類別檔案，依 TTL 快取，並以名稱解析器查詢
pub struct ReferenceIndex {
    source: Arc<dyn ReferenceSource>,
    file_names: HashMap<Category, String>,
    aliases: AliasTables,
    cache: TtlCache<Category, Dataset>,
}

impl ReferenceIndex {
    pub fn new(source: Arc<dyn ReferenceSource>, ttl: Duration) -> Self {
        Self {
            source,
            file_names: HashMap::new(),
            aliases: AliasTables::builtin(),
            cache: TtlCache::new(ttl),
        }
    }

    /// 依設定建立資料來源、檔名覆寫與額外別名
    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        let source = source_for_location(config.data_source(), config.request_timeout())?;
        let mut index = Self::new(source, config.cache_ttl());

        for (category, file_name) in config.file_name_overrides() {
            index = index.with_file_name(category, file_name);
        }
        for (category, external, canonical) in config.extra_aliases() {
            index = index.with_alias(category, &external, &canonical);
        }

        tracing::info!(
            "🗺️ Reference index ready (source: {}, ttl: {}s)",
            index.source.describe(),
            index.cache.ttl().as_secs()
        );
        Ok(index)
    }

    pub fn with_file_name(mut self, category: Category, file_name: impl Into<String>) -> Self {
        self.file_names.insert(category, file_name.into());
        self
    }

    pub fn with_alias(mut self, category: Category, external: &str, canonical: &str) -> Self {
        self.aliases.insert(category, external, canonical);
        self
    }

    pub fn file_name(&self, category: Category) -> &str {
        self.file_names
            .get(&category)
            .map(String::as_str)
            .unwrap_or_else(|| category.default_file_name())
    }

    pub fn aliases(&self) -> &AliasTables {
        &self.aliases
    }

    /// 取得類別資料；快取不存在或過期時重新讀取並建立索引
    pub async fn load(&self, category: Category) -> Result<Arc<Dataset>> {
        self.cache
            .get_or_try_load(category, || self.fetch_and_index(category))
            .await
    }

    async fn fetch_and_index(&self, category: Category) -> Result<Dataset> {
        let file_name = self.file_name(category).to_string();
        tracing::info!("📂 Loading {} reference data from {}", category, file_name);

        let bytes = self.source.fetch(&file_name).await?;
        let document: serde_json::Value = serde_json::from_slice(&bytes)?;

        let dataset = match category {
            Category::SpecialYoga => {
                Dataset::SpecialYogas(IndexedData::build(extract_special_yogas(&document)))
            }
            _ => Dataset::Reference(IndexedData::build(extract_reference_entries(
                category, &document,
            ))),
        };

        tracing::info!("✅ Indexed {} {} entries", dataset.len(), category);
        Ok(dataset)
    }

    /// 載入失敗記錄警告並視為找不到
    async fn dataset_or_warn(&self, category: Category) -> Option<Arc<Dataset>> {
        match self.load(category).await {
            Ok(dataset) => Some(dataset),
            Err(e) => {
                tracing::warn!("❌ {} reference data unavailable: {}", category, e);
                None
            }
        }
    }

    fn resolver(&self, category: Category) -> NameResolver<'_> {
        NameResolver::new(self.aliases.get(category), category.suffix_words())
    }

    pub async fn find(&self, category: Category, raw_name: &str) -> Option<Entry> {
        match category {
            Category::SpecialYoga => self.find_special_yoga(raw_name).await.map(Entry::SpecialYoga),
            _ => self.find_entry(category, raw_name).await.map(Entry::Reference),
        }
    }

    pub async fn find_entry(&self, category: Category, raw_name: &str) -> Option<Arc<ReferenceEntry>> {
        self.find_entry_with_step(category, raw_name)
            .await
            .map(|(entry, _)| entry)
    }

    /// 同 `find_entry`，另外回傳命中的比對階段
    pub async fn find_entry_with_step(
        &self,
        category: Category,
        raw_name: &str,
    ) -> Option<(Arc<ReferenceEntry>, MatchStep)> {
        let dataset = self.dataset_or_warn(category).await?;
        let data = dataset.references()?;
        let resolution = self.resolver(category).resolve(data, raw_name)?;
        Some((resolution.entry, resolution.step))
    }

    pub async fn find_special_yoga(&self, raw_name: &str) -> Option<Arc<SpecialYogaEntry>> {
        let dataset = self.dataset_or_warn(Category::SpecialYoga).await?;
        let data = dataset.special_yogas()?;
        self.resolver(Category::SpecialYoga)
            .resolve_entry(data, raw_name)
    }

    /// 依輸入順序解析，重複的結果只保留第一個
    pub async fn find_special_yogas<S: AsRef<str>>(&self, names: &[S]) -> Vec<Arc<SpecialYogaEntry>> {
        if names.is_empty() {
            return Vec::new();
        }
        let Some(dataset) = self.dataset_or_warn(Category::SpecialYoga).await else {
            return Vec::new();
        };
        let Some(data) = dataset.special_yogas() else {
            return Vec::new();
        };

        let resolver = self.resolver(Category::SpecialYoga);
        let mut seen = HashSet::new();
        let mut found = Vec::new();
        for name in names {
            let Some(entry) = resolver.resolve_entry(data, name.as_ref()) else {
                tracing::debug!("Special yoga '{}' not found", name.as_ref());
                continue;
            };
            if seen.insert(entry.name.to_lowercase()) {
                found.push(entry);
            }
        }
        found
    }

    /// 同時載入所有類別
    pub async fn preload_all(&self) -> PreloadReport {
        let (nakshatra, tithi, karana, vara, yoga, special_yoga) = tokio::join!(
            self.load(Category::Nakshatra),
            self.load(Category::Tithi),
            self.load(Category::Karana),
            self.load(Category::Vara),
            self.load(Category::Yoga),
            self.load(Category::SpecialYoga),
        );

        let mut report = PreloadReport::default();
        let results = [nakshatra, tithi, karana, vara, yoga, special_yoga];
        for (category, result) in Category::ALL.into_iter().zip(results) {
            match result {
                Ok(dataset) => report.loaded.push((category, dataset.len())),
                Err(e) => {
                    tracing::warn!("❌ Preload of {} failed: {}", category, e);
                    report.failed.push((category, e.to_string()));
                }
            }
        }

        tracing::info!(
            "Preloaded {}/{} reference files",
            report.loaded.len(),
            Category::ALL.len()
        );
        report
    }

    /// 清除過期快取，回傳清除數量
    pub fn sweep(&self) -> usize {
        let removed = self.cache.sweep();
        if removed > 0 {
            tracing::debug!("🧹 Swept {} expired reference files", removed);
        }
        removed
    }

    pub fn stats(&self) -> CacheStats<Category> {
        self.cache.stats()
    }

    /// 下次存取時強制重新載入
    pub async fn invalidate(&self, category: Category) {
        self.cache.invalidate(&category).await;
    }

    pub fn clear(&self) {
        self.cache.clear();
    }

    /// 啟動定期清理；handle 被丟棄或索引被釋放時任務結束
    pub fn spawn_sweeper(self: &Arc<Self>, interval: Duration) -> SweeperHandle {
        SweeperHandle::spawn(Arc::downgrade(self), interval)
    }
}
