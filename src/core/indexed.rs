use crate::core::normalize::{normalize_name, significant_tokens};
use crate::domain::model::{ReferenceEntry, SpecialYogaEntry};
use std::collections::HashMap;
use std::sync::Arc;

/// 可被名稱比對的參考資料
pub trait Searchable {
    /// 第一個是正式名稱，其餘為別名拼寫
    fn search_names(&self) -> Vec<&str>;

    fn canonical_name(&self) -> &str;
}

impl Searchable for ReferenceEntry {
    fn search_names(&self) -> Vec<&str> {
        let mut names = vec![self.name.as_str()];
        if let Some(iast) = self.name_iast.as_deref() {
            names.push(iast);
        }
        names
    }

    fn canonical_name(&self) -> &str {
        &self.name
    }
}

impl Searchable for SpecialYogaEntry {
    fn search_names(&self) -> Vec<&str> {
        let mut names = vec![self.name.as_str()];
        names.extend(self.name_sanskrit.as_deref());
        names.extend(self.name_spanish.as_deref());
        names
    }

    fn canonical_name(&self) -> &str {
        &self.name
    }
}

/// 每個項目預先計算好的比對鍵
#[derive(Debug, Clone, Default)]
pub struct NameKeys {
    pub normalized: Vec<String>,
    pub tokens: Vec<String>,
}

/// 已索引的單一檔案資料，項目順序與來源陣列相同
#[derive(Debug)]
pub struct IndexedData<T> {
    entries: Vec<Arc<T>>,
    keys: Vec<NameKeys>,
    exact: HashMap<String, usize>,
    normalized: HashMap<String, usize>,
}

impl<T: Searchable> IndexedData<T> {
    /// 正式名稱重複的項目只保留第一個
    pub fn build(items: Vec<T>) -> Self {
        let mut data = Self {
            entries: Vec::with_capacity(items.len()),
            keys: Vec::with_capacity(items.len()),
            exact: HashMap::new(),
            normalized: HashMap::new(),
        };
        let mut canonical_seen = std::collections::HashSet::new();

        for item in items {
            let canonical = item.canonical_name().to_lowercase();
            if !canonical_seen.insert(canonical) {
                tracing::warn!(
                    "⚠️ Duplicate reference entry '{}' ignored",
                    item.canonical_name()
                );
                continue;
            }

            let position = data.entries.len();
            let mut keys = NameKeys::default();

            for name in item.search_names() {
                if name.trim().is_empty() {
                    continue;
                }
                data.exact.entry(name.to_lowercase()).or_insert(position);

                let normalized = normalize_name(name);
                if normalized.is_empty() {
                    continue;
                }
                data.normalized.entry(normalized.clone()).or_insert(position);
                keys.tokens.extend(significant_tokens(&normalized));
                keys.normalized.push(normalized);
            }

            data.keys.push(keys);
            data.entries.push(Arc::new(item));
        }

        data
    }
}

impl<T> IndexedData<T> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[Arc<T>] {
        &self.entries
    }

    pub fn get(&self, position: usize) -> Option<&Arc<T>> {
        self.entries.get(position)
    }

    /// 不分大小寫的完全比對
    pub fn exact_position(&self, lowercase_name: &str) -> Option<usize> {
        self.exact.get(lowercase_name).copied()
    }

    pub fn normalized_position(&self, normalized_name: &str) -> Option<usize> {
        self.normalized.get(normalized_name).copied()
    }

    /// 依來源順序走訪 (位置, 比對鍵)
    pub fn keyed(&self) -> impl Iterator<Item = (usize, &NameKeys)> {
        self.keys.iter().enumerate()
    }
}

impl<T> Default for IndexedData<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            keys: Vec::new(),
            exact: HashMap::new(),
            normalized: HashMap::new(),
        }
    }
}
