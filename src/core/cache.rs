use crate::utils::error::Result;
use serde::Serialize;
use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::Instant;

/// 已載入的資料與其有效期限
#[derive(Debug)]
pub struct CacheEntry<T> {
    pub value: Arc<T>,
    pub created_at: Instant,
    pub expires_at: Instant,
}

/// 快取項目的最長有效期
pub const MAX_TTL: Duration = Duration::from_secs(365 * 24 * 60 * 60);

impl<T> CacheEntry<T> {
    /// `ttl` 超過 `MAX_TTL` 時以 `MAX_TTL` 計
    pub fn new(value: T, ttl: Duration) -> Self {
        let created_at = Instant::now();
        let expires_at = created_at
            .checked_add(ttl.min(MAX_TTL))
            .unwrap_or(created_at);
        Self {
            value: Arc::new(value),
            created_at,
            expires_at,
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheStats<K> {
    pub size: usize,
    pub entries: Vec<K>,
}

type Slot<T> = Arc<tokio::sync::Mutex<Option<CacheEntry<T>>>>;

/// 每個鍵一個非同步鎖：第一個呼叫者持鎖載入，其他人等待後直接讀取結果
pub struct TtlCache<K, T> {
    ttl: Duration,
    slots: Mutex<HashMap<K, Slot<T>>>,
}

impl<K, T> TtlCache<K, T>
where
    K: Eq + Hash + Ord + Clone + std::fmt::Debug,
{
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl: ttl.min(MAX_TTL),
            slots: Mutex::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn slots(&self) -> MutexGuard<'_, HashMap<K, Slot<T>>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn slot(&self, key: &K) -> Slot<T> {
        self.slots().entry(key.clone()).or_default().clone()
    }

    /// 未快取或已過期時執行 `loader`；載入失敗不會被快取
    pub async fn get_or_try_load<F, Fut>(&self, key: K, loader: F) -> Result<Arc<T>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let slot = self.slot(&key);
        let mut guard = slot.lock().await;

        if let Some(entry) = guard.as_ref() {
            if !entry.is_expired(Instant::now()) {
                tracing::debug!("Cache hit for {:?}", key);
                return Ok(entry.value.clone());
            }
            tracing::debug!("Cache entry for {:?} expired, reloading", key);
        }

        *guard = None;
        let value = loader().await?;
        let entry = CacheEntry::new(value, self.ttl);
        let loaded = entry.value.clone();
        *guard = Some(entry);
        Ok(loaded)
    }

    /// 只讀取仍有效的項目，不觸發載入；正在載入中的鍵視為不存在
    pub fn peek(&self, key: &K) -> Option<Arc<T>> {
        let slot = self.slots().get(key)?.clone();
        let guard = slot.try_lock().ok()?;
        guard
            .as_ref()
            .filter(|entry| !entry.is_expired(Instant::now()))
            .map(|entry| entry.value.clone())
    }

    /// 清除已過期的項目，回傳清除數量
    pub fn sweep(&self) -> usize {
        let now = Instant::now();
        let mut slots = self.slots();
        let mut removed = 0;

        slots.retain(|_, slot| {
            // 載入中的鍵不處理
            let Ok(mut guard) = slot.try_lock() else {
                return true;
            };
            if guard.as_ref().is_some_and(|entry| entry.is_expired(now)) {
                *guard = None;
                removed += 1;
            }
            guard.is_some() || Arc::strong_count(slot) > 1
        });

        removed
    }

    pub async fn invalidate(&self, key: &K) {
        let slot = self.slots().get(key).cloned();
        if let Some(slot) = slot {
            *slot.lock().await = None;
        }
    }

    pub fn clear(&self) {
        self.slots().clear();
    }

    /// 目前仍有效的鍵（排序後）
    pub fn stats(&self) -> CacheStats<K> {
        let now = Instant::now();
        let mut entries: Vec<K> = self
            .slots()
            .iter()
            .filter(|(_, slot)| {
                slot.try_lock()
                    .map(|guard| guard.as_ref().is_some_and(|entry| !entry.is_expired(now)))
                    .unwrap_or(false)
            })
            .map(|(key, _)| key.clone())
            .collect();
        entries.sort();

        CacheStats {
            size: entries.len(),
            entries,
        }
    }
}
