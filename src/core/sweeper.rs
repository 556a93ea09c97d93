use crate::core::index::ReferenceIndex;
use std::sync::Weak;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// 背景清理任務的控制 handle；丟棄時中止任務
pub struct SweeperHandle {
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl SweeperHandle {
    pub(crate) fn spawn(index: Weak<ReferenceIndex>, interval: Duration) -> Self {
        let (shutdown, mut stop) = oneshot::channel();

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // 第一個 tick 立即完成
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = &mut stop => break,
                    _ = ticker.tick() => {
                        let Some(index) = index.upgrade() else {
                            tracing::debug!("Reference index dropped, sweeper exiting");
                            break;
                        };
                        index.sweep();
                    }
                }
            }
        });

        tracing::debug!("🧹 Cache sweeper started (every {}s)", interval.as_secs());
        Self {
            shutdown: Some(shutdown),
            task: Some(task),
        }
    }

    /// 通知任務停止並等待其結束
    pub async fn shutdown(mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                tracing::warn!("⚠️ Cache sweeper ended abnormally: {}", e);
            }
        }
    }

    pub fn is_finished(&self) -> bool {
        self.task.as_ref().map_or(true, JoinHandle::is_finished)
    }
}

impl Drop for SweeperHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::core::index::tests::sample_source;
    use crate::core::index::{ReferenceIndex, DEFAULT_TTL};
    use crate::domain::model::Category;
    use std::sync::Arc;
    use std::time::Duration;

    const INTERVAL: Duration = Duration::from_secs(60);

    fn index() -> Arc<ReferenceIndex> {
        Arc::new(ReferenceIndex::new(Arc::new(sample_source()), DEFAULT_TTL))
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_clears_expired_entries() {
        let index = index();
        index.load(Category::Vara).await.unwrap();
        let handle = index.spawn_sweeper(INTERVAL);

        tokio::time::sleep(DEFAULT_TTL + INTERVAL * 2).await;

        assert_eq!(index.stats().size, 0);
        handle.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_keeps_live_entries() {
        let index = index();
        index.load(Category::Vara).await.unwrap();
        let handle = index.spawn_sweeper(INTERVAL);

        tokio::time::sleep(INTERVAL * 3).await;

        assert_eq!(index.stats().entries, vec![Category::Vara]);
        handle.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_stops_task() {
        let index = index();
        let handle = index.spawn_sweeper(INTERVAL);
        assert!(!handle.is_finished());
        handle.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_exits_when_index_dropped() {
        let index = index();
        let handle = index.spawn_sweeper(INTERVAL);
        drop(index);

        tokio::time::sleep(INTERVAL * 2).await;
        assert!(handle.is_finished());
    }
}
