use crate::utils::error::Result;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::RwLock;

/// 延遲初始化的共用資源 (例如 HTTP client 或資料庫連線)。
///
/// 由呼叫端建立並注入，不使用全域變數；第一次使用時初始化，
/// `teardown` 後下一次使用會重新建立。
pub struct LazyHandle<T> {
    slot: RwLock<Option<Arc<T>>>,
}

impl<T> LazyHandle<T> {
    pub fn new() -> Self {
        Self {
            slot: RwLock::new(None),
        }
    }

    pub async fn get_or_try_init<F, Fut>(&self, init: F) -> Result<Arc<T>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        if let Some(handle) = self.slot.read().await.as_ref() {
            return Ok(Arc::clone(handle));
        }

        let mut slot = self.slot.write().await;
        // 取得寫鎖前可能已有其他任務完成初始化
        if let Some(handle) = slot.as_ref() {
            return Ok(Arc::clone(handle));
        }

        tracing::debug!("Initializing lazy handle");
        let handle = Arc::new(init().await?);
        *slot = Some(Arc::clone(&handle));
        Ok(handle)
    }

    pub async fn is_initialized(&self) -> bool {
        self.slot.read().await.is_some()
    }

    /// 釋放資源，回傳先前是否已初始化
    pub async fn teardown(&self) -> bool {
        let released = self.slot.write().await.take().is_some();
        if released {
            tracing::debug!("Lazy handle released");
        }
        released
    }
}

impl<T> Default for LazyHandle<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::GeoError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_initializes_once() {
        let handle: LazyHandle<String> = LazyHandle::new();
        let calls = AtomicUsize::new(0);

        for _ in 0..3 {
            let value = handle
                .get_or_try_init(|| async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, GeoError>("conn".to_string())
                })
                .await
                .unwrap();
            assert_eq!(value.as_str(), "conn");
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(handle.is_initialized().await);
    }

    #[tokio::test]
    async fn test_teardown_allows_reinit() {
        let handle: LazyHandle<u32> = LazyHandle::new();
        assert!(!handle.teardown().await);

        handle.get_or_try_init(|| async { Ok::<_, GeoError>(1) }).await.unwrap();
        assert!(handle.teardown().await);
        assert!(!handle.is_initialized().await);

        let value = handle.get_or_try_init(|| async { Ok::<_, GeoError>(2) }).await.unwrap();
        assert_eq!(*value, 2);
    }

    #[tokio::test]
    async fn test_failed_init_leaves_handle_empty() {
        let handle: LazyHandle<u32> = LazyHandle::new();
        let result = handle
            .get_or_try_init(|| async {
                Err::<u32, _>(GeoError::ConfigError {
                    message: "no endpoint".to_string(),
                })
            })
            .await;

        assert!(result.is_err());
        assert!(!handle.is_initialized().await);
    }
}
