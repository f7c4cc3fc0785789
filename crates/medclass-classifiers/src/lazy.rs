//! Lazily-initialized classifier handles
//!
//! A [`LazyHandle`] defers an arbitrarily expensive construction (loading
//! model weights, opening resources) until the instance is first needed, and
//! can be cleared on demand to force reconstruction on the next access.
//!
//! Initialization is guarded: the handle holds its lock across the factory
//! call, so the factory runs at most once per loaded instance even when the
//! first accesses race.

use futures::future::BoxFuture;
use medclass_core::Result;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Mutex;

type Factory<T> = Box<dyn Fn() -> BoxFuture<'static, Result<Arc<T>>> + Send + Sync>;

/// Deferred-construction container for one instance of `T`.
///
/// The handle is either unloaded or holds a shared instance produced by the
/// factory captured at creation. Factory failures propagate to the caller and
/// leave the handle unloaded; failures are never cached.
pub struct LazyHandle<T: ?Sized> {
    cell: Mutex<Option<Arc<T>>>,
    factory: Factory<T>,
}

impl<T: ?Sized + Send + Sync + 'static> LazyHandle<T> {
    /// Create an unloaded handle around the given factory.
    pub fn new<F, Fut>(factory: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Arc<T>>> + Send + 'static,
    {
        Self {
            cell: Mutex::new(None),
            factory: Box::new(move || Box::pin(factory())),
        }
    }

    /// Return the instance, constructing it on first call.
    pub async fn get(&self) -> Result<Arc<T>> {
        let mut cell = self.cell.lock().await;
        if let Some(instance) = cell.as_ref() {
            return Ok(Arc::clone(instance));
        }
        let instance = (self.factory)().await?;
        *cell = Some(Arc::clone(&instance));
        Ok(instance)
    }

    /// Construct the instance if not yet loaded, discarding the value.
    pub async fn force_load(&self) -> Result<()> {
        self.get().await.map(|_| ())
    }

    /// Return the instance only if already loaded; never constructs.
    pub async fn loaded(&self) -> Option<Arc<T>> {
        self.cell.lock().await.as_ref().map(Arc::clone)
    }

    /// Discard the cached instance, returning the handle to unloaded.
    pub async fn reset(&self) {
        *self.cell.lock().await = None;
    }

    /// Whether an instance is currently cached. No side effects.
    pub async fn is_loaded(&self) -> bool {
        self.cell.lock().await.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use medclass_core::Error;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn counting_handle(calls: Arc<AtomicUsize>) -> LazyHandle<u64> {
        LazyHandle::new(move || {
            let calls = Arc::clone(&calls);
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(Arc::new(7u64))
            }
        })
    }

    #[tokio::test]
    async fn test_deferred_and_cached() {
        let calls = Arc::new(AtomicUsize::new(0));
        let handle = counting_handle(Arc::clone(&calls));

        assert!(!handle.is_loaded().await);
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        assert_eq!(*handle.get().await.unwrap(), 7);
        assert!(handle.is_loaded().await);
        assert_eq!(*handle.get().await.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_reset_reinvokes_factory() {
        let calls = Arc::new(AtomicUsize::new(0));
        let handle = counting_handle(Arc::clone(&calls));

        handle.force_load().await.unwrap();
        handle.reset().await;
        assert!(!handle.is_loaded().await);

        handle.get().await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_failure_not_cached() {
        let calls = Arc::new(AtomicUsize::new(0));
        let handle: LazyHandle<u64> = LazyHandle::new({
            let calls = Arc::clone(&calls);
            move || {
                let calls = Arc::clone(&calls);
                async move {
                    if calls.fetch_add(1, Ordering::SeqCst) == 0 {
                        Err(Error::classifier("weights unavailable"))
                    } else {
                        Ok(Arc::new(7u64))
                    }
                }
            }
        });

        assert!(handle.get().await.is_err());
        assert!(!handle.is_loaded().await);

        // the next access retries the factory
        assert_eq!(*handle.get().await.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_concurrent_first_access_loads_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let handle = Arc::new(LazyHandle::new({
            let calls = Arc::clone(&calls);
            move || {
                let calls = Arc::clone(&calls);
                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_millis(20)).await;
                    Ok(Arc::new(7u64))
                }
            }
        }));

        let a = tokio::spawn({
            let handle = Arc::clone(&handle);
            async move { handle.get().await.unwrap() }
        });
        let b = tokio::spawn({
            let handle = Arc::clone(&handle);
            async move { handle.get().await.unwrap() }
        });

        assert_eq!(*a.await.unwrap(), 7);
        assert_eq!(*b.await.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
