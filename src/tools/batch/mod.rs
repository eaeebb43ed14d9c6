//! Batch Tools


use futures_util::stream::{self, StreamExt};

/// Run async operations with at most `concurrency` in flight.
///
/// Results come back in input order, so callers can zip them with their
/// inputs without tagging each job.
pub async fn batch<T, F, Fut, R>(items: Vec<T>, concurrency: usize, operation: F) -> Vec<R>
where
    T: Send + 'static,
    F: Fn(T) -> Fut + Send + Sync + 'static,
    Fut: std::future::Future<Output = R> + Send + 'static,
    R: Send + 'static,
{
    stream::iter(items)
        .map(operation)
        .buffered(concurrency.max(1))
        .collect()
        .await
}
