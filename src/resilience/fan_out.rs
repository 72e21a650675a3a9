use std::future::Future;
use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::Semaphore;

/// Run `operation` for every item with at most `max_concurrency` in flight.
///
/// The output is index-aligned with `items`, whatever the completion order.
/// `operation` owns its error handling: every item produces a value.
pub async fn bounded_fan_out<T, R, F, Fut>(items: Vec<T>, max_concurrency: usize, operation: F) -> Vec<R>
where
    F: Fn(T) -> Fut,
    Fut: Future<Output = R>,
{
    let semaphore = Arc::new(Semaphore::new(max_concurrency.max(1)));

    let futures = items.into_iter().map(|item| {
        let semaphore = semaphore.clone();
        let future = operation(item);
        async move {
            // the semaphore is never closed
            let _permit = semaphore.acquire().await.ok();
            future.await
        }
    });

    join_all(futures).await
}
