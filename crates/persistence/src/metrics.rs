//! Database metrics collection.

use metrics::histogram;
use std::future::Future;
use std::time::Instant;

/// Record database query duration.
pub fn record_query_duration(query_name: &'static str, duration_secs: f64) {
    histogram!("database_query_duration_seconds", "query" => query_name).record(duration_secs);
}

/// Times a database operation and records its duration, success or not.
///
/// ```ignore
/// let count = timed("count_products", sqlx::query_scalar(...).fetch_one(&pool)).await;
/// ```
pub async fn timed<F, T>(query_name: &'static str, operation: F) -> T
where
    F: Future<Output = T>,
{
    let start = Instant::now();
    let result = operation.await;
    record_query_duration(query_name, start.elapsed().as_secs_f64());
    result
}
