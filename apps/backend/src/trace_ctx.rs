//! Task-local trace context for web requests.
//!
//! `RequestTrace` scopes every request future with its trace id so that error
//! rendering and security logging can read it without threading it through
//! every call.

use tokio::task_local;

task_local! {
    static TRACE_ID: String;
}

/// Trace id of the current request, or "unknown" outside a request scope.
pub fn trace_id() -> String {
    TRACE_ID
        .try_with(Clone::clone)
        .unwrap_or_else(|_| "unknown".to_string())
}

/// Run a future with `trace_id` visible to [`trace_id`].
pub async fn with_trace_id<F, R>(trace_id: String, future: F) -> R
where
    F: std::future::Future<Output = R>,
{
    TRACE_ID.scope(trace_id, future).await
}

/// Run a synchronous closure with `trace_id` visible to [`trace_id`].
///
/// Middleware builds downstream futures synchronously in `call`; this covers that part.
pub fn sync_scope<F, R>(trace_id: String, f: F) -> R
where
    F: FnOnce() -> R,
{
    TRACE_ID.sync_scope(trace_id, f)
}
