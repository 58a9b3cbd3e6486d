//! Correlation id attached to every HTTP request.
//!
//! The [`crate::middleware::Trace`] middleware picks a fresh id per request
//! and runs the handler inside [`TraceId::scope`]. Anything on that task can
//! read it back with [`TraceId::current`]; [`crate::domain::Error`] does so
//! when it is constructed, which is how error bodies carry `traceId`.
//!
//! Task-locals do not follow work onto other tasks or the blocking pool.
//! Password hashing runs through [`TraceId::in_blocking`] so its logs stay
//! correlated.

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use tokio::task::JoinError;
use tokio::task_local;
use uuid::Uuid;

/// Response header that echoes the request's correlation id.
pub const TRACE_ID_HEADER: &str = "trace-id";

task_local! {
    static CURRENT: TraceId;
}

/// UUID identifying one request in logs, error bodies and the
/// [`TRACE_ID_HEADER`] response header.
///
/// # Examples
/// ```
/// use feedforward::TraceId;
///
/// fn log_donation(title: &str) {
///     match TraceId::current() {
///         Some(id) => tracing::info!(trace_id = %id, title, "donation stored"),
///         None => tracing::info!(title, "donation stored outside a request"),
///     }
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TraceId(Uuid);

impl TraceId {
    pub(crate) fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Id of the request being served on this task, if any.
    pub fn current() -> Option<Self> {
        CURRENT.try_with(|id| *id).ok()
    }

    /// Drive `fut` with `trace_id` as the current id.
    ///
    /// ```
    /// use feedforward::TraceId;
    ///
    /// # tokio::runtime::Runtime::new().unwrap().block_on(async {
    /// let id: TraceId = "0b5d3a4e-8a8f-4c43-9c55-6f1c2d9e7a10".parse().unwrap();
    /// assert_eq!(TraceId::scope(id, async { TraceId::current() }).await, Some(id));
    /// # });
    /// ```
    pub async fn scope<F: Future>(trace_id: Self, fut: F) -> F::Output {
        CURRENT.scope(trace_id, fut).await
    }

    /// Run `work` on the blocking pool with the caller's id still current.
    pub(crate) async fn in_blocking<W, R>(work: W) -> Result<R, JoinError>
    where
        W: FnOnce() -> R + Send + 'static,
        R: Send + 'static,
    {
        let inherited = Self::current();
        tokio::task::spawn_blocking(move || match inherited {
            Some(id) => CURRENT.sync_scope(id, work),
            None => work(),
        })
        .await
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.hyphenated().fmt(f)
    }
}

impl FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(raw).map(Self)
    }
}
