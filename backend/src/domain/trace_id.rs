//! Correlation identifier for one request.
//!
//! Held in a Tokio task-local so that [`Error`](crate::domain::Error) can
//! stamp it without every call passing it down. Spawned tasks start without
//! one; run them inside [`TraceId::scope`] when they should share it.

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use tokio::task_local;
use uuid::Uuid;

/// Header used to receive and echo the identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";

task_local! {
    static ACTIVE: TraceId;
}

/// UUID naming one request across logs, errors, and the `trace-id` header.
///
/// # Examples
/// ```
/// use media_ranker::TraceId;
///
/// # tokio::runtime::Runtime::new().expect("runtime").block_on(async {
/// let upstream = TraceId::adopt_or_generate(Some("0b5f6a52-3b39-4c5e-9a8c-46f4e3f0e0a1"));
/// let seen = TraceId::scope(upstream, async { TraceId::current() }).await;
/// assert_eq!(seen, Some(upstream));
/// # });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TraceId(Uuid);

impl TraceId {
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Reuse an identifier forwarded by an upstream proxy when it is a valid
    /// UUID, otherwise mint a new one.
    #[must_use]
    pub fn adopt_or_generate(forwarded: Option<&str>) -> Self {
        forwarded
            .and_then(|raw| raw.trim().parse().ok())
            .unwrap_or_else(Self::generate)
    }

    /// Identifier of the enclosing [`TraceId::scope`], if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        ACTIVE.try_with(|id| *id).ok()
    }

    pub async fn scope<F: Future>(trace_id: Self, fut: F) -> F::Output {
        ACTIVE.scope(trace_id, fut).await
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(raw).map(Self)
    }
}
