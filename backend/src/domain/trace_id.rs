//! Request correlation identifier.
//!
//! The [`Trace`](crate::Trace) middleware opens a [`TraceId::scope`] around
//! every request, so an [`Error`](crate::domain::Error) built anywhere below
//! the handler picks the id up on its own. Tokio task locals do not follow
//! `spawn` or `spawn_blocking`; re-enter the scope inside such work when the
//! id matters there.

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use uuid::Uuid;

tokio::task_local! {
    static CURRENT: TraceId;
}

/// UUID v4 identifying one request in logs, headers and error payloads.
///
/// # Examples
/// ```
/// use usuarios::TraceId;
///
/// let id: TraceId = "9b2f1c54-2f9e-4d8a-8c55-0f1a3b7d6e21".parse().unwrap();
/// assert_eq!(id.to_string(), "9b2f1c54-2f9e-4d8a-8c55-0f1a3b7d6e21");
/// assert!(TraceId::current().is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TraceId(Uuid);

impl TraceId {
    pub(crate) fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Identifier of the request being served, if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        CURRENT.try_with(|id| *id).ok()
    }

    /// Drive `fut` with `self` as the current identifier.
    pub async fn scope<F: Future>(self, fut: F) -> F::Output {
        CURRENT.scope(self, fut).await
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.hyphenated().fmt(f)
    }
}

impl FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}
