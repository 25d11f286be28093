//! Remote source adapter for the read-only users endpoint.
//!
//! # Responsibility
//! - Define the fetch contract the reconciliation engine initializes from.
//! - Classify transport, status and decode failures into a stable taxonomy
//!   the presentation layer can show with a retry affordance.
//!
//! # Invariants
//! - The remote source is read-only; no adapter ever writes back to it.
//! - One fetch per `initialize`; no retry, no caching, a fixed upper bound
//!   on wait time before a `Network` error surfaces.

use crate::model::user::UserRecord;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod http_source;

pub use http_source::HttpRemoteSource;

/// Demo API the directory ships against.
pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

/// Upper bound on connect/read/write wait before a fetch fails as
/// [`FetchError::Network`].
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

pub type FetchResult<T> = Result<T, FetchError>;

/// Remote fetch failure taxonomy.
///
/// Cloneable on purpose: the engine records the last error in its state and
/// hands a copy back to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// No usable response arrived (DNS, connect, TLS or timeout trouble).
    Network(String),
    /// The server answered with a non-success status code.
    Http { status: u16 },
    /// The body did not decode as the expected user-record list.
    Decode(String),
}

impl Display for FetchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Network(detail) => write!(f, "network failure reaching user source: {detail}"),
            Self::Http { status } => write!(f, "user source answered HTTP {status}"),
            Self::Decode(detail) => write!(f, "user source payload did not decode: {detail}"),
        }
    }
}

impl Error for FetchError {}

/// Connection settings for [`HttpRemoteSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteConfig {
    pub base_url: String,
    pub timeout_ms: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl RemoteConfig {
    /// Full URL of the users collection.
    pub fn users_endpoint(&self) -> String {
        format!("{}/users", self.base_url.trim_end_matches('/'))
    }
}

/// Read-only source of the baseline user set.
pub trait RemoteSource {
    /// Fetches every remote record in source order.
    fn fetch_all(&self) -> FetchResult<Vec<UserRecord>>;
}
