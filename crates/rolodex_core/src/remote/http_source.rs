//! HTTP implementation of the remote source contract.
//!
//! # Responsibility
//! - Issue the single `GET {base}/users` call with bounded wait times.
//! - Map transport/status/body failures onto [`FetchError`].

use super::{FetchError, FetchResult, RemoteConfig, RemoteSource};
use crate::model::user::UserRecord;
use log::{error, info};
use std::time::{Duration, Instant};

/// ureq-backed remote source.
///
/// The agent is built once with connect/read/write timeouts so a stalled
/// server surfaces as [`FetchError::Network`] within the configured bound.
pub struct HttpRemoteSource {
    agent: ureq::Agent,
    endpoint: String,
}

impl HttpRemoteSource {
    pub fn new(config: RemoteConfig) -> Self {
        // Timeouts below 100ms are clamped up rather than failing
        // construction.
        let timeout = Duration::from_millis(config.timeout_ms.max(100));
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(timeout)
            .timeout_read(timeout)
            .timeout_write(timeout)
            .user_agent(concat!("rolodex/", env!("CARGO_PKG_VERSION")))
            .build();

        Self {
            agent,
            endpoint: config.users_endpoint(),
        }
    }
}

impl RemoteSource for HttpRemoteSource {
    fn fetch_all(&self) -> FetchResult<Vec<UserRecord>> {
        let started_at = Instant::now();
        info!("event=remote_fetch module=remote status=start endpoint={}", self.endpoint);

        let result = self
            .agent
            .get(&self.endpoint)
            .set("Accept", "application/json")
            .call()
            .map_err(fetch_error_from_ureq)
            .and_then(|response| {
                serde_json::from_reader::<_, Vec<UserRecord>>(response.into_reader())
                    .map_err(|err| FetchError::Decode(err.to_string()))
            });

        match &result {
            Ok(users) => info!(
                "event=remote_fetch module=remote status=ok count={} duration_ms={}",
                users.len(),
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=remote_fetch module=remote status=error duration_ms={} error={err}",
                started_at.elapsed().as_millis()
            ),
        }

        result
    }
}

fn fetch_error_from_ureq(err: ureq::Error) -> FetchError {
    match err {
        ureq::Error::Status(status, _) => FetchError::Http { status },
        ureq::Error::Transport(transport) => {
            FetchError::Network(format!("{:?}: {transport}", transport.kind()))
        }
    }
}
