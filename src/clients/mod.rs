pub mod nhl;
pub mod weather;

use reqwest::StatusCode;
use thiserror::Error;

/// Failure talking to a third-party API. A `Status` error carries the
/// upstream response code so route handlers can pass it through; `Transport`
/// covers everything that never produced a response (DNS, timeout, TLS).
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("{service} returned status {status}")]
    Status {
        service: &'static str,
        status: StatusCode,
    },

    #[error("{service} request failed: {source}")]
    Transport {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{service} returned an unreadable body: {source}")]
    Decode {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },
}

impl UpstreamError {
    /// Upstream status to pass through to the caller, when one exists.
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport { .. } | Self::Decode { .. } => None,
        }
    }

    #[must_use]
    pub const fn service(&self) -> &'static str {
        match self {
            Self::Status { service, .. }
            | Self::Transport { service, .. }
            | Self::Decode { service, .. } => service,
        }
    }
}
