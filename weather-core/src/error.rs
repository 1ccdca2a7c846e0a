use thiserror::Error;

/// Rejected forecast query: neither a city nor a full coordinate pair.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("City or coordinates are required")]
    MissingLocation,
}

/// Failure talking to the upstream forecast provider.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The provider answered with a non-2xx status.
    #[error("upstream responded with status {status}: {body}")]
    Status { status: u16, body: String },

    /// The request never produced a response (DNS, connect, TLS, body read).
    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl UpstreamError {
    /// Status code to relay to the caller; transport failures have none.
    pub fn status(&self) -> Option<u16> {
        match self {
            UpstreamError::Status { status, .. } => Some(*status),
            UpstreamError::Transport(err) => err.status().map(|s| s.as_u16()),
        }
    }
}

/// The user's location could not be determined.
#[derive(Debug, Error)]
pub enum GeolocationError {
    #[error("Location permission denied")]
    PermissionDenied,
    #[error("Location service unavailable: {0}")]
    Unavailable(String),
    #[error("Location request failed: {0}")]
    Network(#[from] reqwest::Error),
}

/// Failure of a dashboard call to the forecast proxy.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Could not reach the forecast proxy: {0}")]
    Network(#[from] reqwest::Error),

    /// The proxy answered with its `{error}` envelope.
    #[error("Forecast proxy returned {status}: {message}")]
    Proxy { status: u16, message: String },

    #[error("Could not parse forecast data: {0}")]
    Parse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_exposes_upstream_code() {
        let err = UpstreamError::Status {
            status: 404,
            body: "city not found".into(),
        };
        assert_eq!(err.status(), Some(404));
        assert!(err.to_string().contains("404"));
    }

    #[test]
    fn missing_location_message_matches_envelope() {
        assert_eq!(
            QueryError::MissingLocation.to_string(),
            "City or coordinates are required"
        );
    }
}
