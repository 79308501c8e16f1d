use thiserror::Error;

/// Why a weather fetch did not produce a [`crate::WeatherResult`].
///
/// Every variant is terminal: nothing retries, and the caller only logs it.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request could not complete (connect, TLS, reading the body).
    #[error("weather request could not complete: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered with a non-success status code.
    #[error("weather request failed with status {status}: {body}")]
    Http { status: u16, body: String },

    /// Success status, but no payload to read.
    #[error("weather response had a success status but an empty body")]
    EmptyBody,

    /// Success status, but the payload is not the JSON shape we expect.
    #[error("weather response body could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FetchError {
    /// Short tag used in structured log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Transport(_) => "transport",
            FetchError::Http { .. } => "http",
            FetchError::EmptyBody => "empty_body",
            FetchError::Decode(_) => "decode",
        }
    }

    /// HTTP status code, when the failure carries one.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_exposes_status_and_kind() {
        let err = FetchError::Http { status: 404, body: "city not found".into() };

        assert_eq!(err.kind(), "http");
        assert_eq!(err.status(), Some(404));
        assert!(err.to_string().contains("404"));
        assert!(err.to_string().contains("city not found"));
    }

    #[test]
    fn empty_body_has_no_status() {
        let err = FetchError::EmptyBody;

        assert_eq!(err.kind(), "empty_body");
        assert_eq!(err.status(), None);
    }

    #[test]
    fn decode_error_converts_from_serde() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err = FetchError::from(serde_err);

        assert_eq!(err.kind(), "decode");
    }
}
