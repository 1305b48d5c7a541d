use std::path::PathBuf;

/// Transport-level failures of a collection store.
///
/// Failures the host reports as structured error entries are not errors at
/// this level; they come back as [`Outcome::Failure`](crate::Outcome).
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Invalid base URL: {message}")]
    InvalidUrl { message: String },

    #[error("Invalid name: {message}")]
    InvalidName { message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Store root {path:?} is invalid: {error}")]
    RootPathInvalid {
        path: PathBuf,
        error: std::io::Error,
    },

    #[error("I/O error on {path:?}: {error}")]
    Io {
        path: PathBuf,
        error: std::io::Error,
    },

    #[error("Unexpected response (status {status}): {body}")]
    UnexpectedResponse { status: u16, body: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_display_names_path() {
        let e = Error::Io {
            path: PathBuf::from("/tmp/col/key.json"),
            error: std::io::Error::other("denied"),
        };
        let display = e.to_string();
        assert!(display.contains("key.json"));
        assert!(display.contains("denied"));
    }

    #[test]
    fn json_error_conversion() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let e: Error = err.into();
        assert!(matches!(e, Error::Json(_)));
        assert!(e.to_string().starts_with("JSON error"));
    }
}
