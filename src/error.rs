//! Failures of a single assessment call.
//!
//! None of these are fatal: the session records the [`ErrorKind`] in the
//! result store and keeps the previous result on screen.

use std::fmt;
use std::time::Duration;

/// Why an assessment call did not produce a result.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AssessError {
    /// The request never got a response (connection refused, DNS, reset...).
    #[error("transport error: {0}")]
    Transport(String),

    /// The service answered with a non-success status.
    #[error("service returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body is not the expected JSON document.
    #[error("malformed response: {0}")]
    Malformed(String),

    /// No response within the configured bound.
    #[error("timed out after {0:?}")]
    Timeout(Duration),
}

impl AssessError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Transport(_) => ErrorKind::Transport,
            Self::Status { .. } => ErrorKind::Status,
            Self::Malformed(_) => ErrorKind::Malformed,
            Self::Timeout(_) => ErrorKind::Timeout,
        }
    }
}

/// Copyable summary of an [`AssessError`], kept for the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transport,
    Status,
    Malformed,
    Timeout,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Transport => "servicio no disponible",
            Self::Status => "el servicio respondió con error",
            Self::Malformed => "respuesta inválida del servicio",
            Self::Timeout => "tiempo de espera agotado",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_maps_every_variant() {
        assert_eq!(
            AssessError::Transport("refused".into()).kind(),
            ErrorKind::Transport
        );
        assert_eq!(
            AssessError::Status {
                status: 500,
                body: String::new()
            }
            .kind(),
            ErrorKind::Status
        );
        assert_eq!(
            AssessError::Malformed("missing field".into()).kind(),
            ErrorKind::Malformed
        );
        assert_eq!(
            AssessError::Timeout(Duration::from_secs(1)).kind(),
            ErrorKind::Timeout
        );
    }

    #[test]
    fn status_message_includes_code_and_body() {
        let err = AssessError::Status {
            status: 422,
            body: "Datos inválidos".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("422"));
        assert!(msg.contains("Datos inválidos"));
    }

    #[test]
    fn kind_display_is_human_readable() {
        assert_eq!(ErrorKind::Timeout.to_string(), "tiempo de espera agotado");
    }
}
