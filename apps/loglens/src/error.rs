//! Error types for submission and configuration.
//!
//! `SubmissionError` is the single boundary type: every failure between the
//! user's input and a renderable result is converted into one of its
//! variants. Display strings are the user-facing messages.

use thiserror::Error;

/// The response body decoded, but not into the expected result shape.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("malformed analysis result: {0}")]
pub struct MalformedResult(pub String);

/// Failures of one submission cycle.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    /// Input rejected locally; nothing was sent.
    #[error("{0}")]
    Validation(String),

    /// A request is already in flight.
    #[error("Ya hay un análisis en curso; espera a que termine.")]
    Busy,

    /// The selected file or stdin could not be read.
    #[error("No se pudo leer {path}: {message}")]
    Io { path: String, message: String },

    /// Unreachable host, DNS failure, timeout. The detail is logged only.
    #[error("No se pudo conectar con el servidor de análisis. ¿Está corriendo en la otra terminal?")]
    Transport(String),

    /// Non-2xx HTTP status.
    #[error("Error del servidor: {status} {reason}")]
    Response { status: u16, reason: String },

    /// Body missing, not JSON, or not the expected top-level shape.
    #[error("Error: No se recibieron resultados para mostrar.")]
    Malformed(#[from] MalformedResult),

    /// The submitter was reset before the response arrived.
    #[error("La respuesta llegó después de reiniciar y se descartó.")]
    Discarded,
}

impl SubmissionError {
    /// Stable machine-readable tag used by the JSON printer.
    pub fn kind(&self) -> &'static str {
        match self {
            SubmissionError::Validation(_) => "validation",
            SubmissionError::Busy => "busy",
            SubmissionError::Io { .. } => "io",
            SubmissionError::Transport(_) => "transport",
            SubmissionError::Response { .. } => "response",
            SubmissionError::Malformed(_) => "malformed",
            SubmissionError::Discarded => "discarded",
        }
    }

    /// Local errors never reach the network and exit with 2; everything
    /// that happened after a request was issued exits with 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            SubmissionError::Validation(_) | SubmissionError::Busy | SubmissionError::Io { .. } => 2,
            _ => 1,
        }
    }

    /// Whether this failure left the submitter in the `Failed` state.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SubmissionError::Transport(_)
                | SubmissionError::Response { .. }
                | SubmissionError::Malformed(_)
        )
    }
}

/// Invalid configuration file or values.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid config file {path}: {message}")]
    Parse { path: String, message: String },

    #[error("invalid server URL '{0}' (expected http:// or https://)")]
    BaseUrl(String),

    #[error("unknown output mode '{0}' (expected human|json)")]
    Output(String),

    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_split_local_and_remote() {
        assert_eq!(SubmissionError::Validation("x".into()).exit_code(), 2);
        assert_eq!(SubmissionError::Busy.exit_code(), 2);
        assert_eq!(SubmissionError::Transport("refused".into()).exit_code(), 1);
        let resp = SubmissionError::Response {
            status: 500,
            reason: "Internal Server Error".into(),
        };
        assert_eq!(resp.exit_code(), 1);
        assert!(resp.to_string().contains("500"));
    }

    #[test]
    fn test_malformed_converts_and_hides_parse_detail() {
        let err: SubmissionError = MalformedResult("expected value at line 1".into()).into();
        assert_eq!(err.kind(), "malformed");
        assert!(!err.to_string().contains("line 1"));
        assert!(err.is_terminal());
    }
}
