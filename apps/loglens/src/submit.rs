//! One request/response cycle against the analysis service.
//!
//! `AnalysisSubmitter` owns the input, the in-flight flag and the last
//! outcome. States:
//! - `Idle`: initial, and after `reset`.
//! - `Submitting`: exactly one request in flight; further triggers are
//!   rejected with `Busy` and never reach the transport.
//! - `Succeeded` / `Failed`: terminal until `reset` or the next submission.
//!
//! Every request carries a sequence number. Only the response to the most
//! recent `begin` is recorded; `reset` invalidates the one in flight.
//!
//! Validation happens before `Submitting`; a rejected input leaves the
//! state untouched.

use crate::config::ClientConfig;
use crate::error::{ConfigError, MalformedResult, SubmissionError};
use crate::models::{AnalysisResult, GrammarResult};
use reqwest::blocking::multipart;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value as Json;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub const MSG_NO_FILE: &str = "Por favor, selecciona un archivo.";
pub const MSG_NO_TEXT: &str = "Por favor, pega o escribe algo de texto.";

/// Multipart field carrying the log file.
pub const FILE_FIELD: &str = "logFile";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisKind {
    Logs,
    Grammar,
}

impl AnalysisKind {
    pub fn path(self) -> &'static str {
        match self {
            AnalysisKind::Logs => "/api/analyze-logs",
            AnalysisKind::Grammar => "/api/analyze-grammar",
        }
    }
}

/// Which input the next log submission uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    File,
    Text,
}

/// Request body; the two encodings never mix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    File { file_name: String, bytes: Vec<u8> },
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub seq: u64,
    pub url: String,
    pub kind: AnalysisKind,
    pub payload: Payload,
}

impl Request {
    pub fn ticket(&self) -> Ticket {
        Ticket {
            seq: self.seq,
            kind: self.kind,
        }
    }
}

/// Identifies the request a response belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    pub seq: u64,
    pub kind: AnalysisKind,
}

/// Status line and body as received, before any decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub reason: String,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends a prepared request. Implementations report only network-level
/// failures as errors; any HTTP status is a successful send.
pub trait Transport {
    fn send(&self, request: Request) -> Result<RawResponse, SubmissionError>;
}

/// Blocking HTTP transport.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        let mut builder = reqwest::blocking::Client::builder();
        if let Some(t) = config.timeout {
            builder = builder.timeout(t);
        }
        let client = builder
            .build()
            .map_err(|e| ConfigError::Client(e.to_string()))?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: Request) -> Result<RawResponse, SubmissionError> {
        let builder = self.client.post(&request.url);
        let builder = match request.payload {
            Payload::Text(text) => builder.header(CONTENT_TYPE, "text/plain").body(text),
            Payload::File { file_name, bytes } => {
                let part = multipart::Part::bytes(bytes).file_name(file_name);
                builder.multipart(multipart::Form::new().part(FILE_FIELD, part))
            }
        };
        let response = builder
            .send()
            .map_err(|e| SubmissionError::Transport(e.to_string()))?;
        let status = response.status();
        let body = response
            .bytes()
            .map_err(|e| SubmissionError::Transport(e.to_string()))?;
        Ok(RawResponse {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("").to_string(),
            body: body.to_vec(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Logs(AnalysisResult),
    Grammar(GrammarResult),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitState {
    Idle,
    Submitting,
    Succeeded(Outcome),
    Failed(SubmissionError),
}

pub struct AnalysisSubmitter<T: Transport> {
    config: ClientConfig,
    transport: T,
    mode: InputMode,
    file: Option<PathBuf>,
    text: String,
    state: SubmitState,
    seq: u64,
    in_flight: Option<u64>,
}

impl<T: Transport> AnalysisSubmitter<T> {
    pub fn new(config: ClientConfig, transport: T) -> Self {
        Self {
            config,
            transport,
            mode: InputMode::File,
            file: None,
            text: String::new(),
            state: SubmitState::Idle,
            seq: 0,
            in_flight: None,
        }
    }

    pub fn state(&self) -> &SubmitState {
        &self.state
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.state, SubmitState::Submitting)
    }

    /// Message of the last failure, if the submitter is in `Failed`.
    pub fn error_message(&self) -> Option<String> {
        match &self.state {
            SubmitState::Failed(e) => Some(e.to_string()),
            _ => None,
        }
    }

    /// Switch between file and text input without touching either value.
    pub fn set_mode(&mut self, mode: InputMode) {
        if !self.is_submitting() {
            self.mode = mode;
        }
    }

    pub fn select_file(&mut self, path: impl Into<PathBuf>) {
        if !self.is_submitting() {
            self.file = Some(path.into());
            self.mode = InputMode::File;
        }
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        if !self.is_submitting() {
            self.text = text.into();
            self.mode = InputMode::Text;
        }
    }

    /// Whether `begin(kind)` would pass validation with the current input.
    pub fn can_submit(&self, kind: AnalysisKind) -> bool {
        if self.is_submitting() {
            return false;
        }
        match (kind, self.mode) {
            (AnalysisKind::Logs, InputMode::File) => self.file.is_some(),
            _ => !self.text.trim().is_empty(),
        }
    }

    /// Validate input and enter `Submitting`, returning the request to send.
    ///
    /// Grammar analysis always uses the text input.
    pub fn begin(&mut self, kind: AnalysisKind) -> Result<Request, SubmissionError> {
        if self.is_submitting() {
            warn!("submission ignored: a request is already in flight");
            return Err(SubmissionError::Busy);
        }
        let payload = match (kind, self.mode) {
            (AnalysisKind::Logs, InputMode::File) => self.file_payload()?,
            _ => {
                if self.text.trim().is_empty() {
                    return Err(SubmissionError::Validation(MSG_NO_TEXT.to_string()));
                }
                Payload::Text(self.text.clone())
            }
        };
        let url = self.config.endpoint(kind);
        self.seq += 1;
        info!(%url, seq = self.seq, "submitting analysis request");
        self.state = SubmitState::Submitting;
        self.in_flight = Some(self.seq);
        Ok(Request {
            seq: self.seq,
            url,
            kind,
            payload,
        })
    }

    fn file_payload(&self) -> Result<Payload, SubmissionError> {
        let path = self
            .file
            .as_ref()
            .ok_or_else(|| SubmissionError::Validation(MSG_NO_FILE.to_string()))?;
        let bytes = fs::read(path).map_err(|e| SubmissionError::Io {
            path: path.to_string_lossy().to_string(),
            message: e.to_string(),
        })?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "log".to_string());
        debug!(file = %file_name, size = bytes.len(), "read log file");
        Ok(Payload::File { file_name, bytes })
    }

    /// Resolve the in-flight request into `Succeeded` or `Failed`.
    ///
    /// A response whose ticket is not the one in flight (it was reset, or a
    /// newer request started since) is dropped and the state is left alone.
    pub fn finish(
        &mut self,
        ticket: Ticket,
        response: Result<RawResponse, SubmissionError>,
    ) -> Result<&Outcome, SubmissionError> {
        if self.in_flight != Some(ticket.seq) {
            debug!(seq = ticket.seq, "discarding stale response");
            return Err(SubmissionError::Discarded);
        }
        self.in_flight = None;
        self.state = match response.and_then(|raw| decode(ticket.kind, raw)) {
            Ok(outcome) => {
                info!("analysis succeeded");
                SubmitState::Succeeded(outcome)
            }
            Err(err) => {
                warn!(kind = err.kind(), detail = ?err, "analysis failed");
                SubmitState::Failed(err)
            }
        };
        match &self.state {
            SubmitState::Succeeded(outcome) => Ok(outcome),
            SubmitState::Failed(err) => Err(err.clone()),
            SubmitState::Idle | SubmitState::Submitting => Err(SubmissionError::Discarded),
        }
    }

    /// Run one full cycle: validate, send once, record the outcome.
    pub fn submit(&mut self, kind: AnalysisKind) -> Result<&Outcome, SubmissionError> {
        let request = self.begin(kind)?;
        let ticket = request.ticket();
        let response = self.transport.send(request);
        self.finish(ticket, response)
    }

    /// Back to `Idle` with no input, result or error.
    pub fn reset(&mut self) {
        self.state = SubmitState::Idle;
        self.in_flight = None;
        self.file = None;
        self.text.clear();
    }
}

fn decode(kind: AnalysisKind, raw: RawResponse) -> Result<Outcome, SubmissionError> {
    if !raw.is_success() {
        return Err(SubmissionError::Response {
            status: raw.status,
            reason: raw.reason,
        });
    }
    let value: Json = serde_json::from_slice(&raw.body).map_err(|e| {
        SubmissionError::Malformed(MalformedResult(format!("response is not JSON: {}", e)))
    })?;
    Ok(match kind {
        AnalysisKind::Logs => Outcome::Logs(AnalysisResult::from_json(value)?),
        AnalysisKind::Grammar => Outcome::Grammar(GrammarResult::from_json(value)?),
    })
}
