//! loglens core library.
//!
//! This crate exposes the client side of a security log/grammar analysis
//! service: the result model, classification tables, the submission state
//! machine and the renderers used by the `loglens` binary.
//!
//! High-level modules:
//! - `cli`: CLI argument parsing (binary uses this).
//! - `config`: Discovery and effective configuration resolution.
//! - `models`: Records received from the service and their normalization.
//! - `classify`: Token-to-column and severity-to-treatment tables.
//! - `submit`: Request/response cycle and its state machine.
//! - `render`: Pure view composition for log and grammar results.
//! - `output`: Human/JSON printers.
//! - `error`: Submission and configuration errors.
//! - `utils`: Supporting helpers.
pub mod classify;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod output;
pub mod render;
pub mod submit;
pub mod utils;
