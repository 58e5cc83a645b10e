//! Error types for the navigation engine.
//!
//! This module defines the centralized error type [`NavError`] and a type alias
//! [`Result`] for convenient error handling throughout the crate. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait
//! implementation.
//!
//! Nothing here is fatal to the engine: callers convert every error into a
//! short spoken message and a log entry, and navigation remains usable on the
//! next input.

use thiserror::Error;

/// The main error type for navigation engine operations.
///
/// Consolidates the error conditions that can occur while reading host data,
/// dispatching actions, or loading configuration. IO and TOML parse failures
/// convert automatically via `#[from]`.
#[derive(Debug, Error)]
pub enum NavError {
    /// Reading from the host game failed.
    ///
    /// Raised while formatting a summary, detail, or section list when the
    /// underlying host object is gone or unreadable (e.g. destroyed between
    /// frames). Callers surface this as a short "Error reading X" utterance.
    #[error("host read error: {0}")]
    HostRead(String),

    /// The host rejected a dispatched action.
    ///
    /// Carries the host's reason when one is available ("Cannot afford this
    /// organization"), which is spoken verbatim to the user.
    #[error("action rejected: {0}")]
    ActionRejected(String),

    /// A grid source produced a malformed matrix.
    ///
    /// Row/column label counts must match the cell dimensions.
    #[error("grid shape error: {0}")]
    GridShape(String),

    /// Configuration is invalid or missing.
    #[error("configuration error: {0}")]
    Config(String),

    /// A keymap file failed to parse.
    #[error("keymap parse error: {0}")]
    KeymapParse(#[from] toml::de::Error),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized `Result` type for navigation engine operations.
pub type Result<T> = std::result::Result<T, NavError>;
