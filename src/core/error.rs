//! Error types for the page script.
//!
//! - [`TransferError`] - upload and bulk-download failures
//! - [`BindError`] - problems attaching to the server-rendered markup

use thiserror::Error;

use crate::models::TransferKind;

/// Failures of an upload or bulk download.
///
/// Validation (`NoFileChosen`, `InFlight`) is normally prevented by the
/// trigger state; the remaining variants are surfaced to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransferError {
    /// Submit attempted with no file chosen.
    #[error("no file chosen")]
    NoFileChosen,
    /// Same kind of transfer already running.
    #[error("{0} already in progress")]
    InFlight(TransferKind),
    /// Request could not be created or sent.
    #[error("failed to start request: {0}")]
    RequestFailed(String),
    /// No response received.
    #[error("network error: {0}")]
    Network(String),
    /// Server answered with a rejecting status.
    #[error("server rejected transfer with status {0}")]
    Status(u16),
    /// Event stream closed before the transfer settled.
    #[error("transfer ended without settling")]
    Interrupted,
    /// Received archive could not be handed to the browser.
    #[error("failed to save archive: {0}")]
    SaveFailed(String),
}

/// Failures while binding to the page markup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    #[error("browser window not available")]
    NoWindow,
    #[error("document not available")]
    NoDocument,
    #[error("missing element: {0}")]
    MissingElement(String),
    #[error("invalid page config: {0}")]
    InvalidConfig(String),
}
