//! Records exchanged between the transfer controller and a transport.

use std::fmt;

use crate::core::error::TransferError;

/// Direction of a transfer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransferKind {
    Upload,
    Download,
}

impl fmt::Display for TransferKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Upload => write!(f, "upload"),
            Self::Download => write!(f, "download"),
        }
    }
}

/// Byte counters reported by a monitored transfer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransferProgress {
    pub loaded: u64,
    /// `None` when the length is not computable.
    pub total: Option<u64>,
}

impl TransferProgress {
    pub fn new(loaded: u64, total: Option<u64>) -> Self {
        Self { loaded, total }
    }

    /// Completed share in percent, when the total is known and non-zero.
    pub fn percent(&self) -> Option<f64> {
        self.total
            .filter(|&total| total > 0)
            .map(|total| self.loaded as f64 / total as f64 * 100.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

/// A request handed to a [`Transport`](crate::core::Transport).
#[derive(Debug)]
pub struct TransferRequest<B> {
    pub kind: TransferKind,
    pub method: Method,
    pub url: String,
    pub body: Option<B>,
}

impl<B> TransferRequest<B> {
    /// Multipart upload of `body` to `url`.
    pub fn upload(url: impl Into<String>, body: B) -> Self {
        Self {
            kind: TransferKind::Upload,
            method: Method::Post,
            url: url.into(),
            body: Some(body),
        }
    }

    /// Binary download from `url`.
    pub fn download(url: impl Into<String>) -> Self {
        Self {
            kind: TransferKind::Download,
            method: Method::Get,
            url: url.into(),
            body: None,
        }
    }
}

/// Response of a settled transfer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransferResponse {
    pub status: u16,
    /// Response payload; only populated for downloads.
    pub body: Vec<u8>,
}

/// One event of a monitored transfer.
///
/// A transport emits any number of `Progress` events with non-decreasing
/// `loaded`, followed by exactly one `Settled`.
#[derive(Clone, Debug, PartialEq)]
pub enum TransferEvent {
    Progress(TransferProgress),
    Settled(Result<TransferResponse, TransferError>),
}
