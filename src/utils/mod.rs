//! Utility modules for browser and URL operations.
//!
//! Provides:
//! - [`dom`] - Window, document, listener and download helpers
//! - [`url`] - Query string parsing and encoding
//! - [`XhrTransport`] - Progress-reporting transfers over `XMLHttpRequest`

pub mod dom;
pub mod url;
mod xhr;

pub use xhr::XhrTransport;
