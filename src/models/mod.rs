//! Data models for the listing page.
//!
//! - [`Item`], [`ItemKind`] - grid entries as rendered by the server
//! - [`TransferKind`], [`TransferProgress`], [`TransferRequest`],
//!   [`TransferResponse`], [`TransferEvent`] - monitored transfer records

mod item;
mod transfer;

pub use item::{Item, ItemKind};
pub use transfer::{
    Method, TransferEvent, TransferKind, TransferProgress, TransferRequest, TransferResponse,
};
