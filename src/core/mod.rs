//! Core logic of the listing page, independent of the browser.
//!
//! This module provides:
//! - [`SelectionStore`] selection mode over a [`Grid`]
//! - [`SortCriterion`] and [`sort_grid`] for reordering the grid
//! - [`ProgressIndicator`] overlay state
//! - [`TransferController`] upload and bulk-download flows
//! - [`UrlErrorNotifier`] one-shot notices carried in the URL

pub mod error;
pub mod notice;
pub mod progress;
pub mod selection;
pub mod sort;
pub mod transfer;

pub use notice::UrlErrorNotifier;
pub use selection::{ClickAction, Grid, SelectionSnapshot, SelectionStore};
pub use sort::{SortCriterion, sort_grid};
pub use transfer::{TransferController, Transport};
