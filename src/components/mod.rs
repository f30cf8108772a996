//! DOM-bound pieces of the listing page.
//!
//! - [`DomGrid`] - the rendered item grid
//! - [`DomProgressView`] - the progress overlay
//! - [`SelectionChrome`] - selection toggle, action bar and counter
//! - [`BrowserPage`] - page-level effects of the transfer flows

mod grid;
mod page;
mod progress;
mod selection;

pub use grid::DomGrid;
pub use page::BrowserPage;
pub use progress::DomProgressView;
pub use selection::SelectionChrome;
