//! Browser side of the transfer flows.

use web_sys::HtmlElement;

use crate::app::PageContext;
use crate::config::ARCHIVE_MIME;
use crate::core::error::TransferError;
use crate::core::transfer::PageHost;
use crate::utils::dom;

/// [`PageHost`] acting on the live page.
pub struct BrowserPage {
    ctx: PageContext,
    upload_button: Option<HtmlElement>,
}

impl BrowserPage {
    pub fn new(ctx: PageContext, upload_button: Option<HtmlElement>) -> Self {
        Self { ctx, upload_button }
    }
}

impl PageHost for BrowserPage {
    fn selected_paths(&self) -> Vec<String> {
        self.ctx.selected_paths()
    }

    fn clear_selection(&self) {
        self.ctx.clear_selection();
    }

    fn set_upload_enabled(&self, enabled: bool) {
        let Some(button) = &self.upload_button else {
            return;
        };
        let _ = button.toggle_attribute_with_force("disabled", !enabled);

        let style = button.style();
        let (opacity, cursor) = if enabled {
            ("1", "pointer")
        } else {
            ("0.5", "not-allowed")
        };
        let _ = style.set_property("opacity", opacity);
        let _ = style.set_property("cursor", cursor);
    }

    fn notify(&self, message: &str) {
        dom::alert(message);
    }

    fn reload(&self) {
        dom::reload();
    }

    fn navigate(&self, url: &str) {
        dom::navigate(url);
    }

    fn save_file(&self, file_name: &str, payload: &[u8]) -> Result<(), TransferError> {
        dom::save_bytes(file_name, ARCHIVE_MIME, payload)
    }
}
