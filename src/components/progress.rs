//! Progress overlay elements.

use web_sys::HtmlElement;

use crate::config::{ACTIVE_CLASS, progress_ids};
use crate::core::error::BindError;
use crate::core::progress::{ProgressState, ProgressView};
use crate::utils::dom;

pub struct DomProgressView {
    overlay: HtmlElement,
    label: HtmlElement,
    fill: HtmlElement,
    percent: HtmlElement,
}

impl DomProgressView {
    pub fn bind() -> Result<Self, BindError> {
        Ok(Self {
            overlay: dom::require(progress_ids::OVERLAY)?,
            label: dom::require(progress_ids::LABEL)?,
            fill: dom::require(progress_ids::FILL)?,
            percent: dom::require(progress_ids::PERCENT)?,
        })
    }
}

impl ProgressView for DomProgressView {
    fn render(&self, state: &ProgressState) {
        dom::set_class(&self.overlay, ACTIVE_CLASS, state.visible);
        self.label.set_text_content(Some(&state.label));
        let _ = self.fill.style().set_property("width", &state.fill_width());
        self.percent.set_text_content(Some(&state.percent_text()));
    }
}
