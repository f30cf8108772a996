//! Selection toggle, action bar and counter.

use web_sys::HtmlElement;

use crate::config::{ACTION_BAR_ID, ACTIVE_CLASS, SELECT_TOGGLE_ID, SELECTED_COUNT_ID};
use crate::core::error::BindError;
use crate::core::selection::SelectionSnapshot;
use crate::utils::dom;

/// Page chrome reflecting the selection state.
pub struct SelectionChrome {
    toggle: HtmlElement,
    action_bar: HtmlElement,
    counter: HtmlElement,
}

impl SelectionChrome {
    pub fn bind() -> Result<Self, BindError> {
        Ok(Self {
            toggle: dom::require(SELECT_TOGGLE_ID)?,
            action_bar: dom::require(ACTION_BAR_ID)?,
            counter: dom::require(SELECTED_COUNT_ID)?,
        })
    }

    pub fn render(&self, snapshot: &SelectionSnapshot) {
        dom::set_class(&self.toggle, ACTIVE_CLASS, snapshot.mode);
        self.toggle.set_text_content(Some(snapshot.toggle_label()));
        dom::set_class(&self.action_bar, ACTIVE_CLASS, snapshot.action_bar_visible());
        self.counter.set_text_content(Some(&snapshot.count_label()));
    }
}
