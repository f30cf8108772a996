//! Page wiring.
//!
//! Contains [`PageContext`], the shared handle over the selection state and
//! the bound grid, and [`boot`], which attaches every listener of the
//! listing page.

use std::rc::Rc;

use leptos::logging::{log, warn};
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, Event, FormData, HtmlElement, HtmlFormElement, HtmlInputElement, HtmlSelectElement};

use crate::components::{BrowserPage, DomGrid, DomProgressView, SelectionChrome};
use crate::config::{
    CLEAR_BUTTON_ID, CONFIG_SCRIPT_ID, DOWNLOAD_BUTTON_ID, FILE_INPUT_ID, PageConfig,
    SELECT_TOGGLE_ID, SORT_ATTRIBUTE, SORT_SELECT_ID, UPLOAD_BUTTON_ID, UPLOAD_FORM_SELECTOR,
};
use crate::core::error::{BindError, TransferError};
use crate::core::{
    ClickAction, Grid, SelectionSnapshot, SelectionStore, SortCriterion, TransferController,
    UrlErrorNotifier, sort_grid,
};
use crate::utils::{XhrTransport, dom};

// ============================================================================
// PageContext
// ============================================================================

/// Shared page state.
///
/// This struct is `Copy` because all fields are Leptos signals or stored
/// values, so every listener can hold its own handle.
#[derive(Clone, Copy)]
pub struct PageContext {
    grid: RwSignal<DomGrid, LocalStorage>,
    selection: RwSignal<SelectionStore>,
    /// Absent when the page has no selection chrome.
    chrome: StoredValue<Option<SelectionChrome>, LocalStorage>,
}

impl PageContext {
    pub fn new(grid: DomGrid, chrome: Option<SelectionChrome>) -> Self {
        Self {
            grid: RwSignal::new_local(grid),
            selection: RwSignal::new(SelectionStore::new()),
            chrome: StoredValue::new_local(chrome),
        }
    }

    pub fn snapshot(&self) -> SelectionSnapshot {
        self.selection
            .with_untracked(|store| self.grid.with_untracked(|grid| store.snapshot(grid)))
    }

    pub fn toggle_selection_mode(&self) {
        if let Some(snapshot) = self.apply(|store, grid| store.toggle_selection_mode(grid)) {
            self.render(snapshot);
        }
    }

    /// Enter selection mode and select the item at `path`.
    pub fn start_selection(&self, path: &str) {
        let snapshot = self
            .apply(|store, grid| {
                let index = grid.position(path)?;
                Some(store.start_selection(grid, index))
            })
            .flatten();
        if let Some(snapshot) = snapshot {
            self.render(snapshot);
        }
    }

    /// Click on the item at `path`. Unknown paths navigate.
    pub fn handle_item_click(&self, path: &str) -> ClickAction {
        let action = self
            .apply(|store, grid| match grid.position(path) {
                Some(index) => store.handle_item_click(grid, index),
                None => ClickAction::Navigate,
            })
            .unwrap_or(ClickAction::Navigate);
        if let ClickAction::Toggled(snapshot) = action {
            self.render(snapshot);
        }
        action
    }

    pub fn clear_selection(&self) {
        if let Some(snapshot) = self.apply(|store, grid| store.clear_selection(grid)) {
            self.render(snapshot);
        }
    }

    pub fn sort(&self, criterion: &SortCriterion) {
        self.grid.update(|grid| sort_grid(grid, criterion));
        log!("grid sorted by {:?}", criterion);
    }

    pub fn selected_paths(&self) -> Vec<String> {
        self.grid.with_untracked(|grid| grid.selected_paths())
    }

    /// Update mode and items together.
    fn apply<R>(&self, op: impl FnOnce(&mut SelectionStore, &mut DomGrid) -> R) -> Option<R> {
        self.grid
            .try_update(|grid| self.selection.try_update(|store| op(store, grid)))
            .flatten()
    }

    fn render(&self, snapshot: SelectionSnapshot) {
        self.chrome.with_value(|chrome| {
            if let Some(chrome) = chrome {
                chrome.render(&snapshot);
            }
        });
    }
}

// ============================================================================
// Boot
// ============================================================================

/// Bind the page script to the server-rendered listing.
///
/// Only a missing document or grid aborts; optional controls that are absent
/// are skipped with a warning.
pub fn boot() -> Result<(), BindError> {
    dom::window().ok_or(BindError::NoWindow)?;
    dom::document().ok_or(BindError::NoDocument)?;

    let config = load_config();
    surface_url_notice();

    let grid = DomGrid::bind(&config)?;
    let item_count = grid.items().len();
    let chrome = SelectionChrome::bind()
        .inspect_err(|e| warn!("selection controls unavailable: {}", e))
        .ok();
    let ctx = PageContext::new(grid, chrome);
    ctx.render(ctx.snapshot());

    bind_items(ctx, &config);
    let controls = bind_selection_controls(ctx) + bind_sort_controls(ctx);
    let transfers = bind_transfers(ctx, config);

    log!(
        "listing bound: {} item(s), {} control(s), transfers {}",
        item_count,
        controls,
        if transfers { "enabled" } else { "disabled" }
    );
    Ok(())
}

fn load_config() -> PageConfig {
    let Some(script) = dom::element_by_id::<Element>(CONFIG_SCRIPT_ID) else {
        return PageConfig::default();
    };

    let json = script.text_content().unwrap_or_default();
    PageConfig::from_json(&json).unwrap_or_else(|e| {
        warn!("{}; using defaults", e);
        PageConfig::default()
    })
}

/// Show a notice carried in the URL once, then scrub it.
fn surface_url_notice() {
    let Some(location) = dom::location() else {
        return;
    };

    if let Some(notice) = UrlErrorNotifier::new().check(&location) {
        log!("notice from url: {}", notice.message);
        dom::alert(&notice.message);
        dom::replace_url(&notice.clean_url);
    }
}

/// Path of the grid item an event happened in.
fn item_path(event: &Event, item_class: &str) -> Option<String> {
    let target = event.target()?.dyn_into::<Element>().ok()?;
    let item = target.closest(&format!(".{}", item_class)).ok()??;
    item.get_attribute("data-path")
}

/// Item gestures, delegated to the grid container so they survive sorting.
fn bind_items(ctx: PageContext, config: &PageConfig) {
    let Some(container) = dom::element_by_id::<Element>(&config.grid_id) else {
        return;
    };

    let item_class = config.item_class.clone();
    dom::listen(&container, "click", move |event| {
        if let Some(path) = item_path(&event, &item_class)
            && let ClickAction::Toggled(_) = ctx.handle_item_click(&path)
        {
            event.prevent_default();
        }
    });

    let item_class = config.item_class.clone();
    dom::listen(&container, "contextmenu", move |event| {
        if let Some(path) = item_path(&event, &item_class) {
            event.prevent_default();
            ctx.start_selection(&path);
        }
    });
}

fn bind_selection_controls(ctx: PageContext) -> usize {
    let mut bound = 0;

    if let Some(toggle) = dom::element_by_id::<Element>(SELECT_TOGGLE_ID) {
        dom::listen(&toggle, "click", move |_| ctx.toggle_selection_mode());
        bound += 1;
    }
    if let Some(clear) = dom::element_by_id::<Element>(CLEAR_BUTTON_ID) {
        dom::listen(&clear, "click", move |_| ctx.clear_selection());
        bound += 1;
    }

    bound
}

fn bind_sort_controls(ctx: PageContext) -> usize {
    let mut bound = 0;

    for button in dom::query_all(&format!("[{}]", SORT_ATTRIBUTE)) {
        let Some(id) = button.get_attribute(SORT_ATTRIBUTE) else {
            continue;
        };
        let criterion = SortCriterion::parse(&id);
        dom::listen(&button, "click", move |_| ctx.sort(&criterion));
        bound += 1;
    }

    if let Some(select) = dom::element_by_id::<HtmlSelectElement>(SORT_SELECT_ID) {
        let source = select.clone();
        dom::listen(&select, "change", move |_| {
            ctx.sort(&SortCriterion::parse(&source.value()));
        });
        bound += 1;
    }

    bound
}

fn file_count(input: &HtmlInputElement) -> usize {
    input.files().map(|files| files.length() as usize).unwrap_or(0)
}

/// Wire the upload form and the bulk download button.
///
/// Returns `false` when the progress overlay is missing.
fn bind_transfers(ctx: PageContext, config: PageConfig) -> bool {
    let view = match DomProgressView::bind() {
        Ok(view) => view,
        Err(e) => {
            warn!("transfers unavailable: {}", e);
            return false;
        }
    };

    let upload_button = dom::element_by_id::<HtmlElement>(UPLOAD_BUTTON_ID);
    let controller = Rc::new(TransferController::new(
        XhrTransport,
        BrowserPage::new(ctx, upload_button),
        view,
        config,
    ));

    if let Some(button) = dom::element_by_id::<Element>(DOWNLOAD_BUTTON_ID) {
        let controller = Rc::clone(&controller);
        dom::listen(&button, "click", move |_| {
            let controller = Rc::clone(&controller);
            spawn_local(async move {
                if let Err(TransferError::InFlight(kind)) = controller.download_selected().await {
                    log!("{} already in progress, click ignored", kind);
                }
            });
        });
    }

    let input = dom::element_by_id::<HtmlInputElement>(FILE_INPUT_ID);
    if let Some(input) = &input {
        let controller = Rc::clone(&controller);
        let source = input.clone();
        dom::listen(input, "change", move |_| {
            controller.files_changed(file_count(&source));
        });
    }
    controller.files_changed(input.as_ref().map(file_count).unwrap_or(0));

    let form = dom::query_all(UPLOAD_FORM_SELECTOR)
        .into_iter()
        .find_map(|el| el.dyn_into::<HtmlFormElement>().ok());
    if let Some(form) = form {
        let source = form.clone();
        dom::listen(&form, "submit", move |event| {
            event.prevent_default();
            let body = match FormData::new_with_form(&source) {
                Ok(body) => body,
                Err(e) => {
                    warn!("cannot read upload form: {:?}", e);
                    return;
                }
            };
            let url = source.action();
            let controller = Rc::clone(&controller);
            spawn_local(async move {
                if let Err(TransferError::InFlight(kind)) = controller.upload(&url, body).await {
                    log!("{} already in progress, submit ignored", kind);
                }
            });
        });
    }

    true
}
