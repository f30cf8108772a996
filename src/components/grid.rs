//! Grid bound to the server-rendered item elements.

use leptos::logging::warn;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement};

use crate::config::{PageConfig, SELECTED_CLASS};
use crate::core::error::BindError;
use crate::core::selection::{Grid, permute};
use crate::models::Item;
use crate::utils::dom;

/// Items of the grid container together with their elements.
///
/// `items[i]` always describes `elements[i]`, and both follow the order the
/// elements appear in the container.
pub struct DomGrid {
    container: Element,
    items: Vec<Item>,
    elements: Vec<HtmlElement>,
}

impl DomGrid {
    /// Read the grid container and its items.
    ///
    /// Elements without a `data-path` cannot be addressed and are skipped.
    pub fn bind(config: &PageConfig) -> Result<Self, BindError> {
        let document = dom::document().ok_or(BindError::NoDocument)?;
        let container = document
            .get_element_by_id(&config.grid_id)
            .ok_or_else(|| BindError::MissingElement(format!("#{}", config.grid_id)))?;

        let collection = container.get_elements_by_class_name(&config.item_class);
        let mut items = Vec::new();
        let mut elements = Vec::new();
        for element in (0..collection.length()).filter_map(|i| collection.item(i)) {
            let Some(mut item) = Item::from_data_attributes(dom::data_attributes(&element)) else {
                warn!("grid item without data-path skipped");
                continue;
            };
            item.selected = element.class_list().contains(SELECTED_CLASS);

            match element.dyn_into::<HtmlElement>() {
                Ok(element) => {
                    items.push(item);
                    elements.push(element);
                }
                Err(_) => warn!("grid item {} is not an HTML element", item.path),
            }
        }

        Ok(Self {
            container,
            items,
            elements,
        })
    }
}

impl Grid for DomGrid {
    fn items(&self) -> &[Item] {
        &self.items
    }

    fn set_selected(&mut self, index: usize, selected: bool) {
        let (Some(item), Some(element)) = (self.items.get_mut(index), self.elements.get(index))
        else {
            return;
        };
        item.selected = selected;
        dom::set_class(element, SELECTED_CLASS, selected);
    }

    fn reorder(&mut self, order: &[usize]) {
        permute(&mut self.items, order);
        permute(&mut self.elements, order);

        // Re-appending moves each element to the end, leaving them in order.
        for element in &self.elements {
            let _ = self.container.append_child(element);
        }
    }
}
