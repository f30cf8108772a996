//! Selection state machine for the file grid.
//!
//! [`SelectionStore`] owns the selection-mode flag; which items are selected
//! lives on the items themselves and is read through the [`Grid`] seam, so the
//! selected set is always derived from what the grid currently holds.

use crate::config::{CANCEL_SELECT_LABEL, SELECT_LABEL, SELECTED_SUFFIX};
use crate::models::Item;

/// Access to the rendered grid items.
///
/// Implemented by the DOM-bound grid in the browser and by `Vec<Item>` for
/// tests and headless use.
pub trait Grid {
    /// Items in current display order.
    fn items(&self) -> &[Item];

    /// Set the selected flag of the item at `index`.
    fn set_selected(&mut self, index: usize, selected: bool);

    /// Reorder items so that position `i` holds the item previously at
    /// `order[i]`. `order` is a permutation of `0..items().len()`.
    fn reorder(&mut self, order: &[usize]);

    fn position(&self, path: &str) -> Option<usize> {
        self.items().iter().position(|item| item.path == path)
    }

    fn selected_count(&self) -> usize {
        self.items().iter().filter(|item| item.selected).count()
    }

    /// Paths of the selected items, in display order.
    fn selected_paths(&self) -> Vec<String> {
        self.items()
            .iter()
            .filter(|item| item.selected)
            .map(|item| item.path.clone())
            .collect()
    }
}

impl Grid for Vec<Item> {
    fn items(&self) -> &[Item] {
        self
    }

    fn set_selected(&mut self, index: usize, selected: bool) {
        if let Some(item) = self.get_mut(index) {
            item.selected = selected;
        }
    }

    fn reorder(&mut self, order: &[usize]) {
        permute(self, order);
    }
}

/// Rearrange `values` so that position `i` holds the value previously at
/// `order[i]`. Indices outside the vector or repeated are skipped.
pub fn permute<T>(values: &mut Vec<T>, order: &[usize]) {
    let mut slots: Vec<Option<T>> = values.drain(..).map(Some).collect();
    values.extend(order.iter().filter_map(|&i| slots.get_mut(i).and_then(Option::take)));
}

/// UI-visible selection state, recomputed after every mutation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SelectionSnapshot {
    pub mode: bool,
    pub count: usize,
}

impl SelectionSnapshot {
    /// The bulk-action bar is shown iff something is selected.
    pub fn action_bar_visible(&self) -> bool {
        self.count > 0
    }

    pub fn count_label(&self) -> String {
        format!("{} {}", self.count, SELECTED_SUFFIX)
    }

    pub fn toggle_label(&self) -> &'static str {
        if self.mode {
            CANCEL_SELECT_LABEL
        } else {
            SELECT_LABEL
        }
    }
}

/// Result of a click on a grid item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickAction {
    /// Selection mode is off: let the default navigation happen.
    Navigate,
    /// Selection mode is on: navigation suppressed, selection toggled.
    Toggled(SelectionSnapshot),
}

/// Selection mode and the operations that mutate the selection.
///
/// Every operation returns the snapshot the chrome should render. Mode and
/// selected flags are updated together before the snapshot is taken.
#[derive(Clone, Debug, Default)]
pub struct SelectionStore {
    mode: bool,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn is_active(&self) -> bool {
        self.mode
    }

    pub fn snapshot<G: Grid + ?Sized>(&self, grid: &G) -> SelectionSnapshot {
        SelectionSnapshot {
            mode: self.mode,
            count: grid.selected_count(),
        }
    }

    /// Enter selection mode, or leave it and clear the selection.
    pub fn toggle_selection_mode<G: Grid + ?Sized>(&mut self, grid: &mut G) -> SelectionSnapshot {
        if self.mode {
            self.clear_selection(grid)
        } else {
            self.mode = true;
            self.snapshot(grid)
        }
    }

    /// Enter selection mode if needed and select the item at `index`.
    pub fn start_selection<G: Grid + ?Sized>(
        &mut self,
        grid: &mut G,
        index: usize,
    ) -> SelectionSnapshot {
        self.mode = true;
        grid.set_selected(index, true);
        self.snapshot(grid)
    }

    pub fn handle_item_click<G: Grid + ?Sized>(&mut self, grid: &mut G, index: usize) -> ClickAction {
        if !self.mode {
            return ClickAction::Navigate;
        }

        let selected = grid.items().get(index).is_some_and(|item| item.selected);
        grid.set_selected(index, !selected);
        ClickAction::Toggled(self.snapshot(grid))
    }

    /// Deselect everything and leave selection mode.
    pub fn clear_selection<G: Grid + ?Sized>(&mut self, grid: &mut G) -> SelectionSnapshot {
        let selected: Vec<usize> = grid
            .items()
            .iter()
            .enumerate()
            .filter(|(_, item)| item.selected)
            .map(|(i, _)| i)
            .collect();
        for index in selected {
            grid.set_selected(index, false);
        }
        self.mode = false;
        self.snapshot(grid)
    }
}
