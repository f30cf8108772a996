//! Client-side grid sorting.
//!
//! Directories always come first. Within a kind, numeric criteria sort
//! largest/newest first and everything else sorts as text, ascending.
//! The sort is stable: items that compare equal keep their current order.

use std::cmp::Ordering;

use super::selection::Grid;
use crate::models::Item;

/// How a criterion orders its values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortOrder {
    NumericDescending,
    LexicographicAscending,
}

/// Attribute the grid is sorted by.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SortCriterion {
    Name,
    Size,
    Date,
    /// Any other `data-*` attribute, compared as text.
    Attribute(String),
}

impl SortCriterion {
    /// Map a criterion identifier (`"name"`, `"size"`, `"date"`, ...) to a
    /// criterion. Unknown identifiers become [`SortCriterion::Attribute`].
    pub fn parse(id: &str) -> Self {
        match id.trim() {
            "name" => Self::Name,
            "size" => Self::Size,
            "date" => Self::Date,
            other => Self::Attribute(other.to_string()),
        }
    }

    pub fn order(&self) -> SortOrder {
        match self {
            Self::Size | Self::Date => SortOrder::NumericDescending,
            Self::Name | Self::Attribute(_) => SortOrder::LexicographicAscending,
        }
    }

    fn numeric(&self, item: &Item) -> f64 {
        match self {
            Self::Size => item.size as f64,
            Self::Date => item.modified_at as f64,
            _ => 0.0,
        }
    }

    fn text<'a>(&self, item: &'a Item) -> Option<&'a str> {
        match self {
            Self::Name => Some(&item.name),
            Self::Attribute(key) => item.attribute(key),
            _ => None,
        }
    }

    /// Compare two items of the same kind under this criterion.
    fn compare_within_kind(&self, a: &Item, b: &Item) -> Ordering {
        match self.order() {
            SortOrder::NumericDescending => self.numeric(b).total_cmp(&self.numeric(a)),
            SortOrder::LexicographicAscending => match (self.text(a), self.text(b)) {
                (Some(x), Some(y)) => compare_text(x, y),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
        }
    }

    /// Full ordering: directories first, then the criterion.
    pub fn compare(&self, a: &Item, b: &Item) -> Ordering {
        a.kind
            .cmp(&b.kind)
            .then_with(|| self.compare_within_kind(a, b))
    }
}

/// Case-insensitive comparison; on a tie lowercase sorts before uppercase.
fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}

/// Indices of `items` in sorted display order.
pub fn sorted_order(items: &[Item], criterion: &SortCriterion) -> Vec<usize> {
    let mut order: Vec<usize> = (0..items.len()).collect();
    order.sort_by(|&a, &b| criterion.compare(&items[a], &items[b]));
    order
}

/// Reorder the grid by `criterion`. Item data, selection included, is
/// untouched; only the presentation order changes.
pub fn sort_grid<G: Grid + ?Sized>(grid: &mut G, criterion: &SortCriterion) {
    if grid.items().is_empty() {
        return;
    }
    let order = sorted_order(grid.items(), criterion);
    grid.reorder(&order);
}
