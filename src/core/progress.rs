//! Progress overlay state shared by uploads and downloads.

use std::cell::RefCell;

/// What the overlay currently shows.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProgressState {
    pub visible: bool,
    pub label: String,
    /// Fill percentage in `0.0..=100.0`.
    pub percent: f64,
}

impl ProgressState {
    /// CSS width of the fill bar.
    pub fn fill_width(&self) -> String {
        format!("{:.2}%", self.percent)
    }

    /// Rounded percentage text.
    pub fn percent_text(&self) -> String {
        format!("{}%", self.percent.round() as u32)
    }
}

/// Renders a [`ProgressState`] onto the page.
pub trait ProgressView {
    fn render(&self, state: &ProgressState);
}

/// Labeled percentage overlay.
///
/// Both operations are idempotent and simply overwrite what is displayed.
/// Percentages are clamped to `0..=100`; NaN shows as 0.
pub struct ProgressIndicator<V> {
    view: V,
    state: RefCell<ProgressState>,
}

impl<V: ProgressView> ProgressIndicator<V> {
    pub fn new(view: V) -> Self {
        Self {
            view,
            state: RefCell::new(ProgressState::default()),
        }
    }

    pub fn show(&self, label: &str, percent: f64) {
        let percent = if percent.is_nan() {
            0.0
        } else {
            percent.clamp(0.0, 100.0)
        };
        self.apply(ProgressState {
            visible: true,
            label: label.to_string(),
            percent,
        });
    }

    /// Hide the overlay and reset fill and percentage to zero.
    pub fn hide(&self) {
        let label = self.state.borrow().label.clone();
        self.apply(ProgressState {
            visible: false,
            label,
            percent: 0.0,
        });
    }

    #[cfg(test)]
    pub fn state(&self) -> ProgressState {
        self.state.borrow().clone()
    }

    #[cfg(test)]
    pub fn view(&self) -> &V {
        &self.view
    }

    fn apply(&self, state: ProgressState) {
        self.view.render(&state);
        *self.state.borrow_mut() = state;
    }
}
