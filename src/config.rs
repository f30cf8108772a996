//! Page configuration.
//!
//! Centralizes the constants the page script binds to and the runtime
//! [`PageConfig`] that can override them from an inline JSON document.

use serde::Deserialize;

use crate::core::error::BindError;

// =============================================================================
// Element Identifiers
// =============================================================================

/// Container holding the rendered grid items.
pub const GRID_ID: &str = "fileGrid";

/// Class shared by every grid item.
pub const ITEM_CLASS: &str = "item";

/// Selection mode toggle button.
pub const SELECT_TOGGLE_ID: &str = "select-toggle-btn";

/// Bulk action bar shown while items are selected.
pub const ACTION_BAR_ID: &str = "action-bar";

/// Label inside the action bar showing the selected count.
pub const SELECTED_COUNT_ID: &str = "selected-count";

/// Bulk download button inside the action bar.
pub const DOWNLOAD_BUTTON_ID: &str = "download-selected-btn";

/// Optional button that clears the selection.
pub const CLEAR_BUTTON_ID: &str = "clear-selection-btn";

/// Optional `<select>` driving the grid sort.
pub const SORT_SELECT_ID: &str = "sort-select";

/// Attribute carrying the sort criterion on sort buttons.
pub const SORT_ATTRIBUTE: &str = "data-sort";

/// File input of the upload form.
pub const FILE_INPUT_ID: &str = "file-upload-input";

/// Submit button of the upload form.
pub const UPLOAD_BUTTON_ID: &str = "push-server-btn";

/// Selector for the upload form.
pub const UPLOAD_FORM_SELECTOR: &str = ".upload-section form";

/// Inline JSON document overriding [`PageConfig`] defaults.
pub const CONFIG_SCRIPT_ID: &str = "invifile-config";

/// Progress overlay sub-elements.
pub mod progress_ids {
    pub const OVERLAY: &str = "progress-overlay";
    pub const LABEL: &str = "progress-label";
    pub const FILL: &str = "progress-bar-fill";
    pub const PERCENT: &str = "progress-percent";
}

/// Class toggled on elements that are shown or highlighted.
pub const ACTIVE_CLASS: &str = "active";

/// Class toggled on selected grid items.
pub const SELECTED_CLASS: &str = "selected";

// =============================================================================
// Labels
// =============================================================================

/// Toggle label while selection mode is off.
pub const SELECT_LABEL: &str = "SELECT ITEMS";

/// Toggle label while selection mode is on.
pub const CANCEL_SELECT_LABEL: &str = "CANCEL SELECTION";

/// Suffix of the selected counter (`"3 SELECTED"`).
pub const SELECTED_SUFFIX: &str = "SELECTED";

/// Progress label for uploads.
pub const UPLOAD_LABEL: &str = "UPLOADING...";

/// Progress label for downloads.
pub const DOWNLOAD_LABEL: &str = "DOWNLOADING...";

/// Failure notices.
pub mod notices {
    pub const UPLOAD_FAILED: &str = "Upload failed";
    pub const UPLOAD_ERROR: &str = "Upload error";
    pub const DOWNLOAD_FAILED: &str = "Download failed";
    pub const DOWNLOAD_ERROR: &str = "Download error";
}

// =============================================================================
// Transfer Configuration
// =============================================================================

/// Endpoint that bundles the selected paths into one archive.
pub const BUNDLE_ENDPOINT: &str = "/zip";

/// Repeated query parameter carrying one selected path.
pub const BUNDLE_PARAM: &str = "p";

/// File name given to the saved archive.
pub const ARCHIVE_NAME: &str = "invifiles_bundle.zip";

/// MIME type of the saved archive.
pub const ARCHIVE_MIME: &str = "application/zip";

/// Percent shown while the server does not report a content length.
pub const INDETERMINATE_PERCENT: f64 = 50.0;

// =============================================================================
// URL Notices
// =============================================================================

/// Query parameter inspected on load.
pub const ERROR_PARAM: &str = "error";

/// Known error codes and the message each one surfaces.
pub const ERROR_MESSAGES: &[(&str, &str)] = &[("empty", "Can't upload empty file")];

// =============================================================================
// Runtime Configuration
// =============================================================================

/// How the bulk download is carried out.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DownloadMode {
    /// Binary request with progress, saved through an object URL.
    #[default]
    Monitored,
    /// Plain navigation to the bundle URL; the browser handles the download.
    Direct,
}

/// Runtime page configuration.
///
/// Every field falls back to the constants above, so an empty JSON object
/// (or no config script at all) yields the stock page layout.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub grid_id: String,
    pub item_class: String,
    pub bundle_endpoint: String,
    pub bundle_param: String,
    pub archive_name: String,
    pub download_mode: DownloadMode,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            grid_id: GRID_ID.to_string(),
            item_class: ITEM_CLASS.to_string(),
            bundle_endpoint: BUNDLE_ENDPOINT.to_string(),
            bundle_param: BUNDLE_PARAM.to_string(),
            archive_name: ARCHIVE_NAME.to_string(),
            download_mode: DownloadMode::default(),
        }
    }
}

impl PageConfig {
    /// Parse a config document, filling absent fields with defaults.
    pub fn from_json(json: &str) -> Result<Self, BindError> {
        serde_json::from_str(json).map_err(|e| BindError::InvalidConfig(e.to_string()))
    }
}
