//! Shared constants used across QReview crates.

/// Default base URL of the review API.
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Maximum number of characters of question text shown in a selector label.
pub const SELECTOR_TEXT_MAX_CHARS: usize = 100;

/// Number of characters of a model error shown in the predictions panel.
pub const PREDICTION_ERROR_PREVIEW_CHARS: usize = 50;

/// Minimum horizontal drag distance (logical pixels) recognized as a swipe.
pub const SWIPE_THRESHOLD_PX: f32 = 50.0;

/// Fixed category palette; categories are assigned colors by first-appearance index.
pub const CATEGORY_PALETTE: [&str; 8] = [
    "#4c6fff", "#6f42c1", "#20c997", "#8c510a", "#e83e8c", "#6c757d", "#17a2b8", "#6610f2",
];

/// Color used for categories missing from the palette map.
pub const FALLBACK_CATEGORY_COLOR: &str = "#344767";

/// Durable storage key holding the JSON filter snapshot.
pub const STORAGE_KEY_FILTERS: &str = "dashboardFilters";
/// Durable storage key holding the last file-path filter.
pub const STORAGE_KEY_LAST_FILE_FILTER: &str = "lastFilePathFilter";
/// Durable storage key holding the correction-mode toggle.
pub const STORAGE_KEY_CORRECTION_MODE: &str = "correction-mode";
/// Durable storage key holding the last page chosen in the image browser.
pub const STORAGE_KEY_LAST_IMAGE_PAGE: &str = "lastImagePage";
/// Durable storage key holding the last file chosen in the image browser.
pub const STORAGE_KEY_LAST_IMAGE_FILE: &str = "lastImageFile";

/// Sentinel used by persisted filters for "no restriction".
pub const FILTER_ALL: &str = "all";
