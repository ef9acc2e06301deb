//! UI panel modules extracted from the main app update loop.

/// Question detail panel: badges, actions, choices, predictions, navigation.
pub(super) mod detail_panel;
/// Alert and confirmation dialogs.
pub(super) mod dialogs;
/// Inline edit form for the selected question.
pub(super) mod edit_form;
/// Image viewer, page browser, and preview modals.
pub(super) mod image_modals;
/// Top bar, filters, and question selector.
pub(super) mod sidebar;
/// Bottom status bar content.
pub(super) mod status_bar;
/// Transient toast notifications.
pub(super) mod toasts;
