//! Shared color constants for the UI.

use egui::Color32;

/// Emerald for success and the "Copied" state.
pub const COLOR_GREEN: Color32 = Color32::from_rgb(16, 185, 129);

/// Red for the upload error banner.
pub const COLOR_RED: Color32 = Color32::from_rgb(220, 53, 69);

/// Indigo accent used for the active drop zone and links.
pub const COLOR_ACCENT: Color32 = Color32::from_rgb(99, 102, 241);

/// Muted slate for secondary text and idle borders.
pub const COLOR_MUTED: Color32 = Color32::from_rgb(100, 116, 139);
