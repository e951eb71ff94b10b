//! egui components for the CertInk template editor.
//!
//! - **PageCanvas**: the interactive certificate page (select, drag, resize)
//! - **InspectorPanel**: the property panel bound to the current selection
//! - **EditorToolbar**: save and preview actions with the in-flight save state
//! - **Layout**: section labels, separators and panel frames

pub mod canvas;
pub mod inspector;
pub mod layout;
pub mod toolbar;

pub use canvas::{PageCanvas, PageTransform};
pub use inspector::InspectorPanel;
pub use layout::{field_label, section_label, separator, toolbar_frame};
pub use toolbar::{EditorToolbar, TextButton, ToolbarAction, ToolbarOutput};

/// Standard sizing constants used across widgets.
pub mod sizing {
    /// Side length of the resize handle, in screen pixels
    pub const HANDLE: f32 = 8.0;
    /// Minimum on-screen page width
    pub const MIN_PAGE_WIDTH: f32 = 120.0;
    /// Width of the inspector side panel
    pub const INSPECTOR_WIDTH: f32 = 260.0;
    /// Desk area painted around the page
    pub const DESK_MARGIN: f32 = 12.0;
    /// Height of toolbar buttons
    pub const BUTTON_HEIGHT: f32 = 24.0;
    /// Corner radius for buttons
    pub const CORNER_RADIUS: u8 = 4;
    /// Corner radius for panels
    pub const PANEL_RADIUS: u8 = 8;
}

/// Standard colors used across widgets.
pub mod theme {
    use egui::Color32;

    /// Text color (dark gray)
    pub const TEXT: Color32 = Color32::from_rgb(60, 60, 60);
    /// Muted text color
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(120, 120, 120);
    /// Border color
    pub const BORDER: Color32 = Color32::from_rgb(220, 220, 220);
    /// Selection/active color (blue)
    pub const ACCENT: Color32 = Color32::from_rgb(59, 130, 246);
    /// Image placeholder fill
    pub const IMAGE_BG: Color32 = Color32::from_rgb(241, 245, 249);
    /// Hover background
    pub const HOVER_BG: Color32 = Color32::from_gray(245);
    /// Panel background
    pub const PANEL_BG: Color32 = Color32::WHITE;
    /// Area around the page
    pub const DESK_BG: Color32 = Color32::from_rgb(229, 231, 235);
}

#[cfg(test)]
mod testing;
