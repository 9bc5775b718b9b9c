//! Render state - data structure sent from App layer to UI for rendering

use crate::pages::{FocusTarget, PageKind};

/// One tab as shown in the tab bar
#[derive(Debug, Clone)]
pub struct TabSnapshot {
    pub title: String,
    pub kind: PageKind,
}

/// What the content area of a content page currently displays
#[derive(Debug, Clone)]
pub enum SurfaceView {
    /// Engine created but not yet safe to command; placeholder shown
    Starting,
    /// Live render surface
    Live { title: String, address: String },
    /// Static crash placeholder
    Crashed,
}

/// Snapshot of a content page and its navigation bar
#[derive(Debug, Clone)]
pub struct ContentView {
    pub entry: String,
    pub entry_cursor: usize,
    pub search: String,
    pub search_cursor: usize,
    pub focus: FocusTarget,
    pub progress: f64,
    pub back_enabled: bool,
    pub forward_enabled: bool,
    pub surface: SurfaceView,
}

/// Snapshot of the visible page
#[derive(Debug, Clone)]
pub enum PageView {
    Content(ContentView),
    Downloads,
    Settings,
}

/// Complete state needed by the UI to render
#[derive(Debug, Clone, Default)]
pub struct RenderState {
    pub tabs: Vec<TabSnapshot>,
    pub active: usize,
    pub view: Option<PageView>,

    // Popups
    pub menu_open: bool,
    pub menu_selected: usize,
    pub show_help: bool,

    /// Whether keystrokes currently go to an entry of the visible page
    pub editing: bool,
}
