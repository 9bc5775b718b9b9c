//! Shell state - everything the app actor mutates

use tokio::sync::mpsc;

use crate::app::menu::ActionMenu;
use crate::messages::render::RenderState;
use crate::messages::renderer::RendererCommand;
use crate::pages::{PageDescription, PageId, PageManager};

/// Central state of the browser shell. Owned and mutated by the app
/// actor only; the UI sees it through [`RenderState`] snapshots.
#[derive(Debug)]
pub struct ShellState {
    pub manager: PageManager,
    pub menu: ActionMenu,
    pub show_help: bool,
}

impl ShellState {
    /// Restore state from a session. Returns the spawned content page
    /// ids so the caller can schedule their grace timers.
    pub fn new(
        session: Vec<PageDescription>,
        renderer_tx: mpsc::UnboundedSender<RendererCommand>,
    ) -> (Self, Vec<PageId>) {
        let (manager, spawned) = PageManager::new(session, renderer_tx);
        let state = ShellState {
            manager,
            menu: ActionMenu::default(),
            show_help: false,
        };
        (state, spawned)
    }

    /// Whether keystrokes currently go to an entry of the visible page
    pub fn editing(&self) -> bool {
        match self.manager.active_page() {
            crate::pages::Page::Content(page) => page.editing(),
            _ => false,
        }
    }

    /// Produce the snapshot the UI draws from
    pub fn to_render_state(&self) -> RenderState {
        RenderState {
            tabs: self.manager.tabs(),
            active: self.manager.active_index(),
            view: Some(self.manager.active_view()),
            menu_open: self.menu.open,
            menu_selected: self.menu.selected,
            show_help: self.show_help,
            editing: self.editing(),
        }
    }
}
