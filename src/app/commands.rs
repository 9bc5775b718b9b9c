//! Shell commands - state mutations triggered by UI events
//!
//! Each method is one user-visible action. Fallible actions return
//! `Result`; the actor logs failures and keeps running.

use anyhow::Result;
use tracing::info;

use crate::app::state::ShellState;
use crate::pages::{PageDescription, PageId};

impl ShellState {
    // ========================
    // Tab management
    // ========================

    /// Open a blank tab and focus it. Returns the spawned page id so the
    /// caller can schedule its grace timer.
    pub fn new_tab(&mut self) -> Result<Option<PageId>> {
        let opened = self.manager.open_page(PageDescription::blank())?;
        self.manager.focus_page_at(opened.index);
        Ok(opened.spawned)
    }

    pub fn close_tab(&mut self) -> Result<Option<PageId>> {
        self.manager.close_active()
    }

    pub fn next_tab(&mut self) {
        self.manager.focus_next();
    }

    pub fn prev_tab(&mut self) {
        self.manager.focus_prev();
    }

    pub fn focus_tab(&mut self, index: usize) {
        self.manager.focus_page_at(index);
    }

    pub fn move_tab_left(&mut self) {
        self.manager.move_active(-1);
    }

    pub fn move_tab_right(&mut self) {
        self.manager.move_active(1);
    }

    // ========================
    // Focus and entry editing
    // ========================
    // These only apply to content pages; on a placeholder page they are
    // no-ops.

    pub fn cycle_focus(&mut self) {
        if let Some(page) = self.manager.active_content_mut() {
            page.cycle_focus();
        }
    }

    pub fn focus_address(&mut self) {
        if let Some(page) = self.manager.active_content_mut() {
            page.focus_address();
        }
    }

    pub fn focus_search(&mut self) {
        if let Some(page) = self.manager.active_content_mut() {
            page.focus_search();
        }
    }

    pub fn stop_editing(&mut self) {
        if let Some(page) = self.manager.active_content_mut() {
            page.focus_surface();
        }
    }

    pub fn char_input(&mut self, c: char) {
        if let Some(page) = self.manager.active_content_mut() {
            page.insert_char(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(page) = self.manager.active_content_mut() {
            page.backspace();
        }
    }

    pub fn cursor_left(&mut self) {
        if let Some(page) = self.manager.active_content_mut() {
            page.cursor_left();
        }
    }

    pub fn cursor_right(&mut self) {
        if let Some(page) = self.manager.active_content_mut() {
            page.cursor_right();
        }
    }

    pub fn activate(&mut self) {
        if let Some(page) = self.manager.active_content_mut() {
            page.activate();
        }
    }

    pub fn reload(&mut self) {
        if let Some(page) = self.manager.active_content_mut() {
            page.reload();
        }
    }

    // ========================
    // Action menu
    // ========================

    pub fn open_menu(&mut self) {
        self.menu.show();
    }

    pub fn close_menu(&mut self) {
        self.menu.hide();
    }

    pub fn menu_next(&mut self) {
        self.menu.next();
    }

    pub fn menu_prev(&mut self) {
        self.menu.prev();
    }

    pub fn open_downloads(&mut self) -> Result<()> {
        let opened = self.manager.open_page(PageDescription::Downloads)?;
        self.manager.focus_page_at(opened.index);
        Ok(())
    }

    pub fn open_settings(&mut self) -> Result<()> {
        let opened = self.manager.open_page(PageDescription::Settings)?;
        self.manager.focus_page_at(opened.index);
        Ok(())
    }

    pub fn restart(&mut self) {
        info!("restart requested, not implemented");
    }

    // ========================
    // Help popup
    // ========================

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }
}
