//! Action menu - global actions reachable from any page

/// Entries of the action menu, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    NewTab,
    Downloads,
    Settings,
    Restart,
    Quit,
}

impl MenuItem {
    pub const ALL: [MenuItem; 5] = [
        MenuItem::NewTab,
        MenuItem::Downloads,
        MenuItem::Settings,
        MenuItem::Restart,
        MenuItem::Quit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MenuItem::NewTab => "New tab",
            MenuItem::Downloads => "Downloads",
            MenuItem::Settings => "Settings",
            MenuItem::Restart => "Restart (not implemented)",
            MenuItem::Quit => "Quit",
        }
    }
}

/// Open/closed state and selection of the action menu
#[derive(Debug, Default)]
pub struct ActionMenu {
    pub open: bool,
    pub selected: usize,
}

impl ActionMenu {
    pub fn show(&mut self) {
        self.open = true;
        self.selected = 0;
    }

    pub fn hide(&mut self) {
        self.open = false;
    }

    pub fn next(&mut self) {
        self.selected = (self.selected + 1) % MenuItem::ALL.len();
    }

    pub fn prev(&mut self) {
        self.selected = self
            .selected
            .checked_sub(1)
            .unwrap_or(MenuItem::ALL.len() - 1);
    }

    pub fn selected_item(&self) -> MenuItem {
        MenuItem::ALL[self.selected]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_wraps_both_ways() {
        let mut menu = ActionMenu::default();
        menu.show();
        menu.prev();
        assert_eq!(menu.selected_item(), MenuItem::Quit);
        menu.next();
        assert_eq!(menu.selected_item(), MenuItem::NewTab);
    }

    #[test]
    fn test_show_resets_selection() {
        let mut menu = ActionMenu::default();
        menu.show();
        menu.next();
        menu.hide();
        menu.show();
        assert_eq!(menu.selected_item(), MenuItem::NewTab);
    }
}
