//! Navigation bar - address and search entries for a content page

/// Navigation bar state owned by one content page.
///
/// Holds the address entry, the search entry, and the navigation buttons.
/// Back and forward start disabled; the engine exposes no history
/// operations, so they stay display-only.
#[derive(Debug, Clone)]
pub struct NavigationBar {
    address: String,
    address_cursor: usize,
    address_focused: bool,
    search: String,
    search_cursor: usize,
    search_focused: bool,
    progress: f64,
    pub back_enabled: bool,
    pub forward_enabled: bool,
    pub stop_enabled: bool,
    pub reload_enabled: bool,
}

impl Default for NavigationBar {
    fn default() -> Self {
        Self::new()
    }
}

impl NavigationBar {
    pub fn new() -> Self {
        NavigationBar {
            address: String::new(),
            address_cursor: 0,
            address_focused: false,
            search: String::new(),
            search_cursor: 0,
            search_focused: false,
            progress: 0.0,
            back_enabled: false,
            forward_enabled: false,
            stop_enabled: true,
            reload_enabled: true,
        }
    }

    pub fn address_text(&self) -> &str {
        &self.address
    }

    pub fn search_text(&self) -> &str {
        &self.search
    }

    pub fn address_cursor(&self) -> usize {
        self.address_cursor
    }

    pub fn search_cursor(&self) -> usize {
        self.search_cursor
    }

    pub fn address_focused(&self) -> bool {
        self.address_focused
    }

    pub fn search_focused(&self) -> bool {
        self.search_focused
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Replace the address entry text. Suppressed while the entry has
    /// input focus so engine updates never clobber an in-progress edit.
    pub fn set_address_text(&mut self, text: &str) {
        if self.address_focused {
            return;
        }
        self.address = text.to_string();
        self.address_cursor = self.address.len();
    }

    pub fn set_address_focused(&mut self, focused: bool) {
        self.address_focused = focused;
        if focused {
            self.address_cursor = self.address.len();
        }
    }

    pub fn set_search_focused(&mut self, focused: bool) {
        self.search_focused = focused;
        if focused {
            self.search_cursor = self.search.len();
        }
    }

    pub fn set_progress(&mut self, fraction: f64) {
        self.progress = fraction.clamp(0.0, 1.0);
    }

    pub fn reset_progress(&mut self) {
        self.progress = 0.0;
    }

    // ========================
    // Entry editing
    // ========================
    // Cursors are byte offsets kept on char boundaries. Edits go to
    // whichever entry currently has focus.

    pub fn insert_char(&mut self, c: char) {
        if let Some((input, cursor)) = self.focused_field() {
            if *cursor <= input.len() {
                input.insert(*cursor, c);
                *cursor += c.len_utf8();
            }
        }
    }

    pub fn backspace(&mut self) {
        if let Some((input, cursor)) = self.focused_field() {
            if *cursor > 0 {
                let prev = input[..*cursor]
                    .char_indices()
                    .last()
                    .map(|(i, _)| i)
                    .unwrap_or(0);
                input.remove(prev);
                *cursor = prev;
            }
        }
    }

    pub fn cursor_left(&mut self) {
        if let Some((input, cursor)) = self.focused_field() {
            if *cursor > 0 {
                *cursor = input[..*cursor]
                    .char_indices()
                    .last()
                    .map(|(i, _)| i)
                    .unwrap_or(0);
            }
        }
    }

    pub fn cursor_right(&mut self) {
        if let Some((input, cursor)) = self.focused_field() {
            if *cursor < input.len() {
                *cursor = input[*cursor..]
                    .char_indices()
                    .nth(1)
                    .map(|(i, _)| *cursor + i)
                    .unwrap_or(input.len());
            }
        }
    }

    fn focused_field(&mut self) -> Option<(&mut String, &mut usize)> {
        if self.address_focused {
            Some((&mut self.address, &mut self.address_cursor))
        } else if self.search_focused {
            Some((&mut self.search, &mut self.search_cursor))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_text_suppressed_while_focused() {
        let mut navbar = NavigationBar::new();
        navbar.set_address_focused(true);
        navbar.insert_char('e');
        navbar.insert_char('x');
        navbar.set_address_text("https://pushed.example.com");
        assert_eq!(navbar.address_text(), "ex");

        navbar.set_address_focused(false);
        navbar.set_address_text("https://pushed.example.com");
        assert_eq!(navbar.address_text(), "https://pushed.example.com");
    }

    #[test]
    fn test_editing_is_utf8_safe() {
        let mut navbar = NavigationBar::new();
        navbar.set_address_focused(true);
        for c in "héllo".chars() {
            navbar.insert_char(c);
        }
        assert_eq!(navbar.address_text(), "héllo");
        navbar.backspace();
        navbar.backspace();
        assert_eq!(navbar.address_text(), "hél");
        navbar.cursor_left();
        navbar.cursor_left();
        navbar.insert_char('a');
        assert_eq!(navbar.address_text(), "haél");
    }

    #[test]
    fn test_edits_ignored_without_focus() {
        let mut navbar = NavigationBar::new();
        navbar.insert_char('x');
        navbar.backspace();
        assert_eq!(navbar.address_text(), "");
        assert_eq!(navbar.search_text(), "");
    }

    #[test]
    fn test_progress_is_clamped() {
        let mut navbar = NavigationBar::new();
        navbar.set_progress(1.5);
        assert_eq!(navbar.progress(), 1.0);
        navbar.reset_progress();
        assert_eq!(navbar.progress(), 0.0);
    }
}
