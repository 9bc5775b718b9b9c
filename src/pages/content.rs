//! Content page - one engine instance plus its navigation bar
//!
//! A content page reconciles three things into one coherent visible
//! state: user edits in the navigation bar, engine lifecycle events, and
//! the engine's start-up grace period.

use tokio::sync::mpsc;
use tracing::debug;

use crate::address;
use crate::constants::{ABOUT_BLANK, DEFAULT_TITLE};
use crate::messages::render::{ContentView, SurfaceView};
use crate::messages::renderer::{LoadPhase, RendererCommand, RendererEvent};
use crate::pages::navbar::NavigationBar;
use crate::pages::PageId;

/// Engine lifecycle state of a content page.
///
/// `Crashed` is terminal: there is no recovery transition, a crashed
/// engine stays crashed for the lifetime of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// Engine created, first navigation held back until the grace period
    StartingUp,
    /// Engine accepting navigation commands
    Ready,
    /// Engine process died
    Crashed,
}

/// Focusable controls inside a content page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    AddressEntry,
    SearchEntry,
    Surface,
}

/// A page for displaying and navigating web content. The navigation bar
/// sits on top; the engine's render surface fills the rest of the tab.
#[derive(Debug)]
pub struct ContentPage {
    id: PageId,
    address: String,
    title: String,
    state: LoadState,
    /// Navigation requested before the engine became ready
    pending_address: Option<String>,
    navbar: NavigationBar,
    /// Tabbing order; switching tabs always focuses the first element
    focus_chain: [FocusTarget; 3],
    focused: FocusTarget,
    renderer_tx: mpsc::UnboundedSender<RendererCommand>,
}

impl ContentPage {
    /// Create a page in `StartingUp` and request an engine instance. The
    /// initial navigation is held back; the caller schedules a grace
    /// timer and calls `grace_elapsed` when it fires.
    pub fn new(
        id: PageId,
        address: &str,
        renderer_tx: mpsc::UnboundedSender<RendererCommand>,
    ) -> Self {
        let mut page = ContentPage {
            id,
            address: String::new(),
            title: String::from(DEFAULT_TITLE),
            state: LoadState::StartingUp,
            pending_address: Some(address.to_string()),
            navbar: NavigationBar::new(),
            focus_chain: [
                FocusTarget::AddressEntry,
                FocusTarget::SearchEntry,
                FocusTarget::Surface,
            ],
            focused: FocusTarget::AddressEntry,
            renderer_tx,
        };
        page.send(RendererCommand::Create { page: id });
        page.set_address(address);
        page.focus_first();
        page
    }

    pub fn id(&self) -> PageId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn focused(&self) -> FocusTarget {
        self.focused
    }

    pub fn navbar(&self) -> &NavigationBar {
        &self.navbar
    }

    /// Whether keystrokes should be routed to one of the entries
    pub fn editing(&self) -> bool {
        matches!(
            self.focused,
            FocusTarget::AddressEntry | FocusTarget::SearchEntry
        )
    }

    fn send(&self, cmd: RendererCommand) {
        // The receiver only goes away during shutdown
        let _ = self.renderer_tx.send(cmd);
    }

    // ========================
    // State machine
    // ========================

    /// The start-up grace period elapsed: reveal the render surface and
    /// issue the held-back navigation. No-op unless still `StartingUp`,
    /// so a crash before the timer fires wins.
    pub fn grace_elapsed(&mut self) {
        if self.state != LoadState::StartingUp {
            debug!(page = %self.id, state = ?self.state, "grace period elapsed on settled page");
            return;
        }
        self.state = LoadState::Ready;
        self.send(RendererCommand::Show { page: self.id });
        if let Some(address) = self.pending_address.take() {
            self.send(RendererCommand::Navigate {
                page: self.id,
                address,
            });
        }
    }

    /// Command the engine to load an address. Queued while `StartingUp`,
    /// ignored once `Crashed`.
    pub fn load_address(&mut self, address: &str) {
        match self.state {
            LoadState::StartingUp => self.pending_address = Some(address.to_string()),
            LoadState::Ready => self.send(RendererCommand::Navigate {
                page: self.id,
                address: address.to_string(),
            }),
            LoadState::Crashed => {
                debug!(page = %self.id, address, "navigation ignored on crashed page");
            }
        }
    }

    /// Apply an engine event to the page state
    pub fn handle_event(&mut self, event: RendererEvent) {
        match event {
            RendererEvent::LoadChanged { phase, .. } => {
                if phase == LoadPhase::Finished {
                    self.navbar.reset_progress();
                }
            }
            RendererEvent::LoadFailed { message, .. } => {
                debug!(page = %self.id, message, "load failed");
                self.navbar.reset_progress();
            }
            RendererEvent::ProcessCrashed { .. } => self.crash(),
            RendererEvent::ProgressChanged { fraction, .. } => {
                if self.address != ABOUT_BLANK {
                    self.navbar.set_progress(fraction);
                }
            }
            RendererEvent::AddressChanged { address, .. } => {
                // The whole update is suppressed while the user is editing
                // the entry; the engine value would clobber keystrokes.
                if !self.navbar.address_focused() {
                    self.set_address(&address);
                }
            }
            RendererEvent::TitleChanged { title, .. } => self.title = title,
        }
    }

    /// Switch to the crash placeholder. Idempotent; safe on repeated
    /// crash notifications.
    fn crash(&mut self) {
        self.state = LoadState::Crashed;
        self.navbar.reset_progress();
    }

    /// Set the page address, update the entry text, and rebuild the
    /// focus chain. Blank pages lead with the address entry (there is
    /// nothing to read on the surface); loaded pages lead with the
    /// surface. The chain must stay correct proactively because tab
    /// switches always focus its first element.
    fn set_address(&mut self, address: &str) {
        self.address = address.to_string();
        if address == ABOUT_BLANK {
            self.focus_chain = [
                FocusTarget::AddressEntry,
                FocusTarget::SearchEntry,
                FocusTarget::Surface,
            ];
            self.navbar.reset_progress();
            self.navbar.set_address_text("");
        } else {
            self.focus_chain = [
                FocusTarget::Surface,
                FocusTarget::AddressEntry,
                FocusTarget::SearchEntry,
            ];
            self.navbar.set_address_text(address);
        }
    }

    // ========================
    // Focus
    // ========================

    pub fn focus_first(&mut self) {
        self.set_focus(self.focus_chain[0]);
    }

    pub fn cycle_focus(&mut self) {
        let pos = self
            .focus_chain
            .iter()
            .position(|target| *target == self.focused)
            .unwrap_or(0);
        self.set_focus(self.focus_chain[(pos + 1) % self.focus_chain.len()]);
    }

    pub fn focus_address(&mut self) {
        self.set_focus(FocusTarget::AddressEntry);
    }

    pub fn focus_search(&mut self) {
        self.set_focus(FocusTarget::SearchEntry);
    }

    pub fn focus_surface(&mut self) {
        self.set_focus(FocusTarget::Surface);
    }

    fn set_focus(&mut self, target: FocusTarget) {
        self.focused = target;
        self.navbar
            .set_address_focused(target == FocusTarget::AddressEntry);
        self.navbar
            .set_search_focused(target == FocusTarget::SearchEntry);
    }

    // ========================
    // Entry editing / activation
    // ========================

    pub fn insert_char(&mut self, c: char) {
        self.navbar.insert_char(c);
    }

    pub fn backspace(&mut self) {
        self.navbar.backspace();
    }

    pub fn cursor_left(&mut self) {
        self.navbar.cursor_left();
    }

    pub fn cursor_right(&mut self) {
        self.navbar.cursor_right();
    }

    /// Enter pressed: navigate to the focused entry's content and hand
    /// focus to the render surface.
    pub fn activate(&mut self) {
        match self.focused {
            FocusTarget::AddressEntry => {
                let text = self.navbar.address_text().trim();
                if text.is_empty() {
                    return;
                }
                let target = address::normalize(text);
                self.focus_surface();
                self.load_address(&target);
            }
            FocusTarget::SearchEntry => {
                let query = self.navbar.search_text().trim();
                if query.is_empty() {
                    return;
                }
                let target = address::search_url(query);
                self.focus_surface();
                self.load_address(&target);
            }
            FocusTarget::Surface => {}
        }
    }

    /// Re-issue navigation for the current address
    pub fn reload(&mut self) {
        if self.address != ABOUT_BLANK {
            let target = self.address.clone();
            self.load_address(&target);
        }
    }

    pub fn view(&self) -> ContentView {
        ContentView {
            entry: self.navbar.address_text().to_string(),
            entry_cursor: self.navbar.address_cursor(),
            search: self.navbar.search_text().to_string(),
            search_cursor: self.navbar.search_cursor(),
            focus: self.focused,
            progress: self.navbar.progress(),
            back_enabled: self.navbar.back_enabled,
            forward_enabled: self.navbar.forward_enabled,
            surface: match self.state {
                LoadState::StartingUp => SurfaceView::Starting,
                LoadState::Ready => SurfaceView::Live {
                    title: self.title.clone(),
                    address: self.address.clone(),
                },
                LoadState::Crashed => SurfaceView::Crashed,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_at(address: &str) -> (ContentPage, mpsc::UnboundedReceiver<RendererCommand>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (ContentPage::new(PageId::new(1), address, tx), rx)
    }

    fn drain(rx: &mut mpsc::UnboundedReceiver<RendererCommand>) -> Vec<RendererCommand> {
        let mut cmds = Vec::new();
        while let Ok(cmd) = rx.try_recv() {
            cmds.push(cmd);
        }
        cmds
    }

    fn navigations(cmds: &[RendererCommand]) -> Vec<String> {
        cmds.iter()
            .filter_map(|cmd| match cmd {
                RendererCommand::Navigate { address, .. } => Some(address.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_starts_up_without_navigating() {
        let (page, mut rx) = page_at("https://example.com");
        assert_eq!(page.state(), LoadState::StartingUp);
        let cmds = drain(&mut rx);
        assert!(matches!(cmds.as_slice(), [RendererCommand::Create { .. }]));
    }

    #[test]
    fn test_grace_issues_exactly_one_navigation() {
        let (mut page, mut rx) = page_at(ABOUT_BLANK);
        page.load_address("https://example.com");
        page.grace_elapsed();
        page.grace_elapsed(); // a second timer must not re-navigate
        assert_eq!(page.state(), LoadState::Ready);
        assert_eq!(
            navigations(&drain(&mut rx)),
            vec![String::from("https://example.com")]
        );
    }

    #[test]
    fn test_crash_before_grace_wins() {
        let (mut page, mut rx) = page_at("https://example.com");
        page.handle_event(RendererEvent::ProcessCrashed { page: page.id() });
        page.grace_elapsed();
        assert_eq!(page.state(), LoadState::Crashed);
        assert!(navigations(&drain(&mut rx)).is_empty());
    }

    #[test]
    fn test_crash_is_idempotent() {
        let (mut page, _rx) = page_at("https://example.com");
        page.handle_event(RendererEvent::ProcessCrashed { page: page.id() });
        page.handle_event(RendererEvent::ProcessCrashed { page: page.id() });
        assert_eq!(page.state(), LoadState::Crashed);
    }

    #[test]
    fn test_crashed_page_ignores_navigation() {
        let (mut page, mut rx) = page_at("https://example.com");
        page.grace_elapsed();
        drain(&mut rx);
        page.handle_event(RendererEvent::ProcessCrashed { page: page.id() });
        page.load_address("https://elsewhere.example.com");
        assert!(navigations(&drain(&mut rx)).is_empty());
    }

    #[test]
    fn test_focused_entry_is_never_clobbered() {
        let (mut page, _rx) = page_at(ABOUT_BLANK);
        page.focus_address();
        for c in "exam".chars() {
            page.insert_char(c);
        }
        page.handle_event(RendererEvent::AddressChanged {
            page: page.id(),
            address: String::from("https://ads.example.com"),
        });
        assert_eq!(page.navbar().address_text(), "exam");
        // the whole update is suppressed, internal address included
        assert_eq!(page.address(), ABOUT_BLANK);
    }

    #[test]
    fn test_blank_page_leads_with_address_entry() {
        let (mut page, _rx) = page_at(ABOUT_BLANK);
        page.focus_first();
        assert_eq!(page.focused(), FocusTarget::AddressEntry);

        page.focus_surface();
        page.handle_event(RendererEvent::AddressChanged {
            page: page.id(),
            address: String::from("https://example.com"),
        });
        page.focus_first();
        assert_eq!(page.focused(), FocusTarget::Surface);
    }

    #[test]
    fn test_progress_not_tracked_for_blank_page() {
        let (mut page, _rx) = page_at(ABOUT_BLANK);
        page.focus_surface();
        page.handle_event(RendererEvent::ProgressChanged {
            page: page.id(),
            fraction: 0.5,
        });
        assert_eq!(page.navbar().progress(), 0.0);
    }

    #[test]
    fn test_load_finished_resets_progress() {
        let (mut page, _rx) = page_at("https://example.com");
        page.focus_surface();
        page.handle_event(RendererEvent::AddressChanged {
            page: page.id(),
            address: String::from("https://example.com"),
        });
        page.handle_event(RendererEvent::ProgressChanged {
            page: page.id(),
            fraction: 0.7,
        });
        assert_eq!(page.navbar().progress(), 0.7);
        page.handle_event(RendererEvent::LoadChanged {
            page: page.id(),
            phase: LoadPhase::Finished,
        });
        assert_eq!(page.navbar().progress(), 0.0);
    }

    #[test]
    fn test_title_change_updates_tab_title() {
        let (mut page, _rx) = page_at("https://example.com");
        page.handle_event(RendererEvent::TitleChanged {
            page: page.id(),
            title: String::from("Example Domain"),
        });
        assert_eq!(page.title(), "Example Domain");
    }

    #[test]
    fn test_activation_navigates_and_focuses_surface() {
        let (mut page, mut rx) = page_at(ABOUT_BLANK);
        page.grace_elapsed();
        drain(&mut rx);
        page.focus_address();
        for c in "example.com".chars() {
            page.insert_char(c);
        }
        page.activate();
        assert_eq!(page.focused(), FocusTarget::Surface);
        assert_eq!(
            navigations(&drain(&mut rx)),
            vec![String::from("https://example.com")]
        );
    }

    #[test]
    fn test_search_activation_builds_query() {
        let (mut page, mut rx) = page_at(ABOUT_BLANK);
        page.grace_elapsed();
        drain(&mut rx);
        page.focus_search();
        for c in "rust lang".chars() {
            page.insert_char(c);
        }
        page.activate();
        let navs = navigations(&drain(&mut rx));
        assert_eq!(navs.len(), 1);
        assert!(navs[0].ends_with("q=rust+lang"));
    }
}
