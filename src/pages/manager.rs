//! Page manager - owns the tab sequence and page lifecycle
//!
//! All pages live here, in tab order. Content pages may repeat freely;
//! the downloads and settings pages are singletons whose existing tab is
//! focused on a second open request. The manager guarantees at least one
//! open page at all times.

use std::collections::HashMap;

use anyhow::{bail, Result};
use tokio::sync::mpsc;
use tracing::debug;

use crate::messages::render::{PageView, TabSnapshot};
use crate::messages::renderer::{RendererCommand, RendererEvent};
use crate::pages::{
    ContentPage, DownloadsPage, Page, PageDescription, PageId, SettingsPage,
};

/// Result of opening a page
#[derive(Debug, Clone, Copy)]
pub struct Opened {
    /// Tab index the page now occupies
    pub index: usize,
    /// Id of a newly created content page, if one was spawned. The
    /// caller schedules its start-up grace timer.
    pub spawned: Option<PageId>,
}

#[derive(Debug)]
pub struct PageManager {
    /// Open pages in tab order
    pages: Vec<Page>,
    active: usize,
    /// Content page id to tab index
    content: HashMap<PageId, usize>,
    downloads: Option<PageId>,
    settings: Option<PageId>,
    next_id: u64,
    renderer_tx: mpsc::UnboundedSender<RendererCommand>,
}

impl PageManager {
    /// Build a manager from a session, opening one page per description.
    /// An empty session gets a blank page so the invariant of at least
    /// one open page holds from the start. Returns the ids of spawned
    /// content pages so the caller can schedule their grace timers.
    pub fn new(
        session: Vec<PageDescription>,
        renderer_tx: mpsc::UnboundedSender<RendererCommand>,
    ) -> (Self, Vec<PageId>) {
        let mut manager = PageManager {
            pages: Vec::new(),
            active: 0,
            content: HashMap::new(),
            downloads: None,
            settings: None,
            next_id: 0,
            renderer_tx,
        };

        let session = if session.is_empty() {
            vec![PageDescription::blank()]
        } else {
            session
        };

        let mut spawned = Vec::new();
        for description in session {
            // Descriptions can't fail to open on a fresh manager
            if let Ok(opened) = manager.open_page(description) {
                spawned.extend(opened.spawned);
            }
        }
        manager.focus_page_at(0);
        (manager, spawned)
    }

    fn mint_id(&mut self) -> PageId {
        self.next_id += 1;
        PageId::new(self.next_id)
    }

    // ========================
    // Open / close
    // ========================

    /// Open the described page in a new tab, or focus the existing tab
    /// for singleton kinds.
    pub fn open_page(&mut self, description: PageDescription) -> Result<Opened> {
        match description {
            PageDescription::Content { address } => {
                let id = self.mint_id();
                let page = ContentPage::new(id, &address, self.renderer_tx.clone());
                self.pages.push(Page::Content(page));
                let index = self.pages.len() - 1;
                self.content.insert(id, index);
                Ok(Opened {
                    index,
                    spawned: Some(id),
                })
            }
            PageDescription::Downloads => {
                if let Some(id) = self.downloads {
                    let index = self.position(id)?;
                    self.focus_page_at(index);
                    return Ok(Opened {
                        index,
                        spawned: None,
                    });
                }
                let id = self.mint_id();
                self.downloads = Some(id);
                self.pages.push(Page::Downloads(DownloadsPage { id }));
                Ok(Opened {
                    index: self.pages.len() - 1,
                    spawned: None,
                })
            }
            PageDescription::Settings => {
                if let Some(id) = self.settings {
                    let index = self.position(id)?;
                    self.focus_page_at(index);
                    return Ok(Opened {
                        index,
                        spawned: None,
                    });
                }
                let id = self.mint_id();
                self.settings = Some(id);
                self.pages.push(Page::Settings(SettingsPage { id }));
                Ok(Opened {
                    index: self.pages.len() - 1,
                    spawned: None,
                })
            }
        }
    }

    /// Close a page and release its resources. Closing the last page
    /// opens a fresh blank page; its id is returned so the caller can
    /// schedule the grace timer.
    pub fn close_page(&mut self, id: PageId) -> Result<Option<PageId>> {
        let index = self.position(id)?;
        let was_active = index == self.active;
        let page = self.pages.remove(index);

        match page {
            Page::Content(page) => {
                self.content.remove(&page.id());
                let _ = self.renderer_tx.send(RendererCommand::Close { page: page.id() });
            }
            Page::Downloads(_) => self.downloads = None,
            Page::Settings(_) => self.settings = None,
        }
        self.reindex();

        if self.pages.is_empty() {
            // Never show zero tabs
            let opened = self.open_page(PageDescription::blank())?;
            self.focus_page_at(opened.index);
            return Ok(opened.spawned);
        }

        if index < self.active {
            self.active -= 1;
        } else if self.active >= self.pages.len() {
            self.active = self.pages.len() - 1;
        }
        if was_active {
            self.focus_page_at(self.active);
        }
        Ok(None)
    }

    pub fn close_active(&mut self) -> Result<Option<PageId>> {
        let id = self.pages[self.active].id();
        self.close_page(id)
    }

    // ========================
    // Focus / tab order
    // ========================

    pub fn focus_page(&mut self, id: PageId) -> Result<()> {
        let index = self.position(id)?;
        self.focus_page_at(index);
        Ok(())
    }

    /// Make the tab at `index` the visible one and hand focus to the
    /// head of its focus chain. Out-of-range indices are ignored.
    pub fn focus_page_at(&mut self, index: usize) {
        if index >= self.pages.len() {
            return;
        }
        self.active = index;
        self.pages[index].focus_first();
    }

    pub fn focus_next(&mut self) {
        let next = (self.active + 1) % self.pages.len();
        self.focus_page_at(next);
    }

    pub fn focus_prev(&mut self) {
        let prev = (self.active + self.pages.len() - 1) % self.pages.len();
        self.focus_page_at(prev);
    }

    /// Move the active tab one slot left or right, keeping it active
    pub fn move_active(&mut self, delta: isize) {
        let target = self.active as isize + delta;
        if target < 0 || target as usize >= self.pages.len() {
            return;
        }
        self.pages.swap(self.active, target as usize);
        self.active = target as usize;
        self.reindex();
    }

    // ========================
    // Engine event routing
    // ========================

    /// A start-up grace timer fired. Stale timers for pages closed in
    /// the meantime are dropped here.
    pub fn grace_elapsed(&mut self, id: PageId) {
        match self.content_mut(id) {
            Some(page) => page.grace_elapsed(),
            None => debug!(page = %id, "grace timer fired for closed page"),
        }
    }

    /// Route an engine event to the page it belongs to. Events for
    /// closed pages are expected during teardown and dropped.
    pub fn handle_renderer_event(&mut self, event: RendererEvent) {
        let id = event.page();
        match self.content_mut(id) {
            Some(page) => page.handle_event(event),
            None => debug!(page = %id, "engine event for closed page dropped"),
        }
    }

    fn content_mut(&mut self, id: PageId) -> Option<&mut ContentPage> {
        let index = *self.content.get(&id)?;
        match self.pages.get_mut(index) {
            Some(Page::Content(page)) => Some(page),
            _ => None,
        }
    }

    // ========================
    // Accessors
    // ========================

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_page(&self) -> &Page {
        &self.pages[self.active]
    }

    pub fn page_at(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }

    /// The active page's content state, if the active page is a content
    /// page. Entry editing and navigation commands land here.
    pub fn active_content_mut(&mut self) -> Option<&mut ContentPage> {
        match self.pages.get_mut(self.active) {
            Some(Page::Content(page)) => Some(page),
            _ => None,
        }
    }

    /// Tab bar snapshots in tab order
    pub fn tabs(&self) -> Vec<TabSnapshot> {
        self.pages
            .iter()
            .map(|page| {
                let title = page
                    .tab_title()
                    .filter(|title| !title.is_empty())
                    .unwrap_or_else(|| page.kind().fallback_label());
                TabSnapshot {
                    title: title.to_string(),
                    kind: page.kind(),
                }
            })
            .collect()
    }

    pub fn active_view(&self) -> PageView {
        self.active_page().view()
    }

    fn position(&self, id: PageId) -> Result<usize> {
        match self.pages.iter().position(|page| page.id() == id) {
            Some(index) => Ok(index),
            None => bail!("{id} is not tracked by the page manager"),
        }
    }

    /// Rebuild the content id lookup after any reordering of `pages`
    fn reindex(&mut self) {
        self.content.clear();
        for (index, page) in self.pages.iter().enumerate() {
            if let Page::Content(page) = page {
                self.content.insert(page.id(), index);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::ABOUT_BLANK;
    use crate::pages::PageKind;

    fn manager_with(
        session: Vec<PageDescription>,
    ) -> (PageManager, mpsc::UnboundedReceiver<RendererCommand>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let (manager, _spawned) = PageManager::new(session, tx);
        (manager, rx)
    }

    fn content_address(manager: &PageManager, index: usize) -> String {
        match manager.page_at(index) {
            Some(Page::Content(page)) => page.address().to_string(),
            other => panic!("expected content page at {index}, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_session_opens_blank_page() {
        let (manager, _rx) = manager_with(Vec::new());
        assert_eq!(manager.len(), 1);
        assert_eq!(content_address(&manager, 0), ABOUT_BLANK);
    }

    #[test]
    fn test_close_last_page_reopens_blank() {
        let (mut manager, _rx) = manager_with(vec![PageDescription::Content {
            address: String::from("https://example.com"),
        }]);
        let original = manager.active_page().id();
        let spawned = manager.close_active().expect("close should succeed");
        assert_eq!(manager.len(), 1);
        assert_eq!(content_address(&manager, 0), ABOUT_BLANK);
        let replacement = spawned.expect("replacement page should be spawned");
        assert_ne!(replacement, original);
    }

    #[test]
    fn test_downloads_page_is_a_singleton() {
        let (mut manager, _rx) = manager_with(Vec::new());
        let first = manager.open_page(PageDescription::Downloads).expect("open");
        assert!(first.spawned.is_none());
        assert_eq!(manager.len(), 2);

        let second = manager.open_page(PageDescription::Downloads).expect("open");
        assert_eq!(manager.len(), 2);
        assert_eq!(second.index, first.index);
        assert_eq!(manager.active_index(), first.index);
    }

    #[test]
    fn test_settings_page_is_a_singleton() {
        let (mut manager, _rx) = manager_with(Vec::new());
        manager.open_page(PageDescription::Settings).expect("open");
        manager.open_page(PageDescription::Settings).expect("open");
        assert_eq!(manager.len(), 2);
    }

    #[test]
    fn test_content_pages_are_never_deduplicated() {
        let (mut manager, _rx) = manager_with(Vec::new());
        let description = PageDescription::Content {
            address: String::from("https://example.com"),
        };
        manager.open_page(description.clone()).expect("open");
        manager.open_page(description).expect("open");
        assert_eq!(manager.len(), 3);
    }

    #[test]
    fn test_closing_singleton_clears_slot() {
        let (mut manager, _rx) = manager_with(Vec::new());
        let opened = manager.open_page(PageDescription::Downloads).expect("open");
        let id = manager
            .page_at(opened.index)
            .map(|page| page.id())
            .expect("page exists");
        manager.close_page(id).expect("close");

        // Slot cleared, so a new downloads page can be opened
        let reopened = manager.open_page(PageDescription::Downloads).expect("open");
        assert_eq!(manager.len(), 2);
        assert_ne!(
            manager.page_at(reopened.index).map(|page| page.id()),
            Some(id)
        );
    }

    #[test]
    fn test_close_untracked_page_fails() {
        let (mut manager, _rx) = manager_with(Vec::new());
        let id = manager.active_page().id();
        manager.close_page(id).expect("first close");
        assert!(manager.close_page(id).is_err());
    }

    #[test]
    fn test_reorder_keeps_event_routing_consistent() {
        let (mut manager, _rx) = manager_with(vec![
            PageDescription::Content {
                address: String::from("https://a.example.com"),
            },
            PageDescription::Content {
                address: String::from("https://b.example.com"),
            },
        ]);
        let second = manager.page_at(1).map(|page| page.id()).expect("page");
        manager.focus_page_at(1);
        manager.move_active(-1);
        assert_eq!(manager.active_index(), 0);
        assert_eq!(manager.active_page().id(), second);

        manager.handle_renderer_event(RendererEvent::TitleChanged {
            page: second,
            title: String::from("B"),
        });
        assert_eq!(manager.tabs()[0].title, "B");
    }

    #[test]
    fn test_closing_inactive_tab_keeps_active_page() {
        let (mut manager, _rx) = manager_with(vec![
            PageDescription::Content {
                address: String::from("https://a.example.com"),
            },
            PageDescription::Content {
                address: String::from("https://b.example.com"),
            },
        ]);
        manager.focus_page_at(1);
        let active = manager.active_page().id();
        let first = manager.page_at(0).map(|page| page.id()).expect("page");
        manager.close_page(first).expect("close");
        assert_eq!(manager.active_index(), 0);
        assert_eq!(manager.active_page().id(), active);
    }

    #[test]
    fn test_events_for_closed_pages_are_dropped() {
        let (mut manager, _rx) = manager_with(Vec::new());
        let id = manager.active_page().id();
        manager.close_page(id).expect("close");
        // Must not panic or resurrect state
        manager.handle_renderer_event(RendererEvent::TitleChanged {
            page: id,
            title: String::from("stale"),
        });
        manager.grace_elapsed(id);
        assert_eq!(manager.len(), 1);
    }

    #[test]
    fn test_tab_cycling_wraps() {
        let (mut manager, _rx) = manager_with(vec![
            PageDescription::blank(),
            PageDescription::blank(),
            PageDescription::blank(),
        ]);
        manager.focus_page_at(2);
        manager.focus_next();
        assert_eq!(manager.active_index(), 0);
        manager.focus_prev();
        assert_eq!(manager.active_index(), 2);
    }

    #[test]
    fn test_tab_titles_degrade_to_fallback() {
        let (mut manager, _rx) = manager_with(Vec::new());
        manager.open_page(PageDescription::Downloads).expect("open");
        let tabs = manager.tabs();
        assert_eq!(tabs[0].kind, PageKind::Content);
        assert_eq!(tabs[1].title, "Downloads");
    }
}
