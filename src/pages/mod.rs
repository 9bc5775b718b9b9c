//! Page model - descriptions, identities, and the open-page variants
//!
//! A page is a tracked, showable unit of content within one tab. The set
//! of kinds is closed: adding one extends the enums here and the compiler
//! surfaces every manager decision point that must handle it.

pub mod content;
pub mod manager;
pub mod navbar;

use std::fmt;

pub use content::{ContentPage, FocusTarget, LoadState};
pub use manager::{Opened, PageManager};
pub use navbar::NavigationBar;

use crate::constants::ABOUT_BLANK;
use crate::messages::render::PageView;

/// Opaque, manager-scoped page identity. Minted when a page is opened and
/// never reused after it is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageId(u64);

impl PageId {
    pub(crate) fn new(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "page#{}", self.0)
    }
}

/// The kind of an open page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    Content,
    Downloads,
    Settings,
}

impl PageKind {
    /// Static tab label used when a page provides no live label
    pub fn fallback_label(&self) -> &'static str {
        match self {
            PageKind::Content => crate::constants::DEFAULT_TITLE,
            PageKind::Downloads => "Downloads",
            PageKind::Settings => "Settings",
        }
    }
}

/// Describes the kind and parameters of a page to open. Immutable value;
/// the manager turns it into a tracked page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageDescription {
    Content { address: String },
    Downloads,
    Settings,
}

impl PageDescription {
    /// Description of an empty content page
    pub fn blank() -> Self {
        PageDescription::Content {
            address: String::from(ABOUT_BLANK),
        }
    }
}

/// An open page tracked by the manager
#[derive(Debug)]
pub enum Page {
    Content(ContentPage),
    Downloads(DownloadsPage),
    Settings(SettingsPage),
}

impl Page {
    pub fn id(&self) -> PageId {
        match self {
            Page::Content(page) => page.id(),
            Page::Downloads(page) => page.id,
            Page::Settings(page) => page.id,
        }
    }

    pub fn kind(&self) -> PageKind {
        match self {
            Page::Content(_) => PageKind::Content,
            Page::Downloads(_) => PageKind::Downloads,
            Page::Settings(_) => PageKind::Settings,
        }
    }

    /// Live tab label text. Placeholder pages provide none; the manager
    /// degrades to a static fallback label.
    pub fn tab_title(&self) -> Option<&str> {
        match self {
            Page::Content(page) => Some(page.title()),
            Page::Downloads(_) | Page::Settings(_) => None,
        }
    }

    /// Produce the drawable view of this page. In a terminal UI, showing
    /// a page is being part of the next frame's snapshot.
    pub fn view(&self) -> PageView {
        match self {
            Page::Content(page) => PageView::Content(page.view()),
            Page::Downloads(_) => PageView::Downloads,
            Page::Settings(_) => PageView::Settings,
        }
    }

    /// Hand input focus to the first element of the page's focus chain.
    /// Called whenever the page becomes the visible tab.
    pub fn focus_first(&mut self) {
        match self {
            Page::Content(page) => page.focus_first(),
            Page::Downloads(_) | Page::Settings(_) => {}
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Page::Content(page) => f.write_str(page.title()),
            Page::Downloads(_) => f.write_str("Downloads"),
            Page::Settings(_) => f.write_str("Settings"),
        }
    }
}

/// Placeholder downloads page; satisfies the page contract with a fixed
/// display string until a real body exists.
#[derive(Debug)]
pub struct DownloadsPage {
    pub(crate) id: PageId,
}

/// Placeholder settings page
#[derive(Debug)]
pub struct SettingsPage {
    pub(crate) id: PageId,
}
