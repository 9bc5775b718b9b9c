//! Renderer messages - communication between App and Renderer layers

use crate::pages::PageId;

/// Commands sent from the App layer to the renderer engine
#[derive(Debug, Clone)]
pub enum RendererCommand {
    /// Create an engine instance for a new content page
    Create { page: PageId },
    /// Command a page's engine to load an address
    Navigate { page: PageId, address: String },
    /// Reveal the page's render surface
    Show { page: PageId },
    /// Tear down the engine instance of a closed page
    Close { page: PageId },
    /// Shutdown the renderer actor
    Shutdown,
}

/// Load lifecycle phases reported by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    Started,
    Redirected,
    Committed,
    Finished,
}

/// Events sent from the renderer engine back to the App layer.
///
/// Events are asynchronous notifications; the app task applies them to
/// page state on the single UI-owning context.
#[derive(Debug, Clone)]
pub enum RendererEvent {
    /// Load lifecycle progressed
    LoadChanged { page: PageId, phase: LoadPhase },
    /// A navigation could not be completed
    LoadFailed { page: PageId, message: String },
    /// The engine process for a page died; the page is unrecoverable
    ProcessCrashed { page: PageId },
    /// Estimated load progress, 0.0 to 1.0
    ProgressChanged { page: PageId, fraction: f64 },
    /// The shown address changed (navigation committed or redirected)
    AddressChanged { page: PageId, address: String },
    /// The document title changed
    TitleChanged { page: PageId, title: String },
}

impl RendererEvent {
    /// Get the page this event belongs to
    pub fn page(&self) -> PageId {
        match self {
            RendererEvent::LoadChanged { page, .. } => *page,
            RendererEvent::LoadFailed { page, .. } => *page,
            RendererEvent::ProcessCrashed { page } => *page,
            RendererEvent::ProgressChanged { page, .. } => *page,
            RendererEvent::AddressChanged { page, .. } => *page,
            RendererEvent::TitleChanged { page, .. } => *page,
        }
    }
}
