//! Renderer actor - manages one engine task per content page
//!
//! Engine tasks are fully isolated from each other and from the app:
//! a panicking engine is detected through its join error and reported
//! as a crashed page, never unwinding anything else.

use std::collections::HashMap;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinSet;

use crate::messages::renderer::{RendererCommand, RendererEvent};
use crate::pages::PageId;
use crate::renderer::engine::{create_client, run_page_engine};

/// Channels into one running engine task
struct EngineHandle {
    nav_tx: mpsc::UnboundedSender<String>,
    cancel_tx: oneshot::Sender<()>,
}

/// Renderer actor that processes engine lifecycle commands
pub struct RendererActor {
    client: reqwest::Client,
    event_tx: mpsc::UnboundedSender<RendererEvent>,
    engines: JoinSet<()>,
    /// Task id to page, for attributing join errors
    engine_pages: HashMap<tokio::task::Id, PageId>,
    handles: HashMap<PageId, EngineHandle>,
}

impl RendererActor {
    pub fn new(event_tx: mpsc::UnboundedSender<RendererEvent>) -> Self {
        RendererActor {
            client: create_client(),
            event_tx,
            engines: JoinSet::new(),
            engine_pages: HashMap::new(),
            handles: HashMap::new(),
        }
    }

    /// Run the renderer actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<RendererCommand>) {
        loop {
            tokio::select! {
                biased;

                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(RendererCommand::Create { page }) => self.create(page),

                        Some(RendererCommand::Navigate { page, address }) => {
                            match self.handles.get(&page) {
                                Some(handle) => {
                                    let _ = handle.nav_tx.send(address);
                                }
                                None => {
                                    tracing::warn!(%page, "navigate for page without engine");
                                }
                            }
                        }

                        Some(RendererCommand::Show { page }) => {
                            // Visibility is a property of the drawn frame;
                            // acknowledged here for the lifecycle trace.
                            tracing::debug!(%page, "render surface shown");
                        }

                        Some(RendererCommand::Close { page }) => {
                            if let Some(handle) = self.handles.remove(&page) {
                                let _ = handle.cancel_tx.send(());
                            }
                        }

                        Some(RendererCommand::Shutdown) | None => {
                            for (_, handle) in self.handles.drain() {
                                let _ = handle.cancel_tx.send(());
                            }
                            break;
                        }
                    }
                }

                // Reap finished engine tasks and surface panics as crashes
                Some(joined) = self.engines.join_next_with_id() => {
                    match joined {
                        Ok((task_id, ())) => {
                            self.engine_pages.remove(&task_id);
                        }
                        Err(err) => {
                            let task_id = err.id();
                            if let Some(page) = self.engine_pages.remove(&task_id) {
                                if err.is_panic() {
                                    tracing::warn!(%page, "engine task panicked");
                                    self.handles.remove(&page);
                                    let _ = self.event_tx.send(
                                        RendererEvent::ProcessCrashed { page },
                                    );
                                }
                            }
                        }
                    }
                }
            }
        }
    }

    /// Spawn the engine task for a new page
    fn create(&mut self, page: PageId) {
        let (nav_tx, nav_rx) = mpsc::unbounded_channel();
        let (cancel_tx, cancel_rx) = oneshot::channel();

        let client = self.client.clone();
        let event_tx = self.event_tx.clone();
        let handle = self
            .engines
            .spawn(run_page_engine(page, client, event_tx, nav_rx, cancel_rx));

        self.engine_pages.insert(handle.id(), page);
        self.handles.insert(page, EngineHandle { nav_tx, cancel_tx });
        tracing::debug!(%page, "engine created");
    }
}
