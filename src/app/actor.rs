//! App actor - central state machine of the browser shell
//!
//! Runs as a single task and owns all mutable state. UI events and
//! engine events arrive over channels, state changes go out as render
//! snapshots, so no state is ever touched from two tasks.

use tokio::sync::mpsc;
use tokio::time::sleep;
use tracing::{debug, error, info};

use crate::app::menu::MenuItem;
use crate::app::state::ShellState;
use crate::constants::STARTUP_GRACE;
use crate::messages::render::RenderState;
use crate::messages::renderer::{RendererCommand, RendererEvent};
use crate::messages::ui_events::UiEvent;
use crate::pages::{PageDescription, PageId};

pub struct AppActor {
    state: ShellState,
    renderer_tx: mpsc::UnboundedSender<RendererCommand>,
    render_tx: mpsc::UnboundedSender<RenderState>,
    grace_tx: mpsc::UnboundedSender<PageId>,
    /// Taken by `run`; Option so `run` can own the receiver while the
    /// handlers borrow the rest of the actor.
    grace_rx: Option<mpsc::UnboundedReceiver<PageId>>,
}

impl AppActor {
    /// Build the actor and open the session's pages. Grace timers for
    /// the initial pages are scheduled immediately.
    pub fn new(
        session: Vec<PageDescription>,
        renderer_tx: mpsc::UnboundedSender<RendererCommand>,
        render_tx: mpsc::UnboundedSender<RenderState>,
    ) -> Self {
        let (grace_tx, grace_rx) = mpsc::unbounded_channel();
        let (state, spawned) = ShellState::new(session, renderer_tx.clone());
        let actor = AppActor {
            state,
            renderer_tx,
            render_tx,
            grace_tx,
            grace_rx: Some(grace_rx),
        };
        for page in spawned {
            actor.schedule_grace(page);
        }
        actor
    }

    /// Start a one-shot timer for a freshly created page. When it fires
    /// the page leaves `StartingUp`; timers for pages closed in the
    /// meantime are dropped by the manager.
    fn schedule_grace(&self, page: PageId) {
        let grace_tx = self.grace_tx.clone();
        tokio::spawn(async move {
            sleep(STARTUP_GRACE).await;
            let _ = grace_tx.send(page);
        });
    }

    /// Main event loop. Returns when the user quits or every input
    /// channel closes.
    pub async fn run(
        mut self,
        mut ui_rx: mpsc::UnboundedReceiver<UiEvent>,
        mut renderer_rx: mpsc::UnboundedReceiver<RendererEvent>,
    ) {
        let Some(mut grace_rx) = self.grace_rx.take() else {
            return;
        };

        info!("app actor started");
        self.send_render_state();

        loop {
            tokio::select! {
                Some(event) = ui_rx.recv() => {
                    if self.handle_ui_event(event) {
                        let _ = self.renderer_tx.send(RendererCommand::Shutdown);
                        break;
                    }
                    self.send_render_state();
                }
                Some(event) = renderer_rx.recv() => {
                    self.state.manager.handle_renderer_event(event);
                    self.send_render_state();
                }
                Some(page) = grace_rx.recv() => {
                    self.state.manager.grace_elapsed(page);
                    self.send_render_state();
                }
                else => break,
            }
        }
        info!("app actor stopped");
    }

    fn send_render_state(&self) {
        let _ = self.render_tx.send(self.state.to_render_state());
    }

    /// Apply one UI event. Returns true when the shell should shut down.
    fn handle_ui_event(&mut self, event: UiEvent) -> bool {
        debug!(?event, "ui event");
        match event {
            UiEvent::NewTab => {
                let result = self.state.new_tab();
                self.apply(result);
            }
            UiEvent::CloseTab => {
                let result = self.state.close_tab();
                self.apply(result);
            }
            UiEvent::NextTab => self.state.next_tab(),
            UiEvent::PrevTab => self.state.prev_tab(),
            UiEvent::FocusTab(index) => self.state.focus_tab(index),
            UiEvent::MoveTabLeft => self.state.move_tab_left(),
            UiEvent::MoveTabRight => self.state.move_tab_right(),

            UiEvent::CycleFocus => self.state.cycle_focus(),
            UiEvent::FocusAddress => self.state.focus_address(),
            UiEvent::FocusSearch => self.state.focus_search(),
            UiEvent::StopEditing => self.state.stop_editing(),

            UiEvent::CharInput(c) => self.state.char_input(c),
            UiEvent::Backspace => self.state.backspace(),
            UiEvent::CursorLeft => self.state.cursor_left(),
            UiEvent::CursorRight => self.state.cursor_right(),
            UiEvent::Activate => self.state.activate(),
            UiEvent::Reload => self.state.reload(),

            UiEvent::OpenMenu => self.state.open_menu(),
            UiEvent::CloseMenu => self.state.close_menu(),
            UiEvent::MenuNext => self.state.menu_next(),
            UiEvent::MenuPrev => self.state.menu_prev(),
            UiEvent::MenuSelect => return self.menu_select(),

            UiEvent::ToggleHelp => self.state.toggle_help(),
            UiEvent::CloseHelp => self.state.close_help(),

            UiEvent::Quit => return true,
        }
        false
    }

    /// Log a fallible page operation and schedule grace for anything it
    /// spawned. Failures are fatal to the operation, not the shell.
    fn apply(&self, result: anyhow::Result<Option<PageId>>) {
        match result {
            Ok(Some(page)) => self.schedule_grace(page),
            Ok(None) => {}
            Err(err) => error!("page operation failed: {err:#}"),
        }
    }

    fn menu_select(&mut self) -> bool {
        let item = self.state.menu.selected_item();
        self.state.close_menu();
        match item {
            MenuItem::NewTab => {
                let result = self.state.new_tab();
                self.apply(result);
            }
            MenuItem::Downloads => {
                if let Err(err) = self.state.open_downloads() {
                    error!("page operation failed: {err:#}");
                }
            }
            MenuItem::Settings => {
                if let Err(err) = self.state.open_settings() {
                    error!("page operation failed: {err:#}");
                }
            }
            MenuItem::Restart => self.state.restart(),
            MenuItem::Quit => return true,
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actor() -> (
        AppActor,
        mpsc::UnboundedReceiver<RendererCommand>,
        mpsc::UnboundedReceiver<RenderState>,
    ) {
        let (renderer_tx, renderer_cmd_rx) = mpsc::unbounded_channel();
        let (render_tx, render_rx) = mpsc::unbounded_channel();
        let actor = AppActor::new(Vec::new(), renderer_tx, render_tx);
        (actor, renderer_cmd_rx, render_rx)
    }

    #[tokio::test]
    async fn test_new_tab_event_opens_and_focuses() {
        let (mut actor, _cmd_rx, _render_rx) = actor();
        assert!(!actor.handle_ui_event(UiEvent::NewTab));
        assert_eq!(actor.state.manager.len(), 2);
        assert_eq!(actor.state.manager.active_index(), 1);
    }

    #[tokio::test]
    async fn test_quit_event_stops_the_actor() {
        let (mut actor, _cmd_rx, _render_rx) = actor();
        assert!(actor.handle_ui_event(UiEvent::Quit));
    }

    #[tokio::test]
    async fn test_menu_quit_stops_the_actor() {
        let (mut actor, _cmd_rx, _render_rx) = actor();
        actor.handle_ui_event(UiEvent::OpenMenu);
        for _ in 0..4 {
            actor.handle_ui_event(UiEvent::MenuNext);
        }
        assert!(actor.handle_ui_event(UiEvent::MenuSelect));
        assert!(!actor.state.menu.open);
    }

    #[tokio::test]
    async fn test_menu_downloads_opens_singleton_tab() {
        let (mut actor, _cmd_rx, _render_rx) = actor();
        actor.handle_ui_event(UiEvent::OpenMenu);
        actor.handle_ui_event(UiEvent::MenuNext);
        actor.handle_ui_event(UiEvent::MenuSelect);
        assert_eq!(actor.state.manager.len(), 2);

        actor.handle_ui_event(UiEvent::OpenMenu);
        actor.handle_ui_event(UiEvent::MenuNext);
        actor.handle_ui_event(UiEvent::MenuSelect);
        assert_eq!(actor.state.manager.len(), 2);
    }
}
