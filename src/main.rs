//! Skiff - a tabbed browser shell for the terminal
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering
//! - App Layer - central state machine processing events
//! - Renderer Layer (Tokio) - one engine task per content page

mod address;
mod app;
mod constants;
mod messages;
mod pages;
mod renderer;
mod ui;

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::*, widgets::*};
use tokio::sync::mpsc;

use app::menu::MenuItem;
use app::AppActor;
use constants::HOME_ADDRESS;
use messages::render::{ContentView, PageView, SurfaceView};
use messages::ui_events::key_to_ui_event;
use messages::{RenderState, RendererCommand, RendererEvent, UiEvent};
use pages::{FocusTarget, PageDescription};
use renderer::RendererActor;
use ui::{address_title, cursor_column, entry_block, tab_line};

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging to file
    let file_appender = tracing_appender::rolling::never(".", "skiff.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (renderer_cmd_tx, renderer_cmd_rx) = mpsc::unbounded_channel::<RendererCommand>();
    let (renderer_event_tx, renderer_event_rx) = mpsc::unbounded_channel::<RendererEvent>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    // Spawn renderer actor
    let renderer_actor = RendererActor::new(renderer_event_tx);
    tokio::spawn(renderer_actor.run(renderer_cmd_rx));

    // Spawn app actor with the initial session
    let session = vec![PageDescription::Content {
        address: String::from(HOME_ADDRESS),
    }];
    let app_actor = AppActor::new(session, renderer_cmd_tx, render_tx);
    tokio::spawn(app_actor.run(ui_rx, renderer_event_rx));

    // Run UI loop (synchronous with async polling)
    run_ui_loop(&mut terminal, ui_tx, &mut render_rx).await?;

    Ok(())
}

/// Run the synchronous UI rendering loop
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
) -> anyhow::Result<()> {
    let mut current_state = RenderState::default();

    loop {
        // Draw with current state
        terminal.draw(|f| draw_ui(f, &current_state))?;

        // Poll for events with timeout
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Some(event) = key_to_ui_event(
                    key,
                    current_state.editing,
                    current_state.menu_open,
                    current_state.show_help,
                ) {
                    let quitting = event == UiEvent::Quit;
                    let _ = ui_tx.send(event);
                    if quitting {
                        break;
                    }
                }
            }
        }

        // Check for state updates (non-blocking)
        while let Ok(state) = render_rx.try_recv() {
            current_state = state;
        }
    }

    Ok(())
}

// ============================================================================
// UI Drawing Functions
// ============================================================================

fn draw_ui(f: &mut Frame, state: &RenderState) {
    let area = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Tab bar
            Constraint::Min(0),    // Page
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    draw_tab_bar(f, state, main_chunks[0]);

    match &state.view {
        Some(PageView::Content(view)) => draw_content_page(f, view, main_chunks[1]),
        Some(PageView::Downloads) => draw_placeholder_page(f, "Downloads", main_chunks[1]),
        Some(PageView::Settings) => draw_placeholder_page(f, "Settings", main_chunks[1]),
        None => {}
    }

    draw_status_bar(f, state, main_chunks[2]);

    if state.menu_open {
        draw_menu_popup(f, state, area);
    }

    if state.show_help {
        draw_help_popup(f, area);
    }
}

fn draw_tab_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let line = tab_line(&state.tabs, state.active);
    f.render_widget(Paragraph::new(line), area);
}

fn draw_content_page(f: &mut Frame, view: &ContentView, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Navigation bar
            Constraint::Min(0),    // Render surface
        ])
        .split(area);

    draw_navbar(f, view, chunks[0]);
    draw_surface(f, view, chunks[1]);
}

fn draw_navbar(f: &mut Frame, view: &ContentView, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(9),  // Back / forward / reload
            Constraint::Min(20),    // Address entry
            Constraint::Length(28), // Search entry
        ])
        .split(area);

    let button = |symbol: &'static str, enabled: bool| {
        Span::styled(
            symbol,
            if enabled {
                Style::default().fg(Color::White)
            } else {
                Style::default().fg(Color::DarkGray)
            },
        )
    };
    let buttons = Line::from(vec![
        Span::raw(" "),
        button("◀", view.back_enabled),
        Span::raw(" "),
        button("▶", view.forward_enabled),
        Span::raw(" "),
        button("⟳", true),
    ]);
    f.render_widget(
        Paragraph::new(buttons).block(Block::default().borders(Borders::ALL)),
        chunks[0],
    );

    let address_focused = view.focus == FocusTarget::AddressEntry;
    let address = Paragraph::new(view.entry.as_str())
        .block(entry_block(&address_title(view.progress), address_focused));
    f.render_widget(address, chunks[1]);
    if address_focused {
        f.set_cursor_position((
            chunks[1].x + 1 + cursor_column(&view.entry, view.entry_cursor),
            chunks[1].y + 1,
        ));
    }

    let search_focused = view.focus == FocusTarget::SearchEntry;
    let search =
        Paragraph::new(view.search.as_str()).block(entry_block(" Search ", search_focused));
    f.render_widget(search, chunks[2]);
    if search_focused {
        f.set_cursor_position((
            chunks[2].x + 1 + cursor_column(&view.search, view.search_cursor),
            chunks[2].y + 1,
        ));
    }
}

fn draw_surface(f: &mut Frame, view: &ContentView, area: Rect) {
    let focused = view.focus == FocusTarget::Surface;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        });

    let body = match &view.surface {
        SurfaceView::Starting => Paragraph::new("\n Starting engine...")
            .style(Style::default().fg(Color::DarkGray))
            .block(block),
        SurfaceView::Live { title, address } => {
            let lines = vec![
                Line::from(""),
                Line::from(Span::styled(
                    format!(" {}", title),
                    Style::default().fg(Color::White).bold(),
                )),
                Line::from(Span::styled(
                    format!(" {}", address),
                    Style::default().fg(Color::Cyan),
                )),
            ];
            Paragraph::new(lines).block(block)
        }
        SurfaceView::Crashed => Paragraph::new("\n The engine crashed :'(")
            .style(Style::default().fg(Color::Red).bold())
            .block(block),
    };
    f.render_widget(body, area);
}

fn draw_placeholder_page(f: &mut Frame, title: &str, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", title));
    let body = Paragraph::new(format!("\n {} - nothing here yet", title))
        .style(Style::default().fg(Color::DarkGray))
        .block(block);
    f.render_widget(body, area);
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let status = if state.menu_open {
        " ↑/↓:select | Enter:choose | Esc:close "
    } else if state.editing {
        " ESC:stop editing | Enter:go | Tab:next field "
    } else {
        " t:new tab | x:close | h/l:tabs | e:address | /:search | r:reload | m:menu | ?:help | q:quit "
    };

    let bar = Paragraph::new(status).style(Style::default().fg(Color::DarkGray));
    f.render_widget(bar, area);
}

fn draw_menu_popup(f: &mut Frame, state: &RenderState, area: Rect) {
    let width: u16 = 30;
    let height = MenuItem::ALL.len() as u16 + 2;
    let popup_area = Rect {
        x: area.width.saturating_sub(width + 1),
        y: 1,
        width: width.min(area.width),
        height: height.min(area.height),
    };

    let items: Vec<ListItem> = MenuItem::ALL
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let style = if i == state.menu_selected {
                Style::default().fg(Color::Black).bg(Color::Cyan).bold()
            } else {
                Style::default()
            };
            ListItem::new(format!(" {}", item.label())).style(style)
        })
        .collect();

    let menu = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Menu ")
            .style(Style::default().bg(Color::Black)),
    );

    f.render_widget(Clear, popup_area);
    f.render_widget(menu, popup_area);
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);

    let help_text = r#"
 SKIFF - Keyboard Shortcuts

 TABS
   t / Ctrl+T         New tab
   x / Ctrl+W         Close tab
   h / l, ← / →       Previous / next tab
   1-9                Jump to tab
   < / >              Move tab left / right

 PAGE
   e                  Focus address entry
   /                  Focus search entry
   Tab                Cycle focus
   Enter              Navigate / search
   Esc                Leave entry
   r                  Reload

 GENERAL
   m                  Action menu
   ?                  Toggle this help
   q / Ctrl+C         Quit

 Press any key to close...
"#;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    let help = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
