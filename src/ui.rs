//! UI rendering helpers

use ratatui::{prelude::*, widgets::*};

use crate::messages::render::TabSnapshot;
use crate::pages::PageKind;

/// Build the tab bar line. The active tab is highlighted; placeholder
/// pages get a distinct color so they stand out among content tabs.
pub fn tab_line(tabs: &[TabSnapshot], active: usize) -> Line<'static> {
    let mut spans = Vec::new();
    for (i, tab) in tabs.iter().enumerate() {
        let label = format!(" {}:{} ", i + 1, truncate(&tab.title, 20));
        let style = if i == active {
            Style::default().fg(Color::Black).bg(Color::Cyan).bold()
        } else {
            match tab.kind {
                PageKind::Content => Style::default().fg(Color::Gray),
                PageKind::Downloads | PageKind::Settings => Style::default().fg(Color::Magenta),
            }
        };
        spans.push(Span::styled(label, style));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

/// Bordered block for a navigation bar entry
pub fn entry_block(title: &str, focused: bool) -> Block<'static> {
    let style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(style)
        .title(title.to_string())
}

/// Address entry title, carrying load progress while a page loads
pub fn address_title(progress: f64) -> String {
    if progress > 0.0 && progress < 1.0 {
        format!(" Address ({:.0}%) ", progress * 100.0)
    } else {
        String::from(" Address ")
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

/// Column for the terminal cursor inside an entry, from a byte offset
pub fn cursor_column(text: &str, byte_offset: usize) -> u16 {
    text.get(..byte_offset)
        .map(|prefix| prefix.chars().count() as u16)
        .unwrap_or(0)
}
