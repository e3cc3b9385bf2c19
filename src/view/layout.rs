//! Layout rendering (search bar, status bar)

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use ratatui::widgets::Padding;

use crate::model::{ActiveSection, BannerColor, EditorState, UiState};
use super::utils::border_style;

pub fn render_top_bar(frame: &mut Frame, area: Rect, ui_state: &UiState, editor: &EditorState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),     // Search input
            Constraint::Length(24), // Editor mode
        ])
        .split(area);

    let is_focused = ui_state.active_section == ActiveSection::Search;
    let (search_text, search_style) = if ui_state.search_query.is_empty() && !is_focused {
        ("Type to search...".to_string(), Style::default().fg(Color::DarkGray))
    } else if is_focused {
        (format!("{}▏", ui_state.search_query), Style::default().fg(Color::Green))
    } else {
        (ui_state.search_query.clone(), Style::default().fg(Color::White))
    };

    let search = Paragraph::new(search_text)
        .style(search_style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Search ")
                .padding(Padding::horizontal(1))
                .border_style(border_style(is_focused)),
        );
    frame.render_widget(search, chunks[0]);

    let (mode_text, mode_color) = if editor.draft.is_editing() {
        ("✎ Editing", Color::Yellow)
    } else {
        ("✚ New playlist", Color::Cyan)
    };
    let mode = Paragraph::new(mode_text)
        .style(Style::default().fg(mode_color).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL).title(" Mode "));
    frame.render_widget(mode, chunks[1]);
}

/// Banner while one is visible, key hints otherwise
pub fn render_status_bar(frame: &mut Frame, area: Rect, ui_state: &UiState) {
    let banner = &ui_state.banner;
    let status = if banner.visible {
        let color = match banner.color {
            BannerColor::Success => Color::Green,
            BannerColor::Error => Color::Red,
            BannerColor::Info => Color::Cyan,
        };
        Paragraph::new(banner.text.as_str())
            .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
    } else {
        let hints = if ui_state.active_section.accepts_text() {
            "Enter confirm · Tab next section · Ctrl+S save · Ctrl+R playlists · F1 help"
        } else {
            "↑↓ select · Enter apply · S save · R playlists · / search · ? help · Q quit"
        };
        Paragraph::new(hints).style(Style::default().fg(Color::DarkGray))
    };

    frame.render_widget(
        status.block(
            Block::default()
                .borders(Borders::ALL)
                .padding(Padding::horizontal(1)),
        ),
        area,
    );
}
