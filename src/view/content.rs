//! Pane rendering: search results, the playlist being built, the picker

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, ListItem, Paragraph},
    Frame,
};
use ratatui::widgets::Padding;

use crate::model::{ActiveSection, EditorState, PlaylistSummary, Track, UiState};
use super::utils::{border_style, render_scrollable_list, truncate_string};

pub fn render_results(frame: &mut Frame, area: Rect, ui_state: &UiState, editor: &EditorState) {
    let is_focused = ui_state.active_section == ActiveSection::Results;
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Results ")
        .padding(Padding::horizontal(1))
        .border_style(border_style(is_focused));

    if editor.search_results.is_empty() {
        let empty = Paragraph::new("Type in search and press Enter to find tracks")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let content_width = area.width.saturating_sub(4) as usize;
    let items = track_items(&editor.search_results, ui_state.results_selected, is_focused, content_width, "+");
    render_scrollable_list(frame, area, items, ui_state.results_selected, block);
}

/// Name field, track list and, when open, the playlist picker
pub fn render_playlist(frame: &mut Frame, area: Rect, ui_state: &UiState, editor: &EditorState) {
    let constraints = if editor.picker_open {
        vec![
            Constraint::Length(3),      // Name
            Constraint::Percentage(55), // Tracks
            Constraint::Min(0),         // Picker
        ]
    } else {
        vec![Constraint::Length(3), Constraint::Min(0)]
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    render_name_field(frame, chunks[0], ui_state, editor);
    render_draft_tracks(frame, chunks[1], ui_state, editor);
    if editor.picker_open {
        render_picker(frame, chunks[2], ui_state, &editor.playlists);
    }
}

fn render_name_field(frame: &mut Frame, area: Rect, ui_state: &UiState, editor: &EditorState) {
    let is_focused = ui_state.active_section == ActiveSection::PlaylistName;
    let text = if is_focused {
        format!("{}▏", editor.draft.name)
    } else {
        editor.draft.name.clone()
    };

    let name = Paragraph::new(text)
        .style(if is_focused {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Playlist name ")
                .padding(Padding::horizontal(1))
                .border_style(border_style(is_focused)),
        );
    frame.render_widget(name, area);
}

fn render_draft_tracks(frame: &mut Frame, area: Rect, ui_state: &UiState, editor: &EditorState) {
    let is_focused = ui_state.active_section == ActiveSection::PlaylistTracks;
    let title = format!(" Tracks ({}) ", editor.draft.tracks.len());
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .padding(Padding::horizontal(1))
        .border_style(border_style(is_focused));

    if editor.draft.tracks.is_empty() {
        let empty = Paragraph::new("Add tracks from the results")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let content_width = area.width.saturating_sub(4) as usize;
    let items = track_items(&editor.draft.tracks, ui_state.tracks_selected, is_focused, content_width, "-");
    render_scrollable_list(frame, area, items, ui_state.tracks_selected, block);
}

fn render_picker(frame: &mut Frame, area: Rect, ui_state: &UiState, playlists: &[PlaylistSummary]) {
    let is_focused = ui_state.active_section == ActiveSection::Picker;
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Your playlists (e edit · x delete) ")
        .padding(Padding::horizontal(1))
        .border_style(border_style(is_focused));

    let items: Vec<ListItem> = playlists
        .iter()
        .enumerate()
        .map(|(i, playlist)| {
            let style = if i == ui_state.picker_selected && is_focused {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else if i == ui_state.picker_selected {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(playlist.name.clone()).style(style)
        })
        .collect();

    render_scrollable_list(frame, area, items, ui_state.picker_selected, block);
}

/// One line per track: action marker, title, then artist and album dimmed
fn track_items(
    tracks: &[Track],
    selected_index: usize,
    is_focused: bool,
    content_width: usize,
    marker: &str,
) -> Vec<ListItem<'static>> {
    let title_width = (content_width.saturating_sub(2) * 45) / 100;
    let detail_width = content_width.saturating_sub(2 + title_width + 3);

    tracks
        .iter()
        .enumerate()
        .map(|(i, track)| {
            let is_selected = i == selected_index;
            let title_style = if is_selected && is_focused {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else if is_selected {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let marker_style = if is_selected && is_focused {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::DarkGray)
            };

            let detail = format!("{} | {}", track.artist, track.album);
            ListItem::new(Line::from(vec![
                Span::styled(format!("{} ", marker), marker_style),
                Span::styled(
                    format!("{:<width$}", truncate_string(&track.name, title_width), width = title_width),
                    title_style,
                ),
                Span::raw("   "),
                Span::styled(truncate_string(&detail, detail_width), Style::default().fg(Color::DarkGray)),
            ]))
        })
        .collect()
}
