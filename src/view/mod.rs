//! View module - UI rendering
//!
//! This module handles all UI rendering for the application using ratatui.
//! It is organized into submodules by component type:
//!
//! - `utils`: Shared utility functions (truncation, scrollable lists)
//! - `layout`: Frame structure (search bar, status bar)
//! - `content`: Results, playlist editor and picker panes
//! - `overlays`: Modal overlays (help)

mod utils;
mod layout;
mod content;
mod overlays;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::model::{EditorState, UiState};

pub struct AppView;

impl AppView {
    pub fn render(frame: &mut Frame, ui_state: &UiState, editor: &EditorState) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Search bar + mode
                Constraint::Min(0),    // Results and playlist editor
                Constraint::Length(3), // Status banner / key hints
            ])
            .split(frame.area());

        layout::render_top_bar(frame, chunks[0], ui_state, editor);

        let main_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(50), // Search results
                Constraint::Percentage(50), // Playlist being built
            ])
            .split(chunks[1]);

        content::render_results(frame, main_chunks[0], ui_state, editor);
        content::render_playlist(frame, main_chunks[1], ui_state, editor);

        layout::render_status_bar(frame, chunks[2], ui_state);

        if ui_state.show_help_popup {
            overlays::render_help_popup(frame);
        }
    }
}
