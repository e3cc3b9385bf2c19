//! Main application model with state management
//!
//! The model is the only place where editor and UI state change. The view
//! only ever sees cloned snapshots.

use std::sync::Arc;
use tokio::sync::Mutex;

use super::catalog::CatalogClient;
use super::editor::{EditorState, SaveRequest, ValidationError};
use super::types::{ActiveSection, BannerColor, PlaylistSummary, Track, UiState};

/// Main application model containing all state
pub struct AppModel {
    pub catalog: Option<Arc<dyn CatalogClient>>,
    pub editor: Arc<Mutex<EditorState>>,
    pub ui_state: Arc<Mutex<UiState>>,
    pub should_quit: Arc<Mutex<bool>>,
}

impl AppModel {
    pub fn new() -> Self {
        Self {
            catalog: None,
            editor: Arc::new(Mutex::new(EditorState::default())),
            ui_state: Arc::new(Mutex::new(UiState::default())),
            should_quit: Arc::new(Mutex::new(false)),
        }
    }

    pub fn set_catalog(&mut self, catalog: Arc<dyn CatalogClient>) {
        self.catalog = Some(catalog);
    }

    pub async fn get_catalog(&self) -> Option<Arc<dyn CatalogClient>> {
        self.catalog.clone()
    }

    pub async fn should_quit(&self) -> bool {
        *self.should_quit.lock().await
    }

    pub async fn set_should_quit(&self, quit: bool) {
        *self.should_quit.lock().await = quit;
    }

    // ========================================================================
    // Snapshots
    // ========================================================================

    pub async fn get_ui_state(&self) -> UiState {
        self.ui_state.lock().await.clone()
    }

    pub async fn get_editor_state(&self) -> EditorState {
        self.editor.lock().await.clone()
    }

    // ========================================================================
    // Focus & selection
    // ========================================================================

    pub async fn cycle_section_forward(&self) {
        let picker_open = self.editor.lock().await.picker_open;
        let mut state = self.ui_state.lock().await;
        state.active_section = state.active_section.next(picker_open);
    }

    pub async fn cycle_section_backward(&self) {
        let picker_open = self.editor.lock().await.picker_open;
        let mut state = self.ui_state.lock().await;
        state.active_section = state.active_section.prev(picker_open);
    }

    pub async fn set_active_section(&self, section: ActiveSection) {
        let mut state = self.ui_state.lock().await;
        state.active_section = section;
    }

    pub async fn move_selection_up(&self) {
        let mut state = self.ui_state.lock().await;
        match state.active_section {
            ActiveSection::Results => state.results_selected = state.results_selected.saturating_sub(1),
            ActiveSection::PlaylistTracks => state.tracks_selected = state.tracks_selected.saturating_sub(1),
            ActiveSection::Picker => state.picker_selected = state.picker_selected.saturating_sub(1),
            _ => {}
        }
    }

    pub async fn move_selection_down(&self) {
        let editor = self.editor.lock().await;
        let mut state = self.ui_state.lock().await;
        match state.active_section {
            ActiveSection::Results => {
                if state.results_selected < editor.search_results.len().saturating_sub(1) {
                    state.results_selected += 1;
                }
            }
            ActiveSection::PlaylistTracks => {
                if state.tracks_selected < editor.draft.tracks.len().saturating_sub(1) {
                    state.tracks_selected += 1;
                }
            }
            ActiveSection::Picker => {
                if state.picker_selected < editor.playlists.len().saturating_sub(1) {
                    state.picker_selected += 1;
                }
            }
            _ => {}
        }
    }

    pub async fn get_selected_result(&self) -> Option<Track> {
        let editor = self.editor.lock().await;
        let state = self.ui_state.lock().await;
        editor.search_results.get(state.results_selected).cloned()
    }

    pub async fn get_selected_draft_track(&self) -> Option<Track> {
        let editor = self.editor.lock().await;
        let state = self.ui_state.lock().await;
        editor.draft.tracks.get(state.tracks_selected).cloned()
    }

    pub async fn get_selected_playlist(&self) -> Option<PlaylistSummary> {
        let editor = self.editor.lock().await;
        let state = self.ui_state.lock().await;
        editor.playlists.get(state.picker_selected).cloned()
    }

    /// Re-clamp selections against the editor lists; editor lock taken first
    async fn clamp_selections(&self, editor: &EditorState) {
        let mut state = self.ui_state.lock().await;
        state.clamp_selections(
            editor.search_results.len(),
            editor.draft.tracks.len(),
            editor.playlists.len(),
        );
        if state.active_section == ActiveSection::Picker && !editor.picker_open {
            state.active_section = ActiveSection::PlaylistTracks;
        }
    }

    // ========================================================================
    // Text input
    // ========================================================================

    pub async fn update_search_query(&self, query: String) {
        let mut state = self.ui_state.lock().await;
        state.search_query = query;
    }

    pub async fn append_to_search(&self, c: char) {
        let mut state = self.ui_state.lock().await;
        state.search_query.push(c);
    }

    pub async fn backspace_search(&self) {
        let mut state = self.ui_state.lock().await;
        state.search_query.pop();
    }

    pub async fn set_playlist_name(&self, name: String) {
        self.editor.lock().await.set_name(name);
    }

    pub async fn append_to_name(&self, c: char) {
        self.editor.lock().await.push_name_char(c);
    }

    pub async fn backspace_name(&self) {
        self.editor.lock().await.pop_name_char();
    }

    // ========================================================================
    // Status banner
    // ========================================================================

    /// Show a banner and return its generation for the hide timer
    pub async fn show_banner(&self, text: impl Into<String>, color: BannerColor) -> u64 {
        self.ui_state.lock().await.banner.show(text, color)
    }

    pub async fn hide_banner(&self, generation: u64) -> bool {
        self.ui_state.lock().await.banner.hide(generation)
    }

    pub async fn show_help_popup(&self) {
        self.ui_state.lock().await.show_help_popup = true;
    }

    pub async fn hide_help_popup(&self) {
        self.ui_state.lock().await.show_help_popup = false;
    }

    pub async fn is_help_popup_open(&self) -> bool {
        self.ui_state.lock().await.show_help_popup
    }

    // ========================================================================
    // Playlist editor
    // ========================================================================

    pub async fn set_search_results(&self, tracks: Vec<Track>) {
        let mut editor = self.editor.lock().await;
        editor.replace_search_results(tracks);
        self.ui_state.lock().await.results_selected = 0;
    }

    pub async fn add_track(&self, track: &Track) -> bool {
        let mut editor = self.editor.lock().await;
        let added = editor.add_track(track);
        self.clamp_selections(&editor).await;
        added
    }

    pub async fn remove_track(&self, track: &Track) -> bool {
        let mut editor = self.editor.lock().await;
        let removed = editor.remove_track(track);
        self.clamp_selections(&editor).await;
        removed
    }

    pub async fn draft_playlist_id(&self) -> Option<String> {
        self.editor.lock().await.draft.playlist_id().map(str::to_string)
    }

    pub async fn begin_save(&self) -> Result<(SaveRequest, u64), ValidationError> {
        self.editor.lock().await.begin_save()
    }

    /// Returns true if the draft was reset
    pub async fn finish_save(&self, revision: u64, succeeded: bool) -> bool {
        let mut editor = self.editor.lock().await;
        let reset = editor.finish_save(revision, succeeded);
        self.clamp_selections(&editor).await;
        reset
    }

    pub async fn reset_draft(&self) {
        let mut editor = self.editor.lock().await;
        editor.reset_draft();
        self.clamp_selections(&editor).await;
    }

    pub async fn load_for_edit(&self, id: String, name: String, tracks: Vec<Track>) {
        let mut editor = self.editor.lock().await;
        editor.load_for_edit(id, name, tracks);
        self.ui_state.lock().await.tracks_selected = 0;
        self.clamp_selections(&editor).await;
    }

    // ========================================================================
    // Playlist picker
    // ========================================================================

    pub async fn is_picker_open(&self) -> bool {
        self.editor.lock().await.picker_open
    }

    /// Flip the picker; returns the new open state
    pub async fn toggle_picker(&self) -> bool {
        let mut editor = self.editor.lock().await;
        if editor.picker_open {
            editor.close_picker();
        } else {
            editor.picker_open = true;
        }
        let open = editor.picker_open;
        self.clamp_selections(&editor).await;
        open
    }

    /// Apply a fetched playlist list, unless the picker was closed meanwhile
    pub async fn set_playlists(&self, playlists: Vec<PlaylistSummary>) -> bool {
        let mut editor = self.editor.lock().await;
        if !editor.picker_open {
            return false;
        }
        editor.set_playlists(playlists);
        self.clamp_selections(&editor).await;
        true
    }
}

impl Default for AppModel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(id: &str) -> Track {
        Track {
            id: id.to_string(),
            uri: format!("spotify:track:{}", id),
            name: id.to_string(),
            artist: String::new(),
            album: String::new(),
        }
    }

    #[tokio::test]
    async fn test_playlists_ignored_once_picker_closed() {
        let model = AppModel::new();
        let fetched = vec![PlaylistSummary { id: "p1".to_string(), name: "Focus".to_string() }];

        assert!(!model.set_playlists(fetched.clone()).await);
        assert!(model.get_editor_state().await.playlists.is_empty());

        assert!(model.toggle_picker().await);
        assert!(model.set_playlists(fetched).await);
        assert_eq!(model.get_editor_state().await.playlists.len(), 1);
    }

    #[tokio::test]
    async fn test_closing_picker_moves_focus_off_it() {
        let model = AppModel::new();
        model.toggle_picker().await;
        model.set_active_section(ActiveSection::Picker).await;

        assert!(!model.toggle_picker().await);
        assert_eq!(model.get_ui_state().await.active_section, ActiveSection::PlaylistTracks);
    }

    #[tokio::test]
    async fn test_selection_stays_in_bounds() {
        let model = AppModel::new();
        model.set_search_results(vec![track("1"), track("2")]).await;
        model.set_active_section(ActiveSection::Results).await;

        model.move_selection_down().await;
        model.move_selection_down().await;
        assert_eq!(model.get_selected_result().await, Some(track("2")));

        model.add_track(&track("2")).await;
        assert_eq!(model.get_ui_state().await.results_selected, 0);
        assert_eq!(model.get_selected_result().await, Some(track("1")));
    }
}
