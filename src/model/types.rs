//! Core type definitions for the application

use super::banner::StatusBanner;

/// Which section of the UI is currently active/focused
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActiveSection {
    Search,
    Results,
    PlaylistName,
    PlaylistTracks,
    Picker,
}

impl ActiveSection {
    /// The picker only takes focus while it is open.
    pub fn next(self, picker_open: bool) -> Self {
        match self {
            ActiveSection::Search => ActiveSection::Results,
            ActiveSection::Results => ActiveSection::PlaylistName,
            ActiveSection::PlaylistName => ActiveSection::PlaylistTracks,
            ActiveSection::PlaylistTracks if picker_open => ActiveSection::Picker,
            ActiveSection::PlaylistTracks => ActiveSection::Search,
            ActiveSection::Picker => ActiveSection::Search,
        }
    }

    pub fn prev(self, picker_open: bool) -> Self {
        match self {
            ActiveSection::Search if picker_open => ActiveSection::Picker,
            ActiveSection::Search => ActiveSection::PlaylistTracks,
            ActiveSection::Results => ActiveSection::Search,
            ActiveSection::PlaylistName => ActiveSection::Results,
            ActiveSection::PlaylistTracks => ActiveSection::PlaylistName,
            ActiveSection::Picker => ActiveSection::PlaylistTracks,
        }
    }

    /// Sections where printable keys are text input rather than commands
    pub fn accepts_text(self) -> bool {
        matches!(self, ActiveSection::Search | ActiveSection::PlaylistName)
    }
}

/// A track from search results or a playlist
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Track {
    pub id: String,
    pub uri: String,
    pub name: String,
    pub artist: String,
    pub album: String,
}

/// A user's playlist, as listed in the picker
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlaylistSummary {
    pub id: String,
    pub name: String,
}

/// Banner color, applied by the view
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum BannerColor {
    Success,
    Error,
    #[default]
    Info,
}

/// UI state for the application
#[derive(Clone)]
pub struct UiState {
    pub active_section: ActiveSection,
    pub search_query: String,
    pub results_selected: usize,
    pub tracks_selected: usize,
    pub picker_selected: usize,
    pub banner: StatusBanner,
    pub show_help_popup: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            active_section: ActiveSection::Search,
            search_query: String::new(),
            results_selected: 0,
            tracks_selected: 0,
            picker_selected: 0,
            banner: StatusBanner::default(),
            show_help_popup: false,
        }
    }
}

impl UiState {
    /// Keep selections inside list bounds after the lists change
    pub fn clamp_selections(&mut self, results: usize, tracks: usize, playlists: usize) {
        self.results_selected = self.results_selected.min(results.saturating_sub(1));
        self.tracks_selected = self.tracks_selected.min(tracks.saturating_sub(1));
        self.picker_selected = self.picker_selected.min(playlists.saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_cycle_skips_closed_picker() {
        assert_eq!(ActiveSection::PlaylistTracks.next(false), ActiveSection::Search);
        assert_eq!(ActiveSection::PlaylistTracks.next(true), ActiveSection::Picker);
        assert_eq!(ActiveSection::Search.prev(false), ActiveSection::PlaylistTracks);
        assert_eq!(ActiveSection::Search.prev(true), ActiveSection::Picker);
    }

    #[test]
    fn test_clamp_selections() {
        let mut state = UiState {
            results_selected: 7,
            tracks_selected: 2,
            picker_selected: 4,
            ..UiState::default()
        };
        state.clamp_selections(3, 0, 10);
        assert_eq!(state.results_selected, 2);
        assert_eq!(state.tracks_selected, 0);
        assert_eq!(state.picker_selected, 4);
    }
}
