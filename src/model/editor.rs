//! Playlist editor state: the draft playlist, search results and the picker list
//!
//! All mutations here are synchronous and local. The controller decides which
//! remote calls accompany them.

use std::collections::HashSet;

use thiserror::Error;

use super::types::{PlaylistSummary, Track};

pub const DEFAULT_PLAYLIST_NAME: &str = "New Playlist";

/// Whether the draft is unsaved or mirrors a remote playlist
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum PlaylistMode {
    #[default]
    New,
    Editing { id: String },
}

/// The playlist currently being built or edited
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DraftPlaylist {
    pub name: String,
    pub tracks: Vec<Track>,
    pub mode: PlaylistMode,
}

impl Default for DraftPlaylist {
    fn default() -> Self {
        Self {
            name: DEFAULT_PLAYLIST_NAME.to_string(),
            tracks: Vec::new(),
            mode: PlaylistMode::New,
        }
    }
}

impl DraftPlaylist {
    pub fn playlist_id(&self) -> Option<&str> {
        match &self.mode {
            PlaylistMode::New => None,
            PlaylistMode::Editing { id } => Some(id),
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, PlaylistMode::Editing { .. })
    }

    pub fn contains(&self, track_id: &str) -> bool {
        self.tracks.iter().any(|t| t.id == track_id)
    }

    pub fn track_uris(&self) -> Vec<String> {
        self.tracks.iter().map(|t| t.uri.clone()).collect()
    }
}

/// Save preconditions, checked in order. `Display` is the banner text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Save in progress.")]
    SaveInProgress,
    #[error("Tracks required.")]
    NoTracks,
    #[error("Playlist name required.")]
    NoName,
}

/// The remote operation a valid save maps to
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SaveRequest {
    Create { name: String, track_uris: Vec<String> },
    Rename { id: String, name: String },
}

/// Editor state owned by the application model
#[derive(Clone, Debug, Default)]
pub struct EditorState {
    pub draft: DraftPlaylist,
    pub search_results: Vec<Track>,
    pub playlists: Vec<PlaylistSummary>,
    pub picker_open: bool,
    /// A create or rename is in flight
    pub saving: bool,
    /// Bumped by every draft change
    revision: u64,
}

impl EditorState {
    /// Replace the result set, keeping tracks already in the draft out of it
    pub fn replace_search_results(&mut self, tracks: Vec<Track>) {
        let draft = &self.draft;
        self.search_results = tracks.into_iter().filter(|t| !draft.contains(&t.id)).collect();
    }

    /// Move a track into the draft. Returns false if it was already there.
    pub fn add_track(&mut self, track: &Track) -> bool {
        if self.draft.contains(&track.id) {
            return false;
        }
        self.draft.tracks.push(track.clone());
        self.revision += 1;
        if let Some(pos) = self.search_results.iter().position(|t| t.id == track.id) {
            self.search_results.remove(pos);
        }
        true
    }

    /// Move a track out of the draft, to the front of the result set.
    /// Returns false if it was not in the draft.
    pub fn remove_track(&mut self, track: &Track) -> bool {
        let Some(pos) = self.draft.tracks.iter().position(|t| t.id == track.id) else {
            return false;
        };
        let removed = self.draft.tracks.remove(pos);
        self.revision += 1;
        self.search_results.insert(0, removed);
        true
    }

    pub fn set_name(&mut self, name: String) {
        self.draft.name = name;
        self.revision += 1;
    }

    pub fn push_name_char(&mut self, c: char) {
        self.draft.name.push(c);
        self.revision += 1;
    }

    pub fn pop_name_char(&mut self) {
        if self.draft.name.pop().is_some() {
            self.revision += 1;
        }
    }

    pub fn validate_save(&self) -> Result<SaveRequest, ValidationError> {
        if self.draft.tracks.is_empty() {
            return Err(ValidationError::NoTracks);
        }
        if self.draft.name.is_empty() {
            return Err(ValidationError::NoName);
        }

        Ok(match &self.draft.mode {
            PlaylistMode::New => SaveRequest::Create {
                name: self.draft.name.clone(),
                track_uris: self.draft.track_uris(),
            },
            PlaylistMode::Editing { id } => SaveRequest::Rename {
                id: id.clone(),
                name: self.draft.name.clone(),
            },
        })
    }

    /// Validate and mark a save as in flight. Returns the request and the
    /// draft revision it was built from.
    pub fn begin_save(&mut self) -> Result<(SaveRequest, u64), ValidationError> {
        if self.saving {
            return Err(ValidationError::SaveInProgress);
        }
        let request = self.validate_save()?;
        self.saving = true;
        Ok((request, self.revision))
    }

    /// Clear the in-flight mark. A successful save resets the draft only if
    /// nothing changed it since `begin_save`; returns whether it was reset.
    pub fn finish_save(&mut self, revision: u64, succeeded: bool) -> bool {
        self.saving = false;
        if succeeded && revision == self.revision {
            self.reset_draft();
            true
        } else {
            false
        }
    }

    /// Back to an empty, unsaved draft
    pub fn reset_draft(&mut self) {
        self.draft = DraftPlaylist::default();
        self.revision += 1;
    }

    /// Replace the draft wholesale with a fetched remote playlist. A remote
    /// playlist may list a track twice; only the first copy is kept.
    pub fn load_for_edit(&mut self, id: String, name: String, mut tracks: Vec<Track>) {
        let mut seen = HashSet::new();
        tracks.retain(|t| seen.insert(t.id.clone()));

        self.revision += 1;
        self.draft = DraftPlaylist {
            name,
            tracks,
            mode: PlaylistMode::Editing { id },
        };
        let draft = &self.draft;
        self.search_results.retain(|t| !draft.contains(&t.id));
    }

    pub fn set_playlists(&mut self, playlists: Vec<PlaylistSummary>) {
        self.playlists = playlists;
    }

    pub fn close_picker(&mut self) {
        self.picker_open = false;
        self.playlists.clear();
    }
}
