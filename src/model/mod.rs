//! Model module - Application state and data types
//!
//! This module contains all the data structures and state management for the application.
//! It is organized into submodules by responsibility:
//!
//! - `types`: Core type definitions (tracks, playlists, UI state)
//! - `banner`: Self-expiring status banner
//! - `editor`: Draft playlist, search results and picker list
//! - `catalog`: Remote catalog boundary trait
//! - `spotify_client`: Spotify implementation of the catalog
//! - `app_model`: Main application model with state management methods

mod types;
mod banner;
mod editor;
mod catalog;
mod spotify_client;
mod app_model;

pub use types::{ActiveSection, BannerColor, PlaylistSummary, Track, UiState};

pub use editor::{EditorState, SaveRequest};

#[cfg(test)]
pub use editor::{DraftPlaylist, PlaylistMode};

pub use catalog::CatalogClient;

#[cfg(test)]
pub use catalog::mock;

pub use spotify_client::SpotifyClient;

pub use app_model::AppModel;
