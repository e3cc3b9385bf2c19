//! Boundary to the remote music catalog

use anyhow::Result;
use async_trait::async_trait;

use super::types::{PlaylistSummary, Track};

/// Remote catalog operations used by the controller.
///
/// Every call either resolves or fails with an error the controller turns
/// into a status banner.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Obtain (or return the cached) bearer token for this session
    async fn get_access_token(&self) -> Result<String>;

    async fn search(&self, query: &str) -> Result<Vec<Track>>;

    /// Playlists of the current user
    async fn get_playlists(&self) -> Result<Vec<PlaylistSummary>>;

    async fn get_playlist_name(&self, playlist_id: &str) -> Result<String>;

    async fn get_playlist_tracks(&self, playlist_id: &str) -> Result<Vec<Track>>;

    async fn add_track(&self, track_uri: &str, playlist_id: &str) -> Result<()>;

    async fn delete_track(&self, track_uri: &str, playlist_id: &str) -> Result<()>;

    /// Create a new playlist holding `track_uris`
    async fn save_playlist(&self, name: &str, track_uris: &[String]) -> Result<()>;

    async fn rename_playlist(&self, name: &str, playlist_id: &str) -> Result<()>;

    async fn delete_playlist(&self, playlist_id: &str) -> Result<()>;
}
