//! Spotify implementation of the catalog boundary

use std::sync::Arc;
use anyhow::{Context, Result};
use async_trait::async_trait;
use futures::TryStreamExt;
use tokio::sync::RwLock;
use rspotify::{
    model::{FullTrack, Market, PlayableId, PlayableItem, PlaylistId, SearchResult, SearchType, TrackId},
    prelude::*,
    AuthCodeSpotify, Config as RspotifyConfig,
};

use crate::auth;
use crate::config::SpotifyConfig;
use super::catalog::CatalogClient;
use super::types::{PlaylistSummary, Track};

/// Spotify accepts at most this many items per add-items request
const ADD_ITEMS_BATCH: usize = 100;

/// Spotify Web API client holding the session's implicit-grant token
#[derive(Clone)]
pub struct SpotifyClient {
    client: Arc<AuthCodeSpotify>,
    config: SpotifyConfig,
    search_limit: u32,
    access_token: Arc<RwLock<Option<String>>>,
}

impl SpotifyClient {
    pub fn new(config: SpotifyConfig, search_limit: u32) -> Self {
        // The token comes from the redirect fragment and is never refreshed.
        let client = AuthCodeSpotify::with_config(
            Default::default(),
            Default::default(),
            RspotifyConfig {
                token_cached: false,
                token_refreshing: false,
                ..Default::default()
            },
        );

        Self {
            client: Arc::new(client),
            config,
            search_limit,
            access_token: Arc::new(RwLock::new(None)),
        }
    }

    fn to_track(track: FullTrack) -> Option<Track> {
        // Local files have no catalog id and cannot be added to playlists
        let track_id = track.id.as_ref().map(|id| id.id().to_string())?;
        Some(Track {
            uri: format!("spotify:track:{}", track_id),
            id: track_id,
            name: track.name,
            artist: track.artists.first().map(|a| a.name.clone()).unwrap_or_default(),
            album: track.album.name,
        })
    }
}

#[async_trait]
impl CatalogClient for SpotifyClient {
    async fn get_access_token(&self) -> Result<String> {
        if let Some(token) = self.access_token.read().await.clone() {
            return Ok(token);
        }

        let mut cached = self.access_token.write().await;
        if let Some(token) = cached.clone() {
            return Ok(token);
        }

        let grant = auth::prompt_for_token(&self.config).await?;
        let token = grant.into_token(&self.config.scopes);
        let access_token = token.access_token.clone();

        *self.client.token.lock().await.ok().context("Failed to lock rspotify token")? = Some(token);
        *cached = Some(access_token.clone());

        tracing::debug!("rspotify token set");
        Ok(access_token)
    }

    async fn search(&self, query: &str) -> Result<Vec<Track>> {
        self.get_access_token().await?;
        crate::log_api_request!("search", query, limit = self.search_limit);

        let market: Option<Market> = None;
        let result = self
            .client
            .search(query, SearchType::Track, market, None, Some(self.search_limit), None)
            .await;
        crate::log_api_result!("search", result);

        let tracks = match result? {
            SearchResult::Tracks(page) => page.items.into_iter().filter_map(Self::to_track).collect(),
            _ => Vec::new(),
        };
        Ok(tracks)
    }

    async fn get_playlists(&self) -> Result<Vec<PlaylistSummary>> {
        self.get_access_token().await?;
        crate::log_api_request!("get_playlists");

        let result: Result<Vec<_>, _> = self.client.current_user_playlists().try_collect().await;
        crate::log_api_result!("get_playlists", result);

        Ok(result?
            .into_iter()
            .map(|playlist| PlaylistSummary {
                id: playlist.id.id().to_string(),
                name: playlist.name,
            })
            .collect())
    }

    async fn get_playlist_name(&self, playlist_id: &str) -> Result<String> {
        self.get_access_token().await?;
        crate::log_api_request!("get_playlist_name", playlist_id);

        let id = PlaylistId::from_id(playlist_id)?;
        let result = self.client.playlist(id, None, None).await;
        crate::log_api_result!("get_playlist_name", result);

        Ok(result?.name)
    }

    async fn get_playlist_tracks(&self, playlist_id: &str) -> Result<Vec<Track>> {
        self.get_access_token().await?;
        crate::log_api_request!("get_playlist_tracks", playlist_id);

        let id = PlaylistId::from_id(playlist_id)?;
        let result: Result<Vec<_>, _> = self.client.playlist_items(id, None, None).try_collect().await;
        crate::log_api_result!("get_playlist_tracks", result);

        let tracks = result?
            .into_iter()
            .filter_map(|item| match item.track {
                Some(PlayableItem::Track(track)) => Self::to_track(track),
                _ => None,
            })
            .collect();
        Ok(tracks)
    }

    async fn add_track(&self, track_uri: &str, playlist_id: &str) -> Result<()> {
        self.get_access_token().await?;
        crate::log_api_request!("add_track", track_uri, playlist_id);

        let id = PlaylistId::from_id(playlist_id)?;
        let track = PlayableId::Track(TrackId::from_uri(track_uri)?);
        let result = self.client.playlist_add_items(id, [track], None).await;
        crate::log_api_result!("add_track", result);

        result?;
        Ok(())
    }

    async fn delete_track(&self, track_uri: &str, playlist_id: &str) -> Result<()> {
        self.get_access_token().await?;
        crate::log_api_request!("delete_track", track_uri, playlist_id);

        let id = PlaylistId::from_id(playlist_id)?;
        let track = PlayableId::Track(TrackId::from_uri(track_uri)?);
        let result = self
            .client
            .playlist_remove_all_occurrences_of_items(id, [track], None)
            .await;
        crate::log_api_result!("delete_track", result);

        result?;
        Ok(())
    }

    async fn save_playlist(&self, name: &str, track_uris: &[String]) -> Result<()> {
        self.get_access_token().await?;
        crate::log_api_request!("save_playlist", name, tracks = track_uris.len());

        let items = track_uris
            .iter()
            .map(|uri| TrackId::from_uri(uri).map(PlayableId::Track))
            .collect::<Result<Vec<_>, _>>()?;

        let user = self.client.me().await?;
        let result = self
            .client
            .user_playlist_create(user.id, name, None, None, None)
            .await;
        crate::log_api_result!("save_playlist", result);
        let playlist = result?;

        for batch in items.chunks(ADD_ITEMS_BATCH) {
            self.client
                .playlist_add_items(playlist.id.clone(), batch.to_vec(), None)
                .await?;
        }

        tracing::info!(playlist_id = %playlist.id.id(), tracks = items.len(), "Created playlist");
        Ok(())
    }

    async fn rename_playlist(&self, name: &str, playlist_id: &str) -> Result<()> {
        self.get_access_token().await?;
        crate::log_api_request!("rename_playlist", name, playlist_id);

        let id = PlaylistId::from_id(playlist_id)?;
        let result = self
            .client
            .playlist_change_detail(id, Some(name), None, None, None)
            .await;
        crate::log_api_result!("rename_playlist", result);

        result?;
        Ok(())
    }

    async fn delete_playlist(&self, playlist_id: &str) -> Result<()> {
        self.get_access_token().await?;
        crate::log_api_request!("delete_playlist", playlist_id);

        // Spotify has no hard delete; unfollowing removes it from the library
        let id = PlaylistId::from_id(playlist_id)?;
        let result = self.client.playlist_unfollow(id).await;
        crate::log_api_result!("delete_playlist", result);

        result?;
        Ok(())
    }
}
