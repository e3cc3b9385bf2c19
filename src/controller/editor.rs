//! Draft playlist operations

use crate::model::{ActiveSection, BannerColor, SaveRequest, Track};
use super::AppController;

impl AppController {
    /// Move a track into the draft. In edit mode the remote playlist gets the
    /// track too; that call runs in the background.
    pub async fn add_track(&self, track: Track) {
        let (added, playlist_id) = {
            let model = self.model.lock().await;
            (model.add_track(&track).await, model.draft_playlist_id().await)
        };
        if !added {
            tracing::debug!(track_id = %track.id, "Track already in playlist");
            return;
        }

        let Some(playlist_id) = playlist_id else {
            return;
        };
        let Some(catalog) = self.catalog().await else {
            return;
        };
        let controller = self.clone();
        tokio::spawn(async move {
            match catalog.add_track(&track.uri, &playlist_id).await {
                Ok(()) => controller.show_banner("Track added!", BannerColor::Success).await,
                Err(e) => controller.report_error("add_track", &e).await,
            }
        });
    }

    /// Move a track out of the draft, back to the front of the results
    pub async fn remove_track(&self, track: Track) {
        let (removed, playlist_id) = {
            let model = self.model.lock().await;
            (model.remove_track(&track).await, model.draft_playlist_id().await)
        };
        if !removed {
            return;
        }

        let Some(playlist_id) = playlist_id else {
            return;
        };
        let Some(catalog) = self.catalog().await else {
            return;
        };
        let controller = self.clone();
        tokio::spawn(async move {
            match catalog.delete_track(&track.uri, &playlist_id).await {
                Ok(()) => controller.show_banner("Track removed!", BannerColor::Error).await,
                Err(e) => controller.report_error("delete_track", &e).await,
            }
        });
    }

    pub async fn set_playlist_name(&self, name: String) {
        self.model.lock().await.set_playlist_name(name).await;
    }

    /// Create or rename depending on the draft's mode, then reset the draft.
    /// Edits made while the call is in flight are kept instead of reset.
    pub async fn save_playlist(&self) {
        let Some(catalog) = self.catalog().await else {
            return;
        };
        let (begun, picker_open) = {
            let model = self.model.lock().await;
            (model.begin_save().await, model.is_picker_open().await)
        };

        let (request, revision) = match begun {
            Ok(begun) => begun,
            Err(reason) => {
                tracing::debug!(%reason, "Save rejected");
                self.show_banner(reason.to_string(), BannerColor::Error).await;
                return;
            }
        };

        let result = match &request {
            SaveRequest::Create { name, track_uris } => catalog
                .save_playlist(name, track_uris)
                .await
                .map(|()| "Playlist saved!"),
            SaveRequest::Rename { id, name } => catalog
                .rename_playlist(name, id)
                .await
                .map(|()| "Playlist renamed!"),
        };

        match result {
            Ok(message) => {
                tracing::info!(?request, "Playlist saved");
                if !self.model.lock().await.finish_save(revision, true).await {
                    tracing::debug!("Draft changed during save, keeping it");
                }
                self.show_banner(message, BannerColor::Success).await;
            }
            Err(e) => {
                self.model.lock().await.finish_save(revision, false).await;
                self.report_error("save_playlist", &e).await;
                return;
            }
        }

        if picker_open {
            self.schedule_playlists_refresh(self.timing.save_refresh_delay());
        }
    }

    /// Replace the draft with a remote playlist once name and tracks are both in
    pub async fn load_playlist_for_edit(&self, playlist_id: String) {
        tracing::debug!(playlist_id = %playlist_id, "Loading playlist for editing");
        let Some(catalog) = self.catalog().await else {
            return;
        };

        let fetched = futures::try_join!(
            catalog.get_playlist_name(&playlist_id),
            catalog.get_playlist_tracks(&playlist_id),
        );

        match fetched {
            Ok((name, tracks)) => {
                tracing::info!(playlist_id = %playlist_id, tracks = tracks.len(), "Playlist loaded for editing");
                let model = self.model.lock().await;
                model.load_for_edit(playlist_id, name, tracks).await;
                model.set_active_section(ActiveSection::PlaylistTracks).await;
            }
            Err(e) => self.report_error("load_playlist", &e).await,
        }
    }

    /// Leave edit mode without saving
    pub async fn cancel_edit(&self) {
        let model = self.model.lock().await;
        if model.draft_playlist_id().await.is_none() {
            return;
        }
        model.reset_draft().await;
        drop(model);
        tracing::debug!("Edit cancelled");
        self.show_banner("Edit cancelled.", BannerColor::Info).await;
    }
}
