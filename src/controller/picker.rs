//! Playlist picker: listing, refreshing and deleting the user's playlists

use std::time::Duration;

use crate::model::BannerColor;
use super::AppController;

impl AppController {
    /// Open the picker and fetch playlists, or close it and drop the list
    pub async fn toggle_playlist_picker(&self) {
        let open = self.model.lock().await.toggle_picker().await;
        if open {
            self.refresh_playlists().await;
        } else {
            tracing::debug!("Playlist picker closed");
        }
    }

    pub async fn refresh_playlists(&self) {
        let Some(catalog) = self.catalog().await else {
            return;
        };
        self.show_banner("Retrieving playlists...", BannerColor::Info).await;

        match catalog.get_playlists().await {
            Ok(playlists) => {
                let count = playlists.len();
                if !self.model.lock().await.set_playlists(playlists).await {
                    tracing::debug!(count, "Picker closed before playlists arrived");
                    return;
                }
                tracing::info!(count, "Playlists retrieved");

                let controller = self.clone();
                let delay = self.timing.picker_done_delay();
                tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    controller.show_banner("Playlists retrieved.", BannerColor::Success).await;
                });
            }
            Err(e) => self.report_error("get_playlists", &e).await,
        }
    }

    /// Delete a playlist. The banner does not wait for the remote call; the
    /// picker is refreshed after a delay instead.
    pub async fn delete_playlist(&self, playlist_id: String) {
        tracing::debug!(playlist_id = %playlist_id, "Deleting playlist");

        if let Some(catalog) = self.catalog().await {
            let controller = self.clone();
            let id = playlist_id.clone();
            tokio::spawn(async move {
                if let Err(e) = catalog.delete_playlist(&id).await {
                    controller.report_error("delete_playlist", &e).await;
                }
            });
        }

        {
            // A deleted playlist can no longer be edited
            let model = self.model.lock().await;
            if model.draft_playlist_id().await.as_deref() == Some(playlist_id.as_str()) {
                model.reset_draft().await;
            }
        }

        self.show_banner("Playlist deleted.", BannerColor::Error).await;
        self.schedule_playlists_refresh(self.timing.delete_refresh_delay());
    }

    /// Refresh the picker after `delay`, if it is still open by then
    pub(crate) fn schedule_playlists_refresh(&self, delay: Duration) {
        let controller = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let still_wanted = {
                let model = controller.model.lock().await;
                model.is_picker_open().await && !model.should_quit().await
            };
            if still_wanted {
                controller.refresh_playlists().await;
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::controller::test_support::{controller_with, settle, track};
    use crate::model::{
        mock::{CatalogCall, MockCatalog}, BannerColor, DraftPlaylist, PlaylistSummary,
    };

    fn summaries() -> Vec<PlaylistSummary> {
        vec![
            PlaylistSummary { id: "p1".to_string(), name: "Road Trip".to_string() },
            PlaylistSummary { id: "p2".to_string(), name: "Focus".to_string() },
        ]
    }

    #[tokio::test(start_paused = true)]
    async fn test_toggle_twice_populates_then_clears() {
        let (controller, catalog) = controller_with(MockCatalog {
            playlists: summaries(),
            ..Default::default()
        });

        controller.toggle_playlist_picker().await;
        {
            let model = controller.model.lock().await;
            let editor = model.get_editor_state().await;
            assert!(editor.picker_open);
            assert_eq!(editor.playlists, summaries());
            assert_eq!(model.get_ui_state().await.banner.text, "Retrieving playlists...");
        }
        assert_eq!(catalog.calls(), vec![CatalogCall::GetPlaylists]);

        controller.toggle_playlist_picker().await;
        let editor = controller.model.lock().await.get_editor_state().await;
        assert!(!editor.picker_open);
        assert!(editor.playlists.is_empty());
        assert_eq!(catalog.calls(), vec![CatalogCall::GetPlaylists]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retrieved_banner_follows_fetch() {
        let (controller, _) = controller_with(MockCatalog {
            playlists: summaries(),
            ..Default::default()
        });
        controller.toggle_playlist_picker().await;

        tokio::time::sleep(Duration::from_millis(450)).await;
        let banner = controller.model.lock().await.get_ui_state().await.banner;
        assert_eq!(banner.text, "Playlists retrieved.");
        assert_eq!(banner.color, BannerColor::Success);
    }

    #[tokio::test(start_paused = true)]
    async fn test_delete_shows_banner_and_refreshes() {
        let (controller, catalog) = controller_with(MockCatalog {
            playlists: summaries(),
            ..Default::default()
        });
        controller.toggle_playlist_picker().await;

        controller.delete_playlist("p2".to_string()).await;
        {
            let banner = controller.model.lock().await.get_ui_state().await.banner;
            assert_eq!(banner.text, "Playlist deleted.");
            assert_eq!(banner.color, BannerColor::Error);
        }

        settle().await;
        assert!(catalog.calls().contains(&CatalogCall::DeletePlaylist("p2".to_string())));

        tokio::time::sleep(Duration::from_millis(900)).await;
        let fetches = catalog.calls().into_iter().filter(|c| *c == CatalogCall::GetPlaylists).count();
        assert_eq!(fetches, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresh_skipped_once_picker_closed() {
        let (controller, catalog) = controller_with(MockCatalog {
            playlists: summaries(),
            ..Default::default()
        });
        controller.toggle_playlist_picker().await;
        controller.delete_playlist("p1".to_string()).await;
        controller.toggle_playlist_picker().await;

        tokio::time::sleep(Duration::from_millis(900)).await;
        let fetches = catalog.calls().into_iter().filter(|c| *c == CatalogCall::GetPlaylists).count();
        assert_eq!(fetches, 1);
        assert!(controller.model.lock().await.get_editor_state().await.playlists.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_deleting_edited_playlist_resets_draft() {
        let (controller, _) = controller_with(MockCatalog {
            playlist_name: "Road Trip".to_string(),
            playlist_tracks: vec![track("A")],
            ..Default::default()
        });
        controller.load_playlist_for_edit("p1".to_string()).await;
        controller.delete_playlist("p1".to_string()).await;

        let draft = controller.model.lock().await.get_editor_state().await.draft;
        assert_eq!(draft, DraftPlaylist::default());
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_delete_is_reported() {
        let (controller, _) = controller_with(MockCatalog {
            fail: true,
            ..Default::default()
        });
        controller.delete_playlist("p1".to_string()).await;
        settle().await;

        let banner = controller.model.lock().await.get_ui_state().await.banner;
        assert_eq!(banner.color, BannerColor::Error);
        assert!(banner.text.starts_with("Error:"));
    }
}
