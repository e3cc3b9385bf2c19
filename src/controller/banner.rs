//! Status banner scheduling

use crate::model::BannerColor;
use super::AppController;

impl AppController {
    /// Show a banner and schedule its hide. Only the hide belonging to the
    /// latest banner takes effect.
    pub async fn show_banner(&self, text: impl Into<String>, color: BannerColor) {
        let generation = {
            let model = self.model.lock().await;
            model.show_banner(text, color).await
        };

        let model = self.model.clone();
        let duration = self.timing.banner_duration();
        tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            if !model.lock().await.hide_banner(generation).await {
                tracing::trace!(generation, "Banner hide superseded");
            }
        });
    }

    /// Route a failed catalog call to the log and an error banner
    pub(crate) async fn report_error(&self, operation: &str, error: &anyhow::Error) {
        tracing::error!(operation, error = %error, "Catalog call failed");
        self.show_banner(Self::format_error(error), BannerColor::Error).await;
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::controller::test_support::controller_with;
    use crate::model::{mock::MockCatalog, BannerColor};

    #[tokio::test(start_paused = true)]
    async fn test_banner_hides_after_duration() {
        let (controller, _) = controller_with(MockCatalog::default());
        controller.show_banner("Playlist saved!", BannerColor::Success).await;

        tokio::time::sleep(Duration::from_millis(2900)).await;
        assert!(controller.model.lock().await.get_ui_state().await.banner.visible);

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(!controller.model.lock().await.get_ui_state().await.banner.visible);
    }

    #[tokio::test(start_paused = true)]
    async fn test_earlier_timer_does_not_hide_later_banner() {
        let (controller, _) = controller_with(MockCatalog::default());
        controller.show_banner("Retrieving playlists...", BannerColor::Info).await;

        tokio::time::sleep(Duration::from_millis(2000)).await;
        controller.show_banner("Playlists retrieved.", BannerColor::Success).await;

        // First banner's timer fires at 3000ms
        tokio::time::sleep(Duration::from_millis(1500)).await;
        let banner = controller.model.lock().await.get_ui_state().await.banner;
        assert!(banner.visible);
        assert_eq!(banner.text, "Playlists retrieved.");
        assert_eq!(banner.color, BannerColor::Success);

        tokio::time::sleep(Duration::from_millis(1600)).await;
        assert!(!controller.model.lock().await.get_ui_state().await.banner.visible);
    }
}
