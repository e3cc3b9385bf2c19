//! Catalog search

use crate::model::ActiveSection;
use super::AppController;

impl AppController {
    /// Replace the result set with the catalog's answer. The query is sent
    /// as typed, empty or not.
    pub async fn search(&self, query: &str) {
        tracing::debug!(query, "Performing search");
        let Some(catalog) = self.catalog().await else {
            return;
        };

        match catalog.search(query).await {
            Ok(tracks) => {
                tracing::info!(query, tracks = tracks.len(), "Search completed successfully");
                let model = self.model.lock().await;
                model.set_search_results(tracks).await;
                model.set_active_section(ActiveSection::Results).await;
            }
            Err(e) => self.report_error("search", &e).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::controller::test_support::{controller_with, track};
    use crate::model::{mock::{CatalogCall, MockCatalog}, ActiveSection, BannerColor};

    #[tokio::test]
    async fn test_search_replaces_results_in_order() {
        let (controller, catalog) = controller_with(MockCatalog {
            search_results: vec![track("3"), track("1"), track("2")],
            ..Default::default()
        });

        controller.search("daft punk").await;

        let editor = controller.model.lock().await.get_editor_state().await;
        let ids: Vec<_> = editor.search_results.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["3", "1", "2"]);
        assert_eq!(catalog.calls(), vec![CatalogCall::Search("daft punk".to_string())]);

        let ui = controller.model.lock().await.get_ui_state().await;
        assert_eq!(ui.active_section, ActiveSection::Results);
    }

    #[tokio::test]
    async fn test_empty_query_is_submitted() {
        let (controller, catalog) = controller_with(MockCatalog::default());
        controller.search("").await;
        assert_eq!(catalog.calls(), vec![CatalogCall::Search(String::new())]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_search_failure_shows_error_banner() {
        let (controller, _) = controller_with(MockCatalog {
            search_results: vec![track("1")],
            fail: true,
            ..Default::default()
        });

        controller.search("x").await;

        let model = controller.model.lock().await;
        assert!(model.get_editor_state().await.search_results.is_empty());
        let banner = model.get_ui_state().await.banner;
        assert!(banner.visible);
        assert_eq!(banner.color, BannerColor::Error);
    }
}
