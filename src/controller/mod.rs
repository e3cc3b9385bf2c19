//! Controller module - Application logic and event handling
//!
//! This module contains the application controller that handles user input,
//! coordinates between the model and view, and sequences catalog calls.
//! It is organized into submodules by responsibility:
//!
//! - `input`: Key event handling
//! - `editor`: Draft playlist operations (add, remove, save, load, cancel)
//! - `search`: Catalog search
//! - `picker`: Playlist picker (toggle, refresh, delete)
//! - `banner`: Status banner scheduling and error reporting

mod input;
mod editor;
mod search;
mod picker;
mod banner;

use std::sync::Arc;
use tokio::sync::Mutex;

use crate::config::TimingConfig;
use crate::model::{AppModel, CatalogClient};

#[derive(Clone)]
pub struct AppController {
    pub(crate) model: Arc<Mutex<AppModel>>,
    timing: TimingConfig,
}

impl AppController {
    pub fn new(model: Arc<Mutex<AppModel>>, timing: TimingConfig) -> Self {
        Self { model, timing }
    }

    pub(crate) async fn catalog(&self) -> Option<Arc<dyn CatalogClient>> {
        self.model.lock().await.get_catalog().await
    }

    pub(crate) fn format_error(error: &anyhow::Error) -> String {
        let error_str = error.to_string();

        if error_str.contains("401") {
            "Access token expired. Restart to authorize again.".to_string()
        } else if error_str.contains("403") {
            "Not allowed. Check the playlist belongs to you.".to_string()
        } else if error_str.contains("404") {
            "Playlist not found.".to_string()
        } else if error_str.contains("429") {
            "Rate limited. Please wait a moment.".to_string()
        } else {
            format!("Error: {}", error_str)
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::Mutex;

    use super::AppController;
    use crate::config::TimingConfig;
    use crate::model::{mock::MockCatalog, AppModel, Track};

    pub fn track(id: &str) -> Track {
        Track {
            id: id.to_string(),
            uri: format!("spotify:track:{}", id),
            name: format!("Song {}", id),
            artist: "Artist".to_string(),
            album: "Album".to_string(),
        }
    }

    pub fn controller_with(catalog: MockCatalog) -> (AppController, Arc<MockCatalog>) {
        let catalog = Arc::new(catalog);
        let mut model = AppModel::new();
        model.set_catalog(catalog.clone());
        let controller = AppController::new(Arc::new(Mutex::new(model)), TimingConfig::default());
        (controller, catalog)
    }

    /// Let spawned remote calls run without reaching any banner or refresh timer
    pub async fn settle() {
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_error() {
        let err = anyhow::anyhow!("http error: status code 401 Unauthorized");
        assert_eq!(
            AppController::format_error(&err),
            "Access token expired. Restart to authorize again."
        );

        let err = anyhow::anyhow!("connection reset");
        assert_eq!(AppController::format_error(&err), "Error: connection reset");
    }
}
