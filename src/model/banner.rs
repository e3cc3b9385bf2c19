//! Transient status banner

use super::types::BannerColor;

/// Self-expiring feedback message shown below the playlist editor.
///
/// Every `show` bumps a generation number. The controller schedules a hide
/// for that generation; a hide for an older generation is ignored, so a
/// banner raised later is never cut short by an earlier timer.
#[derive(Clone, Debug, Default)]
pub struct StatusBanner {
    pub text: String,
    pub color: BannerColor,
    pub visible: bool,
    generation: u64,
}

impl StatusBanner {
    pub fn show(&mut self, text: impl Into<String>, color: BannerColor) -> u64 {
        self.generation += 1;
        self.text = text.into();
        self.color = color;
        self.visible = true;
        self.generation
    }

    /// Returns true if the banner was hidden.
    pub fn hide(&mut self, generation: u64) -> bool {
        if generation != self.generation {
            return false;
        }
        self.visible = false;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_makes_visible() {
        let mut banner = StatusBanner::default();
        assert!(!banner.visible);

        banner.show("Playlist saved!", BannerColor::Success);
        assert!(banner.visible);
        assert_eq!(banner.text, "Playlist saved!");
        assert_eq!(banner.color, BannerColor::Success);
    }

    #[test]
    fn test_stale_hide_is_ignored() {
        let mut banner = StatusBanner::default();
        let first = banner.show("Retrieving playlists...", BannerColor::Info);
        let second = banner.show("Playlists retrieved.", BannerColor::Success);

        assert!(!banner.hide(first));
        assert!(banner.visible);
        assert_eq!(banner.text, "Playlists retrieved.");

        assert!(banner.hide(second));
        assert!(!banner.visible);
    }
}
