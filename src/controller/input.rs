//! Key event handling

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::model::ActiveSection;
use super::AppController;

impl AppController {
    pub async fn handle_key_event(&self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        let model = self.model.lock().await;

        // Handle help popup
        if model.is_help_popup_open().await {
            if matches!(key.code, KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?')) {
                model.hide_help_popup().await;
            }
            return Ok(());
        }

        // Ctrl shortcuts work from every section, text fields included
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('q') | KeyCode::Char('c') => {
                    model.set_should_quit(true).await;
                }
                KeyCode::Char('s') => {
                    drop(model);
                    self.spawn_save();
                }
                KeyCode::Char('r') => {
                    drop(model);
                    self.spawn_toggle_picker();
                }
                KeyCode::Char('n') => {
                    drop(model);
                    self.cancel_edit().await;
                }
                _ => {}
            }
            return Ok(());
        }

        match key.code {
            KeyCode::Tab => {
                model.cycle_section_forward().await;
                return Ok(());
            }
            KeyCode::BackTab => {
                model.cycle_section_backward().await;
                return Ok(());
            }
            KeyCode::F(1) => {
                model.show_help_popup().await;
                return Ok(());
            }
            _ => {}
        }

        let section = model.get_ui_state().await.active_section;
        match section {
            ActiveSection::Search => match key.code {
                KeyCode::Enter => {
                    let query = model.get_ui_state().await.search_query;
                    drop(model);
                    let controller = self.clone();
                    tokio::spawn(async move {
                        controller.search(&query).await;
                    });
                }
                KeyCode::Esc => model.update_search_query(String::new()).await,
                KeyCode::Backspace => model.backspace_search().await,
                KeyCode::Char(c) => model.append_to_search(c).await,
                _ => {}
            },
            ActiveSection::PlaylistName => match key.code {
                KeyCode::Enter | KeyCode::Down => {
                    model.set_active_section(ActiveSection::PlaylistTracks).await;
                }
                KeyCode::Backspace => model.backspace_name().await,
                KeyCode::Char(c) => model.append_to_name(c).await,
                _ => {}
            },
            ActiveSection::Results => match key.code {
                KeyCode::Up => model.move_selection_up().await,
                KeyCode::Down => model.move_selection_down().await,
                KeyCode::Enter | KeyCode::Char('a') | KeyCode::Char('+') => {
                    if let Some(track) = model.get_selected_result().await {
                        drop(model);
                        self.add_track(track).await;
                    }
                }
                _ => {
                    drop(model);
                    self.handle_global_key(key.code).await;
                }
            },
            ActiveSection::PlaylistTracks => match key.code {
                KeyCode::Up => model.move_selection_up().await,
                KeyCode::Down => model.move_selection_down().await,
                KeyCode::Enter | KeyCode::Delete | KeyCode::Char('d') | KeyCode::Char('-') => {
                    if let Some(track) = model.get_selected_draft_track().await {
                        drop(model);
                        self.remove_track(track).await;
                    }
                }
                _ => {
                    drop(model);
                    self.handle_global_key(key.code).await;
                }
            },
            ActiveSection::Picker => match key.code {
                KeyCode::Up => model.move_selection_up().await,
                KeyCode::Down => model.move_selection_down().await,
                KeyCode::Enter | KeyCode::Char('e') => {
                    if let Some(playlist) = model.get_selected_playlist().await {
                        drop(model);
                        let controller = self.clone();
                        tokio::spawn(async move {
                            controller.load_playlist_for_edit(playlist.id).await;
                        });
                    }
                }
                KeyCode::Delete | KeyCode::Char('x') => {
                    if let Some(playlist) = model.get_selected_playlist().await {
                        drop(model);
                        self.delete_playlist(playlist.id).await;
                    }
                }
                _ => {
                    drop(model);
                    self.handle_global_key(key.code).await;
                }
            },
        }
        Ok(())
    }

    /// Single-letter bindings, only reachable from list sections
    async fn handle_global_key(&self, code: KeyCode) {
        match code {
            KeyCode::Char('q') => {
                self.model.lock().await.set_should_quit(true).await;
            }
            KeyCode::Char('?') => {
                self.model.lock().await.show_help_popup().await;
            }
            KeyCode::Char('/') => {
                self.model.lock().await.set_active_section(ActiveSection::Search).await;
            }
            KeyCode::Char('n') => {
                self.model.lock().await.set_active_section(ActiveSection::PlaylistName).await;
            }
            KeyCode::Char('s') => self.spawn_save(),
            KeyCode::Char('r') => self.spawn_toggle_picker(),
            _ => {}
        }
    }

    fn spawn_save(&self) {
        let controller = self.clone();
        tokio::spawn(async move {
            controller.save_playlist().await;
        });
    }

    fn spawn_toggle_picker(&self) {
        let controller = self.clone();
        tokio::spawn(async move {
            controller.toggle_playlist_picker().await;
        });
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use crate::controller::test_support::{controller_with, settle, track};
    use crate::model::{mock::{CatalogCall, MockCatalog}, ActiveSection};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[tokio::test(start_paused = true)]
    async fn test_typing_and_enter_submits_search() {
        let (controller, catalog) = controller_with(MockCatalog {
            search_results: vec![track("1")],
            ..Default::default()
        });

        for c in "abba".chars() {
            controller.handle_key_event(press(KeyCode::Char(c))).await.unwrap();
        }
        controller.handle_key_event(press(KeyCode::Backspace)).await.unwrap();
        controller.handle_key_event(press(KeyCode::Enter)).await.unwrap();
        settle().await;

        assert_eq!(catalog.calls(), vec![CatalogCall::Search("abb".to_string())]);
        let ui = controller.model.lock().await.get_ui_state().await;
        assert_eq!(ui.active_section, ActiveSection::Results);
    }

    #[tokio::test]
    async fn test_q_types_in_search_but_quits_from_lists() {
        let (controller, _) = controller_with(MockCatalog::default());

        controller.handle_key_event(press(KeyCode::Char('q'))).await.unwrap();
        assert!(!controller.model.lock().await.should_quit().await);

        controller.handle_key_event(press(KeyCode::Tab)).await.unwrap();
        controller.handle_key_event(press(KeyCode::Char('q'))).await.unwrap();
        assert!(controller.model.lock().await.should_quit().await);
    }

    #[tokio::test]
    async fn test_ctrl_c_quits_from_text_field() {
        let (controller, _) = controller_with(MockCatalog::default());
        controller.handle_key_event(ctrl('c')).await.unwrap();
        assert!(controller.model.lock().await.should_quit().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_enter_on_result_moves_it_into_draft() {
        let (controller, _) = controller_with(MockCatalog {
            search_results: vec![track("1"), track("2")],
            ..Default::default()
        });
        controller.search("x").await;

        controller.handle_key_event(press(KeyCode::Down)).await.unwrap();
        controller.handle_key_event(press(KeyCode::Enter)).await.unwrap();

        let editor = controller.model.lock().await.get_editor_state().await;
        assert_eq!(editor.draft.tracks, vec![track("2")]);
        assert_eq!(editor.search_results, vec![track("1")]);
    }

    #[tokio::test]
    async fn test_help_popup_swallows_keys() {
        let (controller, _) = controller_with(MockCatalog::default());
        controller.handle_key_event(press(KeyCode::F(1))).await.unwrap();
        controller.handle_key_event(press(KeyCode::Char('x'))).await.unwrap();

        let model = controller.model.lock().await;
        assert!(model.is_help_popup_open().await);
        assert!(model.get_ui_state().await.search_query.is_empty());
        drop(model);

        controller.handle_key_event(press(KeyCode::Esc)).await.unwrap();
        assert!(!controller.model.lock().await.is_help_popup_open().await);
    }
}
