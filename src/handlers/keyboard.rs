use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, ViewMode};

pub enum KeyAction {
    Continue,
    Quit,
}

/// The fixed transport key set, shared by every view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportAction {
    TogglePlayPause,
    PreviousTrack,
    NextTrack,
    VolumeUp,
    VolumeDown,
}

/// UI context the router needs for its suppression rules.
pub struct RouteContext {
    /// Transport keys are inert on the settings view.
    pub settings_view: bool,
    /// Transport keys are never intercepted while the user is typing.
    pub text_input_focused: bool,
}

/// Map a key to a transport action, or `None` when the key is not part of
/// the transport set or the context suppresses it. A `Some` result means the
/// key is claimed and its default behavior is consumed.
pub fn route_transport_key(code: KeyCode, ctx: &RouteContext) -> Option<TransportAction> {
    if ctx.settings_view || ctx.text_input_focused {
        return None;
    }
    match code {
        KeyCode::Char(' ') => Some(TransportAction::TogglePlayPause),
        KeyCode::Left => Some(TransportAction::PreviousTrack),
        KeyCode::Right => Some(TransportAction::NextTrack),
        KeyCode::Up => Some(TransportAction::VolumeUp),
        KeyCode::Down => Some(TransportAction::VolumeDown),
        _ => None,
    }
}

pub async fn handle_key_event(app: &mut App, key: KeyEvent) -> KeyAction {
    // Artist prompt has focus: everything goes to the text input.
    if app.browse.input_active {
        return handle_artist_input(app, key).await;
    }

    let ctx = RouteContext {
        settings_view: app.view == ViewMode::Settings,
        text_input_focused: app.browse.input_active,
    };
    if let Some(action) = route_transport_key(key.code, &ctx) {
        apply_transport_action(app, action).await;
        return KeyAction::Continue;
    }

    match app.view {
        ViewMode::Browse => handle_browse_keys(app, key).await,
        ViewMode::AlbumDetail => handle_album_detail_keys(app, key).await,
        ViewMode::Settings => handle_settings_keys(app, key),
    }
}

async fn apply_transport_action(app: &mut App, action: TransportAction) {
    let step = i16::from(app.config.playback.volume_step);
    match action {
        TransportAction::TogglePlayPause => app.toggle_play_pause().await,
        TransportAction::PreviousTrack => app.previous_track().await,
        TransportAction::NextTrack => app.next_track().await,
        TransportAction::VolumeUp => app.adjust_volume(step).await,
        TransportAction::VolumeDown => app.adjust_volume(-step).await,
    }
}

async fn handle_artist_input(app: &mut App, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Enter => {
            app.browse.input_active = false;
            let artist = app.browse.artist_input.trim().to_string();
            if !artist.is_empty() {
                app.load_albums(&artist).await;
            }
        }
        KeyCode::Esc => {
            app.browse.input_active = false;
            app.browse.artist_input.clear();
        }
        KeyCode::Backspace => {
            app.browse.artist_input.pop();
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.browse.artist_input.push(c);
        }
        _ => {}
    }
    KeyAction::Continue
}

async fn handle_browse_keys(app: &mut App, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Char('q') => return KeyAction::Quit,
        KeyCode::Char('/') => {
            app.browse.input_active = true;
            app.browse.artist_input.clear();
        }
        KeyCode::Char('j') => app.browse.select_next(),
        KeyCode::Char('k') => app.browse.select_previous(),
        KeyCode::Enter => {
            if let Some(entry) = app.browse.selected_album() {
                let (artist, album) = (entry.artist.clone(), entry.album.clone());
                app.open_album(&artist, &album).await;
            }
        }
        KeyCode::Char('r') => {
            if let Some(entry) = app.browse.selected_album() {
                let (artist, album, disc) =
                    (entry.artist.clone(), entry.album.clone(), entry.disc_number);
                app.replace_with_album(&artist, &album, disc).await;
            }
        }
        KeyCode::Char('a') => {
            if let Some(entry) = app.browse.selected_album() {
                let (artist, album, disc) =
                    (entry.artist.clone(), entry.album.clone(), entry.disc_number);
                app.add_album_to_queue(&artist, &album, disc).await;
            }
        }
        KeyCode::Char('c') => app.clear_queue().await,
        KeyCode::Char('s') => app.view = ViewMode::Settings,
        _ => {}
    }
    KeyAction::Continue
}

async fn handle_album_detail_keys(app: &mut App, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Char('q') => return KeyAction::Quit,
        KeyCode::Esc | KeyCode::Char('h') => app.view = ViewMode::Browse,
        KeyCode::Char('j') => app.album_detail.select_next(),
        KeyCode::Char('k') => app.album_detail.select_previous(),
        KeyCode::Enter | KeyCode::Char('r') => {
            if let Some((_, track)) = app.album_detail.selected_track() {
                let (file, title) = (track.file.clone(), track.title.clone());
                app.replace_with_track(&file, title.as_deref()).await;
            }
        }
        KeyCode::Char('a') => {
            if let Some((_, track)) = app.album_detail.selected_track() {
                let (file, title) = (track.file.clone(), track.title.clone());
                app.add_track_to_queue(&file, title.as_deref()).await;
            }
        }
        KeyCode::Char('d') => {
            // Queue the whole disc the selection sits on.
            if let Some((disc, _)) = app.album_detail.selected_track() {
                let disc_number = disc.disc_number;
                let (artist, album) =
                    (app.album_detail.artist.clone(), app.album_detail.album.clone());
                app.add_album_to_queue(&artist, &album, disc_number).await;
            }
        }
        KeyCode::Char('c') => app.clear_queue().await,
        _ => {}
    }
    KeyAction::Continue
}

fn handle_settings_keys(app: &mut App, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Char('q') => return KeyAction::Quit,
        KeyCode::Esc | KeyCode::Char('s') => app.view = ViewMode::Browse,
        _ => {}
    }
    KeyAction::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::testing::{test_app, MockApi};
    use crate::app::ViewMode;
    use crate::notify::NoticeKind;
    use crate::status::{PlayState, PlaybackSnapshot};

    fn plain(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn transport_keys_map_to_actions() {
        let ctx = RouteContext {
            settings_view: false,
            text_input_focused: false,
        };
        assert_eq!(
            route_transport_key(KeyCode::Char(' '), &ctx),
            Some(TransportAction::TogglePlayPause)
        );
        assert_eq!(
            route_transport_key(KeyCode::Left, &ctx),
            Some(TransportAction::PreviousTrack)
        );
        assert_eq!(
            route_transport_key(KeyCode::Right, &ctx),
            Some(TransportAction::NextTrack)
        );
        assert_eq!(
            route_transport_key(KeyCode::Up, &ctx),
            Some(TransportAction::VolumeUp)
        );
        assert_eq!(
            route_transport_key(KeyCode::Down, &ctx),
            Some(TransportAction::VolumeDown)
        );
        assert_eq!(route_transport_key(KeyCode::Char('x'), &ctx), None);
    }

    #[test]
    fn settings_view_suppresses_transport_keys() {
        let ctx = RouteContext {
            settings_view: true,
            text_input_focused: false,
        };
        assert_eq!(route_transport_key(KeyCode::Char(' '), &ctx), None);
        assert_eq!(route_transport_key(KeyCode::Right, &ctx), None);
    }

    #[test]
    fn text_input_focus_suppresses_transport_keys() {
        let ctx = RouteContext {
            settings_view: false,
            text_input_focused: true,
        };
        assert_eq!(route_transport_key(KeyCode::Right, &ctx), None);
        assert_eq!(route_transport_key(KeyCode::Up, &ctx), None);
    }

    #[tokio::test]
    async fn arrow_right_while_typing_never_reaches_next_track() {
        let mock = MockApi::default();
        let mut app = test_app(&mock);
        app.browse.input_active = true;

        handle_key_event(&mut app, plain(KeyCode::Right)).await;

        assert_eq!(mock.call_count("next"), 0);
    }

    #[tokio::test]
    async fn typed_characters_go_to_the_artist_prompt() {
        let mock = MockApi::default();
        let mut app = test_app(&mock);
        app.browse.input_active = true;

        handle_key_event(&mut app, plain(KeyCode::Char('a'))).await;
        handle_key_event(&mut app, plain(KeyCode::Char(' '))).await;
        handle_key_event(&mut app, plain(KeyCode::Char('b'))).await;

        assert_eq!(app.browse.artist_input, "a b");
        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn arrow_right_in_browse_skips_to_next_track() {
        let mock = MockApi::default();
        let mut app = test_app(&mock);

        handle_key_event(&mut app, plain(KeyCode::Right)).await;

        assert_eq!(mock.calls(), vec!["next"]);
    }

    #[tokio::test]
    async fn space_toggles_using_the_cache() {
        let mock = MockApi::default();
        let mut app = test_app(&mock);
        app.status.update(PlaybackSnapshot {
            state: PlayState::Playing,
            ..PlaybackSnapshot::default()
        });

        handle_key_event(&mut app, plain(KeyCode::Char(' '))).await;

        assert_eq!(mock.calls(), vec!["pause"]);
    }

    #[tokio::test]
    async fn transport_keys_are_inert_on_settings_view() {
        let mock = MockApi::default();
        let mut app = test_app(&mock);
        app.view = ViewMode::Settings;

        handle_key_event(&mut app, plain(KeyCode::Char(' '))).await;
        handle_key_event(&mut app, plain(KeyCode::Right)).await;
        handle_key_event(&mut app, plain(KeyCode::Up)).await;

        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn volume_key_with_hidden_controls_warns() {
        let mock = MockApi::default();
        let mut app = test_app(&mock);
        app.config.ui.show_volume_controls = false;

        handle_key_event(&mut app, plain(KeyCode::Up)).await;

        assert!(mock.calls().is_empty());
        let notice = app.notices.current().expect("warning notice");
        assert_eq!(notice.kind, NoticeKind::Warning);
    }
}
