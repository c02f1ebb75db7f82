use tracing::{debug, warn};

use super::App;
use crate::status::{PlayState, PlaybackSnapshot};

impl App {
    /// Toggle between play and pause.
    ///
    /// The decision reads the playback state cache; when the cache has never
    /// been populated a fresh status fetch disambiguates instead, so a stale
    /// startup state does not pause an already-paused player. Anything other
    /// than a confirmed `Playing` resolves to play.
    pub async fn toggle_play_pause(&mut self) {
        let mut state = self.status.get().state;

        if state == PlayState::Unknown {
            match self.api.status().await {
                Ok(response) => {
                    let snapshot = PlaybackSnapshot::from(response);
                    state = snapshot.state;
                    self.status.update(snapshot);
                }
                Err(e) => debug!("status fetch for toggle failed: {}", e),
            }
        }

        if state == PlayState::Playing {
            match self.api.pause().await {
                Ok(()) => self.notices.info("Paused"),
                Err(e) => self.notices.error(format!("Failed to pause: {}", e.user_message())),
            }
        } else {
            match self.api.play().await {
                Ok(()) => self.notices.info("Playing"),
                Err(e) => self.notices.error(format!("Failed to play: {}", e.user_message())),
            }
        }
    }

    pub async fn next_track(&mut self) {
        match self.api.next().await {
            Ok(()) => self.notices.info("Next track"),
            Err(e) => self
                .notices
                .error(format!("Failed to skip: {}", e.user_message())),
        }
    }

    pub async fn previous_track(&mut self) {
        match self.api.previous().await {
            Ok(()) => self.notices.info("Previous track"),
            Err(e) => self
                .notices
                .error(format!("Failed to go back: {}", e.user_message())),
        }
    }

    /// Nudge the volume by `delta` percentage points, clamped to 0..=100.
    ///
    /// Refused with a warning when the deployment hides volume controls.
    /// The absolute value is sent to the server; remote failure is logged
    /// but stays silent in the UI, matching the other transport controls'
    /// cosmetic role.
    pub async fn adjust_volume(&mut self, delta: i16) {
        if !self.config.ui.show_volume_controls {
            self.notices.warning("Volume controls hidden");
            return;
        }

        let new_volume = (i16::from(self.volume) + delta).clamp(0, 100) as u8;
        match self.api.set_volume(new_volume).await {
            Ok(()) => {
                self.volume = new_volume;
                if delta >= 0 {
                    self.notices.info(format!("Volume +{}%", delta));
                } else {
                    self.notices.info(format!("Volume {}%", delta));
                }
            }
            Err(e) => warn!("volume change failed: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::api::StatusResponse;
    use crate::app::testing::{test_app, MockApi};
    use crate::notify::NoticeKind;
    use crate::status::{PlayState, PlaybackSnapshot};

    #[tokio::test]
    async fn toggle_pauses_when_cache_says_playing() {
        let mock = MockApi::default();
        let mut app = test_app(&mock);
        app.status.update(PlaybackSnapshot {
            state: PlayState::Playing,
            ..PlaybackSnapshot::default()
        });

        app.toggle_play_pause().await;

        assert_eq!(mock.calls(), vec!["pause"]);
    }

    #[tokio::test]
    async fn toggle_plays_when_cache_says_paused() {
        let mock = MockApi::default();
        let mut app = test_app(&mock);
        app.status.update(PlaybackSnapshot {
            state: PlayState::Paused,
            ..PlaybackSnapshot::default()
        });

        app.toggle_play_pause().await;

        assert_eq!(mock.calls(), vec!["play"]);
    }

    #[tokio::test]
    async fn toggle_with_unknown_cache_fetches_fresh_status() {
        let mock = MockApi::default();
        mock.set_status(StatusResponse {
            state: "play".to_string(),
            ..StatusResponse::default()
        });
        let mut app = test_app(&mock);

        app.toggle_play_pause().await;

        assert_eq!(mock.calls(), vec!["status", "pause"]);
        // The fetched snapshot was kept.
        assert_eq!(app.status.get().state, PlayState::Playing);
    }

    #[tokio::test]
    async fn volume_is_clamped_to_bounds() {
        let mock = MockApi::default();
        let mut app = test_app(&mock);
        app.volume = 99;

        app.adjust_volume(2).await;
        assert_eq!(app.volume, 100);
        assert_eq!(mock.calls(), vec!["set_volume:100"]);

        app.volume = 1;
        app.adjust_volume(-2).await;
        assert_eq!(app.volume, 0);
    }

    #[tokio::test]
    async fn hidden_volume_controls_refuse_with_warning() {
        let mock = MockApi::default();
        let mut app = test_app(&mock);
        app.config.ui.show_volume_controls = false;

        app.adjust_volume(2).await;

        assert!(mock.calls().is_empty());
        let notice = app.notices.current().expect("warning notice");
        assert_eq!(notice.kind, NoticeKind::Warning);
    }
}
