use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::api::{PlayerApi, StatusResponse};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayState {
    Playing,
    Paused,
    Stopped,
    #[default]
    Unknown,
}

impl PlayState {
    pub fn parse(state: &str) -> Self {
        match state {
            "play" | "playing" => PlayState::Playing,
            "pause" | "paused" => PlayState::Paused,
            "stop" | "stopped" => PlayState::Stopped,
            _ => PlayState::Unknown,
        }
    }
}

/// Point-in-time copy of remote playback state.
///
/// Replaced wholesale on every update; readers never see a partial write.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaybackSnapshot {
    pub state: PlayState,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub track_title: Option<String>,
    pub queue_length: u64,
}

// The server reports absent fields as "N/A" or empty strings.
fn normalize(field: Option<String>) -> Option<String> {
    field.filter(|s| !s.is_empty() && s != "N/A")
}

impl From<StatusResponse> for PlaybackSnapshot {
    fn from(response: StatusResponse) -> Self {
        Self {
            state: PlayState::parse(&response.state),
            artist: normalize(response.artist),
            album: normalize(response.album),
            track_title: normalize(response.song_title),
            queue_length: response.queue_length,
        }
    }
}

/// Owner of the current [`PlaybackSnapshot`].
///
/// Written by the startup status fetch and by events drained from the push
/// feed; stale by at most one feed interval. Readers must not block waiting
/// for freshness.
#[derive(Debug, Default)]
pub struct StatusCache {
    snapshot: PlaybackSnapshot,
}

impl StatusCache {
    pub fn get(&self) -> &PlaybackSnapshot {
        &self.snapshot
    }

    pub fn update(&mut self, snapshot: PlaybackSnapshot) {
        self.snapshot = snapshot;
    }
}

/// Background producer for the push feed.
///
/// Fetches status on a fixed interval and publishes each result as a
/// snapshot event. Fetch failures are logged and skipped; the previous
/// snapshot simply stays current. The task ends when the receiver is gone.
pub fn spawn_status_poller(
    api: impl PlayerApi + 'static,
    tx: mpsc::UnboundedSender<PlaybackSnapshot>,
    interval: Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        loop {
            ticker.tick().await;
            match api.status().await {
                Ok(response) => {
                    if tx.send(PlaybackSnapshot::from(response)).is_err() {
                        debug!("status feed closed, stopping poller");
                        return;
                    }
                }
                Err(e) => warn!("status poll failed: {}", e),
            }
        }
    })
}
