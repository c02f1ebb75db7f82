use std::time::Duration;

use tracing::{debug, error, warn};

use super::App;
use crate::api::ApiError;

/// Pause between a successful queue replace and the auto-play call, so the
/// server has applied the new queue before playback starts.
const AUTOPLAY_SETTLE: Duration = Duration::from_millis(500);

/// Pick the user-facing text for a failed step: the server's own message
/// when it sent one, otherwise the per-action fallback. The network/remote
/// distinction only matters for the logs.
fn step_error(e: &ApiError, fallback: &str) -> String {
    match e {
        ApiError::Remote(msg) => msg.clone(),
        ApiError::Network(_) => fallback.to_string(),
    }
}

impl App {
    /// Replace the queue with an album (optionally a single disc) and start
    /// playback.
    ///
    /// Steps run strictly in order and the pipeline stops at the first
    /// failed remote call, leaving exactly one terminal notice. The leading
    /// status fetch only feeds the "N tracks cleared" message; its failure
    /// degrades to an unknown count. The trailing play call is best-effort
    /// and can never displace the success notice.
    pub async fn replace_with_album(&mut self, artist: &str, album: &str, disc_number: Option<u32>) {
        let cleared = match self.api.status().await {
            Ok(status) => Some(status.queue_length),
            Err(e) => {
                debug!("queue length prefetch failed: {}", e);
                None
            }
        };

        if let Err(e) = self.api.clear_queue().await {
            error!("queue clear failed: {}", e);
            self.notices
                .error(step_error(&e, "Failed to clear queue"));
            return;
        }

        if let Err(e) = self.api.add_album(artist, album, disc_number).await {
            // The queue is already cleared at this point; the notice is the
            // only record of that terminal state, there is no rollback.
            error!("album add after clear failed: {}", e);
            self.notices.error(format!(
                "Queue cleared, but album could not be added: {}",
                step_error(&e, "request failed")
            ));
            return;
        }

        let disc_info = disc_number
            .map(|n| format!(" (Disc {})", n))
            .unwrap_or_default();
        self.notices.success(match cleared {
            Some(n) => format!(
                "{} tracks cleared, now playing: {} - {}{}",
                n, artist, album, disc_info
            ),
            None => format!("Now playing: {} - {}{}", artist, album, disc_info),
        });

        tokio::time::sleep(AUTOPLAY_SETTLE).await;
        if let Err(e) = self.api.play().await {
            warn!("auto-play after queue replace failed: {}", e);
        }
    }

    /// Replace the queue with a single track and start playback. Same
    /// pipeline and failure semantics as [`App::replace_with_album`].
    pub async fn replace_with_track(&mut self, file: &str, title: Option<&str>) {
        let cleared = match self.api.status().await {
            Ok(status) => Some(status.queue_length),
            Err(e) => {
                debug!("queue length prefetch failed: {}", e);
                None
            }
        };

        if let Err(e) = self.api.clear_queue().await {
            error!("queue clear failed: {}", e);
            self.notices
                .error(step_error(&e, "Failed to clear queue"));
            return;
        }

        if let Err(e) = self.api.add_track(file).await {
            error!("track add after clear failed: {}", e);
            self.notices.error(format!(
                "Queue cleared, but track could not be added: {}",
                step_error(&e, "request failed")
            ));
            return;
        }

        let name = title.unwrap_or("song");
        self.notices.success(match cleared {
            Some(n) => format!("{} tracks cleared, now playing: {}", n, name),
            None => format!("Now playing: {}", name),
        });

        tokio::time::sleep(AUTOPLAY_SETTLE).await;
        if let Err(e) = self.api.play().await {
            warn!("auto-play after queue replace failed: {}", e);
        }
    }

    /// Append an album (or one disc of it) to the queue.
    pub async fn add_album_to_queue(&mut self, artist: &str, album: &str, disc_number: Option<u32>) {
        match self.api.add_album(artist, album, disc_number).await {
            Ok(()) => {
                let disc_info = disc_number
                    .map(|n| format!(" (Disc {})", n))
                    .unwrap_or_default();
                self.notices.success(format!(
                    "Album \"{}\" by {}{} added to queue",
                    album, artist, disc_info
                ));
            }
            Err(e) => {
                error!("album add failed: {}", e);
                self.notices.error(step_error(&e, "Failed to add album"));
            }
        }
    }

    /// Append a single track to the queue.
    pub async fn add_track_to_queue(&mut self, file: &str, title: Option<&str>) {
        match self.api.add_track(file).await {
            Ok(()) => match title {
                Some(title) => self.notices.success(format!("Added: {}", title)),
                None => self.notices.success("Track added to queue"),
            },
            Err(e) => {
                error!("track add failed: {}", e);
                self.notices.error(step_error(&e, "Failed to add track"));
            }
        }
    }

    /// Clear the whole queue.
    pub async fn clear_queue(&mut self) {
        match self.api.clear_queue().await {
            Ok(()) => self.notices.info("Queue cleared"),
            Err(e) => {
                error!("queue clear failed: {}", e);
                self.notices
                    .error(step_error(&e, "Failed to clear queue"));
            }
        }
    }
}
