mod playback;
mod queue;
pub mod state;

use std::time::Duration;

use tokio::sync::mpsc;
use tracing::debug;

use crate::api::PlayerApi;
use crate::config::Config;
use crate::discs::group_by_disc;
use crate::notify::Notifications;
use crate::status::{PlaybackSnapshot, StatusCache};

pub use state::{AlbumDetailState, BrowseState, ViewMode};

/// Top-level application state.
///
/// Owns the remote client, the playback state cache, and the notification
/// slot; every mutation of the remote queue goes through the compound
/// actions in `queue.rs`. Single-threaded: the event loop is the only
/// writer, so no locking is needed around the cache or notices.
pub struct App {
    pub config: Config,
    pub api: Box<dyn PlayerApi>,
    pub status: StatusCache,
    pub notices: Notifications,
    pub view: ViewMode,
    pub browse: BrowseState,
    pub album_detail: AlbumDetailState,
    pub volume: u8,
    status_events: mpsc::UnboundedReceiver<PlaybackSnapshot>,
}

impl App {
    pub fn new(
        config: Config,
        api: Box<dyn PlayerApi>,
        status_events: mpsc::UnboundedReceiver<PlaybackSnapshot>,
    ) -> Self {
        let volume = config.playback.default_volume;
        let notices = Notifications::new(Duration::from_millis(config.ui.notice_ttl_ms));
        Self {
            config,
            api,
            status: StatusCache::default(),
            notices,
            view: ViewMode::Browse,
            browse: BrowseState::default(),
            album_detail: AlbumDetailState::default(),
            volume,
            status_events,
        }
    }

    /// One-shot startup work: seed the status cache and load the configured
    /// artist's albums. Both are best-effort; a dead server still gets a UI.
    pub async fn init(&mut self) {
        match self.api.status().await {
            Ok(response) => self.status.update(PlaybackSnapshot::from(response)),
            Err(e) => debug!("initial status fetch failed: {}", e),
        }

        if let Some(artist) = self.config.ui.default_artist.clone() {
            self.load_albums(&artist).await;
        }
    }

    /// Apply any snapshots the push feed has delivered since the last tick.
    /// Each event replaces the cache wholesale; only the newest matters.
    pub fn drain_status_events(&mut self) {
        while let Ok(snapshot) = self.status_events.try_recv() {
            self.status.update(snapshot);
        }
    }

    pub async fn load_albums(&mut self, artist: &str) {
        let genre = self.config.ui.default_genre.clone();
        match self.api.albums_by_artist(artist, genre.as_deref()).await {
            Ok(albums) => {
                self.browse.artist = Some(artist.to_string());
                self.browse.selected = 0;
                self.browse.albums = albums;
                self.view = ViewMode::Browse;
            }
            Err(e) => {
                self.notices
                    .error(format!("Error loading albums: {}", e.user_message()));
            }
        }
    }

    /// Drill into one album: fetch its tracks and open the disc-grouped
    /// detail view. An empty album opens an empty view; only a failed fetch
    /// is an error.
    pub async fn open_album(&mut self, artist: &str, album: &str) {
        match self.api.album_tracks(album, artist).await {
            Ok(listing) => {
                self.album_detail = AlbumDetailState {
                    artist: artist.to_string(),
                    album: album.to_string(),
                    discs: group_by_disc(listing.tracks, listing.disc_structure),
                    selected: 0,
                };
                self.view = ViewMode::AlbumDetail;
            }
            Err(e) => {
                self.notices
                    .error(format!("Error loading album tracks: {}", e.user_message()));
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use tokio::sync::mpsc;

    use super::App;
    use crate::api::{
        AlbumEntry, AlbumTracks, ApiError, ApiResult, PlayerApi, StatusResponse,
    };
    use crate::config::Config;

    /// Scriptable [`PlayerApi`] with a call log, shared between the app
    /// under test and the assertions.
    #[derive(Clone, Default)]
    pub struct MockApi {
        inner: Arc<MockState>,
    }

    #[derive(Default)]
    struct MockState {
        calls: Mutex<Vec<String>>,
        fail_status: Mutex<bool>,
        fail_clear: Mutex<Option<ApiError>>,
        fail_add: Mutex<Option<ApiError>>,
        fail_play: Mutex<bool>,
        status: Mutex<StatusResponse>,
        album_tracks: Mutex<AlbumTracks>,
    }

    impl MockApi {
        pub fn calls(&self) -> Vec<String> {
            self.inner.calls.lock().unwrap().clone()
        }

        pub fn call_count(&self, name: &str) -> usize {
            self.calls().iter().filter(|c| c.as_str() == name).count()
        }

        pub fn set_status(&self, status: StatusResponse) {
            *self.inner.status.lock().unwrap() = status;
        }

        pub fn fail_status(&self) {
            *self.inner.fail_status.lock().unwrap() = true;
        }

        pub fn fail_clear(&self, error: ApiError) {
            *self.inner.fail_clear.lock().unwrap() = Some(error);
        }

        pub fn fail_add(&self, error: ApiError) {
            *self.inner.fail_add.lock().unwrap() = Some(error);
        }

        pub fn fail_play(&self) {
            *self.inner.fail_play.lock().unwrap() = true;
        }

        pub fn set_album_tracks(&self, listing: AlbumTracks) {
            *self.inner.album_tracks.lock().unwrap() = listing;
        }

        fn record(&self, name: &str) {
            self.inner.calls.lock().unwrap().push(name.to_string());
        }
    }

    #[async_trait]
    impl PlayerApi for MockApi {
        async fn status(&self) -> ApiResult<StatusResponse> {
            self.record("status");
            if *self.inner.fail_status.lock().unwrap() {
                return Err(ApiError::Network("connection refused".to_string()));
            }
            Ok(self.inner.status.lock().unwrap().clone())
        }

        async fn albums_by_artist(
            &self,
            _artist: &str,
            genre: Option<&str>,
        ) -> ApiResult<Vec<AlbumEntry>> {
            match genre {
                Some(genre) => self.record(&format!("albums_by_artist:{}", genre)),
                None => self.record("albums_by_artist"),
            }
            Ok(Vec::new())
        }

        async fn album_tracks(&self, _album: &str, _artist: &str) -> ApiResult<AlbumTracks> {
            self.record("album_tracks");
            Ok(self.inner.album_tracks.lock().unwrap().clone())
        }

        async fn clear_queue(&self) -> ApiResult<()> {
            self.record("clear_queue");
            match self.inner.fail_clear.lock().unwrap().clone() {
                Some(e) => Err(e),
                None => Ok(()),
            }
        }

        async fn add_album(
            &self,
            _artist: &str,
            _album: &str,
            _disc_number: Option<u32>,
        ) -> ApiResult<()> {
            self.record("add_album");
            match self.inner.fail_add.lock().unwrap().clone() {
                Some(e) => Err(e),
                None => Ok(()),
            }
        }

        async fn add_track(&self, _file: &str) -> ApiResult<()> {
            self.record("add_track");
            match self.inner.fail_add.lock().unwrap().clone() {
                Some(e) => Err(e),
                None => Ok(()),
            }
        }

        async fn play(&self) -> ApiResult<()> {
            self.record("play");
            if *self.inner.fail_play.lock().unwrap() {
                return Err(ApiError::Remote("no tracks in queue".to_string()));
            }
            Ok(())
        }

        async fn pause(&self) -> ApiResult<()> {
            self.record("pause");
            Ok(())
        }

        async fn next(&self) -> ApiResult<()> {
            self.record("next");
            Ok(())
        }

        async fn previous(&self) -> ApiResult<()> {
            self.record("previous");
            Ok(())
        }

        async fn set_volume(&self, volume: u8) -> ApiResult<()> {
            self.record(&format!("set_volume:{}", volume));
            Ok(())
        }
    }

    pub fn test_app(mock: &MockApi) -> App {
        let (_tx, rx) = mpsc::unbounded_channel();
        App::new(Config::default(), Box::new(mock.clone()), rx)
    }
}
