use std::collections::HashMap;
use std::fmt;

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Failure modes of the remote control API.
///
/// `Network` is a transport problem: the request never completed, or the
/// server answered non-2xx with nothing interpretable. `Remote` is a
/// well-formed error response from the server and carries its message.
/// Retry policy belongs to callers; this layer reports each call once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    Network(String),
    Remote(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "network error: {}", msg),
            ApiError::Remote(msg) => write!(f, "server error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    /// The message a user should see for this failure.
    pub fn user_message(&self) -> &str {
        match self {
            ApiError::Network(msg) | ApiError::Remote(msg) => msg,
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Raw playback status as the server reports it.
///
/// Absent fields may arrive as `"N/A"` or empty strings; normalization into
/// a snapshot happens in `crate::status`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatusResponse {
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub album: Option<String>,
    #[serde(default)]
    pub song_title: Option<String>,
    #[serde(default)]
    pub queue_length: u64,
}

/// One track record from the catalog.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Track {
    pub file: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub album: Option<String>,
    // The server reports track length under "time", sometimes as a string.
    #[serde(default, rename = "time", deserialize_with = "seconds_lenient")]
    pub duration_seconds: Option<u32>,
    #[serde(default)]
    pub disc_number: Option<u32>,
}

/// One album row from the browse listing. Multi-disc albums may be split by
/// the server into one entry per disc, flagged with `disc_number`.
#[derive(Debug, Clone, Deserialize)]
pub struct AlbumEntry {
    pub artist: String,
    pub album: String,
    #[serde(default)]
    pub track_count: u32,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub disc_number: Option<u32>,
    #[serde(default)]
    pub sample_file: Option<String>,
}

/// Track listing for one album, with the server's authoritative disc split
/// when the album spans multiple discs. Mapping keys are disc numbers, but
/// arrive as JSON object keys (strings).
#[derive(Debug, Clone, Default)]
pub struct AlbumTracks {
    pub tracks: Vec<Track>,
    pub disc_structure: Option<HashMap<String, Vec<Track>>>,
}

fn seconds_lenient<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_u64().map(|n| n as u32),
        Some(Value::String(s)) => s.trim().parse::<u32>().ok(),
        _ => None,
    })
}

/// The remote control surface of the music server.
///
/// One method per server capability, each returning a normalized result.
/// The orchestrator in `crate::app` owns sequencing, messaging, and any
/// retry decisions; implementations here just issue one call.
#[async_trait]
pub trait PlayerApi: Send + Sync {
    async fn status(&self) -> ApiResult<StatusResponse>;
    async fn albums_by_artist(&self, artist: &str, genre: Option<&str>)
        -> ApiResult<Vec<AlbumEntry>>;
    async fn album_tracks(&self, album: &str, artist: &str) -> ApiResult<AlbumTracks>;
    async fn clear_queue(&self) -> ApiResult<()>;
    async fn add_album(&self, artist: &str, album: &str, disc_number: Option<u32>)
        -> ApiResult<()>;
    async fn add_track(&self, file: &str) -> ApiResult<()>;
    async fn play(&self) -> ApiResult<()>;
    async fn pause(&self) -> ApiResult<()>;
    async fn next(&self) -> ApiResult<()>;
    async fn previous(&self) -> ApiResult<()>;
    async fn set_volume(&self, volume: u8) -> ApiResult<()>;
}

// Command responses share one envelope: {"status": "success"|"error", "message"?}
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AlbumsResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    albums: Vec<AlbumEntry>,
}

#[derive(Debug, Deserialize)]
struct AlbumTracksResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    tracks: Vec<Track>,
    #[serde(default)]
    disc_structure: Option<HashMap<String, Vec<Track>>>,
}

#[derive(serde::Serialize)]
struct AddAlbumPayload<'a> {
    artist: &'a str,
    album: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    disc_number: Option<u32>,
}

/// HTTP implementation of [`PlayerApi`].
///
/// Holds no mutable session state between calls; cloning shares the
/// underlying connection pool. Identifiers are passed unencoded and escaped
/// here via reqwest's query/form serialization.
#[derive(Clone)]
pub struct HttpPlayerApi {
    base_url: String,
    http: HttpClient,
}

impl HttpPlayerApi {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: HttpClient::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Interpret a response body against the shared status envelope.
    fn check_envelope(status: reqwest::StatusCode, body: &str) -> ApiResult<()> {
        if let Ok(envelope) = serde_json::from_str::<Envelope>(body) {
            if envelope.status.as_deref() == Some("error") {
                return Err(ApiError::Remote(
                    envelope
                        .message
                        .unwrap_or_else(|| "server reported an error".to_string()),
                ));
            }
        }
        if status.is_success() {
            // Some endpoints answer with opaque text; a 2xx is enough.
            return Ok(());
        }
        Err(ApiError::Network(format!("server returned {}", status)))
    }

    async fn post_command(&self, path: &str) -> ApiResult<()> {
        let response = self
            .http
            .post(self.url(path))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::check_envelope(status, &body)
    }

    async fn get_text(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> ApiResult<(reqwest::StatusCode, String)> {
        let response = self
            .http
            .get(self.url(path))
            .query(query)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Ok((status, body))
    }
}

#[async_trait]
impl PlayerApi for HttpPlayerApi {
    async fn status(&self) -> ApiResult<StatusResponse> {
        let (status, body) = self.get_text("/api/status", &[]).await?;
        if !status.is_success() {
            return Err(ApiError::Network(format!("server returned {}", status)));
        }
        serde_json::from_str(&body).map_err(|e| ApiError::Network(e.to_string()))
    }

    async fn albums_by_artist(
        &self,
        artist: &str,
        genre: Option<&str>,
    ) -> ApiResult<Vec<AlbumEntry>> {
        let mut query = vec![("artist", artist)];
        if let Some(genre) = genre {
            query.push(("genre", genre));
        }
        let (status, body) = self.get_text("/api/browse/albums", &query).await?;
        let parsed: AlbumsResponse = serde_json::from_str(&body)
            .map_err(|_| ApiError::Network(format!("server returned {}", status)))?;
        if parsed.status.as_deref() == Some("error") {
            return Err(ApiError::Remote(
                parsed
                    .message
                    .unwrap_or_else(|| "failed to load albums".to_string()),
            ));
        }
        Ok(parsed.albums)
    }

    async fn album_tracks(&self, album: &str, artist: &str) -> ApiResult<AlbumTracks> {
        let query = [("album", album), ("artist", artist)];
        let (status, body) = self.get_text("/api/album_tracks", &query).await?;
        let parsed: AlbumTracksResponse = serde_json::from_str(&body)
            .map_err(|_| ApiError::Network(format!("server returned {}", status)))?;
        if parsed.status.as_deref() == Some("error") {
            return Err(ApiError::Remote(
                parsed
                    .message
                    .unwrap_or_else(|| "failed to load album tracks".to_string()),
            ));
        }
        Ok(AlbumTracks {
            tracks: parsed.tracks,
            disc_structure: parsed.disc_structure,
        })
    }

    async fn clear_queue(&self) -> ApiResult<()> {
        self.post_command("/api/queue/clear").await
    }

    async fn add_album(
        &self,
        artist: &str,
        album: &str,
        disc_number: Option<u32>,
    ) -> ApiResult<()> {
        let payload = AddAlbumPayload {
            artist,
            album,
            disc_number,
        };
        let response = self
            .http
            .post(self.url("/api/queue/add_album"))
            .json(&payload)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::check_envelope(status, &body)
    }

    async fn add_track(&self, file: &str) -> ApiResult<()> {
        let response = self
            .http
            .post(self.url("/api/queue/add_track"))
            .form(&[("file", file)])
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::check_envelope(status, &body)
    }

    async fn play(&self) -> ApiResult<()> {
        self.post_command("/api/play").await
    }

    async fn pause(&self) -> ApiResult<()> {
        self.post_command("/api/pause").await
    }

    async fn next(&self) -> ApiResult<()> {
        self.post_command("/api/next").await
    }

    async fn previous(&self) -> ApiResult<()> {
        self.post_command("/api/previous").await
    }

    async fn set_volume(&self, volume: u8) -> ApiResult<()> {
        let response = self
            .http
            .post(self.url("/api/volume"))
            .form(&[("volume", volume.to_string())])
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(ApiError::Network(format!(
                "server returned {}",
                response.status()
            )))
        }
    }
}
