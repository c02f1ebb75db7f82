use crate::api::{AlbumEntry, Track};
use crate::discs::DiscGroup;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Browse,
    AlbumDetail,
    Settings,
}

/// Album browse state
#[derive(Default)]
pub struct BrowseState {
    pub artist: Option<String>,
    pub albums: Vec<AlbumEntry>,
    pub selected: usize,
    /// Text-input mode for choosing the browsed artist. While active, all
    /// transport keys must pass through untouched.
    pub input_active: bool,
    pub artist_input: String,
}

impl BrowseState {
    pub fn selected_album(&self) -> Option<&AlbumEntry> {
        self.albums.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.albums.len() {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }
}

/// Album detail state: one album's tracks, grouped by disc.
#[derive(Default)]
pub struct AlbumDetailState {
    pub artist: String,
    pub album: String,
    pub discs: Vec<DiscGroup>,
    /// Flat selection index across all disc groups, in disc order.
    pub selected: usize,
}

impl AlbumDetailState {
    pub fn track_count(&self) -> usize {
        self.discs.iter().map(|d| d.tracks.len()).sum()
    }

    /// The selected track and the disc group it belongs to.
    pub fn selected_track(&self) -> Option<(&DiscGroup, &Track)> {
        let mut remaining = self.selected;
        for disc in &self.discs {
            if remaining < disc.tracks.len() {
                return Some((disc, &disc.tracks[remaining]));
            }
            remaining -= disc.tracks.len();
        }
        None
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.track_count() {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }
}
