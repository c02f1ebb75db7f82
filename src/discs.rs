use std::collections::HashMap;

use crate::api::Track;

/// Tracks belonging to one disc of an album, in album order.
///
/// `disc_number` is absent for the implicit single-disc grouping. Derived on
/// every call, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscGroup {
    pub disc_number: Option<u32>,
    pub tracks: Vec<Track>,
    pub total_seconds: u64,
}

impl DiscGroup {
    fn new(disc_number: Option<u32>, tracks: Vec<Track>) -> Self {
        let total_seconds = tracks
            .iter()
            .map(|t| u64::from(t.duration_seconds.unwrap_or(0)))
            .sum();
        Self {
            disc_number,
            tracks,
            total_seconds,
        }
    }

    /// Total duration as `M:SS`.
    pub fn total_formatted(&self) -> String {
        format_duration(self.total_seconds)
    }
}

/// Format a duration in seconds as `M:SS` (minutes unpadded, seconds
/// zero-padded to two digits).
pub fn format_duration(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Group an album's flat track listing into per-disc groups.
///
/// A server-supplied disc structure is authoritative: its entries become the
/// groups, ascending by numeric disc number, and the flat order is not
/// re-derived. Without one the whole listing is a single implicit group.
/// Malformed structure keys degrade to the single-disc treatment, and an
/// empty listing yields no groups at all; neither case is an error.
pub fn group_by_disc(
    tracks: Vec<Track>,
    disc_structure: Option<HashMap<String, Vec<Track>>>,
) -> Vec<DiscGroup> {
    if let Some(structure) = disc_structure {
        if !structure.is_empty() {
            let mut numbered: Vec<(u32, Vec<Track>)> = Vec::with_capacity(structure.len());
            for (key, disc_tracks) in structure {
                match key.trim().parse::<u32>() {
                    Ok(n) => numbered.push((n, disc_tracks)),
                    Err(_) => {
                        // Unusable mapping; fall back to the flat listing.
                        return single_disc(tracks);
                    }
                }
            }
            numbered.sort_by_key(|(n, _)| *n);
            return numbered
                .into_iter()
                .map(|(n, disc_tracks)| DiscGroup::new(Some(n), disc_tracks))
                .collect();
        }
    }

    single_disc(tracks)
}

fn single_disc(tracks: Vec<Track>) -> Vec<DiscGroup> {
    if tracks.is_empty() {
        return Vec::new();
    }
    vec![DiscGroup::new(None, tracks)]
}
