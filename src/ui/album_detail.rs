use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use super::theme::Theme;
use crate::app::state::AlbumDetailState;
use crate::discs::format_duration;

/// Disc-grouped track listing for one album.
///
/// Each disc gets a header row with its track count and total duration;
/// track positions restart at 1 within each disc. Header rows are not
/// selectable, so the list tracks a separate visual index for highlighting.
pub fn render_album_detail_view(f: &mut Frame, state: &AlbumDetailState, area: Rect, theme: &Theme) {
    let heading = format!(
        "{} - {} ({} tracks) [Enter: play | a: add | d: add disc | Esc: back]",
        state.artist,
        state.album,
        state.track_count()
    );

    if state.discs.is_empty() {
        let empty = Paragraph::new("No tracks found")
            .style(Style::default().fg(theme.text_muted()))
            .block(Block::default().borders(Borders::ALL).title(heading));
        f.render_widget(empty, area);
        return;
    }

    let multi_disc = state.discs.len() > 1 || state.discs[0].disc_number.is_some();
    let mut items: Vec<ListItem> = Vec::new();
    let mut highlight = state.selected;
    let mut flat_index = 0;

    for disc in &state.discs {
        if multi_disc {
            let label = match disc.disc_number {
                Some(n) => format!(
                    "Disc {} - {} tracks | {}",
                    n,
                    disc.tracks.len(),
                    disc.total_formatted()
                ),
                None => format!(
                    "{} tracks | {}",
                    disc.tracks.len(),
                    disc.total_formatted()
                ),
            };
            items.push(ListItem::new(label).style(theme.header_style()));
            if flat_index <= state.selected {
                highlight += 1;
            }
        }
        for (position, track) in disc.tracks.iter().enumerate() {
            let duration = track
                .duration_seconds
                .map(|s| format_duration(u64::from(s)))
                .unwrap_or_else(|| "--:--".to_string());
            let title = track.title.as_deref().unwrap_or("Unknown Title");
            items.push(ListItem::new(format!(
                "  {}. {} ({})",
                position + 1,
                title,
                duration
            )));
            flat_index += 1;
        }
    }

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(heading)
                .border_style(Style::default().fg(theme.primary())),
        )
        .highlight_style(theme.highlight_style())
        .highlight_symbol("> ");
    f.render_stateful_widget(
        list,
        area,
        &mut ListState::default().with_selected(Some(highlight)),
    );
}
