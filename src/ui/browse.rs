use ratatui::{
    layout::Rect,
    style::Style,
    text::Line,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use super::theme::Theme;
use crate::app::state::BrowseState;

pub fn render_browse_view(f: &mut Frame, state: &BrowseState, area: Rect, theme: &Theme) {
    if state.input_active {
        let prompt = Paragraph::new(Line::from(format!("Artist: {}_", state.artist_input)))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Browse [Enter: load | Esc: cancel]")
                    .border_style(Style::default().fg(theme.warning())),
            );
        f.render_widget(prompt, area);
        return;
    }

    let items: Vec<ListItem> = state
        .albums
        .iter()
        .map(|entry| {
            // The server splits multi-disc albums into one row per disc.
            let title = match entry.disc_number {
                Some(n) => format!("{} - Disc {}", entry.album, n),
                None => entry.album.clone(),
            };
            let mut meta = format!("{} tracks", entry.track_count);
            if let Some(ref date) = entry.date {
                meta = format!("{} | {}", meta, date);
            }
            ListItem::new(format!("{}  ({})", title, meta))
        })
        .collect();

    let heading = match state.artist {
        Some(ref artist) => format!(
            "Albums: {} ({}) [Enter: tracks | r: replace | a: add | /: artist]",
            artist,
            state.albums.len()
        ),
        None => "Albums [press / to choose an artist]".to_string(),
    };

    if items.is_empty() {
        let empty = Paragraph::new("No albums found")
            .style(Style::default().fg(theme.text_muted()))
            .block(Block::default().borders(Borders::ALL).title(heading));
        f.render_widget(empty, area);
        return;
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
        &mut ListState::default().with_selected(Some(state.selected)),
    );
}
