use ratatui::{
    layout::Rect,
    style::Style,
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::theme::Theme;
use crate::config::Config;

/// Read-only settings summary. Values come from the config file; edits
/// happen there, not here. Playback shortcuts are disabled on this view.
pub fn render_settings_view(f: &mut Frame, config: &Config, area: Rect, theme: &Theme) {
    let lines = vec![
        Line::from(format!("Server:           {}", config.server.url)),
        Line::from(format!(
            "Status interval:  {} ms",
            config.server.poll_interval_ms
        )),
        Line::from(format!(
            "Default volume:   {}%",
            config.playback.default_volume
        )),
        Line::from(format!("Volume step:      {}%", config.playback.volume_step)),
        Line::from(format!(
            "Volume controls:  {}",
            if config.ui.show_volume_controls {
                "shown"
            } else {
                "hidden"
            }
        )),
        Line::from(format!("Notice duration:  {} ms", config.ui.notice_ttl_ms)),
        Line::from(format!(
            "Default artist:   {}",
            config.ui.default_artist.as_deref().unwrap_or("(none)")
        )),
        Line::from(format!(
            "Genre filter:     {}",
            config.ui.default_genre.as_deref().unwrap_or("(none)")
        )),
        Line::from(""),
        Line::from("Playback keys are disabled while this view is open.")
            .style(Style::default().fg(theme.text_muted())),
    ];

    let panel = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Settings [Esc: back]")
            .border_style(Style::default().fg(theme.primary())),
    );
    f.render_widget(panel, area);
}
