use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::theme::Theme;
use crate::notify::{Notice, NoticeKind};
use crate::status::{PlayState, PlaybackSnapshot};

/// Bottom bar: a live notice takes the whole line; otherwise the bar shows
/// the now-playing summary on the left and the volume on the right.
pub fn render_status_bar(
    f: &mut Frame,
    notice: Option<&Notice>,
    snapshot: &PlaybackSnapshot,
    volume: u8,
    show_volume: bool,
    area: Rect,
    theme: &Theme,
) {
    if let Some(notice) = notice {
        let color = match notice.kind {
            NoticeKind::Info => theme.primary(),
            NoticeKind::Success => theme.success(),
            NoticeKind::Warning => theme.warning(),
            NoticeKind::Error => theme.error(),
        };
        let bar = Paragraph::new(Line::from(Span::styled(
            format!(" {}", notice.text),
            Style::default().fg(color),
        )));
        f.render_widget(bar, area);
        return;
    }

    let left = Span::styled(
        format!(" {}", now_playing_summary(snapshot)),
        Style::default().fg(theme.text_muted()),
    );
    let mut spans = vec![left];
    if show_volume {
        let right = Span::styled(
            format!("vol {}%", volume),
            Style::default().fg(theme.text_muted()),
        );
        // Rendered width, not byte length; the title may be non-ASCII.
        let used = spans[0].width() + right.width() + 1;
        let pad = (area.width as usize).saturating_sub(used);
        spans.push(Span::raw(" ".repeat(pad)));
        spans.push(right);
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn now_playing_summary(snapshot: &PlaybackSnapshot) -> String {
    let marker = match snapshot.state {
        PlayState::Playing => "[playing]",
        PlayState::Paused => "[paused]",
        PlayState::Stopped => "[stopped]",
        PlayState::Unknown => "[?]",
    };
    match (&snapshot.artist, &snapshot.track_title) {
        (Some(artist), Some(title)) => {
            format!(
                "{} {} - {} ({} queued)",
                marker, artist, title, snapshot.queue_length
            )
        }
        (None, Some(title)) => format!("{} {} ({} queued)", marker, title, snapshot.queue_length),
        _ => format!("{} {} queued", marker, snapshot.queue_length),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_includes_artist_and_title_when_known() {
        let snapshot = PlaybackSnapshot {
            state: PlayState::Playing,
            artist: Some("Autechre".to_string()),
            album: Some("Tri Repetae".to_string()),
            track_title: Some("Dael".to_string()),
            queue_length: 10,
        };
        assert_eq!(
            now_playing_summary(&snapshot),
            "[playing] Autechre - Dael (10 queued)"
        );
    }

    #[test]
    fn summary_degrades_when_nothing_is_playing() {
        let snapshot = PlaybackSnapshot {
            state: PlayState::Stopped,
            ..PlaybackSnapshot::default()
        };
        assert_eq!(now_playing_summary(&snapshot), "[stopped] 0 queued");
    }

    #[test]
    fn volume_readout_stays_right_aligned_for_wide_titles() {
        use ratatui::{backend::TestBackend, Terminal};

        let snapshot = PlaybackSnapshot {
            state: PlayState::Playing,
            artist: Some("坂本龍一".to_string()),
            album: None,
            track_title: Some("戦場のメリークリスマス".to_string()),
            queue_length: 2,
        };

        let width = 60u16;
        let mut terminal = Terminal::new(TestBackend::new(width, 1)).unwrap();
        terminal
            .draw(|f| {
                render_status_bar(f, None, &snapshot, 25, true, f.area(), &Theme)
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let row: String = (0..width)
            .filter_map(|x| buffer.cell((x, 0)).map(|c| c.symbol()))
            .collect();
        // One column of margin after the readout, regardless of the title's
        // byte length.
        assert!(row.ends_with("vol 25% "), "row was: {:?}", row);
    }

    #[test]
    fn summary_keeps_title_without_artist() {
        let snapshot = PlaybackSnapshot {
            state: PlayState::Paused,
            track_title: Some("Untitled".to_string()),
            queue_length: 1,
            ..PlaybackSnapshot::default()
        };
        assert_eq!(now_playing_summary(&snapshot), "[paused] Untitled (1 queued)");
    }
}
