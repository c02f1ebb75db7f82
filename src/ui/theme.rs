use ratatui::style::{Color, Modifier, Style};

/// Fixed color palette for the application.
#[derive(Debug, Clone, Copy, Default)]
pub struct Theme;

impl Theme {
    pub fn primary(&self) -> Color {
        Color::Cyan
    }

    pub fn success(&self) -> Color {
        Color::Green
    }

    pub fn warning(&self) -> Color {
        Color::Yellow
    }

    pub fn error(&self) -> Color {
        Color::Red
    }

    pub fn text_muted(&self) -> Color {
        Color::Gray
    }

    pub fn highlight_style(&self) -> Style {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    }

    pub fn header_style(&self) -> Style {
        Style::default()
            .fg(self.success())
            .add_modifier(Modifier::BOLD)
    }
}
