pub mod album_detail;
pub mod browse;
pub mod settings;
pub mod status_bar;
pub mod theme;

pub use album_detail::render_album_detail_view;
pub use browse::render_browse_view;
pub use settings::render_settings_view;
pub use status_bar::render_status_bar;
pub use theme::Theme;
