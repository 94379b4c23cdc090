//! Text rendering for the character roster

pub mod render;
pub mod theme;

pub use render::render_roster;
pub use theme::SheetTheme;
