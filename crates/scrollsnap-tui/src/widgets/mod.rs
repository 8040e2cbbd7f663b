mod sections;
mod status_bar;

pub use sections::SectionsWidget;
pub use status_bar::StatusBarWidget;
