pub mod commands;
pub mod editor;
pub mod sort;
pub mod transition;
pub mod validation;

pub use editor::BookEditor;
pub use sort::SortOrder;
pub use transition::next_dates;
