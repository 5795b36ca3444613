//! Ratatui widgets for the zensearch TUI.

pub mod help;
pub mod history_panel;
pub mod insights;
pub mod query_bar;
pub mod result_list;
pub mod status_bar;
pub mod suggestions;
