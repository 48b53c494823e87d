pub mod calendar_view;
pub mod dialogs;
pub mod filter_panel;
pub mod theme;
pub mod toolbar;
