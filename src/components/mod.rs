pub mod app_view;
pub mod paint;
pub mod search_bar;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use app_view::{AppView, AppViewProps};
pub use search_bar::{SearchBar, SearchBarProps};
