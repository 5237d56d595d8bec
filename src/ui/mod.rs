// UI and formatting module

pub mod dashboard_tui;
pub mod formatters;
pub mod prompts;

// Re-export commonly used items for cleaner imports
pub use formatters::{format_status_line, paint, paint_value, print_view};
pub use prompts::{confirm, dimmed, error, info, success, warn};
