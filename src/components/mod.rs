//! UI Components
//!
//! Each component encapsulates its own state, event handling, and rendering
//! logic. Components communicate through Actions rather than direct state
//! mutation.

pub mod help_dialog;
pub mod history_dialog;
pub mod layout;
pub mod quit_dialog;
pub mod quote_table;
pub mod service_selector;

pub use help_dialog::HelpDialog;
pub use history_dialog::HistoryDialog;
pub use layout::{calculate_quote_layout, centered_popup};
pub use quit_dialog::QuitDialog;
pub use quote_table::QuoteTable;
pub use service_selector::ServiceSelectorDialog;
