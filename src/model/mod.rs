//! Model layer - centralized state management
//!
//! - `catalog` - read-only service catalog the quote references
//! - `quote` - quotation state (line items, discount, derived totals)
//! - `money` - currency display formatting
//! - `history` - saved quotation persistence
//! - `modal` - modal overlay management

pub mod catalog;
pub mod history;
pub mod modal;
pub mod money;
pub mod quote;

// Re-export commonly used types
pub use catalog::{Catalog, ServiceEntry, ServiceId};
pub use history::QuoteHistoryEntry;
pub use money::format_money;
pub use quote::{Discount, LineItem, Quote};
