//! Services for file-backed concerns
//!
//! - `catalog` - loading the external service catalog
//! - `export` - writing the quotation out as CSV

pub mod catalog;
pub mod export;

pub use catalog::load_catalog;
pub use export::{default_export_path, export_quote};
