//! CLI command handlers
//!
//! Thin glue between clap-parsed arguments, the store and the query
//! engine. All output formatting lives in `display`.

pub mod entry;
pub mod query;

pub use entry::{handle_add, handle_change, handle_delete, handle_setup};
pub use query::{handle_average, handle_compare, handle_list};
