//! Core data models for expenses-cli
//!
//! This module contains the data structures that represent the expense
//! domain: entries, ids, and monetary amounts.

pub mod entry;
pub mod money;

pub use entry::{Entry, EntryId};
pub use money::Money;
