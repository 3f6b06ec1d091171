//! expenses-cli - Command-line expense tracker
//!
//! This library provides the core functionality for the expenses-cli
//! application: a local database of dated, tagged expense entries and a
//! query engine for tag-filtered, time-windowed views with smoothed
//! spending trends.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Path management
//! - `error`: Custom error types
//! - `models`: Core data models (entries, money)
//! - `storage`: JSON file storage layer
//! - `query`: Tag filters, day windows, sliding-window aggregation and
//!   polynomial trend fitting
//! - `cli`: Command handlers
//! - `display`: Plain-text rendering of query results
//!
//! # Example
//!
//! ```rust,ignore
//! use expenses::query::{list_view, SortKey, TagFilter, Window};
//!
//! let filter = TagFilter::parse(["food", "/restaurant"])?;
//! let window = Window::last_days(today, 30)?;
//! let listing = list_view(store.entries(), &window, &filter, SortKey::Date);
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod query;
pub mod storage;

pub use error::{ExpenseError, ExpenseResult};
