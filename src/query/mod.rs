//! Query engine: tag filtering, windowing, aggregation, trend fitting
//!
//! Everything in this module is a pure function over an immutable snapshot
//! of entries taken at the start of a query. The reference day is captured
//! once per query and threaded through explicitly, so results are
//! reproducible without wall-clock mocking.

pub mod aggregate;
pub mod engine;
pub mod tags;
pub mod trend;
pub mod window;

pub use aggregate::{aggregate, TimeSeries, ALL_BUCKET};
pub use engine::{average_view, compare_view, list_view, Listing, SortKey, TrendSeries};
pub use tags::TagFilter;
pub use trend::{fit, FitResult};
pub use window::Window;
