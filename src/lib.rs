//! TabRS - tabular aggregation library.
//!
//! Computes grouped descriptive statistics, binned frequency histograms, and
//! percentage breakdowns from typed tabular datasets, exporting each result
//! as a tidy CSV table. The `pipeline` module wires the library into five
//! fixed dataset pipelines; with the `visualization` feature the same
//! computed rows can also be rendered as PNG charts.

pub mod error;
pub mod frame;
pub mod groupby;
pub mod io;
pub mod pipeline;
pub mod schema;
pub mod stats;
pub mod table;
#[cfg(feature = "visualization")]
pub mod vis;

// Re-export commonly used types
pub use error::{Error, Result};
pub use frame::{DataFrame, Value};
pub use groupby::{GroupBy, KeyOrder, PercentageRow};
pub use schema::{ColumnType, Field, Schema};
pub use stats::SummaryStats;
pub use table::Table;
