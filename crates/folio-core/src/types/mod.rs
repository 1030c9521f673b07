//! Domain types for portfolio analytics.
//!
//! - [`Date`]: observation date
//! - [`Ticker`]: case-normalized asset identifier
//! - [`PriceSeries`] / [`ReturnSeries`]: validated dated series
//! - [`AssetUniverse`]: price histories keyed by ticker

mod date;
mod series;
mod ticker;
mod universe;

pub use date::Date;
pub use series::{PriceSeries, ReturnSeries};
pub use ticker::Ticker;
pub use universe::AssetUniverse;
