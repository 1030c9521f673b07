//! # Folio Core
//!
//! Core domain types for the Folio portfolio analytics library.
//!
//! This crate provides the validated building blocks every other Folio
//! crate consumes:
//!
//! - **Dates and tickers**: `Date`, `Ticker`
//! - **Series**: `PriceSeries`, `ReturnSeries`, strictly ordered by date
//! - **Universes**: `AssetUniverse`, a ticker-ordered map of price histories
//!
//! ## Example
//!
//! ```rust
//! use folio_core::prelude::*;
//!
//! let d0 = Date::from_ymd(2025, 1, 2).unwrap();
//! let prices = PriceSeries::new(vec![(d0, 100.0), (d0.add_days(1), 110.0)]).unwrap();
//! let universe = AssetUniverse::new()
//!     .with_asset(Ticker::new("spy").unwrap(), prices)
//!     .unwrap();
//! assert_eq!(universe.len(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::doc_markdown)]

pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::types::{AssetUniverse, Date, PriceSeries, ReturnSeries, Ticker};
}

pub use error::{CoreError, CoreResult};
