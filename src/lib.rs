//! # etfscreen
//!
//! A screening core for ETFs and stocks listed on the German exchange.
//!
//! etfscreen deduplicates the fund universe by economic exposure (so only
//! one MSCI World fund survives out of the dozen listed) and scores every
//! instrument on momentum, risk-adjusted momentum and value, with dense
//! ranks over the working set.
//!
//! ## Example
//!
//! ```rust,no_run
//! use etfscreen::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let mut universe = Universe::new(ScreenConfig::default())?;
//!     universe.add_manual("IE00B4L5Y983");
//!     universe.refresh();
//!
//!     for inst in universe.instruments() {
//!         if inst.is_dedup_winner == Some(true) {
//!             println!("{} rank {:?}", inst.display_name, inst.momentum_rank);
//!         }
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod dedup;
pub mod error;
pub mod feed;
pub mod instrument;
pub mod scoring;
pub mod types;
pub mod universe;

pub mod prelude {
    //! Commonly used types and functions
    pub use crate::config::{MomentumWeights, ScreenConfig};
    pub use crate::dedup::{DedupGroup, ExposureClass, ExposureVector};
    pub use crate::error::{Result, ScreenError};
    pub use crate::feed::{FundFacts, QuoteRecord, SeedRecord};
    pub use crate::instrument::{AssetClass, Instrument, Provenance, ValueModel};
    pub use crate::types::*;
    pub use crate::universe::{
        passes_aum_floor, passes_risk_free, visible_after_dedup, Universe,
    };
}
