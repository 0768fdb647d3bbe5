//! Core types and constants

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Timestamp type used throughout the library
pub type Timestamp = DateTime<Utc>;

/// ISIN identifier (primary key for instruments)
pub type Isin = String;

/// Six-character local securities code (WKN)
pub type Wkn = String;

/// Exchange ticker used when fetching quotes
pub type Ticker = String;

/// Price type (using f64 for precision)
pub type Price = f64;

/// Percentage type (0.0 to 1.0)
pub type Percentage = f64;

/// Daily price history as parallel arrays, oldest first.
///
/// `highs`/`lows` are either empty (not provided by the feed) or the same
/// length as `closes`; consumers fall back to close-only formulas when a
/// high/low is unavailable for a bar.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    pub closes: Vec<Price>,
    #[serde(default)]
    pub highs: Vec<Price>,
    #[serde(default)]
    pub lows: Vec<Price>,
    #[serde(default)]
    pub timestamps: Vec<Timestamp>,
}

impl PriceSeries {
    /// Create a close-only series
    pub fn from_closes(closes: Vec<Price>) -> Self {
        Self {
            closes,
            ..Default::default()
        }
    }

    /// Number of daily bars
    pub fn len(&self) -> usize {
        self.closes.len()
    }

    /// True when no bars are present
    pub fn is_empty(&self) -> bool {
        self.closes.is_empty()
    }

    /// Most recent close, if any
    pub fn last_close(&self) -> Option<Price> {
        self.closes.last().copied()
    }

    /// High for bar `i`, when the feed provided one
    pub fn high_at(&self, i: usize) -> Option<Price> {
        self.highs.get(i).copied()
    }

    /// Low for bar `i`, when the feed provided one
    pub fn low_at(&self, i: usize) -> Option<Price> {
        self.lows.get(i).copied()
    }
}
