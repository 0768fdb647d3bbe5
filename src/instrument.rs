//! Instrument representations

use crate::types::{Isin, PriceSeries, Ticker, Wkn};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Asset class of an instrument
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetClass {
    /// Exchange-traded fund
    #[serde(rename = "ETF")]
    Etf,
    /// Exchange-traded commodity
    #[serde(rename = "ETC")]
    Etc,
    /// Exchange-traded note
    #[serde(rename = "ETN")]
    Etn,
    /// Single common stock
    Stock,
    /// Could not be classified from feed data
    #[default]
    Unknown,
}

impl AssetClass {
    /// True for pooled exchange-traded products (ETF, ETC, ETN)
    pub fn is_fund(self) -> bool {
        matches!(self, AssetClass::Etf | AssetClass::Etc | AssetClass::Etn)
    }

    /// True for single stocks
    pub fn is_stock(self) -> bool {
        self == AssetClass::Stock
    }
}

/// How an instrument entered the universe
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    /// Typed or pasted in by the user
    #[default]
    Manual,
    /// Imported from an exchange instrument list
    Exchange,
}

/// Which ranking model produced a value score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValueModel {
    /// Earnings yield + book yield composite for funds
    Etf,
    /// Greenblatt two-factor composite for stocks
    MagicFormula,
}

/// A screenable instrument and everything computed about it.
///
/// All derived fields are `Option`: `None` always means "not computable from
/// the data currently attached", never an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Instrument {
    // Identity
    /// Primary key
    pub isin: Isin,
    pub wkn: Option<Wkn>,
    pub mnemonic: Option<String>,
    /// Quote-feed ticker, e.g. "EUNL.DE"
    pub ticker: Option<Ticker>,
    pub asset_class: AssetClass,
    pub provenance: Provenance,
    pub currency: Option<String>,
    pub first_trading_date: Option<String>,
    /// Exchange segment the instrument was imported from
    pub listing_group: Option<String>,

    // Names
    /// Raw feed name, usually ALL CAPS
    pub name: String,
    /// Marketing name from fund facts, when fetched
    pub long_name: Option<String>,
    /// Human-readable name shown in output
    pub display_name: String,

    // Dedup
    pub dedup_group: Option<String>,
    pub is_dedup_winner: Option<bool>,
    /// ISINs sharing this instrument's exposure group (set on the winner)
    pub dedup_candidates: Vec<Isin>,

    // Fund facts
    /// Assets under management in EUR
    pub aum: Option<f64>,
    /// Total expense ratio as a fraction
    pub ter: Option<f64>,
    pub facts_fetched: bool,
    pub facts_error: Option<String>,

    // Price history and returns
    pub series: PriceSeries,
    pub r1m: Option<f64>,
    pub r3m: Option<f64>,
    pub r6m: Option<f64>,
    /// Annualised volatility of daily returns
    pub vola: Option<f64>,
    pub price_fetched: bool,
    pub price_error: Option<String>,

    // Scores
    pub momentum_score: Option<f64>,
    pub sharpe_score: Option<f64>,
    pub combined_score: Option<f64>,
    pub momentum_rank: Option<u32>,
    pub sharpe_rank: Option<u32>,
    pub combined_rank: Option<u32>,

    // Moving averages
    pub ma10: Option<f64>,
    pub ma50: Option<f64>,
    pub ma100: Option<f64>,
    pub ma200: Option<f64>,
    pub above_ma10: Option<bool>,
    pub above_ma50: Option<bool>,
    pub above_ma100: Option<bool>,
    pub above_ma200: Option<bool>,

    // ATR and trailing exit level
    pub atr20: Option<f64>,
    pub selling_threshold: Option<f64>,

    // Fundamentals
    pub pe: Option<f64>,
    pub pb: Option<f64>,
    pub earnings_yield: Option<f64>,
    pub ebitda: Option<f64>,
    pub enterprise_value: Option<f64>,
    pub return_on_assets: Option<f64>,
    pub fundamentals_fetched: bool,

    // Value score
    pub value_score: Option<f64>,
    pub value_rank: Option<u32>,
    pub value_model: Option<ValueModel>,
}

impl Instrument {
    /// Create a new instrument
    pub fn new(isin: Isin, name: String, asset_class: AssetClass) -> Self {
        let display_name = if name.is_empty() {
            isin.clone()
        } else {
            name.clone()
        };
        Self {
            isin,
            name,
            display_name,
            asset_class,
            ..Default::default()
        }
    }

    /// Create a manually entered instrument known only by its ISIN
    pub fn manual(isin: Isin) -> Self {
        let mut inst = Self::new(isin, String::new(), AssetClass::Unknown);
        inst.provenance = Provenance::Manual;
        inst
    }

    /// Set the quote-feed ticker
    pub fn with_ticker(mut self, ticker: Ticker) -> Self {
        self.ticker = Some(ticker);
        self
    }

    /// Set the trading currency
    pub fn with_currency(mut self, currency: String) -> Self {
        self.currency = Some(currency);
        self
    }

    /// Best available marketing name, falling back to the feed name
    pub fn best_name(&self) -> &str {
        match &self.long_name {
            Some(long) if !long.is_empty() => long,
            _ => &self.name,
        }
    }

    /// Recompute `display_name` after a name field changed.
    ///
    /// The long name is title-cased; raw feed names and bare ISINs are kept
    /// as delivered.
    pub fn refresh_display_name(&mut self) {
        self.display_name = match &self.long_name {
            Some(long) if !long.is_empty() => to_display_name(long),
            _ if !self.name.is_empty() => self.name.clone(),
            _ => self.isin.clone(),
        };
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Instrument({}, {}, {})",
            self.isin, self.display_name, self.asset_class
        )
    }
}

impl fmt::Display for AssetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetClass::Etf => write!(f, "ETF"),
            AssetClass::Etc => write!(f, "ETC"),
            AssetClass::Etn => write!(f, "ETN"),
            AssetClass::Stock => write!(f, "Stock"),
            AssetClass::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Words kept fully uppercased when title-casing a fund name
const DISPLAY_ACRONYMS: &[&str] = &[
    "ETF", "ETC", "ETN", "UCITS", "MSCI", "FTSE", "ESR", "SRI", "PAB", "ESG", "US", "USA", "EU",
    "EUR", "USD", "GBP", "DR",
];

/// Convert an ALL CAPS feed name into Title Case, keeping well-known
/// acronyms uppercased.
pub fn to_display_name(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut word = String::new();

    for ch in raw.chars() {
        if ch.is_alphanumeric() {
            word.push(ch);
        } else {
            push_word(&mut out, &word);
            word.clear();
            out.push(ch);
        }
    }
    push_word(&mut out, &word);

    out.trim().to_string()
}

fn push_word(out: &mut String, word: &str) {
    if word.is_empty() {
        return;
    }
    let upper = word.to_uppercase();
    if DISPLAY_ACRONYMS.contains(&upper.as_str()) {
        out.push_str(&upper);
        return;
    }
    let mut chars = word.chars();
    if let Some(first) = chars.next() {
        out.extend(first.to_uppercase());
        for ch in chars {
            out.extend(ch.to_lowercase());
        }
    }
}
