//! Feed record types and ingest parsing
//!
//! Everything the screener learns about an instrument arrives through one of
//! the record types here: seed rows from an exchange instrument list, quote
//! series with fundamentals, and fund facts. Records carry an optional `error`
//! field; a record with an error attaches the message and nothing else.

use crate::error::{Result, ScreenError};
use crate::instrument::{AssetClass, Instrument, Provenance};
use crate::types::{Isin, Ticker};
use serde::{Deserialize, Serialize};

/// One row from an exchange instrument list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedRecord {
    pub name: String,
    pub isin: Isin,
    pub wkn: String,
    pub mnemonic: String,
    /// Raw list type code, e.g. "ETF", "ETC" or "CS"
    pub instrument_type: String,
    /// Product assignment group, e.g. "EXCHANGE TRADED FUNDS - PASSIV"
    pub group: String,
    pub currency: String,
    pub first_trading_date: String,
}

impl SeedRecord {
    /// Convert the list row into a fresh instrument
    pub fn into_instrument(self) -> Instrument {
        let asset_class = match self.instrument_type.as_str() {
            "ETF" => AssetClass::Etf,
            "ETC" => AssetClass::Etc,
            "CS" => AssetClass::Stock,
            _ => AssetClass::Unknown,
        };

        let mut inst = Instrument::new(self.isin, self.name, asset_class);
        inst.provenance = Provenance::Exchange;
        if !self.wkn.is_empty() {
            inst.wkn = Some(self.wkn);
        }
        if !self.mnemonic.is_empty() {
            inst.ticker = Some(format!("{}.DE", self.mnemonic));
            inst.mnemonic = Some(self.mnemonic);
        }
        if !self.currency.is_empty() {
            inst.currency = Some(self.currency);
        }
        if !self.first_trading_date.is_empty() {
            inst.first_trading_date = Some(self.first_trading_date);
        }
        if !self.group.is_empty() {
            inst.listing_group = Some(self.group);
        }
        inst
    }
}

/// A quote-feed response for one instrument, keyed by ticker.
///
/// Quote feeds identify instruments by their exchange ticker, not by ISIN;
/// the universe resolves the ticker back to an instrument on apply.
/// `timestamps` are epoch seconds aligned with `closes`; `highs`/`lows` are
/// either empty or aligned with `closes`. The fundamental scalars ride
/// along with the price response since the feed serves both in one call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteRecord {
    pub ticker: Ticker,
    pub closes: Vec<f64>,
    pub highs: Vec<f64>,
    pub lows: Vec<f64>,
    pub timestamps: Vec<i64>,
    pub pe: Option<f64>,
    pub pb: Option<f64>,
    pub ebitda: Option<f64>,
    pub enterprise_value: Option<f64>,
    pub return_on_assets: Option<f64>,
    pub error: Option<String>,
}

impl QuoteRecord {
    /// Check array shapes before the record is applied
    pub fn validate(&self) -> Result<()> {
        if self.error.is_some() {
            return Ok(());
        }
        let n = self.closes.len();
        if !self.highs.is_empty() && self.highs.len() != n {
            return Err(ScreenError::BadSeries {
                ticker: self.ticker.clone(),
                reason: format!("{} highs for {} closes", self.highs.len(), n),
            });
        }
        if !self.lows.is_empty() && self.lows.len() != n {
            return Err(ScreenError::BadSeries {
                ticker: self.ticker.clone(),
                reason: format!("{} lows for {} closes", self.lows.len(), n),
            });
        }
        if !self.timestamps.is_empty() && self.timestamps.len() != n {
            return Err(ScreenError::BadSeries {
                ticker: self.ticker.clone(),
                reason: format!("{} timestamps for {} closes", self.timestamps.len(), n),
            });
        }
        Ok(())
    }
}

/// Fund facts for one instrument (AUM, TER, marketing name)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FundFacts {
    pub isin: Isin,
    pub aum: Option<f64>,
    pub ter: Option<f64>,
    pub long_name: Option<String>,
    pub error: Option<String>,
}

/// Resolve an instrument's asset class from reference-data security types.
///
/// `security_type2` is the more reliable of the two fields; "ETP" and
/// "Mutual Fund" are treated as ETFs until fund facts say otherwise, and
/// XS-prefixed ISINs default to ETC since those are structured as notes.
pub fn resolve_asset_class(
    security_type: Option<&str>,
    security_type2: Option<&str>,
    isin: &str,
) -> AssetClass {
    match security_type2 {
        Some("Common Stock") => return AssetClass::Stock,
        Some("ETF") => return AssetClass::Etf,
        Some("ETC") => return AssetClass::Etc,
        _ => {}
    }
    if security_type == Some("ETP") {
        return AssetClass::Etf;
    }
    if security_type2 == Some("Mutual Fund") {
        return AssetClass::Etf;
    }
    if isin.starts_with("XS") {
        return AssetClass::Etc;
    }
    AssetClass::Unknown
}

/// Exchange list types the screener keeps
const SEED_TYPES: &[&str] = &["ETF", "ETC", "CS"];

/// Trading currencies the screener keeps
const SEED_CURRENCIES: &[&str] = &["EUR", "USD"];

/// Parse a T7 instrument list export.
///
/// The export carries two metadata lines before the semicolon-separated
/// header. Rows are filtered to the ETF/ETC/common-stock types in EUR or
/// USD; everything else on the venue is out of scope.
pub fn parse_exchange_list(text: &str) -> Result<Vec<SeedRecord>> {
    let lines: Vec<&str> = text.lines().collect();
    if lines.len() < 4 {
        return Err(ScreenError::MalformedFeed(
            "instrument list has no data rows".to_string(),
        ));
    }

    let headers: Vec<String> = split_row(lines[2]);
    let col = |name: &str| headers.iter().position(|h| h == name);

    let isin_col = col("ISIN");
    let type_col = col("Instrument Type");
    let (isin_col, type_col) = match (isin_col, type_col) {
        (Some(i), Some(t)) => (i, t),
        _ => {
            return Err(ScreenError::MalformedFeed(
                "instrument list header is missing ISIN or Instrument Type".to_string(),
            ))
        }
    };
    let name_col = col("Instrument");
    let wkn_col = col("WKN");
    let mnemonic_col = col("Mnemonic");
    let group_col = col("Product Assignment Group Description");
    let currency_col = col("Currency");
    let date_col = col("First Trading Date");

    let cell = |cells: &[String], idx: Option<usize>| -> String {
        idx.and_then(|i| cells.get(i).cloned()).unwrap_or_default()
    };

    let mut records = Vec::new();
    for line in lines.iter().skip(3) {
        if line.trim().is_empty() {
            continue;
        }
        let cells = split_row(line);

        let instrument_type = cell(&cells, Some(type_col));
        let currency = cell(&cells, currency_col);
        if !SEED_TYPES.contains(&instrument_type.as_str()) {
            continue;
        }
        if !SEED_CURRENCIES.contains(&currency.as_str()) {
            continue;
        }

        records.push(SeedRecord {
            name: cell(&cells, name_col),
            isin: cell(&cells, Some(isin_col)),
            wkn: cell(&cells, wkn_col),
            mnemonic: cell(&cells, mnemonic_col),
            instrument_type,
            group: cell(&cells, group_col),
            currency,
            first_trading_date: cell(&cells, date_col),
        });
    }

    Ok(records)
}

fn split_row(line: &str) -> Vec<String> {
    line.split(';')
        .map(|c| c.trim().replace('"', ""))
        .collect()
}

/// Kind of user-supplied identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IdentifierKind {
    Isin,
    Wkn,
    Ticker,
}

/// A normalised identifier from manual input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedIdentifier {
    pub raw: String,
    pub normalized: String,
    pub kind: IdentifierKind,
}

/// Exchange suffixes stripped from tickers for lookup purposes
const TICKER_SUFFIXES: &[&str] = &[
    ".DE", ".F", ".XETRA", ".ETR", ".BE", ".MU", ".HM", ".DU", ".SG", ".HA", ".BM",
];

/// Header-ish tokens skipped when parsing pasted identifier lists
const SKIP_WORDS: &[&str] = &[
    "isin", "wkn", "ticker", "symbol", "mnemonic", "name", "cusip", "sedol",
];

fn is_isin(token: &str) -> bool {
    token.len() == 12
        && token.chars().take(2).all(|c| c.is_ascii_alphabetic())
        && token.chars().all(|c| c.is_ascii_alphanumeric())
}

fn is_wkn(token: &str) -> bool {
    token.len() == 6 && token.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Classify a single identifier token
pub fn detect_identifier(token: &str) -> IdentifierKind {
    let upper = token.to_uppercase();
    if is_isin(&upper) {
        IdentifierKind::Isin
    } else if is_wkn(&upper) {
        IdentifierKind::Wkn
    } else {
        IdentifierKind::Ticker
    }
}

fn normalize_ticker(token: &str) -> String {
    let upper = token.to_uppercase();
    for suffix in TICKER_SUFFIXES {
        if let Some(stripped) = upper.strip_suffix(suffix) {
            return stripped.to_string();
        }
    }
    upper
}

/// Parse freeform manual input (newline, comma, semicolon or space
/// separated) into deduplicated identifiers, keeping input order.
pub fn parse_manual_input(input: &str) -> Vec<ParsedIdentifier> {
    let mut seen = std::collections::HashSet::new();
    let mut results = Vec::new();

    for token in input.split(|c: char| c == '\n' || c == ',' || c == ';' || c.is_whitespace()) {
        let token = token.trim().replace('"', "");
        if token.is_empty() || SKIP_WORDS.contains(&token.to_lowercase().as_str()) {
            continue;
        }

        let kind = detect_identifier(&token);
        let normalized = match kind {
            IdentifierKind::Ticker => normalize_ticker(&token),
            _ => token.to_uppercase(),
        };

        if seen.insert(normalized.clone()) {
            results.push(ParsedIdentifier {
                raw: token,
                normalized,
                kind,
            });
        }
    }

    results
}
