//! The instrument working set.
//!
//! A [`Universe`] owns every instrument the screener currently knows about
//! plus the screening configuration. Feed records are merged in through the
//! `apply_*` methods, and [`Universe::refresh`] reruns deduplication and
//! scoring over the whole set. Mutating methods never recompute on their
//! own; callers batch their updates and refresh once.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::ScreenConfig;
use crate::dedup::{self, DedupGroup};
use crate::error::{Result, ScreenError};
use crate::feed::{FundFacts, QuoteRecord, SeedRecord};
use crate::instrument::{Instrument, Provenance};
use crate::scoring;
use crate::types::{PriceSeries, Timestamp};

/// Full screener state: instruments plus configuration.
///
/// Serializes to a plain JSON snapshot. Dedup groups are derived state and
/// are rebuilt by the next [`refresh`](Self::refresh) instead of being
/// persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Universe {
    instruments: Vec<Instrument>,
    #[serde(default)]
    config: ScreenConfig,
    #[serde(skip)]
    groups: Vec<DedupGroup>,
}

impl Universe {
    /// Create an empty universe with a validated configuration.
    pub fn new(config: ScreenConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            instruments: Vec::new(),
            config,
            groups: Vec::new(),
        })
    }

    pub fn instruments(&self) -> &[Instrument] {
        &self.instruments
    }

    pub fn len(&self) -> usize {
        self.instruments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instruments.is_empty()
    }

    /// Look up one instrument by ISIN.
    pub fn get(&self, isin: &str) -> Option<&Instrument> {
        self.instruments.iter().find(|inst| inst.isin == isin)
    }

    pub fn config(&self) -> &ScreenConfig {
        &self.config
    }

    /// Replace the configuration. The next [`refresh`](Self::refresh) picks
    /// up the new weights, floor and multiplier.
    pub fn set_config(&mut self, config: ScreenConfig) -> Result<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Exposure groups from the most recent dedup run.
    pub fn groups(&self) -> &[DedupGroup] {
        &self.groups
    }

    /// Add instruments, skipping ISINs already present.
    ///
    /// Returns how many were actually added.
    pub fn add_instruments(&mut self, incoming: Vec<Instrument>) -> usize {
        let mut added = 0;
        for instrument in incoming {
            if self.get(&instrument.isin).is_some() {
                log::debug!("skipping duplicate instrument {}", instrument.isin);
                continue;
            }
            self.instruments.push(instrument);
            added += 1;
        }
        if added > 0 {
            log::info!("added {} instruments ({} total)", added, self.instruments.len());
        }
        added
    }

    /// Seed the universe from parsed exchange list rows.
    pub fn add_seeds(&mut self, seeds: Vec<SeedRecord>) -> usize {
        self.add_instruments(seeds.into_iter().map(SeedRecord::into_instrument).collect())
    }

    /// Add a manually tracked instrument known only by its ISIN.
    ///
    /// Returns false when the ISIN is already present.
    pub fn add_manual(&mut self, isin: &str) -> bool {
        self.add_instruments(vec![Instrument::manual(isin.to_uppercase())]) == 1
    }

    /// Remove one instrument. Returns false when the ISIN is unknown.
    pub fn remove(&mut self, isin: &str) -> bool {
        let before = self.instruments.len();
        self.instruments.retain(|inst| inst.isin != isin);
        before != self.instruments.len()
    }

    /// Drop every exchange-sourced instrument, keeping manual entries.
    ///
    /// Returns how many were removed.
    pub fn clear_exchange(&mut self) -> usize {
        let before = self.instruments.len();
        self.instruments
            .retain(|inst| inst.provenance != Provenance::Exchange);
        let removed = before - self.instruments.len();
        if removed > 0 {
            log::info!("cleared {} exchange instruments", removed);
        }
        removed
    }

    /// Merge quote records into the matching instruments.
    ///
    /// Records key on ticker, the identifier the quote feed speaks. Every
    /// record is shape-checked and its timestamps converted before any
    /// instrument is touched, so a bad record rejects the whole batch and
    /// leaves the universe unchanged. A record with an `error` attaches its
    /// message and nothing else; records for unknown tickers are skipped
    /// with a warning. Returns how many records were applied.
    pub fn apply_quotes(&mut self, records: &[QuoteRecord]) -> Result<usize> {
        let mut converted: Vec<Vec<Timestamp>> = Vec::with_capacity(records.len());
        for record in records {
            record.validate()?;
            if record.error.is_some() {
                converted.push(Vec::new());
                continue;
            }
            let timestamps: Option<Vec<Timestamp>> = record
                .timestamps
                .iter()
                .map(|&secs| DateTime::<Utc>::from_timestamp(secs, 0))
                .collect();
            match timestamps {
                Some(timestamps) => converted.push(timestamps),
                None => {
                    return Err(ScreenError::BadSeries {
                        ticker: record.ticker.clone(),
                        reason: "timestamp out of range".to_string(),
                    })
                }
            }
        }

        let mut applied = 0;
        for (record, timestamps) in records.iter().zip(converted) {
            let instrument = match self
                .instruments
                .iter_mut()
                .find(|inst| inst.ticker.as_deref() == Some(record.ticker.as_str()))
            {
                Some(inst) => inst,
                None => {
                    log::warn!("quote record for unknown ticker {}", record.ticker);
                    continue;
                }
            };

            instrument.price_fetched = true;
            if let Some(message) = &record.error {
                instrument.price_error = Some(message.clone());
                applied += 1;
                continue;
            }

            instrument.price_error = None;
            instrument.series = PriceSeries {
                closes: record.closes.clone(),
                highs: record.highs.clone(),
                lows: record.lows.clone(),
                timestamps,
            };
            instrument.fundamentals_fetched = true;
            instrument.pe = record.pe;
            instrument.pb = record.pb;
            instrument.ebitda = record.ebitda;
            instrument.enterprise_value = record.enterprise_value;
            instrument.return_on_assets = record.return_on_assets;
            applied += 1;
        }
        Ok(applied)
    }

    /// Merge fund facts (AUM, TER, marketing name) into the matching
    /// instruments. Returns how many records were applied.
    pub fn apply_fund_facts(&mut self, facts: &[FundFacts]) -> usize {
        let mut applied = 0;
        for record in facts {
            let instrument = match self
                .instruments
                .iter_mut()
                .find(|inst| inst.isin == record.isin)
            {
                Some(inst) => inst,
                None => {
                    log::warn!("fund facts for unknown ISIN {}", record.isin);
                    continue;
                }
            };

            instrument.facts_fetched = true;
            if let Some(message) = &record.error {
                instrument.facts_error = Some(message.clone());
                applied += 1;
                continue;
            }

            instrument.facts_error = None;
            instrument.aum = record.aum;
            instrument.ter = record.ter;
            if let Some(long_name) = &record.long_name {
                if !long_name.is_empty() {
                    instrument.long_name = Some(long_name.clone());
                    instrument.refresh_display_name();
                }
            }
            applied += 1;
        }
        applied
    }

    /// Rerun exposure deduplication over the whole set.
    pub fn run_dedup(&mut self) {
        self.groups = dedup::run(&mut self.instruments, self.config.aum_floor);
    }

    /// Rerun the scoring pipeline over the whole set.
    pub fn rescore(&mut self) {
        scoring::rescore(&mut self.instruments, &self.config);
    }

    /// Full recomputation: deduplication, then scoring.
    pub fn refresh(&mut self) {
        self.run_dedup();
        self.rescore();
    }

    /// Write the universe as a JSON snapshot.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("saved {} instruments to {}", self.instruments.len(), path.display());
        Ok(())
    }

    /// Read a universe back from a JSON snapshot.
    ///
    /// Derived state (groups, scores) reflects the snapshot; call
    /// [`refresh`](Self::refresh) to recompute under the current code.
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        let universe: Universe = serde_json::from_str(&json)?;
        universe.config.validate()?;
        log::info!(
            "loaded {} instruments from {}",
            universe.instruments.len(),
            path.display()
        );
        Ok(universe)
    }
}

/// Whether an instrument clears the risk-free hurdle.
///
/// The 6-month return is annualised (doubled) and compared against the
/// rate; with no 6-month return the 3-month return (quadrupled) decides.
/// Instruments without either are kept.
pub fn passes_risk_free(instrument: &Instrument, risk_free_rate: f64) -> bool {
    if let Some(r6m) = instrument.r6m {
        return r6m * 2.0 >= risk_free_rate;
    }
    if let Some(r3m) = instrument.r3m {
        return r3m * 4.0 >= risk_free_rate;
    }
    true
}

/// Whether an instrument clears the AUM floor. Unknown AUM is kept.
pub fn passes_aum_floor(instrument: &Instrument, aum_floor: f64) -> bool {
    instrument.aum.map_or(true, |aum| aum >= aum_floor)
}

/// Whether an instrument survives the deduplicated view.
///
/// Stocks and manual entries always show; exchange-sourced funds show
/// unless a dedup run marked them a loser.
pub fn visible_after_dedup(instrument: &Instrument) -> bool {
    instrument.asset_class.is_stock()
        || instrument.provenance == Provenance::Manual
        || instrument.is_dedup_winner != Some(false)
}
