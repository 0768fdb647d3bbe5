//! Exposure-based deduplication.
//!
//! Partitions a working set by canonical exposure key, orders each group by
//! issuer preference and picks one winner per group, subject to a minimum
//! AUM. Only the winner of a group is meant to surface in downstream result
//! lists; the losers stay in the set as tagged alternatives.

use std::collections::BTreeMap;

use hashbrown::HashMap;

use crate::dedup::classify::classify;
use crate::dedup::key::exposure_key;
use crate::dedup::normalize::detect_priority;
use crate::instrument::{AssetClass, Instrument};
use crate::types::Isin;

/// One exposure group after a deduplication run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DedupGroup {
    /// Canonical exposure key, or the instrument's own ISIN for stocks.
    pub key: String,
    /// Member ISINs in preference order.
    pub candidates: Vec<Isin>,
    /// Selected representative; `None` when every candidate with known AUM
    /// sits below the floor.
    pub winner: Option<Isin>,
}

/// Exposure key for one instrument.
///
/// Only ETFs and ETCs are classified by name. Stocks, notes and entries
/// whose asset class is still unresolved key on their own ISIN, so they
/// always form singleton groups and are never deduplicated against each
/// other.
pub fn instrument_key(instrument: &Instrument) -> String {
    match instrument.asset_class {
        AssetClass::Etf | AssetClass::Etc => {
            exposure_key(&classify(instrument.best_name(), instrument.asset_class))
        }
        AssetClass::Etn | AssetClass::Stock | AssetClass::Unknown => instrument.isin.clone(),
    }
}

/// Partitions instruments into exposure groups and selects winners.
///
/// Candidates inside a group are sorted by ascending issuer priority, then
/// EUR listings before others, then descending AUM (unknown last), then
/// ascending TER (unknown last). The sort is stable, so fully tied
/// candidates keep their input order. The winner is the first candidate in
/// that order whose AUM is unknown or at least `aum_floor`; funds known to
/// be below the floor never win, even alone in their group.
pub fn build_groups(instruments: &[Instrument], aum_floor: f64) -> Vec<DedupGroup> {
    let mut by_key: BTreeMap<String, Vec<&Instrument>> = BTreeMap::new();
    for instrument in instruments {
        by_key
            .entry(instrument_key(instrument))
            .or_default()
            .push(instrument);
    }

    let groups: Vec<DedupGroup> = by_key
        .into_iter()
        .map(|(key, members)| {
            let mut ranked: Vec<(u8, &Instrument)> = members
                .into_iter()
                .map(|inst| (detect_priority(inst.best_name()), inst))
                .collect();
            ranked.sort_by(|(pa, a), (pb, b)| {
                pa.cmp(pb)
                    .then_with(|| {
                        let a_eur = a.currency.as_deref() == Some("EUR");
                        let b_eur = b.currency.as_deref() == Some("EUR");
                        b_eur.cmp(&a_eur)
                    })
                    .then_with(|| compare_aum_desc(a.aum, b.aum))
                    .then_with(|| compare_ter_asc(a.ter, b.ter))
            });

            let winner = ranked
                .iter()
                .find(|(_, inst)| inst.aum.map_or(true, |aum| aum >= aum_floor))
                .map(|(_, inst)| inst.isin.clone());

            DedupGroup {
                key,
                candidates: ranked.into_iter().map(|(_, inst)| inst.isin.clone()).collect(),
                winner,
            }
        })
        .collect();

    log::debug!(
        "grouped {} instruments into {} exposure groups",
        instruments.len(),
        groups.len()
    );
    groups
}

/// Writes group membership back onto the instruments.
///
/// Each member gets its group key, a winner flag and the ISINs of its group
/// siblings. Instruments absent from `groups` have their dedup fields
/// cleared.
pub fn apply_groups(instruments: &mut [Instrument], groups: &[DedupGroup]) {
    let mut by_isin: HashMap<&str, (&DedupGroup, bool)> = HashMap::new();
    for group in groups {
        for isin in &group.candidates {
            let is_winner = group.winner.as_deref() == Some(isin.as_str());
            by_isin.insert(isin.as_str(), (group, is_winner));
        }
    }

    for instrument in instruments.iter_mut() {
        match by_isin.get(instrument.isin.as_str()) {
            Some(&(group, is_winner)) => {
                instrument.dedup_group = Some(group.key.clone());
                instrument.is_dedup_winner = Some(is_winner);
                instrument.dedup_candidates = group
                    .candidates
                    .iter()
                    .filter(|isin| **isin != instrument.isin)
                    .cloned()
                    .collect();
            }
            None => {
                instrument.dedup_group = None;
                instrument.is_dedup_winner = None;
                instrument.dedup_candidates = Vec::new();
            }
        }
    }
}

/// Higher AUM first, unknown AUM after any known value.
fn compare_aum_desc(a: Option<f64>, b: Option<f64>) -> std::cmp::Ordering {
    use std::cmp::Ordering;
    match (a, b) {
        (Some(a), Some(b)) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Lower TER first, unknown TER after any known value.
fn compare_ter_asc(a: Option<f64>, b: Option<f64>) -> std::cmp::Ordering {
    use std::cmp::Ordering;
    match (a, b) {
        (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
