//! Value scores
//!
//! Two disjoint models keyed by asset class. Funds are ranked on earnings
//! yield (1/PE) and book yield (1/PB); stocks on the Greenblatt pair of
//! EBITDA/EV and return on assets. A score is the sum of the two 1-based
//! metric ranks, so lower means cheaper.

use crate::instrument::{AssetClass, Instrument, ValueModel};
use hashbrown::HashMap;
use std::cmp::Ordering;

/// Value score and model tag for one instrument
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ValueOutcome {
    pub score: Option<f64>,
    pub model: Option<ValueModel>,
}

/// 1-based ranks by descending metric value, keyed by instrument index
fn ranks_desc(mut metrics: Vec<(usize, f64)>) -> HashMap<usize, u32> {
    metrics.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    metrics
        .iter()
        .enumerate()
        .map(|(pos, &(idx, _))| (idx, pos as u32 + 1))
        .collect()
}

fn uses_fund_model(class: AssetClass) -> bool {
    matches!(class, AssetClass::Etf | AssetClass::Etc)
}

/// Compute value scores for the whole working set.
///
/// Funds with one usable metric get `rank * 2` as a comparable proxy; a
/// stock needs both Magic Formula inputs or it gets no score at all.
pub fn value_scores(instruments: &[Instrument]) -> Vec<ValueOutcome> {
    let earnings_yield = ranks_desc(
        instruments
            .iter()
            .enumerate()
            .filter(|(_, i)| uses_fund_model(i.asset_class))
            .filter_map(|(idx, i)| i.pe.filter(|&pe| pe > 0.0).map(|pe| (idx, 1.0 / pe)))
            .collect(),
    );
    let book_yield = ranks_desc(
        instruments
            .iter()
            .enumerate()
            .filter(|(_, i)| uses_fund_model(i.asset_class))
            .filter_map(|(idx, i)| i.pb.filter(|&pb| pb > 0.0).map(|pb| (idx, 1.0 / pb)))
            .collect(),
    );
    let stock_yield = ranks_desc(
        instruments
            .iter()
            .enumerate()
            .filter(|(_, i)| i.asset_class.is_stock())
            .filter_map(|(idx, i)| match (i.ebitda, i.enterprise_value) {
                (Some(ebitda), Some(ev)) if ev > 0.0 => Some((idx, ebitda / ev)),
                _ => None,
            })
            .collect(),
    );
    let stock_roa = ranks_desc(
        instruments
            .iter()
            .enumerate()
            .filter(|(_, i)| i.asset_class.is_stock())
            .filter_map(|(idx, i)| i.return_on_assets.map(|roa| (idx, roa)))
            .collect(),
    );

    instruments
        .iter()
        .enumerate()
        .map(|(idx, inst)| {
            if uses_fund_model(inst.asset_class) {
                let outcome = match (earnings_yield.get(&idx), book_yield.get(&idx)) {
                    (Some(&ey), Some(&by)) => Some((ey + by) as f64),
                    (Some(&ey), None) => Some((ey * 2) as f64),
                    (None, Some(&by)) => Some((by * 2) as f64),
                    (None, None) => None,
                };
                ValueOutcome {
                    score: outcome,
                    model: outcome.map(|_| ValueModel::Etf),
                }
            } else if inst.asset_class.is_stock() {
                match (stock_yield.get(&idx), stock_roa.get(&idx)) {
                    (Some(&ey), Some(&roa)) => ValueOutcome {
                        score: Some((ey + roa) as f64),
                        model: Some(ValueModel::MagicFormula),
                    },
                    _ => ValueOutcome::default(),
                }
            } else {
                ValueOutcome::default()
            }
        })
        .collect()
}
