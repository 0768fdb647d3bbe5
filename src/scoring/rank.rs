//! Dense ranks over score columns

use std::cmp::Ordering;

/// Sort direction for a score column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankOrder {
    /// Higher score is better (momentum, Sharpe, combined)
    Descending,
    /// Lower score is better (value)
    Ascending,
}

/// 1-based dense ranks per slot: equal scores share a rank and the next
/// distinct score takes the following rank. Slots without a score stay
/// unranked.
pub fn dense_ranks(values: &[Option<f64>], order: RankOrder) -> Vec<Option<u32>> {
    let mut present: Vec<(usize, f64)> = values
        .iter()
        .enumerate()
        .filter_map(|(i, v)| v.map(|v| (i, v)))
        .collect();

    present.sort_by(|a, b| {
        let ord = a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal);
        match order {
            RankOrder::Ascending => ord,
            RankOrder::Descending => ord.reverse(),
        }
    });

    let mut out = vec![None; values.len()];
    let mut rank = 0u32;
    let mut prev = None;
    for &(slot, value) in &present {
        if prev != Some(value) {
            rank += 1;
        }
        out[slot] = Some(rank);
        prev = Some(value);
    }
    out
}
