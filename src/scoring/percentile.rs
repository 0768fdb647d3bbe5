//! Percentile normalisation and the combined score
//!
//! Momentum and Sharpe scores live on different scales, so blending them
//! directly would let one dominate. Both are first converted to rank-based
//! percentiles across the working set, then averaged.

use std::cmp::Ordering;

/// Percentile in [0, 1] per input slot; a higher value earns a higher
/// percentile. Ties share the percentile of their average sorted position;
/// a lone value scores 1.0. `None` inputs stay `None`.
pub fn percentile_ranks(values: &[Option<f64>]) -> Vec<Option<f64>> {
    let mut present: Vec<(usize, f64)> = values
        .iter()
        .enumerate()
        .filter_map(|(i, v)| v.map(|v| (i, v)))
        .collect();

    let mut out = vec![None; values.len()];
    let n = present.len();
    if n == 0 {
        return out;
    }
    if n == 1 {
        out[present[0].0] = Some(1.0);
        return out;
    }

    present.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

    let denom = (n - 1) as f64;
    let mut start = 0;
    while start < n {
        let mut end = start + 1;
        while end < n && present[end].1 == present[start].1 {
            end += 1;
        }
        // 0-based average position of the tied run, best = 0
        let avg_index = (start + end - 1) as f64 / 2.0;
        let pct = 1.0 - avg_index / denom;
        for &(slot, _) in &present[start..end] {
            out[slot] = Some(pct);
        }
        start = end;
    }
    out
}

/// Blend momentum and Sharpe into one score per slot: the mean of both
/// percentiles when both exist, else whichever single percentile exists.
pub fn combined_scores(momentum: &[Option<f64>], sharpe: &[Option<f64>]) -> Vec<Option<f64>> {
    let m_pct = percentile_ranks(momentum);
    let s_pct = percentile_ranks(sharpe);

    m_pct
        .iter()
        .zip(&s_pct)
        .map(|(m, s)| match (m, s) {
            (Some(m), Some(s)) => Some((m + s) / 2.0),
            (Some(m), None) => Some(*m),
            (None, Some(s)) => Some(*s),
            (None, None) => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_distinct_values_span_full_range() {
        let pct = percentile_ranks(&[Some(3.0), Some(1.0), Some(2.0)]);
        assert_relative_eq!(pct[0].unwrap(), 1.0);
        assert_relative_eq!(pct[1].unwrap(), 0.0);
        assert_relative_eq!(pct[2].unwrap(), 0.5);
    }

    #[test]
    fn test_ties_share_average_position() {
        let pct = percentile_ranks(&[Some(10.0), Some(20.0), Some(20.0), Some(30.0)]);
        assert_relative_eq!(pct[3].unwrap(), 1.0);
        assert_relative_eq!(pct[1].unwrap(), 0.5);
        assert_relative_eq!(pct[2].unwrap(), 0.5);
        assert_relative_eq!(pct[0].unwrap(), 0.0);
    }

    #[test]
    fn test_single_value_scores_one() {
        let pct = percentile_ranks(&[None, Some(42.0), None]);
        assert_eq!(pct[0], None);
        assert_relative_eq!(pct[1].unwrap(), 1.0);
        assert_eq!(pct[2], None);
    }

    #[test]
    fn test_empty_input() {
        assert!(percentile_ranks(&[]).is_empty());
        assert_eq!(percentile_ranks(&[None, None]), vec![None, None]);
    }

    #[test]
    fn test_combined_blends_both_percentiles() {
        let momentum = vec![Some(0.10), Some(0.05)];
        let sharpe = vec![Some(0.5), Some(1.5)];
        let combined = combined_scores(&momentum, &sharpe);
        // slot 0: momentum pct 1.0, sharpe pct 0.0 -> 0.5
        assert_relative_eq!(combined[0].unwrap(), 0.5);
        assert_relative_eq!(combined[1].unwrap(), 0.5);
    }

    #[test]
    fn test_combined_falls_back_to_single_column() {
        let momentum = vec![Some(0.10), Some(0.05), None];
        let sharpe = vec![None, None, None];
        let combined = combined_scores(&momentum, &sharpe);
        assert_relative_eq!(combined[0].unwrap(), 1.0);
        assert_relative_eq!(combined[1].unwrap(), 0.0);
        assert_eq!(combined[2], None);
    }
}
