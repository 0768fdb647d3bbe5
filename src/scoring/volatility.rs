//! Annualised volatility of daily returns

use statrs::statistics::{Data, Distribution};

/// Trading days per year used for annualisation
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Minimum series length before volatility is attempted
const MIN_CLOSES: usize = 22;
/// Trailing window, roughly six months of closes
const WINDOW: usize = 127;
/// Minimum valid daily returns inside the window
const MIN_RETURNS: usize = 10;

/// Annualised sample standard deviation of daily simple returns.
///
/// Looks at the trailing six months of closes, skipping bars with a
/// non-positive base. `None` when fewer than 22 closes or fewer than 10
/// valid daily returns are available.
pub fn annualized_volatility(closes: &[f64]) -> Option<f64> {
    if closes.len() < MIN_CLOSES {
        return None;
    }

    let slice = &closes[closes.len().saturating_sub(WINDOW)..];
    let mut daily = Vec::with_capacity(slice.len().saturating_sub(1));
    for pair in slice.windows(2) {
        if pair[0] > 0.0 {
            daily.push((pair[1] - pair[0]) / pair[0]);
        }
    }
    if daily.len() < MIN_RETURNS {
        return None;
    }

    let data = Data::new(daily);
    data.std_dev().map(|sd| sd * TRADING_DAYS_PER_YEAR.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_too_short() {
        assert_eq!(annualized_volatility(&[100.0; 21]), None);
    }

    #[test]
    fn test_flat_series_has_zero_volatility() {
        let vola = annualized_volatility(&[100.0; 30]).unwrap();
        assert_relative_eq!(vola, 0.0);
    }

    #[test]
    fn test_alternating_series() {
        // +1% / -1% alternation: daily returns 0.01 and -0.0099...
        let mut closes = Vec::with_capacity(40);
        let mut price = 100.0;
        for i in 0..40 {
            closes.push(price);
            price = if i % 2 == 0 { price * 1.01 } else { price / 1.01 };
        }
        let vola = annualized_volatility(&closes).unwrap();
        assert!(vola > 0.1, "expected meaningful volatility, got {}", vola);
    }

    #[test]
    fn test_non_positive_bases_are_skipped() {
        // 21 poisoned bars leave only 9 valid daily returns in the window
        let mut closes = vec![0.0; 22];
        closes.extend([
            100.0, 101.0, 102.0, 101.0, 103.0, 102.0, 104.0, 103.0, 105.0, 104.0,
        ]);
        assert_eq!(annualized_volatility(&closes), None);
    }

    #[test]
    fn test_uses_trailing_window_only() {
        // A huge move far outside the 127-close window must not register
        let mut closes = vec![100.0, 1000.0];
        closes.extend(vec![500.0; 127]);
        let vola = annualized_volatility(&closes).unwrap();
        assert_relative_eq!(vola, 0.0);
    }

    #[test]
    fn test_matches_hand_computed_stddev() {
        // 21 flat closes then returns of +10% and -10% on a 100 base
        let mut closes = vec![100.0; 20];
        closes.extend([100.0, 110.0, 99.0]);
        // daily returns: 20 zeros, 0.1, -0.1
        let n = 22.0_f64;
        let mean = (0.1 - 0.1) / n;
        let var = (20.0 * mean.powi(2) + (0.1 - mean).powi(2) + (-0.1 - mean).powi(2)) / (n - 1.0);
        let expected = var.sqrt() * TRADING_DAYS_PER_YEAR.sqrt();
        assert_relative_eq!(
            annualized_volatility(&closes).unwrap(),
            expected,
            max_relative = 1e-9
        );
    }
}
