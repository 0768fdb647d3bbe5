//! Trailing returns over a daily close series

/// Trading days per nominal month horizon.
///
/// Slightly fewer than the exact calendar counts to tolerate missing days
/// and holidays in feed data.
pub const ONE_MONTH: usize = 21;
/// Trading days per nominal three-month horizon
pub const THREE_MONTHS: usize = 63;
/// Trading days per nominal six-month horizon
pub const SIX_MONTHS: usize = 125;

/// Simple returns over the three standard horizons
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TrailingReturns {
    pub r1m: Option<f64>,
    pub r3m: Option<f64>,
    pub r6m: Option<f64>,
}

/// Simple return over the trailing `days` trading days.
///
/// Needs `days + 1` closes so the base sits `days` positions before the
/// last; `None` when the series is too short or the base is zero or NaN.
pub fn trailing_return(closes: &[f64], days: usize) -> Option<f64> {
    if closes.len() < 2 {
        return None;
    }
    let last = *closes.last()?;
    let target = (closes.len() - 1).checked_sub(days)?;
    let base = closes[target];
    if base == 0.0 || base.is_nan() {
        return None;
    }
    Some((last - base) / base)
}

/// Compute the 1/3/6 month returns in one call
pub fn trailing_returns(closes: &[f64]) -> TrailingReturns {
    TrailingReturns {
        r1m: trailing_return(closes, ONE_MONTH),
        r3m: trailing_return(closes, THREE_MONTHS),
        r6m: trailing_return(closes, SIX_MONTHS),
    }
}
