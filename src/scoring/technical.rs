//! Moving averages, ATR and the trailing exit level

/// Moving-average periods computed for every instrument
pub const MA_PERIODS: [usize; 4] = [10, 50, 100, 200];

/// ATR smoothing period
pub const ATR_PERIOD: usize = 20;

/// Arithmetic mean of the trailing `period` closes, `None` when the series
/// is shorter than the period.
pub fn moving_average(closes: &[f64], period: usize) -> Option<f64> {
    if period == 0 || closes.len() < period {
        return None;
    }
    let window = &closes[closes.len() - period..];
    Some(window.iter().sum::<f64>() / period as f64)
}

fn true_range(prev_close: f64, close: f64, high: Option<f64>, low: Option<f64>) -> f64 {
    match (high, low) {
        (Some(h), Some(l)) if h.is_finite() && l.is_finite() => (h - l)
            .max((h - prev_close).abs())
            .max((l - prev_close).abs()),
        // close-only approximation when the feed has no range data
        _ => (close - prev_close).abs(),
    }
}

/// Wilder-smoothed average true range.
///
/// Needs `period + 1` bars: the seed is the simple mean of the first
/// `period` true ranges, the remainder is smoothed with alpha `1/period`.
/// Bars without high/low data degrade to the close-to-close range.
pub fn average_true_range(
    closes: &[f64],
    highs: &[f64],
    lows: &[f64],
    period: usize,
) -> Option<f64> {
    if period == 0 || closes.len() < period + 1 {
        return None;
    }

    let ranges: Vec<f64> = (1..closes.len())
        .map(|i| {
            true_range(
                closes[i - 1],
                closes[i],
                highs.get(i).copied(),
                lows.get(i).copied(),
            )
        })
        .collect();

    let mut atr = ranges[..period].iter().sum::<f64>() / period as f64;
    for tr in &ranges[period..] {
        atr = (atr * (period - 1) as f64 + tr) / period as f64;
    }
    Some(atr)
}

/// Trailing exit level: last close minus `multiplier` times the ATR
pub fn selling_threshold(closes: &[f64], atr: Option<f64>, multiplier: f64) -> Option<f64> {
    let last = closes.last().copied()?;
    Some(last - multiplier * atr?)
}
