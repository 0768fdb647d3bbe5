//! Momentum and Sharpe scores

use crate::config::MomentumWeights;
use crate::scoring::returns::TrailingReturns;

/// Weighted average of the available horizon returns.
///
/// Weights are renormalised over whichever horizons have a return, so a
/// short series is not penalised for missing the longer horizons. `None`
/// when no return is available or the available weights sum to zero.
pub fn momentum_score(returns: &TrailingReturns, weights: &MomentumWeights) -> Option<f64> {
    let mut available: Vec<(f64, f64)> = Vec::with_capacity(3);
    if let Some(r) = returns.r1m {
        available.push((r, weights.w1m));
    }
    if let Some(r) = returns.r3m {
        available.push((r, weights.w3m));
    }
    if let Some(r) = returns.r6m {
        available.push((r, weights.w6m));
    }
    if available.is_empty() {
        return None;
    }

    let total: f64 = available.iter().map(|(_, w)| w).sum();
    if total == 0.0 {
        return None;
    }

    Some(available.iter().map(|(r, w)| r * (w / total)).sum())
}

/// Momentum per unit of volatility, `None` when either input is missing
/// or volatility is zero.
pub fn sharpe_score(momentum: Option<f64>, vola: Option<f64>) -> Option<f64> {
    let m = momentum?;
    let v = vola?;
    if v == 0.0 {
        return None;
    }
    Some(m / v)
}
