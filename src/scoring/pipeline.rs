//! Full scoring pass over the working set

use crate::config::ScreenConfig;
use crate::instrument::Instrument;
use crate::scoring::momentum::{momentum_score, sharpe_score};
use crate::scoring::percentile::combined_scores;
use crate::scoring::rank::{dense_ranks, RankOrder};
use crate::scoring::returns::trailing_returns;
use crate::scoring::technical::{
    average_true_range, moving_average, selling_threshold, ATR_PERIOD, MA_PERIODS,
};
use crate::scoring::value::value_scores;
use crate::scoring::volatility::annualized_volatility;
use log::debug;

/// Recompute every derived field on every instrument.
///
/// Per-instrument fields are recomputed from the attached series and
/// fundamentals alone, then the set-wide steps (combined percentile blend,
/// value scores, ranks) run over the whole slice. Running the pass twice on
/// the same inputs produces identical output.
pub fn rescore(instruments: &mut [Instrument], config: &ScreenConfig) {
    for inst in instruments.iter_mut() {
        rescore_instrument(inst, config);
    }

    let momentum: Vec<_> = instruments.iter().map(|i| i.momentum_score).collect();
    let sharpe: Vec<_> = instruments.iter().map(|i| i.sharpe_score).collect();
    let combined = combined_scores(&momentum, &sharpe);
    for (inst, score) in instruments.iter_mut().zip(&combined) {
        inst.combined_score = *score;
    }

    let outcomes = value_scores(instruments);
    for (inst, outcome) in instruments.iter_mut().zip(&outcomes) {
        inst.value_score = outcome.score;
        inst.value_model = outcome.model;
    }

    apply_ranks(instruments);
    debug!("rescored {} instruments", instruments.len());
}

fn rescore_instrument(inst: &mut Instrument, config: &ScreenConfig) {
    let returns = trailing_returns(&inst.series.closes);
    let vola = annualized_volatility(&inst.series.closes);
    let momentum = momentum_score(&returns, &config.weights);
    let sharpe = sharpe_score(momentum, vola);

    let last = inst.series.last_close();
    let [ma10, ma50, ma100, ma200] = MA_PERIODS.map(|p| moving_average(&inst.series.closes, p));
    let above = |ma: Option<f64>| match (last, ma) {
        (Some(l), Some(m)) => Some(l > m),
        _ => None,
    };

    let atr20 = average_true_range(
        &inst.series.closes,
        &inst.series.highs,
        &inst.series.lows,
        ATR_PERIOD,
    );
    let threshold = selling_threshold(&inst.series.closes, atr20, config.atr_multiplier);

    inst.r1m = returns.r1m;
    inst.r3m = returns.r3m;
    inst.r6m = returns.r6m;
    inst.vola = vola;
    inst.momentum_score = momentum;
    inst.sharpe_score = sharpe;
    inst.above_ma10 = above(ma10);
    inst.above_ma50 = above(ma50);
    inst.above_ma100 = above(ma100);
    inst.above_ma200 = above(ma200);
    inst.ma10 = ma10;
    inst.ma50 = ma50;
    inst.ma100 = ma100;
    inst.ma200 = ma200;
    inst.atr20 = atr20;
    inst.selling_threshold = threshold;
    inst.earnings_yield = inst.pe.filter(|&pe| pe > 0.0).map(|pe| 1.0 / pe);
}

fn apply_ranks(instruments: &mut [Instrument]) {
    let momentum: Vec<_> = instruments.iter().map(|i| i.momentum_score).collect();
    let sharpe: Vec<_> = instruments.iter().map(|i| i.sharpe_score).collect();
    let combined: Vec<_> = instruments.iter().map(|i| i.combined_score).collect();
    let value: Vec<_> = instruments.iter().map(|i| i.value_score).collect();

    let momentum_ranks = dense_ranks(&momentum, RankOrder::Descending);
    let sharpe_ranks = dense_ranks(&sharpe, RankOrder::Descending);
    let combined_ranks = dense_ranks(&combined, RankOrder::Descending);
    let value_ranks = dense_ranks(&value, RankOrder::Ascending);

    for (i, inst) in instruments.iter_mut().enumerate() {
        inst.momentum_rank = momentum_ranks[i];
        inst.sharpe_rank = sharpe_ranks[i];
        inst.combined_rank = combined_ranks[i];
        inst.value_rank = value_ranks[i];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instrument::AssetClass;
    use crate::types::PriceSeries;
    use approx::assert_relative_eq;

    fn with_series(isin: &str, closes: Vec<f64>) -> Instrument {
        let mut inst = Instrument::new(isin.to_string(), isin.to_string(), AssetClass::Etf);
        inst.series = PriceSeries::from_closes(closes);
        inst
    }

    fn trending(start: f64, step: f64, len: usize) -> Vec<f64> {
        (0..len).map(|i| start + step * i as f64).collect()
    }

    #[test]
    fn test_rescore_fills_every_field() {
        let mut instruments = vec![with_series("A", trending(100.0, 0.5, 260))];
        rescore(&mut instruments, &ScreenConfig::default());

        let a = &instruments[0];
        assert!(a.r1m.is_some() && a.r3m.is_some() && a.r6m.is_some());
        assert!(a.vola.is_some());
        assert!(a.momentum_score.is_some() && a.sharpe_score.is_some());
        assert!(a.combined_score.is_some());
        assert!(a.ma10.is_some() && a.ma200.is_some());
        assert_eq!(a.above_ma200, Some(true)); // rising series
        assert!(a.atr20.is_some() && a.selling_threshold.is_some());
        assert_eq!(a.momentum_rank, Some(1));
    }

    #[test]
    fn test_rescore_is_idempotent() {
        let mut instruments = vec![
            with_series("A", trending(100.0, 0.5, 200)),
            with_series("B", trending(80.0, -0.1, 150)),
            with_series("C", vec![50.0; 5]),
        ];
        rescore(&mut instruments, &ScreenConfig::default());
        let first = instruments.clone();
        rescore(&mut instruments, &ScreenConfig::default());
        assert_eq!(instruments, first);
    }

    #[test]
    fn test_empty_series_clears_scores() {
        let mut inst = with_series("A", vec![]);
        inst.momentum_score = Some(9.9); // stale value from an earlier pass
        let mut instruments = vec![inst];
        rescore(&mut instruments, &ScreenConfig::default());
        assert_eq!(instruments[0].momentum_score, None);
        assert_eq!(instruments[0].momentum_rank, None);
    }

    #[test]
    fn test_better_momentum_gets_better_rank() {
        let mut instruments = vec![
            with_series("SLOW", trending(100.0, 0.1, 200)),
            with_series("FAST", trending(100.0, 1.0, 200)),
        ];
        rescore(&mut instruments, &ScreenConfig::default());
        assert!(instruments[1].momentum_score > instruments[0].momentum_score);
        assert_eq!(instruments[1].momentum_rank, Some(1));
        assert_eq!(instruments[0].momentum_rank, Some(2));
    }

    #[test]
    fn test_selling_threshold_tracks_multiplier() {
        let mut instruments = vec![with_series("A", trending(100.0, 1.0, 30))];
        let mut config = ScreenConfig::default();
        config.atr_multiplier = 3.0;
        rescore(&mut instruments, &config);

        let a = &instruments[0];
        let last = a.series.last_close().unwrap();
        assert_relative_eq!(
            a.selling_threshold.unwrap(),
            last - 3.0 * a.atr20.unwrap()
        );
    }

    #[test]
    fn test_earnings_yield_derivation() {
        let mut pos = with_series("A", vec![]);
        pos.pe = Some(20.0);
        let mut neg = with_series("B", vec![]);
        neg.pe = Some(-4.0);
        let mut instruments = vec![pos, neg];
        rescore(&mut instruments, &ScreenConfig::default());
        assert_relative_eq!(instruments[0].earnings_yield.unwrap(), 0.05);
        assert_eq!(instruments[1].earnings_yield, None);
    }
}
