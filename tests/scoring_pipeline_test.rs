//! Integration tests for the quantitative scoring pipeline
//!
//! Runs `scoring::rescore` over realistic working sets and checks returns,
//! volatility, technicals, the percentile blend, value models and ranks
//! against hand-computed expectations.

use approx::assert_relative_eq;
use etfscreen::config::{MomentumWeights, ScreenConfig};
use etfscreen::instrument::{AssetClass, Instrument, ValueModel};
use etfscreen::scoring;
use etfscreen::types::PriceSeries;

fn with_closes(isin: &str, class: AssetClass, closes: Vec<f64>) -> Instrument {
    let mut inst = Instrument::new(isin.to_string(), isin.to_string(), class);
    inst.series = PriceSeries::from_closes(closes);
    inst
}

fn trending(start: f64, step: f64, len: usize) -> Vec<f64> {
    (0..len).map(|i| start + step * i as f64).collect()
}

#[test]
fn test_flat_then_jump_scenario() {
    // 125 closes at 100 then a final 110: every horizon shares the base.
    let mut closes = vec![100.0; 125];
    closes.push(110.0);
    let mut instruments = vec![with_closes("A", AssetClass::Etf, closes)];
    scoring::rescore(&mut instruments, &ScreenConfig::default());

    let a = &instruments[0];
    assert_relative_eq!(a.r1m.unwrap(), 0.10);
    assert_relative_eq!(a.r3m.unwrap(), 0.10);
    assert_relative_eq!(a.r6m.unwrap(), 0.10);

    // every daily return is zero except the final 10% jump
    let vola = a.vola.unwrap();
    assert!(vola > 0.0 && vola < 2.0, "vola out of range: {}", vola);

    // equal weights over three identical returns
    assert_relative_eq!(a.momentum_score.unwrap(), 0.10);
    assert_relative_eq!(a.sharpe_score.unwrap(), 0.10 / vola);
}

#[test]
fn test_short_series_degrades_gracefully() {
    // 20 closes: no returns, no volatility, but MA(10) still computes.
    let mut instruments = vec![with_closes("A", AssetClass::Etf, trending(100.0, 1.0, 20))];
    scoring::rescore(&mut instruments, &ScreenConfig::default());

    let a = &instruments[0];
    assert_eq!(a.r1m, None);
    assert_eq!(a.vola, None);
    assert_eq!(a.momentum_score, None);
    assert_eq!(a.sharpe_score, None);
    assert_eq!(a.combined_score, None);
    assert_eq!(a.momentum_rank, None);
    assert!(a.ma10.is_some());
    assert_eq!(a.ma50, None);
    assert_eq!(a.atr20, None);
    assert_eq!(a.selling_threshold, None);
}

#[test]
fn test_boundary_22_closes_unlocks_r1m() {
    let mut instruments = vec![
        with_closes("TWENTY", AssetClass::Etf, vec![100.0; 20]),
        with_closes("TWENTYTWO", AssetClass::Etf, {
            let mut c = vec![100.0; 21];
            c.push(105.0);
            c
        }),
    ];
    scoring::rescore(&mut instruments, &ScreenConfig::default());

    assert_eq!(instruments[0].r1m, None);
    assert_relative_eq!(instruments[1].r1m.unwrap(), 0.05);
}

#[test]
fn test_momentum_weight_renormalization() {
    // 64 closes: r1m and r3m available, r6m missing.
    let mut closes = vec![100.0; 63];
    closes.push(120.0);
    let mut instruments = vec![with_closes("A", AssetClass::Etf, closes)];

    let mut config = ScreenConfig::default();
    config.weights = MomentumWeights::new(0.2, 0.3, 0.5);
    scoring::rescore(&mut instruments, &config);

    let a = &instruments[0];
    assert_eq!(a.r6m, None);
    // weights renormalise to 0.2/0.5 and 0.3/0.5 over the available pair
    let expected = 0.20 * (0.2 / 0.5) + 0.20 * (0.3 / 0.5);
    assert_relative_eq!(a.momentum_score.unwrap(), expected, max_relative = 1e-12);
}

#[test]
fn test_rank_monotonicity_over_working_set() {
    let mut instruments: Vec<Instrument> = (0..8)
        .map(|i| {
            with_closes(
                &format!("I{}", i),
                AssetClass::Etf,
                trending(100.0, 0.1 + 0.1 * i as f64, 200),
            )
        })
        .collect();
    scoring::rescore(&mut instruments, &ScreenConfig::default());

    for a in &instruments {
        for b in &instruments {
            if let (Some(ma), Some(mb)) = (a.momentum_score, b.momentum_score) {
                if ma > mb {
                    assert!(
                        a.momentum_rank.unwrap() < b.momentum_rank.unwrap(),
                        "rank order broken between {} and {}",
                        a.isin,
                        b.isin
                    );
                }
            }
        }
    }
    // rank 1 exists and belongs to the steepest trend
    assert_eq!(instruments[7].momentum_rank, Some(1));
}

/// Geometric drift with a fixed alternating wobble, so instruments share
/// roughly the same volatility and a higher drift wins both momentum and
/// Sharpe.
fn drifting(growth: f64, len: usize) -> Vec<f64> {
    (0..len)
        .map(|i| {
            let wobble = if i % 2 == 1 { 1.01 } else { 1.0 };
            100.0 * (1.0 + growth).powi(i as i32) * wobble
        })
        .collect()
}

#[test]
fn test_combined_score_blends_percentiles() {
    let mut instruments = vec![
        with_closes("LOW", AssetClass::Etf, drifting(0.0005, 200)),
        with_closes("MID", AssetClass::Etf, drifting(0.002, 200)),
        with_closes("HIGH", AssetClass::Etf, drifting(0.004, 200)),
    ];
    scoring::rescore(&mut instruments, &ScreenConfig::default());

    for inst in &instruments {
        let c = inst.combined_score.unwrap();
        assert!((0.0..=1.0).contains(&c), "combined out of range: {}", c);
    }
    // the best on both axes takes percentile 1 on each
    assert_relative_eq!(instruments[2].combined_score.unwrap(), 1.0);
    assert_relative_eq!(instruments[0].combined_score.unwrap(), 0.0);
    assert_eq!(instruments[2].combined_rank, Some(1));
}

#[test]
fn test_value_models_split_by_asset_class() {
    let mut cheap_etf = with_closes("ETF-CHEAP", AssetClass::Etf, vec![]);
    cheap_etf.pe = Some(10.0);
    cheap_etf.pb = Some(1.0);
    let mut dear_etf = with_closes("ETF-DEAR", AssetClass::Etf, vec![]);
    dear_etf.pe = Some(25.0);
    dear_etf.pb = Some(3.0);
    let mut half_etf = with_closes("ETF-HALF", AssetClass::Etf, vec![]);
    half_etf.pb = Some(2.0); // P/E missing, book yield only

    let mut good_stock = with_closes("STOCK-GOOD", AssetClass::Stock, vec![]);
    good_stock.ebitda = Some(800.0);
    good_stock.enterprise_value = Some(4000.0);
    good_stock.return_on_assets = Some(0.18);
    let mut partial_stock = with_closes("STOCK-PART", AssetClass::Stock, vec![]);
    partial_stock.enterprise_value = Some(9000.0);
    partial_stock.return_on_assets = Some(0.25); // EBITDA missing

    let mut instruments = vec![cheap_etf, dear_etf, half_etf, good_stock, partial_stock];
    scoring::rescore(&mut instruments, &ScreenConfig::default());

    // cheapest fund tops both yield rankings
    assert_eq!(instruments[0].value_score, Some(2.0));
    assert_eq!(instruments[0].value_model, Some(ValueModel::Etf));
    assert_eq!(instruments[0].value_rank, Some(1));

    // single-metric fund gets its book rank doubled (rank 2 of 3 books)
    assert_eq!(instruments[2].value_score, Some(4.0));
    assert_eq!(instruments[2].value_model, Some(ValueModel::Etf));

    // the complete stock sums two rank-1 metrics
    assert_eq!(instruments[3].value_score, Some(2.0));
    assert_eq!(instruments[3].value_model, Some(ValueModel::MagicFormula));

    // no single-metric fallback for stocks
    assert_eq!(instruments[4].value_score, None);
    assert_eq!(instruments[4].value_model, None);
}

#[test]
fn test_selling_threshold_follows_config() {
    let closes = trending(100.0, 1.0, 40);
    for multiplier in [3.0, 4.0, 5.0] {
        let mut config = ScreenConfig::default();
        config.atr_multiplier = multiplier;
        let mut instruments = vec![with_closes("A", AssetClass::Etf, closes.clone())];
        scoring::rescore(&mut instruments, &config);

        let a = &instruments[0];
        assert_relative_eq!(
            a.selling_threshold.unwrap(),
            a.series.last_close().unwrap() - multiplier * a.atr20.unwrap()
        );
    }
}

#[test]
fn test_atr_prefers_range_data() {
    let closes = vec![100.0; 40];
    let mut close_only = with_closes("CLOSE", AssetClass::Etf, closes.clone());
    close_only.series = PriceSeries::from_closes(closes.clone());

    let mut with_range = with_closes("RANGE", AssetClass::Etf, vec![]);
    with_range.series = PriceSeries {
        closes: closes.clone(),
        highs: vec![102.0; 40],
        lows: vec![98.0; 40],
        timestamps: Vec::new(),
    };

    let mut instruments = vec![close_only, with_range];
    scoring::rescore(&mut instruments, &ScreenConfig::default());

    // flat closes alone make a zero ATR; the 4-point bar range does not
    assert_relative_eq!(instruments[0].atr20.unwrap(), 0.0);
    assert_relative_eq!(instruments[1].atr20.unwrap(), 4.0);
}

#[test]
fn test_rescore_twice_is_identical() {
    let mut instruments = vec![
        with_closes("A", AssetClass::Etf, trending(100.0, 0.5, 260)),
        with_closes("B", AssetClass::Etf, trending(90.0, -0.2, 150)),
        with_closes("C", AssetClass::Stock, trending(50.0, 0.3, 80)),
        with_closes("D", AssetClass::Etf, vec![]),
    ];
    instruments[2].ebitda = Some(100.0);
    instruments[2].enterprise_value = Some(1000.0);
    instruments[2].return_on_assets = Some(0.1);

    let config = ScreenConfig::default();
    scoring::rescore(&mut instruments, &config);
    let snapshot = instruments.clone();
    scoring::rescore(&mut instruments, &config);
    assert_eq!(instruments, snapshot);
}

#[test]
fn test_zero_weight_for_only_available_horizon() {
    // Only r1m is computable but its weight is zero.
    let mut closes = vec![100.0; 21];
    closes.push(110.0);
    let mut instruments = vec![with_closes("A", AssetClass::Etf, closes)];

    let mut config = ScreenConfig::default();
    config.weights = MomentumWeights::new(0.0, 0.5, 0.5);
    scoring::rescore(&mut instruments, &config);

    assert!(instruments[0].r1m.is_some());
    assert_eq!(instruments[0].momentum_score, None);
    assert_eq!(instruments[0].sharpe_score, None);
}
