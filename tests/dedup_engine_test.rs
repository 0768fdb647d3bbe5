//! Integration tests for the exposure deduplication engine
//!
//! Exercises normalisation, classification, key building and grouping
//! end to end through `Universe::refresh` and `dedup::run`.

use etfscreen::dedup::{self, classify, exposure_key, ExposureClass};
use etfscreen::instrument::{AssetClass, Instrument, Provenance};
use etfscreen::universe::Universe;

fn etf(isin: &str, name: &str, aum: Option<f64>, currency: &str) -> Instrument {
    let mut inst = Instrument::new(isin.to_string(), name.to_string(), AssetClass::Etf);
    inst.provenance = Provenance::Exchange;
    inst.currency = Some(currency.to_string());
    inst.aum = aum;
    inst
}

fn stock(isin: &str, name: &str) -> Instrument {
    let mut inst = Instrument::new(isin.to_string(), name.to_string(), AssetClass::Stock);
    inst.provenance = Provenance::Exchange;
    inst.currency = Some("EUR".to_string());
    inst
}

#[test]
fn test_world_funds_share_a_key_across_issuers() {
    let a = classify("iShares Core MSCI World UCITS ETF", AssetClass::Etf);
    let b = classify("Vanguard MSCI World ETF", AssetClass::Etf);

    assert_eq!(a.class, ExposureClass::Equity);
    assert_eq!(a.region, Some("WORLD"));
    assert_eq!(a.sector, None);
    assert!(a.factors.is_empty());
    assert_eq!(exposure_key(&a), exposure_key(&b));
}

#[test]
fn test_full_dedup_pass_over_mixed_universe() {
    let mut instruments = vec![
        etf("IE00B4L5Y983", "ISHARES CORE MSCI WORLD", Some(5e9), "EUR"),
        etf("IE00BJ0KDQ92", "XTRACKERS MSCI WORLD", Some(6e9), "EUR"),
        etf("LU0392494562", "LYXOR MSCI WORLD", Some(3e9), "EUR"),
        etf("IE00B5BMR087", "ISHS CORE S+P500 USD A", Some(7e10), "EUR"),
        etf("DE000A0S9GB0", "XETRA-GOLD", Some(1e10), "EUR"),
        stock("DE0007164600", "SAP SE O.N."),
        stock("US0378331005", "APPLE INC."),
    ];

    let groups = dedup::run(&mut instruments, 100_000_000.0);

    // world x3, S&P 500, gold, two stock singletons
    assert_eq!(groups.len(), 6);

    let world_key = instruments[0].dedup_group.clone().unwrap();
    assert_eq!(instruments[1].dedup_group.as_ref(), Some(&world_key));
    assert_eq!(instruments[2].dedup_group.as_ref(), Some(&world_key));

    // iShares has the best issuer priority despite the smallest AUM
    assert_eq!(instruments[0].is_dedup_winner, Some(true));
    assert_eq!(instruments[1].is_dedup_winner, Some(false));
    assert_eq!(instruments[2].is_dedup_winner, Some(false));

    // siblings exclude the instrument itself
    let mut siblings = instruments[0].dedup_candidates.clone();
    siblings.sort();
    assert_eq!(siblings, vec!["IE00BJ0KDQ92", "LU0392494562"]);

    // the S&P 500 fund is alone in its group
    assert_eq!(instruments[3].is_dedup_winner, Some(true));
    assert!(instruments[3].dedup_candidates.is_empty());

    // stocks key on their own ISIN and always win
    for stock in &instruments[5..] {
        assert_eq!(stock.dedup_group.as_deref(), Some(stock.isin.as_str()));
        assert_eq!(stock.is_dedup_winner, Some(true));
    }
}

#[test]
fn test_at_most_one_winner_per_group() {
    let mut instruments = vec![
        etf("IE0001", "ISHARES MSCI WORLD", Some(5e9), "EUR"),
        etf("IE0002", "XTRACKERS MSCI WORLD", Some(6e9), "EUR"),
        etf("IE0003", "HSBC MSCI WORLD", Some(4e9), "USD"),
        etf("IE0004", "AMUNDI MSCI WORLD", None, "EUR"),
        etf("IE0005", "UBS MSCI WORLD", Some(5e7), "EUR"),
    ];
    dedup::run(&mut instruments, 100_000_000.0);

    let winners = instruments
        .iter()
        .filter(|i| i.is_dedup_winner == Some(true))
        .count();
    assert_eq!(winners, 1);
}

#[test]
fn test_aum_floor_revokes_and_promotes() {
    // The preferred issuer is below the floor; the next candidate at or
    // above the floor takes the group even though it ranks worse.
    let mut instruments = vec![
        etf("IE000SMALL0", "ISHARES MSCI WORLD", Some(5e7), "EUR"),
        etf("IE000LARGE0", "XTRACKERS MSCI WORLD", Some(2e8), "EUR"),
    ];
    let groups = dedup::run(&mut instruments, 100_000_000.0);

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].winner.as_deref(), Some("IE000LARGE0"));
    assert_eq!(instruments[0].is_dedup_winner, Some(false));
    assert_eq!(instruments[1].is_dedup_winner, Some(true));
}

#[test]
fn test_group_with_every_candidate_below_floor_has_no_winner() {
    let mut instruments = vec![
        etf("IE000TINY00", "ISHARES MSCI WORLD", Some(5e7), "EUR"),
        etf("IE000TINY11", "XTRACKERS MSCI WORLD", Some(9e7), "EUR"),
    ];
    let groups = dedup::run(&mut instruments, 100_000_000.0);

    assert_eq!(groups[0].winner, None);
    assert!(instruments.iter().all(|i| i.is_dedup_winner == Some(false)));
}

#[test]
fn test_unknown_aum_clears_the_floor() {
    let mut instruments = vec![
        etf("IE000TINY00", "ISHARES MSCI WORLD", Some(5e7), "EUR"),
        etf("IE000NOAUM0", "XTRACKERS MSCI WORLD", None, "EUR"),
    ];
    let groups = dedup::run(&mut instruments, 100_000_000.0);
    assert_eq!(groups[0].winner.as_deref(), Some("IE000NOAUM0"));
}

#[test]
fn test_distinct_exposures_never_collapse() {
    let cases = [
        ("iShares Core MSCI World UCITS ETF", AssetClass::Etf),
        ("iShares MSCI World Value Factor", AssetClass::Etf),
        ("iShares MSCI World ESG Screened", AssetClass::Etf),
        ("iShares MSCI World EUR Hedged", AssetClass::Etf),
        ("iShares MSCI Europe", AssetClass::Etf),
        ("iShares MSCI World Technology", AssetClass::Etf),
        ("iShares Global Aggregate Bond", AssetClass::Etf),
        ("iShares Physical Gold", AssetClass::Etc),
    ];
    let keys: Vec<String> = cases
        .iter()
        .map(|(name, class)| exposure_key(&classify(name, *class)))
        .collect();

    for (i, a) in keys.iter().enumerate() {
        for b in &keys[i + 1..] {
            assert_ne!(a, b, "exposures collapsed: {:?}", cases[i].0);
        }
    }
}

#[test]
fn test_bond_funds_group_by_type_and_duration() {
    let mut instruments = vec![
        etf("IE000CORP01", "ISHARES EUR CORP BOND", Some(2e9), "EUR"),
        etf("IE000CORP02", "XTRACKERS EUR CORPORATE BOND", Some(3e9), "EUR"),
        etf("IE000CORPSH", "ISHARES EUR CORP BOND SHORT TERM", Some(1e9), "EUR"),
        etf("IE000GOV001", "LYXOR US TREASURY 7-10Y", Some(1e9), "EUR"),
    ];
    let groups = dedup::run(&mut instruments, 100_000_000.0);

    // the two plain corporate funds collapse, short-duration and
    // government funds stand alone
    assert_eq!(groups.len(), 3);
    assert_eq!(
        instruments[0].dedup_group,
        instruments[1].dedup_group
    );
    assert_ne!(instruments[0].dedup_group, instruments[2].dedup_group);
    assert_ne!(instruments[0].dedup_group, instruments[3].dedup_group);
}

#[test]
fn test_commodity_groups_ignore_wrapper_names() {
    let mut instruments = vec![
        etf("DE000A0S9GB0", "XETRA-GOLD", Some(1.4e10), "EUR"),
        etf("IE00B579F325", "INVESCO PHYSICAL GOLD", Some(1.6e10), "EUR"),
        etf("JE00B1VS3770", "WISDOMTREE PHYSICAL SILVER", Some(1e9), "EUR"),
    ];
    // Names alone classify these as commodities, no ETC tag needed.
    let groups = dedup::run(&mut instruments, 100_000_000.0);

    assert_eq!(groups.len(), 2);
    assert_eq!(instruments[0].dedup_group, instruments[1].dedup_group);
    assert_eq!(
        instruments[0].dedup_group.as_deref(),
        Some("COMMODITY:GOLD")
    );
    assert_eq!(
        instruments[2].dedup_group.as_deref(),
        Some("COMMODITY:SILVER")
    );
}

#[test]
fn test_dedup_is_deterministic_and_rerunnable() {
    let mut universe = Universe::default();
    universe.add_instruments(vec![
        etf("IE0001", "ISHARES MSCI WORLD", Some(5e9), "EUR"),
        etf("IE0002", "XTRACKERS MSCI WORLD", Some(6e9), "EUR"),
        etf("IE0003", "ISHS CORE S+P500 USD A", Some(7e10), "EUR"),
        stock("DE0007164600", "SAP SE O.N."),
    ]);

    universe.refresh();
    let first: Vec<_> = universe
        .instruments()
        .iter()
        .map(|i| (i.dedup_group.clone(), i.is_dedup_winner, i.dedup_candidates.clone()))
        .collect();

    universe.refresh();
    let second: Vec<_> = universe
        .instruments()
        .iter()
        .map(|i| (i.dedup_group.clone(), i.is_dedup_winner, i.dedup_candidates.clone()))
        .collect();

    assert_eq!(first, second);
}

#[test]
fn test_floor_change_reassigns_winners_on_refresh() {
    let mut universe = Universe::default();
    universe.add_instruments(vec![
        etf("IE000SMALL0", "ISHARES MSCI WORLD", Some(5e7), "EUR"),
        etf("IE000LARGE0", "XTRACKERS MSCI WORLD", Some(2e8), "EUR"),
    ]);
    universe.refresh();
    assert_eq!(
        universe.get("IE000LARGE0").unwrap().is_dedup_winner,
        Some(true)
    );

    // Dropping the floor restores the preferred issuer.
    let mut config = *universe.config();
    config.aum_floor = 0.0;
    universe.set_config(config).unwrap();
    universe.refresh();
    assert_eq!(
        universe.get("IE000SMALL0").unwrap().is_dedup_winner,
        Some(true)
    );
    assert_eq!(
        universe.get("IE000LARGE0").unwrap().is_dedup_winner,
        Some(false)
    );
}
