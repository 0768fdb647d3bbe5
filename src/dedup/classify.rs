//! Exposure classification.
//!
//! Turns a normalized fund name into a structured fingerprint of what the
//! fund actually tracks. The fingerprint deliberately ignores the issuer,
//! share class and phrasing order so that "iShares Core MSCI World" and
//! "Vanguard MSCI World" land on the same vector.

use crate::dedup::normalize::{self, NormalizedName};
use crate::dedup::vocab;
use crate::instrument::AssetClass;

/// Top-level exposure bucket of a fund.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExposureClass {
    Equity,
    Bond,
    Commodity,
}

/// Structured exposure fingerprint of one instrument.
///
/// Derived from the name alone and never persisted; only the canonical key
/// built from it is stored. `sector` doubles as the commodity tag on the
/// commodity path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExposureVector {
    pub class: ExposureClass,
    pub region: Option<&'static str>,
    pub subregion: Option<&'static str>,
    /// Factor tilts, sorted so phrasing order never matters.
    pub factors: Vec<&'static str>,
    pub sector: Option<&'static str>,
    pub bond_type: Option<&'static str>,
    pub bond_duration: Option<&'static str>,
    pub esg: bool,
    pub hedged: bool,
}

/// Commodity match with its wrapper modifiers (hedged, leveraged, inverse).
struct CommodityMatch {
    commodity: &'static str,
    mods: Vec<&'static str>,
}

/// Classifies a raw fund name into an exposure vector.
///
/// The asset-class tag only matters for commodities: an ETC with no
/// recognisable commodity term still classifies as a commodity with an
/// unknown underlying.
pub fn classify(name: &str, asset_class: AssetClass) -> ExposureVector {
    let NormalizedName { tokens, .. } = normalize::normalize(name);

    // Commodity short-circuit. No region, factor or ESG dimensions exist for
    // physically backed products, and hedging only counts as a wrapper mod.
    let commodity = detect_commodity(&tokens);
    if commodity.is_some() || asset_class == AssetClass::Etc {
        let (sector, mods) = match commodity {
            Some(m) => (Some(m.commodity), m.mods),
            None => (None, Vec::new()),
        };
        return ExposureVector {
            class: ExposureClass::Commodity,
            region: None,
            subregion: None,
            factors: Vec::new(),
            sector,
            bond_type: None,
            bond_duration: None,
            esg: false,
            hedged: mods.contains(&"HEDGED"),
        };
    }

    let esg = normalize::has_any(&tokens, vocab::ESG_SIGNALS);
    let hedged = normalize::has_any(&tokens, vocab::HEDGE_SIGNALS);

    if normalize::has_any(&tokens, vocab::BOND_SIGNALS) {
        return ExposureVector {
            class: ExposureClass::Bond,
            region: normalize::match_first(&tokens, vocab::REGIONS),
            subregion: normalize::match_first(&tokens, vocab::SUBREGIONS),
            factors: Vec::new(),
            sector: None,
            // A bond signal with no specific type reads as an aggregate fund.
            bond_type: Some(
                normalize::match_first(&tokens, vocab::BOND_TYPES).unwrap_or("AGGREGATE"),
            ),
            bond_duration: normalize::match_first(&tokens, vocab::BOND_DURATIONS),
            esg,
            hedged,
        };
    }

    let mut factors = normalize::match_all(&tokens, vocab::FACTORS);
    factors.sort_unstable();
    ExposureVector {
        class: ExposureClass::Equity,
        region: normalize::match_first(&tokens, vocab::REGIONS),
        subregion: normalize::match_first(&tokens, vocab::SUBREGIONS),
        factors,
        sector: normalize::match_first(&tokens, vocab::SECTORS),
        bond_type: None,
        bond_duration: None,
        esg,
        hedged,
    }
}

/// First matching commodity plus any wrapper modifiers found in the name.
fn detect_commodity(tokens: &[String]) -> Option<CommodityMatch> {
    let commodity = vocab::COMMODITIES
        .iter()
        .find(|(_, terms)| normalize::has_any(tokens, terms))
        .map(|(canonical, _)| *canonical)?;
    let mods = vocab::COMMODITY_MODS
        .iter()
        .filter(|(_, terms)| normalize::has_any(tokens, terms))
        .map(|(canonical, _)| *canonical)
        .collect();
    Some(CommodityMatch { commodity, mods })
}
