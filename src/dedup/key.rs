//! Canonical exposure keys.
//!
//! Serializes an [`ExposureVector`] into one stable string per economic
//! exposure. Two funds tracking the same thing under different phrasings
//! must produce byte-identical keys, so every field has a fixed slot and
//! absent values print as `_`.

use crate::dedup::classify::{ExposureClass, ExposureVector};

/// Placeholder for an absent dimension.
const EMPTY: &str = "_";

/// Builds the canonical key for an exposure vector.
///
/// Formats by class:
/// - commodity: `COMMODITY:<sector|UNKNOWN>` plus `|HEDGED`
/// - bond: `BOND|R:..|SR:..|BT:..|DUR:..` plus `|ESG`, `|HEDGED`
/// - equity: `R:..|SR:..|F:..|S:..` plus `|ESG`, `|HEDGED`
pub fn exposure_key(vector: &ExposureVector) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(6);
    match vector.class {
        ExposureClass::Commodity => {
            parts.push(format!("COMMODITY:{}", vector.sector.unwrap_or("UNKNOWN")));
        }
        ExposureClass::Bond => {
            parts.push("BOND".to_string());
            parts.push(format!("R:{}", vector.region.unwrap_or(EMPTY)));
            parts.push(format!("SR:{}", vector.subregion.unwrap_or(EMPTY)));
            parts.push(format!("BT:{}", vector.bond_type.unwrap_or(EMPTY)));
            parts.push(format!("DUR:{}", vector.bond_duration.unwrap_or(EMPTY)));
            if vector.esg {
                parts.push("ESG".to_string());
            }
        }
        ExposureClass::Equity => {
            parts.push(format!("R:{}", vector.region.unwrap_or(EMPTY)));
            parts.push(format!("SR:{}", vector.subregion.unwrap_or(EMPTY)));
            let factors = if vector.factors.is_empty() {
                EMPTY.to_string()
            } else {
                vector.factors.join("+")
            };
            parts.push(format!("F:{factors}"));
            parts.push(format!("S:{}", vector.sector.unwrap_or(EMPTY)));
            if vector.esg {
                parts.push("ESG".to_string());
            }
        }
    }
    if vector.hedged {
        parts.push("HEDGED".to_string());
    }
    parts.join("|")
}
