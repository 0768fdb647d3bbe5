//! Exposure deduplication engine.
//!
//! The German exchange universe lists dozens of near-identical funds per
//! index: every large issuer runs its own MSCI World, its own S&P 500, its
//! own EUR aggregate bond fund. This engine collapses them. A fund name is
//! normalised ([`normalize`]), classified into a structured exposure vector
//! ([`classify`]), serialized to a canonical key ([`key`]) and grouped with
//! every other fund sharing that key ([`grouper`]), which then picks one
//! preferred representative per group.
//!
//! The whole engine is a pure function of the instrument batch and the AUM
//! floor. It holds no state between runs and touches nothing but the three
//! dedup fields on each instrument.

pub mod classify;
pub mod grouper;
pub mod key;
pub mod normalize;
pub mod vocab;

pub use classify::{classify, ExposureClass, ExposureVector};
pub use grouper::{apply_groups, build_groups, instrument_key, DedupGroup};
pub use key::exposure_key;
pub use normalize::{normalize, tokenize, NormalizedName};

use crate::instrument::Instrument;

/// Runs a full deduplication pass over a working set.
///
/// Builds exposure groups, tags every instrument with its membership and
/// returns the groups for callers that want to inspect them.
pub fn run(instruments: &mut [Instrument], aum_floor: f64) -> Vec<DedupGroup> {
    let groups = build_groups(instruments, aum_floor);
    apply_groups(instruments, &groups);
    groups
}
