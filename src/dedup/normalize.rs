//! Fund name normalisation.
//!
//! Raw exchange names arrive in issuer-specific spellings ("iShs Core S&P500",
//! "X MSCI WORLD 1C", "AIS AMUNDI STOXX EUR.600"). Everything downstream works
//! on canonical word tokens, so this module uppercases a name, splits it on
//! non-alphanumeric runs, removes issuer branding and rewrites known
//! abbreviation spellings into canonical single tokens. Classification then
//! only has to deal with one spelling per concept.

use crate::dedup::vocab::{self, Table, UNMATCHED_PRIORITY};

/// A fund name reduced to canonical tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedName {
    /// Canonical tokens with issuer branding removed.
    pub tokens: Vec<String>,
    /// Preference rank of the detected issuer, [`UNMATCHED_PRIORITY`] if none matched.
    pub priority: u8,
}

/// Uppercase word tokens of a raw name.
///
/// Splits on every non-alphanumeric character, so "S&P 500", "S&P-500" and
/// "S&P500" tokenize to the same prefix and dots in "U.S." never glue words
/// together. Empty runs are dropped.
pub fn tokenize(name: &str) -> Vec<String> {
    name.to_uppercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Full normalisation pass: tokenize, strip the issuer, expand abbreviations.
pub fn normalize(name: &str) -> NormalizedName {
    let mut tokens = tokenize(name);
    let priority = strip_provider(&mut tokens);
    expand_abbreviations(&mut tokens);
    NormalizedName { tokens, priority }
}

/// Issuer preference rank of a raw name without normalising it.
pub fn detect_priority(name: &str) -> u8 {
    let tokens = tokenize(name);
    match best_provider(&tokens) {
        Some((_, priority)) => priority,
        None => UNMATCHED_PRIORITY,
    }
}

/// First index at which `pattern` occurs as a contiguous token window.
fn find_window(tokens: &[String], pattern: &[String], from: usize) -> Option<usize> {
    if pattern.is_empty() || pattern.len() > tokens.len() {
        return None;
    }
    (from..=tokens.len() - pattern.len()).find(|&i| tokens[i..i + pattern.len()] == *pattern)
}

/// Whether `term` (tokenized) occurs anywhere in `tokens`.
pub(crate) fn contains_term(tokens: &[String], term: &str) -> bool {
    let pattern = tokenize(term);
    find_window(tokens, &pattern, 0).is_some()
}

/// Canonical tag of the first table entry with a matching alias.
pub(crate) fn match_first(tokens: &[String], table: Table) -> Option<&'static str> {
    table
        .iter()
        .find(|(aliases, _)| aliases.iter().any(|alias| contains_term(tokens, alias)))
        .map(|(_, canonical)| *canonical)
}

/// Canonical tags of every table entry with a matching alias, in table order.
pub(crate) fn match_all(tokens: &[String], table: Table) -> Vec<&'static str> {
    table
        .iter()
        .filter(|(aliases, _)| aliases.iter().any(|alias| contains_term(tokens, alias)))
        .map(|(_, canonical)| *canonical)
        .collect()
}

/// Whether any of the listed signal terms occurs in `tokens`.
pub(crate) fn has_any(tokens: &[String], signals: &[&str]) -> bool {
    signals.iter().any(|signal| contains_term(tokens, signal))
}

/// Best issuer alias found in `tokens`.
///
/// When several issuers match (fund-of-fund names, white-label products) the
/// longest alias spelling wins; on equal length the earlier table entry wins.
/// Returns the tokenized alias pattern and the issuer's preference rank.
fn best_provider(tokens: &[String]) -> Option<(Vec<String>, u8)> {
    let mut best: Option<(&'static str, Vec<String>, u8)> = None;
    for (alias, canonical) in vocab::PROVIDER_ALIASES {
        let pattern = tokenize(alias);
        if find_window(tokens, &pattern, 0).is_none() {
            continue;
        }
        let priority = match vocab::provider_priority(canonical) {
            Some(p) => p,
            None => continue,
        };
        let longer = match &best {
            Some((best_alias, _, _)) => alias.len() > best_alias.len(),
            None => true,
        };
        if longer {
            best = Some((alias, pattern, priority));
        }
    }
    best.map(|(_, pattern, priority)| (pattern, priority))
}

/// Removes every occurrence of the best-matching issuer alias.
///
/// Returns the issuer's preference rank, [`UNMATCHED_PRIORITY`] if the name
/// carries no known issuer.
fn strip_provider(tokens: &mut Vec<String>) -> u8 {
    match best_provider(tokens) {
        Some((pattern, priority)) => {
            let mut from = 0;
            while let Some(pos) = find_window(tokens, &pattern, from) {
                tokens.drain(pos..pos + pattern.len());
                from = pos;
            }
            priority
        }
        None => UNMATCHED_PRIORITY,
    }
}

/// Rewrites abbreviation spellings into canonical tokens, in table order.
///
/// Each entry is applied left to right across the whole token list before the
/// next entry runs, so "EURO STOXX 50" collapses into one token before the
/// shorter "EURO STOXX" entry can split it.
fn expand_abbreviations(tokens: &mut Vec<String>) {
    for (spelling, canonical) in vocab::ABBREVIATIONS {
        let pattern = tokenize(spelling);
        if pattern.is_empty() {
            continue;
        }
        let mut from = 0;
        while let Some(pos) = find_window(tokens, &pattern, from) {
            tokens.splice(pos..pos + pattern.len(), [canonical.to_string()]);
            from = pos + 1;
        }
    }
}
