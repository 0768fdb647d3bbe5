//! etfscreen CLI - screen the exchange ETF/stock universe from the terminal
//!
//! State lives in a JSON snapshot (default `universe.json`); every command
//! loads it, applies its change, recomputes dedup and scores, and writes it
//! back.
//!
//! ## Example Usage
//!
//! ```bash
//! # Seed the universe from a T7 instrument list export
//! etfscreen import allTradableInstruments.csv
//!
//! # Track ISINs by hand
//! etfscreen add IE00B4L5Y983 IE00B5BMR087
//!
//! # Merge quote and fund-facts feeds
//! etfscreen quotes quotes.json
//! etfscreen facts facts.json
//!
//! # Show the ranked screen
//! etfscreen screen --instrument-type etf --top 25
//!
//! # Explain how a fund name classifies
//! etfscreen classify "iShares Core MSCI World UCITS ETF"
//! ```

use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use serde::{Deserialize, Serialize};

use etfscreen::config::ScreenConfig;
use etfscreen::dedup;
use etfscreen::feed::{self, FundFacts, IdentifierKind, QuoteRecord};
use etfscreen::instrument::{AssetClass, Instrument};
use etfscreen::universe::{passes_risk_free, visible_after_dedup, Universe};

/// etfscreen: exposure-deduplicating momentum screener
#[derive(Parser)]
#[command(name = "etfscreen")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Momentum/Sharpe/value screening with exposure dedup", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Universe snapshot path
    #[arg(short, long, global = true, default_value = "universe.json")]
    data: PathBuf,

    /// Configuration file path (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed the universe from an exchange instrument list export
    Import {
        /// Semicolon-separated instrument list file
        #[arg(value_name = "LIST_FILE")]
        list_file: PathBuf,
    },

    /// Add manually tracked instruments by identifier
    Add {
        /// ISINs (WKNs and tickers are reported but need online resolution)
        #[arg(value_name = "IDENTIFIER", required = true)]
        identifiers: Vec<String>,
    },

    /// Remove one instrument
    Remove {
        #[arg(value_name = "ISIN")]
        isin: String,
    },

    /// Drop all exchange-sourced instruments, keeping manual entries
    Clear,

    /// Merge a quote feed (JSON array of ticker-keyed quote records with
    /// price series and fundamentals)
    Quotes {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Merge fund facts (JSON array of AUM/TER records)
    Facts {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Show the ranked screen
    Screen {
        /// Restrict to one instrument type
        #[arg(short = 't', long, value_enum, default_value_t = TypeFilter::All)]
        instrument_type: TypeFilter,

        /// Include deduplicated (losing) fund share classes
        #[arg(short = 'a', long)]
        all: bool,

        /// Include instruments below the risk-free hurdle
        #[arg(long)]
        below_risk_free: bool,

        /// Sort column
        #[arg(short, long, value_enum, default_value_t = SortKey::Combined)]
        sort: SortKey,

        /// Show only the first N rows
        #[arg(short = 'n', long)]
        top: Option<usize>,

        /// Export the shown rows as CSV
        #[arg(short = 'o', long, value_name = "FILE")]
        export: Option<PathBuf>,
    },

    /// List exposure groups and their winners
    Groups {
        /// Only groups whose key contains this text
        #[arg(value_name = "FILTER")]
        filter: Option<String>,
    },

    /// Explain how a fund name classifies
    Classify {
        /// Fund name (quoted or as separate words)
        #[arg(value_name = "NAME", required = true)]
        name: Vec<String>,

        /// Classify as an exchange traded commodity
        #[arg(long)]
        etc: bool,
    },

    /// Update the stored screening configuration
    Set {
        /// Momentum weights as three comma-separated values, e.g. 0.2,0.3,0.5
        #[arg(long, value_name = "W1M,W3M,W6M")]
        weights: Option<String>,

        /// Minimum AUM for dedup winners, in EUR
        #[arg(long)]
        aum_floor: Option<f64>,

        /// ATR multiplier for the selling threshold
        #[arg(long)]
        atr_multiplier: Option<f64>,

        /// Annual risk-free rate as a fraction, e.g. 0.035
        #[arg(long)]
        risk_free_rate: Option<f64>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum TypeFilter {
    All,
    Etf,
    Stock,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SortKey {
    Momentum,
    Sharpe,
    Combined,
    Value,
}

/// Configuration file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct FileConfig {
    #[serde(default)]
    weights: Option<[f64; 3]>,
    #[serde(default)]
    aum_floor: Option<f64>,
    #[serde(default)]
    atr_multiplier: Option<f64>,
    #[serde(default)]
    risk_free_rate: Option<f64>,
}

impl FileConfig {
    fn load(path: Option<&Path>) -> Self {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => PathBuf::from("etfscreen.toml"),
        };
        if !path.exists() {
            return FileConfig::default();
        }
        match fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("{} Failed to parse config: {}", "Warning:".yellow(), e);
                    FileConfig::default()
                }
            },
            Err(e) => {
                eprintln!("{} Failed to read config: {}", "Warning:".yellow(), e);
                FileConfig::default()
            }
        }
    }

    fn apply(&self, config: &mut ScreenConfig) {
        if let Some([w1m, w3m, w6m]) = self.weights {
            config.weights.w1m = w1m;
            config.weights.w3m = w3m;
            config.weights.w6m = w6m;
        }
        if let Some(floor) = self.aum_floor {
            config.aum_floor = floor;
        }
        if let Some(multiplier) = self.atr_multiplier {
            config.atr_multiplier = multiplier;
        }
        if let Some(rate) = self.risk_free_rate {
            config.risk_free_rate = rate;
        }
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let file_config = FileConfig::load(cli.config.as_deref());

    if cli.verbose {
        println!(
            "{} v{}",
            "etfscreen".cyan().bold(),
            env!("CARGO_PKG_VERSION")
        );
        println!("Snapshot: {}", cli.data.display().to_string().dimmed());
    }

    let result = match cli.command {
        Commands::Import { list_file } => import_list(&cli.data, &file_config, &list_file),
        Commands::Add { identifiers } => add_manual(&cli.data, &file_config, &identifiers),
        Commands::Remove { isin } => remove(&cli.data, &file_config, &isin),
        Commands::Clear => clear_exchange(&cli.data, &file_config),
        Commands::Quotes { file } => merge_quotes(&cli.data, &file_config, &file),
        Commands::Facts { file } => merge_facts(&cli.data, &file_config, &file),
        Commands::Screen {
            instrument_type,
            all,
            below_risk_free,
            sort,
            top,
            export,
        } => screen(
            &cli.data,
            &file_config,
            ScreenView {
                instrument_type,
                all,
                below_risk_free,
                sort,
                top,
                export,
            },
        ),
        Commands::Groups { filter } => show_groups(&cli.data, &file_config, filter.as_deref()),
        Commands::Classify { name, etc } => classify_name(&name.join(" "), etc),
        Commands::Set {
            weights,
            aum_floor,
            atr_multiplier,
            risk_free_rate,
        } => set_config(
            &cli.data,
            &file_config,
            weights.as_deref(),
            aum_floor,
            atr_multiplier,
            risk_free_rate,
        ),
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

/// Screen display options
struct ScreenView {
    instrument_type: TypeFilter,
    all: bool,
    below_risk_free: bool,
    sort: SortKey,
    top: Option<usize>,
    export: Option<PathBuf>,
}

fn load_universe(data: &Path, file_config: &FileConfig) -> anyhow::Result<Universe> {
    let mut universe = if data.exists() {
        Universe::load(data).with_context(|| format!("loading {}", data.display()))?
    } else {
        Universe::default()
    };
    let mut config = universe.config().clone();
    file_config.apply(&mut config);
    universe.set_config(config)?;
    Ok(universe)
}

fn save_universe(universe: &Universe, data: &Path) -> anyhow::Result<()> {
    universe
        .save(data)
        .with_context(|| format!("saving {}", data.display()))
}

fn import_list(data: &Path, file_config: &FileConfig, list_file: &Path) -> anyhow::Result<()> {
    let text = fs::read_to_string(list_file)
        .with_context(|| format!("reading {}", list_file.display()))?;
    let records = feed::parse_exchange_list(&text)?;
    let parsed = records.len();

    let mut universe = load_universe(data, file_config)?;
    let added = universe.add_seeds(records);
    universe.refresh();
    save_universe(&universe, data)?;

    println!(
        "{} Imported {} of {} list rows ({} instruments total)",
        "✓".green().bold(),
        added.to_string().bright_green(),
        parsed,
        universe.len()
    );
    Ok(())
}

fn add_manual(data: &Path, file_config: &FileConfig, identifiers: &[String]) -> anyhow::Result<()> {
    let parsed = feed::parse_manual_input(&identifiers.join(" "));
    let mut universe = load_universe(data, file_config)?;

    let mut added = 0;
    for identifier in &parsed {
        match identifier.kind {
            IdentifierKind::Isin => {
                if universe.add_manual(&identifier.normalized) {
                    added += 1;
                } else {
                    println!("  {} already tracked", identifier.normalized.dimmed());
                }
            }
            IdentifierKind::Wkn | IdentifierKind::Ticker => {
                println!(
                    "{} {} needs online resolution to an ISIN, skipped",
                    "Warning:".yellow(),
                    identifier.raw
                );
            }
        }
    }

    universe.refresh();
    save_universe(&universe, data)?;
    println!(
        "{} Added {} instruments ({} total)",
        "✓".green().bold(),
        added.to_string().bright_green(),
        universe.len()
    );
    Ok(())
}

fn remove(data: &Path, file_config: &FileConfig, isin: &str) -> anyhow::Result<()> {
    let mut universe = load_universe(data, file_config)?;
    if !universe.remove(&isin.to_uppercase()) {
        anyhow::bail!("unknown ISIN {}", isin)
    }
    universe.refresh();
    save_universe(&universe, data)?;
    println!("{} Removed {}", "✓".green().bold(), isin.to_uppercase());
    Ok(())
}

fn clear_exchange(data: &Path, file_config: &FileConfig) -> anyhow::Result<()> {
    let mut universe = load_universe(data, file_config)?;
    let removed = universe.clear_exchange();
    universe.refresh();
    save_universe(&universe, data)?;
    println!(
        "{} Removed {} exchange instruments ({} remain)",
        "✓".green().bold(),
        removed,
        universe.len()
    );
    Ok(())
}

fn merge_quotes(data: &Path, file_config: &FileConfig, file: &Path) -> anyhow::Result<()> {
    let records: Vec<QuoteRecord> = read_json(file)?;
    let mut universe = load_universe(data, file_config)?;
    let applied = universe.apply_quotes(&records)?;
    universe.refresh();
    save_universe(&universe, data)?;
    println!(
        "{} Applied {} of {} quote records",
        "✓".green().bold(),
        applied,
        records.len()
    );
    Ok(())
}

fn merge_facts(data: &Path, file_config: &FileConfig, file: &Path) -> anyhow::Result<()> {
    let records: Vec<FundFacts> = read_json(file)?;
    let mut universe = load_universe(data, file_config)?;
    let applied = universe.apply_fund_facts(&records);
    universe.refresh();
    save_universe(&universe, data)?;
    println!(
        "{} Applied {} of {} fund fact records",
        "✓".green().bold(),
        applied,
        records.len()
    );
    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(file: &Path) -> anyhow::Result<Vec<T>> {
    let text =
        fs::read_to_string(file).with_context(|| format!("reading {}", file.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", file.display()))
}

fn screen(data: &Path, file_config: &FileConfig, view: ScreenView) -> anyhow::Result<()> {
    let mut universe = load_universe(data, file_config)?;
    universe.refresh();
    let config = universe.config().clone();

    let mut rows: Vec<&Instrument> = universe
        .instruments()
        .iter()
        .filter(|inst| match view.instrument_type {
            TypeFilter::All => true,
            TypeFilter::Etf => inst.asset_class.is_fund(),
            TypeFilter::Stock => inst.asset_class.is_stock(),
        })
        .filter(|inst| view.all || visible_after_dedup(inst))
        .filter(|inst| view.below_risk_free || passes_risk_free(inst, config.risk_free_rate))
        .collect();

    rows.sort_by(|a, b| compare_rows(a, b, view.sort));
    if let Some(top) = view.top {
        rows.truncate(top);
    }

    print_table(&rows, view.sort);

    if let Some(export) = &view.export {
        export_csv(&rows, export)?;
        println!(
            "{} Exported {} rows to {}",
            "✓".green().bold(),
            rows.len(),
            export.display()
        );
    }
    Ok(())
}

fn sort_value(inst: &Instrument, key: SortKey) -> Option<f64> {
    match key {
        SortKey::Momentum => inst.momentum_score,
        SortKey::Sharpe => inst.sharpe_score,
        SortKey::Combined => inst.combined_score,
        SortKey::Value => inst.value_score,
    }
}

/// Sorts best first for the chosen column, null scores last.
fn compare_rows(a: &Instrument, b: &Instrument, key: SortKey) -> Ordering {
    match (sort_value(a, key), sort_value(b, key)) {
        (Some(av), Some(bv)) => {
            let ord = if key == SortKey::Value {
                av.partial_cmp(&bv)
            } else {
                bv.partial_cmp(&av)
            };
            ord.unwrap_or(Ordering::Equal)
        }
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (None, None) => Ordering::Equal,
    }
}

fn print_table(rows: &[&Instrument], sort: SortKey) {
    println!(
        "{}",
        format!(
            "{:<13} {:<34} {:<6} {:>8} {:>8} {:>8} {:>8} {:>8} {:>6} {:>10}",
            "ISIN", "Name", "Type", "R6M", "Vola", "Mom", "Sharpe", "Comb", "Rank", "Stop"
        )
        .bold()
    );

    for inst in rows {
        let rank = match sort {
            SortKey::Momentum => inst.momentum_rank,
            SortKey::Sharpe => inst.sharpe_rank,
            SortKey::Combined => inst.combined_rank,
            SortKey::Value => inst.value_rank,
        };
        let name = truncate(&inst.display_name, 34);
        let line = format!(
            "{:<13} {:<34} {:<6} {} {:>8} {:>8} {:>8} {:>8} {:>6} {:>10}",
            inst.isin,
            name,
            inst.asset_class.to_string(),
            signed_pct(inst.r6m),
            plain_pct(inst.vola),
            fixed(inst.momentum_score, 3),
            fixed(inst.sharpe_score, 2),
            fixed(inst.combined_score, 2),
            opt_rank(rank),
            fixed(inst.selling_threshold, 2),
        );
        if inst.is_dedup_winner == Some(false) {
            println!("{}", line.dimmed());
        } else {
            println!("{}", line);
        }
    }
    println!();
    println!("{}", format!("{} instruments", rows.len()).dimmed());
}

/// Signed percent cell, padded before colouring so columns stay aligned.
fn signed_pct(value: Option<f64>) -> colored::ColoredString {
    match value {
        Some(v) => {
            let cell = format!("{:>8}", format!("{:+.1}%", v * 100.0));
            if v < 0.0 {
                cell.red()
            } else {
                cell.green()
            }
        }
        None => format!("{:>8}", "-").normal(),
    }
}

fn plain_pct(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.1}%", v * 100.0),
        None => "-".to_string(),
    }
}

fn fixed(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) => format!("{:.*}", decimals, v),
        None => "-".to_string(),
    }
}

fn opt_rank(rank: Option<u32>) -> String {
    match rank {
        Some(r) => r.to_string(),
        None => "-".to_string(),
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let mut cut: String = text.chars().take(max - 1).collect();
        cut.push('…');
        cut
    }
}

/// CSV export row
#[derive(Serialize)]
struct ExportRow<'a> {
    isin: &'a str,
    name: &'a str,
    instrument_type: String,
    r1m: Option<f64>,
    r3m: Option<f64>,
    r6m: Option<f64>,
    vola: Option<f64>,
    momentum_score: Option<f64>,
    sharpe_score: Option<f64>,
    combined_score: Option<f64>,
    value_score: Option<f64>,
    momentum_rank: Option<u32>,
    sharpe_rank: Option<u32>,
    combined_rank: Option<u32>,
    value_rank: Option<u32>,
    atr20: Option<f64>,
    selling_threshold: Option<f64>,
    aum: Option<f64>,
    ter: Option<f64>,
    dedup_group: Option<&'a str>,
    is_dedup_winner: Option<bool>,
}

fn export_csv(rows: &[&Instrument], path: &Path) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    for inst in rows {
        writer.serialize(ExportRow {
            isin: &inst.isin,
            name: &inst.display_name,
            instrument_type: inst.asset_class.to_string(),
            r1m: inst.r1m,
            r3m: inst.r3m,
            r6m: inst.r6m,
            vola: inst.vola,
            momentum_score: inst.momentum_score,
            sharpe_score: inst.sharpe_score,
            combined_score: inst.combined_score,
            value_score: inst.value_score,
            momentum_rank: inst.momentum_rank,
            sharpe_rank: inst.sharpe_rank,
            combined_rank: inst.combined_rank,
            value_rank: inst.value_rank,
            atr20: inst.atr20,
            selling_threshold: inst.selling_threshold,
            aum: inst.aum,
            ter: inst.ter,
            dedup_group: inst.dedup_group.as_deref(),
            is_dedup_winner: inst.is_dedup_winner,
        })?;
    }
    writer.flush()?;
    Ok(())
}

fn show_groups(data: &Path, file_config: &FileConfig, filter: Option<&str>) -> anyhow::Result<()> {
    let mut universe = load_universe(data, file_config)?;
    universe.refresh();

    let mut shown = 0;
    for group in universe.groups() {
        if let Some(filter) = filter {
            if !group.key.contains(&filter.to_uppercase()) {
                continue;
            }
        }
        shown += 1;

        let winner_label = match &group.winner {
            Some(isin) => isin.as_str().bright_green(),
            None => "no winner (all below AUM floor)".red(),
        };
        println!("{}", group.key.cyan().bold());
        println!("  {} {}", "Winner:".bold(), winner_label);
        for isin in &group.candidates {
            let (name, aum) = match universe.get(isin) {
                Some(inst) => (inst.display_name.clone(), inst.aum),
                None => (String::new(), None),
            };
            let marker = if group.winner.as_deref() == Some(isin.as_str()) {
                "▸".green()
            } else {
                " ".normal()
            };
            println!(
                "  {} {:<13} {:<40} {}",
                marker,
                isin,
                truncate(&name, 40),
                format_aum(aum).dimmed()
            );
        }
        println!();
    }

    println!("{}", format!("{} groups", shown).dimmed());
    Ok(())
}

fn format_aum(aum: Option<f64>) -> String {
    match aum {
        Some(v) if v >= 1e9 => format!("{:.1}B", v / 1e9),
        Some(v) if v >= 1e6 => format!("{:.0}M", v / 1e6),
        Some(v) => format!("{:.0}", v),
        None => "AUM n/a".to_string(),
    }
}

fn classify_name(name: &str, etc: bool) -> anyhow::Result<()> {
    let asset_class = if etc { AssetClass::Etc } else { AssetClass::Etf };
    let normalized = dedup::normalize(name);
    let vector = dedup::classify(name, asset_class);
    let key = dedup::exposure_key(&vector);

    println!("{} {}", "Name:".bold(), name);
    println!(
        "  {} {}",
        "Tokens:".bold(),
        normalized.tokens.join(" ").dimmed()
    );
    println!("  {} {}", "Issuer rank:".bold(), normalized.priority);
    println!("  {} {:?}", "Class:".bold(), vector.class);
    println!("  {} {}", "Region:".bold(), vector.region.unwrap_or("-"));
    println!(
        "  {} {}",
        "Subregion:".bold(),
        vector.subregion.unwrap_or("-")
    );
    if !vector.factors.is_empty() {
        println!("  {} {}", "Factors:".bold(), vector.factors.join(", "));
    }
    println!("  {} {}", "Sector:".bold(), vector.sector.unwrap_or("-"));
    if let Some(bond_type) = vector.bond_type {
        println!("  {} {}", "Bond type:".bold(), bond_type);
        println!(
            "  {} {}",
            "Duration:".bold(),
            vector.bond_duration.unwrap_or("-")
        );
    }
    println!("  {} {}", "ESG:".bold(), vector.esg);
    println!("  {} {}", "Hedged:".bold(), vector.hedged);
    println!("  {} {}", "Key:".bold(), key.bright_green().bold());
    Ok(())
}

fn set_config(
    data: &Path,
    file_config: &FileConfig,
    weights: Option<&str>,
    aum_floor: Option<f64>,
    atr_multiplier: Option<f64>,
    risk_free_rate: Option<f64>,
) -> anyhow::Result<()> {
    let mut universe = load_universe(data, file_config)?;
    let mut config = universe.config().clone();

    if let Some(weights) = weights {
        let parts: Vec<f64> = weights
            .split(',')
            .map(|p| p.trim().parse::<f64>())
            .collect::<Result<_, _>>()
            .context("weights must be three numbers, e.g. 0.2,0.3,0.5")?;
        if parts.len() != 3 {
            anyhow::bail!("weights must be three numbers, e.g. 0.2,0.3,0.5");
        }
        config.weights.w1m = parts[0];
        config.weights.w3m = parts[1];
        config.weights.w6m = parts[2];
    }
    if let Some(floor) = aum_floor {
        config.aum_floor = floor;
    }
    if let Some(multiplier) = atr_multiplier {
        config.atr_multiplier = multiplier;
    }
    if let Some(rate) = risk_free_rate {
        config.risk_free_rate = rate;
    }

    universe.set_config(config)?;
    universe.refresh();
    save_universe(&universe, data)?;

    let config = universe.config();
    println!("{}", "Configuration".bold());
    println!(
        "  {} {:.3} / {:.3} / {:.3}",
        "Weights (1m/3m/6m):".bold(),
        config.weights.w1m,
        config.weights.w3m,
        config.weights.w6m
    );
    println!("  {} {}", "AUM floor:".bold(), format_aum(Some(config.aum_floor)));
    println!("  {} {:.1}", "ATR multiplier:".bold(), config.atr_multiplier);
    println!(
        "  {} {:.2}%",
        "Risk-free rate:".bold(),
        config.risk_free_rate * 100.0
    );
    Ok(())
}
