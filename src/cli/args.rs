//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::cli::commands::{
    consolidate::ConsolidateArgs, parts::PartsArgs, producibility::ProducibilityArgs,
    quote::QuoteArgs, report::ReportArgs, summary::SummaryArgs, suppliers::SuppliersArgs,
};

#[derive(Parser)]
#[command(name = "sat")]
#[command(author, version, about = "Sourcing Analytics Toolkit")]
#[command(
    long_about = "Part-level supplier risk, producibility, and pricing analytics over procurement CSV tables."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Directory containing the five source CSV tables
    #[arg(long, short = 'd', global = true, env = "SAT_DATA_DIR", default_value = "data")]
    pub data_dir: PathBuf,

    /// Rebuild the snapshot from CSV, ignoring the cache
    #[arg(long, global = true)]
    pub no_cache: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Dataset-wide supply chain health metrics
    Summary(SummaryArgs),

    /// List parts known to the order history
    Parts(PartsArgs),

    /// Full analysis for one part: reliability, producibility, quote, consolidation
    Report(ReportArgs),

    /// Per-supplier reliability breakdown for one part
    Suppliers(SuppliersArgs),

    /// Producibility risk from the part's strongest geometric match
    Producibility(ProducibilityArgs),

    /// Latest RFQ quote vs historical purchase price
    Quote(QuoteArgs),

    /// VA/VE consolidation opportunity from geometric twins
    Consolidate(ConsolidateArgs),
}
