//! VA/VE consolidation check for one part

use console::style;
use miette::Result;

use crate::analytics::consolidation::{advise, ConsolidationOutcome, DEFAULT_SIMILARITY_THRESHOLD};
use crate::cli::helpers::fmt_similarity;
use crate::cli::GlobalOpts;

use super::load_snapshot;

#[derive(clap::Args, Debug)]
pub struct ConsolidateArgs {
    /// Part number to analyze
    pub part_number: String,

    /// Minimum similarity for a consolidation candidate
    #[arg(long, short = 't', default_value_t = DEFAULT_SIMILARITY_THRESHOLD)]
    pub threshold: f64,
}

pub fn run(args: ConsolidateArgs, global: &GlobalOpts) -> Result<()> {
    let dataset = load_snapshot(global)?;
    let outcome = advise(&dataset, &args.part_number, args.threshold);
    print_outcome(args.threshold, &outcome);
    Ok(())
}

pub(crate) fn print_outcome(threshold: f64, outcome: &ConsolidationOutcome) {
    match outcome {
        ConsolidationOutcome::NoCandidate => {
            println!(
                "{} No part at or above {} similarity found for consolidation",
                style("·").dim(),
                fmt_similarity(threshold)
            );
        }
        ConsolidationOutcome::InsufficientData { candidate } => {
            println!(
                "Closest high-similarity part: {} ({} similar)",
                style(&candidate.part_number).cyan(),
                fmt_similarity(candidate.similarity_score)
            );
            println!(
                "{} Not enough historical price data to evaluate savings",
                style("·").dim()
            );
        }
        ConsolidationOutcome::NoSavings { candidate } => {
            println!(
                "Closest high-similarity part: {} ({} similar)",
                style(&candidate.part_number).cyan(),
                fmt_similarity(candidate.similarity_score)
            );
            println!(
                "{} No cost-saving upside from the current candidate",
                style("·").dim()
            );
        }
        ConsolidationOutcome::SavingsOpportunity { candidate, price_delta_pct } => {
            println!(
                "{} {} is {} similar and {:.1}% cheaper on average",
                style("Cost Saving Opportunity:").green().bold(),
                style(&candidate.part_number).cyan(),
                fmt_similarity(candidate.similarity_score),
                price_delta_pct
            );
            println!("Consider design or sourcing consolidation.");
        }
    }
}
