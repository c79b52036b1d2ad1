//! Producibility advisory for one part

use console::style;
use miette::Result;

use crate::analytics::producibility::{advise, ProducibilityOutcome};
use crate::analytics::GeometricMatch;
use crate::cli::helpers::fmt_similarity;
use crate::cli::GlobalOpts;

use super::load_snapshot;

#[derive(clap::Args, Debug)]
pub struct ProducibilityArgs {
    /// Part number to analyze
    pub part_number: String,
}

pub fn run(args: ProducibilityArgs, global: &GlobalOpts) -> Result<()> {
    let dataset = load_snapshot(global)?;
    let outcome = advise(&dataset, &args.part_number);
    print_outcome(&args.part_number, &outcome);
    Ok(())
}

fn print_match(matched: &GeometricMatch) {
    println!(
        "Geometric match: {} - {} ({} similar)",
        style(&matched.part_number).cyan(),
        matched.part_description,
        fmt_similarity(matched.similarity_score)
    );
}

pub(crate) fn print_outcome(part_number: &str, outcome: &ProducibilityOutcome) {
    match outcome {
        ProducibilityOutcome::NoMatch => {
            println!(
                "{} No geometric matches found for {}",
                style("·").dim(),
                part_number
            );
        }
        ProducibilityOutcome::NoHistory(matched) => {
            print_match(matched);
            println!(
                "{} No production quality history for the matched geometry",
                style("✓").green()
            );
        }
        ProducibilityOutcome::CleanHistory(matched) => {
            print_match(matched);
            println!(
                "{} Matched geometry has no recorded rejection history",
                style("✓").green()
            );
        }
        ProducibilityOutcome::Warning { matched, top_reasons } => {
            print_match(matched);
            println!(
                "{} Similar geometry previously had quality failures",
                style("WARNING:").red().bold()
            );
            println!("Top rejection reasons (inspection count):");
            for reason in top_reasons {
                println!("  - {}: {}", reason.reason, reason.count);
            }
        }
    }
}
