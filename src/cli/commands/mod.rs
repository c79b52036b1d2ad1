//! Command implementations

pub mod consolidate;
pub mod parts;
pub mod producibility;
pub mod quote;
pub mod report;
pub mod summary;
pub mod suppliers;

use console::style;
use miette::Result;

use crate::cli::GlobalOpts;
use crate::core::cache;
use crate::core::dataset::Dataset;

/// Load the analytics snapshot for the configured data directory
///
/// Uses the fingerprint-keyed cache unless --no-cache is set. Structural
/// load failures surface as diagnostics; everything row-level is already
/// absorbed into the snapshot's issue list.
pub(crate) fn load_snapshot(global: &GlobalOpts) -> Result<Dataset> {
    let dataset = if global.no_cache {
        cache::build(&global.data_dir).map_err(|e| miette::miette!("{}", e))?
    } else {
        let (dataset, from_cache) =
            cache::load_or_build(&global.data_dir).map_err(|e| miette::miette!("{}", e))?;
        if from_cache && !global.quiet {
            eprintln!("{} snapshot loaded from cache", style("·").dim());
        }
        dataset
    };

    if !dataset.issues.is_empty() && !global.quiet {
        eprintln!(
            "{} {} data quality issue(s) absorbed during load",
            style("!").yellow(),
            dataset.issues.len()
        );
    }

    Ok(dataset)
}

/// Resolve a part's display description, with a placeholder for parts
/// unknown to both the drawings and the order history
pub(crate) fn display_description(dataset: &Dataset, part_number: &str) -> String {
    dataset
        .description_for_part(part_number)
        .unwrap_or_else(|| crate::analytics::producibility::DESCRIPTION_UNAVAILABLE.to_string())
}

/// Print the standard notice for a part with no order history
pub(crate) fn warn_unknown_part(part_number: &str) {
    println!(
        "{} No order history for part {}",
        style("!").yellow(),
        style(part_number).bold()
    );
}
