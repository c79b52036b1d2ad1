//! Quote benchmark for one part

use console::style;
use miette::Result;

use crate::analytics::benchmark::{benchmark, BenchmarkVerdict, QuoteBenchmark};
use crate::cli::helpers::{fmt_pct, fmt_price};
use crate::cli::GlobalOpts;

use super::{display_description, load_snapshot};

#[derive(clap::Args, Debug)]
pub struct QuoteArgs {
    /// Part number to analyze
    pub part_number: String,
}

pub fn run(args: QuoteArgs, global: &GlobalOpts) -> Result<()> {
    let dataset = load_snapshot(global)?;
    let description = display_description(&dataset, &args.part_number);
    let result = benchmark(&dataset, &args.part_number, &description);
    print_benchmark(&result);
    Ok(())
}

pub(crate) fn print_benchmark(result: &QuoteBenchmark) {
    println!("Historical average: {}", fmt_price(result.historical_avg));
    println!("Latest quote:       {}", fmt_price(result.latest_quote));
    println!("Variance:           {}", fmt_pct(result.variance_pct));

    match result.verdict() {
        BenchmarkVerdict::PriceAlert => {
            println!(
                "{} Latest quote is more than 10% above historical average",
                style("Price Alert:").red().bold()
            );
        }
        BenchmarkVerdict::WithinRange => {
            println!(
                "{} Latest quote is within acceptable benchmark range",
                style("✓").green()
            );
        }
        BenchmarkVerdict::InsufficientData => {
            println!(
                "{} Insufficient data to compute quote benchmark",
                style("·").dim()
            );
        }
    }
}
