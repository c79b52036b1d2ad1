//! Dataset-wide health summary

use console::style;
use miette::Result;

use crate::cli::helpers::fmt_rate;
use crate::cli::GlobalOpts;

use super::load_snapshot;

#[derive(clap::Args, Debug)]
pub struct SummaryArgs {
    /// Also list the recorded data quality issues
    #[arg(long)]
    pub issues: bool,
}

pub fn run(args: SummaryArgs, global: &GlobalOpts) -> Result<()> {
    let dataset = load_snapshot(global)?;
    let health = dataset.global_health();

    println!("{}", style("Supply Chain Health").bold());
    println!("  Orders:                 {}", health.order_count);
    println!("  Parts:                  {}", health.part_count);
    println!("  Suppliers:              {}", health.supplier_count);
    println!(
        "  Overall rejection rate: {}",
        fmt_rate(health.overall_rejection_rate)
    );
    println!(
        "  Orders >10 days late:   {}",
        fmt_rate(health.late_order_share)
    );

    if args.issues {
        println!();
        if dataset.issues.is_empty() {
            println!("{} no data quality issues recorded", style("✓").green());
        } else {
            println!("{}", style("Data Quality Issues").bold());
            for issue in &dataset.issues {
                println!(
                    "  {} {} row {}: {} - {}",
                    style("!").yellow(),
                    issue.table,
                    issue.row,
                    issue.field,
                    issue.detail
                );
            }
        }
    }

    Ok(())
}
