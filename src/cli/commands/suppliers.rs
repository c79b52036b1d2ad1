//! Per-supplier reliability breakdown for one part

use console::style;
use miette::Result;
use tabled::{builder::Builder, settings::Style};

use crate::analytics::reliability::supplier_breakdown;
use crate::cli::helpers::{fmt_rate, risk_label};
use crate::cli::GlobalOpts;

use super::{load_snapshot, warn_unknown_part};

#[derive(clap::Args, Debug)]
pub struct SuppliersArgs {
    /// Part number to analyze
    pub part_number: String,
}

pub fn run(args: SuppliersArgs, global: &GlobalOpts) -> Result<()> {
    let dataset = load_snapshot(global)?;

    if !dataset.has_part(&args.part_number) {
        warn_unknown_part(&args.part_number);
        return Ok(());
    }

    let breakdown = supplier_breakdown(&dataset, &args.part_number);

    println!(
        "{} {}",
        style("Supplier History for").bold(),
        style(&args.part_number).cyan()
    );

    let mut builder = Builder::default();
    builder.push_record(["SUPPLIER", "QTY ORDERED", "REJECTION RATE", "AVG DAYS LATE", "STATUS"]);
    for row in &breakdown {
        builder.push_record([
            row.supplier_name.clone(),
            row.total_quantity.to_string(),
            fmt_rate(row.avg_rejection_rate),
            format!("{:.1}", row.avg_days_late),
            risk_label(row.risk).to_string(),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::sharp());
    println!("{table}");

    Ok(())
}
