//! Full part report: header metrics plus all four analyses

use console::style;
use miette::Result;
use tabled::{builder::Builder, settings::Style};

use crate::analytics::benchmark::benchmark;
use crate::analytics::consolidation::{advise as advise_consolidation, DEFAULT_SIMILARITY_THRESHOLD};
use crate::analytics::producibility::advise as advise_producibility;
use crate::analytics::reliability::{part_reliability, supplier_breakdown};
use crate::cli::helpers::{fmt_price, fmt_rate, risk_label, styled_risk};
use crate::cli::GlobalOpts;

use super::{consolidate, display_description, load_snapshot, producibility, quote, warn_unknown_part};

#[derive(clap::Args, Debug)]
pub struct ReportArgs {
    /// Part number to analyze
    pub part_number: String,

    /// Minimum similarity for the consolidation candidate
    #[arg(long, short = 't', default_value_t = DEFAULT_SIMILARITY_THRESHOLD)]
    pub threshold: f64,
}

pub fn run(args: ReportArgs, global: &GlobalOpts) -> Result<()> {
    let dataset = load_snapshot(global)?;
    let part = &args.part_number;
    let description = display_description(&dataset, part);

    if !dataset.has_part(part) {
        warn_unknown_part(part);
    }

    println!("{}", style(part).bold().cyan());
    println!("{description}");
    println!();

    match part_reliability(&dataset, part) {
        Some(rel) => {
            println!("Avg purchase price:        {}", fmt_price(dataset.avg_unit_price(part)));
            println!("Historical rejection rate: {}", fmt_rate(rel.rejection_rate));
            println!("Avg days late:             {:.1}", rel.avg_days_late);
            println!("Reliability status:        {}", styled_risk(rel.tier));
        }
        None => {
            println!("{} no order history to score reliability", style("·").dim());
        }
    }

    println!();
    println!("{}", style("A. Sourcing Performance").bold());
    let breakdown = supplier_breakdown(&dataset, part);
    if breakdown.is_empty() {
        println!("{} no supplier history", style("·").dim());
    } else {
        let mut builder = Builder::default();
        builder.push_record(["SUPPLIER", "QTY", "REJECTION RATE", "AVG DAYS LATE", "STATUS"]);
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
    }

    println!();
    println!("{}", style("B. Producibility Advisor").bold());
    producibility::print_outcome(part, &advise_producibility(&dataset, part));

    println!();
    println!("{}", style("C. Quote Benchmarking").bold());
    quote::print_benchmark(&benchmark(&dataset, part, &description));

    println!();
    println!("{}", style("D. VA/VE Consolidation").bold());
    consolidate::print_outcome(args.threshold, &advise_consolidation(&dataset, part, args.threshold));

    Ok(())
}
