//! Part catalog listing

use miette::Result;
use tabled::{builder::Builder, settings::Style};

use crate::cli::GlobalOpts;

use super::load_snapshot;

#[derive(clap::Args, Debug)]
pub struct PartsArgs {
    /// Only show parts whose number or description contains this text
    #[arg(long, short = 's')]
    pub search: Option<String>,
}

pub fn run(args: PartsArgs, global: &GlobalOpts) -> Result<()> {
    let dataset = load_snapshot(global)?;

    let needle = args.search.as_deref().map(|s| s.to_lowercase());
    let catalog: Vec<_> = dataset
        .part_catalog()
        .into_iter()
        .filter(|p| match &needle {
            Some(n) => {
                p.part_number.to_lowercase().contains(n)
                    || p.part_description.to_lowercase().contains(n)
            }
            None => true,
        })
        .collect();

    let mut builder = Builder::default();
    builder.push_record(["PART", "DESCRIPTION"]);
    for part in &catalog {
        builder.push_record([part.part_number.as_str(), part.part_description.as_str()]);
    }

    let mut table = builder.build();
    table.with(Style::sharp());
    println!("{table}");

    if !global.quiet {
        println!("{} part(s)", catalog.len());
    }

    Ok(())
}
