//! Positions subcommand - where given authors sit in author lists

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use comfy_table::{
    Cell, CellAlignment, Color, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL,
};
use pubmap_graph::{PublicationRecord, author_position};

#[derive(Args, Debug)]
pub struct PositionsArgs {
    /// Records JSON written by `pubmap fetch`
    pub records: PathBuf,

    /// Author name prefix, e.g. "Smith,J" (repeatable)
    #[arg(short, long = "author", required = true)]
    pub authors: Vec<String>,
}

pub fn run(args: PositionsArgs) -> Result<()> {
    let records = pubmap_pubmed::load_records(&args.records)?;
    let table = positions_table(&records, &args.authors);
    println!("{table}");
    Ok(())
}

/// One row per record listing at least one of `prefixes`.
fn positions_table(records: &[PublicationRecord], prefixes: &[String]) -> Table {
    let mut table = Table::new();
    let mut header = vec![
        Cell::new("PMID").fg(Color::Cyan),
        Cell::new("Year").fg(Color::Cyan),
    ];
    header.extend(prefixes.iter().map(|p| Cell::new(p).fg(Color::Cyan)));
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(header);

    let mut matched = 0usize;
    for record in records {
        let names = record.author_names();
        let positions: Vec<Option<f64>> = prefixes
            .iter()
            .map(|p| author_position(&names, p))
            .collect();
        if positions.iter().all(Option::is_none) {
            continue;
        }
        matched += 1;

        let mut row = vec![
            Cell::new(&record.pmid),
            Cell::new(record.year().map_or("-".to_string(), |y| y.to_string())),
        ];
        row.extend(positions.iter().map(|pos| {
            Cell::new(pos.map_or("-".to_string(), |v| format!("{v:.2}")))
                .set_alignment(CellAlignment::Right)
        }));
        table.add_row(row);
    }

    log::info!(
        "{matched} of {} records list one of {} authors",
        records.len(),
        prefixes.len()
    );
    table
}
