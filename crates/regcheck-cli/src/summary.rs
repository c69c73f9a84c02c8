use std::collections::BTreeMap;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use regcheck_model::{Tier, TierCounts};

use crate::types::MatchRunResult;

pub fn print_summary(result: &MatchRunResult) {
    let summary = &result.output.summary;
    match &result.reports {
        Some(reports) => {
            println!("Output: {}", result.output_dir.display());
            for path in reports.all() {
                println!("  {}", path.display());
            }
        }
        None => println!("Dry run: no reports written"),
    }
    println!(
        "Customers: {}  Thresholds: ALTA >= {}, REVISAR >= {}",
        summary.customers, summary.thresholds.alta, summary.thresholds.baja
    );

    let mut per_source: BTreeMap<&str, TierCounts> = BTreeMap::new();
    for record in &result.output.matches {
        per_source
            .entry(record.source.as_str())
            .or_default()
            .add(record.tier);
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Source"),
        header_cell("Rows"),
        header_cell("ALTA"),
        header_cell("REVISAR"),
        header_cell("SIN"),
        header_cell("Records"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 1..=5 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for source in &result.sources {
        let Some(counts) = per_source.get(source.name.as_str()) else {
            table.add_row(vec![
                Cell::new(&source.name),
                dim_cell(source.rows),
                dim_cell("-"),
                dim_cell("-"),
                dim_cell("-"),
                Cell::new("skipped").fg(Color::Yellow),
            ]);
            continue;
        };
        table.add_row(vec![
            Cell::new(&source.name),
            Cell::new(source.rows),
            tier_cell(counts, Tier::Alta),
            tier_cell(counts, Tier::Revisar),
            tier_cell(counts, Tier::Sin),
            Cell::new(counts.total()),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        tier_cell(&summary.tiers, Tier::Alta).add_attribute(Attribute::Bold),
        tier_cell(&summary.tiers, Tier::Revisar).add_attribute(Attribute::Bold),
        tier_cell(&summary.tiers, Tier::Sin).add_attribute(Attribute::Bold),
        Cell::new(summary.records).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
}

fn tier_cell(counts: &TierCounts, tier: Tier) -> Cell {
    let count = counts.get(tier);
    if count == 0 {
        return dim_cell(count);
    }
    let color = match tier {
        Tier::Alta => Color::Green,
        Tier::Revisar => Color::Yellow,
        Tier::Sin => Color::Red,
    };
    Cell::new(count).fg(color)
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
