//! Console summaries for review outcomes.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::types::{AccessOutcome, ChangeOutcome, IncidentOutcome};

pub fn print_change_summary(outcome: &ChangeOutcome) {
    println!("Rows checked: {}", outcome.rows);
    println!("Checked file: {}", outcome.checked_file.display());
    if let Some(path) = &outcome.sample_file {
        println!("Sample file: {}", path.display());
    }

    let mut table = Table::new();
    apply_table_style(&mut table);
    table.set_header(vec![header_cell("Finding"), header_cell("Count")]);
    table.add_row(vec![
        Cell::new("Missing raised dates"),
        count_cell(outcome.summary.missing_raised),
    ]);
    table.add_row(vec![
        Cell::new("Missing resolved dates"),
        count_cell(outcome.summary.missing_resolved),
    ]);
    table.add_row(vec![
        Cell::new("Resolved before raised"),
        count_cell(outcome.summary.resolved_before_raised),
    ]);
    align_column(&mut table, 1, CellAlignment::Right);
    println!("{table}");
}

pub fn print_incident_summary(outcome: &IncidentOutcome) {
    println!("Rows processed: {}", outcome.rows);
    println!("Output file: {}", outcome.output_file.display());
}

pub fn print_access_summary(outcome: &AccessOutcome) {
    println!("Merged rows: {}", outcome.rows);
    println!("Mapped file: {}", outcome.mapped_file.display());
    if let Some(path) = &outcome.reviewed_file {
        println!("Reviewed file: {}", path.display());
    }
    if let Some(path) = &outcome.sample_file {
        println!("Sample file: {}", path.display());
    }

    let Some(conflicts) = &outcome.conflicts else {
        return;
    };
    let mut table = Table::new();
    apply_table_style(&mut table);
    table.set_header(vec![header_cell("Role check"), header_cell("Count")]);
    table.add_row(vec![
        Cell::new("Distinct IT roles"),
        Cell::new(conflicts.it_roles),
    ]);
    table.add_row(vec![
        Cell::new("Distinct non-IT roles"),
        Cell::new(conflicts.non_it_roles),
    ]);
    table.add_row(vec![
        Cell::new("Roles on both sides"),
        count_cell(conflicts.conflicting_roles.len()),
    ]);
    table.add_row(vec![
        Cell::new("Flagged rows"),
        count_cell(conflicts.flagged_rows),
    ]);
    align_column(&mut table, 1, CellAlignment::Right);
    println!("{table}");

    if conflicts.conflicting_roles.is_empty() {
        println!("No common roles between IT and non-IT users.");
    } else {
        println!(
            "Common roles: {}",
            conflicts.conflicting_roles.join(", ")
        );
        if let Some(path) = &conflicts.flagged_file {
            println!("Flagged file: {}", path.display());
        }
    }
}

pub fn print_sheets(names: &[String]) {
    for name in names {
        println!("{name}");
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count).fg(Color::Yellow)
    } else {
        Cell::new(count)
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
