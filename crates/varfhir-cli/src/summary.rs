use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use varfhir_cli::types::ReportResult;

pub fn print_summary(result: &ReportResult) {
    println!("Database: {}", result.database.display());
    println!("Output prefix: {}", result.output_prefix.display());
    println!(
        "Transcripts: {}",
        if result.all_transcripts { "all" } else { "primary" }
    );

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Sample"),
        header_cell("Entries"),
        header_cell("Document"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for document in &result.documents {
        table.add_row(vec![
            Cell::new(&document.sample),
            count_cell(document.entries),
            Cell::new(document.path.display()),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(result.total_entries()).add_attribute(Attribute::Bold),
        dim_cell(format!("{} documents", result.documents.len())),
    ]);
    println!("{table}");

    let stats = &result.stats;
    let mut rows = Table::new();
    rows.set_header(vec![header_cell("Rows"), header_cell("Count")]);
    apply_table_style(&mut rows);
    align_column(&mut rows, 1, CellAlignment::Right);
    rows.add_row(vec![Cell::new("In datastore"), Cell::new(result.variant_count)]);
    rows.add_row(vec![Cell::new("Mapped"), Cell::new(stats.rows)]);
    rows.add_row(vec![
        Cell::new("Without registered samples"),
        warn_cell(stats.unattached_rows),
    ]);
    rows.add_row(vec![
        Cell::new("Unregistered sample names"),
        warn_cell(stats.unknown_samples),
    ]);
    if result.all_transcripts {
        rows.add_row(vec![
            Cell::new("Skipped transcript mappings"),
            dim_cell(stats.skipped_mappings),
        ]);
    }
    println!("{rows}");
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn count_cell(count: usize) -> Cell {
    if count > 1 {
        Cell::new(count)
    } else {
        dim_cell(count)
    }
}

fn warn_cell(count: u64) -> Cell {
    if count > 0 {
        Cell::new(count)
            .fg(Color::Yellow)
            .add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
