use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::types::StageSummary;

pub fn print_summary(stages: &[StageSummary]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Stage"),
        header_cell("Records"),
        header_cell("Skipped"),
        header_cell("Output"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);

    let mut total_records = 0usize;
    let mut total_skipped = 0usize;
    for stage in stages {
        total_records += stage.records;
        total_skipped += stage.skipped;
        table.add_row(vec![
            Cell::new(&stage.stage)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(stage.records),
            count_cell(stage.skipped, Color::Yellow),
            Cell::new(stage.output.display()),
        ]);
    }
    if stages.len() > 1 {
        table.add_row(vec![
            Cell::new("TOTAL")
                .fg(Color::Cyan)
                .add_attribute(Attribute::Bold),
            Cell::new(total_records).add_attribute(Attribute::Bold),
            count_cell(total_skipped, Color::Yellow).add_attribute(Attribute::Bold),
            dim_cell("-"),
        ]);
    }
    println!("{table}");
}

fn apply_table_style(table: &mut Table) {
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

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color)
    } else {
        dim_cell(count)
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
