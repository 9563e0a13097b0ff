use super::fmt_score;
use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use evalgrid_core::{CellKey, ScoreGrid};
use evalgrid_protocol::{Department, Metric};

/// The editable grid: departments down, metrics across. Dirty cells show in
/// yellow with a trailing '*'.
pub fn score_grid(grid: &ScoreGrid, departments: &[Department], metrics: &[Metric]) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let mut header = vec![Cell::new("Department \\ Metric").add_attribute(Attribute::Bold)];
    for metric in metrics {
        header.push(Cell::new(metric.label()).add_attribute(Attribute::Bold));
    }
    table.add_row(header);

    for i in 1..=metrics.len() {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    for dept in departments {
        let mut cells = vec![Cell::new(&dept.name).add_attribute(Attribute::Bold)];
        for metric in metrics {
            let key = CellKey::new(dept.id, metric.metric_id);
            let cell = match grid.score(key) {
                Some(value) if grid.is_dirty(key) => {
                    Cell::new(format!("{}*", fmt_score(value))).fg(Color::Yellow)
                }
                Some(value) => Cell::new(fmt_score(value)),
                None => Cell::new(""),
            };
            cells.push(cell);
        }
        table.add_row(cells);
    }

    println!("\n{}", table);
    if grid.has_unsaved_edits() {
        println!("* {} unsaved change(s)", grid.dirty_count());
    }
}
