use super::fmt_score;
use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use evalgrid_client::SaveReport;
use evalgrid_core::report::ReportTable;
use evalgrid_protocol::{Department, Employee, Metric};

fn base_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

pub fn employees(employees: &[Employee]) {
    let mut table = base_table();
    table.add_row(vec![
        Cell::new("Id").add_attribute(Attribute::Bold),
        Cell::new("Name").add_attribute(Attribute::Bold),
        Cell::new("Mail"),
        Cell::new("Phone"),
    ]);
    for emp in employees {
        table.add_row(vec![
            Cell::new(emp.employee_id),
            Cell::new(emp.full_name()).add_attribute(Attribute::Bold),
            Cell::new(&emp.mail_box),
            Cell::new(&emp.number_phone),
        ]);
    }
    println!("\n{}", table);
}

pub fn departments(departments: &[Department]) {
    let mut table = base_table();
    table.add_row(vec![
        Cell::new("Id").add_attribute(Attribute::Bold),
        Cell::new("Department").add_attribute(Attribute::Bold),
        Cell::new("Affiliation"),
    ]);
    for dept in departments {
        table.add_row(vec![
            Cell::new(dept.id),
            Cell::new(&dept.name).add_attribute(Attribute::Bold),
            Cell::new(dept.affiliation),
        ]);
    }
    println!("\n{}", table);
}

pub fn metrics(metrics: &[Metric]) {
    let mut table = base_table();
    table.add_row(vec![
        Cell::new("Id").add_attribute(Attribute::Bold),
        Cell::new("No.").add_attribute(Attribute::Bold),
        Cell::new("Description"),
        Cell::new("Unit"),
        Cell::new("Points"),
    ]);
    for metric in metrics {
        table.add_row(vec![
            Cell::new(metric.metric_id),
            Cell::new(metric.label()).add_attribute(Attribute::Bold),
            Cell::new(metric.description.as_deref().unwrap_or("")),
            Cell::new(metric.unit_of_measurement.as_deref().unwrap_or("")),
            Cell::new(
                metric
                    .points
                    .map(fmt_score)
                    .unwrap_or_default(),
            ),
        ]);
    }
    println!("\n{}", table);
}

/// Rows × metrics aggregate. With `with_totals`, a Total column, a TOTAL row
/// and the grand total are included; zero row totals render empty, the way
/// empty rows read best in the grid.
pub fn report(table_data: &ReportTable, row_label: &str, with_totals: bool) {
    let mut table = base_table();

    let mut header = vec![Cell::new(row_label).add_attribute(Attribute::Bold)];
    for column in &table_data.columns {
        header.push(Cell::new(&column.label).add_attribute(Attribute::Bold));
    }
    if with_totals {
        header.push(
            Cell::new("Total")
                .add_attribute(Attribute::Bold)
                .fg(Color::Cyan),
        );
    }
    table.add_row(header);

    let value_columns = table_data.columns.len() + usize::from(with_totals);
    for i in 1..=value_columns {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    for row in &table_data.rows {
        let mut cells = vec![Cell::new(&row.name).add_attribute(Attribute::Bold)];
        for value in &row.cells {
            cells.push(Cell::new(value.map(fmt_score).unwrap_or_default()));
        }
        if with_totals {
            let rendered = if row.total == 0.0 {
                String::new()
            } else {
                fmt_score(row.total)
            };
            cells.push(Cell::new(rendered).fg(Color::Cyan));
        }
        table.add_row(cells);
    }

    if with_totals {
        let mut totals = vec![Cell::new("TOTAL:").add_attribute(Attribute::Bold)];
        for total in &table_data.column_totals {
            totals.push(Cell::new(fmt_score(*total)).add_attribute(Attribute::Bold));
        }
        totals.push(
            Cell::new(fmt_score(table_data.grand_total))
                .add_attribute(Attribute::Bold)
                .fg(Color::Cyan),
        );
        table.add_row(totals);
    }

    println!("\n{}", table);
}

/// Per-cell outcome of a batched save.
pub fn save_outcomes(report: &SaveReport, departments: &[Department], metrics: &[Metric]) {
    let dept_name = |id: i64| {
        departments
            .iter()
            .find(|d| d.id == id)
            .map(|d| d.name.clone())
            .unwrap_or_else(|| id.to_string())
    };
    let metric_label = |id: i64| {
        metrics
            .iter()
            .find(|m| m.metric_id == id)
            .map(|m| m.label())
            .unwrap_or_else(|| id.to_string())
    };

    let mut table = base_table();
    table.add_row(vec![
        Cell::new("Cell").add_attribute(Attribute::Bold),
        Cell::new("Department").add_attribute(Attribute::Bold),
        Cell::new("Metric").add_attribute(Attribute::Bold),
        Cell::new("Result").add_attribute(Attribute::Bold),
    ]);

    for key in &report.persisted {
        table.add_row(vec![
            Cell::new(key.to_string()),
            Cell::new(dept_name(key.department_id)),
            Cell::new(metric_label(key.metric_id)),
            Cell::new("saved").fg(Color::Green),
        ]);
    }
    for (key, message) in &report.failed {
        table.add_row(vec![
            Cell::new(key.to_string()),
            Cell::new(dept_name(key.department_id)),
            Cell::new(metric_label(key.metric_id)),
            Cell::new(format!("failed: {}", message)).fg(Color::Red),
        ]);
    }

    println!("\n{}", table);
}
