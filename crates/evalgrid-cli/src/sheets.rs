use crate::reports::fmt_score;
use evalgrid_core::report::ReportTable;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook};
use std::path::Path;

/// Export the report as a styled workbook: bordered grid, bold centered
/// header, left-aligned name column clamped to a readable width, totals row
/// bold on a gray fill.
pub fn write_report_xlsx(path: &Path, table: &ReportTable, row_label: &str) -> anyhow::Result<()> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Department metrics")?;

    let header = Format::new()
        .set_bold()
        .set_align(FormatAlign::Center)
        .set_border(FormatBorder::Thin);
    let name_cell = Format::new()
        .set_align(FormatAlign::Left)
        .set_border(FormatBorder::Thin);
    let value_cell = Format::new()
        .set_align(FormatAlign::Center)
        .set_border(FormatBorder::Thin);
    let totals_name = Format::new()
        .set_bold()
        .set_align(FormatAlign::Left)
        .set_background_color(Color::RGB(0xD3D3D3))
        .set_border(FormatBorder::Thin);
    let totals_value = Format::new()
        .set_bold()
        .set_align(FormatAlign::Center)
        .set_background_color(Color::RGB(0xD3D3D3))
        .set_border(FormatBorder::Thin);

    let longest_name = table
        .rows
        .iter()
        .map(|r| r.name.chars().count())
        .max()
        .unwrap_or(0);
    sheet.set_column_width(0, longest_name.clamp(10, 50) as f64)?;
    for i in 0..table.columns.len() {
        sheet.set_column_width(1 + i as u16, 8.0)?;
    }
    let total_col = 1 + table.columns.len() as u16;
    sheet.set_column_width(total_col, 10.0)?;

    sheet.write_string_with_format(0, 0, row_label, &header)?;
    for (i, column) in table.columns.iter().enumerate() {
        sheet.write_string_with_format(0, 1 + i as u16, &column.label, &header)?;
    }
    sheet.write_string_with_format(0, total_col, "Total", &header)?;

    for (r, row) in table.rows.iter().enumerate() {
        let row_idx = 1 + r as u32;
        sheet.write_string_with_format(row_idx, 0, &row.name, &name_cell)?;
        for (c, value) in row.cells.iter().enumerate() {
            let col = 1 + c as u16;
            match value {
                Some(v) => sheet.write_number_with_format(row_idx, col, *v, &value_cell)?,
                None => sheet.write_blank(row_idx, col, &value_cell)?,
            };
        }
        if row.total == 0.0 {
            sheet.write_blank(row_idx, total_col, &value_cell)?;
        } else {
            sheet.write_number_with_format(row_idx, total_col, row.total, &value_cell)?;
        }
    }

    let totals_idx = 1 + table.rows.len() as u32;
    sheet.write_string_with_format(totals_idx, 0, "TOTAL:", &totals_name)?;
    for (c, total) in table.column_totals.iter().enumerate() {
        sheet.write_number_with_format(totals_idx, 1 + c as u16, *total, &totals_value)?;
    }
    sheet.write_number_with_format(totals_idx, total_col, table.grand_total, &totals_value)?;

    workbook.save(path)?;
    Ok(())
}

/// Same cells and totals as the workbook, as plain CSV.
pub fn write_report_csv(path: &Path, table: &ReportTable, row_label: &str) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)?;

    let mut header = vec![row_label.to_string()];
    header.extend(table.columns.iter().map(|c| c.label.clone()));
    header.push("Total".to_string());
    writer.write_record(&header)?;

    for row in &table.rows {
        let mut record = vec![row.name.clone()];
        record.extend(
            row.cells
                .iter()
                .map(|v| v.map(fmt_score).unwrap_or_default()),
        );
        record.push(if row.total == 0.0 {
            String::new()
        } else {
            fmt_score(row.total)
        });
        writer.write_record(&record)?;
    }

    let mut totals = vec!["TOTAL:".to_string()];
    totals.extend(table.column_totals.iter().map(|t| fmt_score(*t)));
    totals.push(fmt_score(table.grand_total));
    writer.write_record(&totals)?;

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use evalgrid_core::report::{ReportTable, RowEntity, ValueLookup};
    use evalgrid_protocol::Metric;

    fn sample_table() -> ReportTable {
        let mut lookup = ValueLookup::default();
        lookup.insert(1, 10, 5.0);
        lookup.insert(1, 11, 2.5);
        lookup.insert(2, 10, 3.0);
        let rows = vec![
            RowEntity {
                id: 1,
                name: "Mathematics".into(),
            },
            RowEntity {
                id: 2,
                name: "Physics".into(),
            },
            RowEntity {
                id: 3,
                name: "History".into(),
            },
        ];
        let metrics = vec![
            Metric {
                metric_id: 10,
                metric_number: Some(1),
                ..Metric::default()
            },
            Metric {
                metric_id: 11,
                metric_number: Some(2),
                metric_subnumber: Some("a".into()),
                ..Metric::default()
            },
        ];
        ReportTable::build(&rows, &metrics, &lookup)
    }

    #[test]
    fn xlsx_export_writes_a_zip_container() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.xlsx");
        write_report_xlsx(&path, &sample_table(), "Department").unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"PK"), "xlsx must be a zip container");
    }

    #[test]
    fn csv_export_includes_cells_and_totals() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.csv");
        write_report_csv(&path, &sample_table(), "Department").unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "Department,1,2a,Total");
        assert_eq!(lines[1], "Mathematics,5,2.5,7.5");
        assert_eq!(lines[2], "Physics,3,,3");
        // an unscored department keeps an empty total
        assert_eq!(lines[3], "History,,,");
        assert_eq!(lines[4], "TOTAL:,8,2.5,10.5");
    }
}
