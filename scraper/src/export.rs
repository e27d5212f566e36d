//! Spreadsheet exports of scraped records: a plain CSV and a styled xlsx sheet.

use std::io::Write;
use std::path::Path;

use common::{columns, JobRecord};
use rust_xlsxwriter::{
    Color, ConditionalFormat3ColorScale, ConditionalFormatType, Format, Table, TableColumn,
    TableStyle, Workbook, Worksheet,
};

use crate::error::ExportError;

pub const SHEET_NAME: &str = "Scraped Data";
const TABLE_NAME: &str = "scraped_table";
const CURRENCY_FORMAT: &str = "$#,###,##0.00";
const DEFAULT_WIDTH: f64 = 8.43;
const CURRENCY_WIDTH: f64 = 13.0;

/// One exported cell before it is written out.
#[derive(Debug, Clone, PartialEq)]
enum Cell {
    Text(String),
    Money(Option<f64>),
}

fn row(job: &JobRecord) -> [Cell; 10] {
    let text = |value: Option<&str>| Cell::Text(value.unwrap_or_default().to_string());
    [
        Cell::Text(job.company.clone()),
        text(job.function.as_deref()),
        Cell::Text(if job.quick_apply { "Yes" } else { "No" }.to_string()),
        text(job.contract.map(|c| c.label())),
        Cell::Money(job.min_salary.map(|v| v as f64)),
        Cell::Money(job.max_salary.map(|v| v as f64)),
        Cell::Money(job.average_hourly_salary),
        text(job.pay_rate.map(|p| p.label())),
        text(job.regime.map(|r| r.label())),
        Cell::Text(job.link.clone()),
    ]
}

/// Writes a header row followed by one row per record, in [`columns::ALL`] order.
///
/// Money columns are plain numbers with two decimals so spreadsheet tools
/// read them as numbers.
pub fn write_csv<W: Write>(records: &[JobRecord], writer: W) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(columns::ALL)?;
    for job in records {
        csv_writer.write_record(row(job).map(|cell| match cell {
            Cell::Text(text) => text,
            Cell::Money(value) => value.map(|v| format!("{v:.2}")).unwrap_or_default(),
        }))?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn to_csv(records: &[JobRecord]) -> Result<Vec<u8>, ExportError> {
    let mut buffer = Vec::new();
    write_csv(records, &mut buffer)?;
    Ok(buffer)
}

/// Fills the sheet: a striped table over header and rows, currency cells
/// formatted as money, and a red-yellow-green scale on the hourly column.
fn fill_sheet(sheet: &mut Worksheet, records: &[JobRecord]) -> Result<(), ExportError> {
    let money = Format::new().set_num_format(CURRENCY_FORMAT);
    let mut widths = [DEFAULT_WIDTH; 10];

    for (col, name) in columns::ALL.iter().enumerate() {
        widths[col] = widths[col].max(name.chars().count() as f64 + 2.0);
        if columns::is_currency(name) {
            widths[col] = widths[col].max(CURRENCY_WIDTH);
        }
    }

    for (index, job) in records.iter().enumerate() {
        let sheet_row = index as u32 + 1;
        for (col, cell) in row(job).into_iter().enumerate() {
            match cell {
                Cell::Text(text) if text.is_empty() => {}
                Cell::Text(text) => {
                    widths[col] = widths[col].max(text.chars().count() as f64 + 2.0);
                    sheet.write_string(sheet_row, col as u16, text)?;
                }
                Cell::Money(Some(value)) => {
                    sheet.write_number_with_format(sheet_row, col as u16, value, &money)?;
                }
                Cell::Money(None) => {}
            }
        }
    }

    for (col, width) in widths.iter().enumerate() {
        sheet.set_column_width(col as u16, *width)?;
    }

    // A table needs at least one body row, even when nothing was scraped.
    let last_row = records.len().max(1) as u32;
    let last_col = (columns::ALL.len() - 1) as u16;

    let table_columns: Vec<TableColumn> = columns::ALL
        .iter()
        .map(|name| TableColumn::new().set_header(*name))
        .collect();
    let table = Table::new()
        .set_name(TABLE_NAME)
        .set_style(TableStyle::Medium9)
        .set_banded_rows(true)
        .set_columns(&table_columns);
    sheet.add_table(0, 0, last_row, last_col, &table)?;

    if let Some(col) = columns::ALL
        .iter()
        .position(|name| *name == columns::COLOR_SCALE_COLUMN)
    {
        let scale = ConditionalFormat3ColorScale::new()
            .set_minimum_color(Color::RGB(0xF8696B))
            .set_midpoint(ConditionalFormatType::Percentile, 50)
            .set_midpoint_color(Color::RGB(0xFFEB84))
            .set_maximum_color(Color::RGB(0x63BE7B));
        sheet.add_conditional_format(1, col as u16, last_row, col as u16, &scale)?;
    }

    Ok(())
}

fn workbook(records: &[JobRecord]) -> Result<Workbook, ExportError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;
    fill_sheet(sheet, records)?;
    Ok(workbook)
}

/// Saves the styled sheet to `path`.
pub fn write_xlsx(records: &[JobRecord], path: &Path) -> Result<(), ExportError> {
    workbook(records)?.save(path)?;
    Ok(())
}

pub fn to_xlsx(records: &[JobRecord]) -> Result<Vec<u8>, ExportError> {
    Ok(workbook(records)?.save_to_buffer()?)
}
