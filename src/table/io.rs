use crate::error::{MailscrubError, Result};
use crate::table::model::Table;
use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;

/// On-disk format, chosen by file extension. Anything without an Excel
/// extension is treated as comma-separated text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Excel,
    Csv,
}

impl TableFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("xlsx") || ext.eq_ignore_ascii_case("xls") => {
                TableFormat::Excel
            }
            _ => TableFormat::Csv,
        }
    }
}

pub fn read_table(path: &Path) -> Result<Table> {
    match TableFormat::from_path(path) {
        TableFormat::Excel => read_excel(path),
        TableFormat::Csv => read_csv(path),
    }
}

pub fn write_table(table: &Table, path: &Path) -> Result<()> {
    match TableFormat::from_path(path) {
        TableFormat::Excel => write_excel(table, path),
        TableFormat::Csv => write_csv(table, path),
    }
}

fn read_excel(path: &Path) -> Result<Table> {
    let mut workbook = open_workbook_auto(path).map_err(|e| read_error(path, e))?;

    let sheet_names = workbook.sheet_names().to_vec();
    let first_sheet = sheet_names.first().ok_or_else(|| MailscrubError::TableRead {
        path: path.display().to_string(),
        message: "workbook has no sheets".to_string(),
    })?;

    let range = workbook
        .worksheet_range(first_sheet)
        .map_err(|e| read_error(path, e))?;

    let mut rows = range.rows();
    let columns = match rows.next() {
        Some(header) => header.iter().map(cell_to_string).collect(),
        None => Vec::new(),
    };

    let mut table = Table::new(columns);
    for row in rows {
        table.push_row(row.iter().map(cell_to_string).collect());
    }

    Ok(table)
}

fn read_csv(path: &Path) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|e| read_error(path, e))?;

    let headers = reader.headers().map_err(|e| read_error(path, e))?.clone();
    let mut table = Table::new(headers.iter().map(|h| h.to_string()).collect());

    for record in reader.records() {
        let record = record.map_err(|e| read_error(path, e))?;
        table.push_row(record.iter().map(|f| f.to_string()).collect());
    }

    Ok(table)
}

fn write_excel(table: &Table, path: &Path) -> Result<()> {
    let mut workbook = rust_xlsxwriter::Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, name) in table.columns.iter().enumerate() {
        worksheet
            .write_string(0, col as u16, name)
            .map_err(|e| write_error(path, e))?;
    }

    for (row_index, row) in table.rows.iter().enumerate() {
        for (col, value) in row.iter().enumerate() {
            worksheet
                .write_string(row_index as u32 + 1, col as u16, value)
                .map_err(|e| write_error(path, e))?;
        }
    }

    workbook.save(path).map_err(|e| write_error(path, e))?;
    Ok(())
}

fn write_csv(table: &Table, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| write_error(path, e))?;

    writer
        .write_record(&table.columns)
        .map_err(|e| write_error(path, e))?;
    for row in &table.rows {
        writer.write_record(row).map_err(|e| write_error(path, e))?;
    }

    writer.flush().map_err(|e| write_error(path, e))?;
    Ok(())
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(n) => n.to_string(),
        Data::Float(f) => format!("{}", f),
        Data::Bool(b) => b.to_string(),
        // Error cells carry no usable value; treat them as missing.
        Data::Error(_) => String::new(),
        Data::DateTime(dt) => format!("{}", dt),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
    }
}

fn read_error(path: &Path, error: impl std::fmt::Display) -> MailscrubError {
    MailscrubError::TableRead {
        path: path.display().to_string(),
        message: error.to_string(),
    }
}

fn write_error(path: &Path, error: impl std::fmt::Display) -> MailscrubError {
    MailscrubError::TableWrite {
        path: path.display().to_string(),
        message: error.to_string(),
    }
}
