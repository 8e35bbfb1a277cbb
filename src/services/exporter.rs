// src/services/exporter.rs
// DOCUMENTATION: Spreadsheet export of collected places
// PURPOSE: Write records to an .xlsx workbook with a fixed header row

use crate::errors::PlacesError;
use crate::models::PlaceRecord;
use rust_xlsxwriter::{Format, Workbook};
use std::path::{Path, PathBuf};

/// Column headers, in the order of PlaceRecord::to_row
pub const HEADERS: [&str; 4] = ["Name", "Address", "Email", "Website"];

/// Worksheet holding the records
pub const SHEET_NAME: &str = "Places";

const COLUMN_WIDTHS: [f64; 4] = [32.0, 48.0, 32.0, 40.0];

/// File name for a query/location pair: "<query>_in_<location>.xlsx"
/// Path separators in user input are replaced so the file stays in the output directory
pub fn default_filename(query: &str, location: &str) -> String {
    let clean = |s: &str| s.trim().replace(['/', '\\'], "_");
    format!("{}_in_{}.xlsx", clean(query), clean(location))
}

/// Full output path inside `output_dir`
pub fn default_output_path(output_dir: &Path, query: &str, location: &str) -> PathBuf {
    output_dir.join(default_filename(query, location))
}

/// Write all records to `destination`, replacing any existing file
/// DOCUMENTATION: Failures are logged here and returned; nothing panics
pub fn export(records: &[PlaceRecord], destination: &Path) -> Result<(), PlacesError> {
    match write_workbook(records, destination) {
        Ok(()) => {
            log::info!(
                "Data has been written to {} ({} rows)",
                destination.display(),
                records.len()
            );
            Ok(())
        }
        Err(e) => {
            log::error!(
                "Error writing to Excel file {}: {}",
                destination.display(),
                e
            );
            Err(e)
        }
    }
}

fn write_workbook(records: &[PlaceRecord], destination: &Path) -> Result<(), PlacesError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, (header, width)) in HEADERS.iter().zip(COLUMN_WIDTHS).enumerate() {
        let col = col as u16;
        worksheet.write_string_with_format(0, col, *header, &header_format)?;
        worksheet.set_column_width(col, width)?;
    }

    for (index, record) in records.iter().enumerate() {
        let row = u32::try_from(index + 1)
            .map_err(|_| PlacesError::ExportError("too many rows for a worksheet".to_string()))?;

        for (col, value) in record.to_row().iter().enumerate() {
            // Blank cells for missing values
            if !value.is_empty() {
                worksheet.write_string(row, col as u16, *value)?;
            }
        }
    }

    workbook.save(destination)?;
    Ok(())
}
