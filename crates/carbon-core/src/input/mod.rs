pub mod csv_file;
pub mod workbook;

use crate::error::CarbonError;

/// Cell text of an uploaded sheet, header row separated from data rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawSheet {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Trait for sheet decoding backends.
pub trait SheetReader: Send + Sync {
    /// Decode uploaded bytes into header and data rows. Blank rows are dropped.
    fn read_sheet(&self, bytes: &[u8]) -> Result<RawSheet, CarbonError>;

    /// Name of this backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

/// Upload format, decided by file name alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Csv,
    Workbook,
}

impl InputFormat {
    /// `.csv` files are read as CSV; everything else is treated as a spreadsheet workbook.
    pub fn from_file_name(name: &str) -> InputFormat {
        if name.trim().to_lowercase().ends_with(".csv") {
            InputFormat::Csv
        } else {
            InputFormat::Workbook
        }
    }

    pub fn reader(&self) -> Box<dyn SheetReader> {
        match self {
            InputFormat::Csv => Box::new(csv_file::CsvSheetReader::new()),
            InputFormat::Workbook => Box::new(workbook::WorkbookSheetReader::new()),
        }
    }
}

/// Decode an upload with the backend its file name calls for.
pub fn read_upload(file_name: &str, bytes: &[u8]) -> Result<RawSheet, CarbonError> {
    let format = InputFormat::from_file_name(file_name);
    let reader = format.reader();
    tracing::debug!(
        file_name,
        backend = reader.backend_name(),
        bytes = bytes.len(),
        "reading upload"
    );
    reader.read_sheet(bytes)
}

fn is_blank(row: &[String]) -> bool {
    row.iter().all(|cell| cell.trim().is_empty())
}
