use std::io::Cursor;

use calamine::{Data, Reader};

use crate::error::CarbonError;
use crate::input::{is_blank, RawSheet, SheetReader};

/// Spreadsheet backend (xlsx, xls, xlsb, ods). Only the first sheet is read,
/// its first row being the header.
#[derive(Debug, Default)]
pub struct WorkbookSheetReader;

impl WorkbookSheetReader {
    pub fn new() -> Self {
        Self
    }
}

impl SheetReader for WorkbookSheetReader {
    fn read_sheet(&self, bytes: &[u8]) -> Result<RawSheet, CarbonError> {
        let cursor = Cursor::new(bytes);
        let mut workbook = calamine::open_workbook_auto_from_rs(cursor)
            .map_err(|e| CarbonError::Input(format!("failed to open workbook: {e}")))?;

        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| CarbonError::Input("workbook has no sheets".into()))?
            .map_err(|e| CarbonError::Input(format!("failed to read first sheet: {e}")))?;

        let mut rows_iter = range.rows();
        let headers: Vec<String> = match rows_iter.next() {
            Some(row) => row.iter().map(|c| cell_as_string(c).trim().to_string()).collect(),
            None => return Err(CarbonError::ParseError("sheet is empty".into())),
        };

        let rows = rows_iter
            .map(|row| row.iter().map(cell_as_string).collect::<Vec<String>>())
            .filter(|row| !is_blank(row))
            .collect();

        Ok(RawSheet { headers, rows })
    }

    fn backend_name(&self) -> &str {
        "calamine"
    }
}

fn cell_as_string(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.clone(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt.to_string(),
        Data::Empty => String::new(),
        _ => format!("{cell}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_as_string() {
        assert_eq!(cell_as_string(&Data::Float(150.0)), "150");
        assert_eq!(cell_as_string(&Data::Float(2.5)), "2.5");
        assert_eq!(cell_as_string(&Data::Int(7)), "7");
        assert_eq!(cell_as_string(&Data::String("Milk".into())), "Milk");
        assert_eq!(cell_as_string(&Data::Empty), "");
    }

    #[test]
    fn test_non_workbook_bytes_rejected() {
        let err = WorkbookSheetReader::new()
            .read_sheet(b"Product,Category\n")
            .unwrap_err();
        assert!(matches!(err, CarbonError::Input(_)));
    }
}
