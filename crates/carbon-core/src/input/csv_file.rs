use csv::{ReaderBuilder, Trim};

use crate::error::CarbonError;
use crate::input::{is_blank, RawSheet, SheetReader};

/// CSV backend. Invalid UTF-8 is replaced rather than rejected.
pub struct CsvSheetReader {
    delimiter: u8,
}

impl Default for CsvSheetReader {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl CsvSheetReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}

impl SheetReader for CsvSheetReader {
    fn read_sheet(&self, bytes: &[u8]) -> Result<RawSheet, CarbonError> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .trim(Trim::All)
            .flexible(true)
            .from_reader(bytes);

        let headers: Vec<String> = reader
            .byte_headers()
            .map_err(|e| CarbonError::ParseError(format!("failed to read CSV header: {e}")))?
            .iter()
            .map(|field| String::from_utf8_lossy(field).trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for (index, record) in reader.byte_records().enumerate() {
            let record = record.map_err(|e| {
                CarbonError::ParseError(format!("failed to parse CSV row {}: {e}", index + 1))
            })?;
            let row: Vec<String> = record
                .iter()
                .map(|field| String::from_utf8_lossy(field).into_owned())
                .collect();
            if !is_blank(&row) {
                rows.push(row);
            }
        }

        Ok(RawSheet { headers, rows })
    }

    fn backend_name(&self) -> &str {
        "csv"
    }
}
