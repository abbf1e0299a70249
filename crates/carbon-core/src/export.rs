use std::path::Path;

use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::analysis::outcome::ReportRow;
use crate::error::CarbonError;
use crate::view::format_number;

pub const CSV_HEADER: &str =
    "Product ID,Product,Category,Source,Units,Total Emission (kg),Risk Level";

/// Download name of the exported report.
pub const EXPORT_FILE_NAME: &str = "high_risk_report.csv";

pub const CSV_DATA_URI_PREFIX: &str = "data:text/csv;charset=utf-8,";

/// Serialize report rows to CSV text.
///
/// The header line ends in `\n` and every data row in `\r\n`. Fields are only
/// quoted when they contain a comma, quote or line break, so plain values come
/// out exactly as joined text.
pub fn report_csv(rows: &[ReportRow]) -> Result<String, CarbonError> {
    if rows.is_empty() {
        return Err(CarbonError::NothingToExport);
    }

    let mut writer = WriterBuilder::new()
        .terminator(Terminator::CRLF)
        .quote_style(QuoteStyle::Necessary)
        .from_writer(Vec::new());

    for row in rows {
        writer.write_record([
            row.id.as_str(),
            row.product.as_str(),
            row.category.as_str(),
            row.source.as_str(),
            format_number(row.units).as_str(),
            format_number(row.total_emission).as_str(),
            row.risk_level.as_str(),
        ])?;
    }

    let body = writer
        .into_inner()
        .map_err(|e| CarbonError::Io(e.into_error()))?;

    let mut csv = String::with_capacity(CSV_HEADER.len() + 1 + body.len());
    csv.push_str(CSV_HEADER);
    csv.push('\n');
    csv.push_str(&String::from_utf8_lossy(&body));
    Ok(csv)
}

/// `data:` URI that downloads the report when used as a link target.
pub fn report_data_uri(rows: &[ReportRow]) -> Result<String, CarbonError> {
    let csv = report_csv(rows)?;
    Ok(encode_uri(&format!("{CSV_DATA_URI_PREFIX}{csv}")))
}

/// Write the report CSV to a file.
pub fn write_report_csv(rows: &[ReportRow], path: &Path) -> Result<(), CarbonError> {
    let csv = report_csv(rows)?;
    std::fs::write(path, csv)?;
    Ok(())
}

/// Percent-encode a string the way the browser's `encodeURI` does: URI
/// reserved characters and unreserved marks stay, everything else is
/// encoded as UTF-8 bytes. `#` is encoded too, since in a `data:` URI it
/// would end the content.
pub fn encode_uri(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        if keeps_literal(byte) {
            out.push(byte as char);
        } else {
            out.push_str(&format!("%{byte:02X}"));
        }
    }
    out
}

fn keeps_literal(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || b";,/?:@&=+$-_.!~*'()".contains(&byte)
}
