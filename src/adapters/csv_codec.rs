use crate::domain::model::{Cell, Row, SheetFormat};
use crate::domain::ports::SheetCodec;
use crate::utils::error::{GroupingError, Result};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

#[derive(Debug, Clone, Copy, Default)]
pub struct CsvCodec;

impl CsvCodec {
    pub fn new() -> Self {
        Self
    }
}

/// CSV 欄位一律保留原文，數值轉換交給 `Cell::as_integer`
fn parse_cell(raw: &str) -> Cell {
    if raw.trim().is_empty() {
        Cell::Empty
    } else {
        Cell::Text(raw.to_string())
    }
}

impl SheetCodec for CsvCodec {
    fn decode(&self, bytes: &[u8]) -> Result<Vec<Row>> {
        let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(bytes);

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(GroupingError::decode)?;
            rows.push(record.iter().map(parse_cell).collect());
        }

        tracing::debug!("Decoded CSV with {} rows", rows.len());
        Ok(rows)
    }

    fn encode(&self, _sheet_name: &str, rows: &[Row]) -> Result<Vec<u8>> {
        let mut writer = csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(Vec::new());

        for row in rows {
            writer.write_record(row.iter().map(|cell| cell.to_string()))?;
        }

        writer
            .into_inner()
            .map_err(|e| GroupingError::IoError(e.into_error()))
    }

    fn format(&self) -> SheetFormat {
        SheetFormat::Csv
    }
}
