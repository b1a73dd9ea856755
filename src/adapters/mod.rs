// Adapters layer: concrete implementations for external systems (storage, spreadsheet codecs).

pub mod csv_codec;
pub mod storage;
pub mod xlsx_codec;

pub use csv_codec::CsvCodec;
pub use storage::LocalStorage;
pub use xlsx_codec::XlsxCodec;

use crate::domain::model::{Row, SheetFormat};
use crate::domain::ports::SheetCodec;
use crate::utils::error::{GroupingError, Result};

/// 依格式選擇實際的編解碼器
#[derive(Debug, Clone, Copy)]
pub enum AnyCodec {
    Xlsx(XlsxCodec),
    Csv(CsvCodec),
}

impl AnyCodec {
    pub fn new(format: SheetFormat) -> Self {
        match format {
            SheetFormat::Xlsx => AnyCodec::Xlsx(XlsxCodec::new()),
            SheetFormat::Csv => AnyCodec::Csv(CsvCodec::new()),
        }
    }

    pub fn for_path(path: &str) -> Result<Self> {
        SheetFormat::from_path(path)
            .map(Self::new)
            .ok_or_else(|| GroupingError::InvalidConfigValueError {
                field: "input path".to_string(),
                value: path.to_string(),
                reason: "Unsupported file type; use .xlsx, .xls, .xlsb, .ods or .csv".to_string(),
            })
    }
}

impl SheetCodec for AnyCodec {
    fn decode(&self, bytes: &[u8]) -> Result<Vec<Row>> {
        match self {
            AnyCodec::Xlsx(codec) => codec.decode(bytes),
            AnyCodec::Csv(codec) => codec.decode(bytes),
        }
    }

    fn encode(&self, sheet_name: &str, rows: &[Row]) -> Result<Vec<u8>> {
        match self {
            AnyCodec::Xlsx(codec) => codec.encode(sheet_name, rows),
            AnyCodec::Csv(codec) => codec.encode(sheet_name, rows),
        }
    }

    fn format(&self) -> SheetFormat {
        match self {
            AnyCodec::Xlsx(codec) => codec.format(),
            AnyCodec::Csv(codec) => codec.format(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_path_picks_codec() {
        assert_eq!(
            AnyCodec::for_path("roster.xlsx").unwrap().format(),
            SheetFormat::Xlsx
        );
        assert_eq!(
            AnyCodec::for_path("roster.csv").unwrap().extension(),
            "csv"
        );
        assert!(matches!(
            AnyCodec::for_path("roster.pdf"),
            Err(GroupingError::InvalidConfigValueError { .. })
        ));
    }
}
