// Excel 讀取（xlsx, xlsm, xlsb, xls, ods）與 xlsx 輸出

use crate::domain::model::{Cell, Row, SheetFormat};
use crate::domain::ports::SheetCodec;
use crate::utils::error::{GroupingError, Result};
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use rust_xlsxwriter::{Format, Workbook};
use std::io::Cursor;

#[derive(Debug, Clone, Copy, Default)]
pub struct XlsxCodec;

impl XlsxCodec {
    pub fn new() -> Self {
        Self
    }
}

fn cell_from_data(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Int(n) => Cell::Int(*n),
        Data::Float(f) => Cell::Float(*f),
        Data::Bool(b) => Cell::Bool(*b),
        // 日期保留 Excel 序號
        Data::DateTime(dt) => Cell::Float(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Error(e) => {
            tracing::debug!("Treating cell error {} as empty", e);
            Cell::Empty
        }
    }
}

impl SheetCodec for XlsxCodec {
    fn decode(&self, bytes: &[u8]) -> Result<Vec<Row>> {
        let mut workbook =
            open_workbook_auto_from_rs(Cursor::new(bytes.to_vec())).map_err(GroupingError::decode)?;

        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| GroupingError::decode("workbook contains no sheets"))?;

        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| GroupingError::decode(format!("sheet '{}': {}", sheet_name, e)))?;

        // calamine 的範圍從第一個非空儲存格開始，補回前面的空列與空欄以保留欄位位置
        let (start_row, start_col) = range.start().unwrap_or((0, 0));
        let mut rows: Vec<Row> = vec![Vec::new(); start_row as usize];

        for data_row in range.rows() {
            let mut row: Row = vec![Cell::Empty; start_col as usize];
            row.extend(data_row.iter().map(cell_from_data));
            rows.push(row);
        }

        tracing::debug!(
            "Decoded sheet '{}' with {} rows",
            sheet_name,
            rows.len()
        );
        Ok(rows)
    }

    fn encode(&self, sheet_name: &str, rows: &[Row]) -> Result<Vec<u8>> {
        let mut workbook = Workbook::new();
        let header_format = Format::new().set_bold();

        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sheet_name)?;

        for (row_idx, row) in rows.iter().enumerate() {
            let row32 = row_idx as u32;
            for (col_idx, cell) in row.iter().enumerate() {
                let col16 = col_idx as u16;
                match cell {
                    Cell::Empty => {}
                    Cell::Text(s) if row_idx == 0 => {
                        worksheet.write_string_with_format(row32, col16, s, &header_format)?;
                    }
                    Cell::Text(s) => {
                        worksheet.write_string(row32, col16, s)?;
                    }
                    Cell::Int(n) => {
                        worksheet.write_number(row32, col16, *n as f64)?;
                    }
                    Cell::Float(f) => {
                        worksheet.write_number(row32, col16, *f)?;
                    }
                    Cell::Bool(b) => {
                        worksheet.write_boolean(row32, col16, *b)?;
                    }
                }
            }
        }

        let buffer = workbook.save_to_buffer()?;
        Ok(buffer)
    }

    fn format(&self) -> SheetFormat {
        SheetFormat::Xlsx
    }
}
