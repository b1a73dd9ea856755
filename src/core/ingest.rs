use crate::domain::model::{Attribute, Cell, Member, Row, UNKNOWN};
use crate::utils::error::{GroupingError, Result};

/// 欄位位置：序號、姓名、類別、屬性
const SEQUENCE_COLUMN: usize = 0;
const NAME_COLUMN: usize = 1;
const CATEGORY_COLUMN: usize = 2;
const ATTRIBUTE_COLUMN: usize = 3;

/// 將原始列轉成成員清單。
///
/// 第一列一律視為標題列丟棄。缺姓名或少於兩欄的列直接略過，不算錯誤。
pub fn ingest(rows: &[Row]) -> Result<Vec<Member>> {
    if rows.len() < 2 {
        return Err(GroupingError::empty_input(
            "the file must contain a header row and at least one data row",
        ));
    }

    let mut members = Vec::with_capacity(rows.len() - 1);
    let mut skipped = 0usize;

    for (ordinal, row) in rows.iter().enumerate().skip(1) {
        match member_from_row(ordinal, row) {
            Some(member) => members.push(member),
            None => {
                skipped += 1;
                tracing::debug!("Skipping row {}: missing name", ordinal + 1);
            }
        }
    }

    if members.is_empty() {
        return Err(GroupingError::empty_input("no valid members were found"));
    }

    tracing::debug!(
        "Ingested {} members ({} rows skipped)",
        members.len(),
        skipped
    );

    Ok(members)
}

fn member_from_row(ordinal: usize, row: &[Cell]) -> Option<Member> {
    if row.len() < 2 {
        return None;
    }
    let name = row[NAME_COLUMN].to_text()?;

    let sequence_number = row
        .get(SEQUENCE_COLUMN)
        .filter(|cell| !cell.is_absent())
        .and_then(Cell::as_integer)
        .unwrap_or(ordinal as i64);

    let category = row
        .get(CATEGORY_COLUMN)
        .and_then(Cell::to_text)
        .unwrap_or_else(|| UNKNOWN.to_string());

    Some(Member {
        sequence_number,
        name,
        category,
        attribute: Attribute::from_cell(row.get(ATTRIBUTE_COLUMN)),
    })
}
