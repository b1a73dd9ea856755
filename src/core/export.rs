use crate::domain::model::{Cell, PartitionResult, Row};
use chrono::NaiveDate;

pub const EXPORT_HEADER: [&str; 4] = ["GroupLabel", "Name", "Category", "Attribute"];

pub const DEFAULT_EXPORT_PREFIX: &str = "random_groups";

pub const DEFAULT_SHEET_NAME: &str = "Groups";

pub fn group_label(number: usize) -> String {
    format!("Group {}", number)
}

/// 將分組結果攤平成表格：標題列之後依組別、組內順序各一列
pub fn to_export_rows(result: &PartitionResult) -> Vec<Row> {
    let mut rows = Vec::with_capacity(result.member_count() + 1);
    rows.push(EXPORT_HEADER.iter().map(|h| Cell::from(*h)).collect());

    for (number, group) in result.iter_labeled() {
        let label = group_label(number);
        for member in group {
            rows.push(vec![
                Cell::Text(label.clone()),
                Cell::Text(member.name.clone()),
                Cell::Text(member.category.clone()),
                member.attribute.to_cell(),
            ]);
        }
    }

    rows
}

/// `<prefix>_<YYYY-MM-DD>.<extension>`
pub fn export_file_name(prefix: &str, date: NaiveDate, extension: &str) -> String {
    format!("{}_{}.{}", prefix, date.format("%Y-%m-%d"), extension)
}
