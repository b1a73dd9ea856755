use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// 缺少類別或屬性時使用的預設值
pub const UNKNOWN: &str = "unknown";

/// 試算表中的單一儲存格
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

/// 小數部分為零且落在 `i64` 範圍內的浮點數
fn integral_float(f: f64) -> Option<i64> {
    // i64::MAX as f64 是 2^63，本身已超出範圍
    if f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

impl Cell {
    /// `Empty`、空字串與只有空白的字串都視為缺值
    pub fn is_absent(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// 整數值；小數部分為零的浮點數與可解析的文字也算
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Cell::Int(n) => Some(*n),
            Cell::Float(f) => integral_float(*f),
            Cell::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// 非缺值時轉成去除前後空白的文字
    pub fn to_text(&self) -> Option<String> {
        if self.is_absent() {
            return None;
        }
        Some(match self {
            Cell::Text(s) => s.trim().to_string(),
            other => other.to_string(),
        })
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Text(s) => f.write_str(s),
            Cell::Int(n) => write!(f, "{}", n),
            Cell::Float(x) => match integral_float(*x) {
                Some(n) => write!(f, "{}", n),
                None => write!(f, "{}", x),
            },
            Cell::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Int(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Float(value)
    }
}

pub type Row = Vec<Cell>;

/// 年齡或其他屬性欄位
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Attribute {
    Integer(i64),
    Text(String),
    Unknown,
}

impl Attribute {
    pub fn from_cell(cell: Option<&Cell>) -> Self {
        match cell {
            None => Attribute::Unknown,
            Some(cell) if cell.is_absent() => Attribute::Unknown,
            Some(cell) => match cell.as_integer() {
                Some(n) => Attribute::Integer(n),
                None => Attribute::Text(cell.to_text().unwrap_or_default()),
            },
        }
    }

    pub fn to_cell(&self) -> Cell {
        match self {
            Attribute::Integer(n) => Cell::Int(*n),
            Attribute::Text(s) => Cell::Text(s.clone()),
            Attribute::Unknown => Cell::Text(UNKNOWN.to_string()),
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Attribute::Integer(n) => write!(f, "{}", n),
            Attribute::Text(s) => f.write_str(s),
            Attribute::Unknown => f.write_str(UNKNOWN),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub sequence_number: i64,
    pub name: String,
    pub category: String,
    pub attribute: Attribute,
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.name, self.category, self.attribute)
    }
}

pub type Group = Vec<Member>;

/// 一次分組動作的完整結果，顯示時組別從 1 開始編號
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartitionResult {
    groups: Vec<Group>,
}

impl PartitionResult {
    pub fn new(groups: Vec<Group>) -> Self {
        Self { groups }
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn member_count(&self) -> usize {
        self.groups.iter().map(Vec::len).sum()
    }

    pub fn sizes(&self) -> Vec<usize> {
        self.groups.iter().map(Vec::len).collect()
    }

    /// `(1-based label number, group)` pairs
    pub fn iter_labeled(&self) -> impl Iterator<Item = (usize, &Group)> {
        self.groups.iter().enumerate().map(|(i, g)| (i + 1, g))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberSummary {
    pub total: usize,
    pub per_category: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupSummary {
    pub group_count: usize,
    pub average_size: f64,
    pub max_size: usize,
    pub min_size: usize,
}

/// 讀寫試算表的格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum SheetFormat {
    #[default]
    Xlsx,
    Csv,
}

impl SheetFormat {
    /// 依副檔名判斷；calamine 能讀的 Excel/ODS 格式都走 `Xlsx`
    pub fn from_path(path: &str) -> Option<Self> {
        let extension = std::path::Path::new(path)
            .extension()?
            .to_str()?
            .to_ascii_lowercase();
        match extension.as_str() {
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Some(SheetFormat::Xlsx),
            "csv" => Some(SheetFormat::Csv),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            SheetFormat::Xlsx => "xlsx",
            SheetFormat::Csv => "csv",
        }
    }
}

impl fmt::Display for SheetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}
