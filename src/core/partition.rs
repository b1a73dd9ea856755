use crate::domain::model::{Group, Member, PartitionResult};
use crate::utils::error::{GroupingError, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// 使用者選擇的分組方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupMode {
    /// 指定組數
    ByGroups,
    /// 指定每組人數
    BySize,
}

impl GroupMode {
    fn field_name(&self) -> &'static str {
        match self {
            GroupMode::ByGroups => "group count",
            GroupMode::BySize => "group size",
        }
    }
}

/// 組數上限，超過時回報 `InvalidGroupCountError`
pub const MAX_GROUP_COUNT: usize = 10_000;

fn too_many_groups(field: &str, value: impl ToString) -> GroupingError {
    GroupingError::InvalidGroupCountError {
        field: field.to_string(),
        value: value.to_string(),
        reason: format!("must be at most {}", MAX_GROUP_COUNT),
    }
}

/// 已驗證的分組參數，值一定 >= 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GroupSizing {
    Count(usize),
    Size(usize),
}

impl GroupSizing {
    pub fn new(mode: GroupMode, value: i64) -> Result<Self> {
        if value < 1 {
            return Err(GroupingError::InvalidGroupCountError {
                field: mode.field_name().to_string(),
                value: value.to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        let value = usize::try_from(value).map_err(|_| GroupingError::InvalidGroupCountError {
            field: mode.field_name().to_string(),
            value: value.to_string(),
            reason: "value is too large".to_string(),
        })?;

        if mode == GroupMode::ByGroups && value > MAX_GROUP_COUNT {
            return Err(too_many_groups(mode.field_name(), value));
        }

        Ok(match mode {
            GroupMode::ByGroups => GroupSizing::Count(value),
            GroupMode::BySize => GroupSizing::Size(value),
        })
    }

    /// 從使用者輸入的文字解析；與寬鬆的整數解析一致，"4 groups" 取前綴 4
    pub fn parse(mode: GroupMode, raw: Option<&str>) -> Result<Self> {
        let invalid = |value: &str, reason: &str| GroupingError::InvalidGroupCountError {
            field: mode.field_name().to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        };

        let raw = raw.ok_or_else(|| invalid("", "value is missing"))?;
        let digits = leading_integer(raw).ok_or_else(|| invalid(raw, "not a number"))?;
        let value = digits.parse::<i64>().map_err(|_| {
            if digits.starts_with('-') {
                invalid(raw, "must be at least 1")
            } else {
                invalid(raw, "value is too large")
            }
        })?;
        Self::new(mode, value)
    }

    /// 依成員數換算組數；按人數分組時為 `ceil(n / size)`
    pub fn group_count(&self, member_count: usize) -> usize {
        match *self {
            GroupSizing::Count(count) => count,
            GroupSizing::Size(size) => member_count.div_ceil(size),
        }
    }
}

fn leading_integer(raw: &str) -> Option<&str> {
    let trimmed = raw.trim_start();
    let sign_len = usize::from(trimmed.starts_with(['+', '-']));
    let digits = trimmed[sign_len..]
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len() - sign_len);
    if digits == 0 {
        return None;
    }
    Some(&trimmed[..sign_len + digits])
}

/// 將成員隨機打散後以輪詢方式分配到 `group_count` 組。
///
/// 每組人數只會是 `floor(n / k)` 或 `ceil(n / k)`，輸入不會被修改。
/// `group_count` 大於成員數時允許，部分組別為空。
pub fn partition<R: Rng + ?Sized>(
    members: &[Member],
    group_count: usize,
    rng: &mut R,
) -> Result<PartitionResult> {
    if members.is_empty() {
        return Err(GroupingError::empty_input("there are no members to group"));
    }
    if group_count == 0 {
        return Err(GroupingError::InvalidGroupCountError {
            field: GroupMode::ByGroups.field_name().to_string(),
            value: "0".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    if group_count > MAX_GROUP_COUNT {
        return Err(too_many_groups(
            GroupMode::ByGroups.field_name(),
            group_count,
        ));
    }
    if group_count > members.len() {
        tracing::warn!(
            "⚠️ Requested {} groups for {} members; some groups will be empty",
            group_count,
            members.len()
        );
    }

    let mut shuffled = members.to_vec();
    shuffled.shuffle(rng);

    let mut groups: Vec<Group> = vec![Vec::new(); group_count];

    for (index, member) in shuffled.into_iter().enumerate() {
        groups[index % group_count].push(member);
    }

    tracing::debug!(
        "Partitioned {} members into {} groups",
        members.len(),
        group_count
    );

    Ok(PartitionResult::new(groups))
}
