use crate::domain::model::{GroupSummary, Member, MemberSummary, PartitionResult};
use crate::utils::error::{GroupingError, Result};
use std::collections::BTreeMap;

pub fn summarize_members(members: &[Member]) -> MemberSummary {
    let mut per_category = BTreeMap::new();
    for member in members {
        *per_category.entry(member.category.clone()).or_insert(0) += 1;
    }

    MemberSummary {
        total: members.len(),
        per_category,
    }
}

/// 組數、平均人數（四捨五入到小數一位）、最大與最小組人數
pub fn summarize_groups(result: &PartitionResult) -> Result<GroupSummary> {
    let sizes = result.sizes();
    let (Some(&max_size), Some(&min_size)) = (sizes.iter().max(), sizes.iter().min()) else {
        return Err(GroupingError::NoGroupsError);
    };

    let average = result.member_count() as f64 / sizes.len() as f64;

    Ok(GroupSummary {
        group_count: sizes.len(),
        average_size: (average * 10.0).round() / 10.0,
        max_size,
        min_size,
    })
}
