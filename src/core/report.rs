use crate::core::export::group_label;
use crate::domain::model::{GroupSummary, Member, MemberSummary, PartitionResult};
use std::fmt::Write;

/// 成員預覽：總人數、各類別人數，以及每位成員一行
pub fn render_member_preview(members: &[Member], summary: &MemberSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Members: {}", summary.total);
    for (category, count) in &summary.per_category {
        let _ = writeln!(out, "  {}: {}", category, count);
    }
    out.push('\n');
    for member in members {
        let _ = writeln!(out, "  {}", member);
    }
    out
}

pub fn render_groups(result: &PartitionResult, summary: &GroupSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Groups: {}", summary.group_count);
    let _ = writeln!(out, "Average size: {:.1}", summary.average_size);
    let _ = writeln!(out, "Largest group: {}", summary.max_size);
    let _ = writeln!(out, "Smallest group: {}", summary.min_size);

    for (number, group) in result.iter_labeled() {
        let noun = if group.len() == 1 { "member" } else { "members" };
        let _ = writeln!(out, "\n{} ({} {})", group_label(number), group.len(), noun);
        for member in group {
            let _ = writeln!(out, "  {}", member);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::summary::{summarize_groups, summarize_members};
    use crate::domain::model::Attribute;

    fn member(name: &str, category: &str, age: i64) -> Member {
        Member {
            sequence_number: 0,
            name: name.to_string(),
            category: category.to_string(),
            attribute: Attribute::Integer(age),
        }
    }

    #[test]
    fn test_render_member_preview() {
        let members = vec![member("Alice", "F", 20), member("Bob", "M", 21)];
        let text = render_member_preview(&members, &summarize_members(&members));

        assert!(text.starts_with("Members: 2\n"));
        assert!(text.contains("  F: 1\n"));
        assert!(text.contains("  M: 1\n"));
        assert!(text.contains("  Alice (F, 20)\n"));
        assert!(text.contains("  Bob (M, 21)\n"));
    }

    #[test]
    fn test_render_groups() {
        let result = PartitionResult::new(vec![
            vec![member("Alice", "F", 20), member("Cara", "F", 22)],
            vec![member("Bob", "M", 21)],
        ]);
        let summary = summarize_groups(&result).unwrap();
        let text = render_groups(&result, &summary);

        assert!(text.contains("Groups: 2\n"));
        assert!(text.contains("Average size: 1.5\n"));
        assert!(text.contains("Group 1 (2 members)\n  Alice (F, 20)\n  Cara (F, 22)\n"));
        assert!(text.contains("Group 2 (1 member)\n  Bob (M, 21)\n"));
    }
}
