use crate::core::export::to_export_rows;
use crate::core::ingest::ingest;
use crate::core::partition::{partition, GroupSizing};
use crate::core::summary::{summarize_groups, summarize_members};
use crate::domain::model::{GroupSummary, Member, MemberSummary, PartitionResult, Row};
use crate::utils::error::{GroupingError, Result};
use rand::Rng;

/// 目前的成員清單與分組結果。
///
/// 兩個欄位都只會整個替換，不會就地修改；任何失敗都不會改動既有狀態。
#[derive(Debug, Default)]
pub struct Session {
    members: Vec<Member>,
    groups: Option<PartitionResult>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// 匯入新檔案的資料列。成功時取代成員；分組結果保留到下一次分組。
    pub fn load_rows(&mut self, rows: &[Row]) -> Result<&[Member]> {
        let members = ingest(rows)?;
        self.members = members;
        Ok(&self.members)
    }

    pub fn regroup<R: Rng + ?Sized>(
        &mut self,
        sizing: GroupSizing,
        rng: &mut R,
    ) -> Result<&PartitionResult> {
        if self.members.is_empty() {
            return Err(GroupingError::NoDataError);
        }

        let group_count = sizing.group_count(self.members.len());
        let result = partition(&self.members, group_count, rng)?;
        let result: &PartitionResult = self.groups.insert(result);
        Ok(result)
    }

    pub fn export_rows(&self) -> Result<Vec<Row>> {
        let groups = self.groups.as_ref().ok_or(GroupingError::NoGroupsError)?;
        Ok(to_export_rows(groups))
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn groups(&self) -> Option<&PartitionResult> {
        self.groups.as_ref()
    }

    pub fn member_summary(&self) -> Result<MemberSummary> {
        if self.members.is_empty() {
            return Err(GroupingError::NoDataError);
        }
        Ok(summarize_members(&self.members))
    }

    pub fn group_summary(&self) -> Result<GroupSummary> {
        let groups = self.groups.as_ref().ok_or(GroupingError::NoGroupsError)?;
        summarize_groups(groups)
    }
}
