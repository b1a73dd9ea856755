use crate::core::export::export_file_name;
use crate::core::partition::GroupSizing;
use crate::core::session::Session;
use crate::domain::model::{GroupSummary, Member, MemberSummary, PartitionResult};
use crate::domain::ports::{ConfigProvider, SheetCodec, Storage};
use crate::utils::error::{GroupingError, Result};
use chrono::NaiveDate;
use rand::Rng;
use serde::Serialize;
use std::path::Path;

/// 一次完整執行的結果
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub input_path: String,
    pub members: Vec<Member>,
    pub member_summary: MemberSummary,
    pub group_summary: GroupSummary,
    pub partition: PartitionResult,
    pub output_path: String,
}

pub struct GroupingEngine<S: Storage, K: SheetCodec> {
    storage: S,
    decoder: K,
    encoder: K,
}

impl<S: Storage, K: SheetCodec> GroupingEngine<S, K> {
    pub fn new(storage: S, decoder: K, encoder: K) -> Self {
        Self {
            storage,
            decoder,
            encoder,
        }
    }

    /// 上傳：讀檔、解碼、匯入成員。任何失敗都不會改動 session
    pub async fn upload(&self, session: &mut Session, path: &str) -> Result<MemberSummary> {
        tracing::info!("📥 Loading members from: {}", path);

        let bytes = self.storage.read_file(path).await?;
        tracing::debug!("Read {} bytes", bytes.len());

        let rows = self.decoder.decode(&bytes)?;
        let members = session.load_rows(&rows)?;
        tracing::info!(
            "✅ Loaded {} members from {} rows",
            members.len(),
            rows.len().saturating_sub(1)
        );

        session.member_summary()
    }

    pub fn regroup<R: Rng + ?Sized>(
        &self,
        session: &mut Session,
        sizing: GroupSizing,
        rng: &mut R,
    ) -> Result<GroupSummary> {
        tracing::info!("🎲 Grouping with {:?}", sizing);

        let result = session.regroup(sizing, rng)?;
        tracing::info!("✅ Generated {} groups", result.len());

        session.group_summary()
    }

    /// 匯出：寫入 `<output_dir>/<prefix>_<date>.<ext>`，回傳寫入的路徑
    pub async fn export(
        &self,
        session: &Session,
        output_dir: &str,
        prefix: &str,
        sheet_name: &str,
        date: NaiveDate,
    ) -> Result<String> {
        let rows = session.export_rows()?;
        let file_name = export_file_name(prefix, date, self.encoder.extension());
        let output_path = Path::new(output_dir).join(&file_name);
        let output_path = output_path.to_str().ok_or_else(|| GroupingError::ConfigError {
            message: format!("output path is not valid UTF-8: {}", output_path.display()),
        })?;

        tracing::info!("📤 Exporting {} rows", rows.len().saturating_sub(1));
        let data = self.encoder.encode(sheet_name, &rows)?;
        tracing::debug!("Encoded {} bytes as {}", data.len(), self.encoder.format());

        self.storage.write_file(output_path, &data).await?;
        tracing::info!("📁 Saved groups to: {}", output_path);

        Ok(output_path.to_string())
    }

    /// 依設定跑完整流程：上傳、分組、匯出
    pub async fn run<C: ConfigProvider, R: Rng + ?Sized>(
        &self,
        config: &C,
        rng: &mut R,
    ) -> Result<RunReport> {
        let sizing = config.sizing()?;
        let mut session = Session::new();

        let member_summary = self.upload(&mut session, config.input_path()).await?;
        let group_summary = self.regroup(&mut session, sizing, rng)?;

        let today = chrono::Utc::now().date_naive();
        let output_path = self
            .export(
                &session,
                config.output_path(),
                config.export_prefix(),
                config.sheet_name(),
                today,
            )
            .await?;

        let partition = session.groups().cloned().ok_or(GroupingError::NoGroupsError)?;

        Ok(RunReport {
            input_path: config.input_path().to_string(),
            members: session.members().to_vec(),
            member_summary,
            group_summary,
            partition,
            output_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::CsvCodec;
    use crate::domain::model::SheetFormat;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn put_file(&self, path: &str, data: &[u8]) {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                GroupingError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct MockConfig {
        input_path: String,
        sizing: Option<GroupSizing>,
    }

    impl ConfigProvider for MockConfig {
        fn input_path(&self) -> &str {
            &self.input_path
        }

        fn output_path(&self) -> &str {
            "out"
        }

        fn export_prefix(&self) -> &str {
            "test_groups"
        }

        fn sheet_name(&self) -> &str {
            "Groups"
        }

        fn output_format(&self) -> SheetFormat {
            SheetFormat::Csv
        }

        fn sizing(&self) -> Result<GroupSizing> {
            self.sizing.ok_or_else(|| GroupingError::InvalidGroupCountError {
                field: "group count".to_string(),
                value: String::new(),
                reason: "value is missing".to_string(),
            })
        }

        fn seed(&self) -> Option<u64> {
            Some(11)
        }
    }

    const ROSTER: &str = "No,Name,Gender,Age\n1,Alice,F,20\n2,Bob,M,21\n3,Cara,F,22\n4,Dan,,23\n5,Eve,F,19\n";

    fn engine(storage: MockStorage) -> GroupingEngine<MockStorage, CsvCodec> {
        GroupingEngine::new(storage, CsvCodec::new(), CsvCodec::new())
    }

    #[tokio::test]
    async fn test_upload_summarizes_members() {
        let storage = MockStorage::new();
        storage.put_file("roster.csv", ROSTER.as_bytes()).await;

        let mut session = Session::new();
        let summary = engine(storage)
            .upload(&mut session, "roster.csv")
            .await
            .unwrap();

        assert_eq!(summary.total, 5);
        assert_eq!(summary.per_category["F"], 3);
        assert_eq!(summary.per_category["unknown"], 1);
    }

    #[tokio::test]
    async fn test_upload_missing_file_keeps_session() {
        let storage = MockStorage::new();
        storage.put_file("roster.csv", ROSTER.as_bytes()).await;
        let engine = engine(storage);

        let mut session = Session::new();
        engine.upload(&mut session, "roster.csv").await.unwrap();

        let result = engine.upload(&mut session, "missing.csv").await;
        assert!(matches!(result, Err(GroupingError::IoError(_))));
        assert_eq!(session.members().len(), 5);
    }

    #[tokio::test]
    async fn test_export_before_regroup_is_no_groups() {
        let storage = MockStorage::new();
        storage.put_file("roster.csv", ROSTER.as_bytes()).await;
        let engine = engine(storage);

        let mut session = Session::new();
        engine.upload(&mut session, "roster.csv").await.unwrap();

        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let result = engine.export(&session, "out", "g", "Groups", date).await;
        assert!(matches!(result, Err(GroupingError::NoGroupsError)));
    }

    #[tokio::test]
    async fn test_regroup_and_export_writes_dated_file() {
        let storage = MockStorage::new();
        storage.put_file("roster.csv", ROSTER.as_bytes()).await;
        let engine = engine(storage.clone());
        let mut rng = StdRng::seed_from_u64(8);

        let mut session = Session::new();
        engine.upload(&mut session, "roster.csv").await.unwrap();
        let summary = engine
            .regroup(&mut session, GroupSizing::Size(2), &mut rng)
            .unwrap();
        assert_eq!(summary.group_count, 3);
        assert_eq!(summary.average_size, 1.7);

        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let path = engine
            .export(&session, "out", "class", "Groups", date)
            .await
            .unwrap();
        assert_eq!(path, Path::new("out").join("class_2024-01-02.csv").to_str().unwrap());

        let written = String::from_utf8(storage.get_file(&path).await.unwrap()).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines[0], "GroupLabel,Name,Category,Attribute");
        assert_eq!(lines.len(), 6);
        assert!(lines[1].starts_with("Group 1,"));
    }

    #[tokio::test]
    async fn test_run_with_invalid_sizing_reads_nothing() {
        let storage = MockStorage::new();
        let config = MockConfig {
            input_path: "missing.csv".to_string(),
            sizing: None,
        };
        let mut rng = StdRng::seed_from_u64(1);

        let result = engine(storage).run(&config, &mut rng).await;
        assert!(matches!(
            result,
            Err(GroupingError::InvalidGroupCountError { .. })
        ));
    }

    #[tokio::test]
    async fn test_run_produces_report() {
        let storage = MockStorage::new();
        storage.put_file("roster.csv", ROSTER.as_bytes()).await;
        let config = MockConfig {
            input_path: "roster.csv".to_string(),
            sizing: Some(GroupSizing::Count(2)),
        };
        let mut rng = StdRng::seed_from_u64(config.seed().unwrap());

        let report = engine(storage.clone()).run(&config, &mut rng).await.unwrap();

        assert_eq!(report.member_summary.total, 5);
        assert_eq!(report.members[0].name, "Alice");
        assert_eq!(report.group_summary.group_count, 2);
        assert_eq!(report.partition.member_count(), 5);
        assert!(report.output_path.ends_with(".csv"));
        assert!(storage.get_file(&report.output_path).await.is_some());
    }
}
