use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::SeedableRng;
use random_grouping::core::partition::GroupSizing;
use random_grouping::domain::ports::SheetCodec;
use random_grouping::{
    AnyCodec, Cell, CliConfig, CsvCodec, GroupingEngine, GroupingError, LocalStorage, Session,
    SheetFormat, XlsxCodec,
};
use tempfile::TempDir;

const ROSTER_CSV: &str = "No,Name,Gender,Age
1,Alice,F,20
2,Bob,M,21
3,Cara,F,22
4,Dan,,23
5,Eve,F,19
6,,M,30
7,Finn,M,
";

fn write_roster_xlsx(dir: &TempDir) -> String {
    let rows = vec![
        vec![
            Cell::from("No"),
            Cell::from("Name"),
            Cell::from("Gender"),
            Cell::from("Age"),
        ],
        vec![Cell::Int(1), Cell::from("Alice"), Cell::from("F"), Cell::Int(20)],
        vec![Cell::Int(2), Cell::from("Bob"), Cell::from("M"), Cell::Int(21)],
        vec![Cell::Int(3), Cell::from("Cara"), Cell::from("F"), Cell::Int(22)],
        vec![Cell::Int(4), Cell::from("Dan"), Cell::Empty, Cell::Int(23)],
    ];
    let bytes = XlsxCodec::new().encode("Students", &rows).unwrap();
    let path = dir.path().join("roster.xlsx");
    std::fs::write(&path, bytes).unwrap();
    path.to_str().unwrap().to_string()
}

#[tokio::test]
async fn test_end_to_end_csv_to_xlsx() {
    let temp_dir = TempDir::new().unwrap();
    let input_path = temp_dir.path().join("roster.csv");
    std::fs::write(&input_path, ROSTER_CSV).unwrap();
    let output_dir = temp_dir.path().join("output");

    let config = CliConfig {
        input: input_path.to_str().unwrap().to_string(),
        groups: Some("2".to_string()),
        group_size: None,
        output_path: output_dir.to_str().unwrap().to_string(),
        prefix: "class".to_string(),
        format: SheetFormat::Xlsx,
        sheet_name: "Groups".to_string(),
        seed: Some(42),
        json: false,
        log_json: false,
        verbose: false,
    };

    let engine = GroupingEngine::new(
        LocalStorage::current_dir(),
        AnyCodec::for_path(&config.input).unwrap(),
        AnyCodec::new(config.format),
    );
    let mut rng = StdRng::seed_from_u64(42);
    let report = engine.run(&config, &mut rng).await.unwrap();

    // 第 6 列沒有姓名被略過
    assert_eq!(report.member_summary.total, 6);
    assert_eq!(report.member_summary.per_category["unknown"], 1);
    assert_eq!(report.group_summary.group_count, 2);
    assert_eq!(report.group_summary.average_size, 3.0);
    assert_eq!(report.members[5].name, "Finn");

    let today = chrono::Utc::now().date_naive().format("%Y-%m-%d").to_string();
    assert!(report.output_path.ends_with(&format!("class_{}.xlsx", today)));

    let bytes = std::fs::read(&report.output_path).unwrap();
    let rows = XlsxCodec::new().decode(&bytes).unwrap();
    assert_eq!(rows.len(), 7);
    assert_eq!(rows[0][0], Cell::from("GroupLabel"));
    assert_eq!(rows[1][0], Cell::from("Group 1"));
    assert_eq!(rows[6][0], Cell::from("Group 2"));

    let finn = rows.iter().find(|row| row[1] == Cell::from("Finn")).unwrap();
    assert_eq!(finn[3], Cell::from("unknown"));
}

#[tokio::test]
async fn test_xlsx_upload_regroup_and_csv_export() {
    let temp_dir = TempDir::new().unwrap();
    let input_path = write_roster_xlsx(&temp_dir);

    let engine = GroupingEngine::new(
        LocalStorage::current_dir(),
        AnyCodec::new(SheetFormat::Xlsx),
        AnyCodec::new(SheetFormat::Csv),
    );
    let mut session = Session::new();
    let mut rng = StdRng::seed_from_u64(3);

    let summary = engine.upload(&mut session, &input_path).await.unwrap();
    assert_eq!(summary.total, 4);
    assert_eq!(session.members()[3].category, "unknown");
    assert_eq!(session.members()[0].sequence_number, 1);

    let groups = engine
        .regroup(&mut session, GroupSizing::Size(3), &mut rng)
        .unwrap();
    assert_eq!(groups.group_count, 2);
    assert_eq!(groups.max_size, 2);
    assert_eq!(groups.min_size, 2);

    let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
    let output_dir = temp_dir.path().join("out");
    let path = engine
        .export(&session, output_dir.to_str().unwrap(), "teams", "Groups", date)
        .await
        .unwrap();
    assert!(path.ends_with("teams_2025-06-01.csv"));

    let text = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "GroupLabel,Name,Category,Attribute");
    assert_eq!(lines.len(), 5);
}

#[tokio::test]
async fn test_header_only_file_is_empty_input() {
    let temp_dir = TempDir::new().unwrap();
    let input_path = temp_dir.path().join("empty.csv");
    std::fs::write(&input_path, "No,Name,Gender,Age\n").unwrap();

    let engine = GroupingEngine::new(LocalStorage::current_dir(), CsvCodec::new(), CsvCodec::new());
    let mut session = Session::new();

    let result = engine
        .upload(&mut session, input_path.to_str().unwrap())
        .await;
    assert!(matches!(result, Err(GroupingError::EmptyInputError { .. })));
    assert!(session.members().is_empty());
}

#[tokio::test]
async fn test_corrupt_workbook_is_decode_error_and_keeps_session() {
    let temp_dir = TempDir::new().unwrap();
    let good_path = write_roster_xlsx(&temp_dir);
    let bad_path = temp_dir.path().join("broken.xlsx");
    std::fs::write(&bad_path, b"PK\x03\x04 this is not really a zip").unwrap();

    let engine = GroupingEngine::new(LocalStorage::current_dir(), XlsxCodec::new(), XlsxCodec::new());
    let mut session = Session::new();
    engine.upload(&mut session, &good_path).await.unwrap();

    let result = engine
        .upload(&mut session, bad_path.to_str().unwrap())
        .await;
    assert!(matches!(result, Err(GroupingError::DecodeError { .. })));
    assert_eq!(session.members().len(), 4);
}

#[tokio::test]
async fn test_export_without_groups_is_no_groups() {
    let temp_dir = TempDir::new().unwrap();
    let input_path = write_roster_xlsx(&temp_dir);

    let engine = GroupingEngine::new(LocalStorage::current_dir(), XlsxCodec::new(), XlsxCodec::new());
    let mut session = Session::new();
    engine.upload(&mut session, &input_path).await.unwrap();

    let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
    let result = engine
        .export(&session, temp_dir.path().to_str().unwrap(), "teams", "Groups", date)
        .await;
    assert!(matches!(result, Err(GroupingError::NoGroupsError)));
}
