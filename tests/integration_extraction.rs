//! Integration tests for the extraction pipeline
//!
//! These tests write synthetic statement XML files to a temporary directory,
//! run the full pipeline through the public API and read the resulting
//! workbook back to check its contents.

use calamine::{Data, Reader, open_workbook_auto};
use statement_extractor::app::pipeline::discover_input_files;
use statement_extractor::cli::commands::classify::classify_files;
use statement_extractor::{Config, ReportKind, run_extraction};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const NAMESPACE: &str = "urn:schemas-microsoft-com:office:spreadsheet";

/// One cell: explicit 1-based column and text
fn cell(column: u32, text: &str) -> String {
    format!(
        "<Cell ss:Index=\"{}\"><Data ss:Type=\"String\">{}</Data></Cell>",
        column, text
    )
}

fn row(cells: &[(u32, &str)]) -> String {
    let cells: String = cells.iter().map(|(column, text)| cell(*column, text)).collect();
    format!("<Row>{}</Row>\n", cells)
}

fn worksheet(name: &str, rows: &[String]) -> String {
    format!(
        "<Worksheet ss:Name=\"{}\"><Table>\n{}</Table></Worksheet>\n",
        name,
        rows.concat()
    )
}

fn workbook(sheets: &[String]) -> String {
    format!(
        "<?xml version=\"1.0\"?>\n<Workbook xmlns=\"{ns}\" xmlns:ss=\"{ns}\">\n{}</Workbook>\n",
        sheets.concat(),
        ns = NAMESPACE
    )
}

fn header(company: &str) -> String {
    format!("2022 OF THE {} (NAIC #12345)", company)
}

/// State page of the exhibit of premiums and losses
fn premium_sheet(name: &str, state: &str, rows: &[String]) -> String {
    let number_row: Vec<(u32, String)> = (1..=9).map(|code| (7 + code, code.to_string())).collect();
    let number_row: Vec<(u32, &str)> = number_row
        .iter()
        .map(|(column, text)| (*column, text.as_str()))
        .collect();

    let mut all = vec![
        row(&[(2, &header("ACME INSURANCE CO"))]),
        row(&[(1, "EXHIBIT OF PREMIUMS AND LOSSES (Statutory Page 14)")]),
        row(&[(2, "DIRECT BUSINESS IN THE STATE OF"), (5, state)]),
        row(&number_row),
    ];
    all.extend_from_slice(rows);
    worksheet(name, &all)
}

/// Schedule P Part 1 page: earned premium, claim count and losses blocks
fn schedule_sheet(name: &str, title: &str) -> String {
    let mut rows = vec![
        row(&[(2, &header("ACME INSURANCE CO"))]),
        row(&[(1, "SCHEDULE P - PART 1 - SUMMARY")]),
        row(&[(1, title)]),
        row(&[(4, "1"), (10, "25"), (12, "26")]),
    ];

    for (column, base) in [(4u32, 1000u32), (10, 40), (12, 500)] {
        for offset in 0..12u32 {
            let label = match offset {
                0 => "Prior".to_string(),
                11 => "Total".to_string(),
                n => (2012 + n).to_string(),
            };
            let amount = format!("{}", base + offset);
            rows.push(row(&[(3, &label), (column, &amount)]));
        }
    }

    worksheet(name, &rows)
}

fn write_inputs(dir: &Path) {
    let first = workbook(&[
        worksheet("Cover", &[row(&[(1, "ANNUAL STATEMENT")])]),
        premium_sheet(
            "PG14 TX",
            "Texas",
            &[
                row(&[(2, "21.2"), (8, "1,000.00"), (9, "950"), (13, "100"), (16, "25")]),
                row(&[(2, "19.3")]),
                row(&[(8, "500"), (9, "480"), (13, "XXX")]),
            ],
        ),
        schedule_sheet("PG35 COMM'L AUTO L", "COMMERCIAL AUTO LIABILITY/MEDICAL"),
        schedule_sheet("PG33", "SUMMARY"),
    ]);

    let second = workbook(&[
        // Same key as the Texas 21.2 record in the first file
        premium_sheet(
            "PG14 TX",
            "TEXAS",
            &[row(&[(2, "21.2"), (8, "9999"), (9, "9999")])],
        ),
        premium_sheet(
            "PG14 OH",
            "OHIO",
            &[row(&[(2, "21.2"), (8, "(200)"), (9, "NA")])],
        ),
    ]);

    fs::write(dir.join("a_statement.xml"), first).unwrap();
    fs::write(dir.join("b_statement.xml"), second).unwrap();
    fs::write(dir.join("c_broken.xml"), "<Workbook><Worksheet>").unwrap();
    fs::write(dir.join("notes.txt"), "not a statement").unwrap();
}

fn config_for(input: &Path, output_file: &Path) -> Config {
    Config::default()
        .with_input_path(input)
        .with_output_file(output_file)
        .with_workers(2)
}

#[tokio::test]
async fn test_extraction_end_to_end() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write_inputs(input.path());
    let output_file = output.path().join("combined.xlsx");

    let summary = run_extraction(&config_for(input.path(), &output_file), None)
        .await
        .unwrap();

    assert_eq!(summary.files_found, 3);
    assert_eq!(summary.files_processed, 2);
    assert_eq!(summary.files_failed, 1);
    assert_eq!(summary.worksheets, 6);
    // Cover page and the summary schedule
    assert_eq!(summary.worksheets_skipped, 2);
    assert_eq!(summary.premium_records, 3);
    assert_eq!(summary.schedule_records, 12);
    assert_eq!(summary.duplicates_removed, 1);
    assert_eq!(summary.output_file.as_deref(), Some(output_file.as_path()));
    assert!(summary.wrote_output());

    let mut workbook = open_workbook_auto(&output_file).unwrap();
    assert_eq!(
        workbook.sheet_names().to_vec(),
        vec!["Premium Exhibit Data".to_string(), "Schedule Data".to_string()]
    );

    let premium = workbook.worksheet_range("Premium Exhibit Data").unwrap();
    assert_eq!(premium.get_size(), (4, 11));

    // Sorted by company, year, state, liability, LOB
    let value = |r: usize, c: usize| premium.get((r, c)).cloned();
    assert_eq!(value(1, 3), Some(Data::String("OHIO".to_string())));
    assert_eq!(value(1, 6), Some(Data::Float(-200.0)));
    assert!(matches!(value(1, 7), None | Some(Data::Empty)));

    assert_eq!(value(2, 3), Some(Data::String("TEXAS".to_string())));
    assert_eq!(value(2, 4), Some(Data::String("AL".to_string())));
    assert_eq!(value(2, 5), Some(Data::String("19.3".to_string())));
    assert_eq!(value(2, 6), Some(Data::Float(500.0)));
    assert_eq!(value(2, 8), Some(Data::Float(0.0)));

    // First occurrence wins: values come from the first file
    assert_eq!(value(3, 0), Some(Data::Float(2022.0)));
    assert_eq!(value(3, 1), Some(Data::String("ACME INSURANCE CO".to_string())));
    assert_eq!(value(3, 2), Some(Data::String("12345".to_string())));
    assert_eq!(value(3, 4), Some(Data::String("APD".to_string())));
    assert_eq!(value(3, 6), Some(Data::Float(1000.0)));
    assert_eq!(value(3, 8), Some(Data::Float(125.0)));
    assert_eq!(value(3, 9), Some(Data::Float(100.0)));
    assert_eq!(value(3, 10), Some(Data::Float(25.0)));

    let schedule = workbook.worksheet_range("Schedule Data").unwrap();
    assert_eq!(schedule.get_size(), (13, 8));
    assert_eq!(schedule.get((0, 4)), Some(&Data::String("YEAR".to_string())));
    assert_eq!(schedule.get((1, 3)), Some(&Data::String("AL".to_string())));
    // Year labels sort as text: "2013" first, "Prior" and "Total" last
    assert_eq!(schedule.get((1, 4)), Some(&Data::String("2013".to_string())));
    assert_eq!(schedule.get((1, 5)), Some(&Data::Float(1001.0)));
    assert_eq!(schedule.get((1, 6)), Some(&Data::Float(501.0)));
    assert_eq!(schedule.get((1, 7)), Some(&Data::Float(41.0)));
    assert_eq!(schedule.get((11, 4)), Some(&Data::String("Prior".to_string())));
    assert_eq!(schedule.get((12, 4)), Some(&Data::String("Total".to_string())));
}

#[tokio::test]
async fn test_dry_run_writes_nothing() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write_inputs(input.path());
    let output_file = output.path().join("combined.xlsx");

    let config = config_for(input.path(), &output_file).with_dry_run();
    let summary = run_extraction(&config, None).await.unwrap();

    assert_eq!(summary.premium_records, 3);
    assert_eq!(summary.schedule_records, 12);
    assert!(summary.dry_run);
    assert!(!summary.wrote_output());
    assert!(!output_file.exists());
}

#[tokio::test]
async fn test_single_worker_gives_same_result() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write_inputs(input.path());

    let parallel = config_for(input.path(), &output.path().join("parallel.xlsx")).with_workers(4);
    let serial = config_for(input.path(), &output.path().join("serial.xlsx")).with_workers(1);

    let parallel = run_extraction(&parallel, None).await.unwrap();
    let serial = run_extraction(&serial, None).await.unwrap();

    assert_eq!(parallel.premium_records, serial.premium_records);
    assert_eq!(parallel.schedule_records, serial.schedule_records);
    assert_eq!(parallel.duplicates_removed, serial.duplicates_removed);

    let read_gwp = |path: PathBuf| {
        let mut workbook = open_workbook_auto(path).unwrap();
        let range = workbook.worksheet_range("Premium Exhibit Data").unwrap();
        range.get((3, 6)).cloned()
    };
    assert_eq!(
        read_gwp(output.path().join("parallel.xlsx")),
        read_gwp(output.path().join("serial.xlsx"))
    );
}

#[tokio::test]
async fn test_default_output_name_in_created_directory() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write_inputs(input.path());
    let output_dir = output.path().join("reports");

    let config = Config::default()
        .with_input_path(input.path())
        .with_output_path(&output_dir);
    let summary = run_extraction(&config, None).await.unwrap();

    let written = summary.output_file.unwrap();
    assert!(written.exists());
    assert_eq!(written.parent(), Some(output_dir.as_path()));
    let name = written.file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("Combined_Output_"));
    assert!(name.ends_with(".xlsx"));
}

#[test]
fn test_classification_report_over_inputs() {
    let input = TempDir::new().unwrap();
    write_inputs(input.path());

    let config = Config::default().with_input_path(input.path());
    let files = discover_input_files(&config.processing).unwrap();
    let reports = classify_files(&files);

    assert_eq!(reports.len(), 3);
    assert_eq!(reports[0].worksheets.len(), 4);
    assert_eq!(reports[0].worksheets[0].report_kind, ReportKind::Unknown);
    assert_eq!(reports[0].worksheets[1].report_kind, ReportKind::PremiumExhibit);
    assert_eq!(reports[0].extracted_count(), 2);
    assert_eq!(reports[1].extracted_count(), 2);
    assert!(reports[2].error.is_some());
}
