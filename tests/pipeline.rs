use std::io::Write;

use sha2::{Digest, Sha256};
use tempfile::NamedTempFile;
use whisky_catalog::catalog::{SortOrder, RANKING_LEN, TOP_ROUNDED_LEN};
use whisky_catalog::dataset::DataLoadError;
use whisky_catalog::html::HtmlRenderer;
use whisky_catalog::report::{Report, ReportError};
use whisky_catalog::taste::{TasteAttribute, MAX_SCORE, MIN_SCORE, TASTE_ATTRIBUTE_COUNT};

const HEADER: &str = "RowID,Distillery,Body,Sweetness,Smoky,Medicinal,Tobacco,Honey,Spicy,Winey,Nutty,Malty,Fruity,Floral,Postcode,Latitude,Longitude";

const ROWS: &str = "\
1,Alpha,4,4,4,4,4,4,4,4,4,4,4,4, AB38 9PJ,286580,749680
2,Bravo,0,0,0,0,0,0,0,0,0,0,0,0, PA42 7EB,138580,648370
3,Charlie,2,1,3,0,3,4,2,2,2,2,2,2, IV47 8SR,137560,829610
";

fn fixture() -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create fixture");
    writeln!(file, "{HEADER}").expect("write header");
    file.write_all(ROWS.as_bytes()).expect("write rows");
    file.flush().expect("flush fixture");
    file
}

fn names<'a>(records: impl IntoIterator<Item = &'a whisky_catalog::catalog::Distillery>) -> Vec<&'a str> {
    records.into_iter().map(|record| record.name()).collect()
}

fn table_digest(report: &Report) -> [u8; 32] {
    let mut table = Vec::new();
    report.catalog().write_csv(&mut table).expect("write table");
    Sha256::digest(&table).into()
}

#[test]
fn derives_metrics_for_every_row() {
    let file = fixture();
    let report = Report::load(file.path()).expect("pipeline succeeds");
    let catalog = report.catalog();
    assert_eq!(catalog.len(), 3);

    let alpha = &catalog.distilleries()[0];
    assert_eq!(alpha.overall_point(), 48.0);
    assert_eq!(alpha.flavor(), 12);
    assert_eq!(alpha.smoke_point(), Some(4.0));

    let bravo = &catalog.distilleries()[1];
    assert_eq!(bravo.overall_point(), 0.0);
    assert_eq!(bravo.flavor(), 0);
    assert_eq!(bravo.smoke_point(), Some(0.0));

    let charlie = &catalog.distilleries()[2];
    assert_eq!(charlie.overall_point(), 25.0);
    assert_eq!(charlie.flavor(), 3);
    assert_eq!(charlie.smoke_point(), Some(2.0));
    assert_eq!(charlie.latitude(), 137560.0);
}

#[test]
fn orderings_match_hand_computed_values() {
    let file = fixture();
    let report = Report::load(file.path()).expect("pipeline succeeds");
    let catalog = report.catalog();

    assert_eq!(
        names(catalog.sorted_by_overall(SortOrder::Ascending)),
        ["Bravo", "Charlie", "Alpha"]
    );
    assert_eq!(
        names(catalog.top_rounded(TOP_ROUNDED_LEN)),
        ["Alpha", "Charlie", "Bravo"]
    );
    assert_eq!(
        names(catalog.ranking(RANKING_LEN)),
        ["Alpha", "Charlie", "Bravo"]
    );

    let summary = catalog.character_summary();
    assert_eq!(summary.len(), TASTE_ATTRIBUTE_COUNT);
    assert_eq!(summary[0].attribute, TasteAttribute::Medicinal);
    assert_eq!(summary[TASTE_ATTRIBUTE_COUNT - 1].attribute, TasteAttribute::Honey);
    for entry in &summary {
        let mean = entry.mean.expect("every attribute has scores");
        assert!((MIN_SCORE..=MAX_SCORE).contains(&mean), "{entry:?}");
    }
}

#[test]
fn exported_table_keeps_original_columns() {
    let file = fixture();
    let report = Report::load(file.path()).expect("pipeline succeeds");

    let mut table = Vec::new();
    report.catalog().write_csv(&mut table).expect("write table");
    let table = String::from_utf8(table).expect("utf-8 table");
    let mut lines = table.lines();

    assert_eq!(
        lines.next(),
        Some(format!("{HEADER},OverallPoint,Flavor,SmokePoint").as_str())
    );
    assert_eq!(lines.next(), Some("1,Alpha,4,4,4,4,4,4,4,4,4,4,4,4,AB38 9PJ,286580,749680,48,12,4"));
    assert_eq!(lines.nth(1), Some("3,Charlie,2,1,3,0,3,4,2,2,2,2,2,2,IV47 8SR,137560,829610,25,3,2"));
}

#[test]
fn repeated_runs_produce_identical_tables() {
    let file = fixture();
    let first = Report::load(file.path()).expect("first run");
    let second = Report::load(file.path()).expect("second run");
    assert_eq!(table_digest(&first), table_digest(&second));
    assert_eq!(first, second);
}

#[test]
fn html_page_lists_every_chart_in_order() {
    let file = fixture();
    let report = Report::load(file.path()).expect("pipeline succeeds");
    let html = HtmlRenderer::default().render(report.page());

    assert!(html.contains("<h2>Whisky Catalog</h2>"));
    let positions: Vec<usize> = [
        "The Whisky Map",
        "Whisky Character\"",
        "Whisky Character 3",
        "Whisky Character 4",
        "Whisky Character 5",
    ]
    .iter()
    .map(|id| {
        html.find(&format!("<div class=\"chart\" id=\"{id}"))
            .unwrap_or_else(|| panic!("missing chart {id}"))
    })
    .collect();
    assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    assert!(html.contains(
        "So the best Smoke Whisky is Laphroig Best Rounded Whisky: Aberlour Best mixture: Talisker"
    ));
    assert!(!html.contains("<strong>"));
}

#[test]
fn missing_file_is_a_load_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = Report::load(dir.path().join("absent.csv")).unwrap_err();
    assert!(matches!(err, ReportError::Load(DataLoadError::Io(_))));
}
