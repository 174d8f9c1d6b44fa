//! The enriched, read-only distillery table and the slices charts are built from.

use std::cmp::Ordering;
use std::io;

use csv::{StringRecord, WriterBuilder};

use crate::dataset::LoadedRow;
use crate::metrics::{self, DerivedMetrics, FLAVOR_COLUMN, OVERALL_POINT_COLUMN, SMOKE_POINT_COLUMN};
use crate::taste::{TasteAttribute, TasteScores};

/// Number of records shown by the top well-rounded bar chart.
pub const TOP_ROUNDED_LEN: usize = 10;

/// Number of records in the ranking subset.
pub const RANKING_LEN: usize = 50;

/// One distillery's tasting profile together with its derived metrics.
#[derive(Clone, Debug, PartialEq)]
pub struct Distillery {
    name: String,
    latitude: f64,
    longitude: f64,
    scores: TasteScores,
    metrics: DerivedMetrics,
    fields: StringRecord,
}

impl Distillery {
    pub(crate) fn new(row: &LoadedRow, scores: TasteScores, metrics: DerivedMetrics) -> Self {
        Self {
            name: row.name().to_owned(),
            latitude: row.latitude(),
            longitude: row.longitude(),
            scores,
            metrics,
            fields: row.fields().clone(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn score(&self, attribute: TasteAttribute) -> Option<f64> {
        self.scores.get(attribute)
    }

    pub fn overall_point(&self) -> f64 {
        self.metrics.overall_point()
    }

    pub fn flavor(&self) -> u32 {
        self.metrics.flavor()
    }

    pub fn smoke_point(&self) -> Option<f64> {
        self.metrics.smoke_point()
    }
}

/// Direction used when ordering records.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Mean score of one taste attribute across the catalog.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CharacterMean {
    pub attribute: TasteAttribute,
    /// `None` when no record carries a numeric score for the attribute.
    pub mean: Option<f64>,
}

/// Enriched distillery table.
///
/// Built once by [`metrics::derive`] and never modified afterwards; every
/// query below returns a new ordering of borrowed records.
#[derive(Clone, Debug, PartialEq)]
pub struct Catalog {
    headers: StringRecord,
    distilleries: Vec<Distillery>,
}

impl Catalog {
    pub(crate) fn new(headers: StringRecord, distilleries: Vec<Distillery>) -> Self {
        Self {
            headers,
            distilleries,
        }
    }

    /// Original header row of the input.
    pub fn headers(&self) -> &StringRecord {
        &self.headers
    }

    /// Records in input order.
    pub fn distilleries(&self) -> &[Distillery] {
        &self.distilleries
    }

    pub fn len(&self) -> usize {
        self.distilleries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distilleries.is_empty()
    }

    /// All records ordered by overall point; ties keep input order.
    pub fn sorted_by_overall(&self, order: SortOrder) -> Vec<&Distillery> {
        let mut sorted: Vec<&Distillery> = self.distilleries.iter().collect();
        sorted.sort_by(|a, b| {
            let ordering = a.overall_point().total_cmp(&b.overall_point());
            match order {
                SortOrder::Ascending => ordering,
                SortOrder::Descending => ordering.reverse(),
            }
        });
        sorted
    }

    /// The `limit` records with the highest overall point.
    pub fn top_rounded(&self, limit: usize) -> Vec<&Distillery> {
        let mut sorted = self.sorted_by_overall(SortOrder::Descending);
        sorted.truncate(limit);
        sorted
    }

    /// The `limit` records with the highest overall point, ties broken by the
    /// higher smoke point. Records without a smoke point sort after those
    /// with one.
    pub fn ranking(&self, limit: usize) -> Vec<&Distillery> {
        let mut sorted: Vec<&Distillery> = self.distilleries.iter().collect();
        sorted.sort_by(|a, b| {
            b.overall_point()
                .total_cmp(&a.overall_point())
                .then_with(|| descending_missing_last(a.smoke_point(), b.smoke_point()))
        });
        sorted.truncate(limit);
        sorted
    }

    /// Mean of every taste attribute, ordered by ascending mean.
    ///
    /// Always holds one entry per attribute; attributes without any numeric
    /// score sort last.
    pub fn character_summary(&self) -> Vec<CharacterMean> {
        let mut summary: Vec<CharacterMean> = TasteAttribute::ALL
            .iter()
            .map(|attribute| CharacterMean {
                attribute: *attribute,
                mean: metrics::mean(
                    self.distilleries
                        .iter()
                        .filter_map(|distillery| distillery.score(*attribute)),
                ),
            })
            .collect();
        summary.sort_by(|a, b| match (a.mean, b.mean) {
            (Some(a), Some(b)) => a.total_cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });
        summary
    }

    /// Writes the table as CSV: the original columns followed by the derived ones.
    pub fn write_csv<W: io::Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut writer = WriterBuilder::new().from_writer(writer);

        let mut header = self.headers.clone();
        header.push_field(OVERALL_POINT_COLUMN);
        header.push_field(FLAVOR_COLUMN);
        header.push_field(SMOKE_POINT_COLUMN);
        writer.write_record(&header)?;

        for distillery in &self.distilleries {
            let mut record = distillery.fields.clone();
            record.push_field(&distillery.overall_point().to_string());
            record.push_field(&distillery.flavor().to_string());
            record.push_field(
                &distillery
                    .smoke_point()
                    .map(|value| value.to_string())
                    .unwrap_or_default(),
            );
            writer.write_record(&record)?;
        }

        writer.flush()?;
        Ok(())
    }
}

fn descending_missing_last(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.total_cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;
    use crate::taste::{MAX_SCORE, MIN_SCORE};

    const HEADER: &str = "Distillery,Body,Sweetness,Smoky,Medicinal,Tobacco,Honey,Spicy,Winey,Nutty,Malty,Fruity,Floral,Latitude,Longitude";

    fn catalog(rows: &[&str]) -> Catalog {
        let mut text = String::from(HEADER);
        for row in rows {
            text.push('\n');
            text.push_str(row);
        }
        let dataset = Dataset::from_reader(text.as_bytes()).expect("load succeeds");
        metrics::derive(&dataset).expect("derive succeeds")
    }

    fn names(records: &[&Distillery]) -> Vec<String> {
        records.iter().map(|d| d.name().to_owned()).collect()
    }

    #[test]
    fn ranking_breaks_ties_by_smoke_point() {
        let catalog = catalog(&[
            "Mild,1,1,1,1,1,1,1,1,1,1,1,1,0,0",
            "Sweet,1,2,1,1,1,2,1,1,1,1,1,1,0,0",
            "Smoky,1,1,4,1,1,1,1,1,1,1,1,0,0,0",
            "Big,4,4,4,4,4,4,4,4,4,4,4,4,0,0",
        ]);
        assert_eq!(names(&catalog.ranking(RANKING_LEN)), ["Big", "Smoky", "Sweet", "Mild"]);
    }

    #[test]
    fn ranking_puts_missing_smoke_point_last_on_ties() {
        let catalog = catalog(&[
            "NoSmoke,,,,4,4,4,4,4,4,4,4,4,0,0",
            "Lean,0,0,0,4,4,4,4,4,4,4,4,4,0,0",
            "Smoky,4,4,4,4,4,4,4,4,4,0,0,0,0,0",
        ]);
        assert_eq!(catalog.distilleries()[0].smoke_point(), None);
        assert_eq!(names(&catalog.ranking(RANKING_LEN)), ["Smoky", "Lean", "NoSmoke"]);
    }

    #[test]
    fn top_rounded_keeps_input_order_for_ties() {
        let catalog = catalog(&[
            "A,2,2,2,2,2,2,2,2,2,2,2,2,0,0",
            "B,2,2,2,2,2,2,2,2,2,2,2,2,0,0",
            "C,3,2,2,2,2,2,2,2,2,2,2,2,0,0",
        ]);
        assert_eq!(names(&catalog.top_rounded(2)), ["C", "A"]);
        assert_eq!(
            names(&catalog.sorted_by_overall(SortOrder::Ascending)),
            ["A", "B", "C"]
        );
    }

    #[test]
    fn subsets_never_exceed_their_limits() {
        let rows: Vec<String> = (0..60)
            .map(|i| format!("D{i},{},1,1,1,1,1,1,1,1,1,1,1,0,0", i % 5))
            .collect();
        let refs: Vec<&str> = rows.iter().map(String::as_str).collect();
        let catalog = catalog(&refs);

        let top = catalog.top_rounded(TOP_ROUNDED_LEN);
        assert_eq!(top.len(), TOP_ROUNDED_LEN);
        assert!(top
            .windows(2)
            .all(|pair| pair[0].overall_point() >= pair[1].overall_point()));
        assert_eq!(catalog.ranking(RANKING_LEN).len(), RANKING_LEN);
    }

    #[test]
    fn character_summary_has_one_bounded_row_per_attribute() {
        let catalog = catalog(&[
            "A,0,1,2,3,4,0,1,2,3,4,0,1,0,0",
            "B,4,3,2,1,0,4,3,2,1,0,4,3,0,0",
            "C,0,0,0,0,0,0,0,0,0,0,0,4,0,0",
        ]);
        let summary = catalog.character_summary();
        assert_eq!(summary.len(), 12);
        for row in &summary {
            let mean = row.mean.expect("every attribute has scores");
            assert!((MIN_SCORE..=MAX_SCORE).contains(&mean));
        }
        assert!(summary
            .windows(2)
            .all(|pair| pair[0].mean <= pair[1].mean));
        let strongest = summary.last().expect("summary is not empty");
        assert_eq!(strongest.attribute, TasteAttribute::Floral);
        assert_eq!(strongest.mean, Some(8.0 / 3.0));
    }

    #[test]
    fn character_summary_puts_unscored_attributes_last() {
        let catalog = catalog(&["A,1,1,1,1,1,1,1,1,1,1,1,,0,0"]);
        let summary = catalog.character_summary();
        assert_eq!(summary.last().map(|row| row.attribute), Some(TasteAttribute::Floral));
        assert_eq!(summary.last().and_then(|row| row.mean), None);
    }

    #[test]
    fn csv_export_appends_derived_columns() {
        let catalog = catalog(&["A,1,2,3,0,0,0,0,0,0,0,0,4,10.5,-3"]);
        let mut buffer = Vec::new();
        catalog.write_csv(&mut buffer).expect("write succeeds");
        let text = String::from_utf8(buffer).expect("utf-8 output");
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some(format!("{HEADER},OverallPoint,Flavor,SmokePoint").as_str())
        );
        assert_eq!(lines.next(), Some("A,1,2,3,0,0,0,0,0,0,0,0,4,10.5,-3,10,2,2"));
    }
}
