//! Builders for the five dashboard charts.
//!
//! Every builder reads the enriched catalog (or a fixed table) and nothing
//! else, so they can run in any order.

use crate::catalog::{CharacterMean, Catalog, Distillery, SortOrder, RANKING_LEN, TOP_ROUNDED_LEN};
use crate::chart::{
    BarPlot, ChartSpec, ColorEncoding, NumericSeries, PiePlot, Plot, PolarPlot, PolarSeries,
    ScatterPlot, SizeEncoding,
};
use crate::dataset::{LATITUDE_COLUMN, LONGITUDE_COLUMN, NAME_COLUMN};
use crate::metrics::{FLAVOR_COLUMN, OVERALL_POINT_COLUMN, SMOKE_POINT_COLUMN};
use crate::palette::{INFERNO, PLASMA, YL_OR_BR};
use crate::profiles::{FeaturedProfile, PROFILE_COLUMNS};
use crate::taste::TasteAttribute;

pub const MAP_ID: &str = "The Whisky Map";
pub const TOP_ROUNDED_ID: &str = "Whisky Character";
pub const CHARACTER_ID: &str = "Whisky Character 3";
pub const SMOKE_ID: &str = "Whisky Character 4";
pub const PROFILES_ID: &str = "Whisky Character 5";

/// Marker diameter used when a chart does not ask for a specific one.
const DEFAULT_MAX_DIAMETER: f64 = 20.0;

/// Marker diameter of the smoke scatter.
const SMOKE_MAX_DIAMETER: f64 = 60.0;

const MAP_SIZE_PX: u32 = 600;

fn column<'a, F>(label: &str, records: &[&'a Distillery], value: F) -> NumericSeries
where
    F: Fn(&'a Distillery) -> Option<f64>,
{
    NumericSeries::new(label, records.iter().map(|record| value(*record)))
}

fn names(records: &[&Distillery]) -> Vec<String> {
    records.iter().map(|record| record.name().to_owned()).collect()
}

fn overall(record: &Distillery) -> Option<f64> {
    Some(record.overall_point())
}

fn flavor(record: &Distillery) -> Option<f64> {
    Some(f64::from(record.flavor()))
}

/// Distilleries placed by coordinates; marker size follows the overall point
/// and colour the strong-flavour count.
pub fn geographic_map(catalog: &Catalog) -> ChartSpec {
    let records = catalog.sorted_by_overall(SortOrder::Ascending);

    let plot = ScatterPlot {
        x: column(LONGITUDE_COLUMN, &records, |r| Some(r.longitude())),
        y: column(LATITUDE_COLUMN, &records, |r| Some(r.latitude())),
        size: SizeEncoding {
            series: column(OVERALL_POINT_COLUMN, &records, overall),
            max_diameter: DEFAULT_MAX_DIAMETER,
        },
        color: ColorEncoding {
            series: column(FLAVOR_COLUMN, &records, flavor),
            scale: YL_OR_BR,
        },
        labels: names(&records),
    };

    ChartSpec::new(
        MAP_ID,
        "Geographic location of Whisky Distillery",
        Plot::Scatter(plot),
    )
    .with_size(MAP_SIZE_PX, MAP_SIZE_PX)
}

/// The ten best rounded distilleries by overall point.
pub fn top_rounded_bar(catalog: &Catalog) -> ChartSpec {
    let records = catalog.top_rounded(TOP_ROUNDED_LEN);

    let plot = BarPlot {
        category_label: NAME_COLUMN.to_owned(),
        categories: names(&records),
        values: column(OVERALL_POINT_COLUMN, &records, overall),
        color: ColorEncoding {
            series: column(OVERALL_POINT_COLUMN, &records, overall),
            scale: PLASMA,
        },
        hover: vec![
            column(TasteAttribute::Sweetness.name(), &records, |r| {
                r.score(TasteAttribute::Sweetness)
            }),
            column(TasteAttribute::Smoky.name(), &records, |r| {
                r.score(TasteAttribute::Smoky)
            }),
        ],
    };

    ChartSpec::new(TOP_ROUNDED_ID, "Top well rounded Scotch Whisky", Plot::Bar(plot))
}

/// Share of each taste attribute in the average profile.
pub fn character_proportion(summary: &[CharacterMean]) -> ChartSpec {
    let plot = PiePlot {
        label_title: "character".to_owned(),
        labels: summary
            .iter()
            .map(|row| row.attribute.name().to_owned())
            .collect(),
        values: NumericSeries::new("points", summary.iter().map(|row| row.mean)),
        palette: INFERNO,
    };

    ChartSpec::new(CHARACTER_ID, "Whisky Characteristic", Plot::Pie(plot))
}

/// Smoke point against overall point for the ranking subset.
pub fn smoke_vs_rounded(catalog: &Catalog) -> ChartSpec {
    let records = catalog.ranking(RANKING_LEN);

    let plot = ScatterPlot {
        x: column(OVERALL_POINT_COLUMN, &records, overall),
        y: column(SMOKE_POINT_COLUMN, &records, |r| r.smoke_point()),
        size: SizeEncoding {
            series: column(FLAVOR_COLUMN, &records, flavor),
            max_diameter: SMOKE_MAX_DIAMETER,
        },
        color: ColorEncoding {
            series: column(TasteAttribute::Smoky.name(), &records, |r| {
                r.score(TasteAttribute::Smoky)
            }),
            scale: YL_OR_BR,
        },
        labels: names(&records),
    };

    ChartSpec::new(SMOKE_ID, "Smoke vs Well-rounded Flavor", Plot::Scatter(plot))
}

/// Side-by-side radial view of the featured profiles.
pub fn profile_comparison(profiles: &[FeaturedProfile]) -> ChartSpec {
    let plot = PolarPlot {
        axis: TasteAttribute::names(),
        columns: PROFILE_COLUMNS,
        series: profiles
            .iter()
            .map(|profile| PolarSeries {
                name: profile.name.to_owned(),
                values: profile.scores.iter().map(|score| f64::from(*score)).collect(),
                fill: profile.fill,
                column: profile.column,
            })
            .collect(),
    };

    ChartSpec::new(
        PROFILES_ID,
        "Closer look at the taste of our top 3 choice",
        Plot::Polar(plot),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;
    use crate::metrics;
    use crate::profiles::FEATURED_PROFILES;

    const TABLE: &str = "\
Distillery,Body,Sweetness,Smoky,Medicinal,Tobacco,Honey,Spicy,Winey,Nutty,Malty,Fruity,Floral,Latitude,Longitude
Aberlour,3,3,1,0,0,4,3,2,2,3,3,2,241590,842780
Laphroig,4,2,4,4,1,0,0,1,1,1,0,0,138680,645290
Talisker,4,2,3,3,0,1,3,0,1,2,2,0,137340,831620
Glenkinchie,1,2,1,0,0,1,1,1,1,2,2,2,344370,667900";

    fn catalog() -> Catalog {
        let dataset = Dataset::from_reader(TABLE.as_bytes()).expect("load succeeds");
        metrics::derive(&dataset).expect("derive succeeds")
    }

    #[test]
    fn map_is_sorted_ascending_and_fixed_size() {
        let chart = geographic_map(&catalog());
        assert_eq!(chart.width(), Some(600));
        assert_eq!(chart.height(), Some(600));
        let Plot::Scatter(plot) = chart.plot() else {
            panic!("map should be a scatter plot");
        };
        assert_eq!(plot.labels, ["Glenkinchie", "Laphroig", "Talisker", "Aberlour"]);
        assert_eq!(plot.x.label, "Longitude");
        assert_eq!(plot.size.series.values[0], Some(14.0));
        assert_eq!(plot.color.series.values[3], Some(6.0));
    }

    #[test]
    fn bar_lists_best_rounded_first_with_hover_columns() {
        let chart = top_rounded_bar(&catalog());
        let Plot::Bar(plot) = chart.plot() else {
            panic!("top rounded should be a bar chart");
        };
        assert_eq!(plot.categories, ["Aberlour", "Talisker", "Laphroig", "Glenkinchie"]);
        assert_eq!(plot.hover.len(), 2);
        assert_eq!(plot.hover[1].label, "Smoky");
        assert_eq!(plot.hover[1].values[0], Some(1.0));
    }

    #[test]
    fn pie_has_a_slice_per_attribute() {
        let chart = character_proportion(&catalog().character_summary());
        let Plot::Pie(plot) = chart.plot() else {
            panic!("character chart should be a pie");
        };
        assert_eq!(plot.labels.len(), 12);
        assert_eq!(plot.labels.first().map(String::as_str), Some("Tobacco"));
    }

    #[test]
    fn smoke_scatter_uses_ranking_order() {
        let chart = smoke_vs_rounded(&catalog());
        let Plot::Scatter(plot) = chart.plot() else {
            panic!("smoke chart should be a scatter plot");
        };
        assert_eq!(plot.labels, ["Aberlour", "Talisker", "Laphroig", "Glenkinchie"]);
        assert_eq!(plot.size.max_diameter, 60.0);
        assert_eq!(plot.color.series.label, "Smoky");
    }

    #[test]
    fn profile_comparison_is_independent_of_the_catalog() {
        let chart = profile_comparison(&FEATURED_PROFILES);
        let Plot::Polar(plot) = chart.plot() else {
            panic!("profile chart should be polar");
        };
        assert_eq!(plot.axis.len(), 12);
        assert_eq!(plot.series.len(), 3);
        let laphroig = &plot.series[1];
        assert_eq!(laphroig.name, "Laphroig");
        assert_eq!(laphroig.column, 1);
        assert_eq!(laphroig.values[3], 4.0);
    }
}
