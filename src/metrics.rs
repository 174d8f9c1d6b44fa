//! Per-record metrics derived from the taste scores.

use std::fmt;

use csv::StringRecord;
use log::debug;

use crate::catalog::{Catalog, Distillery};
use crate::dataset::Dataset;
use crate::taste::{TasteAttribute, TasteScores, TASTE_ATTRIBUTE_COUNT};

/// Header of the derived overall score column.
pub const OVERALL_POINT_COLUMN: &str = "OverallPoint";

/// Header of the derived strong-flavour count column.
pub const FLAVOR_COLUMN: &str = "Flavor";

/// Header of the derived smoke score column.
pub const SMOKE_POINT_COLUMN: &str = "SmokePoint";

/// Errors raised while locating the taste range.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DerivationError {
    /// A taste column is absent from the header row.
    MissingTasteColumn(TasteAttribute),
    /// The `Body`..`Floral` range does not hold the twelve attributes in order.
    UnexpectedTasteLayout {
        /// Attribute expected at this position.
        expected: TasteAttribute,
        /// Header actually found there.
        found: String,
    },
}

impl fmt::Display for DerivationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingTasteColumn(attribute) => {
                write!(f, "Taste column `{attribute}` is missing")
            }
            Self::UnexpectedTasteLayout { expected, found } => write!(
                f,
                "Expected taste column `{expected}` but found `{found}`"
            ),
        }
    }
}

impl std::error::Error for DerivationError {}

/// Location of the contiguous taste range inside the header row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TasteColumns {
    start: usize,
}

impl TasteColumns {
    /// Finds `Body` and `Floral` and checks that exactly the twelve attributes
    /// sit between them, in column order.
    pub fn locate(headers: &StringRecord) -> Result<Self, DerivationError> {
        let position = |attribute: TasteAttribute| {
            headers
                .iter()
                .position(|header| header == attribute.name())
                .ok_or(DerivationError::MissingTasteColumn(attribute))
        };

        let start = position(TasteAttribute::Body)?;

        for attribute in TasteAttribute::ALL {
            let found = headers.get(start + attribute.index()).unwrap_or_default();
            if found != attribute.name() {
                // An attribute absent from the whole header is reported as missing.
                position(attribute)?;
                return Err(DerivationError::UnexpectedTasteLayout {
                    expected: attribute,
                    found: found.to_owned(),
                });
            }
        }

        Ok(Self { start })
    }

    /// Index of the `Body` column.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Parses the taste cells of `fields`; empty or non-numeric cells become `None`.
    pub fn scores(&self, fields: &StringRecord) -> TasteScores {
        let mut cells = [None; TASTE_ATTRIBUTE_COUNT];
        for (offset, cell) in cells.iter_mut().enumerate() {
            *cell = fields
                .get(self.start + offset)
                .and_then(|raw| raw.trim().parse::<f64>().ok())
                .filter(|value| value.is_finite());
        }
        TasteScores::new(cells)
    }
}

/// Metrics appended to every record during derivation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DerivedMetrics {
    overall_point: f64,
    flavor: u32,
    smoke_point: Option<f64>,
}

impl DerivedMetrics {
    /// Computes all metrics for one set of scores.
    pub fn from_scores(scores: &TasteScores) -> Self {
        Self {
            overall_point: overall_point(scores),
            flavor: flavor(scores),
            smoke_point: smoke_point(scores),
        }
    }

    /// Sum of all numeric taste scores.
    pub fn overall_point(&self) -> f64 {
        self.overall_point
    }

    /// Number of taste scores equal to 3 or 4.
    pub fn flavor(&self) -> u32 {
        self.flavor
    }

    /// Mean of the numeric Body, Sweetness and Smoky scores.
    pub fn smoke_point(&self) -> Option<f64> {
        self.smoke_point
    }
}

/// Sum of the numeric scores; zero when none is numeric.
pub fn overall_point(scores: &TasteScores) -> f64 {
    scores.numeric().sum()
}

/// Count of scores that signal a strong presence.
pub fn flavor(scores: &TasteScores) -> u32 {
    scores
        .numeric()
        .filter(|score| *score == 3.0 || *score == 4.0)
        .count() as u32
}

/// Mean of the numeric smoke attributes, `None` when all three are missing.
pub fn smoke_point(scores: &TasteScores) -> Option<f64> {
    mean(TasteAttribute::SMOKE.iter().filter_map(|attr| scores.get(*attr)))
}

pub(crate) fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), value| (sum + value, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// Enriches every loaded row with its derived metrics.
pub fn derive(dataset: &Dataset) -> Result<Catalog, DerivationError> {
    let columns = TasteColumns::locate(dataset.headers())?;

    let distilleries = dataset
        .rows()
        .iter()
        .map(|row| {
            let scores = columns.scores(row.fields());
            Distillery::new(row, scores, DerivedMetrics::from_scores(&scores))
        })
        .collect::<Vec<_>>();

    debug!(
        "derived metrics for {} distilleries (taste range starts at column {})",
        distilleries.len(),
        columns.start()
    );
    Ok(Catalog::new(dataset.headers().clone(), distilleries))
}
