//! Renderer-independent chart specifications.
//!
//! A [`ChartSpec`] captures what a chart shows (series, encodings, title and
//! size) without referencing any rendering crate. The HTML renderer turns it
//! into a Plotly figure and the PDF renderer draws it with vector strokes.

use crate::palette::{ColorScale, Rgb};

/// A named numeric column; `None` marks a missing value.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NumericSeries {
    pub label: String,
    pub values: Vec<Option<f64>>,
}

impl NumericSeries {
    pub fn new(label: impl Into<String>, values: impl IntoIterator<Item = Option<f64>>) -> Self {
        Self {
            label: label.into(),
            values: values.into_iter().collect(),
        }
    }

    /// Smallest and largest present value.
    pub fn range(&self) -> Option<(f64, f64)> {
        self.values.iter().flatten().fold(None, |range, value| match range {
            None => Some((*value, *value)),
            Some((min, max)) => Some((min.min(*value), max.max(*value))),
        })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Continuous colour encoding of a numeric series.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorEncoding {
    pub series: NumericSeries,
    pub scale: ColorScale,
}

/// Marker area encoding of a numeric series.
#[derive(Clone, Debug, PartialEq)]
pub struct SizeEncoding {
    pub series: NumericSeries,
    /// Diameter, in pixels, of the marker carrying the largest value.
    pub max_diameter: f64,
}

/// Scatter plot with size and colour encodings.
#[derive(Clone, Debug, PartialEq)]
pub struct ScatterPlot {
    pub x: NumericSeries,
    pub y: NumericSeries,
    pub size: SizeEncoding,
    pub color: ColorEncoding,
    /// Hover label of each point.
    pub labels: Vec<String>,
}

/// Bar chart over named categories.
#[derive(Clone, Debug, PartialEq)]
pub struct BarPlot {
    pub category_label: String,
    pub categories: Vec<String>,
    pub values: NumericSeries,
    pub color: ColorEncoding,
    /// Extra columns shown on hover.
    pub hover: Vec<NumericSeries>,
}

/// Proportion chart; slice colours cycle through `palette`.
#[derive(Clone, Debug, PartialEq)]
pub struct PiePlot {
    pub label_title: String,
    pub labels: Vec<String>,
    pub values: NumericSeries,
    pub palette: ColorScale,
}

/// One filled polygon of a polar comparison.
#[derive(Clone, Debug, PartialEq)]
pub struct PolarSeries {
    pub name: String,
    pub values: Vec<f64>,
    pub fill: Rgb,
    /// 1-indexed subplot column.
    pub column: usize,
}

/// Radial comparison laid out as one row of polar subplots.
#[derive(Clone, Debug, PartialEq)]
pub struct PolarPlot {
    /// Angular axis categories, shared by every series.
    pub axis: Vec<String>,
    pub columns: usize,
    pub series: Vec<PolarSeries>,
}

/// The supported plot kinds.
#[derive(Clone, Debug, PartialEq)]
pub enum Plot {
    Scatter(ScatterPlot),
    Bar(BarPlot),
    Pie(PiePlot),
    Polar(PolarPlot),
}

/// A complete chart: identifier, title, optional fixed size and the plot.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartSpec {
    id: String,
    title: String,
    width: Option<u32>,
    height: Option<u32>,
    plot: Plot,
}

impl ChartSpec {
    /// Creates a chart that takes the default size of the renderer.
    pub fn new(id: impl Into<String>, title: impl Into<String>, plot: Plot) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            width: None,
            height: None,
            plot,
        }
    }

    /// Identifier of the element the chart is mounted on.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Fixed width in pixels, if any.
    pub fn width(&self) -> Option<u32> {
        self.width
    }

    /// Fixed height in pixels, if any.
    pub fn height(&self) -> Option<u32> {
        self.height
    }

    pub fn plot(&self) -> &Plot {
        &self.plot
    }

    /// Fixes the rendered size and returns the updated chart.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_skips_missing_values() {
        let series = NumericSeries::new("x", [None, Some(3.0), Some(-1.0), None]);
        assert_eq!(series.range(), Some((-1.0, 3.0)));
        assert_eq!(NumericSeries::new("empty", [None]).range(), None);
    }
}
