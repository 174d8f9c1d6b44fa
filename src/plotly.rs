//! Conversion of chart specifications into Plotly figure JSON.

use serde_json::{json, Map, Value};

use crate::chart::{BarPlot, ChartSpec, ColorEncoding, PiePlot, Plot, PolarPlot, ScatterPlot};
use crate::palette::ColorScale;

/// Horizontal gap between polar subplots, as a fraction of the figure width.
const POLAR_SPACING: f64 = 0.2 / 3.0;

/// Builds the `{"data": [...], "layout": {...}}` figure for `chart`.
pub fn figure(chart: &ChartSpec) -> Value {
    let (data, mut layout) = match chart.plot() {
        Plot::Scatter(plot) => scatter(plot),
        Plot::Bar(plot) => bar(plot),
        Plot::Pie(plot) => pie(plot),
        Plot::Polar(plot) => polar(plot),
    };

    layout.insert("title".into(), json!({ "text": chart.title() }));
    if let Some(width) = chart.width() {
        layout.insert("width".into(), json!(width));
    }
    if let Some(height) = chart.height() {
        layout.insert("height".into(), json!(height));
    }

    json!({ "data": data, "layout": Value::Object(layout) })
}

fn colorscale(scale: &ColorScale) -> Value {
    let stops = scale.stops();
    let last = stops.len().saturating_sub(1).max(1) as f64;
    Value::Array(
        stops
            .iter()
            .enumerate()
            .map(|(index, color)| json!([index as f64 / last, color.to_hex()]))
            .collect(),
    )
}

fn coloraxis(color: &ColorEncoding) -> Value {
    json!({
        "colorscale": colorscale(&color.scale),
        "colorbar": { "title": { "text": color.series.label } },
    })
}

fn axis_title(text: &str) -> Value {
    json!({ "title": { "text": text } })
}

fn scatter(plot: &ScatterPlot) -> (Vec<Value>, Map<String, Value>) {
    let max_size = plot.size.series.range().map_or(0.0, |(_, max)| max);
    // Marker area scales with the value; the largest marker gets `max_diameter`.
    let sizeref = if max_size > 0.0 {
        2.0 * max_size / plot.size.max_diameter.powi(2)
    } else {
        1.0
    };

    let hovertemplate = format!(
        "<b>%{{hovertext}}</b><br><br>{}=%{{x}}<br>{}=%{{y}}<br>{}=%{{marker.size}}<br>{}=%{{marker.color}}<extra></extra>",
        plot.x.label, plot.y.label, plot.size.series.label, plot.color.series.label
    );

    let trace = json!({
        "type": "scatter",
        "mode": "markers",
        "x": plot.x.values,
        "y": plot.y.values,
        "hovertext": plot.labels,
        "hovertemplate": hovertemplate,
        "showlegend": false,
        "marker": {
            "size": plot.size.series.values,
            "sizemode": "area",
            "sizeref": sizeref,
            "color": plot.color.series.values,
            "coloraxis": "coloraxis",
        },
    });

    let mut layout = Map::new();
    layout.insert("xaxis".into(), axis_title(&plot.x.label));
    layout.insert("yaxis".into(), axis_title(&plot.y.label));
    layout.insert("coloraxis".into(), coloraxis(&plot.color));
    layout.insert("legend".into(), json!({ "itemsizing": "constant" }));
    (vec![trace], layout)
}

fn bar(plot: &BarPlot) -> (Vec<Value>, Map<String, Value>) {
    let customdata: Vec<Vec<Option<f64>>> = (0..plot.categories.len())
        .map(|row| {
            plot.hover
                .iter()
                .map(|series| series.values.get(row).copied().flatten())
                .collect()
        })
        .collect();

    let mut hovertemplate = format!(
        "{}=%{{x}}<br>{}=%{{y}}",
        plot.category_label, plot.values.label
    );
    for (index, series) in plot.hover.iter().enumerate() {
        hovertemplate.push_str(&format!("<br>{}=%{{customdata[{index}]}}", series.label));
    }
    hovertemplate.push_str("<extra></extra>");

    let trace = json!({
        "type": "bar",
        "x": plot.categories,
        "y": plot.values.values,
        "customdata": customdata,
        "hovertemplate": hovertemplate,
        "showlegend": false,
        "marker": {
            "color": plot.color.series.values,
            "coloraxis": "coloraxis",
        },
    });

    let mut layout = Map::new();
    layout.insert("xaxis".into(), axis_title(&plot.category_label));
    layout.insert("yaxis".into(), axis_title(&plot.values.label));
    layout.insert("coloraxis".into(), coloraxis(&plot.color));
    layout.insert("barmode".into(), json!("relative"));
    (vec![trace], layout)
}

fn pie(plot: &PiePlot) -> (Vec<Value>, Map<String, Value>) {
    let colors: Vec<String> = (0..plot.labels.len())
        .map(|index| plot.palette.cycle(index).to_hex())
        .collect();

    let trace = json!({
        "type": "pie",
        "labels": plot.labels,
        "values": plot.values.values,
        "hovertemplate": format!(
            "{}=%{{label}}<br>{}=%{{value}}<extra></extra>",
            plot.label_title, plot.values.label
        ),
        "marker": { "colors": colors },
    });

    let mut layout = Map::new();
    layout.insert("legend".into(), json!({ "tracegroupgap": 0 }));
    (vec![trace], layout)
}

/// Name of the polar subplot in `column` (1-indexed): `polar`, `polar2`, ...
fn polar_subplot(column: usize) -> String {
    if column <= 1 {
        "polar".to_owned()
    } else {
        format!("polar{column}")
    }
}

/// Horizontal domain of subplot `column` out of `columns`.
pub(crate) fn polar_domain(column: usize, columns: usize) -> (f64, f64) {
    let columns = columns.max(1) as f64;
    let width = (1.0 - POLAR_SPACING * (columns - 1.0)) / columns;
    let start = (column.max(1) - 1) as f64 * (width + POLAR_SPACING);
    (start, (start + width).min(1.0))
}

fn polar(plot: &PolarPlot) -> (Vec<Value>, Map<String, Value>) {
    let data = plot
        .series
        .iter()
        .map(|series| {
            json!({
                "type": "scatterpolar",
                "name": series.name,
                "r": series.values,
                "theta": plot.axis,
                "fill": "toself",
                "fillcolor": series.fill.to_hex(),
                "connectgaps": true,
                "subplot": polar_subplot(series.column),
            })
        })
        .collect();

    let mut layout = Map::new();
    for column in 1..=plot.columns {
        let (start, end) = polar_domain(column, plot.columns);
        layout.insert(
            polar_subplot(column),
            json!({ "domain": { "x": [start, end], "y": [0.0, 1.0] } }),
        );
    }
    (data, layout)
}
