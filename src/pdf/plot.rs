//! Vector drawing of chart specifications inside a `genpdf` document.
//!
//! Charts are drawn with strokes only. Areas are filled by tightly spaced
//! lines, so the output needs no image support.

use std::cell::Cell;
use std::f64::consts::PI;
use std::rc::Rc;

use genpdf::elements::Paragraph;
use genpdf::error::Error;
use genpdf::style::{LineStyle, Style};
use genpdf::{render, Alignment, Element, Position, RenderResult, Size};

use super::{mm_from_f64, mm_to_f64};
use crate::chart::{
    BarPlot, ChartSpec, ColorEncoding, NumericSeries, PiePlot, Plot, PolarPlot, ScatterPlot,
};
use crate::palette::{Rgb, AXIS_GREY};
use crate::plotly::polar_domain;

const TITLE_HEIGHT_MM: f64 = 9.0;
const LABEL_HEIGHT_MM: f64 = 5.0;
const TICK_COUNT: usize = 5;
/// Plotly marker sizes are pixels; one pixel is drawn as 0.15 mm.
const PX_TO_MM: f64 = 0.15;
const STROKE_MM: f64 = 0.25;
const FILL_STEP_MM: f64 = 0.3;
const COLORBAR_WIDTH_MM: f64 = 22.0;
const PIE_LEGEND_WIDTH_MM: f64 = 42.0;
const LEGEND_ROW_MM: f64 = 4.5;
const CIRCLE_SEGMENTS: usize = 24;
const WHITE: Rgb = Rgb(255, 255, 255);

/// Rectangle in millimetres, relative to the chart's top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Frame {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

impl Frame {
    fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    fn right(&self) -> f64 {
        self.x + self.width
    }

    fn bottom(&self) -> f64 {
        self.y + self.height
    }

    fn inset(self, left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self::new(
            self.x + left,
            self.y + top,
            self.width - left - right,
            self.height - top - bottom,
        )
    }

    /// Splits off a column of `width` on the right.
    fn split_right(self, width: f64) -> (Self, Self) {
        let width = width.min(self.width);
        (
            Self::new(self.x, self.y, self.width - width, self.height),
            Self::new(self.right() - width, self.y, width, self.height),
        )
    }
}

/// Linear value range of an axis.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Axis {
    min: f64,
    max: f64,
}

impl Axis {
    /// Covers `range` with `pad` of its span added on both sides.
    fn padded(range: Option<(f64, f64)>, pad: f64) -> Self {
        match range {
            None => Self { min: 0.0, max: 1.0 },
            Some((min, max)) if (max - min).abs() < f64::EPSILON => Self {
                min: min - 1.0,
                max: max + 1.0,
            },
            Some((min, max)) => {
                let pad = (max - min) * pad;
                Self {
                    min: min - pad,
                    max: max + pad,
                }
            }
        }
    }

    /// Starts at zero and leaves headroom above `range`.
    fn from_zero(range: Option<(f64, f64)>) -> Self {
        let max = range.map_or(0.0, |(_, max)| max);
        Self {
            min: 0.0,
            max: if max > 0.0 { max * 1.05 } else { 1.0 },
        }
    }

    fn fraction(&self, value: f64) -> f64 {
        (value - self.min) / (self.max - self.min)
    }

    fn ticks(&self) -> impl Iterator<Item = f64> + '_ {
        let step = (self.max - self.min) / (TICK_COUNT - 1) as f64;
        (0..TICK_COUNT).map(move |index| self.min + step * index as f64)
    }
}

fn format_tick(value: f64) -> String {
    let rounded = value.round();
    if (value - rounded).abs() < 0.05 {
        if rounded == 0.0 {
            "0".to_owned()
        } else {
            format!("{rounded:.0}")
        }
    } else {
        format!("{value:.1}")
    }
}

/// Point at `radius` from the centre; `angle` is counter-clockwise from east.
fn polar_point(cx: f64, cy: f64, radius: f64, angle: f64) -> (f64, f64) {
    (cx + radius * angle.cos(), cy - radius * angle.sin())
}

fn circle(cx: f64, cy: f64, radius: f64) -> Vec<(f64, f64)> {
    (0..CIRCLE_SEGMENTS)
        .map(|index| {
            polar_point(
                cx,
                cy,
                radius,
                2.0 * PI * index as f64 / CIRCLE_SEGMENTS as f64,
            )
        })
        .collect()
}

fn value_at(series: &NumericSeries, index: usize) -> Option<f64> {
    series.values.get(index).copied().flatten()
}

fn color_at(encoding: &ColorEncoding, index: usize) -> Rgb {
    match (encoding.series.range(), value_at(&encoding.series, index)) {
        (Some((min, max)), Some(value)) if max > min => {
            encoding.scale.sample((value - min) / (max - min))
        }
        (Some(_), Some(_)) => encoding.scale.sample(0.5),
        _ => AXIS_GREY,
    }
}

/// Short form of `label` that fits in roughly `width` millimetres of small text.
fn fit_label(label: &str, width: f64) -> String {
    let max_chars = (width / 1.3).floor().max(3.0) as usize;
    if label.chars().count() <= max_chars {
        label.to_owned()
    } else {
        let mut short: String = label.chars().take(max_chars.saturating_sub(1)).collect();
        short.push('.');
        short
    }
}

struct Canvas<'c, 'a> {
    context: &'c genpdf::Context,
    area: &'c render::Area<'a>,
    style: Style,
}

impl Canvas<'_, '_> {
    fn stroke(&self, points: &[(f64, f64)], color: Rgb) {
        if points.len() < 2 {
            return;
        }
        let positions: Vec<Position> = points
            .iter()
            .map(|&(x, y)| Position::new(mm_from_f64(x), mm_from_f64(y)))
            .collect();
        self.area.draw_line(
            positions,
            LineStyle::new()
                .with_color(color.into())
                .with_thickness(mm_from_f64(STROKE_MM)),
        );
    }

    fn closed(&self, points: &[(f64, f64)], color: Rgb) {
        let mut ring = points.to_vec();
        if let Some(first) = points.first() {
            ring.push(*first);
        }
        self.stroke(&ring, color);
    }

    fn fill_rect(&self, frame: Frame, color: Rgb) {
        let mut x = frame.x;
        while x <= frame.right() {
            self.stroke(&[(x, frame.y), (x, frame.bottom())], color);
            x += FILL_STEP_MM;
        }
    }

    fn fill_circle(&self, cx: f64, cy: f64, radius: f64, color: Rgb) {
        let mut current = radius;
        while current > FILL_STEP_MM / 2.0 {
            self.closed(&circle(cx, cy, current), color);
            current -= FILL_STEP_MM;
        }
        self.stroke(&[(cx - 0.1, cy), (cx + 0.1, cy)], color);
    }

    /// Fills a polygon by shrinking it towards `center`.
    fn fill_polygon(&self, center: (f64, f64), points: &[(f64, f64)], color: Rgb) {
        let reach = points
            .iter()
            .map(|&(x, y)| (x - center.0).hypot(y - center.1))
            .fold(0.0, f64::max);
        let steps = (reach / FILL_STEP_MM).ceil().min(200.0) as usize;
        for step in 0..steps {
            let scale = 1.0 - step as f64 / steps as f64;
            let scaled: Vec<(f64, f64)> = points
                .iter()
                .map(|&(x, y)| {
                    (
                        center.0 + (x - center.0) * scale,
                        center.1 + (y - center.1) * scale,
                    )
                })
                .collect();
            self.closed(&scaled, color);
        }
    }

    /// Fills the wedge between `from` and `to` (radians, counter-clockwise from east).
    fn fill_wedge(&self, cx: f64, cy: f64, radius: f64, from: f64, to: f64, color: Rgb) {
        let sweep = to - from;
        let steps = ((sweep.abs() * radius) / FILL_STEP_MM).ceil().max(1.0) as usize;
        for step in 0..=steps {
            let angle = from + sweep * step as f64 / steps as f64;
            self.stroke(&[(cx, cy), polar_point(cx, cy, radius, angle)], color);
        }
    }

    fn text(&self, frame: Frame, text: &str, style: Style, alignment: Alignment) -> Result<(), Error> {
        if text.is_empty() || frame.width <= 0.0 || frame.height <= 0.0 {
            return Ok(());
        }
        let mut area = self.area.clone();
        area.add_offset(Position::new(mm_from_f64(frame.x), mm_from_f64(frame.y)));
        area.set_width(mm_from_f64(frame.width));
        area.set_height(mm_from_f64(frame.height));
        let mut paragraph = Paragraph::new(text.to_owned());
        paragraph.set_alignment(alignment);
        paragraph.render(self.context, area, style)?;
        Ok(())
    }

    fn small(&self) -> Style {
        self.style.with_font_size(6)
    }

    fn label(&self) -> Style {
        self.style.with_font_size(7)
    }
}

fn draw_y_axis(canvas: &Canvas<'_, '_>, frame: Frame, axis: Axis, title: &str) -> Result<(), Error> {
    canvas.stroke(&[(frame.x, frame.y), (frame.x, frame.bottom())], AXIS_GREY);
    for tick in axis.ticks() {
        let y = frame.bottom() - axis.fraction(tick) * frame.height;
        canvas.stroke(&[(frame.x - 1.0, y), (frame.x, y)], AXIS_GREY);
        canvas.text(
            Frame::new(frame.x - 12.0, y - 1.5, 10.5, LABEL_HEIGHT_MM),
            &format_tick(tick),
            canvas.small(),
            Alignment::Right,
        )?;
    }
    canvas.text(
        Frame::new(frame.x - 12.0, frame.y - LABEL_HEIGHT_MM - 1.0, 40.0, LABEL_HEIGHT_MM),
        title,
        canvas.label(),
        Alignment::Left,
    )
}

fn draw_x_axis(canvas: &Canvas<'_, '_>, frame: Frame, axis: Option<Axis>, title: &str) -> Result<(), Error> {
    canvas.stroke(&[(frame.x, frame.bottom()), (frame.right(), frame.bottom())], AXIS_GREY);
    if let Some(axis) = axis {
        for tick in axis.ticks() {
            let x = frame.x + axis.fraction(tick) * frame.width;
            canvas.stroke(&[(x, frame.bottom()), (x, frame.bottom() + 1.0)], AXIS_GREY);
            canvas.text(
                Frame::new(x - 6.0, frame.bottom() + 1.2, 12.0, LABEL_HEIGHT_MM),
                &format_tick(tick),
                canvas.small(),
                Alignment::Center,
            )?;
        }
    }
    canvas.text(
        Frame::new(frame.x, frame.bottom() + 5.5, frame.width, LABEL_HEIGHT_MM),
        title,
        canvas.label(),
        Alignment::Center,
    )
}

fn draw_colorbar(canvas: &Canvas<'_, '_>, frame: Frame, color: &ColorEncoding) -> Result<(), Error> {
    let bar = Frame::new(frame.x + 4.0, frame.y + 8.0, 4.0, frame.height - 16.0);
    canvas.text(
        Frame::new(frame.x + 2.0, frame.y, frame.width - 2.0, LABEL_HEIGHT_MM),
        &color.series.label,
        canvas.label(),
        Alignment::Left,
    )?;

    let mut y = bar.y;
    while y <= bar.bottom() {
        let t = 1.0 - (y - bar.y) / bar.height.max(f64::EPSILON);
        canvas.stroke(&[(bar.x, y), (bar.right(), y)], color.scale.sample(t));
        y += FILL_STEP_MM;
    }

    if let Some((min, max)) = color.series.range() {
        canvas.text(
            Frame::new(bar.right() + 1.5, bar.y - 1.5, 12.0, LABEL_HEIGHT_MM),
            &format_tick(max),
            canvas.small(),
            Alignment::Left,
        )?;
        canvas.text(
            Frame::new(bar.right() + 1.5, bar.bottom() - 2.0, 12.0, LABEL_HEIGHT_MM),
            &format_tick(min),
            canvas.small(),
            Alignment::Left,
        )?;
    }
    Ok(())
}

fn draw_scatter(canvas: &Canvas<'_, '_>, frame: Frame, plot: &ScatterPlot) -> Result<(), Error> {
    let (plot_frame, legend) = frame.split_right(COLORBAR_WIDTH_MM);
    let plot_frame = plot_frame.inset(13.0, 7.0, 3.0, 11.0);
    let x_axis = Axis::padded(plot.x.range(), 0.08);
    let y_axis = Axis::padded(plot.y.range(), 0.08);

    draw_y_axis(canvas, plot_frame, y_axis, &plot.y.label)?;
    draw_x_axis(canvas, plot_frame, Some(x_axis), &plot.x.label)?;

    let max_size = plot.size.series.range().map_or(0.0, |(_, max)| max);
    let max_radius = plot.size.max_diameter * PX_TO_MM / 2.0;

    for index in 0..plot.x.len() {
        let (Some(x), Some(y)) = (value_at(&plot.x, index), value_at(&plot.y, index)) else {
            continue;
        };
        // Marker area is proportional to the size value.
        let radius = match value_at(&plot.size.series, index) {
            Some(size) if size > 0.0 && max_size > 0.0 => max_radius * (size / max_size).sqrt(),
            _ => FILL_STEP_MM,
        };
        let cx = plot_frame.x + x_axis.fraction(x) * plot_frame.width;
        let cy = plot_frame.bottom() - y_axis.fraction(y) * plot_frame.height;
        let fill = color_at(&plot.color, index);
        canvas.fill_circle(cx, cy, radius, fill);
        canvas.closed(&circle(cx, cy, radius), WHITE);
    }

    draw_colorbar(canvas, legend, &plot.color)
}

fn draw_bar(canvas: &Canvas<'_, '_>, frame: Frame, plot: &BarPlot) -> Result<(), Error> {
    let (plot_frame, legend) = frame.split_right(COLORBAR_WIDTH_MM);
    let plot_frame = plot_frame.inset(13.0, 7.0, 3.0, 11.0);
    let axis = Axis::from_zero(plot.values.range());

    draw_y_axis(canvas, plot_frame, axis, &plot.values.label)?;
    draw_x_axis(canvas, plot_frame, None, &plot.category_label)?;

    let count = plot.categories.len().max(1) as f64;
    let slot = plot_frame.width / count;
    for (index, category) in plot.categories.iter().enumerate() {
        let left = plot_frame.x + slot * index as f64;
        if let Some(value) = value_at(&plot.values, index).filter(|value| *value > 0.0) {
            let height = axis.fraction(value) * plot_frame.height;
            canvas.fill_rect(
                Frame::new(
                    left + slot * 0.1,
                    plot_frame.bottom() - height,
                    slot * 0.8,
                    height,
                ),
                color_at(&plot.color, index),
            );
        }
        canvas.text(
            Frame::new(left, plot_frame.bottom() + 1.2, slot, LABEL_HEIGHT_MM),
            &fit_label(category, slot),
            canvas.small(),
            Alignment::Center,
        )?;
    }

    draw_colorbar(canvas, legend, &plot.color)
}

fn draw_pie(canvas: &Canvas<'_, '_>, frame: Frame, plot: &PiePlot) -> Result<(), Error> {
    let (pie_frame, legend) = frame.split_right(PIE_LEGEND_WIDTH_MM);
    let radius = (pie_frame.width.min(pie_frame.height) / 2.0 - 4.0).max(1.0);
    let cx = pie_frame.x + pie_frame.width / 2.0;
    let cy = pie_frame.y + pie_frame.height / 2.0;

    let total: f64 = plot
        .values
        .values
        .iter()
        .flatten()
        .filter(|value| **value > 0.0)
        .sum();

    // Slices run clockwise from twelve o'clock.
    let mut angle = PI / 2.0;
    for (index, label) in plot.labels.iter().enumerate() {
        let color = plot.palette.cycle(index);
        let share = match value_at(&plot.values, index) {
            Some(value) if value > 0.0 && total > 0.0 => value / total,
            _ => 0.0,
        };
        if share > 0.0 {
            let end = angle - share * 2.0 * PI;
            canvas.fill_wedge(cx, cy, radius, angle, end, color);
            canvas.stroke(&[(cx, cy), polar_point(cx, cy, radius, angle)], WHITE);
            angle = end;
        }

        let row = legend.y + LEGEND_ROW_MM * index as f64;
        canvas.fill_rect(Frame::new(legend.x + 2.0, row + 0.8, 3.0, 3.0), color);
        canvas.text(
            Frame::new(legend.x + 6.5, row, legend.width - 6.5, LABEL_HEIGHT_MM),
            &format!("{label} {:.1}%", share * 100.0),
            canvas.small(),
            Alignment::Left,
        )?;
    }
    Ok(())
}

fn draw_polar(canvas: &Canvas<'_, '_>, frame: Frame, plot: &PolarPlot) -> Result<(), Error> {
    let spokes = plot.axis.len();
    for column in 1..=plot.columns {
        let (start, end) = polar_domain(column, plot.columns);
        let cell = Frame::new(
            frame.x + start * frame.width,
            frame.y,
            (end - start) * frame.width,
            frame.height,
        );
        let members: Vec<_> = plot
            .series
            .iter()
            .filter(|series| series.column == column)
            .collect();

        for (row, series) in members.iter().enumerate() {
            canvas.text(
                Frame::new(cell.x, cell.y + LEGEND_ROW_MM * row as f64, cell.width, LABEL_HEIGHT_MM),
                &series.name,
                canvas.label().bold().with_color(series.fill.into()),
                Alignment::Center,
            )?;
        }

        let top = cell.y + LEGEND_ROW_MM * members.len().max(1) as f64 + 4.0;
        let radius = ((cell.width.min(cell.bottom() - top)) / 2.0 - 6.0).max(1.0);
        let cx = cell.x + cell.width / 2.0;
        let cy = top + (cell.bottom() - top) / 2.0;
        let reach = members
            .iter()
            .flat_map(|series| series.values.iter().copied())
            .fold(0.0, f64::max);
        let reach = if reach > 0.0 { reach } else { 1.0 };

        for ring in 1..=4 {
            canvas.closed(&circle(cx, cy, radius * ring as f64 / 4.0), AXIS_GREY);
        }
        let angle_of = |index: usize| 2.0 * PI * index as f64 / spokes.max(1) as f64;
        for (index, name) in plot.axis.iter().enumerate() {
            let angle = angle_of(index);
            canvas.stroke(&[(cx, cy), polar_point(cx, cy, radius, angle)], AXIS_GREY);
            let (lx, ly) = polar_point(cx, cy, radius + 3.5, angle);
            canvas.text(
                Frame::new(lx - 8.0, ly - 1.5, 16.0, LABEL_HEIGHT_MM),
                name,
                canvas.small().with_font_size(5),
                Alignment::Center,
            )?;
        }

        for series in &members {
            let points: Vec<(f64, f64)> = series
                .values
                .iter()
                .enumerate()
                .map(|(index, value)| polar_point(cx, cy, radius * value.max(0.0) / reach, angle_of(index)))
                .collect();
            canvas.fill_polygon((cx, cy), &points, series.fill.mix(WHITE, 0.5));
            canvas.closed(&points, series.fill);
        }
    }
    Ok(())
}

/// Shared slot through which a chart reports the page it landed on.
#[derive(Clone, Debug)]
pub(crate) struct Placement {
    pub(crate) current_page: Rc<Cell<usize>>,
    pub(crate) chart_page: Rc<Cell<Option<usize>>>,
}

/// Element drawing one [`ChartSpec`] with a fixed height.
///
/// A chart never splits across pages: when the remaining space is too small
/// the element asks for a fresh page.
pub struct ChartElement {
    chart: ChartSpec,
    height_mm: f64,
    placement: Option<Placement>,
}

impl ChartElement {
    pub fn new(chart: ChartSpec) -> Self {
        let height_mm = match chart.plot() {
            Plot::Scatter(_) => 125.0,
            Plot::Polar(_) => 80.0,
            Plot::Bar(_) | Plot::Pie(_) => 95.0,
        };
        Self {
            chart,
            height_mm,
            placement: None,
        }
    }

    /// Overrides the drawing height in millimetres.
    pub fn with_height_mm(mut self, height_mm: f64) -> Self {
        self.height_mm = height_mm;
        self
    }

    pub fn height_mm(&self) -> f64 {
        self.height_mm
    }

    pub fn chart(&self) -> &ChartSpec {
        &self.chart
    }

    pub(crate) fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = Some(placement);
        self
    }

    /// Width used for drawing; fixed-size charts keep their aspect ratio.
    fn drawing_width(&self, available: f64) -> f64 {
        match (self.chart.width(), self.chart.height()) {
            (Some(width), Some(height)) if height > 0 => {
                let plot_height = self.height_mm - TITLE_HEIGHT_MM;
                available.min(plot_height * f64::from(width) / f64::from(height) + COLORBAR_WIDTH_MM)
            }
            _ => available,
        }
    }
}

impl Element for ChartElement {
    fn render(
        &mut self,
        context: &genpdf::Context,
        area: render::Area<'_>,
        style: Style,
    ) -> Result<RenderResult, Error> {
        let mut result = RenderResult::default();
        let size = area.size();
        if mm_to_f64(size.height) < self.height_mm {
            result.has_more = true;
            return Ok(result);
        }

        let available = mm_to_f64(size.width);
        let width = self.drawing_width(available);
        let canvas = Canvas {
            context,
            area: &area,
            style,
        };
        let full = Frame::new((available - width) / 2.0, 0.0, width, self.height_mm);

        canvas.text(
            Frame::new(0.0, 0.0, available, TITLE_HEIGHT_MM),
            self.chart.title(),
            style.bold().with_font_size(11),
            Alignment::Center,
        )?;
        let body = full.inset(0.0, TITLE_HEIGHT_MM, 0.0, 0.0);
        match self.chart.plot() {
            Plot::Scatter(plot) => draw_scatter(&canvas, body, plot)?,
            Plot::Bar(plot) => draw_bar(&canvas, body, plot)?,
            Plot::Pie(plot) => draw_pie(&canvas, body, plot)?,
            Plot::Polar(plot) => draw_polar(&canvas, body, plot)?,
        }

        if let Some(placement) = &self.placement {
            if placement.chart_page.get().is_none() {
                placement.chart_page.set(Some(placement.current_page.get()));
            }
        }

        result.size = Size::new(size.width, mm_from_f64(self.height_mm));
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::YL_OR_BR;

    #[test]
    fn padded_axis_handles_flat_and_missing_ranges() {
        assert_eq!(Axis::padded(None, 0.1), Axis { min: 0.0, max: 1.0 });
        assert_eq!(
            Axis::padded(Some((2.0, 2.0)), 0.1),
            Axis { min: 1.0, max: 3.0 }
        );
        let axis = Axis::padded(Some((0.0, 10.0)), 0.1);
        assert_eq!(axis, Axis { min: -1.0, max: 11.0 });
        assert!((axis.fraction(5.0) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn bar_axis_starts_at_zero() {
        let axis = Axis::from_zero(Some((14.0, 20.0)));
        assert_eq!(axis.min, 0.0);
        assert!((axis.max - 21.0).abs() < 1e-9);
        let ticks: Vec<f64> = axis.ticks().collect();
        assert_eq!(ticks.len(), TICK_COUNT);
        assert_eq!(ticks[0], 0.0);
        assert!((ticks[TICK_COUNT - 1] - 21.0).abs() < 1e-9);
    }

    #[test]
    fn ticks_are_formatted_compactly() {
        assert_eq!(format_tick(4.0), "4");
        assert_eq!(format_tick(-0.01), "0");
        assert_eq!(format_tick(2.24), "2.2");
        assert_eq!(format_tick(57.3), "57.3");
    }

    #[test]
    fn frames_split_and_inset() {
        let frame = Frame::new(0.0, 0.0, 100.0, 50.0);
        let (left, right) = frame.split_right(20.0);
        assert_eq!(left.width, 80.0);
        assert_eq!(right.x, 80.0);
        let inner = left.inset(10.0, 5.0, 0.0, 5.0);
        assert_eq!(inner, Frame::new(10.0, 5.0, 70.0, 40.0));
        assert_eq!(Frame::new(0.0, 0.0, -3.0, 1.0).width, 0.0);
    }

    #[test]
    fn polar_points_turn_counter_clockwise() {
        let (x, y) = polar_point(10.0, 10.0, 5.0, PI / 2.0);
        assert!((x - 10.0).abs() < 1e-9);
        assert!((y - 5.0).abs() < 1e-9);
        assert_eq!(circle(0.0, 0.0, 1.0).len(), CIRCLE_SEGMENTS);
    }

    #[test]
    fn missing_colour_values_are_grey() {
        let encoding = ColorEncoding {
            series: NumericSeries::new("Flavor", [Some(1.0), None, Some(3.0)]),
            scale: YL_OR_BR,
        };
        assert_eq!(color_at(&encoding, 1), AXIS_GREY);
        assert_eq!(color_at(&encoding, 0), YL_OR_BR.sample(0.0));
        assert_eq!(color_at(&encoding, 2), YL_OR_BR.sample(1.0));
    }

    #[test]
    fn long_labels_are_shortened() {
        assert_eq!(fit_label("Ardbeg", 20.0), "Ardbeg");
        assert_eq!(fit_label("GlenDeveronMacduff", 10.0), "GlenDe.");
    }

    #[test]
    fn fixed_size_charts_keep_their_aspect() {
        let chart = ChartSpec::new(
            "map",
            "Map",
            Plot::Pie(PiePlot {
                label_title: "character".to_owned(),
                labels: Vec::new(),
                values: NumericSeries::default(),
                palette: YL_OR_BR,
            }),
        );
        let element = ChartElement::new(chart.clone().with_size(600, 600)).with_height_mm(60.0);
        assert!((element.drawing_width(170.0) - (51.0 + COLORBAR_WIDTH_MM)).abs() < 1e-9);
        assert_eq!(ChartElement::new(chart).drawing_width(170.0), 170.0);
    }
}
