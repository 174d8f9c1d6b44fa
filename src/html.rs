//! Renders a [`Page`] as a standalone HTML document with Plotly charts.

use crate::page::{Block, Page, RichParagraph};
use crate::plotly;
use crate::richtext::Span;

/// Plotly bundle loaded by the page unless configured otherwise.
pub const DEFAULT_PLOTLY_SRC: &str = "https://cdn.plot.ly/plotly-2.35.0.min.js";

const STYLE: &str = "\
body{font-family:system-ui,-apple-system,sans-serif;max-width:1200px;margin:0 auto;padding:20px}
h2{color:#1a1a2e}
.caption{margin:12px 0}
.chart{margin:8px 0 24px}";

/// Renders pages into HTML strings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HtmlRenderer {
    plotly_src: String,
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_PLOTLY_SRC)
    }
}

impl HtmlRenderer {
    /// Creates a renderer that loads Plotly from `plotly_src`.
    pub fn new(plotly_src: impl Into<String>) -> Self {
        Self {
            plotly_src: plotly_src.into(),
        }
    }

    pub fn plotly_src(&self) -> &str {
        &self.plotly_src
    }

    /// Renders the complete document.
    pub fn render(&self, page: &Page) -> String {
        let mut html = String::new();
        html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
        html.push_str(&format!("<title>{}</title>\n", escape(page.title())));
        html.push_str(&format!(
            "<script src=\"{}\"></script>\n",
            escape(&self.plotly_src)
        ));
        html.push_str(&format!("<style>\n{STYLE}\n</style>\n"));
        html.push_str("</head>\n<body>\n<div>\n");
        html.push_str(&format!("<h2>{}</h2>\n", escape(page.heading())));

        for block in page.blocks() {
            match block {
                Block::Paragraph(paragraph) => render_paragraph(&mut html, paragraph),
                Block::Chart(chart) => {
                    let id = script_json(&serde_json::Value::from(chart.id()));
                    let figure = script_json(&plotly::figure(chart));
                    html.push_str(&format!(
                        "<div class=\"chart\" id=\"{}\"></div>\n",
                        escape(chart.id())
                    ));
                    html.push_str(&format!(
                        "<script>(function(){{var f={figure};Plotly.newPlot(document.getElementById({id}),f.data,f.layout,{{responsive:true}});}})();</script>\n"
                    ));
                }
            }
        }

        html.push_str("</div>\n</body>\n</html>\n");
        html
    }
}

fn render_paragraph(html: &mut String, paragraph: &RichParagraph) {
    html.push_str("<div class=\"caption\">");
    for span in paragraph.spans() {
        render_span(html, span);
    }
    html.push_str("</div>\n");
}

fn render_span(html: &mut String, span: &Span) {
    let mut closing = Vec::new();
    if let Some(color) = span.color() {
        html.push_str(&format!("<span style=\"color:{}\">", color.to_hex()));
        closing.push("</span>");
    }
    if span.is_bold() {
        html.push_str("<strong>");
        closing.push("</strong>");
    }
    if span.is_italic() {
        html.push_str("<em>");
        closing.push("</em>");
    }
    html.push_str(&escape(span.text()));
    for tag in closing.iter().rev() {
        html.push_str(tag);
    }
}

/// Escapes text for use in element content and attribute values.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Serializes JSON for inline `<script>` use; `</` cannot close the element.
fn script_json(value: &serde_json::Value) -> String {
    value.to_string().replace("</", "<\\/")
}
