//! PDF export of a [`Page`].
//!
//! The heading and captions become `genpdf` paragraphs; every chart is drawn
//! by a [`ChartElement`]. A page decorator applies the margins and footer and
//! counts pages so charts can report where they landed.

mod plot;

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use genpdf::elements::{Break, Paragraph};
use genpdf::error::{Error, ErrorKind};
use genpdf::style::Style;
use genpdf::{self, Alignment, Element, Margins, Mm, PageDecorator, Position};
use log::info;

pub use plot::ChartElement;
use plot::Placement;

use crate::fonts;
use crate::page::{Block, Page, RichParagraph};

const DEFAULT_MARGIN_MM: f64 = 15.0;
const FOOTER_HEIGHT_MM: f64 = 8.0;
const HEADING_FONT_SIZE: u8 = 18;
const FOOTER_FONT_SIZE: u8 = 8;

pub(crate) fn mm_from_f64(value: f64) -> Mm {
    Mm::from(printpdf::Mm(value))
}

pub(crate) fn mm_to_f64(value: Mm) -> f64 {
    let mm: printpdf::Mm = value.into();
    mm.0
}

/// Errors raised while producing the PDF export.
#[derive(Debug)]
pub enum PdfBuildError {
    /// No usable font family could be loaded.
    FontLoad(Error),
    /// `genpdf` failed while laying out or writing the document.
    Render(Error),
}

impl fmt::Display for PdfBuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FontLoad(_) => write!(f, "Failed to load fonts for the PDF export"),
            Self::Render(_) => write!(f, "Failed to render the PDF export"),
        }
    }
}

impl std::error::Error for PdfBuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FontLoad(err) | Self::Render(err) => Some(err),
        }
    }
}

/// Page on which a chart was drawn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChartPage {
    id: String,
    title: String,
    page: Option<usize>,
}

impl ChartPage {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// 1-indexed page number, `None` if the chart was never drawn.
    pub fn page(&self) -> Option<usize> {
        self.page
    }
}

/// Output of [`PdfRenderer::render`].
#[derive(Clone, Debug)]
pub struct RenderedPdf {
    pub bytes: Vec<u8>,
    /// One entry per chart, in page order.
    pub chart_pages: Vec<ChartPage>,
}

/// Renders pages into PDF documents.
#[derive(Clone, Debug)]
pub struct PdfRenderer {
    margins: Margins,
    footer: bool,
}

impl Default for PdfRenderer {
    fn default() -> Self {
        Self {
            margins: Margins::all(mm_from_f64(DEFAULT_MARGIN_MM)),
            footer: true,
        }
    }
}

impl PdfRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops the page-number footer.
    pub fn without_footer(mut self) -> Self {
        self.footer = false;
        self
    }

    /// Renders `page` and reports the page each chart starts on.
    pub fn render(&self, page: &Page) -> Result<RenderedPdf, PdfBuildError> {
        let font_family = fonts::default_font_family().map_err(PdfBuildError::FontLoad)?;
        let mut document = genpdf::Document::new(font_family);
        document.set_title(page.title());
        document.set_minimal_conformance();
        document.set_line_spacing(1.25);

        let current_page = Rc::new(Cell::new(0));
        document.set_page_decorator(CatalogPageDecorator {
            margins: self.margins,
            footer: self.footer.then(|| page.heading().to_owned()),
            current_page: Rc::clone(&current_page),
        });

        document.push(
            Paragraph::new(page.heading())
                .styled(Style::new().bold().with_font_size(HEADING_FONT_SIZE)),
        );
        document.push(Break::new(1));

        let mut slots = Vec::new();
        for block in page.blocks() {
            match block {
                Block::Paragraph(paragraph) => {
                    if paragraph.is_blank() {
                        continue;
                    }
                    document.push(caption(paragraph));
                    document.push(Break::new(0.5));
                }
                Block::Chart(chart) => {
                    let chart_page = Rc::new(Cell::new(None));
                    slots.push((
                        chart.id().to_owned(),
                        chart.title().to_owned(),
                        Rc::clone(&chart_page),
                    ));
                    document.push(ChartElement::new(chart.clone()).with_placement(Placement {
                        current_page: Rc::clone(&current_page),
                        chart_page,
                    }));
                    document.push(Break::new(1));
                }
            }
        }

        let mut bytes = Vec::new();
        document
            .render(&mut bytes)
            .map_err(PdfBuildError::Render)?;

        let chart_pages: Vec<ChartPage> = slots
            .into_iter()
            .map(|(id, title, slot)| ChartPage {
                id,
                title,
                page: slot.get(),
            })
            .collect();
        info!(
            "rendered PDF export: {} pages, {} bytes",
            current_page.get(),
            bytes.len()
        );
        Ok(RenderedPdf { bytes, chart_pages })
    }
}

fn caption(paragraph: &RichParagraph) -> Paragraph {
    let mut element = Paragraph::default();
    for span in paragraph.spans() {
        element.push(span);
    }
    element
}

struct CatalogPageDecorator {
    margins: Margins,
    footer: Option<String>,
    current_page: Rc<Cell<usize>>,
}

impl PageDecorator for CatalogPageDecorator {
    fn decorate_page<'a>(
        &mut self,
        context: &genpdf::Context,
        mut area: genpdf::render::Area<'a>,
        style: Style,
    ) -> Result<genpdf::render::Area<'a>, Error> {
        let page = self.current_page.get() + 1;
        self.current_page.set(page);

        area.add_margins(self.margins);

        if let Some(label) = &self.footer {
            let height = mm_from_f64(FOOTER_HEIGHT_MM);
            let available = area.size().height;
            if height > available {
                return Err(Error::new(
                    "Footer height exceeds available space",
                    ErrorKind::InvalidData,
                ));
            }

            let mut footer_area = area.clone();
            footer_area.add_offset(Position::new(0, available - height));
            let mut footer = Paragraph::new(format!("{label} \u{2022} Page {page}"));
            footer.set_alignment(Alignment::Center);
            let mut element = footer.styled(Style::new().with_font_size(FOOTER_FONT_SIZE));
            let result = element.render(context, footer_area, style)?;
            if result.has_more {
                return Err(Error::new(
                    "Footer does not fit into the reserved space",
                    ErrorKind::PageSizeExceeded,
                ));
            }

            area.set_height(available - height);
        }

        Ok(area)
    }
}
