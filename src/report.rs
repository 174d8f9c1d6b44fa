//! The load → derive → chart → page pipeline.

use std::fmt;
use std::io;
use std::path::Path;

use log::info;

use crate::catalog::Catalog;
use crate::chart::ChartSpec;
use crate::dataset::{DataLoadError, Dataset};
use crate::figures;
use crate::metrics::{self, DerivationError};
use crate::page::{Block, Page, RichParagraph};
use crate::profiles::FEATURED_PROFILES;
use crate::richtext::normalize_whitespace;

/// Heading shown at the top of the page.
pub const PAGE_HEADING: &str = "Whisky Catalog";

const MAP_CAPTION: &str = "
    The geographic location of Whisky Distillery, it show the center Highland area is specialize at making
    whisky with mixed strong flavor, with exception of Talisker on the south getting 4 point of Flavor
";

const TOP_ROUNDED_CAPTION: &str = "";

const CHARACTER_CAPTION: &str =
    "What do you taste when you drink a Whisky: It is a well rounded drink isn't it!";

const SMOKE_CAPTION: &str = "
    Now we want to have information about Smoky Whisky, which have smoke flavor but really hard to make and
    it has less of other flavor, which lead to lower Overall Rating than the Well Rounded-Whisky
";

const VERDICT_CAPTION: &str =
    "So the best Smoke Whisky is Laphroig Best Rounded Whisky: Aberlour Best mixture: Talisker";

const PROFILES_INTRO_CAPTION: &str =
    "Here is the closer look at our 3 choice (the color is resembling the brand)";

/// Errors that abort the pipeline before anything can be served.
#[derive(Debug)]
pub enum ReportError {
    Load(DataLoadError),
    Derive(DerivationError),
}

impl From<DataLoadError> for ReportError {
    fn from(err: DataLoadError) -> Self {
        Self::Load(err)
    }
}

impl From<DerivationError> for ReportError {
    fn from(err: DerivationError) -> Self {
        Self::Derive(err)
    }
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Load(_) => write!(f, "Failed to load the distillery table"),
            Self::Derive(_) => write!(f, "Failed to derive tasting metrics"),
        }
    }
}

impl std::error::Error for ReportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Load(err) => Some(err),
            Self::Derive(err) => Some(err),
        }
    }
}

/// The five dashboard charts.
#[derive(Clone, Debug, PartialEq)]
pub struct ReportCharts {
    pub map: ChartSpec,
    pub top_rounded: ChartSpec,
    pub character: ChartSpec,
    pub smoke_vs_rounded: ChartSpec,
    pub profiles: ChartSpec,
}

impl ReportCharts {
    /// Builds every chart from the enriched catalog.
    pub fn build(catalog: &Catalog) -> Self {
        Self {
            map: figures::geographic_map(catalog),
            top_rounded: figures::top_rounded_bar(catalog),
            character: figures::character_proportion(&catalog.character_summary()),
            smoke_vs_rounded: figures::smoke_vs_rounded(catalog),
            profiles: figures::profile_comparison(&FEATURED_PROFILES),
        }
    }
}

fn caption(text: &str) -> Block {
    Block::Paragraph(RichParagraph::plain(normalize_whitespace(text)))
}

/// Lays the charts out under the page heading, each preceded by its caption.
pub fn assemble_page(charts: ReportCharts) -> Page {
    Page::new(PAGE_HEADING).with_blocks([
        caption(MAP_CAPTION),
        Block::Chart(charts.map),
        caption(TOP_ROUNDED_CAPTION),
        Block::Chart(charts.top_rounded),
        caption(CHARACTER_CAPTION),
        Block::Chart(charts.character),
        caption(SMOKE_CAPTION),
        Block::Chart(charts.smoke_vs_rounded),
        caption(VERDICT_CAPTION),
        caption(PROFILES_INTRO_CAPTION),
        Block::Chart(charts.profiles),
    ])
}

/// Everything produced by one pass of the pipeline.
#[derive(Clone, Debug, PartialEq)]
pub struct Report {
    catalog: Catalog,
    page: Page,
}

impl Report {
    /// Runs the pipeline over the file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ReportError> {
        let path = path.as_ref();
        let report = Self::from_dataset(&Dataset::load(path)?)?;
        info!(
            "built whisky catalog from {} ({} distilleries)",
            path.display(),
            report.catalog.len()
        );
        Ok(report)
    }

    /// Runs the pipeline over CSV read from `reader`.
    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self, ReportError> {
        Self::from_dataset(&Dataset::from_reader(reader)?)
    }

    /// Runs the derivation and chart stages over an already loaded table.
    pub fn from_dataset(dataset: &Dataset) -> Result<Self, ReportError> {
        let catalog = metrics::derive(dataset)?;
        let page = assemble_page(ReportCharts::build(&catalog));
        Ok(Self { catalog, page })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn page(&self) -> &Page {
        &self.page
    }
}
