//! Data structures describing the logical content of the dashboard page.
//!
//! The page is an ordered list of blocks under a heading. It does not know how
//! it will be rendered; [`crate::html`] and [`crate::pdf`] each walk the same
//! blocks.

use crate::chart::ChartSpec;
use crate::richtext::Span;

/// Paragraph made of styled spans.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RichParagraph {
    spans: Vec<Span>,
}

impl RichParagraph {
    /// Creates a paragraph from the provided spans.
    pub fn new(spans: impl Into<Vec<Span>>) -> Self {
        Self {
            spans: spans.into(),
        }
    }

    /// Creates a paragraph holding a single unstyled span.
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(vec![Span::new(text)])
    }

    /// Returns the spans that make up the paragraph.
    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    /// Concatenated text of all spans.
    pub fn text(&self) -> String {
        self.spans.iter().map(Span::text).collect()
    }

    /// Returns `true` when the paragraph has no visible text.
    pub fn is_blank(&self) -> bool {
        self.spans.iter().all(|span| span.text().trim().is_empty())
    }
}

/// Individual content blocks of the page.
#[derive(Clone, Debug, PartialEq)]
pub enum Block {
    /// Caption paragraph.
    Paragraph(RichParagraph),
    /// Embedded chart.
    Chart(ChartSpec),
}

impl Block {
    /// Convenience helper for building a paragraph block.
    pub fn paragraph(spans: impl Into<Vec<Span>>) -> Self {
        Self::Paragraph(RichParagraph::new(spans))
    }
}

/// A complete page: document title, visible heading and ordered blocks.
#[derive(Clone, Debug, PartialEq)]
pub struct Page {
    title: String,
    heading: String,
    blocks: Vec<Block>,
}

impl Page {
    /// Creates an empty page whose heading doubles as the document title.
    pub fn new(heading: impl Into<String>) -> Self {
        let heading = heading.into();
        Self {
            title: heading.clone(),
            heading,
            blocks: Vec::new(),
        }
    }

    /// Document title (browser tab, PDF metadata).
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn heading(&self) -> &str {
        &self.heading
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Charts in display order.
    pub fn charts(&self) -> impl Iterator<Item = &ChartSpec> + '_ {
        self.blocks.iter().filter_map(|block| match block {
            Block::Chart(chart) => Some(chart),
            Block::Paragraph(_) => None,
        })
    }

    /// Appends a block and returns the updated page.
    pub fn with_block(mut self, block: Block) -> Self {
        self.blocks.push(block);
        self
    }

    /// Extends the page with multiple blocks and returns the updated instance.
    pub fn with_blocks<I>(mut self, blocks: I) -> Self
    where
        I: IntoIterator<Item = Block>,
    {
        self.blocks.extend(blocks);
        self
    }
}
