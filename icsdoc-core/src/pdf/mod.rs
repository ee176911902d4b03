//! Markdown to PDF conversion.
//!
//! The rendered Markdown is split into blocks with pulldown-cmark and laid out
//! with genpdf, which wraps and paginates using the metrics of the embedded
//! fonts.

mod fonts;
mod layout;
mod markdown;

use std::path::Path;

use genpdf::PaperSize;
use serde::Deserialize;
use tracing::debug;

use crate::error::{IcsDocError, IcsDocResult};

/// Millimetres per typographic point.
const MM_PER_POINT: f64 = 25.4 / 72.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageSize {
    #[default]
    A4,
    Letter,
}

impl PageSize {
    /// Width and height in millimetres
    pub fn dimensions(self) -> (f64, f64) {
        match self {
            PageSize::A4 => (210.0, 297.0),
            PageSize::Letter => (215.9, 279.4),
        }
    }

    fn paper_size(self) -> PaperSize {
        match self {
            PageSize::A4 => PaperSize::A4,
            PageSize::Letter => PaperSize::Letter,
        }
    }
}

fn default_font_size() -> u8 {
    11
}

fn default_margin() -> f64 {
    20.0
}

/// Page setup for PDF output.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PdfOptions {
    #[serde(default)]
    pub page_size: PageSize,

    /// Body text size in points; headings and code scale from it
    #[serde(default = "default_font_size")]
    pub font_size: u8,

    /// Margin on every side, in millimetres
    #[serde(default = "default_margin")]
    pub margin: f64,
}

impl Default for PdfOptions {
    fn default() -> Self {
        PdfOptions {
            page_size: PageSize::default(),
            font_size: default_font_size(),
            margin: default_margin(),
        }
    }
}

impl PdfOptions {
    /// Reject setups that leave no room for a line of text.
    pub fn validate(&self) -> IcsDocResult<()> {
        let (width, height) = self.page_size.dimensions();
        let room = width.min(height) - 2.0 * self.margin;
        let text_height = f64::from(self.font_size) * MM_PER_POINT;

        if self.font_size == 0 || self.margin < 0.0 || room < text_height * 4.0 {
            return Err(IcsDocError::Conversion(format!(
                "page setup leaves no room for text (font_size = {}, margin = {})",
                self.font_size, self.margin
            )));
        }
        Ok(())
    }
}

/// Convert Markdown text into the bytes of a PDF file.
pub fn to_pdf(markdown: &str, options: &PdfOptions) -> IcsDocResult<Vec<u8>> {
    options.validate()?;

    let blocks = markdown::parse_blocks(markdown);
    let doc = layout::typeset(&blocks, options)?;

    let mut bytes = Vec::new();
    doc.render(&mut bytes)
        .map_err(|e| IcsDocError::Conversion(e.to_string()))?;

    debug!(blocks = blocks.len(), bytes = bytes.len(), "rendered PDF");
    Ok(bytes)
}

/// Write PDF bytes to `path`.
pub fn write_pdf(path: &Path, bytes: &[u8]) -> IcsDocResult<()> {
    std::fs::write(path, bytes).map_err(|source| IcsDocError::OutputWrite {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(path = %path.display(), bytes = bytes.len(), "wrote PDF");
    Ok(())
}
