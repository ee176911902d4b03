//! Turning Markdown blocks into genpdf elements.
//!
//! genpdf wraps lines and breaks pages. This module picks the font and
//! indentation for each block and splits words that are wider than a whole
//! line, which genpdf's wrapper cannot place.

use genpdf::elements::{Break, BulletPoint, PaddedElement, Paragraph, StyledElement};
use genpdf::error::Error;
use genpdf::fonts::{Font, FontCache, FontFamily};
use genpdf::render::Area;
use genpdf::style::{LineStyle, Style};
use genpdf::{
    Context, Document, Element, Margins, Mm, Position, RenderResult, SimplePageDecorator, Size,
};
use tracing::warn;

use super::markdown::{Block, BlockKind};
use super::{PdfOptions, fonts};
use crate::error::IcsDocResult;

/// Extra indentation per list or quote level, in millimetres.
const INDENT: f64 = 6.0;
/// Space reserved left of a list item's text for its marker, in millimetres.
const BULLET_INDENT: f64 = 7.0;
const LINE_SPACING: f64 = 1.25;
const HEADING_SCALE: [f64; 6] = [1.9, 1.55, 1.3, 1.15, 1.05, 1.0];
const CODE_SCALE: f64 = 0.9;
/// Rounding slack kept free on every line, in millimetres.
const WIDTH_SLACK: f64 = 0.5;

fn scaled(size: u8, scale: f64) -> u8 {
    (f64::from(size) * scale).round().clamp(1.0, f64::from(u8::MAX)) as u8
}

/// Builds a genpdf document block by block.
pub struct Typesetter {
    doc: Document,
    /// Mirrors the document's font cache. Families are added in the same
    /// order, so `Font` handles from either cache are interchangeable.
    measure: FontCache,
    mono: FontFamily<Font>,
    font_size: u8,
    /// Width of the text area between the page margins, in millimetres
    text_width: f64,
}

impl Typesetter {
    pub fn new(options: &PdfOptions) -> IcsDocResult<Self> {
        let mut doc = Document::new(fonts::body()?);
        let mono = doc.add_font_family(fonts::mono()?);

        let mut measure = FontCache::new(fonts::body()?);
        measure.add_font_family(fonts::mono()?);

        doc.set_paper_size(options.page_size.paper_size());
        doc.set_font_size(options.font_size);
        doc.set_line_spacing(LINE_SPACING);

        let margin = options.margin;
        let mut decorator = SimplePageDecorator::new();
        decorator.set_margins(Margins::trbl(margin, margin, margin, margin));
        doc.set_page_decorator(decorator);

        let (width, _) = options.page_size.dimensions();
        Ok(Typesetter {
            doc,
            measure,
            mono,
            font_size: options.font_size,
            text_width: width - 2.0 * margin,
        })
    }

    fn body_style(&self) -> Style {
        Style::new().with_font_size(self.font_size)
    }

    fn heading_style(&self, level: usize) -> Style {
        let scale = HEADING_SCALE[level.clamp(1, 6) - 1];
        Style::new()
            .bold()
            .with_font_size(scaled(self.font_size, scale))
    }

    fn code_style(&self) -> Style {
        Style::new()
            .with_font_family(self.mono.clone())
            .with_font_size(scaled(self.font_size, CODE_SCALE))
    }

    /// Split every word wider than `width` millimetres into pieces that fit
    /// on a line of their own. Other words are kept as they are.
    fn fit(&self, text: &str, style: &Style, width: f64) -> String {
        let limit = Mm::from(width - WIDTH_SLACK);
        let mut words = Vec::new();

        for word in text.split(' ') {
            if style.str_width(&self.measure, word) <= limit {
                words.push(word.to_string());
                continue;
            }

            warn!(chars = word.chars().count(), "breaking a word wider than the page");
            let mut piece = String::new();
            for c in word.chars() {
                piece.push(c);
                if piece.chars().count() > 1 && style.str_width(&self.measure, &piece) > limit {
                    piece.pop();
                    words.push(std::mem::take(&mut piece));
                    piece.push(c);
                }
            }
            words.push(piece);
        }

        words.join(" ")
    }

    fn paragraph(&self, text: &str, style: Style, width: f64) -> StyledElement<Paragraph> {
        let fitted = self.fit(text, &style, width);
        Paragraph::new(fitted).styled(style)
    }

    fn push_indented<E: Element + 'static>(&mut self, element: E, indent: f64) {
        let padded: PaddedElement<E> = element.padded(Margins::trbl(0.0, 0.0, 0.0, indent));
        self.doc.push(padded);
    }

    pub fn push(&mut self, block: &Block) {
        let indent = INDENT * block.depth as f64;
        let width = self.text_width - indent;

        match &block.kind {
            BlockKind::Heading(level) => {
                self.doc.push(Break::new(0.5));
                for line in block.text.split('\n') {
                    let heading = self.paragraph(line, self.heading_style(*level), width);
                    self.push_indented(heading, indent);
                }
                self.doc.push(Break::new(0.3));
            }
            BlockKind::Paragraph => {
                for line in block.text.split('\n') {
                    let paragraph = self.paragraph(line, self.body_style(), width);
                    self.push_indented(paragraph, indent);
                }
                self.doc.push(Break::new(0.5));
            }
            BlockKind::ListItem { marker } => {
                let text = block.text.replace('\n', " ");
                let body = self.paragraph(&text, self.body_style(), width - BULLET_INDENT);
                let item = BulletPoint::new(body)
                    .with_indent(BULLET_INDENT)
                    .with_bullet(marker.clone());
                self.push_indented(item, indent);
            }
            BlockKind::Code => {
                for raw in block.text.trim_end_matches('\n').split('\n') {
                    let line = raw.replace('\t', "    ");
                    if line.trim().is_empty() {
                        self.doc.push(Break::new(1.0));
                        continue;
                    }
                    let code = self.paragraph(&line, self.code_style(), width);
                    self.push_indented(code, indent);
                }
                self.doc.push(Break::new(0.5));
            }
            BlockKind::Rule => {
                self.doc.push(Break::new(0.3));
                self.push_indented(HorizontalRule, indent);
                self.doc.push(Break::new(0.3));
            }
        }
    }

    pub fn finish(self) -> Document {
        self.doc
    }
}

/// Lay blocks out into a document ready to render.
pub fn typeset(blocks: &[Block], options: &PdfOptions) -> IcsDocResult<Document> {
    let mut setter = Typesetter::new(options)?;
    for block in blocks {
        setter.push(block);
    }
    Ok(setter.finish())
}

/// A thin line across the text area.
struct HorizontalRule;

impl Element for HorizontalRule {
    fn render(
        &mut self,
        _context: &Context,
        area: Area<'_>,
        _style: Style,
    ) -> Result<RenderResult, Error> {
        let height = Mm::from(2.0);
        let size = area.size();
        if size.height < height {
            return Ok(RenderResult {
                size: Size::new(0.0, 0.0),
                has_more: true,
            });
        }

        area.draw_line(
            vec![Position::new(0.0, 1.0), Position::new(size.width, 1.0)],
            LineStyle::new().with_thickness(0.2),
        );
        Ok(RenderResult {
            size: Size::new(size.width, height),
            has_more: false,
        })
    }
}
