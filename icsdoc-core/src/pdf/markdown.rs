//! Markdown to a flat list of printable blocks.
//!
//! Inline formatting is flattened to plain text; only the block structure
//! survives into the PDF.

use pulldown_cmark::{Event, Options, Parser, Tag};

#[derive(Debug, Clone, PartialEq)]
pub enum BlockKind {
    Heading(usize),
    Paragraph,
    /// A list item; `marker` is printed before the first line.
    ListItem { marker: String },
    Code,
    Rule,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub kind: BlockKind,
    /// Nesting depth from lists and block quotes
    pub depth: usize,
    pub text: String,
}

/// Tags we need to remember until their matching end event.
enum Open {
    Heading,
    Paragraph,
    List,
    Item,
    Quote,
    Code,
    TableRow,
    TableCell,
    Other,
}

#[derive(Default)]
struct BlockBuilder {
    blocks: Vec<Block>,
    current: Option<Block>,
    open: Vec<Open>,
    /// Next number for each open list, `None` for bullet lists
    lists: Vec<Option<u64>>,
    quotes: usize,
}

impl BlockBuilder {
    fn depth(&self) -> usize {
        self.lists.len().saturating_sub(1) + self.quotes
    }

    fn flush(&mut self) {
        if let Some(mut block) = self.current.take() {
            if block.kind != BlockKind::Code {
                block.text = block.text.trim().to_string();
            }
            let keep_empty = matches!(block.kind, BlockKind::ListItem { .. });
            if !block.text.is_empty() || keep_empty {
                self.blocks.push(block);
            }
        }
    }

    fn begin(&mut self, kind: BlockKind) {
        self.flush();
        self.current = Some(Block {
            kind,
            depth: self.depth(),
            text: String::new(),
        });
    }

    fn push_text(&mut self, text: &str) {
        if self.current.is_none() {
            // Loose text such as block-level HTML
            self.begin(BlockKind::Paragraph);
        }
        if let Some(block) = self.current.as_mut() {
            block.text.push_str(text);
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        let open = match tag {
            Tag::Heading { level, .. } => {
                self.begin(BlockKind::Heading(level as usize));
                Open::Heading
            }
            Tag::Paragraph => {
                // The first paragraph of a loose list item continues the item.
                let continues_item = self
                    .current
                    .as_ref()
                    .is_some_and(|b| matches!(b.kind, BlockKind::ListItem { .. }) && b.text.is_empty());
                if !continues_item {
                    self.begin(BlockKind::Paragraph);
                }
                Open::Paragraph
            }
            Tag::List(first) => {
                self.flush();
                self.lists.push(first);
                Open::List
            }
            Tag::Item => {
                let marker = match self.lists.last_mut() {
                    Some(Some(n)) => {
                        let marker = format!("{n}.");
                        *n += 1;
                        marker
                    }
                    _ => "\u{2022}".to_string(),
                };
                self.begin(BlockKind::ListItem { marker });
                Open::Item
            }
            Tag::BlockQuote(_) => {
                self.flush();
                self.quotes += 1;
                Open::Quote
            }
            Tag::CodeBlock(_) => {
                self.begin(BlockKind::Code);
                Open::Code
            }
            Tag::HtmlBlock => {
                self.begin(BlockKind::Paragraph);
                Open::Paragraph
            }
            Tag::TableHead | Tag::TableRow => {
                self.begin(BlockKind::Paragraph);
                Open::TableRow
            }
            Tag::TableCell => Open::TableCell,
            _ => Open::Other,
        };
        self.open.push(open);
    }

    fn end(&mut self) {
        match self.open.pop() {
            Some(Open::Heading | Open::Paragraph | Open::Item | Open::Code | Open::TableRow) => {
                self.flush()
            }
            Some(Open::List) => {
                self.flush();
                self.lists.pop();
            }
            Some(Open::Quote) => {
                self.flush();
                self.quotes = self.quotes.saturating_sub(1);
            }
            Some(Open::TableCell) => self.push_text(" | "),
            Some(Open::Other) | None => {}
        }
    }

    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(_) => self.end(),
            Event::Text(text) | Event::Code(text) => self.push_text(&text),
            Event::Html(html) | Event::InlineHtml(html) => self.push_text(&html),
            Event::SoftBreak => self.push_text(" "),
            Event::HardBreak => self.push_text("\n"),
            Event::Rule => {
                self.flush();
                self.blocks.push(Block {
                    kind: BlockKind::Rule,
                    depth: self.depth(),
                    text: String::new(),
                });
            }
            Event::TaskListMarker(done) => self.push_text(if done { "[x] " } else { "[ ] " }),
            _ => {}
        }
    }
}

/// Split Markdown into printable blocks, in document order.
pub fn parse_blocks(markdown: &str) -> Vec<Block> {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let mut builder = BlockBuilder::default();
    for event in Parser::new_ext(markdown, options) {
        builder.event(event);
    }
    builder.flush();
    builder.blocks
}
