//! Markdown preview: the buffer parsed into a flat list of blocks for display.

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};

/// A run of inline text with uniform styling.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    pub strikethrough: bool,
    pub code: bool,
    pub link: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewBlock {
    Heading {
        level: u8,
        spans: Vec<Span>,
    },
    Paragraph {
        spans: Vec<Span>,
        /// Number of enclosing block quotes.
        quote_depth: usize,
    },
    ListItem {
        /// Nesting depth, zero for a top-level list.
        depth: usize,
        /// Bullet or number; empty for continuation paragraphs of an item.
        marker: String,
        spans: Vec<Span>,
    },
    CodeBlock {
        language: Option<String>,
        code: String,
    },
    Rule,
}

impl PreviewBlock {
    /// Plain text of the block without styling.
    pub fn plain_text(&self) -> String {
        match self {
            Self::Heading { spans, .. }
            | Self::Paragraph { spans, .. }
            | Self::ListItem { spans, .. } => spans.iter().map(|s| s.text.as_str()).collect(),
            Self::CodeBlock { code, .. } => code.clone(),
            Self::Rule => String::new(),
        }
    }
}

/// Parse `markdown` into preview blocks.
pub fn render(markdown: &str) -> Vec<PreviewBlock> {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let mut builder = PreviewBuilder::default();
    for event in Parser::new_ext(markdown, options) {
        builder.process_event(event);
    }
    builder.finish()
}

#[derive(Default)]
struct InlineStyle {
    bold: usize,
    italic: usize,
    strikethrough: usize,
    link: usize,
}

/// An open list and the number its next item gets (`None` for bullets).
struct ListContext {
    next_number: Option<u64>,
}

#[derive(Default)]
struct PreviewBuilder {
    blocks: Vec<PreviewBlock>,
    spans: Vec<Span>,
    style: InlineStyle,
    heading: Option<u8>,
    code: Option<(Option<String>, String)>,
    lists: Vec<ListContext>,
    /// Marker waiting for the first paragraph of the current item.
    item_marker: Option<String>,
    in_item: bool,
    quote_depth: usize,
}

impl PreviewBuilder {
    fn process_event(&mut self, event: Event) {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => self.push_text(&text, false),
            Event::Code(code) => self.push_text(&code, true),
            Event::SoftBreak => self.push_text(" ", false),
            Event::HardBreak => self.push_text("\n", false),
            Event::Rule => {
                self.flush();
                self.blocks.push(PreviewBlock::Rule);
            }
            Event::TaskListMarker(checked) => {
                self.push_text(if checked { "[x] " } else { "[ ] " }, false)
            }
            Event::Html(html) | Event::InlineHtml(html) => self.push_text(&html, false),
            _ => {}
        }
    }

    fn start_tag(&mut self, tag: Tag) {
        match tag {
            Tag::Heading { level, .. } => {
                self.flush();
                self.heading = Some(match level {
                    HeadingLevel::H1 => 1,
                    HeadingLevel::H2 => 2,
                    HeadingLevel::H3 => 3,
                    HeadingLevel::H4 => 4,
                    HeadingLevel::H5 => 5,
                    HeadingLevel::H6 => 6,
                });
            }
            Tag::CodeBlock(kind) => {
                self.flush();
                let language = match kind {
                    CodeBlockKind::Fenced(lang) if !lang.is_empty() => Some(lang.to_string()),
                    _ => None,
                };
                self.code = Some((language, String::new()));
            }
            Tag::List(start) => {
                self.flush();
                self.lists.push(ListContext { next_number: start });
            }
            Tag::Item => {
                self.flush();
                self.in_item = true;
                let marker = match self.lists.last_mut() {
                    Some(ListContext {
                        next_number: Some(n),
                    }) => {
                        let marker = format!("{}.", n);
                        *n += 1;
                        marker
                    }
                    _ => "•".to_string(),
                };
                self.item_marker = Some(marker);
            }
            Tag::BlockQuote(_) => {
                self.flush();
                self.quote_depth += 1;
            }
            Tag::Paragraph => self.flush(),
            Tag::Emphasis => self.style.italic += 1,
            Tag::Strong => self.style.bold += 1,
            Tag::Strikethrough => self.style.strikethrough += 1,
            Tag::Link { .. } => self.style.link += 1,
            _ => {}
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Heading(_) => {
                self.flush();
                self.heading = None;
            }
            TagEnd::CodeBlock => {
                if let Some((language, mut code)) = self.code.take() {
                    if code.ends_with('\n') {
                        code.pop();
                    }
                    self.blocks.push(PreviewBlock::CodeBlock { language, code });
                }
            }
            TagEnd::Paragraph => self.flush(),
            TagEnd::Item => {
                self.flush();
                self.in_item = false;
                self.item_marker = None;
            }
            TagEnd::List(_) => {
                self.flush();
                self.lists.pop();
                // Back inside the enclosing item, if any
                self.in_item = !self.lists.is_empty();
            }
            TagEnd::BlockQuote(_) => {
                self.flush();
                self.quote_depth = self.quote_depth.saturating_sub(1);
            }
            TagEnd::Emphasis => self.style.italic = self.style.italic.saturating_sub(1),
            TagEnd::Strong => self.style.bold = self.style.bold.saturating_sub(1),
            TagEnd::Strikethrough => {
                self.style.strikethrough = self.style.strikethrough.saturating_sub(1)
            }
            TagEnd::Link => self.style.link = self.style.link.saturating_sub(1),
            _ => {}
        }
    }

    fn push_text(&mut self, text: &str, code: bool) {
        if let Some((_, buffer)) = self.code.as_mut() {
            buffer.push_str(text);
            return;
        }
        let span = Span {
            text: text.to_string(),
            bold: self.style.bold > 0,
            italic: self.style.italic > 0,
            strikethrough: self.style.strikethrough > 0,
            code,
            link: self.style.link > 0,
        };
        // Merge with the previous span when the styling matches
        match self.spans.last_mut() {
            Some(last) if same_style(last, &span) => last.text.push_str(&span.text),
            _ => self.spans.push(span),
        }
    }

    fn flush(&mut self) {
        if self.spans.iter().all(|s| s.text.trim().is_empty()) {
            self.spans.clear();
            return;
        }
        let spans = std::mem::take(&mut self.spans);
        let block = if let Some(level) = self.heading {
            PreviewBlock::Heading { level, spans }
        } else if self.in_item {
            PreviewBlock::ListItem {
                depth: self.lists.len().saturating_sub(1),
                marker: self.item_marker.take().unwrap_or_default(),
                spans,
            }
        } else {
            PreviewBlock::Paragraph {
                spans,
                quote_depth: self.quote_depth,
            }
        };
        self.blocks.push(block);
    }

    fn finish(mut self) -> Vec<PreviewBlock> {
        self.flush();
        self.blocks
    }
}

fn same_style(a: &Span, b: &Span) -> bool {
    a.bold == b.bold
        && a.italic == b.italic
        && a.strikethrough == b.strikethrough
        && a.code == b.code
        && a.link == b.link
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document() {
        assert!(render("").is_empty());
        assert!(render("   \n\n").is_empty());
    }

    #[test]
    fn test_heading_and_paragraph() {
        let blocks = render("# Title\n\nSome *body* text.");
        assert_eq!(blocks.len(), 2);
        assert!(matches!(blocks[0], PreviewBlock::Heading { level: 1, .. }));
        assert_eq!(blocks[0].plain_text(), "Title");
        assert_eq!(blocks[1].plain_text(), "Some body text.");

        let PreviewBlock::Paragraph { spans, quote_depth } = &blocks[1] else {
            panic!("expected paragraph, got {:?}", blocks[1]);
        };
        assert_eq!(*quote_depth, 0);
        assert!(spans.iter().any(|s| s.italic && s.text == "body"));
    }

    #[test]
    fn test_ordered_list_numbers_items() {
        let blocks = render("3. three\n4. four\n");
        let markers: Vec<_> = blocks
            .iter()
            .map(|b| match b {
                PreviewBlock::ListItem { marker, .. } => marker.as_str(),
                other => panic!("unexpected block {:?}", other),
            })
            .collect();
        assert_eq!(markers, ["3.", "4."]);
    }

    #[test]
    fn test_nested_list_depth() {
        let blocks = render("- outer\n  - inner\n- next\n");
        let depths: Vec<_> = blocks
            .iter()
            .filter_map(|b| match b {
                PreviewBlock::ListItem { depth, .. } => Some(*depth),
                _ => None,
            })
            .collect();
        assert_eq!(depths, [0, 1, 0]);
    }

    #[test]
    fn test_fenced_code_block() {
        let blocks = render("```rust\nfn main() {}\n```\n");
        assert_eq!(
            blocks,
            vec![PreviewBlock::CodeBlock {
                language: Some("rust".to_string()),
                code: "fn main() {}".to_string(),
            }]
        );
    }

    #[test]
    fn test_block_quote_depth() {
        let blocks = render("> quoted\n\nplain");
        assert!(matches!(
            blocks[0],
            PreviewBlock::Paragraph { quote_depth: 1, .. }
        ));
        assert!(matches!(
            blocks[1],
            PreviewBlock::Paragraph { quote_depth: 0, .. }
        ));
    }

    #[test]
    fn test_inline_code_and_rule() {
        let blocks = render("use `cargo`\n\n---\n");
        let PreviewBlock::Paragraph { spans, .. } = &blocks[0] else {
            panic!("expected paragraph");
        };
        assert!(spans.iter().any(|s| s.code && s.text == "cargo"));
        assert_eq!(blocks[1], PreviewBlock::Rule);
    }
}
