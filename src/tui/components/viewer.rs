use crossterm::event::{KeyCode, KeyEvent, MouseEvent, MouseEventKind};
use pulldown_cmark::{Event, HeadingLevel, Parser, Tag, TagEnd};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

#[derive(Debug, Clone, PartialEq, Eq)]
enum BlockKind {
    Heading(HeadingLevel),
    Paragraph,
    Item {
        marker: String,
        depth: usize,
        list: usize,
    },
    Code,
    Rule,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct MarkdownBlock {
    kind: BlockKind,
    text: String,
}

/// Scrollable view of a Markdown summary, wrapped to the viewport width.
pub struct SummaryViewer {
    pub title: String,
    pub scroll: usize,
    blocks: Vec<MarkdownBlock>,
    layout_width: u16,
    lines: Vec<Line<'static>>,
}

impl SummaryViewer {
    pub fn new(content: &str, title: String) -> Self {
        Self {
            title,
            scroll: 0,
            blocks: parse_markdown(content),
            layout_width: 0,
            lines: Vec::new(),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent, area_height: usize) -> bool {
        let page_size = area_height.saturating_sub(2).max(1);
        let max_scroll = self.lines.len().saturating_sub(page_size);

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.scroll = self.scroll.saturating_sub(1);
                true
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.scroll = (self.scroll + 1).min(max_scroll);
                true
            }
            KeyCode::PageUp => {
                self.scroll = self.scroll.saturating_sub(page_size);
                true
            }
            KeyCode::PageDown => {
                self.scroll = (self.scroll + page_size).min(max_scroll);
                true
            }
            KeyCode::Home => {
                self.scroll = 0;
                true
            }
            KeyCode::End => {
                self.scroll = max_scroll;
                true
            }
            _ => false,
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent, area_height: usize) -> bool {
        let max_scroll = self
            .lines
            .len()
            .saturating_sub(area_height.saturating_sub(2).max(1));

        match mouse.kind {
            MouseEventKind::ScrollUp => {
                self.scroll = self.scroll.saturating_sub(3);
                true
            }
            MouseEventKind::ScrollDown => {
                self.scroll = (self.scroll + 3).min(max_scroll);
                true
            }
            _ => false,
        }
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect) {
        let inner_width = area.width.saturating_sub(2).max(1);
        if inner_width != self.layout_width {
            self.lines = layout_blocks(&self.blocks, inner_width as usize);
            self.layout_width = inner_width;
        }

        let visible_lines = area.height.saturating_sub(2) as usize;
        let total_lines = self.lines.len();
        self.scroll = self.scroll.min(total_lines.saturating_sub(visible_lines));

        let scroll_info = if total_lines > visible_lines {
            format!(
                " (lines {}-{} of {})",
                self.scroll + 1,
                (self.scroll + visible_lines).min(total_lines),
                total_lines
            )
        } else {
            String::new()
        };

        let lines: Vec<Line> = self
            .lines
            .iter()
            .skip(self.scroll)
            .take(visible_lines)
            .cloned()
            .collect();

        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!("{}{scroll_info}", self.title));

        f.render_widget(Paragraph::new(lines).block(block), area);
    }

    #[cfg(test)]
    fn laid_out(&mut self, width: u16) -> Vec<String> {
        self.lines = layout_blocks(&self.blocks, width as usize);
        self.layout_width = width;
        self.lines
            .iter()
            .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }
}

fn parse_markdown(source: &str) -> Vec<MarkdownBlock> {
    let mut blocks = Vec::new();
    let mut current: Option<MarkdownBlock> = None;
    // One entry per open list: next number for ordered lists.
    let mut lists: Vec<Option<u64>> = Vec::new();
    let mut list_count = 0;

    fn flush(current: &mut Option<MarkdownBlock>, blocks: &mut Vec<MarkdownBlock>) {
        if let Some(block) = current.take()
            && (!block.text.trim().is_empty() || block.kind == BlockKind::Rule)
        {
            blocks.push(block);
        }
    }

    for event in Parser::new(source) {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                flush(&mut current, &mut blocks);
                current = Some(MarkdownBlock {
                    kind: BlockKind::Heading(level),
                    text: String::new(),
                });
            }
            Event::Start(Tag::Paragraph) => {
                if current.is_none() {
                    current = Some(MarkdownBlock {
                        kind: BlockKind::Paragraph,
                        text: String::new(),
                    });
                }
            }
            Event::Start(Tag::CodeBlock(_)) => {
                flush(&mut current, &mut blocks);
                current = Some(MarkdownBlock {
                    kind: BlockKind::Code,
                    text: String::new(),
                });
            }
            Event::Start(Tag::List(start)) => {
                flush(&mut current, &mut blocks);
                lists.push(start);
                list_count += 1;
            }
            Event::End(TagEnd::List(_)) => {
                flush(&mut current, &mut blocks);
                lists.pop();
            }
            Event::Start(Tag::Item) => {
                flush(&mut current, &mut blocks);
                let marker = match lists.last_mut() {
                    Some(Some(n)) => {
                        let marker = format!("{n}. ");
                        *n += 1;
                        marker
                    }
                    _ => "• ".to_string(),
                };
                current = Some(MarkdownBlock {
                    kind: BlockKind::Item {
                        marker,
                        depth: lists.len().saturating_sub(1),
                        list: list_count,
                    },
                    text: String::new(),
                });
            }
            Event::End(TagEnd::Paragraph) => {
                if matches!(
                    current.as_ref().map(|b| &b.kind),
                    Some(BlockKind::Paragraph)
                ) {
                    flush(&mut current, &mut blocks);
                } else if let Some(block) = current.as_mut() {
                    block.text.push(' ');
                }
            }
            Event::End(TagEnd::Heading(_) | TagEnd::Item | TagEnd::CodeBlock) => {
                flush(&mut current, &mut blocks);
            }
            Event::Rule => {
                flush(&mut current, &mut blocks);
                blocks.push(MarkdownBlock {
                    kind: BlockKind::Rule,
                    text: String::new(),
                });
            }
            Event::Text(text) | Event::Code(text) => {
                current
                    .get_or_insert_with(|| MarkdownBlock {
                        kind: BlockKind::Paragraph,
                        text: String::new(),
                    })
                    .text
                    .push_str(&text);
            }
            Event::SoftBreak | Event::HardBreak => {
                if let Some(block) = current.as_mut() {
                    block.text.push(' ');
                }
            }
            _ => {}
        }
    }

    flush(&mut current, &mut blocks);
    blocks
}

fn layout_blocks(blocks: &[MarkdownBlock], width: usize) -> Vec<Line<'static>> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for (i, block) in blocks.iter().enumerate() {
        match &block.kind {
            BlockKind::Heading(level) => {
                let color = if *level == HeadingLevel::H1 {
                    Color::Yellow
                } else {
                    Color::LightYellow
                };
                let style = Style::default().fg(color).add_modifier(Modifier::BOLD);
                for line in textwrap::wrap(block.text.trim(), fill(width)) {
                    lines.push(Line::from(Span::styled(line.into_owned(), style)));
                }
            }
            BlockKind::Paragraph => {
                for line in textwrap::wrap(block.text.trim(), fill(width)) {
                    lines.push(Line::from(line.into_owned()));
                }
            }
            BlockKind::Item { marker, depth, .. } => {
                let initial = format!("{}{marker}", "  ".repeat(*depth));
                let subsequent = " ".repeat(initial.chars().count());
                let options = fill(width)
                    .initial_indent(&initial)
                    .subsequent_indent(&subsequent);
                for line in textwrap::wrap(block.text.trim(), options) {
                    lines.push(Line::from(Span::styled(
                        line.into_owned(),
                        Style::default().fg(Color::Green),
                    )));
                }
            }
            BlockKind::Code => {
                for line in block.text.trim_end().lines() {
                    lines.push(Line::from(Span::styled(
                        line.to_string(),
                        Style::default().fg(Color::Cyan),
                    )));
                }
            }
            BlockKind::Rule => {
                lines.push(Line::from(Span::styled(
                    "─".repeat(width),
                    Style::default().fg(Color::DarkGray),
                )));
            }
        }

        let same_list = match (&block.kind, blocks.get(i + 1).map(|b| &b.kind)) {
            (BlockKind::Item { list, .. }, Some(BlockKind::Item { list: next, .. })) => {
                list == next
            }
            _ => false,
        };
        if i + 1 < blocks.len() && !same_list {
            lines.push(Line::default());
        }
    }

    lines
}

// Greedy line filling: each line takes as many words as fit.
fn fill<'a>(width: usize) -> textwrap::Options<'a> {
    textwrap::Options::new(width).wrap_algorithm(textwrap::WrapAlgorithm::FirstFit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    #[test]
    fn renders_headings_lists_and_paragraphs() {
        let mut viewer = SummaryViewer::new(
            "# Title\n\nSome *intro* text.\n\n- first\n- second\n\n1. one\n2. two\n",
            "Summary".into(),
        );

        let lines = viewer.laid_out(40);

        assert_eq!(
            lines,
            vec![
                "Title",
                "",
                "Some intro text.",
                "",
                "• first",
                "• second",
                "",
                "1. one",
                "2. two",
            ]
        );
    }

    #[test]
    fn wraps_to_width_with_hanging_indent() {
        let mut viewer = SummaryViewer::new("- alpha beta gamma delta", "Summary".into());
        let lines = viewer.laid_out(12);
        assert_eq!(lines, vec!["• alpha beta", "  gamma", "  delta"]);
    }

    #[test]
    fn paragraphs_fill_each_line_before_wrapping() {
        let mut viewer = SummaryViewer::new("aa bb cc dd ee ff", "Summary".into());
        let lines = viewer.laid_out(8);
        assert_eq!(lines, vec!["aa bb cc", "dd ee ff"]);
    }

    #[test]
    fn scrolling_is_clamped() {
        let text = (0..30)
            .map(|i| format!("paragraph {i}"))
            .collect::<Vec<_>>()
            .join("\n\n");
        let mut viewer = SummaryViewer::new(&text, "Summary".into());
        viewer.laid_out(40);

        let end = KeyEvent::new(KeyCode::End, KeyModifiers::NONE);
        viewer.handle_key(end, 12);
        assert_eq!(viewer.scroll, viewer.lines.len() - 10);

        let down = KeyEvent::new(KeyCode::Down, KeyModifiers::NONE);
        viewer.handle_key(down, 12);
        assert_eq!(viewer.scroll, viewer.lines.len() - 10);

        let home = KeyEvent::new(KeyCode::Home, KeyModifiers::NONE);
        viewer.handle_key(home, 12);
        assert_eq!(viewer.scroll, 0);
    }
}
