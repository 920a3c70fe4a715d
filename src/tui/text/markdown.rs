//! Markdown styling for the itinerary pane: headings by level, lists, rules,
//! **bold**, `code`, and [links](url).

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use super::wrap::wrap_message;
use crate::tui::constants::{ACCENT, ACCENT_SECONDARY};

/// How a source line starts; decides the prefix and style of every wrapped row.
#[derive(Debug, PartialEq, Eq)]
enum Block<'a> {
    Heading(usize, &'a str),
    Bullet(&'a str),
    Numbered(&'a str, &'a str),
    TableRow(Vec<&'a str>),
    Rule,
    Text(&'a str),
}

fn classify(line: &str) -> Block<'_> {
    let trimmed = line.trim_start();
    if trimmed.starts_with('#') {
        let level = trimmed.chars().take_while(|&c| c == '#').count();
        let content = trimmed[level..].trim();
        if level <= 6 && (content.is_empty() || trimmed[level..].starts_with(' ')) {
            return Block::Heading(level, content);
        }
    }
    if is_rule(trimmed) {
        return Block::Rule;
    }
    if let Some(rest) = trimmed
        .strip_prefix("- ")
        .or_else(|| trimmed.strip_prefix("* "))
    {
        return Block::Bullet(rest);
    }
    if let Some((num, rest)) = parse_numbered_list_prefix(trimmed) {
        return Block::Numbered(num, rest);
    }
    if trimmed.starts_with('|') {
        let cells: Vec<&str> = trimmed
            .split('|')
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .collect();
        if !cells.is_empty() {
            return Block::TableRow(cells);
        }
    }
    Block::Text(line)
}

/// `---`, `***`, or `___` (three or more, spaces allowed).
fn is_rule(s: &str) -> bool {
    let compact: Vec<char> = s.chars().filter(|c| !c.is_whitespace()).collect();
    compact.len() >= 3 && ['-', '*', '_'].iter().any(|m| compact.iter().all(|c| c == m))
}

fn heading_style(level: usize) -> Style {
    match level {
        1 => Style::default()
            .fg(ACCENT)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        2 => Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        _ => Style::default()
            .fg(ACCENT_SECONDARY)
            .add_modifier(Modifier::BOLD),
    }
}

/// Style a whole Markdown document and wrap it to `width` columns.
pub(crate) fn markdown_lines(markdown: &str, width: usize) -> Vec<Line<'static>> {
    let width = width.max(1);
    let mut lines = Vec::new();
    for source in markdown.lines() {
        match classify(source) {
            Block::Heading(_, "") => {}
            Block::Heading(level, content) => {
                if level <= 2 && !lines.is_empty() {
                    lines.push(Line::default());
                }
                for chunk in wrap_message(content, width) {
                    lines.push(Line::from(Span::styled(chunk, heading_style(level))));
                }
            }
            Block::Rule => lines.push(Line::from(Span::styled(
                "─".repeat(width),
                Style::default().fg(Color::DarkGray),
            ))),
            Block::Bullet(rest) => {
                push_hanging(&mut lines, "• ", rest, width);
            }
            Block::Numbered(num, rest) => {
                push_hanging(&mut lines, &format!("{}. ", num), rest, width);
            }
            Block::TableRow(cells) => {
                if cells.iter().all(|c| c.chars().all(|ch| ch == '-' || ch == ':')) {
                    continue;
                }
                let mut spans = Vec::new();
                for (i, cell) in cells.into_iter().enumerate() {
                    if i > 0 {
                        spans.push(Span::styled(" │ ", Style::default().fg(ACCENT)));
                    }
                    spans.extend(parse_markdown_inline_inner(cell));
                }
                lines.push(Line::from(spans));
            }
            Block::Text(text) => {
                for chunk in wrap_message(text, width) {
                    lines.push(Line::from(parse_markdown_inline_inner(&chunk)));
                }
            }
        }
    }
    lines
}

/// List item: marker on the first row, continuation rows indented to match.
fn push_hanging(lines: &mut Vec<Line<'static>>, marker: &str, text: &str, width: usize) {
    let indent = marker.chars().count();
    for (i, chunk) in wrap_message(text, width.saturating_sub(indent).max(1))
        .into_iter()
        .enumerate()
    {
        let lead = if i == 0 {
            Span::styled(marker.to_string(), Style::default().fg(ACCENT))
        } else {
            Span::raw(" ".repeat(indent))
        };
        let mut spans = vec![lead];
        spans.extend(parse_markdown_inline_inner(&chunk));
        lines.push(Line::from(spans));
    }
}

/// Style a single line: headings, bullets, numbered items, table rows, inline markup.
/// Used for conversation lines, which are short and wrapped by the caller.
pub(crate) fn parse_markdown_inline(s: &str) -> Vec<Span<'static>> {
    match classify(s) {
        Block::Heading(level, content) => {
            vec![Span::styled(content.to_string(), heading_style(level))]
        }
        Block::Bullet(rest) => {
            let mut spans = vec![Span::styled("• ", Style::default().fg(ACCENT))];
            spans.extend(parse_markdown_inline_inner(rest));
            spans
        }
        Block::Numbered(num, rest) => {
            let mut spans = vec![Span::styled(format!("{} ", num), Style::default().fg(ACCENT))];
            spans.extend(parse_markdown_inline_inner(rest));
            spans
        }
        Block::TableRow(cells) => {
            let mut spans = Vec::new();
            for (i, cell) in cells.into_iter().enumerate() {
                if i > 0 {
                    spans.push(Span::styled(" │ ", Style::default().fg(ACCENT)));
                }
                spans.extend(parse_markdown_inline_inner(cell));
            }
            spans
        }
        Block::Rule | Block::Text(_) => parse_markdown_inline_inner(s),
    }
}

/// Parse "N. " or "N) " at start. Returns (number, rest) or None.
fn parse_numbered_list_prefix(s: &str) -> Option<(&str, &str)> {
    let s = s.trim_start();
    let mut digits = 0;
    for c in s.chars() {
        if c.is_ascii_digit() {
            digits += 1;
        } else {
            break;
        }
    }
    if digits == 0 {
        return None;
    }
    let num = &s[..digits];
    let rest = &s[digits..];
    if rest.starts_with(". ") || rest.starts_with(") ") {
        Some((num, &rest[2..]))
    } else {
        None
    }
}

/// Parse **bold**, `code`, [text](url) in the rest of a line.
fn parse_markdown_inline_inner(s: &str) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    let mut rest = s;
    while !rest.is_empty() {
        let next_bold = rest.find("**");
        let next_code = rest.find('`');
        let next_link = rest.find('[');
        let (which, pos) = match (next_bold, next_code, next_link) {
            (Some(b), None, None) => (0, b),
            (None, Some(c), None) => (1, c),
            (None, None, Some(l)) => (2, l),
            (Some(b), Some(c), None) => (if b <= c { 0 } else { 1 }, b.min(c)),
            (Some(b), None, Some(l)) => (if b <= l { 0 } else { 2 }, b.min(l)),
            (None, Some(c), Some(l)) => (if c <= l { 1 } else { 2 }, c.min(l)),
            (Some(b), Some(c), Some(l)) => {
                let p = b.min(c).min(l);
                let which = if p == b {
                    0
                } else if p == c {
                    1
                } else {
                    2
                };
                (which, p)
            }
            (None, None, None) => {
                spans.push(Span::raw(rest.to_string()));
                break;
            }
        };
        if pos > 0 {
            spans.push(Span::raw(rest[..pos].to_string()));
        }
        rest = &rest[pos..];
        if which == 0 && rest.starts_with("**") {
            rest = &rest[2..];
            if let Some(end) = rest.find("**") {
                spans.push(Span::styled(
                    rest[..end].to_string(),
                    Style::default().add_modifier(Modifier::BOLD),
                ));
                rest = &rest[end + 2..];
            } else {
                spans.push(Span::raw("**".to_string()));
            }
        } else if which == 2 && rest.starts_with('[') {
            rest = &rest[1..];
            if let Some(end_br) = rest.find(']') {
                let text = &rest[..end_br];
                rest = &rest[end_br + 1..];
                if rest.starts_with('(') {
                    rest = &rest[1..];
                    if let Some(end_paren) = rest.find(')') {
                        let _url = &rest[..end_paren];
                        rest = &rest[end_paren + 1..];
                        spans.push(Span::styled(
                            text.to_string(),
                            Style::default()
                                .fg(ACCENT)
                                .add_modifier(Modifier::UNDERLINED),
                        ));
                    } else {
                        spans.push(Span::raw(format!("[{}]", text)));
                    }
                } else {
                    spans.push(Span::raw(format!("[{}]", text)));
                }
            } else {
                spans.push(Span::raw("[".to_string()));
            }
        } else if which == 1 && rest.starts_with('`') {
            rest = &rest[1..];
            if let Some(end) = rest.find('`') {
                spans.push(Span::styled(
                    rest[..end].to_string(),
                    Style::default().fg(ACCENT),
                ));
                rest = &rest[end + 1..];
            } else {
                spans.push(Span::raw("`".to_string()));
            }
        }
    }
    spans
}
