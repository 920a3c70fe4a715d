use ratatui::style::Modifier;
use ratatui::text::Line;

use super::{markdown_lines, parse_markdown_inline, wrap_message};

fn plain(line: &Line) -> String {
    line.spans.iter().map(|s| s.content.as_ref()).collect()
}

#[test]
fn inline_bold_address() {
    let spans = parse_markdown_inline("**Address:** 904 Westheimer Rd");
    assert_eq!(spans.len(), 2);
    assert_eq!(spans[0].content.as_ref(), "Address:");
    assert!(spans[0].style.add_modifier.contains(Modifier::BOLD));
    assert_eq!(spans[1].content.as_ref(), " 904 Westheimer Rd");
}

#[test]
fn inline_heading_drops_hashes() {
    let spans = parse_markdown_inline("### Uchi");
    assert_eq!(spans.len(), 1);
    assert_eq!(spans[0].content.as_ref(), "Uchi");
}

#[test]
fn inline_link_keeps_text() {
    let spans = parse_markdown_inline("[Map](https://maps.google.com/?q=Uchi) here");
    assert_eq!(spans[0].content.as_ref(), "Map");
    assert!(spans[0].style.add_modifier.contains(Modifier::UNDERLINED));
}

#[test]
fn document_headings_by_level() {
    let lines = markdown_lines("# Houston Eats\n## Day 1\n### Uchi\n#### Lunch: Hugo's", 80);
    let text: Vec<String> = lines.iter().map(plain).collect();
    assert_eq!(text, ["Houston Eats", "", "Day 1", "Uchi", "Lunch: Hugo's"]);
    let h1 = lines[0].spans[0].style;
    let h3 = lines[3].spans[0].style;
    assert!(h1.add_modifier.contains(Modifier::UNDERLINED));
    assert!(!h3.add_modifier.contains(Modifier::UNDERLINED));
    assert_ne!(h1.fg, h3.fg);
}

#[test]
fn document_bullets_hang() {
    let lines = markdown_lines("- Address: 1600 Westheimer Rd, Houston, TX 77006", 20);
    assert!(lines.len() > 1);
    assert!(plain(&lines[0]).starts_with("• "));
    assert!(plain(&lines[1]).starts_with("  "));
}

#[test]
fn document_rule_and_table_separator() {
    let lines = markdown_lines("---\n| Meal | Place |\n|---|---|\n| Lunch | Hugo's |", 10);
    assert_eq!(lines.len(), 3);
    assert_eq!(plain(&lines[0]), "─".repeat(10));
    assert_eq!(plain(&lines[1]), "Meal │ Place");
    assert_eq!(plain(&lines[2]), "Lunch │ Hugo's");
}

#[test]
fn hash_without_space_is_text() {
    let lines = markdown_lines("#1 pick", 80);
    assert_eq!(plain(&lines[0]), "#1 pick");
}

#[test]
fn wrap_message_preserves_newlines() {
    let lines = wrap_message("line1\nline2", 100);
    assert_eq!(lines, ["line1", "line2"]);
}

#[test]
fn wrap_message_wraps_long_line() {
    let lines = wrap_message("hello world test", 8);
    assert_eq!(lines, ["hello", "world", "test"]);
}

#[test]
fn wrap_message_empty_lines() {
    let lines = wrap_message("a\n\nb", 100);
    assert_eq!(lines, ["a", "", "b"]);
}
