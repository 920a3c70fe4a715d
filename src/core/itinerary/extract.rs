//! Restaurant extraction: heading line followed by an `Address:` line.

use std::sync::OnceLock;

use regex::Regex;

use super::RestaurantRecord;

fn heading_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*#+\s*(.*)$").expect("heading pattern is valid"))
}

fn address_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)address:(.*)$").expect("address pattern is valid"))
}

/// Address text after the label, without emphasis markers left over from
/// `**Address:** ...` and surrounding whitespace.
fn clean_address(raw: &str) -> &str {
    raw.trim()
        .trim_start_matches(['*', '_'])
        .trim_end_matches(['*', '_'])
        .trim()
}

/// Scan Markdown for restaurant blocks and return them in source order.
///
/// A block is a heading (`#`, `##`, `###`, ...) followed, possibly after other
/// lines, by a line containing `Address:` (any case). A new heading before an
/// address line replaces the pending one, so a heading without its own address
/// never borrows the next block's. Fenced code blocks are skipped.
pub fn extract_restaurants(markdown: &str) -> Vec<RestaurantRecord> {
    let mut records = Vec::new();
    let mut pending: Option<&str> = None;
    let mut in_fence = false;

    for line in markdown.lines() {
        if line.trim_start().starts_with("```") {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            continue;
        }
        if let Some(caps) = heading_re().captures(line) {
            let text = caps.get(1).map_or("", |m| m.as_str()).trim();
            pending = (!text.is_empty()).then_some(text);
            continue;
        }
        let Some(name) = pending else { continue };
        if let Some(caps) = address_re().captures(line) {
            let address = clean_address(caps.get(1).map_or("", |m| m.as_str()));
            if address.is_empty() {
                continue;
            }
            records.push(RestaurantRecord::new(name, address));
            pending = None;
        }
    }

    log::debug!("Extracted {} restaurant(s) from itinerary", records.len());
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_blocks_in_source_order() {
        let md = "### Tony's Tacos\n- Address: 1 Main St, Houston\n- Cuisine: Mexican\n\n\
                  ### Pho Palace\n- Address:   22 Bellaire Blvd  \n";
        let records = extract_restaurants(md);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "Tony's Tacos");
        assert_eq!(records[0].address, "1 Main St, Houston");
        assert_eq!(records[1].name, "Pho Palace");
        assert_eq!(records[1].address, "22 Bellaire Blvd");
    }

    #[test]
    fn maps_link_is_derived_from_address() {
        let records = extract_restaurants("### A\n- Address: 1 Main St, Houston\n");
        assert_eq!(
            records[0].maps_link,
            "https://www.google.com/maps/search/?api=1&query=1+Main+St+Houston"
        );
    }

    #[test]
    fn heading_without_address_before_next_heading_is_skipped() {
        let md = "## Day 1\n\n### Breakfast Spot\n- Cuisine: Diner\n### Taco Stand\n- Address: 9 Elm St\n";
        let records = extract_restaurants(md);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Taco Stand");
    }

    #[test]
    fn intervening_lines_are_allowed() {
        let md = "### Noodle Bar\n\nA cosy spot.\n- Cuisine: Thai\n- Price range: $$\n- Address: 5 Oak Ave\n";
        let records = extract_restaurants(md);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].address, "5 Oak Ave");
    }

    #[test]
    fn address_label_is_case_insensitive_and_may_be_bold() {
        let md = "#### Lunch: Cafe Uno\n- **ADDRESS:** 77 River Rd\n";
        let records = extract_restaurants(md);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Lunch: Cafe Uno");
        assert_eq!(records[0].address, "77 River Rd");
    }

    #[test]
    fn only_first_address_line_counts() {
        let md = "### Cafe\n- Address: 1 First St\n- Address: 2 Second St\n";
        let records = extract_restaurants(md);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].address, "1 First St");
    }

    #[test]
    fn empty_address_value_is_ignored() {
        let md = "### Cafe\n- Address:\n- Address: 3 Third St\n";
        let records = extract_restaurants(md);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].address, "3 Third St");
    }

    #[test]
    fn address_without_heading_is_ignored() {
        assert!(extract_restaurants("- Address: 1 Main St\n").is_empty());
    }

    #[test]
    fn fenced_code_is_skipped() {
        let md = "```\n### Not A Place\n- Address: nowhere\n```\n### Real Place\n- Address: 4 Real Rd\n";
        let records = extract_restaurants(md);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Real Place");
    }

    #[test]
    fn address_on_last_line_without_newline() {
        let records = extract_restaurants("### Last\n- Address: 8 End St");
        assert_eq!(records[0].address, "8 End St");
    }

    #[test]
    fn no_blocks_yields_nothing() {
        assert!(extract_restaurants("Just some prose.\n").is_empty());
        assert!(extract_restaurants("").is_empty());
    }
}
