//! Address formatting for map-search links.

/// Base URL for map searches; the formatted address is appended as the query.
pub const MAPS_SEARCH_URL: &str = "https://www.google.com/maps/search/?api=1&query=";

/// Turn a free-text address into a map-search query fragment.
///
/// Fixed substitution chain, applied in order: `", "` → `+`, `" "` → `+`,
/// `&` → `%26`, `#` → `%23`. None of the later steps reintroduce a character an
/// earlier step removed, so applying it twice gives the same result.
/// An empty address yields an empty fragment.
pub fn format_address_query(address: &str) -> String {
    if address.is_empty() {
        return String::new();
    }
    address
        .replace(", ", "+")
        .replace(' ', "+")
        .replace('&', "%26")
        .replace('#', "%23")
}

/// Full map link for an address, or an empty string when there is nothing to link to.
pub fn maps_link(address: &str) -> String {
    let query = format_address_query(address);
    if query.is_empty() {
        return String::new();
    }
    format!("{}{}", MAPS_SEARCH_URL, query)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_commas_spaces_ampersand_and_hash() {
        assert_eq!(
            format_address_query("123 Main St, Unit #4 & Co"),
            "123+Main+St+Unit+%234+%26+Co"
        );
    }

    #[test]
    fn reformatting_is_a_no_op() {
        let once = format_address_query("123 Main St, Unit #4 & Co");
        assert_eq!(format_address_query(&once), once);
    }

    #[test]
    fn plain_token_is_unchanged() {
        assert_eq!(format_address_query("Houston"), "Houston");
    }

    #[test]
    fn comma_without_space_is_kept() {
        assert_eq!(format_address_query("A,B C"), "A,B+C");
    }

    #[test]
    fn empty_address_has_no_link() {
        assert_eq!(format_address_query(""), "");
        assert_eq!(maps_link(""), "");
    }

    #[test]
    fn maps_link_prefixes_search_url() {
        assert_eq!(
            maps_link("1 Main St, Houston"),
            "https://www.google.com/maps/search/?api=1&query=1+Main+St+Houston"
        );
    }
}
