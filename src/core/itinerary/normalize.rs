//! Display-name recovery for stored restaurant records.
//!
//! Names come straight from itinerary headings, so they may carry a day prefix
//! ("Day 2 - Brunch at Lola's"), a meal label ("Dinner: Uchi") or leftover heading
//! markers. Two rule sets exist; [`NamePolicy`] picks one for the whole list.

use std::fmt;
use std::str::FromStr;

use super::{NormalizedPlace, RestaurantRecord};

/// "Day" headings this short are bare day markers, not restaurants.
const DAY_HEADING_MAX_CHARS: usize = 30;

const COLON_SEPARATOR: &str = ": ";
const DASH_SEPARATOR: &str = " - ";

/// Which prefix rules apply when cleaning names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NamePolicy {
    /// `#`, `Lunch` and `Dinner` names split on `": "`. `Day` names longer than
    /// 30 chars split on `" - "` (or `": "`), shorter ones are dropped.
    #[default]
    LengthGated,
    /// `#`, `Lunch` and `Dinner` names split on `": "`. `Day` names split on
    /// `" - "` regardless of length.
    MealLabeled,
}

impl NamePolicy {
    pub const ALL: [NamePolicy; 2] = [NamePolicy::LengthGated, NamePolicy::MealLabeled];

    pub fn as_str(self) -> &'static str {
        match self {
            NamePolicy::LengthGated => "length-gated",
            NamePolicy::MealLabeled => "meal-labeled",
        }
    }
}

impl fmt::Display for NamePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown name policy '{0}' (expected length-gated or meal-labeled)")]
pub struct ParsePolicyError(String);

impl FromStr for NamePolicy {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == wanted)
            .ok_or_else(|| ParsePolicyError(s.to_string()))
    }
}

/// Text after the first `sep`, trimmed. None when `sep` is absent.
fn after_separator<'a>(name: &'a str, sep: &str) -> Option<&'a str> {
    name.split_once(sep).map(|(_, rest)| rest.trim())
}

/// `": "` split for heading and meal names. Without the separator the name is
/// malformed; fall back to the name minus any leading `#` markers.
fn after_colon(name: &str) -> String {
    match after_separator(name, COLON_SEPARATOR) {
        Some(rest) => rest.to_string(),
        None => {
            log::debug!("No ': ' separator in '{}', stripping heading markers", name);
            name.trim_start_matches('#').trim().to_string()
        }
    }
}

/// Heading marker or meal label in front of the restaurant name.
fn is_labeled(name: &str) -> bool {
    name.starts_with('#') || name.starts_with("Lunch") || name.starts_with("Dinner")
}

/// Clean a single name. `None` means the record is dropped.
pub fn normalize_name(name: &str, policy: NamePolicy) -> Option<String> {
    match policy {
        NamePolicy::LengthGated => {
            if is_labeled(name) {
                Some(after_colon(name))
            } else if name.starts_with("Day") {
                if name.chars().count() <= DAY_HEADING_MAX_CHARS {
                    return None;
                }
                let sep = if name.contains(DASH_SEPARATOR) {
                    DASH_SEPARATOR
                } else {
                    COLON_SEPARATOR
                };
                Some(after_separator(name, sep).unwrap_or(name).to_string())
            } else {
                Some(name.to_string())
            }
        }
        NamePolicy::MealLabeled => {
            if is_labeled(name) {
                Some(after_colon(name))
            } else if name.starts_with("Day") {
                Some(after_separator(name, DASH_SEPARATOR).unwrap_or(name).to_string())
            } else {
                Some(name.to_string())
            }
        }
    }
}

/// Normalize a stored list. The first record is the store header and is always
/// skipped; address and map link are carried over as they are.
pub fn normalize_places(records: &[RestaurantRecord], policy: NamePolicy) -> Vec<NormalizedPlace> {
    records
        .iter()
        .skip(1)
        .filter_map(|record| {
            let name = normalize_name(&record.name, policy);
            if name.is_none() {
                log::debug!("Dropping day marker '{}'", record.name);
            }
            Some(NormalizedPlace {
                name: name?,
                address: record.address.clone(),
                maps_link: record.maps_link.clone(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str) -> RestaurantRecord {
        RestaurantRecord::new(name, "1 Main St")
    }

    #[test]
    fn first_record_is_always_skipped() {
        let records = vec![record("Tony's Tacos"), record("Pho Palace")];
        let out = normalize_places(&records, NamePolicy::LengthGated);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name, "Pho Palace");
    }

    #[test]
    fn empty_and_single_inputs_yield_nothing() {
        assert!(normalize_places(&[], NamePolicy::LengthGated).is_empty());
        assert!(normalize_places(&[record("Header")], NamePolicy::MealLabeled).is_empty());
    }

    #[test]
    fn long_day_heading_with_colon() {
        assert_eq!(
            normalize_name("Day 1: Exploring Downtown Cuisine", NamePolicy::LengthGated).as_deref(),
            Some("Exploring Downtown Cuisine")
        );
    }

    #[test]
    fn long_day_heading_prefers_dash() {
        assert_eq!(
            normalize_name("Day 3: Friday - The Breakfast Klub", NamePolicy::LengthGated)
                .as_deref(),
            Some("The Breakfast Klub")
        );
    }

    #[test]
    fn long_day_heading_without_separator_is_kept() {
        let name = "Day three of eating around Montrose";
        assert_eq!(normalize_name(name, NamePolicy::LengthGated).as_deref(), Some(name));
    }

    #[test]
    fn short_day_heading_is_dropped() {
        assert_eq!(normalize_name("Day 2", NamePolicy::LengthGated), None);
        let records = vec![record("Header"), record("Day 2")];
        assert!(normalize_places(&records, NamePolicy::LengthGated).is_empty());
    }

    #[test]
    fn day_gate_is_exactly_thirty_chars() {
        let thirty = "Day 1 - Brunch at Lola's Diner";
        assert_eq!(thirty.chars().count(), 30);
        assert_eq!(normalize_name(thirty, NamePolicy::LengthGated), None);
        let thirty_one = "Day 1 - Brunch at Lola's Diners";
        assert_eq!(
            normalize_name(thirty_one, NamePolicy::LengthGated).as_deref(),
            Some("Brunch at Lola's Diners")
        );
    }

    #[test]
    fn hash_name_splits_on_colon() {
        assert_eq!(
            normalize_name("# Lunch: Killen's BBQ", NamePolicy::LengthGated).as_deref(),
            Some("Killen's BBQ")
        );
    }

    #[test]
    fn hash_name_without_colon_strips_markers() {
        assert_eq!(
            normalize_name("### Tony's Tacos", NamePolicy::LengthGated).as_deref(),
            Some("Tony's Tacos")
        );
        assert_eq!(
            normalize_name("### Tony's Tacos", NamePolicy::MealLabeled).as_deref(),
            Some("Tony's Tacos")
        );
    }

    #[test]
    fn meal_labels_split_under_length_gated() {
        assert_eq!(
            normalize_name("Dinner: Uchi", NamePolicy::LengthGated).as_deref(),
            Some("Uchi")
        );
        assert_eq!(
            normalize_name("Lunch at the market", NamePolicy::LengthGated).as_deref(),
            Some("Lunch at the market")
        );
    }

    #[test]
    fn meal_labels_split_under_meal_labeled() {
        assert_eq!(
            normalize_name("Dinner: Uchi", NamePolicy::MealLabeled).as_deref(),
            Some("Uchi")
        );
        assert_eq!(
            normalize_name("Lunch: Ninfa's on Navigation", NamePolicy::MealLabeled).as_deref(),
            Some("Ninfa's on Navigation")
        );
    }

    #[test]
    fn meal_labeled_day_uses_dash_without_length_gate() {
        assert_eq!(
            normalize_name("Day 1 - Breakfast Stop", NamePolicy::MealLabeled).as_deref(),
            Some("Breakfast Stop")
        );
        assert_eq!(
            normalize_name("Day 2", NamePolicy::MealLabeled).as_deref(),
            Some("Day 2")
        );
    }

    #[test]
    fn plain_names_are_unchanged() {
        for policy in NamePolicy::ALL {
            assert_eq!(
                normalize_name("Xochi", policy).as_deref(),
                Some("Xochi"),
                "policy {}",
                policy
            );
        }
    }

    #[test]
    fn day_prefix_is_case_sensitive() {
        assert_eq!(
            normalize_name("day 2", NamePolicy::LengthGated).as_deref(),
            Some("day 2")
        );
    }

    #[test]
    fn address_and_link_carry_through() {
        let records = vec![
            record("Header"),
            RestaurantRecord::new("# Dinner: Uchi", "904 Westheimer Rd, Houston"),
        ];
        let out = normalize_places(&records, NamePolicy::LengthGated);
        assert_eq!(out[0].address, "904 Westheimer Rd, Houston");
        assert_eq!(out[0].maps_link, records[1].maps_link);
    }

    #[test]
    fn policy_parses_from_config_strings() {
        assert_eq!("length-gated".parse::<NamePolicy>().unwrap(), NamePolicy::LengthGated);
        assert_eq!("Meal_Labeled".parse::<NamePolicy>().unwrap(), NamePolicy::MealLabeled);
        assert!("fuzzy".parse::<NamePolicy>().is_err());
    }
}
