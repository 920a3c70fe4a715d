//! Itinerary pipeline: restaurant extraction from generated Markdown, the on-disk
//! store shared with the Reviews view, display-name normalization, and HTML rendering.

mod extract;
mod normalize;
mod render;
mod store;

pub use extract::extract_restaurants;
pub use normalize::{NamePolicy, normalize_places};
pub use render::{render_html, render_pending_html};
pub use store::ItineraryStore;

use serde::{Deserialize, Serialize};

use crate::core::address;

/// A restaurant pulled out of an itinerary: heading text, address, and map link.
///
/// `maps_link` is always derived from `address`; it is recomputed on load rather
/// than trusted from the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredRecord")]
pub struct RestaurantRecord {
    pub name: String,
    pub address: String,
    pub maps_link: String,
}

impl RestaurantRecord {
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        let address = address.into();
        let maps_link = address::maps_link(&address);
        Self {
            name: name.into(),
            address,
            maps_link,
        }
    }

    /// Header entry written at index 0 of the store (itinerary title, no address).
    pub fn header(title: impl Into<String>) -> Self {
        Self::new(title, "")
    }
}

/// On-disk shape. `maps_link` is accepted but ignored.
#[derive(Deserialize)]
struct StoredRecord {
    #[serde(default)]
    name: String,
    #[serde(default)]
    address: String,
}

impl From<StoredRecord> for RestaurantRecord {
    fn from(stored: StoredRecord) -> Self {
        RestaurantRecord::new(stored.name, stored.address)
    }
}

/// A restaurant ready for display and review lookup: same shape as
/// [`RestaurantRecord`], with positional and meal prefixes stripped from `name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedPlace {
    pub name: String,
    pub address: String,
    pub maps_link: String,
}

impl NormalizedPlace {
    /// True when the place has a usable map link.
    pub fn has_link(&self) -> bool {
        !self.maps_link.is_empty()
    }
}

#[cfg(test)]
mod tests;
