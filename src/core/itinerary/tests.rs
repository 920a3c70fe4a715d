//! Pipeline tests: generated Markdown → store → normalized places.

use super::*;

const SAMPLE_ITINERARY: &str = "\
# Houston Food Itinerary

## Day 1 - Arrival

### Day 1 - The Breakfast Klub Soul Food Stop
- Address: 3711 Travis St, Houston, TX 77002
- Cuisine: Soul food

#### Lunch: Ninfa's on Navigation
- Address: 2704 Navigation Blvd, Houston, TX 77003

### Uchi
- **Address:** 904 Westheimer Rd, Houston, TX 77006
- Description: Japanese omakase

---

## Tips
- Reserve Uchi two weeks ahead.
";

#[test]
fn three_record_store_under_each_policy() {
    let records = vec![
        RestaurantRecord::header("Houston Food Itinerary"),
        RestaurantRecord::new("### Tony's Tacos", "1 Main St"),
        RestaurantRecord::new("Day 1 - Breakfast Stop", "2 Main St"),
    ];

    let gated = normalize_places(&records, NamePolicy::LengthGated);
    let names: Vec<&str> = gated.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Tony's Tacos"]);

    let labeled = normalize_places(&records, NamePolicy::MealLabeled);
    let names: Vec<&str> = labeled.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Tony's Tacos", "Breakfast Stop"]);
}

#[test]
fn markdown_to_places_through_the_store() {
    let dir = tempfile::tempdir().unwrap();
    let store = ItineraryStore::new(dir.path().join("restaurants.json"));

    let records = extract_restaurants(SAMPLE_ITINERARY);
    assert_eq!(records.len(), 3);
    store.save("Houston Food Itinerary", &records).unwrap();

    let loaded = store.load_or_empty();
    assert_eq!(loaded.len(), 4);

    let places = normalize_places(&loaded, NamePolicy::LengthGated);
    let names: Vec<&str> = places.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "The Breakfast Klub Soul Food Stop",
            "Ninfa's on Navigation",
            "Uchi"
        ]
    );
    assert_eq!(places[2].address, "904 Westheimer Rd, Houston, TX 77006");
    assert!(places.iter().all(NormalizedPlace::has_link));

    let places = normalize_places(&loaded, NamePolicy::MealLabeled);
    assert_eq!(places[1].name, "Ninfa's on Navigation");
}

#[test]
fn default_policy_strips_meal_labels_from_extracted_headings() {
    let md = "# Houston Food Itinerary\n\n## Day 1\n\n\
#### Lunch: Ninfa's on Navigation\n- Address: 2704 Navigation Blvd\n\n\
#### Dinner: Uchi\n- Address: 904 Westheimer Rd\n";
    let mut records = vec![RestaurantRecord::header("Houston Food Itinerary")];
    records.extend(extract_restaurants(md));

    let places = normalize_places(&records, NamePolicy::default());
    let names: Vec<&str> = places.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Ninfa's on Navigation", "Uchi"]);
}

#[test]
fn rendered_page_keeps_headings_and_rules() {
    let page = render_html("Houston", SAMPLE_ITINERARY);
    assert!(page.contains("<h1>Houston Food Itinerary</h1>"));
    assert!(page.contains("<h3>Uchi</h3>"));
    assert!(page.contains("<hr />"));
}
