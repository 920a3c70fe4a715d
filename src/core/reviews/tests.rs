use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::provider::RawReview;
use super::*;

/// Scripted provider that records every call.
#[derive(Default)]
struct FakeProvider {
    /// (query, address) -> ids; missing key = empty result.
    searches: HashMap<(String, Option<String>), Vec<String>>,
    reviews: HashMap<String, Vec<RawReview>>,
    fail_search: bool,
    calls: Mutex<Vec<String>>,
}

impl FakeProvider {
    fn with_search(mut self, query: &str, address: Option<&str>, ids: &[&str]) -> Self {
        self.searches.insert(
            (query.to_string(), address.map(str::to_string)),
            ids.iter().map(|s| s.to_string()).collect(),
        );
        self
    }

    fn with_reviews(mut self, id: &str, reviews: &[(Option<&str>, &str)]) -> Self {
        self.reviews.insert(
            id.to_string(),
            reviews
                .iter()
                .map(|(rating, text)| RawReview {
                    rating: rating.map(str::to_string),
                    text: text.to_string(),
                })
                .collect(),
        );
        self
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReviewProvider for FakeProvider {
    async fn search(&self, query: &str, address: Option<&str>) -> Result<Vec<String>, ProviderError> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("search:{}|{}", query, address.unwrap_or("-")));
        if self.fail_search {
            return Err(ProviderError::Decode("boom".into()));
        }
        Ok(self
            .searches
            .get(&(query.to_string(), address.map(str::to_string)))
            .cloned()
            .unwrap_or_default())
    }

    async fn reviews(&self, location_id: &str) -> Result<Vec<RawReview>, ProviderError> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("reviews:{}", location_id));
        self.reviews
            .get(location_id)
            .cloned()
            .ok_or_else(|| ProviderError::Decode("unknown id".into()))
    }
}

fn place(name: &str, address: &str) -> NormalizedPlace {
    NormalizedPlace {
        name: name.into(),
        address: address.into(),
        maps_link: crate::core::address::maps_link(address),
    }
}

#[test]
fn review_display_uses_question_mark_without_rating() {
    let rated = Review {
        rating: Some("5".into()),
        text: "Great".into(),
    };
    let unrated = Review {
        rating: None,
        text: "Fine".into(),
    };
    assert_eq!(rated.to_string(), "⭐ 5/5 - Great");
    assert_eq!(unrated.to_string(), "⭐ ?/5 - Fine");
}

#[tokio::test]
async fn disabled_lookup_is_empty() {
    let lookup = ReviewLookup::disabled();
    assert!(!lookup.is_enabled());
    assert!(lookup.lookup("Uchi", "904 Westheimer Rd").await.is_empty());
    let all = lookup
        .lookup_all(&[place("Uchi", "a"), place("Hugo's", "b")], 4)
        .await;
    assert_eq!(all, vec![Vec::<Review>::new(), Vec::new()]);
}

#[tokio::test]
async fn missing_key_builds_disabled_lookup() {
    let config = ReviewConfig {
        api_key: None,
        base_url: "http://127.0.0.1:9".into(),
        timeout: Duration::from_secs(1),
        concurrency: 4,
    };
    assert!(!ReviewLookup::from_config(&config).is_enabled());
}

#[tokio::test]
async fn address_match_is_preferred() {
    let provider = Arc::new(
        FakeProvider::default()
            .with_search("uchi", Some("904 Westheimer Rd"), &["1", "2"])
            .with_reviews("1", &[(Some("5"), "Omakase was perfect")]),
    );
    let lookup = ReviewLookup::with_provider(provider.clone());

    let reviews = lookup.lookup("Uchi", "904 Westheimer Rd").await;
    assert_eq!(reviews.len(), 1);
    assert_eq!(reviews[0].to_string(), "⭐ 5/5 - Omakase was perfect");
    assert_eq!(
        provider.calls(),
        vec!["search:uchi|904 Westheimer Rd", "reviews:1"]
    );
}

#[tokio::test]
async fn falls_back_to_name_only_search() {
    let provider = Arc::new(
        FakeProvider::default()
            .with_search("hugo's", None, &["77"])
            .with_reviews("77", &[(None, "Mole is a must")]),
    );
    let lookup = ReviewLookup::with_provider(provider.clone());

    let reviews = lookup.lookup("Hugo's", "1600 Westheimer Rd").await;
    assert_eq!(reviews[0].to_string(), "⭐ ?/5 - Mole is a must");
    assert_eq!(
        provider.calls(),
        vec![
            "search:hugo's|1600 Westheimer Rd",
            "search:hugo's|-",
            "reviews:77"
        ]
    );
}

#[tokio::test]
async fn blank_address_searches_once_by_name() {
    let provider = Arc::new(FakeProvider::default());
    let lookup = ReviewLookup::with_provider(provider.clone());

    assert!(lookup.lookup("Uchi", "  ").await.is_empty());
    assert_eq!(provider.calls(), vec!["search:uchi|-"]);
}

#[tokio::test]
async fn no_location_means_no_review_fetch() {
    let provider = Arc::new(FakeProvider::default());
    let lookup = ReviewLookup::with_provider(provider.clone());

    assert!(lookup.lookup("Nowhere Diner", "1 Elm St").await.is_empty());
    assert!(provider.calls().iter().all(|c| c.starts_with("search:")));
}

#[tokio::test]
async fn keeps_first_three_non_empty_reviews() {
    let provider = Arc::new(
        FakeProvider::default()
            .with_search("uchi", None, &["1"])
            .with_reviews(
                "1",
                &[
                    (Some("5"), "one"),
                    (Some("4"), "   "),
                    (Some("3"), "two"),
                    (None, ""),
                    (Some("2"), "three"),
                    (Some("1"), "four"),
                ],
            ),
    );
    let lookup = ReviewLookup::with_provider(provider);

    let texts: Vec<String> = lookup
        .lookup("Uchi", "")
        .await
        .into_iter()
        .map(|r| r.text)
        .collect();
    assert_eq!(texts, vec!["one", "two", "three"]);
}

#[tokio::test]
async fn search_errors_degrade_to_empty() {
    let provider = Arc::new(FakeProvider {
        fail_search: true,
        ..FakeProvider::default()
    });
    let lookup = ReviewLookup::with_provider(provider.clone());

    assert!(lookup.lookup("Uchi", "904 Westheimer Rd").await.is_empty());
    assert_eq!(provider.calls().len(), 2);
}

#[tokio::test]
async fn review_fetch_error_degrades_to_empty() {
    let provider = Arc::new(FakeProvider::default().with_search("uchi", None, &["404"]));
    let lookup = ReviewLookup::with_provider(provider);
    assert!(lookup.lookup("Uchi", "").await.is_empty());
}

#[tokio::test]
async fn lookup_all_preserves_order_and_isolates_failures() {
    let provider = Arc::new(
        FakeProvider::default()
            .with_search("a", None, &["1"])
            .with_search("c", None, &["3"])
            .with_reviews("1", &[(Some("5"), "first")])
            .with_reviews("3", &[(Some("3"), "third")]),
    );
    let lookup = ReviewLookup::with_provider(provider);
    let places = [place("A", ""), place("B", ""), place("C", "")];

    let all = lookup.lookup_all(&places, 2).await;
    assert_eq!(all.len(), 3);
    assert_eq!(all[0][0].text, "first");
    assert!(all[1].is_empty());
    assert_eq!(all[2][0].text, "third");
}

#[tokio::test]
async fn tripadvisor_end_to_end_with_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/location/search"))
        .and(query_param("address", "904 Westheimer Rd"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/location/search"))
        .and(query_param("searchQuery", "uchi"))
        .and(query_param_is_missing("address"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"data": [{"location_id": 4242}]})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/location/4242/reviews"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"rating": 5, "text": "Hama chili is unreal"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = ReviewConfig {
        api_key: Some("key".into()),
        base_url: server.uri(),
        timeout: Duration::from_secs(2),
        concurrency: 4,
    };
    let lookup = ReviewLookup::from_config(&config);
    let reviews = lookup.lookup("Uchi", "904 Westheimer Rd").await;
    assert_eq!(
        reviews.iter().map(Review::to_string).collect::<Vec<_>>(),
        vec!["⭐ 5/5 - Hama chili is unreal"]
    );
}
