use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::data_models::{FilterValue, SearchResult};
use crate::db::SearchRepository;
use crate::errors::SearchError;

/// Lowercase and trim a raw query the same way record fields are compared.
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// True if any of title, subtitle or location contains the normalized query.
/// An empty query matches every record; callers short-circuit before that.
pub fn matches_query(record: &SearchResult, normalized_query: &str) -> bool {
    record
        .searchable_fields()
        .any(|field| field.to_lowercase().contains(normalized_query))
}

pub fn matches_filter(record: &SearchResult, filter: FilterValue) -> bool {
    filter.admits(record.kind)
}

/// Scan `records` in order, keeping those that pass both query and filter.
pub fn match_records(
    records: &[SearchResult],
    normalized_query: &str,
    filter: FilterValue,
) -> Vec<SearchResult> {
    records
        .iter()
        .filter(|record| matches_filter(record, filter) && matches_query(record, normalized_query))
        .cloned()
        .collect()
}

#[test]
fn test_normalize_query() {
    assert_eq!(normalize_query("  Charlie \t"), "charlie");
    assert_eq!(normalize_query("DOG"), "dog");
    assert_eq!(normalize_query("   "), "");
}

#[test]
fn test_matches_query_checks_optional_fields() {
    use crate::data_models::SearchResultType;

    let record = SearchResult::new("lost-1", SearchResultType::Lost, "Charlie")
        .with_subtitle("Golden Retriever")
        .with_location("Central Park, New York")
        .with_reward("$500");

    assert!(matches_query(&record, "charlie"));
    assert!(matches_query(&record, "golden"));
    assert!(matches_query(&record, "park, new"));
    // reward is not a searchable field
    assert!(!matches_query(&record, "$500"));

    let bare = SearchResult::new("pet-9", SearchResultType::Pet, "Biscuit");
    assert!(!matches_query(&bare, "park"));
    assert!(matches_query(&bare, ""));
}

#[test]
fn test_match_records_preserves_corpus_order() {
    use crate::data_models::SearchResultType;

    let records = vec![
        SearchResult::new("c", SearchResultType::Pet, "Dog C"),
        SearchResult::new("a", SearchResultType::Expert, "Dog A"),
        SearchResult::new("b", SearchResultType::Pet, "Dog B"),
    ];
    let ids: Vec<_> = match_records(&records, "dog", FilterValue::All)
        .into_iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(ids, vec!["c", "a", "b"]);

    let pets: Vec<_> = match_records(&records, "dog", SearchResultType::Pet.into())
        .into_iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(pets, vec!["c", "b"]);
}

/// The Result Matcher: normalizes a query and asks the repository for the
/// matching records, bounded by a timeout.
#[derive(Clone)]
pub struct QueryEngine {
    repo: Arc<dyn SearchRepository>,
    timeout: Duration,
}

impl QueryEngine {
    pub fn new(repo: Arc<dyn SearchRepository>, timeout: Duration) -> Self {
        Self { repo, timeout }
    }

    /// Run one match. Whitespace-only queries normalize to `""` and match
    /// every record; callers wanting nothing for an empty query skip the call.
    pub async fn query(
        &self,
        query: &str,
        filter: FilterValue,
    ) -> Result<Vec<SearchResult>, SearchError> {
        let normalized = normalize_query(query);
        let start = Instant::now();
        let outcome =
            match tokio::time::timeout(self.timeout, self.repo.find_matching(&normalized, filter))
                .await
            {
                Ok(outcome) => outcome,
                Err(_) => Err(SearchError::Timeout(self.timeout)),
            };

        match &outcome {
            Ok(results) => tracing::debug!(
                query = %normalized,
                %filter,
                matches = results.len(),
                elapsed_ms = start.elapsed().as_millis() as u64,
                "search completed"
            ),
            Err(e) => tracing::warn!(query = %normalized, %filter, "search failed: {e}"),
        }
        outcome
    }
}
