use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;

use pawsearch::corpus::Corpus;
use pawsearch::data_models::{FilterValue, SearchResult, SearchResultType};
use pawsearch::db::{InMemoryRepo, SearchRepository};
use pawsearch::errors::SearchError;
use pawsearch::query_engine::QueryEngine;

mod test_helpers {
    use super::*;
    use futures::future::BoxFuture;

    pub fn reference_engine() -> QueryEngine {
        let repo = Arc::new(InMemoryRepo::from_corpus(&Corpus::reference()));
        QueryEngine::new(repo, Duration::from_secs(1))
    }

    pub fn ids(results: &[SearchResult]) -> Vec<&str> {
        results.iter().map(|r| r.id.as_str()).collect()
    }

    /// Never answers within any reasonable timeout.
    pub struct StalledRepo;

    impl SearchRepository for StalledRepo {
        fn find_matching<'a>(
            &'a self,
            _normalized_query: &'a str,
            _filter: FilterValue,
        ) -> BoxFuture<'a, Result<Vec<SearchResult>, SearchError>> {
            Box::pin(async {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok(Vec::new())
            })
        }
    }

    pub struct DownRepo;

    impl SearchRepository for DownRepo {
        fn find_matching<'a>(
            &'a self,
            _normalized_query: &'a str,
            _filter: FilterValue,
        ) -> BoxFuture<'a, Result<Vec<SearchResult>, SearchError>> {
            Box::pin(async { Err(SearchError::Transient("connection refused".to_string())) })
        }
    }
}

use test_helpers::*;

#[tokio::test]
async fn test_query_matches_title_case_insensitively() -> Result<()> {
    let engine = reference_engine();
    let results = engine.query("charlie", FilterValue::All).await?;
    assert_eq!(ids(&results), vec!["lost-1"]);

    let results = engine.query("  CHARLIE  ", FilterValue::All).await?;
    assert_eq!(ids(&results), vec!["lost-1"]);
    Ok(())
}

#[tokio::test]
async fn test_query_matches_location_with_filter() -> Result<()> {
    let engine = reference_engine();

    let lost = engine
        .query("central", FilterValue::Only(SearchResultType::Lost))
        .await?;
    assert_eq!(ids(&lost), vec!["lost-1"]);

    let experts = engine
        .query("central", FilterValue::Only(SearchResultType::Expert))
        .await?;
    assert!(experts.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_query_matches_subtitle() -> Result<()> {
    let engine = reference_engine();
    let results = engine.query("veterinarian", FilterValue::All).await?;
    assert_eq!(ids(&results), vec!["expert-1"]);
    Ok(())
}

#[tokio::test]
async fn test_results_keep_corpus_order() -> Result<()> {
    let engine = reference_engine();
    // "NY" in both people locations, "New York" in the lost pet's
    let results = engine.query("n", FilterValue::All).await?;
    let got = ids(&results);
    let mut positions: Vec<usize> = Vec::new();
    let corpus = Corpus::reference();
    for id in &got {
        positions.push(corpus.records().iter().position(|r| r.id == *id).unwrap());
    }
    let mut sorted = positions.clone();
    sorted.sort();
    assert_eq!(positions, sorted);
    Ok(())
}

#[tokio::test]
async fn test_all_filter_is_superset_of_each_type() -> Result<()> {
    let engine = reference_engine();
    for query in ["e", "dog", "pet", "ny", "groom"] {
        let all = engine.query(query, FilterValue::All).await?;
        for kind in [
            SearchResultType::Pet,
            SearchResultType::Expert,
            SearchResultType::Service,
            SearchResultType::Lost,
            SearchResultType::People,
        ] {
            let only = engine.query(query, FilterValue::Only(kind)).await?;
            assert!(only.iter().all(|r| r.kind == kind));
            let expected: Vec<_> = all.iter().filter(|r| r.kind == kind).cloned().collect();
            assert_eq!(only, expected, "query {query:?} filter {kind:?}");
        }
    }
    Ok(())
}

#[tokio::test]
async fn test_whitespace_query_matches_every_record_in_order() -> Result<()> {
    let engine = reference_engine();
    let records = Corpus::reference().records();
    let expected: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();

    let results = engine.query("   \t", FilterValue::All).await?;
    assert_eq!(ids(&results), expected);

    let lost = engine
        .query("  ", FilterValue::Only(SearchResultType::Lost))
        .await?;
    assert_eq!(ids(&lost), vec!["lost-1"]);
    Ok(())
}

#[tokio::test]
async fn test_no_match() -> Result<()> {
    let engine = reference_engine();
    assert!(engine.query("iguana", FilterValue::All).await?.is_empty());
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_slow_repository_times_out() {
    let timeout = Duration::from_millis(250);
    let engine = QueryEngine::new(Arc::new(StalledRepo), timeout);
    let outcome = engine.query("dog", FilterValue::All).await;
    assert_eq!(outcome, Err(SearchError::Timeout(timeout)));
}

#[tokio::test]
async fn test_repository_failure_propagates() {
    let engine = QueryEngine::new(Arc::new(DownRepo), Duration::from_secs(1));
    let outcome = engine.query("dog", FilterValue::All).await;
    assert!(matches!(outcome, Err(SearchError::Transient(_))));
}
