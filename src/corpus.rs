use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use once_cell::sync::Lazy;
use serde::Deserialize;

use crate::data_models::{SearchResult, SearchResultType};
use crate::errors::CorpusError;

/// Popular searches offered as suggestions.
pub const POPULAR_SEARCHES: [&str; 5] = [
    "Lost pets nearby",
    "Veterinarian",
    "Dog grooming",
    "Pet sitter",
    "Dog trainer",
];

/// Built-in reference records, used when no corpus file is configured.
pub static REFERENCE_RECORDS: Lazy<Vec<SearchResult>> = Lazy::new(|| {
    vec![
        SearchResult::new("person-1", SearchResultType::People, "Emma Wilson")
            .with_subtitle("Pet Trainer")
            .with_image("https://images.unsplash.com/photo-1438761681033-6461ffad8d80?ixlib=rb-1.2.1&auto=format&fit=crop&w=500&q=80")
            .with_location("Brooklyn, NY")
            .with_rating(4.9),
        SearchResult::new("person-2", SearchResultType::People, "Michael Chen")
            .with_subtitle("Dog Walker")
            .with_image("https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?ixlib=rb-1.2.1&auto=format&fit=crop&w=500&q=80")
            .with_location("Manhattan, NY")
            .with_rating(4.7),
        SearchResult::new("lost-1", SearchResultType::Lost, "Charlie")
            .with_subtitle("Golden Retriever")
            .with_image("https://images.unsplash.com/photo-1552053831-71594a27632d?ixlib=rb-1.2.1&auto=format&fit=crop&w=500&q=80")
            .with_location("Central Park, New York")
            .with_distance("0.8 miles away")
            .with_reward("$500"),
        SearchResult::new("expert-1", SearchResultType::Expert, "Dr. Sarah Johnson")
            .with_subtitle("Veterinarian")
            .with_image("https://images.unsplash.com/photo-1559839734-2b71ea197ec2?ixlib=rb-1.2.1&auto=format&fit=crop&w=500&q=80")
            .with_price("$50/consultation")
            .with_rating(4.9)
            .with_available(true),
        SearchResult::new("service-1", SearchResultType::Service, "Pet Grooming")
            .with_subtitle("Professional grooming services")
            .with_price("From $40")
            .with_rating(4.8),
    ]
});

/// Read-only reference data shared by every session.
#[derive(Debug, Clone)]
pub struct Corpus {
    records: Arc<[SearchResult]>,
    popular_searches: Arc<[String]>,
}

#[derive(Debug, Deserialize)]
struct CorpusFile {
    records: Vec<SearchResult>,
    #[serde(default)]
    popular_searches: Option<Vec<String>>,
}

impl Corpus {
    /// Build a corpus, rejecting duplicate record ids.
    pub fn new(
        records: Vec<SearchResult>,
        popular_searches: Vec<String>,
    ) -> Result<Self, CorpusError> {
        if let Some(id) = first_duplicate_id(&records) {
            return Err(CorpusError::DuplicateId(id));
        }
        Ok(Self {
            records: records.into(),
            popular_searches: popular_searches.into(),
        })
    }

    pub fn reference() -> Self {
        Self {
            records: Arc::from(REFERENCE_RECORDS.as_slice()),
            popular_searches: POPULAR_SEARCHES.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Parse a JSON corpus: `{"records": [...], "popular_searches": [...]}`.
    /// Without `popular_searches` the built-in list is used.
    pub fn from_json(json: &str) -> Result<Self, CorpusError> {
        let file: CorpusFile = serde_json::from_str(json)?;
        let popular = file
            .popular_searches
            .unwrap_or_else(|| POPULAR_SEARCHES.iter().map(|s| s.to_string()).collect());
        Self::new(file.records, popular)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, CorpusError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let corpus = Self::from_json(&json)?;
        tracing::info!(
            "Loaded corpus from {}: {} records, {} popular searches",
            path.display(),
            corpus.records.len(),
            corpus.popular_searches.len()
        );
        Ok(corpus)
    }

    /// The configured corpus file if there is one, else the reference data.
    pub fn from_config(corpus_path: Option<&str>) -> Result<Self, CorpusError> {
        match corpus_path {
            Some(path) => Self::from_json_file(path),
            None => Ok(Self::reference()),
        }
    }

    pub fn records(&self) -> Arc<[SearchResult]> {
        Arc::clone(&self.records)
    }

    pub fn popular_searches(&self) -> Arc<[String]> {
        Arc::clone(&self.popular_searches)
    }
}

fn first_duplicate_id(records: &[SearchResult]) -> Option<String> {
    let mut seen = HashSet::with_capacity(records.len());
    records
        .iter()
        .find(|record| !seen.insert(record.id.as_str()))
        .map(|record| record.id.clone())
}

#[test]
fn test_reference_ids_are_unique() {
    let records = REFERENCE_RECORDS.to_vec();
    let popular = POPULAR_SEARCHES.iter().map(|s| s.to_string()).collect();
    assert!(Corpus::new(records, popular).is_ok());
}

#[test]
fn test_duplicate_ids_rejected() {
    let records = vec![
        SearchResult::new("a", SearchResultType::Pet, "Rex"),
        SearchResult::new("a", SearchResultType::Pet, "Max"),
    ];
    let err = Corpus::new(records, Vec::new()).unwrap_err();
    assert!(matches!(err, CorpusError::DuplicateId(id) if id == "a"));
}

#[test]
fn test_from_json_defaults_popular_searches() {
    let json = r#"{"records": [{"id": "pet-1", "type": "pet", "title": "Biscuit", "location": "Austin, TX"}]}"#;
    let corpus = Corpus::from_json(json).unwrap();
    assert_eq!(corpus.records().len(), 1);
    assert_eq!(corpus.records()[0].location.as_deref(), Some("Austin, TX"));
    assert_eq!(corpus.popular_searches().len(), POPULAR_SEARCHES.len());
}

#[test]
fn test_from_json_rejects_unknown_type() {
    let json = r#"{"records": [{"id": "x", "type": "fish", "title": "Nemo"}]}"#;
    assert!(matches!(Corpus::from_json(json), Err(CorpusError::Json(_))));
}
