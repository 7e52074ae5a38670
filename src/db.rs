use std::sync::Arc;

use futures::future::{self, BoxFuture};

use crate::corpus::Corpus;
use crate::data_models::{FilterValue, SearchResult};
use crate::errors::SearchError;
use crate::query_engine::match_records;

/// Read-only access to the searchable records.
///
/// The engine only ever hands over an already normalized (lowercased,
/// trimmed, non-empty) query. Implementations backed by a remote store report
/// failures as [`SearchError::Transient`]; timeouts are enforced by the
/// caller.
pub trait SearchRepository: Send + Sync {
    fn find_matching<'a>(
        &'a self,
        normalized_query: &'a str,
        filter: FilterValue,
    ) -> BoxFuture<'a, Result<Vec<SearchResult>, SearchError>>;
}

/// Repository over an in-memory corpus, scanned in corpus order.
#[derive(Debug, Clone)]
pub struct InMemoryRepo {
    records: Arc<[SearchResult]>,
}

impl InMemoryRepo {
    pub fn new(records: Arc<[SearchResult]>) -> Self {
        log::info!("In-memory search repository ready with {} records", records.len());
        Self { records }
    }

    pub fn from_corpus(corpus: &Corpus) -> Self {
        Self::new(corpus.records())
    }
}

impl SearchRepository for InMemoryRepo {
    fn find_matching<'a>(
        &'a self,
        normalized_query: &'a str,
        filter: FilterValue,
    ) -> BoxFuture<'a, Result<Vec<SearchResult>, SearchError>> {
        Box::pin(future::ready(Ok(match_records(
            &self.records,
            normalized_query,
            filter,
        ))))
    }
}
