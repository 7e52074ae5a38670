use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::watch;

use crate::config::Config;
use crate::corpus::Corpus;
use crate::data_models::{FilterValue, SearchResult};
use crate::db::InMemoryRepo;
use crate::debounce::{DEFAULT_DEBOUNCE_WINDOW, DebouncePhase, DebounceTimer};
use crate::errors::SearchError;
use crate::query_engine::QueryEngine;
use crate::recent::{DEFAULT_RECENT_CAPACITY, RecentSearches};
use crate::suggestions::SuggestionGenerator;

pub const DEFAULT_MATCH_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy)]
pub struct SessionOptions {
    pub debounce_window: Duration,
    pub recent_capacity: usize,
    pub match_timeout: Duration,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            debounce_window: DEFAULT_DEBOUNCE_WINDOW,
            recent_capacity: DEFAULT_RECENT_CAPACITY,
            match_timeout: DEFAULT_MATCH_TIMEOUT,
        }
    }
}

impl From<&Config> for SessionOptions {
    fn from(config: &Config) -> Self {
        Self {
            debounce_window: config.debounce_window(),
            recent_capacity: config.recent_capacity,
            match_timeout: config.match_timeout(),
        }
    }
}

/// Everything a UI needs to render the search screen.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchSnapshot {
    pub query: String,
    pub active_filter: FilterValue,
    pub results: Vec<SearchResult>,
    pub is_loading: bool,
    pub suggestions: Vec<String>,
    pub recent_searches: Vec<String>,
    pub error: Option<SearchError>,
    pub phase: DebouncePhase,
}

#[derive(Debug)]
struct SessionState {
    query: String,
    active_filter: FilterValue,
    results: Vec<SearchResult>,
    suggestions: Vec<String>,
    recent: RecentSearches,
    is_loading: bool,
    error: Option<SearchError>,
    phase: DebouncePhase,
    /// Bumped on every re-arm; a run may only apply its outcome while its
    /// generation is still current.
    generation: u64,
}

impl SessionState {
    fn new(recent_capacity: usize) -> Self {
        Self {
            query: String::new(),
            active_filter: FilterValue::All,
            results: Vec::new(),
            suggestions: Vec::new(),
            recent: RecentSearches::new(recent_capacity),
            is_loading: false,
            error: None,
            phase: DebouncePhase::Idle,
            generation: 0,
        }
    }

    fn snapshot(&self) -> SearchSnapshot {
        SearchSnapshot {
            query: self.query.clone(),
            active_filter: self.active_filter,
            results: self.results.clone(),
            is_loading: self.is_loading,
            suggestions: self.suggestions.clone(),
            recent_searches: self.recent.to_vec(),
            error: self.error.clone(),
            phase: self.phase.clone(),
        }
    }
}

struct Shared {
    state: Mutex<SessionState>,
    updates: watch::Sender<SearchSnapshot>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, state: &SessionState) {
        self.updates.send_replace(state.snapshot());
    }
}

/// State of one search screen, from mount to unmount.
///
/// Setters update the query state synchronously and re-arm the debounce
/// timer; results arrive later on the tokio runtime the session was used
/// from. Dropping the session cancels any pending run.
pub struct SearchSession {
    shared: Arc<Shared>,
    engine: QueryEngine,
    suggester: SuggestionGenerator,
    timer: DebounceTimer,
}

impl SearchSession {
    pub fn new(engine: QueryEngine, suggester: SuggestionGenerator, options: SessionOptions) -> Self {
        let state = SessionState::new(options.recent_capacity);
        let (updates, _) = watch::channel(state.snapshot());
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(state),
                updates,
            }),
            engine,
            suggester,
            timer: DebounceTimer::new(options.debounce_window),
        }
    }

    /// Session over an in-memory corpus.
    pub fn from_corpus(corpus: &Corpus, options: SessionOptions) -> Self {
        let repo = Arc::new(InMemoryRepo::from_corpus(corpus));
        Self::new(
            QueryEngine::new(repo, options.match_timeout),
            SuggestionGenerator::new(corpus.popular_searches()),
            options,
        )
    }

    pub fn set_query(&self, text: impl Into<String>) {
        let text = text.into();
        let mut state = self.shared.lock();
        if state.query == text {
            return;
        }
        state.suggestions = self.suggester.suggest(&text);
        state.query = text;
        self.rearm(&mut state);
    }

    pub fn set_active_filter(&self, filter: FilterValue) {
        let mut state = self.shared.lock();
        if state.active_filter == filter {
            return;
        }
        state.active_filter = filter;
        self.rearm(&mut state);
    }

    pub fn add_to_recent_searches(&self, text: &str) {
        let mut state = self.shared.lock();
        state.recent.add(text);
        self.shared.publish(&state);
    }

    /// Run `text` as a committed search: it becomes the query and is
    /// remembered in recent searches.
    pub fn submit(&self, text: &str) {
        self.set_query(text);
        self.add_to_recent_searches(text);
    }

    pub fn clear_query(&self) {
        self.set_query("");
    }

    pub fn query(&self) -> String {
        self.shared.lock().query.clone()
    }

    pub fn active_filter(&self) -> FilterValue {
        self.shared.lock().active_filter
    }

    pub fn results(&self) -> Vec<SearchResult> {
        self.shared.lock().results.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.shared.lock().is_loading
    }

    pub fn suggestions(&self) -> Vec<String> {
        self.shared.lock().suggestions.clone()
    }

    pub fn recent_searches(&self) -> Vec<String> {
        self.shared.lock().recent.to_vec()
    }

    /// The last search failure, cleared by the next completed search.
    pub fn error(&self) -> Option<SearchError> {
        self.shared.lock().error.clone()
    }

    pub fn phase(&self) -> DebouncePhase {
        self.shared.lock().phase.clone()
    }

    pub fn snapshot(&self) -> SearchSnapshot {
        self.shared.lock().snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<SearchSnapshot> {
        self.shared.updates.subscribe()
    }

    /// Enter `Pending` for the current query and filter and arm the timer.
    /// Any run still in flight is superseded, so loading ends here too.
    ///
    /// Called with the state lock held so generations and timer arms happen
    /// in the same order across threads.
    fn rearm(&self, state: &mut SessionState) {
        state.generation += 1;
        state.is_loading = false;
        state.phase = DebouncePhase::Pending {
            query: state.query.clone(),
            filter: state.active_filter,
            deadline: self.timer.deadline_from_now(),
        };
        self.shared.publish(state);

        let shared = Arc::clone(&self.shared);
        let engine = self.engine.clone();
        self.timer.arm(run_debounced(shared, engine, state.generation));
    }
}

async fn run_debounced(shared: Arc<Shared>, engine: QueryEngine, generation: u64) {
    let (query, filter) = {
        let mut state = shared.lock();
        if state.generation != generation {
            return;
        }
        if state.query.is_empty() {
            state.results.clear();
            state.error = None;
            state.phase = DebouncePhase::Idle;
            shared.publish(&state);
            return;
        }
        state.phase = DebouncePhase::Running {
            query: state.query.clone(),
            filter: state.active_filter,
        };
        state.is_loading = true;
        shared.publish(&state);
        (state.query.clone(), state.active_filter)
    };

    let outcome = engine.query(&query, filter).await;

    let mut state = shared.lock();
    if state.generation != generation {
        tracing::debug!(%query, "discarding results of superseded search");
        return;
    }
    match outcome {
        Ok(results) => {
            state.results = results;
            state.error = None;
        }
        Err(e) => state.error = Some(e),
    }
    state.is_loading = false;
    state.phase = DebouncePhase::Idle;
    shared.publish(&state);
}
