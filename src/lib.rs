pub mod api;
pub mod config;
pub mod corpus;
pub mod data_models;
pub mod db;
pub mod debounce;
pub mod errors;
pub mod query_engine;
pub mod recent;
pub mod session;
pub mod suggestions;

pub use data_models::{FilterValue, SearchResult, SearchResultType};
pub use errors::SearchError;
pub use session::{SearchSession, SearchSnapshot, SessionOptions};
