use dotenvy::dotenv;
use once_cell::sync::Lazy;
use std::env;
use std::str::FromStr;
use std::time::Duration;

pub static CONFIG: Lazy<Config> = Lazy::new(|| {
    dotenv().ok(); // Load .env file if present
    Config {
        debounce_ms: get_env_parsed_or_default("SEARCH_DEBOUNCE_MS", 300),
        recent_capacity: get_env_parsed_or_default("SEARCH_RECENT_CAPACITY", 5),
        timeout_ms: get_env_parsed_or_default("SEARCH_TIMEOUT_MS", 5_000),
        corpus_path: env::var("SEARCH_CORPUS_PATH").ok(),
        bind_addr: get_env_or_default("SEARCH_BIND_ADDR", "127.0.0.1:3000"),
    }
});

#[derive(Debug, Clone)]
pub struct Config {
    pub debounce_ms: u64,
    pub recent_capacity: usize,
    pub timeout_ms: u64,
    pub corpus_path: Option<String>,
    pub bind_addr: String,
}

impl Config {
    pub fn debounce_window(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn match_timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

fn get_env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn get_env_parsed_or_default<T>(key: &str, default: T) -> T
where
    T: FromStr + Copy + std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid value {raw:?} for {key}, using default {default}");
            default
        }),
        Err(_) => default,
    }
}
