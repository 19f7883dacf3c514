//! Application configuration loaded from environment variables.

use std::path::PathBuf;
use std::time::Duration;

use projections::PoolConfig;

/// Server and worker pool configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `HOST` — bind address (default: `"localhost"`)
/// - `PORT` — listen port (default: `9001`)
/// - `RUST_LOG` — tracing filter directive (default: `"info"`)
/// - `WORKER_COUNT` — number of event workers (default: `3`)
/// - `QUEUE_CAPACITY` — event queue capacity (default: the worker count)
/// - `EVENTS_FILE` — JSON-lines event feed to ingest (default: the built-in
///   demo sequence)
///
/// Values that fail to parse, and zero sizes, fall back to the defaults.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub workers: usize,
    pub queue_capacity: usize,
    pub events_file: Option<PathBuf>,
    pub read_timeout: Duration,
    pub write_timeout: Duration,
    pub shutdown_grace: Duration,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let workers = parse_positive(lookup("WORKER_COUNT")).unwrap_or(defaults.workers);

        Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            log_level: lookup("RUST_LOG").unwrap_or(defaults.log_level),
            workers,
            queue_capacity: parse_positive(lookup("QUEUE_CAPACITY")).unwrap_or(workers),
            events_file: lookup("EVENTS_FILE")
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from),
            ..defaults
        }
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns the worker pool sizing.
    pub fn pool(&self) -> PoolConfig {
        PoolConfig {
            workers: self.workers,
            queue_capacity: self.queue_capacity,
        }
    }
}

fn parse_positive(value: Option<String>) -> Option<usize> {
    value.and_then(|v| v.parse().ok()).filter(|n: &usize| *n > 0)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 9001,
            log_level: "info".to_string(),
            workers: 3,
            queue_capacity: 3,
            events_file: None,
            read_timeout: Duration::from_secs(5),
            write_timeout: Duration::from_secs(10),
            shutdown_grace: Duration::from_secs(30),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 9001);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.workers, 3);
        assert_eq!(config.queue_capacity, 3);
        assert_eq!(config.read_timeout, Duration::from_secs(5));
        assert_eq!(config.write_timeout, Duration::from_secs(10));
        assert_eq!(config.events_file, None);
    }

    #[test]
    fn test_addr_default() {
        assert_eq!(Config::default().addr(), "localhost:9001");
    }

    #[test]
    fn test_empty_environment_gives_defaults() {
        let config = Config::from_lookup(lookup(&[]));
        assert_eq!(config.addr(), "localhost:9001");
        assert_eq!(config.pool(), PoolConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("HOST", "0.0.0.0"),
            ("PORT", "8080"),
            ("RUST_LOG", "debug"),
            ("WORKER_COUNT", "8"),
        ]));
        assert_eq!(config.addr(), "0.0.0.0:8080");
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.workers, 8);
        // queue follows the worker count unless set explicitly
        assert_eq!(config.queue_capacity, 8);
    }

    #[test]
    fn test_explicit_queue_capacity() {
        let config = Config::from_lookup(lookup(&[("WORKER_COUNT", "2"), ("QUEUE_CAPACITY", "100")]));
        assert_eq!(
            config.pool(),
            PoolConfig {
                workers: 2,
                queue_capacity: 100
            }
        );
    }

    #[test]
    fn test_events_file() {
        let config = Config::from_lookup(lookup(&[("EVENTS_FILE", "/var/feed/events.jsonl")]));
        assert_eq!(
            config.events_file,
            Some(PathBuf::from("/var/feed/events.jsonl"))
        );

        let blank = Config::from_lookup(lookup(&[("EVENTS_FILE", "  ")]));
        assert_eq!(blank.events_file, None);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = Config::from_lookup(lookup(&[
            ("PORT", "not-a-port"),
            ("WORKER_COUNT", "0"),
            ("QUEUE_CAPACITY", "-4"),
        ]));
        assert_eq!(config.port, 9001);
        assert_eq!(config.workers, 3);
        assert_eq!(config.queue_capacity, 3);
    }
}
