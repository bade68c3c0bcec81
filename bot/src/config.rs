use anyhow::{bail, Result};
use log::{info, warn};
use std::env;
use std::fs;
use std::time::Duration;

const PROXY_FILE: &str = "proxies.txt";

const DEFAULT_RETRY_BACKOFF: Duration = Duration::from_secs(60);
const DEFAULT_CYCLE_WINDOW: Duration = Duration::from_secs(24 * 60 * 60);
const RESET_GRACE: Duration = Duration::from_secs(5);
const START_STAGGER: Duration = Duration::from_secs(15);

/// Process-wide configuration, built once at startup and shared read-only
/// with every worker. Nothing reads the environment after this point.
pub struct Config {
    pub private_keys: Vec<String>,
    pub proxies: Vec<String>,
    /// Sleep between cycles after a failed run.
    pub retry_backoff: Duration,
    /// Fallback sleep when the service gives no usable reset time.
    pub cycle_window: Duration,
    /// Slack added on top of the service-provided reset time.
    pub reset_grace: Duration,
    /// Offset between consecutive workers' first cycles.
    pub start_stagger: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let private_keys = collect_keys(|i| env::var(format!("PRIVATE_KEY_{i}")).ok());
        if private_keys.is_empty() {
            bail!("no private keys found; add PRIVATE_KEY_1, PRIVATE_KEY_2, ... to the environment");
        }
        info!("Found {} wallet(s) to process.", private_keys.len());

        Ok(Self {
            private_keys,
            proxies: load_proxies(),
            retry_backoff: env_secs("RETRY_BACKOFF_SECS", DEFAULT_RETRY_BACKOFF),
            cycle_window: env_hours("CYCLE_WINDOW_HOURS", DEFAULT_CYCLE_WINDOW),
            reset_grace: RESET_GRACE,
            start_stagger: START_STAGGER,
        })
    }

    /// Relay for the worker at `index` (0-based), round-robin over the
    /// pool. Workers run unrelayed when the pool is empty.
    pub fn relay_for(&self, index: usize) -> Option<&str> {
        if self.proxies.is_empty() {
            None
        } else {
            Some(&self.proxies[index % self.proxies.len()])
        }
    }
}

fn collect_keys(lookup: impl Fn(u32) -> Option<String>) -> Vec<String> {
    let mut keys = Vec::new();
    let mut index = 1;
    while let Some(key) = lookup(index) {
        keys.push(key);
        index += 1;
    }
    keys
}

fn load_proxies() -> Vec<String> {
    match fs::read_to_string(PROXY_FILE) {
        Ok(contents) => {
            let proxies = parse_proxies(&contents);
            if proxies.is_empty() {
                warn!("{PROXY_FILE} is empty. Continuing without proxies.");
            } else {
                info!("Loaded {} proxies.", proxies.len());
            }
            proxies
        }
        Err(_) => {
            warn!("{PROXY_FILE} not found. Continuing without proxies.");
            Vec::new()
        }
    }
}

fn parse_proxies(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

fn env_secs(name: &str, default: Duration) -> Duration {
    parse_env(name).map(Duration::from_secs).unwrap_or(default)
}

fn env_hours(name: &str, default: Duration) -> Duration {
    parse_env(name)
        .map(|hours| Duration::from_secs(hours * 60 * 60))
        .unwrap_or(default)
}

fn parse_env(name: &str) -> Option<u64> {
    let raw = env::var(name).ok()?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring invalid {name}={raw}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_collection_stops_at_first_gap() {
        let keys = collect_keys(|i| match i {
            1 => Some("k1".into()),
            2 => Some("k2".into()),
            4 => Some("k4".into()),
            _ => None,
        });
        assert_eq!(keys, vec!["k1", "k2"]);
    }

    #[test]
    fn key_collection_is_empty_without_first_key() {
        let keys = collect_keys(|i| (i == 2).then(|| "k2".into()));
        assert!(keys.is_empty());
    }

    #[test]
    fn proxy_lines_are_trimmed_and_blank_lines_skipped() {
        let proxies = parse_proxies("http://a:1\n\n  http://b:2  \n\n");
        assert_eq!(proxies, vec!["http://a:1", "http://b:2"]);
    }

    #[test]
    fn relays_are_assigned_round_robin() {
        let config = Config {
            private_keys: Vec::new(),
            proxies: vec!["p0".into(), "p1".into(), "p2".into()],
            retry_backoff: DEFAULT_RETRY_BACKOFF,
            cycle_window: DEFAULT_CYCLE_WINDOW,
            reset_grace: RESET_GRACE,
            start_stagger: START_STAGGER,
        };
        assert_eq!(config.relay_for(0), Some("p0"));
        assert_eq!(config.relay_for(4), Some("p1"));

        let unrelayed = Config {
            proxies: Vec::new(),
            ..config
        };
        assert_eq!(unrelayed.relay_for(0), None);
    }
}
