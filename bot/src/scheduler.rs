use crate::config::Config;
use crate::worker::Worker;
use chrono::{DateTime, Utc};
use log::{info, warn};
use std::time::Duration;
use tokio::time::sleep;

/// Drives one worker's cycle loop forever. A successful cycle sleeps
/// until the service-provided reset time (plus a grace period) or a
/// default window; a failed cycle retries after a fixed backoff, with no
/// retry cap.
pub(crate) async fn run_forever(mut worker: Worker, config: &Config) {
    loop {
        let index = worker.index;

        if !worker.run_once().await {
            warn!(
                "[Wallet {index}] Bot run failed, retrying in {}...",
                format_delay(config.retry_backoff)
            );
            sleep(config.retry_backoff).await;
            continue;
        }

        info!("[Wallet {index}] Checking daily reset time...");
        let reset_at = match worker.client.mining_quota().await {
            Ok(quota) => quota.reset_at,
            Err(e) => {
                warn!("[Wallet {index}] Failed to get mining quota: {e}");
                None
            }
        };

        let delay = next_cycle_delay(reset_at, Utc::now(), config);
        info!("[Wallet {index}] Next run in: {}", format_delay(delay));
        sleep(delay).await;
    }
}

/// A reset time in the future wins; anything else falls back to the
/// default window. The grace period is added either way.
fn next_cycle_delay(
    reset_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    config: &Config,
) -> Duration {
    let until_reset = reset_at
        .and_then(|reset| (reset - now).to_std().ok())
        .filter(|wait| !wait.is_zero())
        .unwrap_or(config.cycle_window);
    until_reset + config.reset_grace
}

fn format_delay(delay: Duration) -> String {
    let secs = delay.as_secs();
    format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    fn config() -> Config {
        Config {
            private_keys: Vec::new(),
            proxies: Vec::new(),
            retry_backoff: Duration::from_secs(60),
            cycle_window: Duration::from_secs(24 * 60 * 60),
            reset_grace: Duration::from_secs(5),
            start_stagger: Duration::from_secs(15),
        }
    }

    #[test]
    fn future_reset_time_plus_grace() {
        let now = Utc::now();
        let reset = now + TimeDelta::hours(3);
        assert_eq!(
            next_cycle_delay(Some(reset), now, &config()),
            Duration::from_secs(3 * 60 * 60 + 5)
        );
    }

    #[test]
    fn missing_reset_time_defaults_to_the_full_window() {
        assert_eq!(
            next_cycle_delay(None, Utc::now(), &config()),
            Duration::from_secs(24 * 60 * 60 + 5)
        );
    }

    #[test]
    fn past_reset_time_defaults_to_the_full_window() {
        let now = Utc::now();
        let reset = now - TimeDelta::minutes(10);
        assert_eq!(
            next_cycle_delay(Some(reset), now, &config()),
            Duration::from_secs(24 * 60 * 60 + 5)
        );
    }

    #[test]
    fn delay_is_reported_in_hours_minutes_seconds() {
        assert_eq!(format_delay(Duration::from_secs(3 * 3600 + 5)), "3h 0m 5s");
        assert_eq!(format_delay(Duration::from_secs(59)), "0h 0m 59s");
    }
}
