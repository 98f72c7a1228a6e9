use lecture_alerts_domain::RetryPolicy;
use lecture_alerts_utils::create_random_secret;
use std::str::FromStr;
use tracing::{info, warn};

const MINUTE: i64 = 1000 * 60;

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// How long before the start of a `Lecture` reminders are sent, in millis
    pub reminder_offsets: Vec<i64>,
    /// Number of future occurrences of a recurring `Lecture` that are kept
    /// materialized at all times
    pub recurrence_lookahead: usize,
    /// For how long after a `Lecture` has ended attendance can still be
    /// marked, in millis
    pub attendance_grace_period: i64,
    pub delivery_retry_policy: RetryPolicy,
    /// Maximum allowed duration in millis for querying upcoming lectures.
    /// This is used to avoid having clients ask for `Lecture`s in a
    /// timespan of several years.
    pub upcoming_query_duration_limit: i64,
    /// How often the background jobs advance lectures, release due
    /// notifications and retry failed deliveries
    pub job_tick_interval_millis: u64,
    /// Whether the background jobs should be started together with the
    /// server. Tests turn this off and drive the jobs themselves.
    pub run_job_schedulers: bool,
    /// How long a single delivery attempt may take before it is given up on
    /// and counted as failed
    pub delivery_timeout_millis: u64,
    pub delivery_webhook: Option<DeliveryWebhookConfig>,
}

#[derive(Debug, Clone)]
pub struct DeliveryWebhookConfig {
    pub url: String,
    /// Sent along every delivery so that the receiver can verify the sender
    pub key: String,
}

fn parse_env<T: FromStr + ToString>(name: &str, default: T) -> T {
    let value = match std::env::var(name) {
        Ok(value) => value,
        Err(_) => return default,
    };
    match value.parse::<T>() {
        Ok(parsed) => parsed,
        Err(_) => {
            warn!(
                "The given {}: {} is not valid, falling back to the default value: {}.",
                name,
                value,
                default.to_string()
            );
            default
        }
    }
}

/// Reads an env variable holding a count of `unit`s and converts it to
/// millis. Values that do not fit in millis fall back to `default`.
fn parse_env_millis(name: &str, default: i64, unit: i64) -> i64 {
    let value = parse_env(name, default);
    match value.checked_mul(unit) {
        Some(millis) => millis,
        None => {
            warn!(
                "The given {}: {} is too large, falling back to the default value: {}.",
                name, value, default
            );
            default * unit
        }
    }
}

fn parse_reminder_offsets(value: &str) -> Option<Vec<i64>> {
    let mut offsets = Vec::new();
    for minutes in value.split(',') {
        match minutes.trim().parse::<i64>() {
            Ok(m) if m >= 0 => offsets.push(m.checked_mul(MINUTE)?),
            _ => return None,
        }
    }
    offsets.sort_unstable();
    offsets.dedup();
    Some(offsets)
}

impl Config {
    pub fn new() -> Self {
        let port = parse_env("PORT", 5000);

        let reminder_offsets = match std::env::var("REMINDER_OFFSETS") {
            Ok(value) => match parse_reminder_offsets(&value) {
                Some(offsets) => offsets,
                None => {
                    warn!(
                        "The given REMINDER_OFFSETS: {} is not a comma separated list of minutes, falling back to 30 minutes.",
                        value
                    );
                    vec![30 * MINUTE]
                }
            },
            Err(_) => vec![30 * MINUTE],
        };

        let max_attempts = parse_env("DELIVERY_MAX_ATTEMPTS", 3u32).max(1);
        let initial_backoff = parse_env_millis("DELIVERY_INITIAL_BACKOFF_SECS", 30, 1000);
        let max_backoff = parse_env_millis("DELIVERY_MAX_BACKOFF_SECS", 30 * 60, 1000);

        let delivery_webhook = match std::env::var("DELIVERY_WEBHOOK_URL") {
            Ok(url) => {
                let key = match std::env::var("DELIVERY_WEBHOOK_KEY") {
                    Ok(key) => key,
                    Err(_) => {
                        info!("Did not find DELIVERY_WEBHOOK_KEY environment variable. Going to create one.");
                        let key = create_random_secret(32);
                        info!("Delivery webhook key was generated and set to: {}", key);
                        key
                    }
                };
                Some(DeliveryWebhookConfig { url, key })
            }
            Err(_) => {
                info!("Did not find DELIVERY_WEBHOOK_URL environment variable. Notifications will only be logged.");
                None
            }
        };

        Self {
            port,
            reminder_offsets,
            recurrence_lookahead: parse_env("RECURRENCE_LOOKAHEAD", 10usize),
            attendance_grace_period: parse_env_millis(
                "ATTENDANCE_GRACE_PERIOD_MINUTES",
                15,
                MINUTE,
            ),
            delivery_retry_policy: RetryPolicy::exponential(
                max_attempts,
                initial_backoff,
                max_backoff,
            ),
            upcoming_query_duration_limit: 1000 * 60 * 60 * 24 * 62, // 62 days
            job_tick_interval_millis: parse_env("JOB_TICK_INTERVAL_MILLIS", 1000u64),
            run_job_schedulers: true,
            delivery_timeout_millis: parse_env("DELIVERY_TIMEOUT_MILLIS", 10_000u64).max(1),
            delivery_webhook,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_reminder_offsets() {
        assert_eq!(parse_reminder_offsets("30"), Some(vec![30 * MINUTE]));
        assert_eq!(
            parse_reminder_offsets("60, 10,60"),
            Some(vec![10 * MINUTE, 60 * MINUTE])
        );
        assert_eq!(parse_reminder_offsets("10,abc"), None);
        assert_eq!(parse_reminder_offsets("-5"), None);
        assert_eq!(parse_reminder_offsets(&i64::MAX.to_string()), None);
        assert_eq!(parse_reminder_offsets(&format!("10,{}", i64::MAX / 1000)), None);
    }

    #[test]
    fn huge_env_durations_fall_back_to_defaults() {
        std::env::set_var("LECTURE_ALERTS_TEST_HUGE_SECS", i64::MAX.to_string());
        assert_eq!(
            parse_env_millis("LECTURE_ALERTS_TEST_HUGE_SECS", 30, 1000),
            30 * 1000
        );
        std::env::set_var("LECTURE_ALERTS_TEST_SMALL_SECS", "45");
        assert_eq!(
            parse_env_millis("LECTURE_ALERTS_TEST_SMALL_SECS", 30, 1000),
            45 * 1000
        );
        assert_eq!(
            parse_env_millis("LECTURE_ALERTS_TEST_MISSING_MINUTES", 15, MINUTE),
            15 * MINUTE
        );
    }
}
