//! Runtime configuration loaded from the environment.

use std::env;

use thiserror::Error;

use crate::queue::domain::{ChannelName, QueueDomainError};

const DATABASE_PATH_VAR: &str = "QUEUE_DATABASE_PATH";
const CHANNELS_VAR: &str = "QUEUE_CHANNELS";
const ERROR_CHANNEL_VAR: &str = "QUEUE_ERROR_CHANNEL";
const SUMMARY_HOUR_VAR: &str = "DAILY_SUMMARY_HOUR";
const RETENTION_DAYS_VAR: &str = "DEDUP_RETENTION_DAYS";
const FETCH_WINDOW_VAR: &str = "FETCH_WINDOW_HOURS";

const DEFAULT_DATABASE_PATH: &str = "data/queue.db";
const DEFAULT_SUMMARY_HOUR: u32 = 9;
const DEFAULT_RETENTION_DAYS: i64 = 7;
const DEFAULT_FETCH_WINDOW_HOURS: i64 = 1;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A variable could not be parsed as an integer.
    #[error("invalid value for {variable}: {value}")]
    InvalidNumber {
        /// Environment variable name.
        variable: String,
        /// Rejected raw value.
        value: String,
    },

    /// The summary hour was outside `0..=23`.
    #[error("daily summary hour {0} is out of range (0-23)")]
    SummaryHourOutOfRange(u32),

    /// A duration variable was zero or negative.
    #[error("{variable} must be positive, got {value}")]
    NonPositiveDuration {
        /// Environment variable name.
        variable: String,
        /// Rejected parsed value.
        value: i64,
    },

    /// A channel name failed validation.
    #[error(transparent)]
    Channel(#[from] QueueDomainError),

    /// No monitored channels were configured.
    #[error("no channels configured; set {CHANNELS_VAR}")]
    NoChannels,
}

/// Settings for the scheduled runner and its storage.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    database_path: String,
    channels: Vec<ChannelName>,
    error_channel: ChannelName,
    daily_summary_hour: u32,
    retention_days: i64,
    fetch_window_hours: i64,
}

impl RuntimeConfig {
    /// Loads configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when a variable is malformed or no
    /// channels are configured.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_path =
            get(DATABASE_PATH_VAR).unwrap_or_else(|| DEFAULT_DATABASE_PATH.to_owned());

        let channels = get(CHANNELS_VAR)
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(ChannelName::new)
            .collect::<Result<Vec<_>, _>>()?;
        let first = channels.first().cloned().ok_or(ConfigError::NoChannels)?;

        let error_channel = match get(ERROR_CHANNEL_VAR) {
            Some(name) => ChannelName::new(name)?,
            None => first,
        };

        let daily_summary_hour = parse_var(&get, SUMMARY_HOUR_VAR, DEFAULT_SUMMARY_HOUR)?;
        if daily_summary_hour > 23 {
            return Err(ConfigError::SummaryHourOutOfRange(daily_summary_hour));
        }

        // A zero or negative retention would place the purge cutoff in
        // the future and wipe the whole dedup ledger.
        let retention_days = positive(
            RETENTION_DAYS_VAR,
            parse_var(&get, RETENTION_DAYS_VAR, DEFAULT_RETENTION_DAYS)?,
        )?;
        let fetch_window_hours = positive(
            FETCH_WINDOW_VAR,
            parse_var(&get, FETCH_WINDOW_VAR, DEFAULT_FETCH_WINDOW_HOURS)?,
        )?;

        Ok(Self {
            database_path,
            channels,
            error_channel,
            daily_summary_hour,
            retention_days,
            fetch_window_hours,
        })
    }

    /// Path of the `SQLite` database file.
    #[must_use]
    pub fn database_path(&self) -> &str {
        &self.database_path
    }

    /// Channels polled for commands.
    #[must_use]
    pub fn channels(&self) -> &[ChannelName] {
        &self.channels
    }

    /// Channel receiving failure notices.
    #[must_use]
    pub const fn error_channel(&self) -> &ChannelName {
        &self.error_channel
    }

    /// Local hour at which the daily summary is sent.
    #[must_use]
    pub const fn daily_summary_hour(&self) -> u32 {
        self.daily_summary_hour
    }

    /// Retention window for processed-message markers.
    #[must_use]
    pub fn retention(&self) -> chrono::Duration {
        chrono::Duration::days(self.retention_days)
    }

    /// Look-back window for fetching channel messages.
    #[must_use]
    pub fn fetch_window(&self) -> chrono::Duration {
        chrono::Duration::hours(self.fetch_window_hours)
    }
}

fn parse_var<T>(
    get: impl Fn(&str) -> Option<String>,
    variable: &str,
    default: T,
) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
{
    match get(variable) {
        Some(value) => value.parse().map_err(|_| ConfigError::InvalidNumber {
            variable: variable.to_owned(),
            value,
        }),
        None => Ok(default),
    }
}

fn positive(variable: &str, value: i64) -> Result<i64, ConfigError> {
    if value <= 0 {
        return Err(ConfigError::NonPositiveDuration {
            variable: variable.to_owned(),
            value,
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    #![expect(clippy::expect_used, reason = "tests abort loudly on broken setup")]

    use std::collections::HashMap;

    use rstest::rstest;

    use super::{ConfigError, RuntimeConfig};

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(name, value)| ((*name).to_owned(), (*value).to_owned()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[rstest]
    fn defaults_apply_when_only_channels_are_set() {
        let config = RuntimeConfig::from_lookup(lookup(&[("QUEUE_CHANNELS", "ops, support")]))
            .expect("config loads");

        assert_eq!(config.database_path(), "data/queue.db");
        assert_eq!(config.channels().len(), 2);
        assert_eq!(config.error_channel().as_str(), "ops");
        assert_eq!(config.daily_summary_hour(), 9);
        assert_eq!(config.retention(), chrono::Duration::days(7));
        assert_eq!(config.fetch_window(), chrono::Duration::hours(1));
    }

    #[rstest]
    fn missing_channels_are_rejected() {
        let result = RuntimeConfig::from_lookup(lookup(&[]));
        assert!(matches!(result, Err(ConfigError::NoChannels)));
    }

    #[rstest]
    #[case("DEDUP_RETENTION_DAYS", "-3")]
    #[case("DEDUP_RETENTION_DAYS", "0")]
    #[case("FETCH_WINDOW_HOURS", "-1")]
    #[case("FETCH_WINDOW_HOURS", "0")]
    fn non_positive_durations_are_rejected(#[case] variable: &str, #[case] value: &str) {
        let result =
            RuntimeConfig::from_lookup(lookup(&[("QUEUE_CHANNELS", "ops"), (variable, value)]));

        let Err(ConfigError::NonPositiveDuration { variable: rejected, .. }) = result else {
            panic!("expected a non-positive duration error");
        };
        assert_eq!(rejected, variable);
    }

    #[rstest]
    fn summary_hour_out_of_range_is_rejected() {
        let result = RuntimeConfig::from_lookup(lookup(&[
            ("QUEUE_CHANNELS", "ops"),
            ("DAILY_SUMMARY_HOUR", "24"),
        ]));
        assert!(matches!(result, Err(ConfigError::SummaryHourOutOfRange(24))));
    }

    #[rstest]
    fn unparsable_numbers_are_rejected() {
        let result = RuntimeConfig::from_lookup(lookup(&[
            ("QUEUE_CHANNELS", "ops"),
            ("DEDUP_RETENTION_DAYS", "week"),
        ]));
        assert!(matches!(result, Err(ConfigError::InvalidNumber { .. })));
    }
}
