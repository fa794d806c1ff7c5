//! Application-level configuration loading for ticks, buffers, and seeding.

use std::{
    env, fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;
use tracing::{info, warn};

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "CTF_ARENA_BACK_CONFIG_PATH";
/// Default location of the seeded question set.
const DEFAULT_QUESTIONS_PATH: &str = "config/questions.json";
/// Default cadence of the scoreboard and clock snapshot streams.
const DEFAULT_SNAPSHOT_TICK_MS: u64 = 1_000;
/// Default per-viewer event buffer; laggards skip past what they missed.
const DEFAULT_EVENT_CAPACITY: usize = 64;

#[derive(Debug, Clone)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    scoreboard_tick_ms: u64,
    clock_tick_ms: u64,
    event_capacity: usize,
    questions_path: PathBuf,
}

impl AppConfig {
    /// Load the application configuration from disk, falling back to the
    /// baked-in defaults when the file is absent or unreadable.
    pub fn load() -> Self {
        let path = resolve_config_path();
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<RawConfig>(&contents) {
                Ok(raw) => {
                    let config: Self = raw.into();
                    info!(path = %path.display(), "loaded configuration");
                    config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        }
    }

    /// Interval between scoreboard snapshot frames.
    pub fn scoreboard_tick(&self) -> Duration {
        Duration::from_millis(self.scoreboard_tick_ms)
    }

    /// Interval between clock snapshot frames.
    pub fn clock_tick(&self) -> Duration {
        Duration::from_millis(self.clock_tick_ms)
    }

    /// Per-viewer buffer size of the event bus.
    pub fn event_capacity(&self) -> usize {
        self.event_capacity
    }

    /// Location of the seeded question set.
    pub fn questions_path(&self) -> &Path {
        &self.questions_path
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            scoreboard_tick_ms: DEFAULT_SNAPSHOT_TICK_MS,
            clock_tick_ms: DEFAULT_SNAPSHOT_TICK_MS,
            event_capacity: DEFAULT_EVENT_CAPACITY,
            questions_path: PathBuf::from(DEFAULT_QUESTIONS_PATH),
        }
    }
}

#[derive(Debug, Deserialize)]
/// JSON representation of the configuration file located at
/// [`DEFAULT_CONFIG_PATH`]. Every field is optional.
struct RawConfig {
    scoreboard_tick_ms: Option<u64>,
    clock_tick_ms: Option<u64>,
    event_capacity: Option<usize>,
    questions_path: Option<PathBuf>,
}

impl From<RawConfig> for AppConfig {
    fn from(raw: RawConfig) -> Self {
        let defaults = Self::default();
        Self {
            scoreboard_tick_ms: raw
                .scoreboard_tick_ms
                .filter(|ms| *ms > 0)
                .unwrap_or(defaults.scoreboard_tick_ms),
            clock_tick_ms: raw
                .clock_tick_ms
                .filter(|ms| *ms > 0)
                .unwrap_or(defaults.clock_tick_ms),
            event_capacity: raw
                .event_capacity
                .filter(|capacity| *capacity > 0)
                .unwrap_or(defaults.event_capacity),
            questions_path: raw.questions_path.unwrap_or(defaults.questions_path),
        }
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_intervals_fall_back_to_defaults() {
        let raw = RawConfig {
            scoreboard_tick_ms: Some(0),
            clock_tick_ms: Some(250),
            event_capacity: Some(0),
            questions_path: None,
        };
        let config: AppConfig = raw.into();
        assert_eq!(config.scoreboard_tick(), Duration::from_millis(1_000));
        assert_eq!(config.clock_tick(), Duration::from_millis(250));
        assert_eq!(config.event_capacity(), DEFAULT_EVENT_CAPACITY);
    }
}
