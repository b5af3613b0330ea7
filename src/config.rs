//! Game settings and where they come from

use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::error::ConfigError;

/// Config file read from the working directory
pub const CONFIG_FILE: &str = "snake.cfg";

/// Event log appended to in the working directory
pub const EVENT_LOG_FILE: &str = "snake_events.log";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub width: i32,
    pub height: i32,
    /// Tick interval at level 1, in milliseconds
    pub initial_speed: u64,
    /// Fastest allowed tick interval, in milliseconds
    pub min_speed: u64,
    /// Milliseconds taken off the tick interval per level
    pub speed_step: u64,
    /// Foods spawned per batch
    pub food_count: usize,
    pub foods_per_level: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            width: 40,
            height: 20,
            initial_speed: 150,
            min_speed: 50,
            speed_step: 10,
            food_count: 3,
            foods_per_level: 5,
        }
    }
}

impl Config {
    /// Parses `key=value` lines on top of the defaults. Bad entries are
    /// logged and skipped.
    pub fn parse(text: &str) -> Self {
        let mut config = Config::default();

        for (i, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Err(e) = config.apply(i + 1, line) {
                warn!("Ignoring config entry: {}", e);
            }
        }

        if config.min_speed > config.initial_speed {
            warn!(
                "min_speed {} is above initial_speed {}, clamping",
                config.min_speed, config.initial_speed
            );
            config.min_speed = config.initial_speed;
        }

        config
    }

    pub fn tick_interval(&self, level: u32) -> Duration {
        let slowdown = self.speed_step.saturating_mul(level.saturating_sub(1) as u64);
        let ms = self.initial_speed.saturating_sub(slowdown).max(self.min_speed);
        Duration::from_millis(ms)
    }

    fn apply(&mut self, line: usize, entry: &str) -> Result<(), ConfigError> {
        let (key, value) = entry
            .split_once('=')
            .ok_or(ConfigError::MissingSeparator { line })?;
        let (key, value) = (key.trim(), value.trim());

        match key {
            "width" => self.width = parse_in(line, key, value, 8, 200)? as i32,
            "height" => self.height = parse_in(line, key, value, 5, 100)? as i32,
            "initial_speed" => self.initial_speed = parse_in(line, key, value, 1, 5000)? as u64,
            "min_speed" => self.min_speed = parse_in(line, key, value, 1, 5000)? as u64,
            "speed_step" => self.speed_step = parse_in(line, key, value, 0, 1000)? as u64,
            "food_count" => self.food_count = parse_in(line, key, value, 1, 9)? as usize,
            "foods_per_level" => {
                self.foods_per_level = parse_in(line, key, value, 1, 1000)? as u32
            }
            _ => {
                return Err(ConfigError::UnknownKey { line, key: key.to_string() });
            }
        }

        Ok(())
    }
}

fn parse_in(line: usize, key: &str, value: &str, min: i64, max: i64) -> Result<i64, ConfigError> {
    let n: i64 = value.parse().map_err(|_| ConfigError::InvalidValue {
        line,
        key: key.to_string(),
        value: value.to_string(),
    })?;

    if n < min || n > max {
        return Err(ConfigError::OutOfRange { line, key: key.to_string(), value: n, min, max });
    }

    Ok(n)
}

pub trait ConfigProvider {
    fn load(&self) -> Config;
}

/// Fixed settings, handy for tests and for running without a file
impl ConfigProvider for Config {
    fn load(&self) -> Config {
        self.clone()
    }
}

pub struct FileConfig {
    path: PathBuf,
}

impl FileConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileConfig { path: path.into() }
    }
}

impl ConfigProvider for FileConfig {
    fn load(&self) -> Config {
        match fs::read_to_string(&self.path) {
            Ok(text) => {
                info!("Loaded config from {}", self.path.display());
                Config::parse(&text)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No config at {}, using defaults", self.path.display());
                Config::default()
            }
            Err(e) => {
                warn!("Can't read {}: {}, using defaults", self.path.display(), e);
                Config::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_text_gives_defaults() {
        assert_eq!(Config::parse(""), Config::default());
    }

    #[test]
    fn parses_known_keys() {
        let config = Config::parse(
            "# tuned for a small window\n\
             width = 30\n\
             height=15\n\
             initial_speed=200\n\
             min_speed = 80\n\
             food_count=1\n",
        );

        assert_eq!(config.width, 30);
        assert_eq!(config.height, 15);
        assert_eq!(config.initial_speed, 200);
        assert_eq!(config.min_speed, 80);
        assert_eq!(config.food_count, 1);
        assert_eq!(config.speed_step, Config::default().speed_step);
    }

    #[test]
    fn malformed_entries_fall_back_to_defaults() {
        let config = Config::parse(
            "width\n\
             height=tall\n\
             colour=green\n\
             food_count=0\n\
             initial_speed=-5\n",
        );
        assert_eq!(config, Config::default());
    }

    #[test]
    fn apply_reports_why() {
        let mut config = Config::default();
        assert_eq!(config.apply(3, "width"), Err(ConfigError::MissingSeparator { line: 3 }));
        assert!(matches!(
            config.apply(4, "width=7"),
            Err(ConfigError::OutOfRange { value: 7, min: 8, .. })
        ));
        assert!(matches!(config.apply(5, "fps=60"), Err(ConfigError::UnknownKey { .. })));
    }

    #[test]
    fn min_speed_is_clamped_to_initial() {
        let config = Config::parse("initial_speed=100\nmin_speed=300\n");
        assert_eq!(config.min_speed, 100);
    }

    #[test]
    fn tick_interval_shrinks_to_floor() {
        let config = Config::default();
        assert_eq!(config.tick_interval(1), Duration::from_millis(150));
        assert_eq!(config.tick_interval(2), Duration::from_millis(140));
        assert_eq!(config.tick_interval(11), Duration::from_millis(50));
        assert_eq!(config.tick_interval(500), Duration::from_millis(50));
    }

    #[test]
    fn file_config_reads_and_tolerates_missing_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "width=25").unwrap();
        writeln!(file, "bogus line").unwrap();

        let config = FileConfig::new(file.path()).load();
        assert_eq!(config.width, 25);
        assert_eq!(config.height, 20);

        let dir = tempfile::tempdir().unwrap();
        let missing = FileConfig::new(dir.path().join("nope.cfg")).load();
        assert_eq!(missing, Config::default());
    }
}
