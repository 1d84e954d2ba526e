use std::env;
use std::str::FromStr;

use dotenvy::dotenv;
use snafu::{OptionExt, ResultExt};

use crate::errors::{CustomResult, InvalidConfigSnafu, MissingConfigSnafu};

pub const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1/";
pub const DEFAULT_LOG_FILE: &str = "program.log";
pub const DEFAULT_LAP_TIME_READ_LIMIT: i64 = 500;
pub const DEFAULT_TRACK_BOARD_SIZE: usize = 3;
pub const DEFAULT_VICTORY_BOARD_SIZE: usize = 8;
pub const DEFAULT_ROTATION_INTERVAL_MS: u64 = 3500;
pub const DEFAULT_CHAT_CHANNEL: &str = "chat_messages";

/// Runtime settings, read from the environment (and `.env` when present).
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub database_url: String,
    pub redis_url: String,
    pub logging_level: String,
    pub log_file: String,
    /// upper bound on lap time rows read for the track boards
    pub lap_time_read_limit: i64,
    pub track_board_size: usize,
    pub victory_board_size: usize,
    pub rotation_interval_ms: u64,
    pub chat_channel: String,
}

impl Settings {
    /// # load settings
    /// load the settings from the environment. only `DATABASE_URL` is required,
    /// everything else falls back to its default.
    ///
    /// ## Returns
    /// * `Settings` - the loaded settings
    pub fn from_env() -> CustomResult<Settings> {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL").context(MissingConfigSnafu {
            name: "DATABASE_URL",
        })?;

        Ok(Settings {
            database_url,
            redis_url: env::var("REDIS_URL").unwrap_or_else(|_| DEFAULT_REDIS_URL.to_string()),
            logging_level: env::var("LOGGING_LEVEL").unwrap_or_else(|_| "INFO".to_string()),
            log_file: env::var("LOG_FILE").unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string()),
            lap_time_read_limit: parse_var("LAP_TIME_READ_LIMIT", DEFAULT_LAP_TIME_READ_LIMIT)?,
            track_board_size: parse_var("TRACK_BOARD_SIZE", DEFAULT_TRACK_BOARD_SIZE)?,
            victory_board_size: parse_var("VICTORY_BOARD_SIZE", DEFAULT_VICTORY_BOARD_SIZE)?,
            rotation_interval_ms: parse_var("ROTATION_INTERVAL_MS", DEFAULT_ROTATION_INTERVAL_MS)?,
            chat_channel: env::var("CHAT_CHANNEL")
                .unwrap_or_else(|_| DEFAULT_CHAT_CHANNEL.to_string()),
        })
    }

    /// settings with every default filled in, pointing at the given database
    pub fn with_database(database_url: &str) -> Settings {
        Settings {
            database_url: database_url.to_string(),
            redis_url: DEFAULT_REDIS_URL.to_string(),
            logging_level: "INFO".to_string(),
            log_file: DEFAULT_LOG_FILE.to_string(),
            lap_time_read_limit: DEFAULT_LAP_TIME_READ_LIMIT,
            track_board_size: DEFAULT_TRACK_BOARD_SIZE,
            victory_board_size: DEFAULT_VICTORY_BOARD_SIZE,
            rotation_interval_ms: DEFAULT_ROTATION_INTERVAL_MS,
            chat_channel: DEFAULT_CHAT_CHANNEL.to_string(),
        }
    }
}

fn parse_var<T: FromStr>(name: &str, default: T) -> CustomResult<T> {
    match env::var(name) {
        Ok(value) => parse_value(name, &value),
        Err(_) => Ok(default),
    }
}

fn parse_value<T: FromStr>(name: &str, value: &str) -> CustomResult<T> {
    value.trim().parse::<T>().ok().context(InvalidConfigSnafu {
        name,
        value,
    })
}
