use std::{
    env,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::currency::CurrencyCode;
use crate::domain::flight::SeatKind;
use crate::errors::BookingError;

const HOME_ENV: &str = "FLIGHT_BOOKING_HOME";
const APP_DIR: &str = ".flight_booking";
const CONFIG_FILE: &str = "config.json";
const TMP_SUFFIX: &str = "tmp";

/// Seat type suggested first by the `seats` command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeatPreference {
    #[default]
    Any,
    Window,
    Aisle,
}

impl SeatPreference {
    pub fn prefers(&self, kind: SeatKind) -> bool {
        match self {
            SeatPreference::Any => true,
            SeatPreference::Window => kind == SeatKind::Window,
            SeatPreference::Aisle => kind == SeatKind::Aisle,
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "any" => Some(SeatPreference::Any),
            "window" => Some(SeatPreference::Window),
            "aisle" => Some(SeatPreference::Aisle),
            _ => None,
        }
    }
}

/// User preferences for the shell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub currency: CurrencyCode,
    pub ui_color_enabled: bool,
    pub screen_reader_mode: bool,
    pub high_contrast_mode: bool,
    pub quiet_mode: bool,
    pub seat_preference: SeatPreference,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_search: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency: CurrencyCode::default(),
            ui_color_enabled: true,
            screen_reader_mode: false,
            high_contrast_mode: false,
            quiet_mode: false,
            seat_preference: SeatPreference::Any,
            last_search: None,
        }
    }
}

impl Config {
    /// Keys accepted by [`Config::set`].
    pub const KEYS: [&'static str; 6] = [
        "currency",
        "ui_color_enabled",
        "screen_reader_mode",
        "high_contrast_mode",
        "quiet_mode",
        "seat_preference",
    ];

    /// Updates one setting from its textual form.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), BookingError> {
        let value = value.trim();
        match key.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "currency" => {
                let code = non_empty(key, value)?;
                if code.len() != 3 || !code.chars().all(|ch| ch.is_ascii_alphabetic()) {
                    return Err(BookingError::InvalidConfig(format!(
                        "currency must be a three-letter code, got `{code}`"
                    )));
                }
                self.currency = CurrencyCode::new(code);
            }
            "ui_color_enabled" => self.ui_color_enabled = parse_bool(key, value)?,
            "screen_reader_mode" => self.screen_reader_mode = parse_bool(key, value)?,
            "high_contrast_mode" => self.high_contrast_mode = parse_bool(key, value)?,
            "quiet_mode" => self.quiet_mode = parse_bool(key, value)?,
            "seat_preference" => {
                self.seat_preference = SeatPreference::parse(value).ok_or_else(|| {
                    BookingError::InvalidConfig(format!(
                        "seat_preference must be any, window or aisle, got `{value}`"
                    ))
                })?;
            }
            _ => {
                return Err(BookingError::InvalidConfig(format!(
                    "unknown setting `{key}` (expected one of: {})",
                    Self::KEYS.join(", ")
                )))
            }
        }
        Ok(())
    }

    /// `(key, value)` rows for display.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("currency", self.currency.as_str().to_string()),
            ("ui_color_enabled", self.ui_color_enabled.to_string()),
            ("screen_reader_mode", self.screen_reader_mode.to_string()),
            ("high_contrast_mode", self.high_contrast_mode.to_string()),
            ("quiet_mode", self.quiet_mode.to_string()),
            (
                "seat_preference",
                format!("{:?}", self.seat_preference).to_ascii_lowercase(),
            ),
        ]
    }
}

fn non_empty<'a>(key: &str, value: &'a str) -> Result<&'a str, BookingError> {
    if value.is_empty() {
        Err(BookingError::InvalidConfig(format!("{key} cannot be empty")))
    } else {
        Ok(value)
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, BookingError> {
    match value.to_ascii_lowercase().as_str() {
        "y" | "yes" | "true" | "on" | "1" => Ok(true),
        "n" | "no" | "false" | "off" | "0" => Ok(false),
        _ => Err(BookingError::InvalidConfig(format!(
            "{key} expects yes/no, true/false, on/off or 1/0"
        ))),
    }
}

/// Loads and saves [`Config`] as pretty-printed JSON.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    /// Uses `$FLIGHT_BOOKING_HOME` when set, otherwise `~/.flight_booking`.
    pub fn new() -> Result<Self, BookingError> {
        let base = match env::var_os(HOME_ENV) {
            Some(custom) => PathBuf::from(custom),
            None => dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(APP_DIR),
        };
        Self::with_base_dir(base)
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, BookingError> {
        let config_dir = base.join("config");
        fs::create_dir_all(&config_dir)?;
        Ok(Self {
            path: config_dir.join(CONFIG_FILE),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Config, BookingError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            debug!(path = %self.path.display(), "configuration loaded");
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), BookingError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_file(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        debug!(path = %self.path.display(), "configuration saved");
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{existing}.{TMP_SUFFIX}"),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_file(path: &Path, data: &str) -> Result<(), BookingError> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
