use clap::{ArgAction, Parser, ValueHint};
use dirs_next::home_dir;
use serde::{Deserialize, Serialize};
use std::{env, fs, path::{Path, PathBuf}};
use thiserror::Error;

/// Error type for config loading/validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Missing required setting: {0}")]
    MissingSetting(&'static str),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Default local-time offset used when no forecast snapshot supplies one
/// (Pacific standard time).
pub const DEFAULT_TZ_OFFSET_SECS: i64 = -8 * 3600;

const DEFAULT_CITY: &str = "Pleasanton, CA";

/// Top-level station configuration. Everything is an Option so YAML,
/// environment, and CLI layers can be merged Option-by-Option.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// e.g. "info" | "debug"
    pub log_level: Option<String>,
    /// Display name for the city line of the today banner
    pub city: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// One Call API key
    pub api_key: Option<String>,
    /// Local offset from UTC in seconds, used when no snapshot is available
    pub timezone_offset_secs: Option<i64>,
    /// Radio credentials, for boards where the firmware owns the radio
    pub wifi: Option<WifiConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WifiConfig {
    pub ssid: Option<String>,
    pub password: Option<String>,
}

/// Everything a forecast fetch needs; only materialized once the battery
/// gate has allowed network activity.
#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub api_key: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// CLI overrides. All fields are Options so we can layer them over YAML.
#[derive(Debug, Parser, Clone)]
#[command(name = "inkcast", about = "Tri-color e-paper forecast station", allow_negative_numbers = true)]
pub struct Cli {
    /// Path to a YAML config file (overrides search)
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub log_level: Option<String>,
    #[arg(long)]
    pub city: Option<String>,
    #[arg(long)]
    pub latitude: Option<f64>,
    #[arg(long)]
    pub longitude: Option<f64>,
    #[arg(long)]
    pub api_key: Option<String>,
    #[arg(long)]
    pub timezone_offset_secs: Option<i64>,
    /// Battery percent override for bench runs without a fuel gauge
    #[arg(long)]
    pub battery_percent: Option<f32>,
    /// dump fully merged config (after overrides) and exit
    #[arg(long, action = ArgAction::SetTrue)]
    pub dump_config: bool,
}

/// Public entry point: parse CLI, read YAML, apply env fallbacks, merge,
/// validate.
pub fn load() -> Result<(Config, Cli), ConfigError> {
    let cli = Cli::parse();
    let cfg = merged(&cli)?;
    Ok((cfg, cli))
}

/// Layering, separated from `load()` so tests can drive it with a
/// synthetic `Cli`.
fn merged(cli: &Cli) -> Result<Config, ConfigError> {
    // 1) defaults
    let mut cfg = Config::default();

    // 2) YAML file (explicit path or search)
    if let Some(p) = cli.config.as_ref() {
        if p.exists() {
            let y = read_yaml(p)?;
            merge(&mut cfg, y);
        } else {
            return Err(ConfigError::Validation(format!(
                "Config file not found: {}",
                p.display()
            )));
        }
    } else if let Some(p) = find_config_file() {
        let y = read_yaml(&p)?;
        merge(&mut cfg, y);
    }

    // 3) provider environment variables
    apply_env_fallbacks(&mut cfg);

    // 4) CLI overrides (highest precedence)
    apply_cli_overrides(&mut cfg, cli);

    // 5) Validate
    validate(&cfg)?;

    Ok(cfg)
}

impl Config {
    pub fn city(&self) -> &str {
        self.city.as_deref().unwrap_or(DEFAULT_CITY)
    }

    pub fn fallback_tz_offset(&self) -> i64 {
        self.timezone_offset_secs.unwrap_or(DEFAULT_TZ_OFFSET_SECS)
    }

    /// Resolve the settings a network fetch requires. Only called after
    /// the battery gate enables a fetch; missing settings are fatal for
    /// the cycle at that point, never before.
    pub fn require_fetch_settings(&self) -> Result<FetchSettings, ConfigError> {
        let api_key = self
            .api_key
            .clone()
            .ok_or(ConfigError::MissingSetting("api_key"))?;
        let latitude = self
            .latitude
            .ok_or(ConfigError::MissingSetting("latitude"))?;
        let longitude = self
            .longitude
            .ok_or(ConfigError::MissingSetting("longitude"))?;
        Ok(FetchSettings {
            api_key,
            latitude,
            longitude,
        })
    }
}

/// Try common locations in order (first hit wins).
fn find_config_file() -> Option<PathBuf> {
    // XDG-style: ~/.config/inkcast/config.yaml
    if let Some(home) = home_dir() {
        let p = home.join(".config/inkcast/config.yaml");
        if p.exists() { return Some(p) }
        let p = home.join(".config/inkcast.yaml");
        if p.exists() { return Some(p) }
    }
    // project local
    for candidate in &["inkcast.yaml", "config.yaml", "config/inkcast.yaml"] {
        let p = PathBuf::from(candidate);
        if p.exists() { return Some(p) }
    }
    None
}

fn read_yaml(path: &Path) -> Result<Config, ConfigError> {
    let s = fs::read_to_string(path)?;
    let cfg: Config = serde_yaml::from_str(&s)?;
    Ok(cfg)
}

/// Shallow merge `src` into `dst`, Option-by-Option.
fn merge(dst: &mut Config, src: Config) {
    if src.log_level.is_some()            { dst.log_level = src.log_level; }
    if src.city.is_some()                 { dst.city = src.city; }
    if src.latitude.is_some()             { dst.latitude = src.latitude; }
    if src.longitude.is_some()            { dst.longitude = src.longitude; }
    if src.api_key.is_some()              { dst.api_key = src.api_key; }
    if src.timezone_offset_secs.is_some() { dst.timezone_offset_secs = src.timezone_offset_secs; }
    if src.wifi.is_some()                 { dst.wifi = src.wifi; }
}

/// Provider settings names, for parity with the usual deployment where
/// the key and coordinates live in the environment.
fn apply_env_fallbacks(cfg: &mut Config) {
    if cfg.api_key.is_none() {
        if let Ok(v) = env::var("OPEN_WEATHER_KEY") {
            cfg.api_key = Some(v);
        }
    }
    if cfg.latitude.is_none() {
        if let Ok(v) = env::var("OPEN_WEATHER_LAT") {
            cfg.latitude = v.parse().ok();
        }
    }
    if cfg.longitude.is_none() {
        if let Ok(v) = env::var("OPEN_WEATHER_LON") {
            cfg.longitude = v.parse().ok();
        }
    }
}

fn apply_cli_overrides(cfg: &mut Config, cli: &Cli) {
    if cli.log_level.is_some()            { cfg.log_level = cli.log_level.clone(); }
    if cli.city.is_some()                 { cfg.city = cli.city.clone(); }
    if cli.latitude.is_some()             { cfg.latitude = cli.latitude; }
    if cli.longitude.is_some()            { cfg.longitude = cli.longitude; }
    if cli.api_key.is_some()              { cfg.api_key = cli.api_key.clone(); }
    if cli.timezone_offset_secs.is_some() { cfg.timezone_offset_secs = cli.timezone_offset_secs; }
}

/// Put any invariants here (coordinate ranges, credential pairing).
fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if let Some(lat) = cfg.latitude {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(ConfigError::Validation("latitude must be within -90..=90".into()));
        }
    }
    if let Some(lon) = cfg.longitude {
        if !(-180.0..=180.0).contains(&lon) {
            return Err(ConfigError::Validation("longitude must be within -180..=180".into()));
        }
    }
    if let Some(wifi) = cfg.wifi.as_ref() {
        let ssid_ok = wifi.ssid.as_deref().is_some_and(|s| !s.is_empty());
        let pass_ok = wifi.password.as_deref().is_some_and(|s| !s.is_empty());
        if !ssid_ok || !pass_ok {
            return Err(ConfigError::Validation(
                "wifi section requires both ssid and password".into(),
            ));
        }
    }
    Ok(())
}
