use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure for mission-relay
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// HTTP listener configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Photo storage configuration
    #[serde(default)]
    pub photos: PhotoConfig,

    /// External object detection configuration
    #[serde(default)]
    pub detection: DetectionConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP listener configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ServerConfig {
    /// Interface to bind
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    5000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Photo storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PhotoConfig {
    /// Root directory; photos land in `<root>/<mission_id>/wp<index>/`
    #[serde(default = "default_photo_root")]
    pub root_dir: PathBuf,

    /// Maximum entries returned by the latest-photos listing
    #[serde(default = "default_latest_limit")]
    pub latest_limit: usize,
}

fn default_photo_root() -> PathBuf {
    PathBuf::from("received_photos")
}

const fn default_latest_limit() -> usize {
    8
}

impl Default for PhotoConfig {
    fn default() -> Self {
        Self {
            root_dir: default_photo_root(),
            latest_limit: default_latest_limit(),
        }
    }
}

/// External object detection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DetectionConfig {
    /// Whether uploaded photos are sent for detection
    #[serde(default)]
    pub enabled: bool,

    /// URL of the detection service
    #[serde(default = "default_detection_endpoint")]
    pub endpoint: String,

    /// Detections below this confidence are dropped (0.0-1.0)
    #[serde(default = "default_min_confidence")]
    pub min_confidence: f64,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_detection_endpoint() -> String {
    "http://127.0.0.1:8000/detect".to_string()
}

const fn default_min_confidence() -> f64 {
    0.5
}

const fn default_timeout_secs() -> u64 {
    30
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: default_detection_endpoint(),
            min_confidence: default_min_confidence(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Stdout format
    #[serde(default)]
    pub format: LogFormat,

    /// Directory for JSON log files (stdout only when unset)
    #[serde(default)]
    pub log_dir: Option<PathBuf>,

    /// Log file rotation policy
    #[serde(default)]
    pub rotation: RotationPolicy,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
            log_dir: None,
            rotation: RotationPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RotationPolicy {
    #[default]
    Daily,
    Hourly,
    Never,
}
