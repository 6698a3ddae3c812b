use crate::models::hold::HoldConfig;
use crate::models::pose::{PoseError, PoseIdentifier, PoseResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Pose selected when a session starts
    pub default_pose: PoseIdentifier,
    /// Score a frame needs for the hold timer to run (1-100)
    pub qualifying_score: u8,
    /// How long the pose must be held before a capture fires
    pub hold_duration_ms: u64,
    /// Emit hold progress events for the timer display
    pub emit_hold_progress: bool,
    /// Where captured images are written by the host
    pub capture_dir: PathBuf,
    /// Pending cues before new ones are dropped
    pub event_channel_capacity: usize,
}

fn home_dir() -> PoseResult<PathBuf> {
    std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map(PathBuf::from)
        .map_err(|_| PoseError::InvalidConfig("Could not determine home directory".to_string()))
}

impl Default for Config {
    fn default() -> Self {
        let mut capture_dir = home_dir().unwrap_or_else(|_| PathBuf::from("."));
        capture_dir.push(".flexcheck");
        capture_dir.push("captures");

        let hold = HoldConfig::default();

        Self {
            default_pose: PoseIdentifier::FrontDoubleBiceps,
            qualifying_score: hold.qualifying_score,
            hold_duration_ms: hold.hold_duration_ms,
            emit_hold_progress: hold.emit_progress,
            capture_dir,
            event_channel_capacity: 64,
        }
    }
}

impl Config {
    /// Load configuration from the settings file, creating it with defaults
    /// if it doesn't exist
    pub fn load() -> PoseResult<Self> {
        let config_path = Self::get_config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save_to(&config_path)?;
            Ok(config)
        }
    }

    /// Load and validate configuration from an explicit path
    pub fn load_from(path: &Path) -> PoseResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to the settings file
    pub fn save(&self) -> PoseResult<()> {
        self.save_to(&Self::get_config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> PoseResult<()> {
        self.validate()?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> PoseResult<()> {
        if self.qualifying_score == 0 || self.qualifying_score > 100 {
            return Err(PoseError::InvalidConfig(format!(
                "Invalid qualifying score: {}. Must be between 1 and 100",
                self.qualifying_score
            )));
        }

        if !(100..=60_000).contains(&self.hold_duration_ms) {
            return Err(PoseError::InvalidConfig(format!(
                "Invalid hold duration: {}ms. Must be between 100 and 60000",
                self.hold_duration_ms
            )));
        }

        if self.capture_dir.as_os_str().is_empty() {
            return Err(PoseError::InvalidConfig(
                "Capture directory cannot be empty".to_string(),
            ));
        }

        if self.event_channel_capacity == 0 || self.event_channel_capacity > 4096 {
            return Err(PoseError::InvalidConfig(format!(
                "Invalid event channel capacity: {}. Must be between 1 and 4096",
                self.event_channel_capacity
            )));
        }

        Ok(())
    }

    /// Reset to default configuration
    pub fn reset() -> PoseResult<Self> {
        let config = Self::default();
        config.save()?;
        Ok(config)
    }

    /// Thresholds for the hold tracker
    pub fn hold_config(&self) -> HoldConfig {
        HoldConfig {
            qualifying_score: self.qualifying_score,
            hold_duration_ms: self.hold_duration_ms,
            emit_progress: self.emit_hold_progress,
        }
    }

    /// Get the configuration file path
    fn get_config_path() -> PoseResult<PathBuf> {
        let mut path = home_dir()?;
        path.push(".flexcheck");
        path.push("config");
        path.push("settings.json");

        Ok(path)
    }
}
