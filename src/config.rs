use anyhow::{anyhow, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::heights::ReferenceHeightTable;

const DEFAULT_SOURCE_URL: &str = "stub://camera0";
const DEFAULT_WIDTH: u32 = 640;
const DEFAULT_HEIGHT: u32 = 480;
const DEFAULT_FOCAL_LENGTH: f64 = 600.0;
const DEFAULT_CONFIDENCE_THRESHOLD: f32 = 0.4;
const DEFAULT_LOG_PATH: &str = "object_tracking_log.csv";

/// Configuration errors that are fatal at startup, before any frame is
/// processed.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("reference height for '{label}' must be positive, got {height_m}")]
    InvalidHeight { label: String, height_m: f64 },
    #[error("focal length must be positive, got {focal_length}")]
    InvalidFocalLength { focal_length: f64 },
    #[error("confidence threshold must be within [0, 1], got {threshold}")]
    InvalidConfidenceThreshold { threshold: f32 },
}

#[derive(Debug, Deserialize, Default)]
struct RangecamConfigFile {
    source: Option<SourceConfigFile>,
    focal_length: Option<f64>,
    confidence_threshold: Option<f32>,
    log_path: Option<PathBuf>,
    /// Extends/overrides the built-in reference height table.
    heights: Option<HashMap<String, f64>>,
}

#[derive(Debug, Deserialize, Default)]
struct SourceConfigFile {
    url: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    max_frames: Option<u64>,
}

#[derive(Clone, Debug)]
pub struct RangecamConfig {
    pub source: SourceSettings,
    pub focal_length: f64,
    pub confidence_threshold: f32,
    pub log_path: PathBuf,
    pub heights: ReferenceHeightTable,
}

#[derive(Clone, Debug)]
pub struct SourceSettings {
    pub url: String,
    pub width: u32,
    pub height: u32,
    pub max_frames: Option<u64>,
}

impl RangecamConfig {
    /// Load from the file named by `RANGECAM_CONFIG` (if set), apply env
    /// overrides, then validate. Validation failures are fatal.
    pub fn load() -> Result<Self> {
        let config_path = std::env::var("RANGECAM_CONFIG").ok();
        let file_cfg = match config_path.as_deref() {
            Some(path) => Some(read_config_file(Path::new(path))?),
            None => None,
        };
        let mut cfg = Self::from_file(file_cfg.unwrap_or_default())?;
        cfg.apply_env()?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn from_file(file: RangecamConfigFile) -> Result<Self> {
        let source = SourceSettings {
            url: file
                .source
                .as_ref()
                .and_then(|source| source.url.clone())
                .unwrap_or_else(|| DEFAULT_SOURCE_URL.to_string()),
            width: file
                .source
                .as_ref()
                .and_then(|source| source.width)
                .unwrap_or(DEFAULT_WIDTH),
            height: file
                .source
                .as_ref()
                .and_then(|source| source.height)
                .unwrap_or(DEFAULT_HEIGHT),
            max_frames: file.source.as_ref().and_then(|source| source.max_frames),
        };
        let focal_length = file.focal_length.unwrap_or(DEFAULT_FOCAL_LENGTH);
        let confidence_threshold = file
            .confidence_threshold
            .unwrap_or(DEFAULT_CONFIDENCE_THRESHOLD);
        let log_path = file
            .log_path
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_PATH));

        let mut heights = ReferenceHeightTable::with_defaults();
        if let Some(entries) = file.heights {
            for (label, height_m) in entries {
                heights.register(&label, height_m)?;
            }
        }

        Ok(Self {
            source,
            focal_length,
            confidence_threshold,
            log_path,
            heights,
        })
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Ok(url) = std::env::var("RANGECAM_SOURCE_URL") {
            if !url.trim().is_empty() {
                self.source.url = url;
            }
        }
        if let Ok(path) = std::env::var("RANGECAM_LOG_PATH") {
            if !path.trim().is_empty() {
                self.log_path = PathBuf::from(path);
            }
        }
        if let Ok(focal) = std::env::var("RANGECAM_FOCAL_LENGTH") {
            self.focal_length = focal
                .parse()
                .map_err(|_| anyhow!("RANGECAM_FOCAL_LENGTH must be a number"))?;
        }
        if let Ok(threshold) = std::env::var("RANGECAM_CONFIDENCE_THRESHOLD") {
            self.confidence_threshold = threshold
                .parse()
                .map_err(|_| anyhow!("RANGECAM_CONFIDENCE_THRESHOLD must be a number"))?;
        }
        if let Ok(max_frames) = std::env::var("RANGECAM_MAX_FRAMES") {
            self.source.max_frames = Some(
                max_frames
                    .parse()
                    .map_err(|_| anyhow!("RANGECAM_MAX_FRAMES must be an integer"))?,
            );
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !self.focal_length.is_finite() || self.focal_length <= 0.0 {
            return Err(ConfigError::InvalidFocalLength {
                focal_length: self.focal_length,
            });
        }
        if !self.confidence_threshold.is_finite()
            || !(0.0..=1.0).contains(&self.confidence_threshold)
        {
            return Err(ConfigError::InvalidConfidenceThreshold {
                threshold: self.confidence_threshold,
            });
        }
        Ok(())
    }
}

fn read_config_file(path: &Path) -> Result<RangecamConfigFile> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow!("failed to read config file {}: {}", path.display(), e))?;
    let cfg = serde_json::from_str(&raw)
        .map_err(|e| anyhow!("invalid config file {}: {}", path.display(), e))?;
    Ok(cfg)
}
