use crate::modality::Modality;
use crate::session::ProgressPolicy;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}")]
    InvalidValue { key: String, value: String },
    #[error("progress step must be positive and the ceiling below 100")]
    InvalidProgress,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Origin of the inference service. Empty means same origin.
    pub api_base: String,
    pub health_path: String,
    pub progress_interval_ms: u32,
    pub progress_step: u8,
    pub progress_ceiling: u8,
    /// How long the bar sits at 100% before the verdict replaces it.
    pub reveal_delay_ms: u32,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            health_path: "/api/health".to_string(),
            progress_interval_ms: 1000,
            progress_step: 5,
            progress_ceiling: 90,
            reveal_delay_ms: 400,
        }
    }
}

impl DetectorConfig {
    /// Build from `DETECTOR_*` key/value pairs, starting from the defaults.
    /// Unknown keys are ignored.
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut config = Self::default();
        for (key, value) in pairs {
            match key {
                "DETECTOR_API_BASE" => config.api_base = value.trim().to_string(),
                "DETECTOR_HEALTH_PATH" => config.health_path = value.trim().to_string(),
                "DETECTOR_PROGRESS_INTERVAL_MS" => {
                    config.progress_interval_ms = parse(key, value)?
                }
                "DETECTOR_PROGRESS_STEP" => config.progress_step = parse(key, value)?,
                "DETECTOR_PROGRESS_CEILING" => config.progress_ceiling = parse(key, value)?,
                "DETECTOR_REVEAL_DELAY_MS" => config.reveal_delay_ms = parse(key, value)?,
                _ => {}
            }
        }
        config.check()?;
        Ok(config)
    }

    fn check(&self) -> Result<(), ConfigError> {
        if self.progress_step == 0 || self.progress_ceiling >= 100 {
            return Err(ConfigError::InvalidProgress);
        }
        Ok(())
    }

    pub fn progress_policy(&self) -> ProgressPolicy {
        ProgressPolicy {
            step: self.progress_step,
            ceiling: self.progress_ceiling,
        }
    }

    pub fn endpoint_url(&self, modality: Modality) -> String {
        self.url(modality.descriptor().endpoint_path)
    }

    pub fn health_url(&self) -> String {
        self.url(&self.health_path)
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_base.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

fn parse<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}
