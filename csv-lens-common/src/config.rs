use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_preview_rows")]
    pub preview_rows: usize,
    #[serde(default = "default_chart_width")]
    pub chart_width: usize,
}

fn default_preview_rows() -> usize {
    5
}
fn default_chart_width() -> usize {
    40
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            preview_rows: default_preview_rows(),
            chart_width: default_chart_width(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfilingConfig {
    #[serde(default = "default_frequency_top")]
    pub frequency_top: usize,
    #[serde(default)]
    pub histogram_bins: Option<usize>, // None picks a bin count from the series length
}

fn default_frequency_top() -> usize {
    20
}

impl Default for ProfilingConfig {
    fn default() -> Self {
        Self {
            frequency_top: default_frequency_top(),
            histogram_bins: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub profiling: ProfilingConfig,
}

impl Config {
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("csv-lens")
            .join("config.toml")
    }

    pub fn load() -> crate::Result<Self> {
        let path = if let Ok(env_path) = std::env::var("CSV_LENS_CONFIG") {
            PathBuf::from(env_path) // $CSV_LENS_CONFIG overrides default config path
        } else {
            Self::config_path()
        };
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path)?;
        let cfg: Self =
            toml::from_str(&content).map_err(|e| crate::CsvLensError::Other(e.to_string()))?;
        Ok(cfg)
    }

    pub fn save(&self) -> crate::Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::CsvLensError::Other(e.to_string()))?;
        std::fs::write(&path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_sections() {
        let cfg: Config = toml::from_str("").unwrap();
        assert_eq!(cfg.profiling.frequency_top, 20);
        assert_eq!(cfg.profiling.histogram_bins, None);
        assert_eq!(cfg.display.preview_rows, 5);
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let cfg: Config = toml::from_str("[profiling]\nfrequency_top = 10\n").unwrap();
        assert_eq!(cfg.profiling.frequency_top, 10);
        assert_eq!(cfg.display.preview_rows, 5);
    }

    #[test]
    fn round_trips_through_toml() {
        let cfg = Config::default();
        let text = toml::to_string_pretty(&cfg).unwrap();
        let back: Config = toml::from_str(&text).unwrap();
        assert_eq!(back.profiling.frequency_top, cfg.profiling.frequency_top);
    }
}
