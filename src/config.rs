use std::fs;
use std::path::{Path, PathBuf};

use chrono::format::{Item, StrftimeItems};
use serde::Deserialize;
use thiserror::Error;

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");
const DEFAULT_DATE_FORMAT: &str = "%d.%m.%Y";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub style: StyleSheet,
    pub header: HeaderConfig,
    pub pdf: PdfConfig,
}

/// Fixed formatting applied by every renderer.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StyleSheet {
    pub font_family: String,
    pub code_font: String,
    pub font_size_pt: u32,
    pub justify: bool,
    pub margin_in: f32,
}

impl Default for StyleSheet {
    fn default() -> Self {
        Self {
            font_family: "Times New Roman".to_string(),
            code_font: "Courier New".to_string(),
            font_size_pt: 12,
            justify: true,
            margin_in: 1.0,
        }
    }
}

impl StyleSheet {
    /// Word sizes are in half-points.
    pub fn half_points(&self) -> usize {
        self.font_size_pt as usize * 2
    }

    /// Page margin in twentieths of a point.
    pub fn margin_twips(&self) -> i32 {
        (self.margin_in * 1440.0).round() as i32
    }
}

/// Title and date printed above the body.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct HeaderConfig {
    pub title_block: bool,
    pub date_line: bool,
    pub date_label: String,
    pub date_format: String,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            title_block: true,
            date_line: true,
            date_label: "Created".to_string(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

impl HeaderConfig {
    pub fn date_text(&self, date: chrono::NaiveDate) -> String {
        let mut pattern = self.date_format.as_str();
        if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
            log::warn!("invalid date_format {pattern:?}, using the default");
            pattern = DEFAULT_DATE_FORMAT;
        }
        format!("{}: {}", self.date_label, date.format(pattern))
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    pub font_family: String,
    pub paper: String,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            font_family: "Libertinus Serif".to_string(),
            paper: "a4".to_string(),
        }
    }
}

impl Config {
    /// The configuration bundled into the binary.
    pub fn compiled_default() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("default_config.toml is validated by build.rs")
    }

    /// Load config from a TOML file. Keys the file leaves out keep their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn compiled_default_matches_builtin_defaults() {
        assert_eq!(Config::compiled_default(), Config::default());
    }

    #[test]
    fn unit_conversions() {
        let style = StyleSheet::default();
        assert_eq!(style.half_points(), 24);
        assert_eq!(style.margin_twips(), 1440);
    }

    #[test]
    fn date_text_uses_label_and_format() {
        let header = HeaderConfig::default();
        let date = chrono::NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(header.date_text(date), "Created: 07.03.2024");
    }

    #[test]
    fn invalid_date_format_falls_back() {
        let header = HeaderConfig {
            date_format: "%Q".to_string(),
            ..HeaderConfig::default()
        };
        let date = chrono::NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(header.date_text(date), "Created: 07.03.2024");
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[style]\nfont_family = \"Georgia\"").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.style.font_family, "Georgia");
        assert_eq!(config.style.font_size_pt, 12);
        assert_eq!(config.header, HeaderConfig::default());
    }

    #[test]
    fn invalid_file_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[style\nfont_family =").unwrap();

        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = Config::load(Path::new("/nonexistent/mddoc.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
