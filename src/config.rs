use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Soft-wrap strategy, selected at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WrapMode {
    /// Fixed character-count wrap: long lines fold onto extra visual rows.
    Character,
    /// Variable pixel-width glyphs: long lines overflow horizontally.
    Pixel,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Visible rows in the viewport.
    #[serde(default = "default_max_lines")]
    pub max_lines: usize,
    /// Visible columns: the wrap width under character metrics, the window
    /// width in cells under pixel metrics.
    #[serde(default = "default_max_columns")]
    pub max_columns: usize,
    #[serde(default = "default_wrap_mode")]
    pub wrap: WrapMode,
    /// Pixel width of one narrow glyph (pixel metrics only).
    #[serde(default = "default_base_char_width")]
    pub base_char_width: usize,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default = "default_max_history")]
    pub max_history: usize,
}

fn default_max_lines() -> usize { 10 }
fn default_max_columns() -> usize { 40 }
fn default_wrap_mode() -> WrapMode { WrapMode::Pixel }
fn default_base_char_width() -> usize { 8 }
fn default_page_size() -> usize { 10 }
fn default_max_history() -> usize { 100 }

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            max_lines: default_max_lines(),
            max_columns: default_max_columns(),
            wrap: default_wrap_mode(),
            base_char_width: default_base_char_width(),
            page_size: default_page_size(),
            max_history: default_max_history(),
        }
    }
}

impl EditorConfig {
    pub fn exists() -> bool { Self::config_path().exists() }

    /// Load from the user config file, falling back to defaults on a
    /// missing or malformed file.
    pub fn load() -> Self {
        let config_path = Self::config_path();
        if config_path.exists() {
            match fs::read_to_string(&config_path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => log::warn!("failed to parse config: {}", e),
                },
                Err(e) => log::warn!("failed to read config: {}", e),
            }
        }
        Self::default()
    }

    pub fn config_path() -> PathBuf { Self::config_dir().join("config.toml") }

    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("linepad")
    }

    pub fn save(&self) -> std::io::Result<()> {
        fs::create_dir_all(Self::config_dir())?;
        let toml_string = toml::to_string_pretty(self).unwrap_or_else(|_| String::new());
        fs::write(Self::config_path(), toml_string)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: EditorConfig = toml::from_str("").unwrap();
        assert_eq!(config.max_lines, 10);
        assert_eq!(config.max_columns, 40);
        assert_eq!(config.wrap, WrapMode::Pixel);
        assert_eq!(config.base_char_width, 8);
        assert_eq!(config.page_size, 10);
        assert_eq!(config.max_history, 100);
    }

    #[test]
    fn test_partial_toml_keeps_other_defaults() {
        let config: EditorConfig = toml::from_str("wrap = \"character\"\nmax_columns = 24").unwrap();
        assert_eq!(config.wrap, WrapMode::Character);
        assert_eq!(config.max_columns, 24);
        assert_eq!(config.max_lines, 10);
    }

    #[test]
    fn test_round_trips_through_toml() {
        let config = EditorConfig {
            max_lines: 6,
            wrap: WrapMode::Character,
            ..EditorConfig::default()
        };
        let serialized = toml::to_string_pretty(&config).unwrap();
        let parsed: EditorConfig = toml::from_str(&serialized).unwrap();
        assert_eq!(parsed.max_lines, 6);
        assert_eq!(parsed.wrap, WrapMode::Character);
    }
}
