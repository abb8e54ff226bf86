//! Theme loading and discovery.
//!
//! A theme is a directory under the themes root containing:
//!   - `theme.yaml`: configuration (colors, fonts, layout settings)
//!   - `theme.css`: stylesheet, linked from the assembled page
//!   - `assets/`: optional images and fonts, copied next to the output

use std::path::{Path, PathBuf};

use serde_yaml::Value;

use crate::error::{DeckError, Result};

/// A loaded theme: its directory plus the parsed `theme.yaml`.
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub dir: PathBuf,
    config: Value,
}

impl Theme {
    /// Load a theme by name from the themes directory.
    pub fn load(name: &str, themes_dir: &Path) -> Result<Self> {
        let dir = themes_dir.join(name);
        if !dir.is_dir() {
            return Err(DeckError::Theme {
                message: format!("theme '{}' not found in {}", name, themes_dir.display()),
                help: Some("run `deck themes` to list available themes".to_string()),
            });
        }

        let config_path = dir.join("theme.yaml");
        let content = std::fs::read_to_string(&config_path).map_err(|e| DeckError::Theme {
            message: format!("theme '{}' missing theme.yaml: {}", name, e),
            help: None,
        })?;

        let config: Value = serde_yaml::from_str(&content).map_err(|e| DeckError::Theme {
            message: format!("invalid theme.yaml for '{}': {}", name, e),
            help: Some("check theme.yaml syntax".to_string()),
        })?;

        Ok(Self {
            name: name.to_string(),
            dir,
            config,
        })
    }

    /// Look up a configuration value, with dot notation for nesting
    /// (`colors.background`).
    pub fn config_get(&self, key: &str) -> Option<&Value> {
        let mut value = &self.config;
        for part in key.split('.') {
            value = value.get(part)?;
        }
        Some(value)
    }

    /// String form of a configuration value, if present.
    pub fn config_str(&self, key: &str) -> Option<&str> {
        self.config_get(key).and_then(Value::as_str)
    }

    /// Path to `theme.css` when the theme ships one.
    pub fn css_path(&self) -> Option<PathBuf> {
        let path = self.dir.join("theme.css");
        path.is_file().then_some(path)
    }

    /// Path to the theme's `assets/` directory when it exists.
    pub fn assets_dir(&self) -> Option<PathBuf> {
        let dir = self.dir.join("assets");
        dir.is_dir().then_some(dir)
    }
}

/// Names of themes under `themes_dir` that carry a theme.yaml, sorted.
pub fn themes_available(themes_dir: &Path) -> Vec<String> {
    let Ok(entries) = std::fs::read_dir(themes_dir) else {
        return Vec::new();
    };

    let mut names: Vec<String> = entries
        .flatten()
        .filter(|e| e.path().is_dir() && e.path().join("theme.yaml").is_file())
        .filter_map(|e| e.file_name().into_string().ok())
        .collect();
    names.sort();
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn theme_write(root: &Path, name: &str, yaml: &str, css: Option<&str>) {
        let dir = root.join(name);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("theme.yaml"), yaml).unwrap();
        if let Some(css) = css {
            std::fs::write(dir.join("theme.css"), css).unwrap();
        }
    }

    #[test]
    fn test_load_reads_config() {
        let tmp = TempDir::new().unwrap();
        theme_write(
            tmp.path(),
            "dark",
            "colors:\n  background: '#111'\nfont: monospace\n",
            Some("body { color: white }"),
        );

        let theme = Theme::load("dark", tmp.path()).unwrap();
        assert_eq!(theme.config_str("colors.background"), Some("#111"));
        assert_eq!(theme.config_str("font"), Some("monospace"));
        assert_eq!(theme.config_str("missing.key"), None);
        assert!(theme.css_path().is_some());
        assert!(theme.assets_dir().is_none());
    }

    #[test]
    fn test_missing_theme_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let err = Theme::load("nope", tmp.path()).unwrap_err();
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn test_invalid_yaml_is_an_error() {
        let tmp = TempDir::new().unwrap();
        theme_write(tmp.path(), "broken", "colors: [unclosed", None);

        assert!(Theme::load("broken", tmp.path()).is_err());
    }

    #[test]
    fn test_themes_available_requires_theme_yaml() {
        let tmp = TempDir::new().unwrap();
        theme_write(tmp.path(), "b", "x: 1\n", None);
        theme_write(tmp.path(), "a", "x: 1\n", None);
        std::fs::create_dir_all(tmp.path().join("not-a-theme")).unwrap();

        assert_eq!(themes_available(tmp.path()), vec!["a", "b"]);
    }

    #[test]
    fn test_themes_available_with_missing_dir() {
        let tmp = TempDir::new().unwrap();
        assert!(themes_available(&tmp.path().join("absent")).is_empty());
    }
}
