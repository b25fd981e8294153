//! Wiki configuration module.
//!
//! Handles loading, validating, and merging `modwiki.toml`. Stock defaults are
//! overridden by the user file, which only needs the keys it wants to change.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! title = "LSS-Manager V.4 Wiki"
//! description = "The Wiki for the LSS-Manager"
//! base = "/v4/docs/"
//! dest = "./dist/docs"
//! logo = "/img/lssm.png"
//!
//! [paths]
//! modules_dir = "src/modules"
//! docs_dir = "docs"
//! public_assets_dir = "docs/.vuepress/public/assets"
//! versions_file = "static/.configs.json"
//! emit_path = "docs/.vuepress/config.json"
//!
//! [links]
//! discord = ""
//! discord_support = ""
//! github = ""
//! server = ""
//!
//! [browsers]                # passed through to the theme variables
//!
//! [[games]]
//! locale = "de_DE"
//! flag = "🇩🇪"
//! name = "Leitstellenspiel"
//! ```
//!
//! ## Merging
//!
//! Tables merge key-by-key; arrays (such as `games`) replace the default
//! wholesale. The order of `games` is the order locales are published in.
//!
//! Unknown keys are rejected to catch typos early.

use crate::locale::Locale;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Wiki configuration loaded from `modwiki.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WikiConfig {
    /// Site title; each locale's title is this plus the locale's flag.
    pub title: String,
    pub description: String,
    /// Public base URL the generator serves the wiki under.
    pub base: String,
    /// Generator output directory. Wiped at the start of every build.
    pub dest: String,
    /// Logo and favicon URL.
    pub logo: String,
    pub paths: PathsConfig,
    pub links: LinksConfig,
    /// Browser metadata, passed through to the theme untouched.
    pub browsers: toml::Table,
    /// Supported locales, in publication order.
    pub games: Vec<GameConfig>,
}

impl Default for WikiConfig {
    fn default() -> Self {
        Self {
            title: "LSS-Manager V.4 Wiki".to_string(),
            description: "The Wiki for the LSS-Manager".to_string(),
            base: "/v4/docs/".to_string(),
            dest: "./dist/docs".to_string(),
            logo: "/img/lssm.png".to_string(),
            paths: PathsConfig::default(),
            links: LinksConfig::default(),
            browsers: toml::Table::new(),
            games: vec![
                GameConfig::new("de_DE", "🇩🇪", "Leitstellenspiel"),
                GameConfig::new("en_US", "🇺🇸", "MissionChief"),
                GameConfig::new("nl_NL", "🇳🇱", "Meldkamerspel"),
            ],
        }
    }
}

impl WikiConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.title.trim().is_empty() {
            return Err(ConfigError::Validation("title must not be empty".into()));
        }
        if self.games.is_empty() {
            return Err(ConfigError::Validation(
                "games must list at least one locale".into(),
            ));
        }
        let mut seen = HashSet::new();
        for game in &self.games {
            if !seen.insert(&game.locale) {
                return Err(ConfigError::Validation(format!(
                    "locale {} is listed more than once in games",
                    game.locale
                )));
            }
        }
        for (key, value) in [
            ("paths.modules_dir", &self.paths.modules_dir),
            ("paths.docs_dir", &self.paths.docs_dir),
            ("paths.public_assets_dir", &self.paths.public_assets_dir),
            ("paths.versions_file", &self.paths.versions_file),
            ("paths.emit_path", &self.paths.emit_path),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Validation(format!("{key} must not be empty")));
            }
        }
        self.validate_dest()
    }

    /// `dest` is deleted at the start of every build, so it must be a
    /// directory strictly below the project root that holds none of the inputs.
    fn validate_dest(&self) -> Result<(), ConfigError> {
        let invalid = |reason: &str| -> Result<(), ConfigError> {
            Err(ConfigError::Validation(format!(
                "dest {:?} {reason}",
                self.dest
            )))
        };

        let dest = Path::new(self.dest.trim());
        if dest.has_root() || dest.is_absolute() {
            return invalid("must be relative to the project root");
        }
        if dest.components().any(|c| c == Component::ParentDir) {
            return invalid("must not contain '..'");
        }
        let dest = normal_components(dest);
        if dest.as_os_str().is_empty() {
            return invalid("must name a directory below the project root");
        }

        for (key, value) in [
            ("paths.modules_dir", &self.paths.modules_dir),
            ("paths.docs_dir", &self.paths.docs_dir),
            ("paths.public_assets_dir", &self.paths.public_assets_dir),
            ("paths.versions_file", &self.paths.versions_file),
        ] {
            let input = Path::new(value.trim());
            if input.is_relative() && normal_components(input).starts_with(&dest) {
                return invalid(&format!("must not contain {key}"));
            }
        }
        Ok(())
    }

    /// Candidate locales in configuration order.
    pub fn locales(&self) -> Vec<Locale> {
        self.games.iter().map(|g| g.locale.clone()).collect()
    }

    pub fn game(&self, locale: &Locale) -> Option<&GameConfig> {
        self.games.iter().find(|g| &g.locale == locale)
    }
}

/// Per-locale game settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GameConfig {
    pub locale: Locale,
    /// Flag glyph shown next to the locale label.
    pub flag: String,
    /// Display name of the game in that locale.
    pub name: String,
}

impl GameConfig {
    fn new(locale: &str, flag: &str, name: &str) -> Self {
        Self {
            locale: Locale::parse(locale).expect("stock locale must be valid"),
            flag: flag.to_string(),
            name: name.to_string(),
        }
    }
}

/// Input and output locations, relative to the project root.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    /// Root of the module tree (`{module}/docs`, `{module}/i18n`, ...).
    pub modules_dir: String,
    /// Docs root holding one pre-existing directory per published locale.
    pub docs_dir: String,
    /// Public asset directory of the generator; module assets land in `{module}/`.
    pub public_assets_dir: String,
    /// JSON file exposing a `versions` field.
    pub versions_file: String,
    /// Where the generator configuration is written.
    pub emit_path: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            modules_dir: "src/modules".to_string(),
            docs_dir: "docs".to_string(),
            public_assets_dir: "docs/.vuepress/public/assets".to_string(),
            versions_file: "static/.configs.json".to_string(),
            emit_path: "docs/.vuepress/config.json".to_string(),
        }
    }
}

impl PathsConfig {
    /// Join every configured path onto the project root.
    pub fn resolve(&self, root: &Path) -> ProjectPaths {
        ProjectPaths {
            modules_dir: root.join(&self.modules_dir),
            docs_dir: root.join(&self.docs_dir),
            public_assets_dir: root.join(&self.public_assets_dir),
            versions_file: root.join(&self.versions_file),
            emit_path: root.join(&self.emit_path),
        }
    }
}

/// [`PathsConfig`] joined onto a project root.
#[derive(Debug, Clone)]
pub struct ProjectPaths {
    pub modules_dir: PathBuf,
    pub docs_dir: PathBuf,
    pub public_assets_dir: PathBuf,
    pub versions_file: PathBuf,
    pub emit_path: PathBuf,
}

/// `path` without `.` and root components.
fn normal_components(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| matches!(c, Component::Normal(_)))
        .collect()
}

/// External links exposed to the theme.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LinksConfig {
    /// Discord invite; also the single entry of every locale's top nav.
    pub discord: String,
    pub discord_support: String,
    /// Repository URL, used for both the theme `repo` and the `github` variable.
    pub github: String,
    pub server: String,
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(WikiConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<WikiConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: WikiConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from the given file, falling back to stock defaults if absent.
pub fn load_config(path: &Path) -> Result<WikiConfig, ConfigError> {
    let overlay = load_raw_config(path)?;
    if overlay.is_none() {
        tracing::debug!(path = %path.display(), "No config file, using stock defaults");
    }
    resolve_config(stock_defaults_value(), overlay)
}

/// Returns a fully-commented stock `modwiki.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# modwiki Configuration
# =====================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# Site title. Each locale's title is this plus the locale's flag.
title = "LSS-Manager V.4 Wiki"
description = "The Wiki for the LSS-Manager"

# Public base URL and output directory of the site generator.
# The output directory is wiped at the start of every build. It must be a
# relative path below the project root that holds no sources.
base = "/v4/docs/"
dest = "./dist/docs"

# Logo, also used as favicon.
logo = "/img/lssm.png"

# ---------------------------------------------------------------------------
# Paths (relative to the project root)
# ---------------------------------------------------------------------------
[paths]
# Module tree: {module}/docs/{locale}.md, {module}/docs/assets/,
# {module}/i18n/{locale}.root.json and {module}/register.json.
modules_dir = "src/modules"

# Docs root. A locale is only published if docs/{locale}/ already exists.
docs_dir = "docs"

# Module assets are mirrored into {public_assets_dir}/{module}/.
public_assets_dir = "docs/.vuepress/public/assets"

# JSON file whose `versions` field is exposed to the theme.
versions_file = "static/.configs.json"

# Where the generated site-generator configuration is written.
emit_path = "docs/.vuepress/config.json"

# ---------------------------------------------------------------------------
# Links exposed to the theme
# ---------------------------------------------------------------------------
[links]
discord = ""
discord_support = ""
github = ""
server = ""

# ---------------------------------------------------------------------------
# Browser metadata (free-form, passed through to the theme)
# ---------------------------------------------------------------------------
[browsers]

# ---------------------------------------------------------------------------
# Locales, in publication order. Listing games replaces the whole default list.
# ---------------------------------------------------------------------------
[[games]]
locale = "de_DE"
flag = "🇩🇪"
name = "Leitstellenspiel"

[[games]]
locale = "en_US"
flag = "🇺🇸"
name = "MissionChief"

[[games]]
locale = "nl_NL"
flag = "🇳🇱"
name = "Meldkamerspel"
"##
}
