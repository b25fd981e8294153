//! Site generator configuration.
//!
//! Stage 4 of the build pipeline. Folds the assembled navigation, the versions
//! file and the static wiki options into the configuration object of the
//! external site generator, and writes it as JSON.
//!
//! ## Shape
//!
//! ```text
//! {
//!   "title", "description", "base", "dest", "head", "markdown",
//!   "themeConfig": {
//!     "logo",
//!     "variables": { discord, discord_support, github, server,
//!                    versions, browsers, noMapkitModules },
//!     "locales": { "/en_US/": { label, nav, sidebar }, ... },
//!     "activeHeaderLinks", "repo", "editLinks"
//!   },
//!   "locales": { "/en_US/": { lang, title }, ... },
//!   "plugins": { ... }
//! }
//! ```
//!
//! Locale-keyed maps keep the configured locale order.

use crate::config::WikiConfig;
use crate::navigation::{LocaleNavigation, NavLink, RestrictedEntry, SidebarItem};
use serde::{Serialize, Serializer};
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Failed to read versions file {path}: {source}")]
    Versions {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Configuration object handed to the site generator.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteOptions {
    pub title: String,
    pub description: String,
    pub base: String,
    pub dest: String,
    pub head: serde_json::Value,
    pub markdown: MarkdownOptions,
    pub theme_config: ThemeOptions,
    #[serde(serialize_with = "ordered_map")]
    pub locales: Vec<(String, SiteLocale)>,
    pub plugins: serde_json::Value,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkdownOptions {
    pub sluglify: String,
    pub line_numbers: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeOptions {
    pub logo: String,
    pub variables: ThemeVariables,
    #[serde(serialize_with = "ordered_map")]
    pub locales: Vec<(String, ThemeLocale)>,
    pub active_header_links: bool,
    pub repo: String,
    pub edit_links: bool,
}

/// Values templates can reference.
#[derive(Debug, Serialize)]
pub struct ThemeVariables {
    pub discord: String,
    pub discord_support: String,
    pub github: String,
    pub server: String,
    pub versions: serde_json::Value,
    pub browsers: toml::Table,
    /// Restricted list per locale code.
    #[serde(rename = "noMapkitModules", serialize_with = "ordered_map")]
    pub no_mapkit_modules: Vec<(String, Vec<RestrictedEntry>)>,
}

/// Theme settings of one locale.
#[derive(Debug, Serialize)]
pub struct ThemeLocale {
    pub label: String,
    pub nav: Vec<NavLink>,
    pub sidebar: Vec<SidebarItem>,
}

/// Site settings of one locale.
#[derive(Debug, Serialize)]
pub struct SiteLocale {
    pub lang: String,
    pub title: String,
}

fn ordered_map<S, V>(entries: &[(String, V)], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    V: Serialize,
{
    serializer.collect_map(entries.iter().map(|(k, v)| (k, v)))
}

/// Read the `versions` field of the versions file. A missing field is `null`.
pub fn load_versions(path: &Path) -> Result<serde_json::Value, GenerateError> {
    let content = fs::read_to_string(path).map_err(|source| GenerateError::Versions {
        path: path.to_path_buf(),
        source,
    })?;
    let mut value: serde_json::Value = serde_json::from_str(&content)?;
    Ok(value
        .get_mut("versions")
        .map(serde_json::Value::take)
        .unwrap_or(serde_json::Value::Null))
}

/// Plugins enabled on every wiki.
pub fn default_plugins() -> serde_json::Value {
    json!({
        "@vuepress/active-header-links": {},
        "@vuepress/back-to-top": {},
        "@vuepress/last-updated": {},
        "vuepress-plugin-redirect": { "locales": true },
        "vuepress-plugin-smooth-scroll": {},
        "vuepress-plugin-zooming": {
            "selector": "img:not([data-prevent-zooming])",
            "options": { "bgColor": "black" },
        },
    })
}

/// Fold navigation and static options into the generator configuration.
pub fn site_options(
    config: &WikiConfig,
    navigation: &[LocaleNavigation],
    versions: serde_json::Value,
) -> SiteOptions {
    let locales = navigation
        .iter()
        .map(|n| {
            (
                n.path(),
                SiteLocale {
                    lang: n.locale.to_string(),
                    title: format!("{} {}", config.title, n.flag),
                },
            )
        })
        .collect();

    let theme_locales = navigation
        .iter()
        .map(|n| {
            (
                n.path(),
                ThemeLocale {
                    label: n.label.clone(),
                    nav: n.nav.clone(),
                    sidebar: n.sidebar.clone(),
                },
            )
        })
        .collect();

    let no_mapkit_modules = navigation
        .iter()
        .map(|n| (n.locale.to_string(), n.restricted.clone()))
        .collect();

    SiteOptions {
        title: config.title.clone(),
        description: config.description.clone(),
        base: config.base.clone(),
        dest: config.dest.clone(),
        head: json!([["link", { "rel": "icon", "href": config.logo }]]),
        markdown: MarkdownOptions {
            sluglify: String::new(),
            line_numbers: true,
        },
        theme_config: ThemeOptions {
            logo: config.logo.clone(),
            variables: ThemeVariables {
                discord: config.links.discord.clone(),
                discord_support: config.links.discord_support.clone(),
                github: config.links.github.clone(),
                server: config.links.server.clone(),
                versions,
                browsers: config.browsers.clone(),
                no_mapkit_modules,
            },
            locales: theme_locales,
            active_header_links: true,
            repo: config.links.github.clone(),
            edit_links: false,
        },
        locales,
        plugins: default_plugins(),
    }
}

/// Write the options as pretty JSON, creating parent directories.
pub fn emit(options: &SiteOptions, path: &Path) -> Result<(), GenerateError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut json = serde_json::to_string_pretty(options)?;
    json.push('\n');
    fs::write(path, json)?;
    tracing::info!(path = %path.display(), locales = options.locales.len(), "Emitted site config");
    Ok(())
}
