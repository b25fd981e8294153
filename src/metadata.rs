//! Module metadata lookup.
//!
//! Every documentation entry needs two facts about its module:
//!
//! - **Title**: the `name` field of the module's localization resource for the
//!   entry's locale, `{module}/i18n/{locale}.root.json`.
//! - **noMapkit**: the `noMapkit` flag of the module's registration file,
//!   `{module}/register.json`. Absent file or absent key means `false`.
//!
//! ```text
//! src/modules/alpha/
//! ├── docs/en_US.md
//! ├── i18n/en_US.root.json     {"name": "Alpha Module", ...}
//! └── register.json            {"noMapkit": true, ...}
//! ```
//!
//! A module that ships `docs/{locale}.md` must also ship a title for that
//! locale. A missing resource or an empty `name` is a
//! [`MetadataError::MissingLocalization`] and aborts the build.
//!
//! Lookup goes through the [`MetadataSource`] trait so the scan stage can be
//! exercised against in-memory metadata.

use crate::locale::Locale;
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("module {module} has docs for {locale} but no localized name")]
    MissingLocalization { module: String, locale: Locale },
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Resolved metadata for one (module, locale) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleMetadata {
    pub title: String,
    pub no_mapkit: bool,
}

/// Where module titles and flags come from.
pub trait MetadataSource {
    fn resolve(&self, module: &str, locale: &Locale) -> Result<ModuleMetadata, MetadataError>;
}

/// Reads metadata from the JSON resources inside each module directory.
#[derive(Debug, Clone)]
pub struct FsMetadata {
    modules_dir: PathBuf,
}

#[derive(Deserialize)]
struct RootLocalization {
    name: Option<String>,
}

#[derive(Deserialize, Default)]
struct Registration {
    #[serde(rename = "noMapkit")]
    no_mapkit: Option<bool>,
}

impl FsMetadata {
    pub fn new(modules_dir: &Path) -> Self {
        Self {
            modules_dir: modules_dir.to_path_buf(),
        }
    }

    fn localization_path(&self, module: &str, locale: &Locale) -> PathBuf {
        self.modules_dir
            .join(module)
            .join("i18n")
            .join(format!("{locale}.root.json"))
    }

    fn registration_path(&self, module: &str) -> PathBuf {
        self.modules_dir.join(module).join("register.json")
    }

    fn title(&self, module: &str, locale: &Locale) -> Result<String, MetadataError> {
        let missing = || MetadataError::MissingLocalization {
            module: module.to_string(),
            locale: locale.clone(),
        };
        let path = self.localization_path(module, locale);
        let Some(localization) = read_json::<RootLocalization>(&path)? else {
            return Err(missing());
        };
        localization
            .name
            .filter(|n| !n.trim().is_empty())
            .ok_or_else(missing)
    }

    fn no_mapkit(&self, module: &str) -> Result<bool, MetadataError> {
        let registration: Registration =
            read_json(&self.registration_path(module))?.unwrap_or_default();
        Ok(registration.no_mapkit.unwrap_or(false))
    }
}

impl MetadataSource for FsMetadata {
    fn resolve(&self, module: &str, locale: &Locale) -> Result<ModuleMetadata, MetadataError> {
        Ok(ModuleMetadata {
            title: self.title(module, locale)?,
            no_mapkit: self.no_mapkit(module)?,
        })
    }
}

/// Read and parse a JSON file. `Ok(None)` if the file does not exist.
fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<Option<T>, MetadataError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    serde_json::from_str(&content)
        .map(Some)
        .map_err(|source| MetadataError::Json {
            path: path.to_path_buf(),
            source,
        })
}
