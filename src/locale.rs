//! Locale codes and locale resolution.
//!
//! A locale is a language/region pair written `ll_RR` (two lowercase ASCII
//! letters, an underscore, two uppercase ASCII letters), e.g. `en_US`. The same
//! code names a documentation file (`docs/en_US.md`), a localization resource
//! (`i18n/en_US.root.json`) and an output subtree (`docs/en_US/`).
//!
//! ## Resolution
//!
//! The configured locales are only candidates. A locale is published only if
//! its output directory already exists under the docs root:
//!
//! ```text
//! docs/
//! ├── de_DE/          # resolved
//! ├── en_US/          # resolved
//! └── .vuepress/      # ignored (not a configured locale)
//! ```
//!
//! Configured locales without a directory are dropped without error.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid locale code {0:?} (expected ll_RR, e.g. en_US)")]
pub struct InvalidLocale(pub String);

/// A validated `ll_RR` locale code.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Locale(String);

impl Locale {
    /// Parse a bare locale code such as `en_US`.
    pub fn parse(code: &str) -> Result<Self, InvalidLocale> {
        if is_locale_code(code) {
            Ok(Self(code.to_string()))
        } else {
            Err(InvalidLocale(code.to_string()))
        }
    }

    /// Parse a documentation filename of the form `ll_RR.md`.
    ///
    /// Anything else (`README.md`, `en_us.md`, `en_US.markdown`, `assets`)
    /// yields `None`; such files are not documentation for a locale.
    pub fn from_doc_filename(filename: &str) -> Option<Self> {
        let code = filename.strip_suffix(".md")?;
        Self::parse(code).ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_locale_code(code: &str) -> bool {
    let bytes = code.as_bytes();
    bytes.len() == 5
        && bytes[0].is_ascii_lowercase()
        && bytes[1].is_ascii_lowercase()
        && bytes[2] == b'_'
        && bytes[3].is_ascii_uppercase()
        && bytes[4].is_ascii_uppercase()
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Locale {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Locale {
    type Error = InvalidLocale;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if is_locale_code(&value) {
            Ok(Self(value))
        } else {
            Err(InvalidLocale(value))
        }
    }
}

impl From<Locale> for String {
    fn from(locale: Locale) -> Self {
        locale.0
    }
}

/// Keep the candidates that appear in a directory listing, in candidate order.
pub fn present_locales<S: AsRef<str>>(candidates: &[Locale], listing: &[S]) -> Vec<Locale> {
    candidates
        .iter()
        .filter(|locale| listing.iter().any(|name| name.as_ref() == locale.as_str()))
        .cloned()
        .collect()
}

/// Resolve which configured locales have an output directory under `docs_dir`.
///
/// A missing `docs_dir` resolves to no locales.
pub fn resolve_locales(candidates: &[Locale], docs_dir: &Path) -> io::Result<Vec<Locale>> {
    if !docs_dir.is_dir() {
        tracing::warn!(docs_dir = %docs_dir.display(), "Docs directory does not exist");
        return Ok(Vec::new());
    }

    let mut listing = Vec::new();
    for entry in fs::read_dir(docs_dir)? {
        let entry = entry?;
        if entry.path().is_dir() {
            listing.push(entry.file_name().to_string_lossy().into_owned());
        }
    }

    let resolved = present_locales(candidates, &listing);
    for locale in candidates.iter().filter(|l| !resolved.contains(l)) {
        tracing::debug!(%locale, "Skipping locale without output directory");
    }
    Ok(resolved)
}
