//! Shared types used across pipeline stages.
//!
//! Produced by the scan stage and read (never modified) by process, navigation
//! and generate.

use crate::locale::Locale;
use serde::Serialize;
use std::path::PathBuf;

/// One module's documentation page for one locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocEntry {
    /// Module identifier (its directory name).
    pub module: String,
    pub locale: Locale,
    /// Localized module name, used as page title and sort key.
    pub title: String,
    /// Whether the module belongs to the restricted (noMapkit) list.
    pub no_mapkit: bool,
    /// Source file, `{modules_dir}/{module}/docs/{locale}.md`.
    pub source: PathBuf,
    /// Destination relative to the docs root, `{locale}/modules/{module}.md`.
    pub path: String,
}

/// Everything the scan stage found for one module.
#[derive(Debug, Clone, Serialize)]
pub struct ModuleDocs {
    pub id: String,
    /// Entries in directory listing order.
    pub entries: Vec<DocEntry>,
    /// `docs/assets` if the module has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assets: Option<PathBuf>,
}

/// Destination of a module's page for a locale, relative to the docs root.
pub fn module_doc_path(locale: &Locale, module: &str) -> String {
    format!("{locale}/modules/{module}.md")
}
