//! Module catalog scanning and documentation planning.
//!
//! Stage 1 of the build pipeline. Walks the module tree, finds each module's
//! per-locale documentation, resolves titles and flags, and produces a [`Plan`]
//! that the later stages consume. Scanning only reads; nothing is written.
//!
//! ## Directory Structure
//!
//! ```text
//! src/modules/                     # Module root
//! ├── template/                    # Reserved, always skipped
//! ├── alpha/
//! │   ├── docs/
//! │   │   ├── de_DE.md             # Documentation for de_DE
//! │   │   ├── en_US.md             # Documentation for en_US
//! │   │   ├── notes.md             # Not a locale code, ignored
//! │   │   └── assets/              # Mirrored to public assets
//! │   ├── i18n/
//! │   │   ├── de_DE.root.json      # {"name": ...}
//! │   │   └── en_US.root.json
//! │   └── register.json            # {"noMapkit": ...}
//! └── beta/                        # No docs/ folder, skipped
//!     └── i18n/
//! ```
//!
//! ## Rules
//!
//! - Modules are visited in directory listing order. Final ordering is by
//!   title and happens in the navigation stage.
//! - Only files named exactly `ll_RR.md` are documentation.
//! - Documentation for a locale that was not resolved (no output directory)
//!   is dropped without error.
//! - Every kept entry must have a localized title, otherwise the scan fails.

use crate::locale::Locale;
use crate::metadata::{MetadataError, MetadataSource};
use crate::types::{DocEntry, ModuleDocs, module_doc_path};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Metadata error: {0}")]
    Metadata(#[from] MetadataError),
    #[error("Module directory not found: {0}")]
    MissingModulesDir(PathBuf),
}

/// Module directory name that is never published.
pub const TEMPLATE_MODULE: &str = "template";

/// Output of the scan stage.
#[derive(Debug, Clone, Serialize)]
pub struct Plan {
    /// Resolved locales, in configuration order.
    pub locales: Vec<Locale>,
    /// Modules with a `docs/` folder, in listing order.
    pub modules: Vec<ModuleDocs>,
}

impl Plan {
    /// All entries for a locale, in discovery order.
    pub fn entries_for<'a>(&'a self, locale: &'a Locale) -> impl Iterator<Item = &'a DocEntry> {
        self.modules
            .iter()
            .flat_map(|m| m.entries.iter())
            .filter(move |e| &e.locale == locale)
    }

    pub fn entry_count(&self) -> usize {
        self.modules.iter().map(|m| m.entries.len()).sum()
    }
}

pub fn scan(
    modules_dir: &Path,
    locales: &[Locale],
    metadata: &impl MetadataSource,
) -> Result<Plan, ScanError> {
    let mut modules = Vec::new();
    for id in list_modules(modules_dir)? {
        let module = extract_module(modules_dir, &id, locales, metadata)?;
        tracing::debug!(
            module = %module.id,
            entries = module.entries.len(),
            assets = module.assets.is_some(),
            "Scanned module"
        );
        modules.push(module);
    }

    let plan = Plan {
        locales: locales.to_vec(),
        modules,
    };
    tracing::info!(
        modules = plan.modules.len(),
        entries = plan.entry_count(),
        "Scan completed"
    );
    Ok(plan)
}

/// List module identifiers that have a `docs/` folder.
///
/// Skips the reserved `template` module and plain files.
pub fn list_modules(modules_dir: &Path) -> Result<Vec<String>, ScanError> {
    if !modules_dir.is_dir() {
        return Err(ScanError::MissingModulesDir(modules_dir.to_path_buf()));
    }

    let mut modules = Vec::new();
    for entry in fs::read_dir(modules_dir)? {
        let path = entry?.path();
        let Some(name) = path.file_name().map(|n| n.to_string_lossy().into_owned()) else {
            continue;
        };
        if name == TEMPLATE_MODULE || !path.is_dir() {
            continue;
        }
        if !path.join("docs").is_dir() {
            tracing::debug!(module = %name, "Skipping module without docs");
            continue;
        }
        modules.push(name);
    }
    Ok(modules)
}

/// Read one module's `docs/` folder and plan its entries.
pub fn extract_module(
    modules_dir: &Path,
    module: &str,
    locales: &[Locale],
    metadata: &impl MetadataSource,
) -> Result<ModuleDocs, ScanError> {
    let docs_dir = modules_dir.join(module).join("docs");

    let mut doc_files = Vec::new();
    for entry in fs::read_dir(&docs_dir)? {
        let entry = entry?;
        if entry.path().is_file() {
            doc_files.push(entry.file_name().to_string_lossy().into_owned());
        }
    }

    let entries = plan_module(module, &docs_dir, &doc_files, locales, metadata)?;

    let assets_dir = docs_dir.join("assets");
    let assets = assets_dir.is_dir().then_some(assets_dir);

    Ok(ModuleDocs {
        id: module.to_string(),
        entries,
        assets,
    })
}

/// Turn a `docs/` listing into entries. Pure apart from the metadata lookup.
///
/// Filenames that are not `ll_RR.md` are skipped, as are locales missing
/// from `locales`. Entry order follows `doc_files`.
pub fn plan_module(
    module: &str,
    docs_dir: &Path,
    doc_files: &[String],
    locales: &[Locale],
    metadata: &impl MetadataSource,
) -> Result<Vec<DocEntry>, MetadataError> {
    let mut entries = Vec::new();
    for filename in doc_files {
        let Some(locale) = Locale::from_doc_filename(filename) else {
            continue;
        };
        if !locales.contains(&locale) {
            tracing::debug!(%module, %locale, "Dropping docs for unpublished locale");
            continue;
        }

        let meta = metadata.resolve(module, &locale)?;
        entries.push(DocEntry {
            module: module.to_string(),
            path: module_doc_path(&locale, module),
            locale,
            title: meta.title,
            no_mapkit: meta.no_mapkit,
            source: docs_dir.join(filename),
        });
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::FsMetadata;
    use crate::test_helpers::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    // =========================================================================
    // plan_module (pure)
    // =========================================================================

    #[test]
    fn plan_keeps_only_locale_files() {
        let meta = MockMetadata::new().with("alpha", "en_US", "Alpha", false);
        let entries = plan_module(
            "alpha",
            Path::new("/m/alpha/docs"),
            &names(&["en_US.md", "README.md", "en_us.md", "en_US.txt"]),
            &locales(&["en_US"]),
            &meta,
        )
        .unwrap();

        assert_eq!(entries.len(), 1);
        let e = &entries[0];
        assert_eq!(e.title, "Alpha");
        assert_eq!(e.path, "en_US/modules/alpha.md");
        assert_eq!(e.source, PathBuf::from("/m/alpha/docs/en_US.md"));
        assert_eq!(e.locale.as_str(), "en_US");
    }

    #[test]
    fn plan_drops_unresolved_locales_without_lookup() {
        // No metadata for de_DE: a lookup would fail, so none must happen.
        let meta = MockMetadata::new().with("alpha", "en_US", "Alpha", false);
        let entries = plan_module(
            "alpha",
            Path::new("/m/alpha/docs"),
            &names(&["de_DE.md", "en_US.md"]),
            &locales(&["en_US"]),
            &meta,
        )
        .unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].locale.as_str(), "en_US");
    }

    #[test]
    fn plan_missing_title_is_error() {
        let meta = MockMetadata::new();
        let result = plan_module(
            "alpha",
            Path::new("/m/alpha/docs"),
            &names(&["en_US.md"]),
            &locales(&["en_US"]),
            &meta,
        );
        assert!(matches!(
            result,
            Err(MetadataError::MissingLocalization { .. })
        ));
    }

    #[test]
    fn plan_carries_no_mapkit_flag() {
        let meta = MockMetadata::new()
            .with("beta", "en_US", "Beta", true)
            .with("beta", "de_DE", "Beta DE", true);
        let entries = plan_module(
            "beta",
            Path::new("/m/beta/docs"),
            &names(&["en_US.md", "de_DE.md"]),
            &locales(&["de_DE", "en_US"]),
            &meta,
        )
        .unwrap();

        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.no_mapkit));
        // Listing order, not locale order
        assert_eq!(entries[0].locale.as_str(), "en_US");
        assert_eq!(entries[1].title, "Beta DE");
    }

    // =========================================================================
    // Filesystem scan
    // =========================================================================

    #[test]
    fn template_module_is_skipped() {
        let project = ProjectFixture::new()
            .module("template", &[("en_US", "Template")])
            .module("alpha", &[("en_US", "Alpha")]);

        let modules = list_modules(&project.modules_dir()).unwrap();
        assert_eq!(modules, vec!["alpha"]);
    }

    #[test]
    fn module_without_docs_is_skipped() {
        let project = ProjectFixture::new().module("alpha", &[("en_US", "Alpha")]);
        std::fs::create_dir_all(project.modules_dir().join("nodocs/i18n")).unwrap();
        std::fs::write(project.modules_dir().join("index.json"), "{}").unwrap();

        let modules = list_modules(&project.modules_dir()).unwrap();
        assert_eq!(modules, vec!["alpha"]);
    }

    #[test]
    fn missing_modules_dir_is_error() {
        let project = ProjectFixture::new();
        let result = list_modules(&project.root().join("nope"));
        assert!(matches!(result, Err(ScanError::MissingModulesDir(_))));
    }

    #[test]
    fn scan_collects_entries_and_assets() {
        let project = ProjectFixture::new()
            .locale_dir("en_US")
            .locale_dir("de_DE")
            .module("alpha", &[("en_US", "Alpha"), ("de_DE", "Alpha DE")])
            .module_asset("alpha", "img/shot.png", "png")
            .module("beta", &[("en_US", "Beta")]);

        let plan = scan(
            &project.modules_dir(),
            &locales(&["de_DE", "en_US"]),
            &FsMetadata::new(&project.modules_dir()),
        )
        .unwrap();

        assert_eq!(plan.modules.len(), 2);
        assert_eq!(plan.entry_count(), 3);

        let alpha = find_module(&plan, "alpha");
        assert!(alpha.assets.as_ref().unwrap().ends_with("alpha/docs/assets"));
        let beta = find_module(&plan, "beta");
        assert!(beta.assets.is_none());

        let de_de = Locale::parse("de_DE").unwrap();
        let de: Vec<&str> = plan
            .entries_for(&de_de)
            .map(|e| e.title.as_str())
            .collect();
        assert_eq!(de, vec!["Alpha DE"]);
    }

    #[test]
    fn assets_folder_is_not_a_doc_entry() {
        let project = ProjectFixture::new()
            .locale_dir("en_US")
            .module("alpha", &[("en_US", "Alpha")])
            .module_asset("alpha", "en_US.md", "decoy");

        let plan = scan(
            &project.modules_dir(),
            &locales(&["en_US"]),
            &FsMetadata::new(&project.modules_dir()),
        )
        .unwrap();
        assert_eq!(plan.entry_count(), 1);
    }

    #[test]
    fn scan_fails_on_missing_localization() {
        let project = ProjectFixture::new()
            .locale_dir("en_US")
            .module("alpha", &[("en_US", "Alpha")]);
        std::fs::remove_file(project.modules_dir().join("alpha/i18n/en_US.root.json")).unwrap();

        let result = scan(
            &project.modules_dir(),
            &locales(&["en_US"]),
            &FsMetadata::new(&project.modules_dir()),
        );
        assert!(matches!(
            result,
            Err(ScanError::Metadata(MetadataError::MissingLocalization { .. }))
        ));
    }

    #[test]
    fn module_with_docs_for_unresolved_locale_only() {
        let project = ProjectFixture::new()
            .locale_dir("en_US")
            .module("alpha", &[("nl_NL", "Alpha NL")]);

        let plan = scan(
            &project.modules_dir(),
            &locales(&["en_US"]),
            &FsMetadata::new(&project.modules_dir()),
        )
        .unwrap();

        // The module is still scanned (its assets get mirrored), but has no entries.
        assert_eq!(find_module(&plan, "alpha").entries.len(), 0);
        assert_eq!(plan.entry_count(), 0);
    }
}
