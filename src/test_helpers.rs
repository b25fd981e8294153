//! Shared test utilities for the modwiki test suite.
//!
//! Provides a throwaway project tree builder, in-memory stand-ins for the
//! filesystem-backed seams, and lookup helpers that panic with a clear message
//! on miss.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let project = ProjectFixture::new()
//!     .locale_dir("en_US")
//!     .module("alpha", &[("en_US", "Alpha Module")])
//!     .module_asset("alpha", "img/shot.png", "png");
//!
//! let plan = scan(
//!     &project.modules_dir(),
//!     &locales(&["en_US"]),
//!     &FsMetadata::new(&project.modules_dir()),
//! ).unwrap();
//! let alpha = find_module(&plan, "alpha");
//! ```

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::config::{PathsConfig, WikiConfig};
use crate::locale::Locale;
use crate::metadata::{MetadataError, MetadataSource, ModuleMetadata};
use crate::navigation::StaticPages;
use crate::process::ProcessTargets;
use crate::scan::Plan;
use crate::types::{DocEntry, ModuleDocs, module_doc_path};

// =========================================================================
// Project tree
// =========================================================================

/// A project root in a temp directory laid out like the stock config expects.
///
/// ```text
/// {root}/
/// ├── src/modules/{module}/{docs,i18n}/...
/// ├── docs/{locale}/...
/// └── docs/.vuepress/public/assets/
/// ```
pub struct ProjectFixture {
    tmp: TempDir,
    modules_dir: PathBuf,
    docs_dir: PathBuf,
    public_assets_dir: PathBuf,
    dest_dir: PathBuf,
}

impl ProjectFixture {
    pub fn new() -> Self {
        let tmp = TempDir::new().unwrap();
        let paths = PathsConfig::default().resolve(tmp.path());
        let dest_dir = tmp.path().join(WikiConfig::default().dest);
        fs::create_dir_all(&paths.modules_dir).unwrap();
        fs::create_dir_all(&paths.docs_dir).unwrap();
        Self {
            tmp,
            modules_dir: paths.modules_dir,
            docs_dir: paths.docs_dir,
            public_assets_dir: paths.public_assets_dir,
            dest_dir,
        }
    }

    /// Create `docs/{code}/`, which publishes the locale.
    pub fn locale_dir(self, code: &str) -> Self {
        fs::create_dir_all(self.docs_dir.join(code)).unwrap();
        self
    }

    /// Add a module with `docs/{locale}.md` and a localized name per locale.
    ///
    /// Page bodies read `Docs for {module} in {locale}.`
    pub fn module(self, name: &str, docs: &[(&str, &str)]) -> Self {
        let dir = self.modules_dir.join(name);
        for (locale, title) in docs {
            write(
                &dir.join("docs").join(format!("{locale}.md")),
                &format!("Docs for {name} in {locale}.\n"),
            );
            write(
                &dir.join("i18n").join(format!("{locale}.root.json")),
                &serde_json::json!({ "name": title }).to_string(),
            );
        }
        self
    }

    /// Add a module flagged `noMapkit`.
    pub fn no_mapkit_module(self, name: &str, docs: &[(&str, &str)]) -> Self {
        let project = self.module(name, docs);
        write(
            &project.modules_dir.join(name).join("register.json"),
            r#"{"noMapkit": true}"#,
        );
        project
    }

    /// Add a file below a module's `docs/assets/`.
    pub fn module_asset(self, module: &str, rel: &str, content: &str) -> Self {
        write(
            &self.modules_dir.join(module).join("docs/assets").join(rel),
            content,
        );
        self
    }

    /// Add `docs/{locale}/{name}.md`.
    pub fn static_page(self, locale: &str, name: &str, content: &str) -> Self {
        write(
            &self.docs_dir.join(locale).join(format!("{name}.md")),
            content,
        );
        self
    }

    /// Write the versions file at its stock location.
    pub fn versions(self, json: &str) -> Self {
        let path = PathsConfig::default().resolve(self.root()).versions_file;
        write(&path, json);
        self
    }

    pub fn root(&self) -> &Path {
        self.tmp.path()
    }

    pub fn modules_dir(&self) -> PathBuf {
        self.modules_dir.clone()
    }

    pub fn docs_dir(&self) -> PathBuf {
        self.docs_dir.clone()
    }

    pub fn public_assets_dir(&self) -> PathBuf {
        self.public_assets_dir.clone()
    }

    pub fn dest_dir(&self) -> PathBuf {
        self.dest_dir.clone()
    }

    pub fn targets(&self) -> ProcessTargets<'_> {
        ProcessTargets {
            docs_dir: &self.docs_dir,
            public_assets_dir: &self.public_assets_dir,
        }
    }
}

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

// =========================================================================
// In-memory seams
// =========================================================================

/// Metadata keyed by `(module, locale)`. Unknown pairs are unlocalized.
#[derive(Default)]
pub struct MockMetadata {
    entries: HashMap<(String, String), ModuleMetadata>,
}

impl MockMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, module: &str, locale: &str, title: &str, no_mapkit: bool) -> Self {
        self.entries.insert(
            (module.to_string(), locale.to_string()),
            ModuleMetadata {
                title: title.to_string(),
                no_mapkit,
            },
        );
        self
    }
}

impl MetadataSource for MockMetadata {
    fn resolve(&self, module: &str, locale: &Locale) -> Result<ModuleMetadata, MetadataError> {
        self.entries
            .get(&(module.to_string(), locale.to_string()))
            .cloned()
            .ok_or_else(|| MetadataError::MissingLocalization {
                module: module.to_string(),
                locale: locale.clone(),
            })
    }
}

/// Static pages given as `(locale, page)` pairs. `""` is the README.
pub struct StaticPageSet {
    pages: HashSet<(String, String)>,
}

impl StaticPageSet {
    pub fn new(pages: &[(&str, &str)]) -> Self {
        Self {
            pages: pages
                .iter()
                .map(|(l, p)| (l.to_string(), p.to_string()))
                .collect(),
        }
    }
}

impl StaticPages for StaticPageSet {
    fn exists(&self, locale: &Locale, page: &str) -> bool {
        self.pages
            .contains(&(locale.to_string(), page.to_string()))
    }
}

// =========================================================================
// Builders
// =========================================================================

pub fn locales(codes: &[&str]) -> Vec<Locale> {
    codes.iter().map(|c| Locale::parse(c).unwrap()).collect()
}

pub fn doc_entry(module: &str, locale: &str, title: &str, no_mapkit: bool) -> DocEntry {
    let locale = Locale::parse(locale).unwrap();
    DocEntry {
        module: module.to_string(),
        path: module_doc_path(&locale, module),
        source: PathBuf::from(format!("/m/{module}/docs/{locale}.md")),
        locale,
        title: title.to_string(),
        no_mapkit,
    }
}

/// A plan over `codes` with `entries` grouped by module in first-seen order.
pub fn plan_of(codes: &[&str], entries: Vec<DocEntry>) -> Plan {
    let mut modules: Vec<ModuleDocs> = Vec::new();
    for entry in entries {
        match modules.iter_mut().find(|m| m.id == entry.module) {
            Some(module) => module.entries.push(entry),
            None => modules.push(ModuleDocs {
                id: entry.module.clone(),
                entries: vec![entry],
                assets: None,
            }),
        }
    }
    Plan {
        locales: locales(codes),
        modules,
    }
}

/// Stock config with a fixed title and Discord link.
pub fn test_config() -> WikiConfig {
    let mut config = WikiConfig::default();
    config.title = "Test Wiki".to_string();
    config.links.discord = "https://discord.example/invite".to_string();
    config
}

// =========================================================================
// Plan lookups: panic with a clear message on miss
// =========================================================================

/// Find a module by id. Panics if not found.
pub fn find_module<'a>(plan: &'a Plan, id: &str) -> &'a ModuleDocs {
    plan.modules.iter().find(|m| m.id == id).unwrap_or_else(|| {
        let ids: Vec<&str> = plan.modules.iter().map(|m| m.id.as_str()).collect();
        panic!("module '{id}' not found. Available: {ids:?}")
    })
}

/// Titles of a locale's entries in plan order.
pub fn entry_titles<'a>(plan: &'a Plan, locale: &str) -> Vec<&'a str> {
    plan.modules
        .iter()
        .flat_map(|m| &m.entries)
        .filter(|e| e.locale.as_str() == locale)
        .map(|e| e.title.as_str())
        .collect()
}
