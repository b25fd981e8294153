//! Applying a scan plan to disk.
//!
//! Stage 2 of the build pipeline. Takes the [`Plan`] from the scan stage and
//! performs every filesystem effect:
//!
//! 1. **Clean**: remove generator output and previously published module pages
//!    so every page below is copied fresh.
//! 2. **Copy + rewrite**: copy each entry's source to
//!    `{docs_dir}/{locale}/modules/{module}.md` and inject front matter.
//! 3. **Mirror assets**: copy each module's `docs/assets/` into the public
//!    asset directory.
//!
//! ## Output Structure
//!
//! ```text
//! docs/
//! ├── en_US/
//! │   ├── README.md              # static, untouched
//! │   └── modules/
//! │       ├── alpha.md           # copied + front matter
//! │       └── beta.md
//! └── .vuepress/public/assets/
//!     └── alpha/                 # mirrored from alpha/docs/assets
//! ```
//!
//! Cleaning is what keeps front matter injection idempotent across runs: a
//! page is never rewritten twice. Two builds must not run concurrently
//! against the same tree.

use crate::assets::{self, AssetError};
use crate::frontmatter;
use crate::locale::Locale;
use crate::scan::Plan;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),
    #[error("Failed to publish {path}: {source}")]
    Publish {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Output locations written by the process stage.
#[derive(Debug, Clone)]
pub struct ProcessTargets<'a> {
    /// Docs root; pages land in `{docs_dir}/{locale}/modules/`.
    pub docs_dir: &'a Path,
    /// Public asset directory; module assets land in `{public_assets_dir}/{module}/`.
    pub public_assets_dir: &'a Path,
}

/// What was written for one module.
#[derive(Debug, Clone, Default)]
pub struct ModuleReport {
    pub id: String,
    /// Published pages, relative to the docs root.
    pub pages: Vec<String>,
    pub assets_copied: usize,
}

#[derive(Debug, Clone, Default)]
pub struct ProcessReport {
    pub modules: Vec<ModuleReport>,
}

impl ProcessReport {
    pub fn pages_written(&self) -> usize {
        self.modules.iter().map(|m| m.pages.len()).sum()
    }

    pub fn assets_copied(&self) -> usize {
        self.modules.iter().map(|m| m.assets_copied).sum()
    }
}

/// Remove output from previous runs.
///
/// - `dest` (generator output) is deleted entirely.
/// - `{docs_dir}/{locale}/modules` is deleted for every configured locale
///   that has a directory under `docs_dir`.
/// - `public_assets_dir` is emptied but kept.
pub fn clean(
    dest: &Path,
    targets: &ProcessTargets<'_>,
    configured: &[Locale],
) -> Result<(), ProcessError> {
    remove_dir_if_exists(dest)?;

    for locale in configured {
        let locale_dir = targets.docs_dir.join(locale.as_str());
        if locale_dir.is_dir() {
            remove_dir_if_exists(&locale_dir.join("modules"))?;
        }
    }

    if targets.public_assets_dir.is_dir() {
        for entry in fs::read_dir(targets.public_assets_dir)? {
            let path = entry?.path();
            if path.is_dir() {
                fs::remove_dir_all(&path)?;
            } else {
                fs::remove_file(&path)?;
            }
        }
    }

    tracing::debug!(dest = %dest.display(), "Cleaned previous output");
    Ok(())
}

fn remove_dir_if_exists(path: &Path) -> std::io::Result<()> {
    if path.exists() {
        fs::remove_dir_all(path)?;
    }
    Ok(())
}

/// Copy, rewrite and mirror everything in `plan`.
///
/// Expects a cleaned tree (see [`clean`]); pages are rewritten unconditionally.
pub fn process(plan: &Plan, targets: &ProcessTargets<'_>) -> Result<ProcessReport, ProcessError> {
    fs::create_dir_all(targets.public_assets_dir)?;

    let mut report = ProcessReport::default();
    for module in &plan.modules {
        let mut module_report = ModuleReport {
            id: module.id.clone(),
            ..Default::default()
        };

        for entry in &module.entries {
            let dst = targets.docs_dir.join(&entry.path);
            publish_page(&entry.source, &dst, &entry.title, &entry.locale).map_err(|source| {
                ProcessError::Publish {
                    path: dst.clone(),
                    source,
                }
            })?;
            tracing::debug!(module = %module.id, locale = %entry.locale, path = %entry.path, "Published page");
            module_report.pages.push(entry.path.clone());
        }

        if let Some(src) = &module.assets {
            module_report.assets_copied =
                assets::mirror(src, targets.public_assets_dir, &module.id)?;
        }

        report.modules.push(module_report);
    }

    tracing::info!(
        pages = report.pages_written(),
        assets = report.assets_copied(),
        "Process completed"
    );
    Ok(report)
}

fn publish_page(src: &Path, dst: &Path, title: &str, locale: &Locale) -> std::io::Result<()> {
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(src, dst)?;
    frontmatter::rewrite(dst, title, locale)
}
