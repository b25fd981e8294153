//! End-to-end build orchestration.
//!
//! Wires the stages together against a project root and a resolved config:
//!
//! ```text
//! versions → clean → resolve locales → scan → process → navigation → emit
//! ```
//!
//! The versions file is read before anything is deleted, so a broken project
//! fails without touching the previous output. Any stage error aborts the
//! build; there is no rollback of partially written pages.

use crate::config::{ConfigError, WikiConfig};
use crate::generate::{self, GenerateError};
use crate::locale;
use crate::metadata::FsMetadata;
use crate::navigation::{self, DocsTree, LocaleNavigation};
use crate::process::{self, ProcessError, ProcessReport, ProcessTargets};
use crate::scan::{self, Plan, ScanError};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),
    #[error("Process error: {0}")]
    Process(#[from] ProcessError),
    #[error("Generate error: {0}")]
    Generate(#[from] GenerateError),
}

/// Everything a build produced.
#[derive(Debug)]
pub struct BuildSummary {
    pub plan: Plan,
    pub report: ProcessReport,
    pub navigation: Vec<LocaleNavigation>,
    /// Where the generator configuration was written.
    pub emit_path: PathBuf,
}

/// Resolve locales and scan modules without writing anything.
pub fn check(root: &Path, config: &WikiConfig) -> Result<Plan, PipelineError> {
    let paths = config.paths.resolve(root);
    let locales = locale::resolve_locales(&config.locales(), &paths.docs_dir)?;
    let metadata = FsMetadata::new(&paths.modules_dir);
    Ok(scan::scan(&paths.modules_dir, &locales, &metadata)?)
}

/// Run the full build.
///
/// The config is validated again here because `dest` is deleted.
pub fn build(root: &Path, config: &WikiConfig) -> Result<BuildSummary, PipelineError> {
    config.validate()?;
    let paths = config.paths.resolve(root);
    let versions = generate::load_versions(&paths.versions_file)?;

    let targets = ProcessTargets {
        docs_dir: &paths.docs_dir,
        public_assets_dir: &paths.public_assets_dir,
    };
    process::clean(&root.join(&config.dest), &targets, &config.locales())?;

    let plan = check(root, config)?;
    let report = process::process(&plan, &targets)?;

    let navigation = navigation::assemble(&plan, config, &DocsTree::new(&paths.docs_dir));
    let options = generate::site_options(config, &navigation, versions);
    generate::emit(&options, &paths.emit_path)?;

    tracing::info!(
        locales = plan.locales.len(),
        pages = report.pages_written(),
        "Build completed"
    );
    Ok(BuildSummary {
        plan,
        report,
        navigation,
        emit_path: paths.emit_path,
    })
}
