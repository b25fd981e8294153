//! CLI output formatting for all pipeline stages.
//!
//! Output is **information-centric, not file-centric**: modules lead with their
//! positional index and id, entries with their locale and title. Filesystem
//! paths are indented `Source:` context lines.
//!
//! # Output Format
//!
//! ## Scan
//!
//! ```text
//! Locales
//!     en_US
//!     de_DE
//!
//! Modules
//! 001 alpha (2 pages)
//!     en_US Alpha Module
//!         Source: alpha/docs/en_US.md
//!     de_DE Alpha
//!         Source: alpha/docs/de_DE.md
//!     Assets: alpha/docs/assets/
//! 002 beta (1 page, noMapkit)
//!     en_US Beta Module
//!         Source: beta/docs/en_US.md
//! ```
//!
//! ## Process
//!
//! ```text
//! alpha → en_US/modules/alpha.md, de_DE/modules/alpha.md
//!     Assets: 3 files
//!
//! Published 3 pages, 3 assets
//! ```
//!
//! ## Navigation
//!
//! ```text
//! 🇺🇸 MissionChief → /en_US/
//!     001 en_US/modules/alpha.md
//!     002 en_US/modules/beta.md
//!     Restricted
//!     001 Beta Module → modules/beta
//! ```
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout.

use crate::navigation::LocaleNavigation;
use crate::process::ProcessReport;
use crate::scan::Plan;
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

/// `path` relative to `root` if possible, for display.
fn display_rel(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}

// ============================================================================
// Scan
// ============================================================================

/// Format the scan plan: resolved locales, then modules with their entries.
pub fn format_plan(plan: &Plan, modules_dir: &Path) -> Vec<String> {
    let mut lines = vec!["Locales".to_string()];
    if plan.locales.is_empty() {
        lines.push("    (none)".to_string());
    }
    for locale in &plan.locales {
        lines.push(format!("    {locale}"));
    }

    lines.push(String::new());
    lines.push("Modules".to_string());
    for (i, module) in plan.modules.iter().enumerate() {
        let restricted = module.entries.iter().any(|e| e.no_mapkit);
        lines.push(format!(
            "{} {} ({}{})",
            format_index(i + 1),
            module.id,
            plural(module.entries.len(), "page"),
            if restricted { ", noMapkit" } else { "" }
        ));
        for entry in &module.entries {
            lines.push(format!("    {} {}", entry.locale, entry.title));
            lines.push(format!(
                "        Source: {}",
                display_rel(&entry.source, modules_dir)
            ));
        }
        if let Some(assets) = &module.assets {
            lines.push(format!("    Assets: {}/", display_rel(assets, modules_dir)));
        }
    }
    lines
}

pub fn print_plan(plan: &Plan, modules_dir: &Path) {
    for line in format_plan(plan, modules_dir) {
        println!("{}", line);
    }
}

// ============================================================================
// Process
// ============================================================================

/// Format what the process stage wrote. Modules that published nothing are
/// omitted.
pub fn format_process_report(report: &ProcessReport) -> Vec<String> {
    let mut lines = Vec::new();
    for module in &report.modules {
        if module.pages.is_empty() && module.assets_copied == 0 {
            continue;
        }
        lines.push(format!("{} → {}", module.id, module.pages.join(", ")));
        if module.assets_copied > 0 {
            lines.push(format!("    Assets: {}", plural(module.assets_copied, "file")));
        }
    }
    if !lines.is_empty() {
        lines.push(String::new());
    }
    lines.push(format!(
        "Published {}, {}",
        plural(report.pages_written(), "page"),
        plural(report.assets_copied(), "asset")
    ));
    lines
}

pub fn print_process_report(report: &ProcessReport) {
    for line in format_process_report(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Navigation
// ============================================================================

/// Format each locale's Apps list and restricted list.
pub fn format_navigation(navigation: &[LocaleNavigation]) -> Vec<String> {
    let mut lines = Vec::new();
    for nav in navigation {
        lines.push(format!("{} → {}", nav.label, nav.path()));
        for (i, path) in nav.apps.iter().enumerate() {
            lines.push(format!("    {} {}", format_index(i + 1), path));
        }
        if !nav.restricted.is_empty() {
            lines.push("    Restricted".to_string());
            for (i, entry) in nav.restricted.iter().enumerate() {
                lines.push(format!(
                    "    {} {} → {}",
                    format_index(i + 1),
                    entry.title,
                    entry.f
                ));
            }
        }
    }
    lines
}

pub fn print_navigation(navigation: &[LocaleNavigation]) {
    for line in format_navigation(navigation) {
        println!("{}", line);
    }
}
