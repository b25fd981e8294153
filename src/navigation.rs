//! Per-locale navigation assembly.
//!
//! Stage 3 of the build pipeline. Turns the scan [`Plan`] into one
//! [`LocaleNavigation`] per resolved locale. Assembly is pure: the only outside
//! knowledge it needs is which static pages exist, asked through
//! [`StaticPages`].
//!
//! ## Lists
//!
//! - **Apps** (full list): every entry of the locale, sorted by title, as
//!   destination paths. `{locale}/apps.md` is prepended when that index page
//!   exists.
//! - **Restricted** (noMapkit list): the entries flagged `noMapkit`, sorted by
//!   title on their own, as `{ title, f }` where `f` is the path without the
//!   locale prefix and extension (`modules/beta`).
//!
//! Sorting is stable: equal titles keep discovery order.
//!
//! ## Sidebar
//!
//! ```text
//! LSSM                    (group, fixed, not collapsable)
//! ├── /en_US/             README.md
//! └── /en_US/metadata
//! /en_US/suggestions      (flat "other" pages, fixed order)
//! /en_US/support
//! ...
//! Apps 📦                 (group, collapsable)
//! ├── en_US/apps.md
//! ├── en_US/modules/alpha.md
//! └── en_US/modules/beta.md
//! ```
//!
//! Static pages are only listed if their markdown file exists in the locale
//! directory (the empty name maps to `README.md`).

use crate::config::WikiConfig;
use crate::locale::Locale;
use crate::scan::Plan;
use crate::types::DocEntry;
use serde::Serialize;
use std::path::Path;

/// Children of the "LSSM" group. The empty name is the locale's README.
pub const LSSM_PAGES: &[&str] = &["", "metadata"];

/// Static pages listed flat after the "LSSM" group.
pub const OTHER_PAGES: &[&str] = &[
    "suggestions",
    "support",
    "error_report",
    "faq",
    "bugs",
    "appstore",
    "settings",
    "other",
];

pub const LSSM_GROUP_TITLE: &str = "LSSM";
pub const APPS_GROUP_TITLE: &str = "Apps 📦";
/// Name of the optional index page prepended to the Apps list.
pub const APPS_INDEX_PAGE: &str = "apps";

/// Which static pages exist for a locale.
pub trait StaticPages {
    /// `page` is a name without extension; the empty name means `README`.
    fn exists(&self, locale: &Locale, page: &str) -> bool;
}

/// Static pages looked up on disk below the docs root.
#[derive(Debug, Clone, Copy)]
pub struct DocsTree<'a> {
    docs_dir: &'a Path,
}

impl<'a> DocsTree<'a> {
    pub fn new(docs_dir: &'a Path) -> Self {
        Self { docs_dir }
    }
}

impl StaticPages for DocsTree<'_> {
    fn exists(&self, locale: &Locale, page: &str) -> bool {
        let name = if page.is_empty() { "README" } else { page };
        self.docs_dir
            .join(locale.as_str())
            .join(format!("{name}.md"))
            .is_file()
    }
}

/// An item of a locale's sidebar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SidebarItem {
    /// A single page link.
    Page(String),
    Group {
        title: String,
        collapsable: bool,
        children: Vec<String>,
    },
}

/// Entry of the restricted (noMapkit) list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RestrictedEntry {
    pub title: String,
    /// Destination path without locale prefix and extension.
    pub f: String,
}

/// Top navigation link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavLink {
    pub text: String,
    pub link: String,
}

/// Everything the site needs to know about one locale.
#[derive(Debug, Clone, Serialize)]
pub struct LocaleNavigation {
    pub locale: Locale,
    /// `{flag} {game name}`.
    pub label: String,
    pub flag: String,
    pub nav: Vec<NavLink>,
    /// Full Apps list.
    pub apps: Vec<String>,
    /// Restricted list.
    pub restricted: Vec<RestrictedEntry>,
    pub sidebar: Vec<SidebarItem>,
}

impl LocaleNavigation {
    /// URL prefix of the locale, `/{locale}/`.
    pub fn path(&self) -> String {
        locale_path(&self.locale)
    }
}

pub fn locale_path(locale: &Locale) -> String {
    format!("/{locale}/")
}

/// Build navigation for every locale of the plan, in plan order.
///
/// A locale without a game entry in `config` is labelled with its bare code
/// and has no flag.
pub fn assemble(
    plan: &Plan,
    config: &WikiConfig,
    pages: &impl StaticPages,
) -> Vec<LocaleNavigation> {
    let mut out = Vec::new();
    for locale in &plan.locales {
        let (label, flag) = match config.game(locale) {
            Some(game) => (format!("{} {}", game.flag, game.name), game.flag.clone()),
            None => (locale.to_string(), String::new()),
        };
        let entries: Vec<&DocEntry> = plan.entries_for(locale).collect();
        let has_index = pages.exists(locale, APPS_INDEX_PAGE);
        let apps = apps_list(locale, &entries, has_index);
        let restricted = restricted_list(&entries);
        let sidebar = sidebar(locale, apps.clone(), pages);

        tracing::debug!(
            %locale,
            apps = apps.len(),
            restricted = restricted.len(),
            "Assembled navigation"
        );

        out.push(LocaleNavigation {
            locale: locale.clone(),
            label,
            flag,
            nav: vec![NavLink {
                text: "Discord".to_string(),
                link: config.links.discord.clone(),
            }],
            apps,
            restricted,
            sidebar,
        });
    }
    out
}

/// Stable sort by title.
pub fn sort_by_title<'a>(entries: &[&'a DocEntry]) -> Vec<&'a DocEntry> {
    let mut sorted = entries.to_vec();
    sorted.sort_by(|a, b| a.title.cmp(&b.title));
    sorted
}

/// Full Apps list: sorted entry paths, with the index page first if present.
pub fn apps_list(locale: &Locale, entries: &[&DocEntry], has_index: bool) -> Vec<String> {
    let mut apps = Vec::with_capacity(entries.len() + 1);
    if has_index {
        apps.push(format!("{locale}/{APPS_INDEX_PAGE}.md"));
    }
    apps.extend(sort_by_title(entries).into_iter().map(|e| e.path.clone()));
    apps
}

/// Restricted list: noMapkit entries sorted by title.
pub fn restricted_list(entries: &[&DocEntry]) -> Vec<RestrictedEntry> {
    let flagged: Vec<&DocEntry> = entries.iter().copied().filter(|e| e.no_mapkit).collect();
    sort_by_title(&flagged)
        .into_iter()
        .map(|e| RestrictedEntry {
            title: e.title.clone(),
            f: restricted_label(&e.path),
        })
        .collect()
}

/// Strip a leading `ll_RR/` and everything from the first `.` on.
///
/// `en_US/modules/beta.md` → `modules/beta`
pub fn restricted_label(path: &str) -> String {
    let rest = match path.split_once('/') {
        Some((head, tail)) if Locale::parse(head).is_ok() => tail,
        _ => path,
    };
    match rest.find('.') {
        Some(dot) => rest[..dot].to_string(),
        None => rest.to_string(),
    }
}

/// Sidebar for a locale: LSSM group, other pages, Apps group.
pub fn sidebar(locale: &Locale, apps: Vec<String>, pages: &impl StaticPages) -> Vec<SidebarItem> {
    let prefix = locale_path(locale);
    let existing = |names: &[&str]| -> Vec<String> {
        names
            .iter()
            .filter(|name| pages.exists(locale, name))
            .map(|name| format!("{prefix}{name}"))
            .collect()
    };

    let mut items = vec![SidebarItem::Group {
        title: LSSM_GROUP_TITLE.to_string(),
        collapsable: false,
        children: existing(LSSM_PAGES),
    }];
    items.extend(existing(OTHER_PAGES).into_iter().map(SidebarItem::Page));
    items.push(SidebarItem::Group {
        title: APPS_GROUP_TITLE.to_string(),
        collapsable: true,
        children: apps,
    });
    items
}
