//! # modwiki
//!
//! Builds a localized wiki out of documentation that lives next to the code.
//! Every module of a modular project ships one markdown page per locale; modwiki
//! gathers those pages into the wiki's docs tree, titles them from the module's
//! own localization, and emits the site generator configuration with one
//! navigation tree per locale.
//!
//! # Architecture: Staged Pipeline
//!
//! ```text
//! 1. Scan        src/modules/  →  Plan                (read-only)
//! 2. Process     Plan          →  docs/{l}/modules/   (copy + front matter + assets)
//! 3. Navigation  Plan          →  LocaleNavigation    (sorted lists, sidebars)
//! 4. Generate    navigation    →  config.json         (site generator options)
//! ```
//!
//! Scanning never writes and navigation never touches the disk beyond checking
//! which static pages exist, so both are tested against in-memory inputs. Only
//! [`process`] and [`generate`] have side effects.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`locale`] | `ll_RR` locale codes and resolution against the docs tree |
//! | [`config`] | `modwiki.toml` loading, merging with stock defaults, validation |
//! | [`metadata`] | Per-module title and `noMapkit` lookup |
//! | [`scan`] | Stage 1: module discovery, produces the [`scan::Plan`] |
//! | [`frontmatter`] | Front matter and title heading injection |
//! | [`assets`] | Mirroring module assets into the public asset directory |
//! | [`process`] | Stage 2: cleaning and publishing pages and assets |
//! | [`navigation`] | Stage 3: Apps list, restricted list, sidebar per locale |
//! | [`generate`] | Stage 4: site generator configuration |
//! | [`pipeline`] | Runs the stages in order against a project root |
//! | [`types`] | Types shared between stages |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Locales Are Opt-In by Directory
//!
//! A configured locale is only published when `docs/{locale}/` already exists.
//! Module pages written for any other locale are skipped silently, so a module
//! can ship translations before the wiki publishes that language.
//!
//! ## Rebuild, Never Patch
//!
//! Every build deletes the generator output, each locale's `modules/` folder
//! and the contents of the public asset directory before copying. Front matter
//! is prepended unconditionally, which is only correct on a fresh copy.

pub mod assets;
pub mod config;
pub mod frontmatter;
pub mod generate;
pub mod locale;
pub mod metadata;
pub mod navigation;
pub mod output;
pub mod pipeline;
pub mod process;
pub mod scan;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
