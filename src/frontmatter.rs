//! Front matter injection for copied module pages.
//!
//! Every published page starts with a generated header:
//!
//! ```text
//! ---
//! title: Alpha Module
//! lang: en_US
//! ---
//!
//! # Alpha Module
//!
//! <page body>
//! ```
//!
//! The header is prepended unconditionally, so a page must be rewritten exactly
//! once after it is copied. The process stage guarantees this by clearing the
//! output tree before copying.

use crate::locale::Locale;
use std::fs;
use std::io;
use std::path::Path;

/// Prepend front matter and a title heading to `body`.
pub fn render(title: &str, locale: &Locale, body: &str) -> String {
    format!("---\ntitle: {title}\nlang: {locale}\n---\n\n# {title}\n\n{body}")
}

/// Rewrite the file at `path` in place with generated front matter.
///
/// The existing body is kept byte for byte, whatever its encoding.
pub fn rewrite(path: &Path, title: &str, locale: &Locale) -> io::Result<()> {
    let body = fs::read(path)?;
    let mut page = render(title, locale, "").into_bytes();
    page.extend_from_slice(&body);
    fs::write(path, page)
}
