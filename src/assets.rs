//! Module asset mirroring.
//!
//! A module's `docs/assets/` tree is copied into the public asset directory of
//! the site generator, namespaced by module:
//!
//! ```text
//! src/modules/alpha/docs/assets/img/shot.png
//!   → docs/.vuepress/public/assets/alpha/img/shot.png
//! ```
//!
//! Existing files are overwritten. Any failure aborts the build.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to walk {0}: {1}")]
    Walk(PathBuf, #[source] walkdir::Error),
    #[error("Failed to copy {from} to {to}: {source}")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },
}

/// Copy `src` recursively into `{public_assets_dir}/{module}`.
///
/// Returns the number of files copied.
pub fn mirror(src: &Path, public_assets_dir: &Path, module: &str) -> Result<usize, AssetError> {
    let dst = public_assets_dir.join(module);
    fs::create_dir_all(&dst)?;
    copy_tree(src, &dst)
}

/// Copy every file below `src` to the same relative path below `dst`.
pub fn copy_tree(src: &Path, dst: &Path) -> Result<usize, AssetError> {
    let mut copied = 0;
    for entry in WalkDir::new(src).min_depth(1) {
        let entry = entry.map_err(|e| AssetError::Walk(src.to_path_buf(), e))?;
        // min_depth(1) guarantees every entry is below src
        let Ok(rel) = entry.path().strip_prefix(src) else {
            continue;
        };
        let target = dst.join(rel);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target).map_err(|source| AssetError::Copy {
                from: entry.path().to_path_buf(),
                to: target.clone(),
                source,
            })?;
            copied += 1;
        }
    }
    Ok(copied)
}
