// blackbranch: review-clean automatic black formatting
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! File Classifier.
//!
//! Partitions the requested files by their relationship to the merge base:
//!
//! ```text
//! existed at base   content retrievable at merge-base  -> formatting branch
//! new since base    on disk, absent at merge-base      -> formatted in place
//! invalid           missing / wrong type / outside repo -> reported, skipped
//! ```
//!
//! Membership is decided by object existence at the merge-base commit, never
//! by diff heuristics; a rename or mode change does not misclassify a file.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::git::cmd;

/// Outcome of classifying one run's worth of files. Paths are relative to
/// the repository root, as git wants them.
#[derive(Debug, Default)]
pub struct ClassifiedFiles {
    /// Content retrievable at the merge base.
    pub existed_at_base: Vec<PathBuf>,
    /// Present on disk but unknown at the merge base.
    pub new_since_base: Vec<PathBuf>,
    /// Rejected inputs with the reason each was rejected.
    pub invalid: Vec<(PathBuf, String)>,
}

impl ClassifiedFiles {
    /// Whether any file survived classification.
    #[must_use]
    pub fn has_work(&self) -> bool {
        !self.existed_at_base.is_empty() || !self.new_since_base.is_empty()
    }

    /// All valid files, both categories.
    #[must_use]
    pub fn all_valid(&self) -> Vec<PathBuf> {
        let mut all = self.existed_at_base.clone();
        all.extend(self.new_since_base.iter().cloned());
        all
    }
}

/// Classify each requested file independently; one bad input never aborts
/// the rest of the batch.
#[must_use]
pub fn classify(
    root: &Path,
    merge_base: &str,
    files: &[PathBuf],
    extensions: &[String],
) -> ClassifiedFiles {
    let mut out = ClassifiedFiles::default();
    // The discovered root may itself sit behind a symlink (tmpdirs often do);
    // canonicalize once so strip_prefix matches canonicalized inputs.
    let canonical_root = root.canonicalize().unwrap_or_else(|_| root.to_path_buf());

    for file in files {
        match check_one(root, &canonical_root, merge_base, file, extensions) {
            Ok(Classified::ExistedAtBase(rel)) => out.existed_at_base.push(rel),
            Ok(Classified::NewSinceBase(rel)) => out.new_since_base.push(rel),
            Err(reason) => {
                warn!(file = %file.display(), %reason, "skipping invalid file");
                out.invalid.push((file.clone(), reason));
            }
        }
    }

    debug!(
        existed = out.existed_at_base.len(),
        new = out.new_since_base.len(),
        invalid = out.invalid.len(),
        "files classified"
    );
    out
}

enum Classified {
    ExistedAtBase(PathBuf),
    NewSinceBase(PathBuf),
}

fn check_one(
    root: &Path,
    canonical_root: &Path,
    merge_base: &str,
    file: &Path,
    extensions: &[String],
) -> Result<Classified, String> {
    let absolute = if file.is_absolute() {
        file.to_path_buf()
    } else {
        root.join(file)
    };

    if !absolute.exists() {
        return Err("does not exist".to_string());
    }
    if !absolute.is_file() {
        return Err("not a regular file".to_string());
    }

    let accepted = file
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.iter().any(|a| a == ext));
    if !accepted {
        return Err(format!(
            "not an accepted file type (expected one of: {})",
            extensions.join(", ")
        ));
    }

    // Resolve symlinked parents so the strip below matches the real root.
    let canonical = absolute
        .canonicalize()
        .map_err(|e| format!("cannot resolve path: {e}"))?;
    let relative = canonical
        .strip_prefix(canonical_root)
        .map_err(|_| "outside the repository".to_string())?
        .to_path_buf();

    let rel_str = relative
        .to_str()
        .ok_or_else(|| "path is not valid UTF-8".to_string())?;

    if cmd::path_exists_at(root, merge_base, rel_str) {
        Ok(Classified::ExistedAtBase(relative))
    } else {
        Ok(Classified::NewSinceBase(relative))
    }
}
