// Copyright 2025 Gramdex Project
// Derived from sourcegraph/zoekt (https://github.com/sourcegraph/zoekt)
// Copyright 2016 Google Inc. All rights reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Directory ingestion: feed a working tree through the classifier into an
//! [`IndexBuilder`]. This is caller-side glue around the core; the builder
//! itself never performs I/O.

use std::path::Path;

use crate::classify::is_text;
use crate::index::{IndexBuilder, IndexError};

/// Filters applied while walking a repository root.
pub struct WalkOptions {
    /// Skip files larger than this many bytes.
    pub max_file_size: u64,
    /// Only index relative paths matching this pattern.
    pub include: Option<regex::Regex>,
    /// Skip relative paths matching this pattern.
    pub exclude: Option<regex::Regex>,
    pub include_hidden: bool,
    pub follow_symlinks: bool,
}

impl Default for WalkOptions {
    fn default() -> Self {
        WalkOptions {
            max_file_size: 1_000_000,
            include: None,
            exclude: None,
            include_hidden: false,
            follow_symlinks: false,
        }
    }
}

/// Walk `root` and add every plausible text file to `builder`, honoring
/// ignore rules. Returns the number of documents added. Oversized files and
/// content rejected by [`is_text`] are skipped silently.
pub fn index_dir(
    builder: &mut IndexBuilder,
    root: &Path,
    opts: &WalkOptions,
) -> Result<usize, IndexError> {
    let mut wb = ignore::WalkBuilder::new(root);
    wb.hidden(!opts.include_hidden);
    wb.follow_links(opts.follow_symlinks);
    wb.git_ignore(true);
    // Honor .gitignore files even when the tree is not a git checkout.
    wb.require_git(false);

    let mut added = 0usize;
    for entry in wb.build().filter_map(Result::ok) {
        if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
            continue;
        }
        let rel = entry.path().strip_prefix(root).unwrap_or(entry.path());
        let rel_s = rel.to_string_lossy();
        if let Some(inc) = &opts.include {
            if !inc.is_match(rel_s.as_ref()) {
                continue;
            }
        }
        if let Some(exc) = &opts.exclude {
            if exc.is_match(rel_s.as_ref()) {
                continue;
            }
        }
        if entry.metadata().map(|m| m.len()).unwrap_or(0) > opts.max_file_size {
            continue;
        }

        let content = std::fs::read(entry.path())?;
        if !is_text(&content) {
            continue;
        }
        builder.add_file(rel_s.as_ref(), &content)?;
        added += 1;
    }
    Ok(added)
}
