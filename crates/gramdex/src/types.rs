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

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::index::IndexError;

/// A branch declared by a repository descriptor. Bit positions in document
/// branch masks follow the declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryBranch {
    pub name: String,
    /// Version indexed for this branch, typically a commit id.
    pub version: String,
}

/// Metadata describing the repository a shard is built from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Repository {
    pub name: String,
    pub url: String,

    // URL templates for linking into the hosting site. Validated for
    // syntax when the descriptor is installed, opaque afterwards.
    pub commit_url_template: String,
    pub file_url_template: String,
    pub line_fragment_template: String,

    /// Branches present in the shard, at most [`crate::MAX_BRANCHES`].
    pub branches: Vec<RepositoryBranch>,

    /// Nested repositories keyed by path prefix. The builder installs the
    /// root itself under the empty key.
    pub sub_repo_map: HashMap<String, Repository>,
}

impl Repository {
    /// Check that the URL templates parse. Nothing is rendered here.
    pub(crate) fn verify(&self) -> Result<(), IndexError> {
        let env = minijinja::Environment::new();
        for t in [
            &self.commit_url_template,
            &self.file_url_template,
            &self.line_fragment_template,
        ] {
            if let Err(err) = env.template_from_str(t) {
                return Err(IndexError::TemplateSyntax(err.to_string()));
            }
        }
        Ok(())
    }
}

/// Byte range of a symbol definition within a single document,
/// `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSection {
    pub start: u32,
    pub end: u32,
}

/// A document (file) to index. The content should be checked with
/// [`crate::is_text`] before it is handed to the builder.
#[derive(Debug, Clone, Default)]
pub struct Document {
    pub name: String,
    pub content: Vec<u8>,
    /// Branch names this document occurs in; must all be declared by the
    /// repository descriptor.
    pub branches: Vec<String>,
    /// Path of the sub-repository the document belongs to; empty for the
    /// root repository.
    pub sub_repository_path: String,
    pub symbols: Vec<DocumentSection>,
}
