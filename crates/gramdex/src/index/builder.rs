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

use std::collections::HashMap;
use std::path::Path;

use super::error::IndexError;
use crate::postings::PostingsBuilder;
use crate::types::{Document, DocumentSection, Repository};

/// Maximum number of branches a descriptor may declare; branch masks are
/// 32 bits wide.
pub const MAX_BRANCHES: usize = 32;

/// Builds a single index shard in memory.
///
/// Documents are appended one at a time; the append order assigns document
/// ids `0..doc_count()`. Two postings builders run in parallel, one over
/// file contents and one over file names, and every per-document array is
/// kept in lockstep with them. The builder is a shared mutable unit with no
/// internal locking: a single instance must not be touched from two threads
/// concurrently.
///
/// The persistence layer reads the public fields directly once the caller
/// is done adding documents.
#[derive(Debug)]
pub struct IndexBuilder {
    /// Raw content per document, in append order.
    pub files: Vec<crate::postings::SearchableString>,
    /// Raw name per document, in append order.
    pub file_names: Vec<crate::postings::SearchableString>,
    /// Sorted, non-overlapping symbol sections per document.
    pub doc_sections: Vec<Vec<DocumentSection>>,

    /// Bit i set iff the document occurs in the descriptor's i-th branch.
    pub branch_masks: Vec<u32>,
    /// Dense sub-repository index per document.
    pub sub_repos: Vec<u32>,

    pub contents: PostingsBuilder,
    pub names: PostingsBuilder,

    /// Root repository descriptor; `sub_repo_map[""]` is the root itself.
    pub repo: Repository,

    /// Frozen path-to-dense-index assignment over the sub-repo map keys.
    pub sub_repo_indices: HashMap<String, u32>,
}

impl IndexBuilder {
    /// Create a fresh builder. `repo` holds the repository metadata and may
    /// be None for an empty descriptor.
    pub fn new(repo: Option<Repository>) -> Result<IndexBuilder, IndexError> {
        let mut b = IndexBuilder {
            files: Vec::new(),
            file_names: Vec::new(),
            doc_sections: Vec::new(),
            branch_masks: Vec::new(),
            sub_repos: Vec::new(),
            contents: PostingsBuilder::new(),
            names: PostingsBuilder::new(),
            repo: Repository::default(),
            sub_repo_indices: HashMap::new(),
        };
        b.set_repository(repo.unwrap_or_default())?;
        Ok(b)
    }

    /// Install the repository descriptor. Legal only while the shard is
    /// still empty; a failed installation leaves the builder unfit for
    /// adding documents and the caller should discard it.
    pub fn set_repository(&mut self, desc: Repository) -> Result<(), IndexError> {
        if !self.files.is_empty() {
            return Err(IndexError::DescriptorAfterAdd);
        }
        desc.verify()?;
        if desc.branches.len() > MAX_BRANCHES {
            return Err(IndexError::TooManyBranches(desc.branches.len()));
        }

        // Install a copy of the root under the empty key, with its own
        // sub-repo map elided so the entry cannot recurse. Every document
        // then resolves through the same map, root or not.
        let mut root = desc.clone();
        root.sub_repo_map.clear();
        self.repo = desc;
        self.repo.sub_repo_map.insert(String::new(), root);

        self.populate_sub_repo_indices();
        Ok(())
    }

    /// Assign dense indices to the sub-repo paths by lexicographic order.
    /// Frozen for the shard's lifetime once the first document is added.
    fn populate_sub_repo_indices(&mut self) {
        let mut paths: Vec<&str> = self.repo.sub_repo_map.keys().map(String::as_str).collect();
        paths.sort_unstable();
        self.sub_repo_indices = paths
            .into_iter()
            .enumerate()
            .map(|(i, p)| (p.to_string(), i as u32))
            .collect();
    }

    /// Number of bytes ingested so far. The name bytes are counted too so
    /// we don't skip building an index shard for repositories made of many
    /// tiny files.
    pub fn content_size(&self) -> u32 {
        self.contents.end_byte + self.names.end_byte
    }

    pub fn doc_count(&self) -> usize {
        self.files.len()
    }

    /// Convenience wrapper for [`IndexBuilder::add`].
    pub fn add_file(&mut self, name: &str, content: &[u8]) -> Result<(), IndexError> {
        self.add(Document {
            name: name.to_string(),
            content: content.to_vec(),
            ..Document::default()
        })
    }

    /// Append one document to the shard.
    ///
    /// All validation happens before either postings builder is touched: a
    /// rejected document leaves the builder exactly as it was, and the
    /// caller may correct and resubmit it.
    pub fn add(&mut self, mut doc: Document) -> Result<(), IndexError> {
        doc.symbols.sort_by_key(|s| s.start);
        for pair in doc.symbols.windows(2) {
            if pair[0].end > pair[1].start {
                return Err(IndexError::SectionOverlap);
            }
        }

        if !doc.sub_repository_path.is_empty() {
            // The name must lie strictly under the sub-repo path.
            let under = matches!(
                Path::new(&doc.name).strip_prefix(&doc.sub_repository_path),
                Ok(rel) if rel != Path::new("")
            );
            if !under {
                return Err(IndexError::SubRepoPathMismatch {
                    name: doc.name,
                    sub_repo: doc.sub_repository_path,
                });
            }
        }

        let sub_repo_idx = self
            .sub_repo_indices
            .get(&doc.sub_repository_path)
            .copied()
            .ok_or_else(|| IndexError::UnknownSubRepo(doc.sub_repository_path.clone()))?;

        let mut mask = 0u32;
        for branch in &doc.branches {
            let m = self.branch_mask(branch);
            if m == 0 {
                return Err(IndexError::UnknownBranch(branch.clone()));
            }
            mask |= m;
        }

        let content_str = self.contents.ingest(&doc.content);
        let name_str = self.names.ingest(doc.name.as_bytes());

        self.sub_repos.push(sub_repo_idx);
        self.files.push(content_str);
        self.file_names.push(name_str);
        self.doc_sections.push(doc.symbols);
        self.branch_masks.push(mask);
        Ok(())
    }

    fn branch_mask(&self, name: &str) -> u32 {
        for (i, b) in self.repo.branches.iter().enumerate() {
            if b.name == name {
                return 1 << i;
            }
        }
        0
    }
}
