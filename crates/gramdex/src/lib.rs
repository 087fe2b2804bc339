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

//! Indexing core of a trigram-based source-code search engine.
//!
//! The crate ingests a stream of documents and produces the in-memory data
//! of a single immutable index shard: a delta-encoded trigram posting list
//! per corpus (file contents and file names), a sampled rune-to-byte offset
//! map, and per-document metadata (branch masks, sub-repository indices,
//! symbol sections). Persistence and query evaluation consume the sealed
//! shard; they live in separate layers.

pub mod classify;
pub mod index;
pub mod ngram;
pub mod postings;
pub mod types;
pub mod walk;

// Re-export the public API flat at the crate root so callers do not have to
// care about the module split.
pub use crate::classify::{is_text, MAX_LINE_SIZE, MAX_TRIGRAM_COUNT};
pub use crate::index::{IndexBuilder, IndexError, MAX_BRANCHES};
pub use crate::ngram::{ngrams, runes_to_ngram, Ngram, NGRAM_SIZE};
pub use crate::postings::{PostingsBuilder, SearchableString, RUNE_OFFSET_FREQUENCY};
pub use crate::types::{Document, DocumentSection, Repository, RepositoryBranch};
