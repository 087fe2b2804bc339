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

use std::error::Error;
use std::fmt::{self, Display};

/// Typed errors returned by shard assembly operations.
///
/// All errors are reported synchronously to the caller; nothing is retried
/// or logged here. A rejected document leaves the builder fully usable, but
/// descriptor-level failures should be treated as fatal for the shard.
#[derive(Debug)]
pub enum IndexError {
    /// A descriptor URL template failed to parse.
    TemplateSyntax(String),
    /// The descriptor declares more branches than a branch mask can hold.
    TooManyBranches(usize),
    /// The descriptor was set after documents had been added.
    DescriptorAfterAdd,
    /// A document's symbol sections overlap.
    SectionOverlap,
    /// The document name does not lie under its declared sub-repository
    /// path.
    SubRepoPathMismatch { name: String, sub_repo: String },
    /// The declared sub-repository path is not present in the descriptor.
    UnknownSubRepo(String),
    /// A branch name is not declared by the descriptor.
    UnknownBranch(String),
    /// Fallback for textual errors from the edges (I/O, CLI).
    Other(String),
}

impl Display for IndexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexError::TemplateSyntax(s) => write!(f, "template syntax: {}", s),
            IndexError::TooManyBranches(n) => write!(f, "too many branches: {}", n),
            IndexError::DescriptorAfterAdd => {
                write!(f, "repository descriptor set after adding documents")
            }
            IndexError::SectionOverlap => write!(f, "sections overlap"),
            IndexError::SubRepoPathMismatch { name, sub_repo } => {
                write!(f, "path {:?} must start subrepo path {:?}", name, sub_repo)
            }
            IndexError::UnknownSubRepo(p) => write!(f, "unknown subrepo path {:?}", p),
            IndexError::UnknownBranch(b) => write!(f, "no branch found for {}", b),
            IndexError::Other(s) => write!(f, "error: {}", s),
        }
    }
}

impl Error for IndexError {}

// Conversions from common error types for easier propagation in binaries.
impl From<std::io::Error> for IndexError {
    fn from(e: std::io::Error) -> Self {
        IndexError::Other(e.to_string())
    }
}

impl From<anyhow::Error> for IndexError {
    fn from(e: anyhow::Error) -> Self {
        IndexError::Other(e.to_string())
    }
}

impl From<regex::Error> for IndexError {
    fn from(e: regex::Error) -> Self {
        IndexError::Other(e.to_string())
    }
}
