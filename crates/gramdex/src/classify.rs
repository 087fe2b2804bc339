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

//! Pre-ingest classifier deciding whether a byte buffer is source text.

use fnv::FnvHashSet;

use crate::ngram::{decode_rune, Ngram, RuneWindow, NGRAM_SIZE};

/// Lines longer than this many bytes mark content as non-text.
pub const MAX_LINE_SIZE: usize = 1000;

/// More distinct trigrams than this marks content as degenerate or
/// minified rather than source text.
pub const MAX_TRIGRAM_COUNT: usize = 20000;

/// Returns false if the given contents are probably not source text.
///
/// Rejects buffers containing a NUL byte, a line longer than
/// [`MAX_LINE_SIZE`] bytes, invalid UTF-8, or more than
/// [`MAX_TRIGRAM_COUNT`] distinct trigrams. Buffers shorter than one
/// trigram are accepted unconditionally.
pub fn is_text(content: &[u8]) -> bool {
    if content.len() < NGRAM_SIZE {
        return true;
    }

    let mut trigrams: FnvHashSet<Ngram> = FnvHashSet::default();
    let mut line_size = 0usize;
    let mut window = RuneWindow::new();
    let mut rest = content;

    while !rest.is_empty() {
        if rest[0] == 0 {
            return false;
        }

        let (c, sz) = decode_rune(rest);
        if c == char::REPLACEMENT_CHARACTER {
            return false;
        }
        rest = &rest[sz..];

        if c == '\n' {
            line_size = 0;
        } else {
            line_size += sz;
            if line_size > MAX_LINE_SIZE {
                return false;
            }
        }

        if let Some(ng) = window.push(c) {
            trigrams.insert(ng);
            if trigrams.len() > MAX_TRIGRAM_COUNT {
                return false;
            }
        }
    }
    true
}
