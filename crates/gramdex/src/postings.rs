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

//! Streaming construction of per-trigram posting lists over one corpus.

use fnv::FnvHashMap;

use crate::ngram::{decode_rune, Ngram, RuneWindow};

/// Store the byte offset of every this-many-th rune. Match positions are
/// found in rune space; the sampled table plus a short forward walk maps
/// them back to byte offsets.
pub const RUNE_OFFSET_FREQUENCY: u32 = 100;

/// Content handle returned by [`PostingsBuilder::ingest`]. Carries the raw
/// bytes of one document; its position inside the coalesced corpus is
/// implied by the builder's `end_runes`/`end_byte` bookkeeping.
#[derive(Debug, Clone, Default)]
pub struct SearchableString {
    pub data: Vec<u8>,
}

/// Accumulates varint-delta-encoded postings for every trigram of a corpus,
/// one document at a time. Positions are absolute rune offsets into the
/// concatenation of all ingested documents.
#[derive(Debug, Default)]
pub struct PostingsBuilder {
    pub postings: FnvHashMap<Ngram, Vec<u8>>,
    pub last_offsets: FnvHashMap<Ngram, u32>,

    /// Byte offset of rune 0, rune 100, rune 200, ... of the corpus.
    pub rune_offsets: Vec<u32>,
    pub rune_count: u32,

    /// Rune count immediately after each document ended.
    pub end_runes: Vec<u32>,
    pub end_byte: u32,
}

impl PostingsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one document into the corpus and return its content handle.
    ///
    /// The trigram window restarts per document, so postings never span a
    /// document boundary, but `rune_count`, `end_byte` and the sampled
    /// `rune_offsets` run corpus-wide. A document shorter than three runes
    /// contributes no postings yet still advances all counters.
    pub fn ingest(&mut self, data: &[u8]) -> SearchableString {
        let start_rune = self.rune_count;
        let mut window = RuneWindow::new();
        let mut rest = data;
        let mut byte_off = 0u32;
        let mut rune_index = 0u32;

        while !rest.is_empty() {
            let (c, sz) = decode_rune(rest);
            rest = &rest[sz..];

            if self.rune_count % RUNE_OFFSET_FREQUENCY == 0 {
                self.rune_offsets.push(self.end_byte + byte_off);
            }
            self.rune_count += 1;
            byte_off += sz as u32;

            if let Some(ng) = window.push(c) {
                // The window trails the cursor: the trigram starts two runes
                // back from the one just pushed.
                let new_off = start_rune + rune_index - 2;
                let last_off = self.last_offsets.get(&ng).copied().unwrap_or(0);
                put_uvarint(self.postings.entry(ng).or_default(), (new_off - last_off) as u64);
                self.last_offsets.insert(ng, new_off);
            }
            rune_index += 1;
        }

        self.end_runes.push(self.rune_count);
        self.end_byte += data.len() as u32;
        SearchableString {
            data: data.to_vec(),
        }
    }

    /// Decode the absolute rune positions recorded for `ng`, in order.
    pub fn positions(&self, ng: Ngram) -> Vec<u32> {
        let buf = match self.postings.get(&ng) {
            Some(b) => b,
            None => return Vec::new(),
        };
        let mut out = Vec::new();
        let mut off = 0usize;
        let mut abs = 0u32;
        while off < buf.len() {
            match read_uvarint(buf, &mut off) {
                Some(delta) => {
                    abs += delta as u32;
                    out.push(abs);
                }
                None => break,
            }
        }
        out
    }
}

/// Append `v` to `buf` as an unsigned LEB128 varint: 7 payload bits per
/// byte, high bit set on all but the last byte.
pub fn put_uvarint(buf: &mut Vec<u8>, mut v: u64) {
    while v >= 0x80 {
        buf.push((v as u8) | 0x80);
        v >>= 7;
    }
    buf.push(v as u8);
}

/// Read one unsigned LEB128 varint from `buf` starting at `*off`, advancing
/// the offset past it. Returns None on truncated or over-long input.
pub fn read_uvarint(buf: &[u8], off: &mut usize) -> Option<u64> {
    let mut out = 0u64;
    let mut shift = 0u32;
    loop {
        let b = *buf.get(*off)?;
        *off += 1;
        out |= ((b & 0x7F) as u64) << shift;
        if b & 0x80 == 0 {
            return Some(out);
        }
        shift += 7;
        if shift >= 64 {
            return None;
        }
    }
}
