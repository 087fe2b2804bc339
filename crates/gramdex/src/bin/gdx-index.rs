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

use clap::Parser;
use std::result::Result as StdResult;

use gramdex::index::IndexError;
use gramdex::walk::{index_dir, WalkOptions};
use gramdex::IndexBuilder;

#[derive(Parser, Debug)]
#[command(
    name = "gdx-index",
    about = "Build an in-memory trigram shard from a directory and report stats"
)]
struct Args {
    /// Path to repository root
    repo: std::path::PathBuf,
    /// Maximum file size in bytes to index (skip larger files). Default: 1000000
    #[arg(long)]
    max_file_size: Option<u64>,
    /// Only index relative paths matching this regex
    #[arg(long)]
    include: Option<String>,
    /// Skip relative paths matching this regex
    #[arg(long)]
    exclude: Option<String>,
    /// Print machine-readable stats
    #[arg(long)]
    stats_json: bool,
}

fn main() -> StdResult<(), IndexError> {
    let args = Args::parse();

    let mut opts = WalkOptions {
        max_file_size: args.max_file_size.unwrap_or(1_000_000),
        ..WalkOptions::default()
    };
    if let Some(pat) = &args.include {
        opts.include = Some(regex::Regex::new(pat)?);
    }
    if let Some(pat) = &args.exclude {
        opts.exclude = Some(regex::Regex::new(pat)?);
    }

    let mut builder = IndexBuilder::new(None)?;
    let added = index_dir(&mut builder, &args.repo, &opts)?;

    if args.stats_json {
        println!(
            "{}",
            serde_json::json!({
                "docs": added,
                "content_bytes": builder.contents.end_byte,
                "name_bytes": builder.names.end_byte,
                "content_ngrams": builder.contents.postings.len(),
                "name_ngrams": builder.names.postings.len(),
            })
        );
    } else {
        println!(
            "indexed {} docs, {} bytes, {} distinct content trigrams",
            added,
            builder.content_size(),
            builder.contents.postings.len()
        );
    }
    Ok(())
}
