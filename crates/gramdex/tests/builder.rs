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

use gramdex::{
    runes_to_ngram, Document, DocumentSection, IndexBuilder, IndexError, Repository,
    RepositoryBranch, MAX_BRANCHES,
};

fn branch(name: &str) -> RepositoryBranch {
    RepositoryBranch {
        name: name.to_string(),
        version: "HEAD".to_string(),
    }
}

fn repo_with_branches(names: &[&str]) -> Repository {
    Repository {
        name: "testrepo".to_string(),
        branches: names.iter().map(|n| branch(n)).collect(),
        ..Repository::default()
    }
}

#[test]
fn single_document_end_to_end() {
    let mut b = IndexBuilder::new(Some(repo_with_branches(&["main"]))).unwrap();
    b.add(Document {
        name: "a.txt".to_string(),
        content: b"abcd".to_vec(),
        branches: vec!["main".to_string()],
        ..Document::default()
    })
    .unwrap();

    assert_eq!(b.doc_count(), 1);
    assert_eq!(b.contents.end_runes, vec![4]);
    assert_eq!(b.contents.end_byte, 4);
    assert_eq!(b.contents.rune_offsets, vec![0]);
    assert_eq!(b.contents.postings.len(), 2);
    assert_eq!(b.contents.positions(runes_to_ngram(['a', 'b', 'c'])), vec![0]);
    assert_eq!(b.contents.positions(runes_to_ngram(['b', 'c', 'd'])), vec![1]);
    assert_eq!(b.branch_masks, vec![0b1]);

    // The name went through its own postings builder.
    assert_eq!(b.names.end_byte, 5);
    assert_eq!(b.names.end_runes, vec![5]);
    assert_eq!(b.files[0].data, b"abcd");
    assert_eq!(b.file_names[0].data, b"a.txt");
}

#[test]
fn per_document_arrays_stay_in_lockstep() {
    let mut b = IndexBuilder::new(Some(repo_with_branches(&["main", "dev"]))).unwrap();
    for (name, content, branches) in [
        ("a.go", "package a\n", vec!["main"]),
        ("b.go", "package b\n", vec!["main", "dev"]),
        ("empty", "", vec![]),
    ] {
        b.add(Document {
            name: name.to_string(),
            content: content.as_bytes().to_vec(),
            branches: branches.into_iter().map(String::from).collect(),
            ..Document::default()
        })
        .unwrap();
    }

    let d = b.doc_count();
    assert_eq!(d, 3);
    assert_eq!(b.files.len(), d);
    assert_eq!(b.file_names.len(), d);
    assert_eq!(b.doc_sections.len(), d);
    assert_eq!(b.branch_masks.len(), d);
    assert_eq!(b.sub_repos.len(), d);
    assert_eq!(b.contents.end_runes.len(), d);
    assert_eq!(b.names.end_runes.len(), d);

    assert_eq!(b.branch_masks, vec![0b01, 0b11, 0b00]);
    assert!(b.sub_repos.iter().all(|&i| (i as usize) < b.sub_repo_indices.len()));
}

#[test]
fn branch_mask_popcount_matches_branch_list() {
    let mut b =
        IndexBuilder::new(Some(repo_with_branches(&["main", "dev", "release"]))).unwrap();
    b.add(Document {
        name: "f".to_string(),
        content: b"fff".to_vec(),
        branches: vec!["release".to_string(), "main".to_string()],
        ..Document::default()
    })
    .unwrap();

    assert_eq!(b.branch_masks[0].count_ones(), 2);
    assert_eq!(b.branch_masks[0], 0b101);
}

#[test]
fn unknown_branch_is_rejected() {
    let mut b = IndexBuilder::new(Some(repo_with_branches(&["main"]))).unwrap();
    let err = b
        .add(Document {
            name: "a.txt".to_string(),
            content: b"abcd".to_vec(),
            branches: vec!["dev".to_string()],
            ..Document::default()
        })
        .unwrap_err();
    assert!(matches!(err, IndexError::UnknownBranch(br) if br == "dev"));
    assert_eq!(b.doc_count(), 0);
}

#[test]
fn too_many_branches_rejected() {
    let names: Vec<String> = (0..=MAX_BRANCHES).map(|i| format!("b{}", i)).collect();
    let name_refs: Vec<&str> = names.iter().map(String::as_str).collect();
    let err = IndexBuilder::new(Some(repo_with_branches(&name_refs))).unwrap_err();
    assert!(matches!(err, IndexError::TooManyBranches(n) if n == MAX_BRANCHES + 1));

    // Exactly 32 is fine.
    assert!(IndexBuilder::new(Some(repo_with_branches(&name_refs[..MAX_BRANCHES]))).is_ok());
}

#[test]
fn descriptor_rejected_after_first_document() {
    let mut b = IndexBuilder::new(None).unwrap();
    b.add_file("a.txt", b"abcd").unwrap();
    let err = b.set_repository(Repository::default()).unwrap_err();
    assert!(matches!(err, IndexError::DescriptorAfterAdd));
}

#[test]
fn overlapping_sections_rejected() {
    let mut b = IndexBuilder::new(None).unwrap();
    let err = b
        .add(Document {
            name: "a.txt".to_string(),
            content: b"abcdefgh".to_vec(),
            symbols: vec![
                DocumentSection { start: 0, end: 5 },
                DocumentSection { start: 3, end: 8 },
            ],
            ..Document::default()
        })
        .unwrap_err();
    assert!(matches!(err, IndexError::SectionOverlap));
}

#[test]
fn touching_sections_are_sorted_and_kept() {
    let mut b = IndexBuilder::new(None).unwrap();
    // Unsorted on input; touching but not overlapping.
    b.add(Document {
        name: "a.txt".to_string(),
        content: b"abcdefgh".to_vec(),
        symbols: vec![
            DocumentSection { start: 3, end: 8 },
            DocumentSection { start: 0, end: 3 },
        ],
        ..Document::default()
    })
    .unwrap();

    assert_eq!(
        b.doc_sections[0],
        vec![
            DocumentSection { start: 0, end: 3 },
            DocumentSection { start: 3, end: 8 },
        ]
    );
}

#[test]
fn failed_add_leaves_no_partial_state() {
    let mut b = IndexBuilder::new(None).unwrap();
    let bad = Document {
        name: "a.txt".to_string(),
        content: b"abcd".to_vec(),
        symbols: vec![
            DocumentSection { start: 0, end: 5 },
            DocumentSection { start: 3, end: 8 },
        ],
        ..Document::default()
    };
    assert!(b.add(bad.clone()).is_err());

    assert_eq!(b.doc_count(), 0);
    assert_eq!(b.contents.end_byte, 0);
    assert_eq!(b.names.end_byte, 0);
    assert!(b.contents.postings.is_empty());
    assert_eq!(b.content_size(), 0);

    // The corrected document is accepted afterwards.
    let mut fixed = bad;
    fixed.symbols = vec![DocumentSection { start: 0, end: 4 }];
    b.add(fixed).unwrap();
    assert_eq!(b.doc_count(), 1);
}

#[test]
fn sub_repo_membership() {
    let mut desc = repo_with_branches(&[]);
    desc.sub_repo_map.insert(
        "sub".to_string(),
        Repository {
            name: "subrepo".to_string(),
            ..Repository::default()
        },
    );
    let mut b = IndexBuilder::new(Some(desc)).unwrap();

    // Indices are dense over the sorted paths: "" < "sub".
    assert_eq!(b.sub_repo_indices.len(), 2);
    assert_eq!(b.sub_repo_indices.get(""), Some(&0));
    assert_eq!(b.sub_repo_indices.get("sub"), Some(&1));

    b.add(Document {
        name: "sub/x.go".to_string(),
        content: b"package x\n".to_vec(),
        sub_repository_path: "sub".to_string(),
        ..Document::default()
    })
    .unwrap();
    assert_eq!(b.sub_repos, vec![1]);

    let err = b
        .add(Document {
            name: "x.go".to_string(),
            content: b"package x\n".to_vec(),
            sub_repository_path: "sub".to_string(),
            ..Document::default()
        })
        .unwrap_err();
    assert!(matches!(err, IndexError::SubRepoPathMismatch { .. }));

    // Equal to the sub-repo path is not "under" it either.
    let err = b
        .add(Document {
            name: "sub".to_string(),
            content: Vec::new(),
            sub_repository_path: "sub".to_string(),
            ..Document::default()
        })
        .unwrap_err();
    assert!(matches!(err, IndexError::SubRepoPathMismatch { .. }));
}

#[test]
fn unknown_sub_repo_rejected() {
    let mut b = IndexBuilder::new(None).unwrap();
    let err = b
        .add(Document {
            name: "vendor/x.go".to_string(),
            content: b"package x\n".to_vec(),
            sub_repository_path: "vendor".to_string(),
            ..Document::default()
        })
        .unwrap_err();
    assert!(matches!(err, IndexError::UnknownSubRepo(p) if p == "vendor"));
}

#[test]
fn content_size_counts_names_too() {
    let mut b = IndexBuilder::new(None).unwrap();
    b.add_file("empty1", b"").unwrap();
    b.add_file("empty2", b"").unwrap();

    // Repositories of empty files still report nonzero size, so callers
    // relying on size thresholds do not skip them.
    assert_eq!(b.content_size(), 12);
}

#[test]
fn template_syntax_is_validated() {
    let desc = Repository {
        file_url_template: "{{ unclosed".to_string(),
        ..Repository::default()
    };
    let err = IndexBuilder::new(Some(desc)).unwrap_err();
    assert!(matches!(err, IndexError::TemplateSyntax(_)));

    let ok = Repository {
        name: "r".to_string(),
        commit_url_template: "https://example.com/r/commit/{{ version }}".to_string(),
        file_url_template: "https://example.com/r/blob/{{ version }}/{{ path }}".to_string(),
        line_fragment_template: "#L{{ line }}".to_string(),
        ..Repository::default()
    };
    assert!(IndexBuilder::new(Some(ok)).is_ok());
}

#[test]
fn empty_branch_list_yields_zero_mask() {
    let mut b = IndexBuilder::new(Some(repo_with_branches(&["main"]))).unwrap();
    b.add_file("a.txt", b"abcd").unwrap();
    assert_eq!(b.branch_masks, vec![0]);
}
