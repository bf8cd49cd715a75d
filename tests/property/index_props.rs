//! Property tests for the token index against a brute-force oracle.

use crate::common::make_post;
use postsearch::index::tokenize;
use postsearch::{Document, TokenIndex};
use proptest::prelude::*;

fn collection() -> impl Strategy<Value = Vec<Document>> {
    prop::collection::vec(
        ("[a-z]{1,6}( [a-z]{1,6}){0,4}", "[a-z]{1,6}( [a-z]{1,6}){0,8}"),
        0..25,
    )
    .prop_map(|pairs| {
        pairs
            .into_iter()
            .enumerate()
            .map(|(i, (title, content))| make_post(&format!("d{i}"), &title, "", &[], &content))
            .collect()
    })
}

/// Oracle: documents having, for every query word, some word it prefixes.
fn oracle(documents: &[Document], query: &str) -> Vec<usize> {
    let terms: Vec<String> = tokenize(query).collect();
    if terms.is_empty() {
        return Vec::new();
    }
    documents
        .iter()
        .enumerate()
        .filter(|(_, doc)| {
            let words: Vec<String> = tokenize(&doc.searchable_text()).collect();
            terms
                .iter()
                .all(|t| words.iter().any(|w| w.starts_with(t.as_str())))
        })
        .map(|(i, _)| i)
        .collect()
}

proptest! {
    /// An unlimited lookup finds exactly the documents the oracle finds.
    #[test]
    fn prop_lookup_matches_oracle(docs in collection(), query in "[a-z]{1,3}( [a-z]{1,3})?") {
        let index = TokenIndex::build(&docs);
        let mut found = index.lookup(&query, usize::MAX);
        found.sort_unstable();
        prop_assert_eq!(found, oracle(&docs, &query));
    }

    /// Lookups respect the limit and never repeat or invent positions.
    #[test]
    fn prop_lookup_bounded(docs in collection(), query in "[a-z]{1,2}", limit in 0usize..10) {
        let index = TokenIndex::build(&docs);
        let found = index.lookup(&query, limit);
        prop_assert!(found.len() <= limit);
        let mut dedup = found.clone();
        dedup.sort_unstable();
        dedup.dedup();
        prop_assert_eq!(dedup.len(), found.len());
        prop_assert!(found.iter().all(|&p| p < docs.len()));
    }

    /// Every word of a document finds that document.
    #[test]
    fn prop_every_indexed_word_finds_its_document(docs in collection()) {
        let index = TokenIndex::build(&docs);
        prop_assert_eq!(index.doc_count(), docs.len());
        for (position, doc) in docs.iter().enumerate() {
            for word in tokenize(&doc.title) {
                let found = index.lookup(&word, usize::MAX);
                prop_assert!(found.contains(&position), "{word} missing doc {position}");
            }
        }
    }
}
