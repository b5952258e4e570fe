//! Property-based tests for the statistics invariants

use proptest::prelude::*;
use std::collections::HashSet;
use std::io::Cursor;
use word_stream_stats::{
    BoundaryPolicy, CancellationToken, CollectingSink, ExtremalWords, PipelineBuilder,
    ReaderSource, StatisticsSnapshot,
};

/// Text mixing words, punctuation, whitespace and a few non-ASCII letters
fn stream_text() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-zA-Z0-9_ éß\n\t.,!?-]{0,400}").unwrap()
}

fn run(text: &str, chunk_size: usize, interval: u64, top_k: usize) -> Vec<StatisticsSnapshot> {
    let mut pipeline = PipelineBuilder::new()
        .chunk_size(chunk_size)
        .report_interval(interval)
        .top_k(top_k)
        .build()
        .unwrap();
    let mut sink = CollectingSink::new();
    let source = ReaderSource::new("prop", Cursor::new(text.as_bytes().to_vec()));
    pipeline.run(source, &mut sink, &CancellationToken::new()).unwrap();
    sink.reports()
}

fn whole_words(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: total words equals the sum of the word table at every report
    #[test]
    fn total_words_matches_table(
        text in stream_text(),
        chunk_size in 1usize..64,
        interval in 1u64..200,
    ) {
        for report in run(&text, chunk_size, interval, 5) {
            prop_assert_eq!(report.total_words, report.word_frequency.values().sum::<u64>());
        }
    }

    /// Property: the final total equals every character in the input
    #[test]
    fn final_char_total_is_exact(text in stream_text(), chunk_size in 1usize..64) {
        let reports = run(&text, chunk_size, 1_000_000, 5);
        prop_assert_eq!(reports.len(), 1);
        prop_assert_eq!(reports[0].total_chars, text.chars().count() as u64);
    }

    /// Property: stitched tokenization matches tokenizing the whole text at once
    #[test]
    fn stitched_words_independent_of_chunking(text in stream_text(), chunk_size in 1usize..64) {
        let reports = run(&text, chunk_size, 1_000_000, 5);
        let expected = whole_words(&text);
        prop_assert_eq!(reports[0].total_words, expected.len() as u64);
        for word in &expected {
            prop_assert!(reports[0].word_frequency.contains_key(word));
        }
    }

    /// Property: extremal collections stay bounded and hold distinct seen words
    #[test]
    fn extremal_sets_bounded_and_distinct(
        text in stream_text(),
        chunk_size in 1usize..64,
        top_k in 1usize..8,
    ) {
        for report in run(&text, chunk_size, 50, top_k) {
            for words in [&report.smallest_words, &report.largest_words] {
                prop_assert!(words.len() <= top_k);
                let distinct: HashSet<_> = words.iter().collect();
                prop_assert_eq!(distinct.len(), words.len());
                for word in words.iter() {
                    prop_assert!(report.word_frequency.contains_key(word));
                }
            }
        }
    }

    /// Property: cumulative totals never decrease between reports
    #[test]
    fn reports_are_monotonic(text in stream_text(), interval in 1u64..100) {
        let reports = run(&text, 16, interval, 5);
        for pair in reports.windows(2) {
            prop_assert!(pair[0].total_chars <= pair[1].total_chars);
            prop_assert!(pair[0].total_words <= pair[1].total_words);
        }
    }

    /// Property: re-observing tracked words never changes the collections
    #[test]
    fn reobserving_is_idempotent(words in prop::collection::vec("[a-z]{1,12}", 1..40)) {
        let mut tracker = ExtremalWords::new(5);
        for word in &words {
            tracker.observe(word);
        }
        let smallest = tracker.smallest();
        let largest = tracker.largest();
        for word in smallest.iter().chain(largest.iter()) {
            tracker.observe(word);
        }
        prop_assert_eq!(tracker.smallest(), smallest);
        prop_assert_eq!(tracker.largest(), largest);
    }

    /// Property: split tokenization never loses characters, only word boundaries
    #[test]
    fn split_policy_keeps_char_totals(text in stream_text(), chunk_size in 1usize..64) {
        let mut pipeline = PipelineBuilder::new()
            .chunk_size(chunk_size)
            .boundary(BoundaryPolicy::Split)
            .build()
            .unwrap();
        let mut sink = CollectingSink::new();
        let source = ReaderSource::new("prop", Cursor::new(text.as_bytes().to_vec()));
        pipeline.run(source, &mut sink, &CancellationToken::new()).unwrap();

        let report = sink.last().unwrap();
        prop_assert_eq!(report.total_chars, text.chars().count() as u64);
        prop_assert!(report.total_words >= whole_words(&text).len() as u64);
    }
}
