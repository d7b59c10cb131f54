//! Property-based tests for accumulation, ordering and classification.

use chatgraph::index::Conversation;
use chatgraph::pattern::PatternClassifier;
use chatgraph::reader::{MessageEvent, parse_timestamp};
use chatgraph::series::{accumulate, extend_to_horizon};
use chrono::{TimeZone, Utc};
use proptest::prelude::*;

fn conversation(name: &str) -> Conversation {
    Conversation {
        id: format!("c-{name}"),
        name: name.to_string(),
        log_path: std::path::PathBuf::from("unused"),
    }
}

/// Chronological events at the given minute offsets.
fn events_at(offsets: &[u32], content: &str) -> Vec<MessageEvent> {
    offsets
        .iter()
        .map(|&minute| MessageEvent {
            timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
                + chrono::Duration::minutes(i64::from(minute)),
            content: content.to_string(),
        })
        .collect()
}

proptest! {
    /// For N events with no pattern matches, the primary series has length
    /// N, increases by exactly 1 per point, and ends at N.
    #[test]
    fn primary_series_is_strictly_increasing(n in 1usize..200) {
        let offsets: Vec<u32> = (0..n as u32).collect();
        let events = events_at(&offsets, "plain text");
        let classifier = PatternClassifier::fillers();
        let bundle = accumulate(conversation("p"), &events, Some(&classifier)).unwrap();

        prop_assert_eq!(bundle.primary.points.len(), n);
        for (i, (_, value)) in bundle.primary.points.iter().enumerate() {
            prop_assert_eq!(*value, (i + 1) as u64);
        }
        prop_assert_eq!(bundle.total(), n as u64);
        prop_assert!(bundle.patterns.is_empty());
    }

    /// Reversing a newest-first sequence always yields a non-decreasing
    /// timestamp axis, duplicates included.
    #[test]
    fn reversed_input_yields_chronological_axis(mut offsets in proptest::collection::vec(0u32..50_000, 1..100)) {
        // Newest first, as stored on disk.
        offsets.sort_unstable_by(|a, b| b.cmp(a));
        let newest_first = events_at(&offsets, "x y");

        let chronological: Vec<MessageEvent> =
            newest_first.into_iter().rev().collect();
        let bundle = accumulate(conversation("p"), &chronological, None).unwrap();

        let axis: Vec<_> = bundle.primary.points.iter().map(|(t, _)| *t).collect();
        prop_assert!(axis.windows(2).all(|w| w[0] <= w[1]));
    }

    /// Terminal extension never changes a series' final value, and every
    /// extended bundle ends at the same timestamp.
    #[test]
    fn terminal_extension_preserves_final_values(
        a in proptest::collection::vec(0u32..10_000, 1..50),
        b in proptest::collection::vec(0u32..10_000, 1..50),
    ) {
        let mut a = a;
        let mut b = b;
        a.sort_unstable();
        b.sort_unstable();

        let bundle_a = accumulate(conversation("a"), &events_at(&a, "text"), None).unwrap();
        let bundle_b = accumulate(conversation("b"), &events_at(&b, "text"), None).unwrap();
        let totals = (bundle_a.total(), bundle_b.total());

        let extended = extend_to_horizon(vec![bundle_a, bundle_b]);

        prop_assert_eq!(extended[0].total(), totals.0);
        prop_assert_eq!(extended[1].total(), totals.1);
        prop_assert_eq!(
            extended[0].primary.last_timestamp(),
            extended[1].primary.last_timestamp()
        );
    }

    /// Pattern series values are monotonically non-decreasing and bounded
    /// by the message count.
    #[test]
    fn pattern_series_are_monotonic(flags in proptest::collection::vec(any::<bool>(), 1..100)) {
        let classifier = PatternClassifier::fillers();
        let events: Vec<MessageEvent> = flags
            .iter()
            .enumerate()
            .map(|(i, &is_filler)| MessageEvent {
                timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
                    + chrono::Duration::minutes(i as i64),
                content: if is_filler { "hmm".to_string() } else { "plain words".to_string() },
            })
            .collect();

        let bundle = accumulate(conversation("p"), &events, Some(&classifier)).unwrap();
        for series in &bundle.patterns {
            prop_assert!(series.points.windows(2).all(|w| w[0].1 <= w[1].1));
            prop_assert!(series.final_value() <= bundle.total());
        }
    }

    /// A filler surrounded by other words never classifies: matching is
    /// whole-text, not containment.
    #[test]
    fn embedded_fillers_do_not_classify(prefix in "[a-z]{1,8}", suffix in "[a-z]{1,8}") {
        let classifier = PatternClassifier::fillers();
        let text = format!("{prefix} hmmm {suffix}");
        prop_assert!(classifier.classify(&text).is_none());
    }

    /// Round trip: any RFC 3339 rendering of a whole-second instant parses
    /// back to the same instant.
    #[test]
    fn timestamp_rfc3339_round_trip(secs in 0i64..4_000_000_000) {
        let instant = Utc.timestamp_opt(secs, 0).unwrap();
        let parsed = parse_timestamp(&instant.to_rfc3339()).unwrap();
        prop_assert_eq!(parsed, instant);
    }
}
