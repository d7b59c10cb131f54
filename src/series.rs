//! Cumulative series accumulation.
//!
//! For each conversation, [`accumulate`] turns a chronological event
//! sequence into:
//!
//! - a **primary series**: running message count, exactly +1 per event,
//!   starting at 1
//! - one **pattern series** per pattern name that occurred at least once,
//!   giving the running match count at *every* event timestamp (zeros
//!   before the first occurrence, not a truncated axis)
//!
//! A conversation with no events produces no bundle at all — it does not
//! participate in ranking or plotting.
//!
//! After all conversations are accumulated, [`extend_to_horizon`] appends a
//! synthetic terminal point at the global maximum timestamp to every series,
//! holding its final value flat, so every plotted line reaches a common
//! right edge. Each transformation builds new series values; nothing is
//! mutated mid-pipeline.

use chrono::{DateTime, Utc};

use crate::index::Conversation;
use crate::pattern::PatternClassifier;
use crate::reader::MessageEvent;

/// A named sequence of `(time, cumulative value)` points.
///
/// Invariant: points are in non-decreasing timestamp order and values are
/// monotonically non-decreasing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Series {
    /// Legend label for this line.
    pub name: String,
    /// `(timestamp, running total)` points in chronological order.
    pub points: Vec<(DateTime<Utc>, u64)>,
}

impl Series {
    /// Returns the last cumulative value, or 0 for an empty series.
    pub fn final_value(&self) -> u64 {
        self.points.last().map_or(0, |(_, value)| *value)
    }

    /// Returns the last timestamp, if any.
    pub fn last_timestamp(&self) -> Option<DateTime<Utc>> {
        self.points.last().map(|(timestamp, _)| *timestamp)
    }

    /// Returns a copy whose axis reaches `horizon`, holding the final value
    /// flat. A series already ending at the horizon is returned unchanged —
    /// the terminal value is idempotent either way.
    fn extended_to(&self, horizon: DateTime<Utc>) -> Series {
        let mut points = self.points.clone();
        if let Some(&(last, value)) = points.last() {
            if last < horizon {
                points.push((horizon, value));
            }
        }
        Series {
            name: self.name.clone(),
            points,
        }
    }
}

/// All series derived from one conversation.
#[derive(Debug, Clone)]
pub struct ConversationSeries {
    /// The conversation these series describe.
    pub conversation: Conversation,
    /// Cumulative message count.
    pub primary: Series,
    /// Cumulative match count per observed pattern, in declaration order.
    pub patterns: Vec<Series>,
}

impl ConversationSeries {
    /// Total message count.
    pub fn total(&self) -> u64 {
        self.primary.final_value()
    }

    /// Total pattern matches across all observed patterns.
    pub fn pattern_total(&self) -> u64 {
        self.patterns.iter().map(Series::final_value).sum()
    }

    /// Pattern series ordered by final cumulative value, descending
    /// (most frequent first), name ascending on ties.
    pub fn patterns_by_volume(&self) -> Vec<&Series> {
        let mut ordered: Vec<&Series> = self.patterns.iter().collect();
        ordered.sort_by(|a, b| {
            b.final_value()
                .cmp(&a.final_value())
                .then_with(|| a.name.cmp(&b.name))
        });
        ordered
    }

    fn extended_to(&self, horizon: DateTime<Utc>) -> ConversationSeries {
        ConversationSeries {
            conversation: self.conversation.clone(),
            primary: self.primary.extended_to(horizon),
            patterns: self
                .patterns
                .iter()
                .map(|series| series.extended_to(horizon))
                .collect(),
        }
    }
}

/// Accumulates one conversation's chronological events into its series
/// bundle.
///
/// When a `classifier` is given, every event is classified once; matched
/// counts snapshot into per-pattern columns after each event, so all
/// pattern series share the primary series' timestamp axis. Patterns that
/// never occur produce no series.
///
/// Returns `None` for a conversation with no events.
pub fn accumulate(
    conversation: Conversation,
    events: &[MessageEvent],
    classifier: Option<&PatternClassifier>,
) -> Option<ConversationSeries> {
    if events.is_empty() {
        return None;
    }

    let pattern_count = classifier.map_or(0, PatternClassifier::len);
    let mut counts = vec![0u64; pattern_count];
    let mut columns: Vec<Vec<u64>> = vec![Vec::with_capacity(events.len()); pattern_count];
    let mut primary_points = Vec::with_capacity(events.len());

    for (i, event) in events.iter().enumerate() {
        if let Some(classifier) = classifier {
            if let Some(matched) = classifier.classify(&event.content) {
                counts[matched.index] += 1;
            }
            // Snapshot every pattern's running count at this timestamp.
            for (column, &count) in columns.iter_mut().zip(&counts) {
                column.push(count);
            }
        }
        primary_points.push((event.timestamp, (i + 1) as u64));
    }

    let timestamps: Vec<DateTime<Utc>> = events.iter().map(|e| e.timestamp).collect();
    let patterns = columns
        .into_iter()
        .enumerate()
        .filter(|(_, column)| column.last().copied().unwrap_or(0) > 0)
        .map(|(index, column)| Series {
            name: classifier
                .expect("columns exist only with a classifier")
                .name(index)
                .to_string(),
            points: timestamps.iter().copied().zip(column).collect(),
        })
        .collect();

    let primary = Series {
        name: conversation.name.clone(),
        points: primary_points,
    };

    Some(ConversationSeries {
        conversation,
        primary,
        patterns,
    })
}

/// Extends every bundle's series to the global maximum timestamp.
///
/// The maximum is taken over all primary series; afterwards every series'
/// final timestamp equals that horizon while final values are unchanged.
pub fn extend_to_horizon(bundles: Vec<ConversationSeries>) -> Vec<ConversationSeries> {
    let horizon = bundles
        .iter()
        .filter_map(|bundle| bundle.primary.last_timestamp())
        .max();
    let Some(horizon) = horizon else {
        return bundles;
    };
    bundles
        .into_iter()
        .map(|bundle| bundle.extended_to(horizon))
        .collect()
}
