//! Message log reading.
//!
//! Each conversation directory holds a `messages.csv` with a header row and
//! one record per message, newest first. Columns are positional:
//! `ID, Timestamp, Contents, Attachments`. Contents can embed commas and
//! newlines, so the log is parsed as structured CSV records, never split on
//! delimiters by hand.
//!
//! [`read_log`] buffers the whole log and reverses it so the returned events
//! are in chronological order. Conversations are sized in the thousands of
//! messages, so buffering one log at a time is fine.
//!
//! Timestamp policy is strict: a row whose timestamp doesn't parse aborts
//! the run with [`ChatgraphError::Timestamp`]. Skipping the row would leave
//! the cumulative count silently short of the real message count.

use std::fs::File;
use std::io::BufReader;

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::error::{ChatgraphError, Result};
use crate::index::Conversation;

/// Positional column of the ISO-8601 timestamp.
const TIMESTAMP_COLUMN: usize = 1;

/// Positional column of the message text.
const CONTENTS_COLUMN: usize = 2;

/// One message, reduced to what the aggregation needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageEvent {
    /// When the message was sent.
    pub timestamp: DateTime<Utc>,
    /// Raw text content.
    pub content: String,
}

/// Reads a conversation's log into chronological order.
///
/// # Errors
///
/// - [`ChatgraphError::Io`] when the log can't be opened
/// - [`ChatgraphError::Csv`] on malformed records
/// - [`ChatgraphError::Timestamp`] on the first row whose timestamp doesn't
///   parse (strict policy, applied uniformly)
pub fn read_log(conversation: &Conversation) -> Result<Vec<MessageEvent>> {
    let file = File::open(&conversation.log_path)?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(BufReader::new(file));

    let mut events = Vec::new();
    for result in reader.records() {
        let record = result?;
        let raw_timestamp = record.get(TIMESTAMP_COLUMN).unwrap_or("");
        let content = record.get(CONTENTS_COLUMN).unwrap_or("").to_string();

        let timestamp = parse_timestamp(raw_timestamp)
            .ok_or_else(|| ChatgraphError::timestamp(raw_timestamp, &conversation.name))?;

        events.push(MessageEvent { timestamp, content });
    }

    // On-disk order is newest first.
    events.reverse();
    Ok(events)
}

/// Parses one ISO-8601 timestamp.
///
/// Exports have used both `T`- and space-separated forms, with and without
/// a zone offset, so several formats are tried in order.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.to_utc());
    }
    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f%:z") {
        return Some(dt.to_utc());
    }

    let naive_formats = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];
    for fmt in &naive_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.and_utc());
        }
    }
    None
}
