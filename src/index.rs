//! Conversation discovery from export metadata.
//!
//! A Discord data export stores, under `messages/`:
//!
//! - `index.json` — a lookup table from channel id (without its leading
//!   sigil) to display name, where deleted accounts appear as `null`
//! - one directory per channel, each holding a `channel.json` descriptor
//!   and a `messages.csv` log
//!
//! [`discover`] reads both layers and keeps only one-to-one conversations:
//! descriptors whose `type` equals [`DIRECT_MESSAGE_TYPE`]. Group and guild
//! channels are excluded. Display names are normalized by stripping the
//! exporter's fixed `"Direct Message with "` label when present.
//!
//! A missing or unparseable `index.json` is fatal for the whole run. A
//! missing or unparseable per-channel descriptor only skips that channel;
//! every skip is recorded in [`Discovery::skipped`] so the caller can log
//! it instead of losing it silently.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{ChatgraphError, Result};

/// The `channel.json` type discriminator marking a one-to-one conversation.
pub const DIRECT_MESSAGE_TYPE: i64 = 1;

/// The exporter's display-name label for direct messages.
const NAME_PREFIX: &str = "Direct Message with ";

/// File name of the per-channel message log.
const LOG_FILE: &str = "messages.csv";

/// A discovered one-to-one conversation. Immutable after discovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversation {
    /// Opaque channel id — the directory name, e.g. `c10345…`.
    pub id: String,
    /// Normalized display name.
    pub name: String,
    /// Location of the conversation's message log.
    pub log_path: PathBuf,
}

/// Why a channel directory was left out of the discovery result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skipped {
    /// Directory name of the channel.
    pub id: String,
    /// Human-readable reason, suitable for a warning line.
    pub reason: String,
}

/// The result of scanning an export's `messages/` tree.
#[derive(Debug)]
pub struct Discovery {
    /// One-to-one conversations, keyed by channel id.
    pub conversations: BTreeMap<String, Conversation>,
    /// Channels that looked like conversations but couldn't be used.
    pub skipped: Vec<Skipped>,
}

/// Shape of a `channel.json` descriptor. Only the discriminator matters.
#[derive(Debug, Deserialize)]
struct ChannelDescriptor {
    #[serde(rename = "type")]
    kind: i64,
}

/// Scans `messages_root` for one-to-one conversations.
///
/// # Errors
///
/// Fails with [`ChatgraphError::Structure`] when `index.json` is missing and
/// with [`ChatgraphError::Json`] when it doesn't parse — there is no useful
/// partial result without the name table.
pub fn discover(messages_root: &Path) -> Result<Discovery> {
    let index_path = messages_root.join("index.json");
    let raw = fs::read_to_string(&index_path)
        .map_err(|_| ChatgraphError::structure_at("missing or unreadable index.json", &index_path))?;
    // Deleted accounts are listed with a null display name.
    let names: HashMap<String, Option<String>> = serde_json::from_str(&raw)?;

    let mut conversations = BTreeMap::new();
    let mut skipped = Vec::new();

    for entry in fs::read_dir(messages_root)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let id = entry.file_name().to_string_lossy().into_owned();
        let dir = entry.path();

        let descriptor_path = dir.join("channel.json");
        let descriptor = match fs::read_to_string(&descriptor_path) {
            Ok(raw) => match serde_json::from_str::<ChannelDescriptor>(&raw) {
                Ok(descriptor) => descriptor,
                Err(e) => {
                    skipped.push(Skipped {
                        id,
                        reason: format!("unparseable channel.json: {e}"),
                    });
                    continue;
                }
            },
            Err(_) => {
                skipped.push(Skipped {
                    id,
                    reason: "missing channel.json".to_string(),
                });
                continue;
            }
        };

        // Group and guild channels are simply not conversations; excluding
        // them is expected, not a condition worth a warning.
        if descriptor.kind != DIRECT_MESSAGE_TYPE {
            continue;
        }

        // index.json keys carry the id without the directory's leading sigil.
        let lookup = id.strip_prefix('c').unwrap_or(&id);
        let Some(Some(name)) = names.get(lookup) else {
            skipped.push(Skipped {
                id,
                reason: "no display name in index.json".to_string(),
            });
            continue;
        };

        let conversation = Conversation {
            name: normalize_name(name),
            log_path: dir.join(LOG_FILE),
            id: id.clone(),
        };
        conversations.insert(id, conversation);
    }

    Ok(Discovery {
        conversations,
        skipped,
    })
}

/// Strips the exporter's fixed direct-message label, if present.
///
/// Exact prefix match only; any other name passes through unchanged.
fn normalize_name(name: &str) -> String {
    name.strip_prefix(NAME_PREFIX).unwrap_or(name).to_string()
}
