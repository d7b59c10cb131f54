//! Filler-word and phrase classification.
//!
//! This module provides [`PatternClassifier`], which tags a message with at
//! most one pattern name. Two modes exist:
//!
//! - **Fillers**: a builtin, ordered set of filler-word alternatives
//!   ("hmm", "lol", …). Each alternative must match the *entire* trimmed
//!   message, case-insensitively — a message that merely contains a filler
//!   somewhere does not count.
//! - **Phrases**: user-supplied fragments, matched anywhere in the message.
//!   The fragments are passed to the regex engine unsanitized, so regex
//!   metacharacters work (and misfire) exactly as written. This is a
//!   power-user feature; see [`PatternClassifier::phrases`].
//!
//! Ambiguity is resolved by declaration order: when a message satisfies
//! several alternatives, the first-declared one wins. The classifier reports
//! the winner as an explicit [`PatternMatch`] value rather than leaking
//! which internal regex group fired.
//!
//! # Example
//!
//! ```
//! use chatgraph::pattern::PatternClassifier;
//!
//! let classifier = PatternClassifier::fillers();
//! assert_eq!(classifier.classify("hmmm").map(|m| m.name), Some("hmm"));
//! assert_eq!(classifier.classify("I said hmmm to him"), None);
//! ```

use regex::{Regex, RegexSet, RegexSetBuilder};

use crate::error::{ChatgraphError, Result};

/// The builtin filler-word alternatives, in tie-break priority order.
///
/// Each entry is `(name, fragment)`; the fragment is compiled anchored to
/// the whole trimmed message. Order matters: "hm" would satisfy both a
/// single-letter rule and `hm+`, and the earlier entry wins.
const FILLER_PATTERNS: &[(&str, &str)] = &[
    ("letter", r"[a-z]"),
    ("yup", r"yu+p+|ye+p+"),
    ("yes", r"ye+s*|yeah+"),
    ("no", r"no+|nah+|nope+"),
    ("heh", r"heh+"),
    ("huh", r"huh+"),
    ("hmm", r"hm+"),
    ("mhm", r"m+hm+"),
    ("why", r"why+"),
    ("what", r"what*"),
    ("lol", r"lo+l+"),
    ("lmao", r"lmf?a+o+"),
    ("oh", r"o+h+"),
];

/// Which pattern set a classifier was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternMode {
    /// Builtin filler-word set, whole-text anchored.
    Fillers,
    /// User-supplied phrase list, unanchored.
    Phrases,
}

/// The result of classifying one message.
///
/// Carries the matched pattern's identity explicitly: its position in the
/// declared set and its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternMatch<'a> {
    /// Index of the pattern in declaration order.
    pub index: usize,
    /// Name of the pattern.
    pub name: &'a str,
}

/// A compiled, ordered pattern set.
///
/// Construct once per run via [`fillers`](Self::fillers) or
/// [`phrases`](Self::phrases) and pass by reference to consumers; there is
/// no global pattern state.
#[derive(Debug)]
pub struct PatternClassifier {
    names: Vec<String>,
    set: RegexSet,
    mode: PatternMode,
}

impl PatternClassifier {
    /// Compiles the builtin filler-word set.
    ///
    /// Matching is case-insensitive and anchored to the whole trimmed
    /// message text.
    pub fn fillers() -> Self {
        let names = FILLER_PATTERNS
            .iter()
            .map(|(name, _)| (*name).to_string())
            .collect();
        let patterns: Vec<String> = FILLER_PATTERNS
            .iter()
            .map(|(_, fragment)| format!("^(?:{fragment})$"))
            .collect();

        // The builtin set is a compile-time constant; a failure here is a
        // programming error, not an input error.
        let set = RegexSetBuilder::new(&patterns)
            .case_insensitive(true)
            .build()
            .expect("builtin filler patterns must compile");

        Self {
            names,
            set,
            mode: PatternMode::Fillers,
        }
    }

    /// Compiles a user-supplied phrase list.
    ///
    /// Each phrase becomes its own named alternative; the name is the phrase
    /// with characters unsafe for identifiers replaced by `_`. Unlike the
    /// builtin set, phrases are **not** anchored: a phrase counts when it
    /// appears anywhere in the message. Phrases are handed to the regex
    /// engine as raw fragments, so `b.ts` matches "bits" and "bats" — this
    /// is deliberate, unsanitized power-user behavior.
    ///
    /// # Errors
    ///
    /// Returns [`ChatgraphError::Phrase`] naming the first phrase that fails
    /// to compile. This is validated up front so a bad phrase is rejected
    /// before any message log is read.
    pub fn phrases(phrases: &[String]) -> Result<Self> {
        // Compile each phrase on its own first, so the error names the
        // offending phrase instead of an opaque combined pattern.
        for phrase in phrases {
            Regex::new(phrase).map_err(|e| ChatgraphError::phrase(phrase, e.to_string()))?;
        }

        let names = phrases.iter().map(|p| identifier_name(p)).collect();
        let set = RegexSetBuilder::new(phrases)
            .case_insensitive(true)
            .build()
            .map_err(|e| ChatgraphError::phrase(phrases.join("|"), e.to_string()))?;

        Ok(Self {
            names,
            set,
            mode: PatternMode::Phrases,
        })
    }

    /// Classifies one message, returning the first-declared pattern it
    /// satisfies, or `None`.
    ///
    /// A message is tagged as *one* pattern, never a multiset of everything
    /// it might satisfy.
    pub fn classify(&self, text: &str) -> Option<PatternMatch<'_>> {
        let haystack = match self.mode {
            PatternMode::Fillers => text.trim(),
            PatternMode::Phrases => text,
        };
        // SetMatches iterates in ascending pattern index, so the first hit
        // is the first-declared alternative.
        self.set.matches(haystack).iter().next().map(|index| PatternMatch {
            index,
            name: &self.names[index],
        })
    }

    /// Returns the pattern names in declaration order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Returns the name of the pattern at `index`.
    pub fn name(&self, index: usize) -> &str {
        &self.names[index]
    }

    /// Returns how many patterns the set declares.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if the set declares no patterns.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Returns which mode this classifier was built from.
    pub fn mode(&self) -> PatternMode {
        self.mode
    }
}

/// Derives a series name from a phrase: identifier-safe characters pass
/// through, everything else becomes `_`.
fn identifier_name(phrase: &str) -> String {
    phrase
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect()
}
