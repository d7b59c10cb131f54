//! Conversation ranking, filtering and windowing.
//!
//! [`rank_and_select`] takes the full accumulated result set and applies,
//! in order: the optional name filter, the ranking key (descending, display
//! name ascending on ties), then the `[skip, skip + limit)` window.
//!
//! Two conditions are recoverable and reported as [`SelectWarning`] values
//! rather than errors, with documented fallbacks:
//!
//! - a filter that matches nothing falls back to the unfiltered set
//! - a skip at or beyond the population clamps back to 0
//!
//! The library never prints; the binary turns warnings into stderr lines.

use std::fmt;

use crate::series::ConversationSeries;

/// The scalar used to order conversations before selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RankKey {
    /// Total message count (default).
    #[default]
    Messages,
    /// Total pattern-match count.
    Patterns,
}

impl RankKey {
    fn value_of(self, bundle: &ConversationSeries) -> u64 {
        match self {
            RankKey::Messages => bundle.total(),
            RankKey::Patterns => bundle.pattern_total(),
        }
    }
}

impl fmt::Display for RankKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RankKey::Messages => write!(f, "messages"),
            RankKey::Patterns => write!(f, "pattern matches"),
        }
    }
}

/// Configuration for one selection pass.
#[derive(Debug, Clone, Default)]
pub struct SelectConfig {
    /// Ranking key.
    pub key: RankKey,
    /// Keep conversations whose display name contains any of these terms
    /// (case-insensitive). Empty means no filtering.
    pub terms: Vec<String>,
    /// Ranked conversations to skip before taking the window.
    pub skip: usize,
    /// Maximum conversations to keep.
    pub limit: usize,
}

impl SelectConfig {
    /// Creates a config with the given window and no filter.
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }

    /// Sets the ranking key.
    #[must_use]
    pub fn with_key(mut self, key: RankKey) -> Self {
        self.key = key;
        self
    }

    /// Sets the name filter terms.
    #[must_use]
    pub fn with_terms(mut self, terms: Vec<String>) -> Self {
        self.terms = terms;
        self
    }

    /// Sets the skip offset.
    #[must_use]
    pub fn with_skip(mut self, skip: usize) -> Self {
        self.skip = skip;
        self
    }
}

/// A recoverable selection condition, reported but not fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectWarning {
    /// No conversation name contained any filter term; the unfiltered set
    /// was used instead.
    FilterMatchedNothing {
        /// The terms that matched nothing.
        terms: Vec<String>,
    },
    /// The skip reached past the ranked population; it was reset to 0.
    SkipExceedsPopulation {
        /// The requested skip.
        skip: usize,
        /// How many conversations were available.
        population: usize,
    },
}

impl fmt::Display for SelectWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectWarning::FilterMatchedNothing { terms } => write!(
                f,
                "no conversation name contains any of [{}]; showing all conversations",
                terms.join(", ")
            ),
            SelectWarning::SkipExceedsPopulation { skip, population } => write!(
                f,
                "--skip {skip} exceeds the {population} ranked conversation(s); starting from the top"
            ),
        }
    }
}

/// The ranked, filtered, windowed result.
#[derive(Debug)]
pub struct Selection {
    /// Surviving bundles, in rank order.
    pub selected: Vec<ConversationSeries>,
    /// Recoverable conditions encountered on the way.
    pub warnings: Vec<SelectWarning>,
}

/// Filters, ranks and windows the accumulated bundles.
pub fn rank_and_select(bundles: Vec<ConversationSeries>, config: &SelectConfig) -> Selection {
    let mut warnings = Vec::new();

    let mut pool = if config.terms.is_empty() {
        bundles
    } else {
        let (matched, rest): (Vec<_>, Vec<_>) = bundles
            .into_iter()
            .partition(|bundle| name_matches_any(&bundle.conversation.name, &config.terms));
        if matched.is_empty() {
            warnings.push(SelectWarning::FilterMatchedNothing {
                terms: config.terms.clone(),
            });
            rest
        } else {
            matched
        }
    };

    pool.sort_by(|a, b| {
        config
            .key
            .value_of(b)
            .cmp(&config.key.value_of(a))
            .then_with(|| a.conversation.name.cmp(&b.conversation.name))
    });

    let skip = if config.skip > 0 && config.skip >= pool.len() {
        warnings.push(SelectWarning::SkipExceedsPopulation {
            skip: config.skip,
            population: pool.len(),
        });
        0
    } else {
        config.skip
    };

    let selected = pool.into_iter().skip(skip).take(config.limit).collect();

    Selection { selected, warnings }
}

fn name_matches_any(name: &str, terms: &[String]) -> bool {
    let name = name.to_lowercase();
    terms.iter().any(|term| name.contains(&term.to_lowercase()))
}
