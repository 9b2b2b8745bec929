//! Query state
//!
//! The owned, ordered keyword list a search runs against. At most one main
//! entry exists at a time; it is replaced (removed then re-added) whenever
//! the free-text input changes. Typed filters are added and removed by
//! explicit operations. A `QueryState` has a single writer; share it behind
//! a lock if several threads need to update it.

use pantry_core::{Keyword, KeywordKind};

/// Ordered keyword list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryState {
    keywords: Vec<Keyword>,
}

impl QueryState {
    /// Empty state: no main keyword, no filters
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set the main keyword
    pub fn with_main(mut self, text: impl Into<String>) -> Self {
        self.set_main(text);
        self
    }

    /// Builder: add a keyword entry
    pub fn with_keyword(mut self, text: impl Into<String>, kind: KeywordKind) -> Self {
        self.add_keyword(text, kind);
        self
    }

    /// Entries in insertion order
    pub fn keywords(&self) -> &[Keyword] {
        &self.keywords
    }

    /// Raw text of the main entry, if any
    pub fn main(&self) -> Option<&str> {
        self.keywords
            .iter()
            .find(|k| k.is_main())
            .map(|k| k.text.as_str())
    }

    /// Typed filter entries in insertion order
    pub fn filters(&self) -> impl Iterator<Item = &Keyword> + '_ {
        self.keywords.iter().filter(|k| !k.is_main())
    }

    /// Whether there are no entries at all
    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    /// Append a keyword entry
    ///
    /// A main entry replaces the current one.
    pub fn add_keyword(&mut self, text: impl Into<String>, kind: KeywordKind) {
        match kind {
            KeywordKind::Main => self.set_main(text),
            KeywordKind::Ingredient | KeywordKind::Appliance | KeywordKind::Tool => {
                self.keywords.push(Keyword::new(text, kind))
            }
        }
    }

    /// Remove the first entry matching both text and kind
    ///
    /// Returns `false` when no entry matched; removal is safe to attempt
    /// speculatively.
    pub fn remove_keyword(&mut self, text: &str, kind: KeywordKind) -> bool {
        match self
            .keywords
            .iter()
            .position(|k| k.kind == kind && k.text == text)
        {
            Some(pos) => {
                self.keywords.remove(pos);
                true
            }
            None => {
                tracing::warn!(
                    target: "pantry::search",
                    keyword = text,
                    kind = %kind,
                    "Keyword not found"
                );
                false
            }
        }
    }

    /// Replace the main entry
    pub fn set_main(&mut self, text: impl Into<String>) {
        self.keywords.retain(|k| !k.is_main());
        self.keywords.push(Keyword::main(text));
    }

    /// Remove the main entry, returning whether one existed
    pub fn remove_main(&mut self) -> bool {
        let before = self.keywords.len();
        self.keywords.retain(|k| !k.is_main());
        before != self.keywords.len()
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        self.keywords.clear();
    }
}

impl From<Vec<Keyword>> for QueryState {
    /// Keeps the last main entry and every typed filter, in order
    fn from(keywords: Vec<Keyword>) -> Self {
        let mut state = QueryState::new();
        for keyword in keywords {
            state.add_keyword(keyword.text, keyword.kind);
        }
        state
    }
}
