//! Keyword entries
//!
//! A query is an ordered list of keyword entries: at most one free-text
//! main entry plus any number of typed filters.

use crate::error::Error;
use crate::record::Field;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What a keyword entry constrains
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeywordKind {
    /// Free-text query over every searchable field
    Main,
    /// Typed filter on ingredient names
    Ingredient,
    /// Typed filter on the appliance name
    Appliance,
    /// Typed filter on tool names
    Tool,
}

impl KeywordKind {
    /// Field targeted by a typed filter; `None` for the main query
    pub fn field(&self) -> Option<Field> {
        match self {
            KeywordKind::Main => None,
            KeywordKind::Ingredient => Some(Field::Ingredient),
            KeywordKind::Appliance => Some(Field::Appliance),
            KeywordKind::Tool => Some(Field::Tool),
        }
    }

    /// Canonical lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            KeywordKind::Main => "main",
            KeywordKind::Ingredient => "ingredient",
            KeywordKind::Appliance => "appliance",
            KeywordKind::Tool => "tool",
        }
    }
}

impl From<Field> for KeywordKind {
    fn from(field: Field) -> Self {
        match field {
            Field::Ingredient => KeywordKind::Ingredient,
            Field::Appliance => KeywordKind::Appliance,
            Field::Tool => KeywordKind::Tool,
        }
    }
}

impl fmt::Display for KeywordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeywordKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "main" => Ok(KeywordKind::Main),
            "ingredient" => Ok(KeywordKind::Ingredient),
            "appliance" => Ok(KeywordKind::Appliance),
            // data files and older callers say "ustensil"
            "tool" | "ustensil" => Ok(KeywordKind::Tool),
            _ => Err(Error::UnknownKeywordKind(s.to_string())),
        }
    }
}

/// One entry of a query's keyword list
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Keyword {
    /// Raw text as entered
    pub text: String,
    /// What the text constrains
    pub kind: KeywordKind,
}

impl Keyword {
    /// Create a keyword entry
    pub fn new(text: impl Into<String>, kind: KeywordKind) -> Self {
        Keyword {
            text: text.into(),
            kind,
        }
    }

    /// Main free-text entry
    pub fn main(text: impl Into<String>) -> Self {
        Self::new(text, KeywordKind::Main)
    }

    /// Ingredient filter
    pub fn ingredient(text: impl Into<String>) -> Self {
        Self::new(text, KeywordKind::Ingredient)
    }

    /// Appliance filter
    pub fn appliance(text: impl Into<String>) -> Self {
        Self::new(text, KeywordKind::Appliance)
    }

    /// Tool filter
    pub fn tool(text: impl Into<String>) -> Self {
        Self::new(text, KeywordKind::Tool)
    }

    /// Whether this is the main free-text entry
    pub fn is_main(&self) -> bool {
        self.kind == KeywordKind::Main
    }
}
