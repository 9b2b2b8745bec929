//! Recipe records
//!
//! The serialized shape follows the source data file: ingredient entries
//! carry their name under `ingredient`, the appliance field is `appliance`
//! and the tool list is `ustensils`. Records are immutable once loaded.

use crate::types::RecordId;
use serde::{Deserialize, Serialize};

// ============================================================================
// Ingredient
// ============================================================================

/// One entry of a record's ingredient list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Ingredient name (the only searched part)
    #[serde(rename = "ingredient")]
    pub name: String,
    /// Optional amount
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    /// Optional unit for `quantity`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl Ingredient {
    /// Create an ingredient with no quantity
    pub fn new(name: impl Into<String>) -> Self {
        Ingredient {
            name: name.into(),
            quantity: None,
            unit: None,
        }
    }

    /// Builder: set quantity
    pub fn with_quantity(mut self, quantity: f64) -> Self {
        self.quantity = Some(quantity);
        self
    }

    /// Builder: set unit
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }
}

// ============================================================================
// Field
// ============================================================================

/// Structural field a typed filter or inventory query targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    /// Ingredient names
    Ingredient,
    /// Appliance name
    Appliance,
    /// Tool names
    Tool,
}

impl Field {
    /// All filterable fields
    pub const ALL: [Field; 3] = [Field::Ingredient, Field::Appliance, Field::Tool];

    /// Canonical lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Ingredient => "ingredient",
            Field::Appliance => "appliance",
            Field::Tool => "tool",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Field {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ingredient" | "ingredients" => Ok(Field::Ingredient),
            "appliance" | "appliances" => Ok(Field::Appliance),
            "tool" | "tools" | "ustensil" | "ustensils" => Ok(Field::Tool),
            _ => Err(crate::Error::UnknownField(s.to_string())),
        }
    }
}

// ============================================================================
// Record
// ============================================================================

/// A recipe document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Unique, stable identifier
    pub id: RecordId,
    /// Recipe name
    pub name: String,
    /// Number of servings (display only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub servings: Option<u32>,
    /// Ingredient list, in source order
    pub ingredients: Vec<Ingredient>,
    /// Preparation time in minutes (display only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<u32>,
    /// Free-text description
    pub description: String,
    /// Appliance the recipe needs
    #[serde(rename = "appliance")]
    pub appliance_name: String,
    /// Tools the recipe needs, in source order
    #[serde(rename = "ustensils")]
    pub tool_names: Vec<String>,
}

impl Record {
    /// Create an otherwise empty record
    pub fn new(id: impl Into<RecordId>, name: impl Into<String>) -> Self {
        Record {
            id: id.into(),
            name: name.into(),
            servings: None,
            ingredients: Vec::new(),
            time: None,
            description: String::new(),
            appliance_name: String::new(),
            tool_names: Vec::new(),
        }
    }

    /// Builder: set appliance
    pub fn with_appliance(mut self, appliance: impl Into<String>) -> Self {
        self.appliance_name = appliance.into();
        self
    }

    /// Builder: add a tool
    pub fn with_tool(mut self, tool: impl Into<String>) -> Self {
        self.tool_names.push(tool.into());
        self
    }

    /// Builder: add an ingredient
    pub fn with_ingredient(mut self, ingredient: Ingredient) -> Self {
        self.ingredients.push(ingredient);
        self
    }

    /// Builder: set description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Ingredient names in source order
    pub fn ingredient_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.ingredients.iter().map(|i| i.name.as_str())
    }

    /// Values of one filterable field
    pub fn field_values(&self, field: Field) -> Vec<&str> {
        match field {
            Field::Ingredient => self.ingredient_names().collect(),
            Field::Appliance => vec![self.appliance_name.as_str()],
            Field::Tool => self.tool_names.iter().map(String::as_str).collect(),
        }
    }

    /// Every searchable text field
    ///
    /// Order: name, appliance, each tool, each ingredient name, description.
    pub fn searchable_text(&self) -> impl Iterator<Item = &str> + '_ {
        std::iter::once(self.name.as_str())
            .chain(std::iter::once(self.appliance_name.as_str()))
            .chain(self.tool_names.iter().map(String::as_str))
            .chain(self.ingredient_names())
            .chain(std::iter::once(self.description.as_str()))
    }
}
