//! Expense categories

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of an expense.
///
/// The named variants are the set the extraction prompt offers the model.
/// Anything else is kept verbatim in [`Category::Custom`] rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    /// Restaurants, groceries, cafes
    Food,
    /// Transport, lodging
    Travel,
    /// Retail purchases
    Shopping,
    /// Leisure and events
    Entertainment,
    /// Power, water, telecom
    Utilities,
    /// Medical and pharmacy
    Healthcare,
    /// Courses, books, tuition
    Education,
    /// Explicit catch-all
    Other,
    /// Free text outside the known set
    Custom(String),
}

impl Category {
    /// The known categories, in prompt order
    pub const KNOWN: [Category; 8] = [
        Category::Food,
        Category::Travel,
        Category::Shopping,
        Category::Entertainment,
        Category::Utilities,
        Category::Healthcare,
        Category::Education,
        Category::Other,
    ];

    /// Display name of the category
    pub fn as_str(&self) -> &str {
        match self {
            Category::Food => "Food",
            Category::Travel => "Travel",
            Category::Shopping => "Shopping",
            Category::Entertainment => "Entertainment",
            Category::Utilities => "Utilities",
            Category::Healthcare => "Healthcare",
            Category::Education => "Education",
            Category::Other => "Other",
            Category::Custom(name) => name,
        }
    }

    /// Whether this is free text outside the known set
    pub fn is_custom(&self) -> bool {
        matches!(self, Category::Custom(_))
    }
}

impl From<&str> for Category {
    fn from(s: &str) -> Self {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "food" => Category::Food,
            "travel" => Category::Travel,
            "shopping" => Category::Shopping,
            "entertainment" => Category::Entertainment,
            "utilities" => Category::Utilities,
            "healthcare" => Category::Healthcare,
            "education" => Category::Education,
            "other" => Category::Other,
            _ => Category::Custom(trimmed.to_string()),
        }
    }
}

impl From<String> for Category {
    fn from(s: String) -> Self {
        Category::from(s.as_str())
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        match category {
            Category::Custom(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_categories_case_insensitive() {
        assert_eq!(Category::from("food"), Category::Food);
        assert_eq!(Category::from("  HEALTHCARE "), Category::Healthcare);
        assert_eq!(Category::from("Other"), Category::Other);
    }

    #[test]
    fn test_free_text_is_tolerated() {
        let category = Category::from(" Pet supplies ");
        assert_eq!(category, Category::Custom("Pet supplies".to_string()));
        assert!(category.is_custom());
        assert_eq!(category.to_string(), "Pet supplies");
    }

    #[test]
    fn test_known_round_trip_through_string() {
        for category in Category::KNOWN {
            let name: String = category.clone().into();
            assert_eq!(Category::from(name), category);
        }
    }

    #[test]
    fn test_serde_as_plain_string() {
        let json = serde_json::to_string(&Category::Travel).unwrap();
        assert_eq!(json, "\"Travel\"");

        let parsed: Category = serde_json::from_str("\"Gifts\"").unwrap();
        assert_eq!(parsed, Category::Custom("Gifts".to_string()));
    }
}
