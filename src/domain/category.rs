//! The closed set of expense categories.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Categorises an expense. The set is closed; the serialized form is the
/// English variant name.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Market,
    Transport,
    Entertainment,
    Food,
    Clothing,
    Bill,
    Other,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Market,
        Category::Transport,
        Category::Entertainment,
        Category::Food,
        Category::Clothing,
        Category::Bill,
        Category::Other,
    ];

    /// Canonical (wire) name.
    pub fn name(&self) -> &'static str {
        match self {
            Category::Market => "Market",
            Category::Transport => "Transport",
            Category::Entertainment => "Entertainment",
            Category::Food => "Food",
            Category::Clothing => "Clothing",
            Category::Bill => "Bill",
            Category::Other => "Other",
        }
    }

    /// Display label for the given language tag.
    pub fn label(&self, language: &str) -> &'static str {
        if language == "tr" {
            match self {
                Category::Market => "Market",
                Category::Transport => "Ulaşım",
                Category::Entertainment => "Eğlence",
                Category::Food => "Yemek",
                Category::Clothing => "Giyim",
                Category::Bill => "Fatura",
                Category::Other => "Diğer",
            }
        } else {
            self.name()
        }
    }

    /// Emoji used by presentation layers.
    pub fn icon(&self) -> &'static str {
        match self {
            Category::Market => "🛒",
            Category::Transport => "🚗",
            Category::Entertainment => "🎮",
            Category::Food => "🍽️",
            Category::Clothing => "👔",
            Category::Bill => "💡",
            Category::Other => "📌",
        }
    }

    /// Color name used by presentation layers.
    pub fn color(&self) -> &'static str {
        match self {
            Category::Market => "green",
            Category::Transport => "blue",
            Category::Entertainment => "orange",
            Category::Food => "red",
            Category::Clothing => "black",
            Category::Bill => "purple",
            Category::Other => "gray",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let needle = value.trim();
        Category::ALL
            .iter()
            .find(|category| category.name().eq_ignore_ascii_case(needle))
            .copied()
            .ok_or_else(|| format!("unknown category `{}`", value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_canonical_names_case_insensitively() {
        assert_eq!("transport".parse::<Category>().unwrap(), Category::Transport);
        assert_eq!("BILL".parse::<Category>().unwrap(), Category::Bill);
        assert!("groceries".parse::<Category>().is_err());
    }

    #[test]
    fn serializes_as_variant_name() {
        let json = serde_json::to_string(&Category::Entertainment).unwrap();
        assert_eq!(json, "\"Entertainment\"");
    }

    #[test]
    fn turkish_labels_cover_every_category() {
        for category in Category::ALL {
            assert!(!category.label("tr").is_empty());
        }
    }
}
