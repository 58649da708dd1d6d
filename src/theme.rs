use crate::config::{ThemeExtend, TokenValue};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The consumer-side design-token set a descriptor extends.
///
/// Seeded with the stock Tailwind defaults for the categories the
/// descriptor is likely to touch. Categories absent here are created on
/// demand when an extension names them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Theme {
    pub categories: IndexMap<String, IndexMap<String, TokenValue>>,
}

impl Default for Theme {
    fn default() -> Self {
        let mut categories = IndexMap::new();

        let mut colors = IndexMap::new();
        colors.insert("transparent".to_string(), TokenValue::from("transparent"));
        colors.insert("current".to_string(), TokenValue::from("currentColor"));
        colors.insert("black".to_string(), TokenValue::from("#000"));
        colors.insert("white".to_string(), TokenValue::from("#fff"));
        categories.insert("colors".to_string(), colors);

        let mut font_family = IndexMap::new();
        font_family.insert(
            "sans".to_string(),
            vec![
                "ui-sans-serif",
                "system-ui",
                "sans-serif",
                "Apple Color Emoji",
                "Segoe UI Emoji",
                "Segoe UI Symbol",
                "Noto Color Emoji",
            ]
            .into(),
        );
        font_family.insert(
            "serif".to_string(),
            vec!["ui-serif", "Georgia", "Cambria", "Times New Roman", "Times", "serif"].into(),
        );
        font_family.insert(
            "mono".to_string(),
            vec![
                "ui-monospace",
                "SFMono-Regular",
                "Menlo",
                "Monaco",
                "Consolas",
                "Liberation Mono",
                "Courier New",
                "monospace",
            ]
            .into(),
        );
        categories.insert("fontFamily".to_string(), font_family);

        Self { categories }
    }
}

impl Theme {
    /// An empty theme with no built-in tokens
    pub fn empty() -> Self {
        Self {
            categories: IndexMap::new(),
        }
    }

    /// Merge theme extensions into this theme.
    ///
    /// Extension, not replacement: each category/token pair present in the
    /// extension overrides or inserts that one token. Tokens the extension
    /// does not name keep their built-in values, as do whole categories it
    /// never mentions.
    pub fn apply_extend(&mut self, extend: &ThemeExtend) {
        for (category, tokens) in extend {
            let target = self.categories.entry(category.clone()).or_default();
            for (token, value) in tokens {
                target.insert(token.clone(), value.clone());
            }
        }
    }

    /// Resolve a token to its value after merging
    pub fn resolve(&self, category: &str, token: &str) -> Option<&TokenValue> {
        self.categories.get(category)?.get(token)
    }

    /// Total number of tokens across all categories
    pub fn token_count(&self) -> usize {
        self.categories.values().map(|tokens| tokens.len()).sum()
    }
}
