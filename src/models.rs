use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::fmt::{display_to_cents, format_currency};

/// One option of the category selector. `id` doubles as the icon asset name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    /// Single-column symbol drawn in place of the icon image.
    #[serde(default)]
    pub glyph: String,
}

impl Category {
    pub fn new(id: &str, name: &str, glyph: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            glyph: glyph.to_string(),
        }
    }
}

/// A money amount kept both as cents and as the text shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Amount {
    cents: i64,
    display: String,
}

impl Amount {
    pub fn from_cents(cents: i64) -> Self {
        Self {
            cents,
            display: format_currency(cents),
        }
    }

    /// Build from already formatted text, e.g. `R$ 15,00`.
    pub fn from_display(text: &str) -> Result<Self> {
        let cents = display_to_cents(text)?;
        Ok(Self {
            cents,
            display: text.to_string(),
        })
    }

    pub fn cents(&self) -> i64 {
        self.cents
    }

    pub fn display(&self) -> &str {
        &self.display
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseRecord {
    /// Millisecond timestamp of creation. Only a uniqueness token.
    pub id: i64,
    pub description: String,
    pub category_id: String,
    pub category_name: String,
    pub amount: Amount,
    pub created_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_from_cents_formats() {
        let amount = Amount::from_cents(1500);
        assert_eq!(amount.cents(), 1500);
        assert_eq!(amount.display(), "R$ 15,00");
    }

    #[test]
    fn test_amount_from_display_keeps_text() {
        let amount = Amount::from_display("R$ 5,50").unwrap();
        assert_eq!(amount.cents(), 550);
        assert_eq!(amount.display(), "R$ 5,50");
    }

    #[test]
    fn test_amount_from_display_rejects_garbage() {
        assert!(Amount::from_display("cinco reais").is_err());
    }

    #[test]
    fn test_category_glyph_defaults_to_empty() {
        let cat: Category = serde_json::from_str(r#"{"id": "food", "name": "Alimentação"}"#).unwrap();
        assert_eq!(cat.id, "food");
        assert!(cat.glyph.is_empty());
    }
}
