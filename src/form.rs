use tracing::debug;

use crate::expenses::Submission;
use crate::fmt::{cents_from_input, format_input, significant_digits, MAX_AMOUNT_DIGITS};
use crate::models::{Amount, Category};

/// Amount field that reformats itself as currency on every keystroke.
#[derive(Debug, Default, Clone)]
pub struct AmountField {
    text: String,
}

impl AmountField {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Append a typed character and reformat. Non-digits vanish in the
    /// reformat; digits beyond `MAX_AMOUNT_DIGITS` are refused.
    pub fn input(&mut self, c: char) {
        let raw = format!("{}{c}", self.text);
        if significant_digits(&raw) > MAX_AMOUNT_DIGITS {
            return;
        }
        self.reformat(&raw);
    }

    pub fn backspace(&mut self) {
        if self.text.is_empty() {
            return;
        }
        let mut raw = self.text.clone();
        raw.pop();
        self.reformat(&raw);
    }

    pub fn amount(&self) -> Amount {
        Amount::from_cents(cents_from_input(&self.text))
    }

    fn reformat(&mut self, raw: &str) {
        self.text = format_input(raw);
        debug!(raw, formatted = %self.text, "amount field reformatted");
    }
}

#[derive(Debug, Default, Clone)]
pub struct ExpenseForm {
    pub amount: AmountField,
    pub description: String,
    /// Index into the category list; `None` is the unselected placeholder.
    pub category: Option<usize>,
}

impl ExpenseForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cycle placeholder -> first -> ... -> last -> placeholder.
    pub fn next_category(&mut self, count: usize) {
        self.category = match self.category {
            _ if count == 0 => None,
            None => Some(0),
            Some(i) if i + 1 < count => Some(i + 1),
            Some(_) => None,
        };
    }

    pub fn prev_category(&mut self, count: usize) {
        self.category = match self.category {
            _ if count == 0 => None,
            None => Some(count - 1),
            Some(0) => None,
            Some(i) => Some(i - 1),
        };
    }

    pub fn selected_category<'a>(&self, categories: &'a [Category]) -> Option<&'a Category> {
        self.category.and_then(|i| categories.get(i))
    }

    /// Read the fields as they are. An unselected category submits empty
    /// id and label; an empty amount submits as zero.
    pub fn submission(&self, categories: &[Category]) -> Submission {
        let (category_id, category_name) = match self.selected_category(categories) {
            Some(c) => (c.id.clone(), c.name.clone()),
            None => (String::new(), String::new()),
        };
        Submission {
            description: self.description.clone(),
            category_id,
            category_name,
            amount: self.amount.amount(),
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
