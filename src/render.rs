use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use textwrap::core::display_width;

use crate::error::{ExpenseError, Result};
use crate::fmt::split_currency;
use crate::models::{Category, ExpenseRecord};
use crate::tui::{AMOUNT_STYLE, CURRENCY_SYMBOL_STYLE};

pub const REMOVE_ICON_PATH: &str = "../img/remove.svg";
pub const REMOVE_CONTROL: &str = " \u{2715} ";
/// Columns taken by the remove control at the right edge of each row.
pub const REMOVE_CONTROL_WIDTH: u16 = 3;
/// Drawn for a category without a known glyph, like a broken image.
pub const MISSING_GLYPH: &str = "?";

const CATEGORY_STYLE: Style = Style::new().fg(Color::DarkGray);
const REMOVE_STYLE: Style = Style::new().fg(Color::Red);

/// Icon asset path for a category: `../img/<category_id>.svg`.
pub fn icon_path(category_id: &str) -> String {
    format!("../img/{category_id}.svg")
}

/// Everything a list row shows, resolved once when the row is added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedRow {
    pub icon: String,
    pub description: String,
    pub category_name: String,
    pub symbol: String,
    pub number: String,
}

/// Build the visible row for a record. Fails without side effects when the
/// record cannot be shown.
pub fn render_row(record: &ExpenseRecord, categories: &[Category]) -> Result<RenderedRow> {
    if record.description.chars().any(char::is_control) {
        return Err(ExpenseError::Render(format!(
            "description of expense {} contains control characters",
            record.id
        )));
    }

    let (symbol, number) = split_currency(record.amount.display()).ok_or_else(|| {
        ExpenseError::Render(format!(
            "amount {:?} of expense {} has no currency symbol",
            record.amount.display(),
            record.id
        ))
    })?;

    let icon = categories
        .iter()
        .find(|c| c.id == record.category_id && !c.glyph.is_empty())
        .map(|c| c.glyph.clone())
        .unwrap_or_else(|| MISSING_GLYPH.to_string());

    Ok(RenderedRow {
        icon,
        description: record.description.clone(),
        category_name: record.category_name.clone(),
        symbol: symbol.to_string(),
        number: number.to_string(),
    })
}

impl RenderedRow {
    /// Lay the row out on one line of `width` columns: icon, description and
    /// category on the left, amount right-aligned, remove control last.
    pub fn to_line(&self, width: u16) -> Line<'static> {
        let width = width as usize;
        let icon = format!(" {} ", self.icon);
        let amount_width = display_width(&self.symbol) + 1 + display_width(&self.number);
        let fixed = display_width(&icon) + amount_width + REMOVE_CONTROL_WIDTH as usize + 1;
        let mut budget = width.saturating_sub(fixed);

        let description = truncate(&self.description, budget);
        budget = budget.saturating_sub(display_width(&description));

        let category = if self.category_name.is_empty() || budget < 3 {
            String::new()
        } else {
            truncate(&format!("  {}", self.category_name), budget)
        };
        budget = budget.saturating_sub(display_width(&category));

        Line::from(vec![
            Span::raw(icon),
            Span::raw(description),
            Span::styled(category, CATEGORY_STYLE),
            Span::raw(" ".repeat(budget + 1)),
            Span::styled(self.symbol.clone(), CURRENCY_SYMBOL_STYLE),
            Span::raw(" "),
            Span::styled(self.number.clone(), AMOUNT_STYLE),
            Span::styled(REMOVE_CONTROL, REMOVE_STYLE.add_modifier(Modifier::BOLD)),
        ])
    }
}

/// Cut `text` to at most `max` columns, marking the cut with an ellipsis.
fn truncate(text: &str, max: usize) -> String {
    if display_width(text) <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let mut buf = [0u8; 4];
        let w = display_width(c.encode_utf8(&mut buf));
        if used + w > max - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('\u{2026}');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Amount;

    fn categories() -> Vec<Category> {
        vec![
            Category::new("food", "Alimentação", "f"),
            Category::new("transport", "Transporte", "t"),
        ]
    }

    fn record(description: &str, category_id: &str, cents: i64) -> ExpenseRecord {
        ExpenseRecord {
            id: 1,
            description: description.to_string(),
            category_id: category_id.to_string(),
            category_name: "Alimentação".to_string(),
            amount: Amount::from_cents(cents),
            created_at: "19/10/2026, 12:00:00".to_string(),
        }
    }

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_icon_path() {
        assert_eq!(icon_path("food"), "../img/food.svg");
        assert_eq!(icon_path(""), "../img/.svg");
    }

    #[test]
    fn test_render_row_splits_amount() {
        let row = render_row(&record("Lunch", "food", 1500), &categories()).unwrap();
        assert_eq!(row.icon, "f");
        assert_eq!(row.symbol, "R$");
        assert_eq!(row.number, "15,00");
    }

    #[test]
    fn test_unknown_category_gets_missing_glyph() {
        let row = render_row(&record("Lunch", "pets", 100), &categories()).unwrap();
        assert_eq!(row.icon, MISSING_GLYPH);
    }

    #[test]
    fn test_control_characters_fail_render() {
        let err = render_row(&record("a\u{7}b", "food", 100), &categories()).unwrap_err();
        assert!(matches!(err, ExpenseError::Render(_)));
    }

    #[test]
    fn test_amount_without_symbol_fails_render() {
        let mut rec = record("Lunch", "food", 100);
        rec.amount = Amount::from_display("1,00").unwrap();
        assert!(render_row(&rec, &categories()).is_err());
    }

    #[test]
    fn test_line_fills_width_and_ends_with_remove_control() {
        let row = render_row(&record("Lunch", "food", 1500), &categories()).unwrap();
        let text = line_text(&row.to_line(50));
        assert_eq!(display_width(&text), 50);
        assert!(text.starts_with(" f Lunch  Alimentação"));
        assert!(text.ends_with("R$ 15,00 \u{2715} "));
    }

    #[test]
    fn test_long_description_is_truncated() {
        let long = "x".repeat(100);
        let row = render_row(&record(&long, "food", 1500), &categories()).unwrap();
        let text = line_text(&row.to_line(40));
        assert_eq!(display_width(&text), 40);
        assert!(text.contains('\u{2026}'));
        assert!(text.ends_with("R$ 15,00 \u{2715} "));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("abc", 5), "abc");
        assert_eq!(truncate("abcdef", 4), "abc\u{2026}");
        assert_eq!(truncate("abc", 0), "");
    }
}
