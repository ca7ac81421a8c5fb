use chrono::{DateTime, Local};

use crate::error::{ExpenseError, Result};
use crate::fmt::format_currency;
use crate::models::{Amount, Category, ExpenseRecord};
use crate::render::{render_row, RenderedRow};

/// pt-BR date-time, as in `19/10/2026, 14:03:05`.
pub const CREATED_AT_FORMAT: &str = "%d/%m/%Y, %H:%M:%S";

/// Values read from the form at submission time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub description: String,
    pub category_id: String,
    pub category_name: String,
    pub amount: Amount,
}

/// Stamps submissions with an id and creation time.
#[derive(Debug, Default)]
pub struct EntryBuilder {
    last_id: i64,
}

impl EntryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ids are the creation time in milliseconds, bumped past the previous id
    /// when two entries land in the same millisecond.
    pub fn build(&mut self, submission: Submission, now: DateTime<Local>) -> ExpenseRecord {
        let id = now.timestamp_millis().max(self.last_id + 1);
        self.last_id = id;
        ExpenseRecord {
            id,
            description: submission.description,
            category_id: submission.category_id,
            category_name: submission.category_name,
            amount: submission.amount,
            created_at: now.format(CREATED_AT_FORMAT).to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    pub count: usize,
    pub sum_cents: i64,
}

impl Totals {
    pub fn count_label(&self) -> String {
        count_label(self.count)
    }

    pub fn sum_display(&self) -> String {
        format_currency(self.sum_cents)
    }
}

/// "1 despesa", otherwise "<n> despesas".
pub fn count_label(count: usize) -> String {
    if count == 1 {
        "1 despesa".to_string()
    } else {
        format!("{count} despesas")
    }
}

/// Total a list of displayed amounts such as `R$ 15,00`. The first amount
/// that does not parse aborts the whole computation.
pub fn sum_display_amounts<'a, I>(texts: I) -> Result<Totals>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut totals = Totals::default();
    for text in texts {
        let amount = Amount::from_display(text)?;
        totals.sum_cents = totals
            .sum_cents
            .checked_add(amount.cents())
            .ok_or_else(|| ExpenseError::Aggregation(format!("total overflows at {text:?}")))?;
        totals.count += 1;
    }
    Ok(totals)
}

#[derive(Debug, Clone)]
pub struct ListRow {
    pub record: ExpenseRecord,
    pub view: RenderedRow,
}

/// The visible expense rows, oldest first.
#[derive(Debug, Default)]
pub struct ExpenseList {
    rows: Vec<ListRow>,
}

impl ExpenseList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render `record` and append it. When rendering fails nothing is added.
    pub fn append(&mut self, record: ExpenseRecord, categories: &[Category]) -> Result<()> {
        let view = render_row(&record, categories)?;
        self.rows.push(ListRow { record, view });
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Option<ExpenseRecord> {
        if index < self.rows.len() {
            Some(self.rows.remove(index).record)
        } else {
            None
        }
    }

    pub fn rows(&self) -> &[ListRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn totals(&self) -> Result<Totals> {
        let mut sum_cents: i64 = 0;
        for row in &self.rows {
            sum_cents = sum_cents
                .checked_add(row.record.amount.cents())
                .ok_or_else(|| {
                    ExpenseError::Aggregation(format!(
                        "total overflows at expense {}",
                        row.record.id
                    ))
                })?;
        }
        Ok(Totals {
            count: self.rows.len(),
            sum_cents,
        })
    }
}
