use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExpenseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Settings error: {0}")]
    Settings(String),

    /// A list row could not be built; the list is left as it was.
    #[error("Render error: {0}")]
    Render(String),

    /// Totals could not be recomputed; the previous totals stay on screen.
    #[error("Aggregation error: {0}")]
    Aggregation(String),
}

pub type Result<T> = std::result::Result<T, ExpenseError>;
