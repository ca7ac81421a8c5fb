pub mod categories;
pub mod format;
pub mod total;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "despesas",
    version,
    about = "Track expenses in a terminal form with a running count and total."
)]
pub struct Cli {
    /// Settings file (default: ~/.config/despesas/settings.json)
    #[arg(long, global = true)]
    pub settings: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Format raw amount input the way the amount field does: digits are cents.
    Format {
        /// Raw input, e.g. 1500
        input: String,
    },
    /// Count and total displayed amounts, e.g. "R$ 15,00" "R$ 5,50".
    Total {
        /// Amounts as displayed in the expense list
        #[arg(required = true)]
        amounts: Vec<String>,
    },
    /// List the configured categories and their icon assets.
    Categories,
}
