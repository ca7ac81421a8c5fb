use colored::Colorize;

use crate::error::Result;
use crate::expenses::sum_display_amounts;

pub fn run(amounts: &[String]) -> Result<()> {
    let totals = sum_display_amounts(amounts.iter().map(String::as_str))?;
    println!(
        "{}  {}",
        totals.count_label().bold(),
        totals.sum_display().green()
    );
    Ok(())
}
