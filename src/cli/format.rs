use crate::error::Result;
use crate::fmt::format_input;

pub fn run(input: &str) -> Result<()> {
    println!("{}", format_input(input));
    Ok(())
}
