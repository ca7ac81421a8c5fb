mod app;
mod cli;
mod error;
mod expenses;
mod fmt;
mod form;
mod logging;
mod models;
mod render;
mod settings;
mod tui;

use clap::Parser;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    let settings = settings::load_settings(cli.settings.as_deref());

    let result = match cli.command {
        None => app::run(settings),
        Some(Commands::Format { input }) => cli::format::run(&input),
        Some(Commands::Total { amounts }) => cli::total::run(&amounts),
        Some(Commands::Categories) => cli::categories::run(&settings),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
