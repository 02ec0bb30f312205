use clap::{CommandFactory, Parser};
use color_eyre::eyre::Result;

mod cli;
mod scripts;

fn main() -> Result<()> {
    color_eyre::install()?;

    let app = cli::App::parse();

    match app.command {
        Some(cli::Commands::Install(args)) => scripts::install(&args),
        Some(cli::Commands::Release(args)) => scripts::release::release(&args),
        None => {
            cli::App::command().print_help()?;
            Ok(())
        }
    }
}
