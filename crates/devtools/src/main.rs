#![allow(unused)]

use crate::prelude::*;
use clap::Parser;

mod codegen;
mod config;
mod csv;
mod diff;
mod encode;
mod error;
mod files;
mod prelude;
mod units;
mod xml;
mod yaml;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Developer utilities for everyday format conversions"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Whether to display additional information.
    #[clap(long, env = "DEVTOOLS_VERBOSE", global = true, default_value = "false")]
    verbose: bool,

    /// Disable colored output regardless of the configured theme.
    #[clap(long, global = true, default_value = "false")]
    no_color: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// JSON <-> CSV structural conversion
    Csv(crate::csv::App),

    /// JSON <-> XML structural conversion
    Xml(crate::xml::App),

    /// Generate typed classes from example JSON
    Codegen(crate::codegen::App),

    /// YAML <-> JSON conversion through the remote backend
    Yaml(crate::yaml::App),

    /// Express a value in every unit of a family
    Units(crate::units::App),

    /// Chunked line diff between two files
    Diff(crate::diff::App),

    /// Encode and decode Base64 and URL strings
    Encode(crate::encode::App),

    /// Show and change persisted preferences
    Config(crate::config::App),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    let preferences = config::load_preferences();
    config::set_active_theme(preferences.theme);
    if app.global.no_color {
        colored::control::set_override(false);
    }

    let tool = match &app.command {
        SubCommands::Csv(_) => "csv",
        SubCommands::Xml(_) => "xml",
        SubCommands::Codegen(_) => "codegen",
        SubCommands::Yaml(_) => "yaml",
        SubCommands::Units(_) => "units",
        SubCommands::Diff(_) => "diff",
        SubCommands::Encode(_) => "encode",
        SubCommands::Config(_) => "config",
    };

    let result = match app.command {
        SubCommands::Csv(sub_app) => crate::csv::run(sub_app, app.global).await,
        SubCommands::Xml(sub_app) => crate::xml::run(sub_app, app.global).await,
        SubCommands::Codegen(sub_app) => crate::codegen::run(sub_app, app.global).await,
        SubCommands::Yaml(sub_app) => crate::yaml::run(sub_app, app.global).await,
        SubCommands::Units(sub_app) => crate::units::run(sub_app, app.global).await,
        SubCommands::Diff(sub_app) => crate::diff::run(sub_app, app.global).await,
        SubCommands::Encode(sub_app) => crate::encode::run(sub_app, app.global).await,
        SubCommands::Config(sub_app) => crate::config::run(sub_app, app.global).await,
    };

    // Best-effort "most recently used tool" marker; failures are ignored.
    if result.is_ok() {
        config::remember_last_tool(tool);
    }

    result.map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
