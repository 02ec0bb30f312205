use crate::prelude::*;

pub mod from_json;
pub mod to_json;

pub use from_json::FromJsonOptions;
pub use to_json::ToJsonOptions;

#[derive(Debug, clap::Parser)]
#[command(name = "xml")]
#[command(about = "JSON <-> XML structural conversion")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Serialize a single-root JSON object as XML
    #[clap(name = "from-json")]
    FromJson(FromJsonOptions),

    /// Parse XML into the @attributes / #text JSON shape
    #[clap(name = "to-json")]
    ToJson(ToJsonOptions),
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    match app.command {
        Commands::FromJson(options) => from_json::run(options, global).await,
        Commands::ToJson(options) => to_json::run(options, global).await,
    }
}
