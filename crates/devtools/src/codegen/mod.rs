use crate::files::{read_input, write_output};
use crate::prelude::{println, *};
use std::path::PathBuf;

pub mod remote;

#[derive(Debug, clap::Parser)]
#[command(name = "codegen")]
#[command(about = "Generate typed classes from example JSON")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Emit TypeScript interfaces
    #[clap(name = "typescript", alias = "ts")]
    Typescript(GenerateOptions),

    /// Emit Python dataclasses
    #[clap(name = "python", alias = "py")]
    Python(GenerateOptions),

    /// Emit Pydantic models
    #[clap(name = "pydantic")]
    Pydantic(PydanticOptions),
}

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct GenerateOptions {
    /// Example JSON to infer types from; falls back to --input or stdin
    #[arg(value_name = "JSON")]
    pub text: Option<String>,

    /// Name of the generated root type
    #[arg(short, long, default_value = "Root")]
    pub name: String,

    /// Read the JSON from a file instead
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Write the generated code to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct PydanticOptions {
    #[clap(flatten)]
    pub generate: GenerateOptions,

    /// Generate through the remote backend instead of locally
    #[arg(long)]
    pub remote: bool,

    /// Backend base URL
    #[arg(long, env = "DEVTOOLS_BACKEND_URL", default_value = "http://localhost:8000")]
    pub backend_url: String,
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    match app.command {
        Commands::Typescript(options) => {
            generate(options, global, devtools_core::codegen::typescript::generate).await
        }
        Commands::Python(options) => {
            generate(options, global, devtools_core::codegen::python::generate_dataclass).await
        }
        Commands::Pydantic(options) => {
            if options.remote {
                remote::run(options, global).await
            } else {
                generate(
                    options.generate,
                    global,
                    devtools_core::codegen::python::generate_pydantic,
                )
                .await
            }
        }
    }
}

async fn generate(
    options: GenerateOptions,
    global: crate::Global,
    generator: fn(&serde_json::Value, &str) -> Result<String, devtools_core::Error>,
) -> Result<()> {
    if global.verbose {
        println!("Generating {} from example JSON...", options.name);
    }

    let source = read_input(options.text.as_deref(), options.input.as_deref())?;
    let trimmed = source.trim();
    if trimmed.is_empty() {
        return Err(eyre!(devtools_core::Error::EmptyInput));
    }
    let value: serde_json::Value =
        serde_json::from_str(trimmed).map_err(|e| eyre!("invalid JSON: {}", e))?;
    let code = generator(&value, &options.name).map_err(|e| eyre!(e))?;

    write_output(&code, options.output.as_deref())
}
