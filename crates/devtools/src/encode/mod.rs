use crate::files::{read_input, write_output};
use crate::prelude::{println, *};
use std::path::PathBuf;

#[derive(Debug, clap::Parser)]
#[command(name = "encode")]
#[command(about = "Encode and decode Base64 and URL strings")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Base64 with the standard alphabet
    #[clap(name = "base64")]
    Base64(EncodeOptions),

    /// URL percent-encoding
    #[clap(name = "url")]
    Url(EncodeOptions),
}

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct EncodeOptions {
    /// Text to transform; falls back to --input or stdin
    #[arg(value_name = "TEXT")]
    pub text: Option<String>,

    /// Read the text from a file instead
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Write the result to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Decode instead of encode
    #[arg(short, long)]
    pub decode: bool,
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    use devtools_core::encode::{base64_decode, base64_encode, url_decode, url_encode};

    match app.command {
        Commands::Base64(options) => {
            let codec = if options.decode { base64_decode } else { base64_encode };
            transform(options, global, "base64", codec)
        }
        Commands::Url(options) => {
            let codec = if options.decode { url_decode } else { url_encode };
            transform(options, global, "url", codec)
        }
    }
}

fn transform(
    options: EncodeOptions,
    global: crate::Global,
    kind: &str,
    codec: fn(&str) -> Result<String, devtools_core::Error>,
) -> Result<()> {
    if global.verbose {
        let direction = if options.decode { "Decoding" } else { "Encoding" };
        println!("{direction} {kind}...");
    }

    let source = read_input(options.text.as_deref(), options.input.as_deref())?;
    let result = codec(&source).map_err(|e| eyre!(e))?;

    write_output(&result, options.output.as_deref())
}
