use crate::files::{read_input, write_output};
use crate::prelude::{println, *};
use std::path::PathBuf;

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct FromJsonOptions {
    /// JSON text to convert; falls back to --input or stdin
    #[arg(value_name = "JSON")]
    pub text: Option<String>,

    /// Read the JSON from a file instead
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Write the XML to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub async fn run(options: FromJsonOptions, global: crate::Global) -> Result<()> {
    if global.verbose {
        println!("Serializing JSON as XML...");
    }

    let source = read_input(options.text.as_deref(), options.input.as_deref())?;
    let trimmed = source.trim();
    if trimmed.is_empty() {
        return Err(eyre!(devtools_core::Error::EmptyInput));
    }
    let value: serde_json::Value =
        serde_json::from_str(trimmed).map_err(|e| eyre!("invalid JSON: {}", e))?;
    let xml = devtools_core::jsonxml::json_to_xml(&value).map_err(|e| eyre!(e))?;

    write_output(xml.trim_end(), options.output.as_deref())
}
