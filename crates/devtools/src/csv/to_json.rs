use crate::files::{read_input, write_output};
use crate::prelude::{println, *};
use std::path::PathBuf;

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct ToJsonOptions {
    /// CSV text to convert; falls back to --input or stdin
    #[arg(value_name = "CSV")]
    pub text: Option<String>,

    /// Read the CSV from a file instead
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Write the JSON to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Separator that joined nested keys into column names
    #[arg(short, long, env = "DEVTOOLS_CSV_SEPARATOR", default_value = "_")]
    pub separator: String,

    /// Pretty-print the JSON output
    #[arg(short, long)]
    pub pretty: bool,
}

pub async fn run(options: ToJsonOptions, global: crate::Global) -> Result<()> {
    if global.verbose {
        println!("Rebuilding JSON with separator {:?}...", options.separator);
    }

    let source = read_input(options.text.as_deref(), options.input.as_deref())?;
    let value = devtools_core::jsoncsv::csv_to_json(&source, &options.separator)
        .map_err(|e| eyre!(e))?;

    let json_text = if options.pretty {
        serde_json::to_string_pretty(&value)?
    } else {
        serde_json::to_string(&value)?
    };

    write_output(&json_text, options.output.as_deref())
}
