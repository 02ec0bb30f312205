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

    /// Write the CSV to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Separator joining nested keys into column names
    #[arg(short, long, env = "DEVTOOLS_CSV_SEPARATOR", default_value = "_")]
    pub separator: String,
}

pub async fn run(options: FromJsonOptions, global: crate::Global) -> Result<()> {
    if global.verbose {
        println!("Flattening JSON with separator {:?}...", options.separator);
    }

    let source = read_input(options.text.as_deref(), options.input.as_deref())?;
    let csv_text = devtools_core::jsoncsv::json_to_csv(&source, &options.separator)
        .map_err(|e| eyre!(e))?;

    write_output(&csv_text, options.output.as_deref())
}
