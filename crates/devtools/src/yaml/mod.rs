//! Thin client for the opaque conversion backend.
//!
//! The backend is an external collaborator with a JSON request/response
//! contract per endpoint; nothing is converted locally here. A failed call
//! surfaces the backend's `detail` field or the transport error and stops -
//! no retries.

use crate::files::{read_input, write_output};
use crate::prelude::{println, *};
use std::path::PathBuf;

#[derive(Debug, clap::Parser)]
#[command(name = "yaml")]
#[command(about = "YAML <-> JSON conversion through the remote backend")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Convert YAML text to JSON
    #[clap(name = "to-json")]
    ToJson(ConvertOptions),

    /// Convert JSON text to YAML
    #[clap(name = "from-json")]
    FromJson(ConvertOptions),
}

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct ConvertOptions {
    /// Text to convert; falls back to --input, --upload, or stdin
    #[arg(value_name = "TEXT")]
    pub text: Option<String>,

    /// Read the text from a file instead
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Send a file through the backend's multipart upload endpoint
    #[arg(short, long)]
    pub upload: Option<PathBuf>,

    /// Write the result to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Backend base URL
    #[arg(long, env = "DEVTOOLS_BACKEND_URL", default_value = "http://localhost:8000")]
    pub backend_url: String,
}

struct Endpoint {
    path: &'static str,
    body_key: &'static str,
}

const YAML_TO_JSON: Endpoint = Endpoint {
    path: "/convert/yaml-to-json",
    body_key: "yaml_text",
};

const JSON_TO_YAML: Endpoint = Endpoint {
    path: "/convert/json-to-yaml",
    body_key: "json_text",
};

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    match app.command {
        Commands::ToJson(options) => convert(options, global, YAML_TO_JSON).await,
        Commands::FromJson(options) => convert(options, global, JSON_TO_YAML).await,
    }
}

async fn convert(options: ConvertOptions, global: crate::Global, endpoint: Endpoint) -> Result<()> {
    let client = reqwest::Client::new();
    let base = options.backend_url.trim_end_matches('/').to_string();

    let response = if let Some(path) = &options.upload {
        let url = f!("{base}{}/upload", endpoint.path);
        if global.verbose {
            println!("Uploading {} to {url}...", path.display());
        }
        let bytes = std::fs::read(path)
            .map_err(|e| eyre!("Failed to read {}: {}", path.display(), e))?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name);
        let form = reqwest::multipart::Form::new().part("file", part);
        client.post(&url).multipart(form).send().await
    } else {
        let text = read_input(options.text.as_deref(), options.input.as_deref())?;
        if text.trim().is_empty() {
            return Err(eyre!(devtools_core::Error::EmptyInput));
        }
        let url = f!("{base}{}", endpoint.path);
        if global.verbose {
            println!("Posting to {url}...");
        }
        let mut body = serde_json::Map::new();
        body.insert(
            endpoint.body_key.to_string(),
            serde_json::Value::String(text),
        );
        client.post(&url).json(&body).send().await
    }
    .map_err(|e| eyre!(Error::Network(e.to_string())))?;

    let result = read_backend_result(response).await?;
    write_output(&result, options.output.as_deref())
}

#[derive(serde::Deserialize)]
struct BackendResult {
    result: String,
}

#[derive(serde::Deserialize)]
struct BackendDetail {
    detail: Option<String>,
}

/// Unwrap the backend's `{result}` body, or surface its `detail` message.
pub async fn read_backend_result(response: reqwest::Response) -> Result<String> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| eyre!(Error::Network(e.to_string())))?;

    if !status.is_success() {
        let detail = serde_json::from_str::<BackendDetail>(&body)
            .ok()
            .and_then(|parsed| parsed.detail);
        let message = detail.unwrap_or_else(|| f!("HTTP {status}"));
        return Err(eyre!(Error::Backend(message)));
    }

    let parsed: BackendResult = serde_json::from_str(&body)
        .map_err(|e| eyre!("Unexpected backend response: {}", e))?;
    Ok(parsed.result)
}
