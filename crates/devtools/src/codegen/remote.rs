use crate::files::{read_input, write_output};
use crate::prelude::{println, *};

use super::PydanticOptions;

/// Generate Pydantic models through the remote backend.
///
/// Request body is `{json_data, class_name}`; the backend answers `{result}`
/// or an error object with a `detail` field.
pub async fn run(options: PydanticOptions, global: crate::Global) -> Result<()> {
    let source = read_input(
        options.generate.text.as_deref(),
        options.generate.input.as_deref(),
    )?;
    if source.trim().is_empty() {
        return Err(eyre!(devtools_core::Error::EmptyInput));
    }

    let base = options.backend_url.trim_end_matches('/');
    let url = f!("{base}/convert/json-to-pydantic");
    if global.verbose {
        println!("Posting to {url}...");
    }

    let mut body = serde_json::Map::new();
    body.insert(
        "json_data".to_string(),
        serde_json::Value::String(source),
    );
    body.insert(
        "class_name".to_string(),
        serde_json::Value::String(options.generate.name.clone()),
    );

    let client = reqwest::Client::new();
    let response = client
        .post(&url)
        .json(&body)
        .send()
        .await
        .map_err(|e| eyre!(Error::Network(e.to_string())))?;

    let result = crate::yaml::read_backend_result(response).await?;
    write_output(&result, options.generate.output.as_deref())
}
