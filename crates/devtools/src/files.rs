//! Shared input/output plumbing for the tool modules.
//!
//! Every converter accepts its input as a positional argument, an `--input`
//! file, or stdin, and writes its result to stdout or an `--output` file.

use crate::prelude::{println, *};
use std::fs;
use std::io::Read;
use std::path::Path;

pub fn read_input(inline: Option<&str>, input: Option<&Path>) -> Result<String> {
    if let Some(path) = input {
        return fs::read_to_string(path)
            .map_err(|e| eyre!("Failed to read {}: {}", path.display(), e));
    }
    if let Some(text) = inline {
        return Ok(text.to_string());
    }
    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .map_err(|e| eyre!("Failed to read stdin: {}", e))?;
    Ok(buffer)
}

pub fn write_output(result: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, result)
                .map_err(|e| eyre!("Failed to write {}: {}", path.display(), e))?;
            println!("Saved to {}", path.display());
        }
        None => println!("{result}"),
    }
    Ok(())
}
