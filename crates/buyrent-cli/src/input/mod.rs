pub mod file;
pub mod stdin;

use serde::de::DeserializeOwned;

/// Resolve command input: `--input` file first, then piped stdin.
/// `Ok(None)` means neither was given and the caller should use flags.
pub fn read_structured<T: DeserializeOwned>(
    path: Option<&str>,
) -> Result<Option<T>, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        tracing::debug!(path, "reading input file");
        return Ok(Some(file::read_input(path)?));
    }
    if let Some(data) = stdin::read_stdin()? {
        tracing::debug!("reading input from stdin");
        return Ok(Some(serde_json::from_value(data)?));
    }
    Ok(None)
}
