use serde::de::DeserializeOwned;
use std::io::{self, Read};

/// Deserialize JSON piped on stdin.
///
/// Returns None when stdin is a TTY or the pipe is empty, so callers fall
/// back to command-line flags.
pub fn read_stdin<T: DeserializeOwned>() -> Result<Option<T>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;

    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let value: T = serde_json::from_str(trimmed)
        .map_err(|e| format!("Failed to parse stdin as JSON: {e}"))?;
    Ok(Some(value))
}
