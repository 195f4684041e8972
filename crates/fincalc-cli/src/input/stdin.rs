use serde_json::Value;
use std::io::{self, Read};

/// JSON piped into the command, if any. Interactive runs (stdin is a TTY)
/// and empty pipes both read as `None` so flag parsing takes over.
pub fn read_stdin() -> Result<Option<Value>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut piped = String::new();
    io::stdin().read_to_string(&mut piped)?;
    let piped = piped.trim();
    if piped.is_empty() {
        return Ok(None);
    }

    let value =
        serde_json::from_str(piped).map_err(|e| format!("Piped input is not valid JSON: {e}"))?;
    Ok(Some(value))
}
