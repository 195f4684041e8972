use serde_json::Value;

/// Pretty-printed JSON, the default format. The envelope is emitted as-is
/// so callers can pick fields out with jq.
pub fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(rendered) => println!("{rendered}"),
        Err(e) => eprintln!("Could not render JSON output: {e}"),
    }
}
