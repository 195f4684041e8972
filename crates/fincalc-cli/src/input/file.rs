use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

/// Read and deserialise a JSON input file.
pub fn read_json<T: DeserializeOwned>(path: &str) -> Result<T, Box<dyn std::error::Error>> {
    let resolved = resolve_path(path)?;
    let contents = fs::read_to_string(&resolved)
        .map_err(|e| format!("Failed to read '{}': {e}", resolved.display()))?;
    let parsed = serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse '{}': {e}", resolved.display()))?;
    Ok(parsed)
}

/// Resolve relative paths against the working directory; the file must exist.
fn resolve_path(path: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let candidate = Path::new(path);
    let resolved = if candidate.is_absolute() {
        candidate.to_path_buf()
    } else {
        std::env::current_dir()?.join(candidate)
    };

    if !resolved.is_file() {
        return Err(format!("Input file not found: {}", resolved.display()).into());
    }

    Ok(resolved)
}
