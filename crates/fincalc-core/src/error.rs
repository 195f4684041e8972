use thiserror::Error;

#[derive(Debug, Error)]
pub enum FinCalcError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("HTTP error {status} while {context}")]
    Http { context: String, status: u16 },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Ticker {0} not found in the SEC company directory")]
    TickerNotFound(String),

    #[error("No {form} filings found for {year}")]
    NoMatchingFiling { form: String, year: String },

    #[error("Browser launch failed: {0}")]
    Browser(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for FinCalcError {
    fn from(e: serde_json::Error) -> Self {
        FinCalcError::SerializationError(e.to_string())
    }
}

#[cfg(feature = "edgar")]
impl From<reqwest::Error> for FinCalcError {
    fn from(e: reqwest::Error) -> Self {
        FinCalcError::Network(e.to_string())
    }
}
