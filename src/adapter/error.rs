use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdapterError {
    #[error("Diff section starting at line {line} has no file path")]
    MissingPath { line: usize },

    #[error("Failed to decode record list: {0}")]
    Decode(#[from] serde_json::Error),
}
