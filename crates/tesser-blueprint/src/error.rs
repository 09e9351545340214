use tesser_snbt::ParseError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BlueprintError {
    #[error("Failed to parse structure text: {0}")]
    Parse(#[from] ParseError),
    #[error("Malformed structure: {0}")]
    MalformedStructure(String),
    #[error("Failed to parse convert options RON: {0}")]
    OptionsParseError(String),
}
