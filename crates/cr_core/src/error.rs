use std::fmt;

#[derive(Debug)]
pub enum EngineError {
    UnknownActivity(String),
    UnknownRaceType(String),
    UnsupportedSchemaVersion { found: u8, expected: u8 },
    InvalidRequest(String),
    SerializationError(String),
    DeserializationError(String),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EngineError::UnknownActivity(id) => {
                write!(f, "Unknown activity: {}", id)
            }
            EngineError::UnknownRaceType(race_type) => {
                write!(f, "Unknown race type: {}", race_type)
            }
            EngineError::UnsupportedSchemaVersion { found, expected } => {
                write!(f, "Unsupported schema version: found {}, expected {}", found, expected)
            }
            EngineError::InvalidRequest(msg) => {
                write!(f, "Invalid request: {}", msg)
            }
            EngineError::SerializationError(msg) => {
                write!(f, "Serialization error: {}", msg)
            }
            EngineError::DeserializationError(msg) => {
                write!(f, "Deserialization error: {}", msg)
            }
        }
    }
}

impl std::error::Error for EngineError {}

impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_data() {
            EngineError::DeserializationError(err.to_string())
        } else {
            EngineError::SerializationError(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
