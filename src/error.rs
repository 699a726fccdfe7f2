use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeckAuditError {
    #[error("Presentation file not found: {path}")]
    InputNotFound { path: String },

    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read presentation package: {message}")]
    Package { message: String },

    #[error("Failed to parse slide content: {message}")]
    Parse { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Failed to serialize analysis output: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Cannot write to output directory: {path}")]
    OutputDirectory { path: String },
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for DeckAuditError {
    fn user_message(&self) -> String {
        match self {
            DeckAuditError::InputNotFound { path } => {
                format!("Presentation file not found: {}", path)
            }
            DeckAuditError::Package { message } => {
                format!("Could not read the presentation package: {}", message)
            }
            DeckAuditError::Parse { message } => {
                format!("Could not parse slide content: {}", message)
            }
            DeckAuditError::Config { message } => {
                format!("Configuration error: {}", message)
            }
            DeckAuditError::OutputDirectory { path } => {
                format!("Cannot write to output directory: {}", path)
            }
            _ => self.to_string(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            DeckAuditError::InputNotFound { .. } => Some(
                "Check that the path points to an existing .pptx file, or pass the path explicitly: deckaudit <path/to/deck.pptx>".to_string(),
            ),
            DeckAuditError::Package { .. } => Some(
                "The file may not be a PowerPoint (.pptx) document, or it may be corrupted. Legacy .ppt files are not supported.".to_string(),
            ),
            DeckAuditError::Parse { .. } => Some(
                "The presentation contains slide XML this tool could not read. Re-saving the deck in PowerPoint often repairs malformed parts.".to_string(),
            ),
            DeckAuditError::Config { .. } => Some(
                "Check your configuration file syntax and ensure all required fields are present.".to_string(),
            ),
            DeckAuditError::OutputDirectory { .. } => Some(
                "Ensure you have write permission for the output directory, or choose a different one with --output.".to_string(),
            ),
            _ => None,
        }
    }
}

impl From<zip::result::ZipError> for DeckAuditError {
    fn from(error: zip::result::ZipError) -> Self {
        DeckAuditError::Package {
            message: error.to_string(),
        }
    }
}

impl From<quick_xml::Error> for DeckAuditError {
    fn from(error: quick_xml::Error) -> Self {
        DeckAuditError::Parse {
            message: error.to_string(),
        }
    }
}

impl From<toml::de::Error> for DeckAuditError {
    fn from(error: toml::de::Error) -> Self {
        DeckAuditError::Config {
            message: error.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DeckAuditError>;
