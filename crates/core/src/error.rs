use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecipeError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Coarse classification callers use to map failures onto their own surface
/// (exit codes, HTTP statuses) without matching on every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    Io,
    Serialize,
}

impl RecipeError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        RecipeError::InvalidInput(msg.into())
    }

    /// Wrap an I/O failure, keeping the underlying error as the source.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        RecipeError::Io {
            context: context.into(),
            source,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            RecipeError::InvalidInput(_) => ErrorKind::InvalidInput,
            RecipeError::Io { .. } => ErrorKind::Io,
            RecipeError::Json(_) => ErrorKind::Serialize,
        }
    }
}

pub type Result<T> = std::result::Result<T, RecipeError>;
