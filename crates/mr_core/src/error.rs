use thiserror::Error;

#[derive(Error, Debug)]
pub enum FixError {
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("Malformed match score: '{0}'")]
    MalformedScore(String),

    #[error("Row has {found} cells, header has {expected}")]
    RowLength { expected: usize, found: usize },

    #[error("Duplicate column in header: {0}")]
    DuplicateColumn(String),
}

impl FixError {
    /// Whether the pass can continue after this error (skip the row)
    /// or must abort the run.
    pub fn is_row_local(&self) -> bool {
        match self {
            FixError::MalformedScore(_) => true,
            FixError::MissingColumn(_) => false,
            FixError::RowLength { .. } => false,
            FixError::DuplicateColumn(_) => false,
        }
    }
}
