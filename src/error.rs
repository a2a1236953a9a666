use thiserror::Error;

pub type Result<T> = std::result::Result<T, WibbleError>;

#[derive(Debug, Error)]
pub enum WibbleError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    #[error("empty path")]
    EmptyPath,

    /// Parallel inputs (batch rows, table columns) must be aligned.
    #[error("length mismatch for `{field}`: expected {expected}, found {found}")]
    LengthMismatch {
        field: String,
        expected: usize,
        found: usize,
    },

    #[error("invalid list: {0}")]
    InvalidList(String),

    #[error("duplicate column name: {0}")]
    DuplicateColumn(String),

    #[error("status {status} ({reason}) for {url}")]
    Status {
        status: u16,
        reason: &'static str,
        url: String,
    },

    #[error("http: {0}")]
    Http(#[from] reqwest::Error),

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("config: {0}")]
    Config(String),
}

impl WibbleError {
    pub(crate) fn mismatch(field: &str, expected: usize, found: usize) -> Self {
        WibbleError::LengthMismatch {
            field: field.to_string(),
            expected,
            found,
        }
    }
}
