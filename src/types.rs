use serde::{Deserialize, Serialize};

/// JSON envelope printed by the CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            ok: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(msg: impl Into<String>) -> Self {
        Self {
            ok: false,
            data: None,
            error: Some(msg.into()),
        }
    }
}

impl<T> From<crate::Result<T>> for ApiResponse<T> {
    fn from(result: crate::Result<T>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(e) => Self::err(e.to_string()),
        }
    }
}

/// Columns for a batch of API calls, aligned by row.
///
/// `query`, `value` and `path` may be left out; a missing column is read as
/// empty strings for every row.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchInput {
    pub url: Vec<String>,
    #[serde(default)]
    pub query: Option<Vec<String>>,
    #[serde(default)]
    pub value: Option<Vec<String>>,
    #[serde(default)]
    pub path: Option<Vec<String>>,
}

impl BatchInput {
    /// `(url, query, value, path)` with missing columns filled in.
    pub fn into_columns(self) -> (Vec<String>, Vec<String>, Vec<String>, Vec<String>) {
        let rows = self.url.len();
        let fill =
            |column: Option<Vec<String>>| column.unwrap_or_else(|| vec![String::new(); rows]);
        let query = fill(self.query);
        let value = fill(self.value);
        let path = fill(self.path);
        (self.url, query, value, path)
    }
}
