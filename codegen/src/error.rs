use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CodegenError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Could not serialize story: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Could not read template `{path}`: {message}")]
    Template { path: PathBuf, message: String },
}
