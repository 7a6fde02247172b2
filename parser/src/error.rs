use std::path::PathBuf;

/// Errors that abort a compilation.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("{} line {line}: Can't add passage '{passage}' as no section has been created.", .file.display())]
    PassageWithoutSection {
        file: PathBuf,
        line: usize,
        passage: String,
    },
    #[error("Can't read file {}: {message}", .path.display())]
    CantReadFile { path: PathBuf, message: String },
    #[error("Invalid import pattern '{pattern}': {message}")]
    InvalidImportPattern { pattern: String, message: String },
}
