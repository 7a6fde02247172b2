use hilos_common::*;
use std::path::{Path, PathBuf};

mod error;
pub use error::ParseError;

pub mod line;
pub mod links;
pub use links::{render, render_in_context, LinkContext, Rendered};

mod scanner;
pub use scanner::Scanner;

mod sources;
pub use sources::{normalize, FileSystem, MemorySources, Sources};

#[cfg(test)]
mod tests;

pub const MARKUP_EXTENSION: &str = "squiffy";
pub const SCRIPT_EXTENSION: &str = "js";
pub const STYLESHEET_EXTENSION: &str = "css";

/// Scans the entry file at `path`, and everything it imports, from disk.
pub fn parse_file<P>(path: P) -> Result<Story, ParseError>
where
    P: AsRef<Path>,
{
    parse_with(&FileSystem, path)
}

/// Scans the entry file at `path` through `sources`. Relative paths are
/// made absolute and normalized first so imports and dedup work on one
/// spelling of each path.
pub fn parse_with<S, P>(sources: &S, path: P) -> Result<Story, ParseError>
where
    S: Sources + ?Sized,
    P: AsRef<Path>,
{
    let path = absolute(path)?;
    let mut story = Story::new();
    Scanner::new(sources).scan_file(&mut story, &path, true)?;
    Ok(story)
}

/// Scans an in-memory script as if it were the entry file `path`. Imports
/// can only match the script itself.
pub fn parse_str<P>(script: &str, path: P) -> Result<Story, ParseError>
where
    P: AsRef<Path>,
{
    let path = absolute(path)?;
    let sources = MemorySources::new().with_file(&path, script);
    parse_with(&sources, path)
}

fn absolute<P>(path: P) -> Result<PathBuf, ParseError>
where
    P: AsRef<Path>,
{
    std::path::absolute(path.as_ref())
        .map(|path| normalize(&path))
        .map_err(|err| ParseError::CantReadFile {
            path: path.as_ref().to_path_buf(),
            message: err.to_string(),
        })
}
