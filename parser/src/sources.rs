use crate::ParseError;
use glob::{MatchOptions, Pattern};
use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

/// Where the scanner gets file contents and import matches from.
pub trait Sources {
    /// Returns the raw text of `path`.
    fn read(&self, path: &Path) -> Result<String, ParseError>;

    /// Expands a glob `pattern` (already joined to the importing file's
    /// directory) into matching paths, in the order they should be imported.
    fn expand(&self, pattern: &Path) -> Result<Vec<PathBuf>, ParseError>;
}

/// Folds `.` and `..` components without touching the disk, so one file
/// always has one spelling. `..` never climbs above the root.
pub fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => normalized.push(component),
            },
            component => normalized.push(component),
        }
    }
    normalized
}

/// Reads files from disk and expands imports with `glob`.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileSystem;

impl Sources for FileSystem {
    fn read(&self, path: &Path) -> Result<String, ParseError> {
        std::fs::read_to_string(path).map_err(|err| ParseError::CantReadFile {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
    }

    fn expand(&self, pattern: &Path) -> Result<Vec<PathBuf>, ParseError> {
        let pattern = pattern.to_string_lossy();
        let paths = glob::glob(&pattern).map_err(|err| ParseError::InvalidImportPattern {
            pattern: pattern.to_string(),
            message: err.to_string(),
        })?;

        Ok(paths.filter_map(Result::ok).collect())
    }
}

/// In-memory files, for compiling stories that never touch the disk.
#[derive(Debug, Default, Clone)]
pub struct MemorySources {
    files: BTreeMap<PathBuf, String>,
}

impl MemorySources {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file<P, A>(mut self, path: P, content: A) -> Self
    where
        P: AsRef<Path>,
        A: Into<String>,
    {
        self.add_file(path, content);
        self
    }

    pub fn add_file<P, A>(&mut self, path: P, content: A)
    where
        P: AsRef<Path>,
        A: Into<String>,
    {
        self.files.insert(normalize(path.as_ref()), content.into());
    }
}

impl Sources for MemorySources {
    fn read(&self, path: &Path) -> Result<String, ParseError> {
        match self.files.get(&normalize(path)) {
            Some(content) => Ok(content.clone()),
            None => Err(ParseError::CantReadFile {
                path: path.to_path_buf(),
                message: "file not found".to_string(),
            }),
        }
    }

    fn expand(&self, pattern: &Path) -> Result<Vec<PathBuf>, ParseError> {
        let pattern = normalize(pattern);
        let pattern_string = pattern.to_string_lossy();
        let pattern = Pattern::new(&pattern_string).map_err(|err| {
            ParseError::InvalidImportPattern {
                pattern: pattern_string.to_string(),
                message: err.to_string(),
            }
        })?;
        let options = MatchOptions {
            require_literal_separator: true,
            ..MatchOptions::new()
        };

        Ok(self
            .files
            .keys()
            .filter(|path| pattern.matches_path_with(path, options))
            .cloned()
            .collect())
    }
}
