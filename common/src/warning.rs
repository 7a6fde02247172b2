use core::fmt;
use std::path::PathBuf;

/// What an unresolved link was pointing at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    Section,
    Passage,
}

impl LinkKind {
    fn delimiters(&self) -> (&'static str, &'static str) {
        match self {
            LinkKind::Section => ("[[", "]]"),
            LinkKind::Passage => ("[", "]"),
        }
    }
}

impl fmt::Display for LinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkKind::Section => write!(f, "section"),
            LinkKind::Passage => write!(f, "passage"),
        }
    }
}

/// A non-fatal problem found while rendering text. Compilation continues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub file: PathBuf,
    pub line: usize,
    pub section: String,
    pub passage: Option<String>,
    pub link_to: LinkKind,
    pub target: String,
}

impl Warning {
    /// The same message with the file reduced to its name.
    pub fn short(&self) -> String {
        let file_name = self
            .file
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("story.squiffy");
        self.describe(file_name)
    }

    fn describe(&self, file: &str) -> String {
        let (before, after) = self.link_to.delimiters();
        let location = match &self.passage {
            None => format!("{} line {}: In section '{}'", file, self.line, self.section),
            Some(passage) => format!(
                "{} line {}: In section '{}', passage '{}'",
                file, self.line, self.section, passage
            ),
        };
        format!(
            "{} there is a link to a {} called {}{}{}, which doesn't exist",
            location, self.link_to, before, self.target, after
        )
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.describe(&self.file.display().to_string()))
    }
}
