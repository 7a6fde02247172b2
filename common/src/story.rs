use crate::{NamedMap, Section, SectionName};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Name of the section synthesized when the entry file has content before
/// any section header.
pub const DEFAULT_SECTION: &str = "_default";

/// The whole compilation unit: every section read from the entry file and
/// its imports.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Story {
    pub id: String,
    pub title: String,
    pub start: Option<SectionName>,
    pub sections: NamedMap<Section>,
    pub scripts: Vec<String>,
    pub stylesheets: Vec<String>,
    /// Absolute paths of every file scanned so far, in load order. Filled
    /// through [`Story::mark_processed`].
    pub processed_files: Vec<PathBuf>,
    processed: HashSet<PathBuf>,
}

impl Story {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_section<A, P>(&mut self, name: A, file: P, line: usize) -> &mut Section
    where
        A: Into<SectionName>,
        P: AsRef<Path>,
    {
        let name = name.into();
        let section = Section::new(name.clone(), file, line);
        self.sections.insert(name, section)
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.get(name)
    }

    pub fn section_mut(&mut self, name: &str) -> Option<&mut Section> {
        self.sections.get_mut(name)
    }

    /// The section the story starts at: the `@start` one if set, otherwise
    /// the first section declared.
    pub fn start_section(&self) -> Option<&str> {
        match &self.start {
            Some(start) => Some(start.as_str()),
            None => self.sections.first_key(),
        }
    }

    pub fn is_processed<P>(&self, path: P) -> bool
    where
        P: AsRef<Path>,
    {
        self.processed.contains(path.as_ref())
    }

    /// Records `path` as scanned. Returns false if it already was.
    pub fn mark_processed<P>(&mut self, path: P) -> bool
    where
        P: AsRef<Path>,
    {
        if !self.processed.insert(path.as_ref().to_path_buf()) {
            return false;
        }
        self.processed_files.push(path.as_ref().to_path_buf());
        true
    }
}
