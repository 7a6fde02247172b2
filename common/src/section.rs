use crate::NamedMap;
use std::path::{Path, PathBuf};

pub type SectionName = String;
pub type PassageName = String;

/// Raw source collected for a section or passage, rendered at generation time.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Content {
    pub text: Vec<String>,
    pub attributes: Vec<String>,
    pub script: Vec<String>,
    pub clear: bool,
}

impl Content {
    pub fn add_text<A>(&mut self, line: A)
    where
        A: Into<String>,
    {
        self.text.push(line.into());
    }

    pub fn add_attribute<A>(&mut self, attribute: A)
    where
        A: Into<String>,
    {
        self.attributes.push(attribute.into());
    }

    pub fn add_script<A>(&mut self, line: A)
    where
        A: Into<String>,
    {
        self.script.push(line.into());
    }

    /// The text lines joined the way they are handed to the renderer.
    pub fn joined_text(&self) -> String {
        self.text.join("\n")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub name: SectionName,
    /// File the section header was read from.
    pub file: PathBuf,
    /// Line of the section header, used for diagnostics.
    pub line: usize,
    pub content: Content,
    pub passages: NamedMap<Passage>,
}

impl Section {
    pub fn new<A, P>(name: A, file: P, line: usize) -> Self
    where
        A: Into<SectionName>,
        P: AsRef<Path>,
    {
        Self {
            name: name.into(),
            file: file.as_ref().to_path_buf(),
            line,
            content: Content::default(),
            passages: NamedMap::new(),
        }
    }

    pub fn add_passage<A>(&mut self, name: A, line: usize) -> &mut Passage
    where
        A: Into<PassageName>,
    {
        let name = name.into();
        let passage = Passage::new(name.clone(), line);
        self.passages.insert(name, passage)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Passage {
    pub name: PassageName,
    pub line: usize,
    pub content: Content,
}

impl Passage {
    pub fn new<A>(name: A, line: usize) -> Self
    where
        A: Into<PassageName>,
    {
        Self {
            name: name.into(),
            line,
            content: Content::default(),
        }
    }
}
