use crate::line::{Directive, Line};
use crate::links;
use crate::sources::normalize;
use crate::{ParseError, Sources, MARKUP_EXTENSION, SCRIPT_EXTENSION, STYLESHEET_EXTENSION};
use hilos_common::{Content, Story, DEFAULT_SECTION};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Scans source files line by line and builds up a [`Story`].
pub struct Scanner<'a, S: Sources + ?Sized> {
    sources: &'a S,
}

/// Where the scan of one file currently is.
#[derive(Debug)]
struct FileState {
    file: PathBuf,
    is_entry: bool,
    line: usize,
    section: Option<String>,
    passage: Option<String>,
    text_started: bool,
    auto_section_count: usize,
}

impl FileState {
    fn new(file: &Path, is_entry: bool) -> Self {
        Self {
            file: file.to_path_buf(),
            is_entry,
            line: 0,
            section: None,
            passage: None,
            text_started: false,
            auto_section_count: 0,
        }
    }

    fn open_section(&mut self, story: &mut Story, name: String) {
        story.add_section(name.clone(), &self.file, self.line);
        self.section = Some(name);
        self.passage = None;
        self.text_started = false;
    }

    /// The entry file gets a default section for content that comes before
    /// any header. Imported files don't.
    fn ensure_section(&mut self, story: &mut Story) {
        if self.section.is_none() && self.is_entry {
            self.open_section(story, DEFAULT_SECTION.to_string());
        }
    }

    /// Content of the open passage, or else of the open section.
    fn content<'s>(&mut self, story: &'s mut Story) -> Option<&'s mut Content> {
        if self.passage.is_none() {
            self.ensure_section(story);
        }
        let section = story.section_mut(self.section.as_deref()?)?;
        match &self.passage {
            Some(passage) => section
                .passages
                .get_mut(passage)
                .map(|passage| &mut passage.content),
            None => Some(&mut section.content),
        }
    }
}

impl<'a, S: Sources + ?Sized> Scanner<'a, S> {
    pub fn new(sources: &'a S) -> Self {
        Self { sources }
    }

    /// Scans `path` into `story`. Files already scanned, under any spelling
    /// of their path, are skipped.
    pub fn scan_file<P>(&self, story: &mut Story, path: P, is_entry: bool) -> Result<(), ParseError>
    where
        P: AsRef<Path>,
    {
        let path = normalize(path.as_ref());
        if !story.mark_processed(&path) {
            return Ok(());
        }

        let source = self.sources.read(&path)?;
        self.scan_str(story, &source, &path, is_entry)
    }

    /// Scans `source` as if it had been read from `path`.
    pub fn scan_str<P>(
        &self,
        story: &mut Story,
        source: &str,
        path: P,
        is_entry: bool,
    ) -> Result<(), ParseError>
    where
        P: AsRef<Path>,
    {
        let mut state = FileState::new(path.as_ref(), is_entry);
        let source = source.replace('\r', "");

        for raw in source.split('\n') {
            state.line += 1;
            self.scan_line(story, &mut state, raw)?;
        }

        Ok(())
    }

    fn scan_line(&self, story: &mut Story, state: &mut FileState, raw: &str) -> Result<(), ParseError> {
        match Line::classify(raw) {
            Line::SectionHeader(name) => state.open_section(story, name),
            Line::PassageHeader(name) => {
                let Some(section) = state.section.as_deref().and_then(|s| story.section_mut(s)) else {
                    return Err(ParseError::PassageWithoutSection {
                        file: state.file.clone(),
                        line: state.line,
                        passage: name,
                    });
                };
                section.add_passage(name.clone(), state.line);
                state.passage = Some(name);
                state.text_started = false;
            }
            Line::Continue(label) => {
                state.ensure_section(story);
                state.auto_section_count += 1;
                let name = format!("_continue{}", state.auto_section_count);
                if let Some(section) = state.section.as_deref().and_then(|s| story.section_mut(s)) {
                    section.content.add_text(format!("[[{}]]({})", label, name));
                }
                state.open_section(story, name);
            }
            Line::Directive(directive) => self.directive(story, state, directive)?,
            Line::Script(script) if !state.text_started => {
                if let Some(content) = state.content(story) {
                    content.add_script(script);
                }
            }
            Line::Script(_) | Line::Text => {
                if !state.text_started && raw.trim().is_empty() {
                    return Ok(());
                }
                if let Some(content) = state.content(story) {
                    content.add_text(raw);
                    state.text_started = true;
                }
            }
        }

        Ok(())
    }

    fn directive(
        &self,
        story: &mut Story,
        state: &mut FileState,
        directive: Directive,
    ) -> Result<(), ParseError> {
        match directive {
            Directive::Title(title) => story.title = title,
            Directive::Start(start) => story.start = Some(start),
            Directive::Import(pattern) => self.import(story, state, &pattern)?,
            Directive::Clear => {
                if let Some(content) = state.content(story) {
                    content.clear = true;
                }
            }
            Directive::Replace(argument) => {
                let attribute = match argument.split_once('=') {
                    Some((name, text)) => format!("@replace {}={}", name, links::render(text)),
                    None => format!("@replace {}", argument),
                };
                if let Some(content) = state.content(story) {
                    content.add_attribute(attribute);
                }
            }
            Directive::Unknown => {}
            directive => {
                if let Some(attribute) = directive.attribute() {
                    if let Some(content) = state.content(story) {
                        content.add_attribute(attribute);
                    }
                }
            }
        }

        Ok(())
    }

    fn import(&self, story: &mut Story, state: &FileState, pattern: &str) -> Result<(), ParseError> {
        let base_path = state.file.parent().unwrap_or_else(|| Path::new(""));

        for import in self.sources.expand(&normalize(&base_path.join(pattern)))? {
            let import = normalize(&import);
            match import.extension().and_then(OsStr::to_str) {
                Some(MARKUP_EXTENSION) => self.scan_file(story, &import, false)?,
                Some(SCRIPT_EXTENSION) => story.scripts.push(relative(&import, base_path)),
                Some(STYLESHEET_EXTENSION) => story.stylesheets.push(relative(&import, base_path)),
                _ => {}
            }
        }

        Ok(())
    }
}

fn relative(path: &Path, base_path: &Path) -> String {
    path.strip_prefix(base_path)
        .unwrap_or(path)
        .to_string_lossy()
        .to_string()
}
