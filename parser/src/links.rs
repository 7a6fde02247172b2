//! Rewrites inline link syntax into anchors, checks link targets against the
//! story, then renders the result as Markdown.
//!
//! Four link forms are handled, in this order, each pass working on the
//! output of the previous one:
//!
//! 1. `[[label]](section)`
//! 2. `[label](passage)`, unless the target is an `http://` or `https://` URL
//! 3. `[[section]]`
//! 4. `[passage]` not followed by `(`

use hilos_common::{LinkKind, Passage, Section, Story, Warning};
use lazy_static::lazy_static;
use pulldown_cmark::{html, Options, Parser};
use regex::{Captures, Regex};

pub const LINK_CLASS: &str = "hilos-link";

lazy_static! {
    static ref NAMED_SECTION_LINK: Regex = Regex::new(r"\[\[([^\]]*?)\]\]\((.*?)\)").unwrap();
    static ref NAMED_PASSAGE_LINK: Regex = Regex::new(r"\[([^\]]*?)\]\((.*?)\)").unwrap();
    static ref UNNAMED_SECTION_LINK: Regex = Regex::new(r"\[\[(.*?)\]\]").unwrap();
    static ref UNNAMED_PASSAGE_LINK: Regex = Regex::new(r"\[(.*?)\]([^\(]|$)").unwrap();
}

/// The section (and passage) a block of text belongs to.
#[derive(Debug, Clone, Copy)]
pub struct LinkContext<'a> {
    pub story: &'a Story,
    pub section: &'a Section,
    pub passage: Option<&'a Passage>,
}

impl<'a> LinkContext<'a> {
    pub fn new(story: &'a Story, section: &'a Section, passage: Option<&'a Passage>) -> Self {
        Self {
            story,
            section,
            passage,
        }
    }

    fn exists(&self, kind: LinkKind, name: &str) -> bool {
        match kind {
            LinkKind::Section => self.story.sections.contains_key(name),
            LinkKind::Passage => self.section.passages.contains_key(name),
        }
    }

    fn warning(&self, kind: LinkKind, target: &str) -> Warning {
        let line = match self.passage {
            Some(passage) => passage.line,
            None => self.section.line,
        };
        Warning {
            file: self.section.file.clone(),
            line,
            section: self.section.name.clone(),
            passage: self.passage.map(|passage| passage.name.clone()),
            link_to: kind,
            target: target.to_string(),
        }
    }
}

/// Rendered html plus the links that didn't resolve.
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    pub html: String,
    pub warnings: Vec<Warning>,
}

struct LinkPass {
    pattern: &'static Regex,
    label: usize,
    target: usize,
    kind: LinkKind,
    /// Whether the character after the closing bracket was captured and has
    /// to be put back.
    trailing: bool,
    skip_urls: bool,
}

fn passes() -> [LinkPass; 4] {
    [
        LinkPass {
            pattern: &NAMED_SECTION_LINK,
            label: 1,
            target: 2,
            kind: LinkKind::Section,
            trailing: false,
            skip_urls: false,
        },
        LinkPass {
            pattern: &NAMED_PASSAGE_LINK,
            label: 1,
            target: 2,
            kind: LinkKind::Passage,
            trailing: false,
            skip_urls: true,
        },
        LinkPass {
            pattern: &UNNAMED_SECTION_LINK,
            label: 1,
            target: 1,
            kind: LinkKind::Section,
            trailing: false,
            skip_urls: false,
        },
        LinkPass {
            pattern: &UNNAMED_PASSAGE_LINK,
            label: 1,
            target: 1,
            kind: LinkKind::Passage,
            trailing: true,
            skip_urls: false,
        },
    ]
}

/// Renders text that belongs to no section. Links are rewritten but not
/// checked.
pub fn render(text: &str) -> String {
    let mut warnings = Vec::new();
    markdown(&resolve_links(text, None, &mut warnings))
}

/// Renders the text of a section or passage, checking every link target.
pub fn render_in_context(text: &str, context: &LinkContext) -> Rendered {
    let mut warnings = Vec::new();
    let linked = resolve_links(text, Some(context), &mut warnings);
    Rendered {
        html: markdown(&linked),
        warnings,
    }
}

/// Runs the four link passes without the Markdown step.
pub fn resolve_links(
    text: &str,
    context: Option<&LinkContext>,
    warnings: &mut Vec<Warning>,
) -> String {
    let mut text = text.to_string();
    for pass in passes() {
        text = substitute(&text, &pass, context, warnings);
    }
    text
}

fn substitute(
    text: &str,
    pass: &LinkPass,
    context: Option<&LinkContext>,
    warnings: &mut Vec<Warning>,
) -> String {
    let mut output = String::with_capacity(text.len());
    let mut copied = 0;
    let mut position = 0;

    while position <= text.len() {
        let Some(captures) = pass.pattern.captures_at(text, position) else {
            break;
        };
        let Some(whole) = captures.get(0) else {
            break;
        };
        let target = group(&captures, pass.target);

        if pass.skip_urls && is_url(target) {
            // `[` is one byte, so the next start is always a char boundary.
            position = whole.start() + 1;
            continue;
        }

        if let Some(context) = context {
            if !destination_exists(target, |name| context.exists(pass.kind, name)) {
                warnings.push(context.warning(pass.kind, target));
            }
        }

        output.push_str(&text[copied..whole.start()]);
        output.push_str(&anchor(pass.kind, target, group(&captures, pass.label)));
        if pass.trailing {
            output.push_str(group(&captures, 2));
        }
        copied = whole.end();
        position = whole.end();
    }

    output.push_str(&text[copied..]);
    output
}

fn group<'t>(captures: &Captures<'t>, index: usize) -> &'t str {
    captures.get(index).map_or("", |m| m.as_str())
}

fn is_url(target: &str) -> bool {
    target.starts_with("http://") || target.starts_with("https://")
}

fn anchor(kind: LinkKind, target: &str, label: &str) -> String {
    format!(
        "<a class=\"{}\" data-{}=\"{}\">{}</a>",
        LINK_CLASS, kind, target, label
    )
}

/// A link target may carry attribute changes after a comma, e.g.
/// `door, score+=1`. Only the part before the first comma names a
/// destination; one starting with `@` is a replace evaluated at play time.
pub fn destination_exists<F>(target: &str, exists: F) -> bool
where
    F: Fn(&str) -> bool,
{
    let destination = target.split(',').next().unwrap_or_default();
    if destination.starts_with('@') {
        return true;
    }
    exists(destination)
}

/// Markdown to html. Anchors inserted by the link passes are inline html
/// and pass through untouched.
pub fn markdown(text: &str) -> String {
    let parser = Parser::new_ext(text, Options::empty());
    let mut output = String::new();
    html::push_html(&mut output, parser);
    output.trim().to_string()
}
