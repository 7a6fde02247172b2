use crate::CodegenError;
use hilos_common::{Content, NamedMap, Passage, Section, Story, Warning};
use hilos_parser::{render_in_context, LinkContext};
use serde::Serialize;

/// Passage shown once every other passage in its section has been seen.
pub const LAST_PASSAGE: &str = "@last";

/// The generated story plus the warnings raised while rendering it.
#[derive(Debug, Clone, PartialEq)]
pub struct Generated {
    pub output: Output,
    pub warnings: Vec<Warning>,
}

/// Everything the player needs, with script blocks pulled out into `js` so
/// the story data itself is plain JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Output {
    pub story: StoryData,
    pub js: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoryData {
    pub start: String,
    pub id: String,
    pub sections: NamedMap<SectionData>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionData {
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub clear: bool,
    pub text: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub js_index: Option<usize>,
    /// Only set when the section has an `@last` passage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passage_count: Option<usize>,
    #[serde(skip_serializing_if = "NamedMap::is_empty")]
    pub passages: NamedMap<PassageData>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PassageData {
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub clear: bool,
    pub text: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub js_index: Option<usize>,
}

impl Generated {
    /// Warnings (by file name) followed by the story body without its id.
    /// Stable across machines, so it is what `hilos check` prints.
    pub fn report(&self) -> String {
        let mut report = String::new();
        for warning in &self.warnings {
            report.push_str(&format!("WARNING: {}\n", warning.short()));
        }
        report.push_str(&self.output.to_js_without_id());
        report
    }
}

/// Renders every section and passage of `story`, in declaration order.
pub fn generate(story: &Story) -> Generated {
    Generator::new(story).generate()
}

pub struct Generator<'a> {
    story: &'a Story,
    js: Vec<Vec<String>>,
    warnings: Vec<Warning>,
}

impl<'a> Generator<'a> {
    pub fn new(story: &'a Story) -> Self {
        Self {
            story,
            js: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn generate(mut self) -> Generated {
        let story = self.story;
        let mut sections = NamedMap::new();
        for section in story.sections.values() {
            let data = self.section(section);
            sections.insert(section.name.as_str(), data);
        }

        let data = StoryData {
            start: story.start_section().unwrap_or_default().to_string(),
            id: story.id.clone(),
            sections,
        };

        Generated {
            output: Output {
                story: data,
                js: self.js,
            },
            warnings: self.warnings,
        }
    }

    fn section(&mut self, section: &Section) -> SectionData {
        let mut data = SectionData {
            clear: section.content.clear,
            text: self.text(&section.content, section, None),
            attributes: section.content.attributes.clone(),
            js_index: self.script(&section.content),
            passage_count: passage_count(section),
            passages: NamedMap::new(),
        };

        for passage in section.passages.values() {
            let passage_data = PassageData {
                clear: passage.content.clear,
                text: self.text(&passage.content, section, Some(passage)),
                attributes: passage.content.attributes.clone(),
                js_index: self.script(&passage.content),
            };
            data.passages.insert(passage.name.as_str(), passage_data);
        }

        data
    }

    fn text(&mut self, content: &Content, section: &Section, passage: Option<&Passage>) -> String {
        let context = LinkContext::new(self.story, section, passage);
        let rendered = render_in_context(&content.joined_text(), &context);
        self.warnings.extend(rendered.warnings);
        rendered.html
    }

    fn script(&mut self, content: &Content) -> Option<usize> {
        if content.script.is_empty() {
            return None;
        }
        self.js.push(content.script.clone());
        Some(self.js.len() - 1)
    }
}

/// Counts the passages a reader can visit, when the section has an `@last`
/// passage waiting on them.
fn passage_count(section: &Section) -> Option<usize> {
    if !section.passages.contains_key(LAST_PASSAGE) {
        return None;
    }

    Some(
        section
            .passages
            .keys()
            .filter(|name| !name.is_empty() && !name.starts_with('@'))
            .count(),
    )
}

impl Output {
    /// The story.js body: start, id and the section table.
    pub fn to_js(&self) -> String {
        self.write_js(true)
    }

    /// Same as [`Output::to_js`] without the id line, which depends on where
    /// the story lives on disk.
    pub fn to_js_without_id(&self) -> String {
        self.write_js(false)
    }

    pub fn to_json(&self) -> Result<String, CodegenError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn write_js(&self, with_id: bool) -> String {
        let mut js = String::new();
        js.push_str(&format!(
            "hilos.story.start = '{}';\n",
            escape_quoted(&self.story.start)
        ));
        if with_id {
            js.push_str(&format!(
                "hilos.story.id = '{}';\n",
                escape_quoted(&self.story.id)
            ));
        }

        js.push_str("hilos.story.sections = {\n");
        for (name, section) in self.story.sections.iter() {
            js.push_str(&format!("\t'{}': {{\n", escape_quoted(name)));
            self.write_entry(
                &mut js,
                2,
                section.clear,
                &section.text,
                &section.attributes,
                section.js_index,
            );
            if let Some(count) = section.passage_count {
                js.push_str(&format!("\t\t'passageCount': {},\n", count));
            }

            js.push_str("\t\t'passages': {\n");
            for (name, passage) in section.passages.iter() {
                js.push_str(&format!("\t\t\t'{}': {{\n", escape_quoted(name)));
                self.write_entry(
                    &mut js,
                    4,
                    passage.clear,
                    &passage.text,
                    &passage.attributes,
                    passage.js_index,
                );
                js.push_str("\t\t\t},\n");
            }
            js.push_str("\t\t},\n");
            js.push_str("\t},\n");
        }
        js.push_str("};\n");

        js
    }

    fn write_entry(
        &self,
        js: &mut String,
        depth: usize,
        clear: bool,
        text: &str,
        attributes: &[String],
        js_index: Option<usize>,
    ) {
        let tabs = "\t".repeat(depth);

        if clear {
            js.push_str(&format!("{}'clear': true,\n", tabs));
        }
        js.push_str(&format!(
            "{}'text': {},\n",
            tabs,
            serde_json::Value::from(text)
        ));
        if !attributes.is_empty() {
            js.push_str(&format!(
                "{}'attributes': {},\n",
                tabs,
                serde_json::Value::from(attributes.to_vec())
            ));
        }
        if let Some(lines) = js_index.and_then(|index| self.js.get(index)) {
            js.push_str(&format!("{}'js': function() {{\n", tabs));
            for line in lines {
                js.push_str(&format!("{}\t{}\n", tabs, line));
            }
            js.push_str(&format!("{}}},\n", tabs));
        }
    }
}

fn escape_quoted(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

#[cfg(test)]
mod tests {
    use super::*;
    use hilos_parser::parse_str;

    #[test]
    fn test_escape_quoted() {
        assert_eq!(escape_quoted("it's"), "it\\'s");
        assert_eq!(escape_quoted("a\\b"), "a\\\\b");
        assert_eq!(escape_quoted("plain"), "plain");
    }

    #[test]
    fn test_start_defaults_to_first_section() {
        let story = parse_str("[[one]]:\nA\n[[two]]:\nB", "start.squiffy").unwrap();
        let generated = generate(&story);
        assert_eq!(generated.output.story.start, "one");
    }

    #[test]
    fn test_explicit_start_wins() {
        let story = parse_str("@start two\n[[one]]:\nA\n[[two]]:\nB", "start.squiffy").unwrap();
        let generated = generate(&story);
        assert_eq!(generated.output.story.start, "two");
    }

    #[test]
    fn test_scripts_are_indexed_in_order() {
        let story = parse_str(
            "[[a]]:\n\tfirst();\nText\n[p]:\n\tsecond();\n[[b]]:\n\tthird();",
            "js.squiffy",
        )
        .unwrap();
        let output = generate(&story).output;

        assert_eq!(
            output.js,
            vec![vec!["first();"], vec!["second();"], vec!["third();"]]
        );
        let a = output.story.sections.get("a").unwrap();
        assert_eq!(a.js_index, Some(0));
        assert_eq!(a.passages.get("p").unwrap().js_index, Some(1));
        assert_eq!(output.story.sections.get("b").unwrap().js_index, Some(2));
    }

    #[test]
    fn test_passage_count_only_with_last_passage() {
        let story = parse_str(
            "[[a]]:\n[one]:\n[two]:\n[@last]:\nDone\n[[b]]:\n[three]:",
            "last.squiffy",
        )
        .unwrap();
        let output = generate(&story).output;

        assert_eq!(
            output.story.sections.get("a").unwrap().passage_count,
            Some(2)
        );
        assert_eq!(output.story.sections.get("b").unwrap().passage_count, None);
        assert!(output.to_js().contains("\t\t'passageCount': 2,\n"));
    }

    #[test]
    fn test_story_id_line() {
        let mut story = parse_str("Hello", "id.squiffy").unwrap();
        story.id = "0123456789".to_string();
        let output = generate(&story).output;

        assert!(output
            .to_js()
            .starts_with("hilos.story.start = '_default';\nhilos.story.id = '0123456789';\n"));
        assert!(!output.to_js_without_id().contains("hilos.story.id"));
    }

    #[test]
    fn test_passage_warnings_name_the_passage() {
        let story = parse_str("[[a]]:\n[p]:\nSee [[nowhere]]", "warn.squiffy").unwrap();
        let generated = generate(&story);

        assert_eq!(generated.warnings.len(), 1);
        assert_eq!(generated.warnings[0].passage.as_deref(), Some("p"));
        assert_eq!(generated.warnings[0].line, 2);
    }

    #[test]
    fn test_json_uses_js_index_and_skips_defaults() {
        let story = parse_str("[[a]]:\n@clear\n\tgo();\nHi", "json.squiffy").unwrap();
        let json = generate(&story).output.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        let section = &value["story"]["sections"]["a"];
        assert_eq!(section["clear"], true);
        assert_eq!(section["jsIndex"], 0);
        assert_eq!(section["text"], "<p>Hi</p>");
        assert!(section.get("attributes").is_none());
        assert!(section.get("passages").is_none());
        assert_eq!(value["js"][0][0], "go();");
    }
}
