use std::path::Path;
use std::path::PathBuf;

/// A compatibility test read from a markdown file with a title line, a
/// ```squiffy block holding the story and a ```result block holding the
/// expected output of `hilos check`.
#[derive(Clone, Debug)]
pub struct TestCase {
    pub name: String,
    pub script: String,
    pub result: String,
    pub path: PathBuf,
    pub disabled: bool,
}

fn parse_name(content: &str) -> String {
    content
        .lines()
        .next()
        .and_then(|line| line.strip_prefix("# "))
        .unwrap_or_default()
        .to_string()
}

fn parse_markdown_block(content: &str, language: &str) -> String {
    content
        .split(&format!("```{}\n", language))
        .nth(1)
        .and_then(|block| block.split("```").next())
        .unwrap_or_default()
        .trim()
        .to_string()
}

impl TestCase {
    pub fn from_string<A, B>(content: A, path: B) -> Self
    where
        A: AsRef<str>,
        B: AsRef<Path>,
    {
        let name = parse_name(content.as_ref());
        let script = parse_markdown_block(content.as_ref(), "squiffy");
        let result = parse_markdown_block(content.as_ref(), "result");
        let disabled = content.as_ref().trim().ends_with("!!! disabled");

        TestCase {
            name,
            script,
            result,
            path: path.as_ref().into(),
            disabled,
        }
    }
}
