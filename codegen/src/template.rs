use crate::CodegenError;
use std::path::{Path, PathBuf};

pub const STORY_TEMPLATE: &str = "story.template.js";
pub const INDEX_TEMPLATE: &str = "index.template.html";
pub const STYLE_TEMPLATE: &str = "style.template.css";

const DEFAULT_STORY: &str = include_str!("../templates/story.template.js");
const DEFAULT_INDEX: &str = include_str!("../templates/index.template.html");
const DEFAULT_STYLE: &str = include_str!("../templates/style.template.css");

/// The three files a bundle is built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Templates {
    pub story: String,
    pub index: String,
    pub style: String,
}

impl Default for Templates {
    fn default() -> Self {
        Self {
            story: DEFAULT_STORY.to_string(),
            index: DEFAULT_INDEX.to_string(),
            style: DEFAULT_STYLE.to_string(),
        }
    }
}

impl Templates {
    /// Looks each template up in `output_dir`, then `templates_dir`, falling
    /// back to the built-in one.
    pub fn load(output_dir: &Path, templates_dir: Option<&Path>) -> Result<Self, CodegenError> {
        Ok(Self {
            story: find(STORY_TEMPLATE, output_dir, templates_dir, DEFAULT_STORY)?,
            index: find(INDEX_TEMPLATE, output_dir, templates_dir, DEFAULT_INDEX)?,
            style: find(STYLE_TEMPLATE, output_dir, templates_dir, DEFAULT_STYLE)?,
        })
    }
}

fn find(
    name: &str,
    output_dir: &Path,
    templates_dir: Option<&Path>,
    default: &str,
) -> Result<String, CodegenError> {
    let candidates: Vec<PathBuf> = std::iter::once(output_dir)
        .chain(templates_dir)
        .map(|dir| dir.join(name))
        .collect();

    match candidates.into_iter().find(|path| path.is_file()) {
        Some(path) => std::fs::read_to_string(&path).map_err(|err| CodegenError::Template {
            path,
            message: err.to_string(),
        }),
        None => Ok(default.to_string()),
    }
}
