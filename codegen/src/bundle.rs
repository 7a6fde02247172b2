use crate::{CodegenError, Output, Templates, VERSION};
use hilos_common::{Config, Story};
use std::path::{Path, PathBuf};

pub const STORY_JS: &str = "story.js";
pub const STORY_JSON: &str = "story.json";
pub const INDEX_HTML: &str = "index.html";
pub const STYLE_CSS: &str = "style.css";
pub const JQUERY_LOCAL: &str = "jquery.min.js";
pub const JQUERY_CDN: &str = "https://ajax.aspnetcdn.com/ajax/jquery/jquery-2.1.3.min.js";

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BundleOptions {
    pub use_cdn: bool,
    pub script_only: bool,
    /// Also write the story data as `story.json`.
    pub json: bool,
    pub templates: Option<PathBuf>,
}

impl From<&Config> for BundleOptions {
    fn from(config: &Config) -> Self {
        Self {
            use_cdn: config.use_cdn,
            script_only: config.script_only,
            json: false,
            templates: config.templates.clone(),
        }
    }
}

/// Wraps the generated body in the story template.
pub fn story_js(template: &str, output: &Output) -> String {
    format!(
        "// Created with hilos {}\n\n(function(){{\n{}\n\n{}}})();\n",
        VERSION,
        template,
        output.to_js()
    )
}

/// Fills in the placeholders of the HTML shell.
pub fn index_html(template: &str, story: &Story, use_cdn: bool) -> String {
    let jquery = if use_cdn { JQUERY_CDN } else { JQUERY_LOCAL };
    let scripts = story
        .scripts
        .iter()
        .map(|script| format!("<script src='{}'></script>", script))
        .collect::<Vec<_>>()
        .join("\n");
    let stylesheets = story
        .stylesheets
        .iter()
        .map(|stylesheet| format!("<link rel='stylesheet' href='{}'/>", stylesheet))
        .collect::<Vec<_>>()
        .join("\n");

    template
        .replace(
            "<!-- INFO -->",
            &format!("<!--\n\nCreated with hilos {}\n\n-->", VERSION),
        )
        .replace("<!-- TITLE -->", &story.title)
        .replace("<!-- JQUERY -->", jquery)
        .replace("<!-- SCRIPTS -->", &scripts)
        .replace("<!-- STYLESHEETS -->", &stylesheets)
}

/// What [`write_bundle`] left in the output directory.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Written {
    /// Files written, in the order they were written.
    pub files: Vec<PathBuf>,
    /// Files `index.html` links to that are not in the output directory.
    pub missing: Vec<PathBuf>,
}

/// Writes the bundle into `output_dir`.
pub fn write_bundle(
    output_dir: &Path,
    story: &Story,
    output: &Output,
    options: &BundleOptions,
) -> Result<Written, CodegenError> {
    let templates = Templates::load(output_dir, options.templates.as_deref())?;
    let mut written = Written::default();

    let path = output_dir.join(STORY_JS);
    std::fs::write(&path, story_js(&templates.story, output))?;
    written.files.push(path);

    if options.json {
        let path = output_dir.join(STORY_JSON);
        std::fs::write(&path, output.to_json()?)?;
        written.files.push(path);
    }

    if options.script_only {
        return Ok(written);
    }

    let path = output_dir.join(INDEX_HTML);
    std::fs::write(&path, index_html(&templates.index, story, options.use_cdn))?;
    written.files.push(path);

    let path = output_dir.join(STYLE_CSS);
    std::fs::write(&path, &templates.style)?;
    written.files.push(path);

    if !options.use_cdn {
        let path = output_dir.join(JQUERY_LOCAL);
        if let Some(jquery) = options
            .templates
            .as_ref()
            .map(|dir| dir.join(JQUERY_LOCAL))
            .filter(|jquery| jquery.is_file() && *jquery != path)
        {
            std::fs::copy(&jquery, &path)?;
            written.files.push(path.clone());
        }
        if !path.is_file() {
            written.missing.push(path);
        }
    }

    Ok(written)
}
