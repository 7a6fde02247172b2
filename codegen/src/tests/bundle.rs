use crate::*;
use hilos_parser::{parse_with, MemorySources};

fn story_with_imports() -> hilos_common::Story {
    let sources = MemorySources::new()
        .with_file(
            "/story/main.squiffy",
            "@title The Cave\n@import lib/*\n[[start]]:\nDark.",
        )
        .with_file("/story/lib/lamp.js", "")
        .with_file("/story/lib/cave.css", "");
    parse_with(&sources, "/story/main.squiffy").unwrap()
}

#[test]
fn test_index_html_placeholders() {
    let story = story_with_imports();
    let template = "<!-- INFO -->|<!-- TITLE -->|<!-- JQUERY -->|<!-- SCRIPTS -->|<!-- STYLESHEETS -->";

    let html = index_html(template, &story, false);

    let parts: Vec<&str> = html.split('|').collect();
    assert!(parts[0].contains(&format!("Created with hilos {}", VERSION)));
    assert_eq!(parts[1], "The Cave");
    assert_eq!(parts[2], JQUERY_LOCAL);
    assert_eq!(parts[3], "<script src='lib/lamp.js'></script>");
    assert_eq!(parts[4], "<link rel='stylesheet' href='lib/cave.css'/>");

    assert!(index_html(template, &story, true).contains(JQUERY_CDN));
}

#[test]
fn test_story_js_is_wrapped() {
    let story = story_with_imports();
    let output = generate(&story).output;

    let js = story_js("var hilos = {};", &output);

    assert!(js.starts_with(&format!(
        "// Created with hilos {}\n\n(function(){{\nvar hilos = {{}};\n",
        VERSION
    )));
    assert!(js.contains("hilos.story.start = 'start';\n"));
    assert!(js.ends_with("};\n})();\n"));
}

#[test]
fn test_write_bundle() {
    let dir = tempfile::tempdir().unwrap();
    let story = story_with_imports();
    let output = generate(&story).output;
    let options = BundleOptions {
        json: true,
        ..BundleOptions::default()
    };

    let written = write_bundle(dir.path(), &story, &output, &options).unwrap();

    let names: Vec<_> = written
        .files
        .iter()
        .map(|path| path.file_name().unwrap().to_str().unwrap())
        .collect();
    assert_eq!(names, vec![STORY_JS, STORY_JSON, INDEX_HTML, STYLE_CSS]);
    assert_eq!(written.missing, vec![dir.path().join(JQUERY_LOCAL)]);

    let html = std::fs::read_to_string(dir.path().join(INDEX_HTML)).unwrap();
    assert!(html.contains("<title>The Cave</title>"));
    let css = std::fs::read_to_string(dir.path().join(STYLE_CSS)).unwrap();
    assert_eq!(css, Templates::default().style);
    let json = std::fs::read_to_string(dir.path().join(STORY_JSON)).unwrap();
    assert!(json.contains("\"start\": \"start\""));
}

#[test]
fn test_script_only_writes_story_js() {
    let dir = tempfile::tempdir().unwrap();
    let story = story_with_imports();
    let output = generate(&story).output;
    let options = BundleOptions {
        script_only: true,
        ..BundleOptions::default()
    };

    let written = write_bundle(dir.path(), &story, &output, &options).unwrap();

    assert_eq!(written.files, vec![dir.path().join(STORY_JS)]);
    assert!(written.missing.is_empty());
    assert!(!dir.path().join(INDEX_HTML).exists());
}

#[test]
fn test_templates_dir_and_local_jquery() {
    let dir = tempfile::tempdir().unwrap();
    let templates = tempfile::tempdir().unwrap();
    std::fs::write(templates.path().join(STORY_TEMPLATE), "// custom").unwrap();
    std::fs::write(templates.path().join(JQUERY_LOCAL), "/* jquery */").unwrap();

    let story = story_with_imports();
    let output = generate(&story).output;
    let options = BundleOptions {
        templates: Some(templates.path().to_path_buf()),
        ..BundleOptions::default()
    };

    let written = write_bundle(dir.path(), &story, &output, &options).unwrap();

    assert_eq!(written.files.last(), Some(&dir.path().join(JQUERY_LOCAL)));
    assert!(written.missing.is_empty());
    let js = std::fs::read_to_string(dir.path().join(STORY_JS)).unwrap();
    assert!(js.contains("(function(){\n// custom\n"));
    assert_eq!(
        std::fs::read_to_string(dir.path().join(JQUERY_LOCAL)).unwrap(),
        "/* jquery */"
    );

    let cdn = BundleOptions {
        use_cdn: true,
        ..options
    };
    let other = tempfile::tempdir().unwrap();
    let written = write_bundle(other.path(), &story, &output, &cdn).unwrap();
    assert!(!other.path().join(JQUERY_LOCAL).exists());
    assert!(written.missing.is_empty());
}

#[test]
fn test_jquery_already_in_output_dir_is_not_missing() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(JQUERY_LOCAL), "/* jquery */").unwrap();
    let story = story_with_imports();
    let output = generate(&story).output;

    let written = write_bundle(dir.path(), &story, &output, &BundleOptions::default()).unwrap();

    assert!(written.missing.is_empty());
    assert!(!written.files.contains(&dir.path().join(JQUERY_LOCAL)));
}
