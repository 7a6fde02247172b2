use crate::*;
use std::path::PathBuf;

fn story_from(sources: &MemorySources) -> Result<Story, ParseError> {
    parse_with(sources, "/story/main.squiffy")
}

#[test]
fn test_import_markup_scripts_and_stylesheets() {
    let sources = MemorySources::new()
        .with_file(
            "/story/main.squiffy",
            "@import parts/*\n[[start]]:\nGo to [[chapter]].",
        )
        .with_file("/story/parts/chapter.squiffy", "[[chapter]]:\nChapter text.")
        .with_file("/story/parts/extra.js", "")
        .with_file("/story/parts/theme.css", "")
        .with_file("/story/parts/notes.txt", "");

    let story = story_from(&sources).unwrap();

    assert_eq!(
        story.sections.keys().collect::<Vec<_>>(),
        vec!["chapter", "start"]
    );
    assert_eq!(story.scripts, vec!["parts/extra.js"]);
    assert_eq!(story.stylesheets, vec!["parts/theme.css"]);
    assert_eq!(
        story.processed_files,
        vec![
            PathBuf::from("/story/main.squiffy"),
            PathBuf::from("/story/parts/chapter.squiffy")
        ]
    );
}

#[test]
fn test_imports_are_depth_first_in_glob_order() {
    let sources = MemorySources::new()
        .with_file("/story/main.squiffy", "[[main]]:\n@import *.squiffy")
        .with_file("/story/b.squiffy", "[[b]]:\n@import sub/*.squiffy")
        .with_file("/story/a.squiffy", "[[a]]:")
        .with_file("/story/sub/c.squiffy", "[[c]]:");

    let story = story_from(&sources).unwrap();

    assert_eq!(
        story.sections.keys().collect::<Vec<_>>(),
        vec!["main", "a", "b", "c"]
    );
}

#[test]
fn test_cyclic_imports_are_scanned_once() {
    let sources = MemorySources::new()
        .with_file("/story/main.squiffy", "[[main]]:\n@import other.squiffy")
        .with_file("/story/other.squiffy", "[[other]]:\n@import main.squiffy\nText");

    let story = story_from(&sources).unwrap();

    assert_eq!(story.sections.keys().collect::<Vec<_>>(), vec!["main", "other"]);
    assert_eq!(story.processed_files.len(), 2);
    assert_eq!(story.section("other").unwrap().content.text, vec!["Text"]);
}

#[test]
fn test_diamond_imports_are_scanned_once() {
    let sources = MemorySources::new()
        .with_file(
            "/story/main.squiffy",
            "[[main]]:\n@import left.squiffy\n@import right.squiffy",
        )
        .with_file("/story/left.squiffy", "[[left]]:\n@import shared.squiffy")
        .with_file("/story/right.squiffy", "[[right]]:\n@import shared.squiffy")
        .with_file("/story/shared.squiffy", "[[shared]]:\n+++More\nDone");

    let story = story_from(&sources).unwrap();

    assert_eq!(
        story.sections.keys().collect::<Vec<_>>(),
        vec!["main", "left", "shared", "_continue1", "right"]
    );
    assert_eq!(story.processed_files.len(), 4);
}

#[test]
fn test_error_in_import_aborts() {
    let sources = MemorySources::new()
        .with_file("/story/main.squiffy", "[[main]]:\n@import bad.squiffy\nAfter")
        .with_file("/story/bad.squiffy", "[orphan]:\nNo section here");

    match story_from(&sources) {
        Err(ParseError::PassageWithoutSection {
            file,
            line,
            passage,
        }) => {
            assert_eq!(file, PathBuf::from("/story/bad.squiffy"));
            assert_eq!(line, 1);
            assert_eq!(passage, "orphan");
        }
        other => panic!("Expected PassageWithoutSection, got {:?}", other),
    }
}

#[test]
fn test_imported_file_does_not_get_default_section() {
    let sources = MemorySources::new()
        .with_file("/story/main.squiffy", "@import part.squiffy")
        .with_file("/story/part.squiffy", "Loose text\n[[part]]:\nText");

    let story = story_from(&sources).unwrap();

    assert_eq!(story.sections.keys().collect::<Vec<_>>(), vec!["part"]);
}

#[test]
fn test_continue_counter_is_per_file() {
    let sources = MemorySources::new()
        .with_file(
            "/story/main.squiffy",
            "[[main]]:\n+++On\n@import part.squiffy",
        )
        .with_file("/story/part.squiffy", "[[part]]:\n+++Further");

    let story = story_from(&sources).unwrap();

    assert_eq!(
        story.section("part").unwrap().content.text,
        vec!["[[Further]](_continue1)"]
    );
    assert_eq!(
        story.sections.keys().collect::<Vec<_>>(),
        vec!["main", "part", "_continue1"]
    );
}

#[test]
fn test_redeclared_section_takes_last_position() {
    // Redeclaring a name replaces the section and moves it to the end. This
    // documents current behavior rather than a guarantee.
    let sources = MemorySources::new()
        .with_file(
            "/story/main.squiffy",
            "[[intro]]:\nFirst\n[[middle]]:\n@import again.squiffy",
        )
        .with_file("/story/again.squiffy", "[[intro]]:\nSecond");

    let story = story_from(&sources).unwrap();

    assert_eq!(
        story.sections.keys().collect::<Vec<_>>(),
        vec!["middle", "intro"]
    );
    assert_eq!(story.section("intro").unwrap().content.text, vec!["Second"]);
}

#[test]
fn test_missing_import_matches_nothing() {
    let sources =
        MemorySources::new().with_file("/story/main.squiffy", "[[main]]:\n@import nothing/*.squiffy");

    let story = story_from(&sources).unwrap();
    assert_eq!(story.sections.len(), 1);
}

#[test]
fn test_self_import_through_parent_dir_is_scanned_once() {
    let sources = MemorySources::new()
        .with_file("/story/main.squiffy", "[[main]]:\n@import parts/a.squiffy")
        .with_file("/story/parts/a.squiffy", "[[a]]:\n@import ../parts/a.squiffy\nText");

    let story = story_from(&sources).unwrap();

    assert_eq!(story.sections.keys().collect::<Vec<_>>(), vec!["main", "a"]);
    assert_eq!(
        story.processed_files,
        vec![
            PathBuf::from("/story/main.squiffy"),
            PathBuf::from("/story/parts/a.squiffy")
        ]
    );
}

#[test]
fn test_diamond_import_through_current_dir_is_scanned_once() {
    let sources = MemorySources::new()
        .with_file(
            "/story/main.squiffy",
            "[[main]]:\n@import ./shared.squiffy\n@import left.squiffy",
        )
        .with_file("/story/left.squiffy", "[[left]]:\n@import shared.squiffy")
        .with_file("/story/shared.squiffy", "[[shared]]:\n+++More\nDone");

    let story = story_from(&sources).unwrap();

    assert_eq!(
        story.sections.keys().collect::<Vec<_>>(),
        vec!["main", "shared", "_continue1", "left"]
    );
    assert_eq!(
        story.processed_files,
        vec![
            PathBuf::from("/story/main.squiffy"),
            PathBuf::from("/story/shared.squiffy"),
            PathBuf::from("/story/left.squiffy")
        ]
    );
}

#[test]
fn test_scripts_imported_through_parent_dir_are_relative() {
    let sources = MemorySources::new()
        .with_file("/story/main.squiffy", "[[main]]:\n@import lib/../ui/*.js")
        .with_file("/story/ui/menu.js", "");

    let story = story_from(&sources).unwrap();

    assert_eq!(story.scripts, vec!["ui/menu.js"]);
}

#[test]
fn test_parent_dir_cycle_on_disk_terminates() {
    let temp = tempfile::tempdir().unwrap();
    let dir = temp.path();
    std::fs::create_dir(dir.join("parts")).unwrap();
    std::fs::write(
        dir.join("main.squiffy"),
        "[[main]]:\n@import parts/a.squiffy",
    )
    .unwrap();
    std::fs::write(
        dir.join("parts").join("a.squiffy"),
        "[[a]]:\n@import ../parts/a.squiffy\n@import ../main.squiffy",
    )
    .unwrap();

    let story = parse_file(dir.join("main.squiffy")).unwrap();

    assert_eq!(story.sections.keys().collect::<Vec<_>>(), vec!["main", "a"]);
    assert_eq!(story.processed_files.len(), 2);
    assert!(story
        .processed_files
        .iter()
        .all(|path| path.components().all(|c| c != std::path::Component::ParentDir)));
}
