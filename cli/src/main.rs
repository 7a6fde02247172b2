use clap::{Parser, Subcommand};
use colored::Colorize;
use hilos_codegen::{generate, story_id, write_bundle, BundleOptions, CodegenError};
use hilos_common::{Config, ConfigError, Story};
use hilos_parser::{normalize, ParseError};
use std::path::{Path, PathBuf};
/// Hilos - Compiles interactive fiction into a browser-playable bundle

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compile a story and write story.js, index.html and style.css next to it
    Build {
        /// Path to the entry .squiffy file
        input: PathBuf,
        /// Link jQuery from a CDN instead of copying jquery.min.js
        #[arg(long)]
        cdn: bool,
        /// Only write story.js
        #[arg(long)]
        script_only: bool,
        /// Also write the story data as story.json
        #[arg(long)]
        json: bool,
        /// Directory to look up templates in
        #[arg(long)]
        templates: Option<PathBuf>,
        /// Only print warnings and errors
        #[arg(short, long)]
        quiet: bool,
    },
    /// Compile a story in memory and print warnings and the generated sections
    Check {
        /// Path to the entry .squiffy file
        input: PathBuf,
    },
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Codegen(#[from] CodegenError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

fn main() {
    let cli = Args::parse();

    let result = match cli.command {
        Commands::Build {
            input,
            cdn,
            script_only,
            json,
            templates,
            quiet,
        } => {
            let flags = BundleOptions {
                use_cdn: cdn,
                script_only,
                json,
                templates,
            };
            build(&input, flags, quiet)
        }
        Commands::Check { input } => check(&input),
    };

    if let Err(err) = result {
        eprintln!("{} {}", "ERROR:".red().bold(), err);
        println!("Failed.");
        std::process::exit(1);
    }
}

fn build(input: &Path, flags: BundleOptions, quiet: bool) -> Result<(), CliError> {
    let input = std::path::absolute(input)
        .map(|path| normalize(&path))
        .map_err(|err| ParseError::CantReadFile {
            path: input.to_path_buf(),
            message: err.to_string(),
        })?;
    let output_dir = input.parent().unwrap_or_else(|| Path::new("."));

    let config = Config::load(output_dir)?;
    let options = merge_options(&config, flags);

    let mut story = hilos_parser::parse_file(&input)?;
    story.id = story_id(&input);

    if !quiet {
        print_loaded(&story);
    }

    let generated = generate(&story);
    for warning in &generated.warnings {
        println!("{} {}", "WARNING:".yellow().bold(), warning);
    }

    let written = write_bundle(output_dir, &story, &generated.output, &options)?;
    if !quiet {
        for path in &written.files {
            let name = path.file_name().unwrap_or(path.as_os_str());
            println!("Writing {}", name.to_string_lossy());
        }
    }
    for path in &written.missing {
        println!("{} {}", "NOTE:".yellow().bold(), missing_note(path));
    }
    if !quiet {
        println!("Done.");
    }

    Ok(())
}

fn check(input: &Path) -> Result<(), CliError> {
    let story = hilos_parser::parse_file(input)?;
    let generated = generate(&story);
    print!("{}", generated.report());
    Ok(())
}

/// Flags turn options on; they never turn off what `hilos.toml` enabled.
fn merge_options(config: &Config, flags: BundleOptions) -> BundleOptions {
    let mut options = BundleOptions::from(config);
    options.use_cdn |= flags.use_cdn;
    options.script_only |= flags.script_only;
    options.json = flags.json;
    if flags.templates.is_some() {
        options.templates = flags.templates;
    }
    options
}

fn missing_note(path: &Path) -> String {
    format!(
        "index.html links {}, which is missing. Copy it there, pass --templates with a directory that has it, or build with --cdn.",
        path.display()
    )
}

fn print_loaded(story: &Story) {
    for file in &story.processed_files {
        println!("Loading {}", file.display());
    }
}
