// ABOUTME: Main entry point for the slidev-convert program.
// ABOUTME: Provides CLI interface and dispatches single, batch, markup and demo conversions.

use anyhow::Context;
use clap::Parser;
use slidev_converter::{Config, Converter};
use std::fs;
use std::path::{Path, PathBuf};

/// Heading/bullet document converted when no input is given
const DEMO_DOCUMENT: &str = r#"
# ESSENTIAL Generative AI Tips ALL Java Developers NEED To Master in 2025

## Spring AI
* If you're invested in the Spring framework, this has everything you need
* Use configuration properties to configure multiple AI models

## LangChain4j
* Define and use AI services. They rock.
* The langchain4j-examples repo has a sample for everything
"#;

const DEMO_TITLE: &str = "Essential AI Tips for Java Developers 2025";

/// Convert presentations to Slidev format
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// PowerPoint file, heading/bullet document, or directory of .pptx files
    input: Option<PathBuf>,

    /// Output directory
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Presenter name for the header and closing slide
    #[arg(long)]
    author: Option<String>,

    /// Presentation title for heading/bullet documents
    #[arg(long)]
    title: Option<String>,

    /// Include speaker notes as Slidev note comments
    #[arg(long)]
    notes: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let mut config = Config::from_env();
    if let Some(author) = &cli.author {
        config = config.with_author(author.as_str());
    }
    if cli.notes {
        config.include_notes = true;
    }
    let output_root = cli.output.clone().unwrap_or_else(|| config.output_dir.clone());
    let converter = Converter::new(config);

    match &cli.input {
        Some(input) if input.is_dir() => {
            println!("Executing batch conversion of {:?}...", input);
            let report = converter.batch_convert(input, &output_root)?;
            for (deck, reason) in &report.failures {
                eprintln!("Error converting {:?}: {}", deck, reason);
            }
            println!(
                "Batch conversion complete! Converted {} files ({} failed)",
                report.outputs.len(),
                report.failures.len()
            );
        }
        Some(input) if is_pptx(input) => {
            println!("Executing PowerPoint conversion of {:?}...", input);
            let output = converter.convert_pptx(input, &output_root)?;
            println!("Conversion complete! File saved to: {:?}", output);
        }
        Some(input) => {
            println!("Executing document conversion of {:?}...", input);
            let content = fs::read_to_string(input)
                .with_context(|| format!("Failed to read {:?}", input))?;
            let title = cli.title.clone().unwrap_or_else(|| {
                input
                    .file_stem()
                    .map(|stem| stem.to_string_lossy().to_string())
                    .unwrap_or_else(|| DEMO_TITLE.to_string())
            });
            let output = converter.convert_markup(&content, &title, &output_root)?;
            println!("Conversion complete! File saved to: {:?}", output);
        }
        None => {
            println!("No input specified. Converting the built-in demo document...");
            let title = cli.title.as_deref().unwrap_or(DEMO_TITLE);
            let output = converter.convert_markup(DEMO_DOCUMENT, title, &output_root)?;
            println!("Demo conversion complete! File saved to: {:?}", output);
        }
    }

    println!();
    println!("To view your presentation:");
    println!("1. cd [output-directory]/[presentation-name]/");
    println!("2. npm install -g @slidev/cli");
    println!("3. slidev");
    Ok(())
}

fn is_pptx(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("pptx"))
        .unwrap_or(false)
}
