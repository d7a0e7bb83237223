use clap::Parser;
use colored::Colorize;
use md2pug::{Config, Error, Pipeline, Plugin, Result};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(
    name = "md2pug",
    version,
    disable_version_flag = true,
    about = "Convert your markdown files into pug code",
    long_about = "Batch-convert Markdown files into Pug templates.\n\n\
    Converts a single file or every Markdown file in a directory, writing the \
    results next to the inputs or into a separate output directory that mirrors \
    the input structure.\n\n\
    USAGE EXAMPLES:\n  \
      # Convert a single file in place\n  \
      md2pug --file notes.md\n\n  \
      # Convert a directory tree into ./templates\n  \
      md2pug --directory docs --recursive --output templates\n\n  \
      # Review the plan before anything is written\n  \
      md2pug --directory docs --safe"
)]
struct Cli {
    /// File to convert
    #[arg(short, long, value_name = "FILE", conflicts_with = "directory")]
    file: Option<PathBuf>,

    /// Convert every markdown file in this directory
    #[arg(short, long, value_name = "DIR")]
    directory: Option<PathBuf>,

    /// Where to save the converted files (directory, must exist)
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Convert the directory recursively
    #[arg(short, long)]
    recursive: bool,

    /// Add anchor ids to headings
    #[arg(short, long)]
    anchor: bool,

    /// Tag code blocks for highlight.js
    #[arg(short = 's', long)]
    syntax_highlight: bool,

    /// Show the input and output directories and the file list, and prompt
    /// before converting
    #[arg(short = 'S', long)]
    safe: bool,

    /// Verbose mode
    #[arg(short = 'V', long)]
    verbose: bool,

    /// Print the current version
    #[arg(short = 'v', long = "version", action = clap::ArgAction::Version)]
    version: Option<bool>,
}

fn main() {
    let cli = Cli::parse();

    setup_tracing(cli.verbose);

    if let Err(err) = try_main(cli) {
        eprintln!("{} {} {err}", "md2pug".magenta(), "ERROR".red().bold());
        process::exit(err.exit_code());
    }
}

fn try_main(cli: Cli) -> Result<()> {
    let mut builder = Config::builder()
        .recursive(cli.recursive)
        .safe(cli.safe);

    match (cli.file, cli.directory) {
        (Some(file), None) => builder = builder.file(file),
        (None, Some(directory)) => builder = builder.directory(directory),
        _ => return Err(Error::MissingInput),
    }

    if let Some(output) = cli.output {
        builder = builder.output_dir(output);
    }

    if cli.anchor {
        builder = builder.plugin(Plugin::Anchor);
    }

    if cli.syntax_highlight {
        builder = builder.plugin(Plugin::SyntaxHighlight);
    }

    let config = builder.build()?;

    Pipeline::new(config)?.run()?;

    Ok(())
}

fn setup_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("md2pug=debug")
    } else {
        EnvFilter::new("md2pug=warn")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_thread_ids(false))
        .init();
}
