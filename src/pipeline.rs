use crate::{
    config::{Config, InputSelection, PUG_EXTENSION},
    error::{Error, Result},
    file,
    render::Renderer,
    scanner,
};
use colored::Colorize;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument};

/// Answers the safe-mode confirmation question.
///
/// The production implementation blocks on standard input; tests substitute a
/// deterministic answer source.
pub trait ConfirmSource {
    /// Asks the question and returns the user's yes/no answer.
    ///
    /// # Errors
    ///
    /// Returns an error if the answer cannot be read.
    fn confirm(&mut self, question: &str) -> Result<bool>;
}

/// Interactive confirmation over stdin. Anything other than `y`/`yes`
/// (case-insensitive) is a decline.
#[derive(Debug, Default)]
pub struct StdinConfirm;

impl ConfirmSource for StdinConfirm {
    fn confirm(&mut self, question: &str) -> Result<bool> {
        print!("{question} [y/N] ");
        io::stdout().flush().map_err(|e| Error::Prompt {
            message: e.to_string(),
        })?;

        let mut answer = String::new();
        io::stdin().read_line(&mut answer).map_err(|e| Error::Prompt {
            message: e.to_string(),
        })?;

        Ok(matches!(
            answer.trim().to_ascii_lowercase().as_str(),
            "y" | "yes"
        ))
    }
}

/// Result of a completed conversion run.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct RunStats {
    /// Number of files converted and written
    pub files_converted: usize,

    /// Resolved input directory
    pub input_dir: PathBuf,

    /// Resolved output directory
    pub output_dir: PathBuf,

    /// Total execution time
    pub duration: Duration,
}

/// The resolved work for one run: input root, output root and the ordered
/// list of relative file paths to convert. Immutable once built.
#[derive(Debug)]
struct Plan {
    input_dir: PathBuf,
    output_dir: PathBuf,
    files: Vec<PathBuf>,
}

impl Plan {
    /// Validates the configured paths eagerly and collects the file list,
    /// before any conversion work begins. Input is checked first, then the
    /// output directory, then the file list is built.
    fn resolve(config: &Config) -> Result<Self> {
        match &config.input {
            InputSelection::File(path) => {
                let (input_dir, name) = scanner::resolve_file(path)?;
                let output_dir = Self::resolve_output(config, &input_dir)?;
                Ok(Self {
                    input_dir,
                    output_dir,
                    files: vec![name],
                })
            }
            InputSelection::Directory { path, recursive } => {
                if !path.is_dir() {
                    return Err(Error::invalid_input_dir(path));
                }
                let output_dir = Self::resolve_output(config, path)?;
                let files = scanner::collect_markdown_files(path, *recursive)?;
                Ok(Self {
                    input_dir: path.clone(),
                    output_dir,
                    files,
                })
            }
        }
    }

    /// An explicit output directory must already exist; otherwise the output
    /// defaults to the resolved input directory.
    fn resolve_output(config: &Config, input_dir: &Path) -> Result<PathBuf> {
        match &config.output_dir {
            Some(path) => {
                if !path.is_dir() {
                    return Err(Error::invalid_output_dir(path));
                }
                Ok(path.clone())
            }
            None => Ok(input_dir.to_path_buf()),
        }
    }
}

/// Drives a full conversion run: validate, collect, confirm, convert.
pub struct Pipeline {
    config: Config,
    plan: Plan,
    confirm: Box<dyn ConfirmSource>,
}

impl Pipeline {
    /// Creates a pipeline with the interactive stdin confirmation source.
    ///
    /// All path validation happens here, before any file is touched.
    ///
    /// # Errors
    ///
    /// Returns an error if the input file/directory or the output directory
    /// fails validation.
    pub fn new(config: Config) -> Result<Self> {
        Self::with_confirm_source(config, Box::new(StdinConfirm))
    }

    /// Creates a pipeline with a custom confirmation source.
    ///
    /// # Errors
    ///
    /// Same as [`Pipeline::new`].
    pub fn with_confirm_source(
        config: Config,
        confirm: Box<dyn ConfirmSource>,
    ) -> Result<Self> {
        let plan = Plan::resolve(&config)?;
        Ok(Self {
            config,
            plan,
            confirm,
        })
    }

    /// Runs the conversion loop.
    ///
    /// Each file is read, rendered and written in discovery order. A failing
    /// read or write aborts the remaining batch.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Aborted`] if the user declines the safe-mode prompt,
    /// or the first IO/encoding error hit during the loop.
    #[instrument(skip(self), fields(input_dir = %self.plan.input_dir.display()))]
    pub fn run(mut self) -> Result<RunStats> {
        let start = Instant::now();

        info!("Input directory: {}", self.plan.input_dir.display());
        info!("Output directory: {}", self.plan.output_dir.display());
        for plugin in &self.config.plugins {
            info!("Using {} plugin", plugin);
        }

        if self.config.safe {
            self.print_plan();
            if !self.confirm.confirm("Do you want to continue?")? {
                info!("User declined, nothing written");
                return Err(Error::Aborted);
            }
        }

        let renderer = Renderer::new(&self.config.plugins);

        for relative in &self.plan.files {
            let source = self.plan.input_dir.join(relative);
            let destination = self
                .plan
                .output_dir
                .join(file::replace_extension(relative, PUG_EXTENSION));

            info!(
                "Converting {} to {}",
                source.display(),
                destination.display()
            );

            let markdown = file::read_to_string(&source)?;
            let pug = renderer.render(&markdown);
            file::write(&destination, &pug)?;
        }

        let duration = start.elapsed();
        debug!(
            "Converted {} file(s) in {:.2}s",
            self.plan.files.len(),
            duration.as_secs_f64()
        );

        Ok(RunStats {
            files_converted: self.plan.files.len(),
            input_dir: self.plan.input_dir,
            output_dir: self.plan.output_dir,
            duration,
        })
    }

    /// Prints the resolved directories and the enumerated file list before
    /// the confirmation prompt.
    fn print_plan(&self) {
        println!(
            "Input directory:  {}",
            self.plan.input_dir.display().to_string().blue()
        );
        println!(
            "Output directory: {}",
            self.plan.output_dir.display().to_string().blue()
        );
        println!("Files to convert:");
        for (index, relative) in self.plan.files.iter().enumerate() {
            println!(
                "  {:>3}. {}",
                index + 1,
                relative.display().to_string().blue()
            );
        }
    }
}
