use crate::error::{Error, Result};
use crate::render::Plugin;
use std::path::PathBuf;

/// File extension matched on input files (case-sensitive).
pub const MARKDOWN_EXTENSION: &str = "md";

/// File extension produced on output files.
pub const PUG_EXTENSION: &str = "pug";

/// What to convert: a single file, or a directory of Markdown files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSelection {
    /// Convert a single file.
    File(PathBuf),
    /// Convert every Markdown file found in a directory.
    Directory {
        /// Directory to search for Markdown files
        path: PathBuf,
        /// Whether to descend into subdirectories
        recursive: bool,
    },
}

impl InputSelection {
    /// Returns true if this selection is a single file.
    #[must_use]
    pub const fn is_file(&self) -> bool {
        matches!(self, Self::File(_))
    }
}

/// Configuration for a single conversion run.
///
/// Use [`Config::builder()`] to construct a new configuration. All state for a
/// run lives here; nothing is accumulated in process-wide variables.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct Config {
    /// Input selection (file or directory)
    pub input: InputSelection,

    /// Output directory; defaults to the resolved input directory when `None`
    pub output_dir: Option<PathBuf>,

    /// Rendering plugins enabled for this run
    pub plugins: Vec<Plugin>,

    /// Prompt for confirmation before writing anything
    pub safe: bool,
}

impl Config {
    /// Creates a new configuration builder.
    ///
    /// # Examples
    ///
    /// ```
    /// use md2pug::Config;
    ///
    /// let config = Config::builder()
    ///     .directory("./docs")
    ///     .recursive(true)
    ///     .build()
    ///     .expect("valid configuration");
    /// ```
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for [`Config`].
#[derive(Debug, Default, Clone)]
pub struct ConfigBuilder {
    file: Option<PathBuf>,
    directory: Option<PathBuf>,
    recursive: bool,
    output_dir: Option<PathBuf>,
    plugins: Vec<Plugin>,
    safe: bool,
}

impl ConfigBuilder {
    /// Selects a single input file.
    #[must_use]
    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    /// Selects an input directory.
    #[must_use]
    pub fn directory(mut self, path: impl Into<PathBuf>) -> Self {
        self.directory = Some(path.into());
        self
    }

    /// Enables descending into subdirectories (directory mode only).
    #[must_use]
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Sets the output directory. Must already exist as a directory.
    #[must_use]
    pub fn output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(path.into());
        self
    }

    /// Enables a rendering plugin.
    #[must_use]
    pub fn plugin(mut self, plugin: Plugin) -> Self {
        if !self.plugins.contains(&plugin) {
            self.plugins.push(plugin);
        }
        self
    }

    /// Enables the confirmation prompt before any write occurs.
    #[must_use]
    pub fn safe(mut self, safe: bool) -> Self {
        self.safe = safe;
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingInput`] unless exactly one of file or directory
    /// was selected.
    pub fn build(self) -> Result<Config> {
        let input = match (self.file, self.directory) {
            (Some(file), None) => InputSelection::File(file),
            (None, Some(path)) => InputSelection::Directory {
                path,
                recursive: self.recursive,
            },
            _ => return Err(Error::MissingInput),
        };

        Ok(Config {
            input,
            output_dir: self.output_dir,
            plugins: self.plugins,
            safe: self.safe,
        })
    }
}
