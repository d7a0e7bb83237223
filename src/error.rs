use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using the library's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while resolving inputs, walking directories and converting files.
#[derive(Error, Debug, Clone)]
#[non_exhaustive]
pub enum Error {
    /// Neither an input file nor an input directory was selected, or both were.
    #[error("no input file or directory specified")]
    MissingInput,

    /// The input file does not exist or is not a regular file.
    #[error("input is not a file or does not exist: '{path}'")]
    InvalidInputFile {
        /// The rejected path
        path: PathBuf,
    },

    /// The input file was classified as binary content.
    #[error("refusing to convert binary file: '{path}'")]
    BinaryInput {
        /// Path to the binary file
        path: PathBuf,
    },

    /// The input directory does not exist or is not a directory.
    #[error("input is not a directory or does not exist: '{path}'")]
    InvalidInputDir {
        /// The rejected path
        path: PathBuf,
    },

    /// The output directory does not exist or is not a directory.
    #[error("output is not a directory or does not exist: '{path}'")]
    InvalidOutputDir {
        /// The rejected path
        path: PathBuf,
    },

    /// The user declined the safe-mode confirmation prompt.
    #[error("aborted by user, nothing written")]
    Aborted,

    /// IO error with context about the file path.
    #[error("IO error accessing '{path}': {message}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// Error message
        message: String,
    },

    /// Invalid UTF-8 encountered in an input file.
    #[error("invalid UTF-8 encoding in file '{path}'")]
    InvalidUtf8 {
        /// Path to file with encoding issues
        path: PathBuf,
    },

    /// Reading the confirmation answer failed.
    #[error("failed to read confirmation answer: {message}")]
    Prompt {
        /// Error message
        message: String,
    },
}

impl Error {
    /// Creates an IO error with path context.
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Creates an invalid input file error.
    #[must_use]
    pub fn invalid_input_file(path: impl Into<PathBuf>) -> Self {
        Self::InvalidInputFile { path: path.into() }
    }

    /// Creates a binary input error.
    #[must_use]
    pub fn binary_input(path: impl Into<PathBuf>) -> Self {
        Self::BinaryInput { path: path.into() }
    }

    /// Creates an invalid input directory error.
    #[must_use]
    pub fn invalid_input_dir(path: impl Into<PathBuf>) -> Self {
        Self::InvalidInputDir { path: path.into() }
    }

    /// Creates an invalid output directory error.
    #[must_use]
    pub fn invalid_output_dir(path: impl Into<PathBuf>) -> Self {
        Self::InvalidOutputDir { path: path.into() }
    }

    /// Creates an invalid UTF-8 error.
    #[must_use]
    pub fn invalid_utf8(path: impl Into<PathBuf>) -> Self {
        Self::InvalidUtf8 { path: path.into() }
    }

    /// Returns the process exit code for this error.
    ///
    /// Validation errors map to distinct codes; IO failures during the
    /// convert loop share the generic failure code.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::MissingInput => 1,
            Self::InvalidInputFile { .. } => 2,
            Self::BinaryInput { .. } => 3,
            Self::InvalidInputDir { .. } => 4,
            Self::InvalidOutputDir { .. } => 5,
            Self::Aborted => 6,
            Self::Io { .. } | Self::InvalidUtf8 { .. } | Self::Prompt { .. } => 1,
        }
    }

    /// Returns true if this is an IO error.
    #[must_use]
    pub const fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }
}
