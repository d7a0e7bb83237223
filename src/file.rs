use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

// Extensions a stray --file argument is likely to carry: images and media
// referenced from documents, exported docs, archives. Anything else falls
// through to the content sniff.
static BINARY_EXTENSIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "png", "jpg", "jpeg", "gif", "bmp", "ico", "webp", "mp3", "mp4", "avi", "mkv", "mov",
        "wav", "flac", "pdf", "doc", "docx", "xls", "xlsx", "ppt", "pptx", "odt", "zip", "tar",
        "gz", "bz2", "xz", "7z", "rar",
    ]
    .into_iter()
    .collect()
});

/// Reads a file as UTF-8 text.
///
/// # Errors
///
/// Returns [`Error::InvalidUtf8`] if the content is not valid UTF-8, or
/// [`Error::Io`] on any other read failure.
pub(crate) fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::InvalidData {
            Error::invalid_utf8(path)
        } else {
            Error::io(path, e)
        }
    })
}

/// Writes content to a file, creating all missing parent directories first.
///
/// An existing file at `path` is silently overwritten.
///
/// # Errors
///
/// Returns [`Error::Io`] on permission or disk failure.
pub(crate) fn write(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
    }
    fs::write(path, content).map_err(|e| Error::io(path, e))
}

/// Replaces the final extension component of a path with `extension`.
///
/// Directory components and the base name are preserved. A path without an
/// extension gets one appended. Pure function, no filesystem access.
#[must_use]
pub fn replace_extension(path: &Path, extension: &str) -> PathBuf {
    path.with_extension(extension)
}

/// Content sniff for files whose name gives nothing away.
///
/// Samples the first 8KB of the file: any null byte means binary, and a
/// sample that is mostly non-ASCII is treated as binary too. Markdown is
/// overwhelmingly ASCII even when it embeds UTF-8 prose.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read.
pub(crate) fn is_likely_binary(path: &Path) -> Result<bool> {
    const SAMPLE_SIZE: usize = 8192;
    const ASCII_THRESHOLD: f64 = 0.85;

    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    let mut reader = BufReader::with_capacity(SAMPLE_SIZE, file);
    let mut buffer = [0u8; SAMPLE_SIZE];

    let bytes_read = reader.read(&mut buffer).map_err(|e| Error::io(path, e))?;
    if bytes_read == 0 {
        return Ok(false);
    }

    let sample = &buffer[..bytes_read];
    if memchr::memchr(0, sample).is_some() {
        return Ok(true);
    }

    let ascii_count = sample.iter().filter(|b| b.is_ascii()).count();
    Ok((ascii_count as f64 / bytes_read as f64) < ASCII_THRESHOLD)
}

/// Checks if a file extension suggests a binary file.
#[must_use]
pub(crate) fn has_binary_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| BINARY_EXTENSIONS.contains(ext))
        .unwrap_or(false)
}
