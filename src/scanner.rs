use crate::{
    config::MARKDOWN_EXTENSION,
    error::{Error, Result},
    file::{has_binary_extension, is_likely_binary},
};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};
use walkdir::WalkDir;

/// Splits a single-file argument into its containing directory and base name.
///
/// The containing directory becomes the input root for the run; the returned
/// file path is relative to it.
///
/// # Errors
///
/// Returns [`Error::InvalidInputFile`] if the path does not exist or is not a
/// regular file, and [`Error::BinaryInput`] if the content looks binary.
pub(crate) fn resolve_file(path: &Path) -> Result<(PathBuf, PathBuf)> {
    if !path.is_file() {
        return Err(Error::invalid_input_file(path));
    }

    // Extension fast path first, then an actual content sniff.
    if has_binary_extension(path) || is_likely_binary(path)? {
        return Err(Error::binary_input(path));
    }

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let name = path
        .file_name()
        .map(PathBuf::from)
        .ok_or_else(|| Error::invalid_input_file(path))?;

    debug!("Resolved input file {} under {}", name.display(), dir.display());

    Ok((dir, name))
}

/// Lists the Markdown files in a directory, relative to it.
///
/// Non-recursive mode lists immediate children only; recursive mode walks the
/// full subtree. Entries are filtered to files whose extension matches
/// [`MARKDOWN_EXTENSION`] exactly (case-sensitive). The walk order is
/// deterministic (sorted by file name at each level), and the returned order
/// is the discovery order.
///
/// # Errors
///
/// Returns [`Error::InvalidInputDir`] if the path does not exist or is not a
/// directory, and [`Error::Io`] if a directory entry cannot be read.
pub(crate) fn collect_markdown_files(dir: &Path, recursive: bool) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(Error::invalid_input_dir(dir));
    }

    let mut walker = WalkDir::new(dir).min_depth(1).sort_by_file_name();
    if !recursive {
        walker = walker.max_depth(1);
    }

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(dir).to_path_buf();
            match e.into_io_error() {
                Some(io) => Error::io(path, io),
                None => Error::invalid_input_dir(path),
            }
        })?;

        if !entry.file_type().is_file() {
            continue;
        }

        if entry.path().extension().and_then(|ext| ext.to_str()) != Some(MARKDOWN_EXTENSION) {
            trace!("Skipping non-markdown file: {}", entry.path().display());
            continue;
        }

        let relative = pathdiff::diff_paths(entry.path(), dir)
            .unwrap_or_else(|| entry.path().to_path_buf());
        files.push(relative);
    }

    debug!("Collected {} markdown file(s) under {}", files.len(), dir.display());

    Ok(files)
}
