//! Uploaded file records and local input discovery.

use std::fmt;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{SweepError, SweepResult};

use super::classify::FileKind;

/// A file handed over by the upload collaborator. Immutable once received.
#[derive(Clone, PartialEq, Eq)]
pub struct UploadedFile {
    name: String,
    bytes: Vec<u8>,
}

impl UploadedFile {
    /// Create an upload from a display name (including extension) and its raw bytes.
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// Read a file from disk; the name is the final path component.
    pub fn from_path(path: impl AsRef<Path>) -> SweepResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self { name, bytes })
    }

    /// File name, including extension.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Size in bytes.
    pub fn size_bytes(&self) -> usize {
        self.bytes.len()
    }

    /// Raw content.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Classification of this file by extension.
    pub fn kind(&self) -> FileKind {
        FileKind::classify(&self.name)
    }
}

impl fmt::Debug for UploadedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadedFile")
            .field("name", &self.name)
            .field("size_bytes", &self.bytes.len())
            .finish()
    }
}

/// Expand command-line style inputs into a list of files.
///
/// - existing directories are walked recursively (files only, sorted by name)
/// - existing files are taken as-is
/// - anything else is treated as a glob pattern; a pattern matching nothing yields nothing
///
/// Order follows the inputs; a path reached twice is listed once.
pub fn discover_inputs<S: AsRef<str>>(inputs: &[S]) -> SweepResult<Vec<PathBuf>> {
    let mut out: Vec<PathBuf> = Vec::new();
    for input in inputs {
        let input = input.as_ref();
        let path = Path::new(input);
        if path.is_dir() {
            for entry in WalkDir::new(path).sort_by_file_name() {
                let entry = entry.map_err(std::io::Error::from)?;
                if entry.file_type().is_file() {
                    push_unique(&mut out, entry.into_path());
                }
            }
        } else if path.is_file() {
            push_unique(&mut out, path.to_path_buf());
        } else {
            for matched in glob::glob(input)? {
                let matched = matched.map_err(|e| SweepError::Io(e.into()))?;
                if matched.is_file() {
                    push_unique(&mut out, matched);
                }
            }
        }
    }
    Ok(out)
}

fn push_unique(out: &mut Vec<PathBuf>, path: PathBuf) {
    if !out.contains(&path) {
        out.push(path);
    }
}
