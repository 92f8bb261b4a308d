//! File classification by extension.

use std::fmt;

use serde::Serialize;

/// What an uploaded file is, derived from the lowercase suffix of its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FileKind {
    /// Comma-separated values (`.csv`).
    TabularCsv,
    /// Excel workbook (`.xlsx`).
    TabularXlsx,
    /// Raster image (`.png`, `.jpg`, `.jpeg`).
    Image,
    /// Text shown as a code block (`.txt`, `.json`, `.html`).
    TextLike,
    /// Anything else. Accepted, but not previewable.
    Unsupported,
}

impl FileKind {
    /// Classify a file name. Never fails: unknown or missing extensions are
    /// [`FileKind::Unsupported`].
    pub fn classify(name: &str) -> Self {
        match extension_of(name).as_deref() {
            Some("csv") => Self::TabularCsv,
            Some("xlsx") => Self::TabularXlsx,
            Some("png" | "jpg" | "jpeg") => Self::Image,
            Some("txt" | "json" | "html") => Self::TextLike,
            _ => Self::Unsupported,
        }
    }

    /// Returns `true` for kinds that parse into a [`crate::types::Table`].
    pub fn is_tabular(self) -> bool {
        matches!(self, Self::TabularCsv | Self::TabularXlsx)
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::TabularCsv => "tabular-csv",
            Self::TabularXlsx => "tabular-xlsx",
            Self::Image => "image",
            Self::TextLike => "text-like",
            Self::Unsupported => "unsupported",
        })
    }
}

/// Lowercase text after the last `.` of `name`, if any.
///
/// A leading dot alone (`.bashrc`) does not count as an extension.
pub fn extension_of(name: &str) -> Option<String> {
    match name.rfind('.') {
        Some(idx) if idx > 0 && idx + 1 < name.len() => Some(name[idx + 1..].to_ascii_lowercase()),
        _ => None,
    }
}

/// The extension as shown to users: lowercase with a leading dot, or empty.
pub fn display_extension(name: &str) -> String {
    extension_of(name).map(|e| format!(".{e}")).unwrap_or_default()
}
