//! User events received from the rendering collaborator.

use serde::{Deserialize, Serialize};

use crate::export::ExportFormat;
use crate::processing::CleaningRequest;

/// A user interaction with one file's controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum UserEvent {
    /// The "clean data" checkbox; cleaning actions are only accepted while it is on.
    SetCleaningEnabled(bool),
    /// A cleaning button press.
    Clean(CleaningRequest),
    /// The column multi-select changed.
    SelectColumns(Vec<String>),
    /// The "show visualization" checkbox.
    SetVisualization(bool),
    /// The conversion target radio.
    ChooseExportFormat(ExportFormat),
    /// The convert button.
    Convert,
}

/// A [`UserEvent`] addressed to a file by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopedEvent {
    /// Uploaded file name the event belongs to.
    pub file_name: String,
    /// The interaction.
    pub event: UserEvent,
}

impl ScopedEvent {
    /// Address `event` to `file_name`.
    pub fn new(file_name: impl Into<String>, event: UserEvent) -> Self {
        Self {
            file_name: file_name.into(),
            event,
        }
    }
}
