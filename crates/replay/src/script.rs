//! Recorded session scripts.
//!
//! A script captures what a user did during one interaction session: the
//! task and frame, the chosen interactor and label, and every canvas
//! interaction in order.
//!
//! ```json
//! {
//!   "task": 12,
//!   "frame": 5,
//!   "interactor": "segment_anything",
//!   "label": 3,
//!   "labels": [{"id": 3, "name": "person"}],
//!   "events": [{"shapes": [{"shapeType": "points", "points": [10, 10]}]}]
//! }
//! ```

use std::path::Path;

use serde::Deserialize;
use shapeassist_core::interactor::Interactor;
use shapeassist_core::label::{find_label, Label};
use shapeassist_core::types::{FrameNumber, LabelId, TaskId};
use shapeassist_events::InteractionEvent;

#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("Failed to read session script {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid session script: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid session script: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SessionScript {
    pub task: TaskId,
    pub frame: FrameNumber,
    /// Interactor id to select.
    pub interactor: String,
    /// Label id to select.
    pub label: LabelId,
    pub labels: Vec<Label>,
    /// Available interactors; fetched from the inference server when absent.
    #[serde(default)]
    pub interactors: Option<Vec<Interactor>>,
    pub events: Vec<InteractionEvent>,
}

impl SessionScript {
    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ScriptError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&raw)
    }

    pub fn parse(raw: &str) -> Result<Self, ScriptError> {
        let script: Self = serde_json::from_str(raw)?;
        script.validate()?;
        Ok(script)
    }

    /// Check the script is replayable before anything is started.
    fn validate(&self) -> Result<(), ScriptError> {
        find_label(&self.labels, self.label).map_err(|e| ScriptError::Invalid(e.to_string()))?;
        if self.events.is_empty() {
            return Err(ScriptError::Invalid("no interaction events".to_string()));
        }
        Ok(())
    }
}
