//! Annotation labels (classification categories).

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::LabelId;

/// A classification category supplied by the host application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub id: LabelId,
    pub name: String,
    /// Display color as `#RRGGBB`, when the host provides one.
    #[serde(default)]
    pub color: Option<String>,
}

impl Label {
    pub fn new(id: LabelId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            color: None,
        }
    }
}

/// Look up a label by id in the host-supplied list.
pub fn find_label(labels: &[Label], id: LabelId) -> Result<&Label, CoreError> {
    labels
        .iter()
        .find(|label| label.id == id)
        .ok_or_else(|| CoreError::NotFound {
            entity: "label",
            id: id.to_string(),
        })
}
