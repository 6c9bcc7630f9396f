//! Interactors: remote models that refine clicked points into a shape.
//!
//! The inference service lists every deployed function; only those of
//! kind [`FunctionKind::Interactor`] can drive an interactive session.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Clicks required before the canvas emits its first interaction event
/// when the function does not declare its own minimum.
pub const DEFAULT_MIN_POS_POINTS: u32 = 1;

/// Kind of a deployed inference function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FunctionKind {
    Detector,
    Interactor,
    Reid,
    Tracker,
    #[serde(other)]
    Unknown,
}

/// A reference to a remote model able to turn a point set into a polygon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interactor {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub kind: FunctionKind,
    /// Minimum number of positive clicks the model needs.
    #[serde(default = "default_min_pos_points")]
    pub min_pos_points: u32,
}

fn default_min_pos_points() -> u32 {
    DEFAULT_MIN_POS_POINTS
}

impl Interactor {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            kind: FunctionKind::Interactor,
            min_pos_points: DEFAULT_MIN_POS_POINTS,
        }
    }

    /// Minimum vertex count the canvas must collect before emitting.
    pub fn min_vertices(&self) -> u32 {
        self.min_pos_points.max(1)
    }
}

/// Keep only the functions usable as interactors, preserving order.
pub fn interactors_only(functions: Vec<Interactor>) -> Vec<Interactor> {
    functions
        .into_iter()
        .filter(|f| f.kind == FunctionKind::Interactor)
        .collect()
}

/// Look up an interactor by id in the host-supplied list.
pub fn find_interactor<'a>(
    interactors: &'a [Interactor],
    id: &str,
) -> Result<&'a Interactor, CoreError> {
    interactors
        .iter()
        .find(|interactor| interactor.id == id)
        .ok_or_else(|| CoreError::NotFound {
            entity: "interactor",
            id: id.to_string(),
        })
}
