//! Canvas-side contract: the events it emits and the interact command.

use serde::{Deserialize, Serialize};
use shapeassist_core::geometry::{CanvasShape, ShapeKind};

/// A completed point-based interaction gesture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionEvent {
    pub shapes: Vec<CanvasShape>,
    #[serde(default)]
    pub z_order: i32,
}

impl InteractionEvent {
    /// Event carrying a single point shape, the common case.
    pub fn points(coords: Vec<f64>, z_order: i32) -> Self {
        Self {
            shapes: vec![CanvasShape::Points { points: coords }],
            z_order,
        }
    }
}

/// Events published by the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CanvasEvent {
    /// The user finished an interaction gesture.
    Interacted(InteractionEvent),
    /// The active canvas tool was cancelled.
    Canceled,
}

/// Argument of the canvas `interact` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractOptions {
    pub shape_type: ShapeKind,
    pub min_vertices: u32,
    pub enabled: bool,
}

impl InteractOptions {
    /// Start collecting clicks as point shapes.
    pub fn collect_points(min_vertices: u32) -> Self {
        Self {
            shape_type: ShapeKind::Points,
            min_vertices,
            enabled: true,
        }
    }

    /// Stop point collection.
    pub fn disabled() -> Self {
        Self {
            shape_type: ShapeKind::Points,
            min_vertices: 0,
            enabled: false,
        }
    }
}
