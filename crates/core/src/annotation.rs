//! Annotation objects owned by the host collection.
//!
//! The assistant only ever creates polygons, but the loaded objects it
//! searches may be of any kind.

use serde::{Deserialize, Serialize};

use crate::geometry::{flatten_points, Point2};
use crate::types::{ClientId, FrameNumber, LabelId};

/// Geometry kind of a stored annotation object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectShape {
    Polygon,
    Polyline,
    Points,
    Rectangle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    #[default]
    Visible,
    Hidden,
}

/// A shape stored in the annotation collection.
///
/// `client_id` is `None` until the collection has persisted the object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectState {
    pub client_id: Option<ClientId>,
    pub frame: FrameNumber,
    pub label_id: LabelId,
    pub shape: ObjectShape,
    /// Flat `[x0, y0, x1, y1, ...]` coordinates.
    pub points: Vec<f64>,
    pub visibility: Visibility,
    pub z_order: i32,
}

impl ObjectState {
    /// Build a new, not yet persisted, visible polygon.
    pub fn polygon(frame: FrameNumber, label_id: LabelId, points: &[Point2], z_order: i32) -> Self {
        Self {
            client_id: None,
            frame,
            label_id,
            shape: ObjectShape::Polygon,
            points: flatten_points(points),
            visibility: Visibility::Visible,
            z_order,
        }
    }

    /// Replace the geometry in place, keeping identity and metadata.
    pub fn replace_points(&mut self, points: &[Point2]) {
        self.points = flatten_points(points);
    }

    pub fn vertex_count(&self) -> usize {
        self.points.len() / 2
    }
}

/// Find a loaded object by its collection-assigned id.
pub fn find_object(objects: &[ObjectState], client_id: ClientId) -> Option<&ObjectState> {
    objects.iter().find(|o| o.client_id == Some(client_id))
}
