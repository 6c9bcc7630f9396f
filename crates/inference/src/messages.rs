//! Request bodies sent to interactor functions.

use serde::Serialize;
use shapeassist_core::geometry::Point2;
use shapeassist_core::types::{FrameNumber, TaskId};

/// Body of an interactor call: the clicks accumulated on one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RefineRequest {
    pub task: TaskId,
    pub frame: FrameNumber,
    /// Clicked points as `[x, y]` pairs, in click order.
    pub points: Vec<Point2>,
}
