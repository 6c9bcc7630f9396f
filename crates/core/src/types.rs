/// Identifier assigned by the annotation collection once an object is persisted.
pub type ClientId = i64;

/// Identifier of the annotation task the canvas is showing.
pub type TaskId = i64;

/// Label identifiers are supplied by the host.
pub type LabelId = i64;

/// Zero-based frame index within the task.
pub type FrameNumber = u32;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
