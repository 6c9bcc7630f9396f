//! Canvas geometry payloads and point pairing.
//!
//! The canvas reports every shape as a flat coordinate list
//! (`[x0, y0, x1, y1, ...]`) tagged with its `shapeType`. Inference works on
//! explicit `[x, y]` pairs, so clicks are flattened across all point shapes
//! and then paired in order.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A 2-D point in image coordinates. Serialized as `[x, y]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<[f64; 2]> for Point2 {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Point2> for [f64; 2] {
    fn from(p: Point2) -> Self {
        [p.x, p.y]
    }
}

/// Shape kinds known to the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Points,
    Polygon,
    Polyline,
    Rectangle,
    Ellipse,
    Cuboid,
}

/// A shape as emitted by the canvas, tagged by `shapeType`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shapeType", rename_all = "lowercase")]
pub enum CanvasShape {
    Points { points: Vec<f64> },
    Polygon { points: Vec<f64> },
    Polyline { points: Vec<f64> },
    Rectangle { points: Vec<f64> },
    Ellipse { points: Vec<f64> },
    Cuboid { points: Vec<f64> },
}

impl CanvasShape {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Points { .. } => ShapeKind::Points,
            Self::Polygon { .. } => ShapeKind::Polygon,
            Self::Polyline { .. } => ShapeKind::Polyline,
            Self::Rectangle { .. } => ShapeKind::Rectangle,
            Self::Ellipse { .. } => ShapeKind::Ellipse,
            Self::Cuboid { .. } => ShapeKind::Cuboid,
        }
    }

    /// Coordinates that count as user clicks. Only point shapes contribute.
    fn clicks(&self) -> &[f64] {
        match self {
            Self::Points { points } => points.as_slice(),
            Self::Polygon { .. }
            | Self::Polyline { .. }
            | Self::Rectangle { .. }
            | Self::Ellipse { .. }
            | Self::Cuboid { .. } => &[],
        }
    }
}

/// Pair a flat coordinate list into ordered points.
///
/// Fails with [`CoreError::Validation`] when the count is odd.
pub fn pair_coordinates(coords: &[f64]) -> Result<Vec<Point2>, CoreError> {
    if coords.len() % 2 != 0 {
        return Err(CoreError::Validation(format!(
            "point list must contain an even number of coordinates, got {}",
            coords.len()
        )));
    }

    Ok(coords
        .chunks_exact(2)
        .map(|pair| Point2::new(pair[0], pair[1]))
        .collect())
}

/// Collect the clicked points of an interaction event.
///
/// Coordinates of every point shape are concatenated in order and then
/// paired, so the parity check applies to the total count.
pub fn collect_clicked_points(shapes: &[CanvasShape]) -> Result<Vec<Point2>, CoreError> {
    let coords: Vec<f64> = shapes
        .iter()
        .flat_map(|shape| shape.clicks().iter().copied())
        .collect();
    pair_coordinates(&coords)
}

/// Flatten points back into the `[x0, y0, x1, y1, ...]` storage layout.
pub fn flatten_points(points: &[Point2]) -> Vec<f64> {
    points.iter().flat_map(|p| [p.x, p.y]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn pairs_even_coordinate_list_in_order() {
        let points = pair_coordinates(&[10.0, 10.0, 20.0, 10.0, 20.0, 20.0]).unwrap();
        assert_eq!(
            points,
            vec![
                Point2::new(10.0, 10.0),
                Point2::new(20.0, 10.0),
                Point2::new(20.0, 20.0)
            ]
        );
    }

    #[test]
    fn odd_coordinate_count_is_rejected() {
        assert_matches!(
            pair_coordinates(&[1.0, 2.0, 3.0]),
            Err(CoreError::Validation(msg)) if msg.contains("got 3")
        );
    }

    #[test]
    fn empty_list_pairs_to_nothing() {
        assert!(pair_coordinates(&[]).unwrap().is_empty());
    }

    #[test]
    fn pair_count_is_half_the_coordinate_count() {
        for n in (0..40).step_by(2) {
            let coords: Vec<f64> = (0..n).map(|i| i as f64).collect();
            let points = pair_coordinates(&coords).unwrap();
            assert_eq!(points.len(), n / 2);
            assert_eq!(flatten_points(&points), coords);
        }
    }

    #[test]
    fn only_point_shapes_contribute_clicks() {
        let shapes = vec![
            CanvasShape::Points {
                points: vec![1.0, 2.0],
            },
            CanvasShape::Rectangle {
                points: vec![0.0, 0.0, 5.0, 5.0],
            },
            CanvasShape::Points {
                points: vec![3.0, 4.0, 5.0, 6.0],
            },
        ];

        let points = collect_clicked_points(&shapes).unwrap();
        assert_eq!(
            points,
            vec![
                Point2::new(1.0, 2.0),
                Point2::new(3.0, 4.0),
                Point2::new(5.0, 6.0)
            ]
        );
    }

    #[test]
    fn parity_is_checked_on_the_concatenated_list() {
        // 3 + 3 coordinates: pairs straddle the shape boundary.
        let shapes = vec![
            CanvasShape::Points {
                points: vec![1.0, 2.0, 3.0],
            },
            CanvasShape::Points {
                points: vec![4.0, 5.0, 6.0],
            },
        ];
        let points = collect_clicked_points(&shapes).unwrap();
        assert_eq!(points.len(), 3);
        assert_eq!(points[1], Point2::new(3.0, 4.0));

        let odd = vec![CanvasShape::Points {
            points: vec![1.0, 2.0, 3.0],
        }];
        assert!(collect_clicked_points(&odd).is_err());
    }

    #[test]
    fn shape_json_uses_shape_type_tag() {
        let shape: CanvasShape =
            serde_json::from_str(r#"{"shapeType": "points", "points": [1, 2]}"#).unwrap();
        assert_eq!(shape.kind(), ShapeKind::Points);

        let json = serde_json::to_value(CanvasShape::Polygon {
            points: vec![0.0, 1.0],
        })
        .unwrap();
        assert_eq!(json["shapeType"], "polygon");
    }

    #[test]
    fn point_serializes_as_pair() {
        let json = serde_json::to_string(&vec![Point2::new(9.0, 9.0)]).unwrap();
        assert_eq!(json, "[[9.0,9.0]]");

        let parsed: Vec<Point2> = serde_json::from_str("[[21, 9], [21.5, 21]]").unwrap();
        assert_eq!(parsed[1], Point2::new(21.5, 21.0));
    }
}
