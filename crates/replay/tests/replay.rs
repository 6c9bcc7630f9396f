//! End-to-end replays against an in-process inference stub.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use shapeassist_core::geometry::Point2;
use shapeassist_core::interactor::Interactor;
use shapeassist_core::label::Label;
use shapeassist_core::types::TaskId;
use shapeassist_events::InteractionEvent;
use shapeassist_inference::{InferenceError, InferenceService, RefineRequest};
use shapeassist_replay::{replay, ReplayError, SessionScript};

/// Answers every call with the bounding square of the clicks, grown by 1.
#[derive(Default)]
struct BoundingSquare {
    calls: Mutex<Vec<RefineRequest>>,
}

#[async_trait]
impl InferenceService for BoundingSquare {
    async fn refine(
        &self,
        _task: TaskId,
        _interactor: &Interactor,
        request: &RefineRequest,
    ) -> Result<Vec<Point2>, InferenceError> {
        self.calls.lock().unwrap().push(request.clone());
        if request.points.len() < 2 {
            return Err(InferenceError::Rejected("need two clicks".to_string()));
        }

        let min_x = request.points.iter().map(|p| p.x).fold(f64::MAX, f64::min) - 1.0;
        let min_y = request.points.iter().map(|p| p.y).fold(f64::MAX, f64::min) - 1.0;
        let max_x = request.points.iter().map(|p| p.x).fold(f64::MIN, f64::max) + 1.0;
        let max_y = request.points.iter().map(|p| p.y).fold(f64::MIN, f64::max) + 1.0;
        Ok(vec![
            Point2::new(min_x, min_y),
            Point2::new(max_x, min_y),
            Point2::new(max_x, max_y),
            Point2::new(min_x, max_y),
        ])
    }
}

fn script(events: Vec<InteractionEvent>) -> SessionScript {
    SessionScript {
        task: 12,
        frame: 5,
        interactor: "segment_anything".to_string(),
        label: 3,
        labels: vec![Label::new(1, "car"), Label::new(3, "person")],
        interactors: Some(vec![
            Interactor::new("dextr", "DEXTR"),
            Interactor::new("segment_anything", "SAM"),
        ]),
        events,
    }
}

// ---------------------------------------------------------------------------
// Test: every event refines the same object
// ---------------------------------------------------------------------------

#[tokio::test]
async fn replays_all_events_into_one_object() {
    let inference = Arc::new(BoundingSquare::default());
    let report = replay(
        script(vec![
            InteractionEvent::points(vec![10.0, 10.0, 20.0, 20.0], 0),
            InteractionEvent::points(vec![10.0, 10.0, 30.0, 25.0], 0),
        ]),
        inference.clone(),
        8,
    )
    .await
    .unwrap();

    assert_eq!(report.refinements, 2);
    assert!(report.failures.is_empty());
    assert_eq!(report.objects.len(), 1);

    let object = &report.objects[0];
    assert_eq!(object.label_id, 3);
    assert_eq!(object.frame, 5);
    assert_eq!(object.points, vec![9.0, 9.0, 31.0, 9.0, 31.0, 26.0, 9.0, 26.0]);

    let calls = inference.calls.lock().unwrap();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].task, 12);
}

// ---------------------------------------------------------------------------
// Test: failed refinements are reported without aborting the replay
// ---------------------------------------------------------------------------

#[tokio::test]
async fn failures_are_collected() {
    let report = replay(
        script(vec![
            InteractionEvent::points(vec![10.0, 10.0], 0),
            InteractionEvent::points(vec![10.0, 10.0, 20.0], 0),
            InteractionEvent::points(vec![10.0, 10.0, 20.0, 20.0], 0),
        ]),
        Arc::new(BoundingSquare::default()),
        8,
    )
    .await
    .unwrap();

    assert_eq!(report.refinements, 3);
    assert_eq!(report.failures.len(), 2);
    assert!(report.failures[0].contains("need two clicks"));
    assert_eq!(report.objects.len(), 1);
}

// ---------------------------------------------------------------------------
// Test: an interactor missing from the server aborts before any event
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_interactor_is_an_error() {
    let mut script = script(vec![InteractionEvent::points(vec![1.0, 1.0, 2.0, 2.0], 0)]);
    script.interactor = "hrnet".to_string();
    let inference = Arc::new(BoundingSquare::default());

    let result = replay(script, inference.clone(), 8).await;

    assert!(matches!(result, Err(ReplayError::Session(_))));
    assert!(inference.calls.lock().unwrap().is_empty());
}
