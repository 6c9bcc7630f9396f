#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use shapeassist_core::geometry::Point2;
use shapeassist_core::interactor::Interactor;
use shapeassist_core::label::Label;
use shapeassist_core::types::TaskId;
use shapeassist_events::{EventBus, InteractOptions, Notification};
use shapeassist_inference::{InferenceError, InferenceService, RefineRequest};
use shapeassist_pipeline::canvas::Canvas;
use shapeassist_pipeline::{
    Collaborators, HostActions, MemoryWorkspace, SessionSnapshot, ShapeAssistant,
};
use tokio::sync::{broadcast, watch, Notify};

pub const TASK: TaskId = 12;
pub const FRAME: u32 = 5;
pub const WAIT: Duration = Duration::from_secs(5);

pub fn pts(coords: &[f64]) -> Vec<Point2> {
    coords.chunks(2).map(|c| Point2::new(c[0], c[1])).collect()
}

/// Inference stub answering from a queue and recording every call.
#[derive(Default)]
pub struct ScriptedInference {
    responses: Mutex<VecDeque<Result<Vec<Point2>, InferenceError>>>,
    calls: Mutex<Vec<(String, RefineRequest)>>,
    gate: Mutex<Option<Arc<Notify>>>,
}

impl ScriptedInference {
    pub fn respond(&self, points: Vec<Point2>) {
        self.responses.lock().unwrap().push_back(Ok(points));
    }

    pub fn fail(&self, reason: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(InferenceError::Rejected(reason.to_string())));
    }

    /// Hold every later call until the returned gate is notified, one
    /// `notify_one` per call.
    pub fn hold(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.gate.lock().unwrap() = Some(Arc::clone(&gate));
        gate
    }

    /// `(interactor id, request)` for each call, in order.
    pub fn calls(&self) -> Vec<(String, RefineRequest)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl InferenceService for ScriptedInference {
    async fn refine(
        &self,
        _task: TaskId,
        interactor: &Interactor,
        request: &RefineRequest,
    ) -> Result<Vec<Point2>, InferenceError> {
        self.calls
            .lock()
            .unwrap()
            .push((interactor.id.clone(), request.clone()));

        let gate = self.gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(InferenceError::Rejected("no scripted response".into())))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CanvasCommand {
    Cancel,
    Interact(InteractOptions),
}

#[derive(Default)]
pub struct RecordingCanvas {
    commands: Mutex<Vec<CanvasCommand>>,
}

impl RecordingCanvas {
    pub fn commands(&self) -> Vec<CanvasCommand> {
        self.commands.lock().unwrap().clone()
    }
}

impl Canvas for RecordingCanvas {
    fn interact(&self, options: InteractOptions) {
        self.commands
            .lock()
            .unwrap()
            .push(CanvasCommand::Interact(options));
    }

    fn cancel(&self) {
        self.commands.lock().unwrap().push(CanvasCommand::Cancel);
    }
}

pub fn segment_anything() -> Interactor {
    Interactor::new("segment_anything", "Segment Anything")
}

pub struct Harness {
    pub workspace: Arc<MemoryWorkspace>,
    pub inference: Arc<ScriptedInference>,
    pub canvas: Arc<RecordingCanvas>,
    pub notifications: Arc<EventBus<Notification>>,
    pub notes: broadcast::Receiver<Notification>,
    pub assistant: Arc<ShapeAssistant>,
}

impl Harness {
    /// Task 12, frame 5, interactor `segment_anything`, labels 3 and 7.
    pub fn new() -> Self {
        let workspace = Arc::new(MemoryWorkspace::new(
            TASK,
            FRAME,
            vec![segment_anything()],
            vec![Label::new(3, "person"), Label::new(7, "car")],
        ));
        Self::with_host(Arc::clone(&workspace), workspace)
    }

    /// Harness whose host actions go through `host` instead of the
    /// workspace itself.
    pub fn with_host(workspace: Arc<MemoryWorkspace>, host: Arc<dyn HostActions>) -> Self {
        let inference = Arc::new(ScriptedInference::default());
        let canvas = Arc::new(RecordingCanvas::default());
        let notifications = Arc::new(EventBus::new(16));
        let notes = notifications.subscribe();

        let collaborators = Collaborators {
            inference: inference.clone(),
            collection: workspace.clone(),
            host,
            canvas: canvas.clone(),
        };
        let assistant = Arc::new(ShapeAssistant::new(
            collaborators,
            workspace.subscribe(),
            Arc::clone(&notifications),
        ));

        Self {
            workspace,
            inference,
            canvas,
            notifications,
            notes,
            assistant,
        }
    }

    /// Start a session and let the assistant observe interaction mode.
    pub async fn start(&self) {
        self.assistant.start_interaction().unwrap();
        self.assistant.sync_host().await;
    }

    /// Turn interaction mode off and let the assistant observe it.
    pub async fn turn_off(&self) {
        self.workspace.set_interaction_active(false);
        self.assistant.sync_host().await;
    }

    /// Notifications published since the last call.
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        let mut drained = Vec::new();
        while let Ok(n) = self.notes.try_recv() {
            drained.push(n);
        }
        drained
    }
}

/// Wait until the session satisfies `predicate` and return that snapshot.
pub async fn wait_for_session(
    rx: &mut watch::Receiver<SessionSnapshot>,
    predicate: impl FnMut(&SessionSnapshot) -> bool,
) -> SessionSnapshot {
    tokio::time::timeout(WAIT, rx.wait_for(predicate))
        .await
        .expect("timed out waiting for session")
        .expect("session channel closed")
        .clone()
}
