//! Replay of a session script through the full assistant stack.
//!
//! The script's events are published on a canvas bus and consumed by an
//! [`EventBridge`], exactly as a live canvas would. Each event is awaited
//! before the next one is published.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use shapeassist_core::annotation::ObjectState;
use shapeassist_core::error::CoreError;
use shapeassist_events::{
    bus::DEFAULT_CAPACITY, CanvasEvent, EventBus, InteractOptions, Notification,
    NotificationLevel,
};
use shapeassist_inference::{InferenceError, InferenceService, LambdaApi};
use shapeassist_pipeline::canvas::Canvas;
use shapeassist_pipeline::{
    Collaborators, EventBridge, MemoryWorkspace, SessionSnapshot, ShapeAssistant,
};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::config::ReplayConfig;
use crate::script::{ScriptError, SessionScript};

/// How long a single refinement or the session end may take.
pub const STEP_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error(transparent)]
    Script(#[from] ScriptError),

    #[error(transparent)]
    Inference(#[from] InferenceError),

    #[error(transparent)]
    Session(#[from] CoreError),

    #[error("Timed out waiting for {0}")]
    Stalled(&'static str),

    #[error("Session state channel closed")]
    SessionClosed,

    #[error("Event bridge task failed: {0}")]
    Bridge(#[from] tokio::task::JoinError),
}

/// What a replay left behind.
#[derive(Debug, Clone, Serialize)]
pub struct ReplayReport {
    /// Objects in the collection after the session ended.
    pub objects: Vec<ObjectState>,
    /// Interaction events handled, failed ones included.
    pub refinements: u32,
    /// Messages of the error notifications raised during the session.
    pub failures: Vec<String>,
}

/// Canvas stand-in that only logs the commands it receives.
pub struct LoggingCanvas;

impl Canvas for LoggingCanvas {
    fn interact(&self, options: InteractOptions) {
        tracing::debug!(
            enabled = options.enabled,
            min_vertices = options.min_vertices,
            "Canvas interact",
        );
    }

    fn cancel(&self) {
        tracing::debug!("Canvas cancel");
    }
}

/// Load the configured script and replay it against the inference server.
pub async fn run(config: &ReplayConfig) -> Result<ReplayReport, ReplayError> {
    let mut script = SessionScript::load(&config.session_script)?;
    let api = Arc::new(LambdaApi::new(config.lambda_api_url.clone()));

    if script.interactors.is_none() {
        let interactors = api.list_interactors().await?;
        tracing::info!(
            count = interactors.len(),
            api_url = api.api_url(),
            "Fetched interactors",
        );
        script.interactors = Some(interactors);
    }

    replay(script, api, config.canvas_event_capacity).await
}

/// Replay `script` using `inference` for every refinement.
pub async fn replay(
    script: SessionScript,
    inference: Arc<dyn InferenceService>,
    canvas_event_capacity: usize,
) -> Result<ReplayReport, ReplayError> {
    let SessionScript {
        task,
        frame,
        interactor,
        label,
        labels,
        interactors,
        events,
    } = script;

    let workspace = Arc::new(MemoryWorkspace::new(
        task,
        frame,
        interactors.unwrap_or_default(),
        labels,
    ));
    let notifications = Arc::new(EventBus::new(DEFAULT_CAPACITY));
    let mut notes = notifications.subscribe();

    let assistant = Arc::new(ShapeAssistant::new(
        Collaborators {
            inference,
            collection: workspace.clone(),
            host: workspace.clone(),
            canvas: Arc::new(LoggingCanvas),
        },
        workspace.subscribe(),
        Arc::clone(&notifications),
    ));

    let canvas_bus = EventBus::new(canvas_event_capacity);
    let cancel = CancellationToken::new();
    let bridge = EventBridge::new(Arc::clone(&assistant)).spawn(&canvas_bus, cancel.clone());
    let mut session = assistant.subscribe_session();

    assistant.select_interactor(&interactor)?;
    assistant.select_label(label)?;
    assistant.start_interaction()?;

    notifications.publish(Notification::info(
        "Replay started",
        format!("{} interaction(s) on task {task}, frame {frame}", events.len()),
    ));

    for (index, event) in events.into_iter().enumerate() {
        let expected = index as u32 + 1;
        canvas_bus.publish(CanvasEvent::Interacted(event));
        let snapshot = wait_for(&mut session, "a refinement", |s| {
            s.refinements >= expected
        })
        .await?;
        tracing::info!(
            event = expected,
            object_id = ?snapshot.object_id,
            "Interaction replayed",
        );
    }

    let refinements = assistant.session().refinements;
    workspace.set_interaction_active(false);
    wait_for(&mut session, "the session to end", |s| !s.is_active()).await?;

    cancel.cancel();
    bridge.await?;

    let mut failures = Vec::new();
    while let Ok(note) = notes.try_recv() {
        match note.level {
            NotificationLevel::Error => {
                tracing::warn!(title = %note.title, message = %note.message, "Replay error");
                failures.push(note.message);
            }
            NotificationLevel::Info => {
                tracing::info!(title = %note.title, message = %note.message, "Replay notice");
            }
        }
    }

    let objects = workspace.objects();
    for object in &objects {
        tracing::info!(
            client_id = ?object.client_id,
            label_id = object.label_id,
            vertices = object.vertex_count(),
            "Replayed object",
        );
    }

    Ok(ReplayReport {
        objects,
        refinements,
        failures,
    })
}

async fn wait_for(
    session: &mut watch::Receiver<SessionSnapshot>,
    what: &'static str,
    predicate: impl FnMut(&SessionSnapshot) -> bool,
) -> Result<SessionSnapshot, ReplayError> {
    match tokio::time::timeout(STEP_TIMEOUT, session.wait_for(predicate)).await {
        Ok(Ok(snapshot)) => Ok(snapshot.clone()),
        Ok(Err(_)) => Err(ReplayError::SessionClosed),
        Err(_) => Err(ReplayError::Stalled(what)),
    }
}
