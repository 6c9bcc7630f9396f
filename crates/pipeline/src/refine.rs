//! Per-event refinement: clicks in, one created or updated polygon out.
//!
//! Each call makes exactly one inference round-trip and at most one
//! create-or-update against the host, never both.

use std::sync::Arc;

use shapeassist_core::annotation::{find_object, ObjectState};
use shapeassist_core::geometry::collect_clicked_points;
use shapeassist_core::types::{ClientId, LabelId};
use shapeassist_events::InteractionEvent;
use shapeassist_inference::{InferenceService, RefineRequest};

use crate::collection::AnnotationCollection;
use crate::error::{CollectionError, RefineError};
use crate::host::{HostActions, HostState};
use crate::session::SessionSnapshot;

/// What a successful refinement did to the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefineOutcome {
    Created { client_id: ClientId },
    Updated { client_id: ClientId },
}

impl RefineOutcome {
    pub fn client_id(&self) -> ClientId {
        match self {
            Self::Created { client_id } | Self::Updated { client_id } => *client_id,
        }
    }
}

pub struct RefinementPipeline {
    inference: Arc<dyn InferenceService>,
    collection: Arc<dyn AnnotationCollection>,
    host: Arc<dyn HostActions>,
}

impl RefinementPipeline {
    pub fn new(
        inference: Arc<dyn InferenceService>,
        collection: Arc<dyn AnnotationCollection>,
        host: Arc<dyn HostActions>,
    ) -> Self {
        Self {
            inference,
            collection,
            host,
        }
    }

    /// Refine the session's shape with the clicks carried by `event`.
    pub async fn refine(
        &self,
        session: &SessionSnapshot,
        host: &HostState,
        event: &InteractionEvent,
    ) -> Result<RefineOutcome, RefineError> {
        if !host.interaction_active {
            return Err(RefineError::InteractionInactive);
        }

        let interactor = session
            .selection
            .interactor
            .as_ref()
            .ok_or(RefineError::NoSelection("interactor"))?;

        let points = collect_clicked_points(&event.shapes).map_err(RefineError::Malformed)?;

        // Resolve the target before spending an inference call on it.
        let target = match session.object_id {
            Some(client_id) => {
                let object = find_object(&host.objects, client_id)
                    .ok_or(RefineError::ObjectNotLoaded(client_id))?;
                Target::Existing {
                    client_id,
                    object: object.clone(),
                }
            }
            None => {
                let label = session
                    .selection
                    .label
                    .as_ref()
                    .ok_or(RefineError::NoSelection("label"))?;
                Target::New { label_id: label.id }
            }
        };

        let request = RefineRequest {
            task: host.task,
            frame: host.frame,
            points,
        };
        let polygon = self.inference.refine(host.task, interactor, &request).await?;

        match target {
            Target::New { label_id } => {
                let object = ObjectState::polygon(host.frame, label_id, &polygon, event.z_order);
                let client_id = self
                    .collection
                    .put(vec![object])
                    .await?
                    .first()
                    .copied()
                    .ok_or(RefineError::EmptyPersistResult)?;

                self.finalize_created(client_id).await?;

                tracing::debug!(client_id, vertices = polygon.len(), "Created session object");
                Ok(RefineOutcome::Created { client_id })
            }
            Target::Existing {
                client_id,
                mut object,
            } => {
                object.replace_points(&polygon);
                self.host.update_annotations(vec![object]).await?;

                tracing::debug!(client_id, vertices = polygon.len(), "Updated session object");
                Ok(RefineOutcome::Updated { client_id })
            }
        }
    }

    /// Refresh the display and freeze history after the first create.
    ///
    /// Also used to retry a create whose follow-up failed.
    pub async fn finalize_created(&self, client_id: ClientId) -> Result<(), RefineError> {
        let finalized: Result<(), CollectionError> = async {
            self.host.fetch_annotations().await?;
            self.collection.freeze(true).await
        }
        .await;

        finalized.map_err(|source| RefineError::Incomplete { client_id, source })
    }
}

enum Target {
    New { label_id: LabelId },
    Existing {
        client_id: ClientId,
        object: ObjectState,
    },
}
