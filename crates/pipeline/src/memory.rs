//! In-memory host application and annotation collection.
//!
//! [`MemoryWorkspace`] stands in for the real host: it persists objects
//! with sequential client ids, tracks the history freeze, and publishes
//! [`HostState`] snapshots through a `watch` channel. Loaded objects are
//! only refreshed on [`HostActions::fetch_annotations`], like a real host.
//! Every call is journaled so callers can inspect what the assistant did.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use shapeassist_core::annotation::ObjectState;
use shapeassist_core::interactor::Interactor;
use shapeassist_core::label::Label;
use shapeassist_core::types::{ClientId, FrameNumber, LabelId, TaskId};
use tokio::sync::watch;

use crate::collection::AnnotationCollection;
use crate::error::CollectionError;
use crate::host::{HostActions, HostState};

/// One call received by the workspace.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkspaceCall {
    StartInteraction { interactor: String, label: LabelId },
    Put { client_ids: Vec<ClientId> },
    Update { client_ids: Vec<ClientId> },
    Fetch,
    Freeze(bool),
}

#[derive(Default)]
struct Store {
    objects: Vec<ObjectState>,
    next_client_id: ClientId,
    frozen: bool,
    journal: Vec<WorkspaceCall>,
}

pub struct MemoryWorkspace {
    state: watch::Sender<HostState>,
    store: Mutex<Store>,
}

impl MemoryWorkspace {
    pub fn new(
        task: TaskId,
        frame: FrameNumber,
        interactors: Vec<Interactor>,
        labels: Vec<Label>,
    ) -> Self {
        let (state, _) = watch::channel(HostState {
            task,
            frame,
            interactors,
            labels,
            objects: Vec::new(),
            interaction_active: false,
            interaction_epoch: 0,
        });
        Self {
            state,
            store: Mutex::new(Store {
                next_client_id: 1,
                ..Default::default()
            }),
        }
    }

    /// Receiver for the host snapshots, to hand to the assistant.
    pub fn subscribe(&self) -> watch::Receiver<HostState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> HostState {
        self.state.borrow().clone()
    }

    /// Flip the host's interaction-mode flag. Turning it off starts a new
    /// interaction epoch.
    pub fn set_interaction_active(&self, active: bool) {
        self.state.send_if_modified(|state| {
            let changed = state.interaction_active != active;
            if changed && !active {
                state.interaction_epoch += 1;
            }
            state.interaction_active = active;
            changed
        });
    }

    /// Persisted objects, in creation order.
    pub fn objects(&self) -> Vec<ObjectState> {
        self.lock().objects.clone()
    }

    pub fn is_frozen(&self) -> bool {
        self.lock().frozen
    }

    pub fn journal(&self) -> Vec<WorkspaceCall> {
        self.lock().journal.clone()
    }

    /// The `freeze` arguments received so far, in order.
    pub fn freeze_calls(&self) -> Vec<bool> {
        self.lock()
            .journal
            .iter()
            .filter_map(|call| match call {
                WorkspaceCall::Freeze(frozen) => Some(*frozen),
                _ => None,
            })
            .collect()
    }

    fn lock(&self) -> MutexGuard<'_, Store> {
        self.store.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl AnnotationCollection for MemoryWorkspace {
    async fn put(&self, objects: Vec<ObjectState>) -> Result<Vec<ClientId>, CollectionError> {
        let mut store = self.lock();
        let mut client_ids = Vec::with_capacity(objects.len());

        for mut object in objects {
            let client_id = store.next_client_id;
            store.next_client_id += 1;
            object.client_id = Some(client_id);
            store.objects.push(object);
            client_ids.push(client_id);
        }

        tracing::debug!(?client_ids, "Objects persisted");
        store.journal.push(WorkspaceCall::Put {
            client_ids: client_ids.clone(),
        });
        Ok(client_ids)
    }

    async fn freeze(&self, frozen: bool) -> Result<(), CollectionError> {
        let mut store = self.lock();
        store.frozen = frozen;
        store.journal.push(WorkspaceCall::Freeze(frozen));
        tracing::debug!(frozen, "History freeze changed");
        Ok(())
    }
}

#[async_trait]
impl HostActions for MemoryWorkspace {
    fn start_interaction(&self, interactor: &Interactor, label: &Label) {
        self.lock().journal.push(WorkspaceCall::StartInteraction {
            interactor: interactor.id.clone(),
            label: label.id,
        });
        self.set_interaction_active(true);
    }

    async fn update_annotations(&self, objects: Vec<ObjectState>) -> Result<(), CollectionError> {
        let client_ids = {
            let mut store = self.lock();
            let mut client_ids = Vec::with_capacity(objects.len());
            for object in &objects {
                let stored = match object.client_id {
                    Some(id) => store.objects.iter_mut().find(|o| o.client_id == Some(id)),
                    None => None,
                };
                let stored = stored.ok_or_else(|| {
                    CollectionError::Rejected(format!(
                        "object {:?} is not in the collection",
                        object.client_id
                    ))
                })?;
                *stored = object.clone();
                client_ids.extend(object.client_id);
            }
            store.journal.push(WorkspaceCall::Update {
                client_ids: client_ids.clone(),
            });
            client_ids
        };

        // Updated states are what the host displays from now on.
        self.state.send_modify(|state| {
            for object in &objects {
                if let Some(loaded) = state
                    .objects
                    .iter_mut()
                    .find(|o| o.client_id == object.client_id)
                {
                    *loaded = object.clone();
                }
            }
        });

        tracing::debug!(?client_ids, "Objects updated");
        Ok(())
    }

    async fn fetch_annotations(&self) -> Result<(), CollectionError> {
        let objects = {
            let mut store = self.lock();
            store.journal.push(WorkspaceCall::Fetch);
            store.objects.clone()
        };
        let frame = self.state.borrow().frame;

        self.state.send_modify(|state| {
            state.objects = objects.into_iter().filter(|o| o.frame == frame).collect();
        });
        Ok(())
    }
}
