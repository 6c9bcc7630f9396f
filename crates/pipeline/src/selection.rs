//! Interactor and label selection.
//!
//! Selecting an unknown id empties that slot and reports
//! [`CoreError::NotFound`]; the caller decides whether to surface it.

use shapeassist_core::error::CoreError;
use shapeassist_core::interactor::{find_interactor, Interactor};
use shapeassist_core::label::{find_label, Label};
use shapeassist_core::types::LabelId;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    pub interactor: Option<Interactor>,
    pub label: Option<Label>,
}

impl Selection {
    /// Default selection: the first available interactor and label.
    pub fn first_of(interactors: &[Interactor], labels: &[Label]) -> Self {
        Self {
            interactor: interactors.first().cloned(),
            label: labels.first().cloned(),
        }
    }

    pub fn select_interactor(
        &mut self,
        available: &[Interactor],
        id: &str,
    ) -> Result<(), CoreError> {
        match find_interactor(available, id) {
            Ok(interactor) => {
                self.interactor = Some(interactor.clone());
                Ok(())
            }
            Err(e) => {
                self.interactor = None;
                Err(e)
            }
        }
    }

    pub fn select_label(&mut self, available: &[Label], id: LabelId) -> Result<(), CoreError> {
        match find_label(available, id) {
            Ok(label) => {
                self.label = Some(label.clone());
                Ok(())
            }
            Err(e) => {
                self.label = None;
                Err(e)
            }
        }
    }
}
