//! Private working copy used while a marker is being edited.
//!
//! The renderer keeps seeing the stored record until the draft is committed;
//! committing replaces the stored entry in one assignment.

use crate::constants::NEW_MARKER_NAME;
use crate::marker::MarkerRecord;
use crate::store::MarkerStore;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DraftTarget {
    New,
    Existing(usize),
}

#[derive(Clone, Debug, PartialEq)]
pub struct MarkerDraft {
    target: DraftTarget,
    pub record: MarkerRecord,
}

impl MarkerDraft {
    pub fn new_marker() -> Self {
        Self {
            target: DraftTarget::New,
            record: MarkerRecord {
                name: NEW_MARKER_NAME.to_string(),
                ..MarkerRecord::default()
            },
        }
    }

    /// Copies the stored record at `index`, if any.
    pub fn edit(store: &MarkerStore, index: usize) -> Option<Self> {
        store.get(index).map(|record| Self {
            target: DraftTarget::Existing(index),
            record: record.clone(),
        })
    }

    pub fn target(&self) -> DraftTarget {
        self.target
    }

    /// The record to draw on top of the stored list while editing.
    pub fn preview(&self) -> &MarkerRecord {
        &self.record
    }

    /// Discards the draft; the store never saw it.
    pub fn cancel(self) {}

    /// Adds or replaces in `store`. Returns false if the edited index no
    /// longer exists, in which case nothing changes.
    pub fn commit(self, store: &mut MarkerStore) -> bool {
        match self.target {
            DraftTarget::New => {
                store.add(self.record);
                true
            }
            DraftTarget::Existing(index) => store.replace_at(index, self.record),
        }
    }
}
