//! Workout log: the stored list of workouts and its sorted display.
//!
//! The stored order is insertion order. Sorting only changes the display
//! projection; deletions by display position are resolved to a record id
//! before anything is removed.
//!
//! If the stored list could not be read at startup, nothing is written over
//! it. Each later change retries the read and appends to what is stored.

use std::cmp::Reverse;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::types::{WorkoutDraft, WorkoutRecord};
use crate::error::ValidationError;
use crate::storage::kv::keys;
use crate::storage::{PendingWrite, PersistenceError, Persister};

/// Display order for the workout list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Most recent first
    #[default]
    Date,
    /// Alphabetical by name
    Name,
}

impl SortOrder {
    pub const ALL: [SortOrder; 2] = [SortOrder::Date, SortOrder::Name];

    /// Get display name.
    pub fn label(&self) -> &'static str {
        match self {
            SortOrder::Date => "Date",
            SortOrder::Name => "Name",
        }
    }
}

/// Persisted list of workouts.
pub struct WorkoutLog {
    records: Vec<WorkoutRecord>,
    sort_order: SortOrder,
    persister: Persister,
    restored: bool,
}

impl WorkoutLog {
    /// Create an empty log.
    pub fn new(persister: Persister) -> Self {
        Self {
            records: Vec::new(),
            sort_order: SortOrder::default(),
            persister,
            restored: true,
        }
    }

    /// Create a log from storage.
    ///
    /// A failed read starts empty and holds back writes until a retry
    /// succeeds. A malformed list is backed up and then treated as empty.
    pub fn load(persister: Persister) -> Self {
        let mut log = Self::new(persister);
        if let Err(e) = log.hydrate() {
            tracing::warn!(error = %e, "Could not restore workouts, starting empty");
        }
        log
    }

    /// Replace the in-memory list with the stored one.
    pub fn hydrate(&mut self) -> Result<(), PersistenceError> {
        match self.read_stored() {
            Ok(records) => {
                tracing::info!(count = records.len(), "Restored workouts");
                self.records = records;
                self.restored = true;
                Ok(())
            }
            Err(e) => {
                self.restored = false;
                Err(e)
            }
        }
    }

    /// Whether the stored list has been read. Until then changes are not saved.
    pub fn is_restored(&self) -> bool {
        self.restored
    }

    fn read_stored(&self) -> Result<Vec<WorkoutRecord>, PersistenceError> {
        Ok(self
            .persister
            .restore_json(keys::WORKOUTS)?
            .unwrap_or_default())
    }

    /// Records in stored order.
    pub fn records(&self) -> &[WorkoutRecord] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Current display order.
    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    /// Change the display order. Stored order is untouched.
    pub fn set_sort_order(&mut self, order: SortOrder) {
        self.sort_order = order;
    }

    /// Records in display order.
    pub fn view(&self) -> Vec<&WorkoutRecord> {
        self.display_indices()
            .into_iter()
            .map(|i| &self.records[i])
            .collect()
    }

    /// Stored positions in display order. Ties keep stored order.
    fn display_indices(&self) -> Vec<usize> {
        match self.sort_order {
            SortOrder::Date => {
                let mut keyed: Vec<(Reverse<Option<NaiveDate>>, usize)> = self
                    .records
                    .iter()
                    .enumerate()
                    .map(|(i, r)| (Reverse(r.date_key()), i))
                    .collect();
                keyed.sort_by(|a, b| a.0.cmp(&b.0));
                keyed.into_iter().map(|(_, i)| i).collect()
            }
            SortOrder::Name => {
                let mut keyed: Vec<((String, String), usize)> = self
                    .records
                    .iter()
                    .enumerate()
                    .map(|(i, r)| (r.name_key(), i))
                    .collect();
                keyed.sort_by(|a, b| a.0.cmp(&b.0));
                keyed.into_iter().map(|(_, i)| i).collect()
            }
        }
    }

    /// Add the drafted workout dated today and clear the draft.
    pub fn add_workout(&mut self, draft: &mut WorkoutDraft) -> Result<PendingWrite, ValidationError> {
        self.add_workout_on(draft, Local::now().date_naive())
    }

    /// Add the drafted workout with an explicit date and clear the draft.
    ///
    /// A draft without a name is rejected and left as it was.
    pub fn add_workout_on(
        &mut self,
        draft: &mut WorkoutDraft,
        date: NaiveDate,
    ) -> Result<PendingWrite, ValidationError> {
        let record = draft.to_record(date)?;
        tracing::debug!(id = %record.id, name = %record.name, "Adding workout");

        self.records.push(record);
        draft.clear();
        Ok(self.persist())
    }

    /// Remove the record shown at `display_index` in the current sort order.
    pub fn remove_workout(
        &mut self,
        display_index: usize,
    ) -> Result<(WorkoutRecord, PendingWrite), ValidationError> {
        let id = self
            .view()
            .get(display_index)
            .map(|r| r.id)
            .ok_or(ValidationError::WorkoutIndexOutOfRange(display_index))?;
        self.remove_by_id(id)
    }

    /// Remove the record with the given id.
    pub fn remove_by_id(&mut self, id: Uuid) -> Result<(WorkoutRecord, PendingWrite), ValidationError> {
        let position = self
            .records
            .iter()
            .position(|r| r.id == id)
            .ok_or(ValidationError::UnknownWorkout(id))?;

        let removed = self.records.remove(position);
        tracing::debug!(id = %removed.id, name = %removed.name, "Removed workout");
        Ok((removed, self.persist()))
    }

    fn persist(&mut self) -> PendingWrite {
        if !self.restored {
            match self.read_stored() {
                Ok(stored) => {
                    let added = std::mem::replace(&mut self.records, stored);
                    tracing::info!(
                        stored = self.records.len(),
                        added = added.len(),
                        "Restored workouts on retry"
                    );
                    self.records.extend(added);
                    self.restored = true;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Workouts are still unreadable");
                    return self.persister.refuse(keys::WORKOUTS);
                }
            }
        }
        self.persister.set_json(keys::WORKOUTS, &self.records)
    }
}
