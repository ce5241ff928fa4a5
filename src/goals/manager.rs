//! Goal list management.
//!
//! Ids come from a counter stored next to the list, so an id is never handed
//! out twice even after goals are removed.
//!
//! If the stored list could not be read at startup, nothing is written over
//! it. Each later change retries the read; goals added in the meantime are
//! appended with fresh ids.

use super::types::GoalRecord;
use crate::error::ValidationError;
use crate::storage::kv::keys;
use crate::storage::{PendingWrite, PersistenceError, Persister};

/// Manager for the persisted goal list.
pub struct GoalManager {
    goals: Vec<GoalRecord>,
    /// `None` once every id has been handed out
    next_id: Option<u64>,
    persister: Persister,
    restored: bool,
}

impl GoalManager {
    /// Create an empty goal list.
    pub fn new(persister: Persister) -> Self {
        Self {
            goals: Vec::new(),
            next_id: Some(1),
            persister,
            restored: true,
        }
    }

    /// Create a goal list from storage.
    ///
    /// A failed read starts empty and holds back writes until a retry
    /// succeeds. A malformed list is backed up and then treated as empty.
    pub fn load(persister: Persister) -> Self {
        let mut manager = Self::new(persister);
        if let Err(e) = manager.hydrate() {
            tracing::warn!(error = %e, "Could not restore goals, starting empty");
        }
        manager
    }

    /// Replace the in-memory list with the stored one.
    pub fn hydrate(&mut self) -> Result<(), PersistenceError> {
        match self.read_stored() {
            Ok((goals, next_id)) => {
                self.goals = goals;
                self.next_id = next_id;
                self.restored = true;
                tracing::info!(count = self.goals.len(), next_id = ?self.next_id, "Restored goals");
                Ok(())
            }
            Err(e) => {
                self.restored = false;
                Err(e)
            }
        }
    }

    fn read_stored(&self) -> Result<(Vec<GoalRecord>, Option<u64>), PersistenceError> {
        let goals: Vec<GoalRecord> = self.persister.restore_json(keys::GOALS)?.unwrap_or_default();

        let stored_next = match self.persister.get(keys::GOALS_NEXT_ID)? {
            Some(raw) => raw.trim().parse::<u64>().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, "Ignoring malformed goal counter");
                1
            }),
            None => 1,
        };

        // Lists saved before the counter existed used count + 1 ids.
        let after_max = match goals.iter().map(|g| g.id).max() {
            Some(max) => max.checked_add(1),
            None => Some(1),
        };
        if after_max.is_none() {
            tracing::warn!("Stored goal ids are exhausted, new goals cannot be added");
        }

        Ok((goals, after_max.map(|after| after.max(stored_next))))
    }

    /// Goals in creation order.
    pub fn goals(&self) -> &[GoalRecord] {
        &self.goals
    }

    /// Number of goals.
    pub fn len(&self) -> usize {
        self.goals.len()
    }

    /// Whether there are no goals.
    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }

    /// Id the next goal will get, or `None` when ids are exhausted.
    pub fn next_id(&self) -> Option<u64> {
        self.next_id
    }

    /// Whether the stored list has been read. Until then changes are not saved.
    pub fn is_restored(&self) -> bool {
        self.restored
    }

    /// Add a goal. Blank text is rejected.
    pub fn add_goal(&mut self, text: &str) -> Result<Vec<PendingWrite>, ValidationError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ValidationError::EmptyGoalText);
        }

        let id = self.take_id().ok_or(ValidationError::GoalIdsExhausted)?;
        let goal = GoalRecord::new(id, text);
        tracing::debug!(id = goal.id, "Adding goal");
        self.goals.push(goal);

        Ok(self.persist())
    }

    /// Remove a goal by id. Its id is not reused.
    pub fn remove_goal(&mut self, id: u64) -> Result<(GoalRecord, Vec<PendingWrite>), ValidationError> {
        let position = self
            .goals
            .iter()
            .position(|g| g.id == id)
            .ok_or(ValidationError::UnknownGoal(id))?;

        let removed = self.goals.remove(position);
        tracing::debug!(id, "Removed goal");
        Ok((removed, self.persist()))
    }

    fn take_id(&mut self) -> Option<u64> {
        let id = self.next_id?;
        self.next_id = id.checked_add(1);
        if self.next_id.is_none() {
            tracing::warn!(id, "Handed out the last goal id");
        }
        Some(id)
    }

    /// Put the stored goals first and renumber the ones added since.
    fn adopt_stored(&mut self, stored: Vec<GoalRecord>, next_id: Option<u64>) {
        let added = std::mem::replace(&mut self.goals, stored);
        self.next_id = next_id;
        for goal in added {
            match self.take_id() {
                Some(id) => self.goals.push(GoalRecord::new(id, goal.text)),
                None => tracing::warn!(text = %goal.text, "No id left, goal dropped"),
            }
        }
        self.restored = true;
    }

    fn persist(&mut self) -> Vec<PendingWrite> {
        if !self.restored {
            match self.read_stored() {
                Ok((stored, next_id)) => {
                    tracing::info!(stored = stored.len(), "Restored goals on retry");
                    self.adopt_stored(stored, next_id);
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Goals are still unreadable");
                    return vec![
                        self.persister.refuse(keys::GOALS),
                        self.persister.refuse(keys::GOALS_NEXT_ID),
                    ];
                }
            }
        }

        let mut writes = vec![self.persister.set_json(keys::GOALS, &self.goals)];
        if let Some(next_id) = self.next_id {
            writes.push(self.persister.set(keys::GOALS_NEXT_ID, next_id.to_string()));
        }
        writes
    }
}
